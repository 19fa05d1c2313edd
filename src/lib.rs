//! tvdb_client - Blocking client for TheTVDB XML API
//!
//! This library builds requests against the service's dynamic (`*.php`) and
//! static (`/api/<key>/...xml`) endpoints and decodes the XML responses into
//! typed records: series, episodes, ratings, languages and actors.
//!
//! # Examples
//!
//! ```no_run
//! use tvdb_client::{ClientConfig, TvdbClient};
//!
//! let config = ClientConfig::new("0123456789ABCDEF").unwrap();
//! let client = TvdbClient::new(config);
//!
//! let results = client.search_series("The Simpsons", None).unwrap();
//! for summary in &results {
//!     println!("{} ({:?})", summary.info.name, summary.info.first_aired);
//! }
//!
//! let series = client.series_all_by_id(71663, Some("en")).unwrap();
//! println!("{} has {} episodes", series.info.name, series.episode_count());
//! ```

mod client;
mod config;
pub mod metadata;

pub use client::{MAX_RATING, TvdbClient, TvdbError};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use metadata::fields::FieldError;
pub use metadata::{
    Actor, Episode, EpisodeNumbering, ImageFlag, Language, Rating, RemoteService, Series,
    SeriesInfo, SeriesRatings, SeriesSummary,
};

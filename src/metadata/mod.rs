//! Typed records for TheTVDB series, episodes, ratings, languages and actors.
//!
//! These structures are what the client hands back to callers. The raw XML
//! shape lives in `tvdb_types`, which converts into the records below.

pub mod fields;
pub(crate) mod tvdb_types;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Fields shared by every series-like record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesInfo {
    /// TheTVDB series id
    pub id: u64,
    /// Language code of the record (may be empty on base series records)
    pub language: String,
    /// The series name
    pub name: String,
    /// Relative path of the series banner image
    pub banner_path: String,
    /// Series synopsis
    pub overview: String,
    /// Date the first episode aired
    pub first_aired: Option<NaiveDate>,
    /// IMDB identifier (e.g. `tt0096697`)
    pub imdb_id: String,
    /// Zap2it identifier
    pub zap2it_id: String,
    /// Broadcasting network
    pub network: String,
}

/// Reduced series record returned by searches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSummary {
    #[serde(flatten)]
    pub info: SeriesInfo,
    /// Alternative names of the series
    pub aliases: Vec<String>,
}

/// Full series record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    #[serde(flatten)]
    pub info: SeriesInfo,
    pub actors: Vec<String>,
    pub airs_day_of_week: String,
    pub airs_time: String,
    pub content_rating: String,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub status: String,
    pub added: Option<NaiveDateTime>,
    pub added_by: Option<u64>,
    pub fanart_path: String,
    pub poster_path: String,
    pub last_updated: Option<DateTime<Utc>>,
    /// Episodes grouped by season number
    ///
    /// Only populated by [`crate::TvdbClient::series_all_by_id`].
    pub seasons: BTreeMap<u32, Vec<Episode>>,
}

impl Series {
    /// Total number of episodes across all populated seasons
    pub fn episode_count(&self) -> usize {
        self.seasons.values().map(Vec::len).sum()
    }
}

/// A single episode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Episode {
    pub id: u64,
    pub series_id: u64,
    pub season_id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    pub dvd_season: Option<u32>,
    /// DVD episode number as published (e.g. `1.0`)
    pub dvd_episode_number: String,
    pub dvd_chapter: String,
    pub dvd_disc_id: String,
    pub absolute_number: Option<u32>,
    pub combined_season: Option<u32>,
    pub combined_episode_number: String,
    pub name: String,
    pub overview: String,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    pub guest_stars: Vec<String>,
    pub first_aired: Option<NaiveDate>,
    pub imdb_id: String,
    pub language: String,
    pub production_code: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    /// Relative path of the episode thumbnail
    pub filename: String,
    pub image_flag: Option<ImageFlag>,
    pub thumb_added: Option<NaiveDateTime>,
    pub thumb_height: Option<u32>,
    pub thumb_width: Option<u32>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// User and community rating of a series or an episode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rating {
    /// Series id for series ratings, episode id for episode ratings
    pub id: u64,
    pub user_rating: Option<i32>,
    pub community_rating: Option<f64>,
}

/// Ratings of one series together with the ratings of its episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesRatings {
    pub series: Rating,
    pub episodes: Vec<Rating>,
}

/// A content language offered by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Language {
    pub id: u32,
    pub abbreviation: String,
    pub name: String,
}

/// An actor credited on a series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: u64,
    pub name: String,
    pub roles: Vec<String>,
    pub sort_order: Option<u32>,
    /// Relative path of the actor image
    pub image_path: String,
}

/// External databases whose identifiers can be used to look up a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteService {
    Imdb,
    Zap2it,
}

impl RemoteService {
    /// Query parameter name used by `GetSeriesByRemoteID.php`
    pub fn query_key(self) -> &'static str {
        match self {
            RemoteService::Imdb => "imdbid",
            RemoteService::Zap2it => "zap2it",
        }
    }
}

/// Numbering scheme used to address an episode within its series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeNumbering {
    /// Aired order: season and episode number
    Default { season: u32, episode: u32 },
    /// DVD order: DVD season and DVD episode number
    Dvd { season: u32, episode: u32 },
    /// Absolute episode number across the whole series
    Absolute(u32),
}

impl EpisodeNumbering {
    /// Path segments identifying the episode below `series/<id>/`
    pub(crate) fn path_segments(self) -> Vec<String> {
        match self {
            EpisodeNumbering::Default { season, episode } => {
                vec!["default".to_string(), season.to_string(), episode.to_string()]
            }
            EpisodeNumbering::Dvd { season, episode } => {
                vec!["dvd".to_string(), season.to_string(), episode.to_string()]
            }
            EpisodeNumbering::Absolute(number) => {
                vec!["absolute".to_string(), number.to_string()]
            }
        }
    }
}

/// Quality and aspect flag attached to episode images (`EpImgFlag`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFlag {
    Aspect4x3,
    Aspect16x9,
    InvalidAspectRatio,
    TooSmall,
    BlackBars,
    ImproperActionShot,
    /// A value outside the documented range
    Unknown(u8),
}

impl ImageFlag {
    /// Numeric value as transmitted by the service
    pub fn value(self) -> u8 {
        match self {
            ImageFlag::Aspect4x3 => 1,
            ImageFlag::Aspect16x9 => 2,
            ImageFlag::InvalidAspectRatio => 3,
            ImageFlag::TooSmall => 4,
            ImageFlag::BlackBars => 5,
            ImageFlag::ImproperActionShot => 6,
            ImageFlag::Unknown(value) => value,
        }
    }

    /// Display name; unknown values render as their decimal value
    pub fn name(self) -> String {
        match self {
            ImageFlag::Aspect4x3 => "4:3".to_string(),
            ImageFlag::Aspect16x9 => "16x9".to_string(),
            ImageFlag::InvalidAspectRatio => "invalid aspect ratio".to_string(),
            ImageFlag::TooSmall => "image too small".to_string(),
            ImageFlag::BlackBars => "black bars".to_string(),
            ImageFlag::ImproperActionShot => "improper action shot".to_string(),
            ImageFlag::Unknown(value) => value.to_string(),
        }
    }
}

impl From<u8> for ImageFlag {
    fn from(value: u8) -> Self {
        match value {
            1 => ImageFlag::Aspect4x3,
            2 => ImageFlag::Aspect16x9,
            3 => ImageFlag::InvalidAspectRatio,
            4 => ImageFlag::TooSmall,
            5 => ImageFlag::BlackBars,
            6 => ImageFlag::ImproperActionShot,
            other => ImageFlag::Unknown(other),
        }
    }
}

impl fmt::Display for ImageFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for ImageFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// Groups a flat episode list by season number
///
/// Episodes within a season are ordered by episode number; episodes sharing
/// a number keep their original relative order.
pub(crate) fn group_by_season(episodes: Vec<Episode>) -> BTreeMap<u32, Vec<Episode>> {
    let mut seasons: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();

    for episode in episodes {
        seasons
            .entry(episode.season_number)
            .or_default()
            .push(episode);
    }

    for episodes in seasons.values_mut() {
        episodes.sort_by_key(|e| e.episode_number);
    }

    seasons
}

//! Blocking client for TheTVDB XML API.
//!
//! Every public method builds one request URL, performs a single GET and
//! decodes the XML body into the typed records from [`crate::metadata`].
//! Nothing is retried or cached; every failure is returned to the caller.

mod scrape;
mod urls;

use crate::config::ClientConfig;
use crate::metadata::tvdb_types::{
    TvdbAck, TvdbActors, TvdbData, TvdbFavorites, TvdbLanguages, TvdbRatings, TvdbSeries,
    TvdbSeriesSummary,
};
use crate::metadata::{
    Actor, Episode, EpisodeNumbering, Language, Rating, RemoteService, Series, SeriesRatings,
    SeriesSummary, group_by_season,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace, warn};
use url::Url;

/// Highest rating accepted by the rating endpoints
pub const MAX_RATING: i32 = 10;

/// Errors that can occur while talking to the service
#[derive(Debug, Error)]
pub enum TvdbError {
    /// The request could not be sent or the response body not be read
    #[error("Request for '{url}' failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// The service answered with a status other than 200
    #[error("Failed request for '{url}' got code '{status}'")]
    Status { url: String, status: u16 },

    /// The response body is not the expected XML document
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        source: quick_xml::DeError,
    },

    /// The response decoded but lacks the record that was asked for
    #[error("Response from '{url}' contains no <{element}> element")]
    MissingElement { url: String, element: &'static str },

    /// A rating outside of `0..=10` was passed
    #[error("Rating must be between 0 and 10 inclusive, got {0}")]
    InvalidRating(i32),

    /// A request URL could not be built from the configuration
    #[error("Failed to build request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Kind of item a user rating is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatedItem {
    Series,
    Episode,
}

impl RatedItem {
    fn as_str(self) -> &'static str {
        match self {
            RatedItem::Series => "series",
            RatedItem::Episode => "episode",
        }
    }
}

/// Client for TheTVDB XML API
///
/// The configuration is read-only after construction, so a client can be
/// cloned and shared between threads freely.
#[derive(Debug, Clone)]
pub struct TvdbClient {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl TvdbClient {
    /// Creates a client using a default HTTP transport
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::blocking::Client::new())
    }

    /// Creates a client on top of a preconfigured HTTP transport
    pub fn with_http_client(config: ClientConfig, http: reqwest::blocking::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Searches series by name (`GetSeries.php`)
    pub fn search_series(
        &self,
        name: &str,
        language: Option<&str>,
    ) -> Result<Vec<SeriesSummary>, TvdbError> {
        let language = self.language(language);
        let url = urls::dynamic_url(
            &self.config,
            "GetSeries.php",
            &[("seriesname", name), ("language", language)],
        )?;

        let data: TvdbData<TvdbSeriesSummary> = self.fetch_xml(&url)?;
        Ok(data.series.into_iter().map(SeriesSummary::from).collect())
    }

    /// Looks up a series by the identifier of an external database
    /// (`GetSeriesByRemoteID.php`)
    pub fn series_by_remote_id(
        &self,
        service: RemoteService,
        remote_id: &str,
        language: Option<&str>,
    ) -> Result<SeriesSummary, TvdbError> {
        let language = self.language(language);
        let url = urls::dynamic_url(
            &self.config,
            "GetSeriesByRemoteID.php",
            &[(service.query_key(), remote_id), ("language", language)],
        )?;

        let data: TvdbData<TvdbSeriesSummary> = self.fetch_xml(&url)?;
        first_element(data.series, &url, "Series").map(SeriesSummary::from)
    }

    /// Fetches the base series record (`series/<id>/<lang>.xml`)
    pub fn series_by_id(&self, series_id: u64, language: Option<&str>) -> Result<Series, TvdbError> {
        let language = self.language(language);
        let url = urls::static_url(
            &self.config,
            [
                "series".to_string(),
                series_id.to_string(),
                urls::language_document(language),
            ],
        )?;

        let data: TvdbData<TvdbSeries> = self.fetch_xml(&url)?;
        first_element(data.series, &url, "Series").map(Series::from)
    }

    /// Fetches the full series record including every episode
    /// (`series/<id>/all/<lang>.xml`)
    ///
    /// The episodes are grouped by season into [`Series::seasons`].
    pub fn series_all_by_id(
        &self,
        series_id: u64,
        language: Option<&str>,
    ) -> Result<Series, TvdbError> {
        let language = self.language(language);
        let url = urls::static_url(
            &self.config,
            [
                "series".to_string(),
                series_id.to_string(),
                "all".to_string(),
                urls::language_document(language),
            ],
        )?;

        let data: TvdbData<TvdbSeries> = self.fetch_xml(&url)?;
        let episodes: Vec<Episode> = data.episodes.into_iter().map(Episode::from).collect();
        let mut series = first_element(data.series, &url, "Series").map(Series::from)?;

        debug!(
            series_id,
            episode_count = episodes.len(),
            "Grouping episodes by season"
        );
        series.seasons = group_by_season(episodes);
        Ok(series)
    }

    /// Fetches a single episode by its id (`episodes/<id>/<lang>.xml`)
    pub fn episode_by_id(
        &self,
        episode_id: u64,
        language: Option<&str>,
    ) -> Result<Episode, TvdbError> {
        let language = self.language(language);
        let url = urls::static_url(
            &self.config,
            [
                "episodes".to_string(),
                episode_id.to_string(),
                urls::language_document(language),
            ],
        )?;

        self.fetch_episode(&url)
    }

    /// Fetches an episode by its position in a series, using aired, DVD or
    /// absolute numbering
    pub fn episode_by_series(
        &self,
        series_id: u64,
        numbering: EpisodeNumbering,
        language: Option<&str>,
    ) -> Result<Episode, TvdbError> {
        let language = self.language(language);
        let mut path = vec!["series".to_string(), series_id.to_string()];
        path.extend(numbering.path_segments());
        path.push(urls::language_document(language));
        let url = urls::static_url(&self.config, path)?;

        self.fetch_episode(&url)
    }

    /// Lists the actors of a series (`series/<id>/actors.xml`)
    pub fn actors(&self, series_id: u64) -> Result<Vec<Actor>, TvdbError> {
        let url = urls::static_url(
            &self.config,
            ["series".to_string(), series_id.to_string(), "actors.xml".to_string()],
        )?;

        let data: TvdbActors = self.fetch_xml(&url)?;
        Ok(data.actors.into_iter().map(Actor::from).collect())
    }

    /// Lists the languages content is available in (`languages.xml`)
    pub fn languages(&self) -> Result<Vec<Language>, TvdbError> {
        let url = urls::static_url(&self.config, ["languages.xml"])?;

        let data: TvdbLanguages = self.fetch_xml(&url)?;
        Ok(data.languages.into_iter().map(Language::from).collect())
    }

    /// Returns the ids of the series a user marked as favorite
    ///
    /// `account_id` is the account identifier shown on the user's account
    /// page, not the user name.
    pub fn user_favorites(&self, account_id: &str) -> Result<Vec<u64>, TvdbError> {
        self.user_favorites_request(&[("accountid", account_id)])
    }

    /// Adds a series to a user's favorites and returns the updated list
    pub fn add_user_favorite(&self, account_id: &str, series_id: u64) -> Result<Vec<u64>, TvdbError> {
        let series_id = series_id.to_string();
        self.user_favorites_request(&[
            ("accountid", account_id),
            ("type", "add"),
            ("seriesid", &series_id),
        ])
    }

    /// Removes a series from a user's favorites and returns the updated list
    pub fn remove_user_favorite(
        &self,
        account_id: &str,
        series_id: u64,
    ) -> Result<Vec<u64>, TvdbError> {
        let series_id = series_id.to_string();
        self.user_favorites_request(&[
            ("accountid", account_id),
            ("type", "remove"),
            ("seriesid", &series_id),
        ])
    }

    /// Returns the user's series ratings along with the community ratings
    pub fn user_ratings(&self, account_id: &str) -> Result<Vec<Rating>, TvdbError> {
        let url = urls::dynamic_url(
            &self.config,
            "GetRatingsForUser.php",
            &[("apikey", self.config.api_key()), ("accountid", account_id)],
        )?;

        let data: TvdbRatings = self.fetch_xml(&url)?;
        Ok(data.series.into_iter().map(Rating::from).collect())
    }

    /// Returns the user's rating of one series and of all its episodes
    pub fn user_series_ratings(
        &self,
        account_id: &str,
        series_id: u64,
    ) -> Result<SeriesRatings, TvdbError> {
        let series_id = series_id.to_string();
        let url = urls::dynamic_url(
            &self.config,
            "GetRatingsForUser.php",
            &[
                ("apikey", self.config.api_key()),
                ("accountid", account_id),
                ("seriesid", &series_id),
            ],
        )?;

        let data: TvdbRatings = self.fetch_xml(&url)?;
        let series = first_element(data.series, &url, "Series").map(Rating::from)?;
        Ok(SeriesRatings {
            series,
            episodes: data.episodes.into_iter().map(Rating::from).collect(),
        })
    }

    /// Sets the user's rating (0 to 10) of a series
    pub fn set_series_rating(
        &self,
        account_id: &str,
        series_id: u64,
        rating: i32,
    ) -> Result<(), TvdbError> {
        self.set_user_rating(account_id, RatedItem::Series, series_id, rating)
    }

    /// Sets the user's rating (0 to 10) of an episode
    pub fn set_episode_rating(
        &self,
        account_id: &str,
        episode_id: u64,
        rating: i32,
    ) -> Result<(), TvdbError> {
        self.set_user_rating(account_id, RatedItem::Episode, episode_id, rating)
    }

    /// Returns the preferred content language of a user
    pub fn user_language(&self, account_id: &str) -> Result<Language, TvdbError> {
        let url = urls::dynamic_url(
            &self.config,
            "User_PreferredLanguage.php",
            &[("accountid", account_id)],
        )?;

        let data: TvdbLanguages = self.fetch_xml(&url)?;
        first_element(data.languages, &url, "Language").map(Language::from)
    }

    /// Searches the HTML site search for series ids
    ///
    /// This scrapes the web page instead of using the XML API and is best
    /// effort only: a markup change on the site silently yields no ids.
    pub fn scrape_series_ids(&self, name: &str) -> Result<Vec<u64>, TvdbError> {
        let url = urls::site_search_url(&self.config, name)?;
        let html = self.fetch_body(&url)?;

        let ids = scrape::extract_series_ids(&html);
        debug!(%url, count = ids.len(), "Scraped series ids from site search");
        Ok(ids)
    }

    /// Searches the HTML site search and fetches the base record of each hit
    ///
    /// Hits whose series document cannot be decoded are skipped; any other
    /// failure aborts the whole search. At most `max_results` series are
    /// returned.
    pub fn scrape_series(
        &self,
        name: &str,
        max_results: usize,
        language: Option<&str>,
    ) -> Result<Vec<Series>, TvdbError> {
        let ids = self.scrape_series_ids(name)?;
        let mut series_list = Vec::with_capacity(ids.len().min(max_results));

        for series_id in ids {
            if series_list.len() >= max_results {
                break;
            }

            match self.series_by_id(series_id, language) {
                Ok(series) => series_list.push(series),
                Err(err @ (TvdbError::Decode { .. } | TvdbError::MissingElement { .. })) => {
                    warn!(series_id, error = %err, "Skipping series that failed to decode");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(series_list)
    }

    /// Resolves an optional language to the configured default
    fn language<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        match language {
            Some(language) if !language.trim().is_empty() => language,
            _ => self.config.default_language(),
        }
    }

    fn user_favorites_request(&self, query: &[(&str, &str)]) -> Result<Vec<u64>, TvdbError> {
        let url = urls::dynamic_url(&self.config, "User_Favorites.php", query)?;

        let data: TvdbFavorites = self.fetch_xml(&url)?;
        Ok(data.series)
    }

    fn set_user_rating(
        &self,
        account_id: &str,
        item: RatedItem,
        item_id: u64,
        rating: i32,
    ) -> Result<(), TvdbError> {
        if !(0..=MAX_RATING).contains(&rating) {
            return Err(TvdbError::InvalidRating(rating));
        }

        let item_id = item_id.to_string();
        let rating = rating.to_string();
        let url = urls::dynamic_url(
            &self.config,
            "User_Rating.php",
            &[
                ("accountid", account_id),
                ("itemtype", item.as_str()),
                ("itemid", &item_id),
                ("rating", &rating),
            ],
        )?;

        // The body echoes the site rating, which is not needed here
        let _: TvdbAck = self.fetch_xml(&url)?;
        Ok(())
    }

    fn fetch_episode(&self, url: &Url) -> Result<Episode, TvdbError> {
        let data: TvdbData<TvdbSeries> = self.fetch_xml(url)?;
        first_element(data.episodes, url, "Episode").map(Episode::from)
    }

    /// Performs a GET request and returns the body of a 200 response
    fn fetch_body(&self, url: &Url) -> Result<String, TvdbError> {
        debug!(%url, "Sending request");

        let response = self
            .http
            .get(url.as_str())
            .send()
            .map_err(|e| TvdbError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(TvdbError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| TvdbError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        trace!(%url, bytes = body.len(), "Received response");
        Ok(body)
    }

    /// Performs a GET request and decodes the XML body into `T`
    fn fetch_xml<T: DeserializeOwned>(&self, url: &Url) -> Result<T, TvdbError> {
        let body = self.fetch_body(url)?;

        quick_xml::de::from_str(&body).map_err(|e| TvdbError::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Takes the first decoded element or reports it as missing
fn first_element<T>(items: Vec<T>, url: &Url, element: &'static str) -> Result<T, TvdbError> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| TvdbError::MissingElement {
            url: url.to_string(),
            element,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TvdbClient {
        // Nothing listens on port 9; any request would fail with a transport error
        let config = ClientConfig::new("APIKEY")
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .unwrap();
        TvdbClient::new(config)
    }

    #[test]
    fn test_rating_out_of_range_is_rejected_before_any_request() {
        let client = client();

        assert!(matches!(
            client.set_series_rating("ACCOUNT", 71663, 11),
            Err(TvdbError::InvalidRating(11))
        ));
        assert!(matches!(
            client.set_episode_rating("ACCOUNT", 55452, -1),
            Err(TvdbError::InvalidRating(-1))
        ));
    }

    #[test]
    fn test_config_is_exposed_unchanged() {
        let config = ClientConfig::new("APIKEY")
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .unwrap()
            .with_default_language("de");
        let client = TvdbClient::new(config.clone());

        assert_eq!(client.config(), &config);
        assert_eq!(client.config().default_language(), "de");
    }

    #[test]
    fn test_language_falls_back_to_default() {
        let client = client();
        assert_eq!(client.language(None), "en");
        assert_eq!(client.language(Some("")), "en");
        assert_eq!(client.language(Some("de")), "de");
    }

    #[test]
    fn test_first_element_reports_missing_element() {
        let url = Url::parse("http://thetvdb.com/api/KEY/series/1/en.xml").unwrap();
        let err = first_element(Vec::<u64>::new(), &url, "Series").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Response from 'http://thetvdb.com/api/KEY/series/1/en.xml' contains no <Series> element"
        );
        assert_eq!(first_element(vec![1, 2], &url, "Series").unwrap(), 1);
    }

    #[test]
    fn test_invalid_rating_message() {
        assert_eq!(
            TvdbError::InvalidRating(11).to_string(),
            "Rating must be between 0 and 10 inclusive, got 11"
        );
    }
}

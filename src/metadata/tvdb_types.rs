/// TheTVDB XML response types for deserialization.
///
/// These structures mirror the element names of the service's XML documents
/// exactly and are converted into the public records afterwards. Ids and
/// episode numbers left empty by the service decode as 0.
use super::fields::{
    deserialize_date, deserialize_id_list, deserialize_image_flag, deserialize_nullable,
    deserialize_number_or_zero, deserialize_pipe_list, deserialize_timestamp,
    deserialize_unix_time,
};
use super::{
    Actor, Episode, ImageFlag, Language, Rating, Series, SeriesInfo, SeriesSummary,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The `<Data>` envelope used by most endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbData<S> {
    /// Series records (search hits or the one requested series)
    #[serde(rename = "Series")]
    pub series: Vec<S>,
    /// Episode records, in document order
    #[serde(rename = "Episode")]
    pub episodes: Vec<TvdbEpisode>,
}

/// The `<Data>` envelope returned by `GetRatingsForUser.php`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbRatings {
    /// Series ratings
    #[serde(rename = "Series")]
    pub series: Vec<TvdbRating>,
    /// Episode ratings, only present for a per-series request
    #[serde(rename = "Episode")]
    pub episodes: Vec<TvdbRating>,
}

/// The `<Favorites>` document: one `<Series>` element per series id
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbFavorites {
    /// Favorite series ids; empty elements are dropped
    #[serde(rename = "Series", deserialize_with = "deserialize_id_list")]
    pub series: Vec<u64>,
}

/// The `<Languages>` document, also used for `<Data>` with one language
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbLanguages {
    /// Language records
    #[serde(rename = "Language")]
    pub languages: Vec<TvdbLanguage>,
}

/// The `<Actors>` document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbActors {
    /// Actor records, in document order
    #[serde(rename = "Actor")]
    pub actors: Vec<TvdbActor>,
}

/// Response of mutating endpoints, whose content is not used
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TvdbAck {}

/// A `<Series>` element from `GetSeries.php` or `GetSeriesByRemoteID.php`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbSeriesSummary {
    /// Series id
    #[serde(rename = "id", deserialize_with = "deserialize_number_or_zero")]
    pub id: u64,
    /// Language of the record (e.g. "en")
    #[serde(rename = "language", alias = "Language")]
    pub language: String,
    /// Series name in the requested language
    #[serde(rename = "SeriesName")]
    pub name: String,
    /// Alternative names, pipe-delimited
    #[serde(rename = "AliasNames", deserialize_with = "deserialize_pipe_list")]
    pub aliases: Vec<String>,
    /// Banner image path relative to the banner mirror
    #[serde(rename = "banner")]
    pub banner: String,
    /// Plain-text synopsis
    #[serde(rename = "Overview")]
    pub overview: String,
    /// Premiere date (may be empty)
    #[serde(rename = "FirstAired", deserialize_with = "deserialize_date")]
    pub first_aired: Option<NaiveDate>,
    /// IMDB id (e.g. "tt0096697")
    #[serde(rename = "IMDB_ID")]
    pub imdb_id: String,
    /// Zap2it id (e.g. "EP00018693")
    #[serde(rename = "zap2it_id")]
    pub zap2it_id: String,
    /// Broadcasting network
    #[serde(rename = "Network")]
    pub network: String,
}

/// A `<Series>` element from the base and full series records
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbSeries {
    /// Series id
    #[serde(rename = "id", deserialize_with = "deserialize_number_or_zero")]
    pub id: u64,
    /// Language of the record; the base record spells it `Language`
    #[serde(rename = "language", alias = "Language")]
    pub language: String,
    /// Series name in the requested language
    #[serde(rename = "SeriesName")]
    pub name: String,
    /// Banner image path
    #[serde(rename = "banner")]
    pub banner: String,
    /// Plain-text synopsis
    #[serde(rename = "Overview")]
    pub overview: String,
    /// Premiere date (may be empty)
    #[serde(rename = "FirstAired", deserialize_with = "deserialize_date")]
    pub first_aired: Option<NaiveDate>,
    /// IMDB id
    #[serde(rename = "IMDB_ID")]
    pub imdb_id: String,
    /// Zap2it id
    #[serde(rename = "zap2it_id")]
    pub zap2it_id: String,
    /// Broadcasting network
    #[serde(rename = "Network")]
    pub network: String,
    /// Main cast, pipe-delimited
    #[serde(rename = "Actors", deserialize_with = "deserialize_pipe_list")]
    pub actors: Vec<String>,
    /// Weekday the series airs on (e.g. "Sunday")
    #[serde(rename = "Airs_DayOfWeek")]
    pub airs_day_of_week: String,
    /// Air time as free text (e.g. "8:00 PM")
    #[serde(rename = "Airs_Time")]
    pub airs_time: String,
    /// Content rating (e.g. "TV-PG")
    #[serde(rename = "ContentRating")]
    pub content_rating: String,
    /// Genres, pipe-delimited
    #[serde(rename = "Genre", deserialize_with = "deserialize_pipe_list")]
    pub genre: Vec<String>,
    /// Community rating (empty when unrated)
    #[serde(rename = "Rating", deserialize_with = "deserialize_nullable")]
    pub rating: Option<f64>,
    /// Number of community votes
    #[serde(rename = "RatingCount", deserialize_with = "deserialize_nullable")]
    pub rating_count: Option<u64>,
    /// Episode runtime in minutes
    #[serde(rename = "Runtime", deserialize_with = "deserialize_nullable")]
    pub runtime: Option<u32>,
    /// "Continuing" or "Ended"
    #[serde(rename = "Status")]
    pub status: String,
    /// When the record was created (empty for old records)
    #[serde(rename = "added", deserialize_with = "deserialize_timestamp")]
    pub added: Option<NaiveDateTime>,
    /// User id of the record's creator
    #[serde(rename = "addedBy", deserialize_with = "deserialize_nullable")]
    pub added_by: Option<u64>,
    /// Fan art image path
    #[serde(rename = "fanart")]
    pub fanart: String,
    /// Poster image path
    #[serde(rename = "poster")]
    pub poster: String,
    /// Last modification, seconds since the Unix epoch
    #[serde(rename = "lastupdated", deserialize_with = "deserialize_unix_time")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// An `<Episode>` element
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbEpisode {
    /// Episode id
    #[serde(rename = "id", deserialize_with = "deserialize_number_or_zero")]
    pub id: u64,
    /// Episode number in the combined order, kept as text (e.g. "1.5")
    #[serde(rename = "Combined_episodenumber")]
    pub combined_episode_number: String,
    /// Season in the combined order
    #[serde(rename = "Combined_season", deserialize_with = "deserialize_nullable")]
    pub combined_season: Option<u32>,
    /// DVD chapter
    #[serde(rename = "DVD_chapter")]
    pub dvd_chapter: String,
    /// DVD disc id
    #[serde(rename = "DVD_discid")]
    pub dvd_disc_id: String,
    /// Episode number in DVD order, kept as text (e.g. "1.0")
    #[serde(rename = "DVD_episodenumber")]
    pub dvd_episode_number: String,
    /// Season in DVD order
    #[serde(rename = "DVD_season", deserialize_with = "deserialize_nullable")]
    pub dvd_season: Option<u32>,
    /// Directors, pipe-delimited
    #[serde(rename = "Director", deserialize_with = "deserialize_pipe_list")]
    pub director: Vec<String>,
    /// Quality flag of the episode image
    #[serde(rename = "EpImgFlag", deserialize_with = "deserialize_image_flag")]
    pub image_flag: Option<ImageFlag>,
    /// Episode title
    #[serde(rename = "EpisodeName")]
    pub name: String,
    /// Episode number within the season
    #[serde(rename = "EpisodeNumber", deserialize_with = "deserialize_number_or_zero")]
    pub episode_number: u32,
    /// Original air date (may be empty)
    #[serde(rename = "FirstAired", deserialize_with = "deserialize_date")]
    pub first_aired: Option<NaiveDate>,
    /// Guest stars, pipe-delimited
    #[serde(rename = "GuestStars", deserialize_with = "deserialize_pipe_list")]
    pub guest_stars: Vec<String>,
    /// IMDB id
    #[serde(rename = "IMDB_ID")]
    pub imdb_id: String,
    /// Language of the record
    #[serde(rename = "Language")]
    pub language: String,
    /// Plain-text synopsis
    #[serde(rename = "Overview")]
    pub overview: String,
    /// Production code (e.g. "7G08")
    #[serde(rename = "ProductionCode")]
    pub production_code: String,
    /// Community rating
    #[serde(rename = "Rating", deserialize_with = "deserialize_nullable")]
    pub rating: Option<f64>,
    /// Number of community votes
    #[serde(rename = "RatingCount", deserialize_with = "deserialize_nullable")]
    pub rating_count: Option<u64>,
    /// Season number (0 for specials)
    #[serde(rename = "SeasonNumber", deserialize_with = "deserialize_number_or_zero")]
    pub season_number: u32,
    /// Writers, pipe-delimited
    #[serde(rename = "Writer", deserialize_with = "deserialize_pipe_list")]
    pub writer: Vec<String>,
    /// Position counted across all seasons
    #[serde(rename = "absolute_number", deserialize_with = "deserialize_nullable")]
    pub absolute_number: Option<u32>,
    /// Episode image path
    #[serde(rename = "filename")]
    pub filename: String,
    /// Last modification, seconds since the Unix epoch
    #[serde(rename = "lastupdated", deserialize_with = "deserialize_unix_time")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Id of the season record
    #[serde(rename = "seasonid", deserialize_with = "deserialize_number_or_zero")]
    pub season_id: u64,
    /// Id of the series the episode belongs to
    #[serde(rename = "seriesid", deserialize_with = "deserialize_number_or_zero")]
    pub series_id: u64,
    /// When the episode image was added
    #[serde(rename = "thumb_added", deserialize_with = "deserialize_timestamp")]
    pub thumb_added: Option<NaiveDateTime>,
    /// Episode image height in pixels
    #[serde(rename = "thumb_height", deserialize_with = "deserialize_nullable")]
    pub thumb_height: Option<u32>,
    /// Episode image width in pixels
    #[serde(rename = "thumb_width", deserialize_with = "deserialize_nullable")]
    pub thumb_width: Option<u32>,
}

/// A `<Series>` or `<Episode>` element of a ratings document
///
/// Series ratings carry their id in `<seriesid>`, episode ratings in `<id>`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbRating {
    /// Episode id
    #[serde(rename = "id", deserialize_with = "deserialize_nullable")]
    pub id: Option<u64>,
    /// Series id
    #[serde(rename = "seriesid", deserialize_with = "deserialize_nullable")]
    pub series_id: Option<u64>,
    /// The user's own rating (empty when not rated)
    #[serde(rename = "UserRating", deserialize_with = "deserialize_nullable")]
    pub user_rating: Option<i32>,
    /// Average rating of all users
    #[serde(rename = "CommunityRating", deserialize_with = "deserialize_nullable")]
    pub community_rating: Option<f64>,
}

/// A `<Language>` element
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbLanguage {
    /// Language id
    #[serde(rename = "id", deserialize_with = "deserialize_number_or_zero")]
    pub id: u32,
    /// Language code used in URLs (e.g. "de")
    #[serde(rename = "abbreviation")]
    pub abbreviation: String,
    /// Native name of the language (e.g. "Deutsch")
    #[serde(rename = "name")]
    pub name: String,
}

/// An `<Actor>` element
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TvdbActor {
    /// Actor id
    #[serde(rename = "id", deserialize_with = "deserialize_number_or_zero")]
    pub id: u64,
    /// Portrait image path (may be empty)
    #[serde(rename = "Image")]
    pub image: String,
    /// Actor name
    #[serde(rename = "Name")]
    pub name: String,
    /// Characters played, pipe-delimited
    #[serde(rename = "Role", deserialize_with = "deserialize_pipe_list")]
    pub role: Vec<String>,
    /// Billing position (0 is listed first)
    #[serde(rename = "SortOrder", deserialize_with = "deserialize_nullable")]
    pub sort_order: Option<u32>,
}

impl From<TvdbSeriesSummary> for SeriesSummary {
    fn from(series: TvdbSeriesSummary) -> Self {
        SeriesSummary {
            info: SeriesInfo {
                id: series.id,
                language: series.language,
                name: series.name,
                banner_path: series.banner,
                overview: series.overview,
                first_aired: series.first_aired,
                imdb_id: series.imdb_id,
                zap2it_id: series.zap2it_id,
                network: series.network,
            },
            aliases: series.aliases,
        }
    }
}

impl From<TvdbSeries> for Series {
    fn from(series: TvdbSeries) -> Self {
        Series {
            info: SeriesInfo {
                id: series.id,
                language: series.language,
                name: series.name,
                banner_path: series.banner,
                overview: series.overview,
                first_aired: series.first_aired,
                imdb_id: series.imdb_id,
                zap2it_id: series.zap2it_id,
                network: series.network,
            },
            actors: series.actors,
            airs_day_of_week: series.airs_day_of_week,
            airs_time: series.airs_time,
            content_rating: series.content_rating,
            genres: series.genre,
            rating: series.rating,
            rating_count: series.rating_count,
            runtime: series.runtime,
            status: series.status,
            added: series.added,
            added_by: series.added_by,
            fanart_path: series.fanart,
            poster_path: series.poster,
            last_updated: series.last_updated,
            seasons: BTreeMap::new(),
        }
    }
}

impl From<TvdbEpisode> for Episode {
    fn from(episode: TvdbEpisode) -> Self {
        Episode {
            id: episode.id,
            series_id: episode.series_id,
            season_id: episode.season_id,
            season_number: episode.season_number,
            episode_number: episode.episode_number,
            dvd_season: episode.dvd_season,
            dvd_episode_number: episode.dvd_episode_number,
            dvd_chapter: episode.dvd_chapter,
            dvd_disc_id: episode.dvd_disc_id,
            absolute_number: episode.absolute_number,
            combined_season: episode.combined_season,
            combined_episode_number: episode.combined_episode_number,
            name: episode.name,
            overview: episode.overview,
            directors: episode.director,
            writers: episode.writer,
            guest_stars: episode.guest_stars,
            first_aired: episode.first_aired,
            imdb_id: episode.imdb_id,
            language: episode.language,
            production_code: episode.production_code,
            rating: episode.rating,
            rating_count: episode.rating_count,
            filename: episode.filename,
            image_flag: episode.image_flag,
            thumb_added: episode.thumb_added,
            thumb_height: episode.thumb_height,
            thumb_width: episode.thumb_width,
            last_updated: episode.last_updated,
        }
    }
}

impl From<TvdbRating> for Rating {
    fn from(rating: TvdbRating) -> Self {
        // Prefer the episode-style <id>; series ratings only fill <seriesid>
        let id = rating
            .id
            .filter(|&id| id != 0)
            .or(rating.series_id)
            .unwrap_or_default();

        Rating {
            id,
            user_rating: rating.user_rating,
            community_rating: rating.community_rating,
        }
    }
}

impl From<TvdbLanguage> for Language {
    fn from(language: TvdbLanguage) -> Self {
        Language {
            id: language.id,
            abbreviation: language.abbreviation,
            name: language.name,
        }
    }
}

impl From<TvdbActor> for Actor {
    fn from(actor: TvdbActor) -> Self {
        Actor {
            id: actor.id,
            name: actor.name,
            roles: actor.role,
            sort_order: actor.sort_order,
            image_path: actor.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: for<'de> Deserialize<'de>>(xml: &str) -> T {
        quick_xml::de::from_str(xml).unwrap()
    }

    #[test]
    fn test_decode_series_summary() {
        let data: TvdbData<TvdbSeriesSummary> = decode(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
            <Data>
              <Series>
                <seriesid>71663</seriesid>
                <language>en</language>
                <SeriesName>The Simpsons</SeriesName>
                <AliasNames>|Los Simpson|Die Simpsons|</AliasNames>
                <banner>graphical/71663-g13.jpg</banner>
                <Overview>Set in Springfield.</Overview>
                <FirstAired>1989-12-17</FirstAired>
                <Network>FOX</Network>
                <IMDB_ID>tt0096697</IMDB_ID>
                <zap2it_id>EP00018693</zap2it_id>
                <id>71663</id>
              </Series>
            </Data>"#,
        );

        let summary = SeriesSummary::from(data.series.into_iter().next().unwrap());
        assert_eq!(summary.info.id, 71663);
        assert_eq!(summary.info.language, "en");
        assert_eq!(summary.info.name, "The Simpsons");
        assert_eq!(summary.aliases, vec!["Los Simpson", "Die Simpsons"]);
        assert_eq!(summary.info.first_aired, NaiveDate::from_ymd_opt(1989, 12, 17));
        assert_eq!(summary.info.network, "FOX");
    }

    #[test]
    fn test_decode_series_empty_fields() {
        let data: TvdbData<TvdbSeries> = decode(
            r#"<Data>
              <Series>
                <id>1</id>
                <Language>en</Language>
                <SeriesName>Nothing Yet</SeriesName>
                <Actors></Actors>
                <Genre/>
                <Rating></Rating>
                <RatingCount>0</RatingCount>
                <Runtime></Runtime>
                <added></added>
                <addedBy></addedBy>
                <FirstAired></FirstAired>
                <lastupdated></lastupdated>
              </Series>
            </Data>"#,
        );

        let series = Series::from(data.series.into_iter().next().unwrap());
        assert_eq!(series.info.language, "en");
        assert!(series.actors.is_empty());
        assert!(series.genres.is_empty());
        assert_eq!(series.rating, None);
        assert_eq!(series.rating_count, Some(0));
        assert_eq!(series.runtime, None);
        assert_eq!(series.added, None);
        assert_eq!(series.added_by, None);
        assert_eq!(series.info.first_aired, None);
        assert_eq!(series.last_updated, None);
        assert!(series.seasons.is_empty());
    }

    #[test]
    fn test_decode_series_rejects_bad_number() {
        let result: Result<TvdbData<TvdbSeries>, _> = quick_xml::de::from_str(
            "<Data><Series><id>1</id><Runtime>half an hour</Runtime></Series></Data>",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_episode() {
        let data: TvdbData<TvdbSeries> = decode(
            r#"<Data>
              <Episode>
                <id>55452</id>
                <DVD_episodenumber>1.0</DVD_episodenumber>
                <DVD_season>1</DVD_season>
                <Director>David Silverman</Director>
                <EpImgFlag>1</EpImgFlag>
                <EpisodeName>Simpsons Roasting on an Open Fire</EpisodeName>
                <EpisodeNumber>1</EpisodeNumber>
                <FirstAired>1989-12-17</FirstAired>
                <GuestStars>|Christopher Collins|</GuestStars>
                <Rating>7.2</Rating>
                <RatingCount></RatingCount>
                <SeasonNumber>1</SeasonNumber>
                <Writer>|Mimi Pond|</Writer>
                <absolute_number>1</absolute_number>
                <lastupdated>1306809485</lastupdated>
                <seasonid>2727</seasonid>
                <seriesid>71663</seriesid>
                <thumb_added></thumb_added>
                <thumb_height>300</thumb_height>
                <thumb_width>400</thumb_width>
              </Episode>
            </Data>"#,
        );

        assert!(data.series.is_empty());
        let episode = Episode::from(data.episodes.into_iter().next().unwrap());
        assert_eq!(episode.id, 55452);
        assert_eq!(episode.dvd_season, Some(1));
        assert_eq!(episode.dvd_episode_number, "1.0");
        assert_eq!(episode.directors, vec!["David Silverman"]);
        assert_eq!(episode.image_flag, Some(ImageFlag::Aspect4x3));
        assert_eq!(episode.guest_stars, vec!["Christopher Collins"]);
        assert_eq!(episode.rating, Some(7.2));
        assert_eq!(episode.rating_count, None);
        assert_eq!(episode.absolute_number, Some(1));
        assert_eq!(episode.combined_season, None);
        assert_eq!(episode.season_id, 2727);
        assert_eq!(episode.series_id, 71663);
        assert_eq!(episode.thumb_added, None);
        assert_eq!(episode.thumb_width, Some(400));
        assert_eq!(
            episode.last_updated.map(|t| t.timestamp()),
            Some(1306809485)
        );
    }

    #[test]
    fn test_rating_id_from_series_field() {
        let ratings: TvdbRatings = decode(
            "<Data><Series><seriesid>71663</seriesid><UserRating>7</UserRating>\
             <CommunityRating>8.9</CommunityRating></Series></Data>",
        );
        let rating = Rating::from(ratings.series.into_iter().next().unwrap());
        assert_eq!(rating.id, 71663);
        assert_eq!(rating.user_rating, Some(7));
        assert_eq!(rating.community_rating, Some(8.9));
    }

    #[test]
    fn test_rating_id_from_episode_field() {
        let ratings: TvdbRatings = decode(
            "<Data><Episode><id>55452</id><UserRating></UserRating>\
             <CommunityRating>7.2</CommunityRating></Episode></Data>",
        );
        let rating = Rating::from(ratings.episodes.into_iter().next().unwrap());
        assert_eq!(rating.id, 55452);
        assert_eq!(rating.user_rating, None);
    }

    #[test]
    fn test_rating_prefers_episode_field() {
        let rating = Rating::from(TvdbRating {
            id: Some(55452),
            series_id: Some(71663),
            ..TvdbRating::default()
        });
        assert_eq!(rating.id, 55452);

        let rating = Rating::from(TvdbRating {
            id: Some(0),
            series_id: Some(71663),
            ..TvdbRating::default()
        });
        assert_eq!(rating.id, 71663);

        assert_eq!(Rating::from(TvdbRating::default()).id, 0);
    }

    #[test]
    fn test_decode_favorites() {
        let favorites: TvdbFavorites =
            decode("<Favorites><Series>71663</Series><Series>73871</Series></Favorites>");
        assert_eq!(favorites.series, vec![71663, 73871]);

        let empty: TvdbFavorites = decode("<Favorites></Favorites>");
        assert!(empty.series.is_empty());
    }

    #[test]
    fn test_decode_actor() {
        let actors: TvdbActors = decode(
            "<Actors><Actor><id>44537</id><Image>actors/44537.jpg</Image>\
             <Name>Dan Castellaneta</Name><Role>Homer Simpson|Abe Simpson</Role>\
             <SortOrder>0</SortOrder></Actor></Actors>",
        );
        let actor = Actor::from(actors.actors.into_iter().next().unwrap());
        assert_eq!(actor.id, 44537);
        assert_eq!(actor.roles, vec!["Homer Simpson", "Abe Simpson"]);
        assert_eq!(actor.sort_order, Some(0));
        assert_eq!(actor.image_path, "actors/44537.jpg");
    }

    #[test]
    fn test_empty_ids_and_numbers_decode_as_zero() {
        let data: TvdbData<TvdbSeries> = decode(
            "<Data>\
             <Series><id></id><SeriesName>Unnumbered</SeriesName></Series>\
             <Episode><id>1</id><EpisodeNumber></EpisodeNumber><SeasonNumber/>\
             <seasonid></seasonid><seriesid></seriesid></Episode>\
             </Data>",
        );

        let series = Series::from(data.series.into_iter().next().unwrap());
        assert_eq!(series.info.id, 0);
        assert_eq!(series.info.name, "Unnumbered");

        let episode = Episode::from(data.episodes.into_iter().next().unwrap());
        assert_eq!(episode.id, 1);
        assert_eq!(episode.episode_number, 0);
        assert_eq!(episode.season_number, 0);
        assert_eq!(episode.season_id, 0);
        assert_eq!(episode.series_id, 0);
    }

    #[test]
    fn test_empty_language_and_actor_ids_decode_as_zero() {
        let languages: TvdbLanguages = decode(
            "<Languages><Language><id></id><abbreviation>en</abbreviation></Language></Languages>",
        );
        let language = Language::from(languages.languages.into_iter().next().unwrap());
        assert_eq!(language.id, 0);
        assert_eq!(language.abbreviation, "en");

        let actors: TvdbActors =
            decode("<Actors><Actor><id/><Name>Unknown</Name></Actor></Actors>");
        assert_eq!(Actor::from(actors.actors.into_iter().next().unwrap()).id, 0);

        let summaries: TvdbData<TvdbSeriesSummary> =
            decode("<Data><Series><id></id><SeriesName>Pending</SeriesName></Series></Data>");
        let summary = SeriesSummary::from(summaries.series.into_iter().next().unwrap());
        assert_eq!(summary.info.id, 0);
    }

    #[test]
    fn test_empty_ids_still_reject_garbage() {
        let result: Result<TvdbData<TvdbSeries>, _> =
            quick_xml::de::from_str("<Data><Episode><seasonid>n/a</seasonid></Episode></Data>");
        assert!(result.is_err());
    }

    #[test]
    fn test_favorites_drop_empty_entries() {
        let favorites: TvdbFavorites =
            decode("<Favorites><Series></Series><Series>71663</Series><Series/></Favorites>");
        assert_eq!(favorites.series, vec![71663]);

        let result: Result<TvdbFavorites, _> =
            quick_xml::de::from_str("<Favorites><Series>abc</Series></Favorites>");
        assert!(result.is_err());
    }

    #[test]
    fn test_interleaved_series_and_episodes() {
        let data: TvdbData<TvdbSeries> = decode(
            "<Data>\
             <Episode><id>1</id></Episode>\
             <Series><id>71663</id></Series>\
             <Episode><id>2</id></Episode>\
             </Data>",
        );

        assert_eq!(data.series.len(), 1);
        let ids: Vec<u64> = data.episodes.iter().map(|episode| episode.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}

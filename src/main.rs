use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::process;
use tracing::debug;
use tvdb_client::{
    ClientConfig, Episode, EpisodeNumbering, Language, Rating, RemoteService, Series,
    SeriesSummary, TvdbClient, TvdbError,
};

mod logging;

#[derive(Parser)]
#[command(name = "tvdb")]
#[command(about = "Query TheTVDB for series, episodes, favorites and ratings")]
#[command(version)]
struct Cli {
    /// API key issued by TheTVDB
    #[arg(long, env = "TVDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the service (e.g. a local mirror)
    #[arg(long, env = "TVDB_BASE_URL", default_value = tvdb_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Default content language
    #[arg(long, env = "TVDB_LANGUAGE", default_value = tvdb_client::DEFAULT_LANGUAGE)]
    language: String,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search series by name
    Search { name: String },

    /// Look up a series by an IMDB or Zap2it id
    Remote {
        #[arg(value_enum)]
        service: Service,
        id: String,
    },

    /// Show a series record
    Series {
        id: u64,

        /// Include every episode, grouped by season
        #[arg(long)]
        all: bool,
    },

    /// Show an episode by its id
    Episode { id: u64 },

    /// Show an episode by its position within a series
    EpisodeBy(EpisodeByArgs),

    /// List the actors of a series
    Actors { series_id: u64 },

    /// List the available content languages
    Languages,

    /// Show, add or remove user favorites
    Favorites {
        account_id: String,

        /// Series id to add
        #[arg(long, conflicts_with = "remove")]
        add: Option<u64>,

        /// Series id to remove
        #[arg(long)]
        remove: Option<u64>,
    },

    /// Show user ratings
    Ratings {
        account_id: String,

        /// Only show the ratings of this series and its episodes
        #[arg(long)]
        series: Option<u64>,
    },

    /// Rate a series or an episode (0 to 10)
    Rate {
        account_id: String,
        #[arg(value_enum)]
        item: RatedItem,
        id: u64,
        #[arg(allow_negative_numbers = true)]
        rating: i32,
    },

    /// Show the preferred language of a user
    UserLanguage { account_id: String },

    /// Search the website instead of the API (best effort)
    SiteSearch {
        name: String,

        /// Resolve at most this many hits into full series records
        #[arg(long)]
        max: Option<usize>,
    },
}

#[derive(Args)]
struct EpisodeByArgs {
    series_id: u64,

    /// Season number
    #[arg(long, requires = "episode", conflicts_with = "absolute")]
    season: Option<u32>,

    /// Episode number within the season
    #[arg(long, requires = "season")]
    episode: Option<u32>,

    /// Use DVD instead of aired order
    #[arg(long, requires = "season")]
    dvd: bool,

    /// Absolute episode number
    #[arg(long, required_unless_present = "season")]
    absolute: Option<u32>,
}

impl EpisodeByArgs {
    fn numbering(&self) -> Option<EpisodeNumbering> {
        match (self.season, self.episode, self.absolute) {
            (Some(season), Some(episode), _) if self.dvd => {
                Some(EpisodeNumbering::Dvd { season, episode })
            }
            (Some(season), Some(episode), _) => Some(EpisodeNumbering::Default { season, episode }),
            (None, None, Some(number)) => Some(EpisodeNumbering::Absolute(number)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Service {
    Imdb,
    Zap2it,
}

impl From<Service> for RemoteService {
    fn from(service: Service) -> Self {
        match service {
            Service::Imdb => RemoteService::Imdb,
            Service::Zap2it => RemoteService::Zap2it,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RatedItem {
    Series,
    Episode,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: Failed to serialize output: {}", e),
    }
}

fn print_summaries(summaries: &[SeriesSummary]) {
    if summaries.is_empty() {
        println!("No series found.");
        return;
    }

    for summary in summaries {
        let year = summary
            .info
            .first_aired
            .map(|date| date.format("%Y").to_string())
            .unwrap_or_else(|| "????".to_string());
        println!("{:>8}  {} ({})", summary.info.id, summary.info.name, year);
    }
}

fn print_episode_line(episode: &Episode) {
    println!(
        "  S{:02}E{:02} - {}",
        episode.season_number, episode.episode_number, episode.name
    );
}

fn print_series(series: &Series) {
    println!("{} [{}]", series.info.name, series.info.id);
    println!("  Network: {}", series.info.network);
    println!("  Status:  {}", series.status);
    if let Some(first_aired) = series.info.first_aired {
        println!("  First aired: {}", first_aired);
    }
    if !series.genres.is_empty() {
        println!("  Genre:   {}", series.genres.join(", "));
    }
    if let Some(rating) = series.rating {
        println!("  Rating:  {:.1}", rating);
    }
    println!("  Overview: {}", series.info.overview);

    for (season, episodes) in &series.seasons {
        println!("\n--- SEASON {} ---", season);
        for episode in episodes {
            print_episode_line(episode);
        }
    }
}

fn print_episode(episode: &Episode) {
    print_episode_line(episode);
    if let Some(first_aired) = episode.first_aired {
        println!("  First aired: {}", first_aired);
    }
    if !episode.directors.is_empty() {
        println!("  Directed by: {}", episode.directors.join(", "));
    }
    if !episode.writers.is_empty() {
        println!("  Written by:  {}", episode.writers.join(", "));
    }
    if let Some(flag) = episode.image_flag {
        println!("  Image: {} ({})", episode.filename, flag);
    }
    println!("  Overview: {}", episode.overview);
}

fn print_language(language: &Language) {
    println!("{:>4}  {}  {}", language.id, language.abbreviation, language.name);
}

fn print_rating(rating: &Rating) {
    let user = rating
        .user_rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let community = rating
        .community_rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "-".to_string());
    println!("{:>8}  user: {:>2}  community: {}", rating.id, user, community);
}

fn run(cli: Cli) -> Result<(), TvdbError> {
    let config = match ClientConfig::new(&cli.api_key).and_then(|config| {
        config
            .with_base_url(&cli.base_url)
            .map(|config| config.with_default_language(&cli.language))
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let client = TvdbClient::new(config);
    debug!(
        base_url = %client.config().base_url(),
        language = client.config().default_language(),
        "Client configured"
    );
    let json = cli.json;

    match cli.command {
        Commands::Search { name } => {
            let results = client.search_series(&name, None)?;
            if json {
                print_json(&results);
            } else {
                print_summaries(&results);
            }
        }
        Commands::Remote { service, id } => {
            let summary = client.series_by_remote_id(service.into(), &id, None)?;
            if json {
                print_json(&summary);
            } else {
                print_summaries(std::slice::from_ref(&summary));
            }
        }
        Commands::Series { id, all } => {
            let series = if all {
                client.series_all_by_id(id, None)?
            } else {
                client.series_by_id(id, None)?
            };
            if json {
                print_json(&series);
            } else {
                print_series(&series);
            }
        }
        Commands::Episode { id } => {
            let episode = client.episode_by_id(id, None)?;
            if json {
                print_json(&episode);
            } else {
                print_episode(&episode);
            }
        }
        Commands::EpisodeBy(args) => {
            let Some(numbering) = args.numbering() else {
                eprintln!("Error: Either --season and --episode or --absolute is required");
                process::exit(1);
            };
            let episode = client.episode_by_series(args.series_id, numbering, None)?;
            if json {
                print_json(&episode);
            } else {
                print_episode(&episode);
            }
        }
        Commands::Actors { series_id } => {
            let actors = client.actors(series_id)?;
            if json {
                print_json(&actors);
            } else {
                for actor in &actors {
                    println!("{} as {}", actor.name, actor.roles.join(" / "));
                }
            }
        }
        Commands::Languages => {
            let languages = client.languages()?;
            if json {
                print_json(&languages);
            } else {
                languages.iter().for_each(print_language);
            }
        }
        Commands::Favorites {
            account_id,
            add,
            remove,
        } => {
            let favorites = match (add, remove) {
                (Some(series_id), _) => client.add_user_favorite(&account_id, series_id)?,
                (None, Some(series_id)) => client.remove_user_favorite(&account_id, series_id)?,
                (None, None) => client.user_favorites(&account_id)?,
            };
            if json {
                print_json(&favorites);
            } else if favorites.is_empty() {
                println!("No favorites.");
            } else {
                for series_id in favorites {
                    println!("{}", series_id);
                }
            }
        }
        Commands::Ratings { account_id, series } => match series {
            Some(series_id) => {
                let ratings = client.user_series_ratings(&account_id, series_id)?;
                if json {
                    print_json(&ratings);
                } else {
                    print_rating(&ratings.series);
                    println!("Episodes:");
                    ratings.episodes.iter().for_each(print_rating);
                }
            }
            None => {
                let ratings = client.user_ratings(&account_id)?;
                if json {
                    print_json(&ratings);
                } else {
                    ratings.iter().for_each(print_rating);
                }
            }
        },
        Commands::Rate {
            account_id,
            item,
            id,
            rating,
        } => {
            match item {
                RatedItem::Series => client.set_series_rating(&account_id, id, rating)?,
                RatedItem::Episode => client.set_episode_rating(&account_id, id, rating)?,
            }
            println!("Rating saved.");
        }
        Commands::UserLanguage { account_id } => {
            let language = client.user_language(&account_id)?;
            if json {
                print_json(&language);
            } else {
                print_language(&language);
            }
        }
        Commands::SiteSearch { name, max } => match max {
            Some(max_results) => {
                let series_list = client.scrape_series(&name, max_results, None)?;
                if json {
                    print_json(&series_list);
                } else {
                    for series in &series_list {
                        println!("{:>8}  {}", series.info.id, series.info.name);
                    }
                }
            }
            None => {
                let ids = client.scrape_series_ids(&name)?;
                if json {
                    print_json(&ids);
                } else {
                    for id in ids {
                        println!("{}", id);
                    }
                }
            }
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

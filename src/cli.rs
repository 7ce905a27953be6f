use clap::{Args, Parser, Subcommand, ValueEnum};
use reelview::query::QueryState;
use reelview_common::{CountryId, GenreId, SortConfig, SortDirection, SortKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelview")]
#[command(author, version, about = "Browse a movie catalog with filters, sorting and saved views")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List movies matching the given filters
    Movies {
        /// Start from a saved view, then apply any flags on top
        #[arg(long)]
        view: Option<String>,

        #[command(flatten)]
        query: QueryArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved views
    Views {
        #[command(subcommand)]
        command: ViewCommands,
    },

    /// List genre, country, director or actor options
    Options {
        #[arg(value_enum)]
        kind: OptionKind,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum ViewCommands {
    /// List saved views
    List,

    /// Show a saved view as JSON
    Show { name: String },

    /// Save the given filters and sort as a new view
    Save {
        name: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Replace a view's filters and sort, keeping its name
    Update {
        name: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Delete a saved view
    Delete { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OptionKind {
    Genres,
    Countries,
    Directors,
    Actors,
}

/// Filter and sort flags shared by listing and view commands.
#[derive(Args, Default)]
pub struct QueryArgs {
    /// Case-insensitive substring of the title or alternative title
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long)]
    pub min_year: Option<i32>,

    #[arg(long)]
    pub max_year: Option<i32>,

    #[arg(long)]
    pub min_rating: Option<f64>,

    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Genre id; repeat to match any of several
    #[arg(long = "genre")]
    pub genres: Vec<i64>,

    /// Country id; repeat to match any of several
    #[arg(long = "country")]
    pub countries: Vec<i64>,

    /// Sort key (title, release-year, rating, genres, ...)
    #[arg(long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

impl QueryArgs {
    /// Overlay the given flags onto `query`; unset flags leave it alone.
    pub fn apply(&self, query: &mut QueryState) {
        let criteria = &mut query.criteria;
        if let Some(search) = &self.search {
            criteria.search_term = search.clone();
        }
        if self.min_year.is_some() {
            criteria.min_year = self.min_year;
        }
        if self.max_year.is_some() {
            criteria.max_year = self.max_year;
        }
        if self.min_rating.is_some() {
            criteria.min_rating = self.min_rating;
        }
        if self.max_rating.is_some() {
            criteria.max_rating = self.max_rating;
        }
        if !self.genres.is_empty() {
            criteria.genre_ids = self.genres.iter().copied().map(GenreId::new).collect();
        }
        if !self.countries.is_empty() {
            criteria.country_ids = self.countries.iter().copied().map(CountryId::new).collect();
        }

        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        match self.sort {
            Some(key) => query.sort = SortConfig::new(key, direction),
            None if self.desc => query.sort.direction = direction,
            None => {}
        }
    }

    pub fn to_query(&self) -> QueryState {
        let mut query = QueryState::default();
        self.apply(&mut query);
        query
    }
}

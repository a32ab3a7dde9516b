use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the geocoder terminal front end
#[derive(Debug, Parser)]
#[command(
    name = "geocoder",
    version,
    about = "Search places from the terminal through the geocoder control"
)]
pub struct CliArgs {
    /// JSON file with control options (camelCase keys, e.g. {"limit": 3})
    #[arg(short = 'o', long = "options", global = true)]
    pub options: Option<PathBuf>,

    /// Local gazetteer: a GeoJSON FeatureCollection (.geojson or .geojson.gz)
    #[arg(short = 'p', long = "places", global = true)]
    pub places: Option<PathBuf>,

    /// Only search the local gazetteer, never the network
    #[arg(long = "local-only", global = true)]
    pub local_only: bool,

    /// Nominatim base URL
    #[arg(long = "url", global = true)]
    pub url: Option<String>,

    /// Preferred result language(s), e.g. "de" or "fr,en"
    #[arg(short = 'l', long = "language", global = true)]
    pub language: Option<String>,

    /// Maximum number of results
    #[arg(short = 'n', long = "limit", global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Forward-geocode a query and select the best match
    Search {
        /// Free-text query (e.g. "Brandenburger Tor")
        query: String,
    },

    /// Reverse-geocode a coordinate
    Reverse {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Interactive session: every line is typed into the search box
    Repl {
        /// Search while typing (debounced) instead of waiting for Enter
        #[arg(long = "while-typing")]
        while_typing: bool,
    },
}

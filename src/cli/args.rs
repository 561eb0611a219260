use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheet-geocoder")]
#[command(about = "Enrich spreadsheet addresses with WGS84 and UTM coordinates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "TOML/JSON/YAML settings file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Geocode the address column of a workbook and write coordinates back in place
    Process {
        #[arg(short, long, help = "Workbook (.xlsx) to enrich [env: GEOCODER_TABLE_PATH]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Worksheet name [default: Output]")]
        sheet: Option<String>,

        #[arg(
            short,
            long,
            help = "Maximum number of non-blank addresses to attempt [default: 10]"
        )]
        max_addresses: Option<usize>,

        #[arg(long, help = "Geocoding API key [env: GEOCODER_CREDENTIAL]")]
        credential: Option<String>,

        #[arg(long, help = "Geocoding endpoint URL")]
        endpoint: Option<String>,

        #[arg(long, help = "Add 10 000 km false northing south of the equator")]
        southern_false_northing: bool,

        #[arg(long, help = "Process rows but do not save the workbook")]
        dry_run: bool,

        #[arg(short, long, help = "Hide the progress bar and report")]
        quiet: bool,
    },

    /// Geocode a single address and print its coordinates
    Geocode {
        address: String,

        #[arg(long, help = "Geocoding API key [env: GEOCODER_CREDENTIAL]")]
        credential: Option<String>,

        #[arg(long, help = "Geocoding endpoint URL")]
        endpoint: Option<String>,
    },

    /// Convert a latitude/longitude pair to UTM without any network access
    Project {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,

        #[arg(long, help = "Add 10 000 km false northing south of the equator")]
        southern_false_northing: bool,
    },
}

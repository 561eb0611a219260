use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::geocoding::{Geocode, GeocodeOutcome, GoogleGeocoder};
use crate::models::GeodeticCoordinate;
use crate::processors::{process_file, UtmProjector};
use crate::settings::{Settings, SettingsOverrides};
use crate::utils::progress::ProgressReporter;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Process {
            input,
            sheet,
            max_addresses,
            credential,
            endpoint,
            southern_false_northing,
            dry_run,
            quiet,
        } => {
            let settings = Settings::load(
                cli.config.as_deref(),
                SettingsOverrides {
                    table_path: input,
                    sheet_name: sheet,
                    credential,
                    max_addresses,
                    endpoint,
                    southern_false_northing: southern_false_northing.then_some(true),
                    dry_run: dry_run.then_some(true),
                },
            )?;

            if !quiet {
                println!("Geocoding addresses...");
                println!("Workbook: {}", settings.require_table_path()?.display());
                println!(
                    "Sheet: {}, Max addresses: {}",
                    settings.sheet_name, settings.max_addresses
                );
            }

            let progress =
                ProgressReporter::new(settings.max_addresses as u64, "Geocoding...", quiet);
            let report = process_file(&settings, Some(&progress)).await?;
            progress.finish_with_message(&format!("Attempted {} addresses", report.attempted));

            progress.println(&format!("\n{}", report.summary()));
            if settings.dry_run {
                progress.println("Dry run - workbook left unchanged");
            } else {
                progress.println("Processing complete!");
            }
        }

        Commands::Geocode {
            address,
            credential,
            endpoint,
        } => {
            let settings = Settings::load(
                cli.config.as_deref(),
                SettingsOverrides {
                    credential,
                    endpoint,
                    ..Default::default()
                },
            )?;

            let geocoder = GoogleGeocoder::new(settings.credential.clone())
                .with_endpoint(settings.endpoint.clone());
            tracing::debug!(endpoint = geocoder.endpoint(), "Resolving single address");
            match geocoder.resolve(&address).await? {
                GeocodeOutcome::Found(coord) => {
                    println!("Lat/Lon: {}", coord);
                    let projector = UtmProjector::new()
                        .with_southern_false_northing(settings.southern_false_northing);
                    print_projection(&projector, &coord);
                }
                GeocodeOutcome::NotFound { status } => {
                    println!("Could not get geocode for the address: {} ({})", address, status);
                }
            }
        }

        Commands::Project {
            latitude,
            longitude,
            southern_false_northing,
        } => {
            let coord = GeodeticCoordinate::new(latitude, longitude)?;
            let projector =
                UtmProjector::new().with_southern_false_northing(southern_false_northing);
            print_projection(&projector, &coord);
        }
    }

    Ok(())
}

fn print_projection(projector: &UtmProjector, coord: &GeodeticCoordinate) {
    match projector.project(coord) {
        Ok(projected) => {
            println!(
                "UTM zone {}{}: {}",
                projected.zone,
                projected.hemisphere.letter(),
                projected
            );
        }
        Err(e) => println!("Could not convert to UTM coordinates: {}", e),
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

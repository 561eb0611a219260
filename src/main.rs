use clap::Parser;
use sheet_geocoder::cli::{run, Cli};
use sheet_geocoder::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}

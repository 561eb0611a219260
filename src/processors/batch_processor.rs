use crate::error::Result;
use crate::geocoding::{Geocode, GeocodeOutcome, GoogleGeocoder};
use crate::models::AddressRow;
use crate::processors::{BatchReport, FailureStage, UtmProjector};
use crate::readers::AddressWorkbook;
use crate::settings::Settings;
use crate::utils::constants::DEFAULT_MAX_ADDRESSES;
use crate::utils::progress::ProgressReporter;
use crate::writers::WorkbookWriter;

/// Sequential geocode-then-project pass over an address sheet.
///
/// Rows are handled strictly one after another. Every non-blank address
/// counts against `max_addresses`, whether or not it resolves.
pub struct BatchProcessor<G: Geocode> {
    geocoder: G,
    projector: UtmProjector,
    writer: WorkbookWriter,
    max_addresses: usize,
}

impl<G: Geocode> BatchProcessor<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            projector: UtmProjector::new(),
            writer: WorkbookWriter::new(),
            max_addresses: DEFAULT_MAX_ADDRESSES,
        }
    }

    /// Limit and projection options taken from resolved settings
    pub fn from_settings(geocoder: G, settings: &Settings) -> Self {
        Self::new(geocoder)
            .with_max_addresses(settings.max_addresses)
            .with_projector(
                UtmProjector::new().with_southern_false_northing(settings.southern_false_northing),
            )
    }

    pub fn with_max_addresses(mut self, max_addresses: usize) -> Self {
        self.max_addresses = max_addresses;
        self
    }

    pub fn with_projector(mut self, projector: UtmProjector) -> Self {
        self.projector = projector;
        self
    }

    /// Enrich the sheet in memory.
    ///
    /// Results are written into `workbook` row by row, so on a fatal error
    /// the rows finished so far are already in place for the caller to save.
    pub async fn process_workbook(
        &self,
        workbook: &mut AddressWorkbook,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for row_index in workbook.data_rows() {
            if report.attempted >= self.max_addresses {
                report.limit_reached = true;
                break;
            }
            report.rows_scanned += 1;

            let Some(address) = workbook.address(row_index) else {
                report.blank_rows += 1;
                continue;
            };
            report.attempted += 1;

            if let Some(p) = progress {
                p.set_message(&format!("Row {}: {}", row_index, address));
            }

            let mut row = AddressRow::new(row_index, address);
            self.process_row(&mut row, &mut report).await?;
            self.writer.write_row(workbook, &row)?;

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        tracing::info!(
            attempted = report.attempted,
            geocoded = report.geocoded,
            projected = report.projected,
            failures = report.failures.len(),
            "Batch finished"
        );

        Ok(report)
    }

    async fn process_row(&self, row: &mut AddressRow, report: &mut BatchReport) -> Result<()> {
        let coord = match self.geocoder.resolve(&row.address).await {
            Ok(GeocodeOutcome::Found(coord)) => coord,
            Ok(GeocodeOutcome::NotFound { status }) => {
                tracing::warn!(row = row.row, address = %row.address, stage = "geocode", %status,
                    "Could not get geocode for the address");
                report.record_failure(row.row, &row.address, FailureStage::Geocode, status);
                return Ok(());
            }
            Err(e) if e.is_row_recoverable() => {
                tracing::warn!(row = row.row, address = %row.address, stage = "transport", error = %e,
                    "Geocoding request failed");
                report.record_failure(row.row, &row.address, FailureStage::Transport, e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        row.geodetic = Some(coord);
        report.geocoded += 1;

        match self.projector.project(&coord) {
            Ok(projected) => {
                tracing::debug!(row = row.row, zone = %projected.zone, "Projected {} to {}", coord, projected);
                row.projected = Some(projected);
                report.projected += 1;
            }
            Err(e) => {
                tracing::warn!(row = row.row, address = %row.address, stage = "projection", error = %e,
                    "Could not convert to UTM coordinates");
                report.record_failure(row.row, &row.address, FailureStage::Projection, e.to_string());
            }
        }

        Ok(())
    }
}

/// Open the configured workbook, enrich it through the configured geocoding
/// service and write it back in place.
pub async fn process_file(
    settings: &Settings,
    progress: Option<&ProgressReporter>,
) -> Result<BatchReport> {
    let geocoder =
        GoogleGeocoder::new(settings.credential.clone()).with_endpoint(settings.endpoint.clone());
    process_file_with(settings, geocoder, progress).await
}

/// Same as [`process_file`] with any geocoder.
///
/// The workbook is saved even when a fatal error stops the scan early, so
/// completed rows are never lost; the fatal error is still returned and
/// takes precedence over a failed save.
pub async fn process_file_with<G: Geocode>(
    settings: &Settings,
    geocoder: G,
    progress: Option<&ProgressReporter>,
) -> Result<BatchReport> {
    let path = settings.require_table_path()?;
    let mut workbook = AddressWorkbook::open(path, &settings.sheet_name)?;
    tracing::info!(
        path = %path.display(),
        sheet = %settings.sheet_name,
        rows = workbook.highest_row(),
        max_addresses = settings.max_addresses,
        "Workbook opened"
    );

    let processor = BatchProcessor::from_settings(geocoder, settings);
    let outcome = processor.process_workbook(&mut workbook, progress).await;

    if settings.dry_run {
        tracing::info!("Dry run - workbook not saved");
        return outcome;
    }

    let saved = WorkbookWriter::new().save(&workbook, path);
    match outcome {
        Ok(report) => saved.map(|()| report),
        Err(e) => {
            if let Err(save_error) = saved {
                tracing::error!(error = %save_error, "Could not save completed rows after the batch stopped");
            }
            Err(e)
        }
    }
}

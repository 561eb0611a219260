use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sheet_geocoder::error::{ProcessingError, Result};
use sheet_geocoder::geocoding::{Geocode, GeocodeOutcome};
use sheet_geocoder::models::GeodeticCoordinate;
use sheet_geocoder::processors::{process_file_with, BatchProcessor, FailureStage};
use sheet_geocoder::readers::AddressWorkbook;
use sheet_geocoder::settings::Settings;
use sheet_geocoder::writers::WorkbookWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FixedGeocoder;

#[async_trait]
impl Geocode for FixedGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome> {
        let found = |lat: f64, lon: f64| -> Result<GeocodeOutcome> {
            Ok(GeocodeOutcome::Found(GeodeticCoordinate::new(lat, lon)?))
        };
        match address {
            "1600 Amphitheatre Parkway, Mountain View, CA" => found(37.4224, -122.0842),
            "10 Downing Street, London" => found(51.5034, -0.1276),
            "Sydney Opera House" => found(-33.8568, 151.2153),
            "Eiffel Tower, Paris" => found(48.8584, 2.2945),
            _ => Ok(GeocodeOutcome::NotFound {
                status: "ZERO_RESULTS".to_string(),
            }),
        }
    }
}

/// Resolves like `FixedGeocoder` until it meets `denied_address`, which is
/// refused as a bad credential. When `remove_dir` is set that directory is
/// deleted first, so the save that follows cannot succeed.
struct DenyingGeocoder {
    denied_address: &'static str,
    remove_dir: Option<PathBuf>,
}

#[async_trait]
impl Geocode for DenyingGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome> {
        if address == self.denied_address {
            if let Some(dir) = &self.remove_dir {
                std::fs::remove_dir_all(dir)?;
            }
            return Err(ProcessingError::CredentialRejected(
                "REQUEST_DENIED".to_string(),
            ));
        }
        FixedGeocoder.resolve(address).await
    }
}

fn settings_for(path: &Path, dry_run: bool) -> Settings {
    Settings {
        table_path: path.to_path_buf(),
        sheet_name: "Output".to_string(),
        credential: "test-key".to_string(),
        max_addresses: 10,
        endpoint: "http://127.0.0.1:9/unused".to_string(),
        southern_false_northing: false,
        dry_run,
    }
}

fn create_workbook(path: &Path, addresses: &[&str]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet("Output").unwrap();
    sheet.get_cell_mut((1, 1)).set_value_string("Address");
    sheet.get_cell_mut((2, 1)).set_value_string("Lat/Lon");
    sheet.get_cell_mut((3, 1)).set_value_string("UTM");
    for (i, address) in addresses.iter().enumerate() {
        sheet
            .get_cell_mut((1, i as u32 + 2))
            .set_value_string(address.to_string());
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

async fn run_batch(path: &Path, max_addresses: usize) -> sheet_geocoder::processors::BatchReport {
    let mut workbook = AddressWorkbook::open(path, "Output").unwrap();
    let processor = BatchProcessor::new(FixedGeocoder).with_max_addresses(max_addresses);
    let report = processor.process_workbook(&mut workbook, None).await.unwrap();
    WorkbookWriter::new().save(&workbook, path).unwrap();
    report
}

fn parse_pair(text: &str) -> (f64, f64) {
    let (a, b) = text.split_once(", ").expect("pair separated by ', '");
    (a.parse().unwrap(), b.parse().unwrap())
}

#[tokio::test]
async fn test_resolved_address_gets_both_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["1600 Amphitheatre Parkway, Mountain View, CA"]);

    let report = run_batch(&path, 10).await;
    assert_eq!(report.attempted, 1);
    assert_eq!(report.projected, 1);

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(workbook.cell_text(1, 1), "Address");
    assert_eq!(workbook.cell_text(2, 2), "37.4224, -122.0842");

    let (easting, northing) = parse_pair(&workbook.cell_text(3, 2));
    assert!((easting - 581_032.236).abs() < 0.01);
    assert!((northing - 4_142_125.805).abs() < 0.01);
}

#[tokio::test]
async fn test_unresolved_address_leaves_cells_empty_but_counts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(
        &path,
        &["Nonexistent Place Zzzzz", "10 Downing Street, London"],
    );

    let report = run_batch(&path, 1).await;
    assert_eq!(report.attempted, 1);
    assert_eq!(report.geocoded, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 2);
    assert_eq!(report.failures[0].stage, FailureStage::Geocode);

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(workbook.cell_text(2, 2), "");
    assert_eq!(workbook.cell_text(3, 2), "");
    // limit was spent on the failed row
    assert_eq!(workbook.cell_text(2, 3), "");
}

#[tokio::test]
async fn test_limit_stops_after_first_attempts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(
        &path,
        &[
            "1600 Amphitheatre Parkway, Mountain View, CA",
            "10 Downing Street, London",
            "Sydney Opera House",
            "Eiffel Tower, Paris",
            "Nonexistent Place Zzzzz",
        ],
    );

    let report = run_batch(&path, 2).await;
    assert_eq!(report.attempted, 2);
    assert!(report.limit_reached);

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_ne!(workbook.cell_text(2, 2), "");
    assert_ne!(workbook.cell_text(2, 3), "");
    for row in 4..=6 {
        assert_eq!(workbook.cell_text(2, row), "");
        assert_eq!(workbook.cell_text(3, row), "");
    }
}

#[tokio::test]
async fn test_zero_limit_leaves_table_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["Sydney Opera House", "Eiffel Tower, Paris"]);

    let report = run_batch(&path, 0).await;
    assert_eq!(report.attempted, 0);
    assert_eq!(report.rows_scanned, 0);

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(workbook.address(2).as_deref(), Some("Sydney Opera House"));
    assert_eq!(workbook.cell_text(2, 2), "");
    assert_eq!(workbook.cell_text(3, 3), "");
}

#[tokio::test]
async fn test_second_run_overwrites_outputs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["Eiffel Tower, Paris"]);

    run_batch(&path, 10).await;
    let first = AddressWorkbook::open(&path, "Output").unwrap();
    let first_lat_lon = first.cell_text(2, 2);
    let first_utm = first.cell_text(3, 2);

    // Hand-edit the outputs; the next run recomputes from column 1 regardless
    let mut book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let sheet = book.get_sheet_by_name_mut("Output").unwrap();
    sheet.get_cell_mut((2, 2)).set_value_string("stale");
    sheet.get_cell_mut((3, 2)).set_value_string("stale");
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

    let report = run_batch(&path, 10).await;
    assert_eq!(report.attempted, 1);

    let second = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(second.cell_text(2, 2), first_lat_lon);
    assert_eq!(second.cell_text(3, 2), first_utm);
}

#[tokio::test]
async fn test_southern_address_has_negative_northing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["Sydney Opera House"]);

    run_batch(&path, 10).await;

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    let (easting, northing) = parse_pair(&workbook.cell_text(3, 2));
    assert!(easting > 160_000.0 && easting < 840_000.0);
    assert!(northing < 0.0);
}

#[test]
fn test_missing_sheet_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["Sydney Opera House"]);

    assert!(AddressWorkbook::open(&path, "Sheet1").is_err());
}

#[tokio::test]
async fn test_credential_rejection_saves_completed_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(
        &path,
        &[
            "1600 Amphitheatre Parkway, Mountain View, CA",
            "10 Downing Street, London",
            "Eiffel Tower, Paris",
        ],
    );

    let geocoder = DenyingGeocoder {
        denied_address: "10 Downing Street, London",
        remove_dir: None,
    };
    let err = process_file_with(&settings_for(&path, false), geocoder, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessingError::CredentialRejected(_)));

    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(workbook.cell_text(2, 2), "37.4224, -122.0842");
    let (easting, _) = parse_pair(&workbook.cell_text(3, 2));
    assert!((easting - 581_032.236).abs() < 0.01);
    assert_eq!(workbook.cell_text(2, 3), "");
    assert_eq!(workbook.cell_text(2, 4), "");
}

#[tokio::test]
async fn test_credential_error_survives_failed_save() {
    let dir = TempDir::new().unwrap();
    let table_dir = dir.path().join("tables");
    std::fs::create_dir(&table_dir).unwrap();
    let path = table_dir.join("addresses.xlsx");
    create_workbook(
        &path,
        &["Sydney Opera House", "10 Downing Street, London"],
    );

    let geocoder = DenyingGeocoder {
        denied_address: "10 Downing Street, London",
        remove_dir: Some(table_dir.clone()),
    };
    let err = process_file_with(&settings_for(&path, false), geocoder, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessingError::CredentialRejected(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_dry_run_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("addresses.xlsx");
    create_workbook(&path, &["Eiffel Tower, Paris", "Sydney Opera House"]);
    let before = std::fs::read(&path).unwrap();

    let report = process_file_with(&settings_for(&path, true), FixedGeocoder, None)
        .await
        .unwrap();
    assert_eq!(report.attempted, 2);
    assert_eq!(report.projected, 2);

    assert_eq!(std::fs::read(&path).unwrap(), before);
    let workbook = AddressWorkbook::open(&path, "Output").unwrap();
    assert_eq!(workbook.cell_text(2, 2), "");
    assert_eq!(workbook.cell_text(3, 3), "");
}

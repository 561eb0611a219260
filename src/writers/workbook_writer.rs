use crate::error::{ProcessingError, Result};
use crate::models::AddressRow;
use crate::readers::AddressWorkbook;
use crate::utils::constants::{LAT_LON_COLUMN, PROJECTED_COLUMN};
use std::path::Path;

pub struct WorkbookWriter;

impl WorkbookWriter {
    pub fn new() -> Self {
        Self
    }

    /// Copy a row's filled output slots into the sheet. Empty slots leave
    /// whatever the cell already held.
    pub fn write_row(&self, workbook: &mut AddressWorkbook, row: &AddressRow) -> Result<()> {
        if let Some(text) = row.lat_lon_text() {
            workbook.set_cell_text(LAT_LON_COLUMN, row.row, text)?;
        }
        if let Some(text) = row.projected_text() {
            workbook.set_cell_text(PROJECTED_COLUMN, row.row, text)?;
        }
        Ok(())
    }

    /// Persist the whole workbook, overwriting `path`
    pub fn save(&self, workbook: &AddressWorkbook, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(workbook.spreadsheet(), path).map_err(|e| {
            ProcessingError::Workbook(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), sheet = workbook.sheet_name(), "Workbook saved");
        Ok(())
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{ADDRESS_COLUMN, FIRST_DATA_ROW};
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

/// An xlsx workbook opened for in-place address enrichment.
///
/// The whole workbook is kept so that other sheets, styles and columns
/// survive the rewrite untouched.
pub struct AddressWorkbook {
    book: Spreadsheet,
    sheet_name: String,
}

impl AddressWorkbook {
    /// Open `path` and make sure `sheet_name` exists
    pub fn open(path: &Path, sheet_name: &str) -> Result<Self> {
        if !path.exists() {
            return Err(ProcessingError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Workbook not found: {}", path.display()),
            )));
        }

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            ProcessingError::Workbook(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_spreadsheet(book, sheet_name)
    }

    pub fn from_spreadsheet(book: Spreadsheet, sheet_name: &str) -> Result<Self> {
        if book.get_sheet_by_name(sheet_name).is_none() {
            return Err(ProcessingError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        Ok(Self {
            book,
            sheet_name: sheet_name.to_string(),
        })
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Last row index holding any cell, header included
    pub fn highest_row(&self) -> u32 {
        self.book
            .get_sheet_by_name(&self.sheet_name)
            .map(|sheet| sheet.get_highest_row())
            .unwrap_or(0)
    }

    /// Data rows in sheet order, header excluded
    pub fn data_rows(&self) -> std::ops::RangeInclusive<u32> {
        FIRST_DATA_ROW..=self.highest_row()
    }

    /// Text of a cell, empty when the cell is absent
    pub fn cell_text(&self, column: u32, row: u32) -> String {
        self.book
            .get_sheet_by_name(&self.sheet_name)
            .map(|sheet| sheet.get_value((column, row)))
            .unwrap_or_default()
    }

    /// The trimmed address in column 1, or `None` for an empty or absent cell.
    ///
    /// A whitespace-only cell is not blank: it yields `Some("")`, which still
    /// counts as an attempt.
    pub fn address(&self, row: u32) -> Option<String> {
        let text = self.cell_text(ADDRESS_COLUMN, row);
        if text.is_empty() {
            None
        } else {
            Some(text.trim().to_string())
        }
    }

    pub(crate) fn set_cell_text(&mut self, column: u32, row: u32, value: String) -> Result<()> {
        let sheet = self
            .book
            .get_sheet_by_name_mut(&self.sheet_name)
            .ok_or_else(|| ProcessingError::SheetNotFound {
                name: self.sheet_name.clone(),
            })?;
        sheet.get_cell_mut((column, row)).set_value_string(value);
        Ok(())
    }

    pub(crate) fn spreadsheet(&self) -> &Spreadsheet {
        &self.book
    }
}

pub mod address_workbook;

pub use address_workbook::AddressWorkbook;

pub mod workbook_writer;

pub use workbook_writer::WorkbookWriter;

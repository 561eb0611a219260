pub mod batch_processor;
pub mod batch_report;
pub mod utm_projector;

pub use batch_processor::{process_file, process_file_with, BatchProcessor};
pub use batch_report::{BatchReport, FailureStage, RowFailure};
pub use utm_projector::UtmProjector;

pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::{compute_utm_zone, format_pair};
pub use progress::ProgressReporter;

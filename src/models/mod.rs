pub mod address_row;
pub mod coordinate;

pub use address_row::AddressRow;
pub use coordinate::{GeodeticCoordinate, Hemisphere, ProjectedCoordinate, UtmZone};

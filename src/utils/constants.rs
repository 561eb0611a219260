/// Worksheet layout (1-indexed)
pub const HEADER_ROW: u32 = 1;
pub const FIRST_DATA_ROW: u32 = 2;
pub const ADDRESS_COLUMN: u32 = 1;
pub const LAT_LON_COLUMN: u32 = 2;
pub const PROJECTED_COLUMN: u32 = 3;

/// Processing defaults
pub const DEFAULT_SHEET_NAME: &str = "Output";
pub const DEFAULT_MAX_ADDRESSES: usize = 10;
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Environment variable prefix for configuration, e.g. GEOCODER_CREDENTIAL
pub const ENV_PREFIX: &str = "GEOCODER";

/// Geographic bounds
pub const MAX_LONGITUDE: f64 = 180.0;

/// UTM grid
pub const UTM_ZONE_COUNT: u8 = 60;
pub const UTM_ZONE_WIDTH_DEG: f64 = 6.0;
pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
pub const UTM_SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// WGS84 ellipsoid
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Geocoding service status values
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";
pub const STATUS_OVER_DAILY_LIMIT: &str = "OVER_DAILY_LIMIT";
pub const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";
pub const STATUS_INVALID_LOCATION: &str = "INVALID_LOCATION";

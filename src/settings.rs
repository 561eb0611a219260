use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_GEOCODE_ENDPOINT, DEFAULT_MAX_ADDRESSES, DEFAULT_SHEET_NAME, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Everything a batch run needs, resolved from defaults, an optional config
/// file, `GEOCODER_*` environment variables and command-line overrides, in
/// that order of precedence.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub table_path: PathBuf,

    #[validate(length(min = 1))]
    pub sheet_name: String,

    #[validate(length(min = 1, message = "a geocoding credential is required"))]
    pub credential: String,

    pub max_addresses: usize,

    #[validate(length(min = 1))]
    pub endpoint: String,

    #[serde(default)]
    pub southern_false_northing: bool,

    #[serde(default)]
    pub dry_run: bool,
}

/// Values supplied on the command line; `None` leaves lower layers in charge
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub table_path: Option<PathBuf>,
    pub sheet_name: Option<String>,
    pub credential: Option<String>,
    pub max_addresses: Option<usize>,
    pub endpoint: Option<String>,
    pub southern_false_northing: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Settings {
    pub fn load(config_file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("table_path", "")?
            .set_default("sheet_name", DEFAULT_SHEET_NAME)?
            .set_default("credential", "")?
            .set_default("max_addresses", DEFAULT_MAX_ADDRESSES as u64)?
            .set_default("endpoint", DEFAULT_GEOCODE_ENDPOINT)?
            .set_default("southern_false_northing", false)?
            .set_default("dry_run", false)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option(
                "table_path",
                overrides
                    .table_path
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("sheet_name", overrides.sheet_name)?
            .set_override_option("credential", overrides.credential)?
            .set_override_option("max_addresses", overrides.max_addresses.map(|n| n as u64))?
            .set_override_option("endpoint", overrides.endpoint)?
            .set_override_option("southern_false_northing", overrides.southern_false_northing)?
            .set_override_option("dry_run", overrides.dry_run)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Batch runs need a workbook; single-address commands do not
    pub fn require_table_path(&self) -> Result<&Path> {
        if self.table_path.as_os_str().is_empty() {
            return Err(ProcessingError::Config(
                "no workbook path given (use --input or GEOCODER_TABLE_PATH)".to_string(),
            ));
        }
        Ok(&self.table_path)
    }
}

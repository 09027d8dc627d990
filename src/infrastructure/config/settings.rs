//! Settings file loading and validation.
//!
//! Every table is optional; a missing file section means "use defaults".
//!
//! # Example
//!
//! ```no_run
//! use karat::infrastructure::config::settings::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load("karat.toml")?;
//!     settings.init_logging(None);
//!     let config = settings.pricing_config();
//!     println!("step = {}", config.step);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::tuning::TuningSettings;
use crate::application::pricing::{PricingConfig, PricingOverrides};
use crate::error::{ConfigError, Result};

/// Application settings.
///
/// Load from a TOML file using [`Settings::load`] or parse directly with
/// [`Settings::parse_toml`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Overrides applied on top of the built-in pricing defaults.
    #[serde(default)]
    pub pricing: PricingOverrides,

    /// Offline weight tuning.
    #[serde(default)]
    pub tuning: TuningSettings,
}

impl Settings {
    /// Parse settings from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Built-in pricing defaults with the `[pricing]` overrides applied.
    #[must_use]
    pub fn pricing_config(&self) -> PricingConfig {
        PricingConfig::default().with_overrides(&self.pricing)
    }

    /// Initialize logging from the `[logging]` table.
    pub fn init_logging(&self, level_override: Option<&str>) {
        self.logging.init(level_override);
    }

    /// Serialize back to TOML with defaults filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<()> {
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("unknown format '{}' (expected pretty or json)", self.logging.format),
            }
            .into());
        }
        self.pricing_config().validate()?;
        self.tuning.validate()?;
        Ok(())
    }
}

//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod tuning;

pub use logging::LoggingConfig;
pub use settings::Settings;
pub use tuning::TuningSettings;

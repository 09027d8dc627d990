//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: settings files and logging setup.
//!
//! # Submodules
//!
//! - [`config`] - Settings loading, validation and logging initialization

pub mod config;

//! Command-line interface definitions.
//!
//! Defines the CLI structure for karat using `clap`: pricing a single
//! quote, tuning score weights offline, comparing internal prices, and
//! managing the settings file.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::Algorithm;

/// Default settings file name.
pub const DEFAULT_CONFIG: &str = "karat.toml";

/// Gold alloy pricing engine
#[derive(Parser, Debug)]
#[command(name = "karat")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend buy/sell prices for the source grade
    Quote(QuoteArgs),

    /// Tune the score weights against the configured scenarios
    Tune(TuneArgs),

    /// Compare an internal quote with the settlement reference price
    Compare(CompareArgs),

    /// Manage the settings file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `karat config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new settings file from the template.
    Init(ConfigInitArgs),
    /// Display the effective settings with defaults applied.
    Show(ConfigPathArg),
    /// Validate a settings file.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a settings path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the settings file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated settings file.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `quote` subcommand.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Public reference price of the source grade.
    #[arg(long)]
    pub source: Decimal,

    /// Public reference price of the settlement grade.
    #[arg(long)]
    pub settlement: Decimal,

    /// Settlement price history, oldest first (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub history: Vec<Decimal>,

    /// Settings file; built-in defaults are used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of alternatives shown.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Arguments for the `tune` subcommand.
///
/// Optional fields override the `[tuning]` table of the settings file.
#[derive(Parser, Debug)]
pub struct TuneArgs {
    /// Settings file holding the scenarios.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Search algorithm (random, annealing).
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Number of weight vectors to evaluate.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// RNG seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many seconds.
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Public buy price of the settlement grade.
    #[arg(long)]
    pub settlement: Decimal,

    /// Grade display code (e.g. 610, 9999) or product label (e.g. "V75").
    #[arg(long)]
    pub grade: String,

    /// Internal buy price per unit.
    #[arg(long, default_value = "0")]
    pub buy: Decimal,

    /// Internal sell price per unit.
    #[arg(long, default_value = "0")]
    pub sell: Decimal,

    /// Product name shown in the report.
    #[arg(long)]
    pub name: Option<String>,

    /// Settings file for the settlement grade; defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

//! Global flag handling and command dispatch.

use super::command::{Cli, ColorChoice, Commands, ConfigCommand};
use super::{compare, config, output, quote, tune};

use crate::error::Result;

/// Apply global flags and run the selected command.
///
/// # Errors
///
/// Returns whatever the command handler returns.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match &cli.command {
        Commands::Quote(args) => quote::execute(args),
        Commands::Tune(args) => tune::execute(args),
        Commands::Compare(args) => compare::execute(args),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}

use clap::Parser;
use karat::adapter::inbound::cli::{command::Cli, dispatch, output};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = dispatch::run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::Level;

mod cli;
mod commands;
mod error;
mod render;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    taxrecon::console::init_with_level(level);

    match commands::execute(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

// uflat-cli: ABI manifest export and headless configuration checks.

mod abi;
mod check;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "uflat", about = "uflat CLI: boundary ABI manifest and headless config tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print kind tags, enum values, value-type layouts and error codes.
    Abi {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Parse a headless engine config and build an engine from it.
    CheckConfig {
        /// Path to the TOML config.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Abi { json } => {
            let manifest = abi::manifest();
            if json {
                match serde_json::to_string_pretty(&manifest) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: failed to serialize manifest: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", abi::render_text(&manifest));
            }
            ExitCode::SUCCESS
        }
        Commands::CheckConfig { path } => match check::check_file(&path) {
            Ok(report) => {
                println!("{}: ok", path.display());
                print!("{report}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_config_takes_a_path() {
        let cli = Cli::try_parse_from(["uflat", "check-config", "game.toml"]).unwrap();
        match cli.command {
            Commands::CheckConfig { path } => assert_eq!(path, PathBuf::from("game.toml")),
            Commands::Abi { .. } => panic!("parsed as abi"),
        }
    }

    #[test]
    fn abi_json_flag() {
        let cli = Cli::try_parse_from(["uflat", "abi", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Abi { json: true }));
    }
}

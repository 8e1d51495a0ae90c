pub mod commands;
pub mod logging;
pub mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopcart_core::config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "shopcart",
    about = "In-memory shopping cart simulator",
    long_about = "Browse a fixed product catalog, fill a cart, and check out from an interactive menu. Nothing is persisted between runs.",
    after_help = "Examples:\n  shopcart\n  shopcart catalog --json\n  shopcart --config shopcart.toml config"
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Read configuration from this TOML file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "LEVEL", help = "Log level: trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        value_parser = parse_log_format,
        help = "Log format: compact|pretty|json"
    )]
    log_format: Option<LogFormat>,
    #[arg(long, global = true, value_name = "N", help = "Retries allowed for a malformed number")]
    max_input_attempts: Option<u32>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start the interactive shopping menu (default)")]
    Shop,
    #[command(about = "Print the product catalog and exit")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    /// Flags are the highest-precedence configuration layer.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                max_input_attempts: self.max_input_attempts,
            },
        }
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    value.parse()
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = cli.load_options();
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::failure(
                "startup",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            eprintln!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    logging::init(&config);

    let result = match cli.command.unwrap_or(Command::Shop) {
        Command::Shop => commands::shop::run(&config),
        Command::Catalog { json } => commands::catalog::run(&config, json),
        Command::Config => {
            CommandResult::success(commands::config::run(&config, &options))
        }
    };

    if result.is_success() {
        if !result.output.is_empty() {
            println!("{}", result.output);
        }
    } else {
        eprintln!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

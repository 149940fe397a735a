//! CarFleet CLI
//!
//! Command-line interface for the manufacturer store

use std::path::PathBuf;

use carfleet_core::logging_facility::{init, Profile};
use carfleet_core_types::RequestContext;
use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "carfleet")]
#[command(about = "CarFleet - manufacturer registry", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML config file (defaults, then this file, then CARFLEET_* env vars)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file; overrides the configured database_path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Emit JSON logs instead of human-readable ones
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Manufacturer operations
    Manufacturer(commands::manufacturer::ManufacturerArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Migrate => "migrate",
            Commands::Manufacturer(args) => args.command.name(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init(if cli.global.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let ctx = RequestContext::new().for_command(cli.command.name());
    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id,
        command = ctx.command.as_deref().unwrap_or_default()
    );
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&cli.global),
        Commands::Manufacturer(args) => commands::manufacturer::execute(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! BBB CLI - Command-line front end for the BigBlueButton meeting workflows.
//!
//! Stands in for the web form: each subcommand maps onto one meeting
//! workflow and prints its result as text or JSON.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing::{info, warn};

use bbb_core::config::AppConfig;
use bbb_core::error::BbbResult;
use bbb_core::logging;

/// BBB - create, join, list, and end BigBlueButton meetings.
#[derive(Parser)]
#[command(
    name = "bbb",
    version,
    about = "BigBlueButton meeting CLI",
    long_about = "A command-line interface for BigBlueButton meetings.\n\
                   Signs API calls with the server's shared secret and prints join links."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a meeting from a room type and print the moderator join link.
    Create(commands::create::CreateArgs),
    /// Get a join link, creating the meeting first when a moderator asks for it.
    Join(commands::join::JoinArgs),
    /// List meetings on the server.
    List,
    /// End a running meeting.
    End {
        /// Meeting ID.
        meeting_id: String,
    },
    /// Show the configured room types.
    Rooms,
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print a signed URL for any API call.
    Sign {
        /// API call name (e.g. getMeetings).
        call: String,
        /// Query parameters as key=value, in order.
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match format {
                OutputFormat::Json => commands::print_failure(&e),
                OutputFormat::Text => eprintln!("  {} {e}", style("Error:").red().bold()),
            }
            ExitCode::FAILURE
        }
    }
}

/// Load config, set up logging, and dispatch. The log guard lives until this
/// returns, so buffered file output is flushed before the process exits.
async fn run(cli: Cli) -> BbbResult<()> {
    // Load configuration
    let config_path = cli.config.as_deref().map(std::path::Path::new);
    let config = AppConfig::load(config_path)?;

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let _guard = match config
        .effective_log_dir()
        .and_then(|dir| logging::init_logging(log_level, &dir, config.logging.json_output))
    {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_console_logging(log_level);
            warn!("file logging unavailable, using console only: {e}");
            None
        }
    };

    info!("BBB CLI v{}", bbb_core::constants::APP_VERSION);

    let format = cli.format;
    match cli.command {
        Commands::Create(args) => commands::create::run(&config, args, format).await,
        Commands::Join(args) => commands::join::run(&config, args, format).await,
        Commands::List => commands::list::run(&config, format).await,
        Commands::End { meeting_id } => commands::end::run(&config, &meeting_id, format).await,
        Commands::Rooms => commands::rooms::run(&config, format),
        Commands::Init { force } => commands::init::run(&config, config_path, force, format),
        Commands::Sign { call, params } => commands::sign::run(&config, &call, &params, format),
    }
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use stocks::core::DateRange;
use stocks::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print a table instead of the JSON response body
    #[arg(short, long, global = true)]
    table: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Search stocks by symbol or company name
    Search { query: String },
    /// Show the latest quote for a symbol
    Detail { symbol: String },
    /// Show daily closing prices for a symbol
    History {
        symbol: String,

        /// One of fiveday, onemonth, threemonth, sixmonth, oneyear
        #[arg(short, long, default_value = "onemonth")]
        range: DateRange,
    },
}

impl From<Commands> for stocks::AppCommand {
    fn from(cmd: Commands) -> stocks::AppCommand {
        match cmd {
            Commands::Search { query } => stocks::AppCommand::Search { query },
            Commands::Detail { symbol } => stocks::AppCommand::Detail { symbol },
            Commands::History { symbol, range } => stocks::AppCommand::History { symbol, range },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = if cli.table {
        stocks::OutputFormat::Table
    } else {
        stocks::OutputFormat::Json
    };

    let result = match cli.command {
        Some(Commands::Setup) => stocks::cli::setup::setup(),
        Some(cmd) => stocks::run_command(cmd.into(), cli.config_path.as_deref(), format).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

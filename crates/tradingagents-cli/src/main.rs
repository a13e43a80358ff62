//! Command-line launcher for the tradingagents analysis graph
//!
//! # Usage
//!
//! ```bash
//! # Answer the prompts, then hand the run to the engine
//! export TRADINGAGENTS_GRAPH_CMD="python -m tradingagents.serve"
//! tradingagents
//!
//! # Same run without prompts
//! tradingagents run --ticker NVDA --date 2025-07-04 --provider anthropic --depth medium
//!
//! # Inspect what would be sent without starting the engine
//! tradingagents --dry-run run --ticker NVDA --date 2025-07-04
//! ```

mod commands;
mod engine;
mod error;
mod profiles;
mod prompt;
mod steps;
mod summary;

use clap::{Parser, Subcommand};
use commands::{AppContext, RunArgs};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tradingagents")]
#[command(version, about = "Set up and launch a multi-agent trading analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON file overriding default configuration keys
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding saved provider profiles
    #[arg(long, global = true, value_name = "DIR")]
    profiles_dir: Option<PathBuf>,

    /// Command that runs the graph engine
    #[arg(long, global = true, env = "TRADINGAGENTS_GRAPH_CMD")]
    graph_cmd: Option<String>,

    /// Never start the engine; print the request instead
    #[arg(long, global = true)]
    dry_run: bool,

    /// Ask the engine for step-by-step tracing
    #[arg(long, global = true)]
    debug: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the prompts and run an analysis (default)
    Analyze,
    /// Run an analysis from flags only
    Run(RunArgs),
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage saved provider profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print defaults merged with environment and --config
    Show {
        /// Render as a table instead of JSON
        #[arg(long)]
        table: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProfilesAction {
    /// List saved profile names
    List,
}

fn print_banner() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║                 TradingAgents: Multi-Agents                  ║
║                LLM Financial Trading Framework               ║
║                                                              ║
║  Workflow: Analyst Team -> Research Team -> Trader ->        ║
║            Risk Management -> Portfolio Management           ║
╚══════════════════════════════════════════════════════════════╝
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tradingagents_utils::init_tracing(cli.verbose);

    let ctx = AppContext::load(
        cli.config.as_deref(),
        cli.profiles_dir,
        cli.graph_cmd,
        cli.dry_run,
        cli.debug,
    )?;

    let command = cli.command.unwrap_or(Command::Analyze);
    info!("Running command: {command:?}");

    let outcome = match command {
        Command::Analyze => {
            print_banner();
            commands::analyze(&ctx).await
        }
        Command::Run(args) => commands::run(&ctx, &args).await,
        Command::Config {
            action: ConfigAction::Show { table },
        } => commands::show_config(&ctx, table),
        Command::Profiles {
            action: ProfilesAction::List,
        } => commands::list_profiles(&ctx),
    };

    if let Err(err) = outcome {
        eprintln!("\n{err}. Exiting...");
        std::process::exit(1);
    }

    Ok(())
}

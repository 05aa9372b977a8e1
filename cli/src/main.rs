//! maws - Entry Point
//!
//! Skaylink client for deploying ECS services and following the rollout.

use clap::Parser;
use tracing::debug;

use maws::app::cli::{Cli, Commands, EcsCommands};
use maws::app::run::{connect, finish, run_deploy, run_status, Completion};
use maws::console::{Reporter, TerminalReporter};
use maws::errors::CliError;
use maws::logs::{init_logging, LogOptions};
use maws::storage::layout::StorageLayout;
use maws::utils::version_info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_options = LogOptions {
        log_level: cli.log_level.clone(),
        json_format: cli.log_json,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    debug!("maws {}", version_info());

    let reporter = TerminalReporter::new();
    let code = finish(&reporter, run(cli, &reporter).await);

    std::process::exit(code);
}

async fn run(cli: Cli, reporter: &dyn Reporter) -> Result<Completion, CliError> {
    let layout = StorageLayout::default();

    match cli.command {
        Commands::Ecs(EcsCommands::Deploy(args)) => {
            let client = connect(&layout, args.profile.as_deref()).await?;
            run_deploy(&client, reporter, args.into(), tokio::time::sleep).await
        }
        Commands::Ecs(EcsCommands::Status(args)) => {
            let client = connect(&layout, args.profile.as_deref()).await?;
            run_status(&client, reporter, args.into(), tokio::time::sleep).await
        }
    }
}

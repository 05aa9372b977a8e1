//! Command line interface

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::app::options::{DeployOptions, StatusOptions};
use crate::deploy::poller;
use crate::logs::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "maws")]
#[command(about = "Welcome to Skaylink client.")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", built ", env!("BUILD_TIME"), ")"),
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log level of diagnostics written to stderr (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Write diagnostics as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// ECS management commands
    #[command(subcommand)]
    Ecs(EcsCommands),
}

#[derive(Debug, Subcommand)]
pub enum EcsCommands {
    /// ECS Service Deployment Request
    Deploy(DeployArgs),

    /// Get the status of an ECS service deployment
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// The name of the service to be updated
    pub service_name: String,

    /// The container image to use for the service
    pub image: Option<String>,

    /// Force new deployment, even if the image has not changed
    #[arg(long)]
    pub force: bool,

    /// Secret ARN to attach to the service (repeatable)
    #[arg(long = "secret-arns", value_name = "ARN")]
    pub secret_arns: Vec<String>,

    /// Profile name from ~/.skaylink/profile.toml
    #[arg(long)]
    pub profile: Option<String>,

    /// Seconds between two status checks once the deployment is started
    #[arg(long, default_value_t = poller::DEFAULT_DELAY.as_secs())]
    pub delay: u64,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Name of the ECS service to check
    pub service_name: String,

    /// Seconds between two status checks
    #[arg(long, default_value_t = poller::DEFAULT_DELAY.as_secs())]
    pub delay: u64,

    /// Profile name from ~/.skaylink/profile.toml
    #[arg(long)]
    pub profile: Option<String>,
}

impl From<DeployArgs> for DeployOptions {
    fn from(args: DeployArgs) -> Self {
        Self {
            service_name: args.service_name,
            image: args.image,
            force: args.force,
            secret_arns: args.secret_arns,
            poller: poller::Options {
                delay: Duration::from_secs(args.delay),
            },
        }
    }
}

impl From<StatusArgs> for StatusOptions {
    fn from(args: StatusArgs) -> Self {
        StatusOptions::new(args.service_name).with_delay(Duration::from_secs(args.delay))
    }
}

//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not handle config loading (see `main`).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "provisio")]
#[command(
    about = "provisio - Self-service infrastructure provisioning from the command line",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  provisio auth login alice@example.com\n  provisio business-units select 6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b\n  provisio plugins list --search postgres --available\n  provisio deployments create --plugin postgres --name orders-db --input size=small --watch\n  provisio deployments retry 42\n  provisio audit list --action deployment.create --start-date 2024-05-01 -o json\n"
)]
pub struct Cli {
    /// Base URL of the provisioning backend (e.g., https://provisio.example.com)
    #[arg(short, long, global = true, env = "PROVISIO_API_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (or PROVISIO_TIMEOUT)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "PROVISIO_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Session file holding the access token and active business unit
    #[arg(long, global = true, env = "PROVISIO_SESSION_FILE", value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    /// Delay between deployment status polls, in milliseconds (or PROVISIO_POLL_INTERVAL_MS)
    #[arg(long, global = true, value_name = "MS")]
    pub poll_interval: Option<u64>,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Suppress all progress output (spinners).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log line format on stderr (verbosity comes from RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign out and inspect the current session
    Auth {
        #[command(subcommand)]
        command: commands::auth::AuthCommand,
    },

    /// Provision, inspect, retry and delete deployments
    Deployments {
        #[command(subcommand)]
        command: commands::deployments::DeploymentsCommand,
    },

    /// Browse the plugin catalog and manage plugin access
    Plugins {
        #[command(subcommand)]
        command: commands::plugins::PluginsCommand,
    },

    /// Manage roles and their permissions
    Roles {
        #[command(subcommand)]
        command: commands::roles::RolesCommand,
    },

    /// Manage groups and their members
    Groups {
        #[command(subcommand)]
        command: commands::groups::GroupsCommand,
    },

    /// Manage users
    Users {
        #[command(subcommand)]
        command: commands::users::UsersCommand,
    },

    /// Browse the audit log
    Audit {
        #[command(subcommand)]
        command: commands::audit::AuditCommand,
    },

    /// Manage business units and the active tenant scope
    #[command(name = "business-units", visible_alias = "bu")]
    BusinessUnits {
        #[command(subcommand)]
        command: commands::business_units::BusinessUnitsCommand,
    },

    /// Show cost reports
    Cost {
        #[command(subcommand)]
        command: commands::cost::CostCommand,
    },

    /// List and acknowledge notifications
    Notifications {
        #[command(subcommand)]
        command: commands::notifications::NotificationsCommand,
    },

    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

//! Command line surface of `muxingestctl`.

pub mod commands;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "muxingestctl",
    version,
    about = "Decide which hourly mux files to fetch from the broadcast archive"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to read configuration from.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// TOML configuration file (default: $MUXINGEST_CONFIG, muxingest.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Env file loaded before reading the environment (default: .env)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the files that need a new ingest and write the download manifest
    Initiate {
        /// Target date (YYYY-MM-DD); the retention window ends on it
        #[arg(long)]
        date: NaiveDate,
        /// Requests, channel mappings and workflow states (JSON or TOML)
        #[arg(long)]
        fixtures: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
        /// Override the configured retention days
        #[arg(long)]
        retention_days: Option<u32>,
        /// Instant the workflow states are judged against (RFC 3339, default: now)
        #[arg(long)]
        reference_time: Option<DateTime<Utc>>,
        /// Write the manifest here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Expand recording windows into hourly files without consulting workflow state
    Expand {
        /// First day (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: NaiveDate,
        /// Last day (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: NaiveDate,
        /// Requests and channel mappings (JSON or TOML)
        #[arg(long)]
        fixtures: PathBuf,
        /// IANA time zone of the archive's wall clock (default: Europe/Copenhagen)
        #[arg(long, env = "MUXINGEST_TIMEZONE")]
        timezone: Option<String>,
    },
    /// Print the archive file identity for one file
    FileId {
        /// Source channel id, e.g. dr1
        #[arg(long)]
        channel: String,
        /// Local start, e.g. 2012-01-09T14:00:00
        #[arg(long)]
        start: NaiveDateTime,
        /// Local end, e.g. 2012-01-09T15:00:00
        #[arg(long)]
        end: NaiveDateTime,
        /// IANA time zone of the archive's wall clock (default: Europe/Copenhagen)
        #[arg(long, env = "MUXINGEST_TIMEZONE")]
        timezone: Option<String>,
    },
    /// Load configuration and print the effective values
    CheckConfig {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

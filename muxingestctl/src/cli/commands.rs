use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use muxingest_config::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, DEFAULT_TIMEZONE,
};
use muxingest_contracts::RequestStore;
use muxingest_core::{
    IngestInitiator, IntervalExpander, identity::archive_file_id,
    manifest::DownloadManifest,
};
use tracing::{info, warn};

use super::{Cli, Command, ConfigArgs};
use crate::fixtures::Fixtures;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Initiate {
            date,
            fixtures,
            config,
            retention_days,
            reference_time,
            output,
        } => initiate(
            date,
            &fixtures,
            &config,
            retention_days,
            reference_time,
            output.as_deref(),
        ),
        Command::Expand {
            from,
            to,
            fixtures,
            timezone,
        } => expand(from, to, &fixtures, timezone.as_deref()),
        Command::FileId {
            channel,
            start,
            end,
            timezone,
        } => file_id(&channel, start, end, timezone.as_deref()),
        Command::CheckConfig { config } => check_config(&config),
    }
}

pub fn initiate(
    date: NaiveDate,
    fixtures: &Path,
    config: &ConfigArgs,
    retention_days: Option<u32>,
    reference_time: Option<DateTime<Utc>>,
    output: Option<&Path>,
) -> Result<()> {
    let ConfigLoad { config, .. } = load_config(config)?;
    let fixtures = Fixtures::load_from_file(fixtures)?;

    let settings = config
        .initiator_settings()
        .context("invalid ingest settings")?;
    let retention_days = retention_days.unwrap_or(settings.retention_days);
    let initiator = IngestInitiator::new(
        fixtures.request_store(),
        fixtures.channel_mapper(),
        fixtures.workflow_states(),
        settings,
    );

    let reference = reference_time.unwrap_or_else(Utc::now);
    let jobs = initiator
        .run_at(date, retention_days, reference)
        .with_context(|| format!("ingest run for {date} failed"))?;

    write_manifest(&DownloadManifest::from_candidates(&jobs), output)
}

pub fn expand(
    from: NaiveDate,
    to: NaiveDate,
    fixtures: &Path,
    timezone: Option<&str>,
) -> Result<()> {
    let timezone = parse_timezone(timezone)?;
    let fixtures = Fixtures::load_from_file(fixtures)?;

    let requests = fixtures
        .request_store()
        .valid_requests(from, to)
        .context("failed to read requests from fixtures")?;
    let candidates = IntervalExpander::new(fixtures.channel_mapper(), timezone)
        .expand(&requests, from, to)
        .with_context(|| format!("expansion of {from}..={to} failed"))?;
    info!(candidates = candidates.len(), "expanded recording windows");

    write_manifest(&DownloadManifest::from_candidates(&candidates), None)
}

pub fn file_id(
    channel: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    timezone: Option<&str>,
) -> Result<()> {
    let timezone = parse_timezone(timezone)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", archive_file_id(channel, start, end, timezone))?;
    Ok(())
}

pub fn check_config(config: &ConfigArgs) -> Result<()> {
    let ConfigLoad { config, warnings } = load_config(config)?;

    let mut stdout = io::stdout().lock();
    let config_file = config
        .metadata
        .config_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    writeln!(stdout, "config file: {config_file}")?;
    writeln!(stdout, "env file loaded: {}", config.metadata.env_file_loaded)?;
    writeln!(stdout, "retention_days: {}", config.retention_days)?;
    writeln!(
        stdout,
        "expected_ingest_duration: {}",
        humantime::format_duration(config.expected_ingest_duration)
    )?;
    writeln!(stdout, "final_component: {}", config.final_component)?;
    writeln!(stdout, "final_state: {}", config.final_state)?;
    writeln!(stdout, "timezone: {}", config.timezone)?;
    writeln!(stdout, "parallel_gate: {}", config.parallel_gate)?;
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => writeln!(stdout, "warning: {} ({hint})", warning.message)?,
            None => writeln!(stdout, "warning: {}", warning.message)?,
        }
    }
    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<ConfigLoad> {
    let load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    for warning in load.warnings.iter() {
        warn!(hint = warning.hint.as_deref(), "{}", warning.message);
    }
    Ok(load)
}

/// `--timezone` / `MUXINGEST_TIMEZONE`, else the configured default.
fn parse_timezone(raw: Option<&str>) -> Result<Tz> {
    match raw {
        Some(raw) => raw
            .parse::<Tz>()
            .map_err(|err| anyhow!("invalid time zone '{raw}': {err}")),
        None => Ok(DEFAULT_TIMEZONE),
    }
}

fn write_manifest(manifest: &DownloadManifest, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| {
                format!("failed to create manifest {}", path.display())
            })?;
            manifest.write_to(BufWriter::new(file))?;
            info!(
                path = %path.display(),
                downloads = manifest.len(),
                "wrote download manifest"
            );
        }
        None => manifest.write_to(io::stdout().lock())?,
    }
    Ok(())
}


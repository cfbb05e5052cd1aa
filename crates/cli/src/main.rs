mod cli;
mod config;
mod output;
mod source;
mod window;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use cronscan_export::{write_report, ScanRecord};
use cronscan_schedule::{parse_crontab, scan, ScanMode, SplitOptions};

use crate::cli::CliArgs;
use crate::config::CliConfig;
use crate::source::CrontabSource;
use crate::window::{resolve_window, WindowArgs};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so stdout stays clean for `-o -`
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    let now = chrono::Local::now().naive_local();
    let window = resolve_window(
        WindowArgs {
            start: args.start_time.as_deref(),
            end: args.end_time.as_deref(),
            span: args.time_span.as_deref(),
            default_span: &config.default_span,
        },
        now,
    )?;

    let source = CrontabSource::load(args.file.as_deref())?;

    // Priority: CLI flag > config file > path heuristic
    let user_column = args
        .user_column
        .or(config.user_column)
        .unwrap_or_else(|| source.user_column());

    let parsed = parse_crontab(&source.text, &SplitOptions::with_user_column(user_column));
    for diagnostic in &parsed.diagnostics {
        warn!(line = diagnostic.line, error = %diagnostic.kind, "Skipping crontab line");
    }
    info!(
        entries = parsed.entries.len(),
        skipped = parsed.diagnostics.len(),
        %user_column,
        "Parsed crontab"
    );

    let records: Vec<ScanRecord> = if args.list {
        parsed.entries.iter().map(ScanRecord::from_entry).collect()
    } else {
        let mode = if args.next_only {
            ScanMode::NextOnly
        } else {
            ScanMode::All
        };
        scan(&parsed.entries, &window, mode)
            .iter()
            .map(ScanRecord::from_occurrence)
            .collect()
    };

    let records = fill_owner(records, source.owner());

    let format = args.format.unwrap_or(config.default_format);
    let destination = output::resolve_destination(
        args.output.as_deref(),
        config.output_dir.as_deref(),
        &window,
        format,
    );

    let written = write_report(&records, format, destination.as_deref())
        .context("failed to write report")?;
    if let Some(path) = written {
        println!("Output written to: {}", path.display());
    }

    if args.list {
        eprintln!("Found {} cron jobs.", records.len());
    } else {
        eprintln!(
            "Found {} cron jobs scheduled in the specified time range.",
            records.len()
        );
    }

    Ok(())
}

/// Attribute entries without a user column to the crontab's owner.
fn fill_owner(mut records: Vec<ScanRecord>, owner: Option<String>) -> Vec<ScanRecord> {
    if let Some(owner) = owner {
        for record in records.iter_mut().filter(|r| r.user.is_none()) {
            record.user = Some(owner.clone());
        }
    }
    records
}

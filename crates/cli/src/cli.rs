use std::path::PathBuf;

use clap::Parser;

use cronscan_export::Format;
use cronscan_schedule::UserColumn;

/// Scan a crontab for jobs that run within a time window.
///
/// Reads a crontab file (or the current user's crontab via `crontab -l`),
/// finds every run between the start and end of the window and writes
/// them out as CSV, JSON, XLSX, PDF, a text table or a Markdown table.
#[derive(Parser, Debug)]
#[command(name = "cronscan", version, about = "Scan crontab entries within a time window")]
pub struct CliArgs {
    /// Crontab file to read (default: output of `crontab -l`)
    #[arg(short = 'f', long, env = "CRONSCAN_FILE")]
    pub file: Option<PathBuf>,

    /// Window start: YYYY-MM-DD[THH:MM] or "YYYY-MM-DD HH:MM" (default: now)
    #[arg(short = 's', long)]
    pub start_time: Option<String>,

    /// Window end, same formats as --start-time (an end before the start swaps the two)
    #[arg(short = 'e', long, conflicts_with = "time_span")]
    pub end_time: Option<String>,

    /// Window length, e.g. 1d, 2h, 30m, 1h30m (default from config: 1d)
    #[arg(short = 't', long)]
    pub time_span: Option<String>,

    /// Output format: csv, json, xlsx, text, pdf, md (xlsx and pdf need a file)
    #[arg(short = 'F', long, env = "CRONSCAN_FORMAT")]
    pub format: Option<Format>,

    /// Output file; `-` writes to stdout (default: cron_scan_<start>_to_<end>.<ext>)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Whether lines carry a username column: auto, present, absent
    #[arg(long, env = "CRONSCAN_USER_COLUMN")]
    pub user_column: Option<UserColumn>,

    /// Report only the first run of each entry
    #[arg(long)]
    pub next_only: bool,

    /// List entries without scanning a window
    #[arg(long, conflicts_with = "next_only")]
    pub list: bool,

    /// Path to config file (default: ~/.config/cronscan/config.toml)
    #[arg(long, env = "CRONSCAN_CONFIG")]
    pub config: Option<PathBuf>,
}

//! Window resolution from the time arguments.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use cronscan_schedule::{MatchWindow, WindowError};

/// Invalid combination or spelling of the time arguments.
#[derive(Debug, thiserror::Error)]
pub enum WindowArgsError {
    #[error("invalid datetime '{0}': expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or \"YYYY-MM-DD HH:MM\"")]
    InvalidDatetime(String),

    #[error("invalid time span '{0}': expected e.g. 1d, 2h, 30m or 1h30m")]
    InvalidSpan(String),

    #[error("cannot specify both --end-time and --time-span")]
    EndAndSpan,

    #[error(transparent)]
    Window(#[from] WindowError),
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a local wall-clock time. A bare date means midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, WindowArgsError> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| WindowArgsError::InvalidDatetime(s.to_string()))
}

/// Parse a span like "1d", "2h", "30m" or "1h30m".
///
/// Every number needs a unit; "30m15" is rejected as ambiguous.
pub fn parse_span(s: &str) -> Result<Duration, WindowArgsError> {
    let invalid = || WindowArgsError::InvalidSpan(s.to_string());
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut total_minutes: i64 = 0;
    let mut num_buf = String::new();

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            num_buf.push(ch);
            continue;
        }
        let n: i64 = num_buf.parse().map_err(|_| invalid())?;
        num_buf.clear();
        let per_unit = match ch {
            'd' => 1_440,
            'h' => 60,
            'm' => 1,
            _ => return Err(invalid()),
        };
        total_minutes = n
            .checked_mul(per_unit)
            .and_then(|m| total_minutes.checked_add(m))
            .ok_or_else(invalid)?;
    }

    if !num_buf.is_empty() {
        return Err(invalid());
    }
    Duration::try_minutes(total_minutes).ok_or_else(invalid)
}

/// Raw time arguments, after config defaults are known.
#[derive(Debug, Clone, Copy)]
pub struct WindowArgs<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub span: Option<&'a str>,
    pub default_span: &'a str,
}

/// Build the scan window. Start defaults to `now`; without an end or span
/// the default span applies. An end before the start swaps the two.
pub fn resolve_window(
    args: WindowArgs<'_>,
    now: NaiveDateTime,
) -> Result<MatchWindow, WindowArgsError> {
    let start = args.start.map(parse_datetime).transpose()?.unwrap_or(now);
    let window = match (args.end, args.span) {
        (Some(_), Some(_)) => return Err(WindowArgsError::EndAndSpan),
        (Some(end), None) => {
            let end = parse_datetime(end)?;
            if end < start {
                warn!(%start, %end, "End time precedes start time, swapping");
                MatchWindow::new(end, start)?
            } else {
                MatchWindow::new(start, end)?
            }
        }
        (None, Some(span)) => MatchWindow::from_span(start, parse_span(span)?)?,
        (None, None) => MatchWindow::from_span(start, parse_span(args.default_span)?)?,
    };
    Ok(window)
}

//! Crontab line splitting.
//!
//! Turns raw crontab text into candidate entry lines: comments, blank lines
//! and environment assignments are dropped, the optional user column is
//! detected, inline comments are stripped and multi-command lines are split
//! on unquoted `;`. Lines that cannot be split are reported as diagnostics
//! without stopping the pass.

mod quoting;
mod user;


use tracing::debug;

use crate::error::{Diagnostic, MalformedLineError};

pub use self::quoting::{split_commands, strip_inline_comment};
pub use self::user::UserColumn;

/// Options controlling how ambiguous lines are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub user_column: UserColumn,
}

impl SplitOptions {
    pub fn with_user_column(user_column: UserColumn) -> Self {
        Self { user_column }
    }
}

/// Schedule portion of a candidate line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleText {
    /// The five leading tokens, unvalidated.
    Fields([String; 5]),
    /// An `@name` shorthand.
    Macro(String),
}

/// A line that has been split but whose schedule is not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    /// 1-based line number in the source text.
    pub line: usize,
    /// The source line, trimmed.
    pub text: String,
    pub user: Option<String>,
    pub schedule: ScheduleText,
    /// Commands after comment stripping and `;` splitting. Never empty.
    pub commands: Vec<String>,
}

/// Split crontab text into candidate lines and diagnostics for malformed ones.
pub fn split_lines(text: &str, options: &SplitOptions) -> (Vec<CandidateLine>, Vec<Diagnostic>) {
    let mut candidates = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match split_line(line, raw, options) {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => {}
            Err(e) => {
                debug!(line, error = %e, "skipping malformed crontab line");
                diagnostics.push(Diagnostic::new(line, e));
            }
        }
    }

    (candidates, diagnostics)
}

/// Split a single line. `Ok(None)` means the line carries no entry.
fn split_line(
    line: usize,
    raw: &str,
    options: &SplitOptions,
) -> Result<Option<CandidateLine>, MalformedLineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (schedule, rest) = if trimmed.starts_with('@') {
        let (head, rest) = take_tokens(trimmed, 1);
        (ScheduleText::Macro(head[0].to_string()), rest)
    } else {
        let (fields, rest) = take_tokens(trimmed, 5);
        let looks_scheduled = fields.len() == 5 && fields.iter().all(|t| is_schedule_token(t));
        if !looks_scheduled && is_env_assignment(trimmed) {
            debug!(line, "skipping environment assignment");
            return Ok(None);
        }
        if fields.len() < 5 {
            return Err(MalformedLineError::new(format!(
                "expected 5 schedule fields, found {}",
                fields.len()
            )));
        }
        let fields: [String; 5] = std::array::from_fn(|i| fields[i].to_string());
        (ScheduleText::Fields(fields), rest)
    };

    if rest.is_empty() {
        return Err(MalformedLineError::new("missing command"));
    }

    let (user, command) = options.user_column.extract(rest);
    let command = strip_inline_comment(command);
    let commands: Vec<String> = split_commands(command.trim_end())
        .into_iter()
        .filter(|c| !c.is_empty())
        .collect();
    if commands.is_empty() {
        return Err(MalformedLineError::new("missing command"));
    }

    Ok(Some(CandidateLine {
        line,
        text: trimmed.to_string(),
        user,
        schedule,
        commands,
    }))
}

/// Take up to `count` whitespace-separated tokens, returning them and the
/// untouched remainder (leading whitespace removed).
pub(crate) fn take_tokens(text: &str, count: usize) -> (Vec<&str>, &str) {
    let mut tokens = Vec::with_capacity(count);
    let mut rest = text.trim_start();
    while tokens.len() < count && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (tokens, rest)
}

/// Characters a schedule field can be made of (digits, operators, names).
fn is_schedule_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '?' | ',' | '-' | '/'))
}

/// `NAME=value` with an optional space around `=`.
fn is_env_assignment(line: &str) -> bool {
    let Some((name, _)) = line.split_once('=') else {
        return false;
    };
    let name = name.trim_end();
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

//! Error types and per-line diagnostics for crontab parsing.

use chrono::NaiveDateTime;

use crate::field::Unit;

/// A line that could not be split into schedule tokens and a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed entry: {reason}")]
pub struct MalformedLineError {
    pub reason: String,
}

impl MalformedLineError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A schedule token that violates the cron grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {} '{token}': {reason}", field_label(.unit))]
pub struct ScheduleSyntaxError {
    /// Unit the token was parsed for. `None` for whole-line problems such as an unknown macro.
    pub unit: Option<Unit>,
    pub token: String,
    pub reason: String,
}

fn field_label(unit: &Option<Unit>) -> String {
    match unit {
        Some(unit) => format!("{unit} field"),
        None => "schedule".to_string(),
    }
}

impl ScheduleSyntaxError {
    pub(crate) fn field(unit: Unit, token: &str, reason: impl Into<String>) -> Self {
        Self {
            unit: Some(unit),
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn macro_token(token: &str, reason: impl Into<String>) -> Self {
        Self {
            unit: None,
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors constructing a [`MatchWindow`](crate::MatchWindow).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The window start lies after its end.
    #[error("window start {start} is after end {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

// ── Diagnostics ─────────────────────────────────────────────────────

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    #[error(transparent)]
    Malformed(#[from] MalformedLineError),

    #[error(transparent)]
    Syntax(#[from] ScheduleSyntaxError),
}

/// A skipped line, reported alongside the entries that did parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: impl Into<DiagnosticKind>) -> Self {
        Self {
            line,
            kind: kind.into(),
        }
    }

    /// Human-readable reason, without the line number.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

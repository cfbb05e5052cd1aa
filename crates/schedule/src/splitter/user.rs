//! User-column detection.
//!
//! System crontabs (`/etc/crontab`, `/etc/cron.d/*`) carry a username
//! between the schedule and the command; user crontabs do not. Nothing in the
//! line itself marks which form is in use, so the caller picks a policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::take_tokens;

/// How to treat the token that follows the schedule fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserColumn {
    /// Guess per line from the shape of the next two tokens.
    #[default]
    Auto,
    /// Always a username when it looks like one and a command follows it.
    Present,
    /// Never a username.
    Absent,
}

/// Command names that are never read as usernames in [`UserColumn::Auto`].
const COMMON_COMMANDS: &[&str] = &[
    "bash", "cat", "cd", "cp", "curl", "dash", "date", "echo", "env", "exec", "find", "flock",
    "ionice", "ksh", "logger", "make", "mkdir", "mv", "nice", "node", "perl", "php", "python",
    "python3", "rm", "rsync", "ruby", "run-parts", "sh", "sleep", "sudo", "tar", "test", "timeout",
    "touch", "true", "wget", "zsh",
];

impl UserColumn {
    /// Split `rest` (text after the schedule) into an optional user and the command.
    pub fn extract(self, rest: &str) -> (Option<String>, &str) {
        let (head, after) = take_tokens(rest, 1);
        let Some(candidate) = head.first().copied() else {
            return (None, rest);
        };
        if after.is_empty() || !is_username(candidate) {
            return (None, rest);
        }

        let is_user = match self {
            UserColumn::Absent => false,
            UserColumn::Present => true,
            UserColumn::Auto => {
                let (next, _) = take_tokens(after, 1);
                !COMMON_COMMANDS.contains(&candidate)
                    && next.first().is_some_and(|t| looks_like_command_start(t))
            }
        };

        if is_user {
            (Some(candidate.to_string()), after)
        } else {
            (None, rest)
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_-]*`: no path separator, no flag prefix, no quoting.
fn is_username(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A path, or a bare word that could name an executable.
fn looks_like_command_start(token: &str) -> bool {
    if token.starts_with('/') || token.starts_with("./") || token.starts_with("~/") {
        return true;
    }
    if token.contains('=') {
        return false;
    }
    token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

impl fmt::Display for UserColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserColumn::Auto => "auto",
            UserColumn::Present => "present",
            UserColumn::Absent => "absent",
        })
    }
}

impl FromStr for UserColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(UserColumn::Auto),
            "present" | "system" => Ok(UserColumn::Present),
            "absent" | "none" => Ok(UserColumn::Absent),
            other => Err(format!(
                "unknown user column mode '{other}' (expected auto, present or absent)"
            )),
        }
    }
}

//! Where the crontab text comes from.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::debug;

use cronscan_schedule::UserColumn;

/// Origin of the crontab text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    /// Output of `crontab -l` for the invoking user.
    UserCrontab,
}

#[derive(Debug, Clone)]
pub struct CrontabSource {
    pub origin: Origin,
    pub text: String,
}

impl CrontabSource {
    /// Read `path`, or the current user's crontab when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_crontab_command(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read crontab: {}", path.display()))?;
        debug!(path = %path.display(), bytes = text.len(), "Read crontab file");
        Ok(Self {
            origin: Origin::File(path.to_path_buf()),
            text,
        })
    }

    fn from_crontab_command() -> Result<Self> {
        let output = Command::new("crontab")
            .arg("-l")
            .output()
            .context("failed to run 'crontab -l'; is cron installed?")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("'crontab -l' failed ({}): {}", output.status, stderr.trim());
        }
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "Read user crontab");
        Ok(Self {
            origin: Origin::UserCrontab,
            text,
        })
    }

    /// Owner of the crontab when the text itself names nobody: the invoking
    /// user for `crontab -l`, unknown for files.
    pub fn owner(&self) -> Option<String> {
        self.owner_from(|key| std::env::var(key).ok())
    }

    fn owner_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        match self.origin {
            Origin::UserCrontab => ["USER", "LOGNAME"]
                .into_iter()
                .find_map(|key| lookup(key).filter(|name| !name.is_empty())),
            Origin::File(_) => None,
        }
    }

    /// User-column policy implied by the origin: system files carry a
    /// username column, anything else is left to detection.
    pub fn user_column(&self) -> UserColumn {
        match &self.origin {
            Origin::File(path) if is_system_crontab(path) => UserColumn::Present,
            _ => UserColumn::Auto,
        }
    }
}

/// `/etc/crontab` and files under `/etc/cron.d` or `/etc/cron.*`.
pub fn is_system_crontab(path: &Path) -> bool {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let Ok(rest) = path.strip_prefix("/etc") else {
        return false;
    };
    let mut components = rest.components();
    match components.next().and_then(|c| c.as_os_str().to_str()) {
        Some("crontab") => components.next().is_none(),
        Some(dir) => dir.starts_with("cron.") && components.next().is_some(),
        None => false,
    }
}

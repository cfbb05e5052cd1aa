//! Report destination.

use std::path::{Path, PathBuf};

use cronscan_export::Format;
use cronscan_schedule::MatchWindow;

const STDOUT: &str = "-";

const NAME_TIME_FORMAT: &str = "%Y%m%d_%H%M";

/// `cron_scan_<start>_to_<end>.<ext>` for the window.
pub fn default_file_name(window: &MatchWindow, format: Format) -> String {
    format!(
        "cron_scan_{}_to_{}.{}",
        window.start().format(NAME_TIME_FORMAT),
        window.end().format(NAME_TIME_FORMAT),
        format.extension()
    )
}

/// Where to write the report; `None` means stdout.
pub fn resolve_destination(
    output: Option<&Path>,
    output_dir: Option<&Path>,
    window: &MatchWindow,
    format: Format,
) -> Option<PathBuf> {
    match output {
        Some(path) if path == Path::new(STDOUT) => None,
        Some(path) => Some(path.to_path_buf()),
        None => {
            let name = default_file_name(window, format);
            Some(match output_dir {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn window() -> MatchWindow {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();
        MatchWindow::new(at("2025-01-01T09:05"), at("2025-01-02T09:05")).unwrap()
    }

    #[test]
    fn default_name_encodes_window_and_extension() {
        assert_eq!(
            default_file_name(&window(), Format::Text),
            "cron_scan_20250101_0905_to_20250102_0905.txt"
        );
    }

    #[test]
    fn destinations() {
        let w = window();
        assert_eq!(resolve_destination(Some(Path::new("-")), None, &w, Format::Csv), None);
        assert_eq!(
            resolve_destination(Some(Path::new("out.json")), Some(Path::new("/r")), &w, Format::Json),
            Some(PathBuf::from("out.json"))
        );
        assert_eq!(
            resolve_destination(None, Some(Path::new("/r")), &w, Format::Markdown),
            Some(PathBuf::from("/r/cron_scan_20250101_0905_to_20250102_0905.md"))
        );
    }
}

//! Quote-aware scanning of command text.

/// Tracks shell quoting while walking a command character by character.
#[derive(Debug, Default)]
struct QuoteState {
    in_single: bool,
    in_double: bool,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns `true` if it is outside any quotes and not escaped.
    fn advance(&mut self, ch: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match ch {
            '\\' if !self.in_single => {
                self.escaped = true;
                false
            }
            '\'' if !self.in_double => {
                self.in_single = !self.in_single;
                false
            }
            '"' if !self.in_single => {
                self.in_double = !self.in_double;
                false
            }
            _ => !self.in_single && !self.in_double,
        }
    }
}

/// Remove an unquoted `#` comment and anything after it, then trim trailing whitespace.
pub fn strip_inline_comment(command: &str) -> &str {
    let mut state = QuoteState::default();
    for (idx, ch) in command.char_indices() {
        if state.advance(ch) && ch == '#' {
            return command[..idx].trim_end();
        }
    }
    command.trim_end()
}

/// Split on unquoted, unescaped `;`. Segments are trimmed; empty ones are kept.
pub fn split_commands(command: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut state = QuoteState::default();
    let mut start = 0;
    for (idx, ch) in command.char_indices() {
        if state.advance(ch) && ch == ';' {
            parts.push(command[start..idx].trim().to_string());
            start = idx + ch.len_utf8();
        }
    }
    parts.push(command[start..].trim().to_string());
    parts
}

//! Transient status message and command hints shown under the table.

use std::time::{Duration, Instant};

/// A status line that disappears once its time to live has passed.
///
/// Expiry is evaluated lazily against the instant passed to
/// [`current`](Self::current); nothing runs in the background.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: Option<String>,
    shown_at: Instant,
    ttl: Duration,
}

impl StatusMessage {
    pub fn new(ttl: Duration) -> Self {
        Self {
            text: None,
            shown_at: Instant::now(),
            ttl,
        }
    }

    /// Shows `text` starting at `now`, replacing any earlier message.
    pub fn show(
        &mut self,
        text: impl Into<String>,
        now: Instant,
    ) {
        self.text = Some(text.into());
        self.shown_at = now;
    }

    pub fn clear(&mut self) {
        self.text = None;
    }

    /// The message if it is still visible at `now`.
    pub fn current(
        &self,
        now: Instant,
    ) -> Option<&str> {
        let text = self.text.as_deref()?;
        if now.saturating_duration_since(self.shown_at) < self.ttl {
            Some(text)
        } else {
            None
        }
    }
}

/// Command hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Build a status bar line from a list of command hints.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Hints for the commands the interactive session understands.
pub mod hints {
    use super::KeyHint;

    pub const ADD: KeyHint = KeyHint::new("add", "New record");
    pub const EDIT: KeyHint = KeyHint::new("edit <#>", "Edit row");
    pub const DELETE: KeyHint = KeyHint::new("delete <#>", "Delete row");
    pub const CLEAR: KeyHint = KeyHint::new("clear", "Clear all");
    pub const RESET: KeyHint = KeyHint::new("reset", "Cancel edit");
    pub const LIST: KeyHint = KeyHint::new("list", "Show table");
    pub const QUIT: KeyHint = KeyHint::new("quit", "Exit");

    pub const LEVEL: KeyHint = KeyHint::new("level <filter>", "Log filter");
    pub const LOGFILE: KeyHint = KeyHint::new("logfile <path|off>", "Log file");

    pub const ALL: [KeyHint; 7] = [ADD, EDIT, DELETE, CLEAR, RESET, LIST, QUIT];
    pub const LOGGING: [KeyHint; 2] = [LEVEL, LOGFILE];
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_visible_before_ttl() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(3));

        status.show("Record added!", start);

        assert_eq!(status.current(start), Some("Record added!"));
        assert_eq!(
            status.current(start + Duration::from_millis(2999)),
            Some("Record added!")
        );
    }

    #[test]
    fn message_hidden_after_ttl() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(3));

        status.show("Record added!", start);

        assert_eq!(status.current(start + Duration::from_secs(3)), None);
    }

    #[test]
    fn newer_message_restarts_timer() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(3));
        status.show("first", start);

        status.show("second", start + Duration::from_secs(2));

        assert_eq!(status.current(start + Duration::from_secs(4)), Some("second"));
    }

    #[test]
    fn clear_hides_immediately() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(3));
        status.show("Editing record...", start);

        status.clear();

        assert_eq!(status.current(start), None);
    }

    #[test]
    fn status_bar_joins_hints() {
        let line = build_status_bar(&[hints::ADD, hints::QUIT]);

        assert_eq!(line, "add: New record | quit: Exit");
    }
}

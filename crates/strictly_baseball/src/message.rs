//! Short-lived announcements ("Strikeout!", "2 runs score!").
//!
//! Messages are cosmetic: they expire on their own and never feed back into
//! the game state.

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How long a message stays visible by default.
pub const DEFAULT_MESSAGE_DURATION: Duration = Duration::from_millis(1800);

/// A posted message and when it was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    /// Message text.
    pub text: String,
    /// Post time.
    pub posted_at: Instant,
}

/// Holds at most one message at a time.
#[derive(Debug, Clone)]
pub struct MessageBoard {
    current: Option<TransientMessage>,
    duration: Duration,
}

impl MessageBoard {
    /// Creates a board whose messages live for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { current: None, duration }
    }

    /// Posts `text` now, replacing any earlier message.
    pub fn post(&mut self, text: impl Into<String>) {
        self.post_at(text, Instant::now());
    }

    /// Posts `text` as of `now`.
    #[instrument(skip(self, text), fields(text = tracing::field::Empty))]
    pub fn post_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::Span::current().record("text", text.as_str());
        debug!("Message posted");
        self.current = Some(TransientMessage { text, posted_at: now });
    }

    /// Text visible at `now`, if the latest message has not expired.
    pub fn current_at(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|message| now.saturating_duration_since(message.posted_at) < self.duration)
            .map(|message| message.text.as_str())
    }

    /// Text visible right now.
    pub fn current(&self) -> Option<&str> {
        self.current_at(Instant::now())
    }

    /// Latest message text regardless of age.
    pub fn latest(&self) -> Option<&str> {
        self.current.as_ref().map(|message| message.text.as_str())
    }

    /// Removes the message.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_DURATION)
    }
}

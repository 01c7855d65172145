//! Append-only chat transcript.
//!
//! Turns are never edited or removed. The user's turn is appended
//! optimistically (status `Pending`) before the backend call starts; once
//! the call settles the pending turn is marked and the reply (or a
//! synthetic error turn) is appended after it. Tests can assert on the
//! final shape of the log without depending on timing.

use chrono::{DateTime, Local};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Ai,
}

impl ChatSender {
    /// Returns the short tag shown in front of a turn.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Ai => " AI",
        }
    }
}

/// Settlement state of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnStatus {
    /// A user turn whose reply has not arrived yet.
    Pending,
    /// Settled normally.
    #[default]
    SettledOk,
    /// Settled by a failure; for AI turns this marks the synthetic
    /// fallback reply.
    SettledError,
}

/// One transcript entry.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub text: String,
    pub sender: ChatSender,
    pub status: TurnStatus,
    pub at: DateTime<Local>,
}

/// Ordered, append-only log of chat turns.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Appends the user's turn optimistically, before the call resolves.
    pub fn push_user_pending(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            text: text.into(),
            sender: ChatSender::User,
            status: TurnStatus::Pending,
            at: Local::now(),
        });
    }

    /// Appends a settled assistant reply.
    pub fn push_ai(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            text: text.into(),
            sender: ChatSender::Ai,
            status: TurnStatus::SettledOk,
            at: Local::now(),
        });
    }

    /// Appends the synthetic assistant turn used when a call fails. The
    /// transcript never shows a raw error or a partial turn.
    pub fn push_ai_error(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn {
            text: text.into(),
            sender: ChatSender::Ai,
            status: TurnStatus::SettledError,
            at: Local::now(),
        });
    }

    /// Marks the most recent pending user turn with the given status.
    pub fn settle_pending(&mut self, status: TurnStatus) {
        if let Some(turn) = self
            .turns
            .iter_mut()
            .rev()
            .find(|turn| turn.status == TurnStatus::Pending)
        {
            turn.status = status;
        }
    }

    /// Returns all turns in order.
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

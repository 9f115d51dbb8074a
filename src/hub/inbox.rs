//! [`InboxMessage`]: the payload that flows from the mail service, through
//! the notification hub, to a subscriber (§3 data model, §6 wire format).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Delivery priority of an [`InboxMessage`], distinct from
/// [`crate::message::MessagePriority`]: that one governs mailbox dispatch
/// order, this one is a domain attribute of a mail message that travels to
/// the wire (§6) unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxPriority {
    Low,
    Normal,
    Urgent,
}

impl Default for InboxPriority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Where an [`InboxMessage`] sits in the `unread → read → {starred,
/// archived}` / `→ acknowledged` state machine (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxState {
    Unread,
    Read,
    Starred,
    Archived,
    Acknowledged,
}

impl InboxState {
    /// Whether `next` is a legal transition from `self` under §4.9's state
    /// machine. `Acknowledged` is reachable from any non-terminal state;
    /// `Starred`/`Archived` both require having passed through `Read`.
    pub fn can_transition_to(self, next: Self) -> bool {
        use InboxState::*;
        match (self, next) {
            (_, Acknowledged) => true,
            (Unread, Read) => true,
            (Read, Starred) => true,
            (Read, Archived) => true,
            (Starred, Archived) => true,
            (a, b) if a == b => true,
            _ => false,
        }
    }
}

/// One mail message as it travels from the mail service through the
/// notification hub to a subscriber, or over the wire to a bridge (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: u64,
    pub sender_id: u64,
    pub sender_name: String,
    pub subject: String,
    pub body: String,
    pub priority: InboxPriority,
    pub created_at: DateTime<Utc>,
    pub thread_id: String,
    pub state: InboxState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledged_is_reachable_from_any_state() {
        for state in [
            InboxState::Unread,
            InboxState::Read,
            InboxState::Starred,
            InboxState::Archived,
        ] {
            assert!(state.can_transition_to(InboxState::Acknowledged));
        }
    }

    #[test]
    fn starred_requires_having_been_read() {
        assert!(!InboxState::Unread.can_transition_to(InboxState::Starred));
        assert!(InboxState::Read.can_transition_to(InboxState::Starred));
    }

    #[test]
    fn archived_is_reachable_from_read_or_starred() {
        assert!(InboxState::Read.can_transition_to(InboxState::Archived));
        assert!(InboxState::Starred.can_transition_to(InboxState::Archived));
        assert!(!InboxState::Unread.can_transition_to(InboxState::Archived));
    }

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&InboxPriority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}

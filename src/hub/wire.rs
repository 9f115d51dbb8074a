//! The notification hub's external JSON shape (§6), consumed by a
//! WebSocket bridge outside this crate's scope. Nothing in this module
//! reads these types back in — they exist purely so a collaborator can
//! serialize a delivered [`InboxMessage`] the way §6 specifies without
//! reverse-engineering field names from the hub's internal types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::Serialize;

// Layer 3: Internal module imports
use super::inbox::InboxMessage;

/// `{ "type": "new_message", "payload": { ... } }` (§6).
#[derive(Debug, Clone, Serialize)]
pub struct NewMessageEvent {
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub payload: InboxMessage,
}

impl NewMessageEvent {
    pub fn new(payload: InboxMessage) -> Self {
        Self {
            event_type: "new_message",
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::inbox::{InboxPriority, InboxState};
    use chrono::Utc;

    #[test]
    fn serializes_with_type_tag_and_payload_envelope() {
        let event = NewMessageEvent::new(InboxMessage {
            id: 1,
            sender_id: 7,
            sender_name: "alice".to_string(),
            subject: "hi".to_string(),
            body: "body".to_string(),
            priority: InboxPriority::Urgent,
            created_at: Utc::now(),
            thread_id: "t-1".to_string(),
            state: InboxState::Unread,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "new_message");
        assert_eq!(json["payload"]["sender_name"], "alice");
        assert_eq!(json["payload"]["priority"], "urgent");
    }
}

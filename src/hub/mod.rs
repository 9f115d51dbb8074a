//! Publish/subscribe fan-out for inbox notifications (§4.8).
//!
//! # Components
//!
//! - [`inbox::InboxMessage`] / [`inbox::InboxPriority`] / [`inbox::InboxState`]
//!   — the payload the hub fans out and the mail service produces
//! - [`notification_hub::NotificationHub`] — the hub itself, an ordinary
//!   [`crate::actor::Behavior`] over [`notification_hub::HubRequest`]
//! - [`wire::NewMessageEvent`] — the external JSON shape (§6) a downstream
//!   bridge serializes a delivered message into

pub mod inbox;
pub mod notification_hub;
pub mod wire;

pub use inbox::{InboxMessage, InboxPriority, InboxState};
pub use notification_hub::{HubRequest, HubResponse, NotificationHub};
pub use wire::NewMessageEvent;

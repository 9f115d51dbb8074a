//! [`MailService`]: a hosted [`Behavior`] over a sealed `MailRequest` sum
//! (§4.9).
//!
//! This is the first of the two "illustrative services" §4.9 asks for: a
//! demonstration that an ordinary domain object becomes an actor by nothing
//! more than implementing `Behavior` over its own request/response sum.
//! Nothing here is special-cased by the runtime.

// Layer 1: Standard library imports
use std::collections::{HashMap, HashSet};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc}; // §3.2

// Layer 3: Internal module imports
use crate::actor::{ActorContext, Behavior};
use crate::error::Error;
use crate::hub::{InboxMessage, InboxPriority, InboxState};
use crate::message::Message;

/// The sealed request sum the mail service accepts (§4.9).
#[derive(Debug, Clone)]
pub enum MailRequest {
    /// Send a message to one recipient's inbox. `thread_id: None` starts a
    /// new thread; `Some(id)` replies into an existing one.
    Send {
        recipient_id: String,
        sender_id: u64,
        sender_name: String,
        subject: String,
        body: String,
        priority: InboxPriority,
        thread_id: Option<String>,
    },
    /// List a recipient's inbox, optionally filtered to unread messages.
    FetchInbox {
        recipient_id: String,
        unread_only: bool,
    },
    /// Fetch and mark `read` a single message, `unread → read` (§4.9).
    ReadMessage { recipient_id: String, message_id: u64 },
    /// Move a message along its state machine (§4.9).
    UpdateState {
        recipient_id: String,
        message_id: u64,
        state: InboxState,
    },
    /// Mark a message acknowledged, regardless of its current state.
    AckMessage { recipient_id: String, message_id: u64 },
    /// Read a message's current state without changing it.
    GetStatus { recipient_id: String, message_id: u64 },
    /// `{topic_id → offset}` — new messages on each topic since its offset.
    PollChanges {
        recipient_id: String,
        offsets: HashMap<String, u64>,
    },
    /// Expand `topic_id` to its current subscribers and enqueue one message
    /// per recipient.
    Publish {
        topic_id: String,
        sender_id: u64,
        sender_name: String,
        subject: String,
        body: String,
        priority: InboxPriority,
    },
    /// Add `recipient_id` to `topic_id`'s subscriber set.
    Subscribe { topic_id: String, recipient_id: String },
}

impl Message for MailRequest {
    const MESSAGE_TYPE: &'static str = "mail_request";
}

/// Responses to [`MailRequest`] (§4.9).
#[derive(Debug, Clone)]
pub enum MailResponse {
    Sent { message_id: u64, thread_id: String },
    Inbox { messages: Vec<InboxMessage> },
    Message { message: InboxMessage },
    StateUpdated,
    Acknowledged,
    Status { state: InboxState },
    Changes {
        messages: Vec<InboxMessage>,
        offsets: HashMap<String, u64>,
    },
    Published { recipient_count: usize },
    Subscribed,
}

struct Topic {
    log: Vec<InboxMessage>,
    subscribers: HashSet<String>,
}

/// State: per-recipient inboxes, plus per-topic logs and subscriber sets
/// backing [`MailRequest::Publish`]/[`MailRequest::PollChanges`].
pub struct MailService {
    next_message_id: u64,
    next_thread_seq: u64,
    inboxes: HashMap<String, Vec<InboxMessage>>,
    topics: HashMap<String, Topic>,
}

impl MailService {
    pub fn new() -> Self {
        Self {
            next_message_id: 1,
            next_thread_seq: 1,
            inboxes: HashMap::new(),
            topics: HashMap::new(),
        }
    }

    fn fresh_thread_id(&mut self) -> String {
        let id = format!("thread-{}", self.next_thread_seq);
        self.next_thread_seq += 1;
        id
    }

    fn find_message_mut(&mut self, recipient_id: &str, message_id: u64) -> Result<&mut InboxMessage, Error> {
        self.inboxes
            .get_mut(recipient_id)
            .and_then(|inbox| inbox.iter_mut().find(|m| m.id == message_id))
            .ok_or_else(|| Error::domain("message_not_found", format!("message {message_id} not found")))
    }
}

impl Default for MailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for MailService {
    type Message = MailRequest;
    type Response = MailResponse;

    async fn receive(
        &mut self,
        message: Self::Message,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<Self::Response, Error> {
        match message {
            MailRequest::Send {
                recipient_id,
                sender_id,
                sender_name,
                subject,
                body,
                priority,
                thread_id,
            } => {
                let thread_id = thread_id.unwrap_or_else(|| self.fresh_thread_id());
                let message_id = self.next_message_id;
                self.next_message_id += 1;
                let inbox_message = InboxMessage {
                    id: message_id,
                    sender_id,
                    sender_name,
                    subject,
                    body,
                    priority,
                    created_at: Utc::now(),
                    thread_id: thread_id.clone(),
                    state: InboxState::Unread,
                };
                self.inboxes.entry(recipient_id).or_default().push(inbox_message);
                Ok(MailResponse::Sent { message_id, thread_id })
            }

            MailRequest::FetchInbox {
                recipient_id,
                unread_only,
            } => {
                let messages = self
                    .inboxes
                    .get(&recipient_id)
                    .map(|inbox| {
                        inbox
                            .iter()
                            .filter(|m| !unread_only || m.state == InboxState::Unread)
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(MailResponse::Inbox { messages })
            }

            MailRequest::ReadMessage {
                recipient_id,
                message_id,
            } => {
                let found = self.find_message_mut(&recipient_id, message_id)?;
                if found.state == InboxState::Unread {
                    found.state = InboxState::Read;
                }
                Ok(MailResponse::Message { message: found.clone() })
            }

            MailRequest::UpdateState {
                recipient_id,
                message_id,
                state,
            } => {
                let found = self.find_message_mut(&recipient_id, message_id)?;
                if !found.state.can_transition_to(state) {
                    return Err(Error::domain(
                        "invalid_state_transition",
                        format!("{:?} -> {:?}", found.state, state),
                    ));
                }
                found.state = state;
                Ok(MailResponse::StateUpdated)
            }

            MailRequest::AckMessage {
                recipient_id,
                message_id,
            } => {
                let found = self.find_message_mut(&recipient_id, message_id)?;
                found.state = InboxState::Acknowledged;
                Ok(MailResponse::Acknowledged)
            }

            MailRequest::GetStatus {
                recipient_id,
                message_id,
            } => {
                let found = self.find_message_mut(&recipient_id, message_id)?;
                Ok(MailResponse::Status { state: found.state })
            }

            MailRequest::PollChanges { recipient_id: _, offsets } => {
                let mut messages = Vec::new();
                let mut updated_offsets = HashMap::with_capacity(offsets.len());
                for (topic_id, offset) in offsets {
                    let offset = offset as usize;
                    if let Some(topic) = self.topics.get(&topic_id) {
                        let new_offset = topic.log.len();
                        if offset < new_offset {
                            messages.extend(topic.log[offset..].iter().cloned());
                        }
                        updated_offsets.insert(topic_id, new_offset as u64);
                    } else {
                        updated_offsets.insert(topic_id, offset as u64);
                    }
                }
                Ok(MailResponse::Changes {
                    messages,
                    offsets: updated_offsets,
                })
            }

            MailRequest::Publish {
                topic_id,
                sender_id,
                sender_name,
                subject,
                body,
                priority,
            } => {
                let topic = self.topics.entry(topic_id.clone()).or_insert_with(|| Topic {
                    log: Vec::new(),
                    subscribers: HashSet::new(),
                });
                let subscribers: Vec<String> = topic.subscribers.iter().cloned().collect();

                let template = InboxMessage {
                    id: 0,
                    sender_id,
                    sender_name,
                    subject,
                    body,
                    priority,
                    created_at: Utc::now(),
                    thread_id: topic_id.clone(),
                    state: InboxState::Unread,
                };
                topic.log.push(template.clone());

                for recipient_id in &subscribers {
                    let mut copy = template.clone();
                    copy.id = self.next_message_id;
                    self.next_message_id += 1;
                    self.inboxes.entry(recipient_id.clone()).or_default().push(copy);
                }

                Ok(MailResponse::Published {
                    recipient_count: subscribers.len(),
                })
            }

            MailRequest::Subscribe { topic_id, recipient_id } => {
                self.topics
                    .entry(topic_id)
                    .or_insert_with(|| Topic {
                        log: Vec::new(),
                        subscribers: HashSet::new(),
                    })
                    .subscribers
                    .insert(recipient_id);
                Ok(MailResponse::Subscribed)
            }
        }
    }
}

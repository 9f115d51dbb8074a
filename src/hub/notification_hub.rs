//! [`NotificationHub`]: a pub/sub actor fanning `InboxMessage`s out to
//! per-agent subscriber sinks (§4.8).
//!
//! The hub is an ordinary [`Behavior`], not a special-cased type — every
//! operation in §4.8 is just a request/response pair serialized through the
//! actor's own mailbox, so "all operations are serialized with respect to
//! one another" falls out of the existing single-actor-sequentiality
//! guarantee (§3 invariants) for free.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::inbox::InboxMessage;
use crate::actor::{ActorContext, Behavior};
use crate::error::Error;
use crate::message::Message;
use crate::monitoring::sink::HubMonitorSink;
use crate::monitoring::{HubEvent, HubEventKind};

/// The sum of operations a caller can Ask the hub (§4.8).
#[derive(Debug, Clone)]
pub enum HubRequest {
    /// Register `subscriber_id`'s `sink` for `agent_id`'s notifications.
    Subscribe {
        agent_id: String,
        subscriber_id: String,
        sink: mpsc::Sender<InboxMessage>,
    },
    /// Remove `subscriber_id` from `agent_id`'s subscribers, if present.
    Unsubscribe {
        agent_id: String,
        subscriber_id: String,
    },
    /// Fan `message` out to every current subscriber of `agent_id`.
    Notify {
        agent_id: String,
        message: InboxMessage,
    },
    /// How many subscribers `agent_id` currently has.
    SubscriberCount { agent_id: String },
    /// How many notifications have been dropped for one subscriber's sink,
    /// since its sink filling is the only failure mode [`HubRequest::Notify`]
    /// has — this is the diagnostic counter §4.8 asks for.
    DroppedCount {
        agent_id: String,
        subscriber_id: String,
    },
}

impl Message for HubRequest {
    const MESSAGE_TYPE: &'static str = "hub_request";
}

/// Responses to [`HubRequest`] (§4.8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubResponse {
    Subscribed,
    Unsubscribed,
    /// How many subscribers actually received a [`HubRequest::Notify`]
    /// call's message; a full sink counts as undelivered, not an error.
    Notified { delivered_count: usize },
    Count(usize),
}

struct Subscriber {
    sink: mpsc::Sender<InboxMessage>,
    dropped: u64,
}

/// State: `agent_id → {subscriber_id → sink}` (§3, §4.8).
pub struct NotificationHub {
    subscribers: HashMap<String, HashMap<String, Subscriber>>,
    monitor: Arc<dyn HubMonitorSink>,
}

impl NotificationHub {
    pub fn new(monitor: Arc<dyn HubMonitorSink>) -> Self {
        Self {
            subscribers: HashMap::new(),
            monitor,
        }
    }

    async fn emit(&self, agent: &str, event_kind: HubEventKind) {
        let _ = agent;
        self.monitor
            .record_hub_event(HubEvent {
                timestamp: chrono::Utc::now(),
                event_kind,
                metadata: Default::default(),
            })
            .await;
    }
}

#[async_trait]
impl Behavior for NotificationHub {
    type Message = HubRequest;
    type Response = HubResponse;

    async fn receive(
        &mut self,
        message: Self::Message,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<Self::Response, Error> {
        match message {
            HubRequest::Subscribe {
                agent_id,
                subscriber_id,
                sink,
            } => {
                let agent_subscribers = self.subscribers.entry(agent_id.clone()).or_default();
                if agent_subscribers.contains_key(&subscriber_id) {
                    return Err(Error::AlreadySubscribed(subscriber_id));
                }
                agent_subscribers.insert(subscriber_id, Subscriber { sink, dropped: 0 });
                self.emit(&agent_id, HubEventKind::Subscribed { agent: agent_id.clone() })
                    .await;
                Ok(HubResponse::Subscribed)
            }

            HubRequest::Unsubscribe {
                agent_id,
                subscriber_id,
            } => {
                if let Some(agent_subscribers) = self.subscribers.get_mut(&agent_id) {
                    agent_subscribers.remove(&subscriber_id);
                }
                self.emit(&agent_id, HubEventKind::Unsubscribed { agent: agent_id.clone() })
                    .await;
                Ok(HubResponse::Unsubscribed)
            }

            HubRequest::Notify { agent_id, message } => {
                let mut delivered_count = 0;
                if let Some(agent_subscribers) = self.subscribers.get_mut(&agent_id) {
                    for subscriber in agent_subscribers.values_mut() {
                        match subscriber.sink.try_send(message.clone()) {
                            Ok(()) => {
                                delivered_count += 1;
                                self.emit(&agent_id, HubEventKind::Delivered { agent: agent_id.clone() })
                                    .await;
                            }
                            Err(_) => {
                                subscriber.dropped += 1;
                                self.emit(
                                    &agent_id,
                                    HubEventKind::Dropped {
                                        agent: agent_id.clone(),
                                        reason: "sink_full".to_string(),
                                    },
                                )
                                .await;
                            }
                        }
                    }
                }
                Ok(HubResponse::Notified { delivered_count })
            }

            HubRequest::SubscriberCount { agent_id } => {
                let count = self.subscribers.get(&agent_id).map(HashMap::len).unwrap_or(0);
                Ok(HubResponse::Count(count))
            }

            HubRequest::DroppedCount {
                agent_id,
                subscriber_id,
            } => {
                let dropped = self
                    .subscribers
                    .get(&agent_id)
                    .and_then(|subs| subs.get(&subscriber_id))
                    .map(|s| s.dropped)
                    .unwrap_or(0);
                Ok(HubResponse::Count(dropped as usize))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::inbox::{InboxPriority, InboxState};
    use crate::monitoring::NoopMonitor;

    fn message(id: u64) -> InboxMessage {
        InboxMessage {
            id,
            sender_id: 1,
            sender_name: "alice".to_string(),
            subject: "hi".to_string(),
            body: "body".to_string(),
            priority: InboxPriority::Normal,
            created_at: chrono::Utc::now(),
            thread_id: "t-1".to_string(),
            state: InboxState::Unread,
        }
    }

    fn hub() -> NotificationHub {
        NotificationHub::new(Arc::new(NoopMonitor::<HubEvent>::new()))
    }

    fn ctx() -> ActorContext<HubRequest> {
        ActorContext::new(crate::util::ActorAddress::anonymous(), crate::reply::CancellationToken::new())
    }

    #[tokio::test]
    async fn subscribe_then_notify_delivers() {
        let mut hub = hub();
        let mut ctx = ctx();
        let (tx, mut rx) = mpsc::channel(4);
        hub.receive(
            HubRequest::Subscribe {
                agent_id: "agent-1".to_string(),
                subscriber_id: "sub-a".to_string(),
                sink: tx,
            },
            &mut ctx,
        )
        .await
        .unwrap();

        let response = hub
            .receive(
                HubRequest::Notify {
                    agent_id: "agent-1".to_string(),
                    message: message(1),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(response, HubResponse::Notified { delivered_count: 1 });
        assert_eq!(rx.recv().await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn duplicate_subscribe_is_rejected() {
        let mut hub = hub();
        let mut ctx = ctx();
        let (tx, _rx) = mpsc::channel(4);
        hub.receive(
            HubRequest::Subscribe {
                agent_id: "agent-1".to_string(),
                subscriber_id: "sub-a".to_string(),
                sink: tx.clone(),
            },
            &mut ctx,
        )
        .await
        .unwrap();

        let err = hub
            .receive(
                HubRequest::Subscribe {
                    agent_id: "agent-1".to_string(),
                    subscriber_id: "sub-a".to_string(),
                    sink: tx,
                },
                &mut ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::AlreadySubscribed);
    }

    /// §8 scenario S6: a full sink drops the second notify and reports zero
    /// delivered when it's the only subscriber.
    #[tokio::test]
    async fn full_sink_drops_and_reports_zero_delivered() {
        let mut hub = hub();
        let mut ctx = ctx();
        let (tx, rx) = mpsc::channel(1);
        hub.receive(
            HubRequest::Subscribe {
                agent_id: "agent-1".to_string(),
                subscriber_id: "sub-a".to_string(),
                sink: tx,
            },
            &mut ctx,
        )
        .await
        .unwrap();

        let first = hub
            .receive(
                HubRequest::Notify {
                    agent_id: "agent-1".to_string(),
                    message: message(1),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(first, HubResponse::Notified { delivered_count: 1 });

        let second = hub
            .receive(
                HubRequest::Notify {
                    agent_id: "agent-1".to_string(),
                    message: message(2),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(second, HubResponse::Notified { delivered_count: 0 });

        let dropped = hub
            .receive(
                HubRequest::DroppedCount {
                    agent_id: "agent-1".to_string(),
                    subscriber_id: "sub-a".to_string(),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(dropped, HubResponse::Count(1));
        drop(rx);
    }

    #[tokio::test]
    async fn unsubscribe_is_a_noop_when_absent() {
        let mut hub = hub();
        let mut ctx = ctx();
        let response = hub
            .receive(
                HubRequest::Unsubscribe {
                    agent_id: "agent-1".to_string(),
                    subscriber_id: "nobody".to_string(),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(response, HubResponse::Unsubscribed);
    }

    #[tokio::test]
    async fn subscriber_count_reflects_current_subscribers() {
        let mut hub = hub();
        let mut ctx = ctx();
        let (tx, _rx) = mpsc::channel(4);
        hub.receive(
            HubRequest::Subscribe {
                agent_id: "agent-1".to_string(),
                subscriber_id: "sub-a".to_string(),
                sink: tx,
            },
            &mut ctx,
        )
        .await
        .unwrap();
        let count = hub
            .receive(
                HubRequest::SubscriberCount {
                    agent_id: "agent-1".to_string(),
                },
                &mut ctx,
            )
            .await
            .unwrap();
        assert_eq!(count, HubResponse::Count(1));
    }
}

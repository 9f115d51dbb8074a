//! Monitoring event types and configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorId;

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

// ============================================================================
// Actor Events
// ============================================================================

/// Events related to actor lifecycle and message processing.
#[derive(Debug, Clone, Serialize)]
pub struct ActorEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor
    pub actor_id: ActorId,

    /// Specific actor event type
    pub event_kind: ActorEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ActorEvent {
    const EVENT_TYPE: &'static str = "actor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ActorEventKind::Spawned => EventSeverity::Debug,
            ActorEventKind::Started => EventSeverity::Info,
            ActorEventKind::MessageReceived { .. } => EventSeverity::Trace,
            ActorEventKind::MessageProcessed { .. } => EventSeverity::Trace,
            ActorEventKind::ErrorOccurred { .. } => EventSeverity::Error,
            ActorEventKind::Panicked { .. } => EventSeverity::Critical,
            ActorEventKind::Stopped => EventSeverity::Info,
        }
    }
}

/// Specific types of actor events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ActorEventKind {
    /// Actor was spawned
    Spawned,

    /// Actor started execution
    Started,

    /// Actor received a message
    MessageReceived {
        /// Message type name
        message_type: String,
    },

    /// Actor finished processing a message
    MessageProcessed {
        /// Message type name
        message_type: String,
        /// Processing duration in microseconds
        duration_micros: u64,
    },

    /// `Behavior::receive` or a lifecycle hook returned an error
    ErrorOccurred {
        /// Error message
        error: String,
    },

    /// `Behavior::receive` unwound the task, caught at the runtime boundary
    Panicked {
        /// Panic payload, downcast to a string where possible
        message: String,
    },

    /// Actor stopped execution
    Stopped,
}

// ============================================================================
// Registry Events
// ============================================================================

/// Events related to the system registry: registration, lookup, shutdown.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific registry event type
    pub event_kind: RegistryEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for RegistryEvent {
    const EVENT_TYPE: &'static str = "registry";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            RegistryEventKind::Registered { .. } => EventSeverity::Info,
            RegistryEventKind::LookupMiss { .. } => EventSeverity::Debug,
            RegistryEventKind::ShutdownStarted => EventSeverity::Info,
            RegistryEventKind::ShutdownCompleted { .. } => EventSeverity::Info,
        }
    }
}

/// Specific types of registry events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RegistryEventKind {
    /// An actor was registered under a name (fresh registration or an
    /// idempotent re-registration that returned the existing reference).
    Registered {
        /// The name it was registered under
        name: String,
        /// Whether this call created the actor, as opposed to finding one
        /// already registered under the same name and type
        fresh: bool,
    },

    /// A lookup found no actor registered under the given name and type.
    LookupMiss {
        /// The name that was looked up
        name: String,
    },

    /// The system began draining every registered actor.
    ShutdownStarted,

    /// The system finished shutting down.
    ShutdownCompleted {
        /// How many actors were still registered when the deadline passed
        /// and were abandoned rather than waited on further
        abandoned: usize,
    },
}

// ============================================================================
// Hub Events
// ============================================================================

/// Events related to notification hub subscribe/unsubscribe/delivery.
#[derive(Debug, Clone, Serialize)]
pub struct HubEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific hub event type
    pub event_kind: HubEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for HubEvent {
    const EVENT_TYPE: &'static str = "hub";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            HubEventKind::Subscribed { .. } => EventSeverity::Debug,
            HubEventKind::Unsubscribed { .. } => EventSeverity::Debug,
            HubEventKind::Delivered { .. } => EventSeverity::Trace,
            HubEventKind::Dropped { .. } => EventSeverity::Warning,
        }
    }
}

/// Specific types of hub events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum HubEventKind {
    /// A subscriber registered for an agent's notifications
    Subscribed {
        /// The agent whose notifications were subscribed to
        agent: String,
    },

    /// A subscriber dropped its subscription (or was dropped by the hub)
    Unsubscribed {
        /// The agent whose notifications were unsubscribed from
        agent: String,
    },

    /// A notification was delivered to a subscriber
    Delivered {
        /// The agent the notification belonged to
        agent: String,
    },

    /// A notification could not be delivered to a subscriber
    Dropped {
        /// The agent the notification belonged to
        agent: String,
        /// Why delivery failed
        reason: String,
    },
}

// ============================================================================
// Mailbox Events
// ============================================================================

/// Events related to mailbox operations and backpressure.
#[derive(Debug, Clone, Serialize)]
pub struct MailboxEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor owning the mailbox
    pub actor_id: ActorId,

    /// Specific mailbox event type
    pub event_kind: MailboxEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for MailboxEvent {
    const EVENT_TYPE: &'static str = "mailbox";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            MailboxEventKind::Enqueued { .. } => EventSeverity::Trace,
            MailboxEventKind::Dropped { .. } => EventSeverity::Warning,
            MailboxEventKind::Closed => EventSeverity::Info,
        }
    }
}

/// Specific types of mailbox events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MailboxEventKind {
    /// Message enqueued in mailbox
    Enqueued {
        /// Current queue size
        queue_size: usize,
    },

    /// Envelope dropped past its enqueue budget
    Dropped {
        /// Reason for dropping
        reason: String,
    },

    /// The mailbox's receiver half closed
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitoring_config_default() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_history_size, 1000);
        assert_eq!(config.severity_filter, EventSeverity::Info);
        assert_eq!(config.snapshot_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_actor_event_severity() {
        let actor_id = ActorId::new();
        let event = ActorEvent {
            timestamp: Utc::now(),
            actor_id,
            event_kind: ActorEventKind::Started,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Info);
        assert_eq!(ActorEvent::EVENT_TYPE, "actor");
    }

    #[test]
    fn test_actor_panic_is_critical() {
        let event = ActorEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: ActorEventKind::Panicked {
                message: "boom".to_string(),
            },
            metadata: HashMap::new(),
        };
        assert_eq!(event.severity(), EventSeverity::Critical);
    }

    #[test]
    fn test_registry_event_severity() {
        let event = RegistryEvent {
            timestamp: Utc::now(),
            event_kind: RegistryEventKind::LookupMiss {
                name: "mail".to_string(),
            },
            metadata: HashMap::new(),
        };
        assert_eq!(event.severity(), EventSeverity::Debug);
        assert_eq!(RegistryEvent::EVENT_TYPE, "registry");
    }

    #[test]
    fn test_hub_event_severity() {
        let event = HubEvent {
            timestamp: Utc::now(),
            event_kind: HubEventKind::Dropped {
                agent: "alice".to_string(),
                reason: "mailbox_full".to_string(),
            },
            metadata: HashMap::new(),
        };
        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(HubEvent::EVENT_TYPE, "hub");
    }

    #[test]
    fn test_mailbox_event_severity() {
        let event = MailboxEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: MailboxEventKind::Dropped {
                reason: "enqueue_timeout".to_string(),
            },
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(MailboxEvent::EVENT_TYPE, "mailbox");
    }

    #[test]
    fn test_monitoring_snapshot_creation() {
        let snapshot = MonitoringSnapshot::<ActorEvent> {
            timestamp: Utc::now(),
            total_events: 100,
            trace_count: 10,
            debug_count: 20,
            info_count: 30,
            warning_count: 25,
            error_count: 10,
            critical_count: 5,
            recent_events: vec![],
        };

        assert_eq!(snapshot.total_events, 100);
        assert_eq!(snapshot.trace_count, 10);
        assert_eq!(snapshot.critical_count, 5);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_event_metadata() {
        let mut metadata = HashMap::new();
        metadata.insert("custom_key".to_string(), "custom_value".to_string());

        let event = RegistryEvent {
            timestamp: Utc::now(),
            event_kind: RegistryEventKind::ShutdownStarted,
            metadata,
        };

        assert_eq!(
            event.metadata.get("custom_key").expect("Key should exist"),
            "custom_value"
        );
    }
}

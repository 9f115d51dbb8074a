//! Crate-wide error type and the kind taxonomy it carries.
//!
//! Every fallible operation in this crate returns `Result<T, Error>`. `Error`
//! is a flat `thiserror` enum rather than a hierarchy of per-module error
//! types: callers and tests need to pattern-match on *kind* (§7), not on
//! which module produced the failure.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Discriminant for [`Error`], used for equality comparisons that should
/// ignore the human-readable message.
///
/// # Example
///
/// ```rust
/// use conclave_rt::error::{Error, ErrorKind};
///
/// let err = Error::actor_stopped("worker-1");
/// assert_eq!(err.kind(), ErrorKind::ActorStopped);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Target mailbox closed or actor exited before reply.
    ActorStopped,
    /// Bounded mailbox rejected an envelope after its enqueue budget elapsed.
    MailboxFull,
    /// Caller context cancelled or deadline exceeded.
    Cancelled,
    /// Behavior received a message outside its sum type.
    UnknownMessage,
    /// Typed-narrowing combinator observed a variant other than requested.
    UnexpectedResponse,
    /// Combinator called with an empty ref slice.
    NoTargets,
    /// Registry lookup miss.
    NotFound,
    /// Notification hub saw a duplicate subscriber id.
    AlreadySubscribed,
    /// Runtime captured a fault (panic) inside `Behavior::receive`.
    BehaviorPanic,
    /// Opaque domain error surfaced by a hosted service.
    Domain,
}

/// The crate's single error type.
///
/// `Domain` carries its own kind name (e.g. `"task_list_not_found"`) so
/// hosted services can mint errors without growing this enum.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// See [`ErrorKind::ActorStopped`].
    #[error("actor '{0}' has stopped")]
    ActorStopped(String),

    /// See [`ErrorKind::MailboxFull`].
    #[error("mailbox '{0}' is full")]
    MailboxFull(String),

    /// See [`ErrorKind::Cancelled`].
    #[error("operation cancelled")]
    Cancelled,

    /// See [`ErrorKind::UnknownMessage`].
    #[error("unknown message: {0}")]
    UnknownMessage(String),

    /// See [`ErrorKind::UnexpectedResponse`]. Carries the observed and
    /// expected response variant tags.
    #[error("unexpected response: got '{observed}', expected '{expected}'")]
    UnexpectedResponse {
        /// Response tag actually observed.
        observed: String,
        /// Response tag the caller narrowed for.
        expected: String,
    },

    /// See [`ErrorKind::NoTargets`].
    #[error("combinator invoked with no targets")]
    NoTargets,

    /// See [`ErrorKind::NotFound`].
    #[error("not found: {0}")]
    NotFound(String),

    /// See [`ErrorKind::AlreadySubscribed`].
    #[error("subscriber '{0}' is already subscribed")]
    AlreadySubscribed(String),

    /// See [`ErrorKind::BehaviorPanic`].
    #[error("behavior panicked: {0}")]
    BehaviorPanic(String),

    /// See [`ErrorKind::Domain`]. `kind` is a service-chosen tag (e.g.
    /// `"task_list_not_found"`), `message` is the human-readable detail.
    #[error("{kind}: {message}")]
    Domain {
        /// Service-chosen error tag.
        kind: String,
        /// Human-readable detail.
        message: String,
    },
}

impl Error {
    /// Construct an [`ErrorKind::ActorStopped`] error naming the actor.
    pub fn actor_stopped(actor: impl Into<String>) -> Self {
        Self::ActorStopped(actor.into())
    }

    /// Construct an [`ErrorKind::MailboxFull`] error naming the mailbox.
    pub fn mailbox_full(actor: impl Into<String>) -> Self {
        Self::MailboxFull(actor.into())
    }

    /// Construct an [`ErrorKind::NotFound`] error describing what was
    /// looked up.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Construct an opaque [`ErrorKind::Domain`] error.
    pub fn domain(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// The error's kind discriminant, ignoring message content. Spec
    /// equality ("equality is by kind") is expressed as
    /// `a.kind() == b.kind()`, not `#[derive(PartialEq)]` on `Error`
    /// itself, since `Domain` messages legitimately differ while sharing
    /// a kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ActorStopped(_) => ErrorKind::ActorStopped,
            Self::MailboxFull(_) => ErrorKind::MailboxFull,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::UnknownMessage(_) => ErrorKind::UnknownMessage,
            Self::UnexpectedResponse { .. } => ErrorKind::UnexpectedResponse,
            Self::NoTargets => ErrorKind::NoTargets,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadySubscribed(_) => ErrorKind::AlreadySubscribed,
            Self::BehaviorPanic(_) => ErrorKind::BehaviorPanic,
            Self::Domain { .. } => ErrorKind::Domain,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ActorStopped => "actor_stopped",
            Self::MailboxFull => "mailbox_full",
            Self::Cancelled => "cancelled",
            Self::UnknownMessage => "unknown_message",
            Self::UnexpectedResponse => "unexpected_response",
            Self::NoTargets => "no_targets",
            Self::NotFound => "not_found",
            Self::AlreadySubscribed => "already_subscribed",
            Self::BehaviorPanic => "behavior_panic",
            Self::Domain => "domain",
        };
        f.write_str(name)
    }
}

/// Convenience alias used throughout the crate.
pub type ActorResult<T> = Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_constructor() {
        assert_eq!(Error::actor_stopped("x").kind(), ErrorKind::ActorStopped);
        assert_eq!(Error::mailbox_full("x").kind(), ErrorKind::MailboxFull);
        assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(Error::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(Error::NoTargets.kind(), ErrorKind::NoTargets);
    }

    #[test]
    fn domain_errors_share_kind_despite_differing_message() {
        let a = Error::domain("task_list_not_found", "list L missing");
        let b = Error::domain("task_list_not_found", "list M missing");
        assert_eq!(a.kind(), b.kind());
    }

    #[test]
    fn unexpected_response_carries_observed_and_expected() {
        let err = Error::UnexpectedResponse {
            observed: "Ack".to_string(),
            expected: "Inbox".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Ack"));
        assert!(msg.contains("Inbox"));
    }

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(ErrorKind::ActorStopped.to_string(), "actor_stopped");
        assert_eq!(ErrorKind::BehaviorPanic.to_string(), "behavior_panic");
    }
}

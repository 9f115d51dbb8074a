//! Domain services hosted on the runtime as ordinary actors (§4.9).
//!
//! Neither service is normative in its internal detail — they exemplify
//! the sum-type-over-`Behavior` style and must preserve the request/
//! response semantics §4.9 and §8 describe, nothing more.
//!
//! # Components
//!
//! - [`mail`] — a mailbox-and-topic service over a sealed `MailRequest` sum
//! - [`tasks`] — a task-list/task tracker over a sealed `TaskRequest` sum

pub mod mail;
pub mod tasks;

pub use mail::{MailRequest, MailResponse, MailService};
pub use tasks::{TaskListMeta, TaskRecord, TaskRequest, TaskResponse, TaskService, TaskStats, TaskStatus};

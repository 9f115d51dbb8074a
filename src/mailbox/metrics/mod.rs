//! Mailbox metrics recording and tracking subsystem.
//!
//! Provides trait-based metrics recording for mailbox operations with
//! pluggable implementations.
//!
//! # Design
//!
//! - `MetricsRecorder` trait: Interface for recording metrics
//! - `AtomicMetrics`: Default lock-free implementation using atomics
//! - Future: `AsyncMetrics`, `NoOpMetrics`, `PrometheusMetrics`
//!
//! # Architecture
//!
//! The metrics system uses generic constraints (`R: MetricsRecorder`) instead of
//! trait objects (`dyn MetricsRecorder`) for zero-cost abstractions (§6.2).
//!
//! Mailbox implementations are generic over the metrics recorder:
//! - `BoundedMailbox<M: Message, R: MetricsRecorder>`
//! - `UnboundedMailbox<M: Message, R: MetricsRecorder>`
//!
//! This allows compile-time selection of metrics implementation without
//! runtime dispatch overhead.
//!
//! # Example
//!
//! ```rust
//! use conclave_rt::mailbox::BoundedMailbox;
//!
//! # #[derive(Debug, Clone)]
//! # struct MyMessage;
//! # impl conclave_rt::message::Message for MyMessage {
//! #     const MESSAGE_TYPE: &'static str = "my_message";
//! # }
//! # async fn example() {
//! // Every mailbox carries its own AtomicMetrics.
//! let (mailbox, _sender) = BoundedMailbox::<MyMessage, ()>::new("worker-1", 100);
//! assert_eq!(mailbox.metrics.sent_count(), 0);
//! # }
//! ```
//!
//! # Future Implementations
//!
//! ## AsyncMetrics (Fire-and-Forget)
//!
//! ```ignore
//! pub struct AsyncMetrics {
//!     tx: mpsc::UnboundedSender<MetricEvent>,
//! }
//!
//! impl MetricsRecorder for AsyncMetrics {
//!     fn record_sent(&self) {
//!         let _ = self.tx.send(MetricEvent::Sent);
//!     }
//!     // Background task aggregates events
//! }
//! ```
//!
//! ## NoOpMetrics (Zero Overhead)
//!
//! ```ignore
//! pub struct NoOpMetrics;
//!
//! impl MetricsRecorder for NoOpMetrics {
//!     fn record_sent(&self) {}  // No-op
//!     fn sent_count(&self) -> u64 { 0 }
//!     // All operations are no-ops
//! }
//! ```
//!
//! ## PrometheusMetrics (Remote Export)
//!
//! ```ignore
//! pub struct PrometheusMetrics {
//!     counter_sent: prometheus::Counter,
//!     counter_received: prometheus::Counter,
//!     gauge_in_flight: prometheus::Gauge,
//! }
//!
//! impl MetricsRecorder for PrometheusMetrics {
//!     fn record_sent(&self) {
//!         self.counter_sent.inc();
//!         self.gauge_in_flight.inc();
//!     }
//!     // Export to Prometheus registry
//! }
//! ```

mod atomic;
mod recorder;

pub use atomic::AtomicMetrics;
pub use recorder::MetricsRecorder;

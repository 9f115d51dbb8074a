//! Atomic-based metrics implementation.
//!
//! Provides a lock-free, high-performance metrics recorder using atomic operations.
//! This is the default implementation for mailbox metrics.
//!
//! # Performance
//!
//! - Counter operations: ~10-30ns (lock-free atomic fetch_add)
//! - Timestamp updates: ~50-100ns (RwLock write)
//! - No allocations, no blocking (except timestamp write lock)
//!
//! # Example
//!
//! ```rust
//! use conclave_rt::mailbox::metrics::{MetricsRecorder, AtomicMetrics};
//! use chrono::Utc;
//!
//! let metrics = AtomicMetrics::default();
//! 
//! // Fast, lock-free operations
//! metrics.record_sent();
//! metrics.record_received();
//! 
//! assert_eq!(metrics.sent_count(), 1);
//! assert_eq!(metrics.received_count(), 1);
//! ```

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use parking_lot::RwLock;

// Layer 3: Internal module imports
use super::MetricsRecorder;

/// Lock-free atomic metrics recorder.
///
/// Uses atomic operations for counters (10-30ns overhead) and RwLock for timestamp.
/// This is the default metrics implementation, optimized for low overhead.
///
/// # Performance Characteristics
///
/// - **Counter operations**: ~10-30ns per operation
///   - `record_sent()`, `record_received()`, `record_dropped()` are lock-free
///   - Uses `Ordering::Relaxed` for maximum performance
///   - No contention between threads
///
/// - **Timestamp updates**: ~50-100ns per operation
///   - `update_last_message()` uses RwLock write lock
///   - Minimal contention (infrequent writes)
///
/// - **Query operations**: ~5-10ns per operation
///   - `sent_count()`, `received_count()`, etc. are lock-free reads
///   - No allocations, pure atomic loads
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - Atomic counters use lock-free atomic operations
/// - Timestamp uses parking_lot RwLock (optimized, low overhead)
/// - Safe to share across multiple mailbox senders
///
/// # Example
///
/// ```rust
/// use conclave_rt::mailbox::metrics::{MetricsRecorder, AtomicMetrics};
/// use chrono::Utc;
/// use std::sync::Arc;
/// use std::thread;
///
/// let metrics = Arc::new(AtomicMetrics::default());
/// 
/// // Can be safely shared across threads
/// let m1 = Arc::clone(&metrics);
/// let h1 = thread::spawn(move || {
///     for _ in 0..1000 {
///         m1.record_sent();
///     }
/// });
///
/// let m2 = Arc::clone(&metrics);
/// let h2 = thread::spawn(move || {
///     for _ in 0..1000 {
///         m2.record_sent();
///     }
/// });
///
/// h1.join().unwrap();
/// h2.join().unwrap();
///
/// assert_eq!(metrics.sent_count(), 2000);
/// ```
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    messages_dropped: AtomicU64,
    last_message_at: RwLock<Option<DateTime<Utc>>>,
}

// Manual Clone implementation: creates a new instance with current values copied
impl Clone for AtomicMetrics {
    fn clone(&self) -> Self {
        Self {
            messages_sent: AtomicU64::new(self.messages_sent.load(Ordering::Relaxed)),
            messages_received: AtomicU64::new(self.messages_received.load(Ordering::Relaxed)),
            messages_dropped: AtomicU64::new(self.messages_dropped.load(Ordering::Relaxed)),
            last_message_at: RwLock::new(*self.last_message_at.read()),
        }
    }
}

impl AtomicMetrics {
    /// Create a new AtomicMetrics instance with zero counters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use conclave_rt::mailbox::metrics::{AtomicMetrics, MetricsRecorder};
    ///
    /// let metrics = AtomicMetrics::new();
    /// assert_eq!(metrics.sent_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsRecorder for AtomicMetrics {
    fn record_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    fn record_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }

    fn update_last_message(&self, timestamp: DateTime<Utc>) {
        *self.last_message_at.write() = Some(timestamp);
    }

    fn sent_count(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    fn received_count(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    fn dropped_count(&self) -> u64 {
        self.messages_dropped.load(Ordering::Relaxed)
    }

    fn last_message_at(&self) -> Option<DateTime<Utc>> {
        *self.last_message_at.read()
    }
}

//! Error types for the pairkit library.
//!
//! ## Key Components
//!
//! - [`QueueError`]: A caller broke an operation's contract (double insert,
//!   capacity overflow, out-of-range frequency, query on an absent pair or an
//!   empty/unconfigured queue). These signal a bug in the driver, never a data
//!   condition, and the queue is left unchanged.
//! - [`ConfigError`]: Returned when queue configuration parameters are invalid
//!   (e.g. zero capacity, frequency threshold out of range).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use pairkit::error::{ConfigError, QueueError};
//! use pairkit::pair::{Pair, Triple};
//! use pairkit::queue::HfQueue;
//!
//! // Fallible constructor for user-configurable parameters
//! let bad: Result<HfQueue<u8>, ConfigError> = HfQueue::try_new(16, 1);
//! assert!(bad.is_err());
//!
//! let mut queue: HfQueue<u8> = HfQueue::new(16, 3);
//! let ab = Pair::new(b'a', b'b');
//! queue.insert(ab, Triple::new(0, 0, 5)).unwrap();
//!
//! // Double insertion is a contract violation, distinct from "absent"
//! assert_eq!(queue.insert(ab, Triple::new(0, 0, 5)), Err(QueueError::Duplicate));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// QueueError
// ---------------------------------------------------------------------------

/// Contract violation reported by a pair queue.
///
/// Every variant means the caller issued a call whose precondition did not
/// hold. The queue performs no mutation before returning one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue was default-constructed and never configured.
    #[error("queue used before construction with a capacity")]
    Uninitialized,
    /// The pair is not tracked by this queue.
    #[error("pair is not present in the queue")]
    Absent,
    /// The pair is already tracked by this queue.
    #[error("pair is already present in the queue")]
    Duplicate,
    /// Inserting would exceed the configured capacity.
    #[error("queue is full (max_size = {max_size})")]
    CapacityExceeded { max_size: usize },
    /// The frequency lies outside the tier's `[min, max]` range.
    #[error("frequency {freq} outside tier range [{min}, {max}]")]
    FrequencyOutOfRange { freq: usize, min: usize, max: usize },
    /// An extremal query was issued on an empty queue.
    #[error("queue is empty")]
    Empty,
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when queue configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`HfQueue::try_new`](crate::queue::HfQueue::try_new) and builder
/// `try_build_*()` methods. Carries a human-readable description of which
/// parameter failed validation.
///
/// # Example
///
/// ```
/// use pairkit::queue::LfQueue;
///
/// let err = LfQueue::<u32>::try_new(0, 8).unwrap_err();
/// assert!(err.to_string().contains("max_size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced by debug-only `check_invariants` methods on queue types
/// (e.g. [`LfQueue::check_invariants`](crate::queue::LfQueue::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- QueueError -------------------------------------------------------

    #[test]
    fn queue_error_display() {
        assert_eq!(
            QueueError::CapacityExceeded { max_size: 4 }.to_string(),
            "queue is full (max_size = 4)"
        );
        assert_eq!(
            QueueError::FrequencyOutOfRange {
                freq: 9,
                min: 1,
                max: 8
            }
            .to_string(),
            "frequency 9 outside tier range [1, 8]"
        );
        assert_eq!(QueueError::Absent.to_string(), "pair is not present in the queue");
    }

    #[test]
    fn queue_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<QueueError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("max_size must be > 0");
        assert_eq!(err.to_string(), "max_size must be > 0");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index length mismatch");
        assert_eq!(err.to_string(), "index length mismatch");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("bad link");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad link"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}

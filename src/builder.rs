//! Builders for single queues and for a two-tier pair.
//!
//! [`QueueBuilder`] collects the parameters of one tier and validates them at
//! build time. [`TierConfig`] describes both tiers at once and guarantees the
//! boundary `high.min_freq == low.max_freq + 1`, so the two frequency ranges
//! partition the positive integers without gap or overlap.
//!
//! ## Example
//!
//! ```rust
//! use pairkit::builder::{QueueBuilder, TierConfig};
//! use pairkit::pair::{Pair, Triple};
//!
//! let mut high = QueueBuilder::new(100).min_freq(9).build_high::<u32>();
//! high.insert(Pair::new(1, 2), Triple::new(0, 0, 12)).unwrap();
//!
//! let low = QueueBuilder::new(1_000).max_freq(8).build_low::<u32>();
//! assert_eq!(low.max_freq(), 8);
//!
//! let tiers = TierConfig::new(100, 8).with_low_capacity(1_000).build::<u32>().unwrap();
//! assert_eq!(tiers.high().min_freq(), 9);
//! ```

use crate::error::ConfigError;
use crate::pair::Symbol;
use crate::queue::{HfQueue, LfQueue};
use crate::tier::TieredQueues;

/// Builder for a single queue tier.
#[derive(Debug, Clone, Copy)]
pub struct QueueBuilder {
    max_size: usize,
    min_freq: Option<usize>,
    max_freq: Option<usize>,
}

impl QueueBuilder {
    /// Starts a builder for a queue of at most `max_size` pairs.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            min_freq: None,
            max_freq: None,
        }
    }

    /// Frequency floor of a high-frequency queue.
    pub fn min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = Some(min_freq);
        self
    }

    /// Frequency ceiling of a low-frequency queue.
    pub fn max_freq(mut self, max_freq: usize) -> Self {
        self.max_freq = Some(max_freq);
        self
    }

    /// Builds a high-frequency queue.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `min_freq` was never set or the parameters
    /// are rejected by [`HfQueue::try_new`].
    pub fn try_build_high<S: Symbol>(self) -> Result<HfQueue<S>, ConfigError> {
        let min_freq = self.min_freq.ok_or_else(|| {
            ConfigError::new("min_freq must be set to build a high-frequency queue")
        })?;
        HfQueue::try_new(self.max_size, min_freq)
    }

    /// Builds a low-frequency queue.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_freq` was never set or the parameters
    /// are rejected by [`LfQueue::try_new`].
    pub fn try_build_low<S: Symbol>(self) -> Result<LfQueue<S>, ConfigError> {
        let max_freq = self.max_freq.ok_or_else(|| {
            ConfigError::new("max_freq must be set to build a low-frequency queue")
        })?;
        LfQueue::try_new(self.max_size, max_freq)
    }

    /// Panicking variant of [`try_build_high`](Self::try_build_high).
    pub fn build_high<S: Symbol>(self) -> HfQueue<S> {
        match self.try_build_high() {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    /// Panicking variant of [`try_build_low`](Self::try_build_low).
    pub fn build_low<S: Symbol>(self) -> LfQueue<S> {
        match self.try_build_low() {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Configuration of a high/low tier pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierConfig {
    /// Capacity of the high-frequency tier.
    pub high_capacity: usize,
    /// Capacity of the low-frequency tier.
    pub low_capacity: usize,
    /// Largest frequency kept in the low tier; the high tier starts one above.
    pub max_low_freq: usize,
}

impl TierConfig {
    /// Both tiers get `capacity`; frequencies `<= max_low_freq` go low.
    pub fn new(capacity: usize, max_low_freq: usize) -> Self {
        Self {
            high_capacity: capacity,
            low_capacity: capacity,
            max_low_freq,
        }
    }

    pub fn with_high_capacity(mut self, capacity: usize) -> Self {
        self.high_capacity = capacity;
        self
    }

    pub fn with_low_capacity(mut self, capacity: usize) -> Self {
        self.low_capacity = capacity;
        self
    }

    /// Frequency floor of the high tier.
    #[inline]
    pub fn high_min_freq(&self) -> usize {
        self.max_low_freq.saturating_add(1)
    }

    /// Checks every parameter without allocating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_capacity == 0 {
            return Err(ConfigError::new("high_capacity must be greater than zero"));
        }
        if self.low_capacity == 0 {
            return Err(ConfigError::new("low_capacity must be greater than zero"));
        }
        if self.max_low_freq == 0 {
            return Err(ConfigError::new("max_low_freq must be greater than zero"));
        }
        if self.max_low_freq == usize::MAX {
            return Err(ConfigError::new(
                "max_low_freq leaves no room for a high-frequency tier",
            ));
        }
        Ok(())
    }

    /// Builds both tiers.
    pub fn build<S: Symbol>(self) -> Result<TieredQueues<S>, ConfigError> {
        TieredQueues::try_new(self)
    }
}

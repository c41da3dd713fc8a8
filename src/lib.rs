//! pairkit: pair-frequency queues for greedy grammar compression.
//!
//! Two tiers keep every operation O(1) or amortized O(1):
//!
//! - [`queue::HfQueue`] for the few pairs with frequency `>= min_freq`;
//! - [`queue::LfQueue`] for the many pairs with frequency in `[1, max_freq]`.
//!
//! [`tier::TieredQueues`] routes pairs between them. See `DESIGN.md` for the
//! internal layout and invariants.

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod pair;
pub mod prelude;
pub mod queue;
pub mod tier;
pub mod traits;

pub use crate::ds::{IntrusiveList, Relocation, SlotArena, SlotId};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::QueueMetricsSnapshot;
pub use crate::pair::{Decrease, Pair, Triple};
pub use crate::queue::{HfQueue, LfQueue};
pub use crate::tier::{Tier, TierDecrease, TieredQueues};

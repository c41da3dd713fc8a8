pub use crate::builder::{QueueBuilder, TierConfig};
pub use crate::error::{ConfigError, QueueError};
pub use crate::pair::{Decrease, Pair, Symbol, Triple};
pub use crate::queue::{HfQueue, LfQueue};
pub use crate::tier::{Tier, TierDecrease, TieredQueues};
pub use crate::traits::PairQueue;

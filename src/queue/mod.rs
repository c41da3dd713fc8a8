//! The two pair-frequency tiers.
//!
//! - [`HfQueue`]: frequencies `>= min_freq`, frequency-ordered compacting list.
//! - [`LfQueue`]: frequencies in `[1, max_freq]`, bucket array with a skip list.
//!
//! Both implement [`PairQueue`](crate::traits::PairQueue). Pairs migrate
//! between them only through the caller (or [`TieredQueues`](crate::tier::TieredQueues)).

pub mod hf_queue;
pub mod lf_queue;

pub use hf_queue::HfQueue;
pub use lf_queue::LfQueue;

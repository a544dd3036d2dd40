//! Allocation of lumber cuts to stock boards.
//!
//! [`Planner`] validates a [`CutListInput`] and runs two strategies over it:
//! [`GlobalStrategy`] uses the fewest boards, [`GroupedStrategy`] keeps each
//! named part on as few boards as it can. Both are built on [`pack`].

pub mod bins;
pub mod packing;
pub mod planner;
pub mod strategy;
pub mod types;

pub use bins::Bin;
pub use packing::pack;
pub use planner::Planner;
pub use strategy::{merge_bins, GlobalStrategy, GroupedStrategy, Strategy};
pub use types::*;

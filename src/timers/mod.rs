//! Hierarchical wall-clock timers for the phases of a factorization.

mod timers;
pub use timers::*;

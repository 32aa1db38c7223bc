//! Nested wall-clock timers for the solver phases.

mod timers;
pub use timers::*;

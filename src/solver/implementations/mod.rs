//! Solver implementations for particular problem formats.
//!
//! Only the [`default`] implementation, for dense convex quadratic
//! programs, is currently provided.

pub mod default;

//! ipqp algebra module.
//!
//! __This module is primarily intended for internal use by the solver.__
//!
//! All internal vector math in the solver is routed through the
//! [`VectorMath`] and [`ScalarMath`] traits, which are implemented
//! generically over floats of type [`FloatT`].  Matrix data is held in
//! the dense, column-major [`Matrix`] type, with the factorizations
//! required by the solver ([`QRDecomposition`] and [`LDLFactorization`])
//! implemented natively on it.

#![allow(non_snake_case)]

mod dense;
mod error_types;
mod floats;
mod math_traits;
mod matrix_types;
mod scalarmath;
mod vecmath;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_types::*;

#[cfg(test)]
mod tests;

// dense matrix type, products and the factorizations used by the solver

mod core;
mod ldl;
mod matrix_math;
mod qr;

pub use ldl::*;
pub use qr::*;

// package together all of the following and re-export
// in a partially flattened structure :
// : core component traits
// : kkt solver engines
// : iteration callbacks
// : user settings and error types
// : main solver implementation

pub mod callbacks;
pub mod kktsolvers;
pub mod traits;

//partially flatten top level pieces

mod settings;
mod solver;
pub use settings::*;
pub use solver::*;

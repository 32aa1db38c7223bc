//flatten direct KKT module structure
mod directldlkktsolver;
mod kkt_assembly;
pub use directldlkktsolver::*;
use kkt_assembly::*;

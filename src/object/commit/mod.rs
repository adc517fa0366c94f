pub mod ancestry;
#[allow(clippy::module_inception)]
mod commit;

pub use ancestry::{walk_ancestry, write_graphviz};
pub use commit::*;

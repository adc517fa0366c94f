pub mod checkout;
#[allow(clippy::module_inception)]
mod tree;

pub use checkout::{checkout, checkout_commit};
pub use tree::{Tree, TreeLeaf};

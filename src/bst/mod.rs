//! Binary search tree with an optional self-balancing mode. When balancing is enabled, the
//! heights of the two child subtrees of any node differ by at most one.

mod node;
mod set;
mod tree;

pub use self::set::BstSet;
pub use self::tree::{BalanceMode, Violation};

//! Node substrate shared by the balanced trees: parent-linked nodes stored in an arena, binary
//! search, relinking, rotations and in-order traversal.

mod iter;
mod node;
mod tree;

pub use self::iter::Iter;
pub use self::node::{BinaryNode, Links};
pub use self::tree::{check_key, compare, Removed, SearchResult, Tree};

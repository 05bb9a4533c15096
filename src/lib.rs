//! Ordered maps backed by self-balancing binary search trees.
//!
//! Two maps are provided, [`AvlMap`](avl_tree/struct.AvlMap.html) and
//! [`RedBlackMap`](red_black_tree/struct.RedBlackMap.html). Both store their nodes in a
//! [`TypedArena`](arena/struct.TypedArena.html) and link them together with plain handles: every
//! node owns its two children and keeps a non-owning handle to its parent. The balancing
//! algorithms walk upward through those parent handles after every insertion and removal.
//!
//! Keys only need to implement `PartialOrd`. A key that does not compare equal to itself, such as
//! `f64::NAN`, has no position in the order and is rejected with [`Error::InvalidKey`].
//!
//! # Examples
//! ```
//! use balanced_maps::avl_tree::AvlMap;
//! use balanced_maps::red_black_tree::RedBlackMap;
//!
//! let mut avl = AvlMap::new();
//! let mut red_black = RedBlackMap::new();
//! for key in 0..100 {
//!     avl.insert(key, key * 2)?;
//!     red_black.insert(key, key * 2)?;
//! }
//!
//! assert_eq!(avl.get(&21)?, Some(&42));
//! assert_eq!(red_black.remove(&21)?, Some(42));
//! assert!(avl.is_balanced());
//! assert!(red_black.is_red_black_tree());
//! # Ok::<(), balanced_maps::Error>(())
//! ```

pub mod arena;
pub mod avl_tree;
mod binary_tree;
mod entry;
mod error;
pub mod red_black_tree;
mod serialization;

pub use crate::error::{Error, Result};

/// Number of nodes allocated at a time by the arena of a map built with `new`.
pub const ARENA_CHUNK_SIZE: usize = 256;

use crate::arena::{Handle, TypedArena};
use crate::binary_tree::iter::Iter;
use crate::binary_tree::node::{BinaryNode, Links};
use crate::error::{Error, Result};
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::ops::{Index, IndexMut};

/// Compares two keys, failing if they have no ordering.
pub fn compare<Q>(a: &Q, b: &Q) -> Result<Ordering>
where
    Q: PartialOrd + ?Sized,
{
    a.partial_cmp(b).ok_or(Error::InvalidKey)
}

/// Fails unless `key` compares equal to itself. Rejects keys such as `f64::NAN` before they can
/// reach the tree.
pub fn check_key<Q>(key: &Q) -> Result<()>
where
    Q: PartialOrd + ?Sized,
{
    match compare(key, key)? {
        Ordering::Equal => Ok(()),
        _ => Err(Error::InvalidKey),
    }
}

/// Outcome of searching for the position of a key.
pub enum SearchResult {
    /// The key is stored at this node.
    Found(Handle),
    /// The key is absent; it belongs in the empty child slot of this node on the given side.
    Vacant(Handle, Ordering),
}

/// What `Tree::remove_node` took out of the tree.
pub struct Removed<N> {
    /// The spliced node with its links reset. Its entry is the one that was removed.
    pub node: N,
    /// The child that took the spliced node's place.
    pub replacement: Option<Handle>,
    /// The former parent of the spliced node, i.e. the lowest node whose subtree changed shape.
    pub parent: Option<Handle>,
}

/// Arena-backed binary search tree with parent links. Holds no balancing policy of its own; the
/// AVL and red-black maps drive it and restore their invariants after each structural change.
pub struct Tree<N> {
    arena: TypedArena<N>,
    pub root: Option<Handle>,
    pub len: usize,
}

impl<N> Tree<N>
where
    N: BinaryNode,
{
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    #[cfg(test)]
    pub fn node(&self, handle: Handle) -> Option<&N> {
        self.arena.get(&handle)
    }

    /// Replaces the left child of `parent`. A present child has its parent link pointed at
    /// `parent`.
    pub fn set_left(&mut self, parent: Handle, child: Option<Handle>) {
        self[parent].links_mut().left = child;
        if let Some(child) = child {
            self[child].links_mut().parent = Some(parent);
        }
    }

    /// Replaces the right child of `parent`. A present child has its parent link pointed at
    /// `parent`.
    pub fn set_right(&mut self, parent: Handle, child: Option<Handle>) {
        self[parent].links_mut().right = child;
        if let Some(child) = child {
            self[child].links_mut().parent = Some(parent);
        }
    }

    /// Puts `new` in the slot that `old` occupies under `parent`, or at the root if `parent` is
    /// `None`.
    pub fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => {
                self.root = new;
                if let Some(new) = new {
                    self[new].links_mut().parent = None;
                }
            }
            Some(parent) => {
                if self[parent].left() == Some(old) {
                    self.set_left(parent, new);
                } else {
                    self.set_right(parent, new);
                }
            }
        }
    }

    /// Returns the child to descend into for a comparison result, or `handle` itself on
    /// `Ordering::Equal`.
    pub fn direction(&self, handle: Handle, ordering: Ordering) -> Option<Handle> {
        match ordering {
            Ordering::Less => self[handle].left(),
            Ordering::Greater => self[handle].right(),
            Ordering::Equal => Some(handle),
        }
    }

    /// Rotates the subtree at `handle` to the left and returns its new top.
    pub fn rotate_left(&mut self, handle: Handle) -> Handle {
        let child = self[handle]
            .right()
            .expect("Expected right child node to be `Some`.");
        trace!("rotating left at {:?}", handle);
        let parent = self[handle].parent();
        self.replace_child(parent, handle, Some(child));
        let inner = self[child].left();
        self.set_right(handle, inner);
        self.set_left(child, Some(handle));
        child
    }

    /// Rotates the subtree at `handle` to the right and returns its new top.
    pub fn rotate_right(&mut self, handle: Handle) -> Handle {
        let child = self[handle]
            .left()
            .expect("Expected left child node to be `Some`.");
        trace!("rotating right at {:?}", handle);
        let parent = self[handle].parent();
        self.replace_child(parent, handle, Some(child));
        let inner = self[child].right();
        self.set_left(handle, inner);
        self.set_right(child, Some(handle));
        child
    }

    /// Returns the leftmost node of the subtree at `handle`.
    pub fn min(&self, handle: Handle) -> Handle {
        let mut curr = handle;
        while let Some(left) = self[curr].left() {
            curr = left;
        }
        curr
    }

    /// Returns the rightmost node of the subtree at `handle`.
    pub fn max(&self, handle: Handle) -> Handle {
        let mut curr = handle;
        while let Some(right) = self[curr].right() {
            curr = right;
        }
        curr
    }

    pub fn insert_root(&mut self, node: N) -> Handle {
        let handle = self.arena.allocate(node);
        self.root = Some(handle);
        self.len += 1;
        handle
    }

    /// Links `node` as a new leaf in the vacant slot described by a `SearchResult::Vacant`.
    pub fn attach(&mut self, parent: Handle, ordering: Ordering, node: N) -> Handle {
        let handle = self.arena.allocate(node);
        match ordering {
            Ordering::Less => self.set_left(parent, Some(handle)),
            Ordering::Greater => self.set_right(parent, Some(handle)),
            Ordering::Equal => unreachable!("Expected a vacant child slot."),
        }
        self.len += 1;
        handle
    }

    /// Removes the entry stored at `handle` from the tree.
    ///
    /// A node with at most one child is spliced out directly. Otherwise the in-order successor's
    /// entry is moved into `handle` and the successor, which has no left child, is spliced out
    /// instead. Either way the spliced node is freed from the arena and returned holding the
    /// removed entry.
    pub fn remove_node(&mut self, handle: Handle) -> Removed<N> {
        let target = match (self[handle].left(), self[handle].right()) {
            (Some(_), Some(right)) => self.min(right),
            _ => handle,
        };

        let replacement = self[target].left().or_else(|| self[target].right());
        let parent = self[target].parent();
        self.replace_child(parent, target, replacement);
        self.len -= 1;

        let mut node = self.arena.free(&target);
        if target != handle {
            mem::swap(self[handle].entry_mut(), node.entry_mut());
        }
        *node.links_mut() = Links::default();

        Removed {
            node,
            replacement,
            parent,
        }
    }

    pub fn iter(&self) -> Iter<N> {
        Iter::new(&self.arena, self.root, self.len)
    }
}

impl<N> Tree<N>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    /// Binary search for `key` starting at `root`.
    pub fn search<Q>(&self, root: Handle, key: &Q) -> Result<SearchResult>
    where
        N::Key: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let mut curr = root;
        loop {
            let ordering = compare(key, self[curr].entry().key.borrow())?;
            if ordering == Ordering::Equal {
                return Ok(SearchResult::Found(curr));
            }
            match self.direction(curr, ordering) {
                Some(next) => curr = next,
                None => return Ok(SearchResult::Vacant(curr, ordering)),
            }
        }
    }

    /// Returns the node holding `key`, if any.
    pub fn find<Q>(&self, key: &Q) -> Result<Option<Handle>>
    where
        N::Key: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        check_key(key)?;
        match self.root {
            None => Ok(None),
            Some(root) => match self.search(root, key)? {
                SearchResult::Found(handle) => Ok(Some(handle)),
                SearchResult::Vacant(..) => Ok(None),
            },
        }
    }

    /// Checks the structure without trusting any bookkeeping: every child points back at its
    /// parent, the root has no parent, keys strictly ascend in order, and the number of reachable
    /// nodes matches both `len` and the arena.
    pub fn is_well_formed(&self) -> bool {
        if let Some(root) = self.root {
            match self.arena.get(&root) {
                Some(node) if node.parent().is_none() => {}
                _ => return false,
            }
        }

        let mut stack = Vec::new();
        let mut curr = self.root;
        let mut prev: Option<&N::Key> = None;
        let mut count = 0;

        loop {
            if let Some(handle) = curr {
                let node = &self[handle];
                for child in node.left().into_iter().chain(node.right()) {
                    match self.arena.get(&child) {
                        Some(child_node) if child_node.parent() == Some(handle) => {}
                        _ => return false,
                    }
                }
                if stack.len() >= self.len {
                    return false;
                }
                stack.push(handle);
                curr = node.left();
            } else {
                let handle = match stack.pop() {
                    Some(handle) => handle,
                    None => break,
                };
                let key = &self[handle].entry().key;
                if let Some(prev_key) = prev {
                    if prev_key.partial_cmp(key) != Some(Ordering::Less) {
                        return false;
                    }
                }
                prev = Some(key);
                count += 1;
                curr = self[handle].right();
            }
        }

        count == self.len && self.arena.len() == self.len
    }
}

impl<N> Index<Handle> for Tree<N> {
    type Output = N;

    fn index(&self, handle: Handle) -> &Self::Output {
        &self.arena[handle]
    }
}

impl<N> IndexMut<Handle> for Tree<N> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        &mut self.arena[handle]
    }
}

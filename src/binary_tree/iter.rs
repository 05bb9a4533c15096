use crate::arena::{Handle, TypedArena};
use crate::binary_tree::node::BinaryNode;

/// In-order iterator over a tree. Uses an explicit stack of pending ancestors instead of
/// recursion, so its depth is bounded by the heap rather than the call stack.
pub struct Iter<'a, N>
where
    N: 'a,
{
    arena: &'a TypedArena<N>,
    stack: Vec<Handle>,
    curr: Option<Handle>,
    remaining: usize,
}

impl<'a, N> Iter<'a, N>
where
    N: 'a,
{
    pub fn new(arena: &'a TypedArena<N>, root: Option<Handle>, len: usize) -> Self {
        Iter {
            arena,
            stack: Vec::new(),
            curr: root,
            remaining: len,
        }
    }
}

impl<'a, N> Iterator for Iter<'a, N>
where
    N: 'a + BinaryNode,
{
    type Item = (&'a N::Key, &'a N::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.curr {
            self.stack.push(handle);
            self.curr = arena[handle].left();
        }

        let handle = self.stack.pop()?;
        let node = &arena[handle];
        self.curr = node.right();
        self.remaining -= 1;
        let entry = node.entry();
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N> ExactSizeIterator for Iter<'a, N> where N: 'a + BinaryNode {}

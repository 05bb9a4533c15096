use crate::arena::Handle;
use crate::entry::Entry;

/// Structural links of a node. `left` and `right` own their subtrees; `parent` is only used to
/// walk upward and never owns anything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Links {
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

/// The capabilities shared by the nodes of every parent-linked binary search tree in this crate.
pub trait BinaryNode {
    type Key;
    type Value;

    fn entry(&self) -> &Entry<Self::Key, Self::Value>;

    fn entry_mut(&mut self) -> &mut Entry<Self::Key, Self::Value>;

    fn into_entry(self) -> Entry<Self::Key, Self::Value>;

    fn links(&self) -> &Links;

    fn links_mut(&mut self) -> &mut Links;

    fn left(&self) -> Option<Handle> {
        self.links().left
    }

    fn right(&self) -> Option<Handle> {
        self.links().right
    }

    fn parent(&self) -> Option<Handle> {
        self.links().parent
    }

    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

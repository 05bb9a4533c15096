use crate::binary_tree::{BinaryNode, Links};
use crate::entry::Entry;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub color: Color,
    pub links: Links,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, color: Color) -> Self {
        Node {
            entry: Entry::new(key, value),
            color,
            links: Links::default(),
        }
    }
}

impl<K, V> BinaryNode for Node<K, V> {
    type Key = K;
    type Value = V;

    fn entry(&self) -> &Entry<K, V> {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut Entry<K, V> {
        &mut self.entry
    }

    fn into_entry(self) -> Entry<K, V> {
        self.entry
    }

    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

use crate::binary_tree::{BinaryNode, Links};
use crate::entry::Entry;

/// A struct representing an internal node of an avl tree.
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub height: usize,
    pub links: Links,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Node {
            entry: Entry::new(key, value),
            height: 1,
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

use crate::binary_tree::{self, BinaryNode, Iter, SearchResult};
use crate::error::Result;
use crate::red_black_tree::node::{Color, Node};
use crate::red_black_tree::tree::{self, RedBlackTree};
use crate::ARENA_CHUNK_SIZE;
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::mem;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree where every node is colored red or
/// black. The root is black, no red node has a red child, and every path from a node down to an
/// absent child passes through the same number of black nodes. Together these keep the longest
/// path at most twice as long as the shortest. Insertions and removals repair the coloring by
/// walking upward through parent links, recoloring and rotating as they go.
///
/// # Examples
/// ```
/// use balanced_maps::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1)?;
/// map.insert(3, 4)?;
///
/// assert_eq!(map.get(&0)?, Some(&1));
/// assert_eq!(map.get(&1)?, None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
///
/// assert_eq!(map.remove(&0)?, Some(1));
/// assert_eq!(map.remove(&1)?, None);
/// # Ok::<(), balanced_maps::Error>(())
/// ```
pub struct RedBlackMap<K, V> {
    tree: RedBlackTree<K, V>,
}

impl<K, V> RedBlackMap<K, V> {
    /// Constructs a new, empty `RedBlackMap<K, V>`.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(ARENA_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackMap<K, V>` whose node arena grows `chunk_size` nodes at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMap {
            tree: RedBlackTree::new(chunk_size),
        }
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(2, 2)?;
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing red black map with {} entries", self.len());
        self.tree.clear();
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(3, 3)?;
    /// map.insert(1, 1)?;
    /// assert_eq!(map.min(), Some(&1));
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.tree
            .root
            .map(|root| &self.tree[self.tree.min(root)].entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree
            .root
            .map(|root| &self.tree[self.tree.max(root)].entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(2, 2)?;
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<K, V> {
        RedBlackMapIter {
            iter: self.tree.iter(),
        }
    }

    /// Collects every key-value pair in ascending key order.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(3, 'c')?;
    /// map.insert(1, 'a')?;
    /// assert_eq!(map.entries(), vec![(&1, &'a'), (&3, &'c')]);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K, V> RedBlackMap<K, V>
where
    K: PartialOrd,
{
    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if `key` does not compare equal to itself. The map is left
    /// untouched.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    /// use balanced_maps::Error;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1.0, 1)?, None);
    /// assert_eq!(map.get(&1.0)?, Some(&1));
    /// assert_eq!(map.insert(1.0, 2)?, Some(1));
    /// assert_eq!(map.get(&1.0)?, Some(&2));
    ///
    /// assert_eq!(map.insert(std::f64::NAN, 3), Err(Error::InvalidKey));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        binary_tree::check_key(&key)?;
        let root = match self.tree.root {
            None => {
                self.tree.insert_root(Node::new(key, value, Color::Black));
                return Ok(None);
            }
            Some(root) => root,
        };

        match self.tree.search(root, &key)? {
            SearchResult::Found(handle) => {
                Ok(Some(mem::replace(&mut self.tree[handle].entry.value, value)))
            }
            SearchResult::Vacant(parent, ordering) => {
                let handle = self.tree.attach(parent, ordering, Node::new(key, value, Color::Red));
                tree::fix_after_insert(&mut self.tree, handle);
                Ok(None)
            }
        }
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated value. Otherwise it will return `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if `key` is not comparable.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.remove(&1)?, Some(1));
    /// assert_eq!(map.remove(&1)?, None);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let handle = match self.tree.find(key)? {
            None => return Ok(None),
            Some(handle) => handle,
        };
        let removed = self.tree.remove_node(handle);
        if removed.node.color == Color::Black {
            tree::fix_after_remove(&mut self.tree, removed.replacement, removed.parent);
        }
        Ok(Some(removed.node.into_entry().value))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1)?;
    /// assert!(!map.contains_key(&0)?);
    /// assert!(map.contains_key(&1)?);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        Ok(self.tree.find(key)?.is_some())
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.get(&0)?, None);
    /// assert_eq!(map.get(&1)?, Some(&1));
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        Ok(self
            .tree
            .find(key)?
            .map(|handle| &self.tree[handle].entry.value))
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        match self.tree.find(key)? {
            None => Ok(None),
            Some(handle) => Ok(Some(&mut self.tree[handle].entry.value)),
        }
    }

    /// Verifies the tree from scratch without relying on any cached state: links and key order
    /// are consistent, the root is black, no red node has a red child, and all paths carry the
    /// same number of black nodes. Intended for tests and debugging.
    pub fn is_red_black_tree(&self) -> bool {
        self.tree.is_well_formed()
            && !tree::is_red(&self.tree, self.tree.root)
            && tree::black_height(&self.tree, self.tree.root).is_some()
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = RedBlackMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    iter: Iter<'a, Node<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

impl<K, V> Default for RedBlackMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for RedBlackMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for RedBlackMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for RedBlackMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use crate::arena::Handle;
    use crate::binary_tree::BinaryNode;
    use crate::error::Error;
    use crate::red_black_tree::node::Color;

    fn insert_all(keys: &[u32]) -> RedBlackMap<u32, u32> {
        let mut map = RedBlackMap::new();
        for &key in keys {
            map.insert(key, 1).unwrap();
        }
        map
    }

    fn root(map: &RedBlackMap<u32, u32>) -> Handle {
        map.tree.root.expect("Expected a non-empty tree.")
    }

    fn handle_of(map: &RedBlackMap<u32, u32>, key: u32) -> Handle {
        map.tree.find(&key).unwrap().unwrap()
    }

    fn color_of(map: &RedBlackMap<u32, u32>, key: u32) -> Color {
        map.tree[handle_of(map, key)].color
    }

    fn keys(map: &RedBlackMap<u32, u32>) -> Vec<u32> {
        map.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_insert_root_is_black() {
        let map = insert_all(&[1]);
        assert_eq!(color_of(&map, 1), Color::Black);
        assert_eq!(map.tree[root(&map)].parent(), None);
    }

    #[test]
    fn test_insert_left_child_is_red() {
        let map = insert_all(&[2, 1]);
        let root = root(&map);

        assert_eq!(map.tree[root].entry.key, 2);
        assert_eq!(map.tree[root].color, Color::Black);
        assert_eq!(map.tree[root].parent(), None);

        let left = map.tree[root].left().expect("Expected left child node to be `Some`.");
        assert_eq!(map.tree[left].entry.key, 1);
        assert_eq!(map.tree[left].color, Color::Red);
        assert_eq!(map.tree[left].parent(), Some(root));
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_insert_rotation() {
        for order in &[[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
            let map = insert_all(order);
            assert_eq!(map.tree[root(&map)].entry.key, 2);
            assert_eq!(color_of(&map, 2), Color::Black);
            assert_eq!(color_of(&map, 1), Color::Red);
            assert_eq!(color_of(&map, 3), Color::Red);
            assert!(map.is_red_black_tree());
        }
    }

    #[test]
    fn test_insert_recolor() {
        let map = insert_all(&[1, 2, 3, 4]);
        assert_eq!(color_of(&map, 2), Color::Black);
        assert_eq!(color_of(&map, 1), Color::Black);
        assert_eq!(color_of(&map, 3), Color::Black);
        assert_eq!(color_of(&map, 4), Color::Red);
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_insert_replace() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), Ok(None));
        assert_eq!(map.insert(1, 2), Ok(Some(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Ok(Some(&2)));
    }

    #[test]
    fn test_remove_black_with_red_child() {
        let mut map = insert_all(&[1, 2, 3, 4]);
        assert_eq!(map.remove(&3), Ok(Some(1)));

        assert_eq!(keys(&map), vec![1, 2, 4]);
        assert_eq!(color_of(&map, 4), Color::Black);
        assert_eq!(map.contains_key(&3), Ok(false));
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_remove_black_leaf() {
        let mut map = insert_all(&[1, 2, 3, 4]);
        map.remove(&4).unwrap();
        let handle = handle_of(&map, 1);

        assert_eq!(map.remove(&1), Ok(Some(1)));

        assert_eq!(keys(&map), vec![2, 3]);
        assert_eq!(color_of(&map, 3), Color::Red);
        assert!(map.tree.node(handle).is_none());
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_remove_red_leaf() {
        let mut map = insert_all(&[1, 2, 3]);
        let handle = handle_of(&map, 1);

        map.remove(&1).unwrap();

        assert_eq!(keys(&map), vec![2, 3]);
        assert!(map.tree.node(handle).is_none());
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_remove_root() {
        let mut map = insert_all(&[1, 2, 3, 4, 5, 6, 7]);
        let root_key = map.tree[root(&map)].entry.key;

        assert_eq!(map.remove(&root_key), Ok(Some(1)));

        assert_eq!(map.len(), 6);
        assert_eq!(map.tree[root(&map)].parent(), None);
        assert_eq!(map.contains_key(&root_key), Ok(false));
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_remove_sequence() {
        let mut map = insert_all(&[8, 3, 10, 1, 0, 6, 4, 7, 14, 15, 13, 9]);
        assert!(map.is_red_black_tree());

        for key in &[3, 4, 1] {
            assert_eq!(map.remove(key), Ok(Some(1)));
            assert_eq!(map.contains_key(key), Ok(false));
            assert!(map.is_red_black_tree());
        }
        assert_eq!(keys(&map), vec![0, 6, 7, 8, 9, 10, 13, 14, 15]);
    }

    #[test]
    fn test_remove_all() {
        let mut map = insert_all(&[5, 2, 8, 1, 3, 7, 9, 4, 6]);
        for key in 1..=9 {
            assert_eq!(map.remove(&key), Ok(Some(1)));
            assert!(map.is_red_black_tree());
        }
        assert_eq!(map.tree.root, None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let mut map = insert_all(&[1, 2, 3]);
        assert_eq!(map.remove(&4), Ok(None));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_invalid_key() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(std::f64::NAN, 1), Err(Error::InvalidKey));
        assert!(map.is_empty());

        map.insert(1.0, 1).unwrap();
        assert_eq!(map.insert(std::f64::NAN, 2), Err(Error::InvalidKey));
        assert_eq!(map.get(&std::f64::NAN), Err(Error::InvalidKey));
        assert_eq!(map.remove(&std::f64::NAN), Err(Error::InvalidKey));
        assert_eq!(map.len(), 1);
        assert!(map.is_red_black_tree());
    }

    #[test]
    fn test_clear() {
        let mut map = insert_all(&[3, 1, 2]);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.min(), None);
        map.insert(1, 1).unwrap();
        assert_eq!(color_of(&map, 1), Color::Black);
    }

    #[test]
    fn test_iter() {
        let map = insert_all(&[4, 2, 6]);
        assert_eq!(
            (&map).into_iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&2, &1), (&4, &1), (&6, &1)],
        );
        assert_eq!(map.entries(), vec![(&2, &1), (&4, &1), (&6, &1)]);
    }

    #[test]
    fn test_debug() {
        let mut map = RedBlackMap::new();
        map.insert(3, "c").unwrap();
        map.insert(1, "a").unwrap();
        assert_eq!(format!("{:?}", map), r#"{1: "a", 3: "c"}"#);
    }
}

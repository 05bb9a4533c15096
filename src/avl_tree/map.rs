use crate::avl_tree::node::Node;
use crate::avl_tree::tree::{self, AvlTree};
use crate::binary_tree::{self, BinaryNode, Iter, SearchResult};
use crate::error::Result;
use crate::ARENA_CHUNK_SIZE;
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::mem;

/// An ordered map implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Nodes live in an arena and
/// keep a link to their parent, so the tree is rebalanced by walking upward from the point of
/// each insertion or removal.
///
/// # Examples
/// ```
/// use balanced_maps::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
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
pub struct AvlMap<K, V> {
    tree: AvlTree<K, V>,
}

impl<K, V> AvlMap<K, V> {
    /// Constructs a new, empty `AvlMap<K, V>`.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(ARENA_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlMap<K, V>` whose node arena grows `chunk_size` nodes at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlMap {
            tree: AvlTree::new(chunk_size),
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.len(), 1);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
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
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(2, 2)?;
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing avl map with {} entries", self.len());
        self.tree.clear();
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree
            .root
            .map(|root| &self.tree[self.tree.min(root)].entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(3, 3)?;
    /// assert_eq!(map.max(), Some(&3));
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
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
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(2, 2)?;
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn iter(&self) -> AvlMapIter<K, V> {
        AvlMapIter {
            iter: self.tree.iter(),
        }
    }

    /// Collects every key-value pair in ascending key order.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, 'c')?;
    /// map.insert(1, 'a')?;
    /// assert_eq!(map.entries(), vec![(&1, &'a'), (&3, &'c')]);
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K, V> AvlMap<K, V>
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
    /// use balanced_maps::avl_tree::AvlMap;
    /// use balanced_maps::Error;
    ///
    /// let mut map = AvlMap::new();
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
                self.tree.insert_root(Node::new(key, value));
                return Ok(None);
            }
            Some(root) => root,
        };

        match self.tree.search(root, &key)? {
            SearchResult::Found(handle) => {
                Ok(Some(mem::replace(&mut self.tree[handle].entry.value, value)))
            }
            SearchResult::Vacant(parent, ordering) => {
                self.tree.attach(parent, ordering, Node::new(key, value));
                tree::rebalance(&mut self.tree, Some(parent));
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
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
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
        tree::rebalance(&mut self.tree, removed.parent);
        Ok(Some(removed.node.into_entry().value))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
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
    ///
    /// # Examples
    /// ```
    /// use balanced_maps::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert("a", 1)?;
    /// if let Some(value) = map.get_mut("a")? {
    ///     *value = 2;
    /// }
    /// assert_eq!(map.get("a")?, Some(&2));
    /// # Ok::<(), balanced_maps::Error>(())
    /// ```
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

    /// Verifies the tree from scratch: links and key order are consistent and every node's
    /// subtrees differ in height by at most one. Intended for tests and debugging.
    pub fn is_balanced(&self) -> bool {
        self.tree.is_well_formed() && tree::checked_height(&self.tree, self.tree.root).is_some()
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = AvlMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `AvlMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    iter: Iter<'a, Node<K, V>>,
}

impl<'a, K, V> Iterator for AvlMapIter<'a, K, V>
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

impl<'a, K, V> ExactSizeIterator for AvlMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for AvlMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for AvlMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for AvlMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

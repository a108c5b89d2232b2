use crate::bst::node::Node;
use crate::bst::tree;
use crate::bst::tree::{BalanceMode, Violation};
use serde_derive::{Deserialize, Serialize};

/// An ordered set implemented using a binary search tree.
///
/// The balancing mode is fixed when the set is created. A `Plain` set is an ordinary binary
/// search tree whose shape depends entirely on the order of insertions, so a sorted insertion
/// sequence degenerates it into a chain. A `Balanced` set is an AVL tree: after every insertion
/// and removal it restores the invariant that the heights of the two child subtrees of any node
/// differ by at most one, keeping every operation logarithmic.
///
/// # Examples
/// ```
/// use tree_collections::bst::{BalanceMode, BstSet};
///
/// let mut set = BstSet::new(BalanceMode::Balanced);
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&1));
///
/// assert!(set.remove(&1));
/// assert!(!set.remove(&1));
/// ```
#[derive(Serialize, Deserialize)]
pub struct BstSet<T> {
    root: tree::Tree<T>,
    mode: BalanceMode,
    size: usize,
}

impl<T> BstSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `BstSet<T>` with the given balancing mode.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::{BalanceMode, BstSet};
    ///
    /// let set: BstSet<u32> = BstSet::new(BalanceMode::Plain);
    /// ```
    pub fn new(mode: BalanceMode) -> Self {
        BstSet {
            root: None,
            mode,
            size: 0,
        }
    }

    /// Constructs a new, empty `BstSet<T>` without self-balancing.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let set: BstSet<u32> = BstSet::plain();
    /// ```
    pub fn plain() -> Self {
        Self::new(BalanceMode::Plain)
    }

    /// Constructs a new, empty `BstSet<T>` with AVL self-balancing.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let set: BstSet<u32> = BstSet::balanced();
    /// ```
    pub fn balanced() -> Self {
        Self::new(BalanceMode::Balanced)
    }

    /// Returns the balancing mode the set was created with.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::{BalanceMode, BstSet};
    ///
    /// let set: BstSet<u32> = BstSet::plain();
    /// assert_eq!(set.mode(), BalanceMode::Plain);
    /// ```
    pub fn mode(&self) -> BalanceMode {
        self.mode
    }

    /// Inserts a key into the set. Returns `true` if the key was absent and has been inserted,
    /// and `false` if it was already present; a duplicate leaves the set completely unchanged.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let inserted = tree::insert(&mut self.root, key, self.mode);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Removes a key from the set. Returns `true` if the key was present and has been removed,
    /// and `false` if it was absent; a miss leaves the set completely unchanged.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        let removed = tree::remove(&mut self.root, key, self.mode);
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.root, key)
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let set: BstSet<u32> = BstSet::balanced();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the height of the tree backing the set. An empty set has height zero and a single
    /// key has height one.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut plain = BstSet::plain();
    /// let mut balanced = BstSet::balanced();
    /// for key in 1..=7 {
    ///     plain.insert(key);
    ///     balanced.insert(key);
    /// }
    ///
    /// assert_eq!(plain.height(), 7);
    /// assert_eq!(balanced.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.root)
    }

    /// Clears the set, removing all keys. The nodes are released iteratively, so clearing a
    /// degenerate chain cannot exhaust the native stack.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        tree::clear(&mut self.root);
        self.size = 0;
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        tree::floor(&self.root, key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        tree::ceil(&self.root, key)
    }

    /// Checks the structural invariants of the set, recomputing every subtree height from
    /// scratch: the binary-search-tree ordering, the cached heights, and, in `Balanced` mode,
    /// the per-node balance property. Reports the first violation found.
    ///
    /// This is a diagnostic pass for catching rebalancing bugs, not a fast path; it visits
    /// every node.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// for key in 0..100 {
    ///     set.insert(key);
    /// }
    /// assert!(set.verify().is_ok());
    /// ```
    pub fn verify(&self) -> Result<(), Violation<T>>
    where
        T: Clone,
    {
        tree::verify(&self.root, self.mode)
    }

    /// Returns an iterator over the set. The iterator will yield keys in sorted order.
    ///
    /// # Examples
    /// ```
    /// use tree_collections::bst::BstSet;
    ///
    /// let mut set = BstSet::balanced();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstSetIter<T> {
        BstSetIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }
}

impl<T> IntoIterator for BstSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = BstSetIntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        BstSetIntoIter {
            current: self.root.take(),
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = BstSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstSet<T>`.
///
/// This iterator traverses the keys of the set in-order and yields owned keys.
pub struct BstSetIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> Iterator for BstSetIntoIter<T>
where
    T: Ord,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            key
        })
    }
}

impl<T> Drop for BstSetIntoIter<T> {
    // the unvisited right subtrees are released iteratively, as in `BstSet::clear`
    fn drop(&mut self) {
        tree::clear(&mut self.current);
        while let Some(mut node) = self.stack.pop() {
            tree::clear(&mut node.left);
            tree::clear(&mut node.right);
        }
    }
}

/// An iterator for `BstSet<T>`.
///
/// This iterator traverses the keys of the set in-order and yields immutable references.
pub struct BstSetIter<'a, T>
where
    T: 'a,
{
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for BstSetIter<'a, T>
where
    T: 'a + Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.key
        })
    }
}

impl<T> Default for BstSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new(BalanceMode::default())
    }
}

impl<T> Drop for BstSet<T> {
    // matches `clear`: a degenerate chain must not be torn down by recursive drops
    fn drop(&mut self) {
        tree::clear(&mut self.root);
    }
}

use crate::bst::node::Node;
use serde_derive::{Deserialize, Serialize};
use std::cmp;
use std::cmp::Ordering;

pub type Tree<T> = Option<Box<Node<T>>>;

/// The balancing policy of a tree, fixed when the tree is created.
///
/// A `Plain` tree is an ordinary binary search tree whose shape depends entirely on the order of
/// insertions; a sorted insertion sequence degenerates it into a chain. A `Balanced` tree restores
/// the AVL invariant after every insertion and removal, so its height stays logarithmic in the
/// number of keys. Heights are cached on every node in both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceMode {
    Plain,
    Balanced,
}

impl Default for BalanceMode {
    fn default() -> Self {
        BalanceMode::Balanced
    }
}

/// The first structural defect found when verifying a tree.
///
/// Verification recomputes every subtree height from scratch, so a defect is reported even when
/// the cached heights agree with each other but not with the actual structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation<T> {
    /// A key that falls outside the bounds imposed by its ancestors.
    OutOfOrder { key: T },
    /// A cached height that disagrees with the height computed from the children.
    StaleHeight { key: T, cached: usize, actual: usize },
    /// A node whose subtree heights differ by more than one, in `Balanced` mode.
    Unbalanced { key: T, balance: i32 },
}

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Recomputes the height of the root of `tree` and, in `Balanced` mode, resolves an imbalance
// with one of the four rotation cases, selected by the balance factors of the node and of its
// heavier child.
fn balance<T>(tree: &mut Tree<T>, mode: BalanceMode) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if mode == BalanceMode::Balanced {
        if node.balance() > 1 {
            if let Some(child) = node.left.take() {
                if child.balance() < 0 {
                    node.left = Some(rotate_left(child));
                } else {
                    node.left = Some(child);
                }
            }
            node = rotate_right(node);
        } else if node.balance() < -1 {
            if let Some(child) = node.right.take() {
                if child.balance() > 0 {
                    node.right = Some(rotate_right(child));
                } else {
                    node.right = Some(child);
                }
            }
            node = rotate_left(node);
        }
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
//
// Every node on the spine leading to the minimum is rebalanced as the recursion unwinds.
fn remove_min<T>(tree: &mut Tree<T>, mode: BalanceMode) -> Box<Node<T>> {
    let has_left = match tree {
        Some(ref node) => node.left.is_some(),
        None => unreachable!(),
    };

    if has_left {
        let min = match tree {
            Some(ref mut node) => remove_min(&mut node.left, mode),
            None => unreachable!(),
        };
        balance(tree, mode);
        min
    } else {
        match tree.take() {
            Some(mut node) => {
                *tree = node.right.take();
                node
            },
            None => unreachable!(),
        }
    }
}

fn combine_subtrees<T>(left_tree: Tree<T>, mut right_tree: Tree<T>, mode: BalanceMode) -> Tree<T> {
    let mut new_root = remove_min(&mut right_tree, mode);
    new_root.left = left_tree;
    new_root.right = right_tree;
    Some(new_root)
}

pub fn insert<T>(tree: &mut Tree<T>, key: T, mode: BalanceMode) -> bool
where
    T: Ord,
{
    let inserted = match tree {
        Some(ref mut node) => match key.cmp(&node.key) {
            Ordering::Less => insert(&mut node.left, key, mode),
            Ordering::Greater => insert(&mut node.right, key, mode),
            // A duplicate leaves the structure untouched, so no ancestor heights change.
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(key)));
            return true;
        },
    };

    balance(tree, mode);
    inserted
}

pub fn contains<T>(tree: &Tree<T>, key: &T) -> bool
where
    T: Ord,
{
    match *tree {
        Some(ref node) => match key.cmp(&node.key) {
            Ordering::Less => contains(&node.left, key),
            Ordering::Greater => contains(&node.right, key),
            Ordering::Equal => true,
        },
        None => false,
    }
}

pub fn remove<T>(tree: &mut Tree<T>, key: &T, mode: BalanceMode) -> bool
where
    T: Ord,
{
    let removed = match tree.take() {
        Some(mut node) => match key.cmp(&node.key) {
            Ordering::Less => {
                let removed = remove(&mut node.left, key, mode);
                *tree = Some(node);
                removed
            },
            Ordering::Greater => {
                let removed = remove(&mut node.right, key, mode);
                *tree = Some(node);
                removed
            },
            Ordering::Equal => {
                let unboxed_node = *node;
                let Node { left, right, .. } = unboxed_node;
                match (left, right) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (left, right) => *tree = combine_subtrees(left, right, mode),
                }
                true
            },
        },
        None => return false,
    };

    balance(tree, mode);
    removed
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T>
where
    T: Ord,
{
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T>
where
    T: Ord,
{
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

pub fn ceil<'a, T>(tree: &'a Tree<T>, key: &T) -> Option<&'a T>
where
    T: Ord,
{
    tree.as_ref().and_then(|node| match key.cmp(&node.key) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.key),
            res => res,
        },
        Ordering::Equal => Some(&node.key),
    })
}

pub fn floor<'a, T>(tree: &'a Tree<T>, key: &T) -> Option<&'a T>
where
    T: Ord,
{
    tree.as_ref().and_then(|node| match key.cmp(&node.key) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.key),
            res => res,
        },
        Ordering::Equal => Some(&node.key),
    })
}

// Releases every node exactly once with an explicit work stack, so tearing down a degenerate
// chain cannot exhaust the native stack.
pub fn clear<T>(tree: &mut Tree<T>) {
    let mut stack = Vec::new();
    stack.extend(tree.take());
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

pub fn verify<T>(tree: &Tree<T>, mode: BalanceMode) -> Result<(), Violation<T>>
where
    T: Ord + Clone,
{
    check(tree, None, None, mode).map(|_| ())
}

// Recomputes the height of `tree` from scratch, checking every node against the key bounds
// imposed by its ancestors, against its cached height, and, in `Balanced` mode, against the
// balance invariant. Reports the first defect found.
fn check<T>(
    tree: &Tree<T>,
    lower: Option<&T>,
    upper: Option<&T>,
    mode: BalanceMode,
) -> Result<usize, Violation<T>>
where
    T: Ord + Clone,
{
    let node = match tree {
        Some(ref node) => node,
        None => return Ok(0),
    };

    let below = lower.map_or(false, |bound| node.key <= *bound);
    let above = upper.map_or(false, |bound| node.key >= *bound);
    if below || above {
        return Err(Violation::OutOfOrder {
            key: node.key.clone(),
        });
    }

    let left_height = check(&node.left, lower, Some(&node.key), mode)?;
    let right_height = check(&node.right, Some(&node.key), upper, mode)?;

    let actual = cmp::max(left_height, right_height) + 1;
    if node.height != actual {
        return Err(Violation::StaleHeight {
            key: node.key.clone(),
            cached: node.height,
            actual,
        });
    }

    let balance = left_height as i32 - right_height as i32;
    if mode == BalanceMode::Balanced && balance.abs() > 1 {
        return Err(Violation::Unbalanced {
            key: node.key.clone(),
            balance,
        });
    }

    Ok(actual)
}

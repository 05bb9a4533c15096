use crate::arena::Handle;
use crate::avl_tree::node::Node;
use crate::binary_tree::{BinaryNode, Tree};
use log::trace;
use std::cmp;

pub type AvlTree<K, V> = Tree<Node<K, V>>;

pub fn height<K, V>(tree: &AvlTree<K, V>, handle: Option<Handle>) -> usize {
    match handle {
        None => 0,
        Some(handle) => tree[handle].height,
    }
}

fn update<K, V>(tree: &mut AvlTree<K, V>, handle: Handle) {
    let left = tree[handle].left();
    let right = tree[handle].right();
    tree[handle].height = cmp::max(height(tree, left), height(tree, right)) + 1;
}

/// Height of the left subtree minus height of the right subtree.
pub fn balance<K, V>(tree: &AvlTree<K, V>, handle: Handle) -> isize {
    let node = &tree[handle];
    (height(tree, node.left()) as isize) - (height(tree, node.right()) as isize)
}

fn rotate_left<K, V>(tree: &mut AvlTree<K, V>, handle: Handle) -> Handle {
    let top = tree.rotate_left(handle);
    update(tree, handle);
    update(tree, top);
    top
}

fn rotate_right<K, V>(tree: &mut AvlTree<K, V>, handle: Handle) -> Handle {
    let top = tree.rotate_right(handle);
    update(tree, handle);
    update(tree, top);
    top
}

/// Walks from `start` up to the root, refreshing heights and rotating every subtree whose
/// balance factor has reached two.
pub fn rebalance<K, V>(tree: &mut AvlTree<K, V>, start: Option<Handle>) {
    let mut curr = start;
    while let Some(handle) = curr {
        update(tree, handle);
        let factor = balance(tree, handle);

        let top = if factor > 1 {
            let child = tree[handle]
                .left()
                .expect("Expected left child node to be `Some`.");
            if balance(tree, child) < 0 {
                trace!("left-right imbalance at {:?}", handle);
                rotate_left(tree, child);
            } else {
                trace!("left-left imbalance at {:?}", handle);
            }
            rotate_right(tree, handle)
        } else if factor < -1 {
            let child = tree[handle]
                .right()
                .expect("Expected right child node to be `Some`.");
            if balance(tree, child) > 0 {
                trace!("right-left imbalance at {:?}", handle);
                rotate_right(tree, child);
            } else {
                trace!("right-right imbalance at {:?}", handle);
            }
            rotate_left(tree, handle)
        } else {
            handle
        };

        curr = tree[top].parent();
    }
}

/// Recomputes the height of a subtree from scratch. Returns `None` if any node in it is out of
/// balance or carries a stale cached height.
pub fn checked_height<K, V>(tree: &AvlTree<K, V>, handle: Option<Handle>) -> Option<usize> {
    let handle = match handle {
        None => return Some(0),
        Some(handle) => handle,
    };
    let node = &tree[handle];
    let left = checked_height(tree, node.left())?;
    let right = checked_height(tree, node.right())?;
    let height = cmp::max(left, right) + 1;

    if (left as isize - right as isize).abs() > 1 || node.height != height {
        return None;
    }
    Some(height)
}

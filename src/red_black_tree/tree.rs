use crate::arena::Handle;
use crate::binary_tree::{BinaryNode, Tree};
use crate::red_black_tree::node::{Color, Node};
use log::trace;

pub type RedBlackTree<K, V> = Tree<Node<K, V>>;

pub fn is_red<K, V>(tree: &RedBlackTree<K, V>, handle: Option<Handle>) -> bool {
    match handle {
        None => false,
        Some(handle) => tree[handle].color == Color::Red,
    }
}

// absent children count as black and ignore recoloring
fn set_color<K, V>(tree: &mut RedBlackTree<K, V>, handle: Option<Handle>, color: Color) {
    if let Some(handle) = handle {
        tree[handle].color = color;
    }
}

fn left_of<K, V>(tree: &RedBlackTree<K, V>, handle: Option<Handle>) -> Option<Handle> {
    handle.and_then(|handle| tree[handle].left())
}

fn right_of<K, V>(tree: &RedBlackTree<K, V>, handle: Option<Handle>) -> Option<Handle> {
    handle.and_then(|handle| tree[handle].right())
}

/// Restores the red black invariants after `handle` was linked in as a red leaf.
pub fn fix_after_insert<K, V>(tree: &mut RedBlackTree<K, V>, handle: Handle) {
    let mut curr = handle;
    while let Some(parent) = tree[curr].parent() {
        if tree[parent].color != Color::Red {
            break;
        }
        let grandparent = tree[parent]
            .parent()
            .expect("Expected a red node to have a parent.");

        if tree[grandparent].left() == Some(parent) {
            let uncle = tree[grandparent].right();
            if is_red(tree, uncle) {
                tree[parent].color = Color::Black;
                set_color(tree, uncle, Color::Black);
                tree[grandparent].color = Color::Red;
                curr = grandparent;
            } else {
                if tree[parent].right() == Some(curr) {
                    tree.rotate_left(parent);
                    curr = parent;
                }
                let parent = tree[curr].parent().expect("Expected a parent node.");
                tree[parent].color = Color::Black;
                tree[grandparent].color = Color::Red;
                tree.rotate_right(grandparent);
                trace!("insertion resolved by rotation at {:?}", grandparent);
            }
        } else {
            let uncle = tree[grandparent].left();
            if is_red(tree, uncle) {
                tree[parent].color = Color::Black;
                set_color(tree, uncle, Color::Black);
                tree[grandparent].color = Color::Red;
                curr = grandparent;
            } else {
                if tree[parent].left() == Some(curr) {
                    tree.rotate_right(parent);
                    curr = parent;
                }
                let parent = tree[curr].parent().expect("Expected a parent node.");
                tree[parent].color = Color::Black;
                tree[grandparent].color = Color::Red;
                tree.rotate_left(grandparent);
                trace!("insertion resolved by rotation at {:?}", grandparent);
            }
        }
    }

    if let Some(root) = tree.root {
        tree[root].color = Color::Black;
    }
}

/// Restores the red black invariants after a black node was spliced out. `handle` is the child
/// that took its place and `parent` the spliced node's former parent, which is still needed
/// when `handle` is `None`.
pub fn fix_after_remove<K, V>(
    tree: &mut RedBlackTree<K, V>,
    handle: Option<Handle>,
    parent: Option<Handle>,
) {
    let mut curr = handle;
    let mut curr_parent = parent;

    while curr != tree.root && !is_red(tree, curr) {
        let parent = match curr_parent {
            Some(parent) => parent,
            None => break,
        };

        if tree[parent].left() == curr {
            let mut sibling = tree[parent].right();
            if is_red(tree, sibling) {
                set_color(tree, sibling, Color::Black);
                tree[parent].color = Color::Red;
                tree.rotate_left(parent);
                sibling = tree[parent].right();
            }

            let near = left_of(tree, sibling);
            let far = right_of(tree, sibling);
            if !is_red(tree, near) && !is_red(tree, far) {
                set_color(tree, sibling, Color::Red);
                curr = Some(parent);
                curr_parent = tree[parent].parent();
            } else {
                if !is_red(tree, far) {
                    set_color(tree, near, Color::Black);
                    set_color(tree, sibling, Color::Red);
                    tree.rotate_right(sibling.expect("Expected sibling node to be `Some`."));
                    sibling = tree[parent].right();
                }
                let parent_color = tree[parent].color;
                set_color(tree, sibling, parent_color);
                tree[parent].color = Color::Black;
                let far = right_of(tree, sibling);
                set_color(tree, far, Color::Black);
                tree.rotate_left(parent);
                trace!("removal resolved by rotation at {:?}", parent);
                curr = tree.root;
                curr_parent = None;
            }
        } else {
            let mut sibling = tree[parent].left();
            if is_red(tree, sibling) {
                set_color(tree, sibling, Color::Black);
                tree[parent].color = Color::Red;
                tree.rotate_right(parent);
                sibling = tree[parent].left();
            }

            let near = right_of(tree, sibling);
            let far = left_of(tree, sibling);
            if !is_red(tree, near) && !is_red(tree, far) {
                set_color(tree, sibling, Color::Red);
                curr = Some(parent);
                curr_parent = tree[parent].parent();
            } else {
                if !is_red(tree, far) {
                    set_color(tree, near, Color::Black);
                    set_color(tree, sibling, Color::Red);
                    tree.rotate_left(sibling.expect("Expected sibling node to be `Some`."));
                    sibling = tree[parent].left();
                }
                let parent_color = tree[parent].color;
                set_color(tree, sibling, parent_color);
                tree[parent].color = Color::Black;
                let far = left_of(tree, sibling);
                set_color(tree, far, Color::Black);
                tree.rotate_right(parent);
                trace!("removal resolved by rotation at {:?}", parent);
                curr = tree.root;
                curr_parent = None;
            }
        }
    }

    set_color(tree, curr, Color::Black);
}

/// Number of black nodes on every path from `handle` down to an absent child. Returns `None` if
/// the paths disagree or a red node has a red child.
pub fn black_height<K, V>(tree: &RedBlackTree<K, V>, handle: Option<Handle>) -> Option<usize> {
    let handle = match handle {
        None => return Some(0),
        Some(handle) => handle,
    };
    let node = &tree[handle];
    let left = black_height(tree, node.left())?;
    let right = black_height(tree, node.right())?;

    if left != right {
        return None;
    }
    match node.color {
        Color::Red if is_red(tree, node.left()) || is_red(tree, node.right()) => None,
        Color::Red => Some(left),
        Color::Black => Some(left + 1),
    }
}

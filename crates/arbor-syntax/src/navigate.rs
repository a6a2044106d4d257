use arbor_core::TextRange;
use tree_sitter::Node;

use crate::classify::{classify, is_expression, NodeClass};
use crate::text::node_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Nearest strict ancestor of `node` with the given class, or `None` if the
/// file root is reached first.
pub fn parent_of_class<'tree>(node: Node<'tree>, class: NodeClass) -> Option<Node<'tree>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if classify(ancestor) == class {
            return Some(ancestor);
        }
        if classify(ancestor) == NodeClass::File {
            return None;
        }
        current = ancestor.parent();
    }
    None
}

/// Nearest sibling of `node` in `direction` that is not a comment.
///
/// Whitespace never appears as a node in the tree, so comments are the only
/// insignificant siblings to skip.
pub fn skip_insignificant<'tree>(node: Node<'tree>, direction: Direction) -> Option<Node<'tree>> {
    let step = |n: Node<'tree>| match direction {
        Direction::Forward => n.next_sibling(),
        Direction::Backward => n.prev_sibling(),
    };
    let mut current = step(node)?;
    while classify(current) == NodeClass::Comment {
        current = step(current)?;
    }
    Some(current)
}

/// The contiguous run of `parent`'s children covering `[start, end)`.
///
/// The run is trimmed of trailing comments and then extended rightward to
/// swallow a statement terminator that immediately follows it, so that a
/// selection stopping just short of a `;` still captures a whole statement.
pub fn find_children_range<'tree>(
    parent: Node<'tree>,
    start: usize,
    end: usize,
) -> Vec<Node<'tree>> {
    let mut cursor = parent.walk();
    let children: Vec<Node<'tree>> = parent.children(&mut cursor).collect();
    if children.is_empty() {
        return Vec::new();
    }

    let index_of = |offset: usize| children.iter().position(|c| node_range(*c).contains(offset));
    let i = index_of(start).unwrap_or(0);
    let mut j = match index_of(end) {
        Some(j) => j,
        None => match children.iter().rposition(|c| c.start_byte() < end) {
            Some(j) => j,
            None => return Vec::new(),
        },
    };

    while j > i && classify(children[j]) == NodeClass::Comment {
        j -= 1;
    }
    if children[j].kind() != ";" {
        if let Some(next) = skip_insignificant(children[j], Direction::Forward) {
            if next.kind() == ";" && next.parent().map(|p| p.id()) == Some(parent.id()) {
                j = index_of(next.start_byte()).unwrap_or(j);
            }
        }
    }

    if j < i {
        return Vec::new();
    }
    children[i..=j].to_vec()
}

/// Smallest node of the tree covering `range`, or `None` for an empty tree.
pub fn node_covering<'tree>(root: Node<'tree>, range: TextRange) -> Option<Node<'tree>> {
    root.descendant_for_byte_range(range.start, range.end)
}

/// Node whose text range is exactly `range`, ascended to the outermost node
/// sharing that range.
pub fn node_spanning<'tree>(root: Node<'tree>, range: TextRange) -> Option<Node<'tree>> {
    let mut node = node_covering(root, range)?;
    if node_range(node) != range {
        return None;
    }
    while let Some(parent) = node.parent() {
        if node_range(parent) != range {
            break;
        }
        node = parent;
    }
    Some(node)
}

/// Expression nodes on the ancestor chain of `node` (including `node`
/// itself), innermost first, stopping at the file root.
///
/// Parenthesized wrappers are skipped: they would duplicate their inner
/// expression in a target chooser.
pub fn expression_ancestors<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut out = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        if classify(n) == NodeClass::File {
            break;
        }
        if is_expression(n) && n.kind() != "parenthesized_expression" {
            out.push(n);
        }
        current = n.parent();
    }
    out
}

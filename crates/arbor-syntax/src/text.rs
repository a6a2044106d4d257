use arbor_core::TextRange;
use tree_sitter::Node;

use crate::classify::{classify, NodeClass};

pub fn node_range(node: Node) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

fn collect_leaves<'tree>(node: Node<'tree>, out: &mut Vec<Node<'tree>>) {
    if node.child_count() == 0 {
        out.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, out);
    }
}

/// Structural equality of two expressions: equal leaf-token sequences.
///
/// Whitespace between tokens is insignificant and ignored; token text itself
/// (string literal content included) is compared verbatim.
pub fn tokens_equal(source: &str, a: Node, b: Node) -> bool {
    let mut left = Vec::new();
    let mut right = Vec::new();
    collect_leaves(a, &mut left);
    collect_leaves(b, &mut right);
    left.retain(|n| classify(*n) != NodeClass::Comment);
    right.retain(|n| classify(*n) != NodeClass::Comment);

    left.len() == right.len()
        && left.iter().zip(&right).all(|(l, r)| {
            l.kind_id() == r.kind_id()
                && source[l.start_byte()..l.end_byte()] == source[r.start_byte()..r.end_byte()]
        })
}

/// Render `node` as a single-line initializer.
///
/// Leaf token text is kept verbatim; any inter-token gap containing a line
/// break collapses to one space, so a multi-line expression becomes a valid
/// one-line declaration initializer.
pub fn initializer_text(source: &str, node: Node) -> String {
    let mut leaves = Vec::new();
    collect_leaves(node, &mut leaves);

    let mut out = String::new();
    let mut prev_end: Option<usize> = None;
    for leaf in leaves {
        if let Some(end) = prev_end {
            let gap = &source[end..leaf.start_byte()];
            if gap.contains('\n') {
                out.push(' ');
            } else {
                out.push_str(gap);
            }
        }
        out.push_str(&source[leaf.start_byte()..leaf.end_byte()]);
        prev_end = Some(leaf.end_byte());
    }
    out
}

/// The line containing `offset`, without its trailing newline.
pub fn line_bounds(source: &str, offset: usize) -> TextRange {
    let offset = offset.min(source.len());
    let bytes = source.as_bytes();
    let mut start = offset;
    while start > 0 && bytes[start - 1] != b'\n' {
        start -= 1;
    }
    let mut end = offset;
    while end < bytes.len() && bytes[end] != b'\n' {
        end += 1;
    }
    TextRange::new(start, end)
}

/// Leading whitespace of the line containing `offset`.
pub fn indentation_at(source: &str, offset: usize) -> String {
    let line = line_bounds(source, offset);
    source[line.start..offset.min(line.end)]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Shrink `range` past leading and trailing whitespace.
pub fn trim_whitespace(source: &str, range: TextRange) -> TextRange {
    let bytes = source.as_bytes();
    let mut start = range.start.min(source.len());
    let mut end = range.end.min(source.len());
    while start < end && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    TextRange::new(start, end)
}

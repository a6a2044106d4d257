use arbor_core::TextRange;
use arbor_syntax::{classify, is_expression, is_scope_owner, node_range, tokens_equal, NodeClass};
use tree_sitter::Node;

/// All expressions structurally equal to `target` within its search context,
/// in document order, including `target` itself.
///
/// The context is the nearest enclosing method, constructor, or type
/// declaration; an expression outside any of those searches the whole file.
/// A target with no duplicates yields an empty list, which downstream forces
/// the replace-all flag to `false` without prompting.
pub fn collect_occurrences(source: &str, target: Node) -> Vec<TextRange> {
    let context = search_context(target);

    let mut ranges = Vec::new();
    collect_in(source, context, target, &mut ranges);
    ranges.sort_by_key(|r| (r.start, r.end));
    ranges.dedup();

    if ranges == [node_range(target)] {
        return Vec::new();
    }
    ranges
}

fn search_context<'tree>(target: Node<'tree>) -> Node<'tree> {
    let mut context = target;
    loop {
        let Some(parent) = context.parent() else {
            return context;
        };
        context = parent;
        let class = classify(context);
        if is_scope_owner(class) || class == NodeClass::File {
            return context;
        }
    }
}

fn collect_in(source: &str, node: Node, target: Node, out: &mut Vec<TextRange>) {
    if is_expression(node) && tokens_equal(source, node, target) {
        out.push(node_range(node));
        // Descendants of a match carry strictly fewer tokens, so they can
        // never match too.
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_in(source, child, target, out);
    }
}

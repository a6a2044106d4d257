use arbor_core::TextRange;
use arbor_syntax::{node_range, node_spanning, parent_of_class, NodeClass};
use tree_sitter::Node;

/// Find the statement before which the new declaration must be inserted.
///
/// Starting from the first occurrence, locate its nearest enclosing statement
/// list. If some occurrence falls outside that list, restart one level up,
/// rooted at the list itself, until a single list covers every occurrence;
/// its direct child containing the earliest occurrence start is the anchor.
/// Returns `None` when no enclosing statement list covers all occurrences
/// before the file root is reached.
pub fn find_anchor<'tree>(root: Node<'tree>, occurrences: &[TextRange]) -> Option<Node<'tree>> {
    let first = *occurrences.first()?;
    let min_offset = occurrences.iter().map(|r| r.start).min()?;

    let mut anchor = node_spanning(root, first)?;
    loop {
        let statements = parent_of_class(anchor, NodeClass::StatementList)?;
        let covered = occurrences
            .iter()
            .all(|occ| node_range(statements).covers(*occ));
        if !covered {
            anchor = statements;
            continue;
        }

        let mut cursor = statements.walk();
        return statements
            .children(&mut cursor)
            .find(|child| node_range(*child).contains(min_offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_syntax::parse_java;

    fn ranges_of(source: &str, snippet: &str) -> Vec<TextRange> {
        let mut out = Vec::new();
        let mut from = 0;
        while let Some(pos) = source[from..].find(snippet) {
            let start = from + pos;
            out.push(TextRange::new(start, start + snippet.len()));
            from = start + snippet.len();
        }
        out
    }

    #[test]
    fn anchor_is_the_statement_containing_the_earliest_occurrence() {
        let source = "class A { void m() { int a; int b; f(x + 1); g(x + 1); } }";
        let tree = parse_java(source).unwrap();
        let occurrences = ranges_of(source, "x + 1");
        assert_eq!(occurrences.len(), 2);
        let anchor = find_anchor(tree.root_node(), &occurrences).unwrap();
        assert_eq!(&source[anchor.start_byte()..anchor.end_byte()], "f(x + 1);");
    }

    #[test]
    fn occurrences_in_sibling_blocks_re_root_one_level_up() {
        let source =
            "class A { void m() { if (c) { f(x + 1); } else { g(x + 1); } } }";
        let tree = parse_java(source).unwrap();
        let occurrences = ranges_of(source, "x + 1");
        let anchor = find_anchor(tree.root_node(), &occurrences).unwrap();
        assert_eq!(
            &source[anchor.start_byte()..anchor.end_byte()],
            "if (c) { f(x + 1); } else { g(x + 1); }"
        );
    }

    #[test]
    fn no_enclosing_statement_list_yields_none() {
        let source = "class A { int field = x + 1; }";
        let tree = parse_java(source).unwrap();
        let occurrences = ranges_of(source, "x + 1");
        assert_eq!(find_anchor(tree.root_node(), &occurrences), None);
    }
}

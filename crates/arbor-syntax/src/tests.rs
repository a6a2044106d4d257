use arbor_core::TextRange;
use pretty_assertions::assert_eq;
use tree_sitter::{Node, Tree};

use crate::*;

fn parsed(source: &str) -> Tree {
    parse_java(source).expect("fixture must parse")
}

fn range_of(source: &str, snippet: &str) -> TextRange {
    let start = source.find(snippet).expect("snippet present in fixture");
    TextRange::new(start, start + snippet.len())
}

fn find<'tree>(source: &str, tree: &'tree Tree, snippet: &str) -> Node<'tree> {
    node_spanning(tree.root_node(), range_of(source, snippet)).expect("snippet must span a node")
}

#[test]
fn classify_folds_grammar_kinds() {
    let source = "class A { void m(int p) { int x = 1 + 2; } }\n";
    let tree = parsed(source);
    assert_eq!(classify(tree.root_node()), NodeClass::File);
    assert_eq!(classify(find(source, &tree, "{ int x = 1 + 2; }")), NodeClass::StatementList);
    assert_eq!(classify(find(source, &tree, "(int p)")), NodeClass::FormalParameters);
    assert_eq!(
        classify(find(source, &tree, "void m(int p) { int x = 1 + 2; }")),
        NodeClass::Method
    );
    assert_eq!(
        classify(find(source, &tree, "class A { void m(int p) { int x = 1 + 2; } }")),
        NodeClass::TypeDeclaration
    );
    assert_eq!(classify(find(source, &tree, "1 + 2")), NodeClass::Expression);
}

#[test]
fn error_recovered_trees_are_rejected() {
    assert_eq!(parse_java("class A { void m( { }").err(), Some(ParseError::Java));
    assert!(parse_java("class A { void m() { } }").is_ok());
}

#[test]
fn declared_names_are_not_expressions() {
    let source = "class A { void m() { int x = y; } }";
    let tree = parsed(source);
    assert!(!is_expression(find(source, &tree, "x")));
    assert!(is_expression(find(source, &tree, "y")));
}

#[test]
fn parent_of_class_stops_at_file_root() {
    let source = "class A { void m() { int x = 1; } }";
    let tree = parsed(source);
    let expr = find(source, &tree, "1");
    let block = parent_of_class(expr, NodeClass::StatementList).expect("block");
    assert_eq!(classify(block), NodeClass::StatementList);
    let class = find(source, &tree, source);
    assert_eq!(parent_of_class(class, NodeClass::StatementList), None);
}

#[test]
fn find_children_range_swallows_trailing_terminator() {
    let source = "class A { void m() { f(1); } }";
    let tree = parsed(source);
    let statement = find(source, &tree, "f(1);");
    let call = range_of(source, "f(1)");
    let run = find_children_range(statement, call.start, call.end - 1);
    let kinds: Vec<&str> = run.iter().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec!["method_invocation", ";"]);
}

#[test]
fn skip_insignificant_steps_over_comments() {
    let source = "class A { void m() { f(1) /* note */ ; } }";
    let tree = parsed(source);
    let call = find(source, &tree, "f(1)");
    let next = skip_insignificant(call, Direction::Forward).expect("terminator");
    assert_eq!(next.kind(), ";");
    let back = skip_insignificant(next, Direction::Backward).expect("call");
    assert_eq!(back.id(), call.id());
}

#[test]
fn tokens_equal_ignores_whitespace_not_content() {
    let source = r#"class A { void m() { int p = x + 1; int q = x+1; int r = x - 1; String s = "a b"; String t = "ab"; } }"#;
    let tree = parsed(source);
    let spaced = find(source, &tree, "x + 1");
    let tight = find(source, &tree, "x+1");
    let minus = find(source, &tree, "x - 1");
    assert!(tokens_equal(source, spaced, tight));
    assert!(!tokens_equal(source, spaced, minus));

    let ab_spaced = find(source, &tree, "\"a b\"");
    let ab_tight = find(source, &tree, "\"ab\"");
    assert!(!tokens_equal(source, ab_spaced, ab_tight));
}

#[test]
fn initializer_text_collapses_line_breaks() {
    let source = "class A { void m() { int x = foo(1,\n            2); } }";
    let tree = parsed(source);
    let call = find(source, &tree, "foo(1,\n            2)");
    assert_eq!(initializer_text(source, call), "foo(1, 2)");
}

#[test]
fn initializer_text_keeps_single_line_gaps() {
    let source = "class A { void m() { int x = a  +  b; } }";
    let tree = parsed(source);
    let expr = find(source, &tree, "a  +  b");
    assert_eq!(initializer_text(source, expr), "a  +  b");
}

#[test]
fn expression_ancestors_are_innermost_first_without_paren_wrappers() {
    let source = "class A { void m() { int x = a + (b * c); } }";
    let tree = parsed(source);
    let b = find(source, &tree, "b");
    let texts: Vec<&str> = expression_ancestors(b)
        .iter()
        .map(|n| &source[n.start_byte()..n.end_byte()])
        .collect();
    assert_eq!(texts, vec!["b", "b * c", "a + (b * c)"]);
}

#[test]
fn line_and_indent_helpers() {
    let source = "class A {\n    void m() {\n        f();\n    }\n}\n";
    let offset = source.find("f();").unwrap();
    assert_eq!(&source[line_bounds(source, offset).start..line_bounds(source, offset).end], "        f();");
    assert_eq!(indentation_at(source, offset), "        ");

    let range = range_of(source, "  void m()");
    let trimmed = trim_whitespace(source, range);
    assert_eq!(&source[trimmed.start..trimmed.end], "void m()");
}

use tree_sitter::Node;

/// Derive candidate variable names from the shape of an expression.
///
/// The list is ordered best-first and never empty; `"x"` is the fallback when
/// nothing about the expression suggests a name.
pub fn suggest_names(source: &str, expr: Node) -> Vec<String> {
    let mut out = Vec::new();
    match expr.kind() {
        "identifier" => {
            push_camel_variants(node_text(source, expr), &mut out);
        }
        "field_access" => {
            if let Some(field) = expr.child_by_field_name("field") {
                push_camel_variants(node_text(source, field), &mut out);
            }
        }
        "method_invocation" => {
            if let Some(name) = expr.child_by_field_name("name") {
                let name = node_text(source, name);
                let stripped = strip_accessor_prefix(name);
                push_camel_variants(stripped, &mut out);
                if stripped != name {
                    push_camel_variants(name, &mut out);
                }
            }
        }
        "object_creation_expression" => {
            if let Some(ty) = expr.child_by_field_name("type") {
                push_camel_variants(node_text(source, ty), &mut out);
            }
        }
        "string_literal" => out.push("text".to_string()),
        "character_literal" => out.push("ch".to_string()),
        "decimal_integer_literal"
        | "hex_integer_literal"
        | "octal_integer_literal"
        | "binary_integer_literal"
        | "decimal_floating_point_literal"
        | "hex_floating_point_literal" => out.push("value".to_string()),
        "parenthesized_expression" => {
            if let Some(inner) = expr.named_child(0) {
                return suggest_names(source, inner);
            }
        }
        _ => {}
    }

    let mut seen = Vec::new();
    for raw in out {
        let name = sanitize(&raw);
        if !name.is_empty() && !seen.contains(&name) {
            seen.push(name);
        }
    }
    if seen.is_empty() {
        seen.push("x".to_string());
    }
    seen
}

fn node_text<'a>(source: &'a str, node: Node) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn strip_accessor_prefix(name: &str) -> &str {
    for prefix in ["get", "is"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            if rest.chars().next().map_or(false, |c| c.is_ascii_uppercase()) {
                return rest;
            }
        }
    }
    name
}

/// `fooBarBaz` contributes `baz`, `barBaz`, and `fooBarBaz`, shortest first.
fn push_camel_variants(name: &str, out: &mut Vec<String>) {
    let words = split_camel(name);
    if words.is_empty() {
        return;
    }
    for start in (0..words.len()).rev() {
        out.push(join_camel(&words[start..]));
    }
}

fn split_camel(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn join_camel(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

fn sanitize(name: &str) -> String {
    let mut out: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if out.chars().next().map_or(false, |c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if is_java_keyword(&out) {
        out.push('_');
    }
    out
}

fn is_java_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "abstract" | "assert" | "boolean" | "break" | "byte" | "case" | "catch" | "char"
            | "class" | "const" | "continue" | "default" | "do" | "double" | "else" | "enum"
            | "extends" | "final" | "finally" | "float" | "for" | "goto" | "if" | "implements"
            | "import" | "instanceof" | "int" | "interface" | "long" | "native" | "new"
            | "package" | "private" | "protected" | "public" | "return" | "short" | "static"
            | "strictfp" | "super" | "switch" | "synchronized" | "this" | "throw" | "throws"
            | "transient" | "try" | "var" | "void" | "volatile" | "while"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_syntax::{node_spanning, parse_java};
    use arbor_core::TextRange;

    fn suggestions_for(source: &str, snippet: &str) -> Vec<String> {
        let tree = parse_java(source).unwrap();
        let start = source.find(snippet).unwrap();
        let node = node_spanning(
            tree.root_node(),
            TextRange::new(start, start + snippet.len()),
        )
        .unwrap();
        suggest_names(source, node)
    }

    #[test]
    fn getter_call_suggests_camel_tails() {
        let source = "class A { void m() { Object o = row.getColumnWidth(); } }";
        assert_eq!(
            suggestions_for(source, "row.getColumnWidth()"),
            vec!["width", "columnWidth", "getColumnWidth"]
        );
    }

    #[test]
    fn literal_kinds_have_defaults() {
        let source = "class A { void m() { Object o = \"hi\"; int i = 42; } }";
        assert_eq!(suggestions_for(source, "\"hi\""), vec!["text"]);
        assert_eq!(suggestions_for(source, "42"), vec!["value"]);
    }

    #[test]
    fn keyword_and_digit_collisions_are_sanitized() {
        let source = "class A { void m() { Object o = obj.getClass(); } }";
        let names = suggestions_for(source, "obj.getClass()");
        assert_eq!(names[0], "class_");
    }

    #[test]
    fn shapeless_expression_falls_back() {
        let source = "class A { void m() { int i = a + b; } }";
        assert_eq!(suggestions_for(source, "a + b"), vec!["x"]);
    }
}

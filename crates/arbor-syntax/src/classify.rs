use tree_sitter::Node;

/// Closed classification of the node kinds the engine cares about.
///
/// The grammar's kind strings are folded into this fixed set once, so the
/// rest of the engine can match exhaustively instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    /// An expression eligible to be introduced as a variable.
    Expression,
    /// A node whose direct children are statements; the unit of scope for
    /// anchor search.
    StatementList,
    /// A formal parameter list; targets inside one are rejected.
    FormalParameters,
    /// A method, constructor, or initializer body owning a local scope.
    Method,
    /// A class-like declaration (class, interface, enum, record, annotation).
    TypeDeclaration,
    Comment,
    File,
    Other,
}

pub fn classify(node: Node) -> NodeClass {
    match node.kind() {
        "program" => NodeClass::File,
        "block" | "constructor_body" | "switch_block_statement_group" => NodeClass::StatementList,
        "formal_parameters" | "inferred_parameters" => NodeClass::FormalParameters,
        "method_declaration"
        | "constructor_declaration"
        | "compact_constructor_declaration"
        | "static_initializer" => NodeClass::Method,
        "class_declaration"
        | "interface_declaration"
        | "enum_declaration"
        | "record_declaration"
        | "annotation_type_declaration" => NodeClass::TypeDeclaration,
        "comment" | "line_comment" | "block_comment" => NodeClass::Comment,
        kind if is_expression_kind(kind) => NodeClass::Expression,
        _ => NodeClass::Other,
    }
}

/// Nodes that bound the occurrence-search context.
pub fn is_scope_owner(class: NodeClass) -> bool {
    matches!(class, NodeClass::Method | NodeClass::TypeDeclaration)
}

fn is_expression_kind(kind: &str) -> bool {
    kind.ends_with("_expression")
        || matches!(
            kind,
            "identifier"
                | "field_access"
                | "array_access"
                | "method_invocation"
                | "method_reference"
                | "string_literal"
                | "character_literal"
                | "decimal_integer_literal"
                | "hex_integer_literal"
                | "octal_integer_literal"
                | "binary_integer_literal"
                | "decimal_floating_point_literal"
                | "hex_floating_point_literal"
                | "true"
                | "false"
                | "null_literal"
                | "class_literal"
                | "this"
                | "super"
        )
}

/// Whether `node` is an expression in expression position.
///
/// Identifiers serving as declared names (variable declarators, method and
/// type names, field selectors) share the `identifier` kind with real
/// expressions and must not be offered as targets or counted as occurrences.
pub fn is_expression(node: Node) -> bool {
    if classify(node) != NodeClass::Expression {
        return false;
    }
    if node.kind() != "identifier" {
        return true;
    }
    let Some(parent) = node.parent() else {
        return true;
    };
    for field in ["name", "field"] {
        if parent
            .child_by_field_name(field)
            .map_or(false, |n| n.id() == node.id())
        {
            return false;
        }
    }
    !matches!(
        parent.kind(),
        "package_declaration" | "import_declaration" | "scoped_identifier" | "type_parameter"
    )
}

use thiserror::Error;
use tree_sitter::{Parser, Tree};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to parse Java source")]
    Java,
}

pub fn parse_java(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_java::language())
        .map_err(|_| ParseError::Java)?;
    let tree = parser.parse(source, None).ok_or(ParseError::Java)?;
    // tree-sitter recovers into ERROR/MISSING nodes rather than failing;
    // a tree carrying them is unusable for rewriting.
    if tree.root_node().has_error() {
        return Err(ParseError::Java);
    }
    Ok(tree)
}

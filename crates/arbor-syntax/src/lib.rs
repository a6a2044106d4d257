//! Read-only syntax-tree facade for Arbor.
//!
//! Everything the refactoring engine knows about Java source goes through
//! this crate: parsing, the closed [`NodeClass`] classification, ancestor and
//! sibling navigation, and the text-level helpers (token equality, the
//! normalized initializer renderer, line and indentation lookup). All queries
//! are total; a missing result is `None`, never a panic.

mod classify;
mod navigate;
mod parse;
mod text;

#[cfg(test)]
mod tests;

pub use classify::{classify, is_expression, is_scope_owner, NodeClass};
pub use navigate::{
    expression_ancestors, find_children_range, node_covering, node_spanning, parent_of_class,
    skip_insignificant, Direction,
};
pub use parse::{parse_java, ParseError};
pub use text::{
    indentation_at, initializer_text, line_bounds, node_range, tokens_equal, trim_whitespace,
};

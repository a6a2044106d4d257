//! Core shared types for Arbor.
//!
//! This crate is intentionally small: identifiers for source files, byte
//! ranges, and the transactional text-edit model every refactoring produces.

mod edit;
mod text;

pub use edit::{apply_text_edits, apply_workspace_edit, EditError, TextEdit, WorkspaceEdit};
pub use text::{FileId, TextRange};

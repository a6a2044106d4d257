//! Refactoring entrypoints for Arbor.
//!
//! Today this crate exposes one refactoring: Introduce Variable
//! ([`IntroduceSession`]). The session is a suspend/resume state machine so
//! that target choice, scope choice, and naming can be answered by any UI (or
//! by a test feeding synthetic events) without the engine blocking on one.

mod anchor;
mod introduce;
mod occurrences;
mod selection;
mod suggest;

pub use anchor::find_anchor;
pub use introduce::{
    Candidate, Event, IntroduceError, IntroduceMode, IntroduceOperation, IntroduceOutcome,
    IntroduceParams, IntroduceSession, ReplaceChoice, Step,
};
pub use occurrences::collect_occurrences;
pub use selection::{resolve_target, ResolvedTarget};
pub use suggest::suggest_names;

pub use arbor_core::{
    apply_text_edits, apply_workspace_edit, EditError, FileId, TextEdit, TextRange, WorkspaceEdit,
};

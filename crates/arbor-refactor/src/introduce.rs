use serde::{Deserialize, Serialize};
use thiserror::Error;
use tree_sitter::{Node, Tree};

use arbor_core::{EditError, FileId, TextEdit, TextRange, WorkspaceEdit};
use arbor_syntax::{indentation_at, initializer_text, node_range, node_spanning, parse_java};

use crate::anchor::find_anchor;
use crate::occurrences::collect_occurrences;
use crate::selection::{check_context, resolve_target, ResolvedTarget};
use crate::suggest::suggest_names;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntroduceError {
    #[error("failed to parse Java source")]
    Parse,
    #[error("cannot perform refactoring: no valid target expression")]
    NoValidTarget,
    #[error("cannot perform refactoring: target is outside any statement list")]
    NoOccurrenceContext,
    #[error("cannot perform refactoring: source file is read-only")]
    ReadOnlySource,
    #[error("refactoring session has already finished")]
    SessionFinished,
    #[error("event does not match the pending prompt")]
    UnexpectedEvent,
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// How the user names the new variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntroduceMode {
    /// Live-edited placeholder at the edit site; name confirmed in place.
    Inline,
    /// Modal prompt collecting name and replace-all choice together.
    Dialog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroduceParams {
    pub file: FileId,
    pub source: String,
    /// Explicit selection, if the user dragged one. An empty range is
    /// treated as no selection.
    pub selection: Option<TextRange>,
    pub caret: usize,
    pub mode: IntroduceMode,
    pub read_only: bool,
}

impl IntroduceParams {
    pub fn at_caret(file: FileId, source: impl Into<String>, caret: usize, mode: IntroduceMode) -> Self {
        Self {
            file,
            source: source.into(),
            selection: None,
            caret,
            mode,
            read_only: false,
        }
    }

    pub fn with_selection(
        file: FileId,
        source: impl Into<String>,
        selection: TextRange,
        mode: IntroduceMode,
    ) -> Self {
        Self {
            file,
            source: source.into(),
            selection: Some(selection),
            caret: selection.start,
            mode,
            read_only: false,
        }
    }
}

/// The mutable record threading one invocation end-to-end.
///
/// Once occurrences are collected they all render to the same token stream
/// as the target; the ranges go stale the moment the rewrite is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroduceOperation {
    pub target: Option<TextRange>,
    pub occurrences: Vec<TextRange>,
    pub suggested_names: Vec<String>,
    pub name: Option<String>,
    pub replace_all: Option<bool>,
}

/// A nested-expression choice offered when the caret is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub range: TextRange,
    pub text: String,
}

/// One occurrence-scope answer, mirroring an occurrences chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplaceChoice {
    All,
    Single,
}

/// What the session needs next.
///
/// Every variant except `Committed` and `Cancelled` is a suspension point:
/// the session waits for the matching [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Several nested expressions contain the caret, innermost first.
    ChooseTarget { candidates: Vec<Candidate> },
    /// Duplicates were found; replace all of them or just the target?
    ChooseScope { occurrences: Vec<TextRange> },
    /// Inline naming: a placeholder seeded with the first suggestion.
    NameInline {
        seeded: String,
        suggestions: Vec<String>,
        target: TextRange,
    },
    /// Dialog naming: name and replace-all collected together.
    NameDialog {
        suggestions: Vec<String>,
        occurrence_count: usize,
    },
    Committed(IntroduceOutcome),
    Cancelled,
}

/// A user decision resuming a suspended session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Index into the candidate list of `Step::ChooseTarget`.
    TargetChosen(usize),
    ScopeChosen(ReplaceChoice),
    /// Inline naming confirmed with the final name.
    NameChosen(String),
    DialogConfirmed { name: String, replace_all: bool },
    Cancel,
}

/// The rewrite produced by a committed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroduceOutcome {
    pub edit: WorkspaceEdit,
    pub name: String,
    /// Range of the inserted declaration in the rewritten text.
    pub declaration: TextRange,
    /// Replaced ranges in the pre-rewrite text, in document order.
    pub replaced: Vec<TextRange>,
    /// Caret after the rewrite: end of the declaration (dialog mode) or the
    /// original start of the occurrence under the caret (inline mode).
    pub caret: usize,
}

enum State {
    AwaitingTarget { candidates: Vec<TextRange> },
    AwaitingScope,
    AwaitingInlineName,
    AwaitingDialog,
    Finished,
}

/// One Introduce Variable invocation, driven by discrete resume events.
///
/// ```
/// # use arbor_refactor::{Event, FileId, IntroduceMode, IntroduceParams, IntroduceSession, Step, TextRange};
/// let source = "class A { void m() { f(1 + 2); } }";
/// let params = IntroduceParams::with_selection(
///     FileId::new("A.java"),
///     source,
///     TextRange::new(23, 28), // `1 + 2`
///     IntroduceMode::Dialog,
/// );
/// let (mut session, step) = IntroduceSession::start(params)?;
/// let Step::NameDialog { suggestions, .. } = step else { panic!() };
/// let step = session.resume(Event::DialogConfirmed {
///     name: suggestions[0].clone(),
///     replace_all: false,
/// })?;
/// assert!(matches!(step, Step::Committed(_)));
/// # Ok::<(), arbor_refactor::IntroduceError>(())
/// ```
pub struct IntroduceSession {
    params: IntroduceParams,
    tree: Tree,
    op: IntroduceOperation,
    state: State,
}

impl IntroduceSession {
    /// Resolve the target and run to the first suspension point.
    pub fn start(params: IntroduceParams) -> Result<(Self, Step), IntroduceError> {
        if params.read_only {
            return Err(IntroduceError::ReadOnlySource);
        }
        let tree = parse_java(&params.source).map_err(|_| IntroduceError::Parse)?;

        let mut session = Self {
            params,
            tree,
            op: IntroduceOperation::default(),
            state: State::Finished,
        };

        // Nodes borrow the tree, so reduce the resolution to owned ranges
        // before the session is touched again.
        let resolved = {
            match resolve_target(
                &session.params.source,
                session.tree.root_node(),
                session.params.selection,
                session.params.caret,
            )? {
                ResolvedTarget::Target(target) => Ok(node_range(target)),
                ResolvedTarget::Candidates(candidates) => Err(candidates
                    .into_iter()
                    .map(|n| Candidate {
                        range: node_range(n),
                        text: session.params.source[n.start_byte()..n.end_byte()].to_string(),
                    })
                    .collect::<Vec<_>>()),
            }
        };
        let step = match resolved {
            Ok(range) => session.accept_target(range)?,
            Err(candidates) => {
                tracing::debug!(count = candidates.len(), "target is ambiguous");
                session.state = State::AwaitingTarget {
                    candidates: candidates.iter().map(|c| c.range).collect(),
                };
                Step::ChooseTarget { candidates }
            }
        };
        Ok((session, step))
    }

    /// Feed one user decision into the session.
    pub fn resume(&mut self, event: Event) -> Result<Step, IntroduceError> {
        if matches!(event, Event::Cancel) {
            if matches!(self.state, State::Finished) {
                return Err(IntroduceError::SessionFinished);
            }
            self.state = State::Finished;
            return Ok(Step::Cancelled);
        }

        match std::mem::replace(&mut self.state, State::Finished) {
            State::AwaitingTarget { candidates } => {
                let Event::TargetChosen(index) = event else {
                    self.state = State::AwaitingTarget { candidates };
                    return Err(IntroduceError::UnexpectedEvent);
                };
                let Some(range) = candidates.get(index).copied() else {
                    self.state = State::AwaitingTarget { candidates };
                    return Err(IntroduceError::UnexpectedEvent);
                };
                self.accept_target(range)
            }
            State::AwaitingScope => {
                let Event::ScopeChosen(choice) = event else {
                    self.state = State::AwaitingScope;
                    return Err(IntroduceError::UnexpectedEvent);
                };
                self.op.replace_all = Some(choice == ReplaceChoice::All);
                self.suspend_inline_name()
            }
            State::AwaitingInlineName => {
                let Event::NameChosen(name) = event else {
                    self.state = State::AwaitingInlineName;
                    return Err(IntroduceError::UnexpectedEvent);
                };
                if name.trim().is_empty() {
                    // Keep waiting; the placeholder cannot commit empty.
                    return self.suspend_inline_name();
                }
                self.op.name = Some(name);
                self.rewrite()
            }
            State::AwaitingDialog => {
                let Event::DialogConfirmed { name, replace_all } = event else {
                    self.state = State::AwaitingDialog;
                    return Err(IntroduceError::UnexpectedEvent);
                };
                if name.trim().is_empty() {
                    self.state = State::AwaitingDialog;
                    return Ok(self.dialog_step());
                }
                self.op.name = Some(name);
                if self.op.replace_all.is_none() {
                    self.op.replace_all = Some(replace_all);
                }
                self.rewrite()
            }
            State::Finished => Err(IntroduceError::SessionFinished),
        }
    }

    pub fn operation(&self) -> &IntroduceOperation {
        &self.op
    }

    /// Target is known: collect occurrences, derive names, pick the next
    /// suspension for the interaction mode.
    fn accept_target(&mut self, range: TextRange) -> Result<Step, IntroduceError> {
        let (occurrences, suggested_names) = {
            let target = self.target_node(range)?;
            check_context(target)?;
            (
                collect_occurrences(&self.params.source, target),
                suggest_names(&self.params.source, target),
            )
        };
        self.op.target = Some(range);
        self.op.occurrences = occurrences;
        self.op.suggested_names = suggested_names;
        if self.op.occurrences.is_empty() {
            self.op.replace_all = Some(false);
        }
        tracing::debug!(
            expr = %&self.params.source[range.start..range.end],
            occurrences = self.op.occurrences.len(),
            "target resolved"
        );

        match self.params.mode {
            IntroduceMode::Inline => {
                if self.op.replace_all.is_none() {
                    self.state = State::AwaitingScope;
                    Ok(Step::ChooseScope {
                        occurrences: self.op.occurrences.clone(),
                    })
                } else {
                    self.suspend_inline_name()
                }
            }
            IntroduceMode::Dialog => {
                self.state = State::AwaitingDialog;
                Ok(self.dialog_step())
            }
        }
    }

    fn dialog_step(&self) -> Step {
        Step::NameDialog {
            suggestions: self.op.suggested_names.clone(),
            occurrence_count: self.op.occurrences.len(),
        }
    }

    fn suspend_inline_name(&mut self) -> Result<Step, IntroduceError> {
        let target = self.op.target.ok_or(IntroduceError::NoValidTarget)?;
        let seeded = self
            .op
            .suggested_names
            .first()
            .cloned()
            .unwrap_or_else(|| "x".to_string());
        self.state = State::AwaitingInlineName;
        Ok(Step::NameInline {
            seeded,
            suggestions: self.op.suggested_names.clone(),
            target,
        })
    }

    /// Build the atomic edit set: one declaration insertion plus the
    /// occurrence replacements.
    fn rewrite(&mut self) -> Result<Step, IntroduceError> {
        let source = &self.params.source;
        let target = self.op.target.ok_or(IntroduceError::NoValidTarget)?;
        let name = self.op.name.clone().ok_or(IntroduceError::NoValidTarget)?;
        let replace_all = self.op.replace_all.unwrap_or(false);

        let replaced: Vec<TextRange> = if replace_all && !self.op.occurrences.is_empty() {
            self.op.occurrences.clone()
        } else {
            vec![target]
        };

        let root = self.tree.root_node();
        let anchor = find_anchor(root, &replaced).ok_or(IntroduceError::NoOccurrenceContext)?;
        let insert_at = anchor.start_byte();

        let target_node = self.target_node(target)?;
        let mut declaration = format!("var {} = {}", name, initializer_text(source, target_node));
        if !declaration.ends_with(';') {
            declaration.push(';');
        }
        let indent = indentation_at(source, insert_at);
        tracing::debug!(%declaration, insert_at, replaced = replaced.len(), "rewriting");

        let mut edits = vec![TextEdit::insert(
            self.params.file.clone(),
            insert_at,
            format!("{declaration}\n{indent}"),
        )];
        for range in &replaced {
            edits.push(TextEdit::replace(self.params.file.clone(), *range, name.clone()));
        }
        let mut edit = WorkspaceEdit::new(edits);
        edit.normalize()?;

        let caret = match self.params.mode {
            IntroduceMode::Dialog => insert_at + declaration.len(),
            IntroduceMode::Inline => replaced
                .iter()
                .find(|r| r.contains(self.params.caret) || r.start == self.params.caret)
                .unwrap_or(&replaced[0])
                .start,
        };

        self.state = State::Finished;
        Ok(Step::Committed(IntroduceOutcome {
            edit,
            name,
            declaration: TextRange::new(insert_at, insert_at + declaration.len()),
            replaced,
            caret,
        }))
    }

    fn target_node(&self, range: TextRange) -> Result<Node<'_>, IntroduceError> {
        node_spanning(self.tree.root_node(), range).ok_or(IntroduceError::NoValidTarget)
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::{FileId, TextRange};

/// A single file edit: replace `range` with `replacement`.
///
/// An empty `range` is an insertion; an empty `replacement` is a deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub file: FileId,
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(file: FileId, offset: usize, text: impl Into<String>) -> Self {
        Self {
            file,
            range: TextRange::empty(offset),
            replacement: text.into(),
        }
    }

    pub fn replace(file: FileId, range: TextRange, text: impl Into<String>) -> Self {
        Self {
            file,
            range,
            replacement: text.into(),
        }
    }
}

/// The full set of edits produced by one refactoring invocation.
///
/// A `WorkspaceEdit` is the unit of atomicity: callers either apply the whole
/// normalized set or none of it. `normalize` must succeed before the edits
/// are handed to an editor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub edits: Vec<TextEdit>,
}

impl WorkspaceEdit {
    pub fn new(edits: Vec<TextEdit>) -> Self {
        Self { edits }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Sort, deduplicate, and validate that no two edits overlap.
    ///
    /// Insertions at the same offset are merged in order; identical edits are
    /// dropped. Any genuine overlap is an error and the edit set must be
    /// discarded by the caller.
    pub fn normalize(&mut self) -> Result<(), EditError> {
        self.edits.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.range.start.cmp(&b.range.start))
                .then_with(|| a.range.end.cmp(&b.range.end))
                .then_with(|| a.replacement.cmp(&b.replacement))
        });
        self.edits
            .dedup_by(|a, b| a.file == b.file && a.range == b.range && a.replacement == b.replacement);

        let mut merged: Vec<TextEdit> = Vec::with_capacity(self.edits.len());
        for edit in self.edits.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.file == edit.file && last.range == edit.range && last.range.is_empty() {
                    last.replacement.push_str(&edit.replacement);
                    continue;
                }
                if last.file == edit.file && last.range == edit.range {
                    return Err(EditError::OverlappingEdits {
                        file: edit.file,
                        first: last.range,
                        second: edit.range,
                    });
                }
            }
            merged.push(edit);
        }
        self.edits = merged;

        let mut prev: Option<(&FileId, TextRange)> = None;
        for edit in &self.edits {
            if let Some((file, range)) = prev {
                if file == &edit.file && edit.range.start < range.end {
                    return Err(EditError::OverlappingEdits {
                        file: edit.file.clone(),
                        first: range,
                        second: edit.range,
                    });
                }
            }
            prev = Some((&edit.file, edit.range));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("overlapping edits in {file:?}: {first:?} overlaps {second:?}")]
    OverlappingEdits {
        file: FileId,
        first: TextRange,
        second: TextRange,
    },
    #[error("text edit range {range:?} is outside the file bounds (len={len}) in {file:?}")]
    OutOfBounds {
        file: FileId,
        range: TextRange,
        len: usize,
    },
    #[error("edit refers to unknown file {0:?}")]
    UnknownFile(FileId),
}

/// Apply non-overlapping edits to `original` and return the modified text.
pub fn apply_text_edits(original: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(original.to_string());
    }

    // Apply back-to-front so earlier offsets stay valid. At equal start
    // offsets the longer (replacing) edit goes first, which places an
    // insertion at that offset before the replaced text.
    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then_with(|| b.range.end.cmp(&a.range.end))
    });

    let mut out = original.to_string();
    for edit in sorted {
        if edit.range.end > out.len() {
            return Err(EditError::OutOfBounds {
                file: edit.file,
                range: edit.range,
                len: out.len(),
            });
        }
        out.replace_range(edit.range.start..edit.range.end, &edit.replacement);
    }
    Ok(out)
}

/// Apply a workspace edit to a set of in-memory files.
pub fn apply_workspace_edit(
    files: &BTreeMap<FileId, String>,
    edit: &WorkspaceEdit,
) -> Result<BTreeMap<FileId, String>, EditError> {
    let mut by_file: BTreeMap<&FileId, Vec<&TextEdit>> = BTreeMap::new();
    for text_edit in &edit.edits {
        by_file.entry(&text_edit.file).or_default().push(text_edit);
    }

    let mut out = files.clone();
    for (file, edits) in by_file {
        let original = out
            .get(file)
            .ok_or_else(|| EditError::UnknownFile(file.clone()))?;
        let owned: Vec<TextEdit> = edits.into_iter().cloned().collect();
        let updated = apply_text_edits(original, &owned)?;
        out.insert(file.clone(), updated);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file() -> FileId {
        FileId::new("A.java")
    }

    #[test]
    fn apply_replaces_back_to_front() {
        let edits = vec![
            TextEdit::replace(file(), TextRange::new(0, 3), "x"),
            TextEdit::replace(file(), TextRange::new(4, 7), "y"),
        ];
        assert_eq!(apply_text_edits("abc def", &edits).unwrap(), "x y");
    }

    #[test]
    fn insertion_at_replacement_start_lands_before_it() {
        let edits = vec![
            TextEdit::insert(file(), 0, "pre "),
            TextEdit::replace(file(), TextRange::new(0, 3), "x"),
        ];
        assert_eq!(apply_text_edits("abc", &edits).unwrap(), "pre x");
    }

    #[test]
    fn normalize_rejects_overlap() {
        let mut edit = WorkspaceEdit::new(vec![
            TextEdit::replace(file(), TextRange::new(0, 4), "x"),
            TextEdit::replace(file(), TextRange::new(2, 6), "y"),
        ]);
        assert!(matches!(
            edit.normalize(),
            Err(EditError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn normalize_merges_inserts_and_drops_duplicates() {
        let mut edit = WorkspaceEdit::new(vec![
            TextEdit::insert(file(), 1, "b"),
            TextEdit::insert(file(), 1, "a"),
            TextEdit::replace(file(), TextRange::new(2, 3), "z"),
            TextEdit::replace(file(), TextRange::new(2, 3), "z"),
        ]);
        edit.normalize().unwrap();
        assert_eq!(edit.edits.len(), 2);
        assert_eq!(edit.edits[0].replacement, "ab");
    }

    #[test]
    fn apply_workspace_edit_is_all_or_nothing_per_input() {
        let mut files = BTreeMap::new();
        files.insert(file(), "hello".to_string());
        let edit = WorkspaceEdit::new(vec![TextEdit::replace(
            FileId::new("missing.java"),
            TextRange::new(0, 1),
            "x",
        )]);
        assert!(matches!(
            apply_workspace_edit(&files, &edit),
            Err(EditError::UnknownFile(_))
        ));
    }

    #[test]
    fn text_edit_serializes() {
        let edit = TextEdit::replace(file(), TextRange::new(1, 2), "x");
        let json = serde_json::to_string(&edit).unwrap();
        let back: TextEdit = serde_json::from_str(&json).unwrap();
        assert_eq!(edit, back);
    }
}

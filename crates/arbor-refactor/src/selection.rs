use arbor_core::TextRange;
use arbor_syntax::{
    classify, expression_ancestors, find_children_range, is_expression, line_bounds,
    node_covering, node_spanning, parent_of_class, trim_whitespace, NodeClass,
};
use tree_sitter::Node;

use crate::introduce::IntroduceError;

/// Result of resolving an editor position to a target expression.
#[derive(Debug)]
pub enum ResolvedTarget<'tree> {
    Target(Node<'tree>),
    /// Several nested expressions contain the caret; the caller must pick
    /// one. Ordered innermost first.
    Candidates(Vec<Node<'tree>>),
}

/// Turn a selection or caret position into a target expression.
///
/// Modes, tried in order: an explicit non-empty selection; a caret with
/// exactly one enclosing expression; a caret with several (suspends on a
/// choice); and finally the caret's whole line treated as a selection.
pub fn resolve_target<'tree>(
    source: &str,
    root: Node<'tree>,
    selection: Option<TextRange>,
    caret: usize,
) -> Result<ResolvedTarget<'tree>, IntroduceError> {
    if let Some(range) = selection.filter(|r| !r.is_empty()) {
        let target = resolve_range(source, root, range).ok_or(IntroduceError::NoValidTarget)?;
        check_context(target)?;
        return Ok(ResolvedTarget::Target(target));
    }

    let caret = caret.min(source.len());
    let at_caret = node_covering(root, TextRange::empty(caret)).ok_or(IntroduceError::NoValidTarget)?;
    check_context(at_caret)?;

    let candidates = expression_ancestors(at_caret);
    match candidates.len() {
        1 => Ok(ResolvedTarget::Target(candidates[0])),
        0 => {
            let line = line_bounds(source, caret);
            let target =
                resolve_range(source, root, line).ok_or(IntroduceError::NoValidTarget)?;
            check_context(target)?;
            Ok(ResolvedTarget::Target(target))
        }
        _ => Ok(ResolvedTarget::Candidates(candidates)),
    }
}

/// Targets inside a formal parameter list cannot be introduced.
pub(crate) fn check_context(node: Node) -> Result<(), IntroduceError> {
    if classify(node) == NodeClass::FormalParameters
        || parent_of_class(node, NodeClass::FormalParameters).is_some()
    {
        return Err(IntroduceError::NoValidTarget);
    }
    Ok(())
}

/// The maximal expression spanning exactly `range`, once surrounding
/// whitespace and a trailing statement terminator are peeled off.
fn resolve_range<'tree>(source: &str, root: Node<'tree>, range: TextRange) -> Option<Node<'tree>> {
    let trimmed = peel(source, range)?;

    if let Some(node) = node_spanning(root, trimmed) {
        if let Some(expr) = outermost_expression_at(node, trimmed) {
            return Some(expr);
        }
    }

    // A selection covering whole statements (the line fallback in
    // particular) lands on a statement list; resolve it through the covered
    // child run when that run is a single expression statement.
    let covering = node_covering(root, trimmed)?;
    if classify(covering) == NodeClass::StatementList {
        let run: Vec<Node<'tree>> = find_children_range(covering, trimmed.start, trimmed.end)
            .into_iter()
            .filter(|n| classify(*n) != NodeClass::Comment)
            .collect();
        if let [statement] = run.as_slice() {
            if statement.kind() == "expression_statement" {
                let expr = statement.named_child(0)?;
                return is_expression(expr).then_some(expr);
            }
        }
    }
    None
}

fn peel(source: &str, range: TextRange) -> Option<TextRange> {
    let mut trimmed = trim_whitespace(source, range);
    if trimmed.is_empty() {
        return None;
    }
    if source[trimmed.start..trimmed.end].ends_with(';') {
        trimmed = trim_whitespace(source, TextRange::new(trimmed.start, trimmed.end - 1));
    }
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

fn outermost_expression_at<'tree>(node: Node<'tree>, range: TextRange) -> Option<Node<'tree>> {
    // `node_spanning` already ascended to the outermost node with this exact
    // range; walk back down through same-range wrappers to an expression.
    let mut current = node;
    loop {
        if is_expression(current) {
            return Some(current);
        }
        let child = current.named_child(0)?;
        if child.start_byte() != range.start || child.end_byte() != range.end {
            return None;
        }
        current = child;
    }
}

//! Reducers for labels, bibliography items and document metadata.

use crate::ast::LatexExpression;
use crate::parser::find_label;
use crate::state::LatexState;

/// Macros whose first argument is stored in the dictionary under their name.
pub const DICTIONARY_MACROS: &[&str] = &["title", "author", "date", "email", "revision"];

/// Key prefix for bibliography entries in the cross-reference table.
pub const BIBITEM_PREFIX: &str = "bibitem:";

/// The label of an environment, if its body opens with `\label{...}`.
///
/// Verbatim bodies are searched for `\label{...}` in the raw text.
pub fn body_label(head: &LatexExpression) -> Option<String> {
    let LatexExpression::Environment { body, .. } = head else {
        return None;
    };
    match body.as_ref() {
        LatexExpression::Str(raw) => find_label(raw).map(str::to_string),
        other => other
            .items()
            .iter()
            .find(|e| matches!(e, LatexExpression::Macro { .. }))
            .filter(|e| matches!(e, LatexExpression::Macro { name, .. } if name == "label"))
            .and_then(|e| e.arg_text(0))
            .map(|l| l.trim().to_string()),
    }
}

pub fn bibitem(head: &LatexExpression, mut state: LatexState) -> LatexState {
    let Some(label) = head.arg_text(0).map(|l| l.trim().to_string()) else {
        return state;
    };
    let shown = head
        .optional_arg_text(0)
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| label.clone());
    state
        .cross_references
        .insert(format!("{}{}", BIBITEM_PREFIX, label), shown);
    state
}

pub fn dictionary_entry(head: &LatexExpression, mut state: LatexState) -> LatexState {
    if let (Some((_, name)), Some(value)) = (head.kind_and_name(), head.arg_text(0)) {
        state.dictionary.insert(name.to_string(), value);
    }
    state
}

/// Collect `mathmacro` definitions for the math renderer prologue.
pub fn math_macros(head: &LatexExpression, mut state: LatexState) -> LatexState {
    let LatexExpression::Environment { body, .. } = head else {
        return state;
    };
    let LatexExpression::Str(definitions) = body.as_ref() else {
        return state;
    };
    let entry = state.dictionary.entry("mathmacro".to_string()).or_default();
    if !entry.is_empty() {
        entry.push('\n');
    }
    entry.push_str(definitions.trim());
    state
}

//! Accumulation of document state across paragraphs.
//!
//! Accumulation is a strict left fold: each paragraph's head construct is
//! looked up in a reducer table keyed by kind and name, and the reducer maps
//! the previous [`LatexState`] to the next one. Unregistered heads leave the
//! state unchanged.

pub mod numbering;
pub mod references;

use crate::ast::{HeadKind, LatexExpression};
use crate::state::{Counters, LatexState};

/// A pure state transition for one paragraph head.
pub type Reducer = fn(&LatexExpression, LatexState) -> LatexState;

/// A paragraph together with the counters in effect once it was accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorated<'a> {
    pub expr: &'a LatexExpression,
    pub counters: Counters,
}

/// Look up the reducer registered for a head construct.
pub fn reducer(kind: HeadKind, name: &str) -> Option<Reducer> {
    match (kind, name) {
        (HeadKind::Macro, "section") => Some(numbering::section),
        (HeadKind::Macro, "subsection") => Some(numbering::subsection),
        (HeadKind::Macro, "subsubsection") => Some(numbering::subsubsection),
        (HeadKind::Macro, "setcounter") => Some(numbering::set_counter),
        (HeadKind::Macro, n) if references::DICTIONARY_MACROS.contains(&n) => {
            Some(references::dictionary_entry)
        }
        (HeadKind::Env, n) if numbering::THEOREM_LIKE.contains(&n) => Some(numbering::theorem),
        (HeadKind::Env, n) if numbering::NUMBERED_EQUATIONS.contains(&n) => {
            Some(numbering::equation)
        }
        (HeadKind::Env, "mathmacro") => Some(references::math_macros),
        (HeadKind::SMacro, "bibitem") => Some(references::bibitem),
        _ => None,
    }
}

/// Apply one paragraph to the state.
pub fn reduce(state: LatexState, paragraph: &LatexExpression) -> LatexState {
    let Some(head) = paragraph.head() else {
        return state;
    };
    let Some((kind, name)) = head.kind_and_name() else {
        return state;
    };
    match reducer(kind, name) {
        Some(reduce_head) => {
            tracing::trace!(
                target: "minilatex::accumulate",
                ?kind,
                name,
                "reducing paragraph head"
            );
            reduce_head(head, state)
        }
        None => state,
    }
}

/// Fold `paragraphs` into `state`, recording the counters after each one.
pub fn accumulate(
    state: LatexState,
    paragraphs: &[LatexExpression],
) -> (LatexState, Vec<Decorated<'_>>) {
    let mut decorated = Vec::with_capacity(paragraphs.len());
    let state = paragraphs.iter().fold(state, |state, expr| {
        let next = reduce(state, expr);
        decorated.push(Decorated {
            expr,
            counters: next.counters,
        });
        next
    });
    (state, decorated)
}

//! Reducers for sections, theorem-like environments and equations.

use crate::accumulator::references::body_label;
use crate::ast::LatexExpression;
use crate::state::{LatexState, TocEntry};

/// Environments that share the theorem counter.
pub const THEOREM_LIKE: &[&str] = &["theorem", "proposition", "lemma", "definition", "corollary"];

/// Environments that take an equation number.
pub const NUMBERED_EQUATIONS: &[&str] = &["equation", "align", "eqnarray"];

fn push_toc(state: &mut LatexState, head: &LatexExpression, label: String, level: u32) {
    state.table_of_contents.push(TocEntry {
        name: head.arg_text(0).unwrap_or_default(),
        label,
        level,
    });
}

pub fn section(head: &LatexExpression, mut state: LatexState) -> LatexState {
    let counters = &mut state.counters;
    counters.s1 += 1;
    counters.s2 = 0;
    counters.s3 = 0;
    let label = counters.s1.to_string();
    push_toc(&mut state, head, label, 1);
    state
}

pub fn subsection(head: &LatexExpression, mut state: LatexState) -> LatexState {
    let counters = &mut state.counters;
    counters.s2 += 1;
    counters.s3 = 0;
    let label = format!("{}.{}", counters.s1, counters.s2);
    push_toc(&mut state, head, label, 2);
    state
}

// The TOC level stays 2 for subsubsections; entries nest under subsections
// only by label.
pub fn subsubsection(head: &LatexExpression, mut state: LatexState) -> LatexState {
    let counters = &mut state.counters;
    counters.s3 += 1;
    let label = format!("{}.{}.{}", counters.s1, counters.s2, counters.s3);
    push_toc(&mut state, head, label, 2);
    state
}

/// `\setcounter{section}{n}`: the next `\section` is numbered `n`.
pub fn set_counter(head: &LatexExpression, mut state: LatexState) -> LatexState {
    if head.arg_text(0).as_deref().map(str::trim) != Some("section") {
        return state;
    }
    let Some(value) = head.arg_text(1).and_then(|v| v.trim().parse::<u32>().ok()) else {
        return state;
    };
    state.counters.s1 = value.saturating_sub(1);
    state.counters.s2 = 0;
    state.counters.s3 = 0;
    state
}

pub fn theorem(head: &LatexExpression, mut state: LatexState) -> LatexState {
    state.counters.tno += 1;
    if let Some(label) = body_label(head) {
        let number = state.counters.within_section(state.counters.tno);
        state.cross_references.insert(label, number);
    }
    state
}

pub fn equation(head: &LatexExpression, mut state: LatexState) -> LatexState {
    state.counters.eqno += 1;
    if let Some(label) = body_label(head) {
        let number = state.counters.within_section(state.counters.eqno);
        state.cross_references.insert(label, number);
    }
    state
}

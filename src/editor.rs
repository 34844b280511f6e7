//! Incremental editing sessions.
//!
//! An [`EditRecord`] holds everything needed to turn the next version of a
//! document into HTML without redoing work for unchanged paragraphs. Records
//! are never mutated; each edit produces a new one.

use crate::accumulator::accumulate;
use crate::ast::LatexExpression;
use crate::config::{Config, StateCarry};
use crate::differ::{diff, differential_ids, differential_render, make_id};
use crate::paragraph::segment;
use crate::parser::parse_paragraphs;
use crate::render::Renderer;
use crate::state::LatexState;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Persisted state of one document between edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecord {
    pub paragraphs: Vec<String>,
    /// One HTML string per paragraph
    pub rendered_paragraphs: Vec<String>,
    pub latex_state: LatexState,
    /// Stable DOM keys, one per paragraph
    pub id_list: Vec<String>,
    /// Ids minted by the last update
    pub new_ids_range: Option<Range<usize>>,
    /// Parse of each paragraph, reused by later updates
    #[serde(skip)]
    pub parsed: Vec<LatexExpression>,
}

impl EditRecord {
    /// Whether the record has never rendered anything.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// The cached parses, or a fresh parse if the cache does not match.
    fn parsed(&self) -> std::borrow::Cow<'_, [LatexExpression]> {
        if self.parsed.len() == self.paragraphs.len() {
            std::borrow::Cow::Borrowed(&self.parsed)
        } else {
            std::borrow::Cow::Owned(parse_paragraphs(&self.paragraphs))
        }
    }
}

/// Produces and updates [`EditRecord`]s.
pub struct Editor {
    renderer: Renderer,
    id_prefix: String,
    state_carry: StateCarry,
}

impl Editor {
    pub fn new(config: &Config) -> Self {
        Self {
            renderer: Renderer::new(&config.render),
            id_prefix: config.editor.id_prefix.clone(),
            state_carry: config.editor.state_carry,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render a whole document from scratch.
    pub fn create(&self, state0: &LatexState, text: &str, seed: u64) -> EditRecord {
        let paragraphs = segment(text);
        let parsed = parse_paragraphs(&paragraphs);
        let (latex_state, decorated) = accumulate(state0.clone(), &parsed);
        let rendered_paragraphs = self.renderer.render_paragraphs(&latex_state, &decorated);
        let id_list = (0..paragraphs.len())
            .map(|index| make_id(&self.id_prefix, seed, index))
            .collect();

        tracing::debug!(
            target: "minilatex::editor",
            paragraphs = paragraphs.len(),
            seed,
            "full render"
        );

        EditRecord {
            paragraphs,
            rendered_paragraphs,
            latex_state,
            id_list,
            new_ids_range: None,
            parsed,
        }
    }

    /// Apply an edit: only paragraphs between the common prefix and suffix
    /// of the old and new text are parsed and rendered again.
    ///
    /// An empty `old` record is rendered from scratch.
    pub fn update(
        &self,
        state0: &LatexState,
        old: &EditRecord,
        text: &str,
        seed: u64,
    ) -> EditRecord {
        if old.is_empty() {
            return self.create(state0, text, seed);
        }

        let paragraphs = segment(text);
        let diff = diff(&old.paragraphs, &paragraphs);
        let changed = diff.changed_range();
        let suffix_len = diff.common_suffix.len();

        let old_parsed = old.parsed();
        let fresh = parse_paragraphs(diff.changed_new);
        let mut parsed = Vec::with_capacity(paragraphs.len());
        parsed.extend_from_slice(&old_parsed[..changed.start]);
        parsed.extend(fresh);
        parsed.extend_from_slice(&old_parsed[old_parsed.len() - suffix_len..]);

        tracing::debug!(
            target: "minilatex::editor",
            prefix = diff.common_prefix.len(),
            changed_old = diff.changed_old.len(),
            changed_new = diff.changed_new.len(),
            suffix = suffix_len,
            strategy = ?self.state_carry,
            "incremental update"
        );

        let (latex_state, rendered_paragraphs) = match self.state_carry {
            StateCarry::Reseed => {
                let (latex_state, decorated) = accumulate(state0.clone(), &parsed);
                let rendered = differential_render(
                    |_| self.renderer.render_paragraphs(&latex_state, &decorated[changed.clone()]),
                    &diff,
                    &old.rendered_paragraphs,
                );
                (latex_state, rendered)
            }
            StateCarry::Fresh => {
                let (latex_state, decorated) = accumulate(state0.clone(), &parsed[changed.clone()]);
                let rendered = differential_render(
                    |_| self.renderer.render_paragraphs(&latex_state, &decorated),
                    &diff,
                    &old.rendered_paragraphs,
                );
                (latex_state, rendered)
            }
        };

        let (id_list, new_ids_range) = differential_ids(&self.id_prefix, seed, &diff, &old.id_list);

        EditRecord {
            paragraphs,
            rendered_paragraphs,
            latex_state,
            id_list,
            new_ids_range,
            parsed,
        }
    }

    /// Re-render every paragraph of a record against a full accumulation,
    /// keeping its ids.
    pub fn refresh(&self, state0: &LatexState, record: &EditRecord) -> EditRecord {
        let parsed = record.parsed().into_owned();
        let (latex_state, decorated) = accumulate(state0.clone(), &parsed);
        let rendered_paragraphs = self.renderer.render_paragraphs(&latex_state, &decorated);

        tracing::debug!(
            target: "minilatex::editor",
            paragraphs = parsed.len(),
            "refresh"
        );

        EditRecord {
            paragraphs: record.paragraphs.clone(),
            rendered_paragraphs,
            latex_state,
            id_list: record.id_list.clone(),
            new_ids_range: None,
            parsed,
        }
    }

    /// A standalone HTML page for a record, each paragraph keyed by its id.
    pub fn export(&self, record: &EditRecord) -> String {
        self.renderer.standalone(
            &record.latex_state,
            &record.rendered_paragraphs,
            &record.id_list,
        )
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    const DOC: &str = "\\section{Intro}\n\nFirst.\n\n\\begin{theorem}\nA\n\\end{theorem}";

    #[test]
    fn test_create() {
        let record = Editor::default().create(&LatexState::new(), DOC, 1);
        assert_eq!(record.paragraphs.len(), 3);
        assert_eq!(record.rendered_paragraphs.len(), 3);
        assert_eq!(record.id_list, vec!["p.1.0", "p.1.1", "p.1.2"]);
        assert_eq!(record.new_ids_range, None);
        assert!(record.rendered_paragraphs[2].contains("Theorem 1.1"));
    }

    #[test]
    fn test_update_of_empty_record_is_create() {
        let editor = Editor::default();
        let created = editor.create(&LatexState::new(), DOC, 3);
        let updated = editor.update(&LatexState::new(), &EditRecord::default(), DOC, 3);
        assert_eq!(updated, created);
    }

    #[test]
    fn test_update_rerenders_only_the_middle() {
        let editor = Editor::default();
        let old = editor.create(&LatexState::new(), DOC, 1);
        let new = editor.update(&LatexState::new(), &old, &DOC.replace("First.", "Second."), 2);

        assert_eq!(new.rendered_paragraphs[0], old.rendered_paragraphs[0]);
        assert_eq!(new.rendered_paragraphs[1], "Second.");
        assert_eq!(new.rendered_paragraphs[2], old.rendered_paragraphs[2]);
        assert_eq!(new.id_list, vec!["p.1.0", "p.2.1", "p.1.2"]);
        assert_eq!(new.new_ids_range, Some(1..2));
    }

    #[test]
    fn test_reseed_numbers_inserted_theorem_by_position() {
        let editor = Editor::default();
        let old = editor.create(&LatexState::new(), DOC, 1);
        let text = DOC.replace("First.", "\\begin{theorem}\nB\n\\end{theorem}");
        let new = editor.update(&LatexState::new(), &old, &text, 2);
        assert!(new.rendered_paragraphs[1].contains("Theorem 1.1"));
        assert_eq!(new.latex_state.counters.tno, 2);
    }

    #[test]
    fn test_fresh_numbers_from_initial_state() {
        let config = Config {
            editor: EditorConfig {
                state_carry: StateCarry::Fresh,
                ..Default::default()
            },
            ..Default::default()
        };
        let editor = Editor::new(&config);
        let old = editor.create(&LatexState::new(), DOC, 1);
        let text = DOC.replace("First.", "\\begin{theorem}\nB\n\\end{theorem}");
        let new = editor.update(&LatexState::new(), &old, &text, 2);
        // No section in the changed segment, so the number is unqualified.
        assert!(new.rendered_paragraphs[1].contains("Theorem 1</strong>"));
        assert_eq!(new.latex_state.counters.tno, 1);
    }

    #[test]
    fn test_deserialized_record_reparses() {
        let editor = Editor::default();
        let old = editor.create(&LatexState::new(), DOC, 1);
        let stripped = EditRecord {
            parsed: Vec::new(),
            ..old.clone()
        };
        let text = DOC.replace("First.", "Second.");
        assert_eq!(
            editor.update(&LatexState::new(), &stripped, &text, 2),
            editor.update(&LatexState::new(), &old, &text, 2)
        );
    }

    #[test]
    fn test_refresh_keeps_ids() {
        let editor = Editor::default();
        let old = editor.create(&LatexState::new(), DOC, 1);
        let refreshed = editor.refresh(&LatexState::new(), &old);
        assert_eq!(refreshed.id_list, old.id_list);
        assert_eq!(refreshed.rendered_paragraphs, old.rendered_paragraphs);
    }

    #[test]
    fn test_export_keys_paragraphs_by_id() {
        let editor = Editor::default();
        let record = editor.create(&LatexState::new(), DOC, 2);
        let page = editor.export(&record);
        assert!(page.contains(r#"<div class="paragraph" id="p.2.0"><h2 class="section""#));
        assert!(page.contains(r#"<div class="paragraph" id="p.2.1">First.</div>"#));
        assert!(page.contains(r#"<div class="paragraph" id="p.2.2">"#));
        assert!(page.contains("auto-render"));
    }
}

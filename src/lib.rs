//! # minilatex
//!
//! An incremental parser and HTML renderer for MiniLaTeX, a restricted
//! LaTeX dialect meant for live preview in an editor.
//!
//! ## Pipeline
//!
//! 1. [`segment`] splits source text into logical paragraphs. An environment
//!    opened at the start of a paragraph keeps its interior blank lines.
//! 2. [`parse`] turns one paragraph into a [`LatexExpression`]. Parsing never
//!    fails; bad input becomes a [`LatexExpression::ParseError`] leaf.
//! 3. [`accumulate`] folds the paragraphs into a [`LatexState`] holding
//!    section, theorem and equation counters, cross-references, metadata and
//!    the table of contents.
//! 4. [`Renderer`] turns each paragraph into HTML against that state.
//! 5. [`Editor::update`] diffs the paragraphs of an edited document against
//!    the previous [`EditRecord`] and re-renders only the changed middle.
//!
//! ## Quick Start
//!
//! ```rust
//! use minilatex::{Editor, LatexState};
//!
//! let editor = Editor::default();
//! let source = "\\section{Intro}\n\n\
//!               \\begin{theorem}\n\\label{t1} Every $n$ is fine.\n\\end{theorem}\n\n\
//!               See \\ref{t1}.";
//! let record = editor.create(&LatexState::new(), source, 0);
//! assert!(record.rendered_paragraphs[1].contains("Theorem 1.1"));
//!
//! let edited = source.replace("See", "Recall");
//! let next = editor.update(&LatexState::new(), &record, &edited, 1);
//! assert_eq!(next.new_ids_range, Some(2..3));
//! ```
//!
//! ## Syntax
//!
//! - Math: `$...$`, `\(...\)`, `$$...$$`, `\[...\]`
//! - Macros: `\name[opt]{arg}`; unknown macros are shown as source
//! - Environments: `\begin{name}...\end{name}`; `itemize`/`enumerate` hold
//!   `\item`s, `tabular` holds `&`-separated rows, and `equation`, `align`,
//!   `eqnarray`, `verbatim`, `listing`, `verse` and `mathmacro` keep their
//!   body verbatim
//! - Paragraph macros: `\bibitem[shown]{key} text` runs to the blank line
//!
//! ## Configuration
//!
//! See [`Config`] for the TOML format.
//!
//! ## Features
//!
//! - `wasm`: Enable WebAssembly bindings (requires `wasm-bindgen`)

pub mod accumulator;
pub mod ast;
pub mod config;
pub mod differ;
pub mod editor;
pub mod error;
pub mod paragraph;
pub mod parser;
pub mod print;
pub mod render;
pub mod state;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use accumulator::{accumulate, Decorated};
pub use ast::{Diagnostic, LatexExpression};
pub use config::{Config, EditorConfig, RenderConfig, StateCarry};
pub use differ::{diff, DiffRecord};
pub use editor::{EditRecord, Editor};
pub use error::{ConfigError, Error, Result};
pub use paragraph::segment;
pub use parser::parse;
pub use render::{math::MathBackend, Renderer};
pub use state::{Counters, LatexState, TocEntry};

/// Segment, parse, accumulate and render a whole document in one step.
///
/// # Example
///
/// ```rust
/// let html = minilatex::render_document("\\emph{Hello} world.\n\nSecond.");
/// assert_eq!(html, vec!["<em>Hello</em> world.", "Second."]);
/// ```
pub fn render_document(text: &str) -> Vec<String> {
    Editor::default()
        .create(&LatexState::new(), text, 0)
        .rendered_paragraphs
}

/// Render a whole document to one HTML fragment, each paragraph in a `<div>`
/// keyed by its id.
pub fn render_document_html(text: &str) -> String {
    let editor = Editor::default();
    let record = editor.create(&LatexState::new(), text, 0);
    editor
        .renderer()
        .body(&record.latex_state, &record.rendered_paragraphs, &record.id_list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let input = r#"\title{Notes}

\maketitle

\section{Introduction}

Let $x$ be real. See Theorem \ref{thm:main}.

\begin{theorem}
\label{thm:main} All numbers are interesting.
\end{theorem}

\begin{itemize}
\item One

\item Two
\end{itemize}
"#;

        let html = render_document(input);

        assert_eq!(html.len(), 6);
        assert_eq!(html[0], "");
        assert!(html[1].contains(r#"<div class="title">Notes</div>"#));
        assert!(html[2].contains("1 Introduction"));
        assert!(html[3].contains("math inline"));
        assert!(html[3].contains(">1.1</a>"));
        assert!(html[4].contains("Theorem 1.1"));
        assert!(html[5].contains("<li>Two</li>"));
    }

    #[test]
    fn test_errors_stay_local() {
        let html = render_document("Fine.\n\n\\begin{theorem}\nnever closed\n\nStill fine.");
        assert_eq!(html[0], "Fine.");
        assert!(html[1].contains(r#"<span class="error">"#));
    }

    #[test]
    fn test_document_html_has_no_paragraph_tags() {
        let html =
            render_document_html("\\section{A}\n\n\\begin{itemize}\n\\item X\n\\end{itemize}");
        assert!(html.starts_with(r#"<div class="paragraph" id="p.0.0"><h2"#));
        assert!(html.contains(r#"<div class="paragraph" id="p.0.1"><ul class="itemize">"#));
        assert!(!html.contains("<p"));
    }
}

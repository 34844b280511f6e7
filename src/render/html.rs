//! HTML rendering of parsed paragraphs.

use crate::accumulator::Decorated;
use crate::ast::LatexExpression;
use crate::config::RenderConfig;
use crate::render::environments::{self, EnvCall};
use crate::render::macros::{self, MacroCall};
use crate::render::math::{create_renderer, MathRenderer};
use crate::render::text::{escape_html, escape_text, join_fragments, post_process};
use crate::state::LatexState;

/// Renders expressions to HTML against an accumulated [`LatexState`].
///
/// Rendering is deterministic and never fails: unknown macros are echoed as
/// escaped source and parse errors become a styled span.
pub struct Renderer {
    math: Box<dyn MathRenderer>,
    error_class: String,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            math: create_renderer(config.math_backend),
            error_class: config.error_class.clone(),
        }
    }

    /// The math backend in use.
    pub fn math(&self) -> &dyn MathRenderer {
        self.math.as_ref()
    }

    /// Render one expression.
    pub fn render(&self, state: &LatexState, expr: &LatexExpression) -> String {
        match expr {
            LatexExpression::Str(s) => post_process(&escape_text(s)),
            LatexExpression::Comment(_) => String::new(),
            LatexExpression::InlineMath(m) => self.math.render_inline(m),
            LatexExpression::DisplayMath(m) => self.math.render_display(m),
            LatexExpression::Item { body, .. } => {
                format!("<li>{}</li>", self.render(state, body))
            }
            LatexExpression::Macro {
                name,
                optional_args,
                args,
            } => macros::render_macro(
                self,
                state,
                &MacroCall {
                    name,
                    optional_args,
                    args,
                    body: None,
                    expr,
                },
            ),
            LatexExpression::SMacro {
                name,
                optional_args,
                args,
                body,
            } => macros::render_smacro(
                self,
                state,
                &MacroCall {
                    name,
                    optional_args,
                    args,
                    body: Some(body.as_ref()),
                    expr,
                },
            ),
            LatexExpression::Environment { name, args, body } => {
                environments::render_environment(self, state, &EnvCall { name, args, body, expr })
            }
            LatexExpression::ExprList(items) => {
                join_fragments(items.iter().map(|item| self.render(state, item)))
            }
            LatexExpression::ParseError(diagnostics) => {
                let message = diagnostics
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                format!(
                    r#"<span class="{}">{}</span>"#,
                    escape_html(&self.error_class),
                    escape_html(&message)
                )
            }
        }
    }

    /// Render accumulated paragraphs against the final state, each with the
    /// counters recorded when it was accumulated.
    ///
    /// Cross-references therefore resolve in both directions while running
    /// numbers stay those of the paragraph's own position.
    pub fn render_paragraphs(
        &self,
        state: &LatexState,
        paragraphs: &[Decorated<'_>],
    ) -> Vec<String> {
        let mut view = state.clone();
        paragraphs
            .iter()
            .map(|paragraph| {
                view.counters = paragraph.counters;
                self.render(&view, paragraph.expr)
            })
            .collect()
    }

    /// Hidden block carrying the document's `mathmacro` definitions, for the
    /// typesetter to read before the first paragraph.
    pub fn prologue(&self, state: &LatexState) -> Option<String> {
        let definitions = state.entry("mathmacro")?;
        Some(format!(
            r#"<div class="mathmacro" style="display: none">{}</div>"#,
            self.math.render_display(definitions)
        ))
    }

    /// Join rendered paragraphs into one body fragment, each paragraph in a
    /// `<div>` keyed by its id and the prologue first.
    pub fn body(&self, state: &LatexState, rendered: &[String], ids: &[String]) -> String {
        let mut out = String::new();
        if let Some(prologue) = self.prologue(state) {
            out.push_str(&prologue);
            out.push('\n');
        }
        for (index, html) in rendered.iter().enumerate() {
            match ids.get(index) {
                Some(id) => out.push_str(&format!(
                    "<div class=\"paragraph\" id=\"{}\">{}</div>\n",
                    escape_html(id),
                    html
                )),
                None => out.push_str(&format!("<div class=\"paragraph\">{}</div>\n", html)),
            }
        }
        out
    }

    /// A complete HTML page: the typesetter's head block, the document title
    /// and the [`body`](Self::body).
    pub fn standalone(&self, state: &LatexState, rendered: &[String], ids: &[String]) -> String {
        let title = state.entry("title").unwrap_or("Document");

        let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        if let Some(head) = self.math.head_content() {
            out.push_str(&head);
            out.push('\n');
        }
        out.push_str("</head>\n<body>\n<article class=\"minilatex\">\n");
        out.push_str(&self.body(state, rendered, ids));
        out.push_str("</article>\n</body>\n</html>");
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

//! Client-side typesetter passthrough.
//!
//! Math source is escaped and wrapped in the delimiters the page's KaTeX
//! auto-render or MathJax configuration scans for.

use super::MathRenderer;
use crate::render::text::escape_html;

const KATEX_DIST: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist";
const MATHJAX_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js";

/// Delimiter pairs and the page setup that scans for them.
struct Typesetter {
    inline: (&'static str, &'static str),
    display: (&'static str, &'static str),
    head: fn(&Typesetter) -> String,
}

const KATEX: Typesetter = Typesetter {
    inline: ("\\(", "\\)"),
    display: ("\\[", "\\]"),
    head: katex_head,
};

const MATHJAX: Typesetter = Typesetter {
    inline: ("\\(", "\\)"),
    display: ("$$", "$$"),
    head: mathjax_head,
};

/// A delimiter as a single-quoted JavaScript string.
fn js_quote(delimiter: &str) -> String {
    format!("'{}'", delimiter.replace('\\', "\\\\"))
}

fn katex_head(t: &Typesetter) -> String {
    let delimiter = |(left, right): (&str, &str), display: bool| {
        format!(
            "{{left: {}, right: {}, display: {}}}",
            js_quote(left),
            js_quote(right),
            display
        )
    };
    format!(
        concat!(
            "<link rel=\"stylesheet\" href=\"{dist}/katex.min.css\">\n",
            "<script defer src=\"{dist}/katex.min.js\"></script>\n",
            "<script defer src=\"{dist}/contrib/auto-render.min.js\"></script>\n",
            "<script>\n",
            "document.addEventListener(\"DOMContentLoaded\", function () {{\n",
            "  renderMathInElement(document.body, {{\n",
            "    delimiters: [{display}, {inline}],\n",
            "    throwOnError: false\n",
            "  }});\n",
            "}});\n",
            "</script>"
        ),
        dist = KATEX_DIST,
        display = delimiter(t.display, true),
        inline = delimiter(t.inline, false),
    )
}

fn mathjax_head(t: &Typesetter) -> String {
    let pair = |(open, close): (&str, &str)| format!("[{}, {}]", js_quote(open), js_quote(close));
    format!(
        concat!(
            "<script>\n",
            "window.MathJax = {{ tex: {{ inlineMath: [{inline}], displayMath: [{display}] }} }};\n",
            "</script>\n",
            "<script async src=\"{script}\"></script>"
        ),
        inline = pair(t.inline),
        display = pair(t.display),
        script = MATHJAX_SCRIPT,
    )
}

/// Renderer that emits raw LaTeX for a client-side typesetter.
pub struct KaTeXRenderer {
    typesetter: &'static Typesetter,
}

impl KaTeXRenderer {
    /// Emit markup for KaTeX auto-render.
    pub fn new() -> Self {
        Self { typesetter: &KATEX }
    }

    /// Emit markup for MathJax.
    pub fn new_mathjax() -> Self {
        Self {
            typesetter: &MATHJAX,
        }
    }
}

impl Default for KaTeXRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MathRenderer for KaTeXRenderer {
    fn render_inline(&self, latex: &str) -> String {
        let (open, close) = self.typesetter.inline;
        format!(
            r#"<span class="math inline">{}{}{}</span>"#,
            open,
            escape_html(latex.trim()),
            close
        )
    }

    fn render_display(&self, latex: &str) -> String {
        let (open, close) = self.typesetter.display;
        format!(
            r#"<div class="math display">{}{}{}</div>"#,
            open,
            escape_html(latex.trim()),
            close
        )
    }

    fn head_content(&self) -> Option<String> {
        Some((self.typesetter.head)(self.typesetter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_math() {
        let html = KaTeXRenderer::new().render_inline(" a^2 ");
        assert_eq!(html, r#"<span class="math inline">\(a^2\)</span>"#);
    }

    #[test]
    fn test_display_delimiters_follow_backend() {
        assert!(KaTeXRenderer::new().render_display("x").contains("\\[x\\]"));
        assert!(KaTeXRenderer::new_mathjax().render_display("x").contains("$$x$$"));
    }

    #[test]
    fn test_escaping() {
        let html = KaTeXRenderer::new().render_inline("a < b & c");
        assert!(html.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_head_content_matches_delimiters() {
        let katex = KaTeXRenderer::new().head_content().unwrap();
        assert!(katex.contains("katex.min.js"));
        assert!(katex.contains(r"{left: '\\[', right: '\\]', display: true}"));
        assert!(katex.contains(r"{left: '\\(', right: '\\)', display: false}"));

        let mathjax = KaTeXRenderer::new_mathjax().head_content().unwrap();
        assert!(mathjax.contains("window.MathJax"));
        assert!(mathjax.contains("displayMath: [['$$', '$$']]"));
        assert!(mathjax.contains(r"inlineMath: [['\\(', '\\)']]"));
    }
}

//! Render table for macros and paragraph macros.

use crate::accumulator::references::BIBITEM_PREFIX;
use crate::ast::LatexExpression;
use crate::print::to_latex;
use crate::render::html::Renderer;
use crate::render::text::{escape_html, escape_text, post_process};
use crate::state::LatexState;

/// A macro call as seen by its renderer.
pub struct MacroCall<'e> {
    pub name: &'e str,
    pub optional_args: &'e [LatexExpression],
    pub args: &'e [LatexExpression],
    /// Trailing body of a paragraph macro
    pub body: Option<&'e LatexExpression>,
    /// The whole call, for fallbacks
    pub expr: &'e LatexExpression,
}

impl MacroCall<'_> {
    fn arg_text(&self, index: usize) -> String {
        self.expr
            .arg_text(index)
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }
}

pub type MacroRender = fn(&Renderer, &LatexState, &MacroCall<'_>) -> String;

/// Macros that only feed the accumulator and render as nothing.
const SILENT: &[&str] = &[
    "label", "title", "author", "date", "email", "revision", "setcounter", "index",
];

/// Look up the renderer for a macro name.
pub fn macro_renderer(name: &str) -> Option<MacroRender> {
    let render: MacroRender = match name {
        "emph" | "textit" | "italic" => emph,
        "textbf" | "strong" | "bold" => bold,
        "texttt" | "code" => code,
        "strike" => strike,
        "underline" => underline,
        "red" | "blue" | "highlight" => colored,
        "term" => term,
        "section" | "subsection" | "subsubsection" | "section*" | "subsection*"
        | "subsubsection*" => section,
        "ref" => reference,
        "eqref" => equation_reference,
        "cite" => cite,
        "href" => href,
        "image" => image,
        "maketitle" => maketitle,
        "tableofcontents" => table_of_contents,
        "linebreak" => line_break,
        "bigskip" | "medskip" | "smallskip" => vertical_space,
        n if SILENT.contains(&n) => silent,
        _ => return None,
    };
    Some(render)
}

/// Render a macro, echoing unknown ones as escaped source.
pub fn render_macro(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    match macro_renderer(call.name) {
        Some(render) => render(renderer, state, call),
        None => escape_html(&to_latex(call.expr)),
    }
}

/// Render a paragraph macro.
pub fn render_smacro(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    match call.name {
        "bibitem" => bibitem(renderer, state, call),
        _ => escape_html(&to_latex(call.expr)),
    }
}

fn arg(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>, index: usize) -> String {
    call.args
        .get(index)
        .map(|a| renderer.render(state, a))
        .unwrap_or_default()
}

fn wrap(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}

/// Plain text for use in markup outside math.
fn text(raw: &str) -> String {
    post_process(&escape_text(raw))
}

fn emph(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    wrap("em", &arg(r, state, call, 0))
}

fn bold(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    wrap("strong", &arg(r, state, call, 0))
}

fn code(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    wrap("code", &arg(r, state, call, 0))
}

fn strike(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    wrap("s", &arg(r, state, call, 0))
}

fn underline(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    wrap("u", &arg(r, state, call, 0))
}

fn colored(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    format!(r#"<span class="{}">{}</span>"#, call.name, arg(r, state, call, 0))
}

fn term(r: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    format!(r#"<i class="term">{}</i>"#, arg(r, state, call, 0))
}

fn line_break(_: &Renderer, _: &LatexState, _: &MacroCall<'_>) -> String {
    "<br>".to_string()
}

fn vertical_space(_: &Renderer, _: &LatexState, call: &MacroCall<'_>) -> String {
    format!(r#"<div class="{}"></div>"#, call.name)
}

fn silent(_: &Renderer, _: &LatexState, _: &MacroCall<'_>) -> String {
    String::new()
}

fn section(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let starred = call.name.ends_with('*');
    let c = &state.counters;
    let (tag, number) = match call.name.trim_end_matches('*') {
        "section" => ("h2", c.s1.to_string()),
        "subsection" => ("h3", format!("{}.{}", c.s1, c.s2)),
        _ => ("h4", format!("{}.{}.{}", c.s1, c.s2, c.s3)),
    };
    let title = arg(renderer, state, call, 0);
    if starred {
        format!(r#"<{tag} class="section">{title}</{tag}>"#)
    } else {
        format!(r#"<{tag} class="section" id="section-{number}">{number} {title}</{tag}>"#)
    }
}

fn reference(_: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let label = call.arg_text(0);
    match state.cross_reference(&label) {
        Some(number) => format!(
            r##"<a href="#{}" class="ref">{}</a>"##,
            escape_html(&label),
            escape_html(number)
        ),
        None => escape_html(&label),
    }
}

fn equation_reference(_: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let label = call.arg_text(0);
    match state.cross_reference(&label) {
        Some(number) => format!(
            r##"<a href="#{}" class="ref">({})</a>"##,
            escape_html(&label),
            escape_html(number)
        ),
        None => escape_html(&format!("\\eqref{{{}}}", label)),
    }
}

fn cite(_: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let key = call.arg_text(0);
    let shown = state
        .cross_reference(&format!("{}{}", BIBITEM_PREFIX, key))
        .unwrap_or(key.as_str());
    let note = call
        .expr
        .optional_arg_text(0)
        .map(|n| format!(", {}", text(&n)))
        .unwrap_or_default();
    format!(
        r##"<a href="#{}{}" class="cite">[{}{}]</a>"##,
        BIBITEM_PREFIX,
        escape_html(&key),
        escape_html(shown),
        note
    )
}

fn href(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let url = call.arg_text(0);
    let shown = match call.args.get(1) {
        Some(label) => renderer.render(state, label),
        None => escape_html(&url),
    };
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape_html(&url),
        shown
    )
}

/// `\image{url}{caption}{width: 300}`
fn image(_: &Renderer, _: &LatexState, call: &MacroCall<'_>) -> String {
    let url = call.arg_text(0);
    let caption = call.arg_text(1);
    let width = image_width(&call.arg_text(2))
        .map(|w| format!(r#" style="width: {}px""#, w))
        .unwrap_or_default();
    let figcaption = if caption.is_empty() {
        String::new()
    } else {
        format!("<figcaption>{}</figcaption>", text(&caption))
    };
    format!(
        r#"<figure class="image"><img src="{}" alt="{}"{}>{}</figure>"#,
        escape_html(&url),
        escape_html(&caption),
        width,
        figcaption
    )
}

fn image_width(attributes: &str) -> Option<u32> {
    attributes.split(',').find_map(|attribute| {
        let (key, value) = attribute.split_once(':')?;
        if key.trim() != "width" {
            return None;
        }
        value.trim().trim_end_matches("px").parse().ok()
    })
}

fn maketitle(_: &Renderer, state: &LatexState, _: &MacroCall<'_>) -> String {
    let mut html = String::from(r#"<div class="maketitle">"#);
    for key in ["title", "author", "email", "date", "revision"] {
        if let Some(value) = state.entry(key) {
            html.push_str(&format!(r#"<div class="{}">{}</div>"#, key, text(value)));
        }
    }
    html.push_str("</div>");
    html
}

fn table_of_contents(_: &Renderer, state: &LatexState, _: &MacroCall<'_>) -> String {
    let mut html =
        String::from(r#"<div class="tableofcontents"><p class="toc-title">Contents</p><ul>"#);
    for entry in &state.table_of_contents {
        html.push_str(&format!(
            r##"<li class="toc-level-{}"><a href="#section-{}">{} {}</a></li>"##,
            entry.level,
            entry.label,
            entry.label,
            text(&entry.name)
        ));
    }
    html.push_str("</ul></div>");
    html
}

fn bibitem(renderer: &Renderer, state: &LatexState, call: &MacroCall<'_>) -> String {
    let label = call.arg_text(0);
    let shown = call
        .expr
        .optional_arg_text(0)
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| label.clone());
    let body = call
        .body
        .map(|b| renderer.render(state, b))
        .unwrap_or_default();
    format!(
        r#"<div class="bibitem" id="{}{}"><span class="bibitem-label">[{}]</span> {}</div>"#,
        BIBITEM_PREFIX,
        escape_html(&label),
        escape_html(&shown),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn render_with(state: &LatexState, source: &str) -> String {
        Renderer::default().render(state, &parse(source))
    }

    fn render(source: &str) -> String {
        render_with(&LatexState::new(), source)
    }

    #[test]
    fn test_font_macros() {
        assert_eq!(
            render("\\emph{a} \\textbf{b} \\texttt{c}"),
            "<em>a</em> <strong>b</strong> <code>c</code>"
        );
        assert_eq!(render("\\red{warm}"), r#"<span class="red">warm</span>"#);
    }

    #[test]
    fn test_punctuation_after_macro() {
        assert_eq!(render("(\\emph{a}), then"), "(<em>a</em>), then");
    }

    #[test]
    fn test_section_heading() {
        let mut state = LatexState::new();
        state.counters.s1 = 2;
        state.counters.s2 = 1;
        assert_eq!(
            render_with(&state, "\\subsection{Intro}"),
            r#"<h3 class="section" id="section-2.1">2.1 Intro</h3>"#
        );
        assert_eq!(render_with(&state, "\\section*{Notes}"), r#"<h2 class="section">Notes</h2>"#);
    }

    #[test]
    fn test_references() {
        let mut state = LatexState::new();
        state.cross_references.insert("e1".into(), "1.1".into());
        state.cross_references.insert("bibitem:knuth".into(), "K84".into());
        assert_eq!(
            render_with(&state, "\\eqref{e1}"),
            r##"<a href="#e1" class="ref">(1.1)</a>"##
        );
        assert_eq!(render_with(&state, "\\ref{e1}"), r##"<a href="#e1" class="ref">1.1</a>"##);
        assert_eq!(
            render_with(&state, "\\cite{knuth}"),
            r##"<a href="#bibitem:knuth" class="cite">[K84]</a>"##
        );
    }

    #[test]
    fn test_unresolved_references() {
        assert_eq!(render("\\ref{nowhere}"), "nowhere");
        assert_eq!(render("\\eqref{nowhere}"), "\\eqref{nowhere}");
        assert!(render("\\cite{x}").contains("[x]"));
    }

    #[test]
    fn test_unknown_macro_echoes_source() {
        assert_eq!(render("\\foo{a<b}"), "\\foo{a&lt;b}");
    }

    #[test]
    fn test_silent_macros() {
        assert_eq!(render("\\title{On Things} \\label{x}"), "");
    }

    #[test]
    fn test_href_and_image() {
        assert_eq!(
            render("\\href{http://x.org}{the site}"),
            r#"<a href="http://x.org" target="_blank">the site</a>"#
        );
        let html = render("\\image{http://x.org/a.png}{A cat}{width: 200}");
        assert!(
            html.contains(r#"<img src="http://x.org/a.png" alt="A cat" style="width: 200px">"#)
        );
        assert!(html.contains("<figcaption>A cat</figcaption>"));
    }

    #[test]
    fn test_maketitle_and_toc() {
        let mut state = LatexState::new();
        state.dictionary.insert("title".into(), "Notes".into());
        state.table_of_contents.push(crate::state::TocEntry {
            name: "Intro".into(),
            label: "1".into(),
            level: 1,
        });
        assert_eq!(
            render_with(&state, "\\maketitle"),
            r#"<div class="maketitle"><div class="title">Notes</div></div>"#
        );
        let toc = render_with(&state, "\\tableofcontents");
        assert!(toc.contains(r##"<a href="#section-1">1 Intro</a>"##));
    }

    #[test]
    fn test_bibitem() {
        let html = render("\\bibitem[K84]{knuth} Knuth, \\emph{The TeXbook}");
        assert_eq!(
            html,
            concat!(
                r#"<div class="bibitem" id="bibitem:knuth">"#,
                r#"<span class="bibitem-label">[K84]</span> Knuth, <em>The TeXbook</em></div>"#
            )
        );
    }
}

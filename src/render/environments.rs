//! Render table for environments.

use crate::accumulator::numbering::{NUMBERED_EQUATIONS, THEOREM_LIKE};
use crate::accumulator::references::body_label;
use crate::ast::LatexExpression;
use crate::parser::strip_labels;
use crate::render::html::Renderer;
use crate::render::text::{capitalize, escape_html};
use crate::state::LatexState;

/// An environment as seen by its renderer.
pub struct EnvCall<'e> {
    pub name: &'e str,
    pub args: &'e [LatexExpression],
    pub body: &'e LatexExpression,
    /// The whole environment, for label lookup
    pub expr: &'e LatexExpression,
}

impl EnvCall<'_> {
    /// Verbatim body of a pass-through environment.
    fn raw(&self) -> &str {
        match self.body {
            LatexExpression::Str(raw) => raw,
            _ => "",
        }
    }

    fn id_attribute(&self) -> String {
        body_label(self.expr)
            .map(|label| format!(r#" id="{}""#, escape_html(&label)))
            .unwrap_or_default()
    }
}

pub type EnvRender = fn(&Renderer, &LatexState, &EnvCall<'_>) -> String;

/// Look up the renderer for an environment name.
pub fn environment_renderer(name: &str) -> Option<EnvRender> {
    let render: EnvRender = match name {
        n if THEOREM_LIKE.contains(&n) => theorem,
        n if NUMBERED_EQUATIONS.contains(&n) => equation,
        "proof" => proof,
        "itemize" => itemize,
        "enumerate" => enumerate,
        "tabular" => tabular,
        "verbatim" => verbatim,
        "listing" => listing,
        "verse" => verse,
        "quotation" | "quote" => quotation,
        "abstract" => abstract_block,
        "comment" | "mathmacro" => hidden,
        _ => return None,
    };
    Some(render)
}

/// Render an environment. Unregistered names become a `div` classed by name.
pub fn render_environment(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    match environment_renderer(env.name) {
        Some(render) => render(renderer, state, env),
        None => format!(
            r#"<div class="{}">{}</div>"#,
            escape_html(env.name),
            renderer.render(state, env.body)
        ),
    }
}

fn theorem(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    let number = state.counters.within_section(state.counters.tno);
    format!(
        concat!(
            r#"<div class="environment {}"{}><strong>{} {}</strong> "#,
            r#"<div class="environment-body">{}</div></div>"#
        ),
        env.name,
        env.id_attribute(),
        capitalize(env.name),
        number,
        renderer.render(state, env.body)
    )
}

fn proof(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    format!(
        concat!(
            r#"<div class="environment proof"><em>Proof.</em> {} "#,
            r#"<span class="qed">&#8718;</span></div>"#
        ),
        renderer.render(state, env.body)
    )
}

/// `equation`, `align` and `eqnarray`, tagged with the running equation number.
fn equation(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    let number = state.counters.within_section(state.counters.eqno);
    let math = strip_labels(env.raw());
    let math = math.trim();
    let source = if env.name == "equation" {
        format!("{}\\tag{{{}}}", math, number)
    } else {
        format!("\\begin{{aligned}}{}\\end{{aligned}}\\tag{{{}}}", math, number)
    };
    format!(
        r#"<div class="equation"{}>{}</div>"#,
        env.id_attribute(),
        renderer.math().render_display(&source)
    )
}

fn items(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    env.body
        .items()
        .iter()
        .map(|item| renderer.render(state, item))
        .collect()
}

fn itemize(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    format!(r#"<ul class="itemize">{}</ul>"#, items(renderer, state, env))
}

fn enumerate(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    format!(r#"<ol class="enumerate">{}</ol>"#, items(renderer, state, env))
}

fn tabular(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    let alignments = column_alignments(&env.expr.arg_text(0).unwrap_or_default());
    let mut html = String::from(r#"<table class="tabular">"#);
    for row in env.body.items() {
        html.push_str("<tr>");
        for (i, cell) in row.items().iter().enumerate() {
            let align = alignments.get(i).copied().unwrap_or("left");
            html.push_str(&format!(
                r#"<td style="text-align: {}">{}</td>"#,
                align,
                renderer.render(state, cell)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// `{l c r}` or `{|l|c|}` -> `["left", "center", "right"]`
fn column_alignments(columns: &str) -> Vec<&'static str> {
    columns.chars()
        .filter_map(|c| match c {
            'l' => Some("left"),
            'c' => Some("center"),
            'r' => Some("right"),
            _ => None,
        })
        .collect()
}

fn verbatim(_: &Renderer, _: &LatexState, env: &EnvCall<'_>) -> String {
    format!(r#"<pre class="verbatim">{}</pre>"#, escape_html(env.raw()))
}

fn listing(_: &Renderer, _: &LatexState, env: &EnvCall<'_>) -> String {
    let lines = env
        .raw()
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:>3}  {}", i + 1, escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(r#"<pre class="listing">{}</pre>"#, lines)
}

fn verse(_: &Renderer, _: &LatexState, env: &EnvCall<'_>) -> String {
    let lines = env
        .raw()
        .lines()
        .map(|line| escape_html(line.trim()))
        .collect::<Vec<_>>()
        .join("<br>\n");
    format!(r#"<div class="verse">{}</div>"#, lines)
}

fn quotation(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    format!(
        r#"<blockquote class="quotation">{}</blockquote>"#,
        renderer.render(state, env.body)
    )
}

fn abstract_block(renderer: &Renderer, state: &LatexState, env: &EnvCall<'_>) -> String {
    format!(
        r#"<div class="abstract"><span class="abstract-title">Abstract</span> {}</div>"#,
        renderer.render(state, env.body)
    )
}

fn hidden(_: &Renderer, _: &LatexState, _: &EnvCall<'_>) -> String {
    String::new()
}

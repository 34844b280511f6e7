//! Environment parsing.
//!
//! The name captured by `\begin{name}` selects the body grammar, and the
//! closing marker is matched as a literal built from that name.

use crate::ast::LatexExpression;
use crate::parser::expression::{arg, expression_list, macro_call};
use crate::parser::lexer::{
    begin_marker, comment, end_marker, inline_math, is_cell_stop, item_marker, line_break,
    line_words, PResult, SyntaxError,
};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace1, space0},
    combinator::map,
    multi::{many0, many1, separated_list1},
    sequence::{delimited, preceded},
};

/// Environments whose body is captured verbatim.
pub const PASSTHROUGH: &[&str] = &[
    "equation", "align", "eqnarray", "verbatim", "listing", "verse", "mathmacro",
];

/// The body grammar selected by an environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `\item` entries (itemize, enumerate)
    Items,
    /// Rows of `&`-separated cells (tabular)
    Table,
    /// Raw text up to the closing marker
    Passthrough,
    /// A recursively parsed expression list
    Generic,
}

impl BodyKind {
    /// Look up the body grammar for an environment name.
    pub fn for_name(name: &str) -> Self {
        match name {
            "itemize" | "enumerate" => Self::Items,
            "tabular" => Self::Table,
            n if PASSTHROUGH.contains(&n) => Self::Passthrough,
            _ => Self::Generic,
        }
    }
}

/// Parse `\begin{name}{args}... \end{name}`.
pub fn environment(input: &str) -> PResult<LatexExpression> {
    let (rest, name) = begin_marker(input)?;
    let (rest, args) = many0(arg)(rest)?;
    let end = format!("\\end{{{}}}", name);

    let body_result = match BodyKind::for_name(name) {
        BodyKind::Items => item_body(rest),
        BodyKind::Table => table_body(rest),
        BodyKind::Passthrough => passthrough_body(rest, &end),
        BodyKind::Generic => {
            expression_list(rest).map(|(r, items)| (r, LatexExpression::ExprList(items)))
        }
    };

    let (rest, body) = match body_result {
        Ok(parsed) => parsed,
        Err(nom::Err::Failure(e)) => return Err(nom::Err::Failure(e)),
        Err(_) => {
            return Err(nom::Err::Failure(SyntaxError::new(
                input,
                format!("no matching \\end{{{}}} for \\begin{{{}}}", name, name),
            )))
        }
    };

    let (rest, _) = match tag::<_, _, SyntaxError>(end.as_str())(rest) {
        Ok(done) => done,
        Err(_) => return Err(nom::Err::Failure(mismatch(input, rest, name))),
    };

    Ok((
        rest,
        LatexExpression::Environment {
            name: name.to_string(),
            args,
            body: Box::new(body),
        },
    ))
}

fn mismatch<'a>(input: &'a str, at: &'a str, name: &str) -> SyntaxError<'a> {
    match end_marker(at) {
        Ok((_, other)) => SyntaxError::new(
            at,
            format!("\\begin{{{}}} ended by \\end{{{}}}", name, other),
        ),
        Err(_) => SyntaxError::new(
            input,
            format!("no matching \\end{{{}}} for \\begin{{{}}}", name, name),
        ),
    }
}

fn passthrough_body<'a>(input: &'a str, end: &str) -> PResult<'a, LatexExpression> {
    let (rest, raw) = take_until(end)(input)?;
    let raw = raw.trim_matches(|c: char| c == '\n' || c == '\r');
    Ok((rest, LatexExpression::Str(raw.to_string())))
}

/// Whitespace and comments between list items.
fn item_gap(input: &str) -> PResult<Vec<&str>> {
    many0(alt((multispace1, comment)))(input)
}

fn item_body(input: &str) -> PResult<LatexExpression> {
    let (rest, items) = many1(preceded(item_gap, item))(input)?;
    let (rest, _) = item_gap(rest)?;
    Ok((rest, LatexExpression::ExprList(items)))
}

fn item(input: &str) -> PResult<LatexExpression> {
    let (rest, _) = item_marker(input)?;
    let (rest, body) = expression_list(rest)?;
    Ok((
        rest,
        LatexExpression::Item {
            level: 1,
            body: Box::new(LatexExpression::ExprList(body)),
        },
    ))
}

/// Parse a tabular body into rows of cells.
///
/// Rows end at `\\` or a line break and cells are separated by `&`, except
/// inside inline math and macro arguments. `\hline` rules and comments
/// between rows are dropped.
fn table_body(input: &str) -> PResult<LatexExpression> {
    let (rest, rows) = many0(preceded(row_gap, table_row))(input)?;
    let (rest, _) = row_gap(rest)?;
    Ok((rest, LatexExpression::ExprList(rows)))
}

fn row_gap(input: &str) -> PResult<Vec<&str>> {
    many0(alt((multispace1, line_break, tag("\\hline"), comment)))(input)
}

fn table_row(input: &str) -> PResult<LatexExpression> {
    let (rest, cells) =
        separated_list1(delimited(space0, char('&'), space0), table_cell)(input)?;
    if rest.len() == input.len() {
        return Err(nom::Err::Error(SyntaxError::new(input, "empty table row")));
    }
    Ok((rest, LatexExpression::ExprList(cells)))
}

fn table_cell(input: &str) -> PResult<LatexExpression> {
    let cell_item = alt((
        map(inline_math, |m| LatexExpression::InlineMath(m.to_string())),
        macro_call,
        map(line_words(is_cell_stop), LatexExpression::Str),
    ));
    map(many0(preceded(space0, cell_item)), LatexExpression::ExprList)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LatexExpression::*;

    fn s(text: &str) -> LatexExpression {
        Str(text.to_string())
    }

    #[test]
    fn test_body_kind_lookup() {
        assert_eq!(BodyKind::for_name("itemize"), BodyKind::Items);
        assert_eq!(BodyKind::for_name("tabular"), BodyKind::Table);
        assert_eq!(BodyKind::for_name("verbatim"), BodyKind::Passthrough);
        assert_eq!(BodyKind::for_name("theorem"), BodyKind::Generic);
    }

    #[test]
    fn test_generic_environment() {
        let src = "\\begin{theorem}\nAll $x$ are \\emph{fine}.\n\\end{theorem} after";
        let (rest, env) = environment(src).unwrap();
        assert_eq!(rest, " after");
        let Environment { name, args, body } = env else {
            panic!("Expected environment");
        };
        assert_eq!(name, "theorem");
        assert!(args.is_empty());
        assert_eq!(body.items().len(), 5);
    }

    #[test]
    fn test_itemize() {
        let src = "\\begin{itemize}\n\\item One\n\n\\item Two $y$\n\\end{itemize}";
        let (_, env) = environment(src).unwrap();
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(
            *body,
            ExprList(vec![
                Item { level: 1, body: Box::new(ExprList(vec![s("One")])) },
                Item {
                    level: 1,
                    body: Box::new(ExprList(vec![s("Two"), InlineMath("y".into())])),
                },
            ])
        );
    }

    #[test]
    fn test_nested_lists() {
        let src = "\\begin{itemize}\n\\item A\n\
                   \\begin{enumerate}\n\\item B\n\\end{enumerate}\n\
                   \\end{itemize}";
        let (rest, env) = environment(src).unwrap();
        assert_eq!(rest, "");
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        let Item { body: first, .. } = &body.items()[0] else {
            panic!("Expected item");
        };
        assert!(matches!(&first.items()[1], Environment { name, .. } if name == "enumerate"));
    }

    #[test]
    fn test_tabular() {
        let src = "\\begin{tabular}{l r}\n\\hline\nName & $x$ \\\\\nA & 1\n\\end{tabular}";
        let (_, env) = environment(src).unwrap();
        let Environment { args, body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(args, vec![ExprList(vec![s("l r")])]);
        assert_eq!(
            *body,
            ExprList(vec![
                ExprList(vec![ExprList(vec![s("Name")]), ExprList(vec![InlineMath("x".into())])]),
                ExprList(vec![ExprList(vec![s("A")]), ExprList(vec![s("1")])]),
            ])
        );
    }

    #[test]
    fn test_passthrough_is_verbatim() {
        let src = "\\begin{equation}\n\\label{e1}\nx = \\frac{1}{2}\n\\end{equation}";
        let (_, env) = environment(src).unwrap();
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(*body, s("\\label{e1}\nx = \\frac{1}{2}"));
    }

    #[test]
    fn test_mismatched_end_fails() {
        let err = environment("\\begin{theorem}\nX\n\\end{lemma}").unwrap_err();
        let nom::Err::Failure(e) = err else {
            panic!("Expected failure");
        };
        assert_eq!(e.message, "\\begin{theorem} ended by \\end{lemma}");
        assert!(e.input.starts_with("\\end{lemma}"));
    }

    #[test]
    fn test_unterminated_passthrough_fails() {
        let err = environment("\\begin{verbatim}\nno end").unwrap_err();
        assert!(matches!(err, nom::Err::Failure(e) if e.message.contains("no matching")));
    }

    #[test]
    fn test_math_cell_keeps_ampersands_and_breaks() {
        let src = "\\begin{tabular}{l l}\n\
                   $\\begin{matrix} a & b \\end{matrix}$ & 1 \\\\\n\\end{tabular}";
        let (rest, env) = environment(src).unwrap();
        assert_eq!(rest, "");
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(
            *body,
            ExprList(vec![ExprList(vec![
                ExprList(vec![InlineMath("\\begin{matrix} a & b \\end{matrix}".into())]),
                ExprList(vec![s("1")]),
            ])])
        );

        let (_, env) = environment("\\begin{tabular}{l}\n$a \\\\ b$\n\\end{tabular}").unwrap();
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(
            *body,
            ExprList(vec![ExprList(vec![ExprList(vec![InlineMath("a \\\\ b".into())])])])
        );
    }

    #[test]
    fn test_table_cells_hold_macros_and_escapes() {
        let src = "\\begin{tabular}{l r}\nR\\&D & \\emph{x & y} &\n\\end{tabular}";
        let (_, env) = environment(src).unwrap();
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(
            *body,
            ExprList(vec![ExprList(vec![
                ExprList(vec![s("R\\&D")]),
                ExprList(vec![LatexExpression::macro_call(
                    "emph",
                    vec![ExprList(vec![s("x & y")])],
                )]),
                ExprList(vec![]),
            ])])
        );
    }

    #[test]
    fn test_table_errors_use_paragraph_positions() {
        let src = "\\begin{tabular}{l}\nA \\\\\nB & \\emph{open\n\\end{tabular}";
        let expr = crate::parser::parse(src);
        let ParseError(diagnostics) = &expr.items()[0] else {
            panic!("Expected parse error, got {:?}", expr);
        };
        assert_eq!(diagnostics[0].line, 4);
        assert_eq!(diagnostics[0].column, 1);
        assert!(diagnostics[0].message.contains("closing brace"));
    }

    #[test]
    fn test_comments_between_items() {
        let src = "\\begin{itemize}\n% todo\n\\item A\n% between\n\n\\item B\n\\end{itemize}";
        let (rest, env) = environment(src).unwrap();
        assert_eq!(rest, "");
        let Environment { body, .. } = env else {
            panic!("Expected environment");
        };
        assert_eq!(body.items().len(), 2);
        assert!(matches!(&body.items()[0], Item { .. }));
    }
}

//! Parser for MiniLaTeX source.
//!
//! Parsing is total: unparseable input becomes a
//! [`LatexExpression::ParseError`] leaf so the rest of the document can still
//! be rendered.

mod environment;
mod expression;
pub(crate) mod lexer;

pub use environment::{BodyKind, PASSTHROUGH};
pub use expression::SMACROS;
pub use lexer::{find_label, strip_labels, RESERVED};

use crate::ast::{Diagnostic, LatexExpression};
use expression::expression_list;

/// Parse one logical paragraph (or a whole document) into an `ExprList`.
///
/// A failure inside an environment fails the whole parse. A stray character at
/// the top level (such as an unmatched `}`) is reported and skipped, and
/// parsing resumes after it.
pub fn parse(text: &str) -> LatexExpression {
    let mut items: Vec<LatexExpression> = Vec::new();
    let mut remaining = text;

    loop {
        match expression_list(remaining) {
            Ok((rest, mut parsed)) => {
                items.append(&mut parsed);
                let Some(c) = rest.chars().next() else {
                    break;
                };
                let offset = text.len() - rest.len();
                let diagnostic = Diagnostic::at(text, offset, format!("unexpected '{}'", c));
                match items.last_mut() {
                    Some(LatexExpression::ParseError(diagnostics)) => diagnostics.push(diagnostic),
                    _ => items.push(LatexExpression::ParseError(vec![diagnostic])),
                }
                remaining = &rest[c.len_utf8()..];
            }
            Err(nom::Err::Failure(e)) | Err(nom::Err::Error(e)) => {
                let offset = text.len() - e.input.len();
                return failed(Diagnostic::at(text, offset, e.message));
            }
            Err(nom::Err::Incomplete(_)) => {
                let offset = text.len() - remaining.len();
                return failed(Diagnostic::at(text, offset, "unexpected end of input"));
            }
        }
    }

    LatexExpression::ExprList(items)
}

fn failed(diagnostic: Diagnostic) -> LatexExpression {
    LatexExpression::ExprList(vec![LatexExpression::ParseError(vec![diagnostic])])
}

/// Parse each logical paragraph independently.
pub fn parse_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> Vec<LatexExpression> {
    paragraphs.iter().map(|p| parse(p.as_ref())).collect()
}

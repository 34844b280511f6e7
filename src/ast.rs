//! Abstract Syntax Tree definitions for MiniLaTeX.

use serde::{Deserialize, Serialize};

/// A parsed MiniLaTeX construct.
///
/// The parse of one logical paragraph is always an [`LatexExpression::ExprList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatexExpression {
    /// Plain words, joined with single spaces
    Str(String),

    /// A `%` comment, without the leading `%`
    Comment(String),

    /// Inline math source, passed through untouched
    InlineMath(String),

    /// Display math source, passed through untouched
    DisplayMath(String),

    /// One `\item` of a list environment
    Item {
        level: u32,
        body: Box<LatexExpression>,
    },

    /// A macro call: `\name[opt]...{arg}...`
    Macro {
        name: String,
        optional_args: Vec<LatexExpression>,
        args: Vec<LatexExpression>,
    },

    /// A paragraph-style macro whose body runs to the next blank line
    SMacro {
        name: String,
        optional_args: Vec<LatexExpression>,
        args: Vec<LatexExpression>,
        body: Box<LatexExpression>,
    },

    /// `\begin{name}...\end{name}`
    Environment {
        name: String,
        args: Vec<LatexExpression>,
        body: Box<LatexExpression>,
    },

    /// A sequence of expressions
    ExprList(Vec<LatexExpression>),

    /// Recovery leaf for source that could not be parsed
    ParseError(Vec<Diagnostic>),
}

/// A parse diagnostic with a 1-based position inside the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic for the byte `offset` into `source`.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)
    }
}

/// Which kind of construct heads a paragraph, for reducer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadKind {
    Macro,
    SMacro,
    Env,
}

impl LatexExpression {
    /// Build a macro with required arguments only.
    pub fn macro_call(name: &str, args: Vec<LatexExpression>) -> Self {
        Self::Macro {
            name: name.to_string(),
            optional_args: Vec::new(),
            args,
        }
    }

    /// The items of an `ExprList`, or the expression itself as a one-element slice.
    pub fn items(&self) -> &[LatexExpression] {
        match self {
            Self::ExprList(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// The first top-level element of a paragraph.
    pub fn head(&self) -> Option<&LatexExpression> {
        match self {
            Self::ExprList(items) => items.first(),
            _ => None,
        }
    }

    /// Kind and name of a macro, smacro or environment.
    pub fn kind_and_name(&self) -> Option<(HeadKind, &str)> {
        match self {
            Self::Macro { name, .. } => Some((HeadKind::Macro, name)),
            Self::SMacro { name, .. } => Some((HeadKind::SMacro, name)),
            Self::Environment { name, .. } => Some((HeadKind::Env, name)),
            _ => None,
        }
    }

    /// Required argument `index` as plain text.
    pub fn arg_text(&self, index: usize) -> Option<String> {
        match self {
            Self::Macro { args, .. }
            | Self::SMacro { args, .. }
            | Self::Environment { args, .. } => args.get(index).map(LatexExpression::text),
            _ => None,
        }
    }

    /// Optional argument `index` as plain text.
    pub fn optional_arg_text(&self, index: usize) -> Option<String> {
        match self {
            Self::Macro { optional_args, .. } | Self::SMacro { optional_args, .. } => {
                optional_args.get(index).map(LatexExpression::text)
            }
            _ => None,
        }
    }

    /// Flatten to the plain text of its words and math, ignoring markup.
    pub fn text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::InlineMath(s) => format!("${}$", s),
            Self::DisplayMath(s) => format!("$${}$$", s),
            Self::Comment(_) | Self::ParseError(_) => String::new(),
            Self::Item { body, .. } => body.text(),
            Self::Macro { args, .. } => args
                .iter()
                .map(LatexExpression::text)
                .collect::<Vec<_>>()
                .join(" "),
            Self::SMacro { body, .. } | Self::Environment { body, .. } => body.text(),
            Self::ExprList(items) => items
                .iter()
                .map(LatexExpression::text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether this expression, or anything beneath it, is a parse error.
    pub fn has_error(&self) -> bool {
        match self {
            Self::ParseError(_) => true,
            Self::Item { body, .. } => body.has_error(),
            Self::Macro {
                optional_args,
                args,
                ..
            } => optional_args.iter().chain(args).any(LatexExpression::has_error),
            Self::SMacro {
                optional_args,
                args,
                body,
                ..
            } => {
                body.has_error() || optional_args.iter().chain(args).any(LatexExpression::has_error)
            }
            Self::Environment { args, body, .. } => {
                body.has_error() || args.iter().any(LatexExpression::has_error)
            }
            Self::ExprList(items) => items.iter().any(LatexExpression::has_error),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_position() {
        let source = "first line\nsecond \\end{x}";
        let d = Diagnostic::at(source, source.find("\\end").unwrap(), "bad");
        assert_eq!(d.line, 2);
        assert_eq!(d.column, 8);
        assert_eq!(d.to_string(), "line 2, column 8: bad");
    }

    #[test]
    fn test_text_flattens_args() {
        let expr = LatexExpression::macro_call(
            "title",
            vec![LatexExpression::ExprList(vec![
                LatexExpression::Str("On".into()),
                LatexExpression::InlineMath("x".into()),
            ])],
        );
        assert_eq!(expr.arg_text(0).as_deref(), Some("On $x$"));
        assert_eq!(expr.arg_text(1), None);
    }

    #[test]
    fn test_has_error_is_recursive() {
        let expr = LatexExpression::ExprList(vec![LatexExpression::Environment {
            name: "theorem".into(),
            args: vec![],
            body: Box::new(LatexExpression::ParseError(vec![])),
        }]);
        assert!(expr.has_error());
        assert!(!LatexExpression::Str("ok".into()).has_error());
    }
}

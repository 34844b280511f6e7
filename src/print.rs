//! Printing an AST back to MiniLaTeX source.
//!
//! Reparsing printed output gives the same tree for any expression without
//! parse errors. Whitespace is normalised along the way.

use crate::ast::LatexExpression;
use crate::parser::BodyKind;

/// Print an expression as MiniLaTeX source.
pub fn to_latex(expr: &LatexExpression) -> String {
    match expr {
        LatexExpression::Str(s) => s.clone(),
        LatexExpression::Comment(c) => format!("%{}\n", c),
        LatexExpression::InlineMath(m) => format!("${}$", m),
        LatexExpression::DisplayMath(m) => format!("$${}$$", m),
        LatexExpression::Item { body, .. } => format!("\\item {}", to_latex(body)),
        LatexExpression::Macro {
            name,
            optional_args,
            args,
        } => {
            if name == "linebreak" && optional_args.is_empty() && args.is_empty() {
                "\\\\".to_string()
            } else {
                format!("\\{}{}{}", name, optional(optional_args), braced(args))
            }
        }
        LatexExpression::SMacro {
            name,
            optional_args,
            args,
            body,
        } => format!(
            "\\{}{}{} {}",
            name,
            optional(optional_args),
            braced(args),
            to_latex(body)
        ),
        LatexExpression::Environment { name, args, body } => {
            let inner = match BodyKind::for_name(name) {
                BodyKind::Table => table(body),
                BodyKind::Items => lines(body.items()),
                BodyKind::Passthrough | BodyKind::Generic => to_latex(body),
            };
            format!(
                "\\begin{{{}}}{}\n{}\n\\end{{{}}}",
                name,
                braced(args),
                inner,
                name
            )
        }
        LatexExpression::ExprList(items) => items
            .iter()
            .map(to_latex)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        LatexExpression::ParseError(_) => String::new(),
    }
}

fn optional(args: &[LatexExpression]) -> String {
    args.iter().map(|a| format!("[{}]", to_latex(a))).collect()
}

fn braced(args: &[LatexExpression]) -> String {
    args.iter().map(|a| format!("{{{}}}", to_latex(a))).collect()
}

fn lines(items: &[LatexExpression]) -> String {
    items.iter().map(to_latex).collect::<Vec<_>>().join("\n")
}

fn table(body: &LatexExpression) -> String {
    body.items()
        .iter()
        .map(|row| {
            row.items()
                .iter()
                .map(to_latex)
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect::<Vec<_>>()
        .join(" \\\\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn reparses(source: &str) {
        let first = parse(source);
        assert!(!first.has_error(), "{:?}", first);
        let printed = to_latex(&first);
        assert_eq!(parse(&printed), first, "printed as {:?}", printed);
    }

    #[test]
    fn test_macro_source() {
        let expr = parse("\\cite[p. 3]{knuth}");
        assert_eq!(to_latex(&expr), "\\cite[p. 3]{knuth}");
    }

    #[test]
    fn test_environment_source() {
        let expr = parse("\\begin{itemize}\n\\item A\n\n\\item B\n\\end{itemize}");
        assert_eq!(
            to_latex(&expr),
            "\\begin{itemize}\n\\item A\n\\item B\n\\end{itemize}"
        );
    }

    #[test]
    fn test_reparse_is_stable() {
        reparses("Let $x$ be \\emph{very \\textbf{big}}, R\\&D. \\\\ done");
        reparses("% note\n\\section*{Intro} \\[ a \\]");
        reparses("\\begin{theorem}\n\\label{t} All \\( y \\) hold.\n\\end{theorem}");
        reparses("\\begin{tabular}{l r}\n\\hline\nA & $1$ \\\\\nB & 2\n\\end{tabular}");
        reparses("\\begin{equation}\nx = 1\n\\end{equation}");
        reparses("\\bibitem[K84]{knuth} Knuth, \\emph{TeX}");
    }
}

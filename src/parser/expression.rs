//! Recursive-descent grammar for MiniLaTeX expressions.
//!
//! Alternatives are tried in a fixed order and the first match wins:
//! comment, environment, display math, inline math, macro, smacro, words.

use crate::ast::LatexExpression;
use crate::parser::environment::environment;
use crate::parser::lexer::{
    comment, display_math, inline_math, is_optional_arg_stop, is_reserved, is_structural,
    line_break, macro_name, words, PResult, SyntaxError,
};
use nom::{
    branch::alt,
    character::complete::{char, multispace0},
    combinator::{map, verify},
    multi::many0,
    sequence::{preceded, terminated},
};

/// Macros whose body extends to the next blank line.
pub const SMACROS: &[&str] = &["bibitem"];

/// Parse a sequence of expressions, consuming surrounding whitespace.
pub fn expression_list(input: &str) -> PResult<Vec<LatexExpression>> {
    terminated(many0(preceded(multispace0, expression)), multispace0)(input)
}

/// Parse a single expression.
pub fn expression(input: &str) -> PResult<LatexExpression> {
    alt((
        map(comment, |c| LatexExpression::Comment(c.trim_end().to_string())),
        environment,
        map(display_math, |m| LatexExpression::DisplayMath(m.to_string())),
        map(inline_math, |m| LatexExpression::InlineMath(m.to_string())),
        macro_expression,
        smacro,
        map(words(is_structural), LatexExpression::Str),
    ))(input)
}

fn macro_expression(input: &str) -> PResult<LatexExpression> {
    alt((
        map(line_break, |_| LatexExpression::macro_call("linebreak", Vec::new())),
        macro_call,
    ))(input)
}

pub fn macro_call(input: &str) -> PResult<LatexExpression> {
    let (rest, name) = verify(macro_name, |n: &str| !is_reserved(n))(input)?;
    let (rest, optional_args) = many0(optional_arg)(rest)?;
    let (rest, args) = many0(arg)(rest)?;
    Ok((
        rest,
        LatexExpression::Macro {
            name: name.to_string(),
            optional_args,
            args,
        },
    ))
}

fn smacro(input: &str) -> PResult<LatexExpression> {
    let (rest, name) = verify(macro_name, |n: &str| SMACROS.contains(&n))(input)?;
    let (rest, optional_args) = many0(optional_arg)(rest)?;
    let (rest, args) = many0(arg)(rest)?;
    let end = rest.find("\n\n").unwrap_or(rest.len());
    let body = super::parse(&rest[..end]);
    Ok((
        &rest[end..],
        LatexExpression::SMacro {
            name: name.to_string(),
            optional_args,
            args,
            body: Box::new(body),
        },
    ))
}

/// Parse a braced argument `{...}` as an expression list.
pub fn arg(input: &str) -> PResult<LatexExpression> {
    let (rest, _) = char('{')(input)?;
    let (rest, items) = expression_list(rest)?;
    match char::<_, SyntaxError>('}')(rest) {
        Ok((rest, _)) => Ok((rest, LatexExpression::ExprList(items))),
        Err(_) => Err(nom::Err::Failure(SyntaxError::new(
            rest,
            "missing closing brace '}'",
        ))),
    }
}

/// Parse a bracketed optional argument `[...]` of words and inline math.
pub fn optional_arg(input: &str) -> PResult<LatexExpression> {
    let (rest, _) = char('[')(input)?;
    let (rest, items) = terminated(
        many0(preceded(
            multispace0,
            alt((
                map(inline_math, |m| LatexExpression::InlineMath(m.to_string())),
                map(words(is_optional_arg_stop), LatexExpression::Str),
            )),
        )),
        multispace0,
    )(rest)?;
    let (rest, _) = char(']')(rest)?;
    Ok((rest, LatexExpression::ExprList(items)))
}

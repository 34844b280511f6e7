//! Token-level parsers for MiniLaTeX source.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace1, not_line_ending, one_of, satisfy, space1},
    combinator::{not, opt, peek, recognize},
    multi::{many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// Macro names that belong to the grammar itself and never parse as macros.
pub const RESERVED: &[&str] = &["begin", "end", "item", "bibitem"];

/// Characters that may follow a backslash inside a word.
const ESCAPABLE: &str = "&%$#_{} ";

/// Parser error carrying the failing input and a readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError<'a> {
    pub input: &'a str,
    pub message: String,
}

impl<'a> SyntaxError<'a> {
    pub fn new(input: &'a str, message: impl Into<String>) -> Self {
        Self {
            input,
            message: message.into(),
        }
    }
}

impl<'a> nom::error::ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: nom::error::ErrorKind) -> Self {
        Self::new(input, format!("unexpected input ({})", kind.description()))
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

pub type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

/// Characters that end a word anywhere.
pub fn is_structural(c: char) -> bool {
    matches!(c, '\\' | '$' | '%' | '{' | '}')
}

/// Characters that end a word inside a `tabular` cell.
pub fn is_cell_stop(c: char) -> bool {
    is_structural(c) || c == '&'
}

/// Characters that end a word inside `[...]`.
pub fn is_optional_arg_stop(c: char) -> bool {
    is_structural(c) || c == ']'
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name.trim_end_matches('*'))
}

/// Parse a macro name (`\section`, `\section*`), returning the name without the backslash.
pub fn macro_name(input: &str) -> PResult<&str> {
    preceded(
        char('\\'),
        recognize(pair(
            satisfy(|c: char| c.is_ascii_alphabetic()),
            pair(take_while(|c: char| c.is_ascii_alphanumeric()), opt(char('*'))),
        )),
    )(input)
}

/// Parse a `%` comment up to (not including) the line ending.
pub fn comment(input: &str) -> PResult<&str> {
    preceded(char('%'), not_line_ending)(input)
}

/// Parse inline math (`$...$` or `\(...\)`).
pub fn inline_math(input: &str) -> PResult<&str> {
    alt((
        delimited(
            pair(char('$'), peek(not(char('$')))),
            take_until("$"),
            char('$'),
        ),
        delimited(tag("\\("), take_until("\\)"), tag("\\)")),
    ))(input)
}

/// Parse display math (`$$...$$` or `\[...\]`).
pub fn display_math(input: &str) -> PResult<&str> {
    alt((
        delimited(tag("$$"), take_until("$$"), tag("$$")),
        delimited(tag("\\["), take_until("\\]"), tag("\\]")),
    ))(input)
}

fn environment_name(input: &str) -> PResult<&str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '*')(input)
}

/// Parse `\begin{name}`, returning the name.
pub fn begin_marker(input: &str) -> PResult<&str> {
    delimited(tag("\\begin{"), environment_name, char('}'))(input)
}

/// Parse `\end{name}`, returning the name.
pub fn end_marker(input: &str) -> PResult<&str> {
    delimited(tag("\\end{"), environment_name, char('}'))(input)
}

/// Parse `\item`, refusing longer names such as `\itemsep`.
pub fn item_marker(input: &str) -> PResult<&str> {
    terminated(tag("\\item"), not(satisfy(|c: char| c.is_ascii_alphanumeric())))(input)
}

/// Parse the `\\` line break.
pub fn line_break(input: &str) -> PResult<&str> {
    tag("\\\\")(input)
}

fn escaped_char(input: &str) -> PResult<&str> {
    recognize(pair(char('\\'), one_of(ESCAPABLE)))(input)
}

/// Parse one word: a run of non-space characters not in `stop`, plus escapes.
pub fn word<'a>(stop: fn(char) -> bool) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    recognize(many1(alt((
        escaped_char,
        recognize(satisfy(move |c: char| !c.is_whitespace() && !stop(c))),
    ))))
}

/// Parse whitespace-separated words, joined with single spaces.
pub fn words<'a>(stop: fn(char) -> bool) -> impl FnMut(&'a str) -> PResult<'a, String> {
    move |input: &'a str| {
        let (rest, parts) = separated_list1(multispace1, word(stop))(input)?;
        Ok((rest, parts.join(" ")))
    }
}

/// Like [`words`], but words may only be separated by spaces and tabs, so the
/// run ends at a line break.
pub fn line_words<'a>(stop: fn(char) -> bool) -> impl FnMut(&'a str) -> PResult<'a, String> {
    move |input: &'a str| {
        let (rest, parts) = separated_list1(space1, word(stop))(input)?;
        Ok((rest, parts.join(" ")))
    }
}

/// Find `\label{...}` anywhere in raw text.
pub fn find_label(raw: &str) -> Option<&str> {
    let (_, label) = preceded(
        take_until::<_, _, SyntaxError>("\\label{"),
        delimited(tag("\\label{"), take_while1(|c: char| c != '}'), char('}')),
    )(raw)
    .ok()?;
    Some(label.trim())
}

/// Remove every `\label{...}` from raw text.
pub fn strip_labels(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find("\\label{") {
        out.push_str(&rest[..start]);
        match rest[start..].find('}') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_name() {
        assert_eq!(macro_name("\\emph{x}"), Ok(("{x}", "emph")));
        assert_eq!(macro_name("\\section*{A}"), Ok(("{A}", "section*")));
        assert!(macro_name("\\$").is_err());
        assert!(macro_name("\\2x").is_err());
    }

    #[test]
    fn test_math_delimiters() {
        assert_eq!(inline_math("$a^2$ rest"), Ok((" rest", "a^2")));
        assert_eq!(inline_math("\\(x\\)"), Ok(("", "x")));
        assert!(inline_math("$$x$$").is_err());
        assert_eq!(display_math("$$\\int x$$"), Ok(("", "\\int x")));
        assert_eq!(display_math("\\[ y \\] z"), Ok((" z", " y ")));
    }

    #[test]
    fn test_markers() {
        assert_eq!(begin_marker("\\begin{theorem}\nX"), Ok(("\nX", "theorem")));
        assert_eq!(end_marker("\\end{align*}"), Ok(("", "align*")));
        assert!(item_marker("\\itemsep").is_err());
        assert_eq!(item_marker("\\item x"), Ok((" x", "\\item")));
    }

    #[test]
    fn test_words_stop_at_structure() {
        assert_eq!(
            words(is_structural)("Hello,   big\nworld \\emph{x}"),
            Ok((" \\emph{x}", "Hello, big world".to_string()))
        );
        assert_eq!(
            words(is_optional_arg_stop)("one two] tail"),
            Ok(("] tail", "one two".to_string()))
        );
        assert_eq!(
            words(is_structural)("R\\&D costs"),
            Ok(("", "R\\&D costs".to_string()))
        );
    }

    #[test]
    fn test_labels_in_raw_text() {
        let raw = "\\label{e1}\nx = 1";
        assert_eq!(find_label(raw), Some("e1"));
        assert_eq!(strip_labels(raw), "\nx = 1");
        assert_eq!(find_label("x = 1"), None);
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved("begin"));
        assert!(is_reserved("item"));
        assert!(!is_reserved("emph"));
    }
}

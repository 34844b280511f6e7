//! Splitting source text into logical paragraphs.
//!
//! A logical paragraph is the unit of reparsing and re-rendering. Ordinary
//! paragraphs end at a blank line; an environment opened at the start of a
//! paragraph runs until its matching `\end`, so blank lines inside it are
//! kept.

use crate::parser::lexer::{begin_marker, end_marker, PResult};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::space0,
    combinator::{all_consuming, map},
    sequence::{delimited, terminated},
};

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType<'a> {
    Blank,
    Text,
    BeginBlock(&'a str),
    EndBlock(&'a str),
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Start,
    InParagraph,
    InBlock(String),
    IgnoreLine,
}

fn ignored_line(input: &str) -> PResult<()> {
    map(
        all_consuming(terminated(
            alt((tag("\\begin{thebibliography}"), tag("\\end{thebibliography}"))),
            space0,
        )),
        |_| (),
    )(input)
}

/// Classify a line for the segmenter.
pub fn classify(line: &str) -> LineType<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineType::Blank;
    }
    if ignored_line(trimmed).is_ok() {
        return LineType::Ignore;
    }
    if let Ok((_, name)) = delimited(space0, begin_marker, space0)(line) {
        return LineType::BeginBlock(name);
    }
    if let Ok((_, name)) = delimited(space0, end_marker, space0)(line) {
        return LineType::EndBlock(name);
    }
    LineType::Text
}

/// Line-driven state machine that accumulates logical paragraphs.
#[derive(Debug)]
struct Segmenter {
    state: State,
    current: Vec<String>,
    paragraphs: Vec<String>,
}

impl Segmenter {
    fn new() -> Self {
        Self {
            state: State::Start,
            current: Vec::new(),
            paragraphs: Vec::new(),
        }
    }

    fn push(&mut self, line: &str) {
        let line = line.trim_end();
        let kind = classify(line);
        let state = std::mem::replace(&mut self.state, State::Start);

        self.state = match (state, kind) {
            (State::Start | State::IgnoreLine, LineType::Blank) => State::Start,
            (State::Start | State::IgnoreLine, LineType::Ignore) => State::IgnoreLine,
            (State::Start | State::IgnoreLine, LineType::BeginBlock(name)) => {
                self.current.push(line.to_string());
                State::InBlock(name.to_string())
            }
            (State::Start | State::IgnoreLine, LineType::Text | LineType::EndBlock(_)) => {
                self.current.push(line.to_string());
                State::InParagraph
            }

            (State::InParagraph, LineType::Blank) => {
                self.flush();
                State::Start
            }
            (State::InParagraph, LineType::Ignore) => State::InParagraph,
            (State::InParagraph, _) => {
                self.current.push(line.to_string());
                State::InParagraph
            }

            (State::InBlock(open), LineType::EndBlock(name)) if name == open => {
                self.current.push(line.to_string());
                self.flush();
                State::Start
            }
            (State::InBlock(open), _) => {
                self.current.push(line.to_string());
                State::InBlock(open)
            }
        };
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let paragraph = self.current.join("\n");
        self.current.clear();
        if !paragraph.trim().is_empty() {
            self.paragraphs.push(paragraph);
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.paragraphs
    }
}

/// Split source text into logical paragraphs.
pub fn segment(text: &str) -> Vec<String> {
    let mut segmenter = Segmenter::new();
    for line in text.lines() {
        segmenter.push(line);
    }
    segmenter.finish()
}

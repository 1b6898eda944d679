//! Helper functions for parsing

use std::str::FromStr;

use crate::error::{ParseError, Result};
use crate::types::Vector3;

/// One line of a map file, split into whitespace separated tokens.
/// Anything after a `//` token is a comment and isn't included.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// 1-based
    pub number: usize,
    pub raw: &'a str,
    pub tokens: Vec<&'a str>,
}

/// Split `text` into lines of tokens.
pub fn tokenize(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(n, raw)| Line {
            number: n + 1,
            raw,
            tokens: raw.split_whitespace().take_while(|t| *t != "//").collect(),
        })
        .collect()
}

/// Parse a token as a number, reporting the line if it isn't one.
pub fn parse_num<T: FromStr>(line: usize, token: &str) -> Result<T> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Parse 3 tokens as a point.
/// # Panics
/// If there are fewer than 3 tokens.
pub fn parse_vec3(line: usize, tokens: &[&str]) -> Result<Vector3> {
    Ok(Vector3::new(
        parse_num(line, tokens[0])?,
        parse_num(line, tokens[1])?,
        parse_num(line, tokens[2])?,
    ))
}

#[test]
fn comments_end_lines() {
    let lines = tokenize("{\n\"classname\" \"worldspawn\" // the world\n// nothing\n}");

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1].tokens, vec!["\"classname\"", "\"worldspawn\""]);
    assert_eq!(lines[1].number, 2);
    assert!(lines[2].tokens.is_empty());
}

#[test]
fn bad_numbers_are_reported() {
    assert_eq!(parse_num::<f64>(3, "-12.5"), Ok(-12.5));
    assert_eq!(
        parse_num::<f64>(7, "twelve"),
        Err(ParseError::InvalidNumber {
            line: 7,
            token: "twelve".to_string()
        })
    );
}

//! Parses `patchDef2` blocks

use super::helpers::{parse_num, parse_vec3, Line};
use crate::error::{ParseError, Result};
use crate::types::Vector3;

/// Tokens in one control point: `( x y z s t )`
const POINT_TOKENS: usize = 7;

/// A patch exactly as written, before its size has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPatch {
    pub material: String,
    pub rows: usize,
    pub columns: usize,
    pub lines: Vec<Vec<Vector3>>,
}

/// Parse the lines between the braces of a `patchDef2`:
///
/// ```text
/// material
/// ( rows columns 0 0 0 )
/// (
/// ( ( x y z s t ) ( x y z s t ) ... )
/// ...
/// )
/// ```
///
/// `start` is the line number of the `patchDef2` keyword, used if the block is empty.
pub fn parse_patch(lines: &[Line], start: usize) -> Result<RawPatch> {
    if lines.len() < 4 {
        return Err(ParseError::InvalidPatch {
            line: lines.first().map_or(start, |l| l.number),
        });
    }

    let material = lines[0].tokens[0].to_string();

    let header = &lines[1];
    if header.tokens.len() < 4 || header.tokens[0] != "(" || header.tokens.last() != Some(&")") {
        return Err(ParseError::InvalidPatch {
            line: header.number,
        });
    }
    let rows = parse_num(header.number, header.tokens[1])?;
    let columns = parse_num(header.number, header.tokens[2])?;

    let open = &lines[2];
    if open.tokens != ["("] {
        return Err(ParseError::InvalidPatch { line: open.number });
    }
    let close = &lines[lines.len() - 1];
    if close.tokens != [")"] {
        return Err(ParseError::InvalidPatch { line: close.number });
    }

    let control_lines = lines[3..lines.len() - 1]
        .iter()
        .map(parse_control_line)
        .collect::<Result<Vec<_>>>()?;

    Ok(RawPatch {
        material,
        rows,
        columns,
        lines: control_lines,
    })
}

/// Parse `( ( x y z s t ) ( x y z s t ) ... )`, ignoring the texture coordinates.
fn parse_control_line(line: &Line) -> Result<Vec<Vector3>> {
    let tokens = &line.tokens;
    let invalid = ParseError::InvalidPatch { line: line.number };

    if tokens.len() < 2 || tokens[0] != "(" || tokens[tokens.len() - 1] != ")" {
        return Err(invalid);
    }

    let points = &tokens[1..tokens.len() - 1];
    if points.len() % POINT_TOKENS != 0 {
        return Err(invalid);
    }

    points
        .chunks(POINT_TOKENS)
        .map(|point| {
            if point[0] != "(" || point[POINT_TOKENS - 1] != ")" {
                return Err(invalid.clone());
            }
            parse_vec3(line.number, &point[1..4])
        })
        .collect()
}

#[cfg(test)]
fn lines(text: &str) -> Vec<Line<'_>> {
    super::helpers::tokenize(text)
        .into_iter()
        .filter(|l| !l.tokens.is_empty())
        .collect()
}

#[test]
fn parse_small_patch() {
    let patch = parse_patch(
        &lines(
            "
            base_trim/pewter
            ( 3 3 0 0 0 )
            (
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            ( ( 64 0 32 0.5 0 ) ( 64 64 32 0.5 0.5 ) ( 64 128 32 0.5 1 ) )
            ( ( 128 0 0 1 0 ) ( 128 64 0 1 0.5 ) ( 128 128 0 1 1 ) )
            )
            ",
        ),
        1,
    )
    .unwrap();

    assert_eq!(patch.material, "base_trim/pewter");
    assert_eq!((patch.rows, patch.columns), (3, 3));
    assert_eq!(patch.lines.len(), 3);
    assert_eq!(patch.lines[1][1], Vector3::new(64.0, 64.0, 32.0));
    assert_eq!(patch.lines[2][2], Vector3::new(128.0, 128.0, 0.0));
}

#[test]
fn size_not_checked_here() {
    let patch = parse_patch(
        &lines(
            "
            a
            ( 5 3 0 0 0 )
            (
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            )
            ",
        ),
        1,
    )
    .unwrap();

    assert_eq!((patch.rows, patch.columns), (5, 3));
    assert_eq!(patch.lines.len(), 1);
}

#[test]
fn broken_control_point() {
    let result = parse_patch(
        &lines(
            "
            a
            ( 3 3 0 0 0 )
            (
            ( ( 0 0 0 0 0 ) 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            )
            ",
        ),
        1,
    );

    assert_eq!(result, Err(ParseError::InvalidPatch { line: 5 }));
}

#[test]
fn missing_brackets() {
    let unopened = parse_patch(
        &lines(
            "
            a
            ( 3 3 0 0 0 )
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            )
            ",
        ),
        1,
    );
    assert_eq!(unopened, Err(ParseError::InvalidPatch { line: 4 }));

    let unclosed = parse_patch(
        &lines(
            "
            a
            ( 3 3 0 0 0 )
            (
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            ( ( 0 0 0 0 0 ) ( 0 64 0 0 0.5 ) ( 0 128 0 0 1 ) )
            ",
        ),
        1,
    );
    assert_eq!(unclosed, Err(ParseError::InvalidPatch { line: 6 }));
}

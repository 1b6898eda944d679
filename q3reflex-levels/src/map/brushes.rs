//! Parses brush faces

use super::helpers::{parse_num, parse_vec3, Line};
use crate::error::{ParseError, Result};
use crate::geometry::{Plane, PlaneBrushFace};
use crate::materials::substitute_material;
use crate::types::TexParams;

/// Tokens in a face line we use. Anything after these (content flags etc) is ignored.
const FACE_TOKENS: usize = 21;

/// Parse a line like
/// `( x y z ) ( x y z ) ( x y z ) material offset_u offset_v rotation scale_u scale_v`.
///
/// Returns `None` for lines that aren't faces at all.
pub fn parse_face(line: &Line) -> Result<Option<PlaneBrushFace>> {
    let tokens = &line.tokens;
    if tokens.first() != Some(&"(") || tokens.get(4) != Some(&")") {
        return Ok(None);
    }

    let is_point = |start: usize| tokens[start] == "(" && tokens[start + 4] == ")";
    if tokens.len() < FACE_TOKENS || !is_point(5) || !is_point(10) {
        return Err(ParseError::InvalidFace { line: line.number });
    }

    let n = line.number;
    let p0 = parse_vec3(n, &tokens[1..4])?;
    let p1 = parse_vec3(n, &tokens[6..9])?;
    let p2 = parse_vec3(n, &tokens[11..14])?;

    Ok(Some(PlaneBrushFace {
        // quake lists the points clockwise as seen from outside
        plane: Plane::new(p0, p2, p1),
        material: substitute_material(tokens[15]),
        tex: TexParams {
            offset_u: parse_num(n, tokens[16])?,
            offset_v: parse_num(n, tokens[17])?,
            rotation: parse_num(n, tokens[18])?,
            scale_u: parse_num(n, tokens[19])?,
            scale_v: parse_num(n, tokens[20])?,
        },
    }))
}

#[cfg(test)]
fn line(text: &str) -> Line<'_> {
    Line {
        number: 12,
        raw: text,
        tokens: text.split_whitespace().collect(),
    }
}

#[test]
fn parse_top_face() {
    use crate::types::Vector3;

    let face = parse_face(&line(
        "( 0 0 64 ) ( 0 1 64 ) ( 1 0 64 ) base_wall/concrete 16 -8 90 0.5 0.25 0 0 0",
    ))
    .unwrap()
    .unwrap();

    assert_eq!(face.material, "base_wall/concrete");
    assert_eq!(
        face.tex,
        TexParams {
            offset_u: 16.0,
            offset_v: -8.0,
            rotation: 90.0,
            scale_u: 0.5,
            scale_v: 0.25
        }
    );

    // top of a brush, so the normal points up
    let (normal, dist) = face.plane.normal_and_offset().unwrap();
    assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(dist, 64.0);
}

#[test]
fn clip_material_substituted() {
    let face = parse_face(&line(
        "( 0 0 64 ) ( 0 1 64 ) ( 1 0 64 ) common/clip 0 0 0 1 1 0 0 0",
    ))
    .unwrap()
    .unwrap();

    assert_eq!(face.material, crate::materials::REFLEX_CLIP);
}

#[test]
fn not_a_face() {
    assert_eq!(parse_face(&line("patchDef2")), Ok(None));
    assert_eq!(parse_face(&line("( 3 3 0 0 0 )")), Ok(None));
}

#[test]
fn malformed_faces() {
    assert_eq!(
        parse_face(&line("( 0 0 64 ) ( 0 1 64 ) ( 1 0 64 ) a 0 0 0 1")),
        Err(ParseError::InvalidFace { line: 12 })
    );
    assert_eq!(
        parse_face(&line("( 0 0 64 ) ( 0 1 x ) ( 1 0 64 ) a 0 0 0 1 1")),
        Err(ParseError::InvalidNumber {
            line: 12,
            token: "x".to_string()
        })
    );
}

/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Parsing Quake 3 `.map` source files

mod brushes;
mod entities;
mod helpers;
mod patches;

use std::collections::HashMap;
use std::mem;

use log::{debug, warn};

pub use self::brushes::parse_face;
pub use self::entities::{parse_property, Entity};
pub use self::helpers::{tokenize, Line};
pub use self::patches::{parse_patch, RawPatch};

use crate::error::{ParseError, Result};
use crate::geometry::{PatchControlGrid, PlaneBrush};

/// Everything in a map file we know how to convert.
#[derive(Debug, Clone, Default)]
pub struct Q3Map {
    pub brushes: Vec<PlaneBrush>,
    pub patches: Vec<PatchControlGrid>,
    pub entities: Vec<Entity>,
}

/// Which block of the file the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    TopLevel,
    Entity,
    Brush,
    Patch,
}

/// What a line means, given the state it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Nothing,
    BeginEntity,
    EndEntity,
    BeginBrush,
    EndBrush,
    BeginPatch,
    EndPatch,
    Property,
    BrushFace,
    PatchLine,
}

/// Work out what a line does and which state it leaves the parser in.
pub fn transition(state: ParserState, tokens: &[&str]) -> (ParserState, Action) {
    use self::Action::*;
    use self::ParserState::*;

    match (state, tokens) {
        (_, []) => (state, Nothing),

        (TopLevel, ["{"]) => (Entity, BeginEntity),
        (Entity, ["}"]) => (TopLevel, EndEntity),
        (Entity, ["{"]) => (Brush, BeginBrush),
        (Entity, [_, _, ..]) => (Entity, Property),

        (Brush, ["}"]) => (Entity, EndBrush),
        (Brush, ["patchDef2"]) => (Patch, BeginPatch),
        (Brush, [_, _, ..]) => (Brush, BrushFace),

        (Patch, ["{"]) => (Patch, Nothing),
        (Patch, ["}"]) => (Brush, EndPatch),
        (Patch, _) => (Patch, PatchLine),

        _ => (state, Nothing),
    }
}

/// Parse the text of a Quake 3 map.
///
/// Brushes and patches from every entity end up in one list each. Patches with a size that
/// doesn't match their control points are skipped.
pub fn parse_map(text: &str) -> Result<Q3Map> {
    let mut map = Q3Map::default();

    let mut state = ParserState::TopLevel;
    let mut attributes = HashMap::new();
    let mut brush = PlaneBrush::default();
    let mut patch_start = 0;
    let mut patch_lines = Vec::new();

    for line in tokenize(text) {
        let (next, action) = transition(state, &line.tokens);
        match action {
            Action::Nothing => {}
            Action::BeginEntity => attributes.clear(),
            Action::EndEntity => {
                if let Some(entity) = Entity::from_attributes(mem::take(&mut attributes)) {
                    map.entities.push(entity);
                }
            }
            Action::Property => {
                if let Some((key, value)) = parse_property(line.raw) {
                    attributes.insert(key, value);
                }
            }
            Action::BeginBrush => brush = PlaneBrush::default(),
            Action::EndBrush => {
                // blocks that only hold a patch have no faces
                if !brush.faces.is_empty() {
                    map.brushes.push(mem::take(&mut brush));
                }
            }
            Action::BrushFace => match parse_face(&line)? {
                Some(face) => brush.faces.push(face),
                None => debug!("Line {}: not a brush face, skipping", line.number),
            },
            Action::BeginPatch => {
                patch_start = line.number;
                patch_lines.clear();
            }
            Action::PatchLine => patch_lines.push(line),
            Action::EndPatch => {
                let raw = parse_patch(&patch_lines, patch_start)?;
                match PatchControlGrid::new(raw.material, raw.rows, raw.columns, raw.lines) {
                    Ok(grid) => map.patches.push(grid),
                    Err(e) => warn!("Skipping patch at line {}: {}", patch_start, e),
                }
            }
        }
        state = next;
    }

    if state != ParserState::TopLevel {
        return Err(ParseError::UnexpectedEof);
    }

    debug!(
        "Parsed {} brushes, {} patches, {} entities",
        map.brushes.len(),
        map.patches.len(),
        map.entities.len()
    );

    Ok(map)
}

#[test]
fn transitions() {
    use self::Action::*;
    use self::ParserState::*;

    assert_eq!(transition(TopLevel, &["{"]), (Entity, BeginEntity));
    assert_eq!(transition(Entity, &["{"]), (Brush, BeginBrush));
    assert_eq!(transition(Brush, &["patchDef2"]), (Patch, BeginPatch));
    assert_eq!(transition(Patch, &["{"]), (Patch, Nothing));
    assert_eq!(transition(Patch, &["("]), (Patch, PatchLine));
    assert_eq!(transition(Patch, &["}"]), (Brush, EndPatch));
    assert_eq!(transition(Brush, &["}"]), (Entity, EndBrush));
    assert_eq!(transition(Entity, &["}"]), (TopLevel, EndEntity));

    assert_eq!(
        transition(Entity, &["\"classname\"", "\"worldspawn\""]),
        (Entity, Property)
    );
    assert_eq!(transition(TopLevel, &["}"]), (TopLevel, Nothing));
    assert_eq!(transition(Brush, &[]), (Brush, Nothing));
}

#[test]
fn unclosed_entity() {
    assert_eq!(
        parse_map("{\n\"classname\" \"worldspawn\"\n{\n").unwrap_err(),
        ParseError::UnexpectedEof
    );
}

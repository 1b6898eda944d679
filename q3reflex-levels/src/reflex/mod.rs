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

//! Writing Reflex `.map` files

mod entities;

pub use self::entities::PlayerSpawn;

use std::io::Write;

use log::{debug, info};

use crate::convert::ConvertedLevel;
use crate::coords::{Q3System, ReflexSystem, SwizzleFromTo, Swizzler};
use crate::cull::cull_reason;
use crate::error::ExportError;
use crate::geometry::PolyBrush;
use crate::materials::{MarkerMaterial, REFLEX_NOLIGHT};
use crate::types::{ExportFlags, Vector3};

pub const MAP_VERSION: u32 = 8;

/// Written before every face's material
const FACE_COLOUR: &str = "0x00000000";

/// Quake texture scales are half of Reflex ones.
const TEX_SCALE: f64 = 2.0;

fn to_reflex(v: Vector3) -> Vector3 {
    <Swizzler as SwizzleFromTo<Q3System, ReflexSystem>>::swizzled(v)
}

/// Write a whole level: the world, every brush that isn't culled, then player spawns.
pub fn write_map<W: Write>(out: &mut W, level: &ConvertedLevel) -> Result<(), ExportError> {
    let flags = level.settings.flags;

    writeln!(out, "reflex map version {}", MAP_VERSION)?;
    writeln!(out, "global")?;
    writeln!(out, "\tentity")?;
    writeln!(out, "\t\ttype WorldSpawn")?;

    let patch_brushes: &[PolyBrush] = if flags.contains(ExportFlags::NO_PATCHES) {
        &[]
    } else {
        &level.patch_brushes
    };

    let mut written = 0;
    let mut culled = 0;
    for (i, brush) in level.brushes.iter().chain(patch_brushes).enumerate() {
        match cull_reason(brush, flags) {
            Some(reason) => {
                debug!("Culling brush {}: {:?}", i, reason);
                culled += 1;
            }
            None => {
                write_brush(out, brush, flags)?;
                written += 1;
            }
        }
    }

    let mut spawns = 0;
    for spawn in level.entities.iter().filter_map(PlayerSpawn::from_entity) {
        write_spawn(out, &spawn)?;
        spawns += 1;
    }

    info!(
        "Wrote {} brushes ({} culled) and {} spawns",
        written, culled, spawns
    );

    Ok(())
}

/// Write one brush. Doesn't check whether it should be culled.
pub fn write_brush<W: Write>(
    out: &mut W,
    brush: &PolyBrush,
    flags: ExportFlags,
) -> Result<(), ExportError> {
    writeln!(out, "\tbrush")?;

    writeln!(out, "\t\tvertices")?;
    for v in brush.vertices.iter() {
        let v = to_reflex(*v);
        writeln!(out, "\t\t\t{:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    writeln!(out, "\t\tfaces")?;
    for face in brush.faces.iter().filter(|f| f.indices.len() >= 3) {
        write!(
            out,
            "\t\t\t{:.6} {:.6} {:.6} {:.6} {:.6}",
            face.tex.offset_u,
            face.tex.offset_v,
            face.tex.scale_u * TEX_SCALE,
            face.tex.scale_v * TEX_SCALE,
            face.tex.rotation
        )?;
        for i in face.indices.iter() {
            write!(out, " {}", i)?;
        }
        writeln!(out, " {} {}", FACE_COLOUR, export_material(&face.material, flags))?;
    }

    Ok(())
}

/// The material to write for a face. With `ALL_CAULK`, only triggers and clips keep theirs.
fn export_material(material: &str, flags: ExportFlags) -> &str {
    if !flags.contains(ExportFlags::ALL_CAULK) {
        return material;
    }

    match MarkerMaterial::from_name(material) {
        Some(MarkerMaterial::Trigger) | Some(MarkerMaterial::Clip) => material,
        _ => REFLEX_NOLIGHT,
    }
}

pub fn write_spawn<W: Write>(out: &mut W, spawn: &PlayerSpawn) -> Result<(), ExportError> {
    let position = to_reflex(spawn.position);

    writeln!(out, "\tentity")?;
    writeln!(out, "\t\ttype PlayerSpawn")?;
    writeln!(
        out,
        "\t\tVector3 position {:.6} {:.6} {:.6}",
        position.x, position.y, position.z
    )?;
    writeln!(
        out,
        "\t\tVector3 angles {:.6} {:.6} {:.6}",
        spawn.angle, 0.0, 0.0
    )?;

    // reflex only wants to know the flag is there
    if spawn.team_a {
        writeln!(out, "\t\tBool8 TeamA 0")?;
    }
    if spawn.team_b {
        writeln!(out, "\t\tBool8 TeamB 0")?;
    }

    Ok(())
}

#[test]
fn all_caulk_keeps_triggers_and_clips() {
    use crate::materials::REFLEX_CLIP;

    assert_eq!(export_material("base/wall", ExportFlags::empty()), "base/wall");
    assert_eq!(export_material("base/wall", ExportFlags::ALL_CAULK), REFLEX_NOLIGHT);
    assert_eq!(
        export_material("common/trigger", ExportFlags::ALL_CAULK),
        "common/trigger"
    );
    assert_eq!(export_material(REFLEX_CLIP, ExportFlags::ALL_CAULK), REFLEX_CLIP);
}

#[test]
fn spawn_output() {
    let mut out = Vec::new();
    write_spawn(
        &mut out,
        &PlayerSpawn {
            position: Vector3::new(1.0, 2.0, 3.0),
            angle: 90.0,
            team_a: true,
            team_b: false,
        },
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\tentity\n\
         \t\ttype PlayerSpawn\n\
         \t\tVector3 position 1.000000 3.000000 2.000000\n\
         \t\tVector3 angles 90.000000 0.000000 0.000000\n\
         \t\tBool8 TeamA 0\n"
    );
}

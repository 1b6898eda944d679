// Copyright (C) Oscar Shrimpton 2019

// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.

// You should have received a copy of the GNU General Public License along
// with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Whole maps, from source text to Reflex output
extern crate q3reflex_levels;

use q3reflex_levels::materials::{REFLEX_CLIP, REFLEX_NOLIGHT};
use q3reflex_levels::{
    convert, parse_map, reflex, ConversionSettingsBuilder, ExportFlags, ParseError, Vector3,
};

/// The six faces of a box, as written in a map file.
fn box_brush(min: [i32; 3], max: [i32; 3], material: &str) -> String {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let tail = format!("{} 0 0 0 0.5 0.5 0 0 0", material);

    let faces = [
        // +z, -z
        [(x0, y0, z1), (x0, y0 + 1, z1), (x0 + 1, y0, z1)],
        [(x0, y0, z0), (x0 + 1, y0, z0), (x0, y0 + 1, z0)],
        // +x, -x
        [(x1, y0, z0), (x1, y0, z0 + 1), (x1, y0 + 1, z0)],
        [(x0, y0, z0), (x0, y0 + 1, z0), (x0, y0, z0 + 1)],
        // +y, -y
        [(x0, y1, z0), (x0 + 1, y1, z0), (x0, y1, z0 + 1)],
        [(x0, y0, z0), (x0, y0, z0 + 1), (x0 + 1, y0, z0)],
    ];

    let mut out = String::from("{\n");
    for points in faces.iter() {
        for (x, y, z) in points.iter() {
            out.push_str(&format!("( {} {} {} ) ", x, y, z));
        }
        out.push_str(&tail);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

const PATCH: &str = "{
patchDef2
{
base_trim/pewter
( 3 3 0 0 0 )
(
( ( 0 0 0 0 0 ) ( 0 32 0 0 0 ) ( 0 64 0 0 0 ) )
( ( 32 0 16 0 0 ) ( 32 32 16 0 0 ) ( 32 64 16 0 0 ) )
( ( 64 0 0 0 0 ) ( 64 32 0 0 0 ) ( 64 64 0 0 0 ) )
)
}
}
";

const SPAWN: &str = "{
\"classname\" \"info_player_deathmatch\"
\"origin\" \"32 48 16\"
\"angle\" \"90\"
\"spawnflags\" \"1\"
}
";

fn test_map() -> String {
    let mut text = String::from("// entity 0\n{\n\"classname\" \"worldspawn\"\n");
    text.push_str(&box_brush([0, 0, 0], [64, 128, 32], "base_wall/concrete"));
    text.push_str(&box_brush([128, 0, 0], [160, 32, 32], "common/clip"));
    text.push_str(&box_brush([0, 256, 0], [16, 272, 16], "common/hint"));
    text.push_str(PATCH);
    text.push_str("}\n");
    text.push_str(SPAWN);
    text
}

fn export(flags: ExportFlags) -> String {
    let map = parse_map(&test_map()).unwrap();
    let settings = ConversionSettingsBuilder::default()
        .flags(flags)
        .build()
        .unwrap();
    let level = convert(&map, &settings);

    let mut out = Vec::new();
    reflex::write_map(&mut out, &level).unwrap();
    String::from_utf8(out).unwrap()
}

fn count_brushes(out: &str) -> usize {
    out.lines().filter(|l| *l == "\tbrush").count()
}

#[test]
fn test_parse() {
    let map = parse_map(&test_map()).unwrap();

    assert_eq!(map.brushes.len(), 3);
    assert_eq!(map.patches.len(), 1);
    assert_eq!(map.entities.len(), 1);

    assert_eq!(map.brushes[1].faces[0].material, REFLEX_CLIP);
    assert_eq!(map.patches[0].material(), "base_trim/pewter");
    assert_eq!(map.patches[0].get(1, 1), Vector3::new(32.0, 32.0, 16.0));
    assert_eq!(map.entities[0].get_attr("origin"), Some("32 48 16"));
}

#[test]
fn test_convert() {
    let map = parse_map(&test_map()).unwrap();
    let level = convert(&map, &Default::default());

    assert_eq!(level.brushes.len(), 3);
    for brush in level.brushes.iter() {
        assert_eq!(brush.vertices.len(), 8);
        assert_eq!(brush.faces.len(), 6);
    }

    // default tessellation is 3x3 cells
    assert_eq!(level.patch_brushes.len(), 9);
}

#[test]
fn test_export() {
    let out = export(ExportFlags::empty());

    assert!(out.starts_with("reflex map version 8\nglobal\n\tentity\n\t\ttype WorldSpawn\n"));

    // the hint brush is culled
    assert_eq!(count_brushes(&out), 2 + 9);
    assert!(!out.contains("common/hint"));
    assert!(out.contains(REFLEX_CLIP));

    // y and z swap
    assert!(out.contains("\n\t\t\t64.000000 32.000000 128.000000\n"));

    let box_faces: Vec<&str> = out
        .lines()
        .filter(|l| l.ends_with(" 0x00000000 base_wall/concrete"))
        .collect();
    assert_eq!(box_faces.len(), 6);
    for line in box_faces {
        assert!(line.starts_with("\t\t\t0.000000 0.000000 1.000000 1.000000 0.000000 "));
        assert_eq!(line.split_whitespace().count(), 5 + 4 + 2);
    }

    assert!(out.ends_with(
        "\tentity\n\
         \t\ttype PlayerSpawn\n\
         \t\tVector3 position 32.000000 16.000000 48.000000\n\
         \t\tVector3 angles 180.000000 0.000000 0.000000\n\
         \t\tBool8 TeamA 0\n"
    ));
}

#[test]
fn test_flags() {
    let out = export(ExportFlags::NO_CLIP);
    assert_eq!(count_brushes(&out), 1 + 9);
    assert!(!out.contains(REFLEX_CLIP));

    let out = export(ExportFlags::NO_PATCHES);
    assert_eq!(count_brushes(&out), 2);
    assert!(!out.contains("base_trim/pewter"));
    assert!(!out.contains(REFLEX_NOLIGHT));

    let out = export(ExportFlags::ALL_CAULK);
    assert_eq!(count_brushes(&out), 2 + 9);
    assert!(!out.contains("base_wall/concrete"));
    assert!(!out.contains("base_trim/pewter"));
    assert!(out.contains(REFLEX_CLIP));
}

#[test]
fn bad_number() {
    let text = "{\n\"classname\" \"worldspawn\"\n{\n\
                ( 0 0 64 ) ( 0 1 64 ) ( 1 0 sixty ) a 0 0 0 0.5 0.5 0 0 0\n\
                }\n}\n";

    assert_eq!(
        parse_map(text).unwrap_err(),
        ParseError::InvalidNumber {
            line: 4,
            token: "sixty".to_string()
        }
    );
}

#[test]
fn malformed_patch_is_skipped() {
    let patch = PATCH.replace("( 3 3 0 0 0 )", "( 3 5 0 0 0 )");
    let text = format!(
        "{{\n\"classname\" \"worldspawn\"\n{}{}}}\n",
        box_brush([0, 0, 0], [8, 8, 8], "a"),
        patch
    );

    let map = parse_map(&text).unwrap();
    assert_eq!(map.brushes.len(), 1);
    assert!(map.patches.is_empty());
}

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

//! Tessellating patches
#[macro_use]
extern crate approx;
extern crate q3reflex_levels;

mod helpers;
use helpers::*;

use q3reflex_levels::geometry::{
    build_patch_brushes, sample_patch, PatchControls, PATCH_THICKNESS,
};
use q3reflex_levels::materials::REFLEX_NOLIGHT;
use q3reflex_levels::{is_exportable, ExportFlags, TexParams, Vector3};

/// A 64x64 square in the xy plane, with the middle control point raised by `bulge`.
fn square(bulge: f64) -> PatchControls {
    let mut controls = [[Vector3::zeros(); 3]; 3];
    for (row, line) in controls.iter_mut().enumerate() {
        for (column, point) in line.iter_mut().enumerate() {
            *point = Vector3::new(row as f64 * 32.0, column as f64 * 32.0, 0.0);
        }
    }
    controls[1][1].z = bulge;
    controls
}

#[test]
fn single_cell_uses_corners() {
    let controls = square(40.0);
    let brushes = build_patch_brushes(&controls, 1, "base_trim/pewter", TexParams::default());

    assert_eq!(brushes.len(), 1);
    let brush = &brushes[0];

    assert_eq!(brush.vertices[0], controls[0][0]);
    assert_eq!(brush.vertices[1], controls[2][0]);
    assert_eq!(brush.vertices[2], controls[2][2]);
    assert_eq!(brush.vertices[3], controls[0][2]);

    // flat cell facing +z, so the back is one unit below
    for k in 0..4 {
        assert_relative_eq!(
            brush.vertices[k + 4],
            brush.vertices[k] - Vector3::new(0.0, 0.0, PATCH_THICKNESS),
            epsilon = 1e-9
        );
    }
}

#[test]
fn brush_count_is_tess_factor_squared() {
    let controls = square(24.0);
    for tess in 1..=7 {
        let brushes = build_patch_brushes(&controls, tess, "a", TexParams::default());
        assert_eq!(brushes.len(), (tess * tess) as usize, "tess factor {}", tess);
    }
}

#[test]
fn samples_stay_in_control_bounds() {
    let mut controls = square(-60.0);
    controls[0][2].z = 20.0;
    controls[2][1].y = 80.0;

    let min = controls
        .iter()
        .flatten()
        .fold(Vector3::repeat(f64::INFINITY), |acc, p| acc.inf(p));
    let max = controls
        .iter()
        .flatten()
        .fold(Vector3::repeat(f64::NEG_INFINITY), |acc, p| acc.sup(p));

    for p in sample_patch(&controls, 7).iter().flatten() {
        for axis in 0..3 {
            assert!(p[axis] >= min[axis] - 1e-9 && p[axis] <= max[axis] + 1e-9);
        }
    }
}

#[test]
fn slabs_are_closed() {
    let brushes = build_patch_brushes(&square(32.0), 4, "base_trim/pewter", TexParams::default());

    for brush in brushes.iter() {
        assert_eq!(brush.vertices.len(), 8);
        assert_eq!(brush.faces.len(), 6);
        assert!(brush.faces.iter().all(|f| f.indices.len() == 4));

        assert_eq!(brush.faces[0].material, "base_trim/pewter");
        assert_eq!(brush.faces[1].material, "base_trim/pewter");
        assert!(brush.faces[2..].iter().all(|f| f.material == REFLEX_NOLIGHT));

        assert_closed(brush);
        assert!(is_exportable(brush, ExportFlags::empty()));
    }
}

#[test]
fn flat_slab_faces_outwards() {
    let brushes = build_patch_brushes(&square(0.0), 2, "a", TexParams::default());

    assert_eq!(brushes.len(), 4);
    for brush in brushes.iter() {
        assert_planar(brush);
        assert_outward(brush);
    }
}

#[test]
fn texture_params_are_kept() {
    let tex = TexParams {
        scale_u: 0.5,
        ..TexParams::default()
    };
    let brushes = build_patch_brushes(&square(8.0), 2, "a", tex);

    assert!(brushes
        .iter()
        .flat_map(|b| b.faces.iter())
        .all(|f| f.tex == tex));
}

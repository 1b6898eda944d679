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

//! Tessellates bezier patches into thin brushes
//!
//! Reflex has no curved surfaces and every piece of geometry has to be a closed solid,
//! so each patch is sampled on a grid and every cell of the grid becomes a slab-shaped brush.

use log::debug;

use super::brush::{PolyBrush, PolyBrushFace};
use super::{PLANE_EPSILON, WELD_EPSILON};
use crate::error::GeometryError;
use crate::materials::REFLEX_NOLIGHT;
use crate::types::{TexParams, Vector3};

pub const MIN_TESS_FACTOR: u32 = 1;
pub const MAX_TESS_FACTOR: u32 = 7;

/// How thick the slab behind each tessellated cell is.
pub const PATCH_THICKNESS: f64 = 1.0;

/// The control points of one biquadratic patch, indexed `[row][column]`.
pub type PatchControls = [[Vector3; 3]; 3];

/// A grid of bezier control points, as found in a `patchDef2`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchControlGrid {
    material: String,
    rows: usize,
    columns: usize,
    /// Row-major
    points: Vec<Vector3>,
}

impl PatchControlGrid {
    /// Create a grid of `rows` x `columns` from a list of rows.
    /// Fails unless the given rows match the declared size, and the size is at least 3x3.
    pub fn new(
        material: String,
        rows: usize,
        columns: usize,
        lines: Vec<Vec<Vector3>>,
    ) -> Result<PatchControlGrid, GeometryError> {
        let malformed = |found_columns| GeometryError::MalformedPatchGrid {
            rows,
            columns,
            found_rows: lines.len(),
            found_columns,
        };

        if rows < 3 || columns < 3 || lines.len() != rows {
            return Err(malformed(lines.first().map_or(0, Vec::len)));
        }
        if let Some(line) = lines.iter().find(|l| l.len() != columns) {
            return Err(malformed(line.len()));
        }

        Ok(PatchControlGrid {
            material,
            rows,
            columns,
            points: lines.into_iter().flatten().collect(),
        })
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// # Panics
    /// If the row or column is out of range
    pub fn get(&self, row: usize, column: usize) -> Vector3 {
        assert!(row < self.rows && column < self.columns);
        self.points[row * self.columns + column]
    }

    /// The 3x3 patch with its first control point at `(row, column)`.
    pub fn window(&self, row: usize, column: usize) -> PatchControls {
        let mut controls = [[Vector3::zeros(); 3]; 3];
        for (a, line) in controls.iter_mut().enumerate() {
            for (b, point) in line.iter_mut().enumerate() {
                *point = self.get(row + a, column + b);
            }
        }
        controls
    }

    /// Every 3x3 patch in the grid, row by row. Neighbouring patches overlap by one row or
    /// column of control points, so a grid of R x C gives (R - 2) x (C - 2) patches.
    pub fn windows(&self) -> impl Iterator<Item = PatchControls> + '_ {
        (0..self.rows - 2)
            .flat_map(move |r| (0..self.columns - 2).map(move |c| self.window(r, c)))
    }
}

/// Quadratic interpolation between three points.
fn quadratic(p0: &Vector3, p1: &Vector3, p2: &Vector3, t: f64) -> Vector3 {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    a.lerp(&b, t)
}

/// Evaluate the patch at `(u, v)`. `u` runs along rows, `v` along columns.
fn evaluate(controls: &PatchControls, u: f64, v: f64) -> Vector3 {
    let q0 = quadratic(&controls[0][0], &controls[0][1], &controls[0][2], v);
    let q1 = quadratic(&controls[1][0], &controls[1][1], &controls[1][2], v);
    let q2 = quadratic(&controls[2][0], &controls[2][1], &controls[2][2], v);
    quadratic(&q0, &q1, &q2, u)
}

/// Sample the patch on an evenly spaced `(tess_factor + 1)` square grid, indexed `[u][v]`.
pub fn sample_patch(controls: &PatchControls, tess_factor: u32) -> Vec<Vec<Vector3>> {
    let steps = tess_factor.clamp(MIN_TESS_FACTOR, MAX_TESS_FACTOR) as usize;

    (0..=steps)
        .map(|i| {
            let u = i as f64 / steps as f64;
            (0..=steps)
                .map(|j| evaluate(controls, u, j as f64 / steps as f64))
                .collect()
        })
        .collect()
}

/// Approximate one patch with `tess_factor` squared thin brushes.
///
/// The front of every brush is a cell of the sampled surface. Front and back carry `material`,
/// the thin sides get the no-light material. Cells that collapse to a line or point (as at the
/// poles of a dome) have no normal and are skipped.
pub fn build_patch_brushes(
    controls: &PatchControls,
    tess_factor: u32,
    material: &str,
    tex: TexParams,
) -> Vec<PolyBrush> {
    let samples = sample_patch(controls, tess_factor);
    let steps = samples.len() - 1;

    let mut brushes = Vec::with_capacity(steps * steps);
    for i in 0..steps {
        for j in 0..steps {
            let quad = [
                samples[i][j],
                samples[i + 1][j],
                samples[i + 1][j + 1],
                samples[i][j + 1],
            ];

            match slab(quad, material, tex) {
                Some(brush) => brushes.push(brush),
                None => debug!("Skipping degenerate patch cell ({}, {}) of {}", i, j, material),
            }
        }
    }

    brushes
}

/// A brush with `front` as its front face, extruded backwards.
///
/// Corners that coincide with the next one are merged first, so a cell with a collapsed edge
/// becomes a five sided wedge instead of a slab with a zero area side.
fn slab(front: [Vector3; 4], material: &str, tex: TexParams) -> Option<PolyBrush> {
    // twice the vector area of the quad
    let normal = (front[2] - front[0]).cross(&(front[3] - front[1]));
    let len = normal.norm();
    if !(len >= PLANE_EPSILON) {
        return None;
    }
    let offset = normal / len * PATCH_THICKNESS;

    let corners = merge_corners(&front);
    let n = corners.len();
    if n < 3 {
        return None;
    }

    let mut vertices = corners.clone();
    vertices.extend(corners.iter().map(|p| p - offset));

    let face = |material: &str, indices: Vec<usize>| PolyBrushFace {
        material: material.to_string(),
        tex,
        indices,
    };

    let mut faces = vec![
        face(material, (0..n).collect()),
        face(material, (n..2 * n).rev().collect()),
    ];
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(face(REFLEX_NOLIGHT, vec![next, k, k + n, next + n]));
    }

    Some(PolyBrush { vertices, faces })
}

/// Drop corners that are within welding distance of the one before them, wrapping around.
fn merge_corners(front: &[Vector3; 4]) -> Vec<Vector3> {
    let mut corners: Vec<Vector3> = Vec::with_capacity(4);
    for p in front.iter() {
        if corners.last().map_or(true, |last| (p - last).norm() > WELD_EPSILON) {
            corners.push(*p);
        }
    }
    while corners.len() > 1 && (corners[0] - corners[corners.len() - 1]).norm() <= WELD_EPSILON {
        corners.pop();
    }
    corners
}

#[cfg(test)]
fn flat_controls() -> PatchControls {
    let mut controls = [[Vector3::zeros(); 3]; 3];
    for (a, line) in controls.iter_mut().enumerate() {
        for (b, point) in line.iter_mut().enumerate() {
            *point = Vector3::new(a as f64 * 32.0, b as f64 * 32.0, 0.0);
        }
    }
    controls
}

#[test]
fn evaluate_hits_corners() {
    let mut controls = flat_controls();
    controls[1][1].z = 50.0;

    assert_eq!(evaluate(&controls, 0.0, 0.0), controls[0][0]);
    assert_eq!(evaluate(&controls, 1.0, 0.0), controls[2][0]);
    assert_eq!(evaluate(&controls, 0.0, 1.0), controls[0][2]);
    assert_eq!(evaluate(&controls, 1.0, 1.0), controls[2][2]);

    // centre weight of the middle control point is 1/4
    assert!((evaluate(&controls, 0.5, 0.5).z - 12.5).abs() < 1e-9);
}

#[test]
fn tess_factor_is_clamped() {
    let controls = flat_controls();
    assert_eq!(sample_patch(&controls, 0).len(), 2);
    assert_eq!(sample_patch(&controls, 20).len(), 8);
    assert_eq!(build_patch_brushes(&controls, 0, "a", TexParams::default()).len(), 1);
}

#[cfg(test)]
fn face_area(brush: &PolyBrush, face: &PolyBrushFace) -> f64 {
    let points: Vec<Vector3> = brush.face_positions(face).collect();
    let n = points.len();
    (0..n)
        .fold(Vector3::zeros(), |acc, k| acc + points[k].cross(&points[(k + 1) % n]))
        .norm()
        / 2.0
}

#[test]
fn collapsed_edges_make_wedges() {
    // the whole first row of control points is one point
    let mut controls = flat_controls();
    controls[0] = [Vector3::zeros(); 3];

    let brushes = build_patch_brushes(&controls, 2, "a", TexParams::default());

    // the two cells touching the pole are triangles, not lines, so they survive
    assert_eq!(brushes.len(), 4);

    let wedges: Vec<&PolyBrush> = brushes.iter().filter(|b| b.vertices.len() == 6).collect();
    assert_eq!(wedges.len(), 2);
    for wedge in wedges {
        assert_eq!(wedge.faces.len(), 5);
        assert_eq!(wedge.faces[0].indices.len(), 3);
    }

    for brush in brushes.iter() {
        for face in brush.faces.iter() {
            assert!(
                face_area(brush, face) > 1e-6,
                "face {:?} has no area",
                face.indices
            );
        }
    }
}

#[test]
fn flattened_cells_are_skipped() {
    let mut controls = flat_controls();
    for line in controls.iter_mut() {
        *line = [Vector3::zeros(); 3];
    }
    assert!(build_patch_brushes(&controls, 2, "a", TexParams::default()).is_empty());
}

#[test]
fn merging_wraps_around() {
    let a = Vector3::new(0.0, 0.0, 0.0);
    let b = Vector3::new(8.0, 0.0, 0.0);
    let c = Vector3::new(8.0, 8.0, 0.0);

    assert_eq!(merge_corners(&[a, b, c, a]), vec![a, b, c]);
    assert_eq!(merge_corners(&[a, a, b, c]), vec![a, b, c]);
    assert_eq!(merge_corners(&[a, b, b, a]), vec![a, b]);
}

#[test]
fn grid_size_is_validated() {
    let line = |n: usize| vec![Vector3::zeros(); n];

    assert!(PatchControlGrid::new("a".into(), 3, 5, vec![line(5), line(5), line(5)]).is_ok());
    assert_eq!(
        PatchControlGrid::new("a".into(), 3, 5, vec![line(5), line(4), line(5)]),
        Err(GeometryError::MalformedPatchGrid {
            rows: 3,
            columns: 5,
            found_rows: 3,
            found_columns: 4
        })
    );
    assert!(PatchControlGrid::new("a".into(), 3, 3, vec![line(3), line(3)]).is_err());
    assert!(PatchControlGrid::new("a".into(), 2, 3, vec![line(3), line(3)]).is_err());
}

#[test]
fn windows_overlap() {
    let lines = (0..5)
        .map(|r| (0..3).map(|c| Vector3::new(r as f64, c as f64, 0.0)).collect())
        .collect();
    let grid = PatchControlGrid::new("a".into(), 5, 3, lines).unwrap();

    let windows: Vec<_> = grid.windows().collect();
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[1][0][0], Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(windows[2][2][2], Vector3::new(4.0, 2.0, 0.0));
}

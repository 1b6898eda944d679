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

//! Turning planes and control points into polygons

mod brush;
mod patch;
mod plane;
mod solidify;

pub use self::brush::{PlaneBrush, PlaneBrushFace, PolyBrush, PolyBrushFace};
pub use self::patch::{
    build_patch_brushes, sample_patch, PatchControlGrid, PatchControls, MAX_TESS_FACTOR,
    MIN_TESS_FACTOR, PATCH_THICKNESS,
};
pub use self::plane::{intersect3, HalfSpace, Plane};
pub use self::solidify::to_poly_brush;

/// Below this length the cross product of a plane's edges counts as zero.
pub const PLANE_EPSILON: f64 = 1e-8;

/// Below this determinant three planes are treated as not meeting in a point.
pub const INTERSECT_EPSILON: f64 = 1e-9;

/// How far outside a plane a point may be and still count as on it.
/// Must stay equal to [`WELD_EPSILON`], otherwise brushes come out gapped or fused.
pub const CONTAINMENT_EPSILON: f64 = 1e-4;

/// Candidate vertices closer than this are merged into one.
pub const WELD_EPSILON: f64 = CONTAINMENT_EPSILON;

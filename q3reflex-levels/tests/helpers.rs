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
#![allow(dead_code, unused_macros)]

extern crate q3reflex_levels;

use std::collections::HashMap;

use q3reflex_levels::geometry::{Plane, PlaneBrush, PlaneBrushFace, PolyBrush, PolyBrushFace};
use q3reflex_levels::{TexParams, Vector3};

macro_rules! map(
    { $($key:expr => $value:expr),* } => {
        {
            let mut m = ::std::collections::HashMap::new();
            $(
                m.insert($key, $value);
            )*
            m
        }
    };
);

/// A face whose solid side is behind `normal`, `dist` along it from the origin.
pub fn face(normal: Vector3, dist: f64, material: &str) -> PlaneBrushFace {
    let normal = normal.normalize();

    let mut axis = Vector3::zeros();
    axis[normal.iamin()] = 1.0;
    let u = normal.cross(&axis).normalize();
    let v = normal.cross(&u);

    let origin = normal * dist;
    PlaneBrushFace {
        plane: Plane::new(origin, origin + u * 16.0, origin + v * 16.0),
        material: material.to_string(),
        tex: TexParams::default(),
    }
}

/// A box from `min` to `max`.
pub fn axis_box(min: Vector3, max: Vector3, material: &str) -> PlaneBrush {
    let mut faces = Vec::with_capacity(6);
    for axis in 0..3 {
        let mut normal = Vector3::zeros();
        normal[axis] = 1.0;
        faces.push(face(normal, max[axis], material));
        faces.push(face(-normal, -min[axis], material));
    }
    PlaneBrush { faces }
}

/// The tetrahedron with a right-angled corner at the origin and edges of `size` along each axis.
pub fn corner_tetrahedron(size: f64) -> PlaneBrush {
    PlaneBrush {
        faces: vec![
            face(Vector3::new(-1.0, 0.0, 0.0), 0.0, "a"),
            face(Vector3::new(0.0, -1.0, 0.0), 0.0, "a"),
            face(Vector3::new(0.0, 0.0, -1.0), 0.0, "a"),
            face(
                Vector3::new(1.0, 1.0, 1.0),
                size / 3.0_f64.sqrt(),
                "a",
            ),
        ],
    }
}

/// A square pyramid standing on z = 0, with its apex at `(0, 0, height)`.
pub fn pyramid(half_width: f64, height: f64) -> PlaneBrush {
    let mut faces = vec![face(Vector3::new(0.0, 0.0, -1.0), 0.0, "base")];
    for (x, y) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)].iter() {
        // sides through (x * half_width, y * half_width, 0) and the apex
        let normal = Vector3::new(x * height, y * height, half_width).normalize();
        let apex = Vector3::new(0.0, 0.0, height);
        faces.push(face(normal, normal.dot(&apex), "side"));
    }
    PlaneBrush { faces }
}

/// Counts how often each directed edge appears across all faces.
pub fn directed_edges(brush: &PolyBrush) -> HashMap<(usize, usize), usize> {
    let mut edges = HashMap::new();
    for face in brush.faces.iter() {
        let n = face.indices.len();
        for k in 0..n {
            *edges
                .entry((face.indices[k], face.indices[(k + 1) % n]))
                .or_insert(0) += 1;
        }
    }
    edges
}

/// Every directed edge appears once, and its reverse appears once.
pub fn assert_closed(brush: &PolyBrush) {
    let edges = directed_edges(brush);
    for (&(a, b), &count) in edges.iter() {
        assert_eq!(count, 1, "edge {} -> {} used {} times", a, b, count);
        assert_eq!(
            edges.get(&(b, a)),
            Some(&1),
            "edge {} -> {} has no twin",
            a,
            b
        );
    }
}

/// Area-weighted normal of a polygon, following its winding.
pub fn polygon_normal(brush: &PolyBrush, face: &PolyBrushFace) -> Vector3 {
    let points: Vec<Vector3> = brush.face_positions(face).collect();
    let n = points.len();
    (0..n).fold(Vector3::zeros(), |acc, k| {
        acc + points[k].cross(&points[(k + 1) % n])
    })
}

pub fn centroid<I: IntoIterator<Item = Vector3>>(points: I) -> Vector3 {
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0), |(sum, count), p| (sum + p, count + 1));
    sum / count as f64
}

/// Every face is wound counter-clockwise as seen from outside the brush.
pub fn assert_outward(brush: &PolyBrush) {
    let middle = centroid(brush.vertices.iter().copied());
    for face in brush.faces.iter() {
        let outwards = centroid(brush.face_positions(face)) - middle;
        assert!(
            polygon_normal(brush, face).dot(&outwards) > 0.0,
            "face {:?} is wound inwards",
            face.indices
        );
    }
}

/// Every vertex of a face lies on one plane.
pub fn assert_planar(brush: &PolyBrush) {
    for face in brush.faces.iter() {
        let normal = polygon_normal(brush, face).normalize();
        let first = brush.vertices[face.indices[0]];
        for p in brush.face_positions(face) {
            assert!(
                (p - first).dot(&normal).abs() < 1e-6,
                "face {:?} isn't flat",
                face.indices
            );
        }
    }
}

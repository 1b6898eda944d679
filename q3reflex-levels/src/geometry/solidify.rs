//! Converts plane brushes into poly brushes

use itertools::Itertools;
use log::{debug, trace};

use super::brush::{PlaneBrush, PolyBrush, PolyBrushFace};
use super::plane::{intersect3, HalfSpace};
use super::{CONTAINMENT_EPSILON, WELD_EPSILON};
use crate::error::GeometryError;
use crate::types::Vector3;

/// Work out the vertices and polygons of the solid behind all of a brush's planes.
///
/// Every vertex is the meeting point of three planes that lies inside all the others.
/// Faces that end up with fewer than 3 vertices are dropped, so the result may have fewer
/// faces than the input; a result with fewer than 4 isn't a solid and should be culled.
pub fn to_poly_brush(brush: &PlaneBrush) -> PolyBrush {
    let planes: Vec<(usize, HalfSpace)> = brush
        .faces
        .iter()
        .enumerate()
        .filter_map(|(i, face)| match face.plane.half_space() {
            Ok(half_space) => Some((i, half_space)),
            Err(e) => {
                debug!("Ignoring face {} ({}): {}", i, face.material, e);
                None
            }
        })
        .collect();

    let mut vertices = Vec::new();
    for ((i, a), (j, b), (k, c)) in planes.iter().tuple_combinations() {
        let point = match intersect3(a, b, c) {
            Some(p) => p,
            None => {
                trace!(
                    "Skipping faces {}, {}, {}: {}",
                    i,
                    j,
                    k,
                    GeometryError::NoIntersection
                );
                continue;
            }
        };

        // outside the brush
        if planes
            .iter()
            .any(|(_, p)| p.signed_distance(&point) > CONTAINMENT_EPSILON)
        {
            continue;
        }

        weld(&mut vertices, point);
    }

    let faces = planes
        .iter()
        .filter_map(|(i, plane)| {
            let source = &brush.faces[*i];
            let mut indices: Vec<usize> = (0..vertices.len())
                .filter(|&v| plane.signed_distance(&vertices[v]).abs() <= CONTAINMENT_EPSILON)
                .collect();

            if indices.len() < 3 {
                debug!(
                    "Dropping face {} ({}): {}",
                    i,
                    source.material,
                    GeometryError::DegenerateFace
                );
                return None;
            }

            sort_winding(&mut indices, &vertices, &plane.normal);

            Some(PolyBrushFace {
                material: source.material.clone(),
                tex: source.tex,
                indices,
            })
        })
        .collect();

    PolyBrush { vertices, faces }
}

/// Add `point` unless there's already a vertex close enough to stand in for it.
fn weld(vertices: &mut Vec<Vector3>, point: Vector3) {
    if vertices.iter().any(|v| (v - point).norm() <= WELD_EPSILON) {
        return;
    }
    vertices.push(point);
}

/// Sort a face's vertices counter-clockwise around `normal`, as seen from in front of it.
fn sort_winding(indices: &mut Vec<usize>, vertices: &[Vector3], normal: &Vector3) {
    let centroid = indices
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + vertices[i])
        / indices.len() as f64;
    let (u, v) = plane_basis(normal);

    let mut keyed: Vec<(f64, usize)> = indices
        .iter()
        .map(|&i| {
            let offset = vertices[i] - centroid;
            (offset.dot(&v).atan2(offset.dot(&u)), i)
        })
        .collect();
    keyed.sort_by(|(x, _), (y, _)| x.total_cmp(y));

    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}

/// Two unit vectors in the plane with `u x v == normal`.
fn plane_basis(normal: &Vector3) -> (Vector3, Vector3) {
    let mut axis = Vector3::zeros();
    axis[normal.iamin()] = 1.0;

    let u = normal.cross(&axis).normalize();
    let v = normal.cross(&u);
    (u, v)
}

#[test]
fn basis_is_right_handed() {
    for normal in [
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(1.0, 2.0, -3.0).normalize(),
    ]
    .iter()
    {
        let (u, v) = plane_basis(normal);
        assert!(u.dot(normal).abs() < 1e-12);
        assert!(v.dot(normal).abs() < 1e-12);
        assert!((u.cross(&v) - normal).norm() < 1e-12);
    }
}

#[test]
fn welding_merges_close_points() {
    let mut vertices = vec![Vector3::new(1.0, 2.0, 3.0)];
    weld(&mut vertices, Vector3::new(1.0, 2.0, 3.0 + WELD_EPSILON / 2.0));
    assert_eq!(vertices.len(), 1);

    weld(&mut vertices, Vector3::new(1.0, 2.0, 3.0 + WELD_EPSILON * 2.0));
    assert_eq!(vertices.len(), 2);
}

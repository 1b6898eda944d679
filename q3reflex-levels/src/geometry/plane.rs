use serde::{Deserialize, Serialize};

use super::{INTERSECT_EPSILON, PLANE_EPSILON};
use crate::error::GeometryError;
use crate::types::Vector3;

/// A plane as written in a map file: three points on it.
/// The solid side is behind the normal `(b - a) x (c - a)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub a: Vector3,
    pub b: Vector3,
    pub c: Vector3,
}

/// A plane in normal form. Points with `normal . p <= dist` are inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfSpace {
    /// Unit normal, pointing out of the solid
    pub normal: Vector3,

    /// Distance from origin to plane along normal
    pub dist: f64,
}

impl Plane {
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Plane {
        Plane { a, b, c }
    }

    /// Unit normal and offset of this plane.
    /// Fails if the points are (nearly) collinear.
    pub fn normal_and_offset(&self) -> Result<(Vector3, f64), GeometryError> {
        let cross = (self.b - self.a).cross(&(self.c - self.a));
        let len = cross.norm();
        if !(len >= PLANE_EPSILON) {
            return Err(GeometryError::DegeneratePlane);
        }

        let normal = cross / len;
        Ok((normal, normal.dot(&self.a)))
    }

    pub fn half_space(&self) -> Result<HalfSpace, GeometryError> {
        let (normal, dist) = self.normal_and_offset()?;
        Ok(HalfSpace { normal, dist })
    }

    pub fn signed_distance(&self, point: &Vector3) -> Result<f64, GeometryError> {
        Ok(self.half_space()?.signed_distance(point))
    }
}

impl HalfSpace {
    /// Positive in front of the plane, negative behind it (inside the solid).
    pub fn signed_distance(&self, point: &Vector3) -> f64 {
        self.normal.dot(point) - self.dist
    }
}

/// The single point where three planes meet, if there is one.
pub fn intersect3(p1: &HalfSpace, p2: &HalfSpace, p3: &HalfSpace) -> Option<Vector3> {
    let n23 = p2.normal.cross(&p3.normal);
    let det = p1.normal.dot(&n23);
    if !(det.abs() >= INTERSECT_EPSILON) {
        return None;
    }

    let n31 = p3.normal.cross(&p1.normal);
    let n12 = p1.normal.cross(&p2.normal);

    Some((n23 * p1.dist + n31 * p2.dist + n12 * p3.dist) / det)
}

#[cfg(test)]
fn half_space(normal: [f64; 3], dist: f64) -> HalfSpace {
    HalfSpace {
        normal: Vector3::from(normal).normalize(),
        dist,
    }
}

#[test]
fn plane_normal_follows_winding() {
    let plane = Plane::new(
        Vector3::new(0.0, 0.0, 64.0),
        Vector3::new(1.0, 0.0, 64.0),
        Vector3::new(0.0, 1.0, 64.0),
    );
    let (normal, dist) = plane.normal_and_offset().unwrap();

    assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(dist, 64.0);
    assert_eq!(plane.signed_distance(&Vector3::new(5.0, 5.0, 0.0)), Ok(-64.0));
}

#[test]
fn collinear_plane_is_degenerate() {
    let plane = Plane::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(2.0, 2.0, 2.0),
    );

    assert_eq!(plane.normal_and_offset(), Err(GeometryError::DegeneratePlane));
    assert_eq!(plane.half_space(), Err(GeometryError::DegeneratePlane));
}

#[test]
fn three_axis_planes_meet_at_corner() {
    let point = intersect3(
        &half_space([1.0, 0.0, 0.0], 3.0),
        &half_space([0.0, 1.0, 0.0], -2.0),
        &half_space([0.0, 0.0, 1.0], 7.0),
    )
    .unwrap();

    assert_eq!(point, Vector3::new(3.0, -2.0, 7.0));
}

#[test]
fn parallel_planes_dont_meet() {
    assert_eq!(
        intersect3(
            &half_space([1.0, 0.0, 0.0], 3.0),
            &half_space([-1.0, 0.0, 0.0], 3.0),
            &half_space([0.0, 0.0, 1.0], 7.0),
        ),
        None
    );

    // all three share a line
    assert_eq!(
        intersect3(
            &half_space([1.0, 0.0, 0.0], 0.0),
            &half_space([0.0, 1.0, 0.0], 0.0),
            &half_space([1.0, 1.0, 0.0], 0.0),
        ),
        None
    );
}

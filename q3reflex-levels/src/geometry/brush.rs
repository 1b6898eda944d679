// Copyright (C) 2019 Oscar Shrimpton
//
// This file is part of q3reflex.
//
// q3reflex is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// q3reflex is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with q3reflex.  If not, see <http://www.gnu.org/licenses/>.

//! The two ways a brush can be described

use serde::{Deserialize, Serialize};

use super::plane::Plane;
use crate::types::{TexParams, Vector3};

/// A convex solid, as the volume behind every one of its planes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneBrush {
    pub faces: Vec<PlaneBrushFace>,
}

/// Bounding surface for a plane brush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneBrushFace {
    pub plane: Plane,
    pub material: String,
    pub tex: TexParams,
}

/// A convex solid as explicit polygons over a shared vertex list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolyBrush {
    pub vertices: Vec<Vector3>,
    pub faces: Vec<PolyBrushFace>,
}

/// One polygon of a poly brush. Indices are into the brush's vertices,
/// counter-clockwise when looking at the face from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyBrushFace {
    pub material: String,
    pub tex: TexParams,
    pub indices: Vec<usize>,
}

impl PolyBrush {
    /// Iterate over the positions of a face's vertices, in winding order.
    pub fn face_positions<'a>(
        &'a self,
        face: &'a PolyBrushFace,
    ) -> impl Iterator<Item = Vector3> + 'a {
        face.indices.iter().map(move |&i| self.vertices[i])
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().map(|f| f.material.as_str())
    }
}

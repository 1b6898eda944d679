// Copyright (C) 2019 Oscar Shrimpton
//
// This file is part of q3reflex.
//
// rust-bsp is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// rust-bsp is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with rust-bsp.  If not, see <http://www.gnu.org/licenses/>.

//! Various types shared by the parser, the geometry code and the exporter.

use serde::{Deserialize, Serialize};

/// Alias for convenience
pub type Vector3 = na::Vector3<f64>;

/// Texture placement of a single face. Not interpreted, just carried through to the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexParams {
    pub offset_u: f64,
    pub offset_v: f64,
    pub rotation: f64,
    pub scale_u: f64,
    pub scale_v: f64,
}

impl Default for TexParams {
    fn default() -> TexParams {
        TexParams {
            offset_u: 0.0,
            offset_v: 0.0,
            rotation: 0.0,
            scale_u: 1.0,
            scale_v: 1.0,
        }
    }
}

bitflags!(
    /// Switches that change what ends up in the exported map.
    #[derive(Default, Serialize, Deserialize)]
    pub struct ExportFlags: u32 {
        /// don't export anything tessellated from patches
        const NO_PATCHES = 0x1;

        /// drop brushes with a clip face
        const NO_CLIP = 0x2;

        /// drop brushes with a trigger face
        const NO_TRIGGER = 0x4;

        /// replace every visible material with the no-light editor material
        const ALL_CAULK = 0x8;
    }
);

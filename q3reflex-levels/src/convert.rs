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

//! Converting a whole map

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cull::MIN_BRUSH_FACES;
use crate::error::GeometryError;
use crate::geometry::{
    build_patch_brushes, to_poly_brush, PolyBrush, MAX_TESS_FACTOR, MIN_TESS_FACTOR,
};
use crate::map::{Entity, Q3Map};
use crate::types::{ExportFlags, TexParams};

pub const DEFAULT_TESS_FACTOR: u32 = 3;

/// Options for a conversion.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(public, build_fn(validate = "Self::validate"))]
pub struct ConversionSettings {
    /// Each patch is cut into this many cells along each side
    #[builder(default = "DEFAULT_TESS_FACTOR")]
    pub tess_factor: u32,

    #[builder(default)]
    pub flags: ExportFlags,
}

impl ConversionSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.tess_factor {
            Some(t) if !(MIN_TESS_FACTOR..=MAX_TESS_FACTOR).contains(&t) => Err(format!(
                "tessellation factor must be between {} and {}, got {}",
                MIN_TESS_FACTOR, MAX_TESS_FACTOR, t
            )),
            _ => Ok(()),
        }
    }
}

impl Default for ConversionSettings {
    fn default() -> ConversionSettings {
        ConversionSettings {
            tess_factor: DEFAULT_TESS_FACTOR,
            flags: ExportFlags::empty(),
        }
    }
}

/// The result of converting a map, still in Quake 3 coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedLevel {
    pub settings: ConversionSettings,

    /// One for every brush in the source, in the same order
    pub brushes: Vec<PolyBrush>,

    /// Everything tessellated from patches
    pub patch_brushes: Vec<PolyBrush>,

    pub entities: Vec<Entity>,
}

/// Convert every brush and patch in `map`.
///
/// Brushes that don't come out as closed solids are still included; whether to export them
/// is up to [`crate::cull`].
pub fn convert(map: &Q3Map, settings: &ConversionSettings) -> ConvertedLevel {
    let brushes: Vec<PolyBrush> = map.brushes.iter().map(to_poly_brush).collect();

    let invalid = brushes
        .iter()
        .filter(|b| b.faces.len() < MIN_BRUSH_FACES)
        .count();
    if invalid > 0 {
        debug!("{} brushes: {}", invalid, GeometryError::InvalidBrush);
    }

    let mut patch_brushes = Vec::new();
    if !settings.flags.contains(ExportFlags::NO_PATCHES) {
        for grid in map.patches.iter() {
            for window in grid.windows() {
                patch_brushes.extend(build_patch_brushes(
                    &window,
                    settings.tess_factor,
                    grid.material(),
                    TexParams::default(),
                ));
            }
        }
    }

    info!(
        "Converted {} brushes and {} patches ({} patch brushes)",
        brushes.len(),
        map.patches.len(),
        patch_brushes.len()
    );

    ConvertedLevel {
        settings: settings.clone(),
        brushes,
        patch_brushes,
        entities: map.entities.clone(),
    }
}

#[test]
fn builder_defaults() {
    let settings = ConversionSettingsBuilder::default().build().unwrap();
    assert_eq!(settings, ConversionSettings::default());
}

#[test]
fn builder_rejects_bad_tess_factor() {
    assert!(ConversionSettingsBuilder::default()
        .tess_factor(0)
        .build()
        .is_err());
    assert!(ConversionSettingsBuilder::default()
        .tess_factor(8)
        .build()
        .is_err());

    let settings = ConversionSettingsBuilder::default()
        .tess_factor(7)
        .flags(ExportFlags::NO_CLIP)
        .build()
        .unwrap();
    assert_eq!(settings.tess_factor, 7);
    assert_eq!(settings.flags, ExportFlags::NO_CLIP);
}

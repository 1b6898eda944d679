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

//! Turns Quake 3 map sources into Reflex maps.
//!
//! Quake 3 solids are described as intersections of half-spaces, and curved
//! surfaces as grids of bezier control points. Reflex wants every solid as
//! explicit vertices and polygons, so both get converted here.

extern crate nalgebra as na;

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate derive_builder;

pub mod convert;
pub mod coords;
pub mod cull;
pub mod error;
pub mod geometry;
pub mod map;
pub mod materials;
pub mod reflex;
pub mod types;

pub use convert::{convert, ConversionSettings, ConversionSettingsBuilder, ConvertedLevel};
pub use cull::{cull_reason, is_exportable, CullReason};
pub use error::{ExportError, GeometryError, ParseError};
pub use map::{parse_map, Q3Map};
pub use types::{ExportFlags, TexParams, Vector3};

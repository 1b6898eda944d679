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
//! Marker traits for different co-ordinate systems, and functions to swizzle between them

use na::base::Scalar;
use na::Vector3;

pub trait CoordSystem {}

/// Right handed, Z points upwards
pub struct Q3System;
impl CoordSystem for Q3System {}

/// Left handed, Y points upwards
pub struct ReflexSystem;
impl CoordSystem for ReflexSystem {}

pub struct Swizzler;

pub trait SwizzleFromTo<F: CoordSystem, T: CoordSystem> {
    fn swizzle<U: Scalar + Copy>(vec: &mut Vector3<U>);

    fn swizzled<U: Scalar + Copy>(mut vec: Vector3<U>) -> Vector3<U> {
        Self::swizzle(&mut vec);
        vec
    }
}

impl SwizzleFromTo<Q3System, ReflexSystem> for Swizzler {
    fn swizzle<U: Scalar + Copy>(vec: &mut Vector3<U>) {
        vec.swap_rows(1, 2);
    }
}

#[test]
fn q3_to_reflex_swaps_y_and_z() {
    let v = <Swizzler as SwizzleFromTo<Q3System, ReflexSystem>>::swizzled(Vector3::new(1, 2, 3));
    assert_eq!(v, Vector3::new(1, 3, 2));
}

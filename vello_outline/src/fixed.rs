// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed point coordinate conversions.
//!
//! Font engines store outline coordinates as integers: font units, 26.6
//! fixed point pixels after scaling, or 16.16 fixed point for matrices and
//! some metrics. Decomposition works on `f64`, so coordinates are converted
//! once at the boundary.

use core::ffi::c_long;

use bytemuck::{Pod, Zeroable};
use peniko::kurbo::Point;

use crate::{Error, Result};

/// The interpretation of integer coordinates in a raw outline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordFormat {
    /// Unscaled integer values, typically font design units.
    Integer,
    /// 26.6 fixed point, the format of scaled outlines.
    #[default]
    F26Dot6,
    /// 16.16 fixed point.
    F16Dot16,
}

impl CoordFormat {
    /// Number of fractional bits.
    pub const fn shift(self) -> u32 {
        match self {
            Self::Integer => 0,
            Self::F26Dot6 => 6,
            Self::F16Dot16 => 16,
        }
    }

    /// Converts a raw value in this format to a float.
    #[inline]
    pub fn to_float(self, raw: c_long) -> f64 {
        raw as f64 / (1_i64 << self.shift()) as f64
    }

    /// Converts a float to a raw value in this format, rounding half away from zero.
    pub fn from_float(self, value: f64) -> Result<c_long> {
        let scaled = (value * (1_i64 << self.shift()) as f64).round();
        // `-(c_long::MIN as f64)` is exactly one past `c_long::MAX` for any width.
        if !scaled.is_finite() || scaled < c_long::MIN as f64 || scaled >= -(c_long::MIN as f64) {
            return Err(Error::UnrepresentableCoordinate(value));
        }
        Ok(scaled as c_long)
    }
}

/// Converts a float to 26.6 fixed point.
pub fn to_f26_6(value: f64) -> Result<c_long> {
    CoordFormat::F26Dot6.from_float(value)
}

/// Converts a 26.6 fixed point value to a float.
pub fn from_f26_6(raw: c_long) -> f64 {
    CoordFormat::F26Dot6.to_float(raw)
}

/// Converts a float to 16.16 fixed point.
pub fn to_f16_16(value: f64) -> Result<c_long> {
    CoordFormat::F16Dot16.from_float(value)
}

/// Converts a 16.16 fixed point value to a float.
pub fn from_f16_16(raw: c_long) -> f64 {
    CoordFormat::F16Dot16.to_float(raw)
}

/// A point with integer coordinates, laid out like the font engine's vector type.
///
/// Slices of these can be [cast](bytemuck::cast_slice) from the engine's
/// point array.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct FixedPoint {
    pub x: c_long,
    pub y: c_long,
}

impl FixedPoint {
    pub const fn new(x: c_long, y: c_long) -> Self {
        Self { x, y }
    }

    /// Interprets the coordinates in `format`.
    pub fn to_point(self, format: CoordFormat) -> Point {
        Point::new(format.to_float(self.x), format.to_float(self.y))
    }

    /// Encodes `point` in `format`.
    pub fn from_point(point: Point, format: CoordFormat) -> Result<Self> {
        Ok(Self {
            x: format.from_float(point.x)?,
            y: format.from_float(point.y)?,
        })
    }
}

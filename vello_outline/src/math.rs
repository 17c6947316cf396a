// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed point matrices.

use core::ffi::c_long;
use core::ops::Mul;

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

use crate::fixed::{from_f16_16, to_f16_16};
use crate::Result;

/// 2x2 matrix in 16.16 fixed point, laid out like the font engine's matrix type.
///
/// Maps `x' = xx * x + xy * y` and `y' = yx * x + yy * y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix {
    pub xx: c_long,
    pub xy: c_long,
    pub yx: c_long,
    pub yy: c_long,
}

impl Matrix {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        xx: 0x1_0000,
        xy: 0,
        yx: 0,
        yy: 0x1_0000,
    };

    /// Creates a matrix from the linear part of a kurbo affine transform.
    ///
    /// The translation is dropped.
    pub fn from_affine(transform: &kurbo::Affine) -> Result<Self> {
        let [a, b, c, d, _, _] = transform.as_coeffs();
        Ok(Self {
            xx: to_f16_16(a)?,
            xy: to_f16_16(c)?,
            yx: to_f16_16(b)?,
            yy: to_f16_16(d)?,
        })
    }

    /// Converts the matrix to a kurbo affine transform with no translation.
    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            from_f16_16(self.xx),
            from_f16_16(self.yx),
            from_f16_16(self.xy),
            from_f16_16(self.yy),
            0.0,
            0.0,
        ])
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Self;

    /// Multiplies in 16.16, rounding each product like the font engine does.
    ///
    /// Entries that overflow saturate to the `c_long` range.
    #[inline]
    fn mul(self, other: Self) -> Self {
        fn mul_fix(a: c_long, b: c_long) -> i128 {
            let p = i128::from(a) * i128::from(b);
            (p + 0x8000 - i128::from(p < 0)) >> 16
        }
        let dot = |a0, b0, a1, b1| {
            let sum = mul_fix(a0, b0) + mul_fix(a1, b1);
            c_long::try_from(sum).unwrap_or(if sum < 0 { c_long::MIN } else { c_long::MAX })
        };
        Self {
            xx: dot(self.xx, other.xx, self.xy, other.yx),
            xy: dot(self.xx, other.xy, self.xy, other.yy),
            yx: dot(self.yx, other.xx, self.yy, other.yx),
            yy: dot(self.yx, other.xy, self.yy, other.yy),
        }
    }
}

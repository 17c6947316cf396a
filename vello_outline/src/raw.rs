// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlines in the font engine's array layout.

use crate::error::MalformedOutline;
use crate::fixed::{CoordFormat, FixedPoint};
use crate::outline::{ControlPointKind, Contour, ContourPoint, Outline};
use crate::{Error, Result};

const TAG_QUAD: u8 = 0;
const TAG_ON: u8 = 1;
const TAG_CUBIC: u8 = 2;
const TAG_KIND_MASK: u8 = 0b11;
const TAG_EXTRA_SHIFT: u32 = 2;
const MAX_DROPOUT: u8 = u8::MAX >> TAG_EXTRA_SHIFT;

/// A borrowed outline in the layout used by font engines.
///
/// Points and tags are parallel arrays. `contours` holds the index of the
/// last point of each contour, in increasing order.
#[derive(Copy, Clone, Debug)]
pub struct RawOutline<'a> {
    pub points: &'a [FixedPoint],
    pub tags: &'a [u8],
    pub contours: &'a [i16],
}

/// An owned outline in the layout used by font engines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawOutlineBuf {
    pub points: Vec<FixedPoint>,
    pub tags: Vec<u8>,
    pub contours: Vec<i16>,
}

impl RawOutlineBuf {
    pub fn as_raw(&self) -> RawOutline<'_> {
        RawOutline {
            points: &self.points,
            tags: &self.tags,
            contours: &self.contours,
        }
    }
}

fn decode_tag(point: usize, tag: u8) -> Result<(ControlPointKind, u8), MalformedOutline> {
    let kind = match tag & TAG_KIND_MASK {
        TAG_ON => ControlPointKind::OnCurve,
        TAG_QUAD => ControlPointKind::OffCurveQuadratic,
        TAG_CUBIC => ControlPointKind::OffCurveCubic,
        _ => return Err(MalformedOutline::InvalidTag { point, tag }),
    };
    Ok((kind, tag >> TAG_EXTRA_SHIFT))
}

fn encode_tag(point: usize, kind: ControlPointKind, dropout: u8) -> Result<u8, MalformedOutline> {
    if dropout > MAX_DROPOUT {
        return Err(MalformedOutline::DropoutOutOfRange { point, dropout });
    }
    let kind = match kind {
        ControlPointKind::OnCurve => TAG_ON,
        ControlPointKind::OffCurveQuadratic => TAG_QUAD,
        ControlPointKind::OffCurveCubic => TAG_CUBIC,
    };
    Ok(kind | (dropout << TAG_EXTRA_SHIFT))
}

impl RawOutline<'_> {
    fn decode(&self, format: CoordFormat) -> Result<Outline, MalformedOutline> {
        let n_points = self.points.len();
        if self.tags.len() != n_points {
            return Err(MalformedOutline::TagCountMismatch {
                n_points,
                n_tags: self.tags.len(),
            });
        }
        let mut contours = Vec::with_capacity(self.contours.len());
        let mut start = 0_usize;
        for (contour, &end) in self.contours.iter().enumerate() {
            let end_ix = usize::try_from(end)
                .ok()
                .filter(|&end_ix| end_ix >= start)
                .ok_or(MalformedOutline::ContourEndOutOfOrder {
                    contour,
                    end: end.into(),
                })?;
            if end_ix >= n_points {
                return Err(MalformedOutline::ContourOverrun {
                    contour,
                    end: end.into(),
                    n_points,
                });
            }
            let points = (start..=end_ix)
                .map(|ix| {
                    let (kind, dropout) = decode_tag(ix, self.tags[ix])?;
                    Ok(ContourPoint {
                        point: self.points[ix].to_point(format),
                        kind,
                        dropout,
                    })
                })
                .collect::<Result<Vec<_>, MalformedOutline>>()?;
            contours.push(Contour::new(points));
            start = end_ix + 1;
        }
        Ok(Outline::from_contours(contours))
    }
}

impl Outline {
    /// Decodes an outline from the font engine's array layout.
    ///
    /// Coordinates are read in `format`. Points after the end of the last
    /// contour are ignored.
    pub fn from_raw(raw: &RawOutline<'_>, format: CoordFormat) -> Result<Self> {
        raw.decode(format).map_err(|err| {
            log::debug!("Failed to decode raw outline: {err}");
            Error::MalformedOutline(err)
        })
    }

    /// Encodes the outline in the font engine's array layout.
    ///
    /// Drop-out bits are written back unchanged. Points whose drop-out bits
    /// don't fit in a tag are rejected.
    pub fn to_raw(&self, format: CoordFormat) -> Result<RawOutlineBuf> {
        let n_points = self.n_points();
        let mut raw = RawOutlineBuf {
            points: Vec::with_capacity(n_points),
            tags: Vec::with_capacity(n_points),
            contours: Vec::with_capacity(self.n_contours()),
        };
        for (contour, points) in self.contours.iter().enumerate() {
            if points.is_empty() {
                return Err(MalformedOutline::EmptyContour { contour }.into());
            }
            for p in points {
                let tag = encode_tag(raw.points.len(), p.kind, p.dropout)?;
                raw.points.push(FixedPoint::from_point(p.point, format)?);
                raw.tags.push(tag);
            }
            let end = i16::try_from(raw.points.len() - 1)
                .map_err(|_| MalformedOutline::TooManyPoints { n_points })?;
            raw.contours.push(end);
        }
        Ok(raw)
    }
}

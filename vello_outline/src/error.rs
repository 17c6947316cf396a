// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur when decoding, encoding or decomposing outlines.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The point and contour accounting of an outline is inconsistent.
    ///
    /// This is never recoverable: the source data itself is wrong.
    #[error("Malformed outline: {0}")]
    MalformedOutline(#[from] MalformedOutline),

    /// A coordinate can't be represented in the requested fixed point format.
    #[error("Coordinate {0} can't be represented in the requested fixed point format")]
    UnrepresentableCoordinate(f64),
}

/// The specific inconsistency found in a malformed outline.
///
/// Contour indices are positions in the outline, point indices are positions
/// within the contour unless noted otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MalformedOutline {
    /// A contour has no points.
    #[error("contour {contour} has no points")]
    EmptyContour { contour: usize },

    /// A contour end index points past the last point of the outline.
    #[error("contour {contour} ends at point {end} but the outline has {n_points} points")]
    ContourOverrun {
        contour: usize,
        end: i64,
        n_points: usize,
    },

    /// A contour end index is negative or not after the previous contour's end.
    #[error("contour {contour} end index {end} is out of order")]
    ContourEndOutOfOrder { contour: usize, end: i64 },

    /// The outline has more points than contour end indices can address.
    #[error("outline has {n_points} points, more than a contour end index can address")]
    TooManyPoints { n_points: usize },

    /// A point's drop-out bits don't fit in the six spare bits of a tag. `point` is an
    /// outline-wide index.
    #[error("point {point} has drop-out bits {dropout:#04x}, which don't fit in a tag")]
    DropoutOutOfRange { point: usize, dropout: u8 },

    /// The number of point tags doesn't match the number of points.
    #[error("outline has {n_points} points but {n_tags} tags")]
    TagCountMismatch { n_points: usize, n_tags: usize },

    /// A point tag names no known control point kind. `point` is an outline-wide index.
    #[error("point {point} has invalid tag {tag:#04x}")]
    InvalidTag { point: usize, tag: u8 },

    /// A contour begins on a cubic off-curve point, or on a quadratic
    /// point that wraps around to a cubic one.
    #[error("contour {contour} starts on a cubic control point")]
    ContourStartsWithCubic { contour: usize },

    /// A cubic off-curve point isn't followed by a second cubic point.
    #[error("cubic control point {point} in contour {contour} has no partner")]
    UnpairedCubic { contour: usize, point: usize },

    /// A third cubic off-curve point follows a cubic pair.
    #[error("contour {contour} has more than two consecutive cubic control points at point {point}")]
    ExcessCubic { contour: usize, point: usize },

    /// Quadratic and cubic off-curve points are adjacent.
    #[error("contour {contour} mixes quadratic and cubic control points at point {point}")]
    MixedControlPoints { contour: usize, point: usize },
}

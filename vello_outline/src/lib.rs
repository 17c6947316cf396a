// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outline decomposition.
//!
//! A font engine hands out glyph outlines as closed contours of typed control
//! points: on-curve points, quadratic (TrueType style) off-curve points and
//! cubic (PostScript style) off-curve points. This crate turns those contours
//! into a flat sequence of [`PathCommand`]s that any path consumer can replay.
//! If the consumer cannot draw quadratic segments, they are raised to cubics.
//!
//! The crate does not parse font files, hint or rasterize. Outlines come from
//! the font engine, either already decoded as an [`Outline`] or in the
//! engine's native array layout as a [`RawOutline`].
//!
//! # Example
//!
//! ```
//! use vello_outline::{Contour, ContourPoint, Outline, PathCommand, decompose};
//! use vello_outline::kurbo::Point;
//!
//! let outline = Outline::from_contours(vec![Contour::new(vec![
//!     ContourPoint::on(Point::new(0.0, 0.0)),
//!     ContourPoint::quad(Point::new(5.0, 5.0)),
//!     ContourPoint::on(Point::new(10.0, 0.0)),
//! ])]);
//! let commands = decompose(&outline, false).unwrap();
//! assert_eq!(commands.len(), 3);
//! assert!(matches!(commands[1], PathCommand::CubicTo(..)));
//! ```
//!
//! # Features
//!
//! - `skrifa` (enabled by default): [`PenSink`], which forwards decomposed
//!   outlines to any `skrifa::outline::OutlinePen`.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![expect(
    clippy::cast_possible_truncation,
    reason = "Narrowing to f32 for skrifa pens and to c_long for fixed point is checked or intended."
)]

mod command;
mod decompose;
mod error;
pub mod fixed;
pub mod math;
mod outline;
mod raw;
mod sink;

pub use peniko::kurbo;

pub use command::{PathCommand, Replay};
pub use decompose::{decompose, Decompose};
pub use error::{Error, MalformedOutline};
pub use fixed::{CoordFormat, FixedPoint};
pub use math::Matrix;
pub use outline::{
    ControlPointKind, Contour, ContourPoint, Orientation, Outline, StrokeBorder,
};
pub use raw::{RawOutline, RawOutlineBuf};
#[cfg(feature = "skrifa")]
pub use sink::PenSink;
pub use sink::PathSink;

/// Result type for outline operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

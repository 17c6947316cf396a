// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello Outline tests.

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![allow(
    missing_debug_implementations,
    unreachable_pub,
    missing_docs,
    clippy::missing_assert_message,
    clippy::allow_attributes_without_reason
)]

use anyhow::{bail, Result};
use vello_outline::kurbo::{CubicBez, Line, ParamCurve, PathSeg, Point, QuadBez};
use vello_outline::{Contour, ContourPoint, Outline, PathCommand};

/// Number of samples taken along each segment when comparing curves.
pub const SAMPLES_PER_SEGMENT: usize = 32;

/// Builds a contour from a compact description.
///
/// `'o'` is an on-curve point, `'q'` a quadratic and `'c'` a cubic control point.
pub fn contour(points: &[(char, f64, f64)]) -> Contour {
    points
        .iter()
        .map(|&(kind, x, y)| {
            let p = Point::new(x, y);
            match kind {
                'o' => ContourPoint::on(p),
                'q' => ContourPoint::quad(p),
                'c' => ContourPoint::cubic(p),
                _ => panic!("unknown point kind {kind:?}"),
            }
        })
        .collect()
}

/// Builds a single contour outline, see [`contour`].
pub fn outline(points: &[(char, f64, f64)]) -> Outline {
    Outline::from_contours(vec![contour(points)])
}

pub fn assert_near(actual: Point, expected: Point, tolerance: f64) {
    let distance = actual.distance(expected);
    assert!(
        distance <= tolerance,
        "{actual:?} is {distance} away from {expected:?}"
    );
}

/// Replays commands the simplest possible way, collecting the segments they draw.
pub fn segments(commands: &[PathCommand]) -> Result<Vec<PathSeg>> {
    let mut current = None;
    let mut segments = Vec::with_capacity(commands.len());
    for command in commands {
        if let PathCommand::MoveTo(p) = *command {
            current = Some(p);
            continue;
        }
        let Some(p0) = current else {
            bail!("{command:?} before any move");
        };
        segments.push(match *command {
            PathCommand::LineTo(p) => PathSeg::Line(Line::new(p0, p)),
            PathCommand::QuadTo(c, p) => PathSeg::Quad(QuadBez::new(p0, c, p)),
            PathCommand::CubicTo(c1, c2, p) => PathSeg::Cubic(CubicBez::new(p0, c1, c2, p)),
            PathCommand::MoveTo(_) => unreachable!(),
        });
        current = Some(command.end_point());
    }
    Ok(segments)
}

/// Result of comparing two decompositions of the same outline.
pub struct Comparison {
    pub n_segments: usize,
    pub max_distance: f64,
}

impl Comparison {
    pub fn assert_max_distance_less_than(&self, tolerance: f64) {
        assert!(
            self.max_distance < tolerance,
            "Curves differ by up to {}, expected less than {tolerance}",
            self.max_distance
        );
    }
}

/// Decomposes `outline` with and without quadratic support and samples both
/// results at the same curve parameters.
pub fn compare_quadratic_and_cubic(outline: &Outline) -> Result<Comparison> {
    let native = segments(&vello_outline::decompose(outline, true)?)?;
    let raised = segments(&vello_outline::decompose(outline, false)?)?;
    if native.len() != raised.len() {
        bail!(
            "Decompositions disagree on segment count: {} vs {}",
            native.len(),
            raised.len()
        );
    }
    let mut max_distance = 0.0_f64;
    for (a, b) in native.iter().zip(&raised) {
        for i in 0..=SAMPLES_PER_SEGMENT {
            let t = i as f64 / SAMPLES_PER_SEGMENT as f64;
            max_distance = max_distance.max(a.eval(t).distance(b.eval(t)));
        }
    }
    Ok(Comparison {
        n_segments: native.len(),
        max_distance,
    })
}

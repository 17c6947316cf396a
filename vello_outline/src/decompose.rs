// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decomposition of outlines into path commands.

use core::iter::FusedIterator;

use peniko::kurbo::{Point, QuadBez};

use crate::command::PathCommand;
use crate::error::MalformedOutline;
use crate::outline::{ControlPointKind, Contour, ContourPoint, Outline};
use crate::Result;

/// Decomposes `outline` into path commands.
///
/// Each contour produces a `MoveTo` followed by segments that end back at
/// the contour's starting point. Quadratic segments are emitted as `QuadTo`
/// if `supports_quadratic` is set and raised to `CubicTo` otherwise.
///
/// A malformed contour anywhere in the outline fails the whole call; no
/// partial command list is returned.
pub fn decompose(outline: &Outline, supports_quadratic: bool) -> Result<Vec<PathCommand>> {
    Decompose::new(outline, supports_quadratic).collect()
}

/// Lazy decomposition of an outline, one contour at a time.
///
/// Yields an error and then stops if a contour is malformed. Commands of
/// earlier contours have already been yielded by then.
#[derive(Clone, Debug)]
pub struct Decompose<'a> {
    contours: core::iter::Enumerate<core::slice::Iter<'a, Contour>>,
    supports_quadratic: bool,
    buf: Vec<PathCommand>,
    pos: usize,
    done: bool,
}

impl<'a> Decompose<'a> {
    pub fn new(outline: &'a Outline, supports_quadratic: bool) -> Self {
        Self {
            contours: outline.contours.iter().enumerate(),
            supports_quadratic,
            buf: Vec::new(),
            pos: 0,
            done: false,
        }
    }
}

impl Iterator for Decompose<'_> {
    type Item = Result<PathCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(command) = self.buf.get(self.pos) {
                self.pos += 1;
                return Some(Ok(*command));
            }
            if self.done {
                return None;
            }
            let Some((index, contour)) = self.contours.next() else {
                self.done = true;
                return None;
            };
            self.buf.clear();
            self.pos = 0;
            let mut walker = ContourWalker {
                contour: index,
                supports_quadratic: self.supports_quadratic,
                out: &mut self.buf,
                current: Point::ZERO,
                pending: Pending::None,
            };
            if let Err(err) = walker.walk(&contour.points) {
                log::trace!("contour {index} is malformed: {err}");
                self.buf.clear();
                self.done = true;
                return Some(Err(err.into()));
            }
            log::trace!("contour {index}: {} commands", self.buf.len());
        }
    }
}

impl FusedIterator for Decompose<'_> {}

/// Off-curve points seen since the last on-curve point.
#[derive(Copy, Clone, Debug)]
enum Pending {
    None,
    Quad(Point),
    Cubic(Point),
    CubicPair(Point, Point),
}

struct ContourWalker<'a> {
    contour: usize,
    supports_quadratic: bool,
    out: &'a mut Vec<PathCommand>,
    current: Point,
    pending: Pending,
}

impl ContourWalker<'_> {
    fn walk(&mut self, points: &[ContourPoint]) -> Result<(), MalformedOutline> {
        let contour = self.contour;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(MalformedOutline::EmptyContour { contour });
        };
        if points.iter().any(|p| !p.point.is_finite()) {
            log::warn!("Contour {contour} has a non-finite coordinate.");
        }

        // Find where the contour starts and which points are walked before
        // the closing segment back to the start.
        let (start, walked) = match first.kind {
            ControlPointKind::OnCurve => (first.point, &points[1..]),
            ControlPointKind::OffCurveQuadratic => match last.kind {
                ControlPointKind::OnCurve => (last.point, &points[..points.len() - 1]),
                ControlPointKind::OffCurveQuadratic => (last.point.midpoint(first.point), points),
                ControlPointKind::OffCurveCubic => {
                    return Err(MalformedOutline::ContourStartsWithCubic { contour });
                }
            },
            ControlPointKind::OffCurveCubic => {
                return Err(MalformedOutline::ContourStartsWithCubic { contour });
            }
        };
        // Index of `walked[0]` within the contour.
        let offset = usize::from(first.is_on_curve());

        self.out.push(PathCommand::MoveTo(start));
        self.current = start;
        for (i, p) in walked.iter().enumerate() {
            self.point(i + offset, p.point, p.kind)?;
        }
        self.point(points.len(), start, ControlPointKind::OnCurve)
    }

    /// Handles the point at `index`; the closing point has index `len`.
    fn point(
        &mut self,
        index: usize,
        p: Point,
        kind: ControlPointKind,
    ) -> Result<(), MalformedOutline> {
        let contour = self.contour;
        self.pending = match (self.pending, kind) {
            (Pending::None, ControlPointKind::OnCurve) => {
                self.line(p);
                Pending::None
            }
            (Pending::Quad(c), ControlPointKind::OnCurve) => {
                self.quad(c, p);
                Pending::None
            }
            (Pending::CubicPair(c1, c2), ControlPointKind::OnCurve) => {
                self.cubic(c1, c2, p);
                Pending::None
            }
            (Pending::Cubic(_), ControlPointKind::OnCurve) => {
                return Err(MalformedOutline::UnpairedCubic {
                    contour,
                    point: index.saturating_sub(1),
                });
            }
            (Pending::None, ControlPointKind::OffCurveQuadratic) => Pending::Quad(p),
            (Pending::Quad(c), ControlPointKind::OffCurveQuadratic) => {
                // Two quadratic control points in a row imply an on-curve point between them.
                let mid = c.midpoint(p);
                self.quad(c, mid);
                Pending::Quad(p)
            }
            (Pending::None, ControlPointKind::OffCurveCubic) => Pending::Cubic(p),
            (Pending::Cubic(c1), ControlPointKind::OffCurveCubic) => Pending::CubicPair(c1, p),
            (Pending::CubicPair(..), ControlPointKind::OffCurveCubic) => {
                return Err(MalformedOutline::ExcessCubic {
                    contour,
                    point: index,
                });
            }
            (Pending::Quad(_), ControlPointKind::OffCurveCubic)
            | (Pending::Cubic(_) | Pending::CubicPair(..), ControlPointKind::OffCurveQuadratic) => {
                return Err(MalformedOutline::MixedControlPoints {
                    contour,
                    point: index,
                });
            }
        };
        Ok(())
    }

    fn line(&mut self, p: Point) {
        self.out.push(PathCommand::LineTo(p));
        self.current = p;
    }

    fn quad(&mut self, c: Point, p: Point) {
        if self.supports_quadratic {
            self.out.push(PathCommand::QuadTo(c, p));
        } else {
            let cubic = QuadBez::new(self.current, c, p).raise();
            self.out
                .push(PathCommand::CubicTo(cubic.p1, cubic.p2, cubic.p3));
        }
        self.current = p;
    }

    fn cubic(&mut self, c1: Point, c2: Point, p: Point) {
        self.out.push(PathCommand::CubicTo(c1, c2, p));
        self.current = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn outline(points: Vec<ContourPoint>) -> Outline {
        Outline::from_contours(vec![Contour::new(points)])
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn malformed(outline: &Outline) -> MalformedOutline {
        match decompose(outline, false) {
            Err(Error::MalformedOutline(err)) => err,
            other => panic!("expected a malformed outline, got {other:?}"),
        }
    }

    #[test]
    fn lines_only() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::on(pt(0., 0.)),
                ContourPoint::on(pt(1., 0.)),
                ContourPoint::on(pt(1., 1.)),
            ]),
            false,
        )
        .unwrap();
        assert_eq!(
            commands,
            [
                PathCommand::MoveTo(pt(0., 0.)),
                PathCommand::LineTo(pt(1., 0.)),
                PathCommand::LineTo(pt(1., 1.)),
                PathCommand::LineTo(pt(0., 0.)),
            ]
        );
    }

    #[test]
    fn single_point_contour() {
        let commands = decompose(&outline(vec![ContourPoint::on(pt(3., 4.))]), false).unwrap();
        assert_eq!(
            commands,
            [PathCommand::MoveTo(pt(3., 4.)), PathCommand::LineTo(pt(3., 4.))]
        );
    }

    #[test]
    fn native_quadratic() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::on(pt(0., 0.)),
                ContourPoint::quad(pt(5., 5.)),
                ContourPoint::on(pt(10., 0.)),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(
            commands,
            [
                PathCommand::MoveTo(pt(0., 0.)),
                PathCommand::QuadTo(pt(5., 5.), pt(10., 0.)),
                PathCommand::LineTo(pt(0., 0.)),
            ]
        );
    }

    #[test]
    fn cubic_pair() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::on(pt(0., 0.)),
                ContourPoint::cubic(pt(0., 10.)),
                ContourPoint::cubic(pt(10., 10.)),
                ContourPoint::on(pt(10., 0.)),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(
            commands,
            [
                PathCommand::MoveTo(pt(0., 0.)),
                PathCommand::CubicTo(pt(0., 10.), pt(10., 10.), pt(10., 0.)),
                PathCommand::LineTo(pt(0., 0.)),
            ]
        );
    }

    #[test]
    fn cubic_pair_wraps_to_start() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::on(pt(0., 0.)),
                ContourPoint::on(pt(10., 0.)),
                ContourPoint::cubic(pt(10., 10.)),
                ContourPoint::cubic(pt(0., 10.)),
            ]),
            false,
        )
        .unwrap();
        assert_eq!(
            commands.last(),
            Some(&PathCommand::CubicTo(pt(10., 10.), pt(0., 10.), pt(0., 0.)))
        );
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn starts_on_quadratic_after_on_curve_last() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::quad(pt(5., 5.)),
                ContourPoint::on(pt(10., 0.)),
                ContourPoint::on(pt(0., 0.)),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(
            commands,
            [
                PathCommand::MoveTo(pt(0., 0.)),
                PathCommand::QuadTo(pt(5., 5.), pt(10., 0.)),
                PathCommand::LineTo(pt(0., 0.)),
            ]
        );
    }

    #[test]
    fn all_quadratic_contour_starts_at_implied_point() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::quad(pt(0., 0.)),
                ContourPoint::quad(pt(10., 0.)),
                ContourPoint::quad(pt(10., 10.)),
                ContourPoint::quad(pt(0., 10.)),
            ]),
            true,
        )
        .unwrap();
        assert_eq!(
            commands,
            [
                PathCommand::MoveTo(pt(0., 5.)),
                PathCommand::QuadTo(pt(0., 0.), pt(5., 0.)),
                PathCommand::QuadTo(pt(10., 0.), pt(10., 5.)),
                PathCommand::QuadTo(pt(10., 10.), pt(5., 10.)),
                PathCommand::QuadTo(pt(0., 10.), pt(0., 5.)),
            ]
        );
    }

    #[test]
    fn empty_contour() {
        assert_eq!(
            malformed(&outline(vec![])),
            MalformedOutline::EmptyContour { contour: 0 }
        );
    }

    #[test]
    fn lone_cubic() {
        let err = malformed(&outline(vec![
            ContourPoint::on(pt(0., 0.)),
            ContourPoint::cubic(pt(5., 5.)),
            ContourPoint::on(pt(10., 0.)),
        ]));
        assert_eq!(
            err,
            MalformedOutline::UnpairedCubic {
                contour: 0,
                point: 1
            }
        );
    }

    #[test]
    fn three_cubics() {
        let err = malformed(&outline(vec![
            ContourPoint::on(pt(0., 0.)),
            ContourPoint::cubic(pt(1., 1.)),
            ContourPoint::cubic(pt(2., 1.)),
            ContourPoint::cubic(pt(3., 1.)),
            ContourPoint::on(pt(4., 0.)),
        ]));
        assert_eq!(
            err,
            MalformedOutline::ExcessCubic {
                contour: 0,
                point: 3
            }
        );
    }

    #[test]
    fn mixed_control_points() {
        let err = malformed(&outline(vec![
            ContourPoint::on(pt(0., 0.)),
            ContourPoint::quad(pt(1., 1.)),
            ContourPoint::cubic(pt(2., 1.)),
            ContourPoint::on(pt(4., 0.)),
        ]));
        assert_eq!(
            err,
            MalformedOutline::MixedControlPoints {
                contour: 0,
                point: 2
            }
        );
    }

    #[test]
    fn cubic_start() {
        let err = malformed(&outline(vec![
            ContourPoint::cubic(pt(1., 1.)),
            ContourPoint::cubic(pt(2., 1.)),
            ContourPoint::on(pt(4., 0.)),
        ]));
        assert_eq!(err, MalformedOutline::ContourStartsWithCubic { contour: 0 });
    }

    #[test]
    fn quadratic_start_wrapping_to_cubic() {
        let quad_on_cubic_cubic = outline(vec![
            ContourPoint::quad(pt(1., 1.)),
            ContourPoint::on(pt(2., 0.)),
            ContourPoint::cubic(pt(3., 1.)),
            ContourPoint::cubic(pt(4., 1.)),
        ]);
        let quad_cubic_cubic = outline(vec![
            ContourPoint::quad(pt(1., 1.)),
            ContourPoint::cubic(pt(3., 1.)),
            ContourPoint::cubic(pt(4., 1.)),
        ]);
        for glyph in [quad_on_cubic_cubic, quad_cubic_cubic] {
            assert_eq!(
                malformed(&glyph),
                MalformedOutline::ContourStartsWithCubic { contour: 0 }
            );
        }
    }

    #[test]
    fn non_finite_coordinates_pass_through() {
        let commands = decompose(
            &outline(vec![
                ContourPoint::on(pt(0., 0.)),
                ContourPoint::on(pt(f64::NAN, 1.)),
                ContourPoint::quad(pt(f64::INFINITY, 2.)),
                ContourPoint::on(pt(3., 0.)),
            ]),
            true,
        )
        .unwrap();
        let [
            PathCommand::MoveTo(start),
            PathCommand::LineTo(nan),
            PathCommand::QuadTo(inf, end),
            PathCommand::LineTo(close),
        ] = commands[..]
        else {
            panic!("unexpected commands {commands:?}");
        };
        assert_eq!(start, pt(0., 0.));
        assert!(nan.x.is_nan());
        assert_eq!(nan.y, 1.);
        assert_eq!(inf, pt(f64::INFINITY, 2.));
        assert_eq!(end, pt(3., 0.));
        assert_eq!(close, pt(0., 0.));
    }

    #[test]
    fn iterator_stops_after_error() {
        let outline = Outline::from_contours(vec![
            Contour::new(vec![ContourPoint::on(pt(0., 0.)), ContourPoint::on(pt(1., 0.))]),
            Contour::default(),
            Contour::new(vec![ContourPoint::on(pt(5., 5.))]),
        ]);
        let items: Vec<_> = outline.commands(false).collect();
        assert_eq!(items.len(), 4);
        assert!(items[..3].iter().all(Result::is_ok));
        assert_eq!(
            items[3],
            Err(Error::MalformedOutline(MalformedOutline::EmptyContour {
                contour: 1
            }))
        );
        let mut iter = outline.commands(false);
        iter.by_ref().for_each(drop);
        assert!(iter.next().is_none());
        // The collected form reports the error and nothing else.
        assert!(decompose(&outline, false).is_err());
    }
}

// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumers of decomposed outlines.

use peniko::kurbo::{BezPath, Point, QuadBez};

use crate::command::PathCommand;

/// Receiver for path commands.
///
/// Implementors must handle moves, lines and cubic curves. Quadratic curves
/// are raised to cubics unless the implementor overrides
/// [`quad_to`](Self::quad_to) and reports support through
/// [`supports_quadratic`](Self::supports_quadratic).
pub trait PathSink {
    /// Starts a new contour at `p`.
    fn move_to(&mut self, p: Point);

    /// Draws a straight line to `p`.
    fn line_to(&mut self, p: Point);

    /// Draws a cubic Bézier to `p` with control points `c1` and `c2`.
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);

    /// Draws a quadratic Bézier from `from` to `p` with control point `c`.
    ///
    /// `from` is the current point. The default implementation raises the
    /// curve to a cubic.
    fn quad_to(&mut self, from: Point, c: Point, p: Point) {
        let cubic = QuadBez::new(from, c, p).raise();
        self.curve_to(cubic.p1, cubic.p2, cubic.p3);
    }

    /// Whether quadratic curves should be handed over as such.
    fn supports_quadratic(&self) -> bool {
        false
    }
}

impl PathSink for BezPath {
    fn move_to(&mut self, p: Point) {
        Self::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        Self::line_to(self, p);
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        Self::curve_to(self, c1, c2, p);
    }

    fn quad_to(&mut self, _from: Point, c: Point, p: Point) {
        Self::quad_to(self, c, p);
    }

    fn supports_quadratic(&self) -> bool {
        true
    }
}

/// Records commands as they are received.
impl PathSink for Vec<PathCommand> {
    fn move_to(&mut self, p: Point) {
        self.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(PathCommand::LineTo(p));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.push(PathCommand::CubicTo(c1, c2, p));
    }

    fn quad_to(&mut self, _from: Point, c: Point, p: Point) {
        self.push(PathCommand::QuadTo(c, p));
    }

    fn supports_quadratic(&self) -> bool {
        true
    }
}

/// Forwards path commands to a skrifa [`OutlinePen`](skrifa::outline::OutlinePen).
///
/// Coordinates are narrowed to `f32`. Pens accept quadratic curves, so they are
/// passed through unchanged.
#[cfg(feature = "skrifa")]
#[derive(Debug)]
pub struct PenSink<'a, P: ?Sized> {
    pen: &'a mut P,
}

#[cfg(feature = "skrifa")]
impl<'a, P: skrifa::outline::OutlinePen + ?Sized> PenSink<'a, P> {
    pub fn new(pen: &'a mut P) -> Self {
        Self { pen }
    }
}

#[cfg(feature = "skrifa")]
impl<P: skrifa::outline::OutlinePen + ?Sized> PathSink for PenSink<'_, P> {
    #[inline]
    fn move_to(&mut self, p: Point) {
        self.pen.move_to(p.x as f32, p.y as f32);
    }

    #[inline]
    fn line_to(&mut self, p: Point) {
        self.pen.line_to(p.x as f32, p.y as f32);
    }

    #[inline]
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.pen.curve_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            p.x as f32,
            p.y as f32,
        );
    }

    #[inline]
    fn quad_to(&mut self, _from: Point, c: Point, p: Point) {
        self.pen.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32);
    }

    fn supports_quadratic(&self) -> bool {
        true
    }
}

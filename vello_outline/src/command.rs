// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{PathEl, Point};

use crate::sink::PathSink;

/// A path construction command produced by outline decomposition.
///
/// There is no close command: every contour ends with a segment back to its
/// starting point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Begins a new contour.
    MoveTo(Point),
    /// A straight line from the current point.
    LineTo(Point),
    /// A quadratic Bézier from the current point with one control point.
    ///
    /// Only produced when the consumer supports quadratic segments.
    QuadTo(Point, Point),
    /// A cubic Bézier from the current point with two control points.
    CubicTo(Point, Point, Point),
}

impl PathCommand {
    /// The point the command leaves the pen at.
    pub fn end_point(&self) -> Point {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CubicTo(_, _, p) => p,
        }
    }
}

impl From<PathCommand> for PathEl {
    fn from(command: PathCommand) -> Self {
        match command {
            PathCommand::MoveTo(p) => Self::MoveTo(p),
            PathCommand::LineTo(p) => Self::LineTo(p),
            PathCommand::QuadTo(c, p) => Self::QuadTo(c, p),
            PathCommand::CubicTo(c1, c2, p) => Self::CurveTo(c1, c2, p),
        }
    }
}

/// Replays path commands into a [`PathSink`], tracking the current point.
///
/// Quadratic commands are handed to [`PathSink::quad_to`] with their start
/// point, so sinks without native quadratic support can raise them to cubics.
pub struct Replay<'a, S: PathSink + ?Sized> {
    sink: &'a mut S,
    current: Point,
}

impl<'a, S: PathSink + ?Sized> Replay<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            current: Point::ZERO,
        }
    }

    /// The end point of the last replayed command.
    pub fn current_point(&self) -> Point {
        self.current
    }

    pub fn apply(&mut self, command: &PathCommand) {
        match *command {
            PathCommand::MoveTo(p) => self.sink.move_to(p),
            PathCommand::LineTo(p) => self.sink.line_to(p),
            PathCommand::QuadTo(c, p) => self.sink.quad_to(self.current, c, p),
            PathCommand::CubicTo(c1, c2, p) => self.sink.curve_to(c1, c2, p),
        }
        self.current = command.end_point();
    }
}

impl<S: PathSink + ?Sized> core::fmt::Debug for Replay<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Replay")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

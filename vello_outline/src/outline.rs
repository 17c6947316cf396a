// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outlines as contours of typed control points.

use peniko::kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};

use crate::command::Replay;
use crate::decompose::Decompose;
use crate::math::Matrix;
use crate::sink::PathSink;
use crate::Result;

/// The role of a control point in the curve it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlPointKind {
    /// The curve passes through this point.
    OnCurve,
    /// The single control point of a quadratic Bézier segment.
    OffCurveQuadratic,
    /// One of the two control points of a cubic Bézier segment.
    OffCurveCubic,
}

/// A control point of a contour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContourPoint {
    pub point: Point,
    pub kind: ControlPointKind,
    /// Extra tag bits from the font engine, carried through unchanged.
    ///
    /// These hold the engine's drop-out control mode. Nothing in this crate
    /// interprets them. Only the low six bits fit in a raw tag, so
    /// [`Outline::to_raw`] rejects larger values.
    pub dropout: u8,
}

impl ContourPoint {
    pub const fn new(point: Point, kind: ControlPointKind) -> Self {
        Self {
            point,
            kind,
            dropout: 0,
        }
    }

    /// An on-curve point.
    pub const fn on(point: Point) -> Self {
        Self::new(point, ControlPointKind::OnCurve)
    }

    /// A quadratic off-curve point.
    pub const fn quad(point: Point) -> Self {
        Self::new(point, ControlPointKind::OffCurveQuadratic)
    }

    /// A cubic off-curve point.
    pub const fn cubic(point: Point) -> Self {
        Self::new(point, ControlPointKind::OffCurveCubic)
    }

    /// Returns the point with its drop-out bits replaced.
    #[must_use]
    pub const fn with_dropout(mut self, dropout: u8) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn is_on_curve(&self) -> bool {
        self.kind == ControlPointKind::OnCurve
    }
}

/// One closed loop of control points.
///
/// The last point implicitly connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ContourPoint> {
        self.points.iter()
    }

    /// Reverses the direction of travel, keeping the first point in place.
    ///
    /// Unlike a plain reversal of the point run, the contour still starts
    /// where it did, so its first `MoveTo` is unchanged.
    pub fn reverse(&mut self) {
        if let Some(rest) = self.points.get_mut(1..) {
            rest.reverse();
        }
    }

    /// Twice the signed area of the control polygon; positive is counter-clockwise in y-up space.
    fn signed_area2(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let p0 = self.points[i].point;
                let p1 = self.points[(i + 1) % n].point;
                p0.x * p1.y - p1.x * p0.y
            })
            .sum()
    }
}

impl FromIterator<ContourPoint> for Contour {
    fn from_iter<I: IntoIterator<Item = ContourPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Contour {
    type Item = &'a ContourPoint;
    type IntoIter = core::slice::Iter<'a, ContourPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Direction of travel of an outline's contours, in a y-up coordinate system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Outer contours run clockwise, as in TrueType outlines.
    Clockwise,
    /// Outer contours run counter-clockwise, as in PostScript outlines.
    CounterClockwise,
    /// The outline encloses no area.
    None,
}

/// A side of a stroked contour, relative to its direction of travel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrokeBorder {
    Left,
    Right,
}

impl StrokeBorder {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A glyph outline: an ordered set of closed contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub contours: Vec<Contour>,
}

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contours(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn n_contours(&self) -> usize {
        self.contours.len()
    }

    pub fn n_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &ContourPoint> + '_ {
        self.contours.iter().flat_map(|contour| contour.points.iter())
    }

    fn points_mut(&mut self) -> impl Iterator<Item = &mut ContourPoint> + '_ {
        self.contours
            .iter_mut()
            .flat_map(|contour| contour.points.iter_mut())
    }

    /// Returns a lazy decomposition of this outline into path commands.
    pub fn commands(&self, supports_quadratic: bool) -> Decompose<'_> {
        Decompose::new(self, supports_quadratic)
    }

    /// Checks that every contour is well formed, without keeping any output.
    pub fn check(&self) -> Result<()> {
        self.commands(true).try_for_each(|command| command.map(drop))
    }

    /// Decomposes the outline and replays it into `sink`.
    ///
    /// Quadratic segments are passed through only if the sink supports them.
    /// The outline is validated before anything reaches the sink, so a
    /// malformed outline leaves the sink untouched.
    pub fn draw(&self, sink: &mut impl PathSink) -> Result<()> {
        let commands = crate::decompose(self, sink.supports_quadratic())?;
        let mut replay = Replay::new(sink);
        for command in &commands {
            replay.apply(command);
        }
        Ok(())
    }

    /// Decomposes the outline into a kurbo path.
    pub fn to_bez_path(&self) -> Result<BezPath> {
        let mut path = BezPath::new();
        self.draw(&mut path)?;
        Ok(path)
    }

    /// Moves every point by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        for p in self.points_mut() {
            p.point += offset;
        }
    }

    /// Applies `transform` to every point.
    pub fn transform(&mut self, transform: Affine) {
        for p in self.points_mut() {
            p.point = transform * p.point;
        }
    }

    /// Applies a 16.16 fixed point matrix to every point.
    pub fn transform_fixed(&mut self, matrix: &Matrix) {
        self.transform(matrix.to_affine());
    }

    /// Reverses the direction of every contour.
    ///
    /// Each contour keeps its first point, see [`Contour::reverse`].
    pub fn reverse(&mut self) {
        for contour in &mut self.contours {
            contour.reverse();
        }
    }

    /// Appends the contours of `other` to this outline.
    pub fn append(&mut self, other: &Self) {
        self.contours.extend_from_slice(&other.contours);
    }

    /// Returns the box enclosing every control point, or `None` if there are no points.
    ///
    /// This is cheap but may be larger than the [bounding box](Self::bounding_box).
    pub fn control_box(&self) -> Option<Rect> {
        let mut points = self.points().map(|p| p.point);
        let first = points.next()?;
        Some(points.fold(Rect::from_points(first, first), |bbox, p| bbox.union_pt(p)))
    }

    /// Returns the exact bounds of the decomposed outline, or `None` if there are no points.
    pub fn bounding_box(&self) -> Result<Option<Rect>> {
        if self.n_points() == 0 {
            // Still reject empty contours.
            self.check()?;
            return Ok(None);
        }
        Ok(Some(self.to_bez_path()?.bounding_box()))
    }

    /// Returns the fill orientation, judged by the signed area of the control polygons.
    pub fn orientation(&self) -> Orientation {
        let area: f64 = self.contours.iter().map(Contour::signed_area2).sum();
        if area > 0.0 {
            Orientation::CounterClockwise
        } else if area < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::None
        }
    }

    /// Returns the stroke border that falls inside the filled area.
    ///
    /// Outlines without a clear orientation are treated as clockwise.
    pub fn inside_border(&self) -> StrokeBorder {
        match self.orientation() {
            Orientation::CounterClockwise => StrokeBorder::Left,
            Orientation::Clockwise | Orientation::None => StrokeBorder::Right,
        }
    }

    /// Returns the stroke border that falls outside the filled area.
    pub fn outside_border(&self) -> StrokeBorder {
        self.inside_border().opposite()
    }
}

impl FromIterator<Contour> for Outline {
    fn from_iter<I: IntoIterator<Item = Contour>>(iter: I) -> Self {
        Self::from_contours(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MalformedOutline};

    fn square(x0: f64, y0: f64, size: f64) -> Contour {
        [(x0, y0), (x0 + size, y0), (x0 + size, y0 + size), (x0, y0 + size)]
            .into_iter()
            .map(|(x, y)| ContourPoint::on(Point::new(x, y)))
            .collect()
    }

    #[test]
    fn counts() {
        let outline: Outline = [square(0., 0., 1.), square(2., 0., 1.)].into_iter().collect();
        assert_eq!(outline.n_contours(), 2);
        assert_eq!(outline.n_points(), 8);
    }

    #[test]
    fn reverse_keeps_first_point() {
        let mut contour = square(0., 0., 1.);
        contour.reverse();
        let points: Vec<Point> = contour.iter().map(|p| p.point).collect();
        assert_eq!(
            points,
            [
                Point::new(0., 0.),
                Point::new(0., 1.),
                Point::new(1., 1.),
                Point::new(1., 0.)
            ]
        );
    }

    #[test]
    fn orientation_follows_winding() {
        let mut outline = Outline::from_contours(vec![square(0., 0., 2.)]);
        assert_eq!(outline.orientation(), Orientation::CounterClockwise);
        outline.reverse();
        assert_eq!(outline.orientation(), Orientation::Clockwise);
        assert_eq!(Outline::new().orientation(), Orientation::None);
    }

    #[test]
    fn control_box_includes_off_curve_points() {
        let outline = Outline::from_contours(vec![Contour::new(vec![
            ContourPoint::on(Point::new(0., 0.)),
            ContourPoint::quad(Point::new(5., 10.)),
            ContourPoint::on(Point::new(10., 0.)),
        ])]);
        assert_eq!(
            outline.control_box(),
            Some(Rect::new(0., 0., 10., 10.))
        );
        // The curve itself only reaches half way to its control point.
        let bbox = outline.bounding_box().unwrap().unwrap();
        assert!((bbox.y1 - 5.).abs() < 1e-9);
        assert_eq!(Outline::new().control_box(), None);
    }

    #[test]
    fn bounding_box_rejects_empty_contour() {
        let outline = Outline::from_contours(vec![Contour::default()]);
        assert_eq!(
            outline.bounding_box(),
            Err(Error::MalformedOutline(MalformedOutline::EmptyContour {
                contour: 0
            }))
        );
    }

    #[test]
    fn translate_and_transform() {
        let mut outline = Outline::from_contours(vec![square(0., 0., 1.)]);
        outline.translate(Vec2::new(1., 2.));
        assert_eq!(
            outline.control_box(),
            Some(Rect::new(1., 2., 2., 3.))
        );
        outline.transform(Affine::scale(2.));
        assert_eq!(
            outline.control_box(),
            Some(Rect::new(2., 4., 4., 6.))
        );
        outline.transform_fixed(&Matrix {
            xx: 0x8000,
            yy: 0x8000,
            ..Matrix::IDENTITY
        });
        assert_eq!(
            outline.control_box(),
            Some(Rect::new(1., 2., 2., 3.))
        );
    }

    #[test]
    fn append_keeps_dropout_bits() {
        let mut outline = Outline::from_contours(vec![square(0., 0., 1.)]);
        let other = Outline::from_contours(vec![Contour::new(vec![
            ContourPoint::on(Point::new(5., 5.)).with_dropout(0b101),
        ])]);
        outline.append(&other);
        assert_eq!(outline.n_contours(), 2);
        assert_eq!(outline.contours[1].points[0].dropout, 0b101);
    }

    #[test]
    fn check_reports_malformed_contours() {
        let mut outline = Outline::from_contours(vec![square(0., 0., 1.)]);
        assert_eq!(outline.check(), Ok(()));
        outline.contours.push(Contour::new(vec![
            ContourPoint::on(Point::new(0., 0.)),
            ContourPoint::cubic(Point::new(1., 1.)),
            ContourPoint::on(Point::new(2., 0.)),
        ]));
        assert_eq!(
            outline.check(),
            Err(Error::MalformedOutline(MalformedOutline::UnpairedCubic {
                contour: 1,
                point: 1
            }))
        );
    }

    #[test]
    fn borders_follow_orientation() {
        let mut outline = Outline::from_contours(vec![square(0., 0., 2.)]);
        assert_eq!(outline.inside_border(), StrokeBorder::Left);
        assert_eq!(outline.outside_border(), StrokeBorder::Right);
        outline.reverse();
        assert_eq!(outline.inside_border(), StrokeBorder::Right);
        assert_eq!(outline.outside_border(), StrokeBorder::Left);
        assert_eq!(Outline::new().inside_border(), StrokeBorder::Right);
    }
}

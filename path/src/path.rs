// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use crate::path_builder::PathBuilder;
use crate::path_geometry;
use crate::transform::Transform;
use crate::{Point, Rect};

/// A path verb.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum PathVerb {
    Move,
    Line,
    Quad,
    Conic,
    Cubic,
    Close,
}

impl PathVerb {
    /// Returns the number of points consumed by the verb.
    pub fn points_count(self) -> usize {
        match self {
            PathVerb::Move => 1,
            PathVerb::Line => 1,
            PathVerb::Quad => 2,
            PathVerb::Conic => 2,
            PathVerb::Cubic => 3,
            PathVerb::Close => 0,
        }
    }
}

/// A Bezier path.
///
/// Can be created via [`PathBuilder`].
/// Where [`PathBuilder`] can be created from the [`Path`] using [`clear`] to reuse the allocation.
///
/// Path is immutable and uses compact storage, where segment types and numbers are stored
/// separately. Each `Conic` verb has a matching weight in [`Path::conic_weights`],
/// consumed in verb order.
///
/// # Guarantees
///
/// - Has a valid, precomputed bounds.
/// - All points are finite.
/// - Has at least two segments.
/// - Each contour starts with a MoveTo.
/// - No duplicated Move.
/// - No duplicated Close.
/// - Zero-length contours are allowed.
///
/// [`PathBuilder`]: struct.PathBuilder.html
/// [`clear`]: struct.Path.html#method.clear
#[derive(Clone, PartialEq)]
pub struct Path {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) conic_weights: Vec<f32>,
    pub(crate) bounds: Rect,
}

impl Path {
    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if path is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bounds of the path's points.
    ///
    /// The value is already calculated.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns an internal vector of verbs.
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    /// Returns an internal vector of points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns an internal vector of conic weights.
    pub fn conic_weights(&self) -> &[f32] {
        &self.conic_weights
    }

    /// Returns the number of contours, i.e. the number of Move verbs.
    pub fn contours_count(&self) -> usize {
        self.verbs.iter().filter(|v| **v == PathVerb::Move).count()
    }

    /// Returns the last point of the path.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    /// Returns a transformed in-place path.
    ///
    /// Some points may become NaN/inf therefore this method can fail.
    pub fn transform(mut self, ts: Transform) -> Option<Self> {
        if ts.is_identity() {
            return Some(self);
        }

        ts.map_points(&mut self.points);

        // Update bounds.
        self.bounds = Rect::from_points(&self.points)?;

        Some(self)
    }

    /// Returns a copy of the path with conics and cubics replaced by quads.
    ///
    /// Conics are split with a 0.25 tolerance. Each cubic is subdivided into
    /// eight pieces and every piece is approximated by a single quad.
    pub fn to_quads(&self) -> Option<Path> {
        let mut pb = PathBuilder::with_capacity(self.verbs.len(), self.points.len());
        let mut iter = self.raw_segments();
        while let Some(segment) = iter.next() {
            match segment {
                PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
                PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
                PathSegment::QuadTo(p1, p2) => pb.quad_to_pt(p1, p2),
                PathSegment::ConicTo(p1, p2, weight) => {
                    let p0 = iter.last_point();
                    match path_geometry::AutoConicToQuads::compute(p0, p1, p2, weight) {
                        Some(quadder) => {
                            for i in 0..quadder.len as usize {
                                let offset = 1 + i * 2;
                                pb.quad_to_pt(quadder.points[offset], quadder.points[offset + 1]);
                            }
                        }
                        None => pb.line_to(p2.x, p2.y),
                    }
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    let cubic = [iter.last_point(), p1, p2, p3];
                    let pieces = path_geometry::subdivide_cubic8(&cubic);
                    for chunk in pieces.chunks_exact(4) {
                        let quad = path_geometry::cubic_to_quadratic(&[
                            chunk[0], chunk[1], chunk[2], chunk[3],
                        ]);
                        pb.quad_to_pt(quad[1], quad[2]);
                    }
                }
                PathSegment::Close => pb.close(),
            }
        }

        pb.finish()
    }

    /// Returns a logical iterator over path's segments.
    ///
    /// See [`PathSegmentsIter`] for details.
    pub fn segments(&self) -> PathSegmentsIter {
        PathSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            weights_index: 0,
            force_close: false,
            need_close: false,
            close_line: false,
            move_to: Point::zero(),
            last_point: Point::zero(),
        }
    }

    /// Returns an iterator over the stored verbs and points.
    ///
    /// Unlike [`Path::segments`], nothing is synthesized.
    pub fn raw_segments(&self) -> RawSegmentsIter {
        RawSegmentsIter {
            path: self,
            verb_index: 0,
            points_index: 0,
            weights_index: 0,
            last_point: Point::zero(),
        }
    }

    /// Clears the path and returns a `PathBuilder` that will reuse an allocated memory.
    pub fn clear(mut self) -> PathBuilder {
        self.verbs.clear();
        self.points.clear();
        self.conic_weights.clear();

        PathBuilder {
            verbs: self.verbs,
            points: self.points,
            conic_weights: self.conic_weights,
            last_move_to_index: 0,
            move_to_required: true,
        }
    }
}

impl core::fmt::Debug for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        let mut s = alloc::string::String::new();
        for segment in self.raw_segments() {
            match segment {
                PathSegment::MoveTo(p) => s.write_fmt(format_args!("M {} {} ", p.x, p.y))?,
                PathSegment::LineTo(p) => s.write_fmt(format_args!("L {} {} ", p.x, p.y))?,
                PathSegment::QuadTo(p0, p1) => {
                    s.write_fmt(format_args!("Q {} {} {} {} ", p0.x, p0.y, p1.x, p1.y))?
                }
                PathSegment::ConicTo(p0, p1, w) => s.write_fmt(format_args!(
                    "K {} {} {} {} {} ",
                    p0.x, p0.y, p1.x, p1.y, w
                ))?,
                PathSegment::CubicTo(p0, p1, p2) => s.write_fmt(format_args!(
                    "C {} {} {} {} {} {} ",
                    p0.x, p0.y, p1.x, p1.y, p2.x, p2.y
                ))?,
                PathSegment::Close => s.write_fmt(format_args!("Z "))?,
            }
        }

        s.pop(); // ' '

        f.debug_struct("Path")
            .field("segments", &s)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// A path segment.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    ConicTo(Point, Point, f32),
    CubicTo(Point, Point, Point),
    Close,
}

/// A logical path segments iterator.
///
/// - A `Close` whose last point differs from the contour start first yields
///   a `LineTo` back to the start, and only then a `Close`.
/// - A trailing `MoveTo` is skipped.
/// - With [`set_auto_close`](Self::set_auto_close), open contours are closed as well.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    weights_index: usize,

    force_close: bool,
    need_close: bool,
    close_line: bool,
    move_to: Point,
    last_point: Point,
}

impl<'a> PathSegmentsIter<'a> {
    /// Sets the force closing mode. Off by default.
    ///
    /// When enabled, each open contour is closed before the next `MoveTo`
    /// and at the end of the path.
    pub fn set_auto_close(&mut self, flag: bool) {
        self.force_close = flag;
    }

    /// Checks that the last returned `LineTo` was synthesized by a `Close`.
    pub fn is_close_line(&self) -> bool {
        self.close_line
    }

    /// Checks that the current contour ends with a `Close` verb
    /// or that force closing is enabled.
    pub fn is_closed_contour(&self) -> bool {
        if self.force_close {
            return true;
        }

        let verbs = &self.path.verbs[self.verb_index..];
        // Skip the contour's own Move.
        let verbs = match verbs.first() {
            Some(PathVerb::Move) => &verbs[1..],
            _ => verbs,
        };

        for verb in verbs {
            match verb {
                PathVerb::Move => return false,
                PathVerb::Close => return true,
                _ => {}
            }
        }

        false
    }

    /// Returns the end point of the last returned segment.
    pub fn last_point(&self) -> Point {
        self.last_point
    }

    /// Returns the current verb.
    pub fn curr_verb(&self) -> PathVerb {
        self.path.verbs[self.verb_index.saturating_sub(1)]
    }

    /// Returns the next verb.
    pub fn next_verb(&self) -> Option<PathVerb> {
        self.path.verbs.get(self.verb_index).cloned()
    }

    /// Checks that the remaining part of the current contour has a non-zero tangent.
    pub(crate) fn has_valid_tangent(&self) -> bool {
        let mut iter = self.clone();
        loop {
            let start = iter.last_point;
            let segment = match iter.next() {
                Some(v) => v,
                None => return false,
            };

            match segment {
                PathSegment::MoveTo(_) | PathSegment::Close => {
                    return false;
                }
                PathSegment::LineTo(p) => {
                    if start == p {
                        continue;
                    }

                    return true;
                }
                PathSegment::QuadTo(p1, p2) | PathSegment::ConicTo(p1, p2, _) => {
                    if start == p1 && start == p2 {
                        continue;
                    }

                    return true;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    if start == p1 && start == p2 && start == p3 {
                        continue;
                    }

                    return true;
                }
            }
        }
    }

    fn auto_close(&mut self) -> PathSegment {
        if self.last_point != self.move_to {
            // A NaN point never compares equal, so closing it with a line
            // would produce an endless loop.
            if !self.last_point.is_finite() || !self.move_to.is_finite() {
                return PathSegment::Close;
            }

            self.last_point = self.move_to;
            self.close_line = true;
            PathSegment::LineTo(self.move_to)
        } else {
            PathSegment::Close
        }
    }
}

impl<'a> Iterator for PathSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.verb_index == self.path.verbs.len() {
            if self.need_close {
                let seg = self.auto_close();
                if let PathSegment::LineTo(_) = seg {
                    return Some(seg);
                }

                self.need_close = false;
                return Some(PathSegment::Close);
            }

            return None;
        }

        let verb = self.path.verbs[self.verb_index];
        self.verb_index += 1;

        match verb {
            PathVerb::Move => {
                if self.need_close {
                    // Close the previous contour first and revisit this Move.
                    self.verb_index -= 1;
                    let seg = self.auto_close();
                    if seg == PathSegment::Close {
                        self.need_close = false;
                    }

                    return Some(seg);
                }

                if self.verb_index == self.path.verbs.len() {
                    return None;
                }

                self.move_to = self.path.points[self.points_index];
                self.points_index += 1;
                self.last_point = self.move_to;
                self.need_close = self.force_close;
                Some(PathSegment::MoveTo(self.move_to))
            }
            PathVerb::Line => {
                self.last_point = self.path.points[self.points_index];
                self.points_index += 1;
                self.close_line = false;
                Some(PathSegment::LineTo(self.last_point))
            }
            PathVerb::Quad => {
                let p1 = self.path.points[self.points_index];
                self.last_point = self.path.points[self.points_index + 1];
                self.points_index += 2;
                Some(PathSegment::QuadTo(p1, self.last_point))
            }
            PathVerb::Conic => {
                let p1 = self.path.points[self.points_index];
                self.last_point = self.path.points[self.points_index + 1];
                self.points_index += 2;
                let weight = self.path.conic_weights[self.weights_index];
                self.weights_index += 1;
                Some(PathSegment::ConicTo(p1, self.last_point, weight))
            }
            PathVerb::Cubic => {
                let p1 = self.path.points[self.points_index];
                let p2 = self.path.points[self.points_index + 1];
                self.last_point = self.path.points[self.points_index + 2];
                self.points_index += 3;
                Some(PathSegment::CubicTo(p1, p2, self.last_point))
            }
            PathVerb::Close => {
                let seg = self.auto_close();
                if let PathSegment::LineTo(_) = seg {
                    // Emit the Close itself on the next call.
                    self.verb_index -= 1;
                } else {
                    self.need_close = false;
                }

                self.last_point = self.move_to;
                Some(seg)
            }
        }
    }
}

/// A raw path segments iterator.
///
/// Yields exactly the stored verbs.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct RawSegmentsIter<'a> {
    path: &'a Path,
    verb_index: usize,
    points_index: usize,
    weights_index: usize,
    last_point: Point,
}

impl<'a> RawSegmentsIter<'a> {
    /// Returns the next verb without advancing.
    pub fn peek(&self) -> Option<PathVerb> {
        self.path.verbs.get(self.verb_index).cloned()
    }

    /// Returns the start point of the last returned segment.
    ///
    /// For a `MoveTo` this is the move point itself.
    pub fn last_point(&self) -> Point {
        self.last_point
    }
}

impl<'a> Iterator for RawSegmentsIter<'a> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let verb = *self.path.verbs.get(self.verb_index)?;
        self.verb_index += 1;

        let points = &self.path.points;
        let i = self.points_index;
        // The previous segment's end point.
        if i > 0 && verb != PathVerb::Move {
            self.last_point = points[i - 1];
        }

        let segment = match verb {
            PathVerb::Move => {
                self.last_point = points[i];
                PathSegment::MoveTo(points[i])
            }
            PathVerb::Line => PathSegment::LineTo(points[i]),
            PathVerb::Quad => PathSegment::QuadTo(points[i], points[i + 1]),
            PathVerb::Conic => {
                let weight = self.path.conic_weights[self.weights_index];
                self.weights_index += 1;
                PathSegment::ConicTo(points[i], points[i + 1], weight)
            }
            PathVerb::Cubic => PathSegment::CubicTo(points[i], points[i + 1], points[i + 2]),
            PathVerb::Close => PathSegment::Close,
        };

        self.points_index += verb.points_count();
        Some(segment)
    }
}

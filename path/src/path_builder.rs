// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// NOTE: this is not SkPathBuilder, but rather a reimplementation of SkPath.

use alloc::vec;
use alloc::vec::Vec;

use crate::{Path, Point, RRect, RRectType, Rect, Transform};

use crate::floating_point::{SaturateRound, FLOAT_PI};
use crate::path::{PathSegment, PathVerb};
use crate::scalar::{Scalar, SCALAR_ROOT_2_OVER_2};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// A direction of closed contours.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathDirection {
    /// Clockwise direction for adding closed contours.
    CW,
    /// Counter-clockwise direction for adding closed contours.
    CCW,
}

impl Default for PathDirection {
    fn default() -> Self {
        PathDirection::CW
    }
}

impl PathDirection {
    // A step in a ring of `n` points.
    fn advance(self, n: usize) -> usize {
        match self {
            PathDirection::CW => 1,
            PathDirection::CCW => n - 1,
        }
    }
}

/// Which of the two possible SVG arcs to draw.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ArcSize {
    /// The arc that spans 180 degrees or less.
    Small,
    /// The arc that spans more than 180 degrees.
    Large,
}

/// A path builder.
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    pub(crate) verbs: Vec<PathVerb>,
    pub(crate) points: Vec<Point>,
    pub(crate) conic_weights: Vec<f32>,
    pub(crate) last_move_to_index: usize,
    pub(crate) move_to_required: bool,
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        PathBuilder {
            verbs: Vec::new(),
            points: Vec::new(),
            conic_weights: Vec::new(),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    /// Creates a new builder with a specified capacity.
    ///
    /// Number of points depends on a verb type:
    ///
    /// - Move - 1
    /// - Line - 1
    /// - Quad - 2
    /// - Conic - 2
    /// - Cubic - 3
    /// - Close - 0
    pub fn with_capacity(verbs_capacity: usize, points_capacity: usize) -> Self {
        PathBuilder {
            verbs: Vec::with_capacity(verbs_capacity),
            points: Vec::with_capacity(points_capacity),
            conic_weights: Vec::new(),
            last_move_to_index: 0,
            move_to_required: true,
        }
    }

    /// Creates a new `Path` from `Rect`.
    ///
    /// Never fails since `Rect` is always valid.
    ///
    /// Segments are created clockwise: TopLeft -> TopRight -> BottomRight -> BottomLeft
    ///
    /// The contour is closed.
    pub fn from_rect(rect: Rect) -> Path {
        let verbs = vec![
            PathVerb::Move,
            PathVerb::Line,
            PathVerb::Line,
            PathVerb::Line,
            PathVerb::Close,
        ];

        Path {
            bounds: rect,
            verbs,
            points: rect_corners(&rect).to_vec(),
            conic_weights: Vec::new(),
        }
    }

    /// Creates a new `Path` from a circle.
    ///
    /// See [`PathBuilder::push_circle`] for details.
    pub fn from_circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
        let mut b = PathBuilder::new();
        b.push_circle(cx, cy, radius, PathDirection::CW);
        b.finish()
    }

    /// Creates a new `Path` from an oval.
    ///
    /// See [`PathBuilder::push_oval`] for details.
    pub fn from_oval(oval: Rect) -> Option<Path> {
        let mut b = PathBuilder::new();
        b.push_oval(oval, PathDirection::CW);
        b.finish()
    }

    /// Creates a new `Path` from a rounded rect.
    ///
    /// See [`PathBuilder::push_rrect`] for details.
    pub fn from_rrect(rrect: RRect) -> Option<Path> {
        let mut b = PathBuilder::new();
        b.push_rrect(rrect, PathDirection::CW);
        b.finish()
    }

    pub(crate) fn reserve(&mut self, additional_verbs: usize, additional_points: usize) {
        self.verbs.reserve(additional_verbs);
        self.points.reserve(additional_points);
    }

    /// Returns the current number of segments in the builder.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Checks if the builder has any segments added.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Returns the bounds of the builder's points.
    ///
    /// Returns `None` when the builder is empty or has non-finite points.
    pub fn compute_bounds(&self) -> Option<Rect> {
        Rect::from_points(&self.points)
    }

    /// Adds beginning of a contour.
    ///
    /// Multiple continuous MoveTo segments are not allowed.
    /// If the previous segment was also MoveTo, it will be overwritten with the current one.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if let Some(PathVerb::Move) = self.verbs.last() {
            let last_idx = self.points.len() - 1;
            self.points[last_idx] = Point::from_xy(x, y);
        } else {
            self.last_move_to_index = self.points.len();
            self.move_to_required = false;

            self.verbs.push(PathVerb::Move);
            self.points.push(Point::from_xy(x, y));
        }
    }

    fn inject_move_to_if_needed(&mut self) {
        if self.move_to_required {
            match self.points.get(self.last_move_to_index).cloned() {
                Some(p) => self.move_to(p.x, p.y),
                None => self.move_to(0.0, 0.0),
            }
        }
    }

    /// Adds a line from the last point.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Line);
        self.points.push(Point::from_xy(x, y));
    }

    /// Adds a quad curve from the last point to `x`, `y`.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Quad);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x, y));
    }

    pub(crate) fn quad_to_pt(&mut self, p1: Point, p: Point) {
        self.quad_to(p1.x, p1.y, p.x, p.y);
    }

    /// Adds a conic curve from the last point to `x`, `y`.
    ///
    /// - If `weight` is <= 0 or NaN - adds a line to `x`, `y`.
    /// - If `weight` is infinite - adds two lines, through `x1`, `y1`.
    /// - If `weight` is 1 - adds a quad.
    pub fn conic_to(&mut self, x1: f32, y1: f32, x: f32, y: f32, weight: f32) {
        // check for <= 0 or NaN with this test
        if !(weight > 0.0) {
            self.line_to(x, y);
        } else if !weight.is_finite() {
            self.line_to(x1, y1);
            self.line_to(x, y);
        } else if weight == 1.0 {
            self.quad_to(x1, y1, x, y);
        } else {
            self.inject_move_to_if_needed();

            self.verbs.push(PathVerb::Conic);
            self.points.push(Point::from_xy(x1, y1));
            self.points.push(Point::from_xy(x, y));
            self.conic_weights.push(weight);
        }
    }

    pub(crate) fn conic_points_to(&mut self, pt1: Point, pt2: Point, weight: f32) {
        self.conic_to(pt1.x, pt1.y, pt2.x, pt2.y, weight);
    }

    /// Adds a cubic curve from the last point to `x`, `y`.
    ///
    /// - If `Path` is empty - adds Move(0, 0) first.
    /// - If `Path` ends with Close - adds Move(last_x, last_y) first.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.inject_move_to_if_needed();

        self.verbs.push(PathVerb::Cubic);
        self.points.push(Point::from_xy(x1, y1));
        self.points.push(Point::from_xy(x2, y2));
        self.points.push(Point::from_xy(x, y));
    }

    pub(crate) fn cubic_to_pt(&mut self, p1: Point, p2: Point, p: Point) {
        self.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
    }

    /// Closes the current contour.
    ///
    /// A closed contour connects the first and the last Point
    /// with a line, forming a continuous loop.
    ///
    /// Does nothing when `Path` is empty or already closed.
    ///
    /// Open and closed contour will be filled the same way.
    /// Stroking an open contour will add LineCap at contour's start and end.
    /// Stroking an closed contour will add LineJoin at contour's start and end.
    pub fn close(&mut self) {
        // don't add a close if it's the first verb or a repeat
        if !self.verbs.is_empty() {
            if self.verbs.last().cloned() != Some(PathVerb::Close) {
                self.verbs.push(PathVerb::Close);
            }
        }

        self.move_to_required = true;
    }

    /// Returns the last point if any.
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    /// Replaces the last point.
    ///
    /// Starts a new contour when the builder is empty.
    pub fn set_last_point(&mut self, pt: Point) {
        match self.points.last_mut() {
            Some(last) => *last = pt,
            None => self.move_to(pt.x, pt.y),
        }
    }

    pub(crate) fn is_zero_length_since_point(&self, start_pt_index: usize) -> bool {
        let count = self.points.len() - start_pt_index;
        if count < 2 {
            return true;
        }

        let first = self.points[start_pt_index];
        for i in 1..count {
            if first != self.points[start_pt_index + i] {
                return false;
            }
        }

        true
    }

    // Drops everything after the first `verbs_len` verbs.
    pub(crate) fn truncate(&mut self, verbs_len: usize) {
        if verbs_len >= self.verbs.len() {
            return;
        }

        self.verbs.truncate(verbs_len);

        let points_len: usize = self.verbs.iter().map(|v| v.points_count()).sum();
        self.points.truncate(points_len);

        let weights_len = self.verbs.iter().filter(|v| **v == PathVerb::Conic).count();
        self.conic_weights.truncate(weights_len);

        self.last_move_to_index = 0;
        for (i, verb) in self.verbs.iter().enumerate().rev() {
            if *verb == PathVerb::Move {
                self.last_move_to_index = self.verbs[..i].iter().map(|v| v.points_count()).sum();
                break;
            }
        }

        self.move_to_required = self.verbs.last().map_or(true, |v| *v == PathVerb::Close);
    }

    /// Adds a rectangle contour.
    ///
    /// `start` selects the first corner, clockwise from the top-left one.
    ///
    /// The contour is closed.
    pub fn push_rect(&mut self, rect: Rect, dir: PathDirection, start: usize) {
        let pts = rect_corners(&rect);
        let step = dir.advance(4);
        let mut index = start % 4;

        self.move_to(pts[index].x, pts[index].y);
        for _ in 0..3 {
            index = (index + step) % 4;
            self.line_to(pts[index].x, pts[index].y);
        }
        self.close();
    }

    /// Adds an oval contour bounded by the provided rectangle.
    ///
    /// Starts at the right-middle point. The contour is closed.
    pub fn push_oval(&mut self, oval: Rect, dir: PathDirection) {
        self.push_oval_from(oval, dir, 1);
    }

    /// Adds an oval contour starting at one of its four axis points.
    ///
    /// `start` selects the first point, clockwise from the top-middle one.
    pub fn push_oval_from(&mut self, oval: Rect, dir: PathDirection, start: usize) {
        let cx = oval.center_x();
        let cy = oval.center_y();

        let oval_points = [
            Point::from_xy(cx, oval.top()),
            Point::from_xy(oval.right(), cy),
            Point::from_xy(cx, oval.bottom()),
            Point::from_xy(oval.left(), cy),
        ];
        let rect_points = rect_corners(&oval);

        let step = dir.advance(4);
        let mut oval_index = start % 4;
        let mut rect_index = (start + (dir == PathDirection::CCW) as usize) % 4;

        let weight = SCALAR_ROOT_2_OVER_2;
        self.move_to(oval_points[oval_index].x, oval_points[oval_index].y);
        for _ in 0..4 {
            rect_index = (rect_index + step) % 4;
            oval_index = (oval_index + step) % 4;
            self.conic_points_to(rect_points[rect_index], oval_points[oval_index], weight);
        }
        self.close();
    }

    /// Adds a circle contour.
    ///
    /// The contour is closed.
    ///
    /// Does nothing when:
    /// - `radius` <= 0
    /// - any value is not finite or really large
    pub fn push_circle(&mut self, x: f32, y: f32, r: f32, dir: PathDirection) {
        if !(r > 0.0) {
            return;
        }

        if let Some(r) = Rect::from_xywh(x - r, y - r, r + r, r + r) {
            self.push_oval(r, dir);
        }
    }

    /// Adds a rounded rectangle contour.
    ///
    /// Starts at the top of the lower-left corner for `CW`
    /// and at the left of the upper-left corner for `CCW`.
    pub fn push_rrect(&mut self, rrect: RRect, dir: PathDirection) {
        let start = match dir {
            PathDirection::CW => 6,
            PathDirection::CCW => 7,
        };
        self.push_rrect_from(rrect, dir, start);
    }

    /// Adds a rounded rectangle contour starting at one of the 8 points
    /// where corner arcs meet the edges.
    ///
    /// `start` selects the first point, clockwise from the top point of the upper-left corner.
    pub fn push_rrect_from(&mut self, rrect: RRect, dir: PathDirection, start: usize) {
        let rect = rrect.rect();
        match rrect.kind() {
            RRectType::Empty | RRectType::Rect => {
                self.push_rect(rect, dir, (start + 1) / 2);
                return;
            }
            RRectType::Oval => {
                self.push_oval_from(rect, dir, start / 2);
                return;
            }
            RRectType::Simple | RRectType::Complex => {}
        }

        let starts_with_conic = (start & 1 == 1) == (dir == PathDirection::CW);
        let weight = SCALAR_ROOT_2_OVER_2;

        let rrect_points = rrect.arc_points();
        let rrect_step = dir.advance(8);
        let mut rrect_index = start % 8;

        let rect_points = rect_corners(&rect);
        let rect_step = dir.advance(4);
        let mut rect_index = (start / 2 + (dir == PathDirection::CCW) as usize) % 4;

        let first = rrect_points[rrect_index];
        self.move_to(first.x, first.y);

        let next_conic = |pb: &mut PathBuilder, rect_index: &mut usize, rrect_index: &mut usize| {
            *rect_index = (*rect_index + rect_step) % 4;
            *rrect_index = (*rrect_index + rrect_step) % 8;
            pb.conic_points_to(rect_points[*rect_index], rrect_points[*rrect_index], weight);
        };

        if starts_with_conic {
            for _ in 0..3 {
                next_conic(self, &mut rect_index, &mut rrect_index);
                rrect_index = (rrect_index + rrect_step) % 8;
                let p = rrect_points[rrect_index];
                self.line_to(p.x, p.y);
            }
            next_conic(self, &mut rect_index, &mut rrect_index);
            // The final line is produced by close.
        } else {
            for _ in 0..4 {
                rrect_index = (rrect_index + rrect_step) % 8;
                let p = rrect_points[rrect_index];
                self.line_to(p.x, p.y);
                next_conic(self, &mut rect_index, &mut rrect_index);
            }
        }

        self.close();
    }

    /// Adds an arc tangent to the lines from the last point to (`x1`, `y1`)
    /// and from (`x1`, `y1`) to (`x2`, `y2`).
    ///
    /// Adds a line to the start of the arc, followed by a conic.
    /// Degrades to a line to (`x1`, `y1`) when `radius` is zero
    /// or when the lines are parallel.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.inject_move_to_if_needed();

        if radius == 0.0 {
            self.line_to(x1, y1);
            return;
        }

        // need to know prev point so we can construct tangent vectors
        let start = self.last_point().unwrap_or_default();
        let before = normalize_f64((x1 - start.x) as f64, (y1 - start.y) as f64);
        let after = normalize_f64((x2 - x1) as f64, (y2 - y1) as f64);
        let (before, after) = match (before, after) {
            (Some(before), Some(after)) => (before, after),
            _ => {
                self.line_to(x1, y1);
                return;
            }
        };

        let cosh = before.0 * after.0 + before.1 * after.1;
        let sinh = before.0 * after.1 - before.1 * after.0;
        if (sinh as f32).is_nearly_zero() {
            // angle is too tight
            self.line_to(x1, y1);
            return;
        }

        let dist = ((radius as f64 * (1.0 - cosh) / sinh) as f32).abs();
        let xx = x1 - dist * before.0 as f32;
        let yy = y1 - dist * before.1 as f32;

        let mut after = Point::from_xy(after.0 as f32, after.1 as f32);
        after.set_length(dist);

        self.line_to(xx, yy);
        let weight = (0.5 + cosh as f32 * 0.5).sqrt();
        self.conic_to(x1, y1, x1 + after.x, y1 + after.y, weight);
    }

    /// Adds an SVG-style elliptical arc from the last point to (`x`, `y`).
    ///
    /// `x_axis_rotation` is in degrees. The arc is built from conics,
    /// one per 120 degrees at most.
    ///
    /// Degrades to a line when a radius is zero or when the end point
    /// equals the last point. Too small radii are scaled up.
    pub fn svg_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        arc_size: ArcSize,
        sweep: PathDirection,
        x: f32,
        y: f32,
    ) {
        self.inject_move_to_if_needed();

        let start = self.last_point().unwrap_or_default();
        let end = Point::from_xy(x, y);

        // If rx = 0 or ry = 0 then this arc is treated as a straight line segment.
        if rx == 0.0 || ry == 0.0 {
            self.line_to(x, y);
            return;
        }

        // If the current point and target point for the arc are identical,
        // it should be treated as a zero length path.
        if start == end {
            self.line_to(x, y);
            return;
        }

        let mut rx = rx.abs();
        let mut ry = ry.abs();

        let mid_point_distance = (start - end).scaled(0.5);
        let mut transformed_mid_point = mid_point_distance;
        Transform::from_rotate(-x_axis_rotation).map_point(&mut transformed_mid_point);

        // Check if the radii are big enough to draw the arc, scale radii if not.
        let radii_scale = transformed_mid_point.x.sqr() / rx.sqr()
            + transformed_mid_point.y.sqr() / ry.sqr();
        if radii_scale > 1.0 {
            let radii_scale = radii_scale.sqrt();
            rx *= radii_scale;
            ry *= radii_scale;
        }

        let to_unit = Transform::from_scale(1.0 / rx, 1.0 / ry).pre_rotate(-x_axis_rotation);
        let mut unit_pts = [start, end];
        to_unit.map_points(&mut unit_pts);
        let mut delta = unit_pts[1] - unit_pts[0];

        let d = delta.x.sqr() + delta.y.sqr();
        let scale_factor_squared = (1.0 / d - 0.25).max(0.0);
        let mut scale_factor = scale_factor_squared.sqrt();
        if (sweep == PathDirection::CCW) != (arc_size == ArcSize::Large) {
            scale_factor = -scale_factor;
        }

        delta.scale(scale_factor);
        let mut center = (unit_pts[0] + unit_pts[1]).scaled(0.5);
        center.x -= delta.y;
        center.y += delta.x;
        unit_pts[0] -= center;
        unit_pts[1] -= center;

        let theta1 = unit_pts[0].y.atan2(unit_pts[0].x);
        let theta2 = unit_pts[1].y.atan2(unit_pts[1].x);
        let mut theta_arc = theta2 - theta1;
        if theta_arc < 0.0 && sweep == PathDirection::CW {
            theta_arc += FLOAT_PI * 2.0;
        } else if theta_arc > 0.0 && sweep != PathDirection::CW {
            theta_arc -= FLOAT_PI * 2.0;
        }

        // Very tiny angles cause our subsequent math to go wonky.
        if theta_arc.abs() < FLOAT_PI / (1000.0 * 1000.0) {
            self.line_to(x, y);
            return;
        }

        let from_unit = Transform::from_rotate(x_axis_rotation).pre_scale(rx, ry);

        // the arc may be slightly bigger than 1/4 circle, so allow up to 1/3rd
        let segments = i32::saturate_ceil((theta_arc / (2.0 * FLOAT_PI / 3.0)).abs()).max(1);
        let theta_width = theta_arc / segments as f32;
        let t = (0.5 * theta_width).tan();
        if !t.is_finite() {
            log::debug!("svg arc has a non-finite half-angle tangent, skipping");
            return;
        }

        let mut start_theta = theta1;
        let w = (0.5 + theta_width.cos() * 0.5).sqrt();
        let expect_integers = (FLOAT_PI * 0.5 - theta_width.abs()).is_nearly_zero()
            && rx.is_integer()
            && ry.is_integer()
            && x.is_integer()
            && y.is_integer();

        for _ in 0..segments {
            let end_theta = start_theta + theta_width;
            let sin_end_theta = end_theta.sin_snap_to_zero();
            let cos_end_theta = end_theta.cos_snap_to_zero();

            let on_curve = Point::from_xy(cos_end_theta, sin_end_theta) + center;
            let control = Point::from_xy(
                on_curve.x + t * sin_end_theta,
                on_curve.y - t * cos_end_theta,
            );

            let mut mapped = [control, on_curve];
            from_unit.map_points(&mut mapped);
            // Keep integer inputs on integers, so rounding errors
            // do not push the arc outside its bounds.
            if expect_integers {
                for p in &mut mapped {
                    p.x = (p.x + 0.5).floor();
                    p.y = (p.y + 0.5).floor();
                }
            }

            self.conic_points_to(mapped[0], mapped[1], w);
            start_theta = end_theta;
        }

        // The final point should match the input point (by definition).
        self.set_last_point(end);
    }

    /// Appends a path verbatim.
    pub fn push_path(&mut self, other: &Path) {
        let last_move_to_index = other
            .verbs
            .iter()
            .scan(0, |index, verb| {
                let current = *index;
                *index += verb.points_count();
                Some((current, *verb))
            })
            .filter(|(_, verb)| *verb == PathVerb::Move)
            .map(|(index, _)| index)
            .last()
            .unwrap_or(0);

        self.last_move_to_index = self.points.len() + last_move_to_index;
        self.move_to_required = other.verbs.last() == Some(&PathVerb::Close);

        self.verbs.extend_from_slice(&other.verbs);
        self.points.extend_from_slice(&other.points);
        self.conic_weights.extend_from_slice(&other.conic_weights);
    }

    pub(crate) fn push_builder(&mut self, other: &PathBuilder) {
        if other.is_empty() {
            return;
        }

        self.last_move_to_index = self.points.len() + other.last_move_to_index;
        self.move_to_required = other.move_to_required;

        self.verbs.extend_from_slice(&other.verbs);
        self.points.extend_from_slice(&other.points);
        self.conic_weights.extend_from_slice(&other.conic_weights);
    }

    /// Appends a transformed path, extending the current contour.
    ///
    /// The first MoveTo of `other` becomes a line from the last point,
    /// unless it lands on the last point already.
    pub fn push_path_with_transform(&mut self, other: &Path, ts: Transform) {
        let mut first_verb = true;
        for segment in other.raw_segments() {
            match segment {
                PathSegment::MoveTo(mut p) => {
                    ts.map_point(&mut p);
                    if first_verb && !self.is_empty() {
                        self.inject_move_to_if_needed();
                        if self.last_point() != Some(p) {
                            self.line_to(p.x, p.y);
                        }
                    } else {
                        self.move_to(p.x, p.y);
                    }
                }
                PathSegment::LineTo(mut p) => {
                    ts.map_point(&mut p);
                    self.line_to(p.x, p.y);
                }
                PathSegment::QuadTo(mut p1, mut p2) => {
                    ts.map_point(&mut p1);
                    ts.map_point(&mut p2);
                    self.quad_to_pt(p1, p2);
                }
                PathSegment::ConicTo(mut p1, mut p2, weight) => {
                    ts.map_point(&mut p1);
                    ts.map_point(&mut p2);
                    self.conic_points_to(p1, p2, weight);
                }
                PathSegment::CubicTo(mut p1, mut p2, mut p3) => {
                    ts.map_point(&mut p1);
                    ts.map_point(&mut p2);
                    ts.map_point(&mut p3);
                    self.cubic_to_pt(p1, p2, p3);
                }
                PathSegment::Close => self.close(),
            }

            first_verb = false;
        }
    }

    /// Appends all contours of a path in a reverse order.
    ///
    /// Closed contours stay closed.
    pub fn reverse_push_path(&mut self, other: &Path) {
        let points = &other.points;
        let weights = &other.conic_weights;
        let mut points_offset = points.len();
        let mut weights_offset = weights.len();

        let mut need_move = true;
        let mut need_close = false;
        for verb in other.verbs.iter().rev() {
            if need_move {
                points_offset -= 1;
                let p = points[points_offset];
                self.move_to(p.x, p.y);
                need_move = false;
            }

            match verb {
                PathVerb::Move => {
                    if need_close {
                        self.close();
                        need_close = false;
                    }

                    need_move = true;
                }
                PathVerb::Line => {
                    points_offset -= 1;
                    let p = points[points_offset];
                    self.line_to(p.x, p.y);
                }
                PathVerb::Quad => {
                    points_offset -= 2;
                    let p = &points[points_offset..];
                    self.quad_to_pt(p[1], p[0]);
                }
                PathVerb::Conic => {
                    points_offset -= 2;
                    weights_offset -= 1;
                    let p = &points[points_offset..];
                    self.conic_points_to(p[1], p[0], weights[weights_offset]);
                }
                PathVerb::Cubic => {
                    points_offset -= 3;
                    let p = &points[points_offset..];
                    self.cubic_to_pt(p[2], p[1], p[0]);
                }
                PathVerb::Close => {
                    need_close = true;
                }
            }
        }
    }

    /// Appends, in a reverse order, the first contour of path ignoring path's last point.
    pub(crate) fn reverse_path_to(&mut self, other: &PathBuilder) {
        if other.is_empty() {
            return;
        }

        debug_assert_eq!(other.verbs[0], PathVerb::Move);

        let mut points_offset = other.points.len() - 1;
        let mut weights_offset = other.conic_weights.len();
        for verb in other.verbs.iter().rev() {
            match verb {
                PathVerb::Move => {
                    // if the path has multiple contours, stop after reversing the last
                    break;
                }
                PathVerb::Line => {
                    // We're moving one point back manually, to prevent points_offset overflow.
                    let pt = other.points[points_offset - 1];
                    points_offset -= 1;
                    self.line_to(pt.x, pt.y);
                }
                PathVerb::Quad => {
                    let pt1 = other.points[points_offset - 1];
                    let pt2 = other.points[points_offset - 2];
                    points_offset -= 2;
                    self.quad_to(pt1.x, pt1.y, pt2.x, pt2.y);
                }
                PathVerb::Conic => {
                    let pt1 = other.points[points_offset - 1];
                    let pt2 = other.points[points_offset - 2];
                    points_offset -= 2;
                    weights_offset -= 1;
                    self.conic_points_to(pt1, pt2, other.conic_weights[weights_offset]);
                }
                PathVerb::Cubic => {
                    let pt1 = other.points[points_offset - 1];
                    let pt2 = other.points[points_offset - 2];
                    let pt3 = other.points[points_offset - 3];
                    points_offset -= 3;
                    self.cubic_to(pt1.x, pt1.y, pt2.x, pt2.y, pt3.x, pt3.y);
                }
                PathVerb::Close => {}
            }
        }
    }

    /// Reset the builder.
    ///
    /// Memory is not deallocated.
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
        self.conic_weights.clear();
        self.last_move_to_index = 0;
        self.move_to_required = true;
    }

    /// Finishes the builder and returns a `Path`.
    ///
    /// Returns `None` when `Path` is empty or has invalid bounds.
    pub fn finish(self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }

        // Just a move to? Bail.
        if self.verbs.len() == 1 {
            return None;
        }

        let bounds = Rect::from_points(&self.points)?;

        Some(Path {
            bounds,
            verbs: self.verbs,
            points: self.points,
            conic_weights: self.conic_weights,
        })
    }
}

fn rect_corners(rect: &Rect) -> [Point; 4] {
    [
        Point::from_xy(rect.left(), rect.top()),
        Point::from_xy(rect.right(), rect.top()),
        Point::from_xy(rect.right(), rect.bottom()),
        Point::from_xy(rect.left(), rect.bottom()),
    ]
}

fn normalize_f64(x: f64, y: f64) -> Option<(f64, f64)> {
    let len = (x * x + y * y).sqrt();
    if !(len > 0.0) || !len.is_finite() {
        return None;
    }

    Some((x / len, y / len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::from_xy(x, y)
    }

    #[test]
    fn conic_degradation() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.conic_to(10.0, 0.0, 10.0, 10.0, 0.0);
        pb.conic_to(20.0, 10.0, 20.0, 20.0, f32::NAN);
        pb.conic_to(30.0, 20.0, 30.0, 30.0, f32::INFINITY);
        pb.conic_to(40.0, 30.0, 40.0, 40.0, 1.0);
        pb.conic_to(50.0, 40.0, 50.0, 50.0, 0.5);
        let path = pb.finish().unwrap();

        assert_eq!(
            path.verbs(),
            &[
                PathVerb::Move,
                PathVerb::Line,
                PathVerb::Line,
                PathVerb::Line,
                PathVerb::Line,
                PathVerb::Quad,
                PathVerb::Conic,
            ]
        );
        assert_eq!(path.conic_weights(), &[0.5]);
        assert_eq!(path.points()[3], pt(30.0, 20.0));
    }

    #[test]
    fn implicit_move() {
        let mut pb = PathBuilder::new();
        pb.line_to(10.0, 0.0);
        pb.close();
        pb.line_to(20.0, 0.0);
        let path = pb.finish().unwrap();

        assert_eq!(
            path.verbs(),
            &[PathVerb::Move, PathVerb::Line, PathVerb::Close, PathVerb::Move, PathVerb::Line]
        );
        assert_eq!(path.points()[0], pt(0.0, 0.0));
        assert_eq!(path.points()[2], pt(0.0, 0.0));
    }

    #[test]
    fn finish_rejects() {
        assert!(PathBuilder::new().finish().is_none());

        let mut pb = PathBuilder::new();
        pb.move_to(1.0, 1.0);
        assert!(pb.finish().is_none());

        let mut pb = PathBuilder::new();
        pb.move_to(1.0, 1.0);
        pb.line_to(f32::INFINITY, 1.0);
        assert!(pb.finish().is_none());
    }

    #[test]
    fn rect_directions() {
        let rect = Rect::from_ltrb(0.0, 0.0, 10.0, 20.0).unwrap();

        let mut pb = PathBuilder::new();
        pb.push_rect(rect, PathDirection::CW, 0);
        let path = pb.finish().unwrap();
        assert_eq!(path.points(), &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 20.0), pt(0.0, 20.0)]);

        let mut pb = PathBuilder::new();
        pb.push_rect(rect, PathDirection::CCW, 1);
        let path = pb.finish().unwrap();
        assert_eq!(path.points(), &[pt(10.0, 0.0), pt(0.0, 0.0), pt(0.0, 20.0), pt(10.0, 20.0)]);
    }

    #[test]
    fn oval() {
        let rect = Rect::from_ltrb(0.0, 0.0, 20.0, 10.0).unwrap();
        let path = PathBuilder::from_oval(rect).unwrap();
        assert_eq!(path.verbs().len(), 6);
        assert_eq!(path.conic_weights(), &[SCALAR_ROOT_2_OVER_2; 4]);
        assert_eq!(path.points()[0], pt(20.0, 5.0));
        assert_eq!(path.points()[1], pt(20.0, 10.0));
        assert_eq!(path.points()[2], pt(10.0, 10.0));
        assert_eq!(path.bounds(), rect);

        let mut pb = PathBuilder::new();
        pb.push_oval(rect, PathDirection::CCW);
        let path = pb.finish().unwrap();
        assert_eq!(path.points()[0], pt(20.0, 5.0));
        assert_eq!(path.points()[1], pt(20.0, 0.0));
        assert_eq!(path.points()[2], pt(10.0, 0.0));
    }

    #[test]
    fn circle() {
        assert!(PathBuilder::from_circle(0.0, 0.0, 0.0).is_none());
        assert!(PathBuilder::from_circle(0.0, 0.0, -1.0).is_none());
        let path = PathBuilder::from_circle(5.0, 5.0, 5.0).unwrap();
        assert_eq!(path.bounds(), Rect::from_ltrb(0.0, 0.0, 10.0, 10.0).unwrap());
    }

    #[test]
    fn rrect() {
        let rect = Rect::from_ltrb(0.0, 0.0, 100.0, 50.0).unwrap();
        let rr = RRect::from_rect_xy(rect, 10.0, 10.0).unwrap();
        let path = PathBuilder::from_rrect(rr).unwrap();

        // move + 4 * (line + conic) + close
        assert_eq!(path.verbs().len(), 10);
        assert_eq!(path.conic_weights().len(), 4);
        // CW default start is the top of the lower-left corner.
        assert_eq!(path.points()[0], pt(0.0, 40.0));
        assert_eq!(path.points()[1], pt(0.0, 10.0));
        assert_eq!(path.points()[2], pt(0.0, 0.0));
        assert_eq!(path.points()[3], pt(10.0, 0.0));
        assert_eq!(path.bounds(), rect);

        let mut pb = PathBuilder::new();
        pb.push_rrect(rr, PathDirection::CCW);
        let path = pb.finish().unwrap();
        // CCW default start is the left of the upper-left corner.
        assert_eq!(path.points()[0], pt(0.0, 10.0));
        assert_eq!(path.points()[1], pt(0.0, 40.0));
        assert_eq!(path.points()[3], pt(10.0, 50.0));

        let path = PathBuilder::from_rrect(RRect::from_rect(rect)).unwrap();
        assert_eq!(path.verbs().len(), 5);
        assert_eq!(path.points()[0], pt(0.0, 50.0));
    }

    #[test]
    fn tangent_arc() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.arc_to(10.0, 0.0, 10.0, 10.0, 5.0);
        let path = pb.finish().unwrap();

        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Conic]);
        assert!(path.points()[1].equals_within_tolerance(pt(5.0, 0.0), 1e-5));
        assert!(path.points()[2].equals_within_tolerance(pt(10.0, 0.0), 1e-5));
        assert!(path.points()[3].equals_within_tolerance(pt(10.0, 5.0), 1e-5));
        assert!((path.conic_weights()[0] - SCALAR_ROOT_2_OVER_2).abs() < 1e-6);

        // Parallel lines and a zero radius degrade to a line.
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.arc_to(10.0, 0.0, 20.0, 0.0, 5.0);
        pb.arc_to(30.0, 0.0, 30.0, 10.0, 0.0);
        let path = pb.finish().unwrap();
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line]);
    }

    #[test]
    fn svg_arc() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.svg_arc_to(10.0, 10.0, 0.0, ArcSize::Small, PathDirection::CW, 10.0, 10.0);
        let path = pb.finish().unwrap();

        // A quarter of a circle with integer inputs.
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Conic]);
        assert_eq!(path.points()[1], pt(10.0, 0.0));
        assert_eq!(path.points()[2], pt(10.0, 10.0));

        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.svg_arc_to(0.0, 10.0, 0.0, ArcSize::Small, PathDirection::CW, 10.0, 10.0);
        pb.svg_arc_to(5.0, 5.0, 0.0, ArcSize::Large, PathDirection::CW, 10.0, 10.0);
        let path = pb.finish().unwrap();
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line]);
    }

    #[test]
    fn svg_arc_scales_radii() {
        // Radius 1 is too small to reach (20, 0), so it becomes 10.
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.svg_arc_to(1.0, 1.0, 0.0, ArcSize::Large, PathDirection::CW, 20.0, 0.0);
        let path = pb.finish().unwrap();

        assert_eq!(path.last_point(), Some(pt(20.0, 0.0)));
        assert!(path.verbs()[1..].iter().all(|v| *v == PathVerb::Conic));
        let bounds = path.bounds();
        assert!((bounds.height() - 10.0).abs() < 0.01);
    }

    #[test]
    fn push_path_modes() {
        let mut other = PathBuilder::new();
        other.move_to(10.0, 0.0);
        other.line_to(20.0, 0.0);
        let other = other.finish().unwrap();

        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(5.0, 0.0);
        pb.push_path(&other);
        assert_eq!(pb.verbs.len(), 4);
        assert_eq!(pb.verbs[2], PathVerb::Move);

        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(5.0, 0.0);
        pb.push_path_with_transform(&other, Transform::from_translate(0.0, 1.0));
        let path = pb.finish().unwrap();
        assert_eq!(path.verbs(), &[PathVerb::Move, PathVerb::Line, PathVerb::Line, PathVerb::Line]);
        assert_eq!(path.points()[2], pt(10.0, 1.0));
        assert_eq!(path.points()[3], pt(20.0, 1.0));
    }

    #[test]
    fn reverse_push() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.conic_to(10.0, 10.0, 0.0, 10.0, 0.5);
        pb.close();
        pb.move_to(20.0, 20.0);
        pb.quad_to(30.0, 20.0, 30.0, 30.0);
        let path = pb.finish().unwrap();

        let mut pb = PathBuilder::new();
        pb.reverse_push_path(&path);
        let reversed = pb.finish().unwrap();

        assert_eq!(
            reversed.verbs(),
            &[
                PathVerb::Move,
                PathVerb::Quad,
                PathVerb::Move,
                PathVerb::Conic,
                PathVerb::Line,
                PathVerb::Close,
            ]
        );
        assert_eq!(
            reversed.points(),
            &[
                pt(30.0, 30.0),
                pt(30.0, 20.0),
                pt(20.0, 20.0),
                pt(0.0, 10.0),
                pt(10.0, 10.0),
                pt(10.0, 0.0),
                pt(0.0, 0.0),
            ]
        );
        assert_eq!(reversed.conic_weights(), &[0.5]);
    }

    #[test]
    fn set_last_point() {
        let mut pb = PathBuilder::new();
        pb.set_last_point(pt(1.0, 2.0));
        pb.line_to(3.0, 4.0);
        pb.set_last_point(pt(5.0, 6.0));
        let path = pb.finish().unwrap();
        assert_eq!(path.points(), &[pt(1.0, 2.0), pt(5.0, 6.0)]);
    }
}

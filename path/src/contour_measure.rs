// Copyright 2018 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// This module is a mix of SkContourMeasure and SkPathMeasure.

use alloc::vec::Vec;

use arrayref::array_ref;

use crate::{Path, Point};

use crate::floating_point::{NormalizedF32, NormalizedF32Exclusive};
use crate::path::{PathSegment, PathVerb, RawSegmentsIter};
use crate::path_builder::PathBuilder;
use crate::path_geometry::{self, Conic};
use crate::scalar::Scalar;

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// The largest segment-local t value. Represents 1.0.
pub const MAX_T_VALUE: u32 = 0x3FFFFFFF;

/// The default flattening tolerance at a resolution scale of 1.
///
/// Can't use tangents, since we need [0..1..................2] to be seen
/// as definitely not a line (it is when drawn, but not parametrically),
/// so we compare midpoints.
pub const CHEAP_DIST_LIMIT: f32 = 0.5;

#[derive(Copy, Clone, PartialEq, Debug)]
enum SegmentType {
    Line,
    Quad,
    Conic,
    Cubic,
}

#[derive(Copy, Clone, Debug)]
struct Segment {
    distance: f32,      // total distance up to this point
    point_index: usize, // index into the ContourMeasure::points array
    t_value: u32,
    kind: SegmentType,
}

impl Segment {
    fn scalar_t(&self) -> f32 {
        debug_assert!(self.t_value <= MAX_T_VALUE);
        // 1/kMaxTValue can't be represented as a float, but it's close and the limits work fine.
        const MAX_T_RECIPROCAL: f32 = 1.0 / MAX_T_VALUE as f32;
        self.t_value as f32 * MAX_T_RECIPROCAL
    }
}

/// An iterator over path's contours measurements.
///
/// Contours that have no length are skipped.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct ContourMeasureIter<'a> {
    iter: RawSegmentsIter<'a>,
    tolerance: f32,
    force_closed: bool,
}

impl<'a> ContourMeasureIter<'a> {
    /// Creates a new iterator.
    ///
    /// When `force_closed` is set, each contour is measured as if it was closed.
    ///
    /// `res_scale` controls the flattening precision. Larger values produce
    /// more segments. Can be obtained via
    /// [`compute_resolution_scale`](crate::PathStroker::compute_resolution_scale).
    pub fn new(path: &'a Path, force_closed: bool, res_scale: f32) -> Self {
        ContourMeasureIter {
            iter: path.raw_segments(),
            tolerance: CHEAP_DIST_LIMIT * res_scale.invert(),
            force_closed,
        }
    }

    fn build_contour(&mut self) -> Option<ContourMeasure> {
        // Note:
        // as we accumulate distance, we have to check that the result of +=
        // actually made it larger, since a very small delta might be > 0, but
        // still have no effect on distance (if distance >>> delta).
        //
        // We do this check below, and in compute_*_segs.

        let mut points: Vec<Point> = Vec::new();
        let mut builder = SegmentsBuilder {
            segments: Vec::new(),
            tolerance: self.tolerance,
        };

        let mut point_index = 0;
        let mut distance = 0.0;
        let mut have_seen_close = self.force_closed;
        let mut have_seen_move_to = false;
        loop {
            if have_seen_move_to && self.iter.peek() == Some(PathVerb::Move) {
                break;
            }

            let seg = match self.iter.next() {
                Some(v) => v,
                None => break,
            };
            let p0 = self.iter.last_point();

            match seg {
                PathSegment::MoveTo(p) => {
                    points.push(p);
                    have_seen_move_to = true;
                }
                PathSegment::LineTo(p1) => {
                    let prev_d = distance;
                    distance = builder.compute_line_seg(p0, p1, distance, point_index);

                    if distance > prev_d {
                        points.push(p1);
                        point_index += 1;
                    }
                }
                PathSegment::QuadTo(p1, p2) => {
                    let prev_d = distance;
                    distance = builder.compute_quad_segs(
                        p0,
                        p1,
                        p2,
                        distance,
                        0,
                        MAX_T_VALUE,
                        point_index,
                    );

                    if distance > prev_d {
                        points.push(p1);
                        points.push(p2);
                        point_index += 2;
                    }
                }
                PathSegment::ConicTo(p1, p2, weight) => {
                    let prev_d = distance;
                    let conic = Conic::new(p0, p1, p2, weight);
                    distance = builder.compute_conic_segs(
                        &conic,
                        distance,
                        0,
                        p0,
                        MAX_T_VALUE,
                        p2,
                        point_index,
                    );

                    if distance > prev_d {
                        // The weight is stored in the next point, followed by the last 2 points.
                        // So a conic is `p[0], p[2], p[3]` with a weight of `p[1].x`.
                        points.push(Point::from_xy(weight, 0.0));
                        points.push(p1);
                        points.push(p2);
                        point_index += 3;
                    }
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    let prev_d = distance;
                    distance = builder.compute_cubic_segs(
                        p0,
                        p1,
                        p2,
                        p3,
                        distance,
                        0,
                        MAX_T_VALUE,
                        point_index,
                    );

                    if distance > prev_d {
                        points.push(p1);
                        points.push(p2);
                        points.push(p3);
                        point_index += 3;
                    }
                }
                PathSegment::Close => {
                    have_seen_close = true;
                }
            }
        }

        if !distance.is_finite() {
            log::debug!("contour has a non-finite length, skipping");
            return None;
        }

        if builder.segments.is_empty() {
            return None;
        }

        if have_seen_close {
            let prev_d = distance;
            let first_pt = points[0];
            distance =
                builder.compute_line_seg(points[point_index], first_pt, distance, point_index);

            if distance > prev_d {
                points.push(first_pt);
            }
        }

        Some(ContourMeasure {
            segments: builder.segments,
            points,
            length: distance,
            is_closed: have_seen_close,
        })
    }
}

impl Iterator for ContourMeasureIter<'_> {
    type Item = ContourMeasure;

    fn next(&mut self) -> Option<Self::Item> {
        while self.iter.peek().is_some() {
            if let Some(contour) = self.build_contour() {
                return Some(contour);
            }
        }

        None
    }
}

// Accumulates segments of a single contour.
//
// Each `compute_*` call takes the running distance and returns a new one.
struct SegmentsBuilder {
    segments: Vec<Segment>,
    tolerance: f32,
}

impl SegmentsBuilder {
    fn push(
        &mut self,
        prev_distance: f32,
        d: f32,
        point_index: usize,
        t_value: u32,
        kind: SegmentType,
    ) -> f32 {
        let distance = prev_distance + d;
        if distance > prev_distance {
            self.segments.push(Segment {
                distance,
                point_index,
                t_value,
                kind,
            });
        }

        distance
    }

    fn compute_line_seg(&mut self, p0: Point, p1: Point, distance: f32, point_index: usize) -> f32 {
        let d = p0.distance(p1);
        debug_assert!(d >= 0.0);
        self.push(distance, d, point_index, MAX_T_VALUE, SegmentType::Line)
    }

    fn compute_quad_segs(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        mut distance: f32,
        min_t: u32,
        max_t: u32,
        point_index: usize,
    ) -> f32 {
        if t_span_big_enough(max_t - min_t) && quad_too_curvy(p0, p1, p2, self.tolerance) {
            let mut tmp = [Point::zero(); 5];
            let half_t = (min_t + max_t) >> 1;

            path_geometry::chop_quad_at(&[p0, p1, p2], NormalizedF32Exclusive::HALF, &mut tmp);
            distance =
                self.compute_quad_segs(tmp[0], tmp[1], tmp[2], distance, min_t, half_t, point_index);
            distance =
                self.compute_quad_segs(tmp[2], tmp[3], tmp[4], distance, half_t, max_t, point_index);
            distance
        } else {
            self.push(distance, p0.distance(p2), point_index, max_t, SegmentType::Quad)
        }
    }

    fn compute_conic_segs(
        &mut self,
        conic: &Conic,
        mut distance: f32,
        min_t: u32,
        min_pt: Point,
        max_t: u32,
        max_pt: Point,
        point_index: usize,
    ) -> f32 {
        let half_t = (min_t + max_t) >> 1;
        let half_pt = conic.eval(t_value_to_scalar(half_t));
        if !half_pt.is_finite() {
            return distance;
        }

        if t_span_big_enough(max_t - min_t) && conic_too_curvy(min_pt, half_pt, max_pt, self.tolerance)
        {
            distance =
                self.compute_conic_segs(conic, distance, min_t, min_pt, half_t, half_pt, point_index);
            distance =
                self.compute_conic_segs(conic, distance, half_t, half_pt, max_t, max_pt, point_index);
            distance
        } else {
            self.push(distance, min_pt.distance(max_pt), point_index, max_t, SegmentType::Conic)
        }
    }

    fn compute_cubic_segs(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
        mut distance: f32,
        min_t: u32,
        max_t: u32,
        point_index: usize,
    ) -> f32 {
        if t_span_big_enough(max_t - min_t) && cubic_too_curvy(p0, p1, p2, p3, self.tolerance) {
            let mut tmp = [Point::zero(); 7];
            let half_t = (min_t + max_t) >> 1;

            path_geometry::chop_cubic_at2(
                &[p0, p1, p2, p3],
                NormalizedF32Exclusive::HALF,
                &mut tmp,
            );
            distance = self.compute_cubic_segs(
                tmp[0],
                tmp[1],
                tmp[2],
                tmp[3],
                distance,
                min_t,
                half_t,
                point_index,
            );
            distance = self.compute_cubic_segs(
                tmp[3],
                tmp[4],
                tmp[5],
                tmp[6],
                distance,
                half_t,
                max_t,
                point_index,
            );
            distance
        } else {
            self.push(distance, p0.distance(p3), point_index, max_t, SegmentType::Cubic)
        }
    }
}

/// A single contour arc-length measurement.
///
/// Maps distances along the contour to points and tangents
/// and extracts sub-ranges of it.
#[derive(Clone, Default, Debug)]
pub struct ContourMeasure {
    segments: Vec<Segment>,
    points: Vec<Point>,
    length: f32,
    is_closed: bool,
}

impl ContourMeasure {
    /// Returns the length of the contour.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Checks that the contour is closed.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Returns the points referenced by segments.
    ///
    /// A conic occupies 4 entries: start, `(weight, 0)`, control and end.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of flattened segments.
    pub fn segments_len(&self) -> usize {
        self.segments.len()
    }

    /// Returns a position and a unit tangent at the specified distance.
    ///
    /// The distance is clamped to `0..=length`.
    ///
    /// Returns `None` when the distance is NaN or the contour has no length.
    pub fn pos_tan(&self, distance: f32) -> Option<(Point, Point)> {
        if distance.is_nan() {
            return None;
        }

        if self.segments.is_empty() || self.length == 0.0 {
            return None;
        }

        let distance = distance.bound(0.0, self.length);
        let (seg_index, t) = self.distance_to_segment(distance)?;
        let seg = self.segments[seg_index];

        let mut pos = Point::zero();
        let mut tangent = Point::zero();
        compute_pos_tan(
            &self.points[seg.point_index..],
            seg.kind,
            t,
            Some(&mut pos),
            Some(&mut tangent),
        );

        Some((pos, tangent))
    }

    /// Appends a part of the contour between two distances to `pb`.
    ///
    /// Distances are clamped to `0..=length`. A zero-length range
    /// still produces a zero-length line, so end caps can be stroked.
    ///
    /// Returns `false` when `start_d > stop_d` or the contour is empty.
    pub fn segment(
        &self,
        start_d: f32,
        stop_d: f32,
        start_with_move_to: bool,
        pb: &mut PathBuilder,
    ) -> bool {
        self.push_segment(start_d, stop_d, start_with_move_to, pb)
            .is_some()
    }

    fn push_segment(
        &self,
        mut start_d: f32,
        mut stop_d: f32,
        start_with_move_to: bool,
        pb: &mut PathBuilder,
    ) -> Option<()> {
        if start_d < 0.0 {
            start_d = 0.0;
        }

        if stop_d > self.length {
            stop_d = self.length;
        }

        if !(start_d <= stop_d) {
            // catch NaN values as well
            return None;
        }

        if self.segments.is_empty() {
            return None;
        }

        let (seg_index, mut start_t) = self.distance_to_segment(start_d)?;
        let mut seg = self.segments[seg_index];

        let (stop_seg_index, stop_t) = self.distance_to_segment(stop_d)?;
        let stop_seg = self.segments[stop_seg_index];

        debug_assert!(seg_index <= stop_seg_index);
        let mut p = Point::zero();
        if start_with_move_to {
            compute_pos_tan(
                &self.points[seg.point_index..],
                seg.kind,
                start_t,
                Some(&mut p),
                None,
            );
            pb.move_to(p.x, p.y);
        }

        if seg.point_index == stop_seg.point_index {
            segment_to(
                &self.points[seg.point_index..],
                seg.kind,
                start_t,
                stop_t,
                pb,
            );
        } else {
            let mut new_seg_index = seg_index;
            loop {
                segment_to(
                    &self.points[seg.point_index..],
                    seg.kind,
                    start_t,
                    NormalizedF32::ONE,
                    pb,
                );

                let old_point_index = seg.point_index;
                loop {
                    new_seg_index += 1;
                    if self.segments[new_seg_index].point_index != old_point_index {
                        break;
                    }
                }
                seg = self.segments[new_seg_index];

                start_t = NormalizedF32::ZERO;

                if seg.point_index >= stop_seg.point_index {
                    break;
                }
            }

            segment_to(
                &self.points[seg.point_index..],
                seg.kind,
                NormalizedF32::ZERO,
                stop_t,
                pb,
            );
        }

        Some(())
    }

    fn distance_to_segment(&self, distance: f32) -> Option<(usize, NormalizedF32)> {
        debug_assert!(distance >= 0.0 && distance <= self.length);

        let mut index = find_segment(&self.segments, distance);
        // don't care if we hit an exact match or not, so we xor index if it is negative
        index ^= index >> 31;
        let index = index as usize;
        let seg = self.segments[index];

        // now interpolate t-values with the prev segment (if possible)
        let mut start_t = 0.0;
        let mut start_d = 0.0;
        // check if the prev segment is legal, and references the same set of points
        if index > 0 {
            start_d = self.segments[index - 1].distance;
            if self.segments[index - 1].point_index == seg.point_index {
                debug_assert!(self.segments[index - 1].kind == seg.kind);
                start_t = self.segments[index - 1].scalar_t();
            }
        }

        debug_assert!(seg.scalar_t() > start_t);
        debug_assert!(distance >= start_d);
        debug_assert!(seg.distance > start_d);

        let t =
            start_t + (seg.scalar_t() - start_t) * (distance - start_d) / (seg.distance - start_d);
        let t = NormalizedF32::new(t)?;
        Some((index, t))
    }
}

/// A path measurement.
///
/// Walks path's contours one by one, starting from the first one.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathMeasure<'a> {
    iter: ContourMeasureIter<'a>,
    contour: Option<ContourMeasure>,
    force_closed: bool,
    res_scale: f32,
}

impl<'a> PathMeasure<'a> {
    /// Creates a new path measurement, positioned on the first contour.
    pub fn new(path: &'a Path, force_closed: bool, res_scale: f32) -> Self {
        let mut iter = ContourMeasureIter::new(path, force_closed, res_scale);
        let contour = iter.next();
        PathMeasure {
            iter,
            contour,
            force_closed,
            res_scale,
        }
    }

    /// Restarts the measurement on a new path.
    pub fn set_path(&mut self, path: &'a Path) {
        *self = PathMeasure::new(path, self.force_closed, self.res_scale);
    }

    /// Returns the current contour.
    pub fn contour(&self) -> Option<&ContourMeasure> {
        self.contour.as_ref()
    }

    /// Returns the length of the current contour, or 0 when there is none.
    pub fn length(&self) -> f32 {
        self.contour.as_ref().map(|c| c.length()).unwrap_or(0.0)
    }

    /// Checks that the current contour is closed.
    pub fn is_closed(&self) -> bool {
        self.contour
            .as_ref()
            .map(|c| c.is_closed())
            .unwrap_or(false)
    }

    /// Returns a position and a unit tangent on the current contour.
    ///
    /// See [`ContourMeasure::pos_tan`].
    pub fn pos_tan(&self, distance: f32) -> Option<(Point, Point)> {
        self.contour.as_ref()?.pos_tan(distance)
    }

    /// Appends a part of the current contour to `pb`.
    ///
    /// See [`ContourMeasure::segment`].
    pub fn segment(
        &self,
        start_d: f32,
        stop_d: f32,
        start_with_move_to: bool,
        pb: &mut PathBuilder,
    ) -> bool {
        match self.contour {
            Some(ref contour) => contour.segment(start_d, stop_d, start_with_move_to, pb),
            None => false,
        }
    }

    /// Moves to the next contour.
    ///
    /// Returns `false` when there are no more contours.
    pub fn next_contour(&mut self) -> bool {
        self.contour = self.iter.next();
        self.contour.is_some()
    }
}

fn find_segment(base: &[Segment], key: f32) -> i32 {
    let mut lo = 0u32;
    let mut hi = (base.len() - 1) as u32;

    while lo < hi {
        let mid = (hi + lo) >> 1;
        if base[mid as usize].distance < key {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    if base[hi as usize].distance < key {
        hi += 1;
        hi = !hi;
    } else if key < base[hi as usize].distance {
        hi = !hi;
    }

    hi as i32
}

fn conic_at(points: &[Point]) -> Conic {
    Conic::new(points[0], points[2], points[3], points[1].x)
}

fn compute_pos_tan(
    points: &[Point],
    seg_kind: SegmentType,
    t: NormalizedF32,
    pos: Option<&mut Point>,
    tangent: Option<&mut Point>,
) {
    match seg_kind {
        SegmentType::Line => {
            if let Some(pos) = pos {
                *pos = Point::from_xy(
                    interp(points[0].x, points[1].x, t),
                    interp(points[0].y, points[1].y, t),
                );
            }

            if let Some(tangent) = tangent {
                tangent.set_normalize(points[1].x - points[0].x, points[1].y - points[0].y);
            }
        }
        SegmentType::Quad => {
            let src = array_ref![points, 0, 3];
            if let Some(pos) = pos {
                *pos = path_geometry::eval_quad_at(src, t);
            }

            if let Some(tangent) = tangent {
                *tangent = path_geometry::eval_quad_tangent_at(src, t);
                tangent.normalize();
            }
        }
        SegmentType::Conic => {
            let conic = conic_at(points);
            if let Some(pos) = pos {
                *pos = conic.eval(t.get());
            }

            if let Some(tangent) = tangent {
                *tangent = conic.eval_tangent(t.get());
                tangent.normalize();
            }
        }
        SegmentType::Cubic => {
            let src = array_ref![points, 0, 4];
            if let Some(pos) = pos {
                *pos = path_geometry::eval_cubic_pos_at(src, t);
            }

            if let Some(tangent) = tangent {
                *tangent = path_geometry::eval_cubic_tangent_at(src, t);
                tangent.normalize();
            }
        }
    }
}

fn segment_to(
    points: &[Point],
    seg_kind: SegmentType,
    start_t: NormalizedF32,
    stop_t: NormalizedF32,
    pb: &mut PathBuilder,
) {
    debug_assert!(start_t <= stop_t);

    if start_t == stop_t {
        if let Some(pt) = pb.last_point() {
            // If the dash as a zero-length on segment, add a corresponding zero-length line.
            // The stroke code will add end caps to zero length lines as appropriate.
            pb.line_to(pt.x, pt.y);
        }

        return;
    }

    match seg_kind {
        SegmentType::Line => {
            if stop_t == NormalizedF32::ONE {
                pb.line_to(points[1].x, points[1].y);
            } else {
                pb.line_to(
                    interp(points[0].x, points[1].x, stop_t),
                    interp(points[0].y, points[1].y, stop_t),
                );
            }
        }
        SegmentType::Quad => {
            let mut tmp0 = [Point::zero(); 5];
            let mut tmp1 = [Point::zero(); 5];
            if start_t == NormalizedF32::ZERO {
                if stop_t == NormalizedF32::ONE {
                    pb.quad_to_pt(points[1], points[2]);
                } else {
                    let stop_t = NormalizedF32Exclusive::new_bounded(stop_t.get());
                    path_geometry::chop_quad_at(points, stop_t, &mut tmp0);
                    pb.quad_to_pt(tmp0[1], tmp0[2]);
                }
            } else {
                let start_tt = NormalizedF32Exclusive::new_bounded(start_t.get());
                path_geometry::chop_quad_at(points, start_tt, &mut tmp0);
                if stop_t == NormalizedF32::ONE {
                    pb.quad_to_pt(tmp0[3], tmp0[4]);
                } else {
                    let new_t = (stop_t.get() - start_t.get()) / (1.0 - start_t.get());
                    let new_t = NormalizedF32Exclusive::new_bounded(new_t);
                    path_geometry::chop_quad_at(&tmp0[2..], new_t, &mut tmp1);
                    pb.quad_to_pt(tmp1[1], tmp1[2]);
                }
            }
        }
        SegmentType::Conic => {
            let conic = conic_at(points);
            if start_t == NormalizedF32::ZERO {
                if stop_t == NormalizedF32::ONE {
                    pb.conic_points_to(conic.points[1], conic.points[2], conic.weight);
                } else if let Some(tmp) = conic.chop_at(stop_t.get()) {
                    pb.conic_points_to(tmp[0].points[1], tmp[0].points[2], tmp[0].weight);
                }
            } else if stop_t == NormalizedF32::ONE {
                if let Some(tmp) = conic.chop_at(start_t.get()) {
                    pb.conic_points_to(tmp[1].points[1], tmp[1].points[2], tmp[1].weight);
                }
            } else {
                let tmp = conic.chop_at_range(start_t.get(), stop_t.get());
                pb.conic_points_to(tmp.points[1], tmp.points[2], tmp.weight);
            }
        }
        SegmentType::Cubic => {
            let mut tmp0 = [Point::zero(); 7];
            let mut tmp1 = [Point::zero(); 7];
            if start_t == NormalizedF32::ZERO {
                if stop_t == NormalizedF32::ONE {
                    pb.cubic_to_pt(points[1], points[2], points[3]);
                } else {
                    let stop_t = NormalizedF32Exclusive::new_bounded(stop_t.get());
                    path_geometry::chop_cubic_at2(array_ref![points, 0, 4], stop_t, &mut tmp0);
                    pb.cubic_to_pt(tmp0[1], tmp0[2], tmp0[3]);
                }
            } else {
                let start_tt = NormalizedF32Exclusive::new_bounded(start_t.get());
                path_geometry::chop_cubic_at2(array_ref![points, 0, 4], start_tt, &mut tmp0);
                if stop_t == NormalizedF32::ONE {
                    pb.cubic_to_pt(tmp0[4], tmp0[5], tmp0[6]);
                } else {
                    let new_t = (stop_t.get() - start_t.get()) / (1.0 - start_t.get());
                    let new_t = NormalizedF32Exclusive::new_bounded(new_t);
                    path_geometry::chop_cubic_at2(array_ref![tmp0, 3, 4], new_t, &mut tmp1);
                    pb.cubic_to_pt(tmp1[1], tmp1[2], tmp1[3]);
                }
            }
        }
    }
}

fn t_value_to_scalar(t: u32) -> f32 {
    const MAX_T_RECIPROCAL: f32 = 1.0 / MAX_T_VALUE as f32;
    t as f32 * MAX_T_RECIPROCAL
}

fn t_span_big_enough(t_span: u32) -> bool {
    debug_assert!(t_span <= MAX_T_VALUE);
    (t_span >> 10) != 0
}

fn quad_too_curvy(p0: Point, p1: Point, p2: Point, tolerance: f32) -> bool {
    // diff = (a/4 + b/2 + c/4) - (a/2 + c/2)
    // diff = -a/4 + b/2 - c/4
    let dx = (p1.x).half() - (p0.x + p2.x).half().half();
    let dy = (p1.y).half() - (p0.y + p2.y).half().half();

    let dist = dx.abs().max(dy.abs());
    dist > tolerance
}

fn conic_too_curvy(first_pt: Point, mid_t_pt: Point, last_pt: Point, tolerance: f32) -> bool {
    let mid_ends = (first_pt + last_pt).scaled(0.5);
    let dxy = mid_t_pt - mid_ends;
    let dist = dxy.x.abs().max(dxy.y.abs());
    dist > tolerance
}

fn cubic_too_curvy(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f32) -> bool {
    let n0 = cheap_dist_exceeds_limit(
        p1,
        interp_safe(p0.x, p3.x, 1.0 / 3.0),
        interp_safe(p0.y, p3.y, 1.0 / 3.0),
        tolerance,
    );

    let n1 = cheap_dist_exceeds_limit(
        p2,
        interp_safe(p0.x, p3.x, 2.0 / 3.0),
        interp_safe(p0.y, p3.y, 2.0 / 3.0),
        tolerance,
    );

    n0 || n1
}

fn cheap_dist_exceeds_limit(pt: Point, x: f32, y: f32, tolerance: f32) -> bool {
    let dist = (x - pt.x).abs().max((y - pt.y).abs());
    // just made up the 1/2
    dist > tolerance
}

/// Linearly interpolate between A and B, based on t.
///
/// If t is 0, return A. If t is 1, return B else interpolate.
fn interp(a: f32, b: f32, t: NormalizedF32) -> f32 {
    a + (b - a) * t.get()
}

fn interp_safe(a: f32, b: f32, t: f32) -> f32 {
    debug_assert!(t >= 0.0 && t <= 1.0);
    a + (b - a) * t
}

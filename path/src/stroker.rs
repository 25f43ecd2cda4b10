// Copyright 2008 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// Based on SkStroke.cpp

use arrayvec::ArrayVec;

use crate::{Path, Point, Rect, Transform};

use crate::floating_point::{NonZeroPositiveF32, NormalizedF32, NormalizedF32Exclusive};
use crate::path::{PathSegment, PathSegmentsIter};
use crate::path_builder::{PathBuilder, PathDirection};
use crate::path_geometry::{self, Conic};
use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO, SCALAR_ROOT_2_OVER_2};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

struct SwappableBuilders<'a> {
    inner: &'a mut PathBuilder,
    outer: &'a mut PathBuilder,
}

impl<'a> SwappableBuilders<'a> {
    // Only the references are swapped, the builders stay in place.
    fn swap(&mut self) {
        core::mem::swap(&mut self.inner, &mut self.outer);
    }
}

// A corner between the previous and the current segment.
#[derive(Copy, Clone, Debug)]
struct Joint {
    before: Point,
    pivot: Point,
    after: Point,
    radius: f32,
    prev_is_line: bool,
    curr_is_line: bool,
}

/// Stroke properties.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness.
    ///
    /// Must be > 0. Stroking with a zero width produces nothing.
    ///
    /// Default: 1.0
    pub width: f32,

    /// The limit at which a sharp corner is drawn beveled.
    ///
    /// Default: 4.0
    pub miter_limit: f32,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 4.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

/// Low-level stroker parameters.
///
/// Unlike [`Stroke`], uses a radius instead of a width
/// and carries the resolution scale.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StrokeOptions {
    /// Half of the stroke width. Must be > 0.
    pub radius: f32,
    /// The limit at which a sharp corner is drawn beveled.
    pub miter_limit: f32,
    /// A line cap.
    pub cap: LineCap,
    /// A line join.
    pub join: LineJoin,
    /// A resolution scale.
    ///
    /// See [`PathStroker::compute_resolution_scale`].
    pub res_scale: f32,
    /// Allows dropping the inner boundary of closed contours.
    ///
    /// Can be set when the stroke will be filled together with the source path,
    /// so the center is covered anyway.
    pub can_ignore_center: bool,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        StrokeOptions {
            radius: 0.5,
            miter_limit: 4.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            res_scale: 1.0,
            can_ignore_center: false,
        }
    }
}

impl From<&Stroke> for StrokeOptions {
    fn from(stroke: &Stroke) -> Self {
        StrokeOptions {
            radius: stroke.width.half(),
            miter_limit: stroke.miter_limit,
            cap: stroke.line_cap,
            join: stroke.line_join,
            res_scale: 1.0,
            can_ignore_center: false,
        }
    }
}

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds circle.
    Round,
    /// Adds square.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
///
/// Join affects the four corners of a stroked rectangle, and the connected segments in a
/// stroked path.
///
/// Choose miter join to draw sharp corners. Choose round join to draw a circle with a
/// radius equal to the stroke width on top of the corner. Choose bevel join to minimally
/// connect the thick strokes.
///
/// The fill path constructed to describe the stroked path respects the join setting but may
/// not contain the actual join. For instance, a fill path constructed with round joins does
/// not necessarily include circles at each connected segment.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to miter limit.
    Miter,
    /// Adds circle.
    Round,
    /// Connects outside edges.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

const CONIC_RECURSIVE_LIMIT: usize = 2;
const QUAD_RECURSIVE_LIMIT: usize = 3;

// quads with extreme widths (e.g. (0,1) (1,6) (0,3) width=5e7) recurse to point of failure
// largest seen for normal cubics: 5, 26
// largest seen for normal quads: 11
/// Recursion ceilings of the curve stroker.
///
/// Indexed by: cubic before tangents are found, cubic, conic and quad.
pub const RECURSIVE_LIMITS: [i32; 4] = [5 * 3, 26 * 3, 11 * 3, 11 * 3]; // 3x limits seen in practice

// How flat a curve is, as far as stroking goes.
#[derive(Clone, PartialEq, Debug)]
enum Reduction {
    // all curve points are practically identical
    Point,
    // the control points are on the line between the ends
    Line,
    // a real curve, holds the point its start tangent aims at
    Quad(Point),
    // the control points are on the line, but the curve overshoots the ends at these points
    Degenerate(ArrayVec<Point, 3>),
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum StrokeType {
    Outer = 1, // use sign-opposite values later to flip perpendicular axis
    Inner = -1,
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum ResultType {
    Split,      // the caller should split the quad stroke in two
    Degenerate, // the caller should add a line
    Quad,       // the caller should (continue to try to) add a quad stroke
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum IntersectRayType {
    CtrlPt,
    ResultType,
}

// Curves stroked by a single chain of quads.
trait QuadLike {
    const NAME: &'static str;
    const RECURSION_LIMIT: i32;

    fn points(&self) -> &[Point; 3];
    fn eval(&self, t: NormalizedF32) -> Point;
    fn eval_tangent(&self, t: NormalizedF32) -> Point;
}

impl QuadLike for [Point; 3] {
    const NAME: &'static str = "quad";
    const RECURSION_LIMIT: i32 = RECURSIVE_LIMITS[QUAD_RECURSIVE_LIMIT];

    fn points(&self) -> &[Point; 3] {
        self
    }

    fn eval(&self, t: NormalizedF32) -> Point {
        path_geometry::eval_quad_at(self, t)
    }

    fn eval_tangent(&self, t: NormalizedF32) -> Point {
        path_geometry::eval_quad_tangent_at(self, t)
    }
}

impl QuadLike for Conic {
    const NAME: &'static str = "conic";
    const RECURSION_LIMIT: i32 = RECURSIVE_LIMITS[CONIC_RECURSIVE_LIMIT];

    fn points(&self) -> &[Point; 3] {
        &self.points
    }

    fn eval(&self, t: NormalizedF32) -> Point {
        Conic::eval(self, t.get())
    }

    fn eval_tangent(&self, t: NormalizedF32) -> Point {
        Conic::eval_tangent(self, t.get())
    }
}

impl Path {
    /// Returns a stoked path.
    ///
    /// `resolution_scale` can be obtained via
    /// [`compute_resolution_scale`](PathStroker::compute_resolution_scale).
    ///
    /// If you plan stroking multiple paths, you can try using [`PathStroker`]
    /// which will preserve temporary allocations required during stroking.
    /// This might improve performance a bit.
    pub fn stroke(&self, stroke: &Stroke, resolution_scale: f32) -> Option<Path> {
        PathStroker::new().stroke(self, stroke, resolution_scale)
    }
}

/// A path stroker.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct PathStroker {
    radius: f32,
    inv_miter_limit: f32,
    res_scale: f32,
    inv_res_scale: f32,
    inv_res_scale_squared: f32,

    first_normal: Normal,
    prev_normal: Normal,

    // on original path
    first_pt: Point,
    prev_pt: Point,

    first_outer_pt: Point,
    first_outer_pt_index_in_contour: usize,
    first_outer_verb_index_in_contour: usize,
    segment_count: i32,
    prev_is_line: bool,
    can_ignore_center: bool,

    cap: LineCap,
    join: LineJoin,

    // outer is our working answer, inner is temp
    inner: PathBuilder,
    outer: PathBuilder,
    cusper: PathBuilder,

    stroke_type: StrokeType,

    recursion_depth: i32, // track stack depth to abort if numerics run amok
    found_tangents: bool, // do less work until tangents meet (cubic)
    join_completed: bool, // previous join was not degenerate
}

impl Default for PathStroker {
    fn default() -> Self {
        PathStroker::new()
    }
}

impl PathStroker {
    /// Creates a new PathStroker.
    pub fn new() -> Self {
        PathStroker {
            radius: 0.0,
            inv_miter_limit: 0.0,
            res_scale: 1.0,
            inv_res_scale: 1.0,
            inv_res_scale_squared: 1.0,

            first_normal: Normal::default(),
            prev_normal: Normal::default(),

            first_pt: Point::zero(),
            prev_pt: Point::zero(),

            first_outer_pt: Point::zero(),
            first_outer_pt_index_in_contour: 0,
            first_outer_verb_index_in_contour: 0,
            segment_count: -1,
            prev_is_line: false,
            can_ignore_center: false,

            cap: LineCap::Butt,
            join: LineJoin::Miter,

            inner: PathBuilder::new(),
            outer: PathBuilder::new(),
            cusper: PathBuilder::new(),

            stroke_type: StrokeType::Outer,

            recursion_depth: 0,
            found_tangents: false,
            join_completed: false,
        }
    }

    /// Computes a resolution scale.
    ///
    /// Resolution scale is the "intended" resolution for the output. Default is 1.0.
    ///
    /// Larger values (res > 1) indicate that the result should be more precise, since it will
    /// be zoomed up, and small errors will be magnified.
    ///
    /// Smaller values (0 < res < 1) indicate that the result can be less precise, since it will
    /// be zoomed down, and small errors may be invisible.
    pub fn compute_resolution_scale(ts: &Transform) -> f32 {
        let sx = Point::from_xy(ts.sx, ts.kx).length();
        let sy = Point::from_xy(ts.ky, ts.sy).length();
        if sx.is_finite() && sy.is_finite() {
            let scale = sx.max(sy);
            if scale > 0.0 {
                return scale;
            }
        }

        1.0
    }

    /// Strokes the path.
    ///
    /// Can be called multiple times to reuse allocated buffers.
    ///
    /// `resolution_scale` can be obtained via
    /// [`compute_resolution_scale`](Self::compute_resolution_scale).
    pub fn stroke(&mut self, path: &Path, stroke: &Stroke, resolution_scale: f32) -> Option<Path> {
        let mut options = StrokeOptions::from(stroke);
        options.res_scale = resolution_scale;
        self.stroke_with_options(path, &options)
    }

    /// Strokes the path using low-level options.
    ///
    /// Returns `None` when the radius is not positive or the result is empty.
    pub fn stroke_with_options(&mut self, path: &Path, options: &StrokeOptions) -> Option<Path> {
        let radius = NonZeroPositiveF32::new(options.radius)?;
        self.stroke_inner(path, radius, options)
    }

    fn stroke_inner(
        &mut self,
        path: &Path,
        radius: NonZeroPositiveF32,
        options: &StrokeOptions,
    ) -> Option<Path> {
        let miter_limit = options.miter_limit;
        let line_cap = options.cap;
        let mut line_join = options.join;
        let res_scale = options.res_scale;

        let mut inv_miter_limit = 0.0;

        if line_join == LineJoin::Miter {
            if miter_limit <= 1.0 {
                line_join = LineJoin::Bevel;
            } else {
                inv_miter_limit = miter_limit.invert();
            }
        }

        self.res_scale = res_scale;
        // The '4' below matches the fill scan converter's error term.
        self.inv_res_scale = (res_scale * 4.0).invert();
        self.inv_res_scale_squared = self.inv_res_scale.sqr();

        self.radius = radius.get();
        self.inv_miter_limit = inv_miter_limit;
        self.can_ignore_center = options.can_ignore_center;

        self.first_normal = Normal::default();
        self.prev_normal = Normal::default();

        self.first_pt = Point::zero();
        self.prev_pt = Point::zero();

        self.first_outer_pt = Point::zero();
        self.first_outer_pt_index_in_contour = 0;
        self.first_outer_verb_index_in_contour = 0;
        self.segment_count = -1;
        self.prev_is_line = false;

        self.cap = line_cap;
        self.join = line_join;

        // Need some estimate of how large our final result (fOuter)
        // and our per-contour temp (fInner) will be, so we don't spend
        // extra time repeatedly growing these arrays.
        //
        // 1x for inner == 'wag' (worst contour length would be better guess)
        self.inner.clear();
        self.inner.reserve(path.verbs.len(), path.points.len());

        // 3x for result == inner + outer + join (swag)
        self.outer.clear();
        self.outer
            .reserve(path.verbs.len() * 3, path.points.len() * 3);

        self.cusper.clear();

        self.stroke_type = StrokeType::Outer;

        self.recursion_depth = 0;
        self.found_tangents = false;
        self.join_completed = false;

        let mut last_segment_is_line = false;
        let mut iter = path.segments();
        while let Some(segment) = iter.next() {
            match segment {
                PathSegment::MoveTo(p) => {
                    self.move_to(p);
                }
                PathSegment::LineTo(p) => {
                    self.line_to(p, Some(&iter));
                    last_segment_is_line = true;
                }
                PathSegment::QuadTo(p1, p2) => {
                    self.quad_to(p1, p2);
                    last_segment_is_line = false;
                }
                PathSegment::ConicTo(p1, p2, weight) => {
                    self.conic_to(p1, p2, weight);
                    last_segment_is_line = false;
                }
                PathSegment::CubicTo(p1, p2, p3) => {
                    self.cubic_to(p1, p2, p3);
                    last_segment_is_line = false;
                }
                PathSegment::Close => {
                    if line_cap != LineCap::Butt {
                        // If the stroke consists of a moveTo followed by a close, treat it
                        // as if it were followed by a zero-length line. Lines without length
                        // can have square and round end caps.
                        if self.has_only_move_to() {
                            self.line_to(self.move_to_pt(), None);
                            last_segment_is_line = true;
                            continue;
                        }

                        // If the stroke consists of a moveTo followed by one or more zero-length
                        // verbs, then followed by a close, treat is as if it were followed by a
                        // zero-length line. Lines without length can have square & round end caps.
                        if self.is_current_contour_empty() {
                            last_segment_is_line = true;
                            continue;
                        }
                    }

                    self.close(last_segment_is_line);
                }
            }
        }

        self.finish(last_segment_is_line)
    }

    fn add_join(&mut self, after_unit_normal: Point, curr_is_line: bool) {
        let joint = Joint {
            before: self.prev_normal.unit,
            pivot: self.prev_pt,
            after: after_unit_normal,
            radius: self.radius,
            prev_is_line: self.prev_is_line,
            curr_is_line,
        };

        let builders = SwappableBuilders {
            inner: &mut self.inner,
            outer: &mut self.outer,
        };

        match self.join {
            LineJoin::Miter => joint.miter(self.inv_miter_limit, builders),
            LineJoin::Round => joint.round(builders),
            LineJoin::Bevel => joint.bevel(builders),
        }
    }

    // Connects the points a flat curve was reduced to.
    // Every join after the first one is round.
    fn lines_through(&mut self, points: &[Point]) {
        let (first, rest) = match points.split_first() {
            Some(v) => v,
            None => return,
        };

        self.line_to(*first, None);
        let join = core::mem::replace(&mut self.join, LineJoin::Round);
        for p in rest {
            self.line_to(*p, None);
        }
        self.join = join;
    }

    fn move_to_pt(&self) -> Point {
        self.first_pt
    }

    fn move_to(&mut self, p: Point) {
        if self.segment_count > 0 {
            self.finish_contour(false, false);
        }

        self.segment_count = 0;
        self.first_pt = p;
        self.prev_pt = p;
        self.join_completed = false;
    }

    fn line_to(&mut self, p: Point, iter: Option<&PathSegmentsIter>) {
        let teeny_line = self
            .prev_pt
            .equals_within_tolerance(p, SCALAR_NEARLY_ZERO * self.inv_res_scale);
        if self.cap == LineCap::Butt && teeny_line {
            return;
        }

        if teeny_line && (self.join_completed || iter.map(|i| i.has_valid_tangent()) == Some(true))
        {
            return;
        }

        let normal = match self.pre_join_to(p, true) {
            Some(v) => v,
            None => return,
        };

        let offset = normal.scaled;
        self.outer.line_to(p.x + offset.x, p.y + offset.y);
        self.inner.line_to(p.x - offset.x, p.y - offset.y);

        self.post_join_to(p, normal);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let quad = [self.prev_pt, p1, p2];
        let reduction = check_quad_linear(&quad);
        self.quad_like_to(&quad, reduction);
    }

    fn conic_to(&mut self, p1: Point, p2: Point, weight: f32) {
        let conic = Conic::new(self.prev_pt, p1, p2, weight);
        let reduction = check_conic_linear(&conic);
        self.quad_like_to(&conic, reduction);
    }

    // Strokes a flat curve as lines.
    // Returns the point the curve start aims at when it isn't flat.
    fn flat_curve_to(&mut self, reduction: Reduction, end: Point) -> Option<Point> {
        match reduction {
            // A degenerate curve right after a move is treated as a zero-length line,
            // which still gets square and round caps.
            Reduction::Point | Reduction::Line => self.line_to(end, None),
            Reduction::Degenerate(points) => {
                let mut chain: ArrayVec<Point, 4> = points.into_iter().collect();
                chain.push(end);
                self.lines_through(&chain);
            }
            Reduction::Quad(tangent_pt) => return Some(tangent_pt),
        }

        None
    }

    fn quad_like_to<C: QuadLike>(&mut self, curve: &C, reduction: Reduction) {
        let [_, p1, p2] = *curve.points();
        let tangent_pt = match self.flat_curve_to(reduction, p2) {
            Some(v) => v,
            None => return,
        };

        let normal_ab = match self.pre_join_to(tangent_pt, false) {
            Some(v) => v,
            None => {
                self.line_to(p2, None);
                return;
            }
        };

        let mut quad_points = QuadConstruct::default();
        for &stroke_type in &[StrokeType::Outer, StrokeType::Inner] {
            self.init_quad(
                stroke_type,
                NormalizedF32::ZERO,
                NormalizedF32::ONE,
                &mut quad_points,
            );
            self.quad_like_stroke(curve, &mut quad_points);
        }

        let normal_bc = Normal::between(p1, p2, self.res_scale, self.radius).unwrap_or(normal_ab);
        self.post_join_to(p2, normal_bc);
    }

    fn quad_like_stroke<C: QuadLike>(
        &mut self,
        curve: &C,
        quad_points: &mut QuadConstruct,
    ) -> bool {
        match self.compare_quad(quad_points, |t| self.quad_like_perp_ray(curve, t)) {
            ResultType::Quad => {
                let [_, ctrl, end] = quad_points.quad;
                self.stroke_builder().quad_to(ctrl.x, ctrl.y, end.x, end.y);
                return true;
            }
            ResultType::Degenerate => {
                self.add_degenerate_line(quad_points);
                return true;
            }
            ResultType::Split => {}
        }

        self.recursion_depth += 1;
        if self.recursion_depth > C::RECURSION_LIMIT {
            log::debug!("{} stroke recursion limit reached", C::NAME);
            return false;
        }

        let mut half = QuadConstruct::default();
        half.init_with_start(quad_points);
        if !self.quad_like_stroke(curve, &mut half) {
            return false;
        }

        half.init_with_end(quad_points);
        if !self.quad_like_stroke(curve, &mut half) {
            return false;
        }

        self.recursion_depth -= 1;
        true
    }

    // Given a curve and t, return the point on curve,
    // its perpendicular, and the perpendicular tangent.
    fn quad_like_perp_ray<C: QuadLike>(&self, curve: &C, t: NormalizedF32) -> PerpRay {
        let mut dxy = curve.eval_tangent(t);
        if dxy.is_zero() {
            let points = curve.points();
            dxy = points[2] - points[0];
        }

        self.perp_ray(curve.eval(t), dxy)
    }

    fn cubic_to(&mut self, pt1: Point, pt2: Point, pt3: Point) {
        let cubic = [self.prev_pt, pt1, pt2, pt3];
        let tangent_pt = match self.flat_curve_to(check_cubic_linear(&cubic), pt3) {
            Some(v) => v,
            None => return,
        };

        let normal_ab = match self.pre_join_to(tangent_pt, false) {
            Some(v) => v,
            None => {
                self.line_to(pt3, None);
                return;
            }
        };

        let mut t_values = path_geometry::new_t_values();
        let t_values = path_geometry::find_cubic_inflections(&cubic, &mut t_values);
        // stroke each span between inflections separately
        let span_ends = t_values
            .iter()
            .map(|t| t.to_normalized())
            .chain(core::iter::once(NormalizedF32::ONE));
        let mut last_t = NormalizedF32::ZERO;
        for next_t in span_ends {
            let mut quad_points = QuadConstruct::default();
            for &stroke_type in &[StrokeType::Outer, StrokeType::Inner] {
                self.init_quad(stroke_type, last_t, next_t, &mut quad_points);
                self.cubic_stroke(&cubic, &mut quad_points);
            }
            last_t = next_t;
        }

        if let Some(cusp) = path_geometry::find_cubic_cusp(&cubic) {
            let cusp_loc = path_geometry::eval_cubic_pos_at(&cubic, cusp.to_normalized());
            self.cusper
                .push_circle(cusp_loc.x, cusp_loc.y, self.radius, PathDirection::CW);
        }

        // emit the join even if one stroke succeeded but the last one failed
        // this avoids reversing an inner stroke with a partial path followed by another moveto
        let normal_cd = self.cubic_end_normal(&cubic).unwrap_or(normal_ab);
        self.post_join_to(pt3, normal_cd);
    }

    fn cubic_stroke(&mut self, cubic: &[Point; 4], quad_points: &mut QuadConstruct) -> bool {
        if !self.found_tangents {
            let result_type = self.tangents_meet(cubic, quad_points);
            if result_type != ResultType::Quad {
                let ok = points_within_dist(
                    quad_points.quad[0],
                    quad_points.quad[2],
                    self.inv_res_scale,
                );
                if (result_type == ResultType::Degenerate || ok)
                    && self.cubic_mid_on_line(cubic, quad_points)
                {
                    self.add_degenerate_line(quad_points);
                    return true;
                }
            } else {
                self.found_tangents = true;
            }
        }

        if self.found_tangents {
            let result_type = self.compare_quad(quad_points, |t| self.cubic_perp_ray(cubic, t));
            if result_type == ResultType::Quad {
                let [_, ctrl, end] = quad_points.quad;
                self.stroke_builder().quad_to(ctrl.x, ctrl.y, end.x, end.y);
                return true;
            }

            if result_type == ResultType::Degenerate && !quad_points.opposite_tangents {
                self.add_degenerate_line(quad_points);
                return true;
            }
        }

        if !quad_points.quad[2].x.is_finite() || !quad_points.quad[2].y.is_finite() {
            return false; // just abort if projected quad isn't representable
        }

        self.recursion_depth += 1;
        if self.recursion_depth > RECURSIVE_LIMITS[self.found_tangents as usize] {
            log::debug!("cubic stroke recursion limit reached");
            return false;
        }

        let mut half = QuadConstruct::default();
        if !half.init_with_start(quad_points) {
            self.add_degenerate_line(quad_points);
            self.recursion_depth -= 1;
            return true;
        }

        if !self.cubic_stroke(cubic, &mut half) {
            return false;
        }

        if !half.init_with_end(quad_points) {
            self.add_degenerate_line(quad_points);
            self.recursion_depth -= 1;
            return true;
        }

        if !self.cubic_stroke(cubic, &mut half) {
            return false;
        }

        self.recursion_depth -= 1;
        true
    }

    fn cubic_mid_on_line(&self, cubic: &[Point; 4], quad_points: &mut QuadConstruct) -> bool {
        let stroke_mid = self.cubic_perp_ray(cubic, quad_points.mid_t).offset;
        let dist = pt_to_line(stroke_mid, quad_points.quad[0], quad_points.quad[2]);
        dist < self.inv_res_scale_squared
    }

    // Given a cubic and t, return the point on curve,
    // its perpendicular, and the perpendicular tangent.
    fn cubic_perp_ray(&self, cubic: &[Point; 4], t: NormalizedF32) -> PerpRay {
        let mut dxy = path_geometry::eval_cubic_tangent_at(cubic, t);

        let mut chopped = [Point::zero(); 7];
        if dxy.x == 0.0 && dxy.y == 0.0 {
            let mut c_points: &[Point] = cubic;
            if t.get().is_nearly_zero() {
                dxy = cubic[2] - cubic[0];
            } else if (1.0 - t.get()).is_nearly_zero() {
                dxy = cubic[3] - cubic[1];
            } else {
                // If the cubic inflection falls on the cusp, subdivide the cubic
                // to find the tangent at that point.
                let t = NormalizedF32Exclusive::new_bounded(t.get());
                path_geometry::chop_cubic_at2(cubic, t, &mut chopped);
                dxy = chopped[3] - chopped[2];
                if dxy.x == 0.0 && dxy.y == 0.0 {
                    dxy = chopped[3] - chopped[1];
                    c_points = &chopped;
                }
            }

            if dxy.x == 0.0 && dxy.y == 0.0 {
                dxy = c_points[3] - c_points[0];
            }
        }

        self.perp_ray(path_geometry::eval_cubic_pos_at(cubic, t), dxy)
    }

    // `None` when both end tangents are degenerate.
    fn cubic_end_normal(&self, cubic: &[Point; 4]) -> Option<Normal> {
        let mut ab = cubic[1] - cubic[0];
        let mut cd = cubic[3] - cubic[2];
        if degenerate_vector(ab) && degenerate_vector(cd) {
            return None;
        }

        if degenerate_vector(ab) {
            ab = cubic[2] - cubic[0];
        }

        if degenerate_vector(cd) {
            cd = cubic[3] - cubic[1];
        }

        if degenerate_vector(ab) || degenerate_vector(cd) {
            return None;
        }

        let normal = Normal::from_vector(cd, self.radius);
        debug_assert!(normal.is_some());
        normal
    }

    fn compare_quad(
        &self,
        quad_points: &mut QuadConstruct,
        perp_ray: impl Fn(NormalizedF32) -> PerpRay,
    ) -> ResultType {
        // get the quadratic approximation of the stroke
        quad_points.set_ends(&perp_ray);
        let result_type = self.intersect_ray(IntersectRayType::CtrlPt, quad_points);
        if result_type != ResultType::Quad {
            return result_type;
        }

        // project a ray from the curve midpoint to the stroke
        let mid = perp_ray(quad_points.mid_t);
        let stroke = quad_points.quad;
        self.stroke_close_enough(&stroke, &[mid.offset, mid.on_curve], quad_points)
    }

    fn close(&mut self, is_line: bool) {
        self.finish_contour(true, is_line);
    }

    fn finish_contour(&mut self, close: bool, curr_is_line: bool) {
        if self.segment_count > 0 {
            if close {
                self.add_join(self.first_normal.unit, curr_is_line);
                self.outer.close();

                if self.can_ignore_center {
                    // Keep only the larger of the two boundaries.
                    let outer_bounds =
                        Rect::from_points(&self.outer.points[self.first_outer_pt_index_in_contour..]);
                    let inner_bounds = self.inner.compute_bounds();
                    if let (Some(outer_bounds), Some(inner_bounds)) = (outer_bounds, inner_bounds) {
                        if inner_bounds.contains(&outer_bounds) {
                            self.outer.truncate(self.first_outer_verb_index_in_contour);
                            self.push_reversed_inner();
                        }
                    }
                } else {
                    // now add inner as its own contour
                    self.push_reversed_inner();
                }
            } else {
                // add caps to start and end

                // cap the end
                let pt = self.inner.last_point().unwrap_or_default();
                self.cap.add_cap(
                    self.prev_pt,
                    self.prev_normal.scaled,
                    pt,
                    curr_is_line,
                    &mut self.outer,
                );
                self.outer.reverse_path_to(&self.inner);

                // cap the start
                self.cap.add_cap(
                    self.first_pt,
                    -self.first_normal.scaled,
                    self.first_outer_pt,
                    self.prev_is_line,
                    &mut self.outer,
                );
                self.outer.close();
            }

            if !self.cusper.is_empty() {
                self.outer.push_builder(&self.cusper);
                self.cusper.clear();
            }
        }

        // since we may re-use `inner`, we rewind instead of reset, to save on
        // reallocating its internal storage.
        self.inner.clear();
        self.segment_count = -1;
        self.first_outer_pt_index_in_contour = self.outer.points.len();
        self.first_outer_verb_index_in_contour = self.outer.verbs.len();
    }

    fn push_reversed_inner(&mut self) {
        let pt = self.inner.last_point().unwrap_or_default();
        self.outer.move_to(pt.x, pt.y);
        self.outer.reverse_path_to(&self.inner);
        self.outer.close();
    }

    fn pre_join_to(&mut self, p: Point, curr_is_line: bool) -> Option<Normal> {
        debug_assert!(self.segment_count >= 0);

        let normal = match Normal::between(self.prev_pt, p, self.res_scale, self.radius) {
            Some(v) => v,
            // Square and round caps are drawn even for zero-length segments.
            // Such a segment has no direction, so it is treated as upright.
            None if self.cap != LineCap::Butt => Normal {
                scaled: Point::from_xy(self.radius, 0.0),
                unit: Point::from_xy(1.0, 0.0),
            },
            None => return None,
        };

        if self.segment_count == 0 {
            self.first_normal = normal;
            self.first_outer_pt = self.prev_pt + normal.scaled;

            let inner_pt = self.prev_pt - normal.scaled;
            self.outer
                .move_to(self.first_outer_pt.x, self.first_outer_pt.y);
            self.inner.move_to(inner_pt.x, inner_pt.y);
        } else {
            self.add_join(normal.unit, curr_is_line);
        }

        self.prev_is_line = curr_is_line;
        Some(normal)
    }

    fn post_join_to(&mut self, p: Point, normal: Normal) {
        self.join_completed = true;
        self.prev_pt = p;
        self.prev_normal = normal;
        self.segment_count += 1;
    }

    fn init_quad(
        &mut self,
        stroke_type: StrokeType,
        start: NormalizedF32,
        end: NormalizedF32,
        quad_points: &mut QuadConstruct,
    ) {
        self.stroke_type = stroke_type;
        self.found_tangents = false;
        quad_points.init(start, end);
    }

    // Scales the curve derivative by the radius and offsets the curve point
    // perpendicular to it, towards the current stroke side.
    fn perp_ray(&self, on_curve: Point, mut dxy: Point) -> PerpRay {
        if !dxy.set_length(self.radius) {
            dxy = Point::from_xy(self.radius, 0.0);
        }

        let axis_flip = self.stroke_type as i32 as f32; // go opposite ways for outer, inner
        let offset = Point::from_xy(
            on_curve.x + axis_flip * dxy.y,
            on_curve.y - axis_flip * dxy.x,
        );

        PerpRay {
            on_curve,
            offset,
            tangent: offset + dxy,
        }
    }

    // The side currently being stroked.
    fn stroke_builder(&mut self) -> &mut PathBuilder {
        match self.stroke_type {
            StrokeType::Outer => &mut self.outer,
            StrokeType::Inner => &mut self.inner,
        }
    }

    fn add_degenerate_line(&mut self, quad_points: &QuadConstruct) {
        let end = quad_points.quad[2];
        self.stroke_builder().line_to(end.x, end.y);
    }

    fn stroke_close_enough(
        &self,
        stroke: &[Point; 3],
        ray: &[Point; 2],
        quad_points: &mut QuadConstruct,
    ) -> ResultType {
        let half = NormalizedF32::new_clamped(0.5);
        let stroke_mid = path_geometry::eval_quad_at(stroke, half);
        // measure the distance from the curve to the quad-stroke midpoint, compare to radius
        if points_within_dist(ray[0], stroke_mid, self.inv_res_scale) {
            // if the difference is small
            if sharp_angle(&quad_points.quad) {
                return ResultType::Split;
            }

            return ResultType::Quad;
        }

        // measure the distance to quad's bounds (quick reject)
        // an alternative : look for point in triangle
        if !pt_in_quad_bounds(stroke, ray[0], self.inv_res_scale) {
            // if far, subdivide
            return ResultType::Split;
        }

        // measure the curve ray distance to the quad-stroke
        let mut roots = path_geometry::new_t_values();
        let roots = intersect_quad_ray(ray, stroke, &mut roots);
        if roots.len() != 1 {
            return ResultType::Split;
        }

        let quad_pt = path_geometry::eval_quad_at(stroke, roots[0].to_normalized());
        let error = self.inv_res_scale * (1.0 - (roots[0].get() - 0.5).abs() * 2.0);
        if points_within_dist(ray[0], quad_pt, error) {
            // if the difference is small, we're done
            if sharp_angle(&quad_points.quad) {
                return ResultType::Split;
            }

            return ResultType::Quad;
        }

        // otherwise, subdivide
        ResultType::Split
    }

    // Find the intersection of the stroke tangents to construct a stroke quad.
    // Return whether the stroke is a degenerate (a line), a quad, or must be split.
    // Optionally compute the quad's control point.
    fn intersect_ray(
        &self,
        intersect_ray_type: IntersectRayType,
        quad_points: &mut QuadConstruct,
    ) -> ResultType {
        let start = quad_points.quad[0];
        let end = quad_points.quad[2];
        let a_len = quad_points.tangent_start - start;
        let b_len = quad_points.tangent_end - end;

        // Slopes match when denom goes to zero:
        //                   axLen / ayLen ==                   bxLen / byLen
        // (ayLen * byLen) * axLen / ayLen == (ayLen * byLen) * bxLen / byLen
        //          byLen  * axLen         ==  ayLen          * bxLen
        //          byLen  * axLen         -   ayLen          * bxLen         ( == denom )
        let denom = a_len.cross(b_len);
        if denom == 0.0 || !denom.is_finite() {
            quad_points.opposite_tangents = a_len.dot(b_len) < 0.0;
            return ResultType::Degenerate;
        }

        quad_points.opposite_tangents = false;
        let ab0 = start - end;
        let mut numer_a = b_len.cross(ab0);
        let numer_b = a_len.cross(ab0);
        if (numer_a >= 0.0) == (numer_b >= 0.0) {
            // if the control point is outside the quad ends

            // if the perpendicular distances from the quad points to the opposite tangent line
            // are small, a straight line is good enough
            let dist1 = pt_to_line(start, end, quad_points.tangent_end);
            let dist2 = pt_to_line(end, start, quad_points.tangent_start);
            if dist1.max(dist2) <= self.inv_res_scale_squared {
                return ResultType::Degenerate;
            }

            return ResultType::Split;
        }

        // check to see if the denominator is teeny relative to the numerator
        // if the offset by one will be lost, the ratio is too large
        numer_a /= denom;
        let valid_divide = numer_a > numer_a - 1.0;
        if valid_divide {
            if intersect_ray_type == IntersectRayType::CtrlPt {
                // the intersection of the tangents need not be on the tangent segment
                // so 0 <= numerA <= 1 is not necessarily true
                quad_points.quad[1] =
                    start.scaled(1.0 - numer_a) + quad_points.tangent_start.scaled(numer_a);
            }

            return ResultType::Quad;
        }

        quad_points.opposite_tangents = a_len.dot(b_len) < 0.0;

        // if the lines are parallel, straight line is good enough
        ResultType::Degenerate
    }

    // Given a cubic and a t-range, determine if the stroke can be described by a quadratic.
    fn tangents_meet(&self, cubic: &[Point; 4], quad_points: &mut QuadConstruct) -> ResultType {
        quad_points.set_ends(|t| self.cubic_perp_ray(cubic, t));
        self.intersect_ray(IntersectRayType::ResultType, quad_points)
    }

    fn finish(&mut self, is_line: bool) -> Option<Path> {
        self.finish_contour(false, is_line);

        // Swap out the outer builder.
        let mut buf = PathBuilder::new();
        core::mem::swap(&mut self.outer, &mut buf);

        buf.finish()
    }

    fn has_only_move_to(&self) -> bool {
        self.segment_count == 0
    }

    fn is_current_contour_empty(&self) -> bool {
        self.inner.is_zero_length_since_point(0)
            && self
                .outer
                .is_zero_length_since_point(self.first_outer_pt_index_in_contour)
    }
}

impl LineCap {
    // `extend_last` is set when the last outer segment is a line,
    // so a square cap can move its end point instead of adding a new one.
    fn add_cap(
        self,
        pivot: Point,
        normal: Point,
        stop: Point,
        extend_last: bool,
        path: &mut PathBuilder,
    ) {
        let mut parallel = normal;
        parallel.rotate_cw();

        match self {
            LineCap::Butt => {
                path.line_to(stop.x, stop.y);
            }
            LineCap::Round => {
                let projected_center = pivot + parallel;
                path.conic_points_to(
                    projected_center + normal,
                    projected_center,
                    SCALAR_ROOT_2_OVER_2,
                );
                path.conic_points_to(projected_center - normal, stop, SCALAR_ROOT_2_OVER_2);
            }
            LineCap::Square => {
                let corner1 = pivot + normal + parallel;
                let corner2 = pivot - normal + parallel;
                if extend_last {
                    path.set_last_point(corner1);
                    path.line_to(corner2.x, corner2.y);
                } else {
                    path.line_to(corner1.x, corner1.y);
                    path.line_to(corner2.x, corner2.y);
                    path.line_to(stop.x, stop.y);
                }
            }
        }
    }
}

fn is_clockwise(before: Point, after: Point) -> bool {
    before.x * after.y > before.y * after.x
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum AngleType {
    Nearly180,
    Sharp,
    Shallow,
    NearlyLine,
}

impl AngleType {
    // Normals are used instead of tangents, so the dot product has the opposite sign.
    fn from_dot(dot: f32) -> Self {
        if dot >= 0.0 {
            if (1.0 - dot).is_nearly_zero() {
                AngleType::NearlyLine
            } else {
                AngleType::Shallow
            }
        } else if (1.0 + dot).is_nearly_zero() {
            AngleType::Nearly180
        } else {
            AngleType::Sharp
        }
    }
}

// When the radius is larger than the segments, connecting the two inner
// segments directly may show through as a diagonal. Going through the pivot hides it.
fn handle_inner_join(pivot: Point, after: Point, inner: &mut PathBuilder) {
    inner.line_to(pivot.x, pivot.y);
    inner.line_to(pivot.x - after.x, pivot.y - after.y);
}

impl Joint {
    fn bevel(self, mut builders: SwappableBuilders) {
        let mut after = self.after.scaled(self.radius);
        if !is_clockwise(self.before, self.after) {
            builders.swap();
            after = -after;
        }

        builders.outer.line_to(self.pivot.x + after.x, self.pivot.y + after.y);
        handle_inner_join(self.pivot, after, builders.inner);
    }

    fn round(self, mut builders: SwappableBuilders) {
        if AngleType::from_dot(self.before.dot(self.after)) == AngleType::NearlyLine {
            return;
        }

        let mut before = self.before;
        let mut after = self.after;
        let mut dir = PathDirection::CW;
        if !is_clockwise(before, after) {
            builders.swap();
            before = -before;
            after = -after;
            dir = PathDirection::CCW;
        }

        let ts = Transform::from_row(
            self.radius,
            0.0,
            0.0,
            self.radius,
            self.pivot.x,
            self.pivot.y,
        );

        let conics = Conic::build_unit_arc(before, after, dir, ts);
        if conics.is_empty() {
            return;
        }

        for conic in &conics {
            builders
                .outer
                .conic_points_to(conic.points[1], conic.points[2], conic.weight);
        }

        handle_inner_join(self.pivot, after.scaled(self.radius), builders.inner);
    }

    fn miter(self, inv_miter_limit: f32, mut builders: SwappableBuilders) {
        let dot = self.before.dot(self.after);
        let angle_type = AngleType::from_dot(dot);
        match angle_type {
            AngleType::NearlyLine => return,
            AngleType::Nearly180 => {
                self.blunt(false, self.after, builders);
                return;
            }
            _ => {}
        }

        let mut before = self.before;
        let mut after = self.after;
        let ccw = !is_clockwise(before, after);
        if ccw {
            builders.swap();
            before = -before;
            after = -after;
        }

        // An upright right angle is the common case of a stroked rectangle.
        // With dot == 0 checking one normal is enough.
        if dot == 0.0 && inv_miter_limit <= SCALAR_ROOT_2_OVER_2 {
            let mid = (before + after).scaled(self.radius);
            self.tip(mid, after, builders);
            return;
        }

        // The miter length is radius / sin(half_angle). It is cut when that exceeds
        // miter_limit * radius, i.e. when sin(half_angle) < 1 / miter_limit.
        let sin_half_angle = (1.0 + dot).half().sqrt();
        if sin_half_angle < inv_miter_limit {
            self.blunt(false, after, builders);
            return;
        }

        let mut mid = if angle_type == AngleType::Sharp {
            let mid = Point::from_xy(after.y - before.y, before.x - after.x);
            if ccw {
                -mid
            } else {
                mid
            }
        } else {
            before + after
        };

        mid.set_length(self.radius / sin_half_angle);
        self.tip(mid, after, builders);
    }

    fn tip(self, mid: Point, after: Point, builders: SwappableBuilders) {
        let tip = self.pivot + mid;
        if self.prev_is_line {
            builders.outer.set_last_point(tip);
        } else {
            builders.outer.line_to(tip.x, tip.y);
        }

        self.blunt(self.curr_is_line, after, builders);
    }

    fn blunt(self, curr_is_line: bool, after: Point, builders: SwappableBuilders) {
        let after = after.scaled(self.radius);
        if !curr_is_line {
            builders
                .outer
                .line_to(self.pivot.x + after.x, self.pivot.y + after.y);
        }

        handle_inner_join(self.pivot, after, builders.inner);
    }
}

// A segment normal, scaled by the stroke radius and of unit length.
#[derive(Copy, Clone, Default, Debug)]
struct Normal {
    scaled: Point,
    unit: Point,
}

impl Normal {
    fn from_vector(vec: Point, radius: f32) -> Option<Self> {
        let mut unit = Point::zero();
        if !unit.set_normalize(vec.x, vec.y) {
            return None;
        }

        unit.rotate_ccw();
        Some(Normal {
            scaled: unit.scaled(radius),
            unit,
        })
    }

    fn between(before: Point, after: Point, scale: f32, radius: f32) -> Option<Self> {
        Self::from_vector((after - before).scaled(scale), radius)
    }
}

// A point on the source curve and the matching point on the stroke.
#[derive(Copy, Clone, Debug)]
struct PerpRay {
    on_curve: Point,
    offset: Point,
    // continues `offset` along the curve direction
    tangent: Point,
}

#[derive(Debug)]
struct QuadConstruct {
    // The state of the quad stroke under construction.
    quad: [Point; 3],       // the stroked quad parallel to the original curve
    tangent_start: Point,   // a point tangent to quad[0]
    tangent_end: Point,     // a point tangent to quad[2]
    start_t: NormalizedF32, // a segment of the original curve
    mid_t: NormalizedF32,
    end_t: NormalizedF32,
    start_set: bool, // state to share common points across structs
    end_set: bool,
    opposite_tangents: bool, // set if coincident tangents have opposite directions
}

impl Default for QuadConstruct {
    fn default() -> Self {
        Self {
            quad: Default::default(),
            tangent_start: Point::default(),
            tangent_end: Point::default(),
            start_t: NormalizedF32::ZERO,
            mid_t: NormalizedF32::ZERO,
            end_t: NormalizedF32::ZERO,
            start_set: false,
            end_set: false,
            opposite_tangents: false,
        }
    }
}

impl QuadConstruct {
    // return false if start and end are too close to have a unique middle
    fn init(&mut self, start: NormalizedF32, end: NormalizedF32) -> bool {
        self.start_t = start;
        self.mid_t = NormalizedF32::new_clamped((start.get() + end.get()).half());
        self.end_t = end;
        self.start_set = false;
        self.end_set = false;
        self.start_t < self.mid_t && self.mid_t < self.end_t
    }

    fn init_with_start(&mut self, parent: &Self) -> bool {
        if !self.init(parent.start_t, parent.mid_t) {
            return false;
        }

        self.quad[0] = parent.quad[0];
        self.tangent_start = parent.tangent_start;
        self.start_set = true;
        true
    }

    // Finds the stroke quad ends that weren't inherited from the parent.
    fn set_ends(&mut self, perp_ray: impl Fn(NormalizedF32) -> PerpRay) {
        if !self.start_set {
            let ray = perp_ray(self.start_t);
            self.quad[0] = ray.offset;
            self.tangent_start = ray.tangent;
            self.start_set = true;
        }

        if !self.end_set {
            let ray = perp_ray(self.end_t);
            self.quad[2] = ray.offset;
            self.tangent_end = ray.tangent;
            self.end_set = true;
        }
    }

    fn init_with_end(&mut self, parent: &Self) -> bool {
        if !self.init(parent.mid_t, parent.end_t) {
            return false;
        }

        self.quad[2] = parent.quad[2];
        self.tangent_end = parent.tangent_end;
        self.end_set = true;
        true
    }
}

fn check_quad_linear(quad: &[Point; 3]) -> Reduction {
    let degenerate_ab = degenerate_vector(quad[1] - quad[0]);
    let degenerate_bc = degenerate_vector(quad[2] - quad[1]);
    if degenerate_ab && degenerate_bc {
        return Reduction::Point;
    }

    if degenerate_ab || degenerate_bc {
        return Reduction::Line;
    }

    if !quad_in_line(quad) {
        return Reduction::Quad(quad[1]);
    }

    let t = path_geometry::find_quad_max_curvature(quad);
    if t == NormalizedF32::ZERO || t == NormalizedF32::ONE {
        return Reduction::Line;
    }

    degenerate_at(path_geometry::eval_quad_at(quad, t))
}

fn check_conic_linear(conic: &Conic) -> Reduction {
    let points = &conic.points;
    let degenerate_ab = degenerate_vector(points[1] - points[0]);
    let degenerate_bc = degenerate_vector(points[2] - points[1]);
    if degenerate_ab && degenerate_bc {
        return Reduction::Point;
    }

    if degenerate_ab || degenerate_bc {
        return Reduction::Line;
    }

    if !quad_in_line(points) {
        return Reduction::Quad(points[1]);
    }

    // Quad curvature is a reasonable substitute for the conic one.
    let t = path_geometry::find_quad_max_curvature(points);
    if t == NormalizedF32::ZERO {
        return Reduction::Line;
    }

    degenerate_at(conic.eval(t.get()))
}

fn degenerate_at(p: Point) -> Reduction {
    let mut points = ArrayVec::new();
    points.push(p);
    Reduction::Degenerate(points)
}

fn degenerate_vector(v: Point) -> bool {
    !v.can_normalize()
}

// The line slop multipliers are empirical.
const QUAD_LINE_SLOP: f32 = 0.000005;
const CUBIC_LINE_SLOP: f32 = 0.00001;

fn quad_in_line(quad: &[Point; 3]) -> bool {
    points_in_line(quad, QUAD_LINE_SLOP)
}

fn cubic_in_line(cubic: &[Point; 4]) -> bool {
    points_in_line(cubic, CUBIC_LINE_SLOP)
}

/// Checks that the inner points are close to the line connecting the outermost ones.
///
/// The outermost points are the pair with the largest difference in X or Y.
fn points_in_line(points: &[Point], slop: f32) -> bool {
    let mut pt_max = -1.0;
    let mut outer1 = 0;
    let mut outer2 = 0;
    for i in 0..points.len() - 1 {
        for j in i + 1..points.len() {
            let diff = points[j] - points[i];
            let max = diff.x.abs().max(diff.y.abs());
            if pt_max < max {
                outer1 = i;
                outer2 = j;
                pt_max = max;
            }
        }
    }

    let line_slop = pt_max * pt_max * slop;
    (0..points.len())
        .filter(|i| *i != outer1 && *i != outer2)
        .all(|i| pt_to_line(points[i], points[outer1], points[outer2]) <= line_slop)
}

// returns the distance squared from the point to the line
fn pt_to_line(pt: Point, line_start: Point, line_end: Point) -> f32 {
    let dxy = line_end - line_start;
    let ab0 = pt - line_start;
    let numer = dxy.dot(ab0);
    let denom = dxy.dot(dxy);
    let t = numer / denom;
    if t >= 0.0 && t <= 1.0 {
        let hit = Point::from_xy(
            line_start.x * (1.0 - t) + line_end.x * t,
            line_start.y * (1.0 - t) + line_end.y * t,
        );
        hit.distance_to_sqd(pt)
    } else {
        pt.distance_to_sqd(line_start)
    }
}

// Intersect the line with the quad and return the t values on the quad where the line crosses.
fn intersect_quad_ray<'a>(
    line: &[Point; 2],
    quad: &[Point; 3],
    roots: &'a mut [NormalizedF32Exclusive; 3],
) -> &'a [NormalizedF32Exclusive] {
    let vec = line[1] - line[0];
    let dist = |p: Point| (p.y - line[0].y) * vec.x - (p.x - line[0].x) * vec.y;
    let c = dist(quad[0]);
    let b = dist(quad[1]) - c;
    let a = dist(quad[2]) + (c - 2.0 * dist(quad[1]));

    let len = path_geometry::find_unit_quad_roots(a, 2.0 * b, c, roots);
    &roots[0..len]
}

fn points_within_dist(near_pt: Point, far_pt: Point, limit: f32) -> bool {
    near_pt.distance_to_sqd(far_pt) <= limit * limit
}

fn sharp_angle(quad: &[Point; 3]) -> bool {
    let mut smaller = quad[1] - quad[0];
    let mut larger = quad[1] - quad[2];
    let smaller_len = smaller.length_sqd();
    let mut larger_len = larger.length_sqd();
    if smaller_len > larger_len {
        core::mem::swap(&mut smaller, &mut larger);
        larger_len = smaller_len;
    }

    if !smaller.set_length(larger_len) {
        return false;
    }

    let dot = smaller.dot(larger);
    dot > 0.0
}

// A quick reject: whether the point is close to the quad bounds.
fn pt_in_quad_bounds(quad: &[Point; 3], pt: Point, inv_res_scale: f32) -> bool {
    let mut min = quad[0];
    let mut max = quad[0];
    for p in &quad[1..] {
        min = Point::from_xy(min.x.min(p.x), min.y.min(p.y));
        max = Point::from_xy(max.x.max(p.x), max.y.max(p.y));
    }

    let far_off = pt.x + inv_res_scale < min.x
        || pt.x - inv_res_scale > max.x
        || pt.y + inv_res_scale < min.y
        || pt.y - inv_res_scale > max.y;
    !far_off
}

fn check_cubic_linear(cubic: &[Point; 4]) -> Reduction {
    let degenerate_ab = degenerate_vector(cubic[1] - cubic[0]);
    let degenerate_bc = degenerate_vector(cubic[2] - cubic[1]);
    let degenerate_cd = degenerate_vector(cubic[3] - cubic[2]);
    if degenerate_ab && degenerate_bc && degenerate_cd {
        return Reduction::Point;
    }

    if degenerate_ab as u8 + degenerate_bc as u8 + degenerate_cd as u8 == 2 {
        return Reduction::Line;
    }

    if !cubic_in_line(cubic) {
        return Reduction::Quad(if degenerate_ab { cubic[2] } else { cubic[1] });
    }

    let mut t_values = [NormalizedF32::ZERO; 3];
    let t_values = path_geometry::find_cubic_max_curvature(cubic, &mut t_values);
    // Skip t-values that evaluate to either end point.
    let points: ArrayVec<Point, 3> = t_values
        .iter()
        .filter(|t| 0.0 < t.get() && t.get() < 1.0)
        .map(|t| path_geometry::eval_cubic_pos_at(cubic, *t))
        .filter(|p| *p != cubic[0] && *p != cubic[3])
        .collect();

    if points.is_empty() {
        Reduction::Line
    } else {
        Reduction::Degenerate(points)
    }
}

// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Curve primitives: evaluation, subdivision and root finding
//! for quadratic, cubic and conic Bezier curves.

use arrayref::array_ref;
use arrayvec::ArrayVec;

use crate::{PathDirection, Point, Transform};

use crate::f32x2_t::f32x2;
use crate::floating_point::{NormalizedF32, NormalizedF32Exclusive, FLOAT_PI};
use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO, SCALAR_ROOT_2_OVER_2};

#[cfg(all(not(feature = "std"), feature = "no-std-float"))]
use crate::NoStdFloat;

/// The maximum number of conics needed to approximate an arc.
pub const MAX_CONICS_FOR_ARC: usize = 5;

/// The maximum power of two a conic can be split into quads with.
pub const MAX_CONIC_TO_QUAD_POW2: u8 = 5;

/// The default tolerance used when converting conics into quads.
pub const CONIC_TO_QUAD_TOLERANCE: f32 = 0.25;

/// Returns a buffer for root finders.
pub fn new_t_values() -> [NormalizedF32Exclusive; 3] {
    [NormalizedF32Exclusive::ANY; 3]
}

/// `(A * t + B) * t + C` in two dimensions.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, Debug)]
pub struct QuadCoeff {
    pub a: f32x2,
    pub b: f32x2,
    pub c: f32x2,
}

impl QuadCoeff {
    /// Computes the polynomial coefficients of a quadratic Bezier.
    pub fn from_points(points: &[Point; 3]) -> Self {
        let c = points[0].to_f32x2();
        let p1 = points[1].to_f32x2();
        let p2 = points[2].to_f32x2();
        let b = times_2(p1 - c);
        let a = p2 - times_2(p1) + c;

        QuadCoeff { a, b, c }
    }

    /// Evaluates the polynomial.
    pub fn eval(&self, t: f32x2) -> f32x2 {
        (self.a * t + self.b) * t + self.c
    }
}

/// `((A * t + B) * t + C) * t + D` in two dimensions.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, Debug)]
pub struct CubicCoeff {
    pub a: f32x2,
    pub b: f32x2,
    pub c: f32x2,
    pub d: f32x2,
}

impl CubicCoeff {
    /// Computes the polynomial coefficients of a cubic Bezier.
    pub fn from_points(points: &[Point; 4]) -> Self {
        let p0 = points[0].to_f32x2();
        let p1 = points[1].to_f32x2();
        let p2 = points[2].to_f32x2();
        let p3 = points[3].to_f32x2();
        let three = f32x2::splat(3.0);

        CubicCoeff {
            a: p3 + three * (p1 - p2) - p0,
            b: three * (p2 - times_2(p1) + p0),
            c: three * (p1 - p0),
            d: p0,
        }
    }

    /// Evaluates the polynomial.
    pub fn eval(&self, t: f32x2) -> f32x2 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }
}

/// A conic as a ratio of two quadratic polynomials.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, Debug)]
pub struct ConicCoeff {
    pub numer: QuadCoeff,
    pub denom: QuadCoeff,
}

impl ConicCoeff {
    /// Computes the rational polynomial coefficients of a conic.
    pub fn from_conic(conic: &Conic) -> Self {
        let p0 = conic.points[0].to_f32x2();
        let p1 = conic.points[1].to_f32x2();
        let p2 = conic.points[2].to_f32x2();
        let ww = f32x2::splat(conic.weight);

        let p1w = p1 * ww;
        let numer = QuadCoeff {
            a: p2 - times_2(p1w) + p0,
            b: times_2(p1w - p0),
            c: p0,
        };

        let c = f32x2::splat(1.0);
        let b = times_2(ww - c);
        let a = f32x2::default() - b;
        let denom = QuadCoeff { a, b, c };

        ConicCoeff { numer, denom }
    }

    /// Evaluates the conic at `t`.
    pub fn eval(&self, t: f32) -> f32x2 {
        let tt = f32x2::splat(t);
        let n = self.numer.eval(tt);
        let d = self.denom.eval(tt);
        n / d
    }
}

/// Evaluates a quad at `t`.
pub fn eval_quad_at(src: &[Point; 3], t: NormalizedF32) -> Point {
    Point::from_f32x2(QuadCoeff::from_points(src).eval(f32x2::splat(t.get())))
}

/// Evaluates a quad tangent at `t`.
pub fn eval_quad_tangent_at(src: &[Point; 3], tol: NormalizedF32) -> Point {
    // The derivative equation is 2(b - a +(a - 2b +c)t). This returns a
    // zero tangent vector when t is 0 or 1, and the control point is equal
    // to the end point. In this case, use the quad end points to compute the tangent.
    if (tol == NormalizedF32::ZERO && src[0] == src[1])
        || (tol == NormalizedF32::ONE && src[1] == src[2])
    {
        return src[2] - src[0];
    }

    let p0 = src[0].to_f32x2();
    let p1 = src[1].to_f32x2();
    let p2 = src[2].to_f32x2();

    let b = p1 - p0;
    let a = p2 - p1 - b;
    let t = a * f32x2::splat(tol.get()) + b;

    Point::from_f32x2(t + t)
}

/// Evaluates a cubic at `t`.
pub fn eval_cubic_pos_at(src: &[Point; 4], t: NormalizedF32) -> Point {
    Point::from_f32x2(CubicCoeff::from_points(src).eval(f32x2::splat(t.get())))
}

/// Evaluates a cubic tangent at `t`.
pub fn eval_cubic_tangent_at(src: &[Point; 4], t: NormalizedF32) -> Point {
    // The derivative equation returns a zero tangent vector when t is 0 or 1, and the
    // adjacent control point is equal to the end point. In this case, use the
    // next control point or the end points to compute the tangent.
    if (t.get() == 0.0 && src[0] == src[1]) || (t.get() == 1.0 && src[2] == src[3]) {
        let mut tangent = if t.get() == 0.0 {
            src[2] - src[0]
        } else {
            src[3] - src[1]
        };

        if tangent.x == 0.0 && tangent.y == 0.0 {
            tangent = src[3] - src[0];
        }

        tangent
    } else {
        eval_cubic_derivative(src, t)
    }
}

fn eval_cubic_derivative(src: &[Point; 4], t: NormalizedF32) -> Point {
    let p0 = src[0].to_f32x2();
    let p1 = src[1].to_f32x2();
    let p2 = src[2].to_f32x2();
    let p3 = src[3].to_f32x2();

    let coeff = QuadCoeff {
        a: p3 + f32x2::splat(3.0) * (p1 - p2) - p0,
        b: times_2(p2 - times_2(p1) + p0),
        c: p1 - p0,
    };

    Point::from_f32x2(coeff.eval(f32x2::splat(t.get())))
}

/// Splits a quad at `t`.
///
/// `dst` receives two quads sharing the middle point.
pub fn chop_quad_at(src: &[Point], t: NormalizedF32Exclusive, dst: &mut [Point; 5]) {
    let p0 = src[0].to_f32x2();
    let p1 = src[1].to_f32x2();
    let p2 = src[2].to_f32x2();
    let tt = f32x2::splat(t.get());

    let p01 = interp(p0, p1, tt);
    let p12 = interp(p1, p2, tt);

    dst[0] = Point::from_f32x2(p0);
    dst[1] = Point::from_f32x2(p01);
    dst[2] = Point::from_f32x2(interp(p01, p12, tt));
    dst[3] = Point::from_f32x2(p12);
    dst[4] = Point::from_f32x2(p2);
}

/// Splits a cubic at `t`.
///
/// `dst` must have space for at least 7 points.
pub fn chop_cubic_at2(src: &[Point; 4], t: NormalizedF32Exclusive, dst: &mut [Point]) {
    let p0 = src[0].to_f32x2();
    let p1 = src[1].to_f32x2();
    let p2 = src[2].to_f32x2();
    let p3 = src[3].to_f32x2();
    let tt = f32x2::splat(t.get());

    let ab = interp(p0, p1, tt);
    let bc = interp(p1, p2, tt);
    let cd = interp(p2, p3, tt);
    let abc = interp(ab, bc, tt);
    let bcd = interp(bc, cd, tt);
    let abcd = interp(abc, bcd, tt);

    dst[0] = Point::from_f32x2(p0);
    dst[1] = Point::from_f32x2(ab);
    dst[2] = Point::from_f32x2(abc);
    dst[3] = Point::from_f32x2(abcd);
    dst[4] = Point::from_f32x2(bcd);
    dst[5] = Point::from_f32x2(cd);
    dst[6] = Point::from_f32x2(p3);
}

// http://code.google.com/p/skia/issues/detail?id=32
//
// This test code would fail when we didn't check the return result of
// valid_unit_divide in SkChopCubicAt(... NormalizedF32Exclusives[], int roots). The reason is
// that after the first chop, the parameters to valid_unit_divide are equal
// (thanks to finite float precision and rounding in the subtracts). Thus
// even though the 2nd NormalizedF32Exclusive looks < 1.0, after we renormalize it, we end
// up with 1.0, hence the need to check and just return the last cubic as
// a degenerate clump of 4 points in the same place.
/// Splits a cubic at multiple increasing `t` values.
///
/// `dst` must have space for `3 * t_values.len() + 4` points.
pub fn chop_cubic_at(src: &[Point; 4], t_values: &[NormalizedF32Exclusive], dst: &mut [Point]) {
    if t_values.is_empty() {
        // nothing to chop
        dst[0..4].copy_from_slice(src);
    } else {
        let mut t = t_values[0];
        let mut tmp = [Point::zero(); 4];

        // Reduce the `src` lifetime, so we can use `src = &tmp` later.
        let mut src = src;

        let mut dst_offset = 0;
        for i in 0..t_values.len() {
            chop_cubic_at2(src, t, &mut dst[dst_offset..]);
            if i == t_values.len() - 1 {
                break;
            }

            dst_offset += 3;
            // have src point to the remaining cubic (after the chop)
            tmp.copy_from_slice(&dst[dst_offset..dst_offset + 4]);
            src = &tmp;

            // watch out in case the renormalized t isn't in range
            let n = valid_unit_divide(
                t_values[i + 1].get() - t_values[i].get(),
                1.0 - t_values[i].get(),
            );

            match n {
                Some(n) => t = n,
                None => {
                    // if we can't, just create a degenerate cubic
                    dst[dst_offset + 4] = src[3];
                    dst[dst_offset + 5] = src[3];
                    dst[dst_offset + 6] = src[3];
                    break;
                }
            }
        }
    }
}

/// Returns `numer / denom` when the result is inside the (0, 1) range.
pub fn valid_unit_divide(mut numer: f32, mut denom: f32) -> Option<NormalizedF32Exclusive> {
    if numer < 0.0 {
        numer = -numer;
        denom = -denom;
    }

    if denom == 0.0 || numer == 0.0 || numer >= denom {
        return None;
    }

    let r = numer / denom;
    NormalizedF32Exclusive::new(r)
}

/// Solves `A*t^2 + B*t + C = 0` for `t` in (0, 1).
///
/// From Numerical Recipes in C.
///
/// Q = -1/2 (B + sign(B) sqrt[B*B - 4*A*C])
/// x1 = Q / A
/// x2 = C / Q
///
/// Returns the number of roots. The roots are sorted and distinct.
pub fn find_unit_quad_roots(
    a: f32,
    b: f32,
    c: f32,
    roots: &mut [NormalizedF32Exclusive; 3],
) -> usize {
    if a == 0.0 {
        if let Some(r) = valid_unit_divide(-c, b) {
            roots[0] = r;
            return 1;
        } else {
            return 0;
        }
    }

    // use doubles so we don't overflow temporarily trying to compute R
    let mut dr = f64::from(b) * f64::from(b) - 4.0 * f64::from(a) * f64::from(c);
    if dr < 0.0 {
        return 0;
    }
    dr = dr.sqrt();
    let r = dr as f32;
    if !r.is_finite() {
        return 0;
    }

    let q = if b < 0.0 { -(b - r) / 2.0 } else { -(b + r) / 2.0 };

    let mut roots_offset = 0;
    if let Some(r) = valid_unit_divide(q, a) {
        roots[roots_offset] = r;
        roots_offset += 1;
    }

    if let Some(r) = valid_unit_divide(c, q) {
        roots[roots_offset] = r;
        roots_offset += 1;
    }

    if roots_offset == 2 {
        if roots[0].get() > roots[1].get() {
            roots.swap(0, 1);
        } else if roots[0] == roots[1] {
            // nearly-equal?
            roots_offset -= 1; // skip the double root
        }
    }

    roots_offset
}

/// Returns `t` of the maximum curvature point of a quad.
///
/// F(t)    = a (1 - t) ^ 2 + 2 b t (1 - t) + c t ^ 2
/// F'(t)   = 2 (b - a) + 2 (a - 2b + c) t
/// F''(t)  = 2 (a - 2b + c)
///
/// A = 2 (b - a)
/// B = 2 (a - 2b + c)
///
/// Maximum curvature for a quadratic means solving
/// Fx' Fx'' + Fy' Fy'' = 0
///
/// t = - (Ax Bx + Ay By) / (Bx ^ 2 + By ^ 2)
pub fn find_quad_max_curvature(src: &[Point; 3]) -> NormalizedF32 {
    let ax = src[1].x - src[0].x;
    let ay = src[1].y - src[0].y;
    let bx = src[0].x - src[1].x - src[1].x + src[2].x;
    let by = src[0].y - src[1].y - src[1].y + src[2].y;

    let mut numer = -(ax * bx + ay * by);
    let mut denom = bx * bx + by * by;
    if denom < 0.0 {
        numer = -numer;
        denom = -denom;
    }

    if numer <= 0.0 {
        return NormalizedF32::ZERO;
    }

    if numer >= denom {
        // Also catches denom=0
        return NormalizedF32::ONE;
    }

    let t = numer / denom;
    NormalizedF32::new_clamped(t)
}

/// Finds `t` values of the maximum curvature points of a cubic.
///
/// Returns sorted values in the [0, 1] range.
pub fn find_cubic_max_curvature<'a>(
    src: &[Point; 4],
    t_values: &'a mut [NormalizedF32; 3],
) -> &'a [NormalizedF32] {
    let mut coeff_x = formulate_f1_dot_f2(&[src[0].x, src[1].x, src[2].x, src[3].x]);
    let coeff_y = formulate_f1_dot_f2(&[src[0].y, src[1].y, src[2].y, src[3].y]);

    for i in 0..4 {
        coeff_x[i] += coeff_y[i];
    }

    let len = solve_cubic_poly(&coeff_x, t_values);
    &t_values[0..len]
}

// Looking for F' dot F'' == 0
//
// A = b - a
// B = c - 2b + a
// C = d - 3c + 3b - a
//
// F' = 3Ct^2 + 6Bt + 3A
// F'' = 6Ct + 6B
//
// F' dot F'' -> CCt^3 + 3BCt^2 + (2BB + CA)t + AB
fn formulate_f1_dot_f2(src: &[f32; 4]) -> [f32; 4] {
    let a = src[1] - src[0];
    let b = src[2] - 2.0 * src[1] + src[0];
    let c = src[3] + 3.0 * (src[1] - src[2]) - src[0];

    [c * c, 3.0 * b * c, 2.0 * b * b + c * a, a * b]
}

/// Solve coeff(t) == 0, returning the number of roots that lie withing 0 < t < 1.
/// coeff[0]t^3 + coeff[1]t^2 + coeff[2]t + coeff[3]
///
/// Eliminates repeated roots (so that all t_values are distinct, and are always
/// in increasing order.
fn solve_cubic_poly(coeff: &[f32; 4], t_values: &mut [NormalizedF32; 3]) -> usize {
    if coeff[0].is_nearly_zero() {
        // we're just a quadratic
        let mut tmp_t = new_t_values();
        let count = find_unit_quad_roots(coeff[1], coeff[2], coeff[3], &mut tmp_t);
        for i in 0..count {
            t_values[i] = tmp_t[i].to_normalized();
        }

        return count;
    }

    debug_assert!(coeff[0] != 0.0);

    let inva = coeff[0].invert();
    let a = coeff[1] * inva;
    let b = coeff[2] * inva;
    let c = coeff[3] * inva;

    let q = (a * a - b * 3.0) / 9.0;
    let r = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 54.0;

    let q3 = q * q * q;
    let r2_minus_q3 = r * r - q3;
    let adiv3 = a / 3.0;

    if r2_minus_q3 < 0.0 {
        // we have 3 real roots
        // the divide/root can, due to finite precisions, be slightly outside of -1...1
        let theta = (r / q3.sqrt()).bound(-1.0, 1.0).acos();
        let neg2_root_q = -2.0 * q.sqrt();

        t_values[0] = NormalizedF32::new_clamped(neg2_root_q * (theta / 3.0).cos() - adiv3);
        t_values[1] = NormalizedF32::new_clamped(
            neg2_root_q * ((theta + 2.0 * FLOAT_PI) / 3.0).cos() - adiv3,
        );
        t_values[2] = NormalizedF32::new_clamped(
            neg2_root_q * ((theta - 2.0 * FLOAT_PI) / 3.0).cos() - adiv3,
        );

        // now sort the roots
        sort_array3(t_values);
        collapse_duplicates3(t_values)
    } else {
        // we have 1 real root
        let mut a = r.abs() + r2_minus_q3.sqrt();
        a = scalar_cube_root(a);
        if r > 0.0 {
            a = -a;
        }

        if a != 0.0 {
            a += q / a;
        }

        t_values[0] = NormalizedF32::new_clamped(a - adiv3);
        1
    }
}

fn sort_array3(array: &mut [NormalizedF32; 3]) {
    if array[0].get() > array[1].get() {
        array.swap(0, 1);
    }

    if array[1].get() > array[2].get() {
        array.swap(1, 2);
    }

    if array[0].get() > array[1].get() {
        array.swap(0, 1);
    }
}

fn collapse_duplicates3(array: &mut [NormalizedF32; 3]) -> usize {
    let mut len = 3;

    if array[1] == array[2] {
        len = 2;
    }

    if array[0] == array[1] {
        for i in 0..len - 1 {
            array[i] = array[i + 1];
        }

        len -= 1;
    }

    len
}

fn scalar_cube_root(x: f32) -> f32 {
    x.powf(0.3333333)
}

/// Finds `t` values of the inflection points of a cubic.
///
/// http://www.faculty.idc.ac.il/arik/quality/appendixA.html
///
/// Inflection means that curvature is zero.
/// Curvature is [F' x F''] / [F'^3]
/// So we solve F'x X F''y - F'y X F''y == 0
/// After some canceling of the cubic term, we get
/// A = b - a
/// B = c - 2b + a
/// C = d - 3c + 3b - a
/// (BxCy - ByCx)t^2 + (AxCy - AyCx)t + AxBy - AyBx == 0
pub fn find_cubic_inflections<'a>(
    src: &[Point; 4],
    t_values: &'a mut [NormalizedF32Exclusive; 3],
) -> &'a [NormalizedF32Exclusive] {
    let ax = src[1].x - src[0].x;
    let ay = src[1].y - src[0].y;
    let bx = src[2].x - 2.0 * src[1].x + src[0].x;
    let by = src[2].y - 2.0 * src[1].y + src[0].y;
    let cx = src[3].x + 3.0 * (src[1].x - src[2].x) - src[0].x;
    let cy = src[3].y + 3.0 * (src[1].y - src[2].y) - src[0].y;

    let len = find_unit_quad_roots(
        bx * cy - by * cx,
        ax * cy - ay * cx,
        ax * by - ay * bx,
        t_values,
    );

    &t_values[0..len]
}

/// Finds `t` of a cubic cusp, if any.
pub fn find_cubic_cusp(src: &[Point; 4]) -> Option<NormalizedF32Exclusive> {
    // When the adjacent control point matches the end point, it behaves as if
    // the cubic has a cusp: there's a point of max curvature where the derivative
    // goes to zero. Ideally, this would be where t is zero or one, but math
    // error makes not so. It is not uncommon to create cubics this way; skip them.
    if src[0] == src[1] {
        return None;
    }

    if src[2] == src[3] {
        return None;
    }

    // Cubics only have a cusp if the line segments formed by the control and end points cross.
    // Detect crossing if line ends are on opposite sides of plane formed by the other line.
    if on_same_side(src, 0, 2) || on_same_side(src, 2, 0) {
        return None;
    }

    // Cubics may have multiple points of maximum curvature, although at most only
    // one is a cusp.
    let mut t_values = [NormalizedF32::ZERO; 3];
    let max_curvature = find_cubic_max_curvature(src, &mut t_values);
    for test_t in max_curvature {
        if 0.0 >= test_t.get() || test_t.get() >= 1.0 {
            // no need to consider max curvature on the end
            continue;
        }

        // A cusp is at the max curvature, and also has a derivative close to zero.
        // Choose the 'close to zero' meaning by comparing the derivative length
        // with the overall cubic size.
        let d_pt = eval_cubic_derivative(src, *test_t);
        let d_pt_magnitude = d_pt.length_sqd();
        let precision = calc_cubic_precision(src);
        if d_pt_magnitude < precision {
            // All three max curvature t values may be close to the cusp;
            // return the first one.
            return Some(NormalizedF32Exclusive::new_bounded(test_t.get()));
        }
    }

    None
}

// Returns true if both points src[testIndex], src[testIndex+1] are in the same half plane defined
// by the line segment src[lineIndex], src[lineIndex+1].
fn on_same_side(src: &[Point; 4], test_index: usize, line_index: usize) -> bool {
    let origin = src[line_index];
    let line = src[line_index + 1] - origin;
    let mut crosses = [0.0, 0.0];
    for index in 0..2 {
        let test_line = src[test_index + index] - origin;
        crosses[index] = line.cross(test_line);
    }

    crosses[0] * crosses[1] >= 0.0
}

// Returns a constant proportional to the dimensions of the cubic.
// Constant found through experimentation -- maybe there's a better way....
fn calc_cubic_precision(src: &[Point; 4]) -> f32 {
    (src[1].distance_to_sqd(src[0])
        + src[2].distance_to_sqd(src[1])
        + src[3].distance_to_sqd(src[2]))
        * 1e-8
}

/// Approximates a cubic with a single quad.
///
/// The error is not bounded. Callers are expected to split the cubic
/// first, usually with [`subdivide_cubic8`].
pub fn cubic_to_quadratic(src: &[Point; 4]) -> [Point; 3] {
    let p0 = src[0].to_f32x2();
    let p1 = src[1].to_f32x2();
    let p2 = src[2].to_f32x2();
    let p3 = src[3].to_f32x2();

    let ctrl = (f32x2::splat(3.0) * (p1 + p2) - p0 - p3) * f32x2::splat(0.25);
    [src[0], Point::from_f32x2(ctrl), src[3]]
}

/// Splits a cubic into 8 cubics of equal parameter span.
///
/// Each cubic occupies 4 consecutive points.
pub fn subdivide_cubic8(src: &[Point; 4]) -> [Point; 32] {
    let mut dst = [Point::zero(); 32];
    subdivide_cubic(src, 3, &mut dst);
    dst
}

fn subdivide_cubic(src: &[Point; 4], level: u8, dst: &mut [Point]) {
    if level == 0 {
        dst[0..4].copy_from_slice(src);
        return;
    }

    let mut tmp = [Point::zero(); 7];
    chop_cubic_at2(src, NormalizedF32Exclusive::HALF, &mut tmp);

    let (left, right) = dst.split_at_mut(dst.len() / 2);
    subdivide_cubic(array_ref![tmp, 0, 4], level - 1, left);
    subdivide_cubic(array_ref![tmp, 3, 4], level - 1, right);
}

/// A rational quadratic Bezier.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Conic {
    pub points: [Point; 3],
    pub weight: f32,
}

impl Conic {
    /// Creates a new conic.
    pub fn new(pt0: Point, pt1: Point, pt2: Point, weight: f32) -> Self {
        Conic {
            points: [pt0, pt1, pt2],
            weight,
        }
    }

    /// Creates a new conic from the first three points of a slice.
    pub fn from_points(points: &[Point], weight: f32) -> Self {
        Conic {
            points: [points[0], points[1], points[2]],
            weight,
        }
    }

    /// Evaluates the conic at `t`.
    pub fn eval(&self, t: f32) -> Point {
        debug_assert!(t >= 0.0 && t <= 1.0);
        Point::from_f32x2(ConicCoeff::from_conic(self).eval(t))
    }

    /// Evaluates the conic tangent at `t`.
    pub fn eval_tangent(&self, t: f32) -> Point {
        // The derivative equation returns a zero tangent vector when t is 0 or 1,
        // and the control point is equal to the end point.
        // In this case, use the conic endpoints to compute the tangent.
        if (t == 0.0 && self.points[0] == self.points[1])
            || (t == 1.0 && self.points[1] == self.points[2])
        {
            return self.points[2] - self.points[0];
        }

        let p0 = self.points[0].to_f32x2();
        let p1 = self.points[1].to_f32x2();
        let p2 = self.points[2].to_f32x2();
        let ww = f32x2::splat(self.weight);

        let p20 = p2 - p0;
        let p10 = p1 - p0;

        let c = ww * p10;
        let a = ww * p20 - p20;
        let b = p20 - c - c;

        Point::from_f32x2(QuadCoeff { a, b, c }.eval(f32x2::splat(t)))
    }

    /// Splits the conic in half.
    pub fn chop(&self) -> [Conic; 2] {
        let scale = f32x2::splat((1.0 + self.weight).invert());
        let new_w = subdivide_weight_value(self.weight);

        let p0 = self.points[0].to_f32x2();
        let p1 = self.points[1].to_f32x2();
        let p2 = self.points[2].to_f32x2();
        let ww = f32x2::splat(self.weight);

        let wp1 = ww * p1;
        let m = (p0 + times_2(wp1) + p2) * scale * f32x2::splat(0.5);
        let mut m_pt = Point::from_f32x2(m);
        if !m_pt.is_finite() {
            let w_d = self.weight as f64;
            let w_2 = w_d * 2.0;
            let scale_half = 1.0 / (1.0 + w_d) * 0.5;
            m_pt.x = ((self.points[0].x as f64
                + w_2 * self.points[1].x as f64
                + self.points[2].x as f64)
                * scale_half) as f32;

            m_pt.y = ((self.points[0].y as f64
                + w_2 * self.points[1].y as f64
                + self.points[2].y as f64)
                * scale_half) as f32;
        }

        [
            Conic {
                points: [self.points[0], Point::from_f32x2((p0 + wp1) * scale), m_pt],
                weight: new_w,
            },
            Conic {
                points: [m_pt, Point::from_f32x2((wp1 + p2) * scale), self.points[2]],
                weight: new_w,
            },
        ]
    }

    /// Splits the conic at `t`.
    ///
    /// Returns `None` when the result is not finite.
    pub fn chop_at(&self, t: f32) -> Option<[Conic; 2]> {
        // Map to homogeneous coordinates.
        let w = self.weight;
        let src = [
            [self.points[0].x, self.points[0].y, 1.0],
            [self.points[1].x * w, self.points[1].y * w, w],
            [self.points[2].x, self.points[2].y, 1.0],
        ];

        let mut tmp = [[0.0f32; 3]; 3];
        for c in 0..3 {
            let ab = interp_f32(src[0][c], src[1][c], t);
            let bc = interp_f32(src[1][c], src[2][c], t);
            tmp[0][c] = ab;
            tmp[1][c] = interp_f32(ab, bc, t);
            tmp[2][c] = bc;
        }

        let project_down = |p: [f32; 3]| Point::from_xy(p[0] / p[2], p[1] / p[2]);

        // to put in "standard form", where w0 and w2 are both 1, we compute the
        // new w1 as sqrt(w1*w1/w0*w2)
        // or
        // w1 /= sqrt(w0*w2)
        //
        // However, in our case, we know that for dst[0]:
        //     w0 == 1, and for dst[1], w2 == 1
        let root = tmp[1][2].sqrt();
        let mid = project_down(tmp[1]);

        let dst = [
            Conic::new(self.points[0], project_down(tmp[0]), mid, tmp[0][2] / root),
            Conic::new(mid, project_down(tmp[2]), self.points[2], tmp[2][2] / root),
        ];

        let is_finite = dst.iter().all(|conic| {
            conic.weight.is_finite() && conic.points.iter().all(|p| p.is_finite())
        });

        if is_finite {
            Some(dst)
        } else {
            None
        }
    }

    /// Extracts the part of the conic between `t1` and `t2`.
    pub fn chop_at_range(&self, t1: f32, t2: f32) -> Conic {
        if t1 == 0.0 || t2 == 1.0 {
            if t1 == 0.0 && t2 == 1.0 {
                return *self;
            }

            if let Some(pair) = self.chop_at(if t1 != 0.0 { t1 } else { t2 }) {
                return if t1 != 0.0 { pair[1] } else { pair[0] };
            }
        }

        let coeff = ConicCoeff::from_conic(self);

        let tt1 = f32x2::splat(t1);
        let a_xy = coeff.numer.eval(tt1);
        let a_zz = coeff.denom.eval(tt1);

        let mid_tt = f32x2::splat((t1 + t2) / 2.0);
        let d_xy = coeff.numer.eval(mid_tt);
        let d_zz = coeff.denom.eval(mid_tt);

        let tt2 = f32x2::splat(t2);
        let c_xy = coeff.numer.eval(tt2);
        let c_zz = coeff.denom.eval(tt2);

        let b_xy = times_2(d_xy) - (a_xy + c_xy) * f32x2::splat(0.5);
        let b_zz = times_2(d_zz) - (a_zz + c_zz) * f32x2::splat(0.5);

        Conic {
            points: [
                Point::from_f32x2(a_xy / a_zz),
                Point::from_f32x2(b_xy / b_zz),
                Point::from_f32x2(c_xy / c_zz),
            ],
            weight: b_zz.x() / (a_zz.x() * c_zz.x()).sqrt(),
        }
    }

    /// Returns the power of two number of quads needed to approximate
    /// the conic within `tolerance`.
    pub fn compute_quad_pow2(&self, tolerance: f32) -> Option<u8> {
        if tolerance < 0.0 || !tolerance.is_finite() {
            return None;
        }

        if !self.points.iter().all(|p| p.is_finite()) {
            return None;
        }

        let a = self.weight - 1.0;
        let k = a / (4.0 * (2.0 + a));
        let x = k * (self.points[0].x - 2.0 * self.points[1].x + self.points[2].x);
        let y = k * (self.points[0].y - 2.0 * self.points[1].y + self.points[2].y);

        let mut error = (x * x + y * y).sqrt();
        let mut pow2 = 0;
        for _ in 0..MAX_CONIC_TO_QUAD_POW2 {
            if error <= tolerance {
                break;
            }

            error *= 0.25;
            pow2 += 1;
        }

        Some(pow2)
    }

    /// Splits the conic into `2^pow2` quads.
    ///
    /// `points` must have space for `2 * 2^pow2 + 1` points.
    /// Quads share end points: `0 1 2`, `2 3 4` and so on.
    /// Returns the number of quads.
    pub fn chop_into_quads_pow2(&self, pow2: u8, points: &mut [Point]) -> u8 {
        debug_assert!(pow2 <= MAX_CONIC_TO_QUAD_POW2);

        points[0] = self.points[0];

        let mut pow2 = pow2;
        let mut is_line = false;
        if pow2 == MAX_CONIC_TO_QUAD_POW2 {
            let dst = self.chop();
            // check to see if the first chop generates a pair of lines
            if dst[0].points[1].almost_equal(dst[0].points[2])
                && dst[1].points[1].almost_equal(dst[1].points[2])
            {
                // set ctrl == end to make lines
                points[1] = dst[0].points[1];
                points[2] = dst[0].points[1];
                points[3] = dst[0].points[1];
                points[4] = dst[1].points[2];
                pow2 = 1;
                is_line = true;
            }
        }

        if !is_line {
            subdivide(self, &mut points[1..], pow2);
        }

        let quad_count = 1 << pow2;
        let pt_count = 2 * quad_count + 1;
        if points.iter().take(pt_count).any(|p| !p.is_finite()) {
            // if we generated a non-finite, pin ourselves to the middle of the hull,
            // as our first and last are already on the first/last pts of the hull.
            for p in points.iter_mut().take(pt_count - 1).skip(1) {
                *p = self.points[1];
            }
        }

        1 << pow2
    }

    /// Builds up to 5 conics approximating an arc between two unit vectors.
    ///
    /// Each conic covers at most a quarter of a circle.
    /// Returns an empty list when the arc is degenerate.
    pub fn build_unit_arc(
        u_start: Point,
        u_stop: Point,
        dir: PathDirection,
        user_transform: Transform,
    ) -> ArrayVec<Conic, MAX_CONICS_FOR_ARC> {
        let mut conics = ArrayVec::new();

        // rotate by x,y so that u_start is (1.0)
        let x = u_start.dot(u_stop);
        let mut y = u_start.cross(u_stop);

        let abs_y = y.abs();

        // check for (effectively) coincident vectors
        // this can happen if our angle is nearly 0 or nearly 180 (y == 0)
        // ... we use the dot-prod to distinguish between 0 and 180 (x > 0)
        if abs_y <= SCALAR_NEARLY_ZERO
            && x > 0.0
            && ((y >= 0.0 && dir == PathDirection::CW) || (y <= 0.0 && dir == PathDirection::CCW))
        {
            return conics;
        }

        if dir == PathDirection::CCW {
            y = -y;
        }

        // We decide to use 1-conic per quadrant of a circle. What quadrant does [xy] lie in?
        //      0 == [0  .. 90)
        //      1 == [90 ..180)
        //      2 == [180..270)
        //      3 == [270..360)
        //
        let mut quadrant = 0;
        if y == 0.0 {
            quadrant = 2; // 180
            debug_assert!((x + 1.0) <= SCALAR_NEARLY_ZERO);
        } else if x == 0.0 {
            debug_assert!(abs_y - 1.0 <= SCALAR_NEARLY_ZERO);
            quadrant = if y > 0.0 { 1 } else { 3 }; // 90 / 270
        } else {
            if y < 0.0 {
                quadrant += 2;
            }

            if (x < 0.0) != (y < 0.0) {
                quadrant += 1;
            }
        }

        let quadrant_points = [
            Point::from_xy(1.0, 0.0),
            Point::from_xy(1.0, 1.0),
            Point::from_xy(0.0, 1.0),
            Point::from_xy(-1.0, 1.0),
            Point::from_xy(-1.0, 0.0),
            Point::from_xy(-1.0, -1.0),
            Point::from_xy(0.0, -1.0),
            Point::from_xy(1.0, -1.0),
        ];

        const QUADRANT_WEIGHT: f32 = SCALAR_ROOT_2_OVER_2;

        for i in 0..quadrant {
            conics.push(Conic::from_points(&quadrant_points[i * 2..], QUADRANT_WEIGHT));
        }

        // Now compute any remaing (sub-90-degree) arc for the last conic
        let final_pt = Point::from_xy(x, y);
        let last_q = quadrant_points[quadrant * 2]; // will already be a unit-vector
        let dot = last_q.dot(final_pt);
        debug_assert!(0.0 <= dot && dot <= 1.0 + SCALAR_NEARLY_ZERO);

        if dot < 1.0 {
            let mut off_curve = Point::from_xy(last_q.x + x, last_q.y + y);
            // compute the bisector vector, and then rescale to be the off-curve point.
            // we compute its length from cos(theta/2) = length / 1, using half-angle identity we get
            // length = sqrt(2 / (1 + cos(theta)). We already have cos() when to computed the dot.
            // This is nice, since our computed weight is cos(theta/2) as well!
            let cos_theta_over_2 = ((1.0 + dot) / 2.0).sqrt();
            off_curve.set_length(cos_theta_over_2.invert());
            if !last_q.almost_equal(off_curve) {
                conics.push(Conic::new(last_q, off_curve, final_pt, cos_theta_over_2));
            }
        }

        // now handle counter-clockwise and the initial unitStart rotation
        let mut transform = Transform::from_sin_cos(u_start.y, u_start.x);
        if dir == PathDirection::CCW {
            transform = transform.pre_scale(1.0, -1.0);
        }

        transform = transform.post_concat(user_transform);

        for conic in &mut conics {
            transform.map_points(&mut conic.points);
        }

        conics
    }
}

fn subdivide_weight_value(w: f32) -> f32 {
    (0.5 + w * 0.5).sqrt()
}

fn subdivide<'a>(src: &Conic, points: &'a mut [Point], level: u8) -> &'a mut [Point] {
    if level == 0 {
        points[0] = src.points[1];
        points[1] = src.points[2];
        &mut points[2..]
    } else {
        let mut dst = src.chop();

        let start_y = src.points[0].y;
        let end_y = src.points[2].y;
        if between(start_y, src.points[1].y, end_y) {
            // If the input is monotonic and the output is not, the scan converter hangs.
            // Ensure that the chopped conics maintain their y-order.
            let mid_y = dst[0].points[2].y;
            if !between(start_y, mid_y, end_y) {
                // If the computed midpoint is outside the ends, move it to the closer one.
                let closer_y = if (mid_y - start_y).abs() < (mid_y - end_y).abs() {
                    start_y
                } else {
                    end_y
                };
                dst[0].points[2].y = closer_y;
                dst[1].points[0].y = closer_y;
            }

            if !between(start_y, dst[0].points[1].y, dst[0].points[2].y) {
                // If the 1st control is not between the start and end, put it at the start.
                // This also reduces the quad to a line.
                dst[0].points[1].y = start_y;
            }

            if !between(dst[1].points[0].y, dst[1].points[1].y, end_y) {
                // If the 2nd control is not between the start and end, put it at the end.
                // This also reduces the quad to a line.
                dst[1].points[1].y = end_y;
            }
        }

        let level = level - 1;
        let points = subdivide(&dst[0], points, level);
        subdivide(&dst[1], points, level)
    }
}

// This was originally developed and tested for pins, but now uses max_curvature
// as well. "between" being either the original point or the next one.
fn between(a: f32, b: f32, c: f32) -> bool {
    (a - b) * (c - b) <= 0.0
}

/// A conic converted into quads.
#[derive(Copy, Clone, Debug)]
pub struct AutoConicToQuads {
    /// Quad points. Quads share end points: `0 1 2`, `2 3 4` and so on.
    pub points: [Point; 65],
    /// The number of quads.
    pub len: u8,
}

impl AutoConicToQuads {
    /// Converts a conic into quads using the default tolerance.
    pub fn compute(pt0: Point, pt1: Point, pt2: Point, weight: f32) -> Option<Self> {
        let conic = Conic::new(pt0, pt1, pt2, weight);
        let pow2 = conic.compute_quad_pow2(CONIC_TO_QUAD_TOLERANCE)?;
        let mut points = [Point::zero(); 65];
        let len = conic.chop_into_quads_pow2(pow2, &mut points);
        Some(AutoConicToQuads { points, len })
    }
}

fn interp(v0: f32x2, v1: f32x2, t: f32x2) -> f32x2 {
    v0 + (v1 - v0) * t
}

fn interp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn times_2(value: f32x2) -> f32x2 {
    value + value
}

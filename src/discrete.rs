// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// Based on SkDiscretePathEffect.

use skity_path::{
    Path, PathBuilder, PathMeasure, Point, SaturateRound, SCALAR_NEARLY_ZERO,
};

use crate::path_effect::PathEffect;

/// The maximum number of pieces a single contour is cut into.
pub const MAX_DISCRETE_SEGMENTS: i32 = 100_000;

/// A path effect that chops a path into short segments and randomly displaces them.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DiscretePathEffect {
    seg_length: f32,
    deviation: f32,
    seed_assist: u32,
}

impl DiscretePathEffect {
    /// Creates a new discrete effect.
    ///
    /// `seg_length` is the length of a single piece, `deviation` is the maximum
    /// perpendicular displacement and `seed_assist` alters the jitter sequence.
    ///
    /// Returns `None` when values are not finite or `seg_length` is nearly zero.
    pub fn new(seg_length: f32, deviation: f32, seed_assist: u32) -> Option<Self> {
        if !seg_length.is_finite() || !deviation.is_finite() {
            return None;
        }

        if seg_length <= SCALAR_NEARLY_ZERO {
            return None;
        }

        Some(DiscretePathEffect {
            seg_length,
            deviation,
            seed_assist,
        })
    }

    /// Returns the piece length.
    pub fn seg_length(&self) -> f32 {
        self.seg_length
    }

    /// Returns the maximum displacement.
    pub fn deviation(&self) -> f32 {
        self.deviation
    }
}

impl PathEffect for DiscretePathEffect {
    fn filter_path(&self, dst: &mut PathBuilder, src: &Path, is_stroke: bool) -> bool {
        let do_fill = !is_stroke;

        let mut measure = PathMeasure::new(src, do_fill, 1.0);

        // Use the path length to seed, so the same path gets the same jitter.
        let seed = self.seed_assist ^ i32::saturate_round(measure.length()) as u32;
        let mut rand = LcgRandom::new(seed ^ ((seed << 16) | (seed >> 16)));

        while let Some(contour) = measure.contour() {
            let length = contour.length();
            if self.seg_length * (2 + do_fill as i32) as f32 > length {
                contour.segment(0.0, length, true, dst);
            } else {
                let mut n = i32::saturate_round(length / self.seg_length);
                n = n.min(MAX_DISCRETE_SEGMENTS);
                let delta = length / n as f32;
                let mut distance = 0.0;

                if contour.is_closed() {
                    n -= 1;
                    distance += delta / 2.0;
                }

                if let Some((mut p, v)) = contour.pos_tan(distance) {
                    perturb(&mut p, v, rand.next_signed_unit() * self.deviation);
                    dst.move_to(p.x, p.y);
                }

                while n > 0 {
                    n -= 1;
                    distance += delta;
                    if let Some((mut p, v)) = contour.pos_tan(distance) {
                        perturb(&mut p, v, rand.next_signed_unit() * self.deviation);
                        dst.line_to(p.x, p.y);
                    }
                }

                if contour.is_closed() {
                    dst.close();
                }
            }

            measure.next_contour();
        }

        true
    }
}

fn perturb(p: &mut Point, tangent: Point, scale: f32) {
    let mut normal = tangent;
    normal.rotate_ccw();
    normal.set_length(scale);
    *p += normal;
}

// SkRandom subset.
//
// See "Numerical Recipes in C", 1992 page 284 for these constants.
struct LcgRandom {
    seed: u32,
}

impl LcgRandom {
    const MUL: u32 = 1664525;
    const ADD: u32 = 1013904223;

    fn new(seed: u32) -> Self {
        LcgRandom { seed }
    }

    fn next_u(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(Self::MUL).wrapping_add(Self::ADD);
        self.seed
    }

    // A fixed point value in -1..1.
    fn next_signed_unit(&mut self) -> f32 {
        let fixed = (self.next_u() as i32) >> 15;
        fixed as f32 / 65536.0
    }
}

// Copyright 2014 Google Inc.
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// This module is a mix of SkDashPath and SkDashPathEffect.

use alloc::vec::Vec;

use skity_path::{FiniteF32, NonZeroPositiveF32, Path, PathBuilder, PathMeasure};

use crate::path_effect::{DashInfo, PathEffect};

/// The maximum number of dashes a single path can produce.
///
/// The path length / dash length ratio may be arbitrarily large, which would
/// exert significant memory pressure while building the filtered path.
/// At 2 verbs per segment this caps the dash overhead at roughly 17MB per path.
pub const MAX_DASH_COUNT: usize = 1_000_000;

/// A dashing path effect.
///
/// Contains an array of pairs, where the first number indicates an "on" interval
/// and the second one indicates an "off" interval;
/// a dash offset value and internal properties.
///
/// # Guarantees
///
/// - The dash array always have an even number of values.
/// - All dash array values are finite and >= 0.
/// - There is at least two dash array values.
/// - The sum of all dash array values is positive and finite.
/// - Dash offset is finite and is in `0..interval_len`.
#[derive(Clone, PartialEq, Debug)]
pub struct DashPathEffect {
    array: Vec<f32>,
    offset: f32,
    interval_len: NonZeroPositiveF32,
    first_len: f32,
    first_index: usize,
}

impl DashPathEffect {
    /// Creates a new dash effect.
    ///
    /// Returns `None` when intervals are empty, odd, negative or not finite,
    /// when their sum is not positive or when the phase is not finite.
    pub fn new(intervals: Vec<f32>, phase: f32) -> Option<Self> {
        let phase = FiniteF32::new(phase)?;

        if intervals.len() < 2 || intervals.len() % 2 != 0 {
            return None;
        }

        if intervals.iter().any(|n| !n.is_finite() || *n < 0.0) {
            return None;
        }

        let interval_len: f32 = intervals.iter().sum();
        let interval_len = NonZeroPositiveF32::new(interval_len)?;

        let phase = adjust_dash_offset(phase.get(), interval_len.get());
        debug_assert!(phase >= 0.0);
        debug_assert!(phase < interval_len.get());

        let (first_len, first_index) = find_first_interval(&intervals, phase);
        debug_assert!(first_len >= 0.0);
        debug_assert!(first_index < intervals.len());

        Some(DashPathEffect {
            array: intervals,
            offset: phase,
            interval_len,
            first_len,
            first_index,
        })
    }

    /// Returns dash intervals.
    pub fn intervals(&self) -> &[f32] {
        &self.array
    }

    /// Returns the normalized phase.
    pub fn phase(&self) -> f32 {
        self.offset
    }
}

impl PathEffect for DashPathEffect {
    fn filter_path(&self, dst: &mut PathBuilder, src: &Path, is_stroke: bool) -> bool {
        // Dashing a filled path makes no sense.
        if !is_stroke {
            return false;
        }

        if dash_impl(src, self, dst) {
            true
        } else {
            dst.clear();
            false
        }
    }

    fn as_a_dash(&self) -> Option<DashInfo> {
        Some(DashInfo {
            intervals: self.array.clone(),
            phase: self.offset,
        })
    }
}

// Adjust phase to be between 0 and len, "flipping" phase if negative.
// e.g., if len is 100, then phase of -20 (or -120) is equivalent to 80.
fn adjust_dash_offset(mut offset: f32, len: f32) -> f32 {
    if offset < 0.0 {
        offset = -offset;
        if offset > len {
            offset %= len;
        }

        offset = len - offset;

        // Due to finite precision, it's possible that phase == len,
        // even after the subtract (if len >>> phase), so fix that here.
        debug_assert!(offset <= len);
        if offset == len {
            offset = 0.0;
        }

        offset
    } else if offset >= len {
        offset % len
    } else {
        offset
    }
}

fn find_first_interval(dash_array: &[f32], mut dash_offset: f32) -> (f32, usize) {
    for (i, gap) in dash_array.iter().copied().enumerate() {
        if dash_offset > gap || (dash_offset == gap && gap != 0.0) {
            dash_offset -= gap;
        } else {
            return (gap - dash_offset, i);
        }
    }

    // If we get here, phase "appears" to be larger than our length. This
    // shouldn't happen with perfect precision, but we can accumulate errors
    // during the initial length computation (rounding can make our sum be too
    // big or too small. In that event, we just have to eat the error here.
    (dash_array[0], 0)
}

fn dash_impl(src: &Path, dash: &DashPathEffect, dst: &mut PathBuilder) -> bool {
    // We do not support the `cull_path` branch here.
    // Skia has a lot of code for cases when a path contains only a single zero-length line
    // or when a path is a rect.

    fn is_even(x: usize) -> bool {
        x % 2 == 0
    }

    let mut measure = PathMeasure::new(src, false, 1.0);
    let mut dash_count = 0.0;
    while let Some(contour) = measure.contour() {
        let mut skip_first_segment = contour.is_closed();
        let mut added_segment = false;
        let length = contour.length();
        let mut index = dash.first_index;

        dash_count += length * (dash.array.len() >> 1) as f32 / dash.interval_len.get();
        if dash_count > MAX_DASH_COUNT as f32 {
            log::warn!("dash count limit reached, dashing is skipped");
            return false;
        }

        // Using double precision to avoid looping indefinitely due to single precision rounding
        // (for extreme path_length/dash_length ratios).
        let mut distance = 0.0f64;
        let mut d_len = dash.first_len as f64;

        while distance < length as f64 {
            debug_assert!(d_len >= 0.0);
            added_segment = false;
            if is_even(index) && !skip_first_segment {
                added_segment = true;
                contour.segment(distance as f32, (distance + d_len) as f32, true, dst);
            }

            distance += d_len;

            // clear this so we only respect it the first time around
            skip_first_segment = false;

            // wrap around our intervals array if necessary
            index += 1;
            debug_assert!(index <= dash.array.len());
            if index == dash.array.len() {
                index = 0;
            }

            // fetch our next d_len
            d_len = dash.array[index] as f64;
        }

        // extend if we ended on a segment and we need to join up with the (skipped) initial segment
        if contour.is_closed() && is_even(dash.first_index) && dash.first_len >= 0.0 {
            contour.segment(0.0, dash.first_len, !added_segment, dst);
        }

        measure.next_contour();
    }

    true
}

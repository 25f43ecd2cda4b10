// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use alloc::vec::Vec;

use skity_path::{Path, PathBuilder};

/// A dash pattern description.
#[derive(Clone, PartialEq, Debug)]
pub struct DashInfo {
    /// Alternating "on" and "off" lengths.
    pub intervals: Vec<f32>,
    /// The pattern offset, wrapped into `0..intervals_sum`.
    pub phase: f32,
}

/// A path rewriting step applied before stroking.
pub trait PathEffect {
    /// Writes the filtered `src` into `dst`.
    ///
    /// `is_stroke` tells whether the result will be stroked or filled.
    ///
    /// Returns `false` when the effect does not apply. `dst` should be ignored in that case.
    fn filter_path(&self, dst: &mut PathBuilder, src: &Path, is_stroke: bool) -> bool;

    /// Returns the dash pattern if the effect can be represented by one.
    fn as_a_dash(&self) -> Option<DashInfo> {
        None
    }
}

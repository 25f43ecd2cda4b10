// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

// Right now, there are no visible benefits of using SIMD for f32x2. So we don't.
/// A pair of f32 numbers.
///
/// Mainly for internal use. Do not rely on it!
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct f32x2(pub [f32; 2]);

impl f32x2 {
    /// Creates a new pair.
    pub fn new(a: f32, b: f32) -> f32x2 {
        f32x2([a, b])
    }

    /// Creates a new pair from a single value.
    pub fn splat(x: f32) -> f32x2 {
        f32x2([x, x])
    }

    /// Returns the first value.
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    /// Returns the second value.
    pub fn y(&self) -> f32 {
        self.0[1]
    }
}

impl core::ops::Add<f32x2> for f32x2 {
    type Output = f32x2;

    fn add(self, other: f32x2) -> f32x2 {
        f32x2([self.x() + other.x(), self.y() + other.y()])
    }
}

impl core::ops::Sub<f32x2> for f32x2 {
    type Output = f32x2;

    fn sub(self, other: f32x2) -> f32x2 {
        f32x2([self.x() - other.x(), self.y() - other.y()])
    }
}

impl core::ops::Mul<f32x2> for f32x2 {
    type Output = f32x2;

    fn mul(self, other: f32x2) -> f32x2 {
        f32x2([self.x() * other.x(), self.y() * other.y()])
    }
}

impl core::ops::Div<f32x2> for f32x2 {
    type Output = f32x2;

    fn div(self, other: f32x2) -> f32x2 {
        f32x2([self.x() / other.x(), self.y() / other.y()])
    }
}

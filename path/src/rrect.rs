// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Point, Rect};

use crate::scalar::Scalar;

/// A rounded rectangle kind.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RRectType {
    /// Zero width or height.
    Empty,
    /// All radii are zero.
    Rect,
    /// All radii are at least half of the rect's size.
    Oval,
    /// All corners share the same radii.
    Simple,
    /// Corners have different radii.
    Complex,
}

/// A rectangle with rounded corners.
///
/// Corner radii are stored clockwise, starting from the upper-left one.
/// Radii never exceed the rect: when a pair of adjacent radii is too big,
/// all radii are scaled down by the same factor.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RRect {
    rect: Rect,
    radii: [Point; 4],
    kind: RRectType,
}

impl RRect {
    /// Creates a rounded rectangle with square corners.
    pub fn from_rect(rect: Rect) -> Self {
        RRect {
            rect,
            radii: [Point::zero(); 4],
            kind: if rect.is_empty() {
                RRectType::Empty
            } else {
                RRectType::Rect
            },
        }
    }

    /// Creates a rounded rectangle with the same radii for each corner.
    ///
    /// Returns `None` when radii are not finite.
    pub fn from_rect_xy(rect: Rect, rx: f32, ry: f32) -> Option<Self> {
        RRect::from_rect_radii(rect, [Point::from_xy(rx, ry); 4])
    }

    /// Creates an oval inscribed into the rect.
    pub fn from_oval(oval: Rect) -> Self {
        let rx = oval.width().half();
        let ry = oval.height().half();
        if rx == 0.0 || ry == 0.0 {
            return RRect::from_rect(oval);
        }

        RRect {
            rect: oval,
            radii: [Point::from_xy(rx, ry); 4],
            kind: RRectType::Oval,
        }
    }

    /// Creates a rounded rectangle with per-corner radii.
    ///
    /// Radii order: upper-left, upper-right, lower-right, lower-left.
    /// Negative radii are treated as zero. A corner with one zero radius is square.
    ///
    /// Returns `None` when radii are not finite.
    pub fn from_rect_radii(rect: Rect, radii: [Point; 4]) -> Option<Self> {
        if rect.is_empty() {
            return Some(RRect::from_rect(rect));
        }

        if !radii.iter().all(|r| r.is_finite()) {
            return None;
        }

        let mut radii = radii;
        for r in &mut radii {
            if r.x <= 0.0 || r.y <= 0.0 {
                *r = Point::zero();
            }
        }

        let mut rrect = RRect {
            rect,
            radii,
            kind: RRectType::Complex,
        };
        rrect.scale_radii();
        rrect.compute_type();
        Some(rrect)
    }

    /// Returns the bounding rect.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns corner radii.
    pub fn radii(&self) -> &[Point; 4] {
        &self.radii
    }

    /// Returns the rounded rect kind.
    pub fn kind(&self) -> RRectType {
        self.kind
    }

    /// Returns the 8 points where corner arcs meet the rect edges,
    /// clockwise, starting from the upper-left corner's top point.
    pub(crate) fn arc_points(&self) -> [Point; 8] {
        let l = self.rect.left();
        let t = self.rect.top();
        let r = self.rect.right();
        let b = self.rect.bottom();
        let [ul, ur, lr, ll] = self.radii;
        [
            Point::from_xy(l + ul.x, t),
            Point::from_xy(r - ur.x, t),
            Point::from_xy(r, t + ur.y),
            Point::from_xy(r, b - lr.y),
            Point::from_xy(r - lr.x, b),
            Point::from_xy(l + ll.x, b),
            Point::from_xy(l, b - ll.y),
            Point::from_xy(l, t + ul.y),
        ]
    }

    fn scale_radii(&mut self) {
        let width = self.rect.width() as f64;
        let height = self.rect.height() as f64;

        // Each side shares two radii.
        let mut scale = 1.0f64;
        let sides = [
            (self.radii[0].x, self.radii[1].x, width),
            (self.radii[1].y, self.radii[2].y, height),
            (self.radii[2].x, self.radii[3].x, width),
            (self.radii[3].y, self.radii[0].y, height),
        ];
        for (a, b, limit) in sides.iter() {
            let sum = *a as f64 + *b as f64;
            if sum > *limit {
                scale = scale.min(limit / sum);
            }
        }

        if scale < 1.0 {
            for r in &mut self.radii {
                r.x = (r.x as f64 * scale) as f32;
                r.y = (r.y as f64 * scale) as f32;
            }
        }

        for r in &mut self.radii {
            r.x = r.x.min(self.rect.width());
            r.y = r.y.min(self.rect.height());
        }
    }

    fn compute_type(&mut self) {
        if self.rect.is_empty() {
            self.kind = RRectType::Empty;
            return;
        }

        let first = self.radii[0];
        let all_same = self.radii.iter().all(|r| *r == first);
        let all_zero = self.radii.iter().all(|r| r.x == 0.0 && r.y == 0.0);

        self.kind = if all_zero {
            RRectType::Rect
        } else if all_same {
            if first.x >= self.rect.width().half() && first.y >= self.rect.height().half() {
                RRectType::Oval
            } else {
                RRectType::Simple
            }
        } else {
            RRectType::Complex
        };
    }
}

// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/*!
`skity-geometry` is a 2D vector path geometry kernel.

It re-exports the path kernel from `skity-path` (paths, conics, contour measuring
and stroking) and adds path effects that rewrite a path before stroking.
*/

#![no_std]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod dash;
mod discrete;
mod path_effect;

pub use skity_path::*;

pub use dash::{DashPathEffect, MAX_DASH_COUNT};
pub use discrete::{DiscretePathEffect, MAX_DISCRETE_SEGMENTS};
pub use path_effect::{DashInfo, PathEffect};

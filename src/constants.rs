// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.
 */

pub use std::f64::consts::{PI, TAU};

pub use marlu::constants::VEL_C;

/// The default accuracy requested from the external gridding library.
pub const DEFAULT_EPSILON: f64 = 1e-4;

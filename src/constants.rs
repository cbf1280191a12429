// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `skysolve` should do as many
calculations as possible in double precision.
 */

pub use std::f64::consts::{FRAC_PI_2, LN_2, PI, TAU};

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299_792_458.0;

/// The default maximum number of major cycles performed by the solver.
pub const DEFAULT_MAX_MAJOR_CYCLES: usize = 5;

/// The default stopping threshold of the solver \[Jy\]. A value of 0 means
/// that all major cycles are run (unless the residual vanishes).
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// The solver stops when the peak residual is below the threshold multiplied
/// by this factor.
pub const DEFAULT_THRESHOLD_SLACK: f64 = 1.1;

/// The default CLEAN loop gain.
pub const DEFAULT_CLEAN_GAIN: f64 = 0.1;

/// The default maximum number of CLEAN (minor-cycle) iterations per major
/// cycle.
pub const DEFAULT_CLEAN_MAX_ITERATIONS: usize = 100;

/// The default CLEAN stopping threshold \[Jy\].
pub const DEFAULT_CLEAN_THRESHOLD: f64 = 0.0;

/// The latitude of the Murchison Widefield Array \[degrees\]. Used when an
/// observation doesn't specify one.
pub const DEFAULT_LATITUDE_DEG: f64 = -26.703319405555554;

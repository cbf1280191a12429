// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Radio-interferometer geometry, point-source visibility simulation and a
major-cycle sky-model solver.

Antenna positions and hour angles become baselines ([`coord`]); sky-model
components become visibilities ([`simulate`]); and [`solve`] iterates
prediction ([`model`]), imaging and CLEAN ([`deconv`]) to recover a sky model
([`skymodel`]) from visibilities ([`vis`]).
 */

mod cli;
pub mod constants;
pub mod coord;
pub mod deconv;
pub mod model;
pub mod simulate;
pub mod skymodel;
pub mod solve;
pub mod vis;

// Re-exports.
pub use cli::{Skysolve, SkysolveError};

/// Complex double-precision numbers.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;

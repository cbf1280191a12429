// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Super module for all coordinate types, and the geometry that converts
//! antenna positions into projected baselines.

mod error;
pub mod hadec;
pub mod lmn;
pub mod radec;
pub mod uvw;
pub mod xyz;

// Re-exports.
pub use error::CoordError;
pub use hadec::HADec;
pub use lmn::{sky_to_direction_cosines, LmnRime, LMN};
pub use radec::{Cartesian, RADec};
pub use uvw::{baselines, baselines_over_time, baselines_over_time_tb, UVW};
pub use xyz::{rotate_to_celestial, rotate_to_local, xyzs_to_uvws, XyzGeodetic};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with coordinates.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordError {
    #[error("Antenna positions must have a shape of (N, 3), but got ({rows}, {cols})")]
    NotNx3 { rows: usize, cols: usize },

    #[error("Antenna {index} has {len} coordinates; expected 3 (x, y, z)")]
    BadAntennaRow { index: usize, len: usize },

    #[error("Direction cosines (l = {l}, m = {m}) do not describe a direction on the sky; l^2 + m^2 must not exceed 1")]
    Domain { l: f64, m: f64 },
}

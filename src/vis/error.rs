// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with visibility containers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisError {
    #[error("Visibilities have shape {got:?}, but {expected:?} was expected")]
    ShapeMismatch {
        got: (usize, usize, usize),
        expected: (usize, usize, usize),
    },

    #[error("Visibility weights have shape {got:?}, but the visibilities have shape {expected:?}")]
    WeightsShapeMismatch {
        got: (usize, usize, usize),
        expected: (usize, usize, usize),
    },

    #[error("There are {num_freqs} frequencies, but the visibilities have {num_chans} channels")]
    FreqMismatch { num_freqs: usize, num_chans: usize },

    #[error("Expected UVWs with shape {expected:?}, but got {got:?}")]
    UvwShapeMismatch {
        got: (usize, usize),
        expected: (usize, usize),
    },
}

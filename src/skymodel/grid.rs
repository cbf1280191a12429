// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mappings between image pixels and the sky.

use serde::{Deserialize, Serialize};

use crate::coord::{RADec, LMN};

/// Anything that can convert between image pixel coordinates, sky positions
/// and channel frequencies.
pub trait CoordinateMapping {
    /// Get the sky position of the (possibly fractional) pixel `(x, y)`. If
    /// the pixel does not correspond to a direction on the sky, `None` is
    /// returned.
    fn pixel_to_sky(&self, x: f64, y: f64) -> Option<RADec>;

    /// Get the (possibly fractional) pixel `(x, y)` of a sky position. If the
    /// position can't be projected (e.g. it is on the far hemisphere), `None`
    /// is returned. The pixel may lie outside any particular image.
    fn sky_to_pixel(&self, radec: RADec) -> Option<(f64, f64)>;

    /// Get the frequency \[Hz\] of an image channel.
    fn pixel_to_freq(&self, chan: usize) -> Option<f64>;
}

/// An orthographic (SIN) projection of the sky around a phase centre.
///
/// Pixel `x` increases *against* l (i.e. right ascension increases to the
/// left, the way the sky is normally drawn) and pixel `y` increases with m:
///
/// `l = -(x - x0) * cell_size`, `m = (y - y0) * cell_size`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageGrid {
    /// The position of the reference pixel.
    pub phase_centre: RADec,

    /// The zero-indexed (x, y) reference pixel.
    pub ref_pixel: (f64, f64),

    /// The size of a pixel in direction cosine units (i.e. radians near the
    /// phase centre).
    pub cell_size: f64,

    /// The frequency of each image channel \[Hz\].
    pub freqs: Vec<f64>,
}

impl ImageGrid {
    /// Make a grid for an image with `(num_y, num_x)` pixels whose centre
    /// pixel is the phase centre.
    pub fn centred(
        phase_centre: RADec,
        (num_y, num_x): (usize, usize),
        cell_size: f64,
        freqs: Vec<f64>,
    ) -> ImageGrid {
        ImageGrid {
            phase_centre,
            ref_pixel: ((num_x / 2) as f64, (num_y / 2) as f64),
            cell_size,
            freqs,
        }
    }

    /// Get the direction cosines of the pixel `(x, y)`.
    pub fn pixel_to_lmn(&self, x: f64, y: f64) -> Option<LMN> {
        let (x0, y0) = self.ref_pixel;
        let l = -(x - x0) * self.cell_size;
        let m = (y - y0) * self.cell_size;
        LMN::from_lm(l, m).ok()
    }

    /// Get the pixel of the direction cosines `(l, m)`.
    pub fn lm_to_pixel(&self, l: f64, m: f64) -> (f64, f64) {
        let (x0, y0) = self.ref_pixel;
        (x0 - l / self.cell_size, y0 + m / self.cell_size)
    }
}

impl CoordinateMapping for ImageGrid {
    fn pixel_to_sky(&self, x: f64, y: f64) -> Option<RADec> {
        self.pixel_to_lmn(x, y)
            .map(|lmn| lmn.to_radec(self.phase_centre))
    }

    fn sky_to_pixel(&self, radec: RADec) -> Option<(f64, f64)> {
        let LMN { l, m, n } = radec.to_lmn(self.phase_centre);
        if n < 0.0 {
            return None;
        }
        Some(self.lm_to_pixel(l, m))
    }

    fn pixel_to_freq(&self, chan: usize) -> Option<f64> {
        self.freqs.get(chan).copied()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use ndarray::prelude::*;

use super::{ImageGrid, SkyModelError};

/// A multi-channel image of the sky. The data has dimensions
/// `[num_chans][num_y][num_x]`; the grid describes where each pixel is and
/// which frequency each channel is at.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub data: Array3<f64>,
    pub grid: ImageGrid,
}

impl Image {
    pub fn new(data: Array3<f64>, grid: ImageGrid) -> Result<Image, SkyModelError> {
        if data.len_of(Axis(0)) != grid.freqs.len() {
            return Err(SkyModelError::ImageChannelMismatch {
                num_chans: data.len_of(Axis(0)),
                num_freqs: grid.freqs.len(),
            });
        }
        Ok(Image { data, grid })
    }

    /// Make an image of zeros with `(num_y, num_x)` pixels per channel of
    /// `grid`.
    pub fn zeros(grid: ImageGrid, (num_y, num_x): (usize, usize)) -> Image {
        Image {
            data: Array3::zeros((grid.freqs.len(), num_y, num_x)),
            grid,
        }
    }

    /// Make an image of zeros with the same shape and grid as this one.
    pub fn zeros_like(&self) -> Image {
        Image {
            data: Array3::zeros(self.data.dim()),
            grid: self.grid.clone(),
        }
    }

    pub fn num_chans(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// `(num_y, num_x)`
    pub fn num_pixels(&self) -> (usize, usize) {
        let (_, num_y, num_x) = self.data.dim();
        (num_y, num_x)
    }

    /// The largest absolute value of any pixel in any channel, or 0 for an
    /// empty image.
    pub fn peak_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// The `(chan, y, x)` index of the pixel with the largest absolute value.
    /// The first such pixel wins ties. `None` if the image has no pixels.
    pub fn peak_abs_index(&self) -> Option<(usize, usize, usize)> {
        let mut peak: Option<((usize, usize, usize), f64)> = None;
        for (index, v) in self.data.indexed_iter() {
            let v = v.abs();
            match peak {
                Some((_, p)) if v <= p => (),
                _ => peak = Some((index, v)),
            }
        }
        peak.map(|(index, _)| index)
    }

    /// Add another image's pixels to this one's. The images must have the same
    /// shape; the grids are assumed to be the same.
    pub fn add_assign_image(&mut self, other: &Image) -> Result<(), SkyModelError> {
        if self.data.dim() != other.data.dim() {
            return Err(SkyModelError::ImageShapeMismatch {
                got: other.data.dim(),
                expected: self.data.dim(),
            });
        }
        self.data += &other.data;
        Ok(())
    }
}

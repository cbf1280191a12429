// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Direct Fourier transforms between sky models and visibilities. These are
//! slow, but exact; no gridding is involved.

use log::{debug, trace};
use ndarray::{prelude::*, Zip};
use serde::{Deserialize, Serialize};

use super::{Inversion, Invert, ModelError, Predict};
use crate::{
    c64,
    constants::VEL_C,
    coord::{LmnRime, UVW},
    simulate::add_sky_component,
    skymodel::{CoordinateMapping, Image, ImageGrid, SkyComponent, SkyModel},
    vis::Visibility,
};

/// Predicts visibilities by summing the Fourier transform of every
/// component and every non-zero image pixel.
#[derive(Clone, Copy, Debug, Default)]
pub struct DftPredictor;

impl DftPredictor {
    /// Convert the non-zero pixels of a model image into point components.
    fn image_components(image: &Image, num_freqs: usize) -> Result<Vec<SkyComponent>, ModelError> {
        if image.num_chans() != num_freqs {
            return Err(ModelError::ChannelMismatch {
                num_chans: image.num_chans(),
                num_freqs,
            });
        }

        let (num_y, num_x) = image.num_pixels();
        let mut comps = vec![];
        for y in 0..num_y {
            for x in 0..num_x {
                let flux = image.data.slice(s![.., y, x]);
                if flux.iter().all(|&f| f == 0.0) {
                    continue;
                }
                let direction = image
                    .grid
                    .pixel_to_sky(x as f64, y as f64)
                    .ok_or(ModelError::PixelOffSky { x, y })?;
                comps.push(SkyComponent {
                    direction,
                    flux: flux.to_owned(),
                    frequencies: image.grid.freqs.clone(),
                    shape: Default::default(),
                    name: format!("pixel ({x}, {y})"),
                });
            }
        }
        Ok(comps)
    }
}

impl Predict for DftPredictor {
    type Error = ModelError;

    fn predict(&self, vis: &Visibility, sky_model: &SkyModel) -> Result<Visibility, ModelError> {
        let mut model = vis.zeros_like();
        for comp in &sky_model.components {
            add_sky_component(&mut model, comp)?;
        }
        for image in &sky_model.images {
            let comps = Self::image_components(image, vis.num_freqs())?;
            trace!("Predicting {} non-zero model image pixels", comps.len());
            for comp in &comps {
                add_sky_component(&mut model, comp)?;
            }
        }
        debug!(
            "Predicted {} components and {} images",
            sky_model.num_components(),
            sky_model.num_images()
        );
        Ok(model)
    }
}

/// Makes dirty images and PSFs by directly evaluating the Fourier transform
/// of weighted visibilities at every pixel. The image is centred on the
/// visibilities' phase centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DftInverter {
    /// `(num_y, num_x)`
    pub num_pixels: (usize, usize),

    /// \[radians\]
    pub cell_size: f64,
}

impl DftInverter {
    pub fn new(num_pixels: (usize, usize), cell_size: f64) -> DftInverter {
        DftInverter {
            num_pixels,
            cell_size,
        }
    }
}

impl Invert for DftInverter {
    type Error = ModelError;

    fn invert(&self, vis: &Visibility) -> Result<Inversion, ModelError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ModelError::InvalidCellSize(self.cell_size));
        }
        if self.num_pixels.0 == 0 || self.num_pixels.1 == 0 {
            return Err(ModelError::NoPixels(self.num_pixels));
        }

        let grid = ImageGrid::centred(
            vis.phase_centre,
            self.num_pixels,
            self.cell_size,
            vis.freqs.clone(),
        );
        // Pixels beyond the horizon are left as zero.
        let lmns: Array2<Option<LmnRime>> = Array2::from_shape_fn(self.num_pixels, |(y, x)| {
            grid.pixel_to_lmn(x as f64, y as f64)
                .map(|lmn| lmn.prepare_for_rime())
        });

        let mut dirty = Image::zeros(grid.clone(), self.num_pixels);
        let mut psf = Image::zeros(grid, self.num_pixels);
        let mut sum_of_weights = Array1::zeros(vis.num_freqs());

        for (i_chan, &freq) in vis.freqs.iter().enumerate() {
            // Gather the non-zero-weight samples of this channel.
            let samples: Vec<(UVW, c64, f64)> = vis
                .uvws_tb
                .outer_iter()
                .zip(vis.vis_tfb.index_axis(Axis(1), i_chan).outer_iter())
                .zip(vis.weights_tfb.index_axis(Axis(1), i_chan).outer_iter())
                .flat_map(|((uvws, vis_b), weights)| {
                    uvws.into_iter()
                        .zip(vis_b)
                        .zip(weights)
                        .filter(|(_, w)| **w != 0.0)
                        .map(|((&uvw, &v), &w)| (uvw * freq / VEL_C, v, w))
                        .collect::<Vec<_>>()
                })
                .collect();
            let weight: f64 = samples.iter().map(|(_, _, w)| w).sum();
            sum_of_weights[i_chan] = weight;
            if weight == 0.0 {
                debug!("Channel {i_chan} has no weight; its images are zero");
                continue;
            }

            Zip::from(dirty.data.index_axis_mut(Axis(0), i_chan))
                .and(psf.data.index_axis_mut(Axis(0), i_chan))
                .and(&lmns)
                .par_for_each(|dirty, psf, lmn| {
                    if let Some(lmn) = lmn {
                        let (d, p) = samples.iter().fold((0.0, 0.0), |(d, p), &(uvw, v, w)| {
                            let phase = c64::cis(lmn.dot(uvw));
                            (d + w * (v * phase).re, p + w * phase.re)
                        });
                        *dirty = d / weight;
                        *psf = p / weight;
                    }
                });
        }

        debug!(
            "Inverted {} visibilities onto {:?} pixels",
            vis.vis_tfb.len(),
            self.num_pixels
        );
        Ok(Inversion {
            dirty,
            psf,
            sum_of_weights,
        })
    }
}

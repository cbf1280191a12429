// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Högbom CLEAN.

use std::ops::Range;

use log::{debug, trace};
use ndarray::{parallel::prelude::*, prelude::*};

use super::{CleanConfig, Deconvolve, DeconvolveError};
use crate::skymodel::Image;

/// The classic image-plane CLEAN: repeatedly find the brightest residual
/// pixel, record a fraction of it as a component and subtract the PSF
/// centred on it. Each channel is cleaned independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hogbom;

impl Deconvolve for Hogbom {
    type Error = DeconvolveError;

    fn deconvolve(
        &self,
        dirty: &Image,
        psf: &Image,
        config: &CleanConfig,
    ) -> Result<(Image, Image), DeconvolveError> {
        config.validate()?;
        if dirty.data.dim() != psf.data.dim() {
            return Err(DeconvolveError::ShapeMismatch {
                dirty: dirty.data.dim(),
                psf: psf.data.dim(),
            });
        }
        // A channel without any weight has an empty PSF; nothing can be
        // cleaned from it.
        let psf_peaks: Vec<_> = psf.data.outer_iter().map(peak_abs).collect();
        for (i_chan, _) in psf_peaks.iter().enumerate().filter(|(_, p)| p.is_none()) {
            debug!("The PSF of channel {i_chan} is empty; not cleaning it");
        }

        let mut components = dirty.zeros_like();
        let mut residual = dirty.clone();
        let iterations: Vec<usize> = components
            .data
            .outer_iter_mut()
            .into_par_iter()
            .zip(residual.data.outer_iter_mut())
            .zip(psf.data.outer_iter())
            .zip(psf_peaks)
            .map(|(((comps, residual), psf), psf_peak)| match psf_peak {
                Some(psf_peak) => clean_channel(comps, residual, psf, psf_peak, config),
                None => 0,
            })
            .collect();
        debug!(
            "CLEAN iterations per channel: {iterations:?}; peak residual {}",
            residual.peak_abs()
        );

        Ok((components, residual))
    }
}

/// Get the index and value of the pixel with the largest absolute value,
/// ignoring zeros. The first such pixel wins ties.
fn peak_abs(image: ArrayView2<f64>) -> Option<((usize, usize), f64)> {
    let mut peak: Option<((usize, usize), f64)> = None;
    for (index, &v) in image.indexed_iter() {
        if v == 0.0 {
            continue;
        }
        match peak {
            Some((_, p)) if v.abs() <= p.abs() => (),
            _ => peak = Some((index, v)),
        }
    }
    peak
}

/// The ranges of an axis of length `n` that overlap when one copy of it is
/// shifted by `shift` pixels. The first range is for the shifted copy.
fn overlap(n: usize, shift: isize) -> (Range<usize>, Range<usize>) {
    let n = n as isize;
    let start = shift.max(0);
    let end = (n + shift).min(n);
    if start >= end {
        return (0..0, 0..0);
    }
    (
        start as usize..end as usize,
        (start - shift) as usize..(end - shift) as usize,
    )
}

/// Clean a single channel, returning the number of iterations performed.
fn clean_channel(
    mut comps: ArrayViewMut2<f64>,
    mut residual: ArrayViewMut2<f64>,
    psf: ArrayView2<f64>,
    ((psf_y, psf_x), psf_peak): ((usize, usize), f64),
    config: &CleanConfig,
) -> usize {
    let (num_y, num_x) = residual.dim();
    for i in 0..config.max_iterations {
        let ((y, x), peak) = match peak_abs(residual.view()) {
            Some(p) => p,
            // Nothing left.
            None => return i,
        };
        if peak.abs() <= config.threshold {
            trace!("Peak residual {peak} reached the CLEAN threshold after {i} iterations");
            return i;
        }

        let amp = config.gain * peak / psf_peak;
        comps[(y, x)] += amp;

        let (res_ys, psf_ys) = overlap(num_y, y as isize - psf_y as isize);
        let (res_xs, psf_xs) = overlap(num_x, x as isize - psf_x as isize);
        residual
            .slice_mut(s![res_ys, res_xs])
            .scaled_add(-amp, &psf.slice(s![psf_ys, psf_xs]));
    }
    config.max_iterations
}

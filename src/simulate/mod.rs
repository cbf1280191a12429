// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Simulate the visibilities an interferometer would observe for point
//! sources.
//!
//! A point source is a delta function, so its Fourier transform is a complex
//! exponential evaluated at `uvw . lmn`. All visibilities here are phase
//! tracked to the phase centre, hence the `n - 1` in the exponent.

mod error;

pub use error::SimulateError;

use log::{debug, trace};
use ndarray::{parallel::prelude::*, prelude::*};

use crate::{
    c64,
    constants::{FRAC_PI_2, LN_2, VEL_C},
    coord::{LmnRime, RADec, XyzGeodetic, LMN, UVW},
    skymodel::{ComponentType, SkyComponent},
    vis::Visibility,
};

const GAUSSIAN_EXP_CONST: f64 = -(FRAC_PI_2 * FRAC_PI_2) / LN_2;

/// Get the phase-tracking-ready direction of a source, failing if `(l, m)` is
/// not a direction on the sky.
fn lmn_rime(l: f64, m: f64) -> Result<LmnRime, SimulateError> {
    LMN::from_lm(l, m)
        .map(LMN::prepare_for_rime)
        .map_err(|_| SimulateError::Domain { l, m })
}

/// Simulate visibilities for a unit-amplitude point source at direction
/// cosines `(l, m)` relative to the phase centre. One visibility is returned
/// per baseline, in the same order as `baselines`.
///
/// `baselines` must be in units of wavelength. Each visibility is
/// `exp(-2 pi i (u l + v m + w (n - 1)))` with `n = sqrt(1 - l^2 - m^2)`.
///
/// # Errors
///
/// If `l^2 + m^2 > 1`, the source direction is undefined and
/// [`SimulateError::Domain`] is returned.
pub fn simulate_point(baselines: &[UVW], l: f64, m: f64) -> Result<Vec<c64>, SimulateError> {
    let lmn = lmn_rime(l, m)?;
    trace!(
        "Simulating a unit point source at l = {l}, m = {m} on {} baselines",
        baselines.len()
    );
    Ok(baselines
        .par_iter()
        .map(|&uvw| c64::cis(-lmn.dot(uvw)))
        .collect())
}

/// Add the visibilities of a source with per-frequency flux densities
/// `fluxes` \[Jy\] at direction cosines `(l, m)` to `vis_fb`.
///
/// `vis_fb` must have dimensions `[num_freqs][num_baselines]`. `uvws` are the
/// baselines in metres; they are converted to wavelengths with `freqs` \[Hz\].
/// *The visibilities are not cleared.*
fn add_source(
    mut vis_fb: ArrayViewMut2<c64>,
    uvws: &[UVW],
    freqs: &[f64],
    (l, m): (f64, f64),
    fluxes: ArrayView1<f64>,
    shape: ComponentType,
) -> Result<(), SimulateError> {
    let lmn = lmn_rime(l, m)?;
    if fluxes.len() != freqs.len() {
        return Err(SimulateError::FluxLength {
            num_fluxes: fluxes.len(),
            num_freqs: freqs.len(),
        });
    }
    if vis_fb.dim() != (freqs.len(), uvws.len()) {
        return Err(SimulateError::VisShape {
            got: vis_fb.dim(),
            expected: (freqs.len(), uvws.len()),
        });
    }

    // Iterate over the baseline axis.
    vis_fb
        .axis_iter_mut(Axis(1))
        .into_par_iter()
        .zip(uvws.par_iter())
        .for_each(|(mut vis_f, &uvw)| {
            vis_f
                .iter_mut()
                .zip(freqs)
                .zip(fluxes)
                .filter(|(_, flux)| **flux != 0.0)
                .for_each(|((vis, &freq), &flux)| {
                    // Divide UVW by lambda to make UVW dimensionless.
                    let uvw = uvw * freq / VEL_C;
                    let envelope = match shape {
                        ComponentType::Point => 1.0,
                        ComponentType::Gaussian { maj, min, pa } => {
                            let (s_pa, c_pa) = pa.sin_cos();
                            // Temporary variables for clarity.
                            let k_x = uvw.u * s_pa + uvw.v * c_pa;
                            let k_y = uvw.u * c_pa - uvw.v * s_pa;
                            (GAUSSIAN_EXP_CONST
                                * (maj.powi(2) * k_x.powi(2) + min.powi(2) * k_y.powi(2)))
                            .exp()
                        }
                    };
                    *vis += c64::cis(-lmn.dot(uvw)) * flux * envelope;
                });
        });
    Ok(())
}

/// Add the visibilities of a point source with per-frequency flux densities
/// `fluxes` \[Jy\] at direction cosines `(l, m)` to `vis_fb`.
///
/// `vis_fb` must have dimensions `[num_freqs][num_baselines]`. `uvws` are the
/// baselines in metres; they are converted to wavelengths with `freqs` \[Hz\].
/// *The visibilities are not cleared.*
pub fn add_point_source(
    vis_fb: ArrayViewMut2<c64>,
    uvws: &[UVW],
    freqs: &[f64],
    l: f64,
    m: f64,
    fluxes: ArrayView1<f64>,
) -> Result<(), SimulateError> {
    add_source(vis_fb, uvws, freqs, (l, m), fluxes, ComponentType::Point)
}

/// Like [`add_point_source`], but the source is an elliptical Gaussian with
/// FWHM axes `maj` and `min` \[radians\] and position angle `pa` \[radians\].
pub fn add_gaussian_source(
    vis_fb: ArrayViewMut2<c64>,
    uvws: &[UVW],
    freqs: &[f64],
    l: f64,
    m: f64,
    fluxes: ArrayView1<f64>,
    (maj, min, pa): (f64, f64, f64),
) -> Result<(), SimulateError> {
    add_source(
        vis_fb,
        uvws,
        freqs,
        (l, m),
        fluxes,
        ComponentType::Gaussian { maj, min, pa },
    )
}

/// Simulate the visibilities of a point source with per-frequency flux
/// densities. The returned array has dimensions `[num_freqs][num_baselines]`.
pub fn simulate_point_with_flux(
    uvws: &[UVW],
    freqs: &[f64],
    l: f64,
    m: f64,
    fluxes: ArrayView1<f64>,
) -> Result<Array2<c64>, SimulateError> {
    let mut vis_fb = Array2::zeros((freqs.len(), uvws.len()));
    add_point_source(vis_fb.view_mut(), uvws, freqs, l, m, fluxes)?;
    Ok(vis_fb)
}

/// Add the visibilities of a sky component to every timestep of `vis`.
///
/// The component must either have a single flux density, which is used for
/// every channel, or one flux density per channel of `vis`; the component's
/// own frequencies are not otherwise consulted.
pub fn add_sky_component(vis: &mut Visibility, comp: &SkyComponent) -> Result<(), SimulateError> {
    let LMN { l, m, n } = comp.direction.to_lmn(vis.phase_centre);
    if n < 0.0 {
        return Err(SimulateError::FarSide {
            name: comp.name.clone(),
            direction: comp.direction,
            phase_centre: vis.phase_centre,
        });
    }
    let num_freqs = vis.freqs.len();
    let fluxes = match comp.flux.len() {
        1 => Array1::from_elem(num_freqs, comp.flux[0]),
        num_fluxes if num_fluxes == num_freqs => comp.flux.clone(),
        num_fluxes => {
            return Err(SimulateError::FluxLength {
                num_fluxes,
                num_freqs,
            })
        }
    };

    for (vis_fb, uvws_b) in vis
        .vis_tfb
        .outer_iter_mut()
        .zip(vis.uvws_tb.outer_iter())
    {
        let uvws = uvws_b.to_vec();
        add_source(vis_fb, &uvws, &vis.freqs, (l, m), fluxes.view(), comp.shape)?;
    }
    Ok(())
}

/// Simulate an observation of `phase_centre` by antennas at celestial `xyzs`
/// \[metres\] over `hour_angles` \[radians\] and `freqs` \[Hz\]. The returned
/// visibilities contain the sum of all `components`, and have unit weights.
pub fn simulate_visibility(
    xyzs: &[XyzGeodetic],
    hour_angles: &[f64],
    freqs: Vec<f64>,
    phase_centre: RADec,
    components: &[SkyComponent],
) -> Result<Visibility, SimulateError> {
    let mut vis = Visibility::from_observation(xyzs, hour_angles, freqs, phase_centre);
    debug!(
        "Simulating {} components on {} timesteps, {} channels and {} baselines",
        components.len(),
        vis.num_times(),
        vis.num_freqs(),
        vis.num_baselines()
    );
    for comp in components {
        add_sky_component(&mut vis, comp)?;
    }
    Ok(vis)
}

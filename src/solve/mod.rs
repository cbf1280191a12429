// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The major-cycle solver.
//!
//! Each major cycle predicts the visibilities of the current sky model,
//! subtracts them from the observed visibilities, images the residual and
//! deconvolves it. The CLEAN components found are added to the model image
//! and the loop continues until the residual is small enough, the maximum
//! number of cycles has been done, or the caller asks to stop.

mod error;

pub use error::{CollaboratorError, SolveError, SolveErrorKind, SolverConfigError};

use crossbeam_utils::atomic::AtomicCell;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    constants::*,
    deconv::{CleanConfig, Deconvolve},
    model::{Invert, Predict},
    skymodel::SkyModel,
    vis::Visibility,
};

/// Parameters of the major-cycle solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The maximum number of major cycles to perform.
    pub max_major_cycles: usize,

    /// Stop once the peak absolute residual is at or below `threshold *
    /// threshold_slack` \[Jy\]. The comparison is inclusive, so a residual
    /// of exactly zero converges even when the threshold is 0.
    pub threshold: f64,

    pub threshold_slack: f64,

    /// Parameters given to the deconvolver every major cycle.
    pub clean: CleanConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_major_cycles: DEFAULT_MAX_MAJOR_CYCLES,
            threshold: DEFAULT_THRESHOLD,
            threshold_slack: DEFAULT_THRESHOLD_SLACK,
            clean: CleanConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(SolverConfigError::NegativeThreshold(self.threshold));
        }
        if self.threshold_slack.is_nan() || self.threshold_slack < 0.0 {
            return Err(SolverConfigError::NegativeSlack(self.threshold_slack));
        }
        self.clean.validate()?;
        Ok(())
    }

    /// The peak residual at or below which the solver has converged.
    pub fn stop_threshold(&self) -> f64 {
        self.threshold * self.threshold_slack
    }
}

/// Why a solve stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The peak residual reached the threshold.
    Converged,

    /// The maximum number of major cycles was performed.
    MaxCycles,

    /// The caller asked the solver to stop.
    Cancelled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::MaxCycles => write!(f, "reached the maximum number of major cycles"),
            Termination::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The results of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutcome {
    /// The observed visibilities minus the visibilities of `sky_model`.
    pub residual: Visibility,

    pub sky_model: SkyModel,

    /// The number of major cycles performed.
    pub cycles: usize,

    pub termination: Termination,

    /// The peak absolute residual image value of the last major cycle, if any
    /// were performed.
    pub peak_residual: Option<f64>,
}

impl SolveOutcome {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

pub struct MajorCycleSolver<P, I, D> {
    predictor: P,
    inverter: I,
    deconvolver: D,
    config: SolverConfig,
}

impl<P, I, D> MajorCycleSolver<P, I, D>
where
    P: Predict,
    I: Invert,
    D: Deconvolve,
{
    pub fn new(
        predictor: P,
        inverter: I,
        deconvolver: D,
        config: SolverConfig,
    ) -> Result<Self, SolverConfigError> {
        config.validate()?;
        Ok(MajorCycleSolver {
            predictor,
            inverter,
            deconvolver,
            config,
        })
    }

    /// Solve for the sky model that best explains `observed`, starting from
    /// `initial`. The components of `initial` are kept as they are; new flux
    /// is accumulated into the model image.
    pub fn solve(&self, observed: &Visibility, initial: SkyModel) -> Result<SolveOutcome, SolveError> {
        self.solve_with_cancel(observed, initial, None)
    }

    /// Like [`MajorCycleSolver::solve`], but `cancel` is checked before each
    /// major cycle; if it is `true`, no more cycles are started.
    pub fn solve_with_cancel(
        &self,
        observed: &Visibility,
        initial: SkyModel,
        cancel: Option<&AtomicCell<bool>>,
    ) -> Result<SolveOutcome, SolveError> {
        let stop_threshold = self.config.stop_threshold();
        let mut sky_model = initial;
        let mut cycles = 0;
        let mut peak_residual = None;

        let termination = loop {
            if cycles >= self.config.max_major_cycles {
                break Termination::MaxCycles;
            }
            if cancel.is_some_and(|c| c.load()) {
                warn!("Solve cancelled after {cycles} major cycles");
                break Termination::Cancelled;
            }

            let cycle = cycles + 1;
            debug!("Starting major cycle {cycle}");
            let peak = match self.major_cycle(observed, &mut sky_model) {
                Ok(p) => p,
                Err(kind) => return Err(fail(cycle, kind, sky_model)),
            };
            cycles = cycle;
            peak_residual = Some(peak);
            info!("Major cycle {cycle} finished; peak residual {peak:.4e} Jy");

            if peak <= stop_threshold {
                info!("Peak residual {peak:.4e} Jy reached the threshold {stop_threshold:.4e} Jy");
                break Termination::Converged;
            }
        };

        // Nothing was done; hand back the inputs.
        if cycles == 0 {
            return Ok(SolveOutcome {
                residual: observed.clone(),
                sky_model,
                cycles,
                termination,
                peak_residual,
            });
        }

        // Make the residual consistent with the final model.
        let residual = match self.residual(observed, &sky_model) {
            Ok(r) => r,
            Err(kind) => return Err(fail(cycles, kind, sky_model)),
        };
        info!("Solve {termination} after {cycles} major cycles");
        Ok(SolveOutcome {
            residual,
            sky_model,
            cycles,
            termination,
            peak_residual,
        })
    }

    /// Subtract the visibilities of `sky_model` from `observed`.
    fn residual(
        &self,
        observed: &Visibility,
        sky_model: &SkyModel,
    ) -> Result<Visibility, SolveErrorKind> {
        let predicted = self
            .predictor
            .predict(observed, sky_model)
            .map_err(|e| SolveErrorKind::Predict(Box::new(e)))?;
        Ok(observed.subtract(&predicted)?)
    }

    /// Do one major cycle, accumulating new components into `sky_model` and
    /// returning the peak absolute value of the deconvolver's residual image.
    fn major_cycle(
        &self,
        observed: &Visibility,
        sky_model: &mut SkyModel,
    ) -> Result<f64, SolveErrorKind> {
        let residual = self.residual(observed, sky_model)?;
        let inversion = self
            .inverter
            .invert(&residual)
            .map_err(|e| SolveErrorKind::Invert(Box::new(e)))?;
        let (components, residual_image) = self
            .deconvolver
            .deconvolve(&inversion.dirty, &inversion.psf, &self.config.clean)
            .map_err(|e| SolveErrorKind::Deconvolve(Box::new(e)))?;

        match sky_model.images.first_mut() {
            Some(model_image) => model_image.add_assign_image(&components)?,
            None => sky_model.images.push(components),
        }
        Ok(residual_image.peak_abs())
    }
}

fn fail(cycle: usize, kind: SolveErrorKind, sky_model: SkyModel) -> SolveError {
    error!("Major cycle {cycle} failed: {kind}");
    SolveError {
        cycle,
        kind,
        sky_model: Box::new(sky_model),
    }
}

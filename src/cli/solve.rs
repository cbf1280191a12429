// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Simulate an observation of sky-model sources, then solve for the sky with
//! major cycles of DFT prediction, DFT imaging and Högbom CLEAN.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    common::{ObservationArgs, SourceArgs, ARG_FILE_HELP},
    simulate::{parse_sky, simulate},
    SkysolveError,
};
use crate::{
    constants::*,
    deconv::{CleanConfig, Hogbom},
    model::{DftInverter, DftPredictor},
    skymodel::{find_skycomponent, fit_skycomponent, Image, SkyComponent, SkyModel, SkyModelError},
    solve::{MajorCycleSolver, SolveOutcome, SolverConfig, SolverConfigError},
};

const DEFAULT_NUM_PIXELS: usize = 64;
const DEFAULT_CELL_SIZE_ARCMIN: f64 = 1.0;

lazy_static::lazy_static! {
    static ref NUM_PIXELS_HELP: String =
        format!("The number of pixels along each side of the image. Default: {DEFAULT_NUM_PIXELS}");

    static ref CELL_SIZE_HELP: String =
        format!("The size of an image pixel [arcminutes]. Default: {DEFAULT_CELL_SIZE_ARCMIN}");

    static ref MAX_MAJOR_CYCLES_HELP: String =
        format!("The maximum number of major cycles. Default: {DEFAULT_MAX_MAJOR_CYCLES}");

    static ref THRESHOLD_HELP: String =
        format!("Stop once the peak residual is below this [Jy]. Default: {DEFAULT_THRESHOLD}");

    static ref THRESHOLD_SLACK_HELP: String =
        format!("The threshold is multiplied by this before comparison. Default: {DEFAULT_THRESHOLD_SLACK}");

    static ref CLEAN_GAIN_HELP: String =
        format!("The CLEAN loop gain. Default: {DEFAULT_CLEAN_GAIN}");

    static ref CLEAN_MAX_ITERATIONS_HELP: String =
        format!("The maximum number of CLEAN iterations per major cycle. Default: {DEFAULT_CLEAN_MAX_ITERATIONS}");

    static ref CLEAN_THRESHOLD_HELP: String =
        format!("Stop CLEANing once the peak residual is below this [Jy]. Default: {DEFAULT_CLEAN_THRESHOLD}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SolveCliArgs {
    #[clap(long, help = NUM_PIXELS_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) num_pixels: Option<usize>,

    #[clap(long, help = CELL_SIZE_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) cell_size: Option<f64>,

    #[clap(long, help = MAX_MAJOR_CYCLES_HELP.as_str(), help_heading = "SOLVER")]
    pub(super) max_major_cycles: Option<usize>,

    #[clap(long, help = THRESHOLD_HELP.as_str(), help_heading = "SOLVER")]
    pub(super) threshold: Option<f64>,

    #[clap(long, help = THRESHOLD_SLACK_HELP.as_str(), help_heading = "SOLVER")]
    pub(super) threshold_slack: Option<f64>,

    #[clap(long, help = CLEAN_GAIN_HELP.as_str(), help_heading = "CLEAN")]
    pub(super) clean_gain: Option<f64>,

    #[clap(long, help = CLEAN_MAX_ITERATIONS_HELP.as_str(), help_heading = "CLEAN")]
    pub(super) clean_max_iterations: Option<usize>,

    #[clap(long, help = CLEAN_THRESHOLD_HELP.as_str(), help_heading = "CLEAN")]
    pub(super) clean_threshold: Option<f64>,
}

impl SolveCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            num_pixels: self.num_pixels.or(other.num_pixels),
            cell_size: self.cell_size.or(other.cell_size),
            max_major_cycles: self.max_major_cycles.or(other.max_major_cycles),
            threshold: self.threshold.or(other.threshold),
            threshold_slack: self.threshold_slack.or(other.threshold_slack),
            clean_gain: self.clean_gain.or(other.clean_gain),
            clean_max_iterations: self.clean_max_iterations.or(other.clean_max_iterations),
            clean_threshold: self.clean_threshold.or(other.clean_threshold),
        }
    }

    pub(super) fn parse(self) -> Result<(DftInverter, SolverConfig), SolveArgsError> {
        let config = SolverConfig {
            max_major_cycles: self.max_major_cycles.unwrap_or(DEFAULT_MAX_MAJOR_CYCLES),
            threshold: self.threshold.unwrap_or(DEFAULT_THRESHOLD),
            threshold_slack: self.threshold_slack.unwrap_or(DEFAULT_THRESHOLD_SLACK),
            clean: CleanConfig {
                gain: self.clean_gain.unwrap_or(DEFAULT_CLEAN_GAIN),
                max_iterations: self
                    .clean_max_iterations
                    .unwrap_or(DEFAULT_CLEAN_MAX_ITERATIONS),
                threshold: self.clean_threshold.unwrap_or(DEFAULT_CLEAN_THRESHOLD),
            },
        };
        config.validate()?;

        let num_pixels = self.num_pixels.unwrap_or(DEFAULT_NUM_PIXELS);
        if num_pixels == 0 {
            return Err(SolveArgsError::ZeroPixels);
        }
        let cell_size = self.cell_size.unwrap_or(DEFAULT_CELL_SIZE_ARCMIN);
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SolveArgsError::CellSizeInvalid(cell_size));
        }
        let inverter = DftInverter::new((num_pixels, num_pixels), (cell_size / 60.0).to_radians());

        Ok((inverter, config))
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SolveArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(default)]
    pub(super) observation: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "solve")]
    #[serde(default)]
    pub(super) solve_args: SolveCliArgs,

    /// The sources in the simulated observation. Only settable in an argument
    /// file.
    #[clap(skip)]
    #[serde(default)]
    pub(super) sources: Vec<SourceArgs>,

    /// Sources already known to be in the observation. They are held fixed;
    /// only the rest of the sky is solved for. Only settable in an argument
    /// file.
    #[clap(skip)]
    #[serde(default)]
    pub(super) known_sources: Vec<SourceArgs>,
}

impl SolveArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<SolveArgs, SkysolveError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let SolveArgs {
                args_file: _,
                observation,
                solve_args,
                sources,
                known_sources,
            } = unpack_arg_file!(arg_file);

            Ok(SolveArgs {
                args_file: None,
                observation: cli_args.observation.merge(observation),
                solve_args: cli_args.solve_args.merge(solve_args),
                sources: if cli_args.sources.is_empty() {
                    sources
                } else {
                    cli_args.sources
                },
                known_sources: if cli_args.known_sources.is_empty() {
                    known_sources
                } else {
                    cli_args.known_sources
                },
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SkysolveError> {
        debug!("{:#?}", self);

        let SolveArgs {
            args_file: _,
            observation,
            solve_args,
            sources,
            known_sources,
        } = self;

        let (inverter, config) = solve_args.parse()?;
        let (observation, components) = parse_sky(observation, sources)?;
        let initial = known_sources
            .into_iter()
            .try_fold(SkyModel::new(), |model, s| {
                s.into_component(&observation.freqs)
                    .map(|c| model.add_component(c))
            })
            .map_err(SolveArgsError::from)?;

        info!(
            "Imaging with {}x{} pixels of {} arcmin",
            inverter.num_pixels.1,
            inverter.num_pixels.0,
            inverter.cell_size.to_degrees() * 60.0
        );
        info!(
            "Up to {} major cycles, threshold {} Jy (x{}), CLEAN gain {}",
            config.max_major_cycles, config.threshold, config.threshold_slack, config.clean.gain
        );
        if !initial.is_empty() {
            info!("{} known sources are held fixed", initial.num_components());
        }

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let vis = simulate(&observation, &components)?;
        let solver = MajorCycleSolver::new(DftPredictor, inverter, Hogbom, config)?;
        let outcome = solver.solve(&vis, initial)?;
        report(&outcome, &components);

        Ok(())
    }
}

/// Print the results of a solve. The model image is compared against the
/// simulated sources.
fn report(outcome: &SolveOutcome, simulated: &[SkyComponent]) {
    match outcome.peak_residual {
        Some(peak) => info!(
            "Solver {} after {} major cycles; peak residual image {peak:e} Jy",
            outcome.termination, outcome.cycles
        ),
        None => info!(
            "Solver {} without doing any major cycles",
            outcome.termination
        ),
    }
    info!(
        "Peak residual visibility amplitude: {:e} Jy",
        outcome.residual.peak_abs()
    );

    let image = match outcome.sky_model.images.first() {
        Some(i) => i,
        None => return,
    };
    report_image(image, simulated);
}

fn report_image(image: &Image, simulated: &[SkyComponent]) {
    match find_skycomponent(image) {
        Ok(comp) => info!(
            "Brightest model pixel is at {} ({:.3} arcmin from the phase centre) with flux densities {}",
            comp.direction,
            comp.direction.separation(image.grid.phase_centre).to_degrees() * 60.0,
            comp.flux
        ),
        Err(e) => warn!("Couldn't find a model component: {e}"),
    }
    for source in simulated {
        match fit_skycomponent(image, source.direction) {
            Ok(comp) => info!(
                "Model at '{}' {}: {} (simulated {})",
                source.name, source.direction, comp.flux, source.flux
            ),
            Err(e) => warn!("'{}': {e}", source.name),
        }
    }
}

#[derive(Error, Debug)]
pub(super) enum SolveArgsError {
    #[error("The image must have at least one pixel")]
    ZeroPixels,

    #[error("Cell size {0} arcmin is invalid; it must be positive")]
    CellSizeInvalid(f64),

    #[error(transparent)]
    SkyModel(#[from] SkyModelError),

    #[error(transparent)]
    Config(#[from] SolverConfigError),
}

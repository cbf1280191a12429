// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Simulate the visibilities of sky-model sources for an observation.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    common::{Observation, ObservationArgs, ObservationArgsError, SourceArgs, ARG_FILE_HELP},
    SkysolveError,
};
use crate::{
    simulate::simulate_visibility,
    skymodel::{SkyComponent, SkyModelError},
    vis::Visibility,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SimulateArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(default)]
    pub(super) observation: ObservationArgs,

    /// The sources to simulate. Only settable in an argument file.
    #[clap(skip)]
    #[serde(default)]
    pub(super) sources: Vec<SourceArgs>,
}

impl SimulateArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<SimulateArgs, SkysolveError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let SimulateArgs {
                args_file: _,
                observation,
                sources,
            } = unpack_arg_file!(arg_file);

            Ok(SimulateArgs {
                args_file: None,
                observation: cli_args.observation.merge(observation),
                sources: if cli_args.sources.is_empty() {
                    sources
                } else {
                    cli_args.sources
                },
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SkysolveError> {
        debug!("{:#?}", self);

        let SimulateArgs {
            args_file: _,
            observation,
            sources,
        } = self;

        let (observation, components) = parse_sky(observation, sources)?;
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let vis = simulate(&observation, &components)?;
        info!(
            "Simulated {} visibilities; peak amplitude {:.4} Jy",
            vis.vis_tfb.len(),
            vis.peak_abs()
        );

        Ok(())
    }
}

/// Make sense of an observation and the sources in it, and print high-level
/// information about them. The sources get a flux density for every channel
/// of the observation.
pub(super) fn parse_sky(
    observation: ObservationArgs,
    sources: Vec<SourceArgs>,
) -> Result<(Observation, Vec<SkyComponent>), SimulateArgsError> {
    let observation = observation.parse()?;
    let components = sources
        .into_iter()
        .map(|s| s.into_component(&observation.freqs))
        .collect::<Result<Vec<SkyComponent>, _>>()?;

    info!("Phase centre: {}", observation.phase_centre);
    info!(
        "{} antennas, {} timesteps, {} channels",
        observation.xyzs.len(),
        observation.hour_angles.len(),
        observation.freqs.len()
    );
    info!(
        "Simulating {} sources ({} gaussian)",
        components.len(),
        components.iter().filter(|c| c.is_gaussian()).count()
    );
    for comp in &components {
        debug!(
            "  '{}' at {} ({:?}), flux {}",
            comp.name, comp.direction, comp.shape, comp.flux
        );
    }
    Ok((observation, components))
}

pub(super) fn simulate(
    observation: &Observation,
    components: &[SkyComponent],
) -> Result<Visibility, SkysolveError> {
    Ok(simulate_visibility(
        &observation.xyzs,
        &observation.hour_angles,
        observation.freqs.to_vec(),
        observation.phase_centre,
        components,
    )?)
}

#[derive(Error, Debug)]
pub(super) enum SimulateArgsError {
    #[error(transparent)]
    Observation(#[from] ObservationArgsError),

    #[error(transparent)]
    SkyModel(#[from] SkyModelError),
}

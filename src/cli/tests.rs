// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use clap::Parser;
use indoc::indoc;
use ndarray::prelude::*;
use tempfile::Builder;
use vec1::vec1;

use super::{
    common::{ObservationArgs, ObservationArgsError, SourceArgs},
    simulate::SimulateArgs,
    solve::{SolveArgs, SolveArgsError, SolveCliArgs},
    Command, Skysolve, SkysolveError,
};
use crate::{
    constants::*,
    deconv::DeconvolveError,
    skymodel::{ComponentType, SkyModelError},
    solve::SolverConfigError,
};

fn get_observation_args() -> ObservationArgs {
    ObservationArgs {
        ra: Some(10.0),
        dec: Some(-27.0),
        latitude: None,
        hour_angles: Some(vec![-15.0, 0.0, 15.0]),
        freqs: Some(vec![150.0, 180.0]),
        antennas: Some(vec![
            vec![0.0, 0.0, 0.0],
            vec![50.0, 10.0, 0.0],
            vec![-20.0, 80.0, 1.0],
        ]),
    }
}

#[test]
fn test_observation_parse() {
    let obs = get_observation_args().parse().unwrap();
    assert_eq!(obs.xyzs.len(), 3);
    assert_eq!(obs.hour_angles.len(), 3);
    assert_abs_diff_eq!(obs.hour_angles[2], 15.0_f64.to_radians());
    assert_abs_diff_eq!(obs.freqs[0], 150e6);
    assert_abs_diff_eq!(obs.freqs[1], 180e6);
    assert_abs_diff_eq!(obs.phase_centre.ra, 10.0_f64.to_radians());

    // Rotating to celestial coordinates preserves the length of each
    // position.
    assert_abs_diff_eq!(
        (obs.xyzs[1].x.powi(2) + obs.xyzs[1].y.powi(2) + obs.xyzs[1].z.powi(2)).sqrt(),
        (50.0_f64.powi(2) + 10.0_f64.powi(2)).sqrt(),
        epsilon = 1e-10
    );
}

#[test]
fn test_observation_parse_errors() {
    let mut args = get_observation_args();
    args.ra = None;
    assert!(matches!(
        args.parse(),
        Err(ObservationArgsError::OnlyOneRAOrDec)
    ));

    let mut args = get_observation_args();
    args.ra = None;
    args.dec = None;
    assert!(matches!(args.parse(), Err(ObservationArgsError::NoPhaseCentre)));

    let mut args = get_observation_args();
    args.dec = Some(95.0);
    assert!(matches!(args.parse(), Err(ObservationArgsError::DecInvalid)));

    let mut args = get_observation_args();
    args.hour_angles = Some(vec![]);
    assert!(matches!(args.parse(), Err(ObservationArgsError::NoHourAngles)));

    let mut args = get_observation_args();
    args.freqs = None;
    assert!(matches!(args.parse(), Err(ObservationArgsError::NoFreqs)));

    let mut args = get_observation_args();
    args.freqs = Some(vec![150.0, -1.0]);
    assert!(matches!(args.parse(), Err(ObservationArgsError::FreqInvalid)));

    let mut args = get_observation_args();
    args.antennas = Some(vec![vec![0.0, 0.0, 0.0]]);
    assert!(matches!(
        args.parse(),
        Err(ObservationArgsError::TooFewAntennas(1))
    ));

    let mut args = get_observation_args();
    args.antennas = Some(vec![vec![0.0, 0.0, 0.0], vec![1.0, 2.0]]);
    assert!(matches!(args.parse(), Err(ObservationArgsError::Antenna(_))));
}

#[test]
fn test_observation_merge_prefers_cli() {
    let cli = ObservationArgs {
        ra: Some(1.0),
        freqs: Some(vec![100.0]),
        ..Default::default()
    };
    let merged = cli.merge(get_observation_args());
    assert_eq!(merged.ra, Some(1.0));
    assert_eq!(merged.dec, Some(-27.0));
    assert_eq!(merged.freqs, Some(vec![100.0]));
    assert_eq!(merged.antennas.map(|a| a.len()), Some(3));
}

#[test]
fn test_negative_hour_angles_on_the_command_line() {
    let args = Skysolve::try_parse_from([
        "skysolve",
        "simulate",
        "--dec",
        "-27",
        "--hour-angles",
        "-15",
        "0",
        "15",
        "--freqs",
        "150",
        "170",
    ])
    .unwrap();
    let observation = match args.command {
        Command::Simulate(args) => args.observation,
        Command::Solve(_) => panic!("expected the simulate subcommand"),
    };
    assert_eq!(observation.dec, Some(-27.0));
    assert_eq!(observation.hour_angles, Some(vec![-15.0, 0.0, 15.0]));
    assert_eq!(observation.freqs, Some(vec![150.0, 170.0]));

    // A flag after the hour angles isn't taken as one.
    let args =
        Skysolve::try_parse_from(["skysolve", "simulate", "--hour-angles", "0", "--freqs", "150"])
            .unwrap();
    let observation = match args.command {
        Command::Simulate(args) => args.observation,
        Command::Solve(_) => panic!("expected the simulate subcommand"),
    };
    assert_eq!(observation.hour_angles, Some(vec![0.0]));
    assert_eq!(observation.freqs, Some(vec![150.0]));
}

#[test]
fn test_source_flux_broadcast() {
    let freqs = [150e6, 180e6, 200e6];
    let source = SourceArgs {
        name: "a".to_string(),
        ra: 10.0,
        dec: -27.0,
        fluxes: vec1![2.5],
        comp_type: ComponentType::Point,
    };
    let comp = source.into_component(&freqs).unwrap();
    assert_eq!(comp.flux, array![2.5, 2.5, 2.5]);
    assert_eq!(comp.frequencies, freqs.to_vec());
    assert_eq!(comp.name, "a");

    let source = SourceArgs {
        name: String::new(),
        ra: 10.0,
        dec: -27.0,
        fluxes: vec1![1.0, 2.0],
        comp_type: ComponentType::Point,
    };
    assert_eq!(
        source.into_component(&freqs),
        Err(SkyModelError::FluxFrequencyMismatch {
            num_fluxes: 2,
            num_freqs: 3
        })
    );
}

#[test]
fn test_simulate_args_from_toml() {
    let mut arg_file = Builder::new().suffix(".toml").tempfile().unwrap();
    arg_file
        .write_all(
            indoc! {r#"
                [observation]
                ra = 10.0
                dec = -27.0
                hour_angles = [-15.0, 0.0, 15.0]
                freqs = [150.0]
                antennas = [[0.0, 0.0, 0.0], [50.0, 10.0, 0.0]]

                [[sources]]
                name = "bright"
                ra = 10.5
                dec = -26.5
                fluxes = [3.0]

                [[sources]]
                ra = 9.5
                dec = -27.5
                fluxes = [1.0]
                comp_type = { gaussian = { maj = 60.0, min = 30.0, pa = 45.0 } }
            "#}
            .as_bytes(),
        )
        .unwrap();

    let cli = SimulateArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        observation: ObservationArgs {
            dec: Some(-30.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let merged = cli.merge().unwrap();
    assert!(merged.args_file.is_none());
    assert_eq!(merged.observation.ra, Some(10.0));
    assert_eq!(merged.observation.dec, Some(-30.0));
    assert_eq!(merged.sources.len(), 2);
    assert_eq!(merged.sources[0].name, "bright");
    assert!(merged.sources[0].comp_type.is_point());
    match merged.sources[1].comp_type {
        ComponentType::Gaussian { maj, min, pa } => {
            assert_abs_diff_eq!(maj, (60.0_f64 / 3600.0).to_radians(), epsilon = 1e-15);
            assert_abs_diff_eq!(min, (30.0_f64 / 3600.0).to_radians(), epsilon = 1e-15);
            assert_abs_diff_eq!(pa, 45.0_f64.to_radians(), epsilon = 1e-15);
        }
        ComponentType::Point => panic!("expected a gaussian"),
    }
}

#[test]
fn test_solve_args_from_json() {
    let mut arg_file = Builder::new().suffix(".json").tempfile().unwrap();
    arg_file
        .write_all(
            indoc! {r#"
                {
                    "observation": { "ra": 10.0, "dec": -27.0 },
                    "solve": {
                        "num_pixels": 32,
                        "clean_gain": 0.2
                    },
                    "sources": [
                        { "ra": 10.0, "dec": -27.0, "fluxes": [1.0, 2.0] }
                    ],
                    "known_sources": [
                        { "name": "known", "ra": 11.0, "dec": -27.0, "fluxes": [0.5] }
                    ]
                }
            "#}
            .as_bytes(),
        )
        .unwrap();

    let cli = SolveArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        solve_args: SolveCliArgs {
            num_pixels: Some(16),
            ..Default::default()
        },
        ..Default::default()
    };
    let merged = cli.merge().unwrap();
    assert_eq!(merged.solve_args.num_pixels, Some(16));
    assert_eq!(merged.solve_args.clean_gain, Some(0.2));
    assert_eq!(merged.observation.ra, Some(10.0));
    assert_eq!(merged.sources.len(), 1);
    assert_eq!(merged.sources[0].fluxes.len(), 2);
    assert_eq!(merged.known_sources.len(), 1);
    assert_eq!(merged.known_sources[0].name, "known");
}

#[test]
fn test_unknown_arg_file_extension() {
    let arg_file = Builder::new().suffix(".yaml").tempfile().unwrap();
    let cli = SimulateArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(cli.merge(), Err(SkysolveError::ArgFile(_))));
}

#[test]
fn test_bad_toml_is_an_arg_file_error() {
    let mut arg_file = Builder::new().suffix(".toml").tempfile().unwrap();
    arg_file.write_all(b"[observation\nra = ").unwrap();
    let cli = SolveArgs {
        args_file: Some(arg_file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(cli.merge(), Err(SkysolveError::ArgFile(_))));
}

#[test]
fn test_solve_cli_args_parse() {
    let (inverter, config) = SolveCliArgs::default().parse().unwrap();
    assert_eq!(inverter.num_pixels, (64, 64));
    assert_abs_diff_eq!(inverter.cell_size, (1.0_f64 / 60.0).to_radians());
    assert_eq!(config.max_major_cycles, DEFAULT_MAX_MAJOR_CYCLES);
    assert_abs_diff_eq!(config.clean.gain, DEFAULT_CLEAN_GAIN);

    let (inverter, config) = SolveCliArgs {
        num_pixels: Some(20),
        cell_size: Some(30.0),
        max_major_cycles: Some(2),
        clean_gain: Some(0.3),
        ..Default::default()
    }
    .parse()
    .unwrap();
    assert_eq!(inverter.num_pixels, (20, 20));
    assert_abs_diff_eq!(inverter.cell_size, 0.5_f64.to_radians());
    assert_eq!(config.max_major_cycles, 2);
    assert_abs_diff_eq!(config.clean.gain, 0.3);

    let result = SolveCliArgs {
        num_pixels: Some(0),
        ..Default::default()
    }
    .parse();
    assert!(matches!(result, Err(SolveArgsError::ZeroPixels)));

    let result = SolveCliArgs {
        cell_size: Some(-1.0),
        ..Default::default()
    }
    .parse();
    assert!(matches!(result, Err(SolveArgsError::CellSizeInvalid(_))));

    let result = SolveCliArgs {
        clean_gain: Some(1.5),
        ..Default::default()
    }
    .parse();
    assert!(matches!(
        result,
        Err(SolveArgsError::Config(SolverConfigError::Clean(
            DeconvolveError::InvalidGain(_)
        )))
    ));
}

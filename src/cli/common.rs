// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both `simulate` and `solve`
//! take sky-model sources, and `simulate` describes an observation; the
//! argument handling for these lives here.

use clap::Parser;
use itertools::Itertools;
use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use vec1::Vec1;

use crate::{
    constants::DEFAULT_LATITUDE_DEG,
    coord::{rotate_to_celestial, CoordError, RADec, XyzGeodetic},
    skymodel::{ComponentType, SkyComponent, SkyModelError},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Antenna positions and sky-model sources can only be given in a file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref LATITUDE_HELP: String =
        format!("The latitude of the array [degrees]. Default: {DEFAULT_LATITUDE_DEG}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkysolveError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SkysolveError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(SkysolveError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments describing an observation: where the antennas are, where they
/// point, when and at what frequencies.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ObservationArgs {
    /// The phase centre right ascension [degrees].
    #[clap(short, long, help_heading = "OBSERVATION PARAMETERS")]
    pub(super) ra: Option<f64>,

    /// The phase centre declination [degrees].
    #[clap(short, long, allow_hyphen_values = true, help_heading = "OBSERVATION PARAMETERS")]
    pub(super) dec: Option<f64>,

    #[clap(
        long,
        help = LATITUDE_HELP.as_str(),
        allow_hyphen_values = true,
        help_heading = "OBSERVATION PARAMETERS"
    )]
    pub(super) latitude: Option<f64>,

    /// The hour angles of the phase centre at each timestep [degrees].
    #[clap(long, multiple_values(true), help_heading = "OBSERVATION PARAMETERS")]
    pub(super) hour_angles: Option<Vec<f64>>,

    /// The frequency of each channel [MHz].
    #[clap(long, multiple_values(true), help_heading = "OBSERVATION PARAMETERS")]
    pub(super) freqs: Option<Vec<f64>>,

    /// The local (east, north, up) position of each antenna [metres]. Only
    /// settable in an argument file.
    #[clap(skip)]
    pub(super) antennas: Option<Vec<Vec<f64>>>,
}

/// An observation ready to be simulated.
#[derive(Debug, Clone)]
pub(super) struct Observation {
    /// Celestial XYZ antenna positions \[metres\]
    pub(super) xyzs: Vec<XyzGeodetic>,
    /// \[radians\]
    pub(super) hour_angles: Vec1<f64>,
    /// \[Hz\]
    pub(super) freqs: Vec1<f64>,
    pub(super) phase_centre: RADec,
}

impl ObservationArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            ra: self.ra.or(other.ra),
            dec: self.dec.or(other.dec),
            latitude: self.latitude.or(other.latitude),
            hour_angles: self.hour_angles.or(other.hour_angles),
            freqs: self.freqs.or(other.freqs),
            antennas: self.antennas.or(other.antennas),
        }
    }

    pub(super) fn parse(self) -> Result<Observation, ObservationArgsError> {
        let ObservationArgs {
            ra,
            dec,
            latitude,
            hour_angles,
            freqs,
            antennas,
        } = self;

        let phase_centre = match (ra, dec) {
            (Some(ra), Some(dec)) => {
                if !(0.0..=360.0).contains(&ra) {
                    return Err(ObservationArgsError::RaInvalid);
                }
                if !(-90.0..=90.0).contains(&dec) {
                    return Err(ObservationArgsError::DecInvalid);
                }
                RADec::new_degrees(ra, dec)
            }
            (None, None) => return Err(ObservationArgsError::NoPhaseCentre),
            _ => return Err(ObservationArgsError::OnlyOneRAOrDec),
        };

        let latitude = latitude.unwrap_or(DEFAULT_LATITUDE_DEG);
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ObservationArgsError::LatitudeInvalid(latitude));
        }
        let local_xyzs = XyzGeodetic::from_rows(&antennas.unwrap_or_default())?;
        if local_xyzs.len() < 2 {
            return Err(ObservationArgsError::TooFewAntennas(local_xyzs.len()));
        }
        let xyzs = rotate_to_celestial(&local_xyzs, latitude.to_radians());

        let hour_angles = Vec1::try_from_vec(
            hour_angles
                .unwrap_or_default()
                .into_iter()
                .map(f64::to_radians)
                .collect(),
        )
        .map_err(|_| ObservationArgsError::NoHourAngles)?;

        let freqs = freqs.unwrap_or_default();
        if freqs.iter().any(|&f| !(f.is_finite() && f > 0.0)) {
            return Err(ObservationArgsError::FreqInvalid);
        }
        let freqs = Vec1::try_from_vec(freqs.into_iter().map(|f| f * 1e6).collect())
            .map_err(|_| ObservationArgsError::NoFreqs)?;

        debug!(
            "{} antennas, {} hour angles and {} channels; phase centre {phase_centre}",
            xyzs.len(),
            hour_angles.len(),
            freqs.len()
        );
        Ok(Observation {
            xyzs,
            hour_angles,
            freqs,
            phase_centre,
        })
    }
}

#[derive(Error, Debug)]
pub(super) enum ObservationArgsError {
    #[error("No phase centre was supplied")]
    NoPhaseCentre,

    #[error("Right Ascension was not within 0 to 360!")]
    RaInvalid,

    #[error("Declination was not within -90 to 90!")]
    DecInvalid,

    #[error("One of RA and Dec was specified, but none or both are required!")]
    OnlyOneRAOrDec,

    #[error("Latitude {0} was not within -90 to 90!")]
    LatitudeInvalid(f64),

    #[error("At least 2 antennas are needed, but {0} were supplied")]
    TooFewAntennas(usize),

    #[error("No hour angles were supplied")]
    NoHourAngles,

    #[error("No frequencies were supplied")]
    NoFreqs,

    #[error("Frequencies must be positive")]
    FreqInvalid,

    #[error(transparent)]
    Antenna(#[from] CoordError),
}

/// A sky-model source as specified by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct SourceArgs {
    #[serde(default)]
    pub(super) name: String,

    /// \[degrees\]
    pub(super) ra: f64,

    /// \[degrees\]
    pub(super) dec: f64,

    /// Either one flux density for all channels, or one per channel \[Jy\].
    pub(super) fluxes: Vec1<f64>,

    #[serde(default)]
    pub(super) comp_type: ComponentType,
}

impl SourceArgs {
    /// Make a sky component with a flux density for each of `freqs`.
    pub(super) fn into_component(self, freqs: &[f64]) -> Result<SkyComponent, SkyModelError> {
        let SourceArgs {
            name,
            ra,
            dec,
            fluxes,
            comp_type,
        } = self;
        let flux = if fluxes.len() == 1 {
            Array1::from_elem(freqs.len(), *fluxes.first())
        } else {
            Array1::from(fluxes.into_vec())
        };
        SkyComponent::new(
            RADec::new_degrees(ra, dec),
            flux,
            freqs.to_vec(),
            comp_type,
            name,
        )
    }
}

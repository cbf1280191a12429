// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod simulate;
mod solve;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;

fn skysolve() -> Command {
    Command::cargo_bin("skysolve").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Write a simulate argument file for a small array observing a 1 Jy source
/// at the phase centre.
fn write_simulate_args<T: AsRef<Path>>(dir: T) -> PathBuf {
    let (path, mut f) = make_file_in_dir("simulate.toml", dir);
    f.write_all(
        indoc! {r#"
            [observation]
            ra = 60.0
            dec = -27.0
            hour_angles = [-20.0, -10.0, 0.0, 10.0, 20.0]
            freqs = [150.0, 170.0]
            antennas = [
                [0.0, 0.0, 0.0],
                [61.0, 12.0, 0.3],
                [-35.0, 48.0, -0.5],
                [17.0, -73.0, 0.1],
                [-88.0, -20.0, 0.8],
                [110.0, 95.0, -1.2],
            ]

            [[sources]]
            name = "centre"
            ra = 60.0
            dec = -27.0
            fluxes = [1.0]
        "#}
        .as_bytes(),
    )
    .unwrap();
    path
}

/// Get the number logged on the line of `stdout` that starts with `prefix`
/// (after the log level).
fn logged_number(stdout: &str, prefix: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|l| l.contains(prefix))
        .unwrap_or_else(|| panic!("no line contains '{prefix}':\n{stdout}"));
    let (_, rest) = line.split_once(prefix).unwrap();
    rest.split_whitespace().next().unwrap().parse().unwrap()
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use indoc::indoc;
use tempfile::TempDir;

use crate::*;

#[test]
fn test_solve_removes_the_source() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);

    let cmd = skysolve()
        .args(["solve", &args_file.display().to_string()])
        .args(["--num-pixels", "16", "--cell-size", "10"])
        .args(["--max-major-cycles", "2", "--clean-gain", "0.5"])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("major cycles"), "{stdout}");

    // The source is at the centre pixel, so CLEAN removes it entirely.
    let peak = logged_number(&stdout, "Peak residual visibility amplitude:");
    assert!(peak < 1e-6, "{peak}");
    assert!(stdout.contains("Brightest model pixel"), "{stdout}");
    assert!(stdout.contains("Model at 'centre'"), "{stdout}");
}

#[test]
fn test_solve_with_known_source() {
    let tmp_dir = TempDir::new().unwrap();
    let (args_file, mut f) = make_file_in_dir("solve.toml", &tmp_dir);
    f.write_all(
        indoc! {r#"
            [observation]
            ra = 60.0
            dec = -27.0
            hour_angles = [-10.0, 0.0, 10.0]
            freqs = [150.0]
            antennas = [
                [0.0, 0.0, 0.0],
                [61.0, 12.0, 0.3],
                [-35.0, 48.0, -0.5],
                [17.0, -73.0, 0.1],
            ]

            [solve]
            num_pixels = 8
            max_major_cycles = 1

            [[sources]]
            name = "offset"
            ra = 60.3
            dec = -26.8
            fluxes = [2.0]

            [[known_sources]]
            name = "offset"
            ra = 60.3
            dec = -26.8
            fluxes = [2.0]
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let cmd = skysolve()
        .args(["solve", &args_file.display().to_string()])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("1 known sources"), "{stdout}");
    // The known source accounts for everything.
    let peak = logged_number(&stdout, "Peak residual visibility amplitude:");
    assert!(peak < 1e-10, "{peak}");
}

#[test]
fn test_solve_dry_run() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);

    let cmd = skysolve()
        .args(["solve", &args_file.display().to_string(), "--dry-run"])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!stdout.contains("Solver"), "{stdout}");
}

#[test]
fn test_solve_bad_gain_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);
    let cmd = skysolve()
        .args(["solve", &args_file.display().to_string()])
        .args(["--clean-gain", "1.5"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("gain"), "{stderr}");
}

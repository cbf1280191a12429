// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::*;

#[test]
fn test_simulate() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);

    let cmd = skysolve()
        .args(["simulate", &args_file.display().to_string()])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("Simulating 1 sources"), "{stdout}");
    assert!(stdout.contains("6 antennas, 5 timesteps, 2 channels"), "{stdout}");
    // 5 timesteps, 2 channels, 15 baselines.
    assert_abs_diff_eq!(logged_number(&stdout, "Simulated"), 150.0);
    // A 1 Jy source at the phase centre has unit visibilities everywhere.
    assert_abs_diff_eq!(
        logged_number(&stdout, "peak amplitude"),
        1.0,
        epsilon = 1e-4
    );
}

#[test]
fn test_simulate_dry_run() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);

    let cmd = skysolve()
        .args(["simulate", &args_file.display().to_string(), "--dry-run"])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!stdout.contains("Simulated"), "{stdout}");
}

#[test]
fn test_simulate_cli_overrides_file() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);

    let cmd = skysolve()
        .args(["simulate", &args_file.display().to_string()])
        .args(["--freqs", "100", "120", "140"])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("3 channels"), "{stdout}");
    assert_abs_diff_eq!(logged_number(&stdout, "Simulated"), 225.0);
}

#[test]
fn test_simulate_save_toml() {
    let tmp_dir = TempDir::new().unwrap();
    let args_file = write_simulate_args(&tmp_dir);
    let saved = tmp_dir.path().join("saved.toml");

    let cmd = skysolve()
        .args(["simulate", &args_file.display().to_string(), "--dry-run"])
        .args(["--save-toml", &saved.display().to_string()])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let saved_str = std::fs::read_to_string(&saved).unwrap();
    assert!(saved_str.contains("[observation]"), "{saved_str}");
    assert!(saved_str.contains("[[sources]]"), "{saved_str}");
    assert!(saved_str.contains("centre"), "{saved_str}");

    // The saved arguments reproduce the run.
    let cmd = skysolve()
        .args(["simulate", &saved.display().to_string()])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert_abs_diff_eq!(logged_number(&stdout, "Simulated"), 150.0);
}

#[test]
fn test_simulate_without_antennas_fails() {
    let cmd = skysolve()
        .args(["simulate", "--ra", "0", "--dec", "-27"])
        .args(["--hour-angles", "0", "--freqs", "150"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("antennas"), "{stderr}");
}

#[test]
fn test_simulate_bad_arg_file_extension() {
    let tmp_dir = TempDir::new().unwrap();
    let (path, _) = make_file_in_dir("args.yaml", &tmp_dir);
    let cmd = skysolve()
        .args(["simulate", &path.display().to_string()])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("recognised file extension"), "{stderr}");
}

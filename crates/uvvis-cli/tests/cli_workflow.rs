use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use uvvis_core::modules::dataset::read_dataset;

const ORCA_SPECTRUM: &str = "\
-----------------------------------------------------------------------------
         ABSORPTION SPECTRUM VIA TRANSITION ELECTRIC DIPOLE MOMENTS
-----------------------------------------------------------------------------
State   Energy    Wavelength  fosc         T2        TX        TY        TZ
        (cm-1)      (nm)                 (au**2)    (au)      (au)      (au)
-----------------------------------------------------------------------------
   1   25000.0    400.0   0.500000000   0.13005   0.35909  -0.00560   0.00207
   2   23809.5    420.0   0.300000000   0.00000   0.00002  -0.00001   0.00001

";

#[test]
fn run_command_writes_dataset_spectra_and_report() {
    let temp = TempDir::new().expect("tempdir should be created");
    let logs = temp.path().join("logs");
    let output_dir = temp.path().join("out");
    let report_path = temp.path().join("report/run.json");
    fs::create_dir_all(&logs).expect("log dir");
    write_file(&logs.join("mol-a.out"), ORCA_SPECTRUM);
    write_file(&logs.join("mol-b.out"), ORCA_SPECTRUM);

    let output = run_cli(&[
        "run",
        "--source-dir",
        path_arg(&logs),
        "--format",
        "orca",
        "--sorted",
        "--output-dir",
        path_arg(&output_dir),
        "--range",
        "380-440",
        "--interval",
        "10",
        "--report",
        path_arg(&report_path),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Extraction: 2 structures"));
    assert!(stdout.contains("Warnings: 0"));

    let corpus = read_dataset(&output_dir.join("input.dat")).expect("dataset");
    assert_eq!(corpus.excited_state_counts(), vec![2, 2]);

    let mean = fs::read_to_string(output_dir.join("average_spectrum.dat")).expect("mean");
    assert_eq!(mean.lines().count(), 7);
    assert!(mean.starts_with("380.000000   "));
    let dispersion =
        fs::read_to_string(output_dir.join("dispersion_spectrum.dat")).expect("dispersion");
    assert!(
        dispersion
            .lines()
            .all(|line| line.ends_with("   0.0000000000"))
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("medias.txt"))
            .expect("medias")
            .lines()
            .count(),
        7
    );

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&report_path).expect("report should be readable"),
    )
    .expect("report should be valid json");
    assert_eq!(parsed["extraction"]["structure_count"], 2);
    assert_eq!(parsed["synthesis"]["fit"], "gaussian");
    assert_eq!(parsed["synthesis"]["grid_length"], 7);
}

#[test]
fn synthesize_falls_back_on_invalid_options_and_warns() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("input.dat"), "1   \n1\n400  0.5\n");

    let output = run_cli(&[
        "synthesize",
        "--output-dir",
        path_arg(temp.path()),
        "--fit",
        "voigt",
        "--interval",
        "abc",
    ]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid fit type 'voigt'"));
    assert!(stderr.contains("invalid wavenumber interval 'abc'"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Warnings: 2"));
    assert_eq!(
        fs::read_to_string(temp.path().join("spectrum_gaussian.dat"))
            .expect("spectrum")
            .lines()
            .count(),
        72
    );
}

#[test]
fn vanishing_interval_falls_back_to_the_default_grid() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("input.dat"), "1   \n1\n400  0.5\n");

    let output = run_cli(&[
        "synthesize",
        "--output-dir",
        path_arg(temp.path()),
        "--interval",
        "1e-300",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("grid points"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Warnings: 1"));
    assert_eq!(
        fs::read_to_string(temp.path().join("spectrum_gaussian.dat"))
            .expect("spectrum")
            .lines()
            .count(),
        72
    );
}

#[test]
fn lorentzian_fit_accepts_the_legacy_spelling() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("input.dat"), "1   \n1\n400  0.5\n");

    let output = run_cli(&[
        "synthesize",
        "--output-dir",
        path_arg(temp.path()),
        "--fit",
        "lorentzain",
        "--range",
        "390-410",
    ]);

    assert!(output.status.success());
    assert!(temp.path().join("spectrum_lorentzian.dat").is_file());
    assert!(temp.path().join("dispersion.dat").is_file());
    let mean = fs::read_to_string(temp.path().join("average.dat")).expect("mean");
    let row = mean.lines().nth(1).expect("row at 400");
    let decimals = row.rsplit('.').next().map(str::len);
    assert_eq!(decimals, Some(12));
}

#[test]
fn missing_source_directory_fails_without_dataset() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_dir = temp.path().join("out");

    let output = run_cli(&[
        "extract",
        "--source-dir",
        path_arg(&temp.path().join("does-not-exist")),
        "--format",
        "gaussian",
        "--output-dir",
        path_arg(&output_dir),
    ]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [IO.EXTRACT_DIRECTORY]"));
    assert!(stderr.contains("FATAL EXIT CODE: 3"));
    assert!(!output_dir.join("input.dat").exists());
}

#[test]
fn unsupported_average_mode_fails_before_extraction() {
    let temp = TempDir::new().expect("tempdir should be created");
    let logs = temp.path().join("logs");
    let output_dir = temp.path().join("out");
    fs::create_dir_all(&logs).expect("log dir");
    write_file(&logs.join("mol.out"), ORCA_SPECTRUM);

    let output = run_cli(&[
        "run",
        "--source-dir",
        path_arg(&logs),
        "--format",
        "orca",
        "--output-dir",
        path_arg(&output_dir),
        "--average",
        "geometric",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.AVERAGE_MODE]"));
    assert!(!output_dir.exists());
}

#[test]
fn gaussian_logs_without_normal_termination_yield_no_corpus() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("crashed.log"),
        " (Enter /scr/programs/g09/l914.exe)\n Excited State   1:      Singlet-A      4.1034 eV  302.15 nm  f=0.0012  <S**2>=0.000\n Leave Link  914\n",
    );

    let output = run_cli(&[
        "extract",
        "--source-dir",
        path_arg(temp.path()),
        "--format",
        "gaussian",
        "--output-dir",
        path_arg(temp.path()),
    ]);

    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[RUN.EXTRACT_EMPTY]"));
    assert!(!temp.path().join("input.dat").exists());
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    let output = run_cli(&["extract", "--format", "orca"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CLI_USAGE]"));
}

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_uvvis-spectrum");
    Command::new(binary_path)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("uvvis-spectrum should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temporary paths should be valid UTF-8")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture should be written");
}

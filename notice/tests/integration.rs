use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_notice")));
    cmd.env_remove("NOTICE_LOG");
    cmd
}

const CENTRE_CULTUREL: &str = r#"
[general]
project_name = "Centre Culturel"
owner = "Ville de Villeurbanne"
establishment_type = "L"
establishment_category = "3"
program = """
Salle de spectacle de 450 places
Foyer et espaces d'exposition"""

[fire]
risk_level = "modere"
alarm_system_type = "A"
evacuation = ["signaletique_evac", "eclairage_securite"]

[accessibility]
parking = ["places_adaptees"]
"#;

fn record_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- stdin mode --

#[test]
fn empty_stdin_renders_fallback_notice() {
    let output = stdout_of(cmd().write_stdin("").assert().success());
    assert!(output.starts_with("NOTICE DE SÉCURITÉ INCENDIE ET D'ACCESSIBILITÉ\n"));
    assert!(output.contains("1. IDENTIFICATION DU PROJET"));
    assert!(output.contains("Nom du projet : Non renseigné\n"));
    assert!(output.contains("2. SÉCURITÉ INCENDIE"));
    assert!(output.contains("3. ACCESSIBILITÉ"));
}

#[test]
fn stdin_record_is_rendered() {
    let output = stdout_of(cmd().write_stdin(CENTRE_CULTUREL).assert().success());
    assert!(output.contains("Nom du projet : Centre Culturel\n"));
    assert!(output.contains("Niveau de risque retenu : Modéré\n"));
    assert!(output.contains("Type de SSI : Type A\n"));
    assert!(output.contains("Catégorie SSI : Non renseigné\n"));
    assert!(output.contains(
        "Moyens d'évacuation : Éclairage de sécurité (BAES / LSC); Signalétique d'évacuation\n"
    ));
    assert!(output.contains("Salle de spectacle de 450 places\nFoyer et espaces d'exposition\n"));
    assert!(output.contains("Stationnement : Places adaptées (2 % du nombre total)\n"));
    assert!(output.contains("Sanitaires : Non renseigné\n"));
    assert_eq!(output.lines().nth(2), Some("Nom du projet : Centre Culturel"));
}

#[test]
fn repeated_runs_are_identical() {
    let first = stdout_of(cmd().write_stdin(CENTRE_CULTUREL).assert().success());
    let second = stdout_of(cmd().write_stdin(CENTRE_CULTUREL).assert().success());
    assert_eq!(first, second);
}

#[test]
fn set_and_toggle_edit_the_record() {
    let output = stdout_of(
        cmd()
            .args(["--set", "general.project_name=Gymnase Jean Macé"])
            .args(["--toggle", "fire.suppression=ria"])
            .args(["--toggle", "fire.suppression=extincteurs"])
            .write_stdin("")
            .assert()
            .success(),
    );
    assert!(output.contains("Nom du projet : Gymnase Jean Macé\n"));
    assert!(output.contains(
        "Moyens d'extinction : Extincteurs portatifs appropriés aux risques; Robinets d'incendie armés (RIA)\n"
    ));
}

#[test]
fn set_rejects_unknown_field() {
    cmd()
        .args(["--set", "general.color=red"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'color'"));
}

#[test]
fn invalid_record_is_reported() {
    cmd()
        .write_stdin("[general\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse record from stdin"));
}

#[test]
fn unknown_codes_render_verbatim_with_a_warning() {
    let output = cmd()
        .args(["--toggle", "fire.evacuation=xyz_unknown"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("xyz_unknown"));
    assert!(stdout_of(output).contains("Moyens d'évacuation : xyz_unknown\n"));
}

#[test]
fn strict_mode_rejects_unknown_codes() {
    cmd()
        .arg("--strict")
        .args(["--toggle", "fire.evacuation=xyz_unknown"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("xyz_unknown"));
}

#[test]
fn save_writes_the_edited_record() {
    let dir = TempDir::new().unwrap();
    let saved = dir.path().join("projet.toml");

    cmd()
        .args(["--set", "general.project_name=Médiathèque"])
        .args(["--save", saved.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .success();

    let content = std::fs::read_to_string(&saved).unwrap();
    assert!(content.contains("project_name = \"Médiathèque\""));

    // The saved record renders the same notice when read back.
    let output = stdout_of(cmd().write_stdin(content).assert().success());
    assert!(output.contains("Nom du projet : Médiathèque\n"));
}

#[test]
fn stdin_mode_with_output_writes_a_file() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .write_stdin(CENTRE_CULTUREL)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Notice téléchargée au format .txt."));

    let written = std::fs::read_to_string(
        dir.path().join("centre_culturel_notice_incendie_accessibilite.txt"),
    )
    .unwrap();
    assert!(written.contains("Nom du projet : Centre Culturel\n"));
}

#[test]
fn unknown_sink_is_rejected() {
    cmd()
        .args(["--sink", "pdf"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sink"));
}

#[test]
fn stdout_sink_rejects_output_directory() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["--sink", "stdout", "-o", dir.path().to_str().unwrap()])
        .write_stdin(CENTRE_CULTUREL)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output only applies to the file sink"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// -- file mode --

#[test]
fn file_mode_writes_one_notice_per_record() {
    let dir = TempDir::new().unwrap();
    let first = record_file(CENTRE_CULTUREL);
    let second = record_file("[general]\nproject_name = \"Piscine Municipale\"\n");

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success();

    assert!(dir
        .path()
        .join("centre_culturel_notice_incendie_accessibilite.txt")
        .exists());
    assert!(dir
        .path()
        .join("piscine_municipale_notice_incendie_accessibilite.txt")
        .exists());
}

#[test]
fn file_mode_scans_directories() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    std::fs::write(input.path().join("a.toml"), CENTRE_CULTUREL).unwrap();
    std::fs::write(input.path().join("notes.md"), "not a record").unwrap();

    cmd()
        .args(["-o", output.path().to_str().unwrap()])
        .arg(input.path())
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn file_mode_requires_output() {
    let record = record_file(CENTRE_CULTUREL);
    cmd()
        .arg(record.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn file_mode_skips_broken_records() {
    let dir = TempDir::new().unwrap();
    let good = record_file(CENTRE_CULTUREL);
    let broken = record_file("[fire]\nevacuation = \"alarme_sonore\"\n");

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(good.path())
        .arg(broken.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("skipping"));

    assert!(dir
        .path()
        .join("centre_culturel_notice_incendie_accessibilite.txt")
        .exists());
}

#[test]
fn file_mode_rejects_edits() {
    let dir = TempDir::new().unwrap();
    let record = record_file(CENTRE_CULTUREL);
    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--set", "general.owner=x"])
        .arg(record.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("only apply in stdin mode"));
}

// -- listings --

#[test]
fn list_catalogs_prints_codes_and_labels() {
    cmd()
        .args(["--list-catalogs", "evacuation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alarme_sonore\tAlarme sonore générale"))
        .stdout(predicate::str::contains("Robinets").not());
}

#[test]
fn list_all_catalogs() {
    cmd()
        .arg("--list-catalogs")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Niveau de risque (risk-level)"))
        .stdout(predicate::str::contains("# Confort d'usage (comfort)"));
}

#[test]
fn list_catalogs_rejects_unknown_catalog() {
    cmd()
        .args(["--list-catalogs", "colors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown catalog 'colors'"));
}

#[test]
fn list_fields_prints_paths() {
    cmd()
        .arg("--list-fields")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "fire.evacuation\tmulti-select:evacuation\tMoyens d'évacuation",
        ))
        .stdout(predicate::str::contains("general.project_name\ttext\tNom du projet"));
}

#[test]
fn template_is_a_loadable_empty_record() {
    let assert = cmd().arg("--template").assert().success();
    let template = stdout_of(assert);
    assert!(template.contains("[general]"));

    let output = stdout_of(cmd().write_stdin(template).assert().success());
    let blank = stdout_of(cmd().write_stdin("").assert().success());
    assert_eq!(output, blank);
}

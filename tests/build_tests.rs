//! Integration tests for the build and clean commands
//!
//! All builds run with --skip-compile so the tests do not depend on a LaTeX
//! installation; compiler invocation itself is covered by unit tests.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::roletex_cmd;

/// Helper to initialize a test project with the given roles
fn init_project(temp: &TempDir, roles: &str) {
    roletex_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--roles")
        .arg(roles)
        .assert()
        .success();
}

/// Helper to create a source file with content
fn create_source(temp: &TempDir, filename: &str, content: &str) {
    let path = temp.path().join("tex").join(filename);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_build_single_role() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr,qd");

    create_source(
        &temp,
        "main.tex",
        "\\begin{rolecontent}{qr,tech}\nquant line\n\\end{rolecontent}\nshared line\n",
    );

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success()
        .stdout(predicate::str::contains("qr: 1 file(s) filtered"));

    // single role writes directly into the output directory
    let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
    assert_eq!(output, "quant line\nshared line\n");
}

#[test]
fn test_build_batch_creates_role_subdirectories() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr,qd");

    create_source(
        &temp,
        "main.tex",
        "\\begin{rolecontent}{qr}\nquant line\n\\end{rolecontent}\nshared line\n",
    );

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--skip-compile")
        .assert()
        .success();

    let qr = fs::read_to_string(temp.path().join("build/qr/main.tex")).unwrap();
    assert_eq!(qr, "quant line\nshared line\n");

    let qd = fs::read_to_string(temp.path().join("build/qd/main.tex")).unwrap();
    assert_eq!(qd, "shared line\n");
}

#[test]
fn test_build_regenerates_role_def_per_role() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr,qd");
    create_source(&temp, "main.tex", "shared\n");

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--skip-compile")
        .assert()
        .success();

    let qr_def = fs::read_to_string(temp.path().join("build/qr/role-def.tex")).unwrap();
    assert!(qr_def.contains("\\def\\buildrole{qr}"));
    assert!(qr_def.contains("\\def\\includelocation{false}"));

    let qd_def = fs::read_to_string(temp.path().join("build/qd/role-def.tex")).unwrap();
    assert!(qd_def.contains("\\def\\buildrole{qd}"));
}

#[test]
fn test_build_unknown_role_succeeds_with_untagged_only() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(
        &temp,
        "main.tex",
        "untagged\n\\begin{rolecontent}{qr}\ntagged\n\\end{rolecontent}\n\\rolecontent{tech}{inline}\n",
    );

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("nonexistent-role")
        .arg("--skip-compile")
        .assert()
        .success();

    let output = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
    assert_eq!(output, "untagged\n");
}

#[test]
fn test_build_malformed_source_fails_naming_file() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(
        &temp,
        "broken.tex",
        "fine\n\\begin{rolecontent}{qr}\nnever closed\n",
    );
    create_source(&temp, "main.tex", "fine\n");

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("broken.tex"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_build_include_location_flag() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(&temp, "main.tex", "\\location{Berlin}\nbody\n");

    // default: location stripped
    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();
    let without = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
    assert!(!without.contains("Berlin"));

    // with the flag: location kept
    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--include-location")
        .arg("--skip-compile")
        .assert()
        .success();
    let with = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();
    assert!(with.contains("\\location{Berlin}"));
}

#[test]
fn test_build_copies_styles() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(&temp, "main.tex", "body\n");
    fs::write(
        temp.path().join("templates/variant-layout.sty"),
        "% layout\n",
    )
    .unwrap();

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();

    let copied = fs::read_to_string(temp.path().join("build/variant-layout.sty")).unwrap();
    assert_eq!(copied, "% layout\n");
}

#[test]
fn test_build_preserves_nested_source_paths() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(&temp, "main.tex", "top\n");
    create_source(&temp, "sections/work.tex", "work\n");

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();

    assert!(temp.path().join("build/sections/work.tex").exists());
}

#[test]
fn test_build_roles_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr,qd,tech");

    create_source(&temp, "main.tex", "body\n");

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--roles")
        .arg("qr,qd")
        .arg("--skip-compile")
        .assert()
        .success();

    assert!(temp.path().join("build/qr/main.tex").exists());
    assert!(temp.path().join("build/qd/main.tex").exists());
    assert!(!temp.path().join("build/tech").exists());
}

#[test]
fn test_build_outside_project_fails() {
    let temp = TempDir::new().unwrap();

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--skip-compile")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Not a roletex project"));
}

#[test]
fn test_build_starter_project_filters_for_every_role() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr,qd");

    // the scaffolded tex/main.tex is itself a tagged document
    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--skip-compile")
        .assert()
        .success();

    for role in ["qr", "qd"] {
        let output =
            fs::read_to_string(temp.path().join("build").join(role).join("main.tex")).unwrap();
        assert!(!output.contains("rolecontent"));
        assert!(output.contains("\\begin{document}"));
    }
}

#[test]
fn test_clean_removes_build_outputs() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");
    create_source(&temp, "main.tex", "body\n");

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();
    assert!(temp.path().join("build").exists());

    roletex_cmd()
        .current_dir(temp.path())
        .arg("clean")
        .assert()
        .success();

    assert!(!temp.path().join("build").exists());
    // sources untouched
    assert!(temp.path().join("tex/main.tex").exists());
}

#[test]
fn test_rebuild_is_deterministic() {
    let temp = TempDir::new().unwrap();
    init_project(&temp, "qr");

    create_source(
        &temp,
        "main.tex",
        "\\begin{rolecontent}{qr}\nA\n\\end{rolecontent}\nB\n",
    );

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();
    let first = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();

    roletex_cmd()
        .current_dir(temp.path())
        .arg("build")
        .arg("--role")
        .arg("qr")
        .arg("--skip-compile")
        .assert()
        .success();
    let second = fs::read_to_string(temp.path().join("build/main.tex")).unwrap();

    assert_eq!(first, second);
}

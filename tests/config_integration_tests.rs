//! Configuration file discovery and overrides.

mod common;

use common::{TITLE_AND_ALBUM_CHECKS, TestFixture};
use predicates::prelude::*;

#[test]
fn local_config_sets_output_format() {
    let fixture = TestFixture::new();
    fixture.create_track("song.wav", &[("INAM", "X")]);
    fixture.create_config("[output]\nformat = \"json\"\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["-l", "library", "-m"])
        .arg(&module)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn cli_format_overrides_config() {
    let fixture = TestFixture::new();
    fixture.create_track("song.wav", &[("INAM", "X")]);
    fixture.create_config("[output]\nformat = \"json\"\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["-l", "library", "--format", "text", "--color", "never", "-m"])
        .arg(&module)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn config_excludes_apply() {
    let fixture = TestFixture::new();
    fixture.create_track("scans/song.wav", &[("INAM", "X")]);
    fixture.create_config("[scanner]\nexclude = [\"scans/**\"]\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["-l", "library", "-m"])
        .arg(&module)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn explicit_config_path_is_used() {
    let fixture = TestFixture::new();
    fixture.create_track("song.wav", &[("INAM", "X")]);
    let config = fixture.create_file("custom.toml", "[output]\nformat = \"json\"\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .args(["--config"])
        .arg(&config)
        .arg("-l")
        .arg(fixture.library())
        .arg("-m")
        .arg(&module)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"pass\""));
}

#[test]
fn no_config_ignores_local_file() {
    let fixture = TestFixture::new();
    fixture.create_track("song.wav", &[("INAM", "X")]);
    fixture.create_config("this is not toml");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["--no-config", "-l", "library", "-m"])
        .arg(&module)
        .assert()
        .success();
}

#[test]
fn invalid_config_exits_two() {
    let fixture = TestFixture::new();
    fixture.create_config("[run]\nworkers = 0\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["-l", "library", "-m"])
        .arg(&module)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("run.workers must be at least 1"));
}

#[test]
fn unknown_config_key_exits_two() {
    let fixture = TestFixture::new();
    fixture.create_config("[run]\nthreads = 4\n");
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .current_dir(fixture.path())
        .args(["-l", "library", "-m"])
        .arg(&module)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_explicit_config_exits_two() {
    let fixture = TestFixture::new();
    let module = fixture.create_module("checks.toml", TITLE_AND_ALBUM_CHECKS);

    soundcheck!()
        .args(["--config"])
        .arg(fixture.path().join("absent.toml"))
        .arg("-l")
        .arg(fixture.library())
        .arg("-m")
        .arg(&module)
        .assert()
        .code(2);
}

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test fixtures and command helpers
mod test_utils {
    use super::*;

    /// Video, audio, two ASS English tracks and an untitled SubRip track
    pub const MULTI_TRACK: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "hevc"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac", "tags": {"language": "jpn"}},
            {"index": 2, "codec_type": "subtitle", "codec_name": "ass",
             "tags": {"language": "eng", "title": "Signs & Songs"}},
            {"index": 3, "codec_type": "subtitle", "codec_name": "ass",
             "tags": {"language": "eng", "title": "Full Dialogue"}},
            {"index": 4, "codec_type": "subtitle", "codec_name": "subrip",
             "tags": {"language": "eng"}}
        ]
    }"#;

    /// Untitled ASS track followed by a titled one
    pub const UNTITLED_FIRST: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264"},
            {"index": 1, "codec_type": "subtitle", "codec_name": "ass",
             "tags": {"language": "eng"}},
            {"index": 2, "codec_type": "subtitle", "codec_name": "ass",
             "tags": {"language": "eng", "title": "Commentary"}}
        ]
    }"#;

    /// No subtitle streams at all
    pub const NO_SUBTITLES: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac"}
        ]
    }"#;

    pub fn write_capture(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, json).unwrap();
        path
    }

    /// `subpick` running in `dir` with no ambient configuration
    pub fn subpick(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("subpick").unwrap();
        cmd.current_dir(dir)
            .env_remove("SUBPICK_CONFIG")
            .env_remove("SUBPICK_CODEC")
            .env_remove("SUBPICK_LANGUAGE")
            .env_remove("SUBPICK_KEYWORDS")
            .env_remove("SUBPICK_FALLBACK_INDEX")
            .env_remove("SUBPICK_LOG_LEVEL")
            .env_remove("RUST_LOG");
        cmd
    }
}

use test_utils::*;

#[test]
fn test_select_prints_indices() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--probe-json"])
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("absolute_index=3"))
        .stdout(predicate::str::contains("subtitle_relative_index=1"))
        .stdout(predicate::str::contains("reason=keyword:dialogue"));
}

#[test]
fn test_select_keyword_priority_from_flags() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--keywords", "signs,dialogue", "--probe-json"])
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("absolute_index=2"))
        .stdout(predicate::str::contains("subtitle_relative_index=0"));
}

#[test]
fn test_select_no_match_exits_two_with_diagnostics() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--language", "jpn", "--probe-json"])
        .arg(&capture)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("no_match="))
        .stdout(predicate::str::contains("Index 4: codec=subrip"));
}

#[test]
fn test_select_no_subtitles_exits_two() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "movie.json", NO_SUBTITLES);

    subpick(dir.path())
        .args(["select", "-i", "movie.mp4", "--probe-json"])
        .arg(&capture)
        .assert()
        .code(2);
}

#[test]
fn test_select_fallback_from_env() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", UNTITLED_FIRST);

    subpick(dir.path())
        .env("SUBPICK_KEYWORDS", "forced")
        .env("SUBPICK_FALLBACK_INDEX", "0")
        .args(["select", "-i", "episode.mkv", "--probe-json"])
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("absolute_index=1"))
        .stdout(predicate::str::contains("subtitle_relative_index=0"))
        .stdout(predicate::str::contains("reason=fallback:0"));
}

#[test]
fn test_select_negative_fallback_flag_disables() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", UNTITLED_FIRST);

    subpick(dir.path())
        .env("SUBPICK_FALLBACK_INDEX", "0")
        .args([
            "select",
            "-i",
            "episode.mkv",
            "--keywords",
            "forced",
            "--fallback-index",
            "-1",
            "--probe-json",
        ])
        .arg(&capture)
        .assert()
        .code(2);
}

#[test]
fn test_select_json_output() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    let output = subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--format", "json", "--probe-json"])
        .arg(&capture)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["selection"]["absolute_index"], 3);
    assert_eq!(value["selection"]["subtitle_relative_index"], 1);
    assert_eq!(value["result"]["outcome"], "matched");
    assert_eq!(value["subtitle_stream_count"], 3);
}

#[test]
fn test_select_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);
    std::fs::write(
        dir.path().join("subpick.toml"),
        "[selection]\nkeywords = \"songs\"\n",
    )
    .unwrap();

    subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--probe-json"])
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("absolute_index=2"));
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    subpick(dir.path())
        .args(["--config", "missing.toml", "select", "-i", "episode.mkv", "--probe-json"])
        .arg(&capture)
        .assert()
        .code(1);
}

#[test]
fn test_missing_capture_is_error() {
    let dir = TempDir::new().unwrap();

    subpick(dir.path())
        .args(["select", "-i", "episode.mkv", "--probe-json", "nothing.json"])
        .assert()
        .code(1);
}

#[test]
fn test_burn_prints_command_with_relative_index() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "episode.json", MULTI_TRACK);

    subpick(dir.path())
        .args(["burn", "-i", "My Show [01].mkv", "--work-dir", "out", "--probe-json"])
        .arg(&capture)
        .assert()
        .success()
        .stdout(predicate::str::contains("si=1"))
        .stdout(predicate::str::contains("libx265"))
        .stdout(predicate::str::contains("normalized_name=My Show _01"));
}

#[test]
fn test_burn_without_match_plans_nothing() {
    let dir = TempDir::new().unwrap();
    let capture = write_capture(dir.path(), "movie.json", NO_SUBTITLES);

    subpick(dir.path())
        .args(["burn", "-i", "movie.mp4", "--probe-json"])
        .arg(&capture)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("command=").not());
}

#[test]
fn test_normalize_prints_name() {
    let dir = TempDir::new().unwrap();

    subpick(dir.path())
        .args(["normalize", "--name", "Show (2019) [1080p]", "--replace-spaces"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Show_2019_1080p\n"));
}

#[test]
fn test_batch_with_sidecars() {
    let dir = TempDir::new().unwrap();
    let season = dir.path().join("season1");
    std::fs::create_dir_all(&season).unwrap();

    std::fs::write(season.join("e01.mkv"), b"").unwrap();
    write_capture(&season, "e01.mkv.ffprobe.json", MULTI_TRACK);
    std::fs::write(season.join("e02.mkv"), b"").unwrap();
    write_capture(&season, "e02.mkv.ffprobe.json", NO_SUBTITLES);
    // No sidecar: probe failure recorded for this file only
    std::fs::write(season.join("e03.mkv"), b"").unwrap();

    let output = subpick(dir.path())
        .args(["batch", "--dir", "season1", "--probe-sidecar", "--jobs", "2", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["matched"], 1);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["failed"], 1);

    let files = report["files"].as_array().unwrap();
    let statuses: Vec<&str> = files.iter().map(|f| f["status"].as_str().unwrap()).collect();
    assert_eq!(statuses, ["matched", "skipped", "failed"]);
    assert_eq!(files[0]["selection"]["subtitle_relative_index"], 1);
    assert_eq!(files[1]["reason"]["kind"], "no_subtitle_streams");
}

#[test]
fn test_batch_missing_directory_is_error() {
    let dir = TempDir::new().unwrap();

    subpick(dir.path())
        .args(["batch", "--dir", "nope", "--probe-sidecar"])
        .assert()
        .code(1);
}

//! End-to-end tests for the `whois` binary against a temporary roster.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ROSTER: &str = r#"[
  {
    "name": "Alex",
    "id": "00000000-0000-0000-0000-00000000000a",
    "online": true,
    "game_mode": "Survival",
    "world": "world",
    "coordinates": {"x": 10.2, "y": 64.0, "z": -3.7},
    "first_joined": "2024-06-13T12:00:00Z",
    "last_joined": "2024-06-15T11:59:15Z",
    "ip_address": "203.0.113.7",
    "ban": {"state": "not_banned"}
  },
  {
    "name": "Steve",
    "id": "00000000-0000-0000-0000-00000000000b",
    "online": false,
    "first_joined": "2021-03-01T08:00:00Z",
    "ban": {
      "state": "banned",
      "source": "Alex",
      "reason": "griefing",
      "created": "2024-06-12T12:00:00Z",
      "expires": null
    }
  }
]"#;

const CONFIG: &str = r#"
locale    = "en_US"
time_zone = "UTC"

[permissions]
console = ["*"]
alex    = ["whois.command", "whois.other", "whois.all"]
steve   = ["whois.command"]
"#;

struct Env {
  dir: TempDir,
}

impl Env {
  fn new() -> Self {
    let dir = TempDir::new().expect("failed to create temp dir");
    write(dir.path(), "roster.json", ROSTER);
    write(dir.path(), "whois.toml", CONFIG);
    Self { dir }
  }

  fn whois(&self) -> Command {
    let mut cmd = Command::cargo_bin("whois").expect("whois binary");
    cmd
      .current_dir(self.dir.path())
      .env_remove("RUST_LOG")
      .env_remove("WHOIS_CONFIG")
      .args(["--now", "2024-06-15T12:00:00Z"]);
    cmd
  }
}

fn write(dir: &Path, name: &str, contents: &str) {
  fs::write(dir.join(name), contents).expect("failed to write fixture");
}

#[test]
fn console_report_with_all_fields() {
  let env = Env::new();
  env
    .whois()
    .args(["Alex", "--all"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "--------WHOIS--------\nName: Alex\nUUID: 00000000-0000-0000-0000-00000000000a\nStatus: ONLINE\n",
    ))
    .stdout(predicate::str::contains("Game Mode: Survival\nWorld: world\nCoordinates: (11, 64, -3)\n"))
    .stdout(predicate::str::contains("(2 days ago)"))
    .stdout(predicate::str::contains("(45 seconds ago)"))
    .stdout(predicate::str::contains("IP Address: 203.0.113.7\n"))
    .stdout(predicate::str::ends_with("User is not banned.\n"));
}

#[test]
fn only_requested_fields_appear() {
  let env = Env::new();
  env
    .whois()
    .args(["Alex", "-w", "-c"])
    .assert()
    .success()
    .stdout(predicate::str::contains("World: world"))
    .stdout(predicate::str::contains("Coordinates:"))
    .stdout(predicate::str::contains("Game Mode").not())
    .stdout(predicate::str::contains("IP Address").not());
}

#[test]
fn console_must_name_a_target() {
  let env = Env::new();
  env
    .whois()
    .assert()
    .failure()
    .stderr(predicate::str::contains("console must supply a target"));
}

#[test]
fn subject_without_target_inspects_itself() {
  let env = Env::new();
  env
    .whois()
    .args(["--as", "Steve", "-f"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Name: Steve"))
    .stdout(predicate::str::contains("Status: OFFLINE"))
    .stdout(predicate::str::contains("(3 years ago)"));
}

#[test]
fn inspecting_others_requires_permission() {
  let env = Env::new();
  env
    .whois()
    .args(["Alex", "--as", "Steve"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("permission denied: whois.other"));
}

#[test]
fn refused_requester_cannot_tell_who_exists() {
  let env = Env::new();
  for target in ["Alex", "Herobrine"] {
    env
      .whois()
      .args([target, "--as", "Guest"])
      .assert()
      .failure()
      .stderr(predicate::str::contains("permission denied: whois.command"))
      .stderr(predicate::str::contains("unknown subject").not());
  }
}

#[test]
fn show_all_requires_permission() {
  let env = Env::new();
  env
    .whois()
    .args(["--as", "Steve", "--all"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("permission denied: whois.all"));
}

#[test]
fn address_hidden_without_grant() {
  let env = Env::new();
  env
    .whois()
    .args(["Alex", "--as", "Alex", "--all", "--ip"])
    .assert()
    .success()
    .stdout(predicate::str::contains("World: world"))
    .stdout(predicate::str::contains("IP Address").not());
}

#[test]
fn ban_record_lines() {
  let env = Env::new();
  env
    .whois()
    .args(["Steve", "-b"])
    .assert()
    .success()
    .stdout(predicate::str::contains("User is banned by Alex (griefing)\n"))
    .stdout(predicate::str::contains("(3 days ago) until forever"));
}

#[test]
fn unknown_target_fails() {
  let env = Env::new();
  env
    .whois()
    .arg("Herobrine")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown subject"));
}

#[test]
fn json_output_lists_lines() {
  let env = Env::new();
  let output = env
    .whois()
    .args(["Alex", "-g", "--format", "json"])
    .output()
    .expect("run whois");
  assert!(output.status.success());

  let lines: serde_json::Value =
    serde_json::from_slice(&output.stdout).expect("valid json");
  assert_eq!(lines.as_array().map(Vec::len), Some(5));
  assert_eq!(
    lines[4],
    serde_json::json!({ "label": "Game Mode", "value": "Survival" })
  );
}

#[test]
fn unknown_locale_is_rejected() {
  let env = Env::new();
  env
    .whois()
    .args(["Alex", "--locale", "xx_XX"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown locale"));
}

//! Integration tests for the shalltell CLI

use predicates::prelude::*;

use crate::helpers::{fixtures_dir, TestConfig};

const FIXTURE_LINES: &str = concat!(
    "Host: Welcome back to the studio! Tonight's pun is a real ear-raiser.\n",
    "Kind Mentor: Oh, that was wonderful! 10 out of 10, no notes.\n",
    "Tsundere Coach: I-it's not like I laughed or anything... 6:10, fine.\n",
    "Logic Coach: Pun density is 1:3 words. Score: 7.\n",
    "Sharp-Tongued Master: \n",
    "Host: And that's the verdict: a solid 7.7 average!\n",
);

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    TestConfig::empty()
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("live"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("roster"));
}

#[test]
fn live_without_input_is_usage_error() {
    TestConfig::empty()
        .command()
        .arg("live")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<INPUT>"));
}

#[test]
fn completions_for_bash() {
    TestConfig::empty()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shalltell"));
}

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn parse_fixture_prints_dialogue_only() {
    let fixture = fixtures_dir().join("pun_roast.txt");
    TestConfig::empty()
        .command()
        .arg("parse")
        .arg(&fixture)
        .assert()
        .success()
        .stdout(FIXTURE_LINES);
}

#[test]
fn parse_json_from_stdin() {
    let output = TestConfig::empty()
        .command()
        .args(["parse", "-", "--json"])
        .write_stdin("*Logic Coach*: It's a 9:5 split\nnot dialogue\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["speaker"], "Logic Coach");
    assert_eq!(records[0]["text"], "It's a 9:5 split");
    assert_eq!(records[0]["role"], "participant");
}

#[test]
fn parse_missing_file_fails_with_message() {
    TestConfig::empty()
        .command()
        .args(["parse", "/no/such/script.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("script.txt"));
}

#[test]
fn parse_uses_configured_roster() {
    let config = TestConfig::with(
        r#"
[[roster]]
name = "Coach"
icon = "🏋"

[[roster]]
name = "Judge"
"#,
    );
    config
        .command()
        .args(["parse", "-"])
        .write_stdin("Coach: Nice try!\nHost: Let's begin.\nJudge: 7 out of 10\n")
        .assert()
        .success()
        .stdout("Coach: Nice try!\nJudge: 7 out of 10\n");
}

#[test]
fn invalid_config_is_reported() {
    TestConfig::with("[playback\n")
        .command()
        .arg("roster")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Play Tests
// ============================================================================

#[test]
fn play_from_stdin_prints_plain_lines() {
    TestConfig::empty()
        .command()
        .args(["play", "-"])
        .write_stdin("Host: We're live.\nstage noise\nLogic Coach: Odds are 3:1.\n")
        .assert()
        .success()
        .stdout("🤖 Host: We're live.\n🧐 Logic Coach: Odds are 3:1.\n");
}

#[test]
fn play_without_dialogue_shows_empty_state() {
    TestConfig::empty()
        .command()
        .args(["play", "-", "--no-animate"])
        .write_stdin("Sorry, I can't help with that.\n")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no lines"));
}

// ============================================================================
// Roster Tests
// ============================================================================

#[test]
fn roster_json_lists_studio_cast() {
    let output = TestConfig::empty()
        .command()
        .args(["roster", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cast = value.as_array().unwrap();
    assert_eq!(cast.len(), 7);
    assert_eq!(cast[0]["name"], "Host");
    assert_eq!(cast[0]["role"], "host");
}

#[test]
fn roster_text_marks_host() {
    TestConfig::empty()
        .command()
        .arg("roster")
        .assert()
        .success()
        .stdout(predicate::str::contains("Host (host)"))
        .stdout(predicate::str::contains("Gyaru Teacher"));
}

// ============================================================================
// Live Tests (scripted command backend)
// ============================================================================

#[cfg(unix)]
#[test]
fn live_with_command_backend_broadcasts_script() {
    let config = TestConfig::with(
        r#"
[generation]
backend = "command"
command = ["sh", "-c", "printf 'Host: Live now!\\nnarration\\nKind Mentor: Wonderful :)\\n'"]
"#,
    );
    config
        .command()
        .args(["live", "a cheesy pun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pun Public Execution"))
        .stdout(predicate::str::contains("🤖 Host: Live now!\n🌈 Kind Mentor: Wonderful :)\n"))
        .stdout(predicate::str::contains("narration").not());
}

#[cfg(unix)]
#[test]
fn live_with_opening_line_prepends_host() {
    let config = TestConfig::with(
        r#"
[generation]
backend = "command"
command = ["sh", "-c", "printf 'Big Sister: Lovely.\\n'"]

[playback]
synthesize_opening = true
"#,
    );
    config
        .command()
        .args(["live", "remote work", "--mode", "strategy-meeting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🤖 Host: We're live!"))
        .stdout(predicate::str::contains("Big Sister: Lovely."));
}

#[cfg(unix)]
#[test]
fn live_generation_failure_is_visible_error() {
    let config = TestConfig::with(
        r#"
[generation]
backend = "command"
command = ["sh", "-c", "echo 'quota exceeded' >&2; exit 1"]
"#,
    );
    config
        .command()
        .args(["live", "anything"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Broadcast failed"))
        .stderr(predicate::str::contains("quota exceeded"));
}

#[cfg(unix)]
#[test]
fn pun_prints_answer_as_is() {
    let config = TestConfig::with(
        r#"
[generation]
backend = "command"
command = ["sh", "-c", "printf '1. Lettuce celebrate\\n2. Romaine calm\\n'"]
"#,
    );
    config
        .command()
        .args(["pun", "salad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results for \"salad\":"))
        .stdout(predicate::str::contains("1. Lettuce celebrate\n2. Romaine calm"));
}

#[test]
fn live_with_unconfigured_command_backend_fails() {
    TestConfig::empty()
        .command()
        .args(["live", "anything", "--backend", "command"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("generation.command"));
}

#[test]
fn live_rejects_blank_input() {
    TestConfig::empty()
        .command()
        .args(["live", "   "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Enter a topic"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    TestConfig::empty()
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("char_delay_ms = 30"));
}

#[test]
fn config_migrate_yes_creates_file() {
    let config = TestConfig::empty();
    config
        .command()
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let content = std::fs::read_to_string(config.path()).unwrap();
    assert!(content.contains("[generation]"));
    assert!(content.contains("timeout_secs = 120"));
}

#[test]
fn config_migrate_without_yes_is_declined_when_not_interactive() {
    let config = TestConfig::empty();
    config
        .command()
        .args(["config", "migrate"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("use --yes"))
        .stdout(predicate::str::contains("No changes made."));

    assert!(!config.path().exists());
}

#[test]
fn config_migrate_adds_missing_fields_only() {
    let config = TestConfig::with("[playback]\nchar_delay_ms = 5\n");
    config
        .command()
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ line_pause_ms"));

    let content = std::fs::read_to_string(config.path()).unwrap();
    assert!(content.contains("char_delay_ms = 5"));
    assert!(content.contains("line_pause_ms = 1000"));

    config
        .command()
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

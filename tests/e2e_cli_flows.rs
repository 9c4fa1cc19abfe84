//! End-to-end CLI flows against real fixture directories (no mocks):
//! list, search, export, and the headless TUI pass.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lawv() -> Command {
    Command::cargo_bin("lawv").unwrap()
}

/// A root with a registry at the last candidate location and two documents.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("laws.json"),
        r#"[
            {"title":"Interpretation (Jersey) Law 1954","jurisdiction":"Jersey",
             "reference":"IL-1954","source":"Jersey Legal Information Board",
             "text_file":"il.txt"},
            {"title":"Dotted Law","reference":"DOT","text_file":"dot.txt"},
            {"title":"Orphan Law","reference":"ORPHAN"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("il.txt"),
        "Article 1.\nThe Act applies.\nSo says the act.\n",
    )
    .unwrap();
    fs::write(dir.path().join("dot.txt"), "a.b and c.d but no dots here? yes.").unwrap();
    dir
}

fn root_arg(dir: &TempDir) -> &str {
    dir.path().to_str().unwrap()
}

#[test]
fn list_prints_all_entries() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"))
        .stdout(predicate::str::contains("Interpretation (Jersey) Law 1954"))
        .stdout(predicate::str::contains("IL-1954"))
        .stdout(predicate::str::contains("Jersey"));
}

#[test]
fn list_without_registry_names_every_candidate() {
    let dir = TempDir::new().unwrap();
    lawv()
        .args(["--root", root_arg(&dir), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data/laws/jersey/laws.json"))
        .stderr(predicate::str::contains("data/laws/laws.json"))
        .stderr(predicate::str::contains("laws.json"));
}

#[test]
fn search_reports_match_positions() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "search", "IL-1954", "the act"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches: 2"))
        .stdout(predicate::str::contains("Viewing 1 of 2"))
        .stdout(predicate::str::contains("1: bytes"))
        .stdout(predicate::str::contains("(line 2)"));
}

#[test]
fn search_query_is_literal_not_a_pattern() {
    let dir = fixture();
    // "." must match the three literal dots, not every character.
    lawv()
        .args(["--root", root_arg(&dir), "search", "DOT", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches: 3"));
}

#[test]
fn search_distinguishes_cleared_from_no_results() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "search", "IL-1954", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared search."));

    lawv()
        .args(["--root", root_arg(&dir), "search", "IL-1954", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results for"));
}

#[test]
fn search_finds_entry_by_title_too() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "search", "dotted law", "yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches: 1"));
}

#[test]
fn search_unknown_reference_fails_with_hint() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "search", "NOPE", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lawv list"));
}

#[test]
fn export_writes_the_exact_bytes() {
    let dir = fixture();
    let out = TempDir::new().unwrap();
    lawv()
        .args([
            "--root",
            root_arg(&dir),
            "export",
            "IL-1954",
            "--out-dir",
            out.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("il-1954.txt"));

    let exported = fs::read(out.path().join("il-1954.txt")).unwrap();
    let original = fs::read(dir.path().join("il.txt")).unwrap();
    assert_eq!(exported, original);
}

#[test]
fn export_without_text_locator_fails() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "export", "ORPHAN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text file locator"));
}

#[test]
fn html_body_is_rejected_as_law_text() {
    let dir = fixture();
    fs::write(
        dir.path().join("dot.txt"),
        "<!DOCTYPE html><html><body>404 Not Found</body></html>",
    )
    .unwrap();

    lawv()
        .args(["--root", root_arg(&dir), "search", "DOT", "404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("looks like an HTML page"));
}

#[test]
fn tui_once_loads_registry_and_first_document() {
    let dir = fixture();
    lawv()
        .args(["--root", root_arg(&dir), "tui", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("registry: 3 entries"))
        .stdout(predicate::str::contains("loaded: Interpretation (Jersey) Law 1954"));
}

#[test]
fn tui_once_without_registry_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    lawv()
        .args(["--root", root_arg(&dir), "tui", "--once"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("laws registry"));
}

#[test]
fn registry_priority_is_visible_through_the_cli() {
    let dir = fixture();
    let preferred = dir.path().join("data/laws/jersey");
    fs::create_dir_all(&preferred).unwrap();
    fs::write(
        preferred.join("laws.json"),
        r#"[{"title":"Preferred Entry"}]"#,
    )
    .unwrap();

    lawv()
        .args(["--root", root_arg(&dir), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("Preferred Entry"));
}

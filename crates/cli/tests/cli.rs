use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn write_post(dir: &TempDir, name: &str, front: &str) {
    let content = format!("---\n{}\n---\n\nBody of {}.\n", front.trim(), name);
    fs::write(dir.path().join(name), content).expect("write post");
}

fn seed_posts(dir: &TempDir) {
    write_post(
        dir,
        "uart.md",
        "id: p1\nslug: uart-driver\ntitle: Writing a UART driver\ndate: 2024-01-05\ndomain: Firmware\ntags: [embedded, c]\nreadTime: 6 min",
    );
    write_post(
        dir,
        "k8s.md",
        "id: p2\nslug: k8s-rollouts\ntitle: Safer rollouts\ndate: 2024-03-10\ndomain: DevOps\ntags: [kubernetes]\nfeatured: true",
    );
    write_post(
        dir,
        "ssh.md",
        "id: p3\nslug: ssh-hardening\ntitle: Hardening SSH\ndate: 2024-02-01\ndomain: Security\ntags: [linux, ssh]",
    );
}

fn run_json(args: &[&str], dir: &TempDir) -> Value {
    let mut cmd = cargo_bin_cmd!("folio");
    let output = cmd
        .current_dir(dir.path())
        .args(args)
        .arg("--content-dir")
        .arg(dir.path())
        .arg("--json")
        .output()
        .expect("run folio");

    assert!(output.status.success(), "folio {:?} failed", args);
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("folio.toml");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("[content]"));
    assert!(content.contains("GHOST_CONTENT_API_KEY"));

    let mut again = cargo_bin_cmd!("folio");
    again
        .args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn list_orders_newest_first_and_features_flagged_post() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let value = run_json(&["list"], &dir);

    let titles: Vec<&str> = value["grid"]["cards"]
        .as_array()
        .expect("cards")
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Safer rollouts", "Hardening SSH", "Writing a UART driver"]
    );
    assert_eq!(value["featured"]["title"], "Safer rollouts");
    assert_eq!(value["empty"], false);
}

#[test]
fn list_filters_by_domain_and_ignores_unknown_domain() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let value = run_json(&["list", "--domain", "firmware"], &dir);
    let cards = value["grid"]["cards"].as_array().expect("cards");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["title"], "Writing a UART driver");
    assert_eq!(value["filters"]["selected_domain"], "Firmware");

    let value = run_json(&["list", "--domain", "gardening"], &dir);
    assert_eq!(value["grid"]["cards"].as_array().expect("cards").len(), 3);
    assert!(value["filters"]["selected_domain"].is_null());
}

#[test]
fn list_clamps_page_beyond_range() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let value = run_json(&["list", "--page-size", "2", "--page", "9"], &dir);

    assert_eq!(value["grid"]["current_page"], 2);
    assert_eq!(value["grid"]["total_pages"], 2);
    assert_eq!(value["grid"]["cards"].as_array().expect("cards").len(), 1);
}

#[test]
fn list_without_content_shows_empty_state() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.current_dir(dir.path())
        .args(["list", "--content-dir"])
        .arg(dir.path().join("missing"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Check back soon"));
}

#[test]
fn list_skips_invalid_record() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);
    write_post(&dir, "broken.md", "id: p9\nslug: broken");

    let value = run_json(&["list"], &dir);

    assert_eq!(value["grid"]["total_items"], 3);
}

#[test]
fn show_renders_post_and_fails_on_unknown_slug() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let value = run_json(&["show", "uart-driver"], &dir);
    assert_eq!(value["post"]["id"], "p1");
    assert_eq!(value["banner"]["read_time_label"], "6 min read");
    assert_eq!(value["breadcrumbs"].as_array().expect("breadcrumbs").len(), 3);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.current_dir(dir.path())
        .args(["show", "no-such-post", "--content-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Post not found"));
}

#[test]
fn facets_count_every_domain() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let value = run_json(&["facets"], &dir);

    let domains = value["domain_counts"].as_array().expect("domains");
    assert_eq!(domains.len(), 5);
    let projects = domains
        .iter()
        .find(|d| d["key"] == "Projects")
        .expect("projects facet");
    assert_eq!(projects["count"], 0);
}

#[test]
fn content_validate_fails_on_missing_title() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);
    write_post(&dir, "broken.md", "id: p9\nslug: broken");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.current_dir(dir.path())
        .args(["content", "validate", "--content-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed"))
        .stdout(predicate::str::contains("title"));
}

#[test]
fn content_validate_passes_on_clean_dir() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.current_dir(dir.path())
        .args(["content", "validate", "--content-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 posts"));
}

#[test]
fn show_matches_listing_for_duplicate_slug() {
    let dir = TempDir::new().expect("temp dir");
    write_post(
        &dir,
        "a-old.md",
        "id: old\nslug: same\ntitle: Old take\ndate: 2020-01-01",
    );
    write_post(
        &dir,
        "b-new.md",
        "id: new\nslug: same\ntitle: New take\ndate: 2024-01-01",
    );

    let listing = run_json(&["list"], &dir);
    let shown = run_json(&["show", "same"], &dir);

    let cards = listing["grid"]["cards"].as_array().expect("cards");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["title"], "New take");
    assert_eq!(shown["post"]["id"], "new");
}

#[test]
fn content_validate_fails_on_missing_config_file() {
    let dir = TempDir::new().expect("temp dir");
    seed_posts(&dir);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["content", "validate", "--content-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

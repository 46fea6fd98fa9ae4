//! E2E CLI tests: every `roadnet` command against a small hand-over file.
//!
//! The network, in ingestion keys:
//!
//! ```text
//! Main St: 1 - 2 - 3        (two-way, travel time 1 per segment)
//! 1st Ave:         3 - 4 - 5
//! Oak:     5 -> 1           (one-way, travel time 2)
//! ```
//!
//! Keys are reindexed densely, so key `k` becomes node `k - 1`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NETWORK: &str = r#"{
    "nodes": [
        {"key": 1, "x": -111.90, "y": 40.76},
        {"key": 3, "x": -111.88, "y": 40.76}
    ],
    "segments": [
        {"from": 1, "to": 2, "name": "Main St", "length": 100, "speed_limit": 25, "travel_time": 1.0, "one_way": 0},
        {"from": 2, "to": 3, "name": "Main St", "length": 100, "speed_limit": 25, "travel_time": 1.0, "one_way": 0},
        {"from": 3, "to": 4, "name": "1st Ave", "length": 100, "speed_limit": 25, "travel_time": 1.0, "one_way": 0},
        {"from": 4, "to": 5, "name": "1st Ave", "length": 100, "speed_limit": 25, "travel_time": 1.0, "one_way": 0},
        {"from": 5, "to": 1, "name": "Oak", "length": 500, "speed_limit": 0, "travel_time": 2.0, "one_way": 1}
    ]
}"#;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

struct Fixture {
    dir: TempDir,
    network: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let network = dir.path().join("net.json");
    std::fs::write(&network, NETWORK).expect("write network");
    Fixture { dir, network }
}

/// Build a Command targeting the `roadnet` binary, rooted in `dir`.
fn roadnet(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roadnet").expect("roadnet binary must exist");
    cmd.current_dir(dir);
    cmd.env("ROADNET_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd.env_remove("ROADNET_FORMAT");
    cmd
}

impl Fixture {
    fn cmd(&self) -> Command {
        let mut cmd = roadnet(self.dir.path());
        cmd.arg("--network").arg(&self.network);
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .output()
            .expect("roadnet should not crash");
        assert!(
            output.status.success(),
            "roadnet {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }

    fn error_code(&self, args: &[&str]) -> String {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .output()
            .expect("roadnet should not crash");
        assert!(!output.status.success(), "roadnet {args:?} should fail");
        let err: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
        err["error"]["error_code"]
            .as_str()
            .expect("error code present")
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[test]
fn stats_reports_shape() {
    let f = fixture();
    let stats = f.json(&["stats"]);
    assert_eq!(stats["node_count"], 5);
    assert_eq!(stats["edge_count"], 9);
    assert_eq!(stats["one_way_edge_count"], 1);
    assert_eq!(stats["weakly_connected_component_count"], 1);
    assert_eq!(stats["road_name_count"], 3);
}

#[test]
fn stats_text_output() {
    let f = fixture();
    f.cmd()
        .args(["stats", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes 5"))
        .stdout(predicate::str::contains("edges 9"));
}

#[test]
fn paths_to_target_lists_route() {
    let f = fixture();
    let route = f.json(&["paths", "--source", "0", "--target", "4"]);
    assert_eq!(route["distance"], 4.0);
    assert_eq!(route["path"], serde_json::json!([0, 1, 2, 3, 4]));
}

#[test]
fn paths_map_covers_every_node() {
    let f = fixture();
    let map = f.json(&["paths", "--source", "4"]);
    assert_eq!(map["reachable"], 5);
    let rows = map["distances"].as_array().expect("rows");
    assert_eq!(rows.len(), 5);
    // 4 → 0 takes the one-way Oak edge instead of four chain hops.
    assert_eq!(rows[0]["distance"], 2.0);
    assert_eq!(rows[0]["predecessor"], 4);
    assert_eq!(rows[4]["distance"], 0.0);
}

#[test]
fn intersections_text_is_one_node_per_line() {
    let f = fixture();
    f.cmd()
        .args(["intersections", "Main St", "1st Ave", "--format", "text"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn intersections_json_carries_keys_and_coordinates() {
    let f = fixture();
    let report = f.json(&["intersections", "Main St", "1st Ave"]);
    let nodes = report["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["node"], 2);
    assert_eq!(nodes[0]["key"], 3);
    assert_eq!(nodes[0]["coordinate"]["x"], -111.88);
}

#[test]
fn remoteness_at_junction() {
    let f = fixture();
    f.cmd()
        .args(["remoteness", "--at", "Main St", "1st Ave", "--format", "text"])
        .assert()
        .success()
        .stdout("2 1.500000\n");
}

#[test]
fn remoteness_from_source_json() {
    let f = fixture();
    let report = f.json(&["remoteness", "--source", "2"]);
    assert_eq!(report["sources"][0]["node"], 2);
    assert_eq!(report["sources"][0]["remoteness"], 1.5);
}

#[test]
fn load_full_sample_is_deterministic_and_bounded() {
    let f = fixture();
    let a = f.json(&["load", "Main St", "--sample-size", "5", "--seed", "11"]);
    let b = f.json(&["load", "Main St", "--sample-size", "5", "--seed", "11"]);
    assert_eq!(a, b);
    assert_eq!(a["seed"], 11);

    let edges = a["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 4);
    for edge in edges {
        let load = edge["load"].as_f64().expect("numeric load");
        assert!((0.0..=1.0).contains(&load));
    }
    assert_eq!(a["segments"].as_array().expect("segments").len(), 2);
}

#[test]
fn efficiency_exhaustive_and_sampled() {
    let f = fixture();
    let full = f.json(&["efficiency", "--exhaustive"]);
    assert_eq!(full["mode"], "exhaustive");
    assert!(full.get("seed").is_none());
    let value = full["efficiency"].as_f64().expect("numeric");
    assert!(value > 0.0 && value < 1.0);

    let sampled = f.json(&["efficiency", "--sample-size", "5", "--seed", "2"]);
    assert_eq!(sampled["mode"], "sampled");
    // A full sample visits every pair, so it matches the exhaustive value.
    let sampled_value = sampled["efficiency"].as_f64().expect("numeric");
    assert!((sampled_value - value).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_node_is_e2001() {
    assert_eq!(fixture().error_code(&["remoteness", "--source", "99"]), "E2001");
    assert_eq!(fixture().error_code(&["paths", "--source", "0", "--target", "99"]), "E2001");
}

#[test]
fn unknown_road_is_e2002() {
    assert_eq!(fixture().error_code(&["load", "Nowhere"]), "E2002");
    assert_eq!(fixture().error_code(&["intersections", "Main St", "Nowhere"]), "E2002");
}

#[test]
fn bad_sample_size_is_e2003() {
    assert_eq!(fixture().error_code(&["efficiency", "--sample-size", "1"]), "E2003");
    assert_eq!(fixture().error_code(&["load", "Main St", "--sample-size", "6"]), "E2003");
}

#[test]
fn human_errors_carry_suggestion() {
    let f = fixture();
    f.cmd()
        .args(["load", "Nowhere", "--format", "pretty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]: road not found: Nowhere"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn missing_network_fails_with_guidance() {
    let dir = TempDir::new().expect("temp dir");
    roadnet(dir.path())
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no network given"));
}

#[test]
fn malformed_network_names_the_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"segments\": [{\"from\": 1}]}").expect("write");
    roadnet(dir.path())
        .arg("--network")
        .arg(&path)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

// ---------------------------------------------------------------------------
// Configuration and synthetic networks
// ---------------------------------------------------------------------------

#[test]
fn config_file_supplies_network_and_sample_size() {
    let f = fixture();
    std::fs::write(
        f.dir.path().join("roadnet.toml"),
        "[sampling]\nseed = 4\nload_sample_size = 5\n\n[network]\npath = \"net.json\"\n",
    )
    .expect("write config");

    let output = roadnet(f.dir.path())
        .args(["load", "1st Ave", "--json"])
        .output()
        .expect("runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["seed"], 4);
    assert_eq!(report["sample"].as_array().expect("sample").len(), 5);
}

#[test]
fn synthetic_network_has_one_one_way_edge() {
    let dir = TempDir::new().expect("temp dir");
    let output = roadnet(dir.path())
        .args(["--synthetic", "30", "--seed", "5", "stats", "--json"])
        .output()
        .expect("runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stats: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(stats["node_count"], 30);
    assert_eq!(stats["edge_count"], 30 * 4 - 1);
    assert_eq!(stats["one_way_edge_count"], 1);
}

#[test]
fn completions_are_generated() {
    let dir = TempDir::new().expect("temp dir");
    roadnet(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roadnet"));
}

use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, is_match};
use std::fs;

mod common;
use common::{db_path, scratch_dir, vev, write_dataset};

fn home(dir: &std::path::Path) -> String {
    dir.to_string_lossy().to_string()
}

#[test]
fn test_pairs_json_to_stdout() {
    let dir = scratch_dir("cli_pairs_json");
    let input = write_dataset(&dir);

    let out = vev(&home(&dir))
        .args(["pairs", "--input", &input])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let pairs: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON on stdout");
    let pairs = pairs.as_array().unwrap();
    assert_eq!(pairs.len(), 7);
    assert_eq!(pairs[0]["imageId"], "img_b");
    assert_eq!(pairs[0]["modelName"], "original");
    assert_eq!(pairs[0]["modelRawResponse"], "Ground truth semantic contacts");
    assert_eq!(pairs[4]["modelName"], "gemini");
    assert_eq!(pairs[4]["modelRawResponse"], "resp");
}

#[test]
fn test_pairs_model_filter() {
    let dir = scratch_dir("cli_pairs_filter");
    let input = write_dataset(&dir);

    let out = vev(&home(&dir))
        .args(["pairs", "--input", &input, "--model", "llama4_scout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let pairs: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| p["modelName"] == "llama4_scout"));
}

#[test]
fn test_pairs_seeded_shuffle_is_stable() {
    let dir = scratch_dir("cli_pairs_seed");
    let input = write_dataset(&dir);

    let run = || {
        vev(&home(&dir))
            .args(["pairs", "--input", &input, "--seed", "11"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    let a: Vec<serde_json::Value> = serde_json::from_slice(&run()).unwrap();
    let b: Vec<serde_json::Value> = serde_json::from_slice(&run()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 7);
}

#[test]
fn test_pairs_csv_to_file() {
    let dir = scratch_dir("cli_pairs_csv");
    let input = write_dataset(&dir);
    let out = dir.join("pairs.csv").to_string_lossy().to_string();

    vev(&home(&dir))
        .args([
            "pairs", "--input", &input, "--format", "csv", "--out", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed: 7 pairs"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "image_id,model_name,image_url,original_contacts,model_contacts,model_raw_response"
    );
    assert_eq!(content.lines().count(), 8);
    assert!(content.contains("img_a,gemini,"));
}

#[test]
fn test_pairs_unknown_model_fails() {
    let dir = scratch_dir("cli_pairs_bad_model");
    let input = write_dataset(&dir);

    vev(&home(&dir))
        .args(["pairs", "--input", &input, "--model", "gpt"])
        .assert()
        .failure()
        .stderr(contains("Invalid model name: gpt"));
}

#[test]
fn test_pairs_missing_input_fails() {
    let dir = scratch_dir("cli_pairs_missing");

    vev(&home(&dir))
        .args(["pairs", "--input", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(contains("I/O error"));
}

#[test]
fn test_user_id_command() {
    let dir = scratch_dir("cli_user_id");

    vev(&home(&dir))
        .arg("user-id")
        .assert()
        .success()
        .stdout(is_match(r"^user_\d+_[0-9a-z]{9}\n$").unwrap());
}

#[test]
fn test_full_annotation_flow() {
    let dir = scratch_dir("cli_flow");
    let h = home(&dir);
    let input = write_dataset(&dir);
    let db = db_path(&dir);
    let pairs_out = dir.join("session_pairs.json").to_string_lossy().to_string();

    vev(&h)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    vev(&h)
        .args([
            "--db", &db, "session", "--input", &input, "--user", "user_1_abcdefghi", "--seed",
            "4", "--out", &pairs_out,
        ])
        .assert()
        .success()
        .stdout(contains("user_1_abcdefghi").and(contains("Session started.")));

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&pairs_out).unwrap()).unwrap();
    assert_eq!(written.len(), 7);

    vev(&h)
        .args([
            "--db",
            &db,
            "score",
            "--user",
            "user_1_abcdefghi",
            "--input",
            &input,
            "--image",
            "img_a",
            "--model",
            "gemini",
            "--score",
            "3.5",
            "--missed",
            "2",
        ])
        .assert()
        .success()
        .stdout(contains("recorded for img_a/gemini").and(contains("1/7")));

    vev(&h)
        .args(["--db", &db, "sessions", "--user", "user_1_abcdefghi"])
        .assert()
        .success()
        .stdout(contains("1/7 (14%)"));

    vev(&h)
        .args(["--db", &db, "evaluations", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"model_name\": \"gemini\"")
                .and(contains("\"score\": 3.5"))
                .and(contains("\"missed_interactions\": 2")),
        );

    vev(&h)
        .args(["--db", &db, "evaluations"])
        .assert()
        .success()
        .stdout(contains("img_a").and(contains("1 evaluations")));

    vev(&h)
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("init")
                .and(contains("session_start"))
                .and(contains("score")),
        );

    vev(&h)
        .args(["--db", &db, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Sessions:").and(contains("Evaluations:")));
}

#[test]
fn test_score_unknown_pair_fails() {
    let dir = scratch_dir("cli_score_unknown");
    let h = home(&dir);
    let input = write_dataset(&dir);
    let db = db_path(&dir);

    vev(&h)
        .args([
            "--db", &db, "score", "--user", "u", "--input", &input, "--image", "img_a",
            "--model", "llama4_scout",
        ])
        .assert()
        .failure()
        .stderr(contains("No evaluation pair for image 'img_a'"));
}

#[test]
fn test_environment_endpoint_is_used() {
    let dir = scratch_dir("cli_env_endpoint");
    let h = home(&dir);
    let input = write_dataset(&dir);
    let db = db_path(&dir);

    vev(&h)
        .env("VISION_EVAL_DB_URL", format!("sqlite://{db}"))
        .args(["session", "--input", &input, "--user", "env-user"])
        .assert()
        .success();

    // same database, addressed through --db this time
    vev(&h)
        .args(["--db", &db, "sessions"])
        .assert()
        .success()
        .stdout(contains("env-user"));
}

#[test]
fn test_remote_endpoint_rejected() {
    let dir = scratch_dir("cli_remote");

    vev(&home(&dir))
        .args(["--db", "https://example.invalid", "sessions"])
        .assert()
        .failure()
        .stderr(contains("Unsupported database endpoint"));
}

#[test]
fn test_config_print_masks_key() {
    let dir = scratch_dir("cli_config_print");

    vev(&home(&dir))
        .env("VISION_EVAL_ANON_KEY", "supersecretkey")
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("**********tkey").and(contains("supersecretkey").not()));
}

#[test]
fn test_init_writes_config_file() {
    let dir = scratch_dir("cli_init_config");

    vev(&home(&dir))
        .args(["--db", "custom.sqlite", "init"])
        .assert()
        .success();

    let conf = dir.join(".vision-eval").join("vision-eval.conf");
    let content = fs::read_to_string(&conf).expect("config file written");
    assert!(content.contains("custom.sqlite"));

    vev(&home(&dir))
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("complete"));
}

#[test]
fn test_existing_output_kept_when_overwrite_declined() {
    let dir = scratch_dir("cli_overwrite_declined");
    let input = write_dataset(&dir);
    let out = dir.join("pairs.json");
    fs::write(&out, "keep me").unwrap();
    let out = out.to_string_lossy().to_string();

    vev(&home(&dir))
        .args(["pairs", "--input", &input, "--out", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("pairs not written"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");
}

#[test]
fn test_existing_output_replaced_when_confirmed() {
    let dir = scratch_dir("cli_overwrite_confirmed");
    let input = write_dataset(&dir);
    let out = dir.join("pairs.json");
    fs::write(&out, "old").unwrap();
    let out = out.to_string_lossy().to_string();

    vev(&home(&dir))
        .args(["pairs", "--input", &input, "--out", &out])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("JSON export completed: 7 pairs"));

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.len(), 7);
}

#[test]
fn test_rescoring_keeps_session_progress() {
    let dir = scratch_dir("cli_rescore");
    let h = home(&dir);
    let input = write_dataset(&dir);
    let db = db_path(&dir);

    vev(&h)
        .args(["--db", &db, "session", "--input", &input, "--user", "u1"])
        .assert()
        .success();

    for score in ["1", "2"] {
        vev(&h)
            .args([
                "--db", &db, "score", "--user", "u1", "--input", &input, "--image", "img_b",
                "--model", "gemini", "--score", score,
            ])
            .assert()
            .success();
    }

    vev(&h)
        .args(["--db", &db, "sessions", "--user", "u1"])
        .assert()
        .success()
        .stdout(contains("1/7 (14%)"));
}

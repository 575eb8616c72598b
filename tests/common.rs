#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Dataset used across the tests: three images, every combination of
/// present/absent inference results we care about.
pub const SAMPLE_DATASET: &str = r#"{
  "img_b": {
    "image_id": "img_b",
    "original_semantic_contacts": ["hand-cup", "foot-floor"],
    "llama4_scout_inference_contacts": ["hand-cup"],
    "llama4_scout_inference_raw": "contacts: hand-cup",
    "gemini_inference_contacts": ["hand-cup", "foot-floor", "head-wall"],
    "gemini_inference_raw": "{\"contacts\": [\"hand-cup\", \"foot-floor\", \"head-wall\"]}"
  },
  "img_a": {
    "image_id": "img_a",
    "original_semantic_contacts": ["a"],
    "llama4_scout_inference_contacts": null,
    "llama4_scout_inference_raw": "",
    "gemini_inference_contacts": ["b"],
    "gemini_inference_raw": "resp"
  },
  "img_c": {
    "image_id": "img_c",
    "original_semantic_contacts": [],
    "llama4_scout_inference_contacts": [],
    "llama4_scout_inference_raw": "not json at all",
    "gemini_inference_contacts": null,
    "gemini_inference_raw": ""
  }
}"#;

/// Binary under test, isolated from the user's home and environment.
pub fn vev(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("vision-eval");
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env_remove("VISION_EVAL_DB_URL")
        .env_remove("VISION_EVAL_ANON_KEY");
    cmd
}

/// Fresh scratch directory inside the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("vision_eval_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create scratch dir");
    path
}

/// Write the sample dataset into `dir` and return its path.
pub fn write_dataset(dir: &PathBuf) -> String {
    let path = dir.join("results.json");
    fs::write(&path, SAMPLE_DATASET).expect("write dataset");
    path.to_string_lossy().to_string()
}

pub fn db_path(dir: &PathBuf) -> String {
    dir.join("eval.sqlite").to_string_lossy().to_string()
}

pub fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

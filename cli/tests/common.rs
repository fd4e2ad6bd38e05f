//! # Luxe CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `luxe` binary against its own temporary data directory, so
//! tests never see each other's `local_storage.json`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// `luxe` binary for the current test run.
pub fn luxe_cmd() -> Command {
    let mut cmd = Command::cargo_bin("luxe").expect("Failed to find luxe binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("LUXE_DATA_DIR");
    cmd
}

/// `luxe` bound to `dir` as both data directory and working directory.
pub fn luxe_in(dir: &TempDir) -> Command {
    let mut cmd = luxe_cmd();
    cmd.env("LUXE_DATA_DIR", dir.path()).current_dir(dir.path());
    cmd
}

pub fn data_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp data dir")
}

/// Parsed `adminNotifications` array from the storage file in `dir`.
pub fn stored_notifications(dir: &Path) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(dir.join("local_storage.json"))
        .expect("storage file should exist");
    let map: serde_json::Value = serde_json::from_str(&raw).expect("storage file is JSON");
    match map.get("adminNotifications").and_then(|v| v.as_str()) {
        Some(array) => serde_json::from_str(array).expect("notifications are a JSON array"),
        None => Vec::new(),
    }
}

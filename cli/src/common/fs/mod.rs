//! # Luxe Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! Filesystem helpers used by the storage backend and the data exporter.
//! Import the submodule directly, e.g. `crate::common::fs::io::write_string_atomic`.
//!

/// Contains basic file I/O operations (e.g., `ensure_dir_exists`, `write_string_atomic`).
pub mod io;

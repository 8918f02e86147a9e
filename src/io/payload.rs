//! Read raw statistics payloads from disk.
//!
//! Useful for replaying a response captured from the backend (e.g. saved from
//! the browser's network tab) through the same pipeline as a live fetch.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, EXIT_CONFIG, EXIT_VALIDATION};

/// Read a JSON document from `path` without interpreting it.
pub fn read_payload_json(path: &Path) -> Result<Value, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_CONFIG, format!("Failed to open payload JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_VALIDATION, format!("Invalid payload JSON '{}': {e}", path.display())))
}

//! Shared test utilities for the permguard workspace.
//!
//! `xtask` needs [`normalize_nondeterministic`] at runtime, so this lives in a regular crate
//! rather than behind `#[cfg(test)]`.

use serde_json::Value;
use std::path::{Path, PathBuf};

const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
const VERSION_PLACEHOLDER: &str = "__VERSION__";
const TIMESTAMP_KEYS: &[&str] = &["started_at", "ended_at"];
const ENVELOPE_KEYS: &[&str] = &["schema", "tool", "run", "verdict", "findings", "data"];

/// Normalize the fields of a receipt that change between runs.
///
/// - `tool.version` is replaced only on a root object that carries every envelope key, so a
///   finding payload that happens to contain `tool` is left alone.
/// - `started_at`, `ended_at` and `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut()
        && ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k))
        && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }
    normalize_run_fields(&mut value);
    value
}

fn normalize_run_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(v) = map.get_mut(*key)
                    && !v.is_null()
                {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            if let Some(v) = map.get_mut("duration_ms")
                && !v.is_null()
            {
                *v = Value::Number(0.into());
            }
            map.values_mut().for_each(normalize_run_fields);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_run_fields),
        _ => {}
    }
}

/// `tests/fixtures` at the workspace root, given a crate's `CARGO_MANIFEST_DIR`.
pub fn fixtures_dir(manifest_dir: &str) -> PathBuf {
    let mut dir = Path::new(manifest_dir).to_path_buf();
    while !dir.join("tests").join("fixtures").is_dir() {
        if !dir.pop() {
            break;
        }
    }
    dir.join("tests").join("fixtures")
}

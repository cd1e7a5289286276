//! Developer tasks (schema generation, fixture validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use permguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// The workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    match manifest_dir.parent() {
        Some(parent) if manifest_dir.ends_with("xtask") => parent.to_path_buf(),
        _ => manifest_dir,
    }
}

fn schemas_dir(root: &Path) -> PathBuf {
    root.join("schemas")
}

fn fixtures_dir(root: &Path) -> PathBuf {
    root.join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(permguard_types::PermguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(permguard_settings::PermguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "permguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "permguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas(root: &Path) -> anyhow::Result<()> {
    let dir = schemas_dir(root);
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Check that the schemas in the repo match what would be generated.
fn validate_schemas(root: &Path) -> anyhow::Result<()> {
    let dir = schemas_dir(root);
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Validate every `expected.report.json` under `tests/fixtures` against the report schema.
///
/// Also checks that finding paths are project-relative and that verdict reasons are
/// snake_case tokens.
fn validate_fixtures(root: &Path) -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("report schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("compile report schema: {e}"))?;

    let dir = fixtures_dir(root);
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.join("expected.report.json").is_file())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for fixture in &entries {
        let name = fixture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(fixture.join("expected.report.json"))
            .with_context(|| format!("read {name}/expected.report.json"))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("parse {name}"))?;
        let value = normalize_nondeterministic(value);

        for err in validator.iter_errors(&value) {
            errors.push(format!("{name}: schema: {err}"));
        }
        errors.extend(receipt_hygiene(&value).into_iter().map(|e| format!("{name}: {e}")));
    }

    if errors.is_empty() {
        println!("✓ {} fixture receipts validate", entries.len());
        return Ok(());
    }
    for err in &errors {
        eprintln!("  - {}", err);
    }
    bail!("fixture validation failed with {} errors", errors.len())
}

fn receipt_hygiene(value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let findings = value
        .get("findings")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (i, finding) in findings.iter().enumerate() {
        if let Some(path) = finding
            .pointer("/location/path")
            .and_then(|v| v.as_str())
            .filter(|p| !is_clean_path(p))
        {
            errors.push(format!("findings[{i}].location.path '{path}' is not clean"));
        }
    }

    let reasons = value
        .pointer("/verdict/reasons")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (i, reason) in reasons.iter().enumerate() {
        if let Some(s) = reason.as_str().filter(|s| !is_valid_token(s)) {
            errors.push(format!("verdict.reasons[{i}] '{s}' is not a valid token"));
        }
    }

    errors
}

/// Token pattern for codes and verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// No absolute paths, no `..`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Every built-in rule id and code must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    use permguard_types::explain::{all_codes, all_rule_ids, lookup_explanation};

    let mut errors = Vec::new();
    for (kind, id) in all_rule_ids()
        .iter()
        .map(|id| ("Rule id", id))
        .chain(all_codes().iter().map(|code| ("Code", code)))
    {
        match lookup_explanation(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                    ("examples.after", exp.examples.after),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("{kind} '{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule ids have explanations", all_rule_ids().len());
        println!("✓ {} codes have explanations", all_codes().len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check if schemas/ matches generated output (for CI)");
    eprintln!("  validate-fixtures  Validate fixture receipts against the report schema");
    eprintln!("  explain-coverage   Validate all rule ids and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let root = project_root();

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(&root),
        "validate-schemas" => validate_schemas(&root),
        "validate-fixtures" => validate_fixtures(&root),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}

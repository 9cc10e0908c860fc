//! Artifact validation tests for anchor-policy.
// crates/anchor-policy/tests/pack_artifacts.rs
// ============================================================================
// Module: Pack Artifact Validation Tests
// Description: Validate the schema, example, and docs generators together.
// Purpose: Prevent drift between policy model and generated artifacts.
// Dependencies: anchor-policy, jsonschema, tempfile
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anchor_policy::PolicyPackConfig;
use anchor_policy::default_policy_pack;
use anchor_policy::policy_docs_markdown;
use anchor_policy::policy_update_json_example;
use anchor_policy::policy_update_schema;
use anchor_policy::verify_policy_docs;
use anchor_policy::write_policy_docs;
use jsonschema::Draft;
use serde_json::Value;

type TestResult = Result<(), String>;

#[test]
fn example_payload_validates_against_schema() -> TestResult {
    let schema = policy_update_schema();
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())?;
    let example: Value =
        serde_json::from_str(&policy_update_json_example()).map_err(|err| err.to_string())?;
    if !validator.is_valid(&example) {
        return Err("example payload should validate".to_string());
    }
    Ok(())
}

#[test]
fn example_payload_matches_builder_output() -> TestResult {
    let example: Value =
        serde_json::from_str(&policy_update_json_example()).map_err(|err| err.to_string())?;
    let built = default_policy_pack(&PolicyPackConfig {
        allowed_domains: Some(vec!["docs.example.com".to_string(), "api.example.com".to_string()]),
        ..PolicyPackConfig::default()
    });
    if example != built.to_value() {
        return Err("example drifted from the builder output".to_string());
    }
    Ok(())
}

#[test]
fn docs_generate_deterministically() -> TestResult {
    let first = policy_docs_markdown().map_err(|err| err.to_string())?;
    let second = policy_docs_markdown().map_err(|err| err.to_string())?;
    if first != second {
        return Err("docs generation must be deterministic".to_string());
    }
    if !first.contains("# Policy Pack Reference") {
        return Err("docs missing title header".to_string());
    }
    for field in
        ["allowed_domains", "max_query_size", "require_approval_for", "block_pii", "block_secrets"]
    {
        if !first.contains(field) {
            return Err(format!("docs missing field row: {field}"));
        }
    }
    Ok(())
}

#[test]
fn docs_write_and_verify_round_trip() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("policies.md");
    write_policy_docs(Some(&path)).map_err(|err| err.to_string())?;
    verify_policy_docs(Some(&path)).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn committed_docs_are_current() -> TestResult {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| "missing workspace root".to_string())?;
    verify_policy_docs(Some(&root.join("Docs/policies.md"))).map_err(|err| err.to_string())
}

#[test]
fn docs_verify_detects_drift() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("policies.md");
    write_policy_docs(Some(&path)).map_err(|err| err.to_string())?;
    let mut content = fs::read_to_string(&path).map_err(|err| err.to_string())?;
    content.push_str("stale\n");
    fs::write(&path, content).map_err(|err| err.to_string())?;
    match verify_policy_docs(Some(&path)) {
        Err(error) if error.to_string().contains("docs drift") => Ok(()),
        Err(error) => Err(format!("unexpected error kind: {error}")),
        Ok(()) => Err("edited docs must fail verification".to_string()),
    }
}

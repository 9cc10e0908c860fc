// crates/anchor-policy/src/docs.rs
// ============================================================================
// Module: Policy Docs Generator
// Description: Markdown generator for the policy pack reference.
// Purpose: Keep policy docs in sync with the schema and defaults.
// Dependencies: serde_json, thiserror, std
// ============================================================================

//! ## Overview
//! Generates `Docs/policies.md` from the canonical policy-update schema. The
//! output is deterministic: field order is fixed and every cell is rendered
//! from the schema, so drift between docs and model is detected by tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::examples::policy_update_json_example;
use crate::schema::policy_update_schema;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default output path for generated policy docs.
const DOCS_PATH: &str = "Docs/policies.md";

/// Ordered field list rendered in the docs table.
const FIELD_ORDER: [&str; 5] =
    ["allowed_domains", "max_query_size", "require_approval_for", "block_pii", "block_secrets"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when generating or verifying policy docs.
#[derive(Debug, Error)]
pub enum DocsError {
    /// IO failure while reading or writing docs.
    #[error("docs io error: {0}")]
    Io(String),
    /// Schema traversal or rendering error.
    #[error("docs schema error: {0}")]
    Schema(String),
    /// Generated docs do not match the committed file.
    #[error("docs drift: {0}")]
    Drift(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates the policy reference markdown.
///
/// # Errors
///
/// Returns [`DocsError`] when schema traversal fails.
pub fn policy_docs_markdown() -> Result<String, DocsError> {
    let schema = policy_update_schema();
    let fields = schema
        .pointer("/properties/policies/properties")
        .and_then(Value::as_object)
        .ok_or_else(|| DocsError::Schema("missing policy properties".to_string()))?;

    let mut out = String::new();
    out.push_str("<!--\n");
    out.push_str("Docs/policies.md\n");
    out.push_str("============================================================================\n");
    out.push_str("Document: Anchor Policy Pack Reference\n");
    out.push_str("Description: Reference for the default policy pack fields.\n");
    out.push_str("Generated: This file is auto-generated; do not edit manually.\n");
    out.push_str("============================================================================\n");
    out.push_str("-->\n\n");

    out.push_str("# Policy Pack Reference\n\n");
    out.push_str("## Overview\n\n");
    out.push_str("The default policy pack bundles governance settings for an agent: query\n");
    out.push_str("limits, approval gates, and content-blocking toggles. Callers override\n");
    out.push_str("individual fields; unset fields take the defaults below, and list or\n");
    out.push_str("number fields set to `null` are omitted from the payload entirely.\n\n");

    out.push_str("## Fields\n\n");
    out.push_str("| Field | Type | Default | Description |\n");
    out.push_str("|---|---|---|---|\n");
    for name in FIELD_ORDER {
        let field = fields
            .get(name)
            .ok_or_else(|| DocsError::Schema(format!("missing schema field: {name}")))?;
        let row = render_row(name, field)?;
        out.push_str(&row);
    }
    out.push('\n');

    out.push_str("## Example\n\n");
    out.push_str("```json\n");
    out.push_str(&policy_update_json_example());
    out.push_str("```\n");

    Ok(out)
}

/// Writes the generated docs to the standard location.
///
/// # Errors
///
/// Returns [`DocsError`] when file output fails.
pub fn write_policy_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = policy_docs_markdown()?;
    fs::write(path, content.as_bytes()).map_err(|err| DocsError::Io(err.to_string()))
}

/// Verifies the on-disk docs match the generated output.
///
/// # Errors
///
/// Returns [`DocsError`] when the docs drift.
pub fn verify_policy_docs(path: Option<&Path>) -> Result<(), DocsError> {
    let path = path.unwrap_or_else(|| Path::new(DOCS_PATH));
    let content = policy_docs_markdown()?;
    let existing = fs::read_to_string(path).map_err(|err| DocsError::Io(err.to_string()))?;
    if existing != content {
        return Err(DocsError::Drift(format!("docs mismatch: {}", path.display())));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one table row for a schema field.
fn render_row(name: &str, field: &Value) -> Result<String, DocsError> {
    let field_type = field
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DocsError::Schema(format!("missing type for field: {name}")))?;
    let default = field.get("default").map_or_else(|| "none".to_string(), render_default);
    let description = field.get("description").and_then(Value::as_str).unwrap_or("");
    let mut row = String::new();
    writeln!(row, "| `{name}` | {field_type} | {default} | {description} |")
        .map_err(|err| DocsError::Schema(err.to_string()))?;
    Ok(row)
}

/// Renders a schema default value as an inline code cell.
fn render_default(value: &Value) -> String {
    format!("`{value}`")
}

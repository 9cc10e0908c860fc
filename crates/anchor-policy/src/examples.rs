// crates/anchor-policy/src/examples.rs
// ============================================================================
// Module: Policy Examples
// Description: Canonical example policy-update payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example of a policy-update payload. Output is deterministic and
//! kept in sync with the schema and docs.

/// Returns a canonical example policy-update JSON payload.
#[must_use]
pub fn policy_update_json_example() -> String {
    String::from(
        r#"{
  "policies": {
    "allowed_domains": ["docs.example.com", "api.example.com"],
    "max_query_size": 1000,
    "require_approval_for": ["delete", "update", "export"],
    "block_pii": true,
    "block_secrets": true
  }
}
"#,
    )
}

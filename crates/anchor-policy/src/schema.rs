// crates/anchor-policy/src/schema.rs
// ============================================================================
// Module: Policy Schemas
// Description: JSON schema builder for the policy-update wire payload.
// Purpose: Provide the canonical validation schema for policy artifacts.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for the policy-update payload produced
//! by [`crate::default_policy_pack`]. The schema is generated from the same
//! constants as the model and is used by tooling, docs, and tests.

use serde_json::Value;
use serde_json::json;

use crate::policy::DEFAULT_BLOCK_PII;
use crate::policy::DEFAULT_BLOCK_SECRETS;
use crate::policy::DEFAULT_MAX_QUERY_SIZE;
use crate::policy::DEFAULT_REQUIRE_APPROVAL_FOR;

/// Returns the JSON schema for the policy-update envelope.
#[must_use]
pub fn policy_update_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "anchor://policy/schemas/policy_update.schema.json",
        "title": "Anchor Policy Update",
        "description": "Policy pack payload for the agent config-update endpoint.",
        "type": "object",
        "properties": {
            "policies": policy_pack_schema()
        },
        "required": ["policies"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Policy Pack
// ============================================================================

/// Schema for the resolved policy settings object.
fn policy_pack_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "allowed_domains": domain_list_schema(),
            "max_query_size": {
                "type": "integer",
                "default": DEFAULT_MAX_QUERY_SIZE,
                "description": "Cap on agent query size. Omitted when the caller disabled the cap."
            },
            "require_approval_for": {
                "type": "array",
                "items": { "type": "string" },
                "default": DEFAULT_REQUIRE_APPROVAL_FOR,
                "description": "Actions requiring human approval. Omitted when the caller disabled the gate."
            },
            "block_pii": {
                "type": "boolean",
                "default": DEFAULT_BLOCK_PII,
                "description": "Whether PII is blocked in agent output."
            },
            "block_secrets": {
                "type": "boolean",
                "default": DEFAULT_BLOCK_SECRETS,
                "description": "Whether secret leakage is blocked in agent output."
            }
        },
        "required": ["block_pii", "block_secrets"],
        "additionalProperties": false
    })
}

/// Schema for the allowed-domains list.
fn domain_list_schema() -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": "Domains the agent may query. No default; absent unless supplied."
    })
}

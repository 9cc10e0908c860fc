// crates/anchor-policy/src/lib.rs
// ============================================================================
// Module: Anchor Policy Library
// Description: Canonical policy-pack model, wire payload, and artifacts.
// Purpose: Single source of truth for agent policy-pack semantics.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `anchor-policy` assembles the default policy pack applied to Anchor
//! agents: query limits, approval gates, and content-blocking toggles,
//! merged with caller overrides and rendered in the snake_case wire format
//! the config-update endpoint expects. It also provides deterministic
//! generators for the payload schema, a canonical example, and the policy
//! reference docs.
//!
//! The builder itself is pure and total; transmitting the payload (HTTP
//! client, auth, retries) and enforcing the policies are the backend's
//! concern, not this crate's.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod docs;
pub mod examples;
pub mod policy;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use docs::policy_docs_markdown;
pub use docs::verify_policy_docs;
pub use docs::write_policy_docs;
pub use examples::policy_update_json_example;
pub use policy::*;
pub use schema::policy_update_schema;

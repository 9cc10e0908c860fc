// crates/anchor-policy/src/policy.rs
// ============================================================================
// Module: Policy Pack Model
// Description: Canonical policy-pack model and default-coalescing builder.
// Purpose: Assemble agent policy payloads for the Anchor config-update API.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The policy pack is the bundle of governance settings (query limits,
//! approval gates, content-blocking toggles) applied to an Anchor agent.
//! [`default_policy_pack`] merges caller overrides with the built-in defaults
//! and produces the snake_case wire payload expected by the config-update
//! endpoint. The builder is a pure transformation: no I/O, no validation, no
//! failure paths. Validation of the resulting policy set belongs to the
//! backend, not to this crate.
//!
//! List and number settings distinguish three states via [`Setting`]: left
//! unset (default applies), explicitly disabled (field omitted from the
//! payload), or set to a concrete value (passed through verbatim, including
//! values such as zero that the backend may reject). Boolean toggles have no
//! disabled state; null and unset both coalesce to the default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default cap on agent query size.
pub const DEFAULT_MAX_QUERY_SIZE: i64 = 1000;
/// Default set of actions that require human approval.
pub const DEFAULT_REQUIRE_APPROVAL_FOR: [&str; 3] = ["delete", "update", "export"];
/// Default for the PII-blocking toggle.
pub const DEFAULT_BLOCK_PII: bool = true;
/// Default for the secret-leakage-blocking toggle.
pub const DEFAULT_BLOCK_SECRETS: bool = true;

/// Wire key for the allowed-domains list.
const KEY_ALLOWED_DOMAINS: &str = "allowed_domains";
/// Wire key for the query-size cap.
const KEY_MAX_QUERY_SIZE: &str = "max_query_size";
/// Wire key for the approval-gated action list.
const KEY_REQUIRE_APPROVAL_FOR: &str = "require_approval_for";
/// Wire key for the PII-blocking toggle.
const KEY_BLOCK_PII: &str = "block_pii";
/// Wire key for the secret-blocking toggle.
const KEY_BLOCK_SECRETS: &str = "block_secrets";
/// Wire key for the policy envelope.
const KEY_POLICIES: &str = "policies";

/// Returns the default approval-gated action list as owned strings.
pub(crate) fn default_require_approval_for() -> Vec<String> {
    DEFAULT_REQUIRE_APPROVAL_FOR.iter().map(|action| (*action).to_string()).collect()
}

// ============================================================================
// SECTION: Three-State Setting
// ============================================================================

/// A policy setting that distinguishes unset, disabled, and concrete states.
///
/// # Invariants
/// - `Unset` means the caller supplied nothing; the built-in default applies.
/// - `Disabled` means the caller explicitly opted out (JSON `null`); the field
///   is omitted from the wire payload.
/// - `Set` values pass through to the payload verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// No value supplied; the default applies.
    #[default]
    Unset,
    /// Explicit opt-out; the field is omitted from the output.
    Disabled,
    /// Concrete value passed through verbatim.
    Set(T),
}

impl<T> Setting<T> {
    /// Returns whether the setting was left unset.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns whether the setting was explicitly disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Resolves the setting against a lazily built default.
    ///
    /// Returns `None` only for the disabled state; unset falls back to the
    /// default and set values are returned as-is.
    pub fn resolve_with<F>(self, default: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Unset => Some(default()),
            Self::Disabled => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Setting<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Missing keys never reach this point; serde's field default covers
        // them with `Unset`. A present key is either null or a value.
        Option::<T>::deserialize(deserializer)
            .map(|value| value.map_or(Self::Disabled, Self::Set))
    }
}

impl<T> Serialize for Setting<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unset | Self::Disabled => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

// ============================================================================
// SECTION: Input Model
// ============================================================================

/// Caller overrides for the default policy pack.
///
/// Every field is optional. `Default` yields the empty override set, which
/// resolves to the built-in policy defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPackConfig {
    /// Domains the agent may query. No default exists; when absent the
    /// payload carries no domain restriction field at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
    /// Query-size cap. Unset applies the default; disabled removes the cap.
    /// Concrete values are not bounds-checked here.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub max_query_size: Setting<i64>,
    /// Actions requiring human approval. Unset applies the default; disabled
    /// removes the gate; an empty list is preserved as-is.
    #[serde(default, skip_serializing_if = "Setting::is_unset")]
    pub require_approval_for: Setting<Vec<String>>,
    /// PII-blocking toggle. Absent and null both coalesce to the default;
    /// boolean toggles have no opt-out state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_pii: Option<bool>,
    /// Secret-leakage-blocking toggle. Same coalescing as `block_pii`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_secrets: Option<bool>,
}

// ============================================================================
// SECTION: Output Model
// ============================================================================

/// Resolved policy settings in wire form.
///
/// # Invariants
/// - Optional fields are present with a concrete value or absent entirely;
///   the serialized payload never contains a null-valued key.
/// - `block_pii` and `block_secrets` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyPack {
    /// Domains the agent may query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
    /// Query-size cap; absent when the caller disabled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_query_size: Option<i64>,
    /// Actions requiring human approval; absent when the caller disabled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_approval_for: Option<Vec<String>>,
    /// Whether PII is blocked in agent output.
    pub block_pii: bool,
    /// Whether secret leakage is blocked in agent output.
    pub block_secrets: bool,
}

impl PolicyPack {
    /// Renders the pack as a JSON object in wire form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut policies = Map::new();
        if let Some(domains) = &self.allowed_domains {
            policies.insert(KEY_ALLOWED_DOMAINS.to_string(), domains.clone().into());
        }
        if let Some(size) = self.max_query_size {
            policies.insert(KEY_MAX_QUERY_SIZE.to_string(), size.into());
        }
        if let Some(actions) = &self.require_approval_for {
            policies.insert(KEY_REQUIRE_APPROVAL_FOR.to_string(), actions.clone().into());
        }
        policies.insert(KEY_BLOCK_PII.to_string(), self.block_pii.into());
        policies.insert(KEY_BLOCK_SECRETS.to_string(), self.block_secrets.into());
        Value::Object(policies)
    }
}

impl Default for PolicyPack {
    fn default() -> Self {
        default_policy_pack(&PolicyPackConfig::default()).policies
    }
}

/// Single-field envelope handed to the config-update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct PolicyUpdate {
    /// The resolved policy settings.
    pub policies: PolicyPack,
}

impl PolicyUpdate {
    /// Renders the envelope as a JSON object in wire form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert(KEY_POLICIES.to_string(), self.policies.to_value());
        Value::Object(envelope)
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds the default policy pack, applying caller overrides.
///
/// Pure and total: the input is never mutated, the output is freshly owned,
/// and no input shape causes a failure. Same input, equal output.
#[must_use]
pub fn default_policy_pack(config: &PolicyPackConfig) -> PolicyUpdate {
    PolicyUpdate {
        policies: PolicyPack {
            allowed_domains: config.allowed_domains.clone(),
            max_query_size: config.max_query_size.resolve_with(|| DEFAULT_MAX_QUERY_SIZE),
            require_approval_for: config
                .require_approval_for
                .clone()
                .resolve_with(default_require_approval_for),
            block_pii: config.block_pii.unwrap_or(DEFAULT_BLOCK_PII),
            block_secrets: config.block_secrets.unwrap_or(DEFAULT_BLOCK_SECRETS),
        },
    }
}

// ============================================================================
// SECTION: Untrusted-JSON Boundary
// ============================================================================

/// Builds the default policy pack from an untrusted JSON value.
///
/// This is the permissive external boundary: camelCase keys are read from
/// whatever object shape the caller supplies, and malformed fields degrade to
/// "omitted" rather than raising. A non-object config is treated as the empty
/// override set. A non-array `allowedDomains` is dropped silently; non-null
/// scalar overrides pass through without type validation, since the backend
/// owns validation of the resulting policy set.
#[must_use]
pub fn default_policy_pack_value(config: &Value) -> Value {
    let empty = Map::new();
    let fields = config.as_object().unwrap_or(&empty);
    let mut policies = Map::new();

    if let Some(domains) = fields.get("allowedDomains")
        && domains.is_array()
    {
        policies.insert(KEY_ALLOWED_DOMAINS.to_string(), domains.clone());
    }

    insert_three_way(
        &mut policies,
        KEY_MAX_QUERY_SIZE,
        fields.get("maxQuerySize"),
        || DEFAULT_MAX_QUERY_SIZE.into(),
    );
    insert_three_way(
        &mut policies,
        KEY_REQUIRE_APPROVAL_FOR,
        fields.get("requireApprovalFor"),
        || default_require_approval_for().into(),
    );

    policies.insert(KEY_BLOCK_PII.to_string(), toggle_or(fields.get("blockPii"), DEFAULT_BLOCK_PII));
    policies.insert(
        KEY_BLOCK_SECRETS.to_string(),
        toggle_or(fields.get("blockSecrets"), DEFAULT_BLOCK_SECRETS),
    );

    let mut envelope = Map::new();
    envelope.insert(KEY_POLICIES.to_string(), Value::Object(policies));
    Value::Object(envelope)
}

/// Applies the three-way unset/null/value rule for one loose field.
fn insert_three_way<F>(policies: &mut Map<String, Value>, key: &str, field: Option<&Value>, default: F)
where
    F: FnOnce() -> Value,
{
    match field {
        Some(Value::Null) => {}
        Some(value) => {
            policies.insert(key.to_string(), value.clone());
        }
        None => {
            policies.insert(key.to_string(), default());
        }
    }
}

/// Coalesces a loose boolean toggle: null and absent both take the default.
fn toggle_or(field: Option<&Value>, default: bool) -> Value {
    match field {
        Some(Value::Null) | None => default.into(),
        Some(value) => value.clone(),
    }
}

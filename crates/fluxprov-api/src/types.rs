// Wire types for the InfluxDB v2 administrative API.
//
// Field names follow the server's JSON exactly (`orgID`, `bucketID`,
// camelCase elsewhere). Response types tolerate missing optional fields;
// request types skip `None` so partial PATCH bodies stay partial.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Health ──────────────────────────────────────────────────────────

/// `GET /ready` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub up: Option<String>,
}

/// What `/ping` reports (it has no body, only headers).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PingResponse {
    pub version: Option<String>,
    pub build: Option<String>,
}

// ── Organizations ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostOrganizationRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organizations {
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

// ── Buckets ─────────────────────────────────────────────────────────

/// A single retention rule as the server stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRule {
    #[serde(rename = "type", default = "default_rule_type")]
    pub rule_type: String,
    pub every_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_group_duration_seconds: Option<i64>,
}

fn default_rule_type() -> String {
    "expire".into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(default)]
    pub rp: Option<String>,
    #[serde(rename = "type", default)]
    pub bucket_type: Option<String>,
    #[serde(default)]
    pub retention_rules: Vec<RetentionRule>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBucketRequest {
    #[serde(rename = "orgID")]
    pub org_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp: Option<String>,
    pub retention_rules: Vec<RetentionRule>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchBucketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub retention_rules: Vec<RetentionRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Buckets {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

// ── Authorizations (shared by the public and private surfaces) ──────

/// What a permission points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "orgID", default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub action: String,
    pub resource: PermissionResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "orgID", default)]
    pub org_id: Option<String>,
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationPostRequest {
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub permissions: Vec<Permission>,
}

/// PATCH body for both surfaces: only status and description are mutable.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── DBRP mappings ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dbrp {
    pub id: String,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "bucketID")]
    pub bucket_id: String,
    pub database: String,
    pub retention_policy: String,
    #[serde(default)]
    pub default: bool,
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,
}

/// Single-mapping responses wrap the mapping in `content`.
#[derive(Debug, Clone, Deserialize)]
pub struct DbrpGet {
    pub content: Dbrp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbrpCreate {
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "bucketID")]
    pub bucket_id: String,
    pub database: String,
    pub retention_policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbrpUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

// ── Scraper targets ─────────────────────────────────────────────────

/// The only target kind the server supports.
pub const SCRAPER_TYPE_PROMETHEUS: &str = "prometheus";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperTargetRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub url: String,
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "bucketID")]
    pub bucket_id: String,
    pub allow_insecure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperTarget {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "orgID", default)]
    pub org_id: Option<String>,
    #[serde(rename = "bucketID", default)]
    pub bucket_id: Option<String>,
    #[serde(default)]
    pub allow_insecure: Option<bool>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
}

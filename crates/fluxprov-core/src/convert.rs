// ── API-to-attribute conversions ──
//
// Bridges raw `fluxprov_api` response types into the attribute structs the
// mappers hand back to the host. Values the server does not echo (or echoes
// normalized) are taken from the prior state by the mappers themselves.

use chrono::{DateTime, SecondsFormat, Utc};

use fluxprov_api::types::{Bucket, Dbrp, Organization, RetentionRule, ScraperTarget};

use crate::resources::bucket::{BucketAttrs, RetentionRuleAttrs};
use crate::resources::dbrp_mapping::DbrpMappingAttrs;
use crate::resources::organization::OrganizationAttrs;
use crate::resources::scraper::ScraperAttrs;
use crate::shard::ShardGroupDuration;

// ── Helpers ────────────────────────────────────────────────────────

/// Server timestamps are stored in state as RFC 3339 strings.
pub(crate) fn timestamp(dt: Option<DateTime<Utc>>) -> Option<String> {
    dt.map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

// ── Organization ───────────────────────────────────────────────────

impl From<Organization> for OrganizationAttrs {
    fn from(org: Organization) -> Self {
        Self {
            name: org.name,
            description: org.description.unwrap_or_default(),
            created_at: timestamp(org.created_at),
            updated_at: timestamp(org.updated_at),
        }
    }
}

// ── Bucket ─────────────────────────────────────────────────────────

/// Declared rule → payload rule, deriving the shard-group duration.
impl From<&RetentionRuleAttrs> for RetentionRule {
    fn from(rule: &RetentionRuleAttrs) -> Self {
        RetentionRule {
            rule_type: rule.rule_type.clone(),
            every_seconds: rule.every_seconds,
            shard_group_duration_seconds: rule
                .shard_group_duration_seconds
                .to_payload(rule.every_seconds),
        }
    }
}

/// Project a server bucket onto the declared shape.
///
/// `declared` is consulted by position to decide which shard-group
/// durations to surface. With `declared = None` (lookups), every server
/// value is reported as explicit.
pub(crate) fn bucket_attrs(bucket: Bucket, declared: Option<&[RetentionRuleAttrs]>) -> BucketAttrs {
    let retention_rules = if bucket.retention_rules.is_empty() {
        vec![RetentionRuleAttrs::infinite()]
    } else {
        bucket
            .retention_rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| {
                let shard = match declared {
                    Some(rules) => rules
                        .get(idx)
                        .map_or(ShardGroupDuration::Default, |d| d.shard_group_duration_seconds)
                        .project(rule.shard_group_duration_seconds),
                    None => rule
                        .shard_group_duration_seconds
                        .filter(|secs| *secs > 0)
                        .map_or(ShardGroupDuration::Default, ShardGroupDuration::Explicit),
                };
                RetentionRuleAttrs {
                    every_seconds: rule.every_seconds,
                    shard_group_duration_seconds: shard,
                    rule_type: rule.rule_type.clone(),
                }
            })
            .collect()
    };

    BucketAttrs {
        name: bucket.name,
        description: bucket.description.unwrap_or_default(),
        org_id: bucket.org_id,
        retention_rules,
        rp: bucket.rp.unwrap_or_default(),
        bucket_type: bucket.bucket_type,
        created_at: timestamp(bucket.created_at),
        updated_at: timestamp(bucket.updated_at),
    }
}

// ── DBRP mapping ───────────────────────────────────────────────────

impl From<Dbrp> for DbrpMappingAttrs {
    fn from(dbrp: Dbrp) -> Self {
        Self {
            org_id: dbrp.org_id,
            bucket_id: dbrp.bucket_id,
            database: dbrp.database,
            retention_policy: dbrp.retention_policy,
            default_policy: Some(dbrp.default),
        }
    }
}

// ── Scraper ────────────────────────────────────────────────────────

/// Server fields left out of the response fall back to `prior`.
pub(crate) fn scraper_attrs(target: ScraperTarget, prior: &ScraperAttrs) -> ScraperAttrs {
    ScraperAttrs {
        name: target.name.unwrap_or_else(|| prior.name.clone()),
        org_id: target.org_id.unwrap_or_else(|| prior.org_id.clone()),
        bucket_id: target.bucket_id.unwrap_or_else(|| prior.bucket_id.clone()),
        url: target.url.unwrap_or_else(|| prior.url.clone()),
        allow_insecure: target.allow_insecure.unwrap_or(prior.allow_insecure),
        target_type: target.target_type.or_else(|| prior.target_type.clone()),
    }
}

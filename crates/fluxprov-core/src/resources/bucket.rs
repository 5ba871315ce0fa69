use fluxprov_api::types::{PatchBucketRequest, PostBucketRequest, RetentionRule};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::convert::bucket_attrs;
use crate::error::CoreError;
use crate::resource::{Resource, is_gone};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};
use crate::shard::ShardGroupDuration;

const NOT_FOUND: &str = "not found: bucket not found";

/// The only retention rule type the server knows.
pub const RULE_TYPE_EXPIRE: &str = "expire";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_bucket",
    description: "A bucket: a named time-series store with retention rules.",
    attributes: &[
        Attribute::required("name", AttributeKind::String),
        Attribute::optional("description", AttributeKind::String).default_value(""),
        Attribute::required("org_id", AttributeKind::String).force_new(),
        Attribute::required("retention_rules", AttributeKind::List).describe(
            "Ordered list of {every_seconds, shard_group_duration_seconds, type}. \
             shard_group_duration_seconds: unset/0 derives it from every_seconds, \
             -1 leaves it to the server.",
        ),
        Attribute::optional("rp", AttributeKind::String)
            .force_new()
            .default_value(""),
        Attribute::computed("type", AttributeKind::String),
        Attribute::computed("created_at", AttributeKind::String),
        Attribute::computed("updated_at", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionRuleAttrs {
    /// Retention interval; 0 keeps data forever.
    pub every_seconds: i64,
    #[serde(default, skip_serializing_if = "ShardGroupDuration::is_default")]
    pub shard_group_duration_seconds: ShardGroupDuration,
    #[serde(rename = "type", default = "default_rule_type")]
    pub rule_type: String,
}

fn default_rule_type() -> String {
    RULE_TYPE_EXPIRE.into()
}

impl RetentionRuleAttrs {
    /// What a bucket without rules reads back as.
    pub fn infinite() -> Self {
        Self {
            every_seconds: 0,
            shard_group_duration_seconds: ShardGroupDuration::Default,
            rule_type: default_rule_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketAttrs {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub org_id: String,
    pub retention_rules: Vec<RetentionRuleAttrs>,
    #[serde(default)]
    pub rp: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bucket_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl BucketAttrs {
    fn payload_rules(&self) -> Vec<RetentionRule> {
        self.retention_rules.iter().map(RetentionRule::from).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BucketResource;

impl Resource for BucketResource {
    type Attrs = BucketAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    fn validate(&self, attrs: &BucketAttrs) -> Result<(), CoreError> {
        let invalid = |message: String| CoreError::InvalidAttributes {
            resource_type: SCHEMA.type_name,
            message,
        };
        if attrs.retention_rules.is_empty() {
            return Err(invalid("retention_rules must contain at least one rule".into()));
        }
        for (idx, rule) in attrs.retention_rules.iter().enumerate() {
            if rule.every_seconds < 0 {
                return Err(invalid(format!(
                    "retention_rules[{idx}].every_seconds must not be negative"
                )));
            }
            if rule.rule_type != RULE_TYPE_EXPIRE {
                return Err(invalid(format!(
                    "retention_rules[{idx}].type must be \"{RULE_TYPE_EXPIRE}\", got \"{}\"",
                    rule.rule_type
                )));
            }
        }
        Ok(())
    }

    async fn create(&self, conn: &Connection, attrs: &BucketAttrs) -> Result<String, CoreError> {
        let body = PostBucketRequest {
            org_id: attrs.org_id.clone(),
            name: attrs.name.clone(),
            description: Some(attrs.description.clone()),
            rp: (!attrs.rp.is_empty()).then(|| attrs.rp.clone()),
            retention_rules: attrs.payload_rules(),
        };
        let bucket = conn
            .api()
            .create_bucket(&body)
            .await
            .map_err(|e| CoreError::remote("error creating bucket", e))?;
        Ok(bucket.id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &BucketAttrs,
    ) -> Result<Option<BucketAttrs>, CoreError> {
        match conn.api().get_bucket(id).await {
            Ok(bucket) => Ok(Some(bucket_attrs(bucket, Some(&prior.retention_rules)))),
            Err(e) if is_gone(&e, NOT_FOUND) => {
                debug!(id, "bucket not found");
                Ok(None)
            }
            Err(e) => Err(CoreError::remote("error getting bucket", e)),
        }
    }

    async fn update(&self, conn: &Connection, id: &str, attrs: &BucketAttrs) -> Result<(), CoreError> {
        let body = PatchBucketRequest {
            name: Some(attrs.name.clone()),
            description: Some(attrs.description.clone()),
            retention_rules: attrs.payload_rules(),
        };
        conn.api()
            .update_bucket(id, &body)
            .await
            .map_err(|e| CoreError::remote("error updating bucket", e))?;
        Ok(())
    }

    async fn delete(&self, conn: &Connection, id: &str, _attrs: &BucketAttrs) -> Result<(), CoreError> {
        conn.api()
            .delete_bucket(id)
            .await
            .map_err(|e| CoreError::remote("error deleting bucket", e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> BucketAttrs {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flat_shard_encoding_decodes() {
        let attrs = decode(json!({
            "name": "b",
            "org_id": "o1",
            "retention_rules": [
                { "every_seconds": 3600 },
                { "every_seconds": 3600, "shard_group_duration_seconds": -1 },
                { "every_seconds": 3600, "shard_group_duration_seconds": 1800 }
            ]
        }));
        let shards: Vec<_> = attrs
            .retention_rules
            .iter()
            .map(|r| r.shard_group_duration_seconds)
            .collect();
        assert_eq!(
            shards,
            vec![
                ShardGroupDuration::Default,
                ShardGroupDuration::Unmanaged,
                ShardGroupDuration::Explicit(1800)
            ]
        );
        assert_eq!(attrs.retention_rules[0].rule_type, "expire");
    }

    #[test]
    fn default_shard_duration_is_not_written_back() {
        let attrs = decode(json!({
            "name": "b",
            "org_id": "o1",
            "retention_rules": [{ "every_seconds": 0 }]
        }));
        assert_eq!(
            serde_json::to_value(&attrs.retention_rules[0]).unwrap(),
            json!({ "every_seconds": 0, "type": "expire" })
        );
    }

    #[test]
    fn validation_rejects_bad_rules() {
        let mut attrs = decode(json!({
            "name": "b",
            "org_id": "o1",
            "retention_rules": [{ "every_seconds": 60, "type": "archive" }]
        }));
        assert!(BucketResource.validate(&attrs).is_err());

        attrs.retention_rules.clear();
        assert!(BucketResource.validate(&attrs).is_err());

        attrs.retention_rules.push(RetentionRuleAttrs::infinite());
        assert!(BucketResource.validate(&attrs).is_ok());
    }

    #[test]
    fn invalid_shard_duration_fails_decoding() {
        let result = serde_json::from_value::<BucketAttrs>(json!({
            "name": "b",
            "org_id": "o1",
            "retention_rules": [{ "every_seconds": 60, "shard_group_duration_seconds": -7 }]
        }));
        assert!(result.is_err());
    }
}

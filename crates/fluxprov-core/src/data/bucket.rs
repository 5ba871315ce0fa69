use serde::Deserialize;

use crate::connection::Connection;
use crate::convert::bucket_attrs;
use crate::error::CoreError;
use crate::resource::{DataSource, DataState};
use crate::resources::bucket::BucketAttrs;
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_bucket",
    description: "Look up a bucket by name, optionally within one organization.",
    attributes: &[
        Attribute::required("name", AttributeKind::String),
        Attribute::optional_computed("org_id", AttributeKind::String),
        Attribute::computed("description", AttributeKind::String),
        Attribute::computed("retention_rules", AttributeKind::List),
        Attribute::computed("rp", AttributeKind::String),
        Attribute::computed("type", AttributeKind::String),
        Attribute::computed("created_at", AttributeKind::String),
        Attribute::computed("updated_at", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketQuery {
    pub name: String,
    #[serde(default)]
    pub org_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BucketDataSource;

impl DataSource for BucketDataSource {
    type Query = BucketQuery;
    type Output = BucketAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn read(
        &self,
        conn: &Connection,
        query: &BucketQuery,
    ) -> Result<DataState<BucketAttrs>, CoreError> {
        let buckets = conn
            .api()
            .find_buckets_by_name(&query.name, query.org_id.as_deref())
            .await
            .map_err(|e| CoreError::remote("error looking up bucket", e))?;

        let bucket = buckets
            .into_iter()
            .find(|b| {
                b.name == query.name
                    && query.org_id.as_deref().is_none_or(|org| b.org_id == org)
            })
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "bucket",
                identifier: query.name.clone(),
            })?;

        Ok(DataState {
            id: bucket.id.clone(),
            attrs: bucket_attrs(bucket, None),
        })
    }
}

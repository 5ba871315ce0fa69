use fluxprov_api::types::{SCRAPER_TYPE_PROMETHEUS, ScraperTargetRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::convert::scraper_attrs;
use crate::error::CoreError;
use crate::resource::{Resource, is_gone};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

const NOT_FOUND: &str = "not found: Scraper not found";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_scraper",
    description: "A Prometheus scrape target writing into a bucket.",
    attributes: &[
        Attribute::required("name", AttributeKind::String).force_new(),
        Attribute::required("org_id", AttributeKind::String).force_new(),
        Attribute::required("bucket_id", AttributeKind::String).force_new(),
        Attribute::required("url", AttributeKind::String).force_new(),
        Attribute::required("allow_insecure", AttributeKind::Bool).force_new(),
        Attribute::computed("type", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScraperAttrs {
    pub name: String,
    pub org_id: String,
    pub bucket_id: String,
    pub url: String,
    pub allow_insecure: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperResource;

impl Resource for ScraperResource {
    type Attrs = ScraperAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn create(&self, conn: &Connection, attrs: &ScraperAttrs) -> Result<String, CoreError> {
        let body = ScraperTargetRequest {
            name: attrs.name.clone(),
            target_type: SCRAPER_TYPE_PROMETHEUS.into(),
            url: attrs.url.clone(),
            org_id: attrs.org_id.clone(),
            bucket_id: attrs.bucket_id.clone(),
            allow_insecure: attrs.allow_insecure,
        };
        let target = conn
            .api()
            .create_scraper(&body)
            .await
            .map_err(|e| CoreError::remote("error creating scraper", e))?;
        Ok(target.id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &ScraperAttrs,
    ) -> Result<Option<ScraperAttrs>, CoreError> {
        match conn.api().get_scraper(id).await {
            Ok(target) => Ok(Some(scraper_attrs(target, prior))),
            Err(e) if is_gone(&e, NOT_FOUND) => {
                debug!(id, "scraper not found");
                Ok(None)
            }
            Err(e) => Err(CoreError::remote("error getting scraper", e)),
        }
    }

    /// Every declared attribute forces replacement, so an update only ever
    /// reaches here with nothing to send.
    async fn update(&self, _conn: &Connection, id: &str, _attrs: &ScraperAttrs) -> Result<(), CoreError> {
        debug!(id, "scraper has no mutable attributes");
        Ok(())
    }

    async fn delete(&self, conn: &Connection, id: &str, _attrs: &ScraperAttrs) -> Result<(), CoreError> {
        conn.api()
            .delete_scraper(id)
            .await
            .map_err(|e| CoreError::remote("error deleting scraper", e))
    }
}

use fluxprov_api::types::{DbrpCreate, DbrpUpdate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::{Resource, is_gone};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

const NOT_FOUND: &str = "not found: unable to find DBRP";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_dbrp_mapping",
    description: "Maps a 1.x database/retention-policy pair onto a bucket.",
    attributes: &[
        Attribute::required("org_id", AttributeKind::String).force_new(),
        Attribute::required("bucket_id", AttributeKind::String).force_new(),
        Attribute::required("database", AttributeKind::String).force_new(),
        Attribute::required("retention_policy", AttributeKind::String),
        Attribute::optional_computed("default_policy", AttributeKind::Bool),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbrpMappingAttrs {
    pub org_id: String,
    pub bucket_id: String,
    pub database: String,
    pub retention_policy: String,
    /// Whether this is the database's default retention policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DbrpMappingResource;

impl Resource for DbrpMappingResource {
    type Attrs = DbrpMappingAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn create(&self, conn: &Connection, attrs: &DbrpMappingAttrs) -> Result<String, CoreError> {
        let body = DbrpCreate {
            org_id: attrs.org_id.clone(),
            bucket_id: attrs.bucket_id.clone(),
            database: attrs.database.clone(),
            retention_policy: attrs.retention_policy.clone(),
            default: attrs.default_policy,
        };
        let dbrp = conn
            .api()
            .create_dbrp(&body)
            .await
            .map_err(|e| CoreError::remote("error creating DBRP mapping", e))?;
        Ok(dbrp.id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &DbrpMappingAttrs,
    ) -> Result<Option<DbrpMappingAttrs>, CoreError> {
        match conn.api().get_dbrp(id, &prior.org_id).await {
            Ok(dbrp) => Ok(Some(dbrp.into())),
            Err(e) if is_gone(&e, NOT_FOUND) => {
                debug!(id, "dbrp mapping not found");
                Ok(None)
            }
            Err(e) => Err(CoreError::remote("error getting DBRP mapping", e)),
        }
    }

    async fn update(&self, conn: &Connection, id: &str, attrs: &DbrpMappingAttrs) -> Result<(), CoreError> {
        let body = DbrpUpdate {
            retention_policy: Some(attrs.retention_policy.clone()),
            default: attrs.default_policy,
        };
        conn.api()
            .update_dbrp(id, &attrs.org_id, &body)
            .await
            .map_err(|e| CoreError::remote("error updating DBRP mapping", e))?;
        Ok(())
    }

    async fn delete(&self, conn: &Connection, id: &str, attrs: &DbrpMappingAttrs) -> Result<(), CoreError> {
        conn.api()
            .delete_dbrp(id, &attrs.org_id)
            .await
            .map_err(|e| CoreError::remote("error deleting DBRP mapping", e))
    }
}

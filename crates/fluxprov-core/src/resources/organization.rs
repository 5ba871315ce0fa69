use fluxprov_api::types::{PatchOrganizationRequest, PostOrganizationRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::{Resource, is_gone};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

const NOT_FOUND: &str = "not found: organization not found";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_organization",
    description: "An organization: the workspace that owns buckets, tokens and users.",
    attributes: &[
        Attribute::required("name", AttributeKind::String),
        Attribute::optional("description", AttributeKind::String).default_value(""),
        Attribute::computed("created_at", AttributeKind::String),
        Attribute::computed("updated_at", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationAttrs {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationResource;

impl Resource for OrganizationResource {
    type Attrs = OrganizationAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn create(&self, conn: &Connection, attrs: &OrganizationAttrs) -> Result<String, CoreError> {
        let body = PostOrganizationRequest {
            name: attrs.name.clone(),
            description: Some(attrs.description.clone()),
        };
        let org = conn
            .api()
            .create_organization(&body)
            .await
            .map_err(|e| CoreError::remote("error creating organization", e))?;
        Ok(org.id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        _prior: &OrganizationAttrs,
    ) -> Result<Option<OrganizationAttrs>, CoreError> {
        match conn.api().get_organization(id).await {
            Ok(org) => Ok(Some(org.into())),
            Err(e) if is_gone(&e, NOT_FOUND) => {
                debug!(id, "organization not found");
                Ok(None)
            }
            Err(e) => Err(CoreError::remote("error getting organization", e)),
        }
    }

    async fn update(&self, conn: &Connection, id: &str, attrs: &OrganizationAttrs) -> Result<(), CoreError> {
        let body = PatchOrganizationRequest {
            name: Some(attrs.name.clone()),
            description: Some(attrs.description.clone()),
        };
        conn.api()
            .update_organization(id, &body)
            .await
            .map_err(|e| CoreError::remote("error updating organization", e))?;
        Ok(())
    }

    async fn delete(&self, conn: &Connection, id: &str, _attrs: &OrganizationAttrs) -> Result<(), CoreError> {
        conn.api()
            .delete_organization(id)
            .await
            .map_err(|e| CoreError::remote("error deleting organization", e))
    }
}

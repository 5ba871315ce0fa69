// 1.x-compatible credentials, managed through the private legacy surface.
//
// Creation is two calls (authorization, then password). A failed password
// step deletes the fresh authorization so no credential without a password
// is left behind.

use fluxprov_api::legacy::models::LegacyAuthorizationPostRequest;
use fluxprov_api::types::AuthorizationUpdateRequest;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::lifecycle::create_with_rollback;
use crate::resource::Resource;
use crate::resources::authorization::{AuthorizationStatus, validate_permissions};
use crate::resources::permission::{self, PermissionAttrs};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_legacy_authorization",
    description: "A 1.x-style username/password credential.",
    attributes: &[
        Attribute::required("org_id", AttributeKind::String).force_new(),
        Attribute::optional("description", AttributeKind::String).default_value(""),
        Attribute::optional("status", AttributeKind::String)
            .default_value("active")
            .describe("active | inactive"),
        Attribute::required("name", AttributeKind::String)
            .force_new()
            .describe("The 1.x username."),
        Attribute::required("password", AttributeKind::String).sensitive(),
        Attribute::required("permissions", AttributeKind::Set)
            .force_new()
            .describe("Set of {action: read|write, resource: {type, id, org_id, org, name}}."),
        Attribute::optional_computed("user_id", AttributeKind::String).force_new(),
        Attribute::computed("user_org_id", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyAuthorizationAttrs {
    pub org_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: AuthorizationStatus,
    pub name: String,
    #[serde(with = "crate::secret::exposed")]
    pub password: SecretString,
    pub permissions: Vec<PermissionAttrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_org_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyAuthorizationResource;

async fn set_password(conn: &Connection, id: &str, password: &SecretString) -> Result<(), CoreError> {
    conn.legacy()
        .set_password(id, password.expose_secret())
        .await
        .map_err(|e| CoreError::remote("error setting password for legacy authorization", e))
}

impl Resource for LegacyAuthorizationResource {
    type Attrs = LegacyAuthorizationAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    fn validate(&self, attrs: &LegacyAuthorizationAttrs) -> Result<(), CoreError> {
        if attrs.name.is_empty() {
            return Err(CoreError::InvalidAttributes {
                resource_type: SCHEMA.type_name,
                message: "name must not be empty".into(),
            });
        }
        validate_permissions(SCHEMA.type_name, &attrs.permissions)
    }

    async fn create(&self, conn: &Connection, attrs: &LegacyAuthorizationAttrs) -> Result<String, CoreError> {
        let body = LegacyAuthorizationPostRequest {
            org_id: attrs.org_id.clone(),
            user_id: attrs.user_id.clone(),
            token: attrs.name.clone(),
            description: Some(attrs.description.clone()),
            status: attrs.status.to_string(),
            permissions: permission::to_wire(&attrs.permissions),
        };
        let auth = conn
            .legacy()
            .create_authorization(&body)
            .await
            .map_err(|e| CoreError::remote("error creating legacy authorization", e))?;

        let id = auth.id;
        create_with_rollback(
            SCHEMA.type_name,
            &id,
            || set_password(conn, &id, &attrs.password),
            || async {
                conn.legacy()
                    .delete_authorization(&id)
                    .await
                    .map_err(|e| CoreError::remote("error deleting legacy authorization", e))
            },
        )
        .await?;

        Ok(id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &LegacyAuthorizationAttrs,
    ) -> Result<Option<LegacyAuthorizationAttrs>, CoreError> {
        let auth = match conn.legacy().get_authorization(id).await {
            Ok(auth) => auth,
            Err(e) if e.is_not_found() => {
                debug!(id, "legacy authorization not found");
                return Ok(None);
            }
            Err(e) => return Err(CoreError::remote("error getting legacy authorization", e)),
        };

        let org_id = auth.org_id.unwrap_or_else(|| prior.org_id.clone());
        Ok(Some(LegacyAuthorizationAttrs {
            description: auth.description.unwrap_or_default(),
            status: AuthorizationStatus::from_server(auth.status.as_deref(), prior.status),
            name: auth.token.unwrap_or_else(|| prior.name.clone()),
            password: prior.password.clone(),
            permissions: permission::project(&prior.permissions, &auth.permissions),
            user_id: auth.user_id.or_else(|| prior.user_id.clone()),
            user_org_id: Some(org_id.clone()),
            org_id,
        }))
    }

    async fn update(
        &self,
        conn: &Connection,
        id: &str,
        attrs: &LegacyAuthorizationAttrs,
    ) -> Result<(), CoreError> {
        let body = AuthorizationUpdateRequest {
            status: Some(attrs.status.to_string()),
            description: Some(attrs.description.clone()),
        };
        conn.legacy()
            .update_authorization(id, &body)
            .await
            .map_err(|e| CoreError::remote("error updating legacy authorization", e))?;

        set_password(conn, id, &attrs.password).await
    }

    async fn delete(
        &self,
        conn: &Connection,
        id: &str,
        _attrs: &LegacyAuthorizationAttrs,
    ) -> Result<(), CoreError> {
        conn.legacy()
            .delete_authorization(id)
            .await
            .map_err(|e| CoreError::remote("error deleting legacy authorization", e))
    }
}

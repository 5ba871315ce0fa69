use fluxprov_api::types::{AuthorizationPostRequest, AuthorizationUpdateRequest};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::{Resource, is_gone};
use crate::resources::permission::{self, PermissionAttrs};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

const NOT_FOUND: &str = "not found: authorization not found";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_authorization",
    description: "An API token scoped to a set of permissions.",
    attributes: &[
        Attribute::required("org_id", AttributeKind::String).force_new(),
        Attribute::optional("description", AttributeKind::String).default_value(""),
        Attribute::optional("status", AttributeKind::String)
            .default_value("active")
            .describe("active | inactive"),
        Attribute::required("permissions", AttributeKind::Set)
            .force_new()
            .describe("Set of {action: read|write, resource: {type, id, org_id, org, name}}."),
        Attribute::optional_computed("user_id", AttributeKind::String).force_new(),
        Attribute::computed("user_org_id", AttributeKind::String),
        Attribute::computed("token", AttributeKind::String).sensitive(),
    ],
};

/// Whether a token (or 1.x credential) is usable.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthorizationStatus {
    #[default]
    Active,
    Inactive,
}

impl AuthorizationStatus {
    /// Parse the server's status, keeping `fallback` for anything unexpected.
    pub(crate) fn from_server(raw: Option<&str>, fallback: Self) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationAttrs {
    pub org_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: AuthorizationStatus,
    pub permissions: Vec<PermissionAttrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_org_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::secret::exposed_opt"
    )]
    pub token: Option<SecretString>,
}

pub(crate) fn validate_permissions(
    resource_type: &'static str,
    permissions: &[PermissionAttrs],
) -> Result<(), CoreError> {
    if permissions.is_empty() {
        return Err(CoreError::InvalidAttributes {
            resource_type,
            message: "permissions must contain at least one entry".into(),
        });
    }
    if let Some(idx) = permissions
        .iter()
        .position(|p| p.resource.resource_type.is_empty())
    {
        return Err(CoreError::InvalidAttributes {
            resource_type,
            message: format!("permissions[{idx}].resource.type must not be empty"),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationResource;

impl Resource for AuthorizationResource {
    type Attrs = AuthorizationAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    fn validate(&self, attrs: &AuthorizationAttrs) -> Result<(), CoreError> {
        validate_permissions(SCHEMA.type_name, &attrs.permissions)
    }

    async fn create(&self, conn: &Connection, attrs: &AuthorizationAttrs) -> Result<String, CoreError> {
        let body = AuthorizationPostRequest {
            org_id: attrs.org_id.clone(),
            user_id: attrs.user_id.clone(),
            description: Some(attrs.description.clone()),
            status: attrs.status.to_string(),
            permissions: permission::to_wire(&attrs.permissions),
        };
        let auth = conn
            .api()
            .create_authorization(&body)
            .await
            .map_err(|e| CoreError::remote("error creating authorization", e))?;
        Ok(auth.id)
    }

    async fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &AuthorizationAttrs,
    ) -> Result<Option<AuthorizationAttrs>, CoreError> {
        let auth = match conn.api().get_authorization(id).await {
            Ok(auth) => auth,
            Err(e) if is_gone(&e, NOT_FOUND) => {
                debug!(id, "authorization not found");
                return Ok(None);
            }
            Err(e) => return Err(CoreError::remote("error getting authorization", e)),
        };

        let org_id = auth.org_id.unwrap_or_else(|| prior.org_id.clone());
        Ok(Some(AuthorizationAttrs {
            description: auth.description.unwrap_or_default(),
            status: AuthorizationStatus::from_server(auth.status.as_deref(), prior.status),
            permissions: permission::project(&prior.permissions, &auth.permissions),
            user_id: auth.user_id.or_else(|| prior.user_id.clone()),
            user_org_id: Some(org_id.clone()),
            token: auth.token.map(SecretString::from).or_else(|| prior.token.clone()),
            org_id,
        }))
    }

    async fn update(&self, conn: &Connection, id: &str, attrs: &AuthorizationAttrs) -> Result<(), CoreError> {
        let body = AuthorizationUpdateRequest {
            status: Some(attrs.status.to_string()),
            description: Some(attrs.description.clone()),
        };
        conn.api()
            .update_authorization(id, &body)
            .await
            .map_err(|e| CoreError::remote("error updating authorization", e))?;
        Ok(())
    }

    async fn delete(&self, conn: &Connection, id: &str, _attrs: &AuthorizationAttrs) -> Result<(), CoreError> {
        conn.api()
            .delete_authorization(id)
            .await
            .map_err(|e| CoreError::remote("error deleting authorization", e))
    }
}

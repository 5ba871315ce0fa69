use serde::Deserialize;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::{DataSource, DataState};
use crate::resources::organization::OrganizationAttrs;
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_organization",
    description: "Look up an organization by name.",
    attributes: &[
        Attribute::required("name", AttributeKind::String),
        Attribute::computed("description", AttributeKind::String),
        Attribute::computed("created_at", AttributeKind::String),
        Attribute::computed("updated_at", AttributeKind::String),
    ],
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationQuery {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationDataSource;

impl DataSource for OrganizationDataSource {
    type Query = OrganizationQuery;
    type Output = OrganizationAttrs;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    async fn read(
        &self,
        conn: &Connection,
        query: &OrganizationQuery,
    ) -> Result<DataState<OrganizationAttrs>, CoreError> {
        let orgs = conn
            .api()
            .find_organizations_by_name(&query.name)
            .await
            .map_err(|e| CoreError::remote("error looking up organization", e))?;

        let org = orgs
            .into_iter()
            .find(|o| o.name == query.name)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "organization",
                identifier: query.name.clone(),
            })?;

        Ok(DataState {
            id: org.id.clone(),
            attrs: org.into(),
        })
    }
}

// ── Provider catalog ──
//
// Every type this provider registers with a host, keyed by its full
// `influxdb-v2_*` name, plus the provider's own configuration block.

use serde::Serialize;

use crate::schema::{Attribute, AttributeKind, ResourceSchema};
use crate::{data, resources};

/// Prefix shared by every registered type name.
pub const TYPE_PREFIX: &str = "influxdb-v2";

pub static PROVIDER_SCHEMA: ResourceSchema = ResourceSchema {
    type_name: TYPE_PREFIX,
    description: "Connection settings for an InfluxDB v2 server.",
    attributes: &[
        Attribute::optional("url", AttributeKind::String)
            .default_value("http://localhost:8086")
            .describe("Server URL. Falls back to INFLUXDB_V2_URL."),
        Attribute::optional("token", AttributeKind::String)
            .sensitive()
            .default_value("")
            .describe("API token. Falls back to INFLUXDB_V2_TOKEN."),
        Attribute::optional("skip_ssl_verify", AttributeKind::Bool)
            .default_value("false")
            .describe("Accept any TLS certificate. Falls back to INFLUXDB_SKIP_SSL_VERIFY."),
        Attribute::optional("health_check", AttributeKind::String)
            .default_value("ready")
            .describe("Bootstrap health check: ready | ping."),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SchemaKind {
    Provider,
    Resource,
    DataSource,
}

/// Everything the provider exposes.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub provider: &'static ResourceSchema,
    pub resources: Vec<&'static ResourceSchema>,
    pub data_sources: Vec<&'static ResourceSchema>,
}

impl Catalog {
    pub fn resource(&self, type_name: &str) -> Option<&'static ResourceSchema> {
        self.resources
            .iter()
            .copied()
            .find(|s| s.type_name == type_name)
    }

    pub fn data_source(&self, type_name: &str) -> Option<&'static ResourceSchema> {
        self.data_sources
            .iter()
            .copied()
            .find(|s| s.type_name == type_name)
    }
}

pub fn catalog() -> Catalog {
    Catalog {
        provider: &PROVIDER_SCHEMA,
        resources: vec![
            &resources::authorization::SCHEMA,
            &resources::bucket::SCHEMA,
            &resources::dbrp_mapping::SCHEMA,
            &resources::legacy_authorization::SCHEMA,
            &resources::organization::SCHEMA,
            &resources::scraper::SCHEMA,
        ],
        data_sources: vec![
            &data::bucket::SCHEMA,
            &data::organization::SCHEMA,
            &data::ready::SCHEMA,
        ],
    }
}

/// Accept either the full type name or its suffix (`bucket`).
pub fn qualify(type_name: &str) -> String {
    if type_name.starts_with(TYPE_PREFIX) {
        type_name.to_owned()
    } else {
        format!("{TYPE_PREFIX}_{type_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_carries_the_prefix() {
        let catalog = catalog();
        for schema in catalog.resources.iter().chain(&catalog.data_sources) {
            assert!(
                schema.type_name.starts_with("influxdb-v2_"),
                "{}",
                schema.type_name
            );
        }
        assert_eq!(catalog.resources.len(), 6);
        assert_eq!(catalog.data_sources.len(), 3);
    }

    #[test]
    fn lookup_by_short_name() {
        let catalog = catalog();
        let bucket = catalog.resource(&qualify("bucket"));
        assert!(bucket.is_some_and(|s| s.attribute("org_id").is_some_and(|a| a.force_new)));
        assert!(catalog.data_source("influxdb-v2_ready").is_some());
        assert!(catalog.resource("influxdb-v2_ready").is_none());
    }

    #[test]
    fn scraper_attributes_all_force_new() {
        let scraper = &resources::scraper::SCHEMA;
        assert!(
            scraper
                .attributes
                .iter()
                .filter(|a| a.presence != crate::schema::Presence::Computed)
                .all(|a| a.force_new)
        );
    }

    #[test]
    fn token_is_sensitive() {
        assert!(PROVIDER_SCHEMA.attribute("token").is_some_and(|a| a.sensitive));
        assert!(
            resources::legacy_authorization::SCHEMA
                .attribute("password")
                .is_some_and(|a| a.sensitive)
        );
    }
}

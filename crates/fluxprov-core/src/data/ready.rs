use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::CoreError;
use crate::resource::{DataSource, DataState};
use crate::schema::{Attribute, AttributeKind, ResourceSchema};

const READY_STATUS: &str = "ready";

pub static SCHEMA: ResourceSchema = ResourceSchema {
    type_name: "influxdb-v2_ready",
    description: "Readiness of the configured server.",
    attributes: &[Attribute::computed("output", AttributeKind::Map)
        .describe("{url}: the server URL, once /ready answered.")],
};

/// The ready data source takes no arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadyQuery {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyOutput {
    pub output: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadyDataSource;

impl DataSource for ReadyDataSource {
    type Query = ReadyQuery;
    type Output = ReadyOutput;

    fn schema(&self) -> &'static ResourceSchema {
        &SCHEMA
    }

    /// A reachable server that reports a status other than `ready` is
    /// logged, not failed; only transport or HTTP errors fail the read.
    async fn read(
        &self,
        conn: &Connection,
        _query: &ReadyQuery,
    ) -> Result<DataState<ReadyOutput>, CoreError> {
        let ready = conn
            .api()
            .ready()
            .await
            .map_err(|source| CoreError::NotReady { source })?;

        if ready.status == READY_STATUS {
            debug!(up = ?ready.up, "server ready");
        } else {
            warn!(status = %ready.status, "server answered /ready but is not ready");
        }

        let url = conn.server_url().to_owned();
        Ok(DataState {
            id: url.clone(),
            attrs: ReadyOutput {
                output: BTreeMap::from([("url".to_owned(), url)]),
            },
        })
    }
}

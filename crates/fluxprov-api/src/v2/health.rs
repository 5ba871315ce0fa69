// Public API health endpoints
//
// `/ready` and `/ping` live at the server root, outside `/api/v2`.

use tracing::debug;

use crate::error::Error;
use crate::types::{PingResponse, ReadyResponse};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// Readiness check.
    ///
    /// `GET /ready`
    pub async fn ready(&self) -> Result<ReadyResponse, Error> {
        let url = self.rest.root_url("ready")?;
        debug!("checking readiness");
        self.rest.get(url).await
    }

    /// Liveness check.
    ///
    /// `GET /ping` (204, version reported in `X-Influxdb-Version`)
    pub async fn ping(&self) -> Result<PingResponse, Error> {
        let url = self.rest.root_url("ping")?;
        debug!("pinging server");
        let resp = self.rest.get_raw(url).await?;
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        Ok(PingResponse {
            version: header("X-Influxdb-Version"),
            build: header("X-Influxdb-Build"),
        })
    }
}

// Public API HTTP client
//
// Base path: /api/v2/
// Auth: `Authorization: Token <token>` default header

use secrecy::SecretString;
use url::Url;

use crate::auth::{ApiSurface, token_headers};
use crate::error::Error;
use crate::rest::RestClient;
use crate::transport::TransportConfig;

/// Async client for the InfluxDB v2 public API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) rest: RestClient,
}

impl ApiClient {
    /// Build from a server URL, token, and transport config.
    ///
    /// Injects `Authorization: Token <token>` as a default header on
    /// every request.
    pub fn new(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token_headers(token)?)?;
        Ok(Self {
            rest: RestClient::new(http, base_url, ApiSurface::Public),
        })
    }
}

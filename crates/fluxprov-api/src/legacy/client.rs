// Legacy API HTTP client
//
// Same transport and token header as the public client, but rooted at
// `{url}/private`. Endpoint methods live in `authorizations.rs`.

use secrecy::SecretString;
use url::Url;

use crate::auth::{ApiSurface, token_headers};
use crate::error::Error;
use crate::rest::RestClient;
use crate::transport::TransportConfig;

/// Raw HTTP client for the server's private legacy API.
///
/// Every request carries `Authorization: Token <token>` and honours the
/// same TLS policy as the public client.
#[derive(Debug, Clone)]
pub struct LegacyClient {
    pub(crate) rest: RestClient,
}

impl LegacyClient {
    /// Create a new legacy client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `http://localhost:8086`); the
    /// `/private` prefix is applied per request.
    pub fn new(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token_headers(token)?)?;
        Ok(Self {
            rest: RestClient::new(http, base_url, ApiSurface::Private),
        })
    }
}

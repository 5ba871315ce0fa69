// ── Connection bootstrap ──
//
// Turns a resolved `ProviderConfig` into the shared context every resource
// mapper works against: the public API client plus the private legacy
// client, both built with the same TLS policy and token.

use std::sync::Arc;

use fluxprov_api::{ApiClient, LegacyClient, TlsMode, TransportConfig};
use tracing::{debug, info};

use crate::config::{HealthCheck, ProviderConfig, TlsVerification};
use crate::error::CoreError;

/// Shared, read-only handle to a health-checked InfluxDB v2 server.
///
/// Cheaply cloneable; safe to use from many resource instances at once.
#[derive(Debug, Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

#[derive(Debug)]
struct ConnectionInner {
    api: ApiClient,
    legacy: LegacyClient,
    server_url: String,
}

impl Connection {
    /// Build both clients and health-check the server.
    ///
    /// The health check runs before the legacy client is built, so a failing
    /// server never yields a half-initialized connection.
    pub async fn connect(config: &ProviderConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);

        let api = ApiClient::new(config.url.clone(), &config.token, &transport).map_err(
            |source| CoreError::ClientSetup {
                client: "public API",
                source,
            },
        )?;

        check_health(&api, config.health_check).await?;
        info!(url = %config.url, health_check = %config.health_check, "server reachable");

        let legacy = LegacyClient::new(config.url.clone(), &config.token, &transport).map_err(
            |source| CoreError::ClientSetup {
                client: "legacy",
                source,
            },
        )?;

        Ok(Self {
            inner: Arc::new(ConnectionInner {
                api,
                legacy,
                server_url: config.server_url.clone(),
            }),
        })
    }

    /// Client for the public `/api/v2` surface.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Client for the private `/private/legacy` surface.
    pub fn legacy(&self) -> &LegacyClient {
        &self.inner.legacy
    }

    /// The server URL as it was configured.
    pub fn server_url(&self) -> &str {
        &self.inner.server_url
    }
}

async fn check_health(api: &ApiClient, health_check: HealthCheck) -> Result<(), CoreError> {
    let endpoint = health_check.endpoint();
    debug!(endpoint, "checking server health");

    let result = match health_check {
        HealthCheck::Ready => api.ready().await.map(|ready| {
            debug!(status = %ready.status, "ready check answered");
        }),
        HealthCheck::Ping => api.ping().await.map(|ping| {
            debug!(version = ?ping.version, build = ?ping.build, "ping check answered");
        }),
    };

    result.map_err(|source| CoreError::ConnectionFailed { endpoint, source })
}

fn build_transport(config: &ProviderConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

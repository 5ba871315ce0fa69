// ── Runtime connection configuration ──
//
// These types describe *how* to reach an InfluxDB v2 server. They carry the
// token and connection tuning but never touch disk: `fluxprov-config`
// resolves a `ProviderConfig` and hands it to `Connection::connect`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default server endpoint when neither configuration nor environment set one.
pub const DEFAULT_URL: &str = "http://localhost:8086";

/// Which endpoint the bootstrap health check hits.
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
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthCheck {
    /// `GET /ready`
    #[default]
    Ready,
    /// `GET /ping`
    Ping,
}

impl HealthCheck {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Ready => "/ready",
            Self::Ping => "/ping",
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (`skip_ssl_verify = true`).
    DangerAcceptInvalid,
}

/// Resolved provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Server endpoint (e.g., `http://localhost:8086`).
    pub url: Url,
    /// The endpoint exactly as configured, before URL normalization.
    pub server_url: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Bootstrap health-check endpoint.
    pub health_check: HealthCheck,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Config for `url` with system TLS, the `/ready` health check and a 30s timeout.
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            server_url: url.to_string(),
            url,
            token,
            tls: TlsVerification::default(),
            health_check: HealthCheck::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Like [`ProviderConfig::new`], keeping `url` verbatim as the
    /// reported server URL.
    pub fn parse(url: &str, token: SecretString) -> Result<Self, url::ParseError> {
        Ok(Self {
            server_url: url.to_owned(),
            ..Self::new(Url::parse(url)?, token)
        })
    }
}

//! Provider configuration for fluxprov.
//!
//! Resolves the provider block into a `fluxprov_core::ProviderConfig`.
//! Every field is taken from the first source that sets it:
//!
//! 1. the explicit block (a `[provider]` table in TOML, or built in memory)
//! 2. the environment (`INFLUXDB_V2_URL`, `INFLUXDB_V2_TOKEN`,
//!    `INFLUXDB_SKIP_SSL_VERIFY`)
//! 3. built-in defaults
//!
//! `health_check`, `timeout` and `ca_cert` have no environment fallback.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use strum::VariantNames;
use thiserror::Error;

use fluxprov_core::{DEFAULT_URL, HealthCheck, ProviderConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Environment ─────────────────────────────────────────────────────

pub const ENV_URL: &str = "INFLUXDB_V2_URL";
pub const ENV_TOKEN: &str = "INFLUXDB_V2_TOKEN";
pub const ENV_SKIP_SSL_VERIFY: &str = "INFLUXDB_SKIP_SSL_VERIFY";

/// The provider variables as set, never type-guessed: a token like
/// `0123` must reach the server unchanged. Empty variables count as unset.
#[derive(Debug, Default, Serialize)]
struct EnvBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_ssl_verify: Option<String>,
}

impl EnvBlock {
    fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            url: var(ENV_URL),
            token: var(ENV_TOKEN),
            skip_ssl_verify: var(ENV_SKIP_SSL_VERIFY),
        }
    }
}

fn env_provider() -> Serialized<EnvBlock> {
    Serialized::defaults(EnvBlock::from_env())
}

// ── Config structs ──────────────────────────────────────────────────

/// The explicit provider block. Unset fields fall through to the
/// environment, then to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// API token (plaintext; prefer `INFLUXDB_V2_TOKEN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_bool_opt"
    )]
    pub skip_ssl_verify: Option<bool>,

    /// `ready` or `ping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// PEM file with an extra trusted CA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

/// On-disk layout: the block lives under `[provider]`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub provider: ProviderBlock,
}

/// Every field after merging all sources, before validation.
#[derive(Debug, Deserialize, Serialize)]
struct Merged {
    url: String,
    token: String,
    #[serde(deserialize_with = "lenient_bool")]
    skip_ssl_verify: bool,
    health_check: String,
    timeout: u64,
    ca_cert: Option<PathBuf>,
}

impl Default for Merged {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            token: String::new(),
            skip_ssl_verify: false,
            health_check: HealthCheck::default().to_string(),
            timeout: 30,
            ca_cert: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "fluxprov", "fluxprov").map_or_else(
        || PathBuf::from(".fluxprov.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Read the `[provider]` block from a TOML file. A missing file or a
/// file without the table yields an empty block.
pub fn load_block(path: &Path) -> Result<ProviderBlock, ConfigError> {
    let figment = Figment::from(Toml::file(path));
    if !figment.contains("provider") {
        return Ok(ProviderBlock::default());
    }
    Ok(figment.extract_inner("provider")?)
}

/// Merge `block` over the environment and defaults, then validate.
pub fn resolve(block: &ProviderBlock) -> Result<ProviderConfig, ConfigError> {
    let merged: Merged = Figment::new()
        .merge(Serialized::defaults(Merged::default()))
        .merge(env_provider())
        .merge(Serialized::defaults(block))
        .extract()?;

    merged.validate()
}

/// `load_block` + `resolve`.
pub fn load(path: &Path) -> Result<ProviderConfig, ConfigError> {
    resolve(&load_block(path)?)
}

/// Render a block as a `[provider]` TOML document.
pub fn to_toml(block: &ProviderBlock) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(&ConfigFile {
        provider: block.clone(),
    })?)
}

impl Merged {
    fn validate(self) -> Result<ProviderConfig, ConfigError> {
        let url = url::Url::parse(&self.url).map_err(|e| ConfigError::Validation {
            field: "url",
            reason: format!("{e}: '{}'", self.url),
        })?;

        let health_check: HealthCheck =
            self.health_check
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "health_check",
                    reason: format!(
                        "expected one of {}, got '{}'",
                        HealthCheck::VARIANTS.join(", "),
                        self.health_check
                    ),
                })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout",
                reason: "must be at least one second".into(),
            });
        }

        let tls = if self.skip_ssl_verify {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(path) = self.ca_cert {
            TlsVerification::CustomCa(path)
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ProviderConfig {
            url,
            server_url: self.url,
            token: SecretString::from(self.token),
            tls,
            health_check,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

// ── Lenient scalars ─────────────────────────────────────────────────
//
// `skip_ssl_verify` arrives as a bool from a block or TOML and as a string
// from the environment; both forms are accepted.

struct BoolVisitor;

impl Visitor<'_> for BoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0/1, or \"true\"/\"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    deserializer.deserialize_any(BoolVisitor)
}

fn lenient_bool_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    deserializer.deserialize_any(BoolVisitor).map(Some)
}

//! CLI configuration: thin wrapper around `fluxprov_config`.
//!
//! Flags form the explicit provider block on top of the config file's
//! `[provider]` table; the environment and defaults fill the rest.

use std::path::PathBuf;

use fluxprov_config::ProviderBlock;
use fluxprov_core::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `FLUXPROV_CONFIG`, else the
/// platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(fluxprov_config::config_path)
}

/// The config file's block with CLI flag overrides applied.
pub fn explicit_block(global: &GlobalOpts) -> Result<ProviderBlock, CliError> {
    let mut block = fluxprov_config::load_block(&config_file(global))?;

    if let Some(ref url) = global.url {
        block.url = Some(url.clone());
    }
    if let Some(ref token) = global.token {
        block.token = Some(token.clone());
    }
    if global.skip_ssl_verify {
        block.skip_ssl_verify = Some(true);
    }
    if let Some(health_check) = global.health_check {
        block.health_check = Some(health_check.as_str().to_owned());
    }
    if let Some(timeout) = global.timeout {
        block.timeout = Some(timeout);
    }

    Ok(block)
}

/// Resolve the provider configuration for this invocation.
pub fn provider_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    Ok(fluxprov_config::resolve(&explicit_block(global)?)?)
}

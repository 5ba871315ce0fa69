//! `fluxprov config` handlers.

use secrecy::ExposeSecret;

use fluxprov_config::ProviderBlock;
use fluxprov_core::{ProviderConfig, TlsVerification};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

const REDACTED: &str = "<redacted>";

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let config = crate::config::provider_config(global)?;
            let rendered = fluxprov_config::to_toml(&effective_block(&config))?;
            if !global.quiet {
                print!("{rendered}");
            }
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", crate::config::config_file(global).display());
            Ok(())
        }
    }
}

/// The resolved settings as a block, with the token hidden.
fn effective_block(config: &ProviderConfig) -> ProviderBlock {
    let (skip_ssl_verify, ca_cert) = match &config.tls {
        TlsVerification::SystemDefaults => (false, None),
        TlsVerification::CustomCa(path) => (false, Some(path.clone())),
        TlsVerification::DangerAcceptInvalid => (true, None),
    };
    let token = if config.token.expose_secret().is_empty() {
        String::new()
    } else {
        REDACTED.to_owned()
    };

    ProviderBlock {
        url: Some(config.server_url.clone()),
        token: Some(token),
        skip_ssl_verify: Some(skip_ssl_verify),
        health_check: Some(config.health_check.to_string()),
        timeout: Some(config.timeout.as_secs()),
        ca_cert,
    }
}

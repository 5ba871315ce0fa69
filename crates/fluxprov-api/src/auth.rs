use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Which API surface a client talks to.
///
/// The public surface carries buckets, orgs, authorizations, DBRP mappings
/// and scrapers. The private surface only exists for the 1.x-compatible
/// legacy authorizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    /// `/api/v2/...`
    Public,
    /// `/private/...`
    Private,
}

impl ApiSurface {
    /// The path prefix every endpoint on this surface lives under.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Public => "/api/v2",
            Self::Private => "/private",
        }
    }
}

/// Build the default headers carrying `Authorization: Token <token>`.
///
/// The header value is marked sensitive so it never shows up in
/// `reqwest` debug output.
pub fn token_headers(token: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    let mut value = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
        .map_err(|e| Error::InvalidToken(e.to_string()))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

// Shared JSON-over-HTTP plumbing for both API surfaces.
//
// Wraps `reqwest::Client` with URL construction under a surface prefix,
// success/expected-status checks, and decoding of the server's
// `{"code": "...", "message": "..."}` error bodies. The public and legacy
// clients are thin façades over this type.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ApiSurface;
use crate::error::Error;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Low-level REST client bound to one API surface.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    surface: ApiSurface,
}

impl RestClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url, surface: ApiSurface) -> Self {
        Self {
            http,
            base_url,
            surface,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a URL under the surface prefix: `{base}{prefix}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let prefix = self.surface.prefix();
        Ok(Url::parse(&format!("{base}{prefix}/{path}"))?)
    }

    /// Build a URL directly under the server root: `{base}/{path}`.
    ///
    /// Used for `/ready` and `/ping`, which live outside `/api/v2`.
    pub(crate) fn root_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp, None).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp, None).await
    }

    /// GET that only cares about the status code (health checks).
    pub(crate) async fn get_raw(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        expected: Option<StatusCode>,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp, expected).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        expected: Option<StatusCode>,
    ) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp, expected).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_response(resp, None).await
    }

    pub(crate) async fn patch_with_params<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        debug!("PATCH {url} params={params:?}");

        let resp = self.http.patch(url).query(params).json(body).send().await?;
        self.handle_response(resp, None).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp, None).await
    }

    pub(crate) async fn delete_with_params(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        debug!("DELETE {url} params={params:?}");

        let resp = self.http.delete(url).query(params).send().await?;
        Self::handle_empty(resp, None).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        expected: Option<StatusCode>,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }
        Self::check_expected(status, expected, resp.url())?;

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response, expected: Option<StatusCode>) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Self::check_expected(status, expected, resp.url())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    fn check_expected(status: StatusCode, expected: Option<StatusCode>, url: &Url) -> Result<(), Error> {
        match expected {
            Some(want) if want != status => Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: url.path().to_owned(),
            }),
            _ => Ok(()),
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == StatusCode::UNAUTHORIZED {
            return Error::Unauthorized {
                message: parsed
                    .and_then(|err| err.message)
                    .unwrap_or_else(|| status.to_string()),
            };
        }

        match parsed {
            Some(err) => Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            },
        }
    }
}

// Legacy API authorization endpoints
//
// 1.x-style authorizations are created in two steps: the authorization
// itself (201), then its password (204). The password is write-only.

use reqwest::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::{LegacyAuthorizationPostRequest, PasswordRequest};
use crate::types::{Authorization, AuthorizationUpdateRequest};

impl LegacyClient {
    /// Create a legacy authorization.
    ///
    /// `POST /private/legacy/authorizations` (expects 201)
    pub async fn create_authorization(
        &self,
        body: &LegacyAuthorizationPostRequest,
    ) -> Result<Authorization, Error> {
        let url = self.rest.api_url("legacy/authorizations")?;
        debug!(username = %body.token, org_id = %body.org_id, "creating legacy authorization");
        self.rest.post(url, body, Some(StatusCode::CREATED)).await
    }

    /// Set (or reset) the password of a legacy authorization.
    ///
    /// `POST /private/legacy/authorizations/{id}/password` (expects 204)
    pub async fn set_password(&self, id: &str, password: &str) -> Result<(), Error> {
        let url = self
            .rest
            .api_url(&format!("legacy/authorizations/{id}/password"))?;
        debug!(id, "setting legacy authorization password");
        self.rest
            .post_no_response(url, &PasswordRequest { password }, Some(StatusCode::NO_CONTENT))
            .await
    }

    /// `GET /private/legacy/authorizations/{id}`
    pub async fn get_authorization(&self, id: &str) -> Result<Authorization, Error> {
        let url = self.rest.api_url(&format!("legacy/authorizations/{id}"))?;
        self.rest.get(url).await
    }

    /// `PATCH /private/legacy/authorizations/{id}`
    pub async fn update_authorization(
        &self,
        id: &str,
        body: &AuthorizationUpdateRequest,
    ) -> Result<Authorization, Error> {
        let url = self.rest.api_url(&format!("legacy/authorizations/{id}"))?;
        debug!(id, "updating legacy authorization");
        self.rest.patch(url, body).await
    }

    /// `DELETE /private/legacy/authorizations/{id}`
    pub async fn delete_authorization(&self, id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("legacy/authorizations/{id}"))?;
        debug!(id, "deleting legacy authorization");
        self.rest.delete(url).await
    }
}

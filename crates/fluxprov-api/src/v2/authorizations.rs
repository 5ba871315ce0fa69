// Public API authorization (token) endpoints

use tracing::debug;

use crate::error::Error;
use crate::types::{Authorization, AuthorizationPostRequest, AuthorizationUpdateRequest};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// `POST /api/v2/authorizations`
    pub async fn create_authorization(
        &self,
        body: &AuthorizationPostRequest,
    ) -> Result<Authorization, Error> {
        let url = self.rest.api_url("authorizations")?;
        debug!(org_id = %body.org_id, "creating authorization");
        self.rest.post(url, body, None).await
    }

    /// `GET /api/v2/authorizations/{id}`
    pub async fn get_authorization(&self, id: &str) -> Result<Authorization, Error> {
        let url = self.rest.api_url(&format!("authorizations/{id}"))?;
        self.rest.get(url).await
    }

    /// `PATCH /api/v2/authorizations/{id}`
    pub async fn update_authorization(
        &self,
        id: &str,
        body: &AuthorizationUpdateRequest,
    ) -> Result<Authorization, Error> {
        let url = self.rest.api_url(&format!("authorizations/{id}"))?;
        debug!(id, "updating authorization");
        self.rest.patch(url, body).await
    }

    /// `DELETE /api/v2/authorizations/{id}`
    pub async fn delete_authorization(&self, id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("authorizations/{id}"))?;
        debug!(id, "deleting authorization");
        self.rest.delete(url).await
    }
}

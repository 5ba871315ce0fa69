// Public API DBRP mapping endpoints
//
// Every call except create is scoped by an `orgID` query parameter.

use tracing::debug;

use crate::error::Error;
use crate::types::{Dbrp, DbrpCreate, DbrpGet, DbrpUpdate};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// `POST /api/v2/dbrps`
    pub async fn create_dbrp(&self, body: &DbrpCreate) -> Result<Dbrp, Error> {
        let url = self.rest.api_url("dbrps")?;
        debug!(database = %body.database, bucket_id = %body.bucket_id, "creating dbrp mapping");
        self.rest.post(url, body, None).await
    }

    /// `GET /api/v2/dbrps/{id}?orgID={org_id}`
    pub async fn get_dbrp(&self, id: &str, org_id: &str) -> Result<Dbrp, Error> {
        let url = self.rest.api_url(&format!("dbrps/{id}"))?;
        let wrapped: DbrpGet = self
            .rest
            .get_with_params(url, &[("orgID", org_id.to_owned())])
            .await?;
        Ok(wrapped.content)
    }

    /// `PATCH /api/v2/dbrps/{id}?orgID={org_id}`
    pub async fn update_dbrp(&self, id: &str, org_id: &str, body: &DbrpUpdate) -> Result<Dbrp, Error> {
        let url = self.rest.api_url(&format!("dbrps/{id}"))?;
        debug!(id, "updating dbrp mapping");
        let wrapped: DbrpGet = self
            .rest
            .patch_with_params(url, &[("orgID", org_id.to_owned())], body)
            .await?;
        Ok(wrapped.content)
    }

    /// `DELETE /api/v2/dbrps/{id}?orgID={org_id}`
    pub async fn delete_dbrp(&self, id: &str, org_id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("dbrps/{id}"))?;
        debug!(id, "deleting dbrp mapping");
        self.rest
            .delete_with_params(url, &[("orgID", org_id.to_owned())])
            .await
    }
}

// Public API organization endpoints

use tracing::debug;

use crate::error::Error;
use crate::types::{
    Organization, Organizations, PatchOrganizationRequest, PostOrganizationRequest,
};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// `POST /api/v2/orgs`
    pub async fn create_organization(
        &self,
        body: &PostOrganizationRequest,
    ) -> Result<Organization, Error> {
        let url = self.rest.api_url("orgs")?;
        debug!(name = %body.name, "creating organization");
        self.rest.post(url, body, None).await
    }

    /// `GET /api/v2/orgs/{id}`
    pub async fn get_organization(&self, id: &str) -> Result<Organization, Error> {
        let url = self.rest.api_url(&format!("orgs/{id}"))?;
        self.rest.get(url).await
    }

    /// Look up organizations by exact name.
    ///
    /// `GET /api/v2/orgs?org={name}`
    pub async fn find_organizations_by_name(&self, name: &str) -> Result<Vec<Organization>, Error> {
        let url = self.rest.api_url("orgs")?;
        let page: Organizations = self
            .rest
            .get_with_params(url, &[("org", name.to_owned())])
            .await?;
        Ok(page.orgs)
    }

    /// `PATCH /api/v2/orgs/{id}`
    pub async fn update_organization(
        &self,
        id: &str,
        body: &PatchOrganizationRequest,
    ) -> Result<Organization, Error> {
        let url = self.rest.api_url(&format!("orgs/{id}"))?;
        debug!(id, "updating organization");
        self.rest.patch(url, body).await
    }

    /// `DELETE /api/v2/orgs/{id}`
    pub async fn delete_organization(&self, id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("orgs/{id}"))?;
        debug!(id, "deleting organization");
        self.rest.delete(url).await
    }
}

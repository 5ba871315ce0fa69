// Public API bucket endpoints

use tracing::debug;

use crate::error::Error;
use crate::types::{Bucket, Buckets, PatchBucketRequest, PostBucketRequest};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// `POST /api/v2/buckets`
    pub async fn create_bucket(&self, body: &PostBucketRequest) -> Result<Bucket, Error> {
        let url = self.rest.api_url("buckets")?;
        debug!(name = %body.name, org_id = %body.org_id, "creating bucket");
        self.rest.post(url, body, None).await
    }

    /// `GET /api/v2/buckets/{id}`
    pub async fn get_bucket(&self, id: &str) -> Result<Bucket, Error> {
        let url = self.rest.api_url(&format!("buckets/{id}"))?;
        self.rest.get(url).await
    }

    /// Look up buckets by exact name, optionally scoped to one organization.
    ///
    /// `GET /api/v2/buckets?name={name}[&orgID={org_id}]`
    pub async fn find_buckets_by_name(
        &self,
        name: &str,
        org_id: Option<&str>,
    ) -> Result<Vec<Bucket>, Error> {
        let url = self.rest.api_url("buckets")?;
        let mut params = vec![("name", name.to_owned())];
        if let Some(org_id) = org_id {
            params.push(("orgID", org_id.to_owned()));
        }
        let page: Buckets = self.rest.get_with_params(url, &params).await?;
        Ok(page.buckets)
    }

    /// `PATCH /api/v2/buckets/{id}`
    pub async fn update_bucket(&self, id: &str, body: &PatchBucketRequest) -> Result<Bucket, Error> {
        let url = self.rest.api_url(&format!("buckets/{id}"))?;
        debug!(id, "updating bucket");
        self.rest.patch(url, body).await
    }

    /// `DELETE /api/v2/buckets/{id}`
    pub async fn delete_bucket(&self, id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("buckets/{id}"))?;
        debug!(id, "deleting bucket");
        self.rest.delete(url).await
    }
}

// Public API scraper target endpoints

use tracing::debug;

use crate::error::Error;
use crate::types::{ScraperTarget, ScraperTargetRequest};
use crate::v2::client::ApiClient;

impl ApiClient {
    /// `POST /api/v2/scrapers`
    pub async fn create_scraper(&self, body: &ScraperTargetRequest) -> Result<ScraperTarget, Error> {
        let url = self.rest.api_url("scrapers")?;
        debug!(name = %body.name, "creating scraper target");
        self.rest.post(url, body, None).await
    }

    /// `GET /api/v2/scrapers/{id}`
    pub async fn get_scraper(&self, id: &str) -> Result<ScraperTarget, Error> {
        let url = self.rest.api_url(&format!("scrapers/{id}"))?;
        self.rest.get(url).await
    }

    /// `DELETE /api/v2/scrapers/{id}`
    pub async fn delete_scraper(&self, id: &str) -> Result<(), Error> {
        let url = self.rest.api_url(&format!("scrapers/{id}"))?;
        debug!(id, "deleting scraper target");
        self.rest.delete(url).await
    }
}

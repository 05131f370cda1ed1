// Content endpoints
//
// Dashboard and navigation content. The write endpoints answer with a
// plain-text body (a backend quirk), so updates go through
// `post_returning_text` and callers keep the payload they submitted.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    DashboardCardDto, DashboardMetricsDto, DashboardProjectDto, NavigationLinkDto,
};

impl ApiClient {
    /// List the configured navigation links.
    ///
    /// `GET /api/content/navigation`
    pub async fn get_navigation(&self) -> Result<Vec<NavigationLinkDto>, Error> {
        let url = self.api_url("content/navigation");
        debug!("fetching navigation links");
        self.get(url).await
    }

    /// Replace the configured navigation links.
    ///
    /// `POST /api/content/navigation` -- text response.
    pub async fn update_navigation(&self, links: &[NavigationLinkDto]) -> Result<(), Error> {
        let url = self.api_url("content/navigation");
        debug!(count = links.len(), "updating navigation links");
        let _body = self.post_returning_text(url, &links).await?;
        Ok(())
    }

    /// List the dashboard cards.
    ///
    /// `GET /api/content/cards`
    pub async fn get_cards(&self) -> Result<Vec<DashboardCardDto>, Error> {
        let url = self.api_url("content/cards");
        debug!("fetching dashboard cards");
        self.get(url).await
    }

    /// Replace the dashboard cards.
    ///
    /// `POST /api/content/cards` -- text response.
    pub async fn update_cards(&self, cards: &[DashboardCardDto]) -> Result<(), Error> {
        let url = self.api_url("content/cards");
        debug!(count = cards.len(), "updating dashboard cards");
        let _body = self.post_returning_text(url, &cards).await?;
        Ok(())
    }

    /// Fetch platform-wide dashboard counters.
    ///
    /// `GET /api/content/metrics`
    pub async fn get_metrics(&self) -> Result<DashboardMetricsDto, Error> {
        let url = self.api_url("content/metrics");
        debug!("fetching dashboard metrics");
        self.get(url).await
    }

    /// Fetch the most recently created projects.
    ///
    /// `GET /api/content/latest-projects`
    pub async fn get_latest_projects(&self) -> Result<Vec<DashboardProjectDto>, Error> {
        let url = self.api_url("content/latest-projects");
        debug!("fetching latest projects");
        self.get(url).await
    }
}

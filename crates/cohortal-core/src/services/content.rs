// ── Dashboard / navigation content service ──

use std::sync::Arc;

use cohortal_api::ApiClient;
use cohortal_api::models::{DashboardCardDto, NavigationLinkDto};

use crate::error::CoreError;
use crate::model::{DashboardCard, DashboardMetrics, DashboardProject, NavigationLink};
use crate::store::{ResourceCell, ResourceStream};

/// Observable cache over the content endpoints: navigation links,
/// dashboard cards, metrics, and the latest-projects strip.
pub struct ContentService {
    api: Arc<ApiClient>,
    navigation: ResourceCell<Vec<NavigationLink>>,
    cards: ResourceCell<Vec<DashboardCard>>,
    metrics: ResourceCell<DashboardMetrics>,
    latest_projects: ResourceCell<Vec<DashboardProject>>,
}

impl ContentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            navigation: ResourceCell::new(),
            cards: ResourceCell::new(),
            metrics: ResourceCell::new(),
            latest_projects: ResourceCell::new(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn navigation(&self) -> ResourceStream<Vec<NavigationLink>> {
        self.navigation.subscribe()
    }

    pub fn cards(&self) -> ResourceStream<Vec<DashboardCard>> {
        self.cards.subscribe()
    }

    pub fn metrics(&self) -> ResourceStream<DashboardMetrics> {
        self.metrics.subscribe()
    }

    pub fn latest_projects(&self) -> ResourceStream<Vec<DashboardProject>> {
        self.latest_projects.subscribe()
    }

    // ── Fetch / update ───────────────────────────────────────────────

    /// Fetch the navigation links and broadcast them.
    pub async fn fetch_navigation(&self) -> Result<Arc<Vec<NavigationLink>>, CoreError> {
        let links = self.api.get_navigation().await?;
        let links: Vec<NavigationLink> = links.into_iter().map(NavigationLink::from).collect();
        Ok(self.navigation.publish(links))
    }

    /// Replace the navigation links.
    ///
    /// The endpoint answers with a text body, so the submitted payload is
    /// the value of record and is what gets published.
    pub async fn update_navigation(
        &self,
        links: Vec<NavigationLink>,
    ) -> Result<Arc<Vec<NavigationLink>>, CoreError> {
        let dtos: Vec<NavigationLinkDto> = links.iter().map(NavigationLinkDto::from).collect();
        self.api.update_navigation(&dtos).await?;
        Ok(self.navigation.publish(links))
    }

    /// Fetch the dashboard cards and broadcast them.
    pub async fn fetch_cards(&self) -> Result<Arc<Vec<DashboardCard>>, CoreError> {
        let cards = self.api.get_cards().await?;
        let cards: Vec<DashboardCard> = cards.into_iter().map(DashboardCard::from).collect();
        Ok(self.cards.publish(cards))
    }

    /// Replace the dashboard cards. Same text-response contract as
    /// [`update_navigation`](Self::update_navigation).
    pub async fn update_cards(
        &self,
        cards: Vec<DashboardCard>,
    ) -> Result<Arc<Vec<DashboardCard>>, CoreError> {
        let dtos: Vec<DashboardCardDto> = cards.iter().map(DashboardCardDto::from).collect();
        self.api.update_cards(&dtos).await?;
        Ok(self.cards.publish(cards))
    }

    /// Fetch the dashboard metrics and broadcast them.
    pub async fn fetch_metrics(&self) -> Result<Arc<DashboardMetrics>, CoreError> {
        let metrics = self.api.get_metrics().await?;
        Ok(self.metrics.publish(DashboardMetrics::from(metrics)))
    }

    /// Fetch the latest projects and broadcast them.
    pub async fn fetch_latest_projects(&self) -> Result<Arc<Vec<DashboardProject>>, CoreError> {
        let projects = self.api.get_latest_projects().await?;
        let projects: Vec<DashboardProject> =
            projects.into_iter().map(DashboardProject::from).collect();
        Ok(self.latest_projects.publish(projects))
    }
}

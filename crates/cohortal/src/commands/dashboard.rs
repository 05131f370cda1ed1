//! Dashboard command handler.

use serde::Serialize;
use tabled::Tabled;

use cohortal_core::{DashboardCard, DashboardMetrics, DashboardProject, Portal, PortalConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Dashboard {
    metrics: DashboardMetrics,
    cards: Vec<DashboardCard>,
    latest_projects: Vec<DashboardProject>,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Text")]
    text: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&DashboardCard> for CardRow {
    fn from(card: &DashboardCard) -> Self {
        Self {
            title: card.title.clone(),
            text: card.text.clone().unwrap_or_default(),
            url: card.url.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(config: PortalConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let dashboard = Portal::oneshot(config, |portal| async move {
        let content = portal.content();
        let (metrics, cards, latest) = tokio::join!(
            content.fetch_metrics(),
            content.fetch_cards(),
            content.fetch_latest_projects(),
        );
        Ok(Dashboard {
            metrics: *metrics?,
            cards: cards?.as_ref().clone(),
            latest_projects: latest?.as_ref().clone(),
        })
    })
    .await?;

    let out = output::render_single(
        &global.output,
        &dashboard,
        |d| {
            let mut text = format!(
                "AQLs: {}  Projects: {}  Organizations: {}\n",
                d.metrics.aqls, d.metrics.projects, d.metrics.organizations
            );
            if !d.cards.is_empty() {
                let rows: Vec<CardRow> = d.cards.iter().map(CardRow::from).collect();
                text.push_str(&tabled::Table::new(rows).to_string());
                text.push('\n');
            }
            if !d.latest_projects.is_empty() {
                text.push_str("Latest projects:\n");
                for project in &d.latest_projects {
                    text.push_str(&format!(
                        "  {} ({})\n",
                        project.name,
                        project.organization.as_deref().unwrap_or("-")
                    ));
                }
            }
            text
        },
        |d| format!("{} projects", d.metrics.projects),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

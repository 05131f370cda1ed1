//! AQL command handlers.

use std::io::Read;

use owo_colors::OwoColorize;
use tabled::Tabled;

use cohortal_core::{Aql, AqlFilter, AqlScope, Portal, PortalConfig, User};

use crate::cli::{AqlArgs, AqlCommand, AqlListArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AqlRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Public")]
    public: String,
}

impl From<&Aql> for AqlRow {
    fn from(aql: &Aql) -> Self {
        Self {
            id: aql.id.map(|id| id.to_string()).unwrap_or_default(),
            name: aql.name.clone(),
            author: aql.owner.as_ref().map(User::display_name).unwrap_or_default(),
            created: aql
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            public: if aql.public { "yes" } else { "no" }.to_owned(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: PortalConfig,
    args: AqlArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AqlCommand::List(list) => handle_list(config, list, global).await,
        AqlCommand::Validate { query } => handle_validate(config, query, global).await,
        AqlCommand::Execute { id } => handle_execute(config, id, global).await,
    }
}

async fn handle_list(
    config: PortalConfig,
    list: AqlListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = AqlFilter {
        search_text: list.search.clone(),
        scope: if list.public {
            AqlScope::Public
        } else {
            AqlScope::All
        },
        current_user: None,
    };

    let mut aqls = Portal::oneshot(config, |portal| async move {
        let service = portal.aqls();
        service.set_filter(filter);
        service.fetch_all().await?;
        // The filtered view is recomputed by fetch_all; read it back out.
        let filtered = service
            .filtered_aqls()
            .latest()
            .map(|a| a.as_ref().clone())
            .unwrap_or_default();
        Ok(filtered)
    })
    .await?;

    util::sort_aqls(&mut aqls, list.sort, list.direction.is_ascending());

    let out = output::render_list(
        &global.output,
        &aqls,
        |a| AqlRow::from(a),
        |a| a.id.map(|id| id.to_string()).unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn handle_validate(
    config: PortalConfig,
    query: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let outcome = Portal::oneshot(config, |portal| {
        let query = query.clone();
        async move { portal.aql_editor().validate(&query).await }
    })
    .await?;

    if outcome.valid {
        if !global.quiet {
            eprintln!("{}", "Query is valid".green());
        }
        return Ok(());
    }

    // A rejection carries the marker position; surface it with the
    // validation exit code.
    Err(CliError::QueryInvalid {
        message: outcome
            .message
            .unwrap_or_else(|| "invalid query".to_owned()),
        line: outcome.start_line,
        column: outcome.start_column,
    })
}

async fn handle_execute(
    config: PortalConfig,
    id: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = Portal::oneshot(config, |portal| async move {
        portal.aqls().execute(id).await
    })
    .await?;

    let out = output::render_single(
        &global.output,
        &result,
        |r| {
            let mut text = format!(
                "{} columns, {} rows\ncolumns: {}\n",
                r.columns.len(),
                r.row_count(),
                r.columns.join(", ")
            );
            for row in &r.rows {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                text.push_str(&cells.join("\t"));
                text.push('\n');
            }
            text
        },
        |r| format!("{} rows", r.row_count()),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

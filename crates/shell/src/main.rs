//! Headless driver: restores the persisted session, runs the guard over the
//! given paths and prints the resulting navigation as JSON.

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;

use pymes_auth::{Identity, JsonFileCredentialStore, SessionStore};
use pymes_navigation::{
    GateConfig, GuardOutcome, NavigationNode, RouteGuard, RouteTable, application_menu,
    filter_navigation,
};

const SESSION_FILE_VAR: &str = "PYMES_SESSION_FILE";

#[derive(Debug, Serialize)]
struct Visit {
    path: String,
    outcome: GuardOutcome,
}

#[derive(Debug, Serialize)]
struct Report {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<Identity>,
    permissions: Vec<String>,
    visits: Vec<Visit>,
    menu: Vec<NavigationNode>,
}

fn main() -> anyhow::Result<()> {
    pymes_observability::init();

    let session_file = std::env::var(SESSION_FILE_VAR).unwrap_or_else(|_| {
        tracing::warn!("{SESSION_FILE_VAR} not set; using ./session.json");
        "session.json".to_string()
    });

    let now = Utc::now();
    let store = SessionStore::new(JsonFileCredentialStore::new(&session_file));
    if let Err(e) = store.bootstrap(now) {
        tracing::warn!(
            error = %e,
            file = %session_file,
            "session restore failed; continuing signed out"
        );
    }

    let guard = RouteGuard::new(GateConfig::from_env());
    let table = RouteTable::application();
    let state = store.state();

    let visits = std::env::args()
        .skip(1)
        .map(|path| Visit {
            outcome: table.navigate(&path, &state, &guard, now),
            path,
        })
        .collect();

    let permissions = store.permissions();
    let report = Report {
        authenticated: store.is_authenticated(),
        user: store.identity(),
        permissions: permissions.sorted().iter().map(|p| p.to_string()).collect(),
        visits,
        menu: filter_navigation(&application_menu(), &permissions),
    };

    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{json}");
    Ok(())
}

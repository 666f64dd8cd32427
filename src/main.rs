use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::config::{default_webview_data_dir, load_config, AppConfig};
use crate::domain::entities::query::SortDirection;
use crate::infra::http::client::RestClient;
use crate::ui::state::app_state::Services;

const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// The standard page sizes plus `current` when it is not one of them.
fn page_size_options(current: usize) -> Vec<usize> {
    let mut options = PAGE_SIZE_OPTIONS.to_vec();
    if !options.contains(&current) {
        options.push(current);
        options.sort_unstable();
    }
    options
}

fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => "",
    }
}

fn pager_label(page_index: usize, page_count: usize, total: usize) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let noun = if total == 1 { "result" } else { "results" };
    format!("Page {page_index} of {page_count} ({total} {noun})")
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn build_services(config: &AppConfig) -> Result<Services> {
    let client = RestClient::new(config.api()).context("failed to create API client")?;
    Ok(Services {
        client: Arc::new(client),
        page_size: config.page_size,
    })
}

fn main() -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.log_filter);
    info!(api = %config.api_base_url, page_size = config.page_size, "starting hr-admin");

    let services = build_services(&config)?;
    let webview_data_dir = default_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("HR Admin"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(services)
        .launch(app::App);
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

mod api;
mod components;
mod config;
mod details;
mod highlight;
mod logging;
mod model;
mod report;
mod screens;
mod statusbar;
mod ui;
mod ui_utils;

use api::ApiClient;
use config::AppConfig;
use ui::App;

/// Terminal browser for the ASTRA project-structure backend.
#[derive(Parser, Debug)]
#[command(name = "astraview", version, about)]
struct Args {
    /// Backend base URL (overrides the configuration file)
    #[arg(long)]
    url: Option<String>,

    /// Write a standalone HTML report to FILE instead of starting the TUI
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::init(level);

    let mut config = AppConfig::load();
    if let Some(url) = args.url {
        config.base_url = url;
    }

    if let Some(path) = args.export {
        return export_report(&config, &path).await;
    }

    let mut app = App::new(config);
    app.run().await
}

/// Headless mode: fetch the tree and write the HTML report, no TUI.
async fn export_report(config: &AppConfig, path: &Path) -> Result<()> {
    let api = ApiClient::new(&config.base_url, config.request_timeout())?;
    let systems = api
        .fetch_tree()
        .await
        .with_context(|| format!("failed to fetch tree from {}", config.base_url))?;
    let tree = model::build_tree(&systems);

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let page = report::report_page(&report::tree_html(&tree), None, &generated);
    std::fs::write(path, page).with_context(|| format!("failed to write {}", path.display()))?;

    log::info!(
        "Report with {} systems written to {}",
        tree.len(),
        path.display()
    );
    Ok(())
}

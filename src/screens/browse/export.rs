use std::path::PathBuf;

use anyhow::{Context, Result};

use super::details_panel::DetailsPanel;
use super::types::BrowseScreen;
use crate::report;

impl BrowseScreen {
    /// Write the current tree (and the loaded detail record, if any) as a
    /// standalone HTML report next to the working directory.
    pub fn export_report(&self) -> Result<PathBuf> {
        let tree = report::tree_html(&self.items);
        let details = match &self.details {
            DetailsPanel::Loaded(details) => Some(report::details_html(&details.view)),
            _ => None,
        };

        let now = chrono::Local::now();
        let generated = now.format("%Y-%m-%d %H:%M:%S").to_string();
        let page = report::report_page(&tree, details.as_deref(), &generated);

        let path = PathBuf::from(format!(
            "astraview-report-{}.html",
            now.format("%Y%m%d-%H%M%S")
        ));
        std::fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("browse: report written to {}", path.display());
        Ok(path)
    }
}

use anyhow::Result;

use super::types::ConnectScreen;
use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::model::{self, TreeItem};

impl ConnectScreen {
    /// Fetch the tree document and build the model.
    ///
    /// The original UI left the tree silently empty when this request
    /// failed; here the error is logged, stored for inline display, and the
    /// screen stays interactive for another attempt.
    pub async fn try_connect(&mut self, config: &AppConfig) -> Option<(ApiClient, Vec<TreeItem>)> {
        self.validate_url();
        if let Some(error) = &self.validation_error {
            log::warn!("connect: {error}");
            return None;
        }

        let url = self.get_url();
        self.connect_error = None;

        match self.load_tree(&url, config).await {
            Ok((api, tree)) => {
                log::info!("connect: loaded {} top-level systems from {url}", tree.len());
                Some((api, tree))
            }
            Err(err) => {
                log::error!("connect: failed to load tree from {url}: {err:#}");
                self.connect_error = Some(format!("Failed to load tree: {err}"));
                None
            }
        }
    }

    async fn load_tree(
        &mut self,
        url: &str,
        config: &AppConfig,
    ) -> Result<(ApiClient, Vec<TreeItem>)> {
        let api = ApiClient::new(url, config.request_timeout())?;
        log::info!("connect: requesting tree data from {url}");
        let systems = api.fetch_tree().await?;
        let tree = model::build_tree(&systems);
        Ok((api, tree))
    }
}

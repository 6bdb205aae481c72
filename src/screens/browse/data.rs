use super::details_panel::DetailsPanel;
use super::types::BrowseScreen;
use crate::details::DetailsView;
use crate::model;

impl BrowseScreen {
    /// Fetch and show the detail record for the selected row.
    ///
    /// Categories and id-less rows never issue a request; selecting one
    /// leaves the pane as it was. A failed request becomes an inline error
    /// state and leaves the tree untouched; the next selection retries
    /// implicitly.
    pub async fn load_selected_details(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            self.details = DetailsPanel::Empty;
            return;
        };
        let Some((type_tag, id)) = row.details_request() else {
            return;
        };

        match self.api.fetch_details(type_tag, id).await {
            Ok(record) => {
                let view = DetailsView::from_record(type_tag, &record);
                self.details = DetailsPanel::loaded(view);
                self.status_message = format!("Loaded {type_tag} '{}'", row.label);
            }
            Err(err) => {
                log::error!("browse: details request for {type_tag} {id} failed: {err}");
                self.status_message = format!("Details request failed: {err}");
                self.details = DetailsPanel::Failed {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Refetch the tree document. Keeps the current tree on failure and the
    /// expansion set either way; keys that no longer resolve simply stop
    /// matching.
    pub async fn reload_tree(&mut self) {
        match self.api.fetch_tree().await {
            Ok(systems) => {
                self.items = model::build_tree(&systems);
                self.rebuild_rows();
                self.status_message = format!("Reloaded {} systems", self.items.len());
                log::info!("browse: reloaded {} systems", self.items.len());
            }
            Err(err) => {
                log::error!("browse: tree reload failed: {err}");
                self.status_message = format!("Reload failed: {err}");
            }
        }
    }
}

use std::collections::HashSet;
use std::time::Instant;

use ratatui::layout::Rect;

use super::details_panel::DetailsPanel;
use crate::api::ApiClient;
use crate::model::{self, TreeItem, TreeRow};

/// Signal the browse screen hands back to the application shell.
pub enum BrowseSignal {
    Disconnect,
}

pub struct BrowseScreen {
    pub api: ApiClient,

    // Tree state: immutable model, expansion set, derived visible rows
    pub items: Vec<TreeItem>,
    pub expanded: HashSet<String>,
    pub rows: Vec<TreeRow>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub current_visible_height: usize,

    // Details panel state
    pub details: DetailsPanel,

    pub status_message: String,

    // Mouse state for double-click detection
    pub last_click_time: Option<Instant>,
    pub last_click_position: Option<(u16, u16)>,

    // Areas captured during render, used to route mouse events
    pub tree_area: Rect,
    pub details_area: Rect,
}

impl BrowseScreen {
    pub fn new(api: ApiClient, items: Vec<TreeItem>) -> Self {
        let expanded = HashSet::new();
        let rows = model::visible_rows(&items, &expanded);
        let status_message = format!("Loaded {} systems", items.len());

        Self {
            api,
            items,
            expanded,
            rows,
            selected_index: 0,
            scroll_offset: 0,
            current_visible_height: 0,
            details: DetailsPanel::Empty,
            status_message,
            last_click_time: None,
            last_click_position: None,
            tree_area: Rect::default(),
            details_area: Rect::default(),
        }
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected_index)
    }
}

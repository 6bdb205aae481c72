use super::types::BrowseScreen;
use crate::model;

impl BrowseScreen {
    /// Recompute the visible rows after the expansion set or model changed,
    /// keeping the selection on the same row when it is still visible, or
    /// on its nearest visible ancestor otherwise.
    pub fn rebuild_rows(&mut self) {
        let selected_key = self.selected_row().map(|row| row.key.clone());
        self.rows = model::visible_rows(&self.items, &self.expanded);

        self.selected_index = selected_key
            .and_then(|key| self.find_visible_ancestor(&key))
            .unwrap_or(0);
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
        self.update_scroll();
    }

    fn find_visible_ancestor(&self, key: &str) -> Option<usize> {
        let mut probe = key.to_string();
        loop {
            if let Some(index) = self.rows.iter().position(|row| row.key == probe) {
                return Some(index);
            }
            probe = probe.rsplit_once('/')?.0.to_string();
        }
    }

    pub fn can_expand(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .is_some_and(|row| row.has_children && !row.is_expanded)
    }

    pub fn toggle_row(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        if !row.has_children {
            return;
        }

        let key = row.key.clone();
        if self.expanded.remove(&key) {
            log::debug!("browse: collapsed '{key}'");
        } else {
            self.expanded.insert(key.clone());
            log::debug!("browse: expanded '{key}'");
        }
        self.rebuild_rows();
    }

    pub fn expand_row(&mut self, index: usize) {
        if self.can_expand(index) {
            self.toggle_row(index);
        }
    }

    pub fn collapse_row(&mut self, index: usize) {
        if self.rows.get(index).is_some_and(|row| row.is_expanded) {
            self.toggle_row(index);
        }
    }

    /// Move the selection to the immediate parent row.
    pub fn move_to_parent(&mut self) {
        let Some(current_level) = self.selected_row().map(|row| row.level) else {
            return;
        };
        if current_level == 0 {
            return; // Already at root level
        }

        for index in (0..self.selected_index).rev() {
            if self.rows[index].level == current_level - 1 {
                self.selected_index = index;
                self.update_scroll();
                break;
            }
        }
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected_index = index;
            self.update_scroll();
        }
    }

    pub fn update_scroll(&mut self) {
        self.update_scroll_with_height(self.current_visible_height);
    }

    /// Keep the selection inside the middle 50% of the viewport: entering
    /// the top or bottom quarter repositions the scroll so the selection
    /// lands a quarter away from that edge.
    pub fn update_scroll_with_height(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }

        let top_zone = visible_height / 4;
        let bottom_zone = visible_height.saturating_sub(visible_height / 4);
        let target_low = self.selected_index.saturating_sub(top_zone);
        let target_high = self.selected_index.saturating_sub((visible_height * 3) / 4);

        let visible_position = self.selected_index.saturating_sub(self.scroll_offset);

        if self.selected_index < self.scroll_offset {
            self.scroll_offset = target_low;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = target_high;
        } else if visible_position < top_zone {
            self.scroll_offset = target_low;
        } else if visible_position >= bottom_zone {
            self.scroll_offset = target_high;
        }
        // Selection already in the middle zone: leave the scroll alone.
    }
}

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::details_panel::DetailsPanel;
use super::types::{BrowseScreen, BrowseSignal};

const PAGE_SIZE: usize = 10;

impl BrowseScreen {
    pub async fn handle_input(
        &mut self,
        key: KeyCode,
        _modifiers: KeyModifiers,
    ) -> Result<Option<BrowseSignal>> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                // Back to the connect screen
                return Ok(Some(BrowseSignal::Disconnect));
            }
            KeyCode::Up => {
                if self.selected_index > 0 {
                    self.select_index(self.selected_index - 1);
                    self.load_selected_details().await;
                }
            }
            KeyCode::Down => {
                if self.selected_index + 1 < self.rows.len() {
                    self.select_index(self.selected_index + 1);
                    self.load_selected_details().await;
                }
            }
            KeyCode::Right | KeyCode::Enter => {
                // Expansion only; never a details request.
                self.expand_row(self.selected_index);
            }
            KeyCode::Left => {
                // Collapse the selected row, or step up to its parent when
                // it is already collapsed.
                let is_expanded = self.selected_row().is_some_and(|row| row.is_expanded);
                if is_expanded {
                    self.collapse_row(self.selected_index);
                } else {
                    let before = self.selected_index;
                    self.move_to_parent();
                    if self.selected_index != before {
                        self.load_selected_details().await;
                    }
                }
            }
            KeyCode::PageUp => {
                self.select_index(self.selected_index.saturating_sub(PAGE_SIZE));
                self.load_selected_details().await;
            }
            KeyCode::PageDown => {
                let last = self.rows.len().saturating_sub(1);
                self.select_index((self.selected_index + PAGE_SIZE).min(last));
                self.load_selected_details().await;
            }
            KeyCode::Home => {
                self.select_index(0);
                self.scroll_offset = 0;
                self.load_selected_details().await;
            }
            KeyCode::End => {
                self.select_index(self.rows.len().saturating_sub(1));
                self.load_selected_details().await;
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let DetailsPanel::Loaded(details) = &mut self.details {
                    let index = c as usize - '1' as usize;
                    details.toggle_spoiler(index);
                }
            }
            KeyCode::Char('[') => {
                if let DetailsPanel::Loaded(details) = &mut self.details {
                    details.scroll_up(1);
                }
            }
            KeyCode::Char(']') => {
                if let DetailsPanel::Loaded(details) = &mut self.details {
                    details.scroll_down(1);
                }
            }
            KeyCode::Char('r') => {
                self.reload_tree().await;
            }
            KeyCode::Char('e') => match self.export_report() {
                Ok(path) => {
                    self.status_message = format!("Report written to {}", path.display());
                }
                Err(err) => {
                    log::error!("browse: export failed: {err:#}");
                    self.status_message = format!("Export failed: {err}");
                }
            },
            _ => {}
        }

        Ok(None)
    }

    pub async fn handle_mouse_input(&mut self, mouse: MouseEvent) -> Result<Option<BrowseSignal>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(self.tree_area, mouse.column, mouse.row) {
                    self.handle_tree_click(mouse.column, mouse.row).await;
                } else if contains(self.details_area, mouse.column, mouse.row) {
                    self.handle_details_click(mouse.row);
                }
            }
            MouseEventKind::ScrollUp => {
                if contains(self.details_area, mouse.column, mouse.row) {
                    if let DetailsPanel::Loaded(details) = &mut self.details {
                        details.scroll_up(3);
                    }
                } else {
                    self.scroll_offset = self.scroll_offset.saturating_sub(3);
                }
            }
            MouseEventKind::ScrollDown => {
                if contains(self.details_area, mouse.column, mouse.row) {
                    if let DetailsPanel::Loaded(details) = &mut self.details {
                        details.scroll_down(3);
                    }
                } else {
                    let max_scroll = self.rows.len().saturating_sub(1);
                    self.scroll_offset = (self.scroll_offset + 3).min(max_scroll);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    async fn handle_tree_click(&mut self, x: u16, y: u16) {
        // Inside the border: first content row is tree_area.y + 1.
        if y <= self.tree_area.y || y + 1 >= self.tree_area.y + self.tree_area.height {
            return;
        }
        let relative_y = (y - self.tree_area.y - 1) as usize;
        let clicked_index = relative_y + self.scroll_offset;
        if clicked_index >= self.rows.len() {
            return;
        }

        if self.is_double_click(x, y, Instant::now()) {
            self.select_index(clicked_index);
            self.toggle_row(clicked_index);
            return;
        }

        // The toggle affordance occupies one cell after the indentation; a
        // hit there toggles and nothing else.
        let row = &self.rows[clicked_index];
        let glyph_column = self.tree_area.x + 1 + (row.level as u16) * 2;
        if x == glyph_column && row.has_children {
            self.toggle_row(clicked_index);
            return;
        }

        // Label hit: select, and request details when the row is eligible.
        self.select_index(clicked_index);
        self.load_selected_details().await;
    }

    fn handle_details_click(&mut self, y: u16) {
        if y <= self.details_area.y || y + 1 >= self.details_area.y + self.details_area.height {
            return;
        }
        let relative_y = (y - self.details_area.y - 1) as usize;

        if let DetailsPanel::Loaded(details) = &mut self.details {
            let line = relative_y + details.scroll;
            if let Some(blob_index) = details.spoiler_at_line(line) {
                details.toggle_spoiler(blob_index);
            }
        }
    }

    fn is_double_click(&mut self, x: u16, y: u16, now: Instant) -> bool {
        const DOUBLE_CLICK_THRESHOLD: Duration = Duration::from_millis(500);
        const DOUBLE_CLICK_DISTANCE: u16 = 2;

        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let time_diff = now.duration_since(last_time);
            let distance = ((x as i32 - last_pos.0 as i32).abs()
                + (y as i32 - last_pos.1 as i32).abs()) as u16;

            if time_diff <= DOUBLE_CLICK_THRESHOLD && distance <= DOUBLE_CLICK_DISTANCE {
                self.last_click_time = None;
                self.last_click_position = None;
                return true;
            }
        }

        self.last_click_time = Some(now);
        self.last_click_position = Some((x, y));
        false
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::details_panel::DetailsPanel;
use super::types::BrowseScreen;
use crate::model::ItemKind;

impl BrowseScreen {
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Main content area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        // Main content area: tree on the left, details on the right
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Tree view
                Constraint::Percentage(40), // Details panel
            ])
            .split(main_chunks[0]);

        self.render_tree_view(f, content_chunks[0]);
        self.render_details_panel(f, content_chunks[1]);
        self.render_status_bar(f, main_chunks[1]);
    }

    fn render_tree_view(&mut self, f: &mut Frame, area: Rect) {
        self.tree_area = area;
        let visible_height = area.height.saturating_sub(2) as usize; // Subtract borders
        self.current_visible_height = visible_height;
        self.update_scroll_with_height(visible_height);

        let start_idx = self.scroll_offset;
        let end_idx = (start_idx + visible_height).min(self.rows.len());
        let visible_rows = if start_idx < self.rows.len() {
            &self.rows[start_idx..end_idx]
        } else {
            &[]
        };

        let items: Vec<ListItem> = visible_rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_selected = start_idx + i == self.selected_index;

                let icon = match row.kind {
                    ItemKind::System => "🏭",
                    ItemKind::Category => "📁",
                    ItemKind::Node => "🖥",
                    ItemKind::Product => "📦",
                    ItemKind::FunctionBlock => "⚙",
                    ItemKind::Signal => "📊",
                };

                let indent = "  ".repeat(row.level);
                let glyph = if row.has_children {
                    if row.is_expanded {
                        "−"
                    } else {
                        "+"
                    }
                } else {
                    " "
                };

                let text = format!("{indent}{glyph} {icon} {}", row.label);
                let style = if is_selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if row.kind == ItemKind::Category {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(Line::from(text)).style(style)
            })
            .collect();

        let title = if self.rows.len() > visible_height {
            format!("Project Tree ({}/{} shown)", visible_rows.len(), self.rows.len())
        } else {
            "Project Tree".to_string()
        };

        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );
        f.render_widget(list, area);

        if self.rows.len() > visible_height {
            self.render_tree_scrollbar(f, area, visible_height);
        }
    }

    fn render_tree_scrollbar(&self, f: &mut Frame, area: Rect, visible_height: usize) {
        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        if scrollbar_area.height == 0 {
            return;
        }

        let total = self.rows.len();
        let track = scrollbar_area.height as usize;
        let thumb_size = ((visible_height * track) / total).max(1);
        let thumb_position = (self.scroll_offset * track) / total;

        for y in 0..track {
            let is_thumb = y >= thumb_position && y < thumb_position + thumb_size;
            let (symbol, style) = if is_thumb {
                ("█", Style::default().fg(Color::White))
            } else {
                ("│", Style::default().fg(Color::DarkGray))
            };
            f.render_widget(
                Paragraph::new(symbol).style(style),
                Rect {
                    x: scrollbar_area.x,
                    y: scrollbar_area.y + y as u16,
                    width: 1,
                    height: 1,
                },
            );
        }
    }

    fn render_details_panel(&mut self, f: &mut Frame, area: Rect) {
        self.details_area = area;
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));

        match &mut self.details {
            DetailsPanel::Empty => {
                let hint = Paragraph::new("Select an item to load its details")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                f.render_widget(hint, area);
            }
            DetailsPanel::Failed { message } => {
                let text = vec![
                    Line::styled(
                        "Failed to load details",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Line::default(),
                    Line::styled(message.clone(), Style::default().fg(Color::Red)),
                ];
                let error = Paragraph::new(text).wrap(Wrap { trim: false }).block(block);
                f.render_widget(error, area);
            }
            DetailsPanel::Loaded(details) => {
                let lines = details.build_lines();
                let visible_height = area.height.saturating_sub(2) as usize;
                let max_scroll = lines.len().saturating_sub(visible_height);
                details.scroll = details.scroll.min(max_scroll);

                let paragraph = Paragraph::new(lines)
                    .scroll((details.scroll as u16, 0))
                    .block(block);
                f.render_widget(paragraph, area);
            }
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let selected_info = match self.selected_row() {
            Some(row) => format!("{}: {}", row.kind.label(), row.label),
            None => "No selection".to_string(),
        };

        let status_text = vec![
            Span::styled(
                "Backend: ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.api.base_url(), Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled(&selected_info, Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            Span::styled(&self.status_message, Style::default().fg(Color::Magenta)),
            Span::raw(" | ←→ fold, ↑↓ select, 1-9 spoilers, e export, r reload, q back"),
        ];

        let status = Paragraph::new(Line::from(status_text))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        f.render_widget(status, area);
    }
}

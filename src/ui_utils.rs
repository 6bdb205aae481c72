use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Utility functions for common UI layouts and components
pub struct LayoutUtils;

impl LayoutUtils {
    /// Create a standard paragraph with title styling
    pub fn create_title_paragraph(title_text: &str) -> Paragraph {
        Paragraph::new(title_text)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .block(Block::default().borders(Borders::ALL))
    }

    /// Create a horizontal button layout with margins and spacing
    pub fn create_button_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),  // Left margin
                Constraint::Length(18), // Left button
                Constraint::Min(0),     // Space between
                Constraint::Length(18), // Right button
                Constraint::Length(2),  // Right margin
            ])
            .split(area)
            .to_vec()
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use super::types::ConnectScreen;
use crate::ui_utils::LayoutUtils;

impl ConnectScreen {
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        // Move events from hot buffer to main buffer
        tui_logger::move_events();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // URL input
                Constraint::Length(2), // Validation / connect errors
                Constraint::Length(3), // Buttons
                Constraint::Min(8),    // Log pane
                Constraint::Length(1), // Help line
            ])
            .split(area);

        let title = LayoutUtils::create_title_paragraph("astraview - connect to backend");
        f.render_widget(title, chunks[0]);

        self.render_url_input(f, chunks[1]);
        self.render_errors(f, chunks[2]);
        self.render_buttons(f, chunks[3]);
        self.render_log_pane(f, chunks[4]);
        self.render_help_line(f, chunks[5]);
    }

    fn render_url_input(&self, f: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.url_input.visual_scroll(inner_width);

        let border_style = if self.validation_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let input = Paragraph::new(self.url_input.value())
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .title("Backend URL")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        f.render_widget(input, area);

        let cursor_x = self.url_input.visual_cursor().saturating_sub(scroll) as u16;
        f.set_cursor_position(Position::new(area.x + 1 + cursor_x, area.y + 1));
    }

    fn render_errors(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        if let Some(error) = &self.validation_error {
            lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
        }
        if let Some(error) = &self.connect_error {
            lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
        }
        if !lines.is_empty() {
            f.render_widget(Paragraph::new(lines), area);
        }
    }

    fn render_buttons(&mut self, f: &mut Frame, area: Rect) {
        let layout = LayoutUtils::create_button_layout(area);
        self.button_manager
            .render_buttons(f, &[layout[1], layout[3]]);
    }

    fn render_log_pane(&self, f: &mut Frame, area: Rect) {
        let logger_widget = TuiLoggerWidget::default()
            .block(
                Block::default()
                    .title("Connection Log")
                    .borders(Borders::ALL),
            )
            // Custom formatting: datetime + severity only, no callstack
            .output_timestamp(Some("%Y-%m-%d %H:%M:%S".to_string()))
            .output_level(Some(TuiLoggerLevelOutput::Long))
            .output_target(false)
            .output_file(false)
            .output_line(false)
            .output_separator(' ')
            .style_info(Style::default().fg(Color::White))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_error(Style::default().fg(Color::Red))
            .style_debug(Style::default().fg(Color::DarkGray))
            .style_trace(Style::default().fg(Color::Gray))
            .state(&self.logger_widget_state);
        f.render_widget(logger_widget, area);
    }

    fn render_help_line(&self, f: &mut Frame, area: Rect) {
        let help_text =
            "Enter/Alt+O - Connect | Tab - Switch buttons | PageUp/PageDown - scroll log | Esc/Alt+Q - Quit";
        let help_paragraph = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help_paragraph, area);
    }
}

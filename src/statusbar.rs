use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Connect,
    Browse,
}

pub struct StatusBarRenderer {
    pub status_message: String,
    pub current_screen: Screen,
    pub server_url: Option<String>,
}

impl StatusBarRenderer {
    pub fn new() -> Self {
        Self {
            status_message: "Ready".to_string(),
            current_screen: Screen::Connect,
            server_url: None,
        }
    }

    pub fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " astraview ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )];

        if let Some(url) = &self.server_url {
            spans.push(Span::raw("| "));
            spans.push(Span::styled(url.clone(), Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" "));
        }

        spans.push(Span::raw(format!("| {:?} ", self.current_screen)));
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            self.status_message.clone(),
            Style::default().fg(Color::Yellow),
        ));

        let status = Paragraph::new(Line::from(spans))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));
        f.render_widget(status, area);
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_current_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
    }

    pub fn set_server_url(&mut self, url: Option<String>) {
        self.server_url = url;
    }
}

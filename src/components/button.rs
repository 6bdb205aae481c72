use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonState {
    Normal,
    Focused,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub id: String,
    pub label: String,
    pub hotkey: Option<char>, // Alt+key shortcut
    pub state: ButtonState,
    pub enabled: bool,
    pub area: Option<Rect>, // Set during rendering for click detection
}

impl Button {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            hotkey: None,
            state: ButtonState::Normal,
            enabled: true,
            area: None,
        }
    }

    pub fn with_hotkey(mut self, key: char) -> Self {
        self.hotkey = Some(key);
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.state = if enabled {
            ButtonState::Normal
        } else {
            ButtonState::Disabled
        };
    }

    fn matches_hotkey(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if !self.enabled || !modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        match (key, self.hotkey) {
            (KeyCode::Char(c), Some(hotkey)) => c.eq_ignore_ascii_case(&hotkey),
            _ => false,
        }
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        self.area.is_some_and(|area| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        })
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        // Remember the rendered area for mouse hit testing.
        self.area = Some(area);

        let style = match self.state {
            ButtonState::Normal => Style::default().fg(Color::White),
            ButtonState::Focused => Style::default().fg(Color::Yellow),
            ButtonState::Disabled => Style::default().fg(Color::DarkGray),
        };

        let paragraph = Paragraph::new(self.button_text(style))
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .style(style);
        f.render_widget(paragraph, area);
    }

    /// Button label with the Alt-hotkey character highlighted.
    fn button_text(&self, base_style: Style) -> Line<'static> {
        let Some(hotkey) = self.hotkey else {
            return Line::from(Span::styled(self.label.clone(), base_style));
        };

        let mut spans = Vec::new();
        let mut highlighted = false;
        for c in self.label.chars() {
            if !highlighted && c.eq_ignore_ascii_case(&hotkey) {
                spans.push(Span::styled(c.to_string(), base_style.fg(Color::Red)));
                highlighted = true;
            } else {
                spans.push(Span::styled(c.to_string(), base_style));
            }
        }
        if !highlighted {
            spans.push(Span::styled(
                format!(" (Alt+{})", hotkey.to_ascii_uppercase()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

/// Owns a screen's buttons: hotkeys, Tab focus cycling, mouse hit testing.
#[derive(Debug, Default)]
pub struct ButtonManager {
    buttons: Vec<Button>,
    focused: Option<usize>,
}

impl ButtonManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_button(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn set_button_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.id == id) {
            button.set_enabled(enabled);
        }
    }

    /// Returns the id of the activated button, if any.
    pub fn handle_key_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        if key == KeyCode::Tab && !self.buttons.is_empty() {
            self.focus_next();
            return None;
        }

        if key == KeyCode::Enter {
            if let Some(button) = self.focused.and_then(|idx| self.buttons.get(idx)) {
                if button.enabled {
                    return Some(button.id.clone());
                }
            }
        }

        self.buttons
            .iter()
            .find(|button| button.matches_hotkey(key, modifiers))
            .map(|button| button.id.clone())
    }

    pub fn handle_mouse_click(&mut self, column: u16, row: u16) -> Option<String> {
        let (idx, id) = self
            .buttons
            .iter()
            .enumerate()
            .find(|(_, button)| button.enabled && button.contains(column, row))
            .map(|(idx, button)| (idx, button.id.clone()))?;
        self.focused = Some(idx);
        Some(id)
    }

    pub fn render_buttons(&mut self, f: &mut Frame, areas: &[Rect]) {
        for (idx, button) in self.buttons.iter_mut().enumerate() {
            if !button.enabled {
                continue;
            }
            button.state = if Some(idx) == self.focused {
                ButtonState::Focused
            } else {
                ButtonState::Normal
            };
        }
        for (button, area) in self.buttons.iter_mut().zip(areas) {
            button.render(f, *area);
        }
    }

    fn focus_next(&mut self) {
        let enabled: Vec<usize> = self
            .buttons
            .iter()
            .enumerate()
            .filter(|(_, button)| button.enabled)
            .map(|(idx, _)| idx)
            .collect();
        if enabled.is_empty() {
            self.focused = None;
            return;
        }

        self.focused = match self.focused {
            None => Some(enabled[0]),
            Some(current) => {
                let pos = enabled.iter().position(|&idx| idx == current);
                let next = pos.map(|p| (p + 1) % enabled.len()).unwrap_or(0);
                Some(enabled[next])
            }
        };
    }
}

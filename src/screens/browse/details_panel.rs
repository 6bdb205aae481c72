use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::details::DetailsView;
use crate::highlight;

/// State of the details pane. Replaced wholesale on every selection; spoiler
/// and scroll state never outlive the record they belong to.
pub enum DetailsPanel {
    Empty,
    Loaded(Box<LoadedDetails>),
    Failed { message: String },
}

impl DetailsPanel {
    pub fn loaded(view: DetailsView) -> Self {
        let spoilers = view
            .blobs
            .iter()
            .map(|_| Spoiler {
                open: false,
                cached: None,
            })
            .collect();
        DetailsPanel::Loaded(Box::new(LoadedDetails {
            view,
            spoilers,
            scroll: 0,
            control_lines: Vec::new(),
        }))
    }
}

/// Show/hide state of one code blob. Highlighting runs on first reveal and
/// is cached, so repeated toggling re-renders the same styled lines.
pub struct Spoiler {
    pub open: bool,
    cached: Option<Vec<Line<'static>>>,
}

pub struct LoadedDetails {
    pub view: DetailsView,
    pub spoilers: Vec<Spoiler>,
    pub scroll: usize,
    /// (rendered line index, blob index) for every spoiler control line,
    /// rebuilt by [`build_lines`]; used for mouse hit testing.
    control_lines: Vec<(usize, usize)>,
}

impl LoadedDetails {
    pub fn toggle_spoiler(&mut self, index: usize) {
        let Some(spoiler) = self.spoilers.get_mut(index) else {
            return;
        };
        spoiler.open = !spoiler.open;
        if spoiler.open && spoiler.cached.is_none() {
            let blob = &self.view.blobs[index];
            spoiler.cached = Some(highlight::highlight(blob.language, &blob.text));
        }
    }

    /// Which blob's control line sits at this rendered line, if any.
    pub fn spoiler_at_line(&self, line: usize) -> Option<usize> {
        self.control_lines
            .iter()
            .find(|(control_line, _)| *control_line == line)
            .map(|(_, blob)| *blob)
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        // Clamped against the content height at render time.
        self.scroll += amount;
    }

    /// Build the pane content for the current spoiler states.
    pub fn build_lines(&mut self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        self.control_lines.clear();

        lines.push(Line::styled(
            self.view.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(vec![
            Span::styled("Type: ", key_style()),
            Span::raw(self.view.type_tag.clone()),
        ]));
        lines.push(Line::default());

        lines.push(section_line("Properties"));
        for (key, value) in &self.view.properties {
            lines.push(Line::from(vec![
                Span::styled(format!("{key}: "), key_style()),
                Span::raw(value.clone()),
            ]));
        }

        if let Some(project) = &self.view.project {
            lines.push(Line::default());
            lines.push(section_line("Project"));
            lines.push(Line::from(vec![
                Span::styled("Name: ", key_style()),
                Span::raw(project.clone()),
            ]));
        }

        if !self.view.variables.is_empty() {
            lines.push(Line::default());
            lines.push(section_line("Variables"));
            for variable in &self.view.variables {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<10}", variable.direction), key_style()),
                    Span::raw(variable.signal_tag.clone()),
                ]));
            }
        }

        for (index, blob) in self.view.blobs.iter().enumerate() {
            let spoiler = &self.spoilers[index];
            lines.push(Line::default());

            let action = if spoiler.open { "Hide" } else { "Show" };
            self.control_lines.push((lines.len(), index));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] {} ", index + 1, blob.field),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("[{action}]"), Style::default().fg(Color::Yellow)),
            ]));

            if spoiler.open {
                if let Some(cached) = &spoiler.cached {
                    lines.extend(cached.iter().cloned());
                }
            }
        }

        lines
    }
}

fn key_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn section_line(title: &str) -> Line<'static> {
    Line::styled(
        format!("── {title} ──"),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded_with_blobs() -> Box<LoadedDetails> {
        let record = json!({
            "tag": "FB_1",
            "call": "FB_1(IN := S1);",
            "omx": "<omx/>"
        });
        let view = DetailsView::from_record("functionblock", record.as_object().unwrap());
        match DetailsPanel::loaded(view) {
            DetailsPanel::Loaded(details) => details,
            _ => unreachable!(),
        }
    }

    #[test]
    fn spoilers_start_hidden() {
        let mut details = loaded_with_blobs();
        let lines = details.build_lines();
        let text: String = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .map(|span| span.content.to_string())
            .collect();
        assert!(text.contains("[Show]"));
        assert!(!text.contains("FB_1(IN := S1);"));
    }

    #[test]
    fn toggle_reveals_and_round_trips() {
        let mut details = loaded_with_blobs();
        let hidden_len = details.build_lines().len();

        details.toggle_spoiler(0);
        let shown = details.build_lines();
        assert!(shown.len() > hidden_len);

        details.toggle_spoiler(0);
        assert_eq!(details.build_lines().len(), hidden_len);
    }

    #[test]
    fn highlight_cache_survives_toggling() {
        let mut details = loaded_with_blobs();
        details.toggle_spoiler(0);
        let first = format!("{:?}", details.build_lines());
        details.toggle_spoiler(0);
        details.toggle_spoiler(0);
        assert_eq!(format!("{:?}", details.build_lines()), first);
    }

    #[test]
    fn control_lines_map_to_blobs() {
        let mut details = loaded_with_blobs();
        let lines = details.build_lines();

        let controls: Vec<usize> = (0..lines.len())
            .filter_map(|line| details.spoiler_at_line(line))
            .collect();
        assert_eq!(controls, vec![0, 1]);
        assert!(details.spoiler_at_line(0).is_none());
    }
}

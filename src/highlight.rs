use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Language hint attached to a detail-record code blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// IEC 61131-3 structured text (the `call` field).
    StructuredText,
    /// XML payloads (the `omx` and `opc` fields).
    Xml,
}

impl Language {
    /// Class name used when the blob is embedded in an HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            Language::StructuredText => "language-st",
            Language::Xml => "language-xml",
        }
    }
}

/// Highlight a blob into one styled [`Line`] per input line.
///
/// Line-oriented and lossless: concatenating the span contents of a line
/// reproduces that input line exactly. Deterministic, so results can be
/// cached and re-rendering is idempotent.
pub fn highlight(language: Language, text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| match language {
            Language::StructuredText => highlight_st_line(line),
            Language::Xml => highlight_xml_line(line),
        })
        .collect()
}

fn text_style() -> Style {
    Style::default().fg(Color::White)
}

fn keyword_style() -> Style {
    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
}

fn string_style() -> Style {
    Style::default().fg(Color::Green)
}

fn number_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn comment_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn tag_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn attr_style() -> Style {
    Style::default().fg(Color::Yellow)
}

const ST_KEYWORDS: &[&str] = &[
    "IF", "THEN", "ELSIF", "ELSE", "END_IF", "CASE", "OF", "END_CASE", "FOR", "TO", "BY", "DO",
    "END_FOR", "WHILE", "END_WHILE", "REPEAT", "UNTIL", "END_REPEAT", "VAR", "VAR_INPUT",
    "VAR_OUTPUT", "VAR_IN_OUT", "END_VAR", "FUNCTION", "END_FUNCTION", "FUNCTION_BLOCK",
    "END_FUNCTION_BLOCK", "PROGRAM", "END_PROGRAM", "TYPE", "END_TYPE", "STRUCT", "END_STRUCT",
    "RETURN", "EXIT", "AND", "OR", "XOR", "NOT", "MOD", "TRUE", "FALSE",
];

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn push_run(spans: &mut Vec<Span<'static>>, chars: &[char], from: usize, to: usize, style: Style) {
    if to > from {
        spans.push(Span::styled(chars[from..to].iter().collect::<String>(), style));
    }
}

fn highlight_st_line(line: &str) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut plain = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Line comment: runs to end of line.
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            push_run(&mut spans, &chars, plain, i, text_style());
            push_run(&mut spans, &chars, i, chars.len(), comment_style());
            return Line::from(spans);
        }

        // Block comment, line-local.
        if c == '(' && chars.get(i + 1) == Some(&'*') {
            push_run(&mut spans, &chars, plain, i, text_style());
            let mut j = i + 2;
            while j + 1 < chars.len() && !(chars[j] == '*' && chars[j + 1] == ')') {
                j += 1;
            }
            let end = if j + 1 < chars.len() { j + 2 } else { chars.len() };
            push_run(&mut spans, &chars, i, end, comment_style());
            i = end;
            plain = i;
            continue;
        }

        // Character string literal.
        if c == '\'' {
            push_run(&mut spans, &chars, plain, i, text_style());
            let mut j = i + 1;
            while j < chars.len() && chars[j] != '\'' {
                j += 1;
            }
            let end = (j + 1).min(chars.len());
            push_run(&mut spans, &chars, i, end, string_style());
            i = end;
            plain = i;
            continue;
        }

        // Numeric literal, including typed literals like T#5s or 16#FF.
        if c.is_ascii_digit() && (i == 0 || !is_ident_char(chars[i - 1])) {
            push_run(&mut spans, &chars, plain, i, text_style());
            let mut j = i;
            while j < chars.len()
                && (chars[j].is_ascii_alphanumeric()
                    || chars[j] == '.'
                    || chars[j] == '_'
                    || chars[j] == '#')
            {
                j += 1;
            }
            push_run(&mut spans, &chars, i, j, number_style());
            i = j;
            plain = i;
            continue;
        }

        if is_ident_start(c) {
            let mut j = i;
            while j < chars.len() && is_ident_char(chars[j]) {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            if ST_KEYWORDS.contains(&word.to_ascii_uppercase().as_str()) {
                push_run(&mut spans, &chars, plain, i, text_style());
                push_run(&mut spans, &chars, i, j, keyword_style());
                plain = j;
            }
            i = j;
            continue;
        }

        i += 1;
    }

    push_run(&mut spans, &chars, plain, chars.len(), text_style());
    Line::from(spans)
}

fn highlight_xml_line(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            spans.push(Span::styled(rest.to_string(), text_style()));
            break;
        };
        if start > 0 {
            spans.push(Span::styled(rest[..start].to_string(), text_style()));
            rest = &rest[start..];
        }

        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            spans.push(Span::styled(rest[..end].to_string(), comment_style()));
            rest = &rest[end..];
            continue;
        }

        let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
        push_tag_spans(&rest[..end], &mut spans);
        rest = &rest[end..];
    }

    Line::from(spans)
}

/// Split one `<...>` run into name / attribute / value spans.
fn push_tag_spans(tag: &str, spans: &mut Vec<Span<'static>>) {
    let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
    spans.push(Span::styled(tag[..name_end].to_string(), tag_style()));

    let mut attrs = &tag[name_end..];
    while let Some(quote) = attrs.find('"') {
        spans.push(Span::styled(attrs[..quote].to_string(), attr_style()));
        let after = &attrs[quote + 1..];
        match after.find('"') {
            Some(close) => {
                spans.push(Span::styled(
                    attrs[quote..quote + close + 2].to_string(),
                    string_style(),
                ));
                attrs = &after[close + 1..];
            }
            None => {
                spans.push(Span::styled(attrs[quote..].to_string(), string_style()));
                attrs = "";
            }
        }
    }
    if !attrs.is_empty() {
        spans.push(Span::styled(attrs.to_string(), tag_style()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn highlighting_is_lossless() {
        let st = "FB_PUMP_01(IN := S1, T := T#5s); // start pump (* primary *)";
        let xml = r#"<Object name="FB_PUMP_01" ns="2"><!-- binding --><Value>42</Value>"#;

        for (language, source) in [(Language::StructuredText, st), (Language::Xml, xml)] {
            let lines = highlight(language, source);
            assert_eq!(lines.len(), 1);
            assert_eq!(line_text(&lines[0]), source);
        }
    }

    #[test]
    fn one_line_per_input_line() {
        let lines = highlight(Language::Xml, "<a>\n<b>\n</a>");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn st_keywords_are_emphasized() {
        let lines = highlight(Language::StructuredText, "IF running THEN");
        let styled: Vec<String> = lines[0]
            .spans
            .iter()
            .filter(|span| span.style == keyword_style())
            .map(|span| span.content.to_string())
            .collect();
        assert_eq!(styled, ["IF", "THEN"]);
    }

    #[test]
    fn st_identifiers_are_not_keywords() {
        // "IFX" must not match the IF keyword.
        let lines = highlight(Language::StructuredText, "IFX := 1;");
        assert!(lines[0]
            .spans
            .iter()
            .all(|span| span.style != keyword_style() || span.content != "IFX"));
    }

    #[test]
    fn xml_attribute_values_are_strings() {
        let lines = highlight(Language::Xml, r#"<Node id="n1">"#);
        assert!(lines[0]
            .spans
            .iter()
            .any(|span| span.style == string_style() && span.content.contains("\"n1\"")));
    }

    #[test]
    fn repeated_highlighting_is_identical() {
        let source = "VAR x : INT; END_VAR";
        let first = highlight(Language::StructuredText, source);
        let second = highlight(Language::StructuredText, source);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn css_classes_match_report_contract() {
        assert_eq!(Language::StructuredText.css_class(), "language-st");
        assert_eq!(Language::Xml.css_class(), "language-xml");
    }
}

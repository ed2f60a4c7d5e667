use ratatui::{prelude::*, widgets::*};

use crate::messages::render::RowView;
use crate::messages::ui_events::RowField;

/// Renders a params/headers row list, marking incomplete rows
pub fn render_key_value_list<'a>(
    rows: &'a [RowView],
    title: String,
    selected: Option<(usize, RowField)>,
    border_style: Style,
) -> List<'a> {
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let row_style = if !row.enabled {
                Style::default().fg(Color::DarkGray)
            } else if row.fault.is_some() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let focus = selected.filter(|(index, _)| *index == i).map(|(_, field)| field);
            let field_style = |field: RowField| match focus {
                Some(f) if f == field => row_style.bold().underlined(),
                _ => row_style,
            };

            let prefix = if row.enabled { "[x] " } else { "[ ] " };
            let mut spans = vec![
                Span::styled(prefix, row_style),
                Span::styled(or_placeholder(&row.key, "<key>"), field_style(RowField::Key)),
                Span::styled(" = ", row_style),
                Span::styled(or_placeholder(&row.value, "<value>"), field_style(RowField::Value)),
            ];
            if let Some(fault) = row.fault.filter(|_| row.enabled) {
                spans.push(Span::styled(
                    format!("  ! {}", fault.message()),
                    Style::default().fg(Color::Red),
                ));
            }

            let line = Line::from(spans);
            if focus.is_some() {
                ListItem::new(line).style(Style::default().bg(Color::DarkGray))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    )
}

fn or_placeholder<'a>(text: &'a str, empty: &'static str) -> &'a str {
    if text.is_empty() {
        empty
    } else {
        text
    }
}

/// Renders tabs
pub fn render_tabs(titles: Vec<String>, selected: usize) -> Tabs<'static> {
    let titles: Vec<Line> = titles.into_iter().map(Line::from).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Tab title with a count badge when non-zero
pub fn tab_title(name: &str, count: usize) -> String {
    if count > 0 {
        format!(" {} ({}) ", name, count)
    } else {
        format!(" {} ", name)
    }
}

/// Editor tab titles; only the row tabs carry a badge
pub fn editor_tab_titles(active_params: usize, active_headers: usize) -> Vec<String> {
    vec![
        tab_title("Params", active_params),
        tab_title("Auth", 0),
        tab_title("Headers", active_headers),
        tab_title("Body", 0),
    ]
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut escaped = false;

        for (pos, c) in line.char_indices() {
            if in_string {
                current.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    // A string followed by ':' is an object key
                    let is_key = line[pos + 1..].trim_start().starts_with(':');
                    let color = if is_key { Color::Cyan } else { Color::Green };
                    spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                    current.clear();
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => {
                    flush_token(&mut spans, &mut current);
                    in_string = true;
                    current.push(c);
                }
                '{' | '}' | '[' | ']' | ':' | ',' => {
                    flush_token(&mut spans, &mut current);
                    let color = if c == ':' || c == ',' {
                        Color::White
                    } else {
                        Color::Yellow
                    };
                    spans.push(Span::styled(c.to_string(), Style::default().fg(color)));
                }
                ' ' => {
                    flush_token(&mut spans, &mut current);
                    spans.push(Span::raw(" "));
                }
                _ => current.push(c),
            }
        }

        // Unterminated strings fall through as plain text
        flush_token(&mut spans, &mut current);
        lines.push(Line::from(spans));
    }

    lines
}

/// Emit a bare token: numbers and literals get their own colors
fn flush_token(spans: &mut Vec<Span<'static>>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    let style = match token.as_str() {
        "true" | "false" | "null" => Style::default().fg(Color::Magenta),
        t if t.parse::<f64>().is_ok() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    spans.push(Span::styled(token, style));
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        "HEAD" => Color::Magenta,
        "OPTIONS" => Color::LightBlue,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(lines: &[Line], text: &str) -> Option<Color> {
        lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .find(|span| span.content == text)
            .and_then(|span| span.style.fg)
    }

    #[test]
    fn test_highlight_keys_and_values() {
        let lines = highlight_json("{\n  \"a\": \"b\",\n  \"n\": 12,\n  \"ok\": true\n}");
        assert_eq!(lines.len(), 5);
        assert_eq!(styled(&lines, "\"a\""), Some(Color::Cyan));
        assert_eq!(styled(&lines, "\"b\""), Some(Color::Green));
        assert_eq!(styled(&lines, "12"), Some(Color::Yellow));
        assert_eq!(styled(&lines, "true"), Some(Color::Magenta));
    }

    #[test]
    fn test_highlight_escaped_quote_stays_in_string() {
        let lines = highlight_json(r#""say \"hi\"""#);
        assert_eq!(styled(&lines, r#""say \"hi\"""#), Some(Color::Green));
    }

    #[test]
    fn test_tab_title_badge() {
        assert_eq!(tab_title("Params", 0), " Params ");
        assert_eq!(tab_title("Params", 2), " Params (2) ");
    }

    #[test]
    fn test_editor_tabs_badge_row_counts_only() {
        assert_eq!(
            editor_tab_titles(2, 0),
            vec![" Params (2) ", " Auth ", " Headers ", " Body "]
        );
        assert_eq!(editor_tab_titles(0, 3)[2], " Headers (3) ");
    }
}

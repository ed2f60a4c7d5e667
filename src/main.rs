//! reqform - Actor-based HTTP request configuration editor
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Dispatch Layer (Tokio) - simulated hand-off of compiled configurations

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use reqform::app::AppActor;
use reqform::body::BodyStatus;
use reqform::constants::{APP_NAME, APP_VERSION, BODY_METHOD_NOTICE, DISPATCH_LATENCY, LOG_FILE_NAME};
use reqform::curl::to_curl;
use reqform::dispatch::DispatchActor;
use reqform::messages::render::NoticeKind;
use reqform::messages::ui_events::{key_to_ui_event, AuthField, InputMode, Panel, PreviewMode};
use reqform::messages::{DispatchCommand, DispatchResponse, RenderState, UiEvent};
use reqform::models::AuthConfig;
use reqform::ui::{self, highlight_json, method_color, editor_tab_titles, render_key_value_list};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (dispatch_cmd_tx, dispatch_cmd_rx) = mpsc::unbounded_channel::<DispatchCommand>();
    let (dispatch_resp_tx, dispatch_resp_rx) = mpsc::unbounded_channel::<DispatchResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn dispatch actor
    let dispatch_actor = DispatchActor::new(dispatch_resp_tx, DISPATCH_LATENCY);
    tokio::spawn(dispatch_actor.run(dispatch_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(dispatch_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, dispatch_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Method + URL
            Constraint::Min(8),    // Editor + preview
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_url_bar(f, state, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_editor(f, state, columns[0]);
    draw_preview(f, state, columns[1]);
    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn focus_style(state: &RenderState, panel: Panel) -> Style {
    if state.active_panel != panel {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn is_editing(state: &RenderState, panel: Panel) -> bool {
    state.active_panel == panel && state.input_mode == InputMode::Editing
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mcolor = method_color(state.method.as_str());
    let sending = if state.is_submitting { " [...]" } else { "" };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Url))
        .title(format!(" {}{} ", state.method.as_str(), sending))
        .title_style(Style::default().fg(mcolor).bold());
    if let Some(err) = &state.url_error {
        block = block.title_bottom(
            Line::from(Span::styled(format!(" {} ", err), Style::default().fg(Color::Red)))
                .right_aligned(),
        );
    }

    let input = if state.url.is_empty() && !is_editing(state, Panel::Url) {
        Paragraph::new("https://api.example.com/users")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.url.as_str())
    };
    f.render_widget(input.block(block), area);

    if is_editing(state, Panel::Url) {
        let column = state.url[..state.cursor_position.min(state.url.len())].chars().count() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + column + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_editor(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tab_titles = editor_tab_titles(state.active_params, state.active_headers);
    let selected_tab = match state.visible_tab {
        Panel::Params => 0,
        Panel::Auth => 1,
        Panel::Headers => 2,
        Panel::Body => 3,
        _ => 0,
    };
    f.render_widget(ui::render_tabs(tab_titles, selected_tab), tabs_area[0]);

    let content_area = tabs_area[1];
    match state.visible_tab {
        Panel::Headers => draw_rows_panel(f, state, Panel::Headers, content_area),
        Panel::Auth => draw_auth_panel(f, state, content_area),
        Panel::Body => draw_body_panel(f, state, content_area),
        _ => draw_rows_panel(f, state, Panel::Params, content_area),
    }
}

fn draw_rows_panel(f: &mut Frame, state: &RenderState, panel: Panel, area: Rect) {
    let (rows, selected, name) = match panel {
        Panel::Headers => (&state.headers, state.selected_header, "Headers"),
        _ => (&state.params, state.selected_param, "Query Params"),
    };
    let is_focused = state.active_panel == panel;

    if rows.is_empty() {
        let hint = Paragraph::new(format!("No {} yet. Press 'a' to add one.", name.to_lowercase()))
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_style(state, panel))
                    .title(format!(" {} ", name)),
            );
        f.render_widget(hint, area);
        return;
    }

    let title = format!(" {} (a:add d:del space:toggle Tab:key/value) ", name);
    let highlight = is_focused.then_some((selected, state.row_field));
    let list = render_key_value_list(rows, title, highlight, focus_style(state, panel));
    f.render_widget(list, area);
}

fn draw_auth_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let editing = is_editing(state, Panel::Auth);
    let field_line = |label: &str, value: &str, field: AuthField, secret: bool| {
        let shown = if value.is_empty() {
            "<empty>".to_string()
        } else if secret && !(editing && state.auth_field == field) {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let style = if state.active_panel == Panel::Auth && state.auth_field == field {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(shown, style),
        ])
    };

    let lines: Vec<Line> = match &state.auth {
        AuthConfig::None => vec![Line::from(Span::styled(
            "No authentication. Press 't' to cycle auth type.",
            Style::default().fg(Color::DarkGray),
        ))],
        AuthConfig::Bearer { token } => vec![field_line("Token", token, AuthField::Token, true)],
        AuthConfig::Basic { username, password } => vec![
            field_line("Username", username, AuthField::Username, false),
            field_line("Password", password, AuthField::Password, true),
        ],
        AuthConfig::ApiKey { key_name, key_value, key_location } => vec![
            field_line("Key", key_name, AuthField::KeyName, false),
            field_line("Value", key_value, AuthField::KeyValue, true),
            Line::from(vec![
                Span::styled(format!("{:<10}", "Add to"), Style::default().fg(Color::DarkGray)),
                Span::styled(key_location.label(), Style::default().fg(Color::Cyan)),
                Span::styled("  (l:toggle)", Style::default().fg(Color::DarkGray)),
            ]),
        ],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Auth))
        .title(format!(" Auth: {} (t:cycle Tab:field) ", state.auth.kind().label()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let (indicator, indicator_color) = match &state.body_status {
        BodyStatus::Empty => ("", Color::DarkGray),
        BodyStatus::Valid(_) => (" Valid JSON ", Color::Green),
        BodyStatus::Invalid(_) => (" Invalid JSON ", Color::Red),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Body))
        .title(" Body (JSON, f:format) ")
        .title(
            Line::from(Span::styled(indicator, Style::default().fg(indicator_color)))
                .right_aligned(),
        );
    if let Some(err) = &state.body_error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", err),
            Style::default().fg(Color::Red),
        )));
    } else if state.method.warns_on_body() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", BODY_METHOD_NOTICE),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(state.body.as_str())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    if is_editing(state, Panel::Body) {
        let before = &state.body[..state.cursor_position.min(state.body.len())];
        let row = before.matches('\n').count() as u16;
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let max_y = area.y + area.height.saturating_sub(2);
        let cursor_x = (area.x + column + 1).min(max_x);
        let cursor_y = (area.y + row + 1).min(max_y);
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_preview(f: &mut Frame, state: &RenderState, area: Rect) {
    let (title, lines) = match state.preview_mode {
        PreviewMode::Json => (" Preview: JSON (p:cURL) ", highlight_json(&state.config.to_pretty_json())),
        PreviewMode::Curl => (
            " Preview: cURL (p:JSON) ",
            to_curl(&state.config).lines().map(|l| Line::from(l.to_string())).collect(),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Preview))
        .title(title);

    let preview = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.preview_scroll, 0));
    f.render_widget(preview, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = match &state.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => Color::Cyan,
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            Paragraph::new(format!(" {} ", notice.message))
                .style(Style::default().fg(color).bold())
        }
        None => {
            let hints = if state.input_mode == InputMode::Editing {
                " ESC:stop editing | arrows:move | Tab:next field | Ctrl+S:send "
            } else {
                " Tab:panel | e:edit | m:method | s:send | ?:help | q:quit "
            };
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 REQFORM - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Select row / scroll preview
   Esc                Dismiss notice

 REQUEST
   m                  Cycle HTTP method
   s / Ctrl+S         Send request
   e / Enter          Edit current field
   p                  Toggle JSON / cURL preview

 PARAMS / HEADERS
   a                  Add row
   d                  Delete selected row
   Space              Toggle row enabled
   Tab (editing)      Switch key / value

 AUTH
   t                  Cycle auth type
   Tab (editing)      Next field
   l                  Toggle API key header / query

 BODY
   f                  Format JSON

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

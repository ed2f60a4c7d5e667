//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    /// Leaves the field; counts as a blur
    StopEditing,
    /// Moves to the next field of the same panel; counts as a blur
    NextField,
    CharInput(char),
    Newline,
    Backspace,
    CursorLeft,
    CursorRight,

    // Request
    CycleMethod,
    Submit,

    // Params / headers rows
    NextRow,
    PrevRow,
    AddRow,
    DeleteRow,
    ToggleRow,

    // Auth
    CycleAuth,
    NextAuthField,
    ToggleKeyLocation,

    // Body
    FormatBody,

    // Preview
    TogglePreviewMode,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissNotice,

    // System
    Quit,
}

/// Focusable panels, in Tab order
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Url,
    Params,
    Auth,
    Headers,
    Body,
    Preview,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Params,
            Panel::Params => Panel::Auth,
            Panel::Auth => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Preview,
            Panel::Preview => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Preview,
            Panel::Params => Panel::Url,
            Panel::Auth => Panel::Params,
            Panel::Headers => Panel::Auth,
            Panel::Body => Panel::Headers,
            Panel::Preview => Panel::Body,
        }
    }

    /// Panels shown as tabs of the request editor
    pub fn is_editor_tab(&self) -> bool {
        matches!(self, Panel::Params | Panel::Auth | Panel::Headers | Panel::Body)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Column being edited in a params/headers row
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RowField {
    #[default]
    Key,
    Value,
}

/// Auth editing field
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AuthField {
    #[default]
    Token,
    Username,
    Password,
    KeyName,
    KeyValue,
}

/// How the compiled configuration is previewed
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PreviewMode {
    #[default]
    Json,
    Curl,
}

impl PreviewMode {
    pub fn toggle(&self) -> PreviewMode {
        match self {
            PreviewMode::Json => PreviewMode::Curl,
            PreviewMode::Curl => PreviewMode::Json,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::Submit),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => handle_normal_keys(key, active_panel),
        InputMode::Editing => handle_editing_keys(key, active_panel),
    }
}

fn handle_normal_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Esc => Some(UiEvent::DismissNotice),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('m') => Some(UiEvent::CycleMethod),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('p') => Some(UiEvent::TogglePreviewMode),
        KeyCode::Char('e') | KeyCode::Enter => match active_panel {
            Panel::Preview => None,
            _ => Some(UiEvent::StartEditing),
        },
        KeyCode::Char(' ') if matches!(active_panel, Panel::Params | Panel::Headers) => {
            Some(UiEvent::ToggleRow)
        }
        KeyCode::Char('a') if matches!(active_panel, Panel::Params | Panel::Headers) => {
            Some(UiEvent::AddRow)
        }
        KeyCode::Char('d') if matches!(active_panel, Panel::Params | Panel::Headers) => {
            Some(UiEvent::DeleteRow)
        }
        KeyCode::Char('t') if active_panel == Panel::Auth => Some(UiEvent::CycleAuth),
        KeyCode::Char('l') if active_panel == Panel::Auth => Some(UiEvent::ToggleKeyLocation),
        KeyCode::Char('f') if active_panel == Panel::Body => Some(UiEvent::FormatBody),
        KeyCode::Up => match active_panel {
            Panel::Params | Panel::Headers => Some(UiEvent::PrevRow),
            Panel::Preview => Some(UiEvent::ScrollUp),
            _ => None,
        },
        KeyCode::Down => match active_panel {
            Panel::Params | Panel::Headers => Some(UiEvent::NextRow),
            Panel::Preview => Some(UiEvent::ScrollDown),
            _ => None,
        },
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Tab => match active_panel {
            Panel::Params | Panel::Headers => Some(UiEvent::NextField),
            Panel::Auth => Some(UiEvent::NextAuthField),
            _ => None,
        },
        KeyCode::Enter => match active_panel {
            Panel::Url => Some(UiEvent::Submit),
            Panel::Body => Some(UiEvent::Newline),
            _ => Some(UiEvent::StopEditing),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_panel_cycle_round_trips() {
        let mut panel = Panel::Url;
        for _ in 0..6 {
            assert_eq!(panel.next().prev(), panel);
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Url);
    }

    #[test]
    fn test_row_keys_only_on_row_panels() {
        let add = press(KeyCode::Char('a'));
        assert_eq!(
            key_to_ui_event(add, Panel::Headers, InputMode::Normal, false),
            Some(UiEvent::AddRow)
        );
        assert_eq!(key_to_ui_event(add, Panel::Body, InputMode::Normal, false), None);
    }

    #[test]
    fn test_editing_enter_depends_on_panel() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            key_to_ui_event(enter, Panel::Url, InputMode::Editing, false),
            Some(UiEvent::Submit)
        );
        assert_eq!(
            key_to_ui_event(enter, Panel::Body, InputMode::Editing, false),
            Some(UiEvent::Newline)
        );
        assert_eq!(
            key_to_ui_event(enter, Panel::Params, InputMode::Editing, false),
            Some(UiEvent::StopEditing)
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        let key = press(KeyCode::Char('m'));
        assert_eq!(
            key_to_ui_event(key, Panel::Url, InputMode::Normal, true),
            Some(UiEvent::CloseHelp)
        );
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Panel::Body, InputMode::Editing, false),
            Some(UiEvent::Quit)
        );
    }
}

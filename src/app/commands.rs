//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::body;
use crate::constants::{SUBMIT_BLOCKED_NOTICE, SUBMIT_SUCCESS_NOTICE};
use crate::messages::render::Notice;
use crate::messages::ui_events::{AuthField, InputMode, Panel, RowField};
use crate::messages::{DispatchCommand, DispatchResponse};
use crate::models::AuthConfig;
use crate::validation::Unit;

/// Editable fields of an auth mode, in Tab order
fn auth_fields(auth: &AuthConfig) -> &'static [AuthField] {
    match auth {
        AuthConfig::None => &[],
        AuthConfig::Bearer { .. } => &[AuthField::Token],
        AuthConfig::Basic { .. } => &[AuthField::Username, AuthField::Password],
        AuthConfig::ApiKey { .. } => &[AuthField::KeyName, AuthField::KeyValue],
    }
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    fn focus(&mut self, panel: Panel) {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }
        self.active_panel = panel;
        if panel.is_editor_tab() {
            self.visible_tab = panel;
        }
        self.row_field = RowField::Key;
    }

    pub fn next_panel(&mut self) {
        self.focus(self.active_panel.next());
    }

    pub fn prev_panel(&mut self) {
        self.focus(self.active_panel.prev());
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        match self.active_panel {
            Panel::Preview => return,
            Panel::Params | Panel::Headers => {
                if self.active_rows().map_or(true, |(set, _)| set.is_empty()) {
                    self.add_row();
                }
            }
            Panel::Auth => {
                let fields = auth_fields(&self.form.auth);
                if fields.is_empty() {
                    return;
                }
                if !fields.contains(&self.auth_field) {
                    self.auth_field = fields[0];
                }
            }
            _ => {}
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().map_or(0, str::len);
    }

    /// Leave the field being edited; a blur validates the field's unit
    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.blur();
    }

    fn blur(&mut self) {
        if let Some(unit) = self.active_unit() {
            tracing::debug!(?unit, "Validating on blur");
            self.validation.trigger(unit, &self.form);
        }
    }

    /// Keep errors live after an edit
    fn after_edit(&mut self) {
        match self.active_unit() {
            // The body is checked on every change
            Some(Unit::Body) => self.validation.trigger(Unit::Body, &self.form),
            Some(unit) => self.validation.refresh(unit, &self.form),
            None => {}
        }
    }

    /// Switch between key and value of the selected row
    pub fn next_field(&mut self) {
        if self.active_rows().is_none() {
            return;
        }
        self.blur();
        self.row_field = match self.row_field {
            RowField::Key => RowField::Value,
            RowField::Value => RowField::Key,
        };
        self.cursor_position = self.current_input().map_or(0, str::len);
    }

    pub fn move_cursor_left(&mut self) {
        let Some(input) = self.current_input() else {
            return;
        };
        let cursor = self.cursor_position.min(input.len());
        if cursor > 0 {
            let new_pos = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let Some(input) = self.current_input() else {
            return;
        };
        let cursor = self.cursor_position.min(input.len());
        if cursor < input.len() {
            let new_pos = input[cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| cursor + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let Some(input) = self.current_input_mut() else {
            return;
        };
        let cursor_pos = cursor_pos.min(input.len());
        input.insert(cursor_pos, c);
        self.cursor_position = cursor_pos + c.len_utf8();
        self.after_edit();
    }

    pub fn newline(&mut self) {
        if self.active_panel == Panel::Body {
            self.enter_char('\n');
        }
    }

    pub fn delete_char(&mut self) {
        let cursor_pos = self.cursor_position;
        let Some(input) = self.current_input_mut() else {
            return;
        };
        let cursor_pos = cursor_pos.min(input.len());
        if cursor_pos == 0 {
            return;
        }
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        self.cursor_position = prev_pos;
        self.after_edit();
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        if !self.is_submitting() {
            self.form.method = self.form.method.next();
        }
    }

    // ========================
    // Preview scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.preview_scroll = self.preview_scroll.saturating_add(1);
    }

    pub fn toggle_preview_mode(&mut self) {
        self.preview_mode = self.preview_mode.toggle();
        self.preview_scroll = 0;
    }

    // ========================
    // Params / headers rows
    // ========================

    pub fn next_row(&mut self) {
        if let Some((set, selected)) = self.active_rows_mut() {
            if !set.is_empty() {
                *selected = (*selected + 1) % set.len();
            }
        }
    }

    pub fn prev_row(&mut self) {
        if let Some((set, selected)) = self.active_rows_mut() {
            if !set.is_empty() {
                *selected = selected.checked_sub(1).unwrap_or(set.len() - 1);
            }
        }
    }

    pub fn add_row(&mut self) {
        if let Some((set, selected)) = self.active_rows_mut() {
            let id = set.add();
            *selected = set.len() - 1;
            tracing::debug!(%id, "Added row");
        }
        self.row_field = RowField::Key;
        self.after_edit();
    }

    pub fn delete_row(&mut self) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        if let Some((set, selected)) = self.active_rows_mut() {
            set.remove(id);
            if *selected >= set.len() && *selected > 0 {
                *selected -= 1;
            }
        }
        self.after_edit();
    }

    pub fn toggle_row(&mut self) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        if let Some((set, _)) = self.active_rows_mut() {
            set.toggle(id);
        }
        self.after_edit();
    }

    // ========================
    // Auth
    // ========================

    pub fn cycle_auth(&mut self) {
        self.form.auth = AuthConfig::switch_to(self.form.auth.kind().next());
        self.auth_field = auth_fields(&self.form.auth)
            .first()
            .copied()
            .unwrap_or_default();
        self.cursor_position = 0;
    }

    pub fn next_auth_field(&mut self) {
        let fields = auth_fields(&self.form.auth);
        if fields.is_empty() {
            return;
        }
        let index = fields
            .iter()
            .position(|f| *f == self.auth_field)
            .map_or(0, |i| (i + 1) % fields.len());
        self.auth_field = fields[index];
        self.cursor_position = self.current_input().map_or(0, str::len);
    }

    pub fn toggle_key_location(&mut self) {
        if let AuthConfig::ApiKey { key_location, .. } = &mut self.form.auth {
            *key_location = key_location.toggle();
        }
    }

    // ========================
    // Body
    // ========================

    /// Pretty-print the body; does nothing unless it is valid JSON
    pub fn format_body(&mut self) {
        if let Some(formatted) = body::format(&self.form.body) {
            self.form.body = formatted;
            self.cursor_position = 0;
            self.validation.trigger(Unit::Body, &self.form);
        }
    }

    // ========================
    // Submit
    // ========================

    /// Validate everything and, if clean, hand the compiled config to dispatch.
    ///
    /// A submit while another one is pending is ignored.
    pub fn submit(&mut self) -> Option<DispatchCommand> {
        if let Some(pending) = self.pending_dispatch_id {
            tracing::debug!(pending, "Submit ignored while a dispatch is pending");
            return None;
        }
        self.input_mode = InputMode::Normal;

        if !self.validation.trigger_all(&self.form) {
            tracing::warn!("Submit blocked by validation errors");
            self.notice = Some(Notice::error(SUBMIT_BLOCKED_NOTICE));
            return None;
        }

        let id = self.next_id();
        self.pending_dispatch_id = Some(id);
        self.notice = Some(Notice::info("Sending..."));
        let config = self.form.compile();
        tracing::info!(
            id,
            config = %config.redacted(&self.form.auth).to_pretty_json(),
            "Submitting request configuration"
        );

        Some(DispatchCommand::Dispatch { id, config })
    }

    pub fn handle_dispatch_response(&mut self, response: DispatchResponse) {
        if self.pending_dispatch_id != Some(response.id()) {
            return;
        }
        match response {
            DispatchResponse::Completed { id, elapsed_ms } => {
                tracing::info!(id, elapsed_ms, "Dispatch completed");
                self.pending_dispatch_id = None;
                self.notice = Some(Notice::success(SUBMIT_SUCCESS_NOTICE));
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notice(&mut self) {
        if !self.is_submitting() {
            self.notice = None;
        }
    }
}

//! App state - pure data structure with no I/O logic

use crate::body;
use crate::keyvalue::{KeyValueSet, RowId};
use crate::messages::render::{Notice, RowView};
use crate::messages::ui_events::{AuthField, InputMode, Panel, PreviewMode, RowField};
use crate::messages::RenderState;
use crate::models::{AuthConfig, RequestForm};
use crate::validation::{FormValidationState, Unit};

/// Main application state - pure data, no I/O
#[derive(Debug, Default)]
pub struct AppState {
    // Request being edited
    pub form: RequestForm,
    pub validation: FormValidationState,

    // UI state
    pub active_panel: Panel,
    pub visible_tab: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Params / headers panels
    pub selected_param: usize,
    pub selected_header: usize,
    pub row_field: RowField,

    // Auth panel
    pub auth_field: AuthField,

    // Preview
    pub preview_mode: PreviewMode,
    pub preview_scroll: u16,

    // Submit
    pub next_dispatch_id: u64,
    pub pending_dispatch_id: Option<u64>,
    pub notice: Option<Notice>,

    // Popups
    pub show_help: bool,
}

fn row_views(set: &KeyValueSet, validation: &FormValidationState, unit: Unit) -> Vec<RowView> {
    set.iter()
        .map(|row| RowView {
            key: row.key.clone(),
            value: row.value.clone(),
            enabled: row.enabled,
            fault: validation.row_fault(unit, row.id),
        })
        .collect()
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            visible_tab: Panel::Params,
            next_dispatch_id: 1,
            ..Default::default()
        }
    }

    /// Generate a unique dispatch ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_dispatch_id;
        self.next_dispatch_id += 1;
        id
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_dispatch_id.is_some()
    }

    /// Validation unit owning the focused panel, if any
    pub fn active_unit(&self) -> Option<Unit> {
        match self.active_panel {
            Panel::Url => Some(Unit::Url),
            Panel::Params => Some(Unit::Params),
            Panel::Headers => Some(Unit::Headers),
            Panel::Body => Some(Unit::Body),
            Panel::Auth | Panel::Preview => None,
        }
    }

    /// Row set and selection of the focused panel
    pub fn active_rows(&self) -> Option<(&KeyValueSet, usize)> {
        match self.active_panel {
            Panel::Params => Some((&self.form.params, self.selected_param)),
            Panel::Headers => Some((&self.form.headers, self.selected_header)),
            _ => None,
        }
    }

    pub fn active_rows_mut(&mut self) -> Option<(&mut KeyValueSet, &mut usize)> {
        match self.active_panel {
            Panel::Params => Some((&mut self.form.params, &mut self.selected_param)),
            Panel::Headers => Some((&mut self.form.headers, &mut self.selected_header)),
            _ => None,
        }
    }

    /// Id of the selected row in the focused panel
    pub fn selected_row_id(&self) -> Option<RowId> {
        let (set, index) = self.active_rows()?;
        set.at(index).map(|row| row.id)
    }

    /// Get the current input field content
    pub fn current_input(&self) -> Option<&str> {
        let input: &String = match self.active_panel {
            Panel::Url => &self.form.url,
            Panel::Body => &self.form.body,
            Panel::Params | Panel::Headers => {
                let (set, index) = self.active_rows()?;
                let row = set.at(index)?;
                match self.row_field {
                    RowField::Key => &row.key,
                    RowField::Value => &row.value,
                }
            }
            Panel::Auth => match (&self.form.auth, self.auth_field) {
                (AuthConfig::Bearer { token }, AuthField::Token) => token,
                (AuthConfig::Basic { username, .. }, AuthField::Username) => username,
                (AuthConfig::Basic { password, .. }, AuthField::Password) => password,
                (AuthConfig::ApiKey { key_name, .. }, AuthField::KeyName) => key_name,
                (AuthConfig::ApiKey { key_value, .. }, AuthField::KeyValue) => key_value,
                _ => return None,
            },
            Panel::Preview => return None,
        };
        Some(input.as_str())
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.form.url),
            Panel::Body => Some(&mut self.form.body),
            Panel::Params | Panel::Headers => {
                let field = self.row_field;
                let (set, index) = self.active_rows_mut()?;
                let row = set.at_mut(*index)?;
                Some(match field {
                    RowField::Key => &mut row.key,
                    RowField::Value => &mut row.value,
                })
            }
            Panel::Auth => match (&mut self.form.auth, self.auth_field) {
                (AuthConfig::Bearer { token }, AuthField::Token) => Some(token),
                (AuthConfig::Basic { username, .. }, AuthField::Username) => Some(username),
                (AuthConfig::Basic { password, .. }, AuthField::Password) => Some(password),
                (AuthConfig::ApiKey { key_name, .. }, AuthField::KeyName) => Some(key_name),
                (AuthConfig::ApiKey { key_value, .. }, AuthField::KeyValue) => Some(key_value),
                _ => None,
            },
            Panel::Preview => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let url_error = self
            .validation
            .current_errors(Unit::Url)
            .first()
            .map(|err| err.to_string());

        RenderState {
            method: self.form.method,
            url: self.form.url.clone(),
            url_error,
            params: row_views(&self.form.params, &self.validation, Unit::Params),
            headers: row_views(&self.form.headers, &self.validation, Unit::Headers),
            active_params: self.form.params.active_count(),
            active_headers: self.form.headers.active_count(),
            auth: self.form.auth.clone(),
            body: self.form.body.clone(),
            body_status: body::validate(&self.form.body),
            body_error: self
                .validation
                .current_errors(Unit::Body)
                .first()
                .map(|err| err.to_string()),
            active_panel: self.active_panel,
            visible_tab: self.visible_tab,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            selected_param: self.selected_param,
            selected_header: self.selected_header,
            row_field: self.row_field,
            auth_field: self.auth_field,
            config: self.form.compile(),
            preview_mode: self.preview_mode,
            preview_scroll: self.preview_scroll,
            is_submitting: self.is_submitting(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}

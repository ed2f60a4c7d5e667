//! Render state - data structure sent from App layer to UI for rendering

use crate::body::BodyStatus;
use crate::compiler::RequestConfig;
use crate::keyvalue::RowFault;
use crate::messages::ui_events::{AuthField, InputMode, Panel, PreviewMode, RowField};
use crate::models::{AuthConfig, HttpMethod, RequestForm};

/// One params/headers row as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub key: String,
    pub value: String,
    pub enabled: bool,
    pub fault: Option<RowFault>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient message shown in the status area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request data
    pub method: HttpMethod,
    pub url: String,
    pub url_error: Option<String>,
    pub params: Vec<RowView>,
    pub headers: Vec<RowView>,
    pub active_params: usize,
    pub active_headers: usize,
    pub auth: AuthConfig,
    pub body: String,
    /// Live JSON indicator, independent of validation triggers
    pub body_status: BodyStatus,
    pub body_error: Option<String>,

    // UI state
    pub active_panel: Panel,
    /// Editor tab shown while focus is on the URL bar or preview
    pub visible_tab: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub selected_param: usize,
    pub selected_header: usize,
    pub row_field: RowField,
    pub auth_field: AuthField,

    // Compiled output
    pub config: RequestConfig,
    pub preview_mode: PreviewMode,
    pub preview_scroll: u16,

    // Submit
    pub is_submitting: bool,
    pub notice: Option<Notice>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        let form = RequestForm::default();
        RenderState {
            method: form.method,
            url: form.url.clone(),
            url_error: None,
            params: Vec::new(),
            headers: Vec::new(),
            active_params: 0,
            active_headers: 0,
            auth: form.auth.clone(),
            body: String::new(),
            body_status: BodyStatus::Empty,
            body_error: None,
            active_panel: Panel::Url,
            visible_tab: Panel::Params,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_param: 0,
            selected_header: 0,
            row_field: RowField::Key,
            auth_field: AuthField::Token,
            config: form.compile(),
            preview_mode: PreviewMode::Json,
            preview_scroll: 0,
            is_submitting: false,
            notice: None,
            show_help: false,
        }
    }
}

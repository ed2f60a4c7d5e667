//! App actor - message loop processing UI events and dispatch responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{DispatchCommand, DispatchResponse, RenderState, UiEvent};

/// App actor that processes UI events and dispatch responses
pub struct AppActor {
    state: AppState,
    dispatch_tx: mpsc::UnboundedSender<DispatchCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        dispatch_tx: mpsc::UnboundedSender<DispatchCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            dispatch_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut dispatch_rx: mpsc::UnboundedReceiver<DispatchResponse>,
    ) {
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.dispatch_tx.send(DispatchCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = dispatch_rx.recv() => {
                    self.state.handle_dispatch_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
        tracing::debug!("App actor stopped");
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Newline => self.state.newline(),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Request actions
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::Submit => {
                if let Some(cmd) = self.state.submit() {
                    let _ = self.dispatch_tx.send(cmd);
                }
            }

            // Params / headers
            UiEvent::NextRow => self.state.next_row(),
            UiEvent::PrevRow => self.state.prev_row(),
            UiEvent::AddRow => self.state.add_row(),
            UiEvent::DeleteRow => self.state.delete_row(),
            UiEvent::ToggleRow => self.state.toggle_row(),

            // Auth
            UiEvent::CycleAuth => self.state.cycle_auth(),
            UiEvent::NextAuthField => self.state.next_auth_field(),
            UiEvent::ToggleKeyLocation => self.state.toggle_key_location(),

            // Body / preview
            UiEvent::FormatBody => self.state.format_body(),
            UiEvent::TogglePreviewMode => self.state.toggle_preview_mode(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissNotice => self.state.dismiss_notice(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::render::NoticeKind;

    #[tokio::test]
    async fn test_submit_reaches_dispatch_channel() {
        let (dispatch_tx, mut dispatch_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(dispatch_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, resp_rx));

        ui_tx.send(UiEvent::Submit).unwrap();
        let Some(DispatchCommand::Dispatch { id, config }) = dispatch_rx.recv().await else {
            panic!("expected a dispatch command");
        };
        assert_eq!(config.method, "get");

        resp_tx
            .send(DispatchResponse::Completed { id, elapsed_ms: 0 })
            .unwrap();

        // Wait for the render that reflects the completed dispatch
        loop {
            let state = render_rx.recv().await.unwrap();
            if matches!(&state.notice, Some(n) if n.kind == NoticeKind::Success) {
                assert!(!state.is_submitting);
                break;
            }
        }

        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        assert!(matches!(
            dispatch_rx.recv().await,
            Some(DispatchCommand::Shutdown)
        ));
    }
}

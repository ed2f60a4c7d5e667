//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Dispatch layers.

pub mod dispatch;
pub mod render;
pub mod ui_events;

pub use dispatch::{DispatchCommand, DispatchResponse};
pub use render::RenderState;
pub use ui_events::UiEvent;

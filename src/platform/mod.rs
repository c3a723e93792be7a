//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, keyboard, resize) -> `game::InputEvent`
//! - The per-frame loop and its teardown
//! - Storage (LocalStorage on web, via `Settings`)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{KeyAction, PageLifecycle, canvas_point, key_action, page_lifecycle};

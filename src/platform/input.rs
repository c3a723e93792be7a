//! Raw input translation

use glam::Vec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Catch attempt aimed at the prey
    Primary,
    ToggleMute,
}

/// Map a `KeyboardEvent` to an action. Auto-repeat from a held key is
/// ignored, so one press is one catch attempt.
pub fn key_action(key: &str, repeat: bool) -> Option<KeyAction> {
    if repeat {
        return None;
    }
    match key {
        " " | "Enter" => Some(KeyAction::Primary),
        "m" | "M" => Some(KeyAction::ToggleMute),
        _ => None,
    }
}

/// What the host does on a page visibility transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLifecycle {
    /// Headed for the back/forward cache; pause the frame loop
    Suspend,
    /// Restored from the back/forward cache; restart the frame loop
    Resume,
    /// Page is going away for good; detach everything
    Teardown,
    Ignore,
}

/// Map a `pagehide`/`pageshow` event to a lifecycle step
pub fn page_lifecycle(kind: &str, persisted: bool) -> PageLifecycle {
    match (kind, persisted) {
        ("pagehide", true) => PageLifecycle::Suspend,
        ("pagehide", false) => PageLifecycle::Teardown,
        ("pageshow", true) => PageLifecycle::Resume,
        _ => PageLifecycle::Ignore,
    }
}

/// Client (page) coordinates -> canvas coordinates
#[inline]
pub fn canvas_point(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

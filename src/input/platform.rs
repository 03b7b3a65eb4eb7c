//! Platform capability interface consumed by the input system

use glam::Vec2;

/// Capabilities the input system needs from the windowing platform.
///
/// The tracker holds exactly one boxed implementation for its lifetime and
/// only touches it from the thread driving the event loop. Backends that
/// cannot poll the cursor outside of events report the last position they
/// delivered; `None` at construction time means the platform handle is
/// invalid and input bring-up must fail.
pub trait PlatformSource {
    /// Current cursor position in window client coordinates.
    fn cursor_position(&self) -> Option<Vec2>;

    /// Show or hide the cursor while it is over the window.
    fn set_cursor_visible(&mut self, _visible: bool) {}

    /// Confine the cursor to the window client area.
    fn set_cursor_captured(&mut self, _captured: bool) {}
}

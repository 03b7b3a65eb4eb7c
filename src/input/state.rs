//! Input state tracking
//!
//! The [`Input`] struct consumes raw platform events (key, mouse button,
//! mouse move, wheel) pushed in by the window's event loop, plus one
//! [`Input::update`] call per frame, and turns them into level and
//! edge-triggered queries. Key and button state is double-buffered: `update`
//! snapshots the previous frame so `was_*_pressed`/`was_*_released` are true
//! for exactly one frame per transition.
//!
//! All state belongs to a single instance driven by a single-threaded event
//! loop. Callbacks run synchronously on that thread, inline with the
//! triggering event, and must not re-enter `update`.

use glam::Vec2;

use crate::input::key::{Key, MouseButton};
use crate::input::platform::PlatformSource;

/// Callback invoked when a key transitions between up and down.
pub type KeyCallback = Box<dyn FnMut(Key, bool)>;
/// Callback invoked when a mouse button transitions, with the cursor position.
pub type MouseButtonCallback = Box<dyn FnMut(MouseButton, bool, Vec2)>;
/// Callback invoked on every cursor move, with the new position.
pub type MouseMoveCallback = Box<dyn FnMut(Vec2)>;
/// Callback invoked on every wheel event, with the frame's cumulative notches.
pub type WheelCallback = Box<dyn FnMut(f32)>;

// ============================================================================
// Mouse Snapshot
// ============================================================================

/// Plain snapshot of the mouse state at the last query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    /// Absolute cursor position in window client coordinates
    pub position: Vec2,
    /// Cursor movement since the previous frame
    pub delta: Vec2,
    /// Wheel notches accumulated since the previous frame
    pub wheel: f32,
    /// Per-button down flags
    pub buttons: [bool; MouseButton::COUNT],
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur during input bring-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The platform handle/context was invalid at initialization
    InvalidPlatform,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPlatform => {
                write!(f, "platform context cannot supply a cursor position")
            }
        }
    }
}

impl std::error::Error for InputError {}

// ============================================================================
// Input Tracker
// ============================================================================

/// Double-buffered input state tracker.
///
/// Construction is the only fallible operation; every event handler absorbs
/// malformed input as a no-op. Unmapped keys arrive as [`Key::Unknown`] and
/// never register as pressed.
pub struct Input {
    platform: Box<dyn PlatformSource>,

    current_keys: [bool; Key::COUNT],
    previous_keys: [bool; Key::COUNT],
    changed_keys: [bool; Key::COUNT],

    current_buttons: [bool; MouseButton::COUNT],
    previous_buttons: [bool; MouseButton::COUNT],
    changed_buttons: [bool; MouseButton::COUNT],

    position: Vec2,
    previous_position: Vec2,
    delta: Vec2,
    wheel: f32,

    cursor_visible: bool,
    cursor_captured: bool,
    shut_down: bool,

    key_callback: Option<KeyCallback>,
    mouse_button_callback: Option<MouseButtonCallback>,
    mouse_move_callback: Option<MouseMoveCallback>,
    wheel_callback: Option<WheelCallback>,
}

impl Input {
    /// Create a tracker bound to a platform source.
    ///
    /// The starting cursor position is polled from the platform and becomes
    /// both the current and previous position, so the first frame reports a
    /// zero delta.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidPlatform`] when the platform cannot
    /// report a cursor position, i.e. its handle/context is invalid.
    pub fn new(platform: Box<dyn PlatformSource>) -> Result<Self, InputError> {
        let position = platform
            .cursor_position()
            .ok_or(InputError::InvalidPlatform)?;

        log::debug!("input system initialized, cursor at {position}");

        Ok(Self {
            platform,
            current_keys: [false; Key::COUNT],
            previous_keys: [false; Key::COUNT],
            changed_keys: [false; Key::COUNT],
            current_buttons: [false; MouseButton::COUNT],
            previous_buttons: [false; MouseButton::COUNT],
            changed_buttons: [false; MouseButton::COUNT],
            position,
            previous_position: position,
            delta: Vec2::ZERO,
            wheel: 0.0,
            cursor_visible: true,
            cursor_captured: false,
            shut_down: false,
            key_callback: None,
            mouse_button_callback: None,
            mouse_move_callback: None,
            wheel_callback: None,
        })
    }

    /// Release cursor capture/visibility state pushed to the platform.
    ///
    /// Safe to call more than once; calls after the first are no-ops. Also
    /// runs on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if self.cursor_captured {
            self.platform.set_cursor_captured(false);
            self.cursor_captured = false;
        }
        if !self.cursor_visible {
            self.platform.set_cursor_visible(true);
            self.cursor_visible = true;
        }

        log::debug!("input system shut down");
    }

    // -------------------------------------------------------------------------
    // Event ingestion
    // -------------------------------------------------------------------------

    /// Process a raw key event.
    ///
    /// [`Key::Unknown`] is absorbed without touching any state. The key
    /// callback fires only when the event actually flips the key's state,
    /// so platform key repeats are silent.
    pub fn on_key_event(&mut self, key: Key, pressed: bool) {
        if key == Key::Unknown {
            return;
        }
        let index = key.index();
        let changed = self.current_keys[index] != pressed;
        self.current_keys[index] = pressed;
        if changed {
            self.changed_keys[index] = true;
            if let Some(callback) = self.key_callback.as_mut() {
                callback(key, pressed);
            }
        }
    }

    /// Process a raw mouse button event.
    ///
    /// The absolute cursor position is updated before the transition is
    /// evaluated, so the button callback always observes the position the
    /// click happened at.
    pub fn on_mouse_button_event(&mut self, button: MouseButton, pressed: bool, position: Vec2) {
        self.position = position;
        let index = button.index();
        let changed = self.current_buttons[index] != pressed;
        self.current_buttons[index] = pressed;
        if changed {
            self.changed_buttons[index] = true;
            if let Some(callback) = self.mouse_button_callback.as_mut() {
                callback(button, pressed, position);
            }
        }
    }

    /// Process a raw cursor move.
    ///
    /// The absolute position updates immediately so event consumers see it
    /// without waiting for a frame boundary; the delta only changes at
    /// [`Input::update`].
    pub fn on_mouse_move_event(&mut self, position: Vec2) {
        self.position = position;
        if let Some(callback) = self.mouse_move_callback.as_mut() {
            callback(position);
        }
    }

    /// Process a wheel event, in notches (one platform scroll click = 1.0).
    ///
    /// Notches accumulate until the next [`Input::update`]; the wheel
    /// callback receives the cumulative value for the current frame.
    pub fn on_wheel_event(&mut self, notches: f32) {
        self.wheel += notches;
        if let Some(callback) = self.wheel_callback.as_mut() {
            callback(self.wheel);
        }
    }

    // -------------------------------------------------------------------------
    // Frame boundary
    // -------------------------------------------------------------------------

    /// Advance one frame. Call exactly once per frame, before trusting any
    /// of that frame's queries.
    ///
    /// Snapshots key/button state for the edge queries, refreshes the cursor
    /// position from the platform, recomputes the frame delta, and zeroes the
    /// wheel accumulator.
    pub fn update(&mut self) {
        // A slot that transitioned since the last update snapshots the
        // inverse of its final state, so the edge queries report the
        // direction of the last transition; press-then-release inside one
        // frame reads as a release.
        for index in 0..Key::COUNT {
            self.previous_keys[index] = if self.changed_keys[index] {
                !self.current_keys[index]
            } else {
                self.current_keys[index]
            };
            self.changed_keys[index] = false;
        }
        for index in 0..MouseButton::COUNT {
            self.previous_buttons[index] = if self.changed_buttons[index] {
                !self.current_buttons[index]
            } else {
                self.current_buttons[index]
            };
            self.changed_buttons[index] = false;
        }

        // The platform poll is authoritative: it resolves moves the event
        // loop never delivered. Backends without a poll primitive fall back
        // to the event-tracked position.
        let polled = self.platform.cursor_position().unwrap_or(self.position);
        self.previous_position = self.position;
        self.position = polled;
        self.delta = self.position - self.previous_position;

        self.wheel = 0.0;
    }

    /// Clear all key, button, delta and wheel state without touching the
    /// callbacks or the absolute cursor position.
    ///
    /// Call when input focus is lost so keys released outside the window do
    /// not stay stuck down.
    pub fn reset(&mut self) {
        self.current_keys = [false; Key::COUNT];
        self.previous_keys = [false; Key::COUNT];
        self.changed_keys = [false; Key::COUNT];
        self.current_buttons = [false; MouseButton::COUNT];
        self.previous_buttons = [false; MouseButton::COUNT];
        self.changed_buttons = [false; MouseButton::COUNT];
        self.delta = Vec2::ZERO;
        self.wheel = 0.0;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Check if a key is currently down.
    #[inline]
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.current_keys[key.index()]
    }

    /// Check if a key went down during the last frame.
    #[inline]
    #[must_use]
    pub fn was_key_pressed(&self, key: Key) -> bool {
        let index = key.index();
        self.current_keys[index] && !self.previous_keys[index]
    }

    /// Check if a key went up during the last frame.
    #[inline]
    #[must_use]
    pub fn was_key_released(&self, key: Key) -> bool {
        let index = key.index();
        !self.current_keys[index] && self.previous_keys[index]
    }

    /// Check if a mouse button is currently down.
    #[inline]
    #[must_use]
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.current_buttons[button.index()]
    }

    /// Check if a mouse button went down during the last frame.
    #[inline]
    #[must_use]
    pub fn was_mouse_button_pressed(&self, button: MouseButton) -> bool {
        let index = button.index();
        self.current_buttons[index] && !self.previous_buttons[index]
    }

    /// Check if a mouse button went up during the last frame.
    #[inline]
    #[must_use]
    pub fn was_mouse_button_released(&self, button: MouseButton) -> bool {
        let index = button.index();
        !self.current_buttons[index] && self.previous_buttons[index]
    }

    /// Current cursor position in window client coordinates.
    #[inline]
    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.position
    }

    /// Cursor movement since the previous frame.
    #[inline]
    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel notches accumulated since the previous frame.
    #[inline]
    #[must_use]
    pub fn wheel_delta(&self) -> f32 {
        self.wheel
    }

    /// Snapshot of the full mouse state.
    #[must_use]
    pub fn mouse_state(&self) -> MouseState {
        MouseState {
            position: self.position,
            delta: self.delta,
            wheel: self.wheel,
            buttons: self.current_buttons,
        }
    }

    // -------------------------------------------------------------------------
    // Callbacks
    // -------------------------------------------------------------------------

    /// Set the key transition callback, replacing any previous one.
    pub fn set_key_callback(&mut self, callback: impl FnMut(Key, bool) + 'static) {
        self.key_callback = Some(Box::new(callback));
    }

    /// Set the mouse button transition callback, replacing any previous one.
    pub fn set_mouse_button_callback(
        &mut self,
        callback: impl FnMut(MouseButton, bool, Vec2) + 'static,
    ) {
        self.mouse_button_callback = Some(Box::new(callback));
    }

    /// Set the cursor move callback, replacing any previous one.
    pub fn set_mouse_move_callback(&mut self, callback: impl FnMut(Vec2) + 'static) {
        self.mouse_move_callback = Some(Box::new(callback));
    }

    /// Set the wheel callback, replacing any previous one.
    pub fn set_wheel_callback(&mut self, callback: impl FnMut(f32) + 'static) {
        self.wheel_callback = Some(Box::new(callback));
    }

    /// Drop all registered callbacks.
    pub fn clear_callbacks(&mut self) {
        self.key_callback = None;
        self.mouse_button_callback = None;
        self.mouse_move_callback = None;
        self.wheel_callback = None;
    }

    // -------------------------------------------------------------------------
    // Cursor control
    // -------------------------------------------------------------------------

    /// Show or hide the cursor. Hidden cursors are restored at shutdown.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.platform.set_cursor_visible(visible);
    }

    /// Capture or release the cursor. Captures are released at shutdown.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        self.platform.set_cursor_captured(captured);
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Platform mock with a settable cursor and call counters.
    struct TestPlatform {
        cursor: Rc<Cell<Vec2>>,
        poll_enabled: Rc<Cell<bool>>,
        visible: Rc<Cell<bool>>,
        captured: Rc<Cell<bool>>,
        platform_calls: Rc<Cell<usize>>,
    }

    impl PlatformSource for TestPlatform {
        fn cursor_position(&self) -> Option<Vec2> {
            self.poll_enabled.get().then(|| self.cursor.get())
        }

        fn set_cursor_visible(&mut self, visible: bool) {
            self.visible.set(visible);
            self.platform_calls.set(self.platform_calls.get() + 1);
        }

        fn set_cursor_captured(&mut self, captured: bool) {
            self.captured.set(captured);
            self.platform_calls.set(self.platform_calls.get() + 1);
        }
    }

    struct Harness {
        cursor: Rc<Cell<Vec2>>,
        poll_enabled: Rc<Cell<bool>>,
        visible: Rc<Cell<bool>>,
        captured: Rc<Cell<bool>>,
        platform_calls: Rc<Cell<usize>>,
    }

    impl Harness {
        fn at(origin: Vec2) -> (Input, Harness) {
            let harness = Harness {
                cursor: Rc::new(Cell::new(origin)),
                poll_enabled: Rc::new(Cell::new(true)),
                visible: Rc::new(Cell::new(true)),
                captured: Rc::new(Cell::new(false)),
                platform_calls: Rc::new(Cell::new(0)),
            };
            let platform = TestPlatform {
                cursor: Rc::clone(&harness.cursor),
                poll_enabled: Rc::clone(&harness.poll_enabled),
                visible: Rc::clone(&harness.visible),
                captured: Rc::clone(&harness.captured),
                platform_calls: Rc::clone(&harness.platform_calls),
            };
            let input = Input::new(Box::new(platform)).unwrap();
            (input, harness)
        }
    }

    fn tracker() -> Input {
        Harness::at(Vec2::ZERO).0
    }

    /// Platform with no cursor context at all.
    struct DeadPlatform;

    impl PlatformSource for DeadPlatform {
        fn cursor_position(&self) -> Option<Vec2> {
            None
        }
    }

    #[test]
    fn test_initialize_at_cursor_position() {
        let (input, _) = Harness::at(Vec2::new(10.0, 10.0));
        assert_eq!(input.mouse_position(), Vec2::new(10.0, 10.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.wheel_delta(), 0.0);
        assert!(!input.is_key_down(Key::A));
        assert!(!input.is_mouse_button_down(MouseButton::Left));
    }

    #[test]
    fn test_initialize_fails_on_dead_platform() {
        let result = Input::new(Box::new(DeadPlatform));
        assert_eq!(result.err(), Some(InputError::InvalidPlatform));
    }

    #[test]
    fn test_press_edge_visible_for_one_update() {
        let mut input = tracker();

        input.on_key_event(Key::W, true);
        input.update();
        assert!(input.was_key_pressed(Key::W));
        assert!(input.is_key_down(Key::W));

        // No new event: the edge clears, the level stays.
        input.update();
        assert!(!input.was_key_pressed(Key::W));
        assert!(input.is_key_down(Key::W));
    }

    #[test]
    fn test_release_edge() {
        let mut input = tracker();

        input.on_key_event(Key::Space, true);
        input.update();
        input.on_key_event(Key::Space, false);
        input.update();

        assert!(input.was_key_released(Key::Space));
        assert!(!input.is_key_down(Key::Space));

        input.update();
        assert!(!input.was_key_released(Key::Space));
    }

    #[test]
    fn test_pressed_and_released_never_both() {
        let mut input = tracker();

        let sequences: &[&[bool]] = &[&[true], &[true, false], &[true, false, true], &[]];
        for sequence in sequences {
            for &pressed in *sequence {
                input.on_key_event(Key::K, pressed);
            }
            input.update();
            assert!(
                !(input.was_key_pressed(Key::K) && input.was_key_released(Key::K)),
                "pressed and released both true after {sequence:?}"
            );
        }
    }

    #[test]
    fn test_intra_frame_press_release_reports_release() {
        let mut input = tracker();

        input.on_key_event(Key::Space, true);
        input.on_key_event(Key::Space, false);
        input.update();

        // Last event wins: the frame reports the release.
        assert!(!input.was_key_pressed(Key::Space));
        assert!(input.was_key_released(Key::Space));
        assert!(!input.is_key_down(Key::Space));
    }

    #[test]
    fn test_intra_frame_release_press_reports_press() {
        let mut input = tracker();

        input.on_key_event(Key::Space, true);
        input.update();

        input.on_key_event(Key::Space, false);
        input.on_key_event(Key::Space, true);
        input.update();

        assert!(input.was_key_pressed(Key::Space));
        assert!(!input.was_key_released(Key::Space));
        assert!(input.is_key_down(Key::Space));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut input = tracker();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        input.set_key_callback(move |_, _| counter.set(counter.get() + 1));

        input.on_key_event(Key::Unknown, true);
        input.update();

        assert!(!input.is_key_down(Key::Unknown));
        assert!(!input.was_key_pressed(Key::Unknown));
        assert_eq!(calls.get(), 0);

        // Real keys are unaffected.
        for key in [Key::A, Key::Z, Key::Space, Key::Alt] {
            assert!(!input.is_key_down(key));
        }
    }

    #[test]
    fn test_key_callback_on_transitions_only() {
        let mut input = tracker();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        input.set_key_callback(move |key, pressed| {
            sink.borrow_mut().push((key, pressed));
        });

        input.on_key_event(Key::W, true);
        input.on_key_event(Key::W, true); // platform repeat
        input.on_key_event(Key::W, false);

        assert_eq!(*log.borrow(), vec![(Key::W, true), (Key::W, false)]);
    }

    #[test]
    fn test_callback_replacement_and_clear() {
        let mut input = tracker();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = Rc::clone(&first);
        input.set_key_callback(move |_, _| counter.set(counter.get() + 1));
        let counter = Rc::clone(&second);
        input.set_key_callback(move |_, _| counter.set(counter.get() + 1));

        input.on_key_event(Key::A, true);
        assert_eq!(first.get(), 0, "replaced callback must not fire");
        assert_eq!(second.get(), 1);

        input.clear_callbacks();
        input.on_key_event(Key::A, false);
        assert_eq!(second.get(), 1, "cleared callback must not fire");
    }

    #[test]
    fn test_mouse_button_edge_and_position() {
        let mut input = tracker();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        input.set_mouse_button_callback(move |button, pressed, position| {
            sink.borrow_mut().push((button, pressed, position));
        });

        let click_at = Vec2::new(42.0, 17.0);
        input.on_mouse_button_event(MouseButton::Left, true, click_at);

        // Position updates with the event, before any update() call.
        assert_eq!(input.mouse_position(), click_at);
        assert_eq!(*log.borrow(), vec![(MouseButton::Left, true, click_at)]);

        input.update();
        assert!(input.was_mouse_button_pressed(MouseButton::Left));
        assert!(input.is_mouse_button_down(MouseButton::Left));

        input.update();
        assert!(!input.was_mouse_button_pressed(MouseButton::Left));
        assert!(input.is_mouse_button_down(MouseButton::Left));
    }

    #[test]
    fn test_mouse_button_callback_transition_only() {
        let mut input = tracker();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        input.set_mouse_button_callback(move |_, _, _| counter.set(counter.get() + 1));

        input.on_mouse_button_event(MouseButton::Right, true, Vec2::ZERO);
        input.on_mouse_button_event(MouseButton::Right, true, Vec2::ZERO);
        input.on_mouse_button_event(MouseButton::Right, false, Vec2::ZERO);

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_mouse_move_updates_position_immediately() {
        let (mut input, _) = Harness::at(Vec2::ZERO);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        input.set_mouse_move_callback(move |position| {
            sink.borrow_mut().push(position);
        });

        input.on_mouse_move_event(Vec2::new(3.0, 4.0));

        assert_eq!(input.mouse_position(), Vec2::new(3.0, 4.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO, "delta waits for update()");
        assert_eq!(*log.borrow(), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_mouse_delta_across_updates() {
        let (mut input, harness) = Harness::at(Vec2::ZERO);

        harness.cursor.set(Vec2::new(5.0, 3.0));
        input.update();
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 3.0));

        // Cursor holds still: the next frame's delta is zero.
        input.update();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_move_then_update_scenario() {
        let (mut input, harness) = Harness::at(Vec2::new(10.0, 10.0));

        harness.cursor.set(Vec2::new(20.0, 15.0));
        input.on_mouse_move_event(Vec2::new(20.0, 15.0));
        assert_eq!(input.mouse_position(), Vec2::new(20.0, 15.0));

        input.update();
        assert_eq!(input.mouse_delta(), Vec2::new(10.0, 5.0));
        assert_eq!(input.mouse_position(), Vec2::new(20.0, 15.0));
    }

    #[test]
    fn test_poll_fallback_when_platform_cannot_poll() {
        let (mut input, harness) = Harness::at(Vec2::ZERO);
        harness.poll_enabled.set(false);

        input.on_mouse_move_event(Vec2::new(7.0, 2.0));
        input.update();

        // Without a poll primitive the event-tracked position stands.
        assert_eq!(input.mouse_position(), Vec2::new(7.0, 2.0));
        assert_eq!(input.mouse_delta(), Vec2::new(7.0, 2.0));
    }

    #[test]
    fn test_wheel_accumulates_and_resets() {
        let mut input = tracker();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        input.set_wheel_callback(move |wheel| sink.borrow_mut().push(wheel));

        input.on_wheel_event(1.0);
        input.on_wheel_event(2.0);

        // The callback sees the running frame total.
        assert_eq!(*log.borrow(), vec![1.0, 3.0]);
        assert_eq!(input.wheel_delta(), 3.0);

        input.update();
        assert_eq!(input.wheel_delta(), 0.0);
        assert_eq!(log.borrow().len(), 2, "update() must not invoke the callback");
    }

    #[test]
    fn test_reset_clears_state_preserves_position_and_callbacks() {
        let (mut input, _) = Harness::at(Vec2::new(10.0, 10.0));
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        input.set_key_callback(move |_, _| counter.set(counter.get() + 1));

        input.on_key_event(Key::W, true);
        input.on_mouse_button_event(MouseButton::Left, true, Vec2::new(30.0, 40.0));
        input.on_wheel_event(2.0);
        input.update();

        input.reset();

        assert!(!input.is_key_down(Key::W));
        assert!(!input.was_key_pressed(Key::W));
        assert!(!input.is_mouse_button_down(MouseButton::Left));
        assert_eq!(input.wheel_delta(), 0.0);
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(30.0, 40.0));

        // Callbacks survive the reset.
        input.on_key_event(Key::W, true);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_shutdown_idempotent() {
        let (mut input, harness) = Harness::at(Vec2::ZERO);

        input.set_cursor_visible(false);
        input.set_cursor_captured(true);
        assert!(!harness.visible.get());
        assert!(harness.captured.get());

        input.shutdown();
        assert!(harness.visible.get());
        assert!(!harness.captured.get());

        let calls_after_first = harness.platform_calls.get();
        input.shutdown();
        assert_eq!(
            harness.platform_calls.get(),
            calls_after_first,
            "second shutdown must not touch the platform"
        );
    }

    #[test]
    fn test_mouse_state_snapshot() {
        let (mut input, harness) = Harness::at(Vec2::ZERO);

        input.on_mouse_button_event(MouseButton::Middle, true, Vec2::new(1.0, 2.0));
        input.on_wheel_event(-1.0);
        harness.cursor.set(Vec2::new(1.0, 2.0));

        let state = input.mouse_state();
        assert_eq!(state.position, Vec2::new(1.0, 2.0));
        assert_eq!(state.wheel, -1.0);
        assert!(state.buttons[MouseButton::Middle.index()]);
        assert!(!state.buttons[MouseButton::Left.index()]);
    }
}

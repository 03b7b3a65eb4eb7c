//! Window shell and main event loop
//!
//! [`Shell`] owns the winit window and event loop and is the platform event
//! source for the input system: it maps raw window events onto the bounded
//! key/button sets, feeds them to [`Input`], and advances the tracker once
//! per frame before handing control to the application.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

use crate::input::{Input, Key, MouseButton, PlatformSource};
use crate::window::config::WindowConfig;

/// Wheel units per hardware notch; pixel scrolls are scaled by this to
/// approximate scroll clicks.
const WHEEL_STEP: f32 = 120.0;

/// Application trait that users implement
pub trait App: 'static {
    /// Called once when the shell starts
    fn init(&mut self, ctx: &mut ShellContext);

    /// Called every frame, after the input tracker has advanced
    fn frame(&mut self, ctx: &mut ShellContext);

    /// Called when the window is resized
    fn on_resize(&mut self, _ctx: &mut ShellContext, _width: u32, _height: u32) {}

    /// Called when the window gains or loses input focus
    fn on_focus(&mut self, _ctx: &mut ShellContext, _focused: bool) {}

    /// Called when the shell is shutting down
    fn shutdown(&mut self, _ctx: &mut ShellContext) {}
}

/// Context passed to application callbacks
pub struct ShellContext {
    /// Input system (available after window creation)
    input: Option<Input>,
    /// Window handle for title changes
    window: Option<Arc<Window>>,
    /// Client size
    window_size: PhysicalSize<u32>,
    /// Whether the window currently has input focus
    focused: bool,
    /// Close request flag
    should_close: bool,
}

impl ShellContext {
    fn new(width: u32, height: u32) -> Self {
        Self {
            input: None,
            window: None,
            window_size: PhysicalSize::new(width, height),
            focused: false,
            should_close: false,
        }
    }

    /// Get the input system
    pub fn input(&self) -> &Input {
        self.input.as_ref().expect("Input not initialized")
    }

    /// Get the input system mutably
    pub fn input_mut(&mut self) -> &mut Input {
        self.input.as_mut().expect("Input not initialized")
    }

    /// Get client width
    pub fn width(&self) -> u32 {
        self.window_size.width
    }

    /// Get client height
    pub fn height(&self) -> u32 {
        self.window_size.height
    }

    /// Get aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.window_size.width as f32 / self.window_size.height.max(1) as f32
    }

    /// Check if the window has input focus
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Change the window title
    pub fn set_title(&self, title: &str) {
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }

    /// Request shell shutdown
    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    /// Check if shutdown was requested
    pub fn should_close(&self) -> bool {
        self.should_close
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while running the shell
#[derive(Debug, Clone)]
pub enum ShellError {
    /// Event loop creation or execution failed
    EventLoop(String),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoop(e) => write!(f, "event loop error: {e}"),
        }
    }
}

impl std::error::Error for ShellError {}

// ============================================================================
// Winit Platform Source
// ============================================================================

/// [`PlatformSource`] backed by a winit window.
///
/// winit delivers cursor positions only through events, so the shell writes
/// every reported position into a shared cell and the poll reads it back.
pub struct WinitPlatform {
    window: Arc<Window>,
    cursor: Rc<Cell<Vec2>>,
}

impl WinitPlatform {
    /// Wrap a window and the shell's shared cursor cell.
    pub fn new(window: Arc<Window>, cursor: Rc<Cell<Vec2>>) -> Self {
        Self { window, cursor }
    }
}

impl PlatformSource for WinitPlatform {
    fn cursor_position(&self) -> Option<Vec2> {
        Some(self.cursor.get())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.window.set_cursor_visible(visible);
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let mode = if captured {
            CursorGrabMode::Confined
        } else {
            CursorGrabMode::None
        };
        if let Err(e) = self.window.set_cursor_grab(mode) {
            log::warn!("cursor capture request failed: {e}");
        }
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Main shell struct owning the window, the input system and the app
pub struct Shell<A: App> {
    config: WindowConfig,
    app: A,
    context: ShellContext,
    window: Option<Arc<Window>>,
    /// Last cursor position reported by the platform, shared with
    /// [`WinitPlatform`] as its poll source
    cursor: Rc<Cell<Vec2>>,
    initialized: bool,
}

impl<A: App> Shell<A> {
    /// Create a new shell with the given app
    pub fn new(config: WindowConfig, app: A) -> Self {
        let context = ShellContext::new(config.width, config.height);
        Self {
            config,
            app,
            context,
            window: None,
            cursor: Rc::new(Cell::new(Vec2::ZERO)),
            initialized: false,
        }
    }

    /// Run the shell until the window closes or the app requests shutdown
    pub fn run(mut self) -> Result<(), ShellError> {
        env_logger::init();
        log::info!("starting shell: {}", self.config.title);

        let event_loop =
            EventLoop::new().map_err(|e| ShellError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| ShellError::EventLoop(e.to_string()))?;

        Ok(())
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        let mut attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable)
            .with_maximized(self.config.maximized)
            .with_min_inner_size(PhysicalSize::new(
                self.config.min_size.0,
                self.config.min_size.1,
            ));

        if let Some((x, y)) = self.config.position {
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }
        if let Some((width, height)) = self.config.max_size {
            attributes = attributes.with_max_inner_size(PhysicalSize::new(width, height));
        }
        if self.config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        attributes
    }
}

/// Convert a winit scroll delta into wheel notches.
fn wheel_notches(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / WHEEL_STEP,
    }
}

impl<A: App> ApplicationHandler for Shell<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let platform = WinitPlatform::new(Arc::clone(&window), Rc::clone(&self.cursor));
        let input = match Input::new(Box::new(platform)) {
            Ok(input) => input,
            Err(e) => {
                log::error!("input bring-up failed: {e}");
                event_loop.exit();
                return;
            }
        };

        self.context.input = Some(input);
        self.context.window = Some(Arc::clone(&window));
        self.window = Some(window);

        if !self.initialized {
            self.app.init(&mut self.context);
            self.initialized = true;
            log::info!("shell initialized");
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                if self.context.input.is_some() {
                    self.app.shutdown(&mut self.context);
                    self.context.input_mut().shutdown();
                }
                event_loop.exit();
            }

            // Everything below needs the input system.
            _ if self.context.input.is_none() => {}

            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    self.context.window_size = new_size;
                    self.app
                        .on_resize(&mut self.context, new_size.width, new_size.height);
                }
            }

            WindowEvent::Focused(focused) => {
                self.context.focused = focused;
                if !focused {
                    // Releases delivered to another window never reach us.
                    self.context.input_mut().reset();
                }
                self.app.on_focus(&mut self.context, focused);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state.is_pressed();
                    self.context
                        .input_mut()
                        .on_key_event(Key::from_key_code(code), pressed);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    let position = self.cursor.get();
                    self.context
                        .input_mut()
                        .on_mouse_button_event(button, state.is_pressed(), position);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor.set(position);
                self.context.input_mut().on_mouse_move_event(position);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.context.input_mut().on_wheel_event(wheel_notches(delta));
            }

            WindowEvent::RedrawRequested => {
                // Advance the tracker before the app runs so this frame's
                // edge queries are valid.
                self.context.input_mut().update();

                self.app.frame(&mut self.context);

                if self.context.should_close() {
                    self.app.shutdown(&mut self.context);
                    self.context.input_mut().shutdown();
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! A cross-platform windowing and input abstraction layer
//!
//! This crate provides:
//! - Double-buffered input state tracking with edge-triggered queries
//! - An action binding layer for rebindable controls
//! - A winit-backed window shell that owns the event loop

pub mod input;
pub mod window;

// Re-exports for convenience
pub use glam;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::input::{
        Binding, Input, InputError, InputMapper, Key, MouseButton, MouseState, PlatformSource,
    };
    pub use crate::window::{App, Shell, ShellContext, ShellError, WindowConfig};
    pub use glam::Vec2;
}

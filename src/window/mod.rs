//! Window module
//!
//! Window configuration and the winit-backed shell that owns the event loop
//! and drives the input system.

mod config;
mod shell;

pub use config::{ConfigError, WindowConfig};
pub use shell::{App, Shell, ShellContext, ShellError, WinitPlatform};

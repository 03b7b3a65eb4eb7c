//! Input handling module
//!
//! Raw input state tracking (double-buffered key/button snapshots, mouse
//! delta and wheel accumulation), the platform capability interface that
//! feeds it, and an action binding layer on top.

mod key;
mod mapper;
mod platform;
mod state;

pub use key::{Key, MouseButton};
pub use mapper::{Binding, InputMapper};
pub use platform::PlatformSource;
pub use state::{
    Input, InputError, KeyCallback, MouseButtonCallback, MouseMoveCallback, MouseState,
    WheelCallback,
};

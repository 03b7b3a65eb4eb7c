//! Demo application exercising the window shell and input system

use aperture::prelude::*;

/// Logical actions for the demo controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DemoAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    Quit,
}

/// Demo app logging input activity
struct DemoApp {
    mapper: InputMapper<DemoAction>,
    jumps: u32,
}

impl DemoApp {
    fn new() -> Self {
        let mut mapper = InputMapper::new();

        // Movement (WASD + arrow alternatives)
        mapper.bind(Key::W, DemoAction::MoveForward);
        mapper.bind(Key::S, DemoAction::MoveBackward);
        mapper.bind(Key::A, DemoAction::MoveLeft);
        mapper.bind(Key::D, DemoAction::MoveRight);
        mapper.bind(Key::Up, DemoAction::MoveForward);
        mapper.bind(Key::Down, DemoAction::MoveBackward);
        mapper.bind(Key::Left, DemoAction::MoveLeft);
        mapper.bind(Key::Right, DemoAction::MoveRight);

        mapper.bind(Key::Space, DemoAction::Jump);
        mapper.bind(Key::Escape, DemoAction::Quit);

        Self { mapper, jumps: 0 }
    }
}

impl App for DemoApp {
    fn init(&mut self, ctx: &mut ShellContext) {
        log::info!("controls: WASD/arrows to move, Space to jump, Escape to quit");

        ctx.input_mut().set_key_callback(|key, pressed| {
            if pressed {
                log::info!("key pressed: {key:?}");
            }
        });

        ctx.input_mut()
            .set_mouse_button_callback(|button, pressed, position| {
                log::info!(
                    "{button:?} mouse button {} at ({:.0}, {:.0})",
                    if pressed { "pressed" } else { "released" },
                    position.x,
                    position.y
                );
            });
    }

    fn frame(&mut self, ctx: &mut ShellContext) {
        let input = ctx.input();

        if self.mapper.action_down(DemoAction::MoveForward, input) {
            log::debug!("moving forward");
        }
        if self.mapper.action_down(DemoAction::MoveBackward, input) {
            log::debug!("moving backward");
        }
        if self.mapper.action_down(DemoAction::MoveLeft, input) {
            log::debug!("moving left");
        }
        if self.mapper.action_down(DemoAction::MoveRight, input) {
            log::debug!("moving right");
        }

        if self.mapper.action_pressed(DemoAction::Jump, input) {
            self.jumps += 1;
            log::info!("jump #{}", self.jumps);
        }

        let wheel = input.wheel_delta();
        if wheel != 0.0 {
            log::info!("wheel: {wheel:+.1}");
        }

        let delta = input.mouse_delta();
        if input.is_mouse_button_down(MouseButton::Right) && delta != Vec2::ZERO {
            log::debug!("dragging: delta ({:.0}, {:.0})", delta.x, delta.y);
        }

        let quit = self.mapper.action_pressed(DemoAction::Quit, input);
        if quit {
            ctx.request_close();
        }
    }

    fn on_resize(&mut self, _ctx: &mut ShellContext, width: u32, height: u32) {
        log::info!("window resized to {width}x{height}");
    }

    fn on_focus(&mut self, _ctx: &mut ShellContext, focused: bool) {
        log::info!("focus {}", if focused { "gained" } else { "lost" });
    }

    fn shutdown(&mut self, _ctx: &mut ShellContext) {
        log::info!("demo shutting down after {} jumps", self.jumps);
    }
}

fn main() {
    let config = WindowConfig::default()
        .with_title("Aperture Demo")
        .with_size(1024, 768);

    let app = DemoApp::new();
    if let Err(e) = Shell::new(config, app).run() {
        eprintln!("Shell error: {e}");
    }
}

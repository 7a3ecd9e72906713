use anyhow::Result;
use log::info;
use pad_roster::input::{ControllerManager, DesktopBackend, PlayerId};
use pad_roster::{Axis, Button, GameSession, SessionSettings};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Log who is playing and with what
fn log_roster(session: &GameSession<DesktopBackend>) {
    let controllers = session.controllers();
    info!("{} player(s) on {}", controllers.num_players(), controllers);
    for player in PlayerId::ALL {
        if let Some(controller) = controllers.controller(player) {
            info!(
                "  {}: {} ({:?})",
                player,
                controller,
                controllers.player_control_type(player)
            );
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting pad-roster lobby...");

    let backend = DesktopBackend::new()?;
    let mut session = GameSession::new(ControllerManager::new(backend), SessionSettings::default());

    // Create event loop and window (keyboard input needs focus)
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("pad-roster lobby")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .build(&event_loop)?;

    // Gamepads don't wake the event loop, so keep polling
    event_loop.set_control_flow(ControlFlow::Poll);

    info!("Start/Enter joins, Back/Backspace leaves, Y/R adds a CPU, F2 starts over");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                session.controllers_mut().backend_mut().release_keyboard();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::F2)
                    && event.state == ElementState::Pressed
                    && !event.repeat
                {
                    session.new_game();
                    log_roster(&session);
                }
                session
                    .controllers_mut()
                    .backend_mut()
                    .process_keyboard_event(&event);
            }
            Event::AboutToWait => {
                let events = session.begin_frame();
                if events.changed() {
                    log_roster(&session);
                }

                let controllers = session.controllers();
                for player in PlayerId::ALL {
                    if controllers.get_button_down(Button::A, player) {
                        let x = controllers.get_axis(Axis::LeftStickX, player, false);
                        let y = controllers.get_axis(Axis::LeftStickY, player, false);
                        info!("{}: A pressed, stick at ({:.2}, {:.2})", player, x, y);
                    }
                }

                session.end_frame();
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

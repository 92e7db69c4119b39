use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use crate::state::State;
use crate::RunOptions;

/// Open the window and drive one frame per display refresh until closed.
///
/// # Errors
///
/// Fails if the window, GPU device or shader cannot be set up.
pub fn run(options: &RunOptions) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Orbit")
            .with_inner_size(LogicalSize::new(options.width, options.height))
            .build(&event_loop)
            .context("failed to create window")?,
    );

    let mut state = pollster::block_on(State::new(window.clone(), options))?;
    info!("Starting render loop");

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == state.window().id() => {
                if !state.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            state.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            match state.render() {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost) => state.surface_lost(),
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    error!("Out of GPU memory, exiting");
                                    elwt.exit();
                                }
                                // Outdated and Timeout resolve on a later frame
                                Err(e) => warn!("Skipped frame: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                state.reload_shader_if_changed();
                state.window().request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}

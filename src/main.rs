// src/main.rs

pub mod app;
pub mod cli;
pub mod input;
pub mod rendering_lib;
pub mod ui;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::SketchApp;
use cli::Cli;
use edge_split_sketch::{Result, SketchConfig};

pub async fn run(sketch: SketchConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Polygon Splitting")
            .with_inner_size(winit::dpi::LogicalSize::new(sketch.width, sketch.height))
            .build(&event_loop)?,
    );

    let mut app_state = SketchApp::new(window.clone(), &sketch).await?;
    let frame_interval = sketch.frame_interval()?;
    let mut last_frame = Instant::now();

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    WindowEvent::Resized(physical_size) => {
                        app_state.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        app_state.update((now - last_frame).as_secs_f32());
                        last_frame = now;

                        match app_state.render(&sketch, &window) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                log::warn!("Surface lost or outdated, reconfiguring");
                                app_state.resize(app_state.get_size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("WGPU Out Of Memory! Exiting.");
                                target.exit();
                            }
                            Err(e) => log::warn!("Surface error: {:?}", e),
                        }
                    }
                    _ => {
                        app_state.handle_window_event(event, &window);
                    }
                }
            }
            Event::AboutToWait => {
                let next_frame = last_frame + frame_interval;
                if Instant::now() >= next_frame {
                    if !target.exiting() {
                        window.request_redraw();
                    }
                } else {
                    target.set_control_flow(ControlFlow::WaitUntil(next_frame));
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sketch = Cli::parse().into_config()?;
    log::info!(
        "Starting sketch: {}x{}, {} recursions, {} triangles per frame",
        sketch.width,
        sketch.height,
        sketch.recursions,
        sketch.triangles_per_frame()
    );

    run(sketch).await?;
    Ok(())
}

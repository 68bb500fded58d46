use std::sync::Arc;

use glam::Vec2;
use viewer_core::constants::MAX_PIXEL_RATIO;
use viewer_core::{
    AnimationDriver, ControlEvent, ControlId, DriverState, GpuRenderer, MemoryWidgets,
    UpdateSource, Viewer, Viewport,
};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::Key;
use winit::window::{Window, WindowBuilder};

const WHEEL_LINE_HEIGHT_PX: f32 = 16.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

fn viewport_of(window: &Window, size: PhysicalSize<u32>) -> Viewport {
    let scale = window.scale_factor();
    let logical = size.to_logical::<f64>(scale);
    Viewport::new(logical.width as u32, logical.height as u32, scale)
}

/// Edit a selector the way a user would, then dispatch its change.
fn select(viewer: &mut Viewer<MemoryWidgets>, id: ControlId, tag: &str) {
    viewer.widgets_mut().edit(id, tag);
    viewer.dispatch(ControlEvent::Change(id), UpdateSource::UserInput);
}

fn handle_key(viewer: &mut Viewer<MemoryWidgets>, key: &str) {
    let params = &viewer.session().params;
    match key {
        "c" | "C" => {
            let next = params.camera_kind().toggled();
            select(viewer, ControlId::CameraSelect, next.as_tag());
        }
        "m" | "M" => {
            let next = params.material_kind().next();
            select(viewer, ControlId::MaterialSelect, next.as_tag());
        }
        "l" | "L" => {
            let next = params.light_kind().next();
            select(viewer, ControlId::LightSelect, next.as_tag());
        }
        _ => {}
    }
}

/// Log and discard the programmatic widget writes since the last call.
fn drain_widget_writes(viewer: &mut Viewer<MemoryWidgets>) -> usize {
    let writes = viewer.widgets_mut().take_writes();
    for (id, value) in &writes {
        log::debug!("{} <- {}", id.element_id(), value);
    }
    writes.len()
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Dodecahedron viewer (native)")
            .build(&event_loop)?,
    );

    let viewport = viewport_of(&window, window.inner_size());
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let mut renderer = pollster::block_on(GpuRenderer::new(
        &instance,
        surface,
        viewport.width,
        viewport.height,
        viewport.pixel_ratio.min(MAX_PIXEL_RATIO),
    ))?;

    let mut viewer = Viewer::new(MemoryWidgets::full(), viewport);
    viewer.init_controls();
    viewer.resize(viewport, Some(&mut renderer));
    let mut driver = AnimationDriver::new();

    log::info!("keys: c camera, m material, l light; drag to orbit, wheel to zoom");

    let mut drag: Option<Drag> = None;
    let mut shift = false;
    let mut cursor: Option<Vec2> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    viewer.resize(viewport_of(&window, size), Some(&mut renderer));
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => shift = modifiers.state().shift_key(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(c),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => handle_key(&mut viewer, c.as_str()),
            WindowEvent::MouseInput { state, button, .. } => {
                drag = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) if shift => Some(Drag::Pan),
                    (ElementState::Pressed, MouseButton::Left) => Some(Drag::Rotate),
                    (ElementState::Pressed, MouseButton::Right) => Some(Drag::Pan),
                    (ElementState::Released, _) => None,
                    _ => drag,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                let at = Vec2::new(logical.x, logical.y);
                let last = cursor.replace(at);
                if let (Some(kind), Some(last)) = (drag, last) {
                    let delta = at - last;
                    let session = viewer.session_mut();
                    let height = session.viewport.height as f32;
                    match kind {
                        Drag::Rotate => session.orbit.rotate(delta.x, delta.y, height),
                        Drag::Pan => {
                            session
                                .orbit
                                .pan(delta.x, delta.y, height, session.cameras.active())
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive; the viewer expects DOM sign
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_HEIGHT_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                viewer.dispatch(ControlEvent::Wheel { delta_y }, UpdateSource::UserInput);
            }
            _ => {}
        },
        Event::AboutToWait => {
            // input keeps writing widgets after the driver stops
            drain_widget_writes(&mut viewer);
            if !driver.is_running() {
                return;
            }
            if driver.tick(&mut viewer, &mut renderer) == DriverState::Stopped {
                log::info!("animation stopped; window stays open");
                return;
            }
            window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}

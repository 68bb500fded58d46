#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use viewer_core::constants::MAX_PIXEL_RATIO;
use viewer_core::{AnimationDriver, GpuRenderer, Viewer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;

use dom::DomWidgets;
use frame::App;

const CANVAS_ID: &str = "canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::viewport(&window);
    dom::sync_canvas_backing_size(&canvas, &viewport);

    let instance = wgpu::Instance::default();
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| anyhow::anyhow!(format!("create_surface error: {:?}", e)))?;
    let renderer = GpuRenderer::new(
        &instance,
        surface,
        viewport.width,
        viewport.height,
        input::capped_pixel_ratio(viewport.pixel_ratio, MAX_PIXEL_RATIO),
    )
    .await?;

    let mut viewer = Viewer::new(DomWidgets::new(document.clone()), viewport);
    let has_controls = viewer.has_controls();
    if has_controls {
        viewer.init_controls();
    } else {
        log::warn!("no #controls panel; running without widgets");
    }

    let app = Rc::new(RefCell::new(App {
        viewer,
        renderer,
        driver: AnimationDriver::new(),
        canvas: canvas.clone(),
    }));
    app.borrow_mut().resize(viewport);

    if has_controls {
        events::wire_controls(&document, &app);
    }
    events::wire_wheel(&canvas, &app);
    events::wire_resize(&window, &app);
    events::wire_orbit(&canvas, &app);

    frame::start_loop(app);
    Ok(())
}

use std::cell::RefCell;
use std::rc::Rc;

use viewer_core::{AnimationDriver, DriverState, GpuRenderer, Viewer, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, DomWidgets};

/// Everything the browser callbacks share.
pub struct App {
    pub viewer: Viewer<DomWidgets>,
    pub renderer: GpuRenderer<'static>,
    pub driver: AnimationDriver,
    pub canvas: web::HtmlCanvasElement,
}

impl App {
    pub fn frame(&mut self) -> DriverState {
        self.driver.tick(&mut self.viewer, &mut self.renderer)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        dom::sync_canvas_backing_size(&self.canvas, &viewport);
        self.viewer.resize(viewport, Some(&mut self.renderer));
    }
}

pub type SharedApp = Rc<RefCell<App>>;

/// requestAnimationFrame loop. Stops rescheduling once the driver stops.
pub fn start_loop(app: SharedApp) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let state = match app.try_borrow_mut() {
            Ok(mut app) => app.frame(),
            // an event handler owns the app this frame; try again next one
            Err(_) => DriverState::Running,
        };
        if state == DriverState::Stopped {
            log::info!("animation loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

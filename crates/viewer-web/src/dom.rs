use viewer_core::constants::MAX_PIXEL_RATIO;
use viewer_core::{ControlId, Panel, Viewport, Widgets};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input;

/// Current window size and device pixel ratio (uncapped).
pub fn viewport(window: &web::Window) -> Viewport {
    let inner = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    let (width, height) = input::logical_size(inner(window.inner_width()), inner(window.inner_height()));
    Viewport::new(width, height, window.device_pixel_ratio())
}

/// Match the canvas drawing buffer to the renderer's physical size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let ratio = input::capped_pixel_ratio(viewport.pixel_ratio, MAX_PIXEL_RATIO);
    let (w_px, h_px) = viewer_core::render::physical_size(viewport.width, viewport.height, ratio);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
}

/// DOM-backed widget surface. Elements are looked up by id on every call so
/// controls added or removed after startup are handled the same way.
pub struct DomWidgets {
    document: web::Document,
}

impl DomWidgets {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<web::Element> {
        self.document.get_element_by_id(id)
    }
}

impl Widgets for DomWidgets {
    fn exists(&self, id: ControlId) -> bool {
        self.element(id.element_id()).is_some()
    }

    fn value(&self, id: ControlId) -> Option<String> {
        let el = self.element(id.element_id())?;
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            return Some(input.value());
        }
        el.dyn_ref::<web::HtmlSelectElement>().map(|s| s.value())
    }

    fn set_value(&mut self, id: ControlId, value: &str) -> bool {
        let Some(el) = self.element(id.element_id()) else {
            return false;
        };
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.set_value(value);
            return true;
        }
        match el.dyn_ref::<web::HtmlSelectElement>() {
            Some(select) => {
                select.set_value(value);
                true
            }
            None => false,
        }
    }

    fn set_readout(&mut self, id: ControlId, text: &str) -> bool {
        match id.readout_id().and_then(|rid| self.element(rid)) {
            Some(el) => {
                el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn panel_exists(&self, panel: Panel) -> bool {
        self.element(panel.element_id()).is_some()
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let Some(el) = self
            .element(panel.element_id())
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        else {
            return;
        };
        let display = if visible { panel.shown_display() } else { "none" };
        if let Err(e) = el.style().set_property("display", display) {
            log::warn!("could not set #{} display: {:?}", panel.element_id(), e);
        }
    }
}

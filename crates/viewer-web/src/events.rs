use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{ControlEvent, ControlId, UpdateSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::SharedApp;
use crate::input::{self, PointerDrag};

/// Attach input/change listeners to every control present in the document.
/// Missing elements are skipped.
pub fn wire_controls(document: &web::Document, app: &SharedApp) {
    let mut wired = 0usize;
    for id in ControlId::ALL {
        let Some(el) = document.get_element_by_id(id.element_id()) else {
            log::debug!("control #{} not found; not wired", id.element_id());
            continue;
        };
        let (event_name, event) = if id.is_select() {
            ("change", ControlEvent::Change(id))
        } else {
            ("input", ControlEvent::Input(id))
        };
        let app_c = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            // a borrow failure means we are inside our own write-back
            let Ok(mut app) = app_c.try_borrow_mut() else {
                return;
            };
            let source = app.viewer.guard().source_for_widget_event();
            app.viewer.dispatch(event, source);
        }) as Box<dyn FnMut(_)>);
        if el
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            wired += 1;
        }
        closure.forget();
    }
    log::info!("wired {} controls", wired);
}

/// Wheel zoom over the canvas. Registered non-passive so the page does not
/// scroll underneath; wheels over the control panel still scroll it.
pub fn wire_wheel(canvas: &web::HtmlCanvasElement, app: &SharedApp) {
    let app_c = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let page_height = web::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let delta = input::wheel_delta_pixels(ev.delta_y(), ev.delta_mode(), page_height);
        if delta == 0.0 {
            return;
        }
        if let Ok(mut app) = app_c.try_borrow_mut() {
            let source = app.viewer.guard().source_for_widget_event();
            app.viewer
                .dispatch(ControlEvent::Wheel { delta_y: delta }, source);
        }
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    if let Err(e) = canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("wheel listener not attached: {:?}", e);
    }
    closure.forget();
}

pub fn wire_resize(window: &web::Window, app: &SharedApp) {
    let app_c = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        let viewport = dom::viewport(&w);
        match app_c.try_borrow_mut() {
            Ok(mut app) => app.resize(viewport),
            Err(_) => log::warn!("resize dropped; app busy"),
        }
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Pointer orbit on the canvas: primary drag rotates, secondary or
/// shift drag pans.
pub fn wire_orbit(canvas: &web::HtmlCanvasElement, app: &SharedApp) {
    let drag = Rc::new(RefCell::new(PointerDrag::default()));

    // pointerdown
    {
        let drag_m = drag.clone();
        let canvas_target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Some(kind) = input::drag_kind_for_button(ev.button(), ev.shift_key()) else {
                return;
            };
            let at = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            drag_m.borrow_mut().begin(kind, ev.pointer_id(), at);
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag_m = drag.clone();
        let app_c = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let at = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let Some((kind, delta)) = drag_m.borrow_mut().motion(ev.pointer_id(), at) else {
                return;
            };
            let Ok(mut app) = app_c.try_borrow_mut() else {
                return;
            };
            let height = app.viewer.session().viewport.height as f32;
            let session = app.viewer.session_mut();
            match kind {
                input::DragKind::Rotate => session.orbit.rotate(delta.x, delta.y, height),
                input::DragKind::Pan => {
                    session
                        .orbit
                        .pan(delta.x, delta.y, height, session.cameras.active())
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    for name in ["pointerup", "pointercancel"] {
        let drag_m = drag.clone();
        let canvas_target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag_m.borrow_mut().end(ev.pointer_id());
            let _ = canvas_target.release_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // keep right-drag panning from opening the context menu
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

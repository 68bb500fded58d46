use glam::Vec2;

/// `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

pub const WHEEL_LINE_HEIGHT_PX: f64 = 16.0;

/// Wheel delta in pixels, whatever unit the browser reported it in.
#[inline]
pub fn wheel_delta_pixels(delta_y: f64, delta_mode: u32, page_height_px: f64) -> f32 {
    let px = match delta_mode {
        DOM_DELTA_LINE => delta_y * WHEEL_LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta_y * page_height_px.max(1.0),
        _ => delta_y,
    };
    if px.is_finite() {
        px as f32
    } else {
        0.0
    }
}

/// Device pixel ratio handed to the renderer, capped at `max`.
#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(max)
    } else {
        1.0
    }
}

/// Window inner size in whole CSS pixels.
#[inline]
pub fn logical_size(inner_width: f64, inner_height: f64) -> (u32, u32) {
    let px = |v: f64| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
    (px(inner_width), px(inner_height))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Rotate,
    Pan,
}

/// Primary button rotates (shift-drag pans), secondary button pans.
#[inline]
pub fn drag_kind_for_button(button: i16, shift: bool) -> Option<DragKind> {
    match (button, shift) {
        (0, false) => Some(DragKind::Rotate),
        (0, true) | (2, _) => Some(DragKind::Pan),
        _ => None,
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct PointerDrag {
    pub kind: Option<DragKind>,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl PointerDrag {
    pub fn begin(&mut self, kind: DragKind, pointer_id: i32, at: Vec2) {
        self.kind = Some(kind);
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous call for the dragging pointer.
    pub fn motion(&mut self, pointer_id: i32, at: Vec2) -> Option<(DragKind, Vec2)> {
        let kind = self.kind?;
        if pointer_id != self.pointer_id {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some((kind, delta))
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.kind = None;
        }
    }
}

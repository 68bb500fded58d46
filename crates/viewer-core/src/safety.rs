//! Camera depth clamps.
//!
//! A perspective camera whose depth lies in the open dead zone
//! `(-MIN_PERSPECTIVE_DEPTH, MIN_PERSPECTIVE_DEPTH)` is snapped to the
//! nearest edge (`+edge` at zero). Orthographic cameras are never clamped.

use crate::constants::{MIN_PERSPECTIVE_DEPTH, ZOOM_DEPTH_MAX, ZOOM_DEPTH_MIN};
use crate::params::CameraKind;

/// Apply the perspective dead-zone rule to a candidate depth.
#[inline]
pub fn clamp_depth(z: f32, kind: CameraKind) -> f32 {
    if kind != CameraKind::Perspective {
        return z;
    }
    if z > -MIN_PERSPECTIVE_DEPTH && z < MIN_PERSPECTIVE_DEPTH {
        if z < 0.0 {
            -MIN_PERSPECTIVE_DEPTH
        } else {
            MIN_PERSPECTIVE_DEPTH
        }
    } else {
        z
    }
}

/// Depth after a zoom step: bounded to `[ZOOM_DEPTH_MIN, ZOOM_DEPTH_MAX]`,
/// then passed through [`clamp_depth`].
#[inline]
pub fn zoom_depth(current: f32, delta: f32, kind: CameraKind) -> f32 {
    let z = (current + delta).clamp(ZOOM_DEPTH_MIN, ZOOM_DEPTH_MAX);
    clamp_depth(z, kind)
}

/// True when `clamp_depth` would change the value.
#[inline]
pub fn needs_clamp(z: f32, kind: CameraKind) -> bool {
    clamp_depth(z, kind) != z
}

//! Responsive layout: the control panel only fits on wide viewports.

use crate::constants::CONTROLS_BREAKPOINT_PX;

/// Controls are shown above the breakpoint; at or below it the small-screen
/// message replaces them.
#[inline]
pub fn controls_visible(width: u32) -> bool {
    width > CONTROLS_BREAKPOINT_PX
}

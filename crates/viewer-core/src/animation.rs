//! Per-frame animation driver.
//!
//! Each tick advances the mesh rotations from the stored speeds, lets the
//! orbit control settle (syncing the camera sliders when it moved) and draws
//! one frame. The first failure is logged and the driver stops for good.

use crate::binding::{ControlEvent, UpdateSource, Viewer};
use crate::controls::Widgets;
use crate::render::FrameRenderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    frames: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Running,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Frames drawn successfully so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick<W: Widgets>(
        &mut self,
        viewer: &mut Viewer<W>,
        renderer: &mut dyn FrameRenderer,
    ) -> DriverState {
        if self.state == DriverState::Stopped {
            return DriverState::Stopped;
        }
        match advance_frame(viewer, renderer) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                log::error!("animation stopped after {} frames: {:#}", self.frames, e);
                self.state = DriverState::Stopped;
            }
        }
        self.state
    }
}

fn advance_frame<W: Widgets>(
    viewer: &mut Viewer<W>,
    renderer: &mut dyn FrameRenderer,
) -> anyhow::Result<()> {
    let session = viewer.session_mut();
    session.advance_rotations()?;
    let moved = session.orbit.update(session.cameras.active_mut());
    if moved {
        viewer.dispatch(ControlEvent::CameraMoved, UpdateSource::AnimationTick);
    }
    let session = viewer.session();
    renderer.render(&session.scene, session.cameras.active())
}

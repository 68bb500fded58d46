pub mod animation;
pub mod binding;
pub mod camera;
pub mod color;
pub mod constants;
pub mod controls;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod layout;
pub mod orbit;
pub mod params;
pub mod render;
pub mod safety;
pub mod scene;
pub mod session;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animation::{AnimationDriver, DriverState};
pub use binding::{ControlEvent, Dispatch, ReentrancyGuard, UpdateSource, Viewer};
pub use camera::{CameraRig, SceneCamera, Viewport};
pub use color::Rgb;
pub use constants::ViewerDefaults;
pub use controls::{ControlId, MemoryWidgets, Panel, Widgets};
pub use error::ViewerError;
pub use params::{CameraKind, LightKind, MaterialKind, ParameterSet};
pub use render::FrameRenderer;
#[cfg(feature = "gpu")]
pub use render::gpu::GpuRenderer;

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Animation-driven glTF showroom.
//!
//! A loaded model comes with baked clips: one of them moves the camera, the
//! others move the model. The [`AnimationDirector`] loops the camera clip and
//! re-cues the single-shot model clips every time it wraps. The
//! [`BlinkEngine`] pulses the color of named parts during fixed frame windows
//! of the same animation clock. [`Session`] ties both to a frame loop and a
//! rendering engine behind [`RenderStep`].

pub mod animation;
pub mod assets;
pub mod config;
pub mod effects;
pub mod errors;
pub mod scene;
pub mod session;
pub mod utils;

pub use animation::{
    AnimationClip, AnimationDirector, CameraLoopMode, ClipPartition, Track, classify,
};
pub use assets::{LoadedAsset, PendingLoad};
pub use config::{StageConfig, ViewerConfig};
pub use effects::{BlinkConfig, BlinkEngine, RestingColorPolicy};
pub use errors::{Result, ShowroomError};
pub use scene::{Camera, Material, Node, NodeHandle, Scene, SceneGraph};
pub use session::{ActiveCamera, FrameReport, RenderStep, Session, Viewport};

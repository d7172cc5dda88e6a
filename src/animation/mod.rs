pub mod action;
pub mod clip;
pub mod director;
pub mod mixer;

pub use action::{ActionEvent, AnimationAction, LoopMode};
pub use clip::{AnimationClip, Track};
pub use director::{AnimationDirector, CameraLoopMode, ClipPartition, classify};
pub use mixer::{ActionId, AnimationMixer, MixerEvent};

//! Animation Director
//!
//! Splits the loaded clips into one camera clip and any number of model clips,
//! then keeps the single-shot model clips in lockstep with the camera clip:
//! every time the camera clip wraps around, all model actions are rewound and
//! played again.
//!
//! ```text
//! camera  |=========|=========|=========|   Repeat
//! models  |=====    |=====    |=====    |   Once, re-cued at each wrap
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animation::action::{ActionEvent, LoopMode};
use crate::animation::clip::AnimationClip;
use crate::animation::mixer::{ActionId, AnimationMixer};

/// How the camera clip is played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraLoopMode {
    /// Loop forever; model clips are re-cued on every wrap.
    #[default]
    Loop,
    /// Play once and hold the final camera pose. No re-sync ever happens.
    Once,
}

/// Result of [`classify`].
#[derive(Debug, Clone, Default)]
pub struct ClipPartition {
    pub camera: Option<Arc<AnimationClip>>,
    pub models: Vec<Arc<AnimationClip>>,
}

/// Picks the camera clip out of `clips`.
///
/// The first clip (in load order) with a camera track becomes the camera clip.
/// Any later camera-looking clip is treated as a model clip. Model clips keep
/// their original order.
pub fn classify<I>(clips: I) -> ClipPartition
where
    I: IntoIterator<Item = Arc<AnimationClip>>,
{
    let mut partition = ClipPartition::default();

    for clip in clips {
        if partition.camera.is_none() && clip.is_camera_clip() {
            partition.camera = Some(clip);
            continue;
        }
        if clip.is_camera_clip() {
            log::warn!(
                "Clip '{}' also animates a camera; playing it as a model clip",
                clip.name
            );
        }
        partition.models.push(clip);
    }

    partition
}

/// Playback state for one loaded scene.
#[derive(Debug)]
pub struct AnimationDirector {
    mixer: AnimationMixer,
    camera_action: Option<ActionId>,
    model_actions: SmallVec<[ActionId; 8]>,
    mode: CameraLoopMode,
    resync_count: u64,
}

impl AnimationDirector {
    /// Binds one action per clip and starts all of them immediately.
    #[must_use]
    pub fn start(partition: ClipPartition, mode: CameraLoopMode) -> Self {
        let mut mixer = AnimationMixer::new();

        let camera_action = partition.camera.map(|clip| {
            let id = mixer.clip_action(clip);
            if let Some(action) = mixer.action_mut(id) {
                let (loop_mode, clamp) = match mode {
                    CameraLoopMode::Loop => (LoopMode::Repeat, false),
                    CameraLoopMode::Once => (LoopMode::Once, true),
                };
                action.loop_mode = loop_mode;
                action.clamp_when_finished = clamp;
                action.play();
            }
            id
        });

        let model_actions = partition
            .models
            .into_iter()
            .map(|clip| {
                let id = mixer.clip_action(clip);
                if let Some(action) = mixer.action_mut(id) {
                    action.loop_mode = LoopMode::Once;
                    action.clamp_when_finished = false;
                    action.play();
                }
                id
            })
            .collect();

        Self {
            mixer,
            camera_action,
            model_actions,
            mode,
            resync_count: 0,
        }
    }

    /// Advances every action by `dt`.
    ///
    /// Returns `true` when the camera clip wrapped during this tick, in which
    /// case the model actions have already been re-cued.
    pub fn tick(&mut self, dt: f32) -> bool {
        let events = self.mixer.update(dt);

        let mut camera_looped = false;
        for event in &events {
            match event.kind {
                ActionEvent::Looped if Some(event.action) == self.camera_action => {
                    camera_looped = true;
                }
                ActionEvent::Finished => {
                    log::trace!("Action {:?} finished", event.action);
                }
                ActionEvent::Looped => {}
            }
        }

        if camera_looped && self.mode == CameraLoopMode::Loop {
            self.on_camera_loop_boundary();
        }
        camera_looped
    }

    /// Rewinds every model action and plays it once more.
    ///
    /// Firing this twice without an intervening tick leaves the same state as
    /// firing it once.
    pub fn on_camera_loop_boundary(&mut self) {
        for &id in &self.model_actions {
            if let Some(action) = self.mixer.action_mut(id) {
                action.reset();
                action.play();
            }
        }
        self.resync_count += 1;
        log::debug!(
            "Camera clip looped; re-cued {} model action(s)",
            self.model_actions.len()
        );
    }

    /// Whether a camera clip drives the viewpoint.
    #[must_use]
    pub fn is_camera_driven(&self) -> bool {
        self.camera_action.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> CameraLoopMode {
        self.mode
    }

    /// Accumulated mixer time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.mixer.time()
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn camera_action(&self) -> Option<ActionId> {
        self.camera_action
    }

    #[must_use]
    pub fn model_actions(&self) -> &[ActionId] {
        &self.model_actions
    }

    /// Number of re-syncs performed so far.
    #[must_use]
    pub fn resync_count(&self) -> u64 {
        self.resync_count
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Once,
    Repeat,
}

/// What happened to an action during one [`AnimationAction::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// A `Repeat` action crossed its duration and wrapped back to the start.
    Looped,
    /// A `Once` action reached its end and stopped.
    Finished,
}

/// Runtime playback instance bound to one clip.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    /// Hold the last pose after a `Once` action finishes. Without it the action
    /// is disabled on finish and stops contributing.
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            paused: true,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_loop(mut self, loop_mode: LoopMode, clamp_when_finished: bool) -> Self {
        self.loop_mode = loop_mode;
        self.clamp_when_finished = clamp_when_finished;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Starts (or resumes) playback.
    pub fn play(&mut self) {
        self.enabled = true;
        self.paused = false;
    }

    /// Rewinds to the start without changing the play state.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.enabled = true;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.enabled && !self.paused
    }

    /// Advances local time by `dt` and reports a loop or finish, if any.
    ///
    /// A `Repeat` action reports at most one [`ActionEvent::Looped`] per call,
    /// even when `dt` spans several cycles.
    pub fn update(&mut self, dt: f32) -> Option<ActionEvent> {
        if !self.is_running() {
            return None;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return None;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                    if !self.clamp_when_finished {
                        self.enabled = false;
                    }
                    Some(ActionEvent::Finished)
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                    Some(ActionEvent::Finished)
                } else {
                    None
                }
            }
            LoopMode::Repeat => {
                if self.time >= duration {
                    self.time %= duration;
                    Some(ActionEvent::Looped)
                } else if self.time < 0.0 {
                    self.time = duration + (self.time % duration);
                    Some(ActionEvent::Looped)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clip::Track;

    fn clip(duration: f32) -> Arc<AnimationClip> {
        Arc::new(AnimationClip::new(
            "clip",
            vec![Track::new("node.position", vec![0.0, duration])],
        ))
    }

    #[test]
    fn new_action_is_paused_until_played() {
        let mut action = AnimationAction::new(clip(1.0));
        assert_eq!(action.update(0.5), None);
        assert_eq!(action.time, 0.0);

        action.play();
        action.update(0.5);
        assert!((action.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn repeat_wraps_once_per_update() {
        let mut action = AnimationAction::new(clip(1.0)).with_loop(LoopMode::Repeat, false);
        action.play();
        assert_eq!(action.update(2.5), Some(ActionEvent::Looped));
        assert!((action.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn once_without_clamp_disables_on_finish() {
        let mut action = AnimationAction::new(clip(1.0)).with_loop(LoopMode::Once, false);
        action.play();
        assert_eq!(action.update(1.2), Some(ActionEvent::Finished));
        assert!(!action.enabled);
        assert_eq!(action.update(0.1), None);
    }

    #[test]
    fn once_with_clamp_holds_last_pose() {
        let mut action = AnimationAction::new(clip(1.0)).with_loop(LoopMode::Once, true);
        action.play();
        action.update(3.0);
        assert!(action.enabled);
        assert!(action.paused);
        assert_eq!(action.time, 1.0);
    }
}

use std::sync::Arc;

use smallvec::SmallVec;

use crate::animation::action::{ActionEvent, AnimationAction};
use crate::animation::clip::AnimationClip;

/// Index of an action inside its [`AnimationMixer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

/// An [`ActionEvent`] tagged with the action that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerEvent {
    pub action: ActionId,
    pub kind: ActionEvent,
}

/// Owns every playback action and the shared animation clock.
///
/// `time` only ever accumulates: it is the mixer elapsed time that both the
/// director and the blink effect derive their timing from. It is kept in f64
/// so that per-frame deltas still register after days of uptime.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    time: f64,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a new action to `clip`. The action starts paused.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> ActionId {
        self.actions.push(AnimationAction::new(clip));
        ActionId(self.actions.len() - 1)
    }

    #[must_use]
    pub fn action(&self, id: ActionId) -> Option<&AnimationAction> {
        self.actions.get(id.0)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut AnimationAction> {
        self.actions.get_mut(id.0)
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    /// Accumulated mixer time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advances the clock and every action by `dt`, in binding order.
    pub fn update(&mut self, dt: f32) -> SmallVec<[MixerEvent; 4]> {
        self.time += f64::from(dt);

        self.actions
            .iter_mut()
            .enumerate()
            .filter_map(|(index, action)| {
                action.update(dt).map(|kind| MixerEvent {
                    action: ActionId(index),
                    kind,
                })
            })
            .collect()
    }
}

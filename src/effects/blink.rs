//! Blink Effect Engine
//!
//! Pulses a named object's material color toward an alternate color during a
//! fixed frame window, three smooth half-sine bumps per window:
//!
//! ```text
//! intensity
//!   1 |    _         _         _
//!     |  /   \     /   \     /   \
//!   0 |_/     \___/     \___/     \____
//!      start                        end
//! ```
//!
//! Outside the window the object shows its resting color exactly. The color is
//! recomputed from the frame number alone, so the effect holds no state between
//! frames and can be replayed at any frame.

use std::f64::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{HasMeshCapability, SceneGraph};

/// Pulses per frame window.
pub const TOTAL_BLINKS: u32 = 3;

/// One blinking target, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Exact node name in the loaded scene.
    pub name: String,
    /// First frame of the window (inclusive).
    pub frame_start: i64,
    /// Last frame of the window (inclusive).
    pub frame_end: i64,
    /// Color reached at the peak of each pulse.
    pub color_alt: Vec3,
}

impl BlinkConfig {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        frame_start: i64,
        frame_end: i64,
        color_alt: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            frame_start,
            frame_end,
            color_alt,
        }
    }
}

/// Where the resting color of every target comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RestingColorPolicy {
    /// Clone of the target's authored material color, taken at load.
    #[default]
    Captured,
    /// A fixed color, independent of the authored material.
    Configured { color: Vec3 },
}

/// Pulse intensity at `frame`, or `None` when the resting color applies.
///
/// `None` covers frames outside `[frame_start, frame_end]`, non-positive
/// windows, and the trailing frame(s) past the last full pulse.
#[must_use]
pub fn blink_intensity(frame_start: i64, frame_end: i64, frame: i64) -> Option<f32> {
    if frame < frame_start || frame > frame_end {
        return None;
    }

    // i128 so that windows spanning most of the i64 range cannot overflow.
    let duration_frames = i128::from(frame_end) - i128::from(frame_start);
    if duration_frames <= 0 {
        return None;
    }

    let blink_duration = duration_frames as f64 / f64::from(TOTAL_BLINKS);
    let local_frame = (i128::from(frame) - i128::from(frame_start)) as f64;

    let blink_index = (local_frame / blink_duration).floor();
    if blink_index >= f64::from(TOTAL_BLINKS) {
        return None;
    }

    let phase = (local_frame % blink_duration) / blink_duration;
    Some((phase * PI).sin() as f32)
}

/// Color to display for `config` at `frame`.
#[must_use]
pub fn blink_color(config: &BlinkConfig, frame: i64, resting: Vec3) -> Vec3 {
    match blink_intensity(config.frame_start, config.frame_end, frame) {
        Some(intensity) => resting.lerp(config.color_alt, intensity),
        None => resting,
    }
}

/// Frame number on a fixed-rate timeline: `floor(elapsed * fps)`.
#[must_use]
pub fn frame_index(elapsed_seconds: f64, fps: f32) -> i64 {
    (elapsed_seconds * f64::from(fps)).floor() as i64
}

/// Resolution state of one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkTarget<H> {
    /// The scene has not loaded yet.
    Pending,
    /// Name lookup succeeded.
    Resolved { node: H, resting_color: Vec3 },
    /// Name lookup failed; the entry is skipped for the rest of the session.
    Unresolved,
}

#[derive(Debug, Clone)]
pub struct BlinkEntry<H> {
    pub config: BlinkConfig,
    pub target: BlinkTarget<H>,
}

/// All blink entries of a session.
#[derive(Debug, Clone)]
pub struct BlinkEngine<H> {
    entries: Vec<BlinkEntry<H>>,
}

impl<H: Copy + Eq + std::fmt::Debug> BlinkEngine<H> {
    /// Creates every entry in the [`BlinkTarget::Pending`] state.
    #[must_use]
    pub fn new(configs: Vec<BlinkConfig>) -> Self {
        let entries = configs
            .into_iter()
            .map(|config| BlinkEntry {
                config,
                target: BlinkTarget::Pending,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[BlinkEntry<H>] {
        &self.entries
    }

    /// Looks up every pending entry by name and captures its resting color.
    ///
    /// Entries that already went through resolution are left alone. Returns
    /// the number of entries resolved by this call.
    pub fn resolve<G>(&mut self, scene: &G, policy: RestingColorPolicy) -> usize
    where
        G: SceneGraph<Handle = H>,
    {
        let mut resolved = 0;

        for entry in &mut self.entries {
            if entry.target != BlinkTarget::Pending {
                continue;
            }

            let name = entry.config.name.as_str();
            let found = scene.find_by_name(name).and_then(|node| {
                let material = scene.node(node)?.material()?;
                let resting_color = match policy {
                    RestingColorPolicy::Captured => material.color,
                    RestingColorPolicy::Configured { color } => color,
                };
                Some(BlinkTarget::Resolved {
                    node,
                    resting_color,
                })
            });

            entry.target = if let Some(target) = found {
                resolved += 1;
                target
            } else {
                log::warn!("Blink target '{name}' not found or has no material; skipping it");
                BlinkTarget::Unresolved
            };
        }

        resolved
    }

    /// Writes the color of every resolved entry for `frame` into the scene.
    pub fn update<G>(&self, scene: &mut G, frame: i64)
    where
        G: SceneGraph<Handle = H>,
    {
        for entry in &self.entries {
            let BlinkTarget::Resolved {
                node,
                resting_color,
            } = entry.target
            else {
                continue;
            };

            let Some(material) = scene.node_mut(node).and_then(|n| n.material_mut()) else {
                continue;
            };

            material.color = blink_color(&entry.config, frame, resting_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_is_at_rest() {
        assert_eq!(blink_intensity(365, 430, 365), Some(0.0));
    }

    #[test]
    fn degenerate_windows_never_pulse() {
        assert_eq!(blink_intensity(10, 10, 10), None);
        assert_eq!(blink_intensity(20, 10, 15), None);
    }

    #[test]
    fn huge_windows_do_not_overflow() {
        let start = -5_000_000_000_000_000_000;
        let end = 5_000_000_000_000_000_000;

        let intensity = blink_intensity(start, end, 0).unwrap();
        assert!((intensity - 1.0).abs() < 1e-6, "got {intensity}");
        assert_eq!(blink_intensity(i64::MIN, i64::MAX, i64::MIN), Some(0.0));
        assert!(blink_intensity(i64::MIN, i64::MAX, 0).is_some());
    }

    #[test]
    fn frame_index_floors() {
        assert_eq!(frame_index(0.0, 24.0), 0);
        assert_eq!(frame_index(1.0, 24.0), 24);
        assert_eq!(frame_index(1.99, 24.0), 47);
    }
}

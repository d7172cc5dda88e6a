/// Substring (compared lower-case) that marks a track as driving a camera.
pub const CAMERA_TRACK_MARKER: &str = "camera";

/// One channel of a clip.
///
/// The name follows the `"<node>.<property>"` convention used by glTF
/// importers, e.g. `"Camera.001.position"` or `"llanta_derecha.quaternion"`.
/// Only the keyframe times are kept: sampling and applying values is the job
/// of the rendering engine that owns the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub times: Vec<f32>,
}

impl Track {
    #[must_use]
    pub fn new(name: impl Into<String>, times: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            times,
        }
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Whether this track animates a camera.
    #[must_use]
    pub fn targets_camera(&self) -> bool {
        self.name.to_lowercase().contains(CAMERA_TRACK_MARKER)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Builds a clip whose duration is the latest keyframe across all tracks.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(Track::end_time).fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// A clip drives the viewpoint if any of its tracks targets a camera.
    #[must_use]
    pub fn is_camera_clip(&self) -> bool {
        self.tracks.iter().any(Track::targets_camera)
    }
}

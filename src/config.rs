//! Viewer Configuration
//!
//! Every scene-specific constant of the showroom lives here: asset paths, the
//! animation frame rate, the camera clip playback mode, blink targets, the
//! lens of both cameras and the static stage around the model.
//! [`ViewerConfig::default`] reproduces the stock showroom scene; any field can
//! be overridden from a JSON file.
//!
//! ```json
//! {
//!   "model_path": "scene.glb",
//!   "camera_mode": "once",
//!   "resting_color": { "policy": "configured", "color": [0.1, 0.1, 0.1] },
//!   "blink_targets": [
//!     { "name": "llanta_derecha", "frame_start": 365, "frame_end": 430, "color_alt": [0.0, 0.2, 1.0] }
//!   ]
//! }
//! ```

use std::f32::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::CameraLoopMode;
use crate::effects::{BlinkConfig, RestingColorPolicy};
use crate::errors::{Result, ShowroomError};

/// Frame rate the baked animation was authored at.
pub const DEFAULT_FPS: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: PathBuf,

    /// Converts mixer seconds to blink frame numbers.
    pub fps: f32,
    pub camera_mode: CameraLoopMode,
    pub resting_color: RestingColorPolicy,
    pub blink_targets: Vec<BlinkConfig>,

    /// The interactive camera used when the scene has none of its own.
    pub default_camera: CameraConfig,
    /// Lens forced onto the scene-embedded camera at load.
    pub embedded_camera: LensConfig,
    pub orbit: OrbitConfig,
    pub model_dressing: ModelDressing,
    /// Handed to [`RenderStep::setup`](crate::session::RenderStep::setup) once.
    pub stage: StageConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let blue = Vec3::new(0.0, 0.2, 1.0);
        let blink_targets = [
            "llanta_derecha",
            "rin_derecho",
            "disco_derecho",
            "pastilla_derecha",
        ]
        .into_iter()
        .map(|name| BlinkConfig::new(name, 365, 430, blue))
        .collect();

        Self {
            model_path: PathBuf::from("scene.glb"),
            fps: DEFAULT_FPS,
            camera_mode: CameraLoopMode::Loop,
            resting_color: RestingColorPolicy::Captured,
            blink_targets,
            default_camera: CameraConfig::default(),
            embedded_camera: LensConfig::default(),
            orbit: OrbitConfig::default(),
            model_dressing: ModelDressing::default(),
            stage: StageConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ShowroomError::AssetNotFound(path.display().to_string())
            } else {
                ShowroomError::IoError(err)
            }
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects values no frame could be computed from.
    ///
    /// Empty or inverted blink windows are accepted: they simply never pulse.
    pub fn validate(&self) -> Result<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ShowroomError::InvalidConfig(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }

        if let Some(index) = self.blink_targets.iter().position(|t| t.name.is_empty()) {
            return Err(ShowroomError::InvalidConfig(format!(
                "blink target #{index} has an empty name"
            )));
        }

        for lens in [&self.default_camera.lens, &self.embedded_camera] {
            if lens.near <= 0.0 || lens.far <= lens.near {
                return Err(ShowroomError::InvalidConfig(format!(
                    "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                    lens.near, lens.far
                )));
            }
        }

        for (index, light) in self.stage.area_lights.iter().enumerate() {
            if light.width <= 0.0 || light.height <= 0.0 {
                return Err(ShowroomError::InvalidConfig(format!(
                    "area light #{index} must have a positive size, got {}x{}",
                    light.width, light.height
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub lens: LensConfig,
    pub position: Vec3,
    /// Orbit pivot.
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lens: LensConfig::default(),
            position: Vec3::new(0.0, 1.0, 7.0),
            target: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.03,
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            min_distance: 0.5,
            max_distance: 200.0,
        }
    }
}

/// Applied to every mesh of the loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDressing {
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub env_map_intensity: f32,
}

impl Default for ModelDressing {
    fn default() -> Self {
        Self {
            cast_shadow: true,
            receive_shadow: true,
            env_map_intensity: 0.3,
        }
    }
}

/// `0xRRGGBB` to linear `[0, 1]` components, without any color-space change.
fn hex_color(hex: u32) -> Vec3 {
    let [_, r, g, b] = hex.to_be_bytes();
    Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0
}

/// The static surroundings of the model: background, sky, area lights, floor
/// and post-processing. Set up once at startup, never animated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub background: Vec3,
    /// Equirectangular HDR image for image-based lighting.
    pub environment_path: Option<PathBuf>,
    pub sky: SkyConfig,
    pub area_lights: Vec<AreaLightConfig>,
    pub floor: FloorConfig,
    pub bloom: BloomConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        let ceiling_rotation = Vec3::new(-FRAC_PI_2, 0.0, FRAC_PI_2);

        Self {
            background: Vec3::ZERO,
            environment_path: Some(PathBuf::from("hdr.hdr")),
            sky: SkyConfig::default(),
            area_lights: vec![
                AreaLightConfig {
                    color: Vec3::ONE,
                    intensity: 17.0,
                    width: 11.0,
                    height: 3.0,
                    position: Vec3::new(4.0, 4.3, -1.0),
                    rotation: ceiling_rotation,
                },
                AreaLightConfig {
                    color: Vec3::ONE,
                    intensity: 17.0,
                    width: 11.0,
                    height: 3.0,
                    position: Vec3::new(-4.0, 4.3, -1.0),
                    rotation: ceiling_rotation,
                },
                // Backdrop screen.
                AreaLightConfig {
                    color: hex_color(0x78_a8_ff),
                    intensity: 3.0,
                    width: 17.0,
                    height: 4.4,
                    position: Vec3::new(0.0, 2.7, -6.7),
                    rotation: Vec3::new(0.0, -PI, 0.0),
                },
            ],
            floor: FloorConfig::default(),
            bloom: BloomConfig::default(),
        }
    }
}

/// Physical sky model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Uniform scale of the sky dome.
    pub scale: f32,
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    /// Degrees above the horizon.
    pub sun_elevation: f32,
    /// Degrees around the vertical axis.
    pub sun_azimuth: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            scale: 450_000.0,
            turbidity: 20.0,
            rayleigh: 1.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.9,
            sun_elevation: 50.0,
            sun_azimuth: -90.0,
        }
    }
}

impl SkyConfig {
    /// Unit vector pointing at the sun.
    #[must_use]
    pub fn sun_direction(&self) -> Vec3 {
        let phi = (90.0 - self.sun_elevation).to_radians();
        let theta = self.sun_azimuth.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}

/// One rectangular area light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaLightConfig {
    pub color: Vec3,
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
}

/// The ground plane under the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub width: f32,
    pub depth: f32,
    /// Height of the plane; the plane itself lies flat (rotated -90 deg on X).
    pub height: f32,
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub receive_shadow: bool,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            width: 80.0,
            depth: 70.0,
            height: -0.1,
            color: hex_color(0x18_18_18),
            roughness: 0.9,
            metalness: 0.7,
            env_map_intensity: 0.7,
            receive_shadow: false,
        }
    }
}

/// Bloom post-process. Configured but off by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub enabled: bool,
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 0.2,
            radius: 0.4,
            threshold: 0.0,
        }
    }
}

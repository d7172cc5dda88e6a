use glam::Vec3;

/// The slice of a surface material the viewer touches at runtime.
///
/// Colors are linear RGB in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub env_map_intensity: f32,
}

impl Material {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            env_map_intensity: 1.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

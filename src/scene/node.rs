use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::material::Material;
use crate::scene::{HasCameraCapability, HasMeshCapability};

/// A scene-graph node.
///
/// Only the components the viewer inspects are kept: an optional camera and an
/// optional mesh material. Geometry, transforms and everything else stay with
/// the rendering engine.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub camera: Option<Camera>,
    pub material: Option<Material>,

    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

impl HasCameraCapability for Node {
    fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }
}

impl HasMeshCapability for Node {
    fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    fn material_mut(&mut self) -> Option<&mut Material> {
        self.material.as_mut()
    }

    fn set_shadows(&mut self, cast: bool, receive: bool) {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
    }
}

//! Scene-graph adapter layer.
//!
//! The director and the blink effect never see a concrete engine type. They
//! work against [`SceneGraph`] plus two node capabilities:
//! - [`HasCameraCapability`]: "is this a camera"
//! - [`HasMeshCapability`]: "is this a mesh with a material"
//!
//! [`Scene`] is the in-memory implementation filled by the asset loader.

pub mod camera;
pub mod material;
pub mod node;
pub mod scene;

pub use camera::Camera;
pub use material::Material;
pub use node::Node;
pub use scene::Scene;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}

pub trait HasCameraCapability {
    fn camera(&self) -> Option<&Camera>;
    fn camera_mut(&mut self) -> Option<&mut Camera>;

    fn is_camera(&self) -> bool {
        self.camera().is_some()
    }
}

pub trait HasMeshCapability {
    fn material(&self) -> Option<&Material>;
    fn material_mut(&mut self) -> Option<&mut Material>;
    fn set_shadows(&mut self, cast: bool, receive: bool);

    fn is_mesh(&self) -> bool {
        self.material().is_some()
    }
}

/// Named-node access over whatever engine owns the scene.
pub trait SceneGraph {
    type Handle: Copy + Eq + std::fmt::Debug;
    type Node: HasCameraCapability + HasMeshCapability;

    /// First node, in depth-first order, whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> Option<Self::Handle>;

    /// Every node handle in depth-first, pre-order.
    fn traverse(&self) -> Vec<Self::Handle>;

    fn node(&self, handle: Self::Handle) -> Option<&Self::Node>;
    fn node_mut(&mut self, handle: Self::Handle) -> Option<&mut Self::Node>;
}

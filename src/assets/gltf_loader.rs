//! glTF adapter: turns a `.gltf`/`.glb` file into a [`Scene`] plus clips.
//!
//! Only what the viewer inspects is imported: node names and hierarchy,
//! cameras, the base color of each mesh's first material, and the keyframe
//! times of every animation channel.

use std::path::Path;
use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::{AnimationClip, Track};
use crate::assets::LoadedAsset;
use crate::errors::{Result, ShowroomError};
use crate::scene::{Camera, Material, Node, NodeHandle, Scene};

/// Aspect used for cameras that do not specify one; the session overrides it
/// with the viewport aspect anyway.
const FALLBACK_ASPECT: f32 = 16.0 / 9.0;
const FALLBACK_FAR: f32 = 1000.0;

pub fn load_gltf(path: &Path) -> Result<LoadedAsset> {
    if !path.exists() {
        return Err(ShowroomError::AssetNotFound(path.display().to_string()));
    }

    let (document, buffers, _images) = gltf::import(path)?;

    let gltf_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ShowroomError::GltfError(format!("{} has no scene", path.display())))?;

    let mut scene = Scene::new();
    for node in gltf_scene.nodes() {
        add_node_recursive(&mut scene, &node, None);
    }

    let clips: Vec<_> = document
        .animations()
        .map(|animation| Arc::new(read_clip(&animation, &buffers)))
        .collect();

    log::info!(
        "Loaded {}: {} node(s), {} clip(s)",
        path.display(),
        scene.len(),
        clips.len()
    );

    Ok(LoadedAsset { scene, clips })
}

fn add_node_recursive(scene: &mut Scene, gltf_node: &gltf::Node, parent: Option<NodeHandle>) {
    let mut node = Node::new(node_name(gltf_node));

    if let Some(gltf_camera) = gltf_node.camera() {
        let mut camera = match gltf_camera.projection() {
            gltf::camera::Projection::Perspective(p) => Camera::new_perspective(
                p.yfov().to_degrees(),
                p.aspect_ratio().unwrap_or(FALLBACK_ASPECT),
                p.znear(),
                p.zfar().unwrap_or(FALLBACK_FAR),
            ),
            gltf::camera::Projection::Orthographic(o) => {
                log::warn!(
                    "Orthographic camera '{}' imported as a perspective camera",
                    node.name
                );
                Camera::new_perspective(50.0, FALLBACK_ASPECT, o.znear(), o.zfar())
            }
        }
        .with_name(node.name.clone());

        let (translation, rotation, _scale) = gltf_node.transform().decomposed();
        camera.position = Vec3::from_array(translation);
        camera.rotation = Quat::from_array(rotation);
        node.camera = Some(camera);
    }

    if let Some(mesh) = gltf_node.mesh() {
        let color = mesh
            .primitives()
            .next()
            .map_or([1.0; 4], |primitive| {
                primitive.material().pbr_metallic_roughness().base_color_factor()
            });
        node.material = Some(Material::new(Vec3::new(color[0], color[1], color[2])));
    }

    let handle = match parent {
        Some(parent) => scene.add_to_parent(node, parent),
        None => scene.add_node(node),
    };

    for child in gltf_node.children() {
        add_node_recursive(scene, &child, Some(handle));
    }
}

/// One track per channel, named `"<node>.<property>"`.
fn read_clip(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> AnimationClip {
    let name = animation
        .name()
        .map_or_else(|| format!("Animation_{}", animation.index()), str::to_string);

    let tracks = animation
        .channels()
        .map(|channel| {
            let target = channel.target();
            let node = node_name(&target.node());
            let property = property_name(target.property());

            let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|data| &**data));
            let times: Vec<f32> = reader
                .read_inputs()
                .map(Iterator::collect)
                .unwrap_or_default();

            Track::new(format!("{node}.{property}"), times)
        })
        .collect();

    AnimationClip::new(name, tracks)
}

fn node_name(node: &gltf::Node) -> String {
    node.name()
        .map_or_else(|| format!("Node_{}", node.index()), str::to_string)
}

fn property_name(property: gltf::animation::Property) -> &'static str {
    match property {
        gltf::animation::Property::Translation => "position",
        gltf::animation::Property::Rotation => "quaternion",
        gltf::animation::Property::Scale => "scale",
        gltf::animation::Property::MorphTargetWeights => "morphTargetInfluences",
    }
}

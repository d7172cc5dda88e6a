use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::scene::node::Node;
use crate::scene::{NodeHandle, SceneGraph};

/// Scene graph container.
///
/// Nodes live in a slot map; hierarchy is kept through parent/child handles.
/// Name lookups go through an index of every node carrying each name. Shared
/// names are settled by depth-first order, whatever the insertion order was.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    names: FxHashMap<String, SmallVec<[NodeHandle; 1]>>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.insert(node, None);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`. Falls back to the root level when `parent`
    /// is stale.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            return self.add_node(node);
        }

        let handle = self.insert(node, Some(parent));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, mut node: Node, parent: Option<NodeHandle>) -> NodeHandle {
        node.parent = parent;
        let name = node.name.clone();
        let handle = self.nodes.insert(node);
        if !name.is_empty() {
            self.names.entry(name).or_default().push(handle);
        }
        handle
    }
}

impl SceneGraph for Scene {
    type Handle = NodeHandle;
    type Node = Node;

    fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        match self.names.get(name)?.as_slice() {
            [] => None,
            [only] => Some(*only),
            candidates => self
                .traverse()
                .into_iter()
                .find(|handle| candidates.contains(handle)),
        }
    }

    fn traverse(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }

        order
    }

    fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverse_is_depth_first_preorder() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"));
        let b = scene.add_to_parent(Node::new("b"), a);
        let c = scene.add_node(Node::new("c"));
        let d = scene.add_to_parent(Node::new("d"), b);

        assert_eq!(scene.traverse(), vec![a, b, d, c]);
    }

    #[test]
    fn duplicate_names_resolve_in_depth_first_order() {
        let mut scene = Scene::new();
        let a = scene.add_node(Node::new("a"));
        let _late_root = scene.add_node(Node::new("x"));
        let nested = scene.add_to_parent(Node::new("x"), a);

        assert_eq!(scene.traverse()[1], nested);
        assert_eq!(scene.find_by_name("x"), Some(nested));
    }

    #[test]
    fn duplicate_roots_resolve_to_first_root() {
        let mut scene = Scene::new();
        let first = scene.add_node(Node::new("wheel"));
        let _second = scene.add_node(Node::new("wheel"));

        assert_eq!(scene.find_by_name("wheel"), Some(first));
        assert_eq!(scene.find_by_name("Wheel"), None);
    }
}

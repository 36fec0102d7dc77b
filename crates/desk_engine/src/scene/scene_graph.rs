//! Transform hierarchy
//!
//! Nodes live in a slotmap arena owned by [`SceneGraph`]. Each node owns its
//! ordered child list; the parent link is a plain id used for upward
//! traversal. World transforms are cached on the nodes and refreshed with
//! [`SceneGraph::update`] or [`SceneGraph::update_from_root`].

use slotmap::SlotMap;

use crate::foundation::math::Mat4;
use crate::spatial::ObjectId;
use super::scene_node::{NodeId, SceneNode};

/// Errors raised when editing the hierarchy
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    /// The id does not refer to a live node
    #[error("Unknown scene node {0:?}")]
    UnknownNode(NodeId),

    /// A node cannot be its own child
    #[error("Scene node {0:?} cannot be attached to itself")]
    SelfParent(NodeId),

    /// The child is an ancestor of the new parent
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },
}

/// Tree of named transform nodes with a single root
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only a root node named `"root"`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new("root"));
        Self { nodes, root }
    }

    /// Root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached subtrees and the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is never released
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether an id refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Create a detached node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(SceneNode::new(name))
    }

    /// Get a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Get a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Cached world transform of a node
    pub fn world_transform(&self, id: NodeId) -> Option<&Mat4> {
        self.nodes.get(id).map(SceneNode::world_transform)
    }

    /// Iterate from a node's parent up to the top of its tree
    ///
    /// The node itself is not yielded. Unknown ids yield nothing.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.nodes.get(id).and_then(SceneNode::parent);
        std::iter::successors(first, move |&current| {
            self.nodes.get(current).and_then(SceneNode::parent)
        })
    }

    /// Append `child` to `parent`'s children
    ///
    /// A child that already has a parent is detached from it first, so a
    /// node is never listed under two parents.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        if !self.contains(parent) {
            return Err(HierarchyError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(HierarchyError::UnknownNode(child));
        }
        if parent == child {
            return Err(HierarchyError::SelfParent(child));
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(HierarchyError::Cycle { parent, child });
        }

        self.detach(child);

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
        log::trace!("Attached scene node {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Unlink a node from its parent, keeping its subtree alive
    ///
    /// Returns the previous parent.
    pub fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get_mut(id)?.parent.take()?;
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != id);
        }
        log::trace!("Detached scene node {:?} from {:?}", id, parent);
        Some(parent)
    }

    /// Remove the first direct child named `name`, releasing its subtree
    ///
    /// Only direct children are searched. Returns false when none matches.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> bool {
        let Some(parent_node) = self.nodes.get(parent) else {
            return false;
        };
        let Some(child) = parent_node
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes.get(c).map_or(false, |n| n.name() == name))
        else {
            return false;
        };

        self.remove_node(child);
        true
    }

    /// Remove a node and its whole subtree from the graph
    ///
    /// Works for attached and detached nodes alike. The root cannot be
    /// removed. Returns the number of nodes released.
    pub fn remove_node(&mut self, id: NodeId) -> usize {
        if id == self.root || !self.contains(id) {
            return 0;
        }
        self.detach(id);
        let released = self.release_subtree(id);
        log::debug!("Removed scene node {:?} and {} descendant(s)", id, released - 1);
        released
    }

    fn release_subtree(&mut self, id: NodeId) -> usize {
        let mut released = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                released += 1;
            }
        }
        released
    }

    /// Find a descendant by name, depth-first in child order
    ///
    /// Each child is tested before its own subtree, and the subtree before the
    /// next sibling. The start node is not tested.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .find(|&d| self.nodes.get(d).map_or(false, |n| n.name() == name))
    }

    /// Find the first attached node carrying a scene object
    pub fn find_by_object_id(&self, object_id: ObjectId) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&d| self.nodes.get(d).map_or(false, |n| n.object_id() == Some(object_id)))
    }

    /// Pre-order iterator over a node's descendants
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();

        std::iter::from_fn(move || {
            let current = stack.pop()?;
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
            Some(current)
        })
    }

    /// Recompute world transforms for a node and its subtree
    ///
    /// `world = parent_world * local`, visiting children in child order.
    pub fn update(&mut self, id: NodeId, parent_world: &Mat4) {
        let mut stack = vec![(id, *parent_world)];
        while let Some((current, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };
            let world = parent_world * node.local_transform();
            node.set_world_transform(world);
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
    }

    /// Recompute every attached node from the root with an identity parent
    pub fn update_from_root(&mut self) {
        self.update(self.root, &Mat4::identity());
    }
}

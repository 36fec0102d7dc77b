//! Scene graph nodes

use slotmap::new_key_type;

use crate::foundation::math::{EulerTransform, Mat4, Vec3};
use crate::spatial::ObjectId;

new_key_type! {
    /// Handle to a node in a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

/// Named element of the transform hierarchy
///
/// The local matrix is recomputed whenever a transform component changes.
/// The world matrix is a cache filled in by
/// [`SceneGraph::update`](super::SceneGraph::update).
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    transform: EulerTransform,
    local_transform: Mat4,
    world_transform: Mat4,
    object_id: Option<ObjectId>,
    /// Whether the node is drawn
    pub visible: bool,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl SceneNode {
    /// Create a node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: EulerTransform::identity(),
            local_transform: Mat4::identity(),
            world_transform: Mat4::identity(),
            object_id: None,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Node name (names are not unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation_degrees
    }

    /// Per-axis scale
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    /// Set the position and rebuild the local matrix
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.rebuild_local();
    }

    /// Set the Euler rotation (degrees) and rebuild the local matrix
    pub fn set_rotation(&mut self, rotation_degrees: Vec3) {
        self.transform.rotation_degrees = rotation_degrees;
        self.rebuild_local();
    }

    /// Set the scale and rebuild the local matrix
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.rebuild_local();
    }

    /// Set all three components at once
    pub fn set_transform(&mut self, transform: EulerTransform) {
        self.transform = transform;
        self.rebuild_local();
    }

    /// Replace the local matrix directly
    ///
    /// The position/rotation/scale components are left as they were, so the
    /// next component setter overwrites this matrix.
    pub fn set_local_transform(&mut self, local: Mat4) {
        self.local_transform = local;
    }

    /// Transform relative to the parent
    pub fn local_transform(&self) -> &Mat4 {
        &self.local_transform
    }

    /// Cached transform relative to the world, as of the last update
    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    pub(super) fn set_world_transform(&mut self, world: Mat4) {
        self.world_transform = world;
    }

    /// Scene object drawn with this node's world transform
    pub fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }

    /// Associate (or dissociate) a scene object
    pub fn set_object_id(&mut self, object_id: Option<ObjectId>) {
        self.object_id = object_id;
    }

    /// Parent node, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn rebuild_local(&mut self) {
        self.local_transform = self.transform.to_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::foundation::math::utils;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_new_node_defaults() {
        let node = SceneNode::new("desk");
        assert_eq!(node.name(), "desk");
        assert!(node.visible);
        assert_eq!(node.object_id(), None);
        assert_eq!(node.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(*node.local_transform(), Mat4::identity());
    }

    #[test]
    fn test_setters_rebuild_local() {
        let mut node = SceneNode::new("neck");
        node.set_position(Vec3::new(1.0, 2.0, 3.0));
        node.set_scale(Vec3::new(2.0, 2.0, 2.0));

        let origin = utils::transform_origin(node.local_transform());
        assert_relative_eq!(origin, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);

        let p = node.local_transform().transform_point(&crate::foundation::math::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vec3::new(3.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_in_degrees() {
        let mut node = SceneNode::new("shade");
        node.set_rotation(Vec3::new(0.0, 0.0, 90.0));

        let x_axis = node.local_transform().transform_vector(&Vec3::x());
        assert_relative_eq!(x_axis, Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_direct_local_is_overwritten_by_setter() {
        let mut node = SceneNode::new("pot");
        node.set_local_transform(Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(node.position(), Vec3::zeros());

        node.set_scale(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(*node.local_transform(), Mat4::identity());
    }
}

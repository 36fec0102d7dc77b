//! Desk scene composition
//!
//! Placement of every object on the desk and the shape of the two
//! articulated groups (the lamp and the potted plant).

use serde::{Deserialize, Serialize};

use crate::foundation::math::{EulerTransform, Vec3};
use crate::spatial::{ObjectId, SceneObject};

/// Mesh primitive used to draw an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    /// Flat quad
    Plane,
    /// Unit cube
    Box,
    /// Capped cylinder
    Cylinder,
    /// Half of a torus
    HalfTorus,
    /// Cone
    Cone,
    /// UV sphere
    Sphere,
}

/// One object placed on the desk
#[derive(Debug, Clone, PartialEq)]
pub struct DeskObject {
    /// Object identifier shared with the spatial index
    pub id: ObjectId,
    /// Display name
    pub name: &'static str,
    /// Mesh drawn for the object
    pub mesh: MeshKind,
    /// World placement
    pub transform: EulerTransform,
    /// Bounding sphere radius
    pub bounding_radius: f32,
}

impl DeskObject {
    fn new(
        id: ObjectId,
        name: &'static str,
        mesh: MeshKind,
        position: [f32; 3],
        scale: [f32; 3],
        rotation: [f32; 3],
        bounding_radius: f32,
    ) -> Self {
        Self {
            id,
            name,
            mesh,
            transform: EulerTransform::new(Vec3::from(position), Vec3::from(rotation), Vec3::from(scale)),
            bounding_radius,
        }
    }

    /// The record inserted into the spatial index
    pub fn scene_object(&self) -> SceneObject {
        SceneObject::new(self.id, self.transform.position, self.bounding_radius)
    }
}

/// Node of an articulated group, placed relative to its parent
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNodeSpec {
    /// Node name
    pub name: &'static str,
    /// Name of the parent node, `None` for a group root attached to the scene root
    pub parent: Option<&'static str>,
    /// Transform relative to the parent
    pub transform: EulerTransform,
    /// Desk object drawn with this node's world transform
    pub object_id: ObjectId,
}

impl HierarchyNodeSpec {
    fn new(
        name: &'static str,
        parent: Option<&'static str>,
        position: [f32; 3],
        scale: [f32; 3],
        rotation: [f32; 3],
        object_id: ObjectId,
    ) -> Self {
        Self {
            name,
            parent,
            transform: EulerTransform::new(Vec3::from(position), Vec3::from(rotation), Vec3::from(scale)),
            object_id,
        }
    }
}

/// Every object on the desk, in id order
pub fn desk_objects() -> Vec<DeskObject> {
    const NONE: [f32; 3] = [0.0, 0.0, 0.0];

    vec![
        DeskObject::new(1, "desk_surface", MeshKind::Plane, [0.0, 0.0, 0.0], [12.0, 1.0, 7.0], NONE, 7.0),
        DeskObject::new(2, "laptop_base", MeshKind::Box, [0.0, 0.06, 0.8], [2.8, 0.12, 2.0], NONE, 1.5),
        DeskObject::new(3, "laptop_screen", MeshKind::Box, [0.0, 1.0, 0.2], [3.0, 1.8, 0.08], [-20.0, 0.0, 0.0], 1.8),
        DeskObject::new(4, "mug_body", MeshKind::Cylinder, [-2.2, 0.35, 1.5], [0.5, 0.7, 0.5], NONE, 0.7),
        DeskObject::new(5, "mug_handle", MeshKind::HalfTorus, [-1.7, 0.35, 1.5], [0.4, 0.4, 0.4], [0.0, 90.0, 0.0], 0.4),
        DeskObject::new(6, "book_bottom", MeshKind::Box, [3.5, 0.125, -0.5], [1.0, 0.25, 1.5], NONE, 1.0),
        DeskObject::new(7, "book_middle", MeshKind::Box, [3.5, 0.365, -0.5], [0.95, 0.23, 1.45], [0.0, 3.0, 0.0], 1.0),
        DeskObject::new(8, "book_top", MeshKind::Box, [3.5, 0.575, -0.5], [0.9, 0.2, 1.4], [0.0, -5.0, 0.0], 1.0),
        DeskObject::new(9, "lamp_base", MeshKind::Cylinder, [-3.5, 0.075, -2.0], [0.7, 0.15, 0.7], NONE, 0.7),
        DeskObject::new(10, "lamp_neck", MeshKind::Cylinder, [-2.8, 1.1, -2.0], [0.12, 2.0, 0.12], [0.0, 0.0, 30.0], 2.0),
        DeskObject::new(11, "lamp_shade", MeshKind::Cone, [-2.2, 2.0, -2.0], [0.8, 0.6, 0.8], [180.0, 0.0, 30.0], 0.8),
        DeskObject::new(12, "plant_pot", MeshKind::Cylinder, [-4.5, 0.25, -0.8], [0.6, 0.5, 0.6], NONE, 0.6),
        DeskObject::new(13, "plant_foliage", MeshKind::Sphere, [-4.5, 0.65, -0.8], [0.5, 0.4, 0.5], NONE, 0.5),
    ]
}

/// Articulated groups, parents listed before their children
pub fn hierarchy_nodes() -> Vec<HierarchyNodeSpec> {
    const NONE: [f32; 3] = [0.0, 0.0, 0.0];

    vec![
        HierarchyNodeSpec::new("lamp_base", None, [-3.5, 0.075, -2.0], [0.7, 0.15, 0.7], NONE, 9),
        HierarchyNodeSpec::new("lamp_neck", Some("lamp_base"), [0.7, 1.025, 0.0], [0.12, 2.0, 0.12], [0.0, 0.0, 30.0], 10),
        HierarchyNodeSpec::new("lamp_shade", Some("lamp_neck"), [0.6, 0.9, 0.0], [0.8, 0.6, 0.8], [180.0, 0.0, 30.0], 11),
        HierarchyNodeSpec::new("plant_pot", None, [-4.5, 0.25, -0.8], [0.6, 0.5, 0.6], NONE, 12),
        HierarchyNodeSpec::new("plant_foliage", Some("plant_pot"), [0.0, 0.4, 0.0], [0.5, 0.4, 0.5], NONE, 13),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_ids_are_unique_and_ordered() {
        let objects = desk_objects();
        assert_eq!(objects.len(), 13);
        let ids: Vec<_> = objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, (1..=13).collect::<Vec<_>>());
        let names: HashSet<_> = objects.iter().map(|o| o.name).collect();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_hierarchy_references_known_objects() {
        let objects = desk_objects();
        let nodes = hierarchy_nodes();
        for (i, node) in nodes.iter().enumerate() {
            let object = objects.iter().find(|o| o.id == node.object_id).unwrap();
            assert_eq!(object.name, node.name);
            if let Some(parent) = node.parent {
                assert!(nodes[..i].iter().any(|n| n.name == parent), "{} listed before {}", node.name, parent);
            }
        }
    }

    #[test]
    fn test_only_foliage_is_a_sphere() {
        let spheres: Vec<_> = desk_objects().into_iter().filter(|o| o.mesh == MeshKind::Sphere).collect();
        assert_eq!(spheres.len(), 1);
        assert_eq!(spheres[0].id, 13);
    }
}

//! Octree spatial partitioning structure
//!
//! Divides the root cube into octants for fast region queries over a
//! dynamic set of point-like objects. Subdivision is driven by depth only:
//! every object descends until it reaches a node at `max_depth`, creating
//! the octants on its path lazily. There is no split-on-overflow, no
//! rebalancing and no merging.
//!
//! Objects are stored by copy and the index has no notion of movement. To
//! reflect a moved object, remove it by id and insert it again.

use crate::core::config::SpatialConfig;
use crate::foundation::math::{utils, Vec3};
use super::aabb::AABB;

/// Caller-assigned object identifier
pub type ObjectId = u32;

/// Object stored in the octree: a point with a bounding radius
///
/// The radius is carried along but region queries test the position only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// World-space position
    pub position: Vec3,
    /// Bounding sphere radius
    pub bounding_radius: f32,
    /// Identifier, not required to be unique
    pub id: ObjectId,
}

impl SceneObject {
    /// Create a new scene object
    pub fn new(id: ObjectId, position: Vec3, bounding_radius: f32) -> Self {
        Self {
            position,
            bounding_radius,
            id,
        }
    }
}

/// Single cubic region of the octree
///
/// A node is a leaf iff `depth >= max_depth`. Leaves hold objects; internal
/// nodes hold only children, one per octant, created on first insertion.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    center: Vec3,
    half_size: f32,
    depth: u32,
    max_depth: u32,
    objects: Vec<SceneObject>,
    children: [Option<Box<OctreeNode>>; 8],
}

impl OctreeNode {
    /// Create a root node covering `center ± half_size`
    pub fn new(center: Vec3, half_size: f32, max_depth: u32) -> Self {
        Self::with_depth(center, half_size, 0, max_depth)
    }

    fn with_depth(center: Vec3, half_size: f32, depth: u32, max_depth: u32) -> Self {
        Self {
            center,
            half_size,
            depth,
            max_depth,
            objects: Vec::new(),
            children: Default::default(),
        }
    }

    /// Center of this node's cube
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Half the edge length of this node's cube
    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    /// Depth in the tree (0 = root)
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Depth at which nodes become leaves
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.depth >= self.max_depth
    }

    /// Objects stored directly at this node
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Child for an octant (0-7), if it has been created
    pub fn child(&self, octant: usize) -> Option<&OctreeNode> {
        self.children.get(octant)?.as_deref()
    }

    /// Iterate over the children that exist, in octant order
    pub fn children(&self) -> impl Iterator<Item = &OctreeNode> {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    /// Cube bounds of this node
    pub fn bounds(&self) -> AABB {
        AABB::from_center_extents(self.center, Vec3::repeat(self.half_size))
    }

    /// Octant index (0-7) for a position relative to this node's center
    ///
    /// Comparisons are strict, so a coordinate equal to the center falls on
    /// the low side. Positions outside the cube are routed the same way.
    ///
    /// ```text
    /// bit 0: x > center.x
    /// bit 1: y > center.y
    /// bit 2: z > center.z
    /// ```
    pub fn octant_index(&self, position: &Vec3) -> usize {
        let mut index = 0;
        if position.x > self.center.x {
            index |= 1;
        }
        if position.y > self.center.y {
            index |= 2;
        }
        if position.z > self.center.z {
            index |= 4;
        }
        index
    }

    /// Center of the child cube for an octant
    fn octant_center(&self, octant: usize) -> Vec3 {
        let quarter = self.half_size * 0.5;
        let sign = |bit: usize| if octant & bit != 0 { quarter } else { -quarter };
        self.center + Vec3::new(sign(1), sign(2), sign(4))
    }

    /// Insert an object, descending (and creating octants) until a leaf
    pub fn insert(&mut self, object: SceneObject) {
        let mut node = self;
        loop {
            if node.is_leaf() {
                node.objects.push(object);
                return;
            }

            let octant = node.octant_index(&object.position);
            let (center, half_size, depth, max_depth) =
                (node.octant_center(octant), node.half_size * 0.5, node.depth + 1, node.max_depth);
            node = node.children[octant]
                .get_or_insert_with(|| Box::new(OctreeNode::with_depth(center, half_size, depth, max_depth)))
                .as_mut();
        }
    }

    /// Remove every copy of an object from this node and all descendants
    ///
    /// The whole subtree is scanned because an object may sit anywhere if
    /// it was inserted more than once. Returns the number of copies removed.
    pub fn remove(&mut self, object_id: ObjectId) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != object_id);
        let mut removed = before - self.objects.len();

        for child in self.children.iter_mut().flatten() {
            removed += child.remove(object_id);
        }

        removed
    }

    /// Append the ids of all objects whose position lies inside `region`
    ///
    /// Subtrees whose cube does not touch the region are skipped. Results
    /// come out depth-first in octant order and repeat duplicated ids.
    pub fn query(&self, region: &AABB, results: &mut Vec<ObjectId>) {
        if !self.bounds().intersects(region) {
            return;
        }

        results.extend(
            self.objects
                .iter()
                .filter(|o| region.contains_point(&o.position))
                .map(|o| o.id),
        );

        for child in self.children() {
            child.query(region, results);
        }
    }

    /// Drop all children and empty this node's own object list
    pub fn clear(&mut self) {
        self.children = Default::default();
        self.objects.clear();
    }

    /// Count objects in this node and all descendants
    pub fn count_objects(&self) -> usize {
        self.objects.len() + self.children().map(OctreeNode::count_objects).sum::<usize>()
    }

    /// Count this node and all descendants
    pub fn count_nodes(&self) -> usize {
        1 + self.children().map(OctreeNode::count_nodes).sum::<usize>()
    }

    /// Deepest depth reached by any node of this subtree
    pub fn deepest_depth(&self) -> u32 {
        self.children().map(OctreeNode::deepest_depth).max().unwrap_or(self.depth)
    }
}

/// Octree spatial index over the scene's objects
#[derive(Debug, Clone)]
pub struct Octree {
    /// Root node containing the whole workspace
    root: OctreeNode,
}

impl Octree {
    /// Create a new octree over `center ± half_size`
    ///
    /// The root is never resized. Objects outside it are still accepted and
    /// land in the outermost octant on their side of each axis.
    pub fn new(center: Vec3, half_size: f32, max_depth: u32) -> Self {
        log::debug!(
            "Creating octree: center={:?} half_size={} max_depth={}",
            center, half_size, max_depth
        );
        Self {
            root: OctreeNode::new(center, half_size, max_depth),
        }
    }

    /// Create an octree from the spatial section of the configuration
    pub fn from_config(config: &SpatialConfig) -> Self {
        Self::new(config.center, config.half_size, config.max_depth)
    }

    /// Root node
    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    /// Bounds of the root cube
    pub fn bounds(&self) -> AABB {
        self.root.bounds()
    }

    /// Insert an object
    pub fn insert(&mut self, object: SceneObject) {
        if !utils::is_finite(&object.position) {
            log::warn!("Object {} has a non-finite position {:?}", object.id, object.position);
        } else if !self.root.bounds().contains_point(&object.position) {
            log::trace!("Object {} lies outside the octree root cube", object.id);
        }
        self.root.insert(object);
    }

    /// Remove every copy of an object; returns how many were removed
    pub fn remove(&mut self, object_id: ObjectId) -> usize {
        self.root.remove(object_id)
    }

    /// Append ids of objects inside `region` to `results`
    pub fn query(&self, region: &AABB, results: &mut Vec<ObjectId>) {
        self.root.query(region, results);
    }

    /// Ids of objects whose position lies in `[min, max]`
    pub fn query_region(&self, min: Vec3, max: Vec3) -> Vec<ObjectId> {
        let mut results = Vec::new();
        self.root.query(&AABB::new(min, max), &mut results);
        results
    }

    /// Remove all objects and octants
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Get total object count (duplicates included)
    pub fn object_count(&self) -> usize {
        self.root.count_objects()
    }

    /// Get total node count
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }
}

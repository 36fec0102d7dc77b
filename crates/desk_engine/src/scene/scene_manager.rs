//! Scene Manager - culling and drawing the desk scene
//!
//! Each frame the manager:
//! 1. Registers the desk objects with the octree (after clearing it, if configured)
//! 2. Queries the culling region for the visible set
//! 3. Refreshes world transforms of the articulated groups
//! 4. Submits one draw per visible object to a [`DrawTarget`]

use std::collections::{HashMap, HashSet};

use crate::core::config::{ApplicationConfig, ConfigError};
use crate::foundation::math::{Mat4, Vec3};
use crate::profiling::PerformanceProfiler;
use crate::spatial::{ObjectId, Octree, SceneObject};
use super::desk_layout::{self, DeskObject, MeshKind};
use super::scene_graph::{HierarchyError, SceneGraph};
use super::scene_node::NodeId;
use super::scene_renderer::{DrawCall, DrawTarget};

const CULLING_SECTION: &str = "Frustum Culling";
const RENDERING_SECTION: &str = "Object Rendering";

/// Scene Manager - owns the spatial index, the hierarchy and the profiler
pub struct SceneManager {
    config: ApplicationConfig,
    octree: Octree,
    graph: SceneGraph,
    objects: Vec<DeskObject>,
    profiler: PerformanceProfiler,
    frame: u64,
}

impl SceneManager {
    /// Create a scene manager for the desk scene
    ///
    /// The configuration is validated before anything is built.
    pub fn new(config: ApplicationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let spatial = &config.spatial;
        let octree = Octree::from_config(spatial);
        let profiler = PerformanceProfiler::new(config.engine.enable_profiling);
        let objects = desk_layout::desk_objects();

        log::info!(
            "Scene manager ready: {} objects, octree half_size {} depth {}",
            objects.len(),
            spatial.half_size,
            spatial.max_depth
        );

        Ok(Self {
            config,
            octree,
            graph: SceneGraph::new(),
            objects,
            profiler,
            frame: 0,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Desk objects in draw order
    pub fn objects(&self) -> &[DeskObject] {
        &self.objects
    }

    /// Spatial index
    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    /// Transform hierarchy
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Transform hierarchy, for animating nodes
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Frame profiler
    pub fn profiler(&self) -> &PerformanceProfiler {
        &self.profiler
    }

    /// Frame profiler, for resets
    pub fn profiler_mut(&mut self) -> &mut PerformanceProfiler {
        &mut self.profiler
    }

    /// Number of frames rendered so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Insert an object into the spatial index
    pub fn register_object(&mut self, object: SceneObject) {
        self.octree.insert(object);
    }

    /// Insert every desk object into the spatial index
    pub fn register_scene_objects(&mut self) {
        for object in &self.objects {
            self.octree.insert(object.scene_object());
        }
        self.profiler.record_object_count(self.objects.len());
    }

    /// Ids of indexed objects whose position lies in `[min, max]`
    pub fn query_region(&self, min: Vec3, max: Vec3) -> Vec<ObjectId> {
        self.octree.query_region(min, max)
    }

    /// Empty the spatial index
    pub fn clear_index(&mut self) {
        log::trace!("Clearing spatial index ({} objects)", self.octree.object_count());
        self.octree.clear();
    }

    /// Build the lamp and plant groups under the scene root
    ///
    /// Groups left over from a previous call are removed first.
    pub fn build_hierarchy(&mut self) -> Result<(), HierarchyError> {
        let specs = desk_layout::hierarchy_nodes();
        let root = self.graph.root();

        for spec in specs.iter().filter(|s| s.parent.is_none()) {
            while self.graph.remove_child(root, spec.name) {}
        }

        let mut created: HashMap<&str, NodeId> = HashMap::new();
        for spec in &specs {
            let node = self.graph.create_node(spec.name);
            if let Some(scene_node) = self.graph.node_mut(node) {
                scene_node.set_transform(spec.transform);
                scene_node.set_object_id(Some(spec.object_id));
            }

            let parent = spec
                .parent
                .and_then(|name| created.get(name).copied())
                .unwrap_or(root);
            if let Err(e) = self.graph.add_child(parent, node) {
                self.graph.remove_node(node);
                return Err(e);
            }
            created.insert(spec.name, node);
        }

        log::debug!("Built scene hierarchy with {} nodes", created.len());
        Ok(())
    }

    /// Recompute world transforms from the root
    pub fn refresh_hierarchy(&mut self) {
        self.graph.update_from_root();
    }

    /// Model matrix for an object
    ///
    /// Objects bound to a hierarchy node use the node's world transform;
    /// everything else uses its own placement.
    pub fn model_matrix(&self, object: &DeskObject) -> Mat4 {
        self.graph
            .find_by_object_id(object.id)
            .and_then(|node| self.graph.world_transform(node))
            .copied()
            .unwrap_or_else(|| object.transform.to_matrix())
    }

    fn is_hidden(&self, object_id: ObjectId) -> bool {
        self.graph
            .find_by_object_id(object_id)
            .and_then(|node| self.graph.node(node))
            .map_or(false, |node| !node.visible)
    }

    fn uses_low_detail(&self, object: &DeskObject) -> bool {
        let culling = &self.config.culling;
        object.mesh == MeshKind::Sphere
            && (object.transform.position - culling.camera_position).norm() > culling.low_detail_distance
    }

    /// Cull and draw one frame; returns the number of draw calls issued
    pub fn render_frame(&mut self, target: &mut dyn DrawTarget) -> usize {
        self.profiler.start_frame();
        target.begin_frame(self.frame);

        if self.config.culling.clear_index_each_frame {
            self.clear_index();
        }
        self.register_scene_objects();

        self.profiler.start_section(CULLING_SECTION);
        let region = self.config.culling.region();
        let visible: HashSet<ObjectId> = self.query_region(region.min, region.max).into_iter().collect();
        self.profiler.end_section(CULLING_SECTION);
        self.profiler.record_visible_objects(visible.len());

        self.refresh_hierarchy();

        self.profiler.start_section(RENDERING_SECTION);
        let mut draws = 0;
        for object in &self.objects {
            if !visible.contains(&object.id) || self.is_hidden(object.id) {
                continue;
            }
            let model = self.model_matrix(object);
            let low_detail = self.uses_low_detail(object);
            target.draw(DrawCall {
                object_id: object.id,
                mesh: object.mesh,
                model,
                low_detail,
            });
            self.profiler.record_draw_call();
            draws += 1;
        }
        self.profiler.end_section(RENDERING_SECTION);

        target.end_frame();
        self.profiler.end_frame();
        self.frame += 1;

        log::trace!("Frame {}: {} visible, {} drawn", self.frame, visible.len(), draws);
        draws
    }
}

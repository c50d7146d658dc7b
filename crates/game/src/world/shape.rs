use glam::Vec2;

use super::WorldError;
use crate::animation::WALK_CYCLE;
use crate::geometry;

/// Weak (non-owning) index into the shape store. Shapes outlive the
/// entities referencing them; many entities may share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeHandle(pub u32);

impl ShapeHandle {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Convex collision polygon in local (entity-relative) space, plus the
/// sprite-atlas framing used by the animation advancer.
///
/// The outward normals are derived data: one per edge, `normals[i]`
/// belonging to the edge `vertices[i] -> vertices[(i + 1) % n]`. They
/// are recomputed on every vertex mutation so the two sequences never
/// fall out of step.
#[derive(Debug, Clone)]
pub struct Shape {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
    frame_count: u32,
    frame_table: Vec<u16>,
}

impl Shape {
    /// Convex polygon from counter-clockwise vertices.
    pub fn convex(vertices: Vec<Vec2>) -> Self {
        let normals = geometry::edge_normals(&vertices);
        Self {
            vertices,
            normals,
            frame_count: 1,
            frame_table: Vec::new(),
        }
    }

    /// Axis-aligned rectangle centered on the local origin.
    pub fn rect(half_extents: Vec2) -> Self {
        Self::convex(vec![
            Vec2::new(-half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, half_extents.y),
            Vec2::new(-half_extents.x, half_extents.y),
        ])
    }

    /// Mark the shape as a multi-frame sprite using the default walk
    /// cycle as its step table.
    pub fn with_frames(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count.max(1);
        if self.frame_count > 1 && self.frame_table.is_empty() {
            self.frame_table = WALK_CYCLE.to_vec();
        }
        self
    }

    /// Override the step -> atlas-frame table.
    pub fn with_frame_table(mut self, table: Vec<u16>) -> Self {
        self.frame_table = table;
        self
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frame_table(&self) -> &[u16] {
        &self.frame_table
    }

    pub fn is_animated(&self) -> bool {
        self.frame_count > 1 && !self.frame_table.is_empty()
    }

    /// Replace the vertex list and re-derive the normals.
    pub fn set_vertices(&mut self, vertices: Vec<Vec2>) {
        self.vertices = vertices;
        self.normals = geometry::edge_normals(&self.vertices);
    }

    pub fn rotate(&mut self, radians: f32) {
        geometry::rotate_polygon(&mut self.vertices, radians);
        self.normals = geometry::edge_normals(&self.vertices);
    }

    pub fn scale(&mut self, scale: f32) {
        geometry::scale_polygon(&mut self.vertices, scale);
        self.normals = geometry::edge_normals(&self.vertices);
    }

    pub fn offset(&mut self, by: Vec2) {
        geometry::offset_polygon(&mut self.vertices, by);
        self.normals = geometry::edge_normals(&self.vertices);
    }

    /// Raise every vertex to at least `bound`, component-wise.
    pub fn clamp_min(&mut self, bound: Vec2) {
        geometry::clamp_min_polygon(&mut self.vertices, bound);
        self.normals = geometry::edge_normals(&self.vertices);
    }

    /// Lower every vertex to at most `bound`, component-wise.
    pub fn clamp_max(&mut self, bound: Vec2) {
        geometry::clamp_max_polygon(&mut self.vertices, bound);
        self.normals = geometry::edge_normals(&self.vertices);
    }
}

/// Fixed-capacity arena of shapes shared by entities via handles.
#[derive(Debug)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    capacity: usize,
}

impl ShapeStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Setup-time only. Fails once the fixed pool is exhausted.
    pub fn insert(&mut self, shape: Shape) -> Result<ShapeHandle, WorldError> {
        if self.shapes.len() >= self.capacity {
            return Err(WorldError::ShapePoolFull(self.capacity));
        }
        let handle = ShapeHandle(self.shapes.len() as u32);
        self.shapes.push(shape);
        Ok(handle)
    }

    pub fn get(&self, handle: ShapeHandle) -> Result<&Shape, WorldError> {
        self.shapes
            .get(handle.0 as usize)
            .ok_or(WorldError::ShapeOutOfRange(handle.0))
    }

    pub fn get_mut(&mut self, handle: ShapeHandle) -> Result<&mut Shape, WorldError> {
        self.shapes
            .get_mut(handle.0 as usize)
            .ok_or(WorldError::ShapeOutOfRange(handle.0))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

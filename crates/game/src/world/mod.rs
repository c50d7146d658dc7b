mod entity;
mod shape;

pub use entity::{Entity, EntityFlags, EntityHandle, EntityStore};
pub use shape::{Shape, ShapeHandle, ShapeStore};

use glam::Vec2;

/// Number of networked entity slots snapshotted every tick.
pub const MAX_NET_SLOTS: usize = 16;

/// Handle bounds violations and pool overflows. These mark programming
/// or setup errors; nothing inside the tick catches and retries them.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("entity handle {0} out of range")]
    EntityOutOfRange(u32),
    #[error("shape handle {0} out of range")]
    ShapeOutOfRange(u32),
    #[error("nil handle where a live entity is required")]
    NilHandle,
    #[error("entity pool capacity {0} exceeded")]
    EntityPoolFull(usize),
    #[error("shape pool capacity {0} exceeded")]
    ShapePoolFull(usize),
}

/// All mutable simulation data: the entity and shape pools plus the
/// networked-slot table. Owned by the orchestrator and threaded through
/// each system explicitly; there is no process-wide instance.
#[derive(Debug)]
pub struct World {
    pub entities: EntityStore,
    pub shapes: ShapeStore,
    net_slots: [EntityHandle; MAX_NET_SLOTS],
}

impl World {
    pub fn new(entity_capacity: usize, shape_capacity: usize) -> Self {
        Self {
            entities: EntityStore::new(entity_capacity),
            shapes: ShapeStore::new(shape_capacity),
            net_slots: [EntityHandle::NIL; MAX_NET_SLOTS],
        }
    }

    /// Map a networked slot to a live entity. Session setup calls
    /// this; unbound slots stay nil and snapshot the nil entity.
    pub fn bind_net_slot(&mut self, slot: usize, handle: EntityHandle) -> Result<(), WorldError> {
        if handle.is_nil() {
            return Err(WorldError::NilHandle);
        }
        self.entities.get(handle)?;
        self.net_slots[slot] = handle;
        Ok(())
    }

    /// Return a slot to the unbound (nil) state.
    pub fn unbind_net_slot(&mut self, slot: usize) {
        self.net_slots[slot] = EntityHandle::NIL;
    }

    pub fn net_slot(&self, slot: usize) -> EntityHandle {
        self.net_slots[slot]
    }

    pub fn net_slots(&self) -> &[EntityHandle; MAX_NET_SLOTS] {
        &self.net_slots
    }

    /// Shape vertices moved into world space by the entity's position.
    pub fn world_vertices(&self, entity: &Entity) -> Result<Vec<Vec2>, WorldError> {
        let shape = self.shapes.get(entity.shape)?;
        let mut verts = shape.vertices().to_vec();
        crate::geometry::offset_polygon(&mut verts, entity.position);
        Ok(verts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_slots_are_nil() {
        let world = World::new(8, 4);
        assert!(world.net_slot(0).is_nil());
        assert!(world.net_slot(MAX_NET_SLOTS - 1).is_nil());
    }

    #[test]
    fn binding_requires_a_live_entity() {
        let mut world = World::new(8, 4);
        assert!(matches!(
            world.bind_net_slot(0, EntityHandle::NIL),
            Err(WorldError::NilHandle)
        ));
        assert!(matches!(
            world.bind_net_slot(0, EntityHandle(5)),
            Err(WorldError::EntityOutOfRange(5))
        ));

        let shape = world.shapes.insert(Shape::rect(Vec2::splat(0.5))).unwrap();
        let handle = world
            .entities
            .insert(Entity::new(EntityFlags::MOVABLE, shape))
            .unwrap();
        world.bind_net_slot(0, handle).unwrap();
        assert_eq!(world.net_slot(0), handle);

        world.unbind_net_slot(0);
        assert!(world.net_slot(0).is_nil());
    }

    #[test]
    fn world_vertices_follow_position() {
        let mut world = World::new(8, 4);
        let shape = world.shapes.insert(Shape::rect(Vec2::splat(0.5))).unwrap();
        let handle = world
            .entities
            .insert(Entity::new(EntityFlags::COLLIDABLE, shape).at(Vec2::new(2.0, 1.0)))
            .unwrap();

        let entity = world.entities.get(handle).unwrap();
        let verts = world.world_vertices(entity).unwrap();
        assert_eq!(verts[0], Vec2::new(1.5, 0.5));
        assert_eq!(verts[2], Vec2::new(2.5, 1.5));
    }
}

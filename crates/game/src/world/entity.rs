use bitflags::bitflags;
use glam::Vec2;

use super::WorldError;
use super::shape::ShapeHandle;

bitflags! {
    /// Behavior flags checked by the per-tick systems.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntityFlags: u32 {
        const DRAWABLE = 1 << 0;
        const MOVABLE = 1 << 1;
        const COLLIDABLE = 1 << 2;
    }
}

/// Stable index into the entity store.
///
/// Handle 0 is the reserved nil sentinel; it always resolves to a dead
/// entity with no flags set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityHandle(pub u32);

impl EntityHandle {
    pub const NIL: EntityHandle = EntityHandle(0);

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_nil(self) -> bool {
        self.0 == 0
    }
}

/// One simulated object. Entities are created during scene setup and
/// only mutated afterwards; the tick never spawns or despawns them.
#[derive(Debug, Clone)]
pub struct Entity {
    pub flags: EntityFlags,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Position at the start of the current tick, before integration.
    pub prev_position: Vec2,
    /// Weak reference into the shape store.
    pub shape: ShapeHandle,
    pub color: [f32; 4],

    // Animation state, advanced by distance traveled.
    pub anim_phase: f32,
    pub anim_step: u32,
    /// Atlas frame resolved for the current animation step.
    pub frame: u16,

    /// Observational only; feeds visual feedback, never gates physics.
    pub has_collision: bool,
}

impl Entity {
    pub fn new(flags: EntityFlags, shape: ShapeHandle) -> Self {
        Self {
            flags,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            prev_position: Vec2::ZERO,
            shape,
            color: [1.0, 1.0, 1.0, 1.0],
            anim_phase: 0.0,
            anim_step: 0,
            frame: 0,
            has_collision: false,
        }
    }

    fn nil() -> Self {
        Self::new(EntityFlags::empty(), ShapeHandle(0))
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self.prev_position = position;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn is_movable(&self) -> bool {
        self.flags.contains(EntityFlags::MOVABLE)
    }

    pub fn is_collidable(&self) -> bool {
        self.flags.contains(EntityFlags::COLLIDABLE)
    }
}

/// Fixed-capacity arena of entities addressed by stable handles.
///
/// Slot 0 is occupied by the nil entity from construction, so the first
/// real insert always yields handle 1.
#[derive(Debug)]
pub struct EntityStore {
    entities: Vec<Entity>,
    capacity: usize,
}

impl EntityStore {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "entity store needs room for the nil slot");
        let mut entities = Vec::with_capacity(capacity);
        entities.push(Entity::nil());
        Self { entities, capacity }
    }

    /// Setup-time only. Fails once the fixed pool is exhausted.
    pub fn insert(&mut self, entity: Entity) -> Result<EntityHandle, WorldError> {
        if self.entities.len() >= self.capacity {
            return Err(WorldError::EntityPoolFull(self.capacity));
        }
        let handle = EntityHandle(self.entities.len() as u32);
        self.entities.push(entity);
        Ok(handle)
    }

    pub fn get(&self, handle: EntityHandle) -> Result<&Entity, WorldError> {
        self.entities
            .get(handle.0 as usize)
            .ok_or(WorldError::EntityOutOfRange(handle.0))
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Result<&mut Entity, WorldError> {
        self.entities
            .get_mut(handle.0 as usize)
            .ok_or(WorldError::EntityOutOfRange(handle.0))
    }

    /// Every slot including nil; callers filter by flags.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> + use<> {
        (0..self.entities.len() as u32).map(EntityHandle)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        // The nil slot always exists.
        self.entities.len() <= 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

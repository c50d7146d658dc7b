use rkyv::{Archive, Deserialize, Serialize};

use crate::world::{Entity, EntityFlags, ShapeHandle};

/// Full copy of one networked entity's simulated state.
///
/// Plain fields only; the transport layer owns the wire encoding and
/// archives these as-is. Nil slots carry the nil entity's state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct NetEntityState {
    pub flags: u32,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub prev_position: [f32; 2],
    pub shape: u32,
    pub anim_phase: f32,
    pub anim_step: u32,
    pub frame: u16,
    pub has_collision: bool,
}

impl NetEntityState {
    pub fn capture(entity: &Entity) -> Self {
        Self {
            flags: entity.flags.bits(),
            position: entity.position.into(),
            velocity: entity.velocity.into(),
            prev_position: entity.prev_position.into(),
            shape: entity.shape.id(),
            anim_phase: entity.anim_phase,
            anim_step: entity.anim_step,
            frame: entity.frame,
            has_collision: entity.has_collision,
        }
    }

    /// Overwrite an entity's simulated fields from this state. Used by
    /// non-authoritative peers applying received snapshots.
    pub fn apply(&self, entity: &mut Entity) {
        entity.flags = EntityFlags::from_bits_truncate(self.flags);
        entity.position = self.position.into();
        entity.velocity = self.velocity.into();
        entity.prev_position = self.prev_position.into();
        entity.shape = ShapeHandle(self.shape);
        entity.anim_phase = self.anim_phase;
        entity.anim_step = self.anim_step;
        entity.frame = self.frame;
        entity.has_collision = self.has_collision;
    }
}

//! Distance-driven sprite animation.
//!
//! Each multi-frame entity carries a phase accumulator and a discrete
//! step index into its shape's step table. Movement speeds the cycle
//! up; a stationary entity resting on the idle frame freezes entirely
//! so it does not jitter in place.

use crate::world::{EntityStore, ShapeStore, WorldError};

/// Default step -> atlas-frame table: a ping-pong walk cycle where
/// frame 0 is the idle pose.
pub const WALK_CYCLE: [u16; 8] = [0, 1, 2, 1, 0, 3, 4, 3];

/// Cycle advance per second while standing still.
pub const IDLE_RATE: f32 = 16.0;
/// Additional cycle advance per world unit traveled.
pub const DISTANCE_RATE: f32 = 5.0;

/// Advance every animated entity by one tick.
///
/// Resolves and stores the atlas frame for the current step every tick,
/// whether or not the step changed.
pub fn advance(
    entities: &mut EntityStore,
    shapes: &ShapeStore,
    time_step: f32,
) -> Result<(), WorldError> {
    // Slot 0 is the nil entity and never animates.
    for entity in entities.iter_mut().skip(1) {
        let shape = shapes.get(entity.shape)?;
        if !shape.is_animated() {
            continue;
        }
        let table = shape.frame_table();

        let distance = (entity.position - entity.prev_position).length();
        let step = entity.anim_step as usize % table.len();
        let in_idle_frame = table[step] == 0;

        let mut rate = (IDLE_RATE + DISTANCE_RATE * distance) * time_step;
        if distance == 0.0 && in_idle_frame {
            rate = 0.0;
        }

        entity.anim_phase += rate;
        while entity.anim_phase > 1.0 {
            entity.anim_phase -= 1.0;
            entity.anim_step += 1;
        }
        entity.anim_step %= table.len() as u32;
        entity.frame = table[entity.anim_step as usize];
    }
    Ok(())
}

use glam::Vec2;

use super::clock::TIME_STEP;
use crate::animation;
use crate::collision;
use crate::input::{Bindings, InputSampler, KeyState, TickInput, movement_intent};
use crate::snapshot::SnapshotRing;
use crate::world::{EntityHandle, World, WorldError};

/// Movement speed of the networked-slot player, world units per second.
pub const NET_SPEED: f32 = 200.0;

/// Local-variant tuning: player 0 moves on "ice" (acceleration plus
/// drag), player 1 gets its velocity set directly.
const LOCAL_ACCEL: f32 = 60.0;
const LOCAL_DRAG: f32 = 15.0;
const LOCAL_SPEED: f32 = 5.0;

/// Who the sampled input drives.
#[derive(Debug, Clone, Copy)]
pub enum ControlScheme {
    /// Authoritative networked tick: the primary bindings drive the
    /// entity bound to `local_slot`; everything else keeps the velocity
    /// the previous tick left it with.
    Networked { local_slot: usize },
    /// Single-process variant: two entities controlled at once, the
    /// second through the secondary bindings.
    Local { players: [EntityHandle; 2] },
}

/// The whole simulation state: world, input history, snapshot history
/// and the tick counter. One call to [`Simulation::advance`] runs one
/// fixed timestep to completion; there is no partial-tick state.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    scheme: ControlScheme,
    sampler: InputSampler,
    snapshots: SnapshotRing,
    tick: u64,
    camera_focus: Vec2,
}

impl Simulation {
    /// `history_capacity` bounds both the input and the snapshot rings.
    pub fn new(world: World, scheme: ControlScheme, history_capacity: usize) -> Self {
        log::debug!(
            "simulation ready: {} entities, {} shapes, {} ticks of history",
            world.entities.len(),
            world.shapes.len(),
            history_capacity
        );
        Self {
            world,
            scheme,
            sampler: InputSampler::new(history_capacity),
            snapshots: SnapshotRing::new(history_capacity),
            tick: 0,
            camera_focus: Vec2::ZERO,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn inputs(&self) -> &InputSampler {
        &self.sampler
    }

    pub fn snapshots(&self) -> &SnapshotRing {
        &self.snapshots
    }

    /// Position the render layer should center on.
    pub fn camera_focus(&self) -> Vec2 {
        self.camera_focus
    }

    /// Run one fixed timestep.
    ///
    /// Sequence: sample input, snapshot previous positions, apply input
    /// velocity, integrate, resolve collisions, advance animations,
    /// record the network snapshot, update the camera focus.
    pub fn advance(&mut self, keys: &KeyState) -> Result<(), WorldError> {
        let input = self.sampler.sample(keys, &Bindings::primary());

        for entity in self.world.entities.iter_mut() {
            entity.prev_position = entity.position;
        }

        self.apply_input(keys, input)?;

        for entity in self.world.entities.iter_mut() {
            if entity.is_movable() {
                entity.position += entity.velocity;
            }
        }

        collision::resolve_all(&mut self.world)?;
        animation::advance(&mut self.world.entities, &self.world.shapes, TIME_STEP)?;
        self.snapshots.record(self.tick, &self.world)?;

        self.camera_focus = self.world.entities.get(self.controlled())?.position;
        self.tick += 1;
        Ok(())
    }

    fn apply_input(&mut self, keys: &KeyState, input: TickInput) -> Result<(), WorldError> {
        match self.scheme {
            ControlScheme::Networked { local_slot } => {
                let handle = self.world.net_slot(local_slot);
                if handle.is_nil() {
                    return Ok(());
                }
                let entity = self.world.entities.get_mut(handle)?;
                entity.velocity = input.move_dir * (NET_SPEED * TIME_STEP);
            }
            ControlScheme::Local { players: [p0, p1] } => {
                if !p0.is_nil() {
                    let entity = self.world.entities.get_mut(p0)?;
                    entity.velocity += input.move_dir * (LOCAL_ACCEL * TIME_STEP * TIME_STEP);
                    entity.velocity *= 1.0 - LOCAL_DRAG * TIME_STEP;
                }
                if !p1.is_nil() {
                    let intent = movement_intent(keys, &Bindings::secondary());
                    let entity = self.world.entities.get_mut(p1)?;
                    entity.velocity = intent * (LOCAL_SPEED * TIME_STEP);
                }
            }
        }
        Ok(())
    }

    fn controlled(&self) -> EntityHandle {
        match self.scheme {
            ControlScheme::Networked { local_slot } => self.world.net_slot(local_slot),
            ControlScheme::Local { players } => players[0],
        }
    }
}

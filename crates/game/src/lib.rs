//! Deterministic fixed-timestep simulation core for skirmish.
//!
//! The tick owns all mutable state (entity pool, shape pool, input and
//! snapshot rings) and runs to completion with no suspension points;
//! identical inputs against identical initial state reproduce identical
//! positions. Window plumbing, rendering, asset loading and the network
//! transport live outside this crate and talk to it through the world
//! setup APIs, the key-state table and the snapshot ring.

pub mod animation;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod simulation;
pub mod snapshot;
pub mod world;

pub use input::{Bindings, InputSampler, Key, KeyState, TickInput};
pub use simulation::{ControlScheme, NET_SPEED, Simulation, TICK_RATE, TIME_STEP, TickClock};
pub use snapshot::{NetEntityState, SnapshotEntry, SnapshotRing};
pub use world::{
    Entity, EntityFlags, EntityHandle, EntityStore, MAX_NET_SLOTS, Shape, ShapeHandle, ShapeStore,
    World, WorldError,
};

//! Headless driver for the skirmish simulation core.
//!
//! Stands in for the out-of-scope collaborators: builds a scene, feeds
//! a scripted key table through the fixed-timestep clock and reports
//! what the tick produced.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use glam::Vec2;

use skirmish::{
    ControlScheme, Entity, EntityFlags, Key, KeyState, Shape, Simulation, TickClock, World,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Authoritative networked tick driving the slot-0 player.
    Networked,
    /// Single-process variant with two locally controlled players.
    Local,
}

#[derive(Parser)]
#[command(name = "skirmish-demo")]
#[command(about = "Headless skirmish simulation demo")]
struct Args {
    #[arg(short, long, default_value_t = 512)]
    ticks: u64,

    #[arg(short, long, value_enum, default_value_t = Mode::Networked)]
    mode: Mode,

    #[arg(long, default_value_t = 4096, help = "Input/snapshot history window")]
    history: usize,
}

fn build_scene(world: &mut World) -> Result<[skirmish::EntityHandle; 2]> {
    let p0_shape = world
        .shapes
        .insert(Shape::rect(Vec2::new(0.25, 0.35)).with_frames(5))?;
    let p1_shape = world
        .shapes
        .insert(Shape::rect(Vec2::new(0.15, 0.45)).with_frames(5))?;
    let wall_h = world.shapes.insert(Shape::rect(Vec2::new(8.0, 2.0)))?;
    let wall_v = world.shapes.insert(Shape::rect(Vec2::new(2.0, 8.0)))?;

    let body = EntityFlags::DRAWABLE | EntityFlags::MOVABLE | EntityFlags::COLLIDABLE;
    let p0 = world.entities.insert(
        Entity::new(body, p0_shape)
            .at(Vec2::new(-1.0, 0.0))
            .with_color([0.89, 0.02, 0.0, 1.0]),
    )?;
    let p1 = world.entities.insert(
        Entity::new(body, p1_shape)
            .at(Vec2::new(1.0, 0.0))
            .with_color([0.4, 0.4, 0.94, 1.0]),
    )?;

    let solid = EntityFlags::DRAWABLE | EntityFlags::COLLIDABLE;
    for (shape, position) in [
        (wall_h, Vec2::new(0.0, 6.0)),
        (wall_h, Vec2::new(0.0, -6.0)),
        (wall_v, Vec2::new(6.0, 0.0)),
        (wall_v, Vec2::new(-6.0, 0.0)),
    ] {
        world
            .entities
            .insert(Entity::new(solid, shape).at(position))?;
    }

    Ok([p0, p1])
}

/// Scripted stand-in for the keyboard poller: circle the arena,
/// switching heading every 64 ticks.
fn script_keys(tick: u64) -> KeyState {
    let mut keys = KeyState::default();
    match (tick / 64) % 4 {
        0 => keys.set(Key::D, true),
        1 => keys.set(Key::W, true),
        2 => keys.set(Key::A, true),
        _ => keys.set(Key::S, true),
    }
    // Second local player strafes on a slower cycle.
    if (tick / 128) % 2 == 0 {
        keys.set(Key::K, true);
    } else {
        keys.set(Key::J, true);
    }
    keys
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut world = World::new(64, 16);
    let [p0, p1] = build_scene(&mut world)?;

    let scheme = match args.mode {
        Mode::Networked => {
            world.bind_net_slot(0, p0)?;
            ControlScheme::Networked { local_slot: 0 }
        }
        Mode::Local => ControlScheme::Local { players: [p0, p1] },
    };
    let mut sim = Simulation::new(world, scheme, args.history);

    // Drive the fixed timestep from synthetic 60 Hz frames, the way a
    // render loop would.
    let mut clock = TickClock::new();
    while sim.tick() < args.ticks {
        clock.accumulate(1.0 / 60.0);
        while clock.consume_tick() && sim.tick() < args.ticks {
            sim.advance(&script_keys(sim.tick()))?;
            if sim.tick() % 128 == 0 {
                let focus = sim.camera_focus();
                log::info!(
                    "tick {}: camera focus ({:.3}, {:.3})",
                    sim.tick(),
                    focus.x,
                    focus.y
                );
            }
        }
    }

    let e0 = sim.world().entities.get(p0)?;
    let e1 = sim.world().entities.get(p1)?;
    println!("after {} ticks ({:?} mode):", sim.tick(), args.mode);
    println!(
        "  player 0 at ({:.3}, {:.3}), frame {}, colliding: {}",
        e0.position.x, e0.position.y, e0.frame, e0.has_collision
    );
    println!(
        "  player 1 at ({:.3}, {:.3}), frame {}, colliding: {}",
        e1.position.x, e1.position.y, e1.frame, e1.has_collision
    );
    if let Some(entry) = sim.snapshots().latest() {
        println!(
            "  snapshot ring: {} entries retained, latest tick {}",
            sim.snapshots().len(),
            entry.tick
        );
    }

    Ok(())
}

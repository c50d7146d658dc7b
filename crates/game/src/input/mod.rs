//! Per-tick movement-intent sampling.
//!
//! The platform layer refreshes a boolean key-state table before each
//! tick; the sampler turns it into a normalized movement intent and
//! records it in a bounded history ring keyed by tick id.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the simulation cares about. The window layer maps
/// physical scancodes onto these before the tick runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    H,
    J,
    K,
    L,
}

pub const KEY_COUNT: usize = 12;

/// Current press state per logical key. true == key is down.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState([bool; KEY_COUNT]);

impl KeyState {
    pub fn set(&mut self, key: Key, down: bool) {
        self.0[key as usize] = down;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.0[key as usize]
    }

    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_down(*k))
    }

    pub fn release_all(&mut self) {
        self.0 = [false; KEY_COUNT];
    }
}

/// Directional key sets for one controlled entity.
#[derive(Debug, Clone, Copy)]
pub struct Bindings {
    pub up: &'static [Key],
    pub down: &'static [Key],
    pub left: &'static [Key],
    pub right: &'static [Key],
}

impl Bindings {
    /// WASD plus arrow keys.
    pub fn primary() -> Self {
        Self {
            up: &[Key::W, Key::Up],
            down: &[Key::S, Key::Down],
            left: &[Key::A, Key::Left],
            right: &[Key::D, Key::Right],
        }
    }

    /// HJKL, for the second local player.
    pub fn secondary() -> Self {
        Self {
            up: &[Key::K],
            down: &[Key::J],
            left: &[Key::H],
            right: &[Key::L],
        }
    }
}

/// Sum unit contributions per axis and normalize. No input yields the
/// zero vector, not NaN.
pub fn movement_intent(keys: &KeyState, bindings: &Bindings) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.any_down(bindings.up) {
        dir.y += 1.0;
    }
    if keys.any_down(bindings.down) {
        dir.y -= 1.0;
    }
    if keys.any_down(bindings.left) {
        dir.x -= 1.0;
    }
    if keys.any_down(bindings.right) {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Movement intent sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_dir: Vec2,
}

/// Bounded history of tick inputs.
///
/// `head` and `tail` are monotonically increasing tick cursors: `head`
/// is one past the most recent write, `tail` the oldest retained entry.
/// Writing into a full ring drops the oldest entry by advancing `tail`.
#[derive(Debug)]
pub struct InputSampler {
    buf: Box<[TickInput]>,
    head: u64,
    tail: u64,
}

impl InputSampler {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "input history capacity must be nonzero");
        Self {
            buf: vec![TickInput::default(); capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
        }
    }

    /// Sample the key state into the slot for the current tick and
    /// return the just-written entry for same-tick consumption.
    pub fn sample(&mut self, keys: &KeyState, bindings: &Bindings) -> TickInput {
        let input = TickInput {
            move_dir: movement_intent(keys, bindings),
        };
        let capacity = self.buf.len() as u64;
        self.buf[(self.head % capacity) as usize] = input;
        self.head += 1;
        if self.head - self.tail > capacity {
            self.tail += 1;
        }
        input
    }

    /// Retained history lookup by tick id.
    pub fn get(&self, tick: u64) -> Option<&TickInput> {
        if tick < self.tail || tick >= self.head {
            return None;
        }
        Some(&self.buf[(tick % self.buf.len() as u64) as usize])
    }

    /// Tick id the next sample will be stored under.
    pub fn write_cursor(&self) -> u64 {
        self.head
    }

    /// Tick id of the oldest retained entry.
    pub fn oldest_retained(&self) -> u64 {
        self.tail
    }

    pub fn len(&self) -> usize {
        (self.head - self.tail) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

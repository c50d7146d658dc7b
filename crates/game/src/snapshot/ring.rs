use super::state::NetEntityState;
use crate::world::{MAX_NET_SLOTS, World, WorldError};

/// Per-tick state of every networked slot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotEntry {
    pub tick: u64,
    pub states: [NetEntityState; MAX_NET_SLOTS],
}

/// Bounded history of per-tick snapshots.
///
/// One entry is written per authoritative tick, overwriting the oldest
/// once the ring is full. There is no read cursor: the consumer (the
/// transport layer) must drain entries before `capacity` further ticks
/// elapse or they are lost.
#[derive(Debug)]
pub struct SnapshotRing {
    entries: Vec<Option<SnapshotEntry>>,
    capacity: usize,
}

impl SnapshotRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "snapshot history capacity must be nonzero");
        Self {
            entries: vec![None; capacity],
            capacity,
        }
    }

    /// Snapshot every networked slot of `world` under `tick`.
    pub fn record(&mut self, tick: u64, world: &World) -> Result<(), WorldError> {
        let mut states = [NetEntityState::default(); MAX_NET_SLOTS];
        for (slot, state) in states.iter_mut().enumerate() {
            let entity = world.entities.get(world.net_slot(slot))?;
            *state = NetEntityState::capture(entity);
        }
        self.entries[(tick % self.capacity as u64) as usize] = Some(SnapshotEntry { tick, states });
        Ok(())
    }

    /// Entry for `tick`, or `None` if it was never written or has
    /// already been overwritten.
    pub fn get(&self, tick: u64) -> Option<&SnapshotEntry> {
        let index = (tick % self.capacity as u64) as usize;
        self.entries[index].as_ref().filter(|e| e.tick == tick)
    }

    pub fn latest(&self) -> Option<&SnapshotEntry> {
        self.entries
            .iter()
            .filter_map(|e| e.as_ref())
            .max_by_key(|e| e.tick)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

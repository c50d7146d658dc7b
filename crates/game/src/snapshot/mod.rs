mod ring;
mod state;

pub use ring::{SnapshotEntry, SnapshotRing};
pub use state::NetEntityState;

mod clock;
mod tick;

pub use clock::{TICK_RATE, TIME_STEP, TickClock};
pub use tick::{ControlScheme, NET_SPEED, Simulation};

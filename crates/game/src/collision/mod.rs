mod resolver;
mod sat;

pub use resolver::{MAX_ITERATIONS, resolve_all, resolve_entity};
pub use sat::{Contact, polygon_contact};

// Adapters layer: concrete implementations of the domain ports.

pub mod peeringdb;

pub use peeringdb::{PeeringDbClient, DEFAULT_ENDPOINT};

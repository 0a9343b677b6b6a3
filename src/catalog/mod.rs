//! Static configuration catalog
//!
//! The set of simulated architectures ("racks") is fixed at compile time and
//! never mutated. Lookups are by stable string id.

pub mod configurations;

pub use configurations::{all, find, Configuration, CONFIGURATIONS};

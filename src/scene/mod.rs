//! Graph input: loading from JSON and generating test networks.

pub mod generator;
pub mod topology;

pub use generator::{demo_network, generate_network};
pub use topology::TopologyInput;

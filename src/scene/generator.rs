use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::{ConnectionMatrix, GraphData};

/// Node count of the demo network.
pub const DEMO_NODE_COUNT: usize = 96;
/// Seed of the demo network.
pub const DEMO_SEED: u64 = 21;

/// Link probability of the demo network: on average 0.65 links per node and direction.
pub fn demo_link_density() -> f64 {
    0.65 / DEMO_NODE_COUNT as f64
}

/// Random test network with nodes named `"Node {i}"`.
///
/// Weights are uniform in [0, 1). Each ordered pair is linked with probability `link_density`,
/// using a random strength written to both matrix cells. All categories are 0.
pub fn generate_network(count: usize, link_density: f64, seed: u64) -> GraphData<String> {
    let mut rng = StdRng::seed_from_u64(seed);

    let nodes: Vec<String> = (0..count).map(|i| format!("Node {i}")).collect();
    let weights: Vec<f32> = (0..count).map(|_| rng.random::<f32>()).collect();

    let mut connections = ConnectionMatrix::zeros(count);
    for i in 0..count {
        for j in 0..count {
            // nodes never link to themselves
            if i == j {
                continue;
            }
            if rng.random::<f64>() < link_density {
                let strength = rng.random::<f32>();
                connections.set_symmetric(i, j, strength);
            }
        }
    }

    GraphData::new(nodes, weights, connections, vec![0; count])
}

/// The 96-node network the demo binary starts with.
pub fn demo_network() -> GraphData<String> {
    generate_network(DEMO_NODE_COUNT, demo_link_density(), DEMO_SEED)
}

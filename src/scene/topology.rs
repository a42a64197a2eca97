use std::hash::Hash;

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::network::{ConnectionMatrix, GraphData};

/// Network graph input as it arrives from outside, e.g. as JSON.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TopologyInput<T> {
    pub nodes: Vec<T>,
    /// Per-node weight in [0, 1].
    pub weights: Vec<f32>,
    /// Row-major connection strengths, one row per node.
    pub connections: Vec<Vec<f32>>,
    /// Per-node category; all zero when absent.
    #[serde(default)]
    pub categories: Option<Vec<u32>>,
}

impl<T> TopologyInput<T>
where
    T: for<'de> Deserialize<'de>,
{
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid topology JSON")
    }
}

impl<T: Clone + Eq + Hash> TopologyInput<T> {
    /// Check shapes and build the graph data.
    pub fn into_graph_data(self) -> anyhow::Result<GraphData<T>> {
        let count = self.nodes.len();
        ensure!(
            self.weights.len() == count,
            "expected {count} weights, got {}",
            self.weights.len()
        );
        ensure!(
            self.connections.len() == count,
            "expected {count} connection rows, got {}",
            self.connections.len()
        );
        for (row, values) in self.connections.iter().enumerate() {
            ensure!(
                values.len() == count,
                "connection row {row} has {} values, expected {count}",
                values.len()
            );
        }

        let categories = match self.categories {
            Some(categories) => {
                ensure!(
                    categories.len() == count,
                    "expected {count} categories, got {}",
                    categories.len()
                );
                categories
            }
            None => vec![0; count],
        };

        let asymmetric = (0..count)
            .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
            .filter(|&(i, j)| self.connections[i][j] != self.connections[j][i])
            .count();
        if asymmetric > 0 {
            log::warn!("Connection matrix is not symmetric ({asymmetric} mismatched pairs); only the upper triangle forms links.");
        }

        let connections = ConnectionMatrix::from_rows(&self.connections);
        Ok(GraphData::new(self.nodes, self.weights, connections, categories))
    }
}

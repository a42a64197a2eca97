//! Immutable structure of a network graph.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

/// Dense, row-major `n x n` matrix of connection strengths in [0, 1].
///
/// Symmetry is a convention of the caller; nothing here enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionMatrix {
    size: usize,
    values: Vec<f32>,
}

impl ConnectionMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                values.push(f(i, j));
            }
        }
        Self { size, values }
    }

    /// Build from `size` rows of `size` values. Ragged input panics.
    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        let size = rows.len();
        Self::from_fn(size, |i, j| rows[i][j])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.size && j < self.size, "({i}, {j}) outside a {0}x{0} matrix", self.size);
        self.values[i * self.size + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        assert!(i < self.size && j < self.size, "({i}, {j}) outside a {0}x{0} matrix", self.size);
        self.values[i * self.size + j] = value;
    }

    /// Write `value` into both `(i, j)` and `(j, i)`.
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: f32) {
        self.set(i, j, value);
        self.set(j, i, value);
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

impl Index<(usize, usize)> for ConnectionMatrix {
    type Output = f32;

    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        assert!(i < self.size && j < self.size, "({i}, {j}) outside a {0}x{0} matrix", self.size);
        &self.values[i * self.size + j]
    }
}

/// The structure of a network graph: node identities, weights, connection strengths and
/// categories, plus the link list and per-node sums derived from them.
///
/// Never modified after construction. The simulation shares it, it never copies it.
#[derive(Debug, Clone)]
pub struct GraphData<T> {
    nodes: Vec<T>,
    weights: Vec<f32>,
    connections: ConnectionMatrix,
    categories: Vec<u32>,
    node_to_index: HashMap<T, usize>,
    links: Vec<(usize, usize)>,
    sum_connection_strengths: Vec<f32>,
}

impl<T: Clone + Eq + Hash> GraphData<T> {
    /// Derive the link list and connection sums. Input shapes are the caller's responsibility:
    /// all sequences must have the node count as length, and so must the matrix.
    pub fn new(
        nodes: Vec<T>,
        weights: Vec<f32>,
        connections: ConnectionMatrix,
        categories: Vec<u32>,
    ) -> Self {
        let count = nodes.len();

        let mut node_to_index = HashMap::with_capacity(count * 2);
        for (index, node) in nodes.iter().enumerate() {
            if let Some(previous) = node_to_index.insert(node.clone(), index) {
                log::warn!("Duplicate node identity at indices {previous} and {index}; keeping {index}.");
            }
        }

        let mut links = Vec::new();
        let mut sum_connection_strengths: Vec<f32> = Vec::with_capacity(count);
        for i in 0..count {
            let row = connections.row(i);
            for (j, &strength) in row.iter().enumerate().skip(i + 1) {
                if strength > 0.0 {
                    links.push((i, j));
                }
            }
            sum_connection_strengths.push(row.iter().sum::<f32>());
        }

        log::info!("Built network graph with {} nodes and {} links.", count, links.len());

        Self {
            nodes,
            weights,
            connections,
            categories,
            node_to_index,
            links,
            sum_connection_strengths,
        }
    }

    pub fn index_of(&self, node: &T) -> Option<usize> {
        self.node_to_index.get(node).copied()
    }
}

impl<T> GraphData<T> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Per-node weights in [0, 1].
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn connections(&self) -> &ConnectionMatrix {
        &self.connections
    }

    /// Per-node category, used only for colouring.
    pub fn categories(&self) -> &[u32] {
        &self.categories
    }

    /// Unique `(i, j)` pairs with `i < j` and a positive connection strength,
    /// in row-major order of the upper triangle.
    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    /// Row sums of the connection matrix.
    pub fn sum_connection_strengths(&self) -> &[f32] {
        &self.sum_connection_strengths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f32]]) -> ConnectionMatrix {
        let rows: Vec<Vec<f32>> = rows.iter().map(|r| r.to_vec()).collect();
        ConnectionMatrix::from_rows(&rows)
    }

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("n{i}")).collect()
    }

    #[test]
    fn links_follow_upper_triangle() {
        let connections = matrix(&[
            &[0.0, 0.5, 0.0, 0.2],
            &[0.5, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 1.0],
            &[0.2, 0.0, 1.0, 0.0],
        ]);
        let data = GraphData::new(names(4), vec![0.0; 4], connections, vec![0; 4]);
        assert_eq!(data.links(), &[(0, 1), (0, 3), (2, 3)]);
    }

    #[test]
    fn lower_triangle_only_entries_are_not_links() {
        // asymmetric input: only the upper triangle is scanned
        let connections = matrix(&[&[0.0, 0.0], &[0.7, 0.0]]);
        let data = GraphData::new(names(2), vec![0.0; 2], connections, vec![0; 2]);
        assert!(data.links().is_empty());
        assert_eq!(data.sum_connection_strengths(), &[0.0, 0.7]);
    }

    #[test]
    fn diagonal_never_links() {
        let connections = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let data = GraphData::new(names(2), vec![0.0; 2], connections, vec![0; 2]);
        assert!(data.links().is_empty());
    }

    #[test]
    fn sums_are_row_sums() {
        let connections = matrix(&[
            &[0.0, 0.25, 0.5],
            &[0.25, 0.0, 0.0],
            &[0.5, 0.0, 0.0],
        ]);
        let data = GraphData::new(names(3), vec![0.0; 3], connections, vec![0; 3]);
        assert_eq!(data.sum_connection_strengths(), &[0.75, 0.25, 0.5]);
    }

    #[test]
    fn duplicate_identity_maps_to_last_index() {
        let nodes = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let data = GraphData::new(nodes, vec![0.0; 3], ConnectionMatrix::zeros(3), vec![0; 3]);
        assert_eq!(data.index_of(&"a".to_string()), Some(2));
        assert_eq!(data.index_of(&"b".to_string()), Some(1));
        assert_eq!(data.index_of(&"c".to_string()), None);
    }

    #[test]
    fn empty_graph_builds() {
        let data: GraphData<u32> =
            GraphData::new(vec![], vec![], ConnectionMatrix::zeros(0), vec![]);
        assert!(data.is_empty());
        assert!(data.links().is_empty());
    }

    #[test]
    #[should_panic]
    fn out_of_range_lookup_panics() {
        ConnectionMatrix::zeros(2).get(2, 0);
    }
}

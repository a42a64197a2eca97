use std::hash::Hash;

use glam::Vec2;

use super::state::NetworkGraphState;

impl<T> NetworkGraphState<T> {
    /// Node under a view-space point (top-left (0,0), bottom-right (1,1)).
    ///
    /// A node is hit when the point lies inside its rendered radius. Nodes are scanned in index
    /// order and every hit replaces the previous one, so with overlapping nodes the highest
    /// index wins, not the closest node.
    pub fn try_get_mouseover(&self, view_point: Vec2) -> Option<usize> {
        let world = self.camera().current.view_to_world(view_point);
        let cfg = self.config();

        let mut best = None;
        for (index, (position, &weight)) in
            self.positions().iter().zip(self.data().weights()).enumerate()
        {
            if position.distance(world) < cfg.weight_to_scale(weight) {
                best = Some(index);
            }
        }
        best
    }

    /// True for the selected node and every node connected to it in either direction.
    pub fn is_adjacent_to_selected(&self, index: usize) -> bool {
        let count = self.data().len();
        let Some(selected) = self.selected_index().filter(|&s| s < count) else {
            return false;
        };
        if index >= count {
            return false;
        }
        if selected == index {
            return true;
        }

        let connections = self.data().connections();
        connections.get(selected, index) > 0.0 || connections.get(index, selected) > 0.0
    }
}

impl<T: Clone + Default + Eq + Hash> NetworkGraphState<T> {
    /// The selected node identity, or `T::default()` when nothing (valid) is selected.
    pub fn selected_item(&self) -> T {
        self.selected_node().cloned().unwrap_or_default()
    }

    /// Select a node by identity.
    ///
    /// `T::default()` clears the selection, and so does an unknown identity. A node whose
    /// identity equals `T::default()` can therefore only be selected with
    /// [`NetworkGraphState::select_index`].
    pub fn set_selected_item(&mut self, item: &T) {
        let index = if *item == T::default() {
            None
        } else {
            self.data().index_of(item)
        };
        self.select_index(index);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::NetworkGraphConfig;
    use crate::network::data::{ConnectionMatrix, GraphData};

    fn graph(nodes: &[&str]) -> NetworkGraphState<String> {
        let count = nodes.len();
        let mut connections = ConnectionMatrix::zeros(count);
        if count > 2 {
            connections.set_symmetric(0, 1, 0.5);
        }
        let data = GraphData::new(
            nodes.iter().map(|n| n.to_string()).collect(),
            vec![1.0; count],
            connections,
            vec![0; count],
        );
        NetworkGraphState::new(Arc::new(data), NetworkGraphConfig::default())
    }

    #[test]
    fn overlapping_nodes_resolve_to_highest_index() {
        let mut state = graph(&["a", "b", "c"]);
        state.set_position(0, Vec2::ZERO);
        state.set_position(2, Vec2::ZERO);
        assert_eq!(state.try_get_mouseover(Vec2::splat(0.5)), Some(2));
    }

    #[test]
    fn last_hit_wins_even_when_farther() {
        let mut state = graph(&["a", "b"]);
        // weight 1 -> radius 0.2
        state.set_position(0, Vec2::ZERO);
        state.set_position(1, Vec2::new(0.15, 0.0));
        assert_eq!(state.try_get_mouseover(Vec2::splat(0.5)), Some(1));
    }

    #[test]
    fn empty_space_is_no_hit() {
        let mut state = graph(&["a", "b"]);
        state.set_position(0, Vec2::new(2.0, 0.0));
        state.set_position(1, Vec2::new(-2.0, 0.0));
        assert_eq!(state.try_get_mouseover(Vec2::splat(0.5)), None);
    }

    #[test]
    fn hit_test_follows_the_camera() {
        let mut state = graph(&["a"]);
        state.set_position(0, Vec2::new(1.0, 1.0));
        // view centre shows world (-position)
        state.camera_mut().current.position = Vec2::new(-1.0, -1.0);
        assert_eq!(state.try_get_mouseover(Vec2::splat(0.5)), Some(0));
    }

    #[test]
    fn selected_item_round_trips_through_index() {
        let mut state = graph(&["a", "b", "c"]);
        state.set_selected_item(&"b".to_string());
        assert_eq!(state.selected_index(), Some(1));
        assert_eq!(state.selected_item(), "b");

        state.set_selected_item(&"missing".to_string());
        assert_eq!(state.selected_index(), None);
        assert_eq!(state.selected_item(), "");
    }

    #[test]
    fn default_identity_clears_selection() {
        let mut state = graph(&["", "b"]);
        state.select_index(Some(1));
        state.set_selected_item(&String::new());
        assert_eq!(state.selected_index(), None);

        // the node literally named "" is only reachable by index
        state.select_index(Some(0));
        assert_eq!(state.selected_node().map(String::as_str), Some(""));
    }

    #[test]
    fn out_of_range_index_reads_as_default() {
        let mut state = graph(&["a"]);
        state.select_index(Some(7));
        assert_eq!(state.selected_item(), "");
        assert!(state.selected_node().is_none());
    }

    #[test]
    fn adjacency_checks_both_directions() {
        let mut state = graph(&["a", "b", "c"]);
        assert!(!state.is_adjacent_to_selected(0));

        state.select_index(Some(1));
        assert!(state.is_adjacent_to_selected(1));
        assert!(state.is_adjacent_to_selected(0));
        assert!(!state.is_adjacent_to_selected(2));
    }
}

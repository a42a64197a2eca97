//! Force-directed network graph: data, layout simulation, selection and frame export.

pub mod budget;
pub mod data;
mod forces;
pub mod frame;
mod selection;
pub mod state;

use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use glam::Vec2;

pub use budget::{Clock, FrameBudget, SteppingClock, WallClock};
pub use data::{ConnectionMatrix, GraphData};
pub use frame::RenderFrame;
pub use state::{INITIAL_LAYOUT_RADIUS, NetworkGraphState, StepReport};

use crate::camera::DampenedCamera2D;
use crate::config::NetworkGraphConfig;

/// A complete network graph: supplied with data, exposes update and frame export.
#[derive(Debug)]
pub struct NetworkGraph<T> {
    state: NetworkGraphState<T>,
}

impl<T> NetworkGraph<T> {
    /// The graph keeps its own copy of `cfg`.
    pub fn new(data: impl Into<Arc<GraphData<T>>>, cfg: &NetworkGraphConfig) -> Self {
        Self {
            state: NetworkGraphState::new(data.into(), cfg.clone()),
        }
    }

    pub fn with_default_config(data: impl Into<Arc<GraphData<T>>>) -> Self {
        Self::new(data, &NetworkGraphConfig::default())
    }

    pub fn data(&self) -> &Arc<GraphData<T>> {
        self.state.data()
    }

    pub fn state(&self) -> &NetworkGraphState<T> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NetworkGraphState<T> {
        &mut self.state
    }

    pub fn into_state(self) -> NetworkGraphState<T> {
        self.state
    }

    /// The camera used to display the graph. Manipulate its target for zoom and pan.
    pub fn camera(&self) -> &DampenedCamera2D {
        self.state.camera()
    }

    pub fn camera_mut(&mut self) -> &mut DampenedCamera2D {
        self.state.camera_mut()
    }

    /// Advance the simulation by `time_step` seconds.
    ///
    /// Needs no graphics resources. It may run on another thread as long as the caller
    /// synchronizes access to the positions.
    pub fn update(&mut self, time_step: f32) -> StepReport {
        self.state.update(time_step)
    }

    pub fn positions(&self) -> &[Vec2] {
        self.state.positions()
    }

    pub fn try_get_mouseover(&self, view_point: Vec2) -> Option<usize> {
        self.state.try_get_mouseover(view_point)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index()
    }

    pub fn select_index(&mut self, index: Option<usize>) {
        self.state.select_index(index);
    }
}

impl<T: Clone + Default + Eq + Hash> NetworkGraph<T> {
    /// The selected item, `T::default()` when nothing is selected.
    pub fn selected_item(&self) -> T {
        self.state.selected_item()
    }

    pub fn set_selected_item(&mut self, item: &T) {
        self.state.set_selected_item(item);
    }
}

impl<T: Display> NetworkGraph<T> {
    pub fn build_frame(&self) -> RenderFrame {
        self.state.build_frame()
    }
}

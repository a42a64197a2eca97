//! Mutable layout state of a network graph and the per-frame simulation step.

use std::sync::Arc;

use glam::{Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::budget::{Clock, FrameBudget, WallClock};
use super::data::GraphData;
use super::forces;
use crate::camera::DampenedCamera2D;
use crate::config::NetworkGraphConfig;

/// Distance from the origin at which every node starts.
pub const INITIAL_LAYOUT_RADIUS: f32 = 5.0;

/// Upper bound of the per-node inertia values.
const RANDOM_INERTIA_FACTOR: f32 = 0.5;

const CAMERA_VERTICAL_SIZE: f32 = 5.0;

fn is_valid_time_step(time_step: f32) -> bool {
    time_step.is_finite() && time_step >= 0.0
}

/// What a single [`NetworkGraphState::update`] call managed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Sub-steps that ran before the frame budget ran out.
    pub completed_substeps: u32,
    /// Sub-steps the update would run without a budget.
    pub nominal_substeps: u32,
}

impl StepReport {
    /// Report of an update that did nothing.
    pub const SKIPPED: StepReport = StepReport {
        completed_substeps: 0,
        nominal_substeps: 0,
    };

    pub fn is_truncated(&self) -> bool {
        self.completed_substeps < self.nominal_substeps
    }
}

/// Positions and simulation clock of one graph.
///
/// Nothing in here locks. Updating from another thread is fine as long as the caller keeps
/// readers of the positions synchronized with it (see [`crate::worker`]).
#[derive(Debug)]
pub struct NetworkGraphState<T> {
    cfg: NetworkGraphConfig,
    data: Arc<GraphData<T>>,
    camera: DampenedCamera2D,

    positions: Vec<Vec2>,
    inertia: Vec<f32>,
    displacements: Vec<Vec2>,
    /// Simulated seconds since creation.
    runtime: f32,

    selected_index: Option<usize>,
    mouseover: Option<usize>,
}

impl<T> NetworkGraphState<T> {
    pub fn new(data: Arc<GraphData<T>>, cfg: NetworkGraphConfig) -> Self {
        let count = data.len();
        let mut positions = Vec::with_capacity(count);
        let mut inertia = Vec::with_capacity(count);

        // random point on a circle around the origin
        let mut rng = StdRng::seed_from_u64(cfg.layout_seed);
        for _ in 0..count {
            let x = rng.random::<f32>() * 2.0 - 1.0;
            let y = rng.random::<f32>() * 2.0 - 1.0;
            let direction = vec2(x, y).try_normalize().unwrap_or(Vec2::X);
            positions.push(direction * INITIAL_LAYOUT_RADIUS);
            // more falloff towards low inertia
            inertia.push(rng.random::<f32>() * rng.random::<f32>() * RANDOM_INERTIA_FACTOR);
        }

        let mut camera = DampenedCamera2D::with_vertical_size(CAMERA_VERTICAL_SIZE);
        camera.vertical_size_dampening = 0.5;
        camera.position_dampening = 0.1;

        Self {
            cfg,
            data,
            camera,
            positions,
            inertia,
            displacements: vec![Vec2::ZERO; count],
            runtime: 0.0,
            selected_index: None,
            mouseover: None,
        }
    }

    pub fn config(&self) -> &NetworkGraphConfig {
        &self.cfg
    }

    pub fn data(&self) -> &Arc<GraphData<T>> {
        &self.data
    }

    pub fn camera(&self) -> &DampenedCamera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut DampenedCamera2D {
        &mut self.camera
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    /// Per-node inertia in [0, 0.5], biased toward low values.
    /// Generated with the layout but not used by any force yet.
    pub fn inertia(&self) -> &[f32] {
        &self.inertia
    }

    pub fn runtime(&self) -> f32 {
        self.runtime
    }

    pub fn is_stabilized(&self) -> bool {
        self.runtime >= self.cfg.time_to_stabilize.as_secs_f32()
    }

    /// Move a node, e.g. while it is dragged. Panics on an out-of-range index.
    pub fn set_position(&mut self, index: usize, position: Vec2) {
        self.positions[index] = position;
    }

    /// Advance the layout by `time_step` seconds, within the configured wall-clock budget.
    pub fn update(&mut self, time_step: f32) -> StepReport {
        let mut clock = WallClock::new();
        self.update_with_clock(time_step, &mut clock)
    }

    /// As [`Self::update`], with the budget measured on `clock`.
    ///
    /// Negative or non-finite time steps are rejected without touching the camera or the layout.
    pub fn update_with_clock<C: Clock>(&mut self, time_step: f32, clock: &mut C) -> StepReport {
        if !is_valid_time_step(time_step) {
            log::warn!("Ignoring invalid time step {time_step}.");
            return StepReport::SKIPPED;
        }
        self.camera.update(time_step);

        let subsamples = self.cfg.subsamples_per_timestep.max(1);
        let mut report = StepReport {
            completed_substeps: 0,
            nominal_substeps: subsamples,
        };

        let count = self.positions.len();
        if count == 0 {
            return report;
        }

        let base_k = forces::base_k_factor(count);
        let sub_step = time_step / subsamples as f32;
        // speed cap per sub-step: the whole outer step's worth of distance
        let max_step = sub_step * subsamples as f32;

        let mut budget = FrameBudget::start(clock, self.cfg.max_simulation_time_per_frame);
        while report.completed_substeps < subsamples && budget.begin_step() {
            self.substep(base_k, max_step);
            self.runtime += sub_step;
            budget.end_step();
            report.completed_substeps += 1;
        }

        if report.is_truncated() {
            log::trace!(
                "Frame budget exhausted after {}/{} sub-steps ({} nodes).",
                report.completed_substeps,
                report.nominal_substeps,
                count
            );
        }
        report
    }

    fn substep(&mut self, base_k: f32, max_step: f32) {
        self.displacements.fill(Vec2::ZERO);

        forces::accumulate_repulsion(&self.positions, base_k, &mut self.displacements);
        forces::accumulate_center_attraction(
            &self.positions,
            self.runtime,
            self.cfg.time_to_stabilize.as_secs_f32(),
            self.camera.current.effective_aspect_ratio(),
            base_k,
            &mut self.displacements,
        );
        forces::accumulate_link_attraction(
            &self.positions,
            self.data.links(),
            self.data.connections(),
            self.cfg.use_weights_to_scale_link_attraction_forces,
            base_k,
            &mut self.displacements,
        );

        forces::integrate(&mut self.positions, &self.displacements, max_step);
    }

    /// Index of the selected node, as set. May be out of range.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Select by index. `None` clears the selection; out-of-range indices select nothing.
    pub fn select_index(&mut self, index: Option<usize>) {
        if self.selected_index != index {
            log::debug!("Selection changed: {:?} -> {:?}", self.selected_index, index);
        }
        self.selected_index = index;
    }

    /// The selected node, if the selected index is in range.
    pub fn selected_node(&self) -> Option<&T> {
        self.selected_index.and_then(|index| self.data.nodes().get(index))
    }

    /// Node index under the pointer, as last recorded by [`Self::pointer_moved`].
    pub fn mouseover(&self) -> Option<usize> {
        self.mouseover
    }

    /// Record the pointer position (view space) and refresh the mouseover target.
    pub fn pointer_moved(&mut self, view_point: Vec2) -> Option<usize> {
        self.mouseover = self.try_get_mouseover(view_point);
        self.mouseover
    }

    /// Select whatever is under the pointer; clicking empty space clears the selection.
    pub fn click(&mut self) {
        self.select_index(self.mouseover);
    }
}

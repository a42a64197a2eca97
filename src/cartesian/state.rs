use bevy_color::Srgba;
use glam::{Mat4, Vec2, Vec3};

use super::{GraphRegion, Rect};
use super::series::{GraphPoint, GraphSeries, SeriesType};
use crate::camera::{DampenedCamera2D, unproject};
use crate::color::palette_entry;
use crate::config::CartesianGraphSettings;

const DEFAULT_CAMERA_ZOOM: f32 = 1.0;
/// Margin around the data when the camera frames it automatically.
const AUTO_FRAME_MARGIN: f32 = 1.2;

/// Series, camera and selection of a cartesian chart.
#[derive(Debug)]
pub struct CartesianGraphState<T> {
    settings: CartesianGraphSettings,
    series: Vec<GraphSeries<T>>,
    regions: Vec<GraphRegion>,
    camera: DampenedCamera2D,
    /// Viewport size in pixels; zero until set.
    viewport: Vec2,
    /// Non-uniform scale of the y axis.
    pub y_scale: f32,
    bounds: Rect,
    /// If the camera's zoom and position follow the data bounds.
    pub camera_auto_controlled: bool,
    mouseover: Option<(usize, usize)>,
    drag_rect: Option<Rect>,
}

impl<T> CartesianGraphState<T> {
    pub fn new(settings: CartesianGraphSettings) -> Self {
        let mut camera = DampenedCamera2D::with_vertical_size(DEFAULT_CAMERA_ZOOM);
        camera.vertical_size_dampening = 0.5;
        camera.position_dampening = 0.1;

        Self {
            settings,
            series: Vec::new(),
            regions: Vec::new(),
            camera,
            viewport: Vec2::ZERO,
            y_scale: 1.0,
            bounds: Rect::from_corners(Vec2::NEG_ONE, Vec2::ONE),
            camera_auto_controlled: true,
            mouseover: None,
            drag_rect: None,
        }
    }

    pub fn settings(&self) -> &CartesianGraphSettings {
        &self.settings
    }

    /// Add a series. Its colour is taken from the palette in insertion order.
    pub fn add_series(&mut self, series_type: SeriesType, name: impl Into<String>) -> &mut GraphSeries<T> {
        let color = palette_entry(&self.settings.series_colors, self.series.len());
        self.series.push(GraphSeries::new(series_type, name, color));
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    pub fn series(&self) -> &[GraphSeries<T>] {
        &self.series
    }

    pub fn series_mut(&mut self, index: usize) -> Option<&mut GraphSeries<T>> {
        self.series.get_mut(index)
    }

    pub fn add_region(&mut self, bounds: Rect, color: Srgba) -> &mut GraphRegion {
        self.regions.push(GraphRegion { bounds, color });
        let last = self.regions.len() - 1;
        &mut self.regions[last]
    }

    pub fn regions(&self) -> &[GraphRegion] {
        &self.regions
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
    }

    pub fn camera(&self) -> &DampenedCamera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut DampenedCamera2D {
        &mut self.camera
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.set_viewport(width, height);
    }

    /// Bounds of the visible data as of the last [`Self::update`].
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Recompute the data bounds, frame them if the camera is auto-controlled and move the camera.
    pub fn update(&mut self, time_step: f32) {
        self.bounds = self.data_bounds();

        if self.camera_auto_controlled {
            let Rect { min, max } = self.bounds;
            let y_size = AUTO_FRAME_MARGIN * max.y.abs().max(min.y.abs()) * self.y_scale;
            let x_size = AUTO_FRAME_MARGIN * max.x.abs().max(min.x.abs());
            self.camera.target.vertical_size = y_size.max(x_size);

            let center = self.bounds.center();
            self.camera.target.position = Vec2::new(-center.x, -center.y * self.y_scale);
        }

        self.camera.update(time_step);
    }

    // always contains the origin, and degenerate axes are widened to [-1, 1] around their value
    fn data_bounds(&self) -> Rect {
        let mut min = Vec2::ZERO;
        let mut max = Vec2::ZERO;

        for series in self.series.iter().filter(|s| s.visible) {
            let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
                series.x_stats().min(),
                series.x_stats().max(),
                series.y_stats().min(),
                series.y_stats().max(),
            ) else {
                continue;
            };
            min = min.min(Vec2::new(min_x, min_y));
            max = max.max(Vec2::new(max_x, max_y));
        }

        if min.x == max.x {
            min.x -= 1.0;
            max.x += 1.0;
        }
        if min.y == max.y {
            min.y -= 1.0;
            max.y += 1.0;
        }
        Rect { min, max }
    }

    fn view_to_world(&self, view_point: Vec2) -> Vec2 {
        let view_proj = self.camera.current.view_projection()
            * Mat4::from_scale(Vec3::new(1.0, self.y_scale, 1.0));
        unproject(view_proj, view_point)
    }

    fn hit_test(&self, view_point: Vec2) -> Option<(usize, usize)> {
        if self.viewport.y <= 0.0 {
            return None;
        }
        let world = self.view_to_world(view_point);
        let radius = self.camera.current.vertical_size / self.viewport.y * self.settings.point_size;

        let mut best = None;
        let mut best_distance = f32::INFINITY;

        // reverse drawing order, so the topmost point wins ties
        for (series_index, series) in self.series.iter().enumerate().rev() {
            if !series.visible {
                continue;
            }
            for (point_index, point) in series.points().iter().enumerate().rev() {
                let mut delta = point.position() - world;
                delta.y *= self.y_scale;
                let distance = delta.length();
                if distance < radius && distance < best_distance {
                    best = Some((series_index, point_index));
                    best_distance = distance;
                }
            }
        }
        best
    }

    /// The point closest to `view_point` (view space, top-left (0,0)) within one point size.
    pub fn try_get_mouseover(&self, view_point: Vec2) -> Option<&GraphPoint<T>> {
        self.hit_test(view_point)
            .map(|(series, point)| &self.series[series].points()[point])
    }

    /// Record the pointer position (view space) and refresh the mouseover target.
    pub fn pointer_moved(&mut self, view_point: Vec2) -> Option<&GraphPoint<T>> {
        self.mouseover = self.hit_test(view_point);
        self.mouseover()
    }

    pub fn mouseover(&self) -> Option<&GraphPoint<T>> {
        self.mouseover
            .and_then(|(series, point)| self.series.get(series)?.points().get(point))
    }

    /// The value under the pointer, if any.
    pub fn click(&self) -> Option<&T> {
        self.mouseover().map(|point| &point.value)
    }

    /// Set the drag selection rectangle, in view space.
    pub fn set_drag_rect(&mut self, from: Vec2, to: Vec2) {
        self.drag_rect = Some(Rect::from_corners(from, to));
    }

    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag_rect
    }
}

impl<T: Clone> CartesianGraphState<T> {
    /// Values of every visible point inside the drag rectangle, in reverse drawing order.
    /// Clears the rectangle.
    pub fn finish_drag(&mut self) -> Vec<T> {
        let Some(drag) = self.drag_rect.take() else {
            return Vec::new();
        };
        let target = Rect::from_corners(self.view_to_world(drag.min), self.view_to_world(drag.max));

        let selected: Vec<T> = self
            .series
            .iter()
            .rev()
            .filter(|series| series.visible)
            .flat_map(|series| series.points().iter().rev())
            .filter(|point| target.contains(point.position()))
            .map(|point| point.value.clone())
            .collect();
        log::debug!("Drag selected {} points.", selected.len());
        selected
    }
}

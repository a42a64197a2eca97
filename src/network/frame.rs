//! Snapshot of everything the external renderer needs to draw one network graph frame.

use std::fmt::Display;

use crate::camera::CameraUniform;
use crate::color::{palette_entry, to_linear_array, to_linear_array_with_alpha};
use crate::config::{LabelDisplayMode, LabelScaleMode};
use crate::models::{CircleInstance, LabelInstance, LineVertex};

use super::state::NetworkGraphState;

/// Label height relative to the camera's vertical size in [`LabelScaleMode::Fixed`].
const FIXED_LABEL_SCALE: f32 = 0.025;
/// Label height in world units in [`LabelScaleMode::Scaled`].
const SCALED_LABEL_SIZE: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub camera: CameraUniform,
    pub clear_color: [f32; 4],
    pub circles: Vec<CircleInstance>,
    /// Two vertices per link.
    pub lines: Vec<LineVertex>,
    /// Empty when labels are disabled.
    pub labels: Vec<LabelInstance>,
}

impl<T: Display> NetworkGraphState<T> {
    /// Opacity of a node label under the configured display mode.
    fn label_opacity(&self, index: usize) -> f32 {
        let visible = match self.config().label_display_mode {
            LabelDisplayMode::Never => false,
            LabelDisplayMode::Always => true,
            LabelDisplayMode::Selected => self.selected_index() == Some(index),
            LabelDisplayMode::SelectedAndAdjacent => self.is_adjacent_to_selected(index),
        };
        if visible { 1.0 } else { 0.0 }
    }

    pub fn build_frame(&self) -> RenderFrame {
        let cfg = self.config();
        let data = self.data();
        let positions = self.positions();
        let selected = self.selected_index();

        let circles = positions
            .iter()
            .zip(data.weights())
            .zip(data.categories())
            .enumerate()
            .map(|(index, ((position, &weight), &category))| {
                let color = if selected == Some(index) {
                    cfg.selected_color
                } else {
                    palette_entry(&cfg.category_colors, category as usize)
                };
                CircleInstance {
                    position: position.to_array(),
                    radius_scale: cfg.weight_to_scale(weight),
                    color: to_linear_array(color),
                }
            })
            .collect();

        let link_color = to_linear_array(cfg.link_color);
        let lines = data
            .links()
            .iter()
            .flat_map(|&(left, right)| {
                [
                    LineVertex {
                        position: positions[left].to_array(),
                        color: link_color,
                    },
                    LineVertex {
                        position: positions[right].to_array(),
                        color: link_color,
                    },
                ]
            })
            .collect();

        let labels = if cfg.label_display_mode == LabelDisplayMode::Never {
            Vec::new()
        } else {
            let size = match cfg.label_scale_mode {
                LabelScaleMode::Fixed => FIXED_LABEL_SCALE * self.camera().current.vertical_size,
                LabelScaleMode::Scaled => SCALED_LABEL_SIZE,
            };
            data.nodes()
                .iter()
                .zip(positions)
                .enumerate()
                .map(|(index, (node, position))| {
                    let color = if selected == Some(index) {
                        cfg.selected_label_color
                    } else {
                        cfg.label_color
                    };
                    LabelInstance {
                        text: node.to_string(),
                        position: position.to_array(),
                        height: size * cfg.text_scale,
                        color: to_linear_array_with_alpha(color, self.label_opacity(index)),
                    }
                })
                .collect()
        };

        RenderFrame {
            camera: CameraUniform::from_camera(&self.camera().current),
            clear_color: to_linear_array(cfg.background_color),
            circles,
            lines,
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy_color::Srgba;
    use glam::Vec2;

    use super::*;
    use crate::config::NetworkGraphConfig;
    use crate::network::data::{ConnectionMatrix, GraphData};

    fn state(cfg: NetworkGraphConfig) -> NetworkGraphState<&'static str> {
        let mut connections = ConnectionMatrix::zeros(3);
        connections.set_symmetric(0, 1, 1.0);
        let data = GraphData::new(vec!["a", "b", "c"], vec![0.0, 0.5, 1.0], connections, vec![0, 1, 2]);
        NetworkGraphState::new(Arc::new(data), cfg)
    }

    fn two_colors() -> NetworkGraphConfig {
        NetworkGraphConfig {
            category_colors: vec![Srgba::new(1.0, 0.0, 0.0, 1.0), Srgba::new(0.0, 0.0, 1.0, 1.0)],
            ..Default::default()
        }
    }

    #[test]
    fn one_circle_per_node_sized_by_weight() {
        let frame = state(NetworkGraphConfig::default()).build_frame();
        assert_eq!(frame.circles.len(), 3);
        assert!((frame.circles[0].radius_scale - 0.02).abs() < 1e-6);
        assert!((frame.circles[2].radius_scale - 0.2).abs() < 1e-6);
    }

    #[test]
    fn categories_wrap_around_the_palette() {
        let frame = state(two_colors()).build_frame();
        assert_eq!(frame.circles[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(frame.circles[1].color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(frame.circles[2].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn selected_node_uses_highlight_color() {
        let cfg = two_colors();
        let highlight = to_linear_array(cfg.selected_color);
        let mut state = state(cfg);
        state.select_index(Some(1));
        assert_eq!(state.build_frame().circles[1].color, highlight);
    }

    #[test]
    fn links_become_line_pairs() {
        let mut state = state(NetworkGraphConfig::default());
        state.set_position(0, Vec2::new(1.0, 0.0));
        state.set_position(1, Vec2::new(0.0, 1.0));
        let frame = state.build_frame();
        assert_eq!(frame.lines.len(), 2);
        assert_eq!(frame.lines[0].position, [1.0, 0.0]);
        assert_eq!(frame.lines[1].position, [0.0, 1.0]);
    }

    #[test]
    fn labels_show_selected_and_adjacent() {
        let mut state = state(NetworkGraphConfig::default());
        state.select_index(Some(0));
        let frame = state.build_frame();
        let alphas: Vec<f32> = frame.labels.iter().map(|l| l.color[3]).collect();
        assert_eq!(alphas, vec![1.0, 1.0, 0.0]);
        assert_eq!(frame.labels[2].text, "c");
    }

    #[test]
    fn never_mode_emits_no_labels() {
        let cfg = NetworkGraphConfig {
            label_display_mode: LabelDisplayMode::Never,
            ..Default::default()
        };
        assert!(state(cfg).build_frame().labels.is_empty());
    }

    #[test]
    fn fixed_labels_follow_camera_zoom() {
        let state = state(NetworkGraphConfig {
            label_display_mode: LabelDisplayMode::Always,
            ..Default::default()
        });
        let frame = state.build_frame();
        // 0.025 * vertical size 5 * text scale 0.5
        assert!((frame.labels[0].height - 0.0625).abs() < 1e-6);
        assert!(frame.labels.iter().all(|l| l.color[3] == 1.0));
    }
}

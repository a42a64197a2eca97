// src/config.rs
use std::time::Duration;

use anyhow::Context;
use bevy_color::Srgba;
use serde::{Deserialize, Serialize};

use crate::color::{parse_hex, rgba_u8};

/// When node labels are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelDisplayMode {
    /// Labels are never shown.
    Never,
    /// Labels are always shown.
    Always,
    /// Only the label of the selected node is shown.
    Selected,
    /// The selected node and every node directly connected to it.
    #[default]
    SelectedAndAdjacent,
}

/// How labels react to zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelScaleMode {
    /// Constant size relative to the screen; labels do not grow when zooming in.
    #[default]
    Fixed,
    /// Proportional to the node circles; labels grow and shrink with the zoom.
    Scaled,
}

/// Durations are written as floating point seconds in config files.
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

/// Configuration of a network graph.
///
/// The defaults work for nearly every graph. A graph copies its configuration when it is
/// created, so changing a config afterwards does not affect graphs already built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkGraphConfig {
    pub background_color: Srgba,
    /// Category colours. Categories beyond the end of the list wrap around.
    pub category_colors: Vec<Srgba>,
    /// Highlight colour of the selected node.
    pub selected_color: Srgba,
    pub selected_label_color: Srgba,
    pub link_color: Srgba,
    pub label_color: Srgba,

    /// Seed of the initial random layout. Change it for a different arrangement of the same data.
    pub layout_seed: u64,
    /// The layout first runs in an unstable, unfolding regime and switches to a converging one
    /// once this much simulated time has passed. Longer values unfold tangled graphs better.
    #[serde(with = "seconds")]
    pub time_to_stabilize: Duration,
    /// Number of sub-steps each update is divided into. Lower is faster and less accurate.
    pub subsamples_per_timestep: u32,
    /// Display size of a node with weight 0.
    pub min_node_scale: f32,
    /// Display size of a node with weight 1.
    pub max_node_scale: f32,
    /// Scale link attraction by connection strength. Leave off except for extremely connected
    /// graphs that cannot untangle themselves otherwise.
    pub use_weights_to_scale_link_attraction_forces: bool,
    /// Wall-clock ceiling for the simulation work of a single update.
    #[serde(with = "seconds")]
    pub max_simulation_time_per_frame: Duration,

    /// Label size relative to the node size.
    pub text_scale: f32,
    pub label_display_mode: LabelDisplayMode,
    pub label_scale_mode: LabelScaleMode,
}

impl Default for NetworkGraphConfig {
    fn default() -> Self {
        Self {
            background_color: rgba_u8(0x21, 0x21, 0x21, 0xff),
            category_colors: vec![rgba_u8(0x00, 0xb0, 0xff, 0xff)],
            selected_color: rgba_u8(0xff, 0x3d, 0x00, 0xff),
            selected_label_color: Srgba::WHITE,
            link_color: Srgba::WHITE,
            label_color: Srgba::WHITE,
            layout_seed: 0,
            time_to_stabilize: Duration::from_secs(2),
            subsamples_per_timestep: 10,
            min_node_scale: 0.1,
            max_node_scale: 1.0,
            use_weights_to_scale_link_attraction_forces: false,
            max_simulation_time_per_frame: Duration::from_millis(10),
            text_scale: 0.5,
            label_display_mode: LabelDisplayMode::default(),
            label_scale_mode: LabelScaleMode::default(),
        }
    }
}

impl NetworkGraphConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid network graph config")
    }

    /// Rendered radius of a node with the given weight.
    pub fn weight_to_scale(&self, weight: f32) -> f32 {
        0.2 * (self.min_node_scale + (self.max_node_scale - self.min_node_scale) * weight)
    }
}

/// Configuration of the cartesian (scatter/line) chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianGraphSettings {
    pub background_color: Srgba,
    /// Series colours, assigned in insertion order and wrapping around.
    pub series_colors: Vec<Srgba>,
    pub selected_color: Srgba,
    pub label_color: Srgba,
    /// Point diameter in pixels.
    pub point_size: f32,
    /// Line width in pixels.
    pub line_size: f32,
}

const SERIES_PALETTE: [&str; 8] = [
    "#f44336", "#9c27b0", "#3f51b5", "#03a9f4", "#009688", "#8bc34a", "#ffeb3b", "#ff9800",
];

impl Default for CartesianGraphSettings {
    fn default() -> Self {
        Self {
            background_color: rgba_u8(0x21, 0x21, 0x21, 0xff),
            series_colors: SERIES_PALETTE
                .iter()
                .filter_map(|code| parse_hex(code).ok())
                .collect(),
            selected_color: rgba_u8(0xff, 0x3d, 0x00, 0xff),
            label_color: Srgba::WHITE,
            point_size: 7.0,
            line_size: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_to_scale_interpolates() {
        let cfg = NetworkGraphConfig::default();
        assert!((cfg.weight_to_scale(0.0) - 0.02).abs() < 1e-6);
        assert!((cfg.weight_to_scale(1.0) - 0.2).abs() < 1e-6);
        assert!((cfg.weight_to_scale(0.5) - 0.11).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = NetworkGraphConfig::from_json(
            r#"{ "layout_seed": 7, "time_to_stabilize": 0.5, "label_display_mode": "always" }"#,
        )
        .unwrap();
        assert_eq!(cfg.layout_seed, 7);
        assert_eq!(cfg.time_to_stabilize, Duration::from_millis(500));
        assert_eq!(cfg.label_display_mode, LabelDisplayMode::Always);
        assert_eq!(cfg.subsamples_per_timestep, 10);
        assert_eq!(cfg.max_simulation_time_per_frame, Duration::from_millis(10));
    }

    #[test]
    fn negative_duration_is_rejected() {
        assert!(NetworkGraphConfig::from_json(r#"{ "time_to_stabilize": -1.0 }"#).is_err());
    }

    #[test]
    fn default_series_palette_is_complete() {
        assert_eq!(CartesianGraphSettings::default().series_colors.len(), 8);
    }
}

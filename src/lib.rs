use std::fs;
use std::path::Path;

use anyhow::Context;
use instant::Instant;
use serde::Serialize;

pub mod camera;
pub mod cartesian;
pub mod color;
pub mod commands;
pub mod config;
pub mod models;
pub mod network;
pub mod scene;
pub mod worker;

pub use cartesian::CartesianGraphState;
pub use commands::LayoutCommand;
pub use config::{CartesianGraphSettings, NetworkGraphConfig};
pub use network::{GraphData, NetworkGraph};
pub use worker::{LayoutWorker, PositionSnapshot};

use scene::TopologyInput;

/// Frames simulated by the demo.
const DEMO_FRAMES: u32 = 300;
const DEMO_TIME_STEP: f32 = 1.0 / 60.0;

/// Final layout written to stdout by the demo.
#[derive(Serialize, Debug)]
struct LayoutOutput<'a> {
    nodes: &'a [String],
    positions: Vec<[f32; 2]>,
    runtime: f32,
}

fn load_graph(topology: Option<&Path>) -> anyhow::Result<GraphData<String>> {
    match topology {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read topology {}", path.display()))?;
            TopologyInput::<String>::from_json(&json)?.into_graph_data()
        }
        None => Ok(scene::demo_network()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NetworkGraphConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            NetworkGraphConfig::from_json(&json)
        }
        None => Ok(NetworkGraphConfig::default()),
    }
}

/// Headless demo: lay out a graph for a few seconds of simulated time and print the result.
///
/// Arguments: optional topology JSON path, then optional config JSON path.
pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let data = load_graph(args.first().map(Path::new))?;
    let cfg = load_config(args.get(1).map(Path::new))?;
    log::info!(
        "Starting layout of {} nodes with {} links.",
        data.len(),
        data.links().len()
    );

    let mut graph = NetworkGraph::new(data, &cfg);
    graph.camera_mut().set_viewport(1280, 720);

    let started = Instant::now();
    let mut last_second = started;
    let mut frames_in_second = 0u32;
    let mut truncated_frames = 0u32;
    let mut total_substeps = 0u64;

    for _ in 0..DEMO_FRAMES {
        let report = graph.update(DEMO_TIME_STEP);
        total_substeps += u64::from(report.completed_substeps);
        if report.is_truncated() {
            truncated_frames += 1;
        }

        frames_in_second += 1;
        let now = Instant::now();
        if (now - last_second).as_secs_f32() >= 1.0 {
            log::info!("{frames_in_second} fps");
            frames_in_second = 0;
            last_second = now;
        }
    }

    let elapsed = started.elapsed().as_secs_f32();
    log::info!(
        "Simulated {:.2}s in {:.3}s ({:.0} fps), {} sub-steps, {} frames over budget.",
        graph.state().runtime(),
        elapsed,
        DEMO_FRAMES as f32 / elapsed.max(f32::EPSILON),
        total_substeps,
        truncated_frames
    );

    let frame = graph.build_frame();
    log::debug!(
        "Final frame: {} circles, {} line vertices, {} labels.",
        frame.circles.len(),
        frame.lines.len(),
        frame.labels.len()
    );

    let output = LayoutOutput {
        nodes: graph.data().nodes(),
        positions: graph.positions().iter().map(|p| p.to_array()).collect(),
        runtime: graph.state().runtime(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

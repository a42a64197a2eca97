// src/worker.rs
// Runs the layout simulation on its own thread, driven by commands over flume channels.
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, anyhow};
use glam::Vec2;

use crate::commands::{CommandOutcome, LayoutCommand};
use crate::network::{NetworkGraph, NetworkGraphState};

/// Positions as published by the worker after each applied command.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot {
    pub positions: Vec<Vec2>,
    pub selected_index: Option<usize>,
    /// Simulated seconds at the time of the snapshot.
    pub runtime: f32,
    /// Sub-steps run by the step that produced this snapshot; 0 for non-step commands.
    pub substeps: u32,
}

impl PositionSnapshot {
    fn capture<T>(state: &NetworkGraphState<T>, substeps: u32) -> Self {
        Self {
            positions: state.positions().to_vec(),
            selected_index: state.selected_index(),
            runtime: state.runtime(),
            substeps,
        }
    }
}

/// Offer `snapshot` to the reader, replacing one it has not picked up yet.
fn publish(
    tx: &flume::Sender<PositionSnapshot>,
    stale: &flume::Receiver<PositionSnapshot>,
    snapshot: PositionSnapshot,
) {
    if let Err(flume::TrySendError::Full(snapshot)) = tx.try_send(snapshot) {
        if stale.try_recv().is_ok() {
            log::trace!("Dropped a snapshot the reader never picked up.");
        }
        // only this thread sends, so the slot is free now
        let _ = tx.try_send(snapshot);
    }
}

/// Handle to a layout running on its own thread.
///
/// At most one unread snapshot is kept: a reader that falls behind sees the newest positions,
/// never a backlog.
pub struct LayoutWorker {
    commands: flume::Sender<LayoutCommand>,
    snapshots: flume::Receiver<PositionSnapshot>,
    latest: Option<PositionSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl LayoutWorker {
    /// Move `graph` onto a new thread. An initial snapshot is published right away.
    pub fn spawn<T>(graph: NetworkGraph<T>) -> anyhow::Result<Self>
    where
        T: Send + Sync + 'static,
    {
        let (command_tx, command_rx) = flume::unbounded::<LayoutCommand>();
        // holds only the newest snapshot; the worker keeps a receiver to evict a stale one
        let (snapshot_tx, snapshot_rx) = flume::bounded::<PositionSnapshot>(1);
        let stale_rx = snapshot_rx.clone();
        let mut state = graph.into_state();

        let handle = thread::Builder::new()
            .name("forceview-layout".into())
            .spawn(move || {
                log::info!("Layout worker started with {} nodes.", state.positions().len());
                publish(&snapshot_tx, &stale_rx, PositionSnapshot::capture(&state, 0));

                // also ends when every sender is gone
                for command in command_rx.iter() {
                    let substeps = match state.process_command(command) {
                        CommandOutcome::Shutdown => break,
                        CommandOutcome::Ignored => continue,
                        CommandOutcome::Stepped(report) => report.completed_substeps,
                        CommandOutcome::Updated => 0,
                    };
                    publish(&snapshot_tx, &stale_rx, PositionSnapshot::capture(&state, substeps));
                }
                log::info!("Layout worker stopped at runtime {:.3}s.", state.runtime());
            })
            .context("failed to spawn layout worker thread")?;

        Ok(Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            latest: None,
            handle: Some(handle),
        })
    }

    pub fn send(&self, command: LayoutCommand) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("layout worker has stopped"))
    }

    pub fn step(&self, time_step: f32) -> anyhow::Result<()> {
        self.send(LayoutCommand::Step(time_step))
    }

    pub fn select_index(&self, index: Option<usize>) -> anyhow::Result<()> {
        self.send(LayoutCommand::SelectIndex(index))
    }

    pub fn set_position(&self, index: usize, position: Vec2) -> anyhow::Result<()> {
        self.send(LayoutCommand::SetPosition { index, position })
    }

    /// Newest snapshot published so far, without blocking.
    pub fn latest_snapshot(&mut self) -> Option<&PositionSnapshot> {
        if let Some(snapshot) = self.snapshots.try_iter().last() {
            self.latest = Some(snapshot);
        }
        self.latest.as_ref()
    }

    /// Block until a snapshot newer than the last one returned arrives.
    pub fn wait_for_snapshot(&mut self, timeout: Duration) -> anyhow::Result<&PositionSnapshot> {
        let snapshot = self
            .snapshots
            .recv_timeout(timeout)
            .context("no snapshot from layout worker")?;
        Ok(&*self.latest.insert(snapshot))
    }

    /// Stop the thread and wait for it to finish.
    pub fn shutdown(mut self) -> anyhow::Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // the thread may already be gone, joining reports how it ended
        let _ = self.commands.send(LayoutCommand::Shutdown);
        handle
            .join()
            .map_err(|_| anyhow!("layout worker thread panicked"))
    }
}

impl Drop for LayoutWorker {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::generate_network;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn publishes_initial_snapshot() {
        let graph = NetworkGraph::with_default_config(generate_network(8, 0.2, 3));
        let expected = graph.positions().to_vec();
        let mut worker = LayoutWorker::spawn(graph).unwrap();
        let snapshot = worker.wait_for_snapshot(TIMEOUT).unwrap();
        assert_eq!(snapshot.positions, expected);
        assert_eq!(snapshot.runtime, 0.0);
        worker.shutdown().unwrap();
    }

    #[test]
    fn step_advances_runtime() {
        let graph = NetworkGraph::with_default_config(generate_network(8, 0.2, 3));
        let mut worker = LayoutWorker::spawn(graph).unwrap();
        worker.wait_for_snapshot(TIMEOUT).unwrap();

        worker.step(0.1).unwrap();
        let snapshot = worker.wait_for_snapshot(TIMEOUT).unwrap().clone();
        assert!(snapshot.substeps > 0);
        assert!(snapshot.runtime > 0.0);
        assert!(snapshot.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn selection_and_drag_are_published() {
        let graph = NetworkGraph::with_default_config(generate_network(4, 0.0, 1));
        let mut worker = LayoutWorker::spawn(graph).unwrap();
        worker.wait_for_snapshot(TIMEOUT).unwrap();

        worker.select_index(Some(2)).unwrap();
        worker.set_position(2, Vec2::new(1.0, 1.0)).unwrap();
        let snapshot = loop {
            let snapshot = worker.wait_for_snapshot(TIMEOUT).unwrap();
            if snapshot.positions[2] == Vec2::new(1.0, 1.0) {
                break snapshot.clone();
            }
        };
        assert_eq!(snapshot.selected_index, Some(2));
    }

    #[test]
    fn slow_reader_sees_only_the_newest_snapshot() {
        let graph = NetworkGraph::with_default_config(generate_network(6, 0.2, 2));
        let mut worker = LayoutWorker::spawn(graph).unwrap();
        worker.wait_for_snapshot(TIMEOUT).unwrap();

        for _ in 0..50 {
            worker.step(1.0 / 60.0).unwrap();
        }
        // a marker command; once it is applied every step before it has run too
        worker.select_index(Some(1)).unwrap();
        let snapshot = loop {
            let snapshot = worker.wait_for_snapshot(TIMEOUT).unwrap();
            if snapshot.selected_index == Some(1) {
                break snapshot.clone();
            }
        };

        assert!(worker.snapshots.len() <= 1);
        assert!((snapshot.runtime - 50.0 / 60.0).abs() < 1e-3);
        assert_eq!(worker.latest_snapshot(), Some(&snapshot));
    }

    #[test]
    fn send_after_shutdown_fails() {
        let graph = NetworkGraph::with_default_config(generate_network(2, 0.0, 1));
        let mut worker = LayoutWorker::spawn(graph).unwrap();
        worker.send(LayoutCommand::Shutdown).unwrap();
        if let Some(handle) = worker.handle.take() {
            handle.join().unwrap();
        }
        assert!(worker.step(0.1).is_err());
    }
}

// src/commands.rs
use glam::Vec2;

use crate::network::{NetworkGraphState, StepReport};

/// Commands accepted by a running layout, e.g. from a UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    /// Advance the simulation by this many seconds.
    Step(f32),
    /// Select a node by index, or clear the selection.
    SelectIndex(Option<usize>),
    /// Move a node, e.g. while it is dragged.
    SetPosition { index: usize, position: Vec2 },
    Shutdown,
}

/// What happened when a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Stepped(StepReport),
    Updated,
    Ignored,
    Shutdown,
}

impl<T> NetworkGraphState<T> {
    pub fn process_command(&mut self, command: LayoutCommand) -> CommandOutcome {
        match command {
            LayoutCommand::Step(time_step) => {
                let report = self.update(time_step);
                if report == StepReport::SKIPPED {
                    return CommandOutcome::Ignored;
                }
                CommandOutcome::Stepped(report)
            }
            LayoutCommand::SelectIndex(index) => {
                self.select_index(index);
                CommandOutcome::Updated
            }
            LayoutCommand::SetPosition { index, position } => {
                if index >= self.positions().len() {
                    log::warn!(
                        "SetPosition references non-existent node index {index} ({} nodes).",
                        self.positions().len()
                    );
                    return CommandOutcome::Ignored;
                }
                self.set_position(index, position);
                CommandOutcome::Updated
            }
            LayoutCommand::Shutdown => CommandOutcome::Shutdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkGraphConfig;
    use crate::network::{ConnectionMatrix, GraphData};
    use std::sync::Arc;

    fn state() -> NetworkGraphState<u32> {
        let data = GraphData::new(vec![1, 2], vec![0.5, 0.5], ConnectionMatrix::zeros(2), vec![0, 0]);
        NetworkGraphState::new(Arc::new(data), NetworkGraphConfig::default())
    }

    #[test]
    fn set_position_out_of_range_is_ignored() {
        let mut state = state();
        let before = state.positions().to_vec();
        let outcome = state.process_command(LayoutCommand::SetPosition {
            index: 7,
            position: Vec2::ONE,
        });
        assert_eq!(outcome, CommandOutcome::Ignored);
        assert_eq!(state.positions(), &before[..]);
    }

    #[test]
    fn set_position_moves_node() {
        let mut state = state();
        state.process_command(LayoutCommand::SetPosition {
            index: 1,
            position: Vec2::new(3.0, 4.0),
        });
        assert_eq!(state.positions()[1], Vec2::new(3.0, 4.0));
    }

    #[test]
    fn negative_step_is_ignored() {
        let mut state = state();
        assert_eq!(state.process_command(LayoutCommand::Step(-1.0)), CommandOutcome::Ignored);
        assert_eq!(state.runtime(), 0.0);
    }

    #[test]
    fn select_and_shutdown() {
        let mut state = state();
        assert_eq!(
            state.process_command(LayoutCommand::SelectIndex(Some(1))),
            CommandOutcome::Updated
        );
        assert_eq!(state.selected_index(), Some(1));
        assert_eq!(state.process_command(LayoutCommand::Shutdown), CommandOutcome::Shutdown);
    }
}

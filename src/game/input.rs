use super::{Flow, Game};
use crate::sim::{Buttons, InputCmd};

/// Input collected by the window between tics.
///
/// Movement axes follow the latest frame. Button presses and typed
/// characters accumulate until a tic consumes them, so a frame on which no
/// tic is due does not lose them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingInput {
    cmd: InputCmd,
    typed: Vec<char>,
}

impl PendingInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one frame of input.
    pub fn push(&mut self, frame: InputCmd, typed: impl IntoIterator<Item = char>) {
        self.cmd.forward = frame.forward;
        self.cmd.turn = frame.turn;
        self.cmd.buttons |= frame.buttons;
        self.typed.extend(typed);
    }

    pub fn buttons(&self) -> Buttons {
        self.cmd.buttons
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// Run `tics` updates. The first one gets the buttons and characters,
    /// which are then cleared; the rest only move.
    pub fn run(&mut self, game: &mut Game, tics: u32) -> Flow {
        for tic in 0..tics {
            let flow = if tic == 0 {
                let flow = game.update(&self.cmd, &self.typed);
                self.cmd.buttons = Buttons::empty();
                self.typed.clear();
                flow
            } else {
                game.update(&self.cmd, &[])
            };
            if flow == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }
}

//! Key bindings and the command dispatch table.

use super::ViewState;
use crossterm::event::KeyCode;
use std::collections::HashMap;

/// A pure state transition triggered by a command.
pub type Transition = fn(ViewState) -> ViewState;

/// Commands a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the next frame.
    Advance,
    /// Show the previous frame.
    Retreat,
    /// Toggle between primary and reciprocal datasets.
    SwitchDataset,
    /// Copy the current frame to the clipboard.
    CopyFrame,
    /// Close the viewer.
    Quit,
}

impl Command {
    /// State transition for navigation commands.
    ///
    /// Commands that act outside the view state (copy, quit) have none.
    pub fn transition(self) -> Option<Transition> {
        match self {
            Command::Advance => Some(ViewState::advance),
            Command::Retreat => Some(ViewState::retreat),
            Command::SwitchDataset => Some(ViewState::switch_dataset),
            Command::CopyFrame | Command::Quit => None,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Command::Advance => "next",
            Command::Retreat => "prev",
            Command::SwitchDataset => "reciprocal",
            Command::CopyFrame => "copy",
            Command::Quit => "quit",
        }
    }
}

/// Table from key codes to commands.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyCode, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = [
            (KeyCode::Left, Command::Retreat),
            (KeyCode::Down, Command::Retreat),
            (KeyCode::Char('h'), Command::Retreat),
            (KeyCode::Char('j'), Command::Retreat),
            (KeyCode::Right, Command::Advance),
            (KeyCode::Up, Command::Advance),
            (KeyCode::Char('l'), Command::Advance),
            (KeyCode::Char('k'), Command::Advance),
            (KeyCode::Char('r'), Command::SwitchDataset),
            (KeyCode::Char('y'), Command::CopyFrame),
            (KeyCode::Char('q'), Command::Quit),
            (KeyCode::Esc, Command::Quit),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Keymap {
    /// Look up the command bound to a key.
    pub fn lookup(&self, code: KeyCode) -> Option<Command> {
        self.bindings.get(&code).copied()
    }

    /// Every key bound to a command, in no particular order.
    pub fn keys_for(&self, command: Command) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(code, _)| *code)
            .collect()
    }

    /// Apply the transition bound to a key, if any.
    ///
    /// Unbound keys and non-navigation commands leave the state unchanged.
    pub fn apply(&self, state: ViewState, code: KeyCode) -> ViewState {
        match self.lookup(code).and_then(Command::transition) {
            Some(transition) => transition(state),
            None => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::Pager;

    #[test]
    fn arrow_keys_page_through_frames() {
        let keymap = Keymap::default();
        let state = ViewState::new(Pager::new(3), None);
        assert_eq!(keymap.apply(state, KeyCode::Right).cursor(), 1);
        assert_eq!(keymap.apply(state, KeyCode::Up).cursor(), 1);
        assert_eq!(keymap.apply(state, KeyCode::Left).cursor(), 2);
        assert_eq!(keymap.apply(state, KeyCode::Down).cursor(), 2);
    }

    #[test]
    fn r_switches_datasets_when_available() {
        let keymap = Keymap::default();
        let single = ViewState::new(Pager::new(3), None);
        assert_eq!(keymap.apply(single, KeyCode::Char('r')), single);

        let paired = ViewState::new(Pager::new(3), Some(Pager::new(2)));
        let switched = keymap.apply(paired, KeyCode::Char('r'));
        assert_eq!(switched.active().ordinal(), 1);
        assert_eq!(keymap.apply(switched, KeyCode::Char('r')), paired);
    }

    #[test]
    fn unbound_and_app_commands_leave_state_alone() {
        let keymap = Keymap::default();
        let state = ViewState::new(Pager::centered(4), None);
        assert_eq!(keymap.apply(state, KeyCode::Char('z')), state);
        assert_eq!(keymap.apply(state, KeyCode::Char('q')), state);
        assert_eq!(keymap.lookup(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(keymap.lookup(KeyCode::Char('y')), Some(Command::CopyFrame));
    }
}

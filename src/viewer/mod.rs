//! Paging state machine.
//!
//! The viewer owns nothing but cursors: a [`Pager`] per dataset, bundled in a
//! [`ViewState`], and a [`Keymap`] that turns key presses into pure
//! `ViewState -> ViewState` transitions. Rendering reads the resulting state.

mod keymap;
mod pager;
mod state;

pub use keymap::{Command, Keymap, Transition};
pub use pager::Pager;
pub use state::{DatasetId, ViewState};

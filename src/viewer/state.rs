//! Navigation state shared by every panel of a figure.

use super::Pager;

/// Which of the parallel datasets is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetId {
    /// The dataset the session was opened with.
    Primary,
    /// The optional reciprocal dataset.
    Reciprocal,
}

impl DatasetId {
    /// Position of the dataset (0 for primary, 1 for reciprocal).
    pub fn ordinal(self) -> usize {
        match self {
            DatasetId::Primary => 0,
            DatasetId::Reciprocal => 1,
        }
    }
}

/// Cursor state of a figure.
///
/// Each dataset keeps its own pager so switching back and forth returns to
/// the frame that was last shown for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    primary: Pager,
    reciprocal: Option<Pager>,
    active: DatasetId,
}

impl ViewState {
    /// Create a view over a primary dataset and an optional reciprocal one.
    pub fn new(primary: Pager, reciprocal: Option<Pager>) -> Self {
        Self {
            primary,
            reciprocal,
            active: DatasetId::Primary,
        }
    }

    /// Dataset on display.
    pub fn active(&self) -> DatasetId {
        self.active
    }

    /// Pager of the dataset on display.
    pub fn pager(&self) -> Pager {
        match (self.active, self.reciprocal) {
            (DatasetId::Reciprocal, Some(pager)) => pager,
            _ => self.primary,
        }
    }

    /// Frame index of the dataset on display.
    pub fn cursor(&self) -> usize {
        self.pager().index()
    }

    /// Whether a reciprocal dataset exists to switch to.
    pub fn can_switch(&self) -> bool {
        self.reciprocal.is_some()
    }

    /// Show the next frame.
    #[must_use]
    pub fn advance(self) -> Self {
        self.map_active(Pager::advance)
    }

    /// Show the previous frame.
    #[must_use]
    pub fn retreat(self) -> Self {
        self.map_active(Pager::retreat)
    }

    /// Toggle between primary and reciprocal datasets.
    ///
    /// Without a reciprocal dataset this is a no-op.
    #[must_use]
    pub fn switch_dataset(self) -> Self {
        if self.reciprocal.is_none() {
            return self;
        }
        let active = match self.active {
            DatasetId::Primary => DatasetId::Reciprocal,
            DatasetId::Reciprocal => DatasetId::Primary,
        };
        Self { active, ..self }
    }

    fn map_active(self, f: fn(Pager) -> Pager) -> Self {
        match (self.active, self.reciprocal) {
            (DatasetId::Reciprocal, Some(pager)) => Self {
                reciprocal: Some(f(pager)),
                ..self
            },
            _ => Self {
                primary: f(self.primary),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_is_noop_without_reciprocal() {
        let state = ViewState::new(Pager::centered(5), None);
        assert!(!state.can_switch());
        assert_eq!(state.switch_dataset(), state);
        assert_eq!(state.switch_dataset().active(), DatasetId::Primary);
    }

    #[test]
    fn switch_alternates_with_period_two() {
        let mut state = ViewState::new(Pager::new(4), Some(Pager::new(6)));
        for step in 0..10 {
            assert_eq!(state.active().ordinal(), step % 2);
            state = state.switch_dataset();
        }
    }

    #[test]
    fn each_dataset_keeps_its_own_cursor() {
        let state = ViewState::new(Pager::new(4), Some(Pager::new(6)))
            .advance()
            .advance()
            .switch_dataset();
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.pager().len(), 6);

        let state = state.retreat().switch_dataset();
        assert_eq!(state.cursor(), 2);

        let state = state.switch_dataset();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn navigation_wraps_on_active_dataset() {
        let state = ViewState::new(Pager::starting_at(3, 2), None);
        assert_eq!(state.advance().cursor(), 0);
        assert_eq!(state.advance().retreat(), state);
    }
}

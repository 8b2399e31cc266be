//! Wrap-around page cursor over a frame stack.

/// Cursor over `len` frames that wraps at both ends.
///
/// An empty pager stays at index 0 and ignores navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    len: usize,
    index: usize,
}

impl Pager {
    /// Create a pager at the first frame.
    pub fn new(len: usize) -> Self {
        Self::starting_at(len, 0)
    }

    /// Create a pager at `index`, reduced modulo `len`.
    pub fn starting_at(len: usize, index: usize) -> Self {
        let index = if len == 0 { 0 } else { index % len };
        Self { len, index }
    }

    /// Create a pager at the middle frame.
    pub fn centered(len: usize) -> Self {
        Self::starting_at(len, len / 2)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current frame index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next frame, wrapping to the first.
    #[must_use]
    pub fn advance(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    /// Move to the previous frame, wrapping to the last.
    #[must_use]
    pub fn retreat(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_and_retreat_are_inverse() {
        for len in 1..=25 {
            for start in 0..len {
                let pager = Pager::starting_at(len, start);
                assert_eq!(pager.advance().retreat(), pager, "len={len} start={start}");
                assert_eq!(pager.retreat().advance(), pager, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn advancing_len_times_is_identity() {
        for len in 1..=25 {
            for start in 0..len {
                let pager = Pager::starting_at(len, start);
                let cycled = (0..len).fold(pager, |p, _| p.advance());
                assert_eq!(cycled, pager);
            }
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        let last = Pager::starting_at(5, 4);
        assert_eq!(last.advance().index(), 0);
        assert_eq!(Pager::new(5).retreat().index(), 4);
    }

    #[test]
    fn single_frame_stays_put() {
        let pager = Pager::new(1);
        assert_eq!(pager.advance().index(), 0);
        assert_eq!(pager.retreat().index(), 0);
    }

    #[test]
    fn empty_pager_ignores_navigation() {
        let pager = Pager::new(0);
        assert!(pager.is_empty());
        assert_eq!(pager.advance(), pager);
        assert_eq!(pager.retreat(), pager);
    }

    #[test]
    fn centered_starts_in_the_middle() {
        assert_eq!(Pager::centered(7).index(), 3);
        assert_eq!(Pager::centered(8).index(), 4);
        assert_eq!(Pager::centered(1).index(), 0);
        assert_eq!(Pager::starting_at(3, 7).index(), 1);
        assert_eq!(Pager::centered(3).len(), 3);
    }
}

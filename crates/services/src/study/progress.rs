/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// One-based position of the card on screen, capped at `total`.
    #[must_use]
    pub fn position(&self) -> usize {
        (self.answered + 1).min(self.total)
    }

    /// Share of the queue already answered, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f64 / self.total as f64
    }
}

/// Tally of answers given in the current run of a session.
///
/// `correct` counts successes and instant masters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub correct: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_and_fraction_track_answers() {
        let progress = SessionProgress {
            total: 4,
            answered: 1,
            remaining: 3,
            is_complete: false,
        };
        assert_eq!(progress.position(), 2);
        assert!((progress.fraction() - 0.25).abs() < f64::EPSILON);

        let done = SessionProgress {
            total: 4,
            answered: 4,
            remaining: 0,
            is_complete: true,
        };
        assert_eq!(done.position(), 4);
    }
}

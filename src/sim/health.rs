//! Heart track
//!
//! Hearts deplete from the back, so depleted hearts are always a
//! contiguous suffix and the track reads as "n full, then empty".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartState {
    Full,
    Depleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTrack {
    total: usize,
    full: usize,
}

impl HealthTrack {
    pub fn new(hearts: usize) -> Self {
        Self {
            total: hearts,
            full: hearts,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn full_count(&self) -> usize {
        self.full
    }

    pub fn is_empty(&self) -> bool {
        self.full == 0
    }

    /// Deplete the last full heart; false if none were left
    pub fn deplete_last_full(&mut self) -> bool {
        if self.full == 0 {
            return false;
        }
        self.full -= 1;
        true
    }

    /// Per-heart view in display order
    pub fn states(&self) -> Vec<HeartState> {
        (0..self.total)
            .map(|i| {
                if i < self.full {
                    HeartState::Full
                } else {
                    HeartState::Depleted
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_is_all_full() {
        let track = HealthTrack::new(3);
        assert_eq!(track.full_count(), 3);
        assert_eq!(track.states(), vec![HeartState::Full; 3]);
    }

    #[test]
    fn test_depletion_is_a_suffix() {
        let mut track = HealthTrack::new(3);
        assert!(track.deplete_last_full());
        assert_eq!(
            track.states(),
            vec![HeartState::Full, HeartState::Full, HeartState::Depleted]
        );
        assert!(track.deplete_last_full());
        assert_eq!(
            track.states(),
            vec![HeartState::Full, HeartState::Depleted, HeartState::Depleted]
        );
    }

    #[test]
    fn test_empty_track_stays_empty() {
        let mut track = HealthTrack::new(1);
        assert!(track.deplete_last_full());
        assert!(track.is_empty());
        assert!(!track.deplete_last_full());
        assert_eq!(track.full_count(), 0);
        assert_eq!(track.total(), 1);
    }
}

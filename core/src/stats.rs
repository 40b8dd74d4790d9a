#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifetime counters of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Consecutive wins, reset by any loss.
    pub win_streak: u32,
}

impl PlayerStats {
    /// Counts a finished game, no-op while the game is still in progress.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::InProgress => return,
            Outcome::Lost => {
                self.win_streak = 0;
            }
            Outcome::Won => {
                self.games_won = self.games_won.saturating_add(1);
                self.win_streak = self.win_streak.saturating_add(1);
            }
        }
        self.games_played = self.games_played.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wins_and_losses_update_counters() {
        let mut stats = PlayerStats::default();

        stats.record(Outcome::Won);
        stats.record(Outcome::Won);
        assert_eq!(
            stats,
            PlayerStats {
                games_played: 2,
                games_won: 2,
                win_streak: 2
            }
        );

        stats.record(Outcome::Lost);
        assert_eq!(
            stats,
            PlayerStats {
                games_played: 3,
                games_won: 2,
                win_streak: 0
            }
        );
    }

    #[test]
    fn in_progress_is_not_counted() {
        let mut stats = PlayerStats::default();
        stats.record(Outcome::InProgress);
        assert_eq!(stats, PlayerStats::default());
    }
}

//! Fixed achievement catalog and the rules that unlock it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of achievements in the catalog.
pub const ACHIEVEMENT_COUNT: usize = 12;

/// Unique identifier for each achievement, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AchievementId {
    FirstWin,
    WinUnderFiveMinutes,
    WinUnderEightMinutes,
    Play10,
    Play50,
    Play100,
    Play500,
    Play1000,
    Win10,
    Win100,
    WinStreak2,
    WinStreak5,
}

impl AchievementId {
    /// All achievements in catalog order.
    pub const ALL: [AchievementId; ACHIEVEMENT_COUNT] = [
        AchievementId::FirstWin,
        AchievementId::WinUnderFiveMinutes,
        AchievementId::WinUnderEightMinutes,
        AchievementId::Play10,
        AchievementId::Play50,
        AchievementId::Play100,
        AchievementId::Play500,
        AchievementId::Play1000,
        AchievementId::Win10,
        AchievementId::Win100,
        AchievementId::WinStreak2,
        AchievementId::WinStreak5,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            AchievementId::FirstWin => "Win a game",
            AchievementId::WinUnderFiveMinutes => "Win in under 5 minutes",
            AchievementId::WinUnderEightMinutes => "Win in under 8 minutes",
            AchievementId::Play10 => "Play 10 games",
            AchievementId::Play50 => "Play 50 games",
            AchievementId::Play100 => "Play 100 games",
            AchievementId::Play500 => "Play 500 games",
            AchievementId::Play1000 => "Play 1000 games",
            AchievementId::Win10 => "Win 10 games",
            AchievementId::Win100 => "Win 100 games",
            AchievementId::WinStreak2 => "Win 2 games in a row",
            AchievementId::WinStreak5 => "Win 5 games in a row",
        }
    }

    /// Position in the catalog and in the player-data file.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the rule for this achievement holds.
    pub fn is_met(self, stats: &PlayerStats, last: &SessionSummary) -> bool {
        let won_within = |limit_secs: u32| {
            last.outcome == Outcome::Won && last.elapsed_secs < limit_secs
        };
        match self {
            AchievementId::FirstWin => stats.games_won >= 1,
            AchievementId::WinUnderFiveMinutes => won_within(5 * 60),
            AchievementId::WinUnderEightMinutes => won_within(8 * 60),
            AchievementId::Play10 => stats.games_played >= 10,
            AchievementId::Play50 => stats.games_played >= 50,
            AchievementId::Play100 => stats.games_played >= 100,
            AchievementId::Play500 => stats.games_played >= 500,
            AchievementId::Play1000 => stats.games_played >= 1000,
            AchievementId::Win10 => stats.games_won >= 10,
            AchievementId::Win100 => stats.games_won >= 100,
            AchievementId::WinStreak2 => stats.win_streak >= 2,
            AchievementId::WinStreak5 => stats.win_streak >= 5,
        }
    }
}

/// A catalog entry and whether the player has earned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
}

impl Achievement {
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// The whole catalog with unlock state. Unlocking never reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Achievements {
    entries: [Achievement; ACHIEVEMENT_COUNT],
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            entries: AchievementId::ALL.map(|id| Achievement {
                id,
                unlocked: false,
            }),
        }
    }
}

impl Achievements {
    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn get(&self, id: AchievementId) -> &Achievement {
        &self.entries[id.index()]
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.get(id).unlocked
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.unlocked).count()
    }

    /// Unlocks `id`, returning whether it was locked before.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        let entry = &mut self.entries[id.index()];
        let newly = !entry.unlocked;
        entry.unlocked = true;
        newly
    }

    /// Unlocks every achievement whose rule now holds and returns the new ones.
    pub fn apply(&mut self, stats: &PlayerStats, last: &SessionSummary) -> Vec<AchievementId> {
        let mut unlocked = Vec::new();
        for id in AchievementId::ALL {
            if id.is_met(stats, last) && self.unlock(id) {
                log::debug!("Achievement unlocked: {}", id.name());
                unlocked.push(id);
            }
        }
        unlocked
    }
}

/// Pure form of [`Achievements::apply`]: the catalog after applying every rule.
pub fn evaluate(
    achievements: &Achievements,
    stats: &PlayerStats,
    last: &SessionSummary,
) -> Achievements {
    let mut next = achievements.clone();
    next.apply(stats, last);
    next
}

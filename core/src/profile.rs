use crate::*;

/// What finishing a session changed in the profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameReport {
    pub summary: SessionSummary,
    /// 0-based position in the best times, when a win made it into the list.
    pub best_time_rank: Option<usize>,
    /// Achievements unlocked by this session, in catalog order.
    pub unlocked: Vec<AchievementId>,
}

/// Player statistics, achievements and best times together with the files backing them.
#[derive(Clone, Debug)]
pub struct Profile {
    paths: StoragePaths,
    player: PlayerData,
    best_times: BestTimes,
}

impl Profile {
    /// Reads the player data and best times, starting empty where nothing usable is stored.
    pub fn load(paths: StoragePaths) -> Self {
        let player = PlayerData::load(&paths.player);
        let best_times = BestTimes::load(&paths.best_times);
        log::debug!(
            "Loaded profile: {} games, {} wins, {} achievements",
            player.stats.games_played,
            player.stats.games_won,
            player.achievements.unlocked_count()
        );
        Self {
            paths,
            player,
            best_times,
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.player.stats
    }

    pub fn achievements(&self) -> &Achievements {
        &self.player.achievements
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    /// Accounts for a finished session. A session still in progress changes nothing.
    ///
    /// Must be called once per finished session.
    pub fn finish(&mut self, session: &Session) -> GameReport {
        let summary = session.summary();
        if !summary.outcome.is_finished() {
            return GameReport {
                summary,
                best_time_rank: None,
                unlocked: Vec::new(),
            };
        }

        self.player.stats.record(summary.outcome);
        let best_time_rank = match summary.outcome {
            Outcome::Won => self.best_times.insert(summary.elapsed_secs),
            _ => None,
        };
        let unlocked = self.player.achievements.apply(&self.player.stats, &summary);

        log::debug!(
            "Finished game: {:?} in {}s, rank {:?}, {} new achievements",
            summary.outcome,
            summary.elapsed_secs,
            best_time_rank,
            unlocked.len()
        );
        GameReport {
            summary,
            best_time_rank,
            unlocked,
        }
    }

    /// Writes the player data and best times.
    pub fn save(&self) -> Result<()> {
        self.player.save(&self.paths.player)?;
        self.best_times.save(&self.paths.best_times)
    }

    /// Continues the stored session with its clock running, or starts a fresh one from
    /// `fallback` when none is usable.
    pub fn resume_session(&self, fallback: GameConfig) -> Result<Session> {
        match Session::load(&self.paths.session) {
            Ok(mut session) => {
                session.resume();
                Ok(session)
            }
            Err(err) => {
                match &err {
                    GameError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {}
                    _ => log::warn!(
                        "Discarding saved session {}: {}",
                        self.paths.session.display(),
                        err
                    ),
                }
                Session::new(fallback)
            }
        }
    }

    pub fn store_session(&self, session: &mut Session) -> Result<()> {
        session.save(&self.paths.session)
    }
}

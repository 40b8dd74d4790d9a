use std::fs::File;
use std::io::{BufReader, BufWriter};

use super::*;

/// Bytes reserved for each achievement name in the player file.
pub const NAME_LEN: usize = 64;

/// Everything remembered about the player between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerData {
    pub stats: PlayerStats,
    pub achievements: Achievements,
}

fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let mut bytes = [0; NAME_LEN];
    // keep at least one terminating NUL
    let len = name.len().min(NAME_LEN - 1);
    bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
    bytes
}

fn decode_name(bytes: &[u8; NAME_LEN]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

impl PlayerData {
    /// Writes the three counters followed by each achievement as name and unlock flag.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_count(writer, self.stats.games_played, "games played")?;
        write_count(writer, self.stats.games_won, "games won")?;
        write_count(writer, self.stats.win_streak, "win streak")?;

        for achievement in self.achievements.iter() {
            writer.write_all(&encode_name(achievement.name()))?;
            write_bool(writer, achievement.unlocked)?;
        }
        Ok(())
    }

    /// Reads data written by [`PlayerData::write_to`].
    ///
    /// Achievements are matched by position; a stored name that differs from the
    /// catalog is only logged.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let stats = PlayerStats {
            games_played: read_count(reader, "games played")?,
            games_won: read_count(reader, "games won")?,
            win_streak: read_count(reader, "win streak")?,
        };

        let mut achievements = Achievements::default();
        for id in AchievementId::ALL {
            let mut name = [0; NAME_LEN];
            reader.read_exact(&mut name)?;
            let unlocked = read_bool(reader, "achievement unlocked flag")?;

            let stored = decode_name(&name);
            if stored != id.name() {
                log::warn!(
                    "Achievement {} stored as {:?}, expected {:?}",
                    id.index(),
                    stored,
                    id.name()
                );
            }
            if unlocked {
                achievements.unlock(id);
            }
        }

        Ok(Self {
            stats,
            achievements,
        })
    }

    /// Loads the player file, failing on a missing or damaged file.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    /// Loads the player file, starting fresh when it is missing or damaged.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(data) => data,
            Err(GameError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("Ignoring unreadable player data {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        log::debug!("Saved player data to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerData {
        let mut data = PlayerData {
            stats: PlayerStats {
                games_played: 14,
                games_won: 3,
                win_streak: 2,
            },
            ..Default::default()
        };
        data.achievements.unlock(AchievementId::FirstWin);
        data.achievements.unlock(AchievementId::Play10);
        data.achievements.unlock(AchievementId::WinStreak2);
        data
    }

    fn encode(data: &PlayerData) -> Vec<u8> {
        let mut bytes = Vec::new();
        data.write_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn layout_has_fixed_size() {
        let bytes = encode(&sample());
        assert_eq!(bytes.len(), 3 * 4 + ACHIEVEMENT_COUNT * (NAME_LEN + 4));

        assert_eq!(&bytes[12..22], b"Win a game");
        assert!(bytes[22..12 + NAME_LEN].iter().all(|&b| b == 0));
        assert_eq!(&bytes[12 + NAME_LEN..16 + NAME_LEN], &1i32.to_ne_bytes());
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.dat");

        sample().save(&path).unwrap();
        assert_eq!(PlayerData::try_load(&path).unwrap(), sample());
        assert_eq!(PlayerData::load(&path), sample());
    }

    #[test]
    fn missing_or_short_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.dat");
        assert_eq!(PlayerData::load(&path), PlayerData::default());

        let bytes = encode(&sample());
        std::fs::write(&path, &bytes[..100]).unwrap();
        assert!(matches!(
            PlayerData::try_load(&path),
            Err(GameError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert_eq!(PlayerData::load(&path), PlayerData::default());
    }

    #[test]
    fn negative_counter_is_corrupt() {
        let mut bytes = encode(&sample());
        bytes[4..8].copy_from_slice(&(-1i32).to_ne_bytes());
        assert!(matches!(
            PlayerData::read_from(&mut bytes.as_slice()),
            Err(GameError::CorruptRecord("games won"))
        ));
    }

    #[test]
    fn renamed_achievement_keeps_its_flag() {
        let mut bytes = encode(&sample());
        bytes[12..12 + NAME_LEN].copy_from_slice(&encode_name("First victory"));

        let data = PlayerData::read_from(&mut bytes.as_slice()).unwrap();
        assert!(data.achievements.is_unlocked(AchievementId::FirstWin));
        assert_eq!(data, sample());
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "x".repeat(100);
        let encoded = encode_name(&name);
        assert_eq!(encoded[NAME_LEN - 1], 0);
        assert_eq!(decode_name(&encoded).len(), NAME_LEN - 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let data: PlayerData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, sample());
    }
}

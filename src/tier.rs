use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest table the game supports.
pub const MIN_PLAYERS: usize = 4;

/// Game-size category gating which catalog entries are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "TIER1")]
    Tier1,
    #[serde(rename = "TIER2")]
    Tier2,
    #[serde(rename = "TIER3")]
    Tier3,
    #[serde(rename = "TIER4")]
    Tier4,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Tier1, Tier::Tier2, Tier::Tier3, Tier::Tier4];

    /// 4..=7 players is Tier1, 8..=11 Tier2, 12..=15 Tier3, anything larger Tier4.
    pub fn for_players(players: usize) -> Result<Self, ConfigError> {
        match players {
            0..=3 => Err(ConfigError::TooFewPlayers {
                players,
                minimum: MIN_PLAYERS,
            }),
            4..=7 => Ok(Tier::Tier1),
            8..=11 => Ok(Tier::Tier2),
            12..=15 => Ok(Tier::Tier3),
            _ => Ok(Tier::Tier4),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Tier1 => "TIER1",
            Tier::Tier2 => "TIER2",
            Tier::Tier3 => "TIER3",
            Tier::Tier4 => "TIER4",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_partition_supported_counts() {
        for players in 4..=7 {
            assert_eq!(Tier::for_players(players).unwrap(), Tier::Tier1);
        }
        for players in 8..=11 {
            assert_eq!(Tier::for_players(players).unwrap(), Tier::Tier2);
        }
        for players in 12..=15 {
            assert_eq!(Tier::for_players(players).unwrap(), Tier::Tier3);
        }
        for players in [16, 17, 40, 1_000] {
            assert_eq!(Tier::for_players(players).unwrap(), Tier::Tier4);
        }
    }

    #[test]
    fn classification_is_monotonic() {
        let mut previous = Tier::for_players(MIN_PLAYERS).unwrap();
        for players in MIN_PLAYERS..64 {
            let tier = Tier::for_players(players).unwrap();
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn below_minimum_is_rejected() {
        for players in 0..MIN_PLAYERS {
            let err = Tier::for_players(players).unwrap_err();
            assert!(matches!(err, ConfigError::TooFewPlayers { minimum: 4, .. }));
        }
    }

    #[test]
    fn wire_names_match_display() {
        let json = serde_json::to_string(&Tier::Tier3).unwrap();
        assert_eq!(json, "\"TIER3\"");
        assert_eq!(Tier::Tier3.to_string(), "TIER3");
        let parsed: Tier = serde_json::from_str("\"TIER4\"").unwrap();
        assert_eq!(parsed, Tier::Tier4);
    }
}

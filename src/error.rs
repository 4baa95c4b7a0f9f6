use std::path::PathBuf;

use thiserror::Error;

use crate::tier::Tier;

/// Raised when a game cannot be set up from the given catalogs and inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("minimum number of players is {minimum}, got {players}")]
    TooFewPlayers { players: usize, minimum: usize },

    #[error("not enough {pool} available to fill {count} slots")]
    PoolExhausted { pool: String, count: usize },

    #[error("expected {expected} player names, got {actual}")]
    PlayerCountMismatch { expected: usize, actual: usize },

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported catalog format for {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{catalog} catalog contains an entry with an empty name")]
    EmptyName { catalog: &'static str },

    #[error("{catalog} '{name}' is defined more than once")]
    DuplicateName { catalog: &'static str, name: String },

    #[error("{catalog} '{name}' requires at least {min_number} copies but allows only {capacity} at {tier}")]
    MinExceedsCapacity {
        catalog: &'static str,
        name: String,
        tier: Tier,
        min_number: u32,
        capacity: u32,
    },
}

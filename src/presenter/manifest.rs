use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allocator::AlignmentQuota;
use crate::catalog::Alignment;
use crate::setup::PlayerSetup;
use crate::tier::Tier;

/// Machine-readable record of a dealt game, written next to the sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupManifest {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub tier: Tier,
    pub quota: AlignmentQuota,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub profession: String,
    pub role: String,
    pub alignment: Alignment,
}

impl SetupManifest {
    pub fn new(seed: u64, tier: Tier, quota: AlignmentQuota, players: &[PlayerSetup]) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            tier,
            quota,
            players: players
                .iter()
                .map(|player| PlayerRecord {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    profession: player.assignment.profession.name.clone(),
                    role: player.assignment.role.name.clone(),
                    alignment: player.assignment.role.alignment,
                })
                .collect(),
        }
    }
}

use log::{debug, info};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::catalog::{Alignment, CatalogEntry, Profession, Role};
use crate::error::ConfigError;
use crate::rng::RngManager;
use crate::selector::select;
use crate::setup::Assignment;
use crate::tier::Tier;

/// Players per team for a given table size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentQuota {
    pub good: usize,
    pub evil: usize,
    pub neutral: usize,
}

impl AlignmentQuota {
    /// A sixth of the table is neutral, a third evil, and good takes the rest.
    pub fn for_players(players: usize) -> Self {
        let neutral = players / 6;
        let evil = players / 3;
        Self {
            good: players - neutral - evil,
            evil,
            neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.evil + self.neutral
    }

    pub fn for_alignment(&self, alignment: Alignment) -> usize {
        match alignment {
            Alignment::Good => self.good,
            Alignment::Evil => self.evil,
            Alignment::Neutral => self.neutral,
        }
    }
}

pub struct Allocator {
    roles: Vec<Role>,
    professions: Vec<Profession>,
}

impl Allocator {
    pub fn new(roles: Vec<Role>, professions: Vec<Profession>) -> Self {
        Self { roles, professions }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn professions(&self) -> &[Profession] {
        &self.professions
    }

    /// Tier and team sizes for `players`, without drawing anything.
    pub fn plan(&self, players: usize) -> Result<(Tier, AlignmentQuota), ConfigError> {
        let tier = Tier::for_players(players)?;
        Ok((tier, AlignmentQuota::for_players(players)))
    }

    /// Deal one assignment per player in random order.
    pub fn generate_characters(
        &self,
        players: usize,
        rng: &mut RngManager,
    ) -> Result<Vec<Assignment>, ConfigError> {
        let (tier, quota) = self.plan(players)?;
        info!(
            "dealing {players} characters at {tier}: {} good, {} evil, {} neutral",
            quota.good, quota.evil, quota.neutral
        );

        let mut roles = self.choose_roles(tier, quota, rng)?;
        let mut professions = self.choose_professions(players, tier, rng)?;

        let mut pairing = rng.stream("pairing");
        roles.shuffle(&mut pairing);
        professions.shuffle(&mut pairing);

        let mut assignments: Vec<Assignment> = professions
            .into_iter()
            .zip(roles)
            .map(|(profession, role)| Assignment::new(profession, role))
            .collect();
        assignments.shuffle(&mut pairing);
        Ok(assignments)
    }

    fn choose_roles(
        &self,
        tier: Tier,
        quota: AlignmentQuota,
        rng: &mut RngManager,
    ) -> Result<Vec<Role>, ConfigError> {
        let mut stream = rng.stream("roles");
        let mut selected = Vec::with_capacity(quota.total());
        for (alignment, label) in [
            (Alignment::Good, "good roles"),
            (Alignment::Evil, "evil roles"),
            (Alignment::Neutral, "neutral roles"),
        ] {
            let pool: Vec<&Role> = self
                .roles
                .iter()
                .filter(|role| role.alignment == alignment && role.capacity(tier) > 0)
                .collect();
            let count = quota.for_alignment(alignment);
            debug!("{label}: {} candidates for {count} slots", pool.len());
            selected.extend(select(&pool, count, tier, label, &mut stream)?);
        }
        Ok(selected)
    }

    fn choose_professions(
        &self,
        players: usize,
        tier: Tier,
        rng: &mut RngManager,
    ) -> Result<Vec<Profession>, ConfigError> {
        let pool: Vec<&Profession> = self
            .professions
            .iter()
            .filter(|profession| profession.capacity(tier) > 0)
            .collect();
        debug!("professions: {} candidates for {players} slots", pool.len());
        select(&pool, players, tier, "professions", &mut rng.stream("professions"))
    }
}

//! Catalog entries: the roles and professions a game can hand out.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    Good,
    Evil,
    Neutral,
}

impl Alignment {
    pub fn label(self) -> &'static str {
        match self {
            Alignment::Good => "Good",
            Alignment::Evil => "Evil",
            Alignment::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WinCondition {
    EliminateAllEvils,
    EliminateAllGood,
    Survive,
    VotedOut,
    LastNeutral,
}

impl WinCondition {
    pub fn label(self) -> &'static str {
        match self {
            WinCondition::EliminateAllEvils => "Eliminate All Evils",
            WinCondition::EliminateAllGood => "Eliminate All Good",
            WinCondition::Survive => "Survive",
            WinCondition::VotedOut => "Voted Out",
            WinCondition::LastNeutral => "Last Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityType {
    DeathTrigger,
    DuskChoice,
    MidnightChoice,
    PredawnChoice,
    OneTime,
    Passive,
    Vote,
    InitialKnowledge,
}

impl AbilityType {
    pub fn label(self) -> &'static str {
        match self {
            AbilityType::DeathTrigger => "Death Trigger",
            AbilityType::DuskChoice => "Dusk Choice",
            AbilityType::MidnightChoice => "Midnight Choice",
            AbilityType::PredawnChoice => "Predawn Choice",
            AbilityType::OneTime => "One Time",
            AbilityType::Passive => "Passive",
            AbilityType::Vote => "Vote",
            AbilityType::InitialKnowledge => "Initial Knowledge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub ability_type: AbilityType,
    pub effect: String,
    #[serde(default)]
    pub group_ability: bool,
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.ability_type.label())?;
        if self.group_ability {
            f.write_str(" (Group Ability)")?;
        }
        write!(f, ": {}", self.effect)
    }
}

/// Copies of an entry allowed per tier. Missing tiers mean zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierCapacity(BTreeMap<Tier, u32>);

impl TierCapacity {
    pub fn get(&self, tier: Tier) -> u32 {
        self.0.get(&tier).copied().unwrap_or(0)
    }

    pub fn with(mut self, tier: Tier, capacity: u32) -> Self {
        self.0.insert(tier, capacity);
        self
    }
}

impl FromIterator<(Tier, u32)> for TierCapacity {
    fn from_iter<I: IntoIterator<Item = (Tier, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What the selector needs to know about anything it can draw.
pub trait CatalogEntry {
    fn name(&self) -> &str;
    fn capacity(&self, tier: Tier) -> u32;
    fn min_number(&self) -> u32;
}

/// Public identity, visible to every player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profession {
    pub name: String,
    pub abilities: Vec<Ability>,
    pub tiers: TierCapacity,
    pub min_number: u32,
}

impl Profession {
    pub fn new(name: impl Into<String>, tiers: TierCapacity) -> Self {
        Self {
            name: name.into(),
            abilities: Vec::new(),
            tiers,
            min_number: 0,
        }
    }

    pub fn with_min_number(mut self, min_number: u32) -> Self {
        self.min_number = min_number;
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        self.abilities = abilities;
        self
    }
}

impl CatalogEntry for Profession {
    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self, tier: Tier) -> u32 {
        self.tiers.get(tier)
    }

    fn min_number(&self) -> u32 {
        self.min_number
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profession: {}", self.name)?;
        write!(f, "  Abilities: ")?;
        write_abilities(f, &self.abilities)
    }
}

/// Secret identity: decides the team a player wins with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub alignment: Alignment,
    pub abilities: Vec<Ability>,
    pub tiers: TierCapacity,
    pub min_number: u32,
    win_condition: Option<WinCondition>,
}

impl Role {
    /// Good and evil roles always win with their team; only neutral roles
    /// keep an explicit win condition.
    pub fn new(
        name: impl Into<String>,
        alignment: Alignment,
        tiers: TierCapacity,
        win_condition: Option<WinCondition>,
    ) -> Self {
        let win_condition = match alignment {
            Alignment::Good => Some(WinCondition::EliminateAllEvils),
            Alignment::Evil => Some(WinCondition::EliminateAllGood),
            Alignment::Neutral => win_condition,
        };
        Self {
            name: name.into(),
            alignment,
            abilities: Vec::new(),
            tiers,
            min_number: 0,
            win_condition,
        }
    }

    pub fn with_min_number(mut self, min_number: u32) -> Self {
        self.min_number = min_number;
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn win_condition(&self) -> Option<WinCondition> {
        self.win_condition
    }

    pub fn win_condition_label(&self) -> &'static str {
        self.win_condition.map_or("Custom", WinCondition::label)
    }
}

impl CatalogEntry for Role {
    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self, tier: Tier) -> u32 {
        self.tiers.get(tier)
    }

    fn min_number(&self) -> u32 {
        self.min_number
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Role: {}", self.name)?;
        writeln!(f, "  Alignment: {}", self.alignment.label())?;
        writeln!(f, "  Win Condition: {}", self.win_condition_label())?;
        write!(f, "  Abilities: ")?;
        write_abilities(f, &self.abilities)
    }
}

fn write_abilities(f: &mut fmt::Formatter<'_>, abilities: &[Ability]) -> fmt::Result {
    if abilities.is_empty() {
        return f.write_str("None");
    }
    for ability in abilities {
        write!(f, "\n    - {ability}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity() -> TierCapacity {
        TierCapacity::default().with(Tier::Tier1, 1)
    }

    #[test]
    fn team_roles_derive_their_win_condition() {
        let good = Role::new("Seer", Alignment::Good, capacity(), Some(WinCondition::Survive));
        let evil = Role::new("Werewolf", Alignment::Evil, capacity(), None);
        assert_eq!(good.win_condition(), Some(WinCondition::EliminateAllEvils));
        assert_eq!(evil.win_condition(), Some(WinCondition::EliminateAllGood));
    }

    #[test]
    fn neutral_roles_keep_explicit_or_unset_condition() {
        let jester = Role::new("Jester", Alignment::Neutral, capacity(), Some(WinCondition::VotedOut));
        let drifter = Role::new("Drifter", Alignment::Neutral, capacity(), None);
        assert_eq!(jester.win_condition(), Some(WinCondition::VotedOut));
        assert_eq!(drifter.win_condition(), None);
        assert_eq!(drifter.win_condition_label(), "Custom");
    }

    #[test]
    fn missing_tiers_have_zero_capacity() {
        let tiers = TierCapacity::default()
            .with(Tier::Tier2, 3)
            .with(Tier::Tier3, 0);
        assert_eq!(tiers.get(Tier::Tier1), 0);
        assert_eq!(tiers.get(Tier::Tier2), 3);
        assert_eq!(tiers.get(Tier::Tier3), 0);
    }

    #[test]
    fn display_lists_abilities() {
        let role = Role::new("Seer", Alignment::Good, capacity(), None).with_abilities(vec![Ability {
            ability_type: AbilityType::MidnightChoice,
            effect: "Learn one player's alignment.".into(),
            group_ability: false,
        }]);
        let text = role.to_string();
        assert!(text.contains("Alignment: Good"));
        assert!(text.contains("Win Condition: Eliminate All Evils"));
        assert!(text.contains("- [Midnight Choice]: Learn one player's alignment."));

        let baker = Profession::new("Baker", capacity());
        assert!(baker.to_string().ends_with("Abilities: None"));
    }
}

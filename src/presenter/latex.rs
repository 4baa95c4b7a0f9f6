//! LaTeX fragments substituted into the sheet templates.

use crate::catalog::{Ability, AbilityType, Alignment};
use crate::setup::PlayerSetup;

/// Escape characters LaTeX treats specially in running text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn alignment_color(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Good => "\\color{GoodGreen}",
        Alignment::Evil => "\\color{EvilRed}",
        Alignment::Neutral => "\\color{NeutralGray}",
    }
}

pub fn player_abilities(abilities: &[Ability]) -> String {
    abilities
        .iter()
        .map(|ability| {
            let group = if ability.group_ability {
                "(Group Ability)"
            } else {
                ""
            };
            format!(
                "\\displayability{{{}}}{{{}}}{{{}}}",
                ability.ability_type.label(),
                escape(&ability.effect),
                group
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn player_entry(player: &PlayerSetup) -> String {
    let role = &player.assignment.role;
    format!(
        "\\playerentry{{{}}}{{{}}}{{{}}}{{{}{}\\color{{black}}}}",
        escape(&player.name),
        escape(&player.assignment.profession.name),
        escape(&role.name),
        alignment_color(role.alignment),
        role.alignment.label()
    )
}

/// Narrator sheet sections, one per night phase plus a catch-all.
#[derive(Debug, Default)]
pub struct NarratorSections {
    pub initial_knowledge: Vec<String>,
    pub dusk: Vec<String>,
    pub midnight: Vec<String>,
    pub predawn: Vec<String>,
    pub special: Vec<String>,
}

impl NarratorSections {
    pub fn collect(players: &[PlayerSetup]) -> Self {
        let mut sections = Self::default();
        for player in players {
            let profession = &player.assignment.profession;
            let role = &player.assignment.role;
            let sources = [(&profession.name, &profession.abilities), (&role.name, &role.abilities)];
            for (source, abilities) in sources {
                for ability in abilities {
                    let owner = format!("{} ({})", escape(&player.name), escape(source));
                    let entry = format!(
                        "\\abilityentry{{{}}}{{{}}}{{{}}}",
                        owner,
                        ability.ability_type.label(),
                        escape(&ability.effect)
                    );
                    sections.bucket(ability.ability_type).push(entry);
                }
            }
        }
        sections
    }

    fn bucket(&mut self, ability_type: AbilityType) -> &mut Vec<String> {
        match ability_type {
            AbilityType::InitialKnowledge => &mut self.initial_knowledge,
            AbilityType::DuskChoice => &mut self.dusk,
            AbilityType::MidnightChoice => &mut self.midnight,
            AbilityType::PredawnChoice => &mut self.predawn,
            AbilityType::DeathTrigger
            | AbilityType::OneTime
            | AbilityType::Passive
            | AbilityType::Vote => &mut self.special,
        }
    }
}

use std::fmt;

use crate::catalog::{Profession, Role};
use crate::error::ConfigError;

/// The profession and role dealt to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub profession: Profession,
    pub role: Role,
}

impl Assignment {
    pub fn new(profession: Profession, role: Role) -> Self {
        Self { profession, role }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Character:")?;
        writeln!(f, "{}", self.profession)?;
        write!(f, "{}", self.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSetup {
    pub id: String,
    pub name: String,
    pub assignment: Assignment,
}

impl PlayerSetup {
    /// Zip display names with assignments in order; ids start at 1.
    pub fn assemble(
        names: Vec<String>,
        assignments: Vec<Assignment>,
    ) -> Result<Vec<Self>, ConfigError> {
        if names.len() != assignments.len() {
            return Err(ConfigError::PlayerCountMismatch {
                expected: assignments.len(),
                actual: names.len(),
            });
        }
        Ok(names
            .into_iter()
            .zip(assignments)
            .enumerate()
            .map(|(index, (name, assignment))| PlayerSetup {
                id: (index + 1).to_string(),
                name,
                assignment,
            })
            .collect())
    }
}

impl fmt::Display for PlayerSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player: {} (ID: {})", self.name, self.id)?;
        writeln!(f, "------------------------------------")?;
        write!(f, "{}", self.assignment)
    }
}

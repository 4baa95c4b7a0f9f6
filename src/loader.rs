use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::catalog::{Ability, Alignment, CatalogEntry, Profession, Role, TierCapacity, WinCondition};
use crate::error::ConfigError;
use crate::tier::Tier;

#[derive(Debug, Clone, Deserialize)]
struct RoleDefinition {
    name: String,
    alignment: Alignment,
    tier_distribution: TierCapacity,
    #[serde(default)]
    min_number: u32,
    #[serde(default)]
    win_condition: Option<WinCondition>,
    #[serde(default)]
    abilities_list: Vec<Ability>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfessionDefinition {
    name: String,
    tier_distribution: TierCapacity,
    #[serde(default)]
    min_number: u32,
    #[serde(default)]
    abilities_list: Vec<Ability>,
}

/// Reads role and profession catalogs from JSON or YAML files.
pub struct CatalogLoader {
    base_dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_roles(&self, file: impl AsRef<Path>) -> Result<Vec<Role>, ConfigError> {
        let definitions: Vec<RoleDefinition> = self.read(file.as_ref())?;
        let roles: Vec<Role> = definitions
            .into_iter()
            .map(|def| {
                if def.alignment != Alignment::Neutral && def.win_condition.is_some() {
                    warn!(
                        "role '{}' is {:?}; its explicit win condition is ignored",
                        def.name, def.alignment
                    );
                }
                Role::new(def.name, def.alignment, def.tier_distribution, def.win_condition)
                    .with_min_number(def.min_number)
                    .with_abilities(def.abilities_list)
            })
            .collect();
        validate("role", &roles)?;
        info!("loaded {} roles from {}", roles.len(), file.as_ref().display());
        Ok(roles)
    }

    pub fn load_professions(&self, file: impl AsRef<Path>) -> Result<Vec<Profession>, ConfigError> {
        let definitions: Vec<ProfessionDefinition> = self.read(file.as_ref())?;
        let professions: Vec<Profession> = definitions
            .into_iter()
            .map(|def| {
                Profession::new(def.name, def.tier_distribution)
                    .with_min_number(def.min_number)
                    .with_abilities(def.abilities_list)
            })
            .collect();
        validate("profession", &professions)?;
        info!(
            "loaded {} professions from {}",
            professions.len(),
            file.as_ref().display()
        );
        Ok(professions)
    }

    fn read<T: DeserializeOwned>(&self, file: &Path) -> Result<T, ConfigError> {
        let path = self.base_dir.join(file);
        let format = Format::from_path(&path)?;
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        format.parse(&data).map_err(|message| ConfigError::Parse { path, message })
    }
}

enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn parse<T: DeserializeOwned>(&self, data: &str) -> Result<T, String> {
        match self {
            Format::Json => serde_json::from_str(data).map_err(|err| err.to_string()),
            Format::Yaml => serde_yaml::from_str(data).map_err(|err| err.to_string()),
        }
    }
}

/// Names must be present and unique, and a minimum must fit every tier the
/// entry is available at.
fn validate<E: CatalogEntry>(catalog: &'static str, entries: &[E]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for entry in entries {
        let name = entry.name();
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName { catalog });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName {
                catalog,
                name: name.to_string(),
            });
        }
        for tier in Tier::ALL {
            let capacity = entry.capacity(tier);
            if capacity > 0 && entry.min_number() > capacity {
                return Err(ConfigError::MinExceedsCapacity {
                    catalog,
                    name: name.to_string(),
                    tier,
                    min_number: entry.min_number(),
                    capacity,
                });
            }
        }
    }
    Ok(())
}

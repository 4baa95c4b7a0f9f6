pub mod allocator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod names;
pub mod presenter;
pub mod rng;
pub mod selector;
pub mod setup;
pub mod tier;

pub use allocator::{AlignmentQuota, Allocator};
pub use catalog::{Ability, AbilityType, Alignment, CatalogEntry, Profession, Role, WinCondition};
pub use config::SessionConfig;
pub use error::ConfigError;
pub use setup::{Assignment, PlayerSetup};
pub use tier::Tier;

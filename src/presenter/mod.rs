//! Turns dealt players into LaTeX character sheets and a narrator script.

mod compiler;
mod latex;
mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

pub use compiler::Compiler;
pub use manifest::{PlayerRecord, SetupManifest};

use crate::setup::PlayerSetup;
use latex::NarratorSections;

pub const NARRATOR_FILE: &str = "narrator_script.tex";
pub const MANIFEST_FILE: &str = "setup.json";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize setup manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("document compiler '{program}' was not found")]
    CompilerMissing { program: String },

    #[error("{program} failed on {document} ({status}):\n{detail}")]
    CompilerFailed {
        program: String,
        document: PathBuf,
        status: String,
        detail: String,
    },
}

/// Outcome for one written document. A compile failure does not remove the `.tex`.
#[derive(Debug)]
pub struct RenderReport {
    pub document: PathBuf,
    pub compiled: Option<Result<PathBuf, RenderError>>,
}

impl RenderReport {
    pub fn is_ok(&self) -> bool {
        !matches!(self.compiled, Some(Err(_)))
    }
}

/// The two templates a run fills in.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub player: String,
    pub narrator: String,
}

impl TemplateSet {
    pub fn load(player: impl AsRef<Path>, narrator: impl AsRef<Path>) -> Result<Self, RenderError> {
        Ok(Self {
            player: read(player.as_ref())?,
            narrator: read(narrator.as_ref())?,
        })
    }

    pub fn fill_player(&self, player: &PlayerSetup) -> String {
        let profession = &player.assignment.profession;
        let role = &player.assignment.role;
        let replacements = [
            ("[Player Name]", latex::escape(&player.name)),
            ("[Player ID]", latex::escape(&player.id)),
            ("[Profession Name]", latex::escape(&profession.name)),
            ("[Profession Abilities]", latex::player_abilities(&profession.abilities)),
            ("[Role Name]", latex::escape(&role.name)),
            ("[Role Abilities]", latex::player_abilities(&role.abilities)),
            ("[Alignment Color]", latex::alignment_color(role.alignment).to_string()),
            ("[Alignment]", role.alignment.label().to_string()),
            ("[Win Condition]", role.win_condition_label().to_string()),
        ];
        substitute(&self.player, &replacements)
    }

    pub fn fill_narrator(&self, players: &[PlayerSetup]) -> String {
        let roster: Vec<String> = players.iter().map(latex::player_entry).collect();
        let sections = NarratorSections::collect(players);
        let replacements = [
            ("[Player List]", roster.join("\n")),
            ("[Initial Knowledge Abilities]", sections.initial_knowledge.join("\n")),
            ("[Dusk Phase Abilities]", sections.dusk.join("\n")),
            ("[Midnight Phase Abilities]", sections.midnight.join("\n")),
            ("[Predawn Phase Abilities]", sections.predawn.join("\n")),
            ("[Special Abilities]", sections.special.join("\n")),
        ];
        substitute(&self.narrator, &replacements)
    }
}

/// Single pass over the template; filled-in values are never scanned again.
fn substitute(template: &str, replacements: &[(&str, String)]) -> String {
    let mut text = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('[') {
        text.push_str(&rest[..start]);
        let tail = &rest[start..];
        match replacements
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                text.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                text.push('[');
                rest = &tail[1..];
            }
        }
    }
    text.push_str(rest);
    text
}

pub struct SheetWriter {
    templates: TemplateSet,
    output_dir: PathBuf,
    compiler: Option<Compiler>,
}

impl SheetWriter {
    pub fn new(templates: TemplateSet, output_dir: impl AsRef<Path>) -> Self {
        Self {
            templates,
            output_dir: output_dir.as_ref().to_path_buf(),
            compiler: None,
        }
    }

    pub fn with_compiler(mut self, compiler: Option<Compiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the directory and remove documents left over from a previous game.
    /// Only files this writer produces are touched; anything else stays.
    pub fn prepare_output_dir(&self) -> Result<(), RenderError> {
        fs::create_dir_all(&self.output_dir).map_err(io_err(&self.output_dir))?;
        for entry in fs::read_dir(&self.output_dir).map_err(io_err(&self.output_dir))? {
            let path = entry.map_err(io_err(&self.output_dir))?.path();
            if path.is_file() && is_generated(&path) {
                fs::remove_file(&path).map_err(io_err(&path))?;
            }
        }
        Ok(())
    }

    /// One sheet per player. A failure on one sheet never stops the others.
    pub fn write_players(&self, players: &[PlayerSetup]) -> Vec<Result<RenderReport, RenderError>> {
        players
            .iter()
            .map(|player| {
                let path = self.output_dir.join(sheet_file_name(player));
                self.emit(&path, &self.templates.fill_player(player))
            })
            .collect()
    }

    pub fn write_narrator(&self, players: &[PlayerSetup]) -> Result<RenderReport, RenderError> {
        let path = self.output_dir.join(NARRATOR_FILE);
        self.emit(&path, &self.templates.fill_narrator(players))
    }

    pub fn write_manifest(&self, manifest: &SetupManifest) -> Result<PathBuf, RenderError> {
        let path = self.output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn emit(&self, path: &Path, contents: &str) -> Result<RenderReport, RenderError> {
        fs::write(path, contents).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("written {}", path.display());

        let compiled = self.compiler.as_ref().map(|compiler| {
            let result = compiler.compile(path);
            if let Err(err) = &result {
                warn!("{err}");
            }
            result
        });
        Ok(RenderReport {
            document: path.to_path_buf(),
            compiled,
        })
    }
}

/// `{id}_{name}.tex`, keeping only characters safe in file names.
pub fn sheet_file_name(player: &PlayerSetup) -> String {
    let name: String = player
        .name
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.tex", player.id, name)
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> RenderError {
    let path = path.to_path_buf();
    move |source| RenderError::Io { path, source }
}

const GENERATED_EXTENSIONS: [&str; 5] = ["tex", "pdf", "aux", "log", "out"];

fn is_generated(path: &Path) -> bool {
    if path.file_name().and_then(|name| name.to_str()) == Some(MANIFEST_FILE) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| GENERATED_EXTENSIONS.contains(&ext))
}

fn read(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

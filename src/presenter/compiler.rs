use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use super::RenderError;
use crate::config::CompileConfig;

/// External document compiler run once per written `.tex` file.
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    args: Vec<String>,
}

impl Compiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &CompileConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.program.clone(), config.args.clone()))
    }

    /// Compile `document` inside its own directory and return the PDF path.
    pub fn compile(&self, document: &Path) -> Result<PathBuf, RenderError> {
        let dir = document
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = document.file_name().unwrap_or(document.as_os_str());
        debug!("running {} on {}", self.program, document.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file_name)
            .current_dir(dir)
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => RenderError::CompilerMissing {
                    program: self.program.clone(),
                },
                _ => RenderError::Io {
                    path: document.to_path_buf(),
                    source,
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(RenderError::CompilerFailed {
                program: self.program.clone(),
                document: document.to_path_buf(),
                status: output.status.to_string(),
                detail: tail(&detail, 20),
            });
        }
        Ok(document.with_extension("pdf"))
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::warn;

/// Syntax of the generated removal script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScriptType {
    /// `rm "path"`, one per line
    Posix,
    /// `del "path"` with CRLF line endings, for a `.bat` file
    Windows,
}

impl ScriptType {
    pub fn detect() -> Self {
        if cfg!(windows) {
            ScriptType::Windows
        } else {
            ScriptType::Posix
        }
    }
}

/// Paths to remove, in the order they should appear in the script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixupPlan {
    pub files: Vec<PathBuf>,
}

impl FixupPlan {
    pub fn new() -> Self {
        FixupPlan::default()
    }

    pub fn add(&mut self, file: &Path) {
        self.files.push(file.to_path_buf());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths that are not valid UTF-8 are written lossily and logged.
    pub fn script(&self, script_type: ScriptType) -> String {
        self.files
            .iter()
            .map(|file| {
                let text = file.to_string_lossy();
                if file.to_str().is_none() {
                    warn!("{} is not valid UTF-8, check its line in the script", text);
                }
                match script_type {
                    ScriptType::Posix => format!("rm \"{}\"\n", escape_posix(&text)),
                    ScriptType::Windows => format!("del \"{}\"\r\n", escape_batch(&text)),
                }
            })
            .collect()
    }
}

fn escape_posix(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// cmd expands %VAR% even inside double quotes
fn escape_batch(path: &str) -> String {
    path.replace('%', "%%")
}

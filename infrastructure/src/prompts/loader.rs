//! File system prompt loader
//!
//! [`FilePromptLoader`] implements [`SystemPromptPort`] by reading
//! `chat.md` / `diagnose.md` from a prompt directory. A missing directory,
//! a missing file, or a blank file all fall back to the built-in prompt.

use pcai_application::{BuiltinPrompts, SystemPromptPort};
use pcai_domain::Mode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct FilePromptLoader {
    dir: Option<PathBuf>,
}

impl FilePromptLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// File name holding the prompt for `mode`.
    pub fn file_name(mode: Mode) -> String {
        format!("{}.md", mode.as_str())
    }

    fn read(dir: &Path, mode: Mode) -> Option<String> {
        let path = dir.join(Self::file_name(mode));
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => {
                debug!(path = %path.display(), "Loaded system prompt");
                Some(content.trim().to_string())
            }
            Ok(_) => {
                warn!(path = %path.display(), "Prompt file is empty, using built-in prompt");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read prompt file");
                None
            }
        }
    }
}

impl SystemPromptPort for FilePromptLoader {
    fn system_prompt(&self, mode: Mode) -> String {
        self.dir
            .as_deref()
            .and_then(|dir| Self::read(dir, mode))
            .unwrap_or_else(|| BuiltinPrompts::for_mode(mode).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_prompt_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("diagnose.md"), "  Custom diagnose prompt\n").unwrap();

        let loader = FilePromptLoader::new(Some(dir.path().to_path_buf()));
        assert_eq!(loader.system_prompt(Mode::Diagnose), "Custom diagnose prompt");
        assert_eq!(
            loader.system_prompt(Mode::Chat),
            BuiltinPrompts::for_mode(Mode::Chat)
        );
    }

    #[test]
    fn test_blank_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chat.md"), "\n\n").unwrap();

        let loader = FilePromptLoader::new(Some(dir.path().to_path_buf()));
        assert_eq!(
            loader.system_prompt(Mode::Chat),
            BuiltinPrompts::for_mode(Mode::Chat)
        );
    }

    #[test]
    fn test_without_directory_uses_builtin() {
        let loader = FilePromptLoader::default();
        assert!(loader.system_prompt(Mode::Diagnose).contains("recommendations"));
    }
}

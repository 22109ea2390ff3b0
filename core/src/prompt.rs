//! System Prompt Assembly
//!
//! The system prompt is computed once at startup. Users can prepend their own
//! standing instructions by writing `~/.cell/constitution.md`; its trimmed
//! content, when non-empty, goes in front of the built-in default. Every
//! failure mode while reading the file (missing, unreadable, not UTF-8,
//! whitespace-only) collapses to "no override present" and never surfaces to
//! the user.

use std::path::{Path, PathBuf};

use crate::config::config_dir;

/// Instruction text used when no constitution override is present.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a concise terminal assistant. Keep responses short and helpful.";

/// Where the constitution override lives, `~/.cell/constitution.md`.
pub fn constitution_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("constitution.md"))
}

/// Build the system prompt from the per-user constitution file, falling back
/// to [`DEFAULT_SYSTEM_PROMPT`] alone.
pub fn build_system_prompt() -> String {
    match constitution_path() {
        Some(path) => build_system_prompt_from(&path),
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    }
}

/// Same as [`build_system_prompt`] with an explicit override path.
pub fn build_system_prompt_from(path: &Path) -> String {
    match load_override(path) {
        Some(constitution) => format!("{constitution}\n\n{DEFAULT_SYSTEM_PROMPT}"),
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    }
}

fn load_override(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|error| {
            tracing::debug!(path = %path.display(), %error, "no constitution override");
            error
        })
        .ok()?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constitution.md");
        assert_eq!(build_system_prompt_from(&path), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_override_is_trimmed_and_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constitution.md");
        std::fs::write(&path, " Be terse.\n").unwrap();
        assert_eq!(
            build_system_prompt_from(&path),
            "Be terse.\n\nYou are a concise terminal assistant. Keep responses short and helpful."
        );
    }

    #[test]
    fn test_whitespace_only_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constitution.md");
        std::fs::write(&path, " \n\t\n").unwrap();
        assert_eq!(build_system_prompt_from(&path), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_unreadable_file_yields_default() {
        // A directory at the constitution path makes the read fail outright.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constitution.md");
        std::fs::create_dir(&path).unwrap();
        assert_eq!(build_system_prompt_from(&path), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_multiline_override_keeps_inner_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constitution.md");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Rule one.").unwrap();
        writeln!(file, "Rule two.").unwrap();
        assert_eq!(
            build_system_prompt_from(&path),
            format!("Rule one.\nRule two.\n\n{DEFAULT_SYSTEM_PROMPT}")
        );
    }
}

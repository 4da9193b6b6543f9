use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// User preferences persisted between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// What the assistant calls the user; empty means no name was set.
    pub name: String,
}

impl Preferences {
    /// Loads preferences from a TOML file; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Preferences> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(path)?;
        let prefs: Preferences = toml::from_str(&content)?;
        Ok(prefs)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preferences_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut prefs = Preferences::default();
        assert!(prefs.name.is_empty());
        prefs.name = "Alice".to_string();
        prefs.save(&path).unwrap();

        let loaded = Preferences::load(&path).unwrap();
        assert_eq!(loaded.name, "Alice");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::load(dir.path().join("nope.toml")).unwrap();
        assert!(prefs.name.is_empty());
    }
}

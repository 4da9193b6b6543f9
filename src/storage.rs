use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Line-oriented store for saved task records.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Loads saved task lines, skipping blanks. A missing file is an empty
    /// store, not an error.
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.file_path)?;
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn save(&self, records: &[String]) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = records.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&self.file_path, content)?;
        log::info!("saved {} task record(s)", records.len());
        Ok(())
    }
}

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct FixtureLoader {
    fixtures_dir: PathBuf,
}

impl FixtureLoader {
    /// Create a new fixture loader
    pub fn new(fixtures_dir: impl AsRef<Path>) -> Self {
        Self {
            fixtures_dir: fixtures_dir.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.fixtures_dir.join(path)
        }
    }

    /// Load a JSON fixture file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Value> {
        let full_path = self.resolve(path.as_ref());

        let content = std::fs::read_to_string(&full_path)
            .context(format!("Failed to read fixture file: {:?}", full_path))?;

        let json: Value = serde_json::from_str(&content)
            .context(format!("Failed to parse JSON fixture: {:?}", full_path))?;

        Ok(json)
    }

    /// Write `data` as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>, data: &Value) -> Result<usize> {
        let full_path = self.resolve(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create fixtures directory: {:?}", parent))?;
        }

        let mut json_string = serde_json::to_string_pretty(data)?;
        json_string.push('\n');
        std::fs::write(&full_path, &json_string)
            .context(format!("Failed to write fixture: {:?}", full_path))?;
        Ok(json_string.len())
    }

    /// Check if a fixture file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path.as_ref()).exists()
    }

    /// Get the fixtures directory path
    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FixtureLoader::new(dir.path());
        let value = serde_json::json!({ "status": "active", "balance": "1" });

        assert!(!loader.exists("expected/account.json"));
        loader.save("expected/account.json", &value).unwrap();
        assert!(loader.exists("expected/account.json"));
        assert_eq!(loader.load("expected/account.json").unwrap(), value);
    }
}

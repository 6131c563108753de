use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("satchel")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SatchelConfig {
    #[serde(default = "default_data_dir")]
    pub data_directory: PathBuf,
}

impl Default for SatchelConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
        }
    }
}

impl SatchelConfig {
    /// Read the config file, falling back to defaults when it is missing
    /// or unparseable.
    pub fn load() -> Self {
        let Some(config_dir) = dirs::config_dir() else {
            return Self::default();
        };
        let path = config_dir.join("satchel").join("config.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Unparseable config at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_directory.join("data.json")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_directory.join("images")
    }

    /// Ensure the data directory layout exists.
    pub fn ensure_files(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)?;
        std::fs::create_dir_all(self.images_dir())?;
        Ok(())
    }
}

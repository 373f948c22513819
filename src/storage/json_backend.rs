use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::StorageBackend;
use crate::domain::Group;
use crate::errors::StoreError;

const DEFAULT_DIR_NAME: &str = ".eco_core";
const GROUPS_DIR: &str = "groups";
const STATE_FILE: &str = "state.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file persistence rooted at `~/.eco_core` (or `ECO_CORE_HOME`).
///
/// One pretty-printed file per group under `groups/`, plus a small state
/// file remembering the last active group.
#[derive(Clone)]
pub struct JsonStorage {
    groups_dir: PathBuf,
    state_file: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_group: Option<String>,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self, StoreError> {
        let root = root.unwrap_or_else(default_root);
        let groups_dir = root.join(GROUPS_DIR);
        fs::create_dir_all(&groups_dir)?;
        Ok(Self {
            state_file: root.join(STATE_FILE),
            groups_dir,
        })
    }

    pub fn new_default() -> Result<Self, StoreError> {
        Self::new(None)
    }

    fn read_state(&self) -> Result<StoreState, StoreError> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }
}

impl StorageBackend for JsonStorage {
    fn load_named(&self, name: &str) -> Result<Group, StoreError> {
        let path = self.group_path(name);
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save_named(&self, group: &Group, name: &str) -> Result<PathBuf, StoreError> {
        let path = self.group_path(name);
        let json = serde_json::to_string_pretty(group)?;
        write_atomic(&path, &json)?;
        tracing::debug!(path = %path.display(), "wrote group file");
        Ok(path)
    }

    fn delete_named(&self, name: &str) -> Result<(), StoreError> {
        let path = self.group_path(name);
        if !path.exists() {
            return Err(StoreError::InvalidRef(format!(
                "no group file for `{}`",
                name
            )));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn group_path(&self, name: &str) -> PathBuf {
        self.groups_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn group_exists(&self, name: &str) -> bool {
        self.group_path(name).exists()
    }

    fn list_groups(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.groups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            // Unreadable or foreign files are skipped, not fatal.
            let contents = match fs::read_to_string(&path) {
                Ok(value) => value,
                Err(_) => continue,
            };
            let group: Group = match serde_json::from_str(&contents) {
                Ok(group) => group,
                Err(_) => continue,
            };
            names.push(group.name);
        }
        names.sort_by_key(|name| name.to_lowercase());
        Ok(names)
    }

    fn last_group(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read_state()?.last_group)
    }

    fn record_last_group(&self, name: Option<&str>) -> Result<(), StoreError> {
        let mut state = self.read_state()?;
        state.last_group = name.map(|n| n.to_string());
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)?;
        Ok(())
    }
}

fn default_root() -> PathBuf {
    if let Some(custom) = env::var_os("ECO_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Lowercased slug used for file names; the display name lives in the file.
fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Stages to a temporary file and renames so readers never see a torn write.
fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}

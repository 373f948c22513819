use std::path::PathBuf;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::Group;
use crate::errors::StoreError;

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    fn load_named(&self, name: &str) -> Result<Group, StoreError>;
    fn save_named(&self, group: &Group, name: &str) -> Result<PathBuf, StoreError>;
    fn delete_named(&self, name: &str) -> Result<(), StoreError>;
    fn group_path(&self, name: &str) -> PathBuf;
    fn group_exists(&self, name: &str) -> bool;
    fn list_groups(&self) -> Result<Vec<String>, StoreError>;
    fn last_group(&self) -> Result<Option<String>, StoreError>;
    fn record_last_group(&self, name: Option<&str>) -> Result<(), StoreError>;
}

/// Facade that coordinates the active group and its persistence.
///
/// The active-group session is explicit state owned by whoever holds the
/// manager; nothing here touches process-global state.
pub struct GroupManager {
    current: Option<Group>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl GroupManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Creates a new group, persists it, and selects it as active.
    pub fn create(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Group name cannot be empty".into()));
        }
        if self.storage.group_exists(name) {
            return Err(ServiceError::Conflict(format!(
                "Group `{}` already exists",
                name
            )));
        }
        let group = Group::new(name);
        self.storage.save_named(&group, name)?;
        self.storage.record_last_group(Some(name))?;
        tracing::info!(group = name, "created group");
        self.current = Some(group);
        self.current_name = Some(name.to_string());
        Ok(())
    }

    /// Loads a group by name and selects it as active.
    pub fn load(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if !self.storage.group_exists(name) {
            return Err(ServiceError::NotFound(format!(
                "Group `{}` not found",
                name
            )));
        }
        let group = self.storage.load_named(name)?;
        self.storage.record_last_group(Some(name))?;
        tracing::info!(group = name, "loaded group");
        self.current = Some(group);
        self.current_name = Some(name.to_string());
        Ok(())
    }

    /// Persists the active group back to its file.
    pub fn save(&mut self) -> ServiceResult<PathBuf> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| ServiceError::NotFound("No group selected".into()))?;
        let group = self
            .current
            .as_mut()
            .ok_or_else(|| ServiceError::NotFound("No group selected".into()))?;
        group.touch();
        let path = self.storage.save_named(group, &name)?;
        tracing::debug!(group = name.as_str(), path = %path.display(), "saved group");
        Ok(path)
    }

    /// Deletes a group file. Clears the session if it was the active group.
    pub fn delete(&mut self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if !self.storage.group_exists(name) {
            return Err(ServiceError::NotFound(format!(
                "Group `{}` not found",
                name
            )));
        }
        if self.current_name.as_deref() == Some(name) {
            self.clear_session()?;
        }
        self.storage.delete_named(name)?;
        tracing::info!(group = name, "deleted group");
        Ok(())
    }

    pub fn list(&self) -> ServiceResult<Vec<String>> {
        Ok(self.storage.list_groups()?)
    }

    pub fn last_group(&self) -> ServiceResult<Option<String>> {
        Ok(self.storage.last_group()?)
    }

    /// Forgets the active group without touching its file.
    pub fn clear_session(&mut self) -> ServiceResult<()> {
        self.storage.record_last_group(None)?;
        self.current = None;
        self.current_name = None;
        Ok(())
    }

    pub fn with_current<T>(&self, f: impl FnOnce(&Group) -> T) -> ServiceResult<T> {
        self.current
            .as_ref()
            .map(f)
            .ok_or_else(|| ServiceError::NotFound("No group selected".into()))
    }

    /// Runs a mutation against the active group and saves on success.
    pub fn with_current_mut<T>(
        &mut self,
        f: impl FnOnce(&mut Group) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let group = self
            .current
            .as_mut()
            .ok_or_else(|| ServiceError::NotFound("No group selected".into()))?;
        let value = f(group)?;
        self.save()?;
        Ok(value)
    }
}

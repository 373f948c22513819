use dialoguer::theme::ColorfulTheme;

use crate::config::{Config, ConfigManager};
use crate::core::services::ServiceResult;
use crate::core::GroupManager;
use crate::currency;
use crate::domain::Group;
use crate::storage::JsonStorage;

use super::commands;
use super::registry::CommandRegistry;
use super::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: GroupManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let storage = JsonStorage::new_default()?;
        let manager = GroupManager::new(Box::new(storage));
        let config = ConfigManager::new()?.load()?;
        let mut context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.auto_load_last();
        Ok(context)
    }

    /// Reopens the group that was active when the shell last exited.
    fn auto_load_last(&mut self) {
        let Ok(Some(name)) = self.manager.last_group() else {
            return;
        };
        if self.manager.load(&name).is_ok() {
            tracing::info!(group = name.as_str(), "resumed active group");
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn prompt(&self) -> String {
        match self.manager.current_name() {
            Some(name) => format!("eco [{}]> ", name),
            None => "eco> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn with_group<T>(&self, f: impl FnOnce(&Group) -> T) -> ServiceResult<T> {
        self.manager.with_current(f)
    }

    pub fn with_group_mut<T>(
        &mut self,
        f: impl FnOnce(&mut Group) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        self.manager.with_current_mut(f)
    }

    pub fn money(&self, value: f64) -> String {
        currency::money(&self.config.currency_symbol, value)
    }
}

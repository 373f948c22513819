use std::collections::HashMap;

pub mod expense;
pub mod group;
pub mod member;
pub mod payment;
pub mod settle;
pub mod system;

use super::registry::CommandEntry;
use super::CommandError;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(group::definitions());
    commands.extend(member::definitions());
    commands.extend(expense::definitions());
    commands.extend(payment::definitions());
    commands.extend(settle::definitions());
    commands
}

/// Positional arguments plus `--flag value` / `--flag=value` options.
pub(crate) struct ParsedArgs {
    pub positional: Vec<String>,
    flags: HashMap<String, String>,
    switches: Vec<String>,
}

impl ParsedArgs {
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(|s| s.as_str())
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s == name)
    }
}

/// Splits `args` into positionals, valued flags, and boolean switches.
/// Flags listed in `switches` never consume a value.
pub(crate) fn parse_args(
    args: &[&str],
    switches: &[&str],
) -> Result<ParsedArgs, CommandError> {
    let mut parsed = ParsedArgs {
        positional: Vec::new(),
        flags: HashMap::new(),
        switches: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(&token) = iter.next() {
        let Some(stripped) = token.strip_prefix("--") else {
            parsed.positional.push(token.to_string());
            continue;
        };
        if let Some((key, value)) = stripped.split_once('=') {
            parsed.flags.insert(key.to_string(), value.to_string());
        } else if switches.contains(&stripped) {
            parsed.switches.push(stripped.to_string());
        } else {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("flag `--{}` needs a value", stripped))
            })?;
            parsed.flags.insert(stripped.to_string(), value.to_string());
        }
    }

    Ok(parsed)
}

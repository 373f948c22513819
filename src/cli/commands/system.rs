use crate::cli::registry::CommandEntry;
use crate::cli::{output, CommandResult, ShellContext};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help", cmd_help),
        CommandEntry::new("version", "Show the application version", "version", cmd_version),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Commands");
    let width = context
        .registry
        .iter()
        .map(|entry| entry.usage.len())
        .max()
        .unwrap_or(0);
    for entry in context.registry.iter() {
        output::info(format!(
            "  {:<width$}  {}",
            entry.usage,
            entry.description,
            width = width
        ));
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!("eco_core {}", env!("CARGO_PKG_VERSION")));
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}

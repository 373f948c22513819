use crate::cli::registry::CommandEntry;
use crate::cli::{io, output, CliMode, CommandError, CommandResult, ShellContext};

use super::parse_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "group",
        "Group management (create, select, current, list, delete, clear)",
        "group <create|select|current|list|delete|clear> [name]",
        cmd_group,
    )]
}

fn cmd_group(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: group <create|select|current|list|delete|clear> [name]".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "create" => handle_create(context, rest),
        "select" => handle_select(context, rest),
        "current" => handle_current(context),
        "list" | "show" => handle_list(context),
        "delete" => handle_delete(context, rest),
        "clear" | "clear-session" => handle_clear(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown group subcommand `{}`. Available: create, select, current, list, delete, clear",
            other
        ))),
    }
}

fn handle_create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: group create <name>".into(),
        ));
    }
    context.manager.create(&name)?;
    io::print_success(format!(
        "Created group `{}` and set it as active.",
        name.trim()
    ));
    Ok(())
}

fn handle_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = if args.is_empty() {
        if context.mode() != CliMode::Interactive {
            return Err(CommandError::InvalidArguments(
                "usage: group select <name>".into(),
            ));
        }
        let groups = context.manager.list()?;
        if groups.is_empty() {
            output::warning("No groups found. Create one first.");
            return Ok(());
        }
        let index = io::prompt_select(&context.theme, "Select a group", &groups)?;
        groups[index].clone()
    } else {
        args.join(" ")
    };

    context.manager.load(&name)?;
    io::print_success(format!("Selected group `{}` as active.", name.trim()));
    Ok(())
}

fn handle_current(context: &mut ShellContext) -> CommandResult {
    match context.manager.current_name() {
        Some(name) => output::info(format!("Current group: `{}`", name)),
        None => output::warning("No group currently selected."),
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let groups = context.manager.list()?;
    if groups.is_empty() {
        output::warning("No groups found. Create one first.");
        return Ok(());
    }
    output::section("Groups");
    for name in groups {
        let marker = if context.manager.current_name() == Some(name.as_str()) {
            " (active)"
        } else {
            ""
        };
        output::info(format!("  • {}{}", name, marker));
    }
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["yes"])?;
    let name = parsed.positional.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: group delete <name> [--yes]".into(),
        ));
    }
    if context.mode() == CliMode::Interactive && !parsed.switch("yes") {
        let prompt = format!(
            "Delete group `{}` with all its members, expenses, and payments?",
            name.trim()
        );
        if !io::confirm_action(&context.theme, &prompt, false)? {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }
    context.manager.delete(&name)?;
    io::print_success(format!("Deleted group `{}`.", name.trim()));
    Ok(())
}

fn handle_clear(context: &mut ShellContext) -> CommandResult {
    context.manager.clear_session()?;
    io::print_success("Session cleared.");
    Ok(())
}

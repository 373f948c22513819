use crate::cli::registry::CommandEntry;
use crate::cli::{io, output, CommandError, CommandResult, ShellContext};
use crate::core::services::MemberService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "member",
        "Member management (add, list, rename, remove)",
        "member <add|list|rename|remove> [name]",
        cmd_member,
    )]
}

fn cmd_member(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: member <add|list|rename|remove> [name]".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" | "show" => handle_list(context),
        "rename" => handle_rename(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown member subcommand `{}`. Available: add, list, rename, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: member add <name>".into(),
        ));
    }
    context.with_group_mut(|group| MemberService::add(group, &name))?;
    let group_name = context.with_group(|group| group.name.clone())?;
    io::print_success(format!(
        "Added member `{}` to group `{}`.",
        name.trim(),
        group_name
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    context.with_group(|group| {
        let members = MemberService::list(group);
        if members.is_empty() {
            output::warning("No members found in this group.");
            return;
        }
        output::section(format!("Members in `{}`", group.name));
        for member in members {
            output::info(format!(
                "  • {}",
                output::colorize(&member.name, member.color_or_default())
            ));
        }
    })?;
    Ok(())
}

fn handle_rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[old_name, new_name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: member rename <old> <new>".into(),
        ));
    };
    context.with_group_mut(|group| {
        let id = MemberService::resolve(group, old_name)?;
        MemberService::rename(group, id, new_name)
    })?;
    io::print_success(format!("Renamed member `{}` to `{}`.", old_name, new_name));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: member remove <name>".into(),
        ));
    }
    context.with_group_mut(|group| {
        let id = MemberService::resolve(group, &name)?;
        MemberService::remove(group, id)
    })?;
    io::print_success(format!("Removed member `{}`.", name.trim()));
    Ok(())
}

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::cli::registry::CommandEntry;
use crate::cli::{io, output, CliMode, CommandError, CommandResult, ShellContext};
use crate::core::services::expense_service::ExpenseChanges;
use crate::core::services::{ExpenseService, MemberService};
use crate::currency::parse_amount;

use super::parse_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Expense tracking (add, list, edit, splits, remove)",
        "expense <add|list|edit|splits|remove> ...",
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense <add|list|edit|splits|remove> ...".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "list" | "show" => handle_list(context),
        "edit" => handle_edit(context, rest),
        "splits" => handle_splits(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense subcommand `{}`. Available: add, list, edit, splits, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    if parsed.positional.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: expense add <amount> <paid-by> <description...> [--date YYYY-MM-DD] [--split a,b,c]"
                .into(),
        ));
    }
    let amount = parse_amount(&parsed.positional[0])?;
    let paid_by = parsed.positional[1].clone();
    let description = parsed.positional[2..].join(" ");
    let date = match parsed.flag("date") {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    let split_between: Vec<String> = match parsed.flag("split") {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None if context.mode() == CliMode::Interactive => {
            prompt_split_members(context, &paid_by)?
        }
        None => Vec::new(),
    };

    context.with_group_mut(|group| {
        ExpenseService::add(group, &description, amount, date, &paid_by, &split_between)
    })?;

    let shared_with = if split_between.is_empty() {
        paid_by.clone()
    } else {
        split_between.join(", ")
    };
    io::print_success(format!(
        "Expense `{}` added and split between {}.",
        description, shared_with
    ));
    Ok(())
}

/// Asks for split members one at a time; empty input stops, the payer and
/// unknown names are rejected and asked again.
fn prompt_split_members(
    context: &ShellContext,
    paid_by: &str,
) -> Result<Vec<String>, CommandError> {
    let known: Vec<String> =
        context.with_group(|group| group.members.iter().map(|m| m.name.clone()).collect())?;
    let payer = paid_by.trim().to_ascii_lowercase();

    output::info("Enter the members this expense is split with (empty to stop):");
    let mut members = Vec::new();
    loop {
        let name = io::prompt_text(&context.theme, "Member name")?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            break;
        }
        if trimmed.to_ascii_lowercase() == payer {
            output::warning("Payer cannot be included in the split list.");
            continue;
        }
        if !known
            .iter()
            .any(|m| m.to_ascii_lowercase() == trimmed.to_ascii_lowercase())
        {
            output::warning(format!(
                "Member `{}` not found, please add them first.",
                trimmed
            ));
            continue;
        }
        members.push(trimmed.to_string());
    }
    Ok(members)
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let symbol = context.config.currency_symbol.clone();
    context.with_group(|group| {
        let expenses = ExpenseService::list(group);
        if expenses.is_empty() {
            output::warning("No expenses found in the current group.");
            return;
        }
        output::section(format!("Expenses in `{}`", group.name));
        for (index, expense) in expenses.iter().enumerate() {
            let payer = group.member(expense.paid_by);
            let payer_name = payer.map(|m| m.name.as_str()).unwrap_or("Unknown");
            let payer_color = payer.map(|m| m.color_or_default()).unwrap_or("white");
            output::info(format!(
                "#{} {}  {}",
                index + 1,
                expense.description,
                crate::currency::money(&symbol, expense.amount)
            ));
            output::info(format!(
                "    {} • paid by {}",
                expense.date,
                output::colorize(payer_name, payer_color)
            ));
            for split in &expense.splits {
                let member = group.member(split.member_id);
                let name = member.map(|m| m.name.as_str()).unwrap_or("Unknown");
                let color = member.map(|m| m.color_or_default()).unwrap_or("white");
                output::info(format!(
                    "      {}  {}",
                    output::colorize(name, color),
                    crate::currency::money(&symbol, split.share_amount)
                ));
            }
            if expense.splits_mismatch() {
                output::warning(format!(
                    "Splits total {} does not match the expense amount.",
                    crate::currency::money(&symbol, expense.split_total())
                ));
            }
        }
    })?;
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let id = expense_id_at(context, parsed.positional.first())?;

    let mut changes = ExpenseChanges::default();
    if let Some(description) = parsed.flag("description") {
        changes.description = Some(description.to_string());
    }
    if let Some(raw) = parsed.flag("amount") {
        changes.amount = Some(parse_amount(raw)?);
    }
    if let Some(raw) = parsed.flag("date") {
        changes.date = Some(parse_date(raw)?);
    }
    let paid_by = parsed.flag("paid-by").map(|s| s.to_string());

    context.with_group_mut(|group| {
        if let Some(name) = paid_by {
            changes.paid_by = Some(MemberService::resolve(group, &name)?);
        }
        ExpenseService::edit(group, id, changes)
    })?;
    io::print_success("Expense updated.");
    Ok(())
}

fn handle_splits(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let Some((index, share_args)) = parsed.positional.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense splits <n> <member=amount>...".into(),
        ));
    };
    if share_args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: expense splits <n> <member=amount>...".into(),
        ));
    }
    let id = expense_id_at(context, Some(index))?;

    let mut pairs: Vec<(String, f64)> = Vec::new();
    for arg in share_args {
        let Some((name, raw)) = arg.split_once('=') else {
            return Err(CommandError::InvalidArguments(format!(
                "expected member=amount, got `{}`",
                arg
            )));
        };
        pairs.push((name.to_string(), parse_amount(raw)?));
    }

    context.with_group_mut(|group| {
        let mut shares: Vec<(Uuid, f64)> = Vec::new();
        for (name, amount) in &pairs {
            shares.push((MemberService::resolve(group, name)?, *amount));
        }
        ExpenseService::set_splits(group, id, &shares)
    })?;
    io::print_success("Splits replaced.");
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["yes"])?;
    let id = expense_id_at(context, parsed.positional.first())?;

    if context.mode() == CliMode::Interactive && !parsed.switch("yes") {
        let description =
            context.with_group(|group| group.expense(id).map(|e| e.description.clone()))?;
        let prompt = format!(
            "Delete expense `{}` and its splits?",
            description.unwrap_or_default()
        );
        if !io::confirm_action(&context.theme, &prompt, false)? {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }

    context.with_group_mut(|group| ExpenseService::remove(group, id))?;
    io::print_success("Expense deleted.");
    Ok(())
}

/// Resolves a 1-based position in the `expense list` ordering to an id.
fn expense_id_at(context: &ShellContext, raw: Option<&String>) -> Result<Uuid, CommandError> {
    let raw = raw.ok_or_else(|| {
        CommandError::InvalidArguments("expected an expense number (see `expense list`)".into())
    })?;
    let index: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a valid expense number", raw))
    })?;
    let id = context.with_group(|group| {
        ExpenseService::list(group)
            .get(index.wrapping_sub(1))
            .map(|expense| expense.id)
    })?;
    id.ok_or_else(|| {
        CommandError::InvalidArguments(format!("no expense #{} in the current group", raw))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}`, expected YYYY-MM-DD", raw))
    })
}

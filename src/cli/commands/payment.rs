use chrono::Local;
use uuid::Uuid;

use crate::cli::registry::CommandEntry;
use crate::cli::{io, output, CliMode, CommandError, CommandResult, ShellContext};
use crate::core::services::PaymentService;
use crate::currency::parse_amount;

use super::parse_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "payment",
        "Repayments between members (record, list, remove)",
        "payment <record|list|remove> ...",
        cmd_payment,
    )]
}

fn cmd_payment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: payment <record|list|remove> ...".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "record" | "add" => handle_record(context, rest),
        "list" | "show" => handle_list(context),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown payment subcommand `{}`. Available: record, list, remove",
            other
        ))),
    }
}

fn handle_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    if parsed.positional.len() != 3 {
        return Err(CommandError::InvalidArguments(
            "usage: payment record <from> <to> <amount> [--date YYYY-MM-DD]".into(),
        ));
    }
    let from = parsed.positional[0].clone();
    let to = parsed.positional[1].clone();
    let amount = parse_amount(&parsed.positional[2])?;
    let date = match parsed.flag("date") {
        Some(raw) => chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            CommandError::InvalidArguments(format!("invalid date `{}`, expected YYYY-MM-DD", raw))
        })?,
        None => Local::now().date_naive(),
    };

    context.with_group_mut(|group| PaymentService::record(group, &from, &to, amount, date))?;
    io::print_success(format!(
        "Payment recorded: {} paid {} {}.",
        from,
        to,
        context.money(amount)
    ));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let symbol = context.config.currency_symbol.clone();
    context.with_group(|group| {
        let payments = PaymentService::list(group);
        if payments.is_empty() {
            output::warning("No payments recorded in this group.");
            return;
        }
        output::section(format!("Payments in `{}`", group.name));
        for (index, payment) in payments.iter().enumerate() {
            output::info(format!(
                "#{} {}  {} paid {} on {}",
                index + 1,
                crate::currency::money(&symbol, payment.amount),
                group.member_name(payment.from),
                group.member_name(payment.to),
                payment.date
            ));
        }
    })?;
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["yes"])?;
    let id = payment_id_at(context, parsed.positional.first())?;

    if context.mode() == CliMode::Interactive
        && !parsed.switch("yes")
        && !io::confirm_action(&context.theme, "Delete this payment?", false)?
    {
        output::info("Deletion cancelled.");
        return Ok(());
    }

    context.with_group_mut(|group| PaymentService::remove(group, id))?;
    io::print_success("Payment deleted.");
    Ok(())
}

fn payment_id_at(context: &ShellContext, raw: Option<&String>) -> Result<Uuid, CommandError> {
    let raw = raw.ok_or_else(|| {
        CommandError::InvalidArguments("expected a payment number (see `payment list`)".into())
    })?;
    let index: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a valid payment number", raw))
    })?;
    let id = context.with_group(|group| {
        PaymentService::list(group)
            .get(index.wrapping_sub(1))
            .map(|payment| payment.id)
    })?;
    id.ok_or_else(|| {
        CommandError::InvalidArguments(format!("no payment #{} in the current group", raw))
    })
}

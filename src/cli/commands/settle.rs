use std::collections::HashMap;

use crate::cli::registry::CommandEntry;
use crate::cli::{output, CommandError, CommandResult, ShellContext};
use crate::currency::money;
use crate::settlement::{self, round_cents};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settle",
        "Show net balances and the suggested settlement transfers",
        "settle",
        cmd_settle,
    )]
}

fn cmd_settle(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.config.currency_symbol.clone();
    context.with_group(|group| {
        if group.members.is_empty() {
            output::warning("No members found in group.");
            return Ok(());
        }

        let rows = settlement::balances_for(group);

        output::section(format!("Balances for `{}`", group.name));
        let table_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    money(&symbol, row.paid),
                    money(&symbol, row.owed),
                    money(&symbol, row.repaid),
                    money(&symbol, row.received),
                    money(&symbol, row.net),
                ]
            })
            .collect();
        output::render_table(
            &["Member", "Paid", "Owed", "Repaid", "Received", "Net"],
            &table_rows,
        );

        let balances = settlement::balance_map(&rows);
        let total_positive = round_cents(balances.values().filter(|v| **v > 0.0).sum());
        let total_negative = round_cents(balances.values().filter(|v| **v < 0.0).map(|v| -v).sum());
        output::info(format!(
            "\nOwed to creditors: {} | Owed by debtors: {}",
            money(&symbol, total_positive),
            money(&symbol, total_negative)
        ));

        let colors: HashMap<&str, &str> = rows
            .iter()
            .map(|row| (row.name.as_str(), row.color.as_str()))
            .collect();

        let transfers = settlement::solve(&balances);
        output::section("Suggested settlements");
        if transfers.is_empty() {
            output::info("Everyone is settled up!");
        } else {
            for transfer in &transfers {
                let from_color = colors.get(transfer.from.as_str()).copied().unwrap_or("white");
                let to_color = colors.get(transfer.to.as_str()).copied().unwrap_or("white");
                output::info(format!(
                    "  {} pays {} {}",
                    output::colorize(&transfer.from, from_color),
                    output::colorize(&transfer.to, to_color),
                    money(&symbol, transfer.amount)
                ));
            }
        }
        Ok(())
    })
    .map_err(CommandError::from)?
}

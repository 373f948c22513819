use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::Group;

use super::round_cents;

/// Per-member tally of everything that moves money in or out.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRow {
    pub member_id: Uuid,
    pub name: String,
    pub color: String,
    /// Total of expenses this member paid for.
    pub paid: f64,
    /// Total owed via expense splits.
    pub owed: f64,
    /// Total repayments this member made.
    pub repaid: f64,
    /// Total repayments this member received.
    pub received: f64,
    /// Net position: positive means others owe this member.
    pub net: f64,
}

/// Aggregates net balances for every member of the group.
///
/// Net = (paid + repayments made) - (owed via splits + repayments
/// received): paying an expense or paying someone back raises your
/// position, owing a share or being paid back lowers it. Rows come back
/// sorted by name for stable display.
pub fn balances_for(group: &Group) -> Vec<BalanceRow> {
    let mut rows: Vec<BalanceRow> = group
        .members
        .iter()
        .map(|member| {
            let paid: f64 = group
                .expenses
                .iter()
                .filter(|e| e.paid_by == member.id)
                .map(|e| e.amount)
                .sum();
            let owed: f64 = group
                .expenses
                .iter()
                .flat_map(|e| e.splits.iter())
                .filter(|s| s.member_id == member.id)
                .map(|s| s.share_amount)
                .sum();
            let repaid: f64 = group
                .payments
                .iter()
                .filter(|p| p.from == member.id)
                .map(|p| p.amount)
                .sum();
            let received: f64 = group
                .payments
                .iter()
                .filter(|p| p.to == member.id)
                .map(|p| p.amount)
                .sum();

            // The 1e-9 nudge keeps sums that land exactly on a half-cent
            // from flipping direction under binary rounding.
            let net = round_cents((paid + repaid) - (owed + received) + 1e-9);

            BalanceRow {
                member_id: member.id,
                name: member.name.clone(),
                color: member.color_or_default().to_string(),
                paid: round_cents(paid),
                owed: round_cents(owed),
                repaid: round_cents(repaid),
                received: round_cents(received),
                net,
            }
        })
        .collect();

    rows.sort_by_key(|row| row.name.to_lowercase());
    rows
}

/// Collapses balance rows into the name -> net mapping the solver consumes.
pub fn balance_map(rows: &[BalanceRow]) -> BTreeMap<String, f64> {
    rows.iter()
        .map(|row| (row.name.clone(), row.net))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, Member, Payment};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn closed_group_nets_to_zero() {
        let mut group = Group::new("Trip");
        let alice = group.add_member(Member::new("Alice"));
        let bob = group.add_member(Member::new("Bob"));

        let mut expense = Expense::new("Dinner", 60.0, date(), alice);
        expense.split_equally(&[alice, bob]);
        group.add_expense(expense);

        let rows = balances_for(&group);
        let total: f64 = rows.iter().map(|r| r.net).sum();
        assert_eq!(round_cents(total), 0.0);

        let alice_row = rows.iter().find(|r| r.name == "Alice").unwrap();
        assert_eq!(alice_row.paid, 60.0);
        assert_eq!(alice_row.owed, 30.0);
        assert_eq!(alice_row.net, 30.0);
    }

    #[test]
    fn repayment_shifts_net_toward_zero() {
        let mut group = Group::new("Flat");
        let alice = group.add_member(Member::new("Alice"));
        let bob = group.add_member(Member::new("Bob"));

        let mut expense = Expense::new("Rent", 100.0, date(), alice);
        expense.split_equally(&[bob]);
        group.add_expense(expense);
        group.add_payment(Payment::new(bob, alice, 100.0, date()));

        let rows = balances_for(&group);
        for row in rows {
            assert_eq!(row.net, 0.0);
        }
    }

    #[test]
    fn rows_sort_by_name_case_insensitively() {
        let mut group = Group::new("Sorted");
        group.add_member(Member::new("charlie"));
        group.add_member(Member::new("Alice"));
        group.add_member(Member::new("bob"));

        let names: Vec<String> = balances_for(&group)
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(names, vec!["Alice", "bob", "charlie"]);
    }
}

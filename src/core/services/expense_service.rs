use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Expense, ExpenseSplit, Group};
use crate::settlement::round_cents;

use super::{MemberService, ServiceError, ServiceResult};

/// Field updates for an existing expense. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct ExpenseChanges {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub paid_by: Option<Uuid>,
}

pub struct ExpenseService;

impl ExpenseService {
    /// Records an expense paid by `paid_by` and split equally between
    /// `split_between`. An empty split list means the payer carries the
    /// whole amount alone.
    pub fn add(
        group: &mut Group,
        description: &str,
        amount: f64,
        date: NaiveDate,
        paid_by: &str,
        split_between: &[String],
    ) -> ServiceResult<Uuid> {
        if !(amount > 0.0) {
            return Err(ServiceError::Invalid(
                "Amount must be a positive number".into(),
            ));
        }
        let payer_id = MemberService::resolve(group, paid_by)?;

        let mut split_ids: Vec<Uuid> = Vec::new();
        for name in split_between {
            let id = MemberService::resolve(group, name)?;
            if id == payer_id {
                return Err(ServiceError::Invalid(
                    "Payer cannot be included in the split list".into(),
                ));
            }
            if !split_ids.contains(&id) {
                split_ids.push(id);
            }
        }
        if split_ids.is_empty() {
            split_ids.push(payer_id);
        }

        let mut expense = Expense::new(description, round_cents(amount), date, payer_id);
        expense.split_equally(&split_ids);
        Ok(group.add_expense(expense))
    }

    pub fn edit(group: &mut Group, id: Uuid, changes: ExpenseChanges) -> ServiceResult<()> {
        if let Some(amount) = changes.amount {
            if !(amount > 0.0) {
                return Err(ServiceError::Invalid(
                    "Amount must be a positive number".into(),
                ));
            }
        }
        if let Some(payer) = changes.paid_by {
            if group.member(payer).is_none() {
                return Err(ServiceError::NotFound("Payer not found in group".into()));
            }
        }
        let expense = group
            .expense_mut(id)
            .ok_or_else(|| ServiceError::NotFound("Expense not found".into()))?;
        if let Some(description) = changes.description {
            expense.description = description;
        }
        if let Some(amount) = changes.amount {
            expense.amount = round_cents(amount);
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(payer) = changes.paid_by {
            expense.paid_by = payer;
        }
        group.touch();
        Ok(())
    }

    /// Replaces the splits of an expense with explicit shares. The shares
    /// must sum to the expense amount to the cent.
    pub fn set_splits(
        group: &mut Group,
        id: Uuid,
        shares: &[(Uuid, f64)],
    ) -> ServiceResult<()> {
        for (member_id, share) in shares {
            if group.member(*member_id).is_none() {
                return Err(ServiceError::NotFound("Split member not found".into()));
            }
            if *share < 0.0 {
                return Err(ServiceError::Invalid(
                    "Share amount must be non-negative".into(),
                ));
            }
        }
        let expense = group
            .expense_mut(id)
            .ok_or_else(|| ServiceError::NotFound("Expense not found".into()))?;
        let total = round_cents(shares.iter().map(|(_, share)| *share).sum());
        if (total - round_cents(expense.amount)).abs() >= 0.01 {
            return Err(ServiceError::Integrity(format!(
                "Split amounts must sum to the expense amount (splits = {:.2}, expense = {:.2})",
                total, expense.amount
            )));
        }
        expense.splits = shares
            .iter()
            .map(|&(member_id, share)| ExpenseSplit {
                member_id,
                share_amount: round_cents(share),
            })
            .collect();
        group.touch();
        Ok(())
    }

    pub fn remove(group: &mut Group, id: Uuid) -> ServiceResult<()> {
        let before = group.expenses.len();
        group.expenses.retain(|expense| expense.id != id);
        if group.expenses.len() == before {
            return Err(ServiceError::NotFound("Expense not found".into()));
        }
        group.touch();
        Ok(())
    }

    /// Expenses newest first, matching the display order of the report view.
    pub fn list(group: &Group) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = group.expenses.iter().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }
}

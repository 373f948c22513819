use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;
use crate::settlement::round_cents;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub paid_by: Uuid,
    #[serde(default)]
    pub splits: Vec<ExpenseSplit>,
}

/// Share of an expense carried by one member. Plain record, no back-references.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpenseSplit {
    pub member_id: Uuid,
    pub share_amount: f64,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        paid_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date,
            paid_by,
            splits: Vec::new(),
        }
    }

    /// Splits the expense amount equally between the given members,
    /// replacing any existing splits.
    pub fn split_equally(&mut self, member_ids: &[Uuid]) {
        if member_ids.is_empty() {
            self.splits.clear();
            return;
        }
        let share = round_cents(self.amount / member_ids.len() as f64);
        self.splits = member_ids
            .iter()
            .map(|&member_id| ExpenseSplit {
                member_id,
                share_amount: share,
            })
            .collect();
    }

    pub fn split_total(&self) -> f64 {
        round_cents(self.splits.iter().map(|s| s.share_amount).sum())
    }

    /// True when the recorded splits no longer add up to the expense amount.
    pub fn splits_mismatch(&self) -> bool {
        !self.splits.is_empty() && (self.split_total() - round_cents(self.amount)).abs() >= 0.01
    }

    pub fn involves(&self, member_id: Uuid) -> bool {
        self.paid_by == member_id || self.splits.iter().any(|s| s.member_id == member_id)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

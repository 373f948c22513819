use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{common, expense::Expense, member::Member, payment::Payment};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate holding one group's members, expenses, and repayments.
///
/// All relations are flat vectors with id lookups; nothing holds a live
/// reference to anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Group::schema_version_default")]
    pub schema_version: u8,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            expenses: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_member(&mut self, member: Member) -> Uuid {
        let id = member.id;
        self.members.push(member);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        common::find_by_id(&self.members, id)
    }

    pub fn member_mut(&mut self, id: Uuid) -> Option<&mut Member> {
        common::find_by_id_mut(&mut self.members, id)
    }

    /// Case-insensitive lookup by member name.
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        common::find_by_name(&self.members, name)
    }

    pub fn member_name(&self, id: Uuid) -> &str {
        self.member(id).map(|m| m.name.as_str()).unwrap_or("Unknown")
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        common::find_by_id(&self.expenses, id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        common::find_by_id_mut(&mut self.expenses, id)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

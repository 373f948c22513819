use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;

/// A recorded repayment from one member to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Payment {
    pub fn new(from: Uuid, to: Uuid, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            date,
        }
    }

    pub fn involves(&self, member_id: Uuid) -> bool {
        self.from == member_id || self.to == member_id
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

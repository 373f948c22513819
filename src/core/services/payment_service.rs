use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Group, Payment};
use crate::settlement::round_cents;

use super::{MemberService, ServiceError, ServiceResult};

pub struct PaymentService;

impl PaymentService {
    /// Records a repayment from one member to another.
    pub fn record(
        group: &mut Group,
        from: &str,
        to: &str,
        amount: f64,
        date: NaiveDate,
    ) -> ServiceResult<Uuid> {
        if !(amount > 0.0) {
            return Err(ServiceError::Invalid(
                "Amount must be a positive number".into(),
            ));
        }
        let from_id = MemberService::resolve(group, from)?;
        let to_id = MemberService::resolve(group, to)?;
        if from_id == to_id {
            return Err(ServiceError::Invalid(
                "Payer and recipient must differ".into(),
            ));
        }
        let payment = Payment::new(from_id, to_id, round_cents(amount), date);
        Ok(group.add_payment(payment))
    }

    pub fn remove(group: &mut Group, id: Uuid) -> ServiceResult<()> {
        let before = group.payments.len();
        group.payments.retain(|payment| payment.id != id);
        if group.payments.len() == before {
            return Err(ServiceError::NotFound("Payment not found".into()));
        }
        group.touch();
        Ok(())
    }

    pub fn list(group: &Group) -> Vec<&Payment> {
        group.payments.iter().collect()
    }
}

pub mod common;
pub mod expense;
pub mod group;
pub mod member;
pub mod payment;

pub use expense::{Expense, ExpenseSplit};
pub use group::Group;
pub use member::Member;
pub use payment::Payment;

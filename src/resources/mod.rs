//! The seven bookkeeping entity types the dashboard manages.
//!
//! Each is a thin [Resource](crate::screen::Resource) implementation: slug,
//! display names, table columns, form schema and any cross-field rules. All
//! behavior lives in the generic screen module.

mod bank_accounts;
mod bills;
mod loans;
mod packages;
mod pilgrims;
mod transactions;
mod umrah;

pub use bank_accounts::BankAccounts;
pub use bills::Bills;
pub use loans::Loans;
pub use packages::Packages;
pub use pilgrims::Pilgrims;
pub use transactions::Transactions;
pub use umrah::Umrah;

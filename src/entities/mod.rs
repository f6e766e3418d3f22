// Entity Models - one typed record per sheet row
//
// Each entity has:
// - Positional coercion from a CSV row (`from_row`), never failing
// - The join helper used by the detail view

pub mod customer;
pub mod account;
pub mod branch;

pub use customer::{Customer, MaritalStatus};
pub use account::{Account, AccountType, accounts_for};
pub use branch::{Branch, find_branch};

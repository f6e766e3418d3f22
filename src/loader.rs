// Fetch-then-map, one function per sheet

use crate::entities::{Account, Branch, Customer};
use crate::errors::LoadError;
use crate::fetcher::{Sheet, SheetSource};
use crate::parser::parse_csv;

pub async fn load_customers<S: SheetSource + ?Sized>(source: &S) -> Result<Vec<Customer>, LoadError> {
    let text = source.fetch_sheet(Sheet::Customers).await?;
    let customers = parse_csv(&text, Customer::from_row);
    tracing::debug!(count = customers.len(), "Customers parsed");
    Ok(customers)
}

pub async fn load_accounts<S: SheetSource + ?Sized>(source: &S) -> Result<Vec<Account>, LoadError> {
    let text = source.fetch_sheet(Sheet::Accounts).await?;
    let accounts = parse_csv(&text, Account::from_row);
    tracing::debug!(count = accounts.len(), "Accounts parsed");
    Ok(accounts)
}

pub async fn load_branches<S: SheetSource + ?Sized>(source: &S) -> Result<Vec<Branch>, LoadError> {
    let text = source.fetch_sheet(Sheet::Branches).await?;
    let branches = parse_csv(&text, Branch::from_row);
    tracing::debug!(count = branches.len(), "Branches parsed");
    Ok(branches)
}

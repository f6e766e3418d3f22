// 🔎 Detail View Controller - one customer with accounts and branch
//
// Loads are sequential: customers → (only if the id exists) accounts →
// branches. A missing account or branch match is an empty result, not an
// error. Once the customer is found, a failed accounts or branches fetch
// only empties that part of the detail.

use serde::Serialize;

use crate::entities::{accounts_for, find_branch, Account, Branch, Customer};
use crate::errors::LoadError;
use crate::fetcher::SheetSource;
use crate::loader::{load_accounts, load_branches, load_customers};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub accounts: Vec<Account>,
    pub branch: Option<Branch>,
    /// Why the accounts sheet could not be loaded; `accounts` is empty then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_error: Option<String>,
    /// Why the branches sheet could not be loaded; `branch` is None then
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_error: Option<String>,
}

impl CustomerDetail {
    /// True when one of the joined sheets failed to load
    pub fn is_partial(&self) -> bool {
        self.accounts_error.is_some() || self.branch_error.is_some()
    }
}

/// Look up one customer by id and join its accounts and branch.
///
/// Returns `Ok(None)` when no customer has this id; in that case neither the
/// accounts nor the branches sheet is fetched. Only a failure of the customer
/// sheet is an `Err`.
pub async fn load_detail<S: SheetSource + ?Sized>(
    source: &S,
    customer_id: &str,
) -> Result<Option<CustomerDetail>, LoadError> {
    let customer = match load_customers(source)
        .await?
        .into_iter()
        .find(|c| c.id == customer_id)
    {
        Some(customer) => customer,
        None => {
            tracing::info!(customer_id, "Customer not found");
            return Ok(None);
        }
    };

    let (accounts, accounts_error) = match load_accounts(source).await {
        Ok(all) => (accounts_for(all, &customer.tax_id), None),
        Err(e) => {
            tracing::warn!(customer_id, error = %e, kind = e.kind(), "Accounts unavailable, showing none");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let (branch, branch_error) = match load_branches(source).await {
        Ok(all) => (find_branch(all, customer.branch_code), None),
        Err(e) => {
            tracing::warn!(customer_id, error = %e, kind = e.kind(), "Branches unavailable, showing none");
            (None, Some(e.to_string()))
        }
    };

    tracing::debug!(
        customer_id,
        accounts = accounts.len(),
        branch_found = branch.is_some(),
        "Customer detail joined"
    );

    Ok(Some(CustomerDetail {
        customer,
        accounts,
        branch,
        accounts_error,
        branch_error,
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(CustomerDetail),
    NotFound,
    Failed(String),
}

pub struct DetailView {
    customer_id: String,
    state: DetailState,
}

impl DetailView {
    pub fn new(customer_id: &str) -> Self {
        Self {
            customer_id: customer_id.to_string(),
            state: DetailState::Loading,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn detail(&self) -> Option<&CustomerDetail> {
        match &self.state {
            DetailState::Found(detail) => Some(detail),
            _ => None,
        }
    }

    /// Run the lookup for this view's id and store the outcome
    pub async fn load<S: SheetSource + ?Sized>(&mut self, source: &S) {
        self.state = DetailState::Loading;

        self.state = match load_detail(source, &self.customer_id).await {
            Ok(Some(detail)) => DetailState::Found(detail),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                tracing::error!(
                    customer_id = %self.customer_id,
                    error = %e,
                    kind = e.kind(),
                    "Failed to load customer detail"
                );
                DetailState::Failed(e.to_string())
            }
        };
    }
}

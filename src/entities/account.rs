// 💳 Account Entity - one row of the `contas` sheet
//
// Column order: id, customer cpf/cnpj, type, balance, credit limit,
// available credit

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::{cell, parse_currency};

// ============================================================================
// ACCOUNT TYPE
// ============================================================================

/// Serialized as its sheet label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    /// Conta corrente
    Checking,

    /// Conta poupança
    Savings,

    /// Unknown label, kept verbatim
    Other(String),
}

impl AccountType {
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace('ç', "c");

        match normalized.as_str() {
            "corrente" | "conta corrente" => AccountType::Checking,
            "poupanca" | "conta poupanca" => AccountType::Savings,
            _ => AccountType::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Checking => "corrente",
            AccountType::Savings => "poupança",
            AccountType::Other(label) => label,
        }
    }
}

impl From<String> for AccountType {
    fn from(label: String) -> Self {
        AccountType::from_label(&label)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> Self {
        account_type.as_str().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// Owner's CPF/CNPJ
    pub customer_tax_id: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub credit_limit: f64,
    pub available_credit: f64,
}

impl Account {
    pub fn from_row(row: &[String]) -> Self {
        Account {
            id: cell(row, 0),
            customer_tax_id: cell(row, 1),
            account_type: AccountType::from_label(&cell(row, 2)),
            balance: parse_currency(&cell(row, 3)),
            credit_limit: parse_currency(&cell(row, 4)),
            available_credit: parse_currency(&cell(row, 5)),
        }
    }

    pub fn belongs_to(&self, tax_id: &str) -> bool {
        self.customer_tax_id == tax_id
    }
}

/// Accounts owned by the given tax id, in sheet order
pub fn accounts_for(accounts: Vec<Account>, tax_id: &str) -> Vec<Account> {
    accounts
        .into_iter()
        .filter(|account| account.belongs_to(tax_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, tax_id: &str) -> Account {
        Account::from_row(&[
            id.to_string(),
            tax_id.to_string(),
            "corrente".to_string(),
            "100".to_string(),
            "50".to_string(),
            "25".to_string(),
        ])
    }

    #[test]
    fn test_account_from_row() {
        let row: Vec<String> = ["10", "\"111.222.333-44\"", "Poupança", "1520.75", "0", "x"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let account = Account::from_row(&row);

        assert_eq!(account.id, "10");
        assert_eq!(account.customer_tax_id, "111.222.333-44");
        assert_eq!(account.account_type, AccountType::Savings);
        assert_eq!(account.balance, 1520.75);
        assert_eq!(account.credit_limit, 0.0);
        assert!(account.available_credit.is_nan());
    }

    #[test]
    fn test_account_type_labels() {
        assert_eq!(AccountType::from_label("Corrente"), AccountType::Checking);
        assert_eq!(AccountType::from_label("poupanca"), AccountType::Savings);
        assert_eq!(
            AccountType::from_label("investimento"),
            AccountType::Other("investimento".to_string())
        );
        assert_eq!(AccountType::Savings.to_string(), "poupança");
    }

    #[test]
    fn test_accounts_for_excludes_other_customers() {
        let accounts = vec![
            account("1", "111"),
            account("2", "222"),
            account("3", "111"),
            account("4", "1111"),
        ];

        let mine = accounts_for(accounts, "111");
        let ids: Vec<&str> = mine.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "3"]);
    }
}

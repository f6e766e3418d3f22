// 👤 Customer Entity - one row of the `clientes` sheet
//
// Column order: id, cpf/cnpj, rg, birth date, name, social name, email,
// address, annual income, net worth, marital status, branch code

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::{cell, optional, parse_currency, parse_date, parse_int};

// ============================================================================
// MARITAL STATUS
// ============================================================================

/// Serialized as its sheet label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    /// Anything the sheet holds that isn't one of the known labels
    Other(String),
}

impl MaritalStatus {
    /// Parse the sheet label (case-insensitive, accent optional)
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace('ú', "u");

        match normalized.as_str() {
            "solteiro" | "solteira" | "solteiro(a)" => MaritalStatus::Single,
            "casado" | "casada" | "casado(a)" => MaritalStatus::Married,
            "divorciado" | "divorciada" | "divorciado(a)" => MaritalStatus::Divorced,
            "viuvo" | "viuva" | "viuvo(a)" => MaritalStatus::Widowed,
            _ => MaritalStatus::Other(label.trim().to_string()),
        }
    }

    /// Display label
    pub fn as_str(&self) -> &str {
        match self {
            MaritalStatus::Single => "Solteiro",
            MaritalStatus::Married => "Casado",
            MaritalStatus::Divorced => "Divorciado",
            MaritalStatus::Widowed => "Viúvo",
            MaritalStatus::Other(label) => label,
        }
    }
}

impl From<String> for MaritalStatus {
    fn from(label: String) -> Self {
        MaritalStatus::from_label(&label)
    }
}

impl From<MaritalStatus> for String {
    fn from(status: MaritalStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CUSTOMER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    /// CPF or CNPJ, the join key into the accounts sheet
    pub tax_id: String,
    /// RG
    pub national_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub name: String,
    pub social_name: Option<String>,
    pub email: String,
    pub address: String,
    pub annual_income: f64,
    pub net_worth: f64,
    pub marital_status: MaritalStatus,
    /// Join key into the branches sheet; None when the cell isn't a number
    pub branch_code: Option<i64>,
}

impl Customer {
    /// Coerce one positional row into a Customer.
    ///
    /// Never fails: missing cells are empty, bad numbers are NaN/None.
    pub fn from_row(row: &[String]) -> Self {
        Customer {
            id: cell(row, 0),
            tax_id: cell(row, 1),
            national_id: optional(row, 2),
            birth_date: parse_date(&cell(row, 3)),
            name: cell(row, 4),
            social_name: optional(row, 5),
            email: cell(row, 6),
            address: cell(row, 7),
            annual_income: parse_currency(&cell(row, 8)),
            net_worth: parse_currency(&cell(row, 9)),
            marital_status: MaritalStatus::from_label(&cell(row, 10)),
            branch_code: parse_int(&cell(row, 11)),
        }
    }

    /// Search predicate used by the list view.
    ///
    /// Name matches case-insensitively, tax id matches as typed.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase()) || self.tax_id.contains(term)
    }

    /// Social name when present, legal name otherwise
    pub fn display_name(&self) -> &str {
        self.social_name.as_deref().unwrap_or(&self.name)
    }
}

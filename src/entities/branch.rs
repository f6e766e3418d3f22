// 🏦 Branch Entity - one row of the `agencias` sheet
//
// Column order: id, code, name, address

use serde::{Deserialize, Serialize};

use crate::parser::{cell, parse_int};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    /// Numeric branch code; None when the cell isn't a number
    pub code: Option<i64>,
    pub name: String,
    pub address: String,
}

impl Branch {
    pub fn from_row(row: &[String]) -> Self {
        Branch {
            id: cell(row, 0),
            code: parse_int(&cell(row, 1)),
            name: cell(row, 2),
            address: cell(row, 3),
        }
    }
}

/// First branch whose code equals `code`.
///
/// A missing code never matches, not even a branch whose own code is missing.
pub fn find_branch(branches: Vec<Branch>, code: Option<i64>) -> Option<Branch> {
    let code = code?;
    branches.into_iter().find(|branch| branch.code == Some(code))
}

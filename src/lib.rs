// Bank Clients Viewer - Core Library
// Exposes all modules for use in the TUI/CLI, the web server, and tests

pub mod config;
pub mod errors;
pub mod fetcher;        // CSV export fetcher + SheetSource seam
pub mod parser;         // CSV row mapper + field coercion
pub mod entities;       // Customer, Account, Branch
pub mod loader;
pub mod listing;        // List view: search + pagination
pub mod detail;         // Detail view: customer + accounts + branch

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use errors::LoadError;
pub use fetcher::{fetch_csv, FileSheetSource, HttpSheetSource, Sheet, SheetSource};
pub use parser::{parse_csv, parse_csv_naive};
pub use entities::{
    Customer, MaritalStatus,
    Account, AccountType,
    Branch,
};
pub use loader::{load_accounts, load_branches, load_customers};
pub use listing::{CustomerPage, ListView, LoadStatus};
pub use detail::{load_detail, CustomerDetail, DetailState, DetailView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a currency value for display ("R$ 1500.00"); NaN shows as "-"
pub fn format_currency(value: f64) -> String {
    if value.is_finite() {
        format!("R$ {:.2}", value)
    } else {
        "-".to_string()
    }
}

/// Text for an empty accounts/branch section; names the load failure if any
pub fn unavailable_note(empty_text: &str, error: Option<&str>) -> String {
    match error {
        Some(error) => format!("{} (falha ao carregar: {})", empty_text, error),
        None => empty_text.to_string(),
    }
}

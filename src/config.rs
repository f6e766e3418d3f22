// ⚙️ Configuration - spreadsheet endpoint, paging, HTTP client settings
//
// Defaults point at the shared spreadsheet the viewer was built for.
// Every value can be overridden from the environment (or a .env file).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::fetcher::Sheet;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_SPREADSHEET_ID: &str = "1PBN_HQOi5ZpKDd63mouxttFvvCwtmY97Tb5if5_cdBA";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base of the spreadsheet host, without trailing slash
    pub sheets_base_url: String,
    pub spreadsheet_id: String,
    /// Customers per list page
    pub page_size: usize,
    pub timeout_secs: u64,
    /// Listen address for the web server
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::debug!(
            base_url = %config.sheets_base_url,
            spreadsheet_id = %config.spreadsheet_id,
            page_size = config.page_size,
            timeout_secs = config.timeout_secs,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let sheets_base_url = match get("BANK_CLIENTS_SHEETS_BASE_URL") {
            Some(url) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    bail!("BANK_CLIENTS_SHEETS_BASE_URL must start with http:// or https://");
                }
                url.trim_end_matches('/').to_string()
            }
            None => defaults.sheets_base_url,
        };

        let spreadsheet_id = get("BANK_CLIENTS_SPREADSHEET_ID")
            .map(|id| id.trim().to_string())
            .unwrap_or(defaults.spreadsheet_id);

        let page_size = match get("BANK_CLIENTS_PAGE_SIZE") {
            Some(raw) => {
                let size: usize = raw
                    .trim()
                    .parse()
                    .context("BANK_CLIENTS_PAGE_SIZE must be a positive integer")?;
                if size == 0 {
                    bail!("BANK_CLIENTS_PAGE_SIZE must be at least 1");
                }
                size
            }
            None => defaults.page_size,
        };

        let timeout_secs = match get("BANK_CLIENTS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .context("BANK_CLIENTS_TIMEOUT_SECS must be a number of seconds")?;
                if secs == 0 {
                    bail!("BANK_CLIENTS_TIMEOUT_SECS must be at least 1");
                }
                secs
            }
            None => defaults.timeout_secs,
        };

        let bind_addr = get("BANK_CLIENTS_BIND_ADDR").unwrap_or(defaults.bind_addr);

        Ok(Self {
            sheets_base_url,
            spreadsheet_id,
            page_size,
            timeout_secs,
            bind_addr,
        })
    }

    /// CSV export URL for one sheet of the spreadsheet
    pub fn sheet_url(&self, sheet: Sheet) -> String {
        format!(
            "{}/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.sheets_base_url,
            self.spreadsheet_id,
            urlencoding::encode(sheet.name())
        )
    }
}

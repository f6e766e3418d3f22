// 🌐 CSV Fetcher - one HTTP GET per sheet export
//
// SheetSource is the seam between the view controllers and the network:
// controllers only ever ask for "the text of sheet X".

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::errors::LoadError;

/// The three sheets of the spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Customers,
    Accounts,
    Branches,
}

impl Sheet {
    /// Sheet (tab) name as it appears in the spreadsheet
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Customers => "clientes",
            Sheet::Accounts => "contas",
            Sheet::Branches => "agencias",
        }
    }
}

/// Anything that can hand back the raw CSV text of a sheet.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_sheet(&self, sheet: Sheet) -> Result<String, LoadError>;
}

/// Fetch a CSV document and return its body as text.
///
/// Fails with `LoadError::Http` when the server answers with a non-success
/// status, and `LoadError::Network` when no response could be read.
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "CSV export returned an error status");
        return Err(LoadError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let text = response.text().await?;
    Ok(text)
}

/// SheetSource backed by the spreadsheet's public CSV export
#[derive(Clone)]
pub struct HttpSheetSource {
    client: reqwest::Client,
    config: Config,
}

impl HttpSheetSource {
    pub fn new(config: Config) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LoadError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_sheet(&self, sheet: Sheet) -> Result<String, LoadError> {
        let url = self.config.sheet_url(sheet);
        tracing::debug!(sheet = sheet.name(), %url, "Fetching sheet");

        let text = fetch_csv(&self.client, &url).await?;
        tracing::info!(sheet = sheet.name(), bytes = text.len(), "Sheet fetched");

        Ok(text)
    }
}

/// SheetSource reading `<dir>/<sheet name>.csv` from disk (offline mode)
#[derive(Debug, Clone)]
pub struct FileSheetSource {
    dir: PathBuf,
}

impl FileSheetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, sheet: Sheet) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet.name()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    async fn fetch_sheet(&self, sheet: Sheet) -> Result<String, LoadError> {
        let path = self.path_for(sheet);
        tracing::debug!(sheet = sheet.name(), path = %path.display(), "Reading sheet file");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Io(format!("Failed to read {}: {}", path.display(), e)))
    }
}

//! Source retrieval with sequential fallback, and table decoding.

use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::config::SourceConfig;
use crate::error::{EographError, Result};
use crate::ingest::record::{RowRecord, ID_COLUMN};

/// One place the source table may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// Absolute http(s) URLs are fetched remotely. Anything else is resolved
    /// against `base_url` when one is given, otherwise treated as a file path.
    pub fn resolve(raw: &str, base_url: Option<&Url>) -> Result<Self> {
        if let Ok(url) = Url::parse(raw) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(SourceLocation::Remote(url));
            }
        }

        match base_url {
            Some(base) => base
                .join(raw)
                .map(SourceLocation::Remote)
                .map_err(|e| {
                    EographError::Config(format!("Cannot resolve {} against {}: {}", raw, base, e))
                }),
            None => Ok(SourceLocation::Local(PathBuf::from(raw))),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Remote(url) => write!(f, "{}", url),
            SourceLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches the executive order table from the first location that yields a
/// non-empty body. Locations are tried one after another, never in parallel.
pub struct RecordLoader {
    client: Client,
    locations: Vec<SourceLocation>,
}

impl RecordLoader {
    /// Create a loader from the `[source]` configuration section.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| EographError::Config(format!("Invalid source.base_url: {}", e)))?;

        let locations = config
            .locations
            .iter()
            .map(|raw| SourceLocation::resolve(raw, base_url.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::with_locations(locations, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_locations(locations: Vec<SourceLocation>, timeout: Duration) -> Result<Self> {
        if locations.is_empty() {
            return Err(EographError::Config("No source locations configured".to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, locations })
    }

    /// Return the raw body of the first location that succeeds. Bytes are
    /// handed on undecoded so that text problems surface as decode errors.
    ///
    /// Fails with [`EographError::Retrieval`] naming every attempted location
    /// and the last underlying cause when all of them fail.
    pub async fn fetch(&self) -> Result<(SourceLocation, Vec<u8>)> {
        let mut last_error = String::new();

        for location in &self.locations {
            log::info!("Attempting to fetch source table from: {}", location);
            match self.fetch_one(location).await {
                Ok(body) => {
                    log::info!("Loaded {} bytes from {}", body.len(), location);
                    return Ok((location.clone(), body));
                }
                Err(e) => {
                    log::warn!("Failed to fetch {}: {}", location, e);
                    last_error = e.to_string();
                }
            }
        }

        let attempted = self
            .locations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Err(EographError::Retrieval { attempted, last_error })
    }

    async fn fetch_one(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        let body = match location {
            SourceLocation::Remote(url) => self
                .client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec(),
            SourceLocation::Local(path) => tokio::fs::read(path).await?,
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(EographError::InvalidInput("source table is empty".to_string()));
        }

        Ok(body)
    }

    /// Fetch and decode in one step.
    pub async fn load(&self) -> Result<Vec<RowRecord>> {
        let (location, body) = self.fetch().await?;
        let rows = decode_bytes(&body)?;
        log::info!("Decoded {} rows from {}", rows.len(), location);
        Ok(rows)
    }
}

/// Decode a fetched body. The body must be UTF-8; anything else is a
/// [`EographError::Decode`] rather than a retrieval failure.
pub fn decode_bytes(body: &[u8]) -> Result<Vec<RowRecord>> {
    let text = std::str::from_utf8(body)
        .map_err(|e| EographError::Decode(format!("source table is not valid UTF-8: {}", e)))?;
    decode_records(text)
}

/// Decode a delimited table with a header row into row records.
///
/// Blank lines are skipped, short rows are tolerated and unknown columns are
/// ignored. A table without an `executive_order_number` column is rejected.
pub fn decode_records(body: &str) -> Result<Vec<RowRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };

    let Some(id_column) = column(ID_COLUMN) else {
        return Err(EographError::Decode(format!(
            "missing required column: {}",
            ID_COLUMN
        )));
    };
    let title = column("title");
    let signing_date = column("signing_date");
    let publication_date = column("publication_date");
    let citation = column("citation");
    let html_url = column("html_url");
    let pdf_url = column("pdf_url");
    let disposition_notes = column("disposition_notes");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Short rows leave trailing columns empty.
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        rows.push(RowRecord {
            executive_order_number: field(Some(id_column)),
            title: field(title),
            signing_date: field(signing_date),
            publication_date: field(publication_date),
            citation: field(citation),
            html_url: field(html_url),
            pdf_url: field(pdf_url),
            disposition_notes: field(disposition_notes),
        });
    }
    Ok(rows)
}

use std::path::Path;
use tracing::info;

use crate::error::ScrapeResult;
use crate::scrape::Listing;

pub mod csv_exporter;

/// Supported tabular output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    /// Pick a format from the output path's extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => Self::Tsv,
            _ => Self::Csv,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Statistics for a completed export.
#[derive(Debug, Clone)]
pub struct ExportStats {
    pub records: usize,
    pub file_size_bytes: u64,
}

/// Write the accumulated dataset to a tabular file.
///
/// A header row is always present, even for an empty dataset; a run that
/// collected nothing still produces a well-formed file.
pub async fn export_listings(
    listings: &[Listing],
    output_path: &Path,
    format: ExportFormat,
) -> ScrapeResult<ExportStats> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let stats = match format {
        ExportFormat::Csv => csv_exporter::export_csv(listings, output_path).await?,
        ExportFormat::Tsv => csv_exporter::export_tsv(listings, output_path).await?,
    };

    info!(
        records = stats.records,
        bytes = stats.file_size_bytes,
        "Export completed: {}",
        output_path.display()
    );
    Ok(stats)
}

use csv::WriterBuilder;
use std::path::Path;
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};
use crate::scrape::Listing;

use super::ExportStats;

/// Export listings to CSV
pub async fn export_csv(listings: &[Listing], output_path: &Path) -> ScrapeResult<ExportStats> {
    export_with_delimiter(listings, output_path, b',').await
}

/// Export listings to TSV
pub async fn export_tsv(listings: &[Listing], output_path: &Path) -> ScrapeResult<ExportStats> {
    export_with_delimiter(listings, output_path, b'\t').await
}

async fn export_with_delimiter(
    listings: &[Listing],
    output_path: &Path,
    delimiter: u8,
) -> ScrapeResult<ExportStats> {
    debug!(
        "Exporting {} records to {}",
        listings.len(),
        output_path.display()
    );

    let file = std::fs::File::create(output_path)?;
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file);

    writer
        .write_record(Listing::COLUMNS)
        .map_err(|e| ScrapeError::export(e.to_string()))?;

    for listing in listings {
        writer
            .write_record(&[
                listing.name.as_str(),
                &listing.price.to_string(),
                &listing.rating.to_string(),
                listing.location.as_str(),
                listing.review_count.as_str(),
                listing.distance.as_str(),
                &listing.captured_at.to_rfc3339(),
            ])
            .map_err(|e| ScrapeError::export(e.to_string()))?;
    }

    writer.flush()?;
    drop(writer);

    let file_size = tokio::fs::metadata(output_path).await?.len();

    Ok(ExportStats {
        records: listings.len(),
        file_size_bytes: file_size,
    })
}

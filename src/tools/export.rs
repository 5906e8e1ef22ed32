//! CSV and JSON output for a finished category run.

use crate::core::config::CsvLayout;
use crate::core::types::ProductRecord;
use crate::core::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const STANDARD_HEADER: [&str; 7] = [
    "name",
    "price",
    "discount",
    "quantity",
    "image_url",
    "product_url",
    "scraped_at",
];

pub const EXTENDED_HEADER: [&str; 9] = [
    "name",
    "price",
    "original_price",
    "discount_amount",
    "discount_percent",
    "quantity",
    "image_url",
    "product_url",
    "scraped_at",
];

/// Paths written by [`save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn csv_row(record: &ProductRecord, layout: CsvLayout) -> Vec<String> {
    let at = record.scraped_at_display();
    match layout {
        CsvLayout::Standard => vec![
            record.name.clone(),
            record.price.clone(),
            record.discount.clone(),
            record.quantity.clone(),
            record.image_url.clone(),
            record.product_url.clone(),
            at,
        ],
        CsvLayout::Extended => vec![
            record.name.clone(),
            record.price.clone(),
            record.original_price.clone(),
            record.discount.clone(),
            record.discount_percent.clone(),
            record.quantity.clone(),
            record.image_url.clone(),
            record.product_url.clone(),
            at,
        ],
    }
}

pub fn write_csv(path: &Path, records: &[ProductRecord], layout: CsvLayout) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(create(path)?);
    match layout {
        CsvLayout::Standard => writer.write_record(STANDARD_HEADER)?,
        CsvLayout::Extended => writer.write_record(EXTENDED_HEADER)?,
    }
    for record in records {
        writer.write_record(csv_row(record, layout))?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed JSON array. Non-ASCII text is written as-is.
pub fn write_json(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `<stem>.csv` and `<stem>.json` under `dir`.
///
/// Nothing is written for an empty record set.
pub fn save(
    dir: &Path,
    stem: &str,
    records: &[ProductRecord],
    layout: CsvLayout,
) -> Result<Option<SavedFiles>, ExportError> {
    if records.is_empty() {
        warn!("⚠️ No products to save for {}", stem);
        return Ok(None);
    }
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = SavedFiles {
        csv: dir.join(format!("{stem}.csv")),
        json: dir.join(format!("{stem}.json")),
    };
    write_csv(&files.csv, records, layout)?;
    write_json(&files.json, records)?;
    info!(
        "💾 Saved {} product(s) to {} and {}",
        records.len(),
        files.csv.display(),
        files.json.display()
    );
    Ok(Some(files))
}

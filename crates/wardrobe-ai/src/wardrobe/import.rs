//! Bulk catalog import from CSV exports.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{ItemCategory, NewWardrobeItem, UnknownCategory};

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {source}")]
    Category {
        line: usize,
        #[source]
        source: UnknownCategory,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    category: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    style: String,
    #[serde(default)]
    seasons: String,
    #[serde(default)]
    occasions: String,
    #[serde(default)]
    image: String,
}

fn split_list(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Reads `name,category,color,style,seasons,occasions,image` rows.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<NewWardrobeItem>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NewWardrobeItem>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut items = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or_default();
            let row: CatalogRow = record.deserialize(Some(&headers))?;
            let category = row
                .category
                .parse::<ItemCategory>()
                .map_err(|source| CatalogImportError::Category { line, source })?;

            items.push(NewWardrobeItem {
                category,
                name: row.name,
                color: row.color,
                style: row.style.to_ascii_lowercase(),
                season: split_list(&row.seasons),
                occasions: split_list(&row.occasions),
                image: row.image,
            });
        }

        Ok(items)
    }
}

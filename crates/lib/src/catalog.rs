//! # Catalog
//!
//! The knowledge base: an ordered, immutable sequence of [`CatalogRow`]s loaded from a
//! CSV table, and the serializer that turns it into the text block embedded in every
//! prompt.
//!
//! The catalog is always serialized in full. Every row produces one block introduced by
//! [`RECORD_SEPARATOR`], and every block lists all [`CatalogField`]s in the same order,
//! so the model sees a uniform schema and can tell a missing value from a missing row.

use crate::errors::QaError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The placeholder rendered for any absent or empty value.
pub const NOT_SPECIFIED: &str = "не указано";

/// The line that opens every serialized record.
pub const RECORD_SEPARATOR: &str = "-----";

/// The fields of a catalog row, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogField {
    Title,
    Budget,
    AgeRating,
    ReleaseYear,
    BoxOffice,
    OriginalTitle,
    Synopsis,
    Duration,
    Tagline,
    Country,
}

impl CatalogField {
    /// All fields in the order they are serialized.
    pub const ALL: [CatalogField; 10] = [
        CatalogField::Title,
        CatalogField::Budget,
        CatalogField::AgeRating,
        CatalogField::ReleaseYear,
        CatalogField::BoxOffice,
        CatalogField::OriginalTitle,
        CatalogField::Synopsis,
        CatalogField::Duration,
        CatalogField::Tagline,
        CatalogField::Country,
    ];

    /// The exact (case and punctuation sensitive) CSV column name.
    pub fn column(self) -> &'static str {
        match self {
            CatalogField::Title => "Name",
            CatalogField::Budget => "Budget",
            CatalogField::AgeRating => "Age rating",
            CatalogField::ReleaseYear => "Release year",
            CatalogField::BoxOffice => "Box office",
            CatalogField::OriginalTitle => "Original title",
            CatalogField::Synopsis => "Synopsis",
            CatalogField::Duration => "Duration",
            CatalogField::Tagline => "Tagline",
            CatalogField::Country => "Country",
        }
    }

    /// The label shown to the model.
    pub fn label(self) -> &'static str {
        match self {
            CatalogField::Title => "Название",
            CatalogField::Budget => "Бюджет",
            CatalogField::AgeRating => "Возрастной рейтинг",
            CatalogField::ReleaseYear => "Год выпуска",
            CatalogField::BoxOffice => "Сборы",
            CatalogField::OriginalTitle => "Оригинальное название",
            CatalogField::Synopsis => "Краткое описание",
            CatalogField::Duration => "Продолжительность",
            CatalogField::Tagline => "Слоган",
            CatalogField::Country => "Страна",
        }
    }
}

/// One creative work of the catalog.
///
/// Every field holds either the source value or [`NOT_SPECIFIED`]; none is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub title: String,
    pub budget: String,
    pub age_rating: String,
    pub release_year: String,
    pub box_office: String,
    pub original_title: String,
    pub synopsis: String,
    pub duration: String,
    pub tagline: String,
    pub country: String,
}

impl CatalogRow {
    /// Builds a row from a column lookup. Absent, blank and `nan` cells become the placeholder.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let value = |field: CatalogField| normalize_cell(lookup(field.column()));
        Self {
            title: value(CatalogField::Title),
            budget: value(CatalogField::Budget),
            age_rating: value(CatalogField::AgeRating),
            release_year: value(CatalogField::ReleaseYear),
            box_office: value(CatalogField::BoxOffice),
            original_title: value(CatalogField::OriginalTitle),
            synopsis: value(CatalogField::Synopsis),
            duration: value(CatalogField::Duration),
            tagline: value(CatalogField::Tagline),
            country: value(CatalogField::Country),
        }
    }

    /// Builds a row from `(column, value)` pairs, mostly useful for fixtures.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::from_lookup(|column| {
            pairs
                .iter()
                .find(|(name, _)| *name == column)
                .map(|(_, value)| *value)
        })
    }

    pub fn get(&self, field: CatalogField) -> &str {
        match field {
            CatalogField::Title => &self.title,
            CatalogField::Budget => &self.budget,
            CatalogField::AgeRating => &self.age_rating,
            CatalogField::ReleaseYear => &self.release_year,
            CatalogField::BoxOffice => &self.box_office,
            CatalogField::OriginalTitle => &self.original_title,
            CatalogField::Synopsis => &self.synopsis,
            CatalogField::Duration => &self.duration,
            CatalogField::Tagline => &self.tagline,
            CatalogField::Country => &self.country,
        }
    }

    /// Renders this row as one labeled block, separator line included.
    pub fn to_block(&self) -> String {
        let mut block = String::new();
        block.push_str(RECORD_SEPARATOR);
        block.push('\n');
        for field in CatalogField::ALL {
            block.push_str(field.label());
            block.push_str(": ");
            block.push_str(self.get(field));
            block.push('\n');
        }
        block
    }
}

fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(value) if !value.trim().is_empty() && !value.trim().eq_ignore_ascii_case("nan") => {
            value.to_string()
        }
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Summary figures about the loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_works: usize,
    pub min_release_year: Option<String>,
    pub max_release_year: Option<String>,
}

/// An immutable snapshot of the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
}

impl Catalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes every row, in order, into the text block given to the model.
    pub fn serialize(&self) -> String {
        serialize_rows(&self.rows)
    }

    /// Computes the totals shown next to the question form.
    ///
    /// Year bounds compare the raw strings, so they follow the lexical order of the
    /// source column; placeholder values are ignored.
    pub fn stats(&self) -> CatalogStats {
        let years = self
            .rows
            .iter()
            .map(|row| row.release_year.as_str())
            .filter(|year| *year != NOT_SPECIFIED);
        let min_release_year = years.clone().min().map(str::to_string);
        let max_release_year = years.max().map(str::to_string);
        CatalogStats {
            total_works: self.rows.len(),
            min_release_year,
            max_release_year,
        }
    }

    /// Parses a catalog from CSV text.
    ///
    /// A comma-separated table is tried first. When its header lacks the title column the
    /// text is parsed again as a semicolon-separated table.
    pub fn from_csv_str(content: &str) -> Result<Self, QaError> {
        Self::from_csv_bytes(content.as_bytes())
    }

    /// Like [`Catalog::from_csv_str`], for file contents that have not been decoded yet.
    /// A cell that is not valid UTF-8 makes the table unparsable.
    pub fn from_csv_bytes(content: &[u8]) -> Result<Self, QaError> {
        for delimiter in [b',', b';'] {
            match parse_csv(content, delimiter)? {
                Some(rows) => {
                    debug!(
                        delimiter = %(delimiter as char),
                        rows = rows.len(),
                        "Parsed catalog CSV"
                    );
                    return Ok(Self::new(rows));
                }
                None => debug!(
                    delimiter = %(delimiter as char),
                    "Catalog header has no '{}' column",
                    CatalogField::Title.column()
                ),
            }
        }
        Err(QaError::KnowledgeBaseUnavailable(format!(
            "no '{}' column found with ',' or ';' delimiters",
            CatalogField::Title.column()
        )))
    }

    /// Reads and parses a catalog CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, QaError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| {
            QaError::KnowledgeBaseUnavailable(format!("cannot read '{}': {e}", path.display()))
        })?;
        let catalog = Self::from_csv_bytes(&content)?;
        info!(path = %path.display(), works = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }
}

/// Serializes rows into consecutive labeled blocks. No row is skipped or reordered.
pub fn serialize_rows(rows: &[CatalogRow]) -> String {
    rows.iter().map(CatalogRow::to_block).collect()
}

/// Returns `Ok(None)` when the header does not contain the title column.
fn parse_csv(content: &[u8], delimiter: u8) -> Result<Option<Vec<CatalogRow>>, QaError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content);

    let headers = reader.headers().map_err(unparsable)?.clone();
    if !headers.iter().any(|h| h == CatalogField::Title.column()) {
        return Ok(None);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unparsable)?;
        let row = CatalogRow::from_lookup(|column| {
            headers
                .iter()
                .position(|h| h == column)
                .and_then(|index| record.get(index))
        });
        rows.push(row);
    }
    Ok(Some(rows))
}

fn unparsable(err: csv::Error) -> QaError {
    QaError::KnowledgeBaseUnavailable(format!("cannot parse CSV: {err}"))
}

/// Holds the current catalog snapshot and reloads it on request.
///
/// Readers take a cheap `Arc` clone of the snapshot and keep using it for the whole
/// query, so a reload never changes a catalog that a running query already holds.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Loads the catalog from `path`. Fails when the file is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, QaError> {
        let path = path.into();
        let catalog = Catalog::from_csv_path(&path)?;
        Ok(Self {
            path,
            current: RwLock::new(Arc::new(catalog)),
        })
    }

    /// Wraps an already built catalog. Reloads still read from `path`.
    pub fn from_catalog(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Re-reads the file and swaps the snapshot. On failure the previous one stays active.
    pub async fn reload(&self) -> Result<Arc<Catalog>, QaError> {
        let catalog = match Catalog::from_csv_path(&self.path) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Catalog reload failed, keeping previous snapshot");
                return Err(e);
            }
        };
        *self.current.write().await = catalog.clone();
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell_placeholders() {
        assert_eq!(normalize_cell(None), NOT_SPECIFIED);
        assert_eq!(normalize_cell(Some("")), NOT_SPECIFIED);
        assert_eq!(normalize_cell(Some("   ")), NOT_SPECIFIED);
        assert_eq!(normalize_cell(Some("nan")), NOT_SPECIFIED);
        assert_eq!(normalize_cell(Some("NaN")), NOT_SPECIFIED);
        assert_eq!(normalize_cell(Some("1990")), "1990");
    }

    #[test]
    fn test_every_field_has_distinct_label() {
        let mut labels: Vec<&str> = CatalogField::ALL.iter().map(|f| f.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), CatalogField::ALL.len());
    }
}

use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Neighborhood;

/// Separator used for highlights in the stored catalog
const HIGHLIGHT_SEPARATOR: char = ';';

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing required field {field}")]
    MissingField { line: u64, field: &'static str },

    #[error("line {line}: {field} is not a finite number")]
    NonFinite { line: u64, field: &'static str },
}

/// One CSV row as produced by the data pipeline
#[derive(Debug, Deserialize)]
struct NeighborhoodRow {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    avg_rent: Option<f64>,
    safety_score: Option<f64>,
    walkability: Option<f64>,
    family_friendly: Option<f64>,
    noise_level: Option<f64>,
    highlights: Option<String>,
}

impl NeighborhoodRow {
    fn into_neighborhood(self, line: u64) -> Result<Neighborhood, CatalogError> {
        Ok(Neighborhood {
            id: required_text(self.id, "id", line)?,
            name: required_text(self.name, "name", line)?,
            description: self.description.unwrap_or_default(),
            avg_rent: required_number(self.avg_rent, "avg_rent", line)?,
            safety_score: required_number(self.safety_score, "safety_score", line)?,
            walkability: required_number(self.walkability, "walkability", line)?,
            family_friendly: required_number(self.family_friendly, "family_friendly", line)?,
            noise_level: required_number(self.noise_level, "noise_level", line)?,
            highlights: split_highlights(self.highlights.as_deref().unwrap_or_default()),
        })
    }
}

fn required_text(value: Option<String>, field: &'static str, line: u64) -> Result<String, CatalogError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(CatalogError::MissingField { line, field })
}

fn required_number(value: Option<f64>, field: &'static str, line: u64) -> Result<f64, CatalogError> {
    let value = value.ok_or(CatalogError::MissingField { line, field })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CatalogError::NonFinite { line, field })
    }
}

/// Split the stored `a;b;c` form into a list, dropping blank entries
pub fn split_highlights(raw: &str) -> Vec<String> {
    raw.split(HIGHLIGHT_SEPARATOR)
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}

/// Read-only neighborhood catalog
///
/// Loaded once at startup and shared behind an `Arc` for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    neighborhoods: Vec<Neighborhood>,
}

impl Catalog {
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self { neighborhoods }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} neighborhoods from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load from a CSV file, falling back to an empty catalog on failure
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("{}; using empty catalog", e);
                Self::empty()
            }
        }
    }

    /// Parse CSV data with a header row
    ///
    /// Rows that are malformed or miss a required field are logged and
    /// skipped. Only failures affecting the whole input are returned.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut neighborhoods = Vec::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping unreadable catalog row: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let parsed = record
                .deserialize::<NeighborhoodRow>(Some(&headers))
                .map_err(CatalogError::from)
                .and_then(|row| row.into_neighborhood(line));

            match parsed {
                Ok(neighborhood) => neighborhoods.push(neighborhood),
                Err(e) => {
                    tracing::warn!("Skipping catalog row at line {}: {}", line, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} invalid catalog rows", skipped);
        }

        Ok(Self::new(neighborhoods))
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub fn len(&self) -> usize {
        self.neighborhoods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "id,name,description,avg_rent,safety_score,walkability,family_friendly,noise_level,highlights\n";

    #[test]
    fn test_parses_rows() {
        let data = format!(
            "{}1,Green Valley Heights,Peaceful suburb,1200,4.8,4.2,4.9,2.1,Top-rated schools;Multiple parks\n\
             2,Downtown District,Urban center,2800,3.9,4.9,3.2,4.1,Public transit\n",
            HEADER
        );

        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let first = &catalog.neighborhoods()[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.avg_rent, 1200.0);
        assert_eq!(first.noise_level, 2.1);
        assert_eq!(first.highlights, vec!["Top-rated schools", "Multiple parks"]);
        assert_eq!(catalog.neighborhoods()[1].name, "Downtown District");
    }

    #[test]
    fn test_skips_row_missing_required_field() {
        let data = format!(
            "{}1,Green Valley Heights,Peaceful suburb,1200,,4.2,4.9,2.1,Parks\n\
             2,Downtown District,Urban center,2800,3.9,4.9,3.2,4.1,Public transit\n",
            HEADER
        );

        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.neighborhoods()[0].id, "2");
    }

    #[test]
    fn test_skips_unparseable_and_non_finite_rows() {
        let data = format!(
            "{}1,Bad Rent,x,cheap,4.8,4.2,4.9,2.1,Parks\n\
             2,Not A Number,x,1500,NaN,4.2,4.9,2.1,Parks\n\
             3,Fine,x,1500,4.0,4.0,4.0,2.0,Parks\n",
            HEADER
        );

        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.neighborhoods()[0].id, "3");
    }

    #[test]
    fn test_optional_text_fields_default() {
        let data = format!("{}7,Quiet Place,,1500,4.0,4.0,4.0,2.0,\n", HEADER);

        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        let neighborhood = &catalog.neighborhoods()[0];
        assert!(neighborhood.description.is_empty());
        assert!(neighborhood.highlights.is_empty());
    }

    #[test]
    fn test_split_highlights() {
        assert_eq!(
            split_highlights(" Cafes ; ;Bike paths;"),
            vec!["Cafes".to_string(), "Bike paths".to_string()]
        );
        assert!(split_highlights("").is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let catalog = Catalog::load_or_empty("/nonexistent/neighborhood_data.csv");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Catalog::load("/nonexistent/neighborhood_data.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}

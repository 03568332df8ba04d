// 📂 Catalog Loader
// Raw CSV → normalized Catalog
//
// Missing data is tolerated (sentinel or absent value).
// Unreadable files and malformed CSV are fatal.

use crate::catalog::{Catalog, ContentType, Title, UNKNOWN};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Accepted `date_added` formats, tried in order
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// RawRow - One CSV row keyed by normalized column name
///
/// Every field is optional: a missing column behaves like an empty cell.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "type")]
    content_type: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    listed_in: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    #[serde(default)]
    release_year: Option<String>,
}

impl RawRow {
    fn normalize(self) -> Title {
        let date_added = self.date_added.as_deref().and_then(parse_date);

        Title {
            title: self.title.filter(|t| !t.is_empty()),
            content_type: self
                .content_type
                .filter(|t| !t.is_empty())
                .map(|t| ContentType::from_label(&t)),
            country: fill_unknown(self.country),
            rating: fill_unknown(self.rating),
            duration: fill_unknown(self.duration),
            listed_in: fill_unknown(self.listed_in),
            date_added,
            year_added: date_added.map(|d| d.year()),
            release_year: self.release_year.as_deref().and_then(parse_year),
        }
    }
}

/// Clean a column header: trim, lowercase, spaces → underscores
///
/// `" Date Added "` → `"date_added"`
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Missing value → sentinel, present value → trimmed
fn fill_unknown(value: Option<String>) -> String {
    match value {
        Some(v) => v.trim().to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Parse a calendar date, `None` when no accepted format matches
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a release year, accepting "2019" and "2019.0"
fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

/// Load and normalize the catalog CSV at `csv_path`
pub fn load_catalog(csv_path: &Path) -> Result<Catalog> {
    info!("Loading catalog: {}", csv_path.display());

    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open file: {}", csv_path.display()))?;

    read_catalog(file).with_context(|| format!("Failed to load {}", csv_path.display()))
}

/// Normalize a catalog from any CSV source with a header row
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

    let headers: StringRecord = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(normalize_column_name)
        .collect();
    reader.set_headers(headers);

    let mut titles = Vec::new();
    let mut unparsed_dates = 0usize;

    for (line_num, result) in reader.deserialize::<RawRow>().enumerate() {
        // +2: 1-indexed plus header row
        let row = result.with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;

        let had_date = row
            .date_added
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty());
        let title = row.normalize();
        if had_date && title.date_added.is_none() {
            unparsed_dates += 1;
        }

        titles.push(title);
    }

    if unparsed_dates > 0 {
        debug!("{} date_added values could not be parsed", unparsed_dates);
    }
    info!("Loaded {} titles", titles.len());

    Ok(Catalog::new(titles))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Catalog {
        read_catalog(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name(" Date Added "), "date_added");
        assert_eq!(normalize_column_name("Listed In"), "listed_in");
        assert_eq!(normalize_column_name("TYPE"), "type");
    }

    #[test]
    fn test_sentinel_filled_for_empty_cells() {
        let catalog = load(
            "title,type,country,rating,duration,listed_in,date_added,release_year\n\
             A,Movie,,,,,,\n",
        );
        let title = &catalog.titles()[0];

        assert_eq!(title.country, UNKNOWN);
        assert_eq!(title.rating, UNKNOWN);
        assert_eq!(title.duration, UNKNOWN);
        assert_eq!(title.listed_in, UNKNOWN);
        assert_eq!(title.year_added, None);
        assert_eq!(title.release_year, None);
    }

    #[test]
    fn test_sentinel_filled_for_missing_columns() {
        let catalog = load("title,type\nA,Movie\nB,TV Show\n");

        assert_eq!(catalog.len(), 2);
        for title in catalog.titles() {
            assert_eq!(title.country, UNKNOWN);
            assert_eq!(title.listed_in, UNKNOWN);
            assert_eq!(title.year_added, None);
            assert_eq!(title.release_year, None);
        }
    }

    #[test]
    fn test_headers_are_normalized_before_lookup() {
        let catalog = load(
            "Title, Type ,Country,Listed In,Date Added,Release Year\n\
             A,Movie, India ,Dramas,\"September 25, 2021\",2021\n",
        );
        let title = &catalog.titles()[0];

        assert_eq!(title.content_type, Some(ContentType::Movie));
        assert_eq!(title.country, "India");
        assert_eq!(title.listed_in, "Dramas");
        assert_eq!(title.year_added, Some(2021));
        assert_eq!(title.release_year, Some(2021));
    }

    #[test]
    fn test_date_parsing_formats() {
        assert_eq!(
            parse_date(" August 4, 2017"),
            NaiveDate::from_ymd_opt(2017, 8, 4)
        );
        assert_eq!(parse_date("2019-11-20"), NaiveDate::from_ymd_opt(2019, 11, 20));
        assert_eq!(parse_date("12/31/2020"), NaiveDate::from_ymd_opt(2020, 12, 31));
        assert_eq!(
            parse_date("2018-03-01 00:00:00"),
            NaiveDate::from_ymd_opt(2018, 3, 1)
        );
    }

    #[test]
    fn test_malformed_dates_degrade_to_absent() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("February 30, 2020"), None);
        assert_eq!(parse_date(""), None);

        let catalog = load("title,date_added\nA,someday\nB,2020-01-05\n");
        assert_eq!(catalog.titles()[0].year_added, None);
        assert_eq!(catalog.titles()[1].year_added, Some(2020));
    }

    #[test]
    fn test_release_year_parsing() {
        assert_eq!(parse_year("1994"), Some(1994));
        assert_eq!(parse_year(" 2019.0 "), Some(2019));
        assert_eq!(parse_year("2019.5"), None);
        assert_eq!(parse_year("n/a"), None);
    }

    #[test]
    fn test_header_only_input_is_empty_catalog() {
        let catalog = load("title,type,country\n");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_ragged_rows_are_fatal() {
        let result = read_catalog("title,type\nA,Movie,extra\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_catalog(Path::new("/nonexistent/catalog.csv"));
        assert!(result.is_err());
    }
}

// 🎬 Catalog Model
// Normalized titles plus the fields derived from them

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::fmt;

/// Placeholder for missing categorical data.
/// Never counted in any frequency distribution.
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// CONTENT TYPE
// ============================================================================

/// ContentType - Value of the `type` column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
}

impl ContentType {
    /// Exact label match, no case folding ("movie" is `Other`)
    pub fn from_label(label: &str) -> Self {
        match label {
            "Movie" => ContentType::Movie,
            "TV Show" => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(label) => label,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// TITLE
// ============================================================================

/// Title - One catalog entry after normalization
///
/// `country`, `rating`, `duration` and `listed_in` are always present;
/// absent source values hold [`UNKNOWN`].
#[derive(Debug, Clone)]
pub struct Title {
    pub title: Option<String>,
    pub content_type: Option<ContentType>,
    pub country: String,
    pub rating: String,
    pub duration: String,
    pub listed_in: String,
    pub date_added: Option<NaiveDate>,
    pub year_added: Option<i32>,
    pub release_year: Option<i32>,
}

impl Title {
    /// Title with every categorical field set to the sentinel
    pub fn new(content_type: Option<ContentType>) -> Self {
        Title {
            title: None,
            content_type,
            country: UNKNOWN.to_string(),
            rating: UNKNOWN.to_string(),
            duration: UNKNOWN.to_string(),
            listed_in: UNKNOWN.to_string(),
            date_added: None,
            year_added: None,
            release_year: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = duration.to_string();
        self
    }

    pub fn with_genres(mut self, listed_in: &str) -> Self {
        self.listed_in = listed_in.to_string();
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_date_added(mut self, date: NaiveDate) -> Self {
        self.date_added = Some(date);
        self.year_added = Some(date.year());
        self
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == Some(ContentType::Movie)
    }

    pub fn is_tv_show(&self) -> bool {
        self.content_type == Some(ContentType::TvShow)
    }

    /// Runtime in minutes, movies only
    pub fn duration_minutes(&self) -> Option<u64> {
        if self.is_movie() {
            leading_integer(&self.duration)
        } else {
            None
        }
    }

    /// Number of seasons, TV shows only
    pub fn seasons(&self) -> Option<u64> {
        if self.is_tv_show() {
            leading_integer(&self.duration)
        } else {
            None
        }
    }

    /// Release year floored to its decade, movies only
    pub fn decade(&self) -> Option<i32> {
        if !self.is_movie() {
            return None;
        }
        self.release_year.map(|year| year.div_euclid(10) * 10)
    }

    pub fn countries(&self) -> Vec<&str> {
        tokens(&self.country)
    }

    pub fn genres(&self) -> Vec<&str> {
        tokens(&self.listed_in)
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

/// First maximal run of ASCII digits in `text`
///
/// "90 min" → 90, "3 Seasons" → 3, "Unknown" → None.
/// Runs too long for a u64 saturate instead of failing.
pub fn leading_integer(text: &str) -> Option<u64> {
    let digits = text
        .bytes()
        .skip_while(|b| !b.is_ascii_digit())
        .take_while(|b| b.is_ascii_digit());

    let mut value: Option<u64> = None;
    for digit in digits {
        let current = value.unwrap_or(0);
        value = Some(
            current
                .saturating_mul(10)
                .saturating_add(u64::from(digit - b'0')),
        );
    }
    value
}

/// Split a comma-joined field into trimmed tokens
///
/// Empty tokens and the sentinel are dropped; a token listed twice in the
/// same field is kept once.
pub fn tokens(field: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && *token != UNKNOWN)
        .filter(|token| seen.insert(*token))
        .collect()
}

// ============================================================================
// CATALOG
// ============================================================================

/// Catalog - Read-only, ordered set of normalized titles
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        Catalog { titles }
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn movies(&self) -> impl Iterator<Item = &Title> {
        self.titles.iter().filter(|t| t.is_movie())
    }

    pub fn tv_shows(&self) -> impl Iterator<Item = &Title> {
        self.titles.iter().filter(|t| t.is_tv_show())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_integer_examples() {
        assert_eq!(leading_integer("90 min"), Some(90));
        assert_eq!(leading_integer("3 Seasons"), Some(3));
        assert_eq!(leading_integer("Unknown"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_leading_integer_takes_first_run_only() {
        assert_eq!(leading_integer("Season 2 of 10"), Some(2));
        assert_eq!(leading_integer("1h 30m"), Some(1));
        assert_eq!(leading_integer("007"), Some(7));
    }

    #[test]
    fn test_leading_integer_saturates() {
        assert_eq!(
            leading_integer("99999999999999999999999999 min"),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_leading_integer_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not decimal ASCII
        assert_eq!(leading_integer("٣ Seasons"), None);
    }

    #[test]
    fn test_tokens_split_and_trim() {
        assert_eq!(tokens("United States, India"), vec!["United States", "India"]);
        assert_eq!(tokens("  France  "), vec!["France"]);
    }

    #[test]
    fn test_tokens_drop_sentinel_empty_and_repeats() {
        assert!(tokens(UNKNOWN).is_empty());
        assert_eq!(tokens("Cambodia,"), vec!["Cambodia"]);
        assert_eq!(tokens("India, India, Japan"), vec!["India", "Japan"]);
    }

    #[test]
    fn test_content_type_labels() {
        assert_eq!(ContentType::from_label("Movie"), ContentType::Movie);
        assert_eq!(ContentType::from_label("TV Show"), ContentType::TvShow);
        assert_eq!(
            ContentType::from_label("movie"),
            ContentType::Other("movie".to_string())
        );
        assert_eq!(ContentType::TvShow.to_string(), "TV Show");
    }

    #[test]
    fn test_derived_fields_depend_on_type() {
        let movie = Title::new(Some(ContentType::Movie))
            .with_duration("90 min")
            .with_release_year(1994);
        assert_eq!(movie.duration_minutes(), Some(90));
        assert_eq!(movie.seasons(), None);
        assert_eq!(movie.decade(), Some(1990));

        let show = Title::new(Some(ContentType::TvShow))
            .with_duration("3 Seasons")
            .with_release_year(2019);
        assert_eq!(show.seasons(), Some(3));
        assert_eq!(show.duration_minutes(), None);
        assert_eq!(show.decade(), None);
    }

    #[test]
    fn test_decade_needs_release_year() {
        let movie = Title::new(Some(ContentType::Movie)).with_duration("100 min");
        assert_eq!(movie.decade(), None);
    }
}

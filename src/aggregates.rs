// 📊 Aggregators
// Seven summary views computed once from the normalized catalog
//
// Every aggregator is a pure function of &Catalog; order between them
// does not matter.

use crate::catalog::{Catalog, Title};
use std::collections::{BTreeMap, HashMap};

/// Countries kept for the country chart
pub const TOP_COUNTRIES: usize = 10;

/// Genres kept for the genre chart
pub const TOP_GENRES: usize = 15;

/// Oldest decade shown on the duration-by-decade chart
pub const MIN_DECADE: i32 = 1980;

// ============================================================================
// DISTRIBUTION
// ============================================================================

/// Distribution - Ordered (label, count) pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<(String, u64)>,
}

impl Distribution {
    /// Count labels, most frequent first
    ///
    /// Labels with equal counts keep the order they first appeared in.
    pub fn count<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();

        for label in labels {
            let next = entries.len();
            let i = *index.entry(label).or_insert(next);
            if i == next {
                entries.push((label.to_string(), 0));
            }
            entries[i].1 += 1;
        }

        // Stable sort keeps first-appearance order among ties
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Distribution { entries }
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// First `n` entries in the current order
    pub fn top(&self, n: usize) -> Self {
        Distribution {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Stable re-sort by count, smallest first (chart display order)
    pub fn ascending(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        Distribution { entries }
    }

    /// Stable re-sort by count, largest first
    pub fn ranked(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Distribution { entries }
    }

    /// First entry holding the maximal count
    pub fn leader(&self) -> Option<(&str, u64)> {
        let max = self.entries.iter().map(|(_, count)| *count).max()?;
        self.entries
            .iter()
            .find(|(_, count)| *count == max)
            .map(|(label, count)| (label.as_str(), *count))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

// ============================================================================
// YEARLY COUNTS
// ============================================================================

/// YearlyCounts - Titles added per year, ascending by year
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyCounts {
    counts: BTreeMap<i32, u64>,
}

impl YearlyCounts {
    pub fn points(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts.iter().map(|(year, count)| (*year, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Earliest year with the maximal count
    pub fn peak(&self) -> Option<(i32, u64)> {
        let max = self.counts.values().copied().max()?;
        self.points().find(|(_, count)| *count == max)
    }

    pub fn latest(&self) -> Option<(i32, u64)> {
        self.counts
            .iter()
            .next_back()
            .map(|(year, count)| (*year, *count))
    }
}

// ============================================================================
// HISTOGRAM BINS
// ============================================================================

/// Bins - Equal-width histogram over a set of values
///
/// Bins span [min, max]; every bin is half-open except the last, which
/// also includes `max`. A single distinct value gets a ±0.5 range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

impl Bins {
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        if finite.is_empty() {
            return Bins {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bin_count as f64;
        let edges: Vec<f64> = (0..=bin_count)
            .map(|i| if i == bin_count { hi } else { lo + width * i as f64 })
            .collect();
        let mut counts = vec![0u64; bin_count];

        for value in finite {
            let raw = ((value - lo) / width).floor() as usize;
            counts[raw.min(bin_count - 1)] += 1;
        }

        Bins { edges, counts }
    }

    /// (lower edge, upper edge, count) per bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| (edge[0], edge[1], *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

// ============================================================================
// AGGREGATORS
// ============================================================================

/// Count records per `type` label; records without a type are skipped
pub fn type_distribution(catalog: &Catalog) -> Distribution {
    Distribution::count(
        catalog
            .titles()
            .iter()
            .filter_map(|t| t.content_type.as_ref().map(|c| c.label())),
    )
}

/// Top countries by title count, in ascending display order
pub fn top_countries(catalog: &Catalog) -> Distribution {
    exploded(catalog, Title::countries)
        .top(TOP_COUNTRIES)
        .ascending()
}

/// Top genres by title count, in ascending display order
pub fn top_genres(catalog: &Catalog) -> Distribution {
    exploded(catalog, Title::genres).top(TOP_GENRES).ascending()
}

fn exploded<F>(catalog: &Catalog, field_tokens: F) -> Distribution
where
    F: Fn(&Title) -> Vec<&str>,
{
    Distribution::count(catalog.titles().iter().flat_map(field_tokens))
}

/// Titles counted per year added
///
/// Rows without a year added or without a title are not counted.
pub fn yearly_growth(catalog: &Catalog) -> YearlyCounts {
    let mut counts = BTreeMap::new();
    for title in catalog.titles() {
        if let (Some(year), Some(_)) = (title.year_added, &title.title) {
            *counts.entry(year).or_insert(0) += 1;
        }
    }
    YearlyCounts { counts }
}

/// Movie runtimes in minutes, record order, unparseable durations excluded
pub fn movie_durations(catalog: &Catalog) -> Vec<f64> {
    catalog
        .movies()
        .filter_map(Title::duration_minutes)
        .map(|minutes| minutes as f64)
        .collect()
}

/// Movie runtimes grouped by release decade, from [`MIN_DECADE`] on
///
/// A decade whose movies all lack a runtime is kept with no values.
pub fn durations_by_decade(catalog: &Catalog) -> BTreeMap<i32, Vec<f64>> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for movie in catalog.movies() {
        let Some(decade) = movie.decade() else {
            continue;
        };
        if decade < MIN_DECADE {
            continue;
        }

        let values = groups.entry(decade).or_default();
        if let Some(minutes) = movie.duration_minutes() {
            values.push(minutes as f64);
        }
    }
    groups
}

/// TV show season counts, record order
pub fn tv_seasons(catalog: &Catalog) -> Vec<f64> {
    catalog
        .tv_shows()
        .filter_map(Title::seasons)
        .map(|seasons| seasons as f64)
        .collect()
}

/// Aggregates - Every summary view, computed once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub type_distribution: Distribution,
    pub top_countries: Distribution,
    pub yearly_growth: YearlyCounts,
    pub top_genres: Distribution,
    pub movie_durations: Vec<f64>,
    pub durations_by_decade: BTreeMap<i32, Vec<f64>>,
    pub tv_seasons: Vec<f64>,
}

impl Aggregates {
    pub fn compute(catalog: &Catalog) -> Self {
        Aggregates {
            type_distribution: type_distribution(catalog),
            top_countries: top_countries(catalog),
            yearly_growth: yearly_growth(catalog),
            top_genres: top_genres(catalog),
            movie_durations: movie_durations(catalog),
            durations_by_decade: durations_by_decade(catalog),
            tv_seasons: tv_seasons(catalog),
        }
    }
}

// 💡 Insight Summarizer
// Up to four sentences read off the computed aggregates

use crate::aggregates::{Aggregates, Distribution, YearlyCounts};

pub const HEADER: &str = "Key Insights:";

/// Insights - Ordered sentences, one per aggregate that has data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    lines: Vec<String>,
}

impl Insights {
    /// Build every insight whose aggregate is non-empty, in fixed order
    pub fn summarize(aggregates: &Aggregates) -> Self {
        let lines = [
            type_share(&aggregates.type_distribution),
            top_countries(&aggregates.top_countries),
            growth(&aggregates.yearly_growth),
            mean_duration(&aggregates.movie_durations),
        ]
        .into_iter()
        .flatten()
        .collect();

        Insights { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Header followed by one "- " bullet per line
    ///
    /// With no lines only the header is written.
    pub fn to_text(&self) -> String {
        let mut text = HEADER.to_string();
        for line in &self.lines {
            text.push_str("\n- ");
            text.push_str(line);
        }
        text
    }
}

fn type_share(types: &Distribution) -> Option<String> {
    let (dominant, count) = types.leader()?;
    let pct = count as f64 / types.total() as f64 * 100.0;
    Some(format!("{} lead with ~{:.1}% of total titles.", dominant, pct))
}

/// Chart order is ascending; the insight re-ranks largest first
fn top_countries(countries: &Distribution) -> Option<String> {
    if countries.is_empty() {
        return None;
    }
    let ranked = countries.ranked();
    let names: Vec<&str> = ranked.labels().take(3).collect();
    Some(format!("Top content countries: {}.", names.join(", ")))
}

fn growth(years: &YearlyCounts) -> Option<String> {
    if years.len() <= 1 {
        return None;
    }
    let (peak_year, peak_count) = years.peak()?;
    let (_, latest_count) = years.latest()?;
    let pct = latest_count as f64 / peak_count as f64 * 100.0;
    Some(format!(
        "Catalog peak additions around {}; latest year is ~{:.0}% of peak.",
        peak_year, pct
    ))
}

fn mean_duration(minutes: &[f64]) -> Option<String> {
    if minutes.is_empty() {
        return None;
    }
    let mean = minutes.iter().sum::<f64>() / minutes.len() as f64;
    Some(format!("Avg movie duration ≈ {:.0} minutes.", mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ContentType, Title};
    use chrono::NaiveDate;

    fn movie() -> Title {
        Title::new(Some(ContentType::Movie)).with_title("movie")
    }

    fn show() -> Title {
        Title::new(Some(ContentType::TvShow)).with_title("show")
    }

    fn summarize(titles: Vec<Title>) -> Insights {
        Insights::summarize(&Aggregates::compute(&Catalog::new(titles)))
    }

    #[test]
    fn test_type_share_sentence() {
        let insights = summarize(vec![movie(), movie(), show()]);
        assert_eq!(insights.lines()[0], "Movie lead with ~66.7% of total titles.");
    }

    #[test]
    fn test_mean_duration_sentence() {
        let insights = summarize(vec![
            movie().with_duration("90 min"),
            movie().with_duration("Unknown"),
            movie().with_duration("120 min"),
        ]);
        assert_eq!(
            insights.lines().last().unwrap(),
            "Avg movie duration ≈ 105 minutes."
        );
    }

    #[test]
    fn test_top_countries_ranked_descending() {
        let insights = summarize(vec![
            movie().with_country("India"),
            movie().with_country("United States, India"),
            movie().with_country("United States, India, Japan"),
            movie().with_country("France"),
            movie().with_country("United States"),
        ]);
        assert_eq!(
            insights.lines()[1],
            "Top content countries: India, United States, Japan."
        );
    }

    #[test]
    fn test_growth_sentence() {
        let date = |y| NaiveDate::from_ymd_opt(y, 1, 15).unwrap();
        let mut titles = Vec::new();
        for _ in 0..4 {
            titles.push(movie().with_date_added(date(2019)));
        }
        titles.push(movie().with_date_added(date(2020)));
        titles.push(movie().with_date_added(date(2021)));
        titles.push(movie().with_date_added(date(2021)));

        let insights = summarize(titles);
        assert!(insights.lines().contains(
            &"Catalog peak additions around 2019; latest year is ~50% of peak.".to_string()
        ));
    }

    #[test]
    fn test_growth_needs_two_years() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let insights = summarize(vec![show().with_date_added(date)]);

        assert!(!insights
            .lines()
            .iter()
            .any(|l| l.starts_with("Catalog peak")));
    }

    #[test]
    fn test_empty_aggregates_give_header_only() {
        let insights = Insights::summarize(&Aggregates::default());

        assert!(insights.lines().is_empty());
        assert_eq!(insights.to_text(), "Key Insights:");
    }

    #[test]
    fn test_text_layout() {
        let insights = summarize(vec![movie().with_duration("100 min")]);

        assert_eq!(
            insights.to_text(),
            "Key Insights:\n\
             - Movie lead with ~100.0% of total titles.\n\
             - Avg movie duration ≈ 100 minutes."
        );
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let titles = vec![
            movie().with_country("Spain, Mexico").with_duration("95 min"),
            show().with_country("Mexico"),
        ];
        let first = summarize(titles.clone()).to_text();
        let second = summarize(titles).to_text();
        assert_eq!(first, second);
    }
}

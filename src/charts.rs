// 🗺️ Chart Plan
// One ChartSpec per aggregate: kind, data, labels and output file name

use crate::aggregates::{Aggregates, Bins, Distribution};

/// Bins for the movie runtime histogram
pub const DURATION_BINS: usize = 30;

/// Bins for the TV season histogram
pub const SEASON_BINS: usize = 15;

/// ChartBody - What to draw, tagged by chart kind
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    /// Vertical bars with the count printed above each bar
    Bar(Vec<(String, u64)>),
    /// Horizontal bars, first entry at the bottom
    HorizontalBar(Vec<(String, u64)>),
    /// Line with point markers
    Line(Vec<(i32, u64)>),
    Histogram(Bins),
    /// One box per group
    BoxPlot(Vec<(i32, Vec<f64>)>),
}

impl ChartBody {
    pub fn kind(&self) -> &'static str {
        match self {
            ChartBody::Bar(_) => "bar",
            ChartBody::HorizontalBar(_) => "horizontal bar",
            ChartBody::Line(_) => "line",
            ChartBody::Histogram(_) => "histogram",
            ChartBody::BoxPlot(_) => "box plot",
        }
    }
}

/// ChartSpec - Everything the renderer needs for one image
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub file_name: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub body: ChartBody,
}

fn pairs(dist: &Distribution) -> Vec<(String, u64)> {
    dist.entries().to_vec()
}

/// Plan every chart for the given aggregates, in file-name order
///
/// The TV seasons chart is left out when there is no season data.
pub fn plan_charts(aggregates: &Aggregates) -> Vec<ChartSpec> {
    let mut charts = vec![
        ChartSpec {
            file_name: "01_movies_vs_tv.png",
            title: "Movies vs TV Shows on Netflix",
            x_label: "",
            y_label: "Count",
            body: ChartBody::Bar(pairs(&aggregates.type_distribution)),
        },
        ChartSpec {
            file_name: "02_top_countries.png",
            title: "Top 10 Content-Producing Countries",
            x_label: "Titles",
            y_label: "",
            body: ChartBody::HorizontalBar(pairs(&aggregates.top_countries)),
        },
        ChartSpec {
            file_name: "03_growth_by_year_added.png",
            title: "Netflix Catalog Growth Over Years",
            x_label: "Year Added to Netflix",
            y_label: "Number of Titles",
            body: ChartBody::Line(aggregates.yearly_growth.points().collect()),
        },
        ChartSpec {
            file_name: "04_top_genres.png",
            title: "Top 15 Genres / Categories on Netflix",
            x_label: "Titles",
            y_label: "",
            body: ChartBody::HorizontalBar(pairs(&aggregates.top_genres)),
        },
        ChartSpec {
            file_name: "05_movie_duration_hist.png",
            title: "Movie Duration Distribution",
            x_label: "Duration (minutes)",
            y_label: "Frequency",
            body: ChartBody::Histogram(Bins::from_values(
                &aggregates.movie_durations,
                DURATION_BINS,
            )),
        },
        ChartSpec {
            file_name: "06_movie_duration_by_decade.png",
            title: "Movie Duration by Decade",
            x_label: "Decade",
            y_label: "Minutes",
            body: ChartBody::BoxPlot(
                aggregates
                    .durations_by_decade
                    .iter()
                    .map(|(decade, values)| (*decade, values.clone()))
                    .collect(),
            ),
        },
    ];

    if !aggregates.tv_seasons.is_empty() {
        charts.push(ChartSpec {
            file_name: "07_tv_seasons_hist.png",
            title: "TV Show Seasons Distribution",
            x_label: "Seasons",
            y_label: "Frequency",
            body: ChartBody::Histogram(Bins::from_values(&aggregates.tv_seasons, SEASON_BINS)),
        });
    }

    charts
}

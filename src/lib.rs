// Catalog EDA - Core Library
// One-shot exploratory analysis of a streaming catalog CSV

pub mod catalog;
pub mod loader;
pub mod aggregates;
pub mod insights;
pub mod charts;
pub mod render;
pub mod output;
pub mod config;
pub mod pipeline;

// Re-export commonly used types
pub use catalog::{leading_integer, tokens, Catalog, ContentType, Title, UNKNOWN};
pub use loader::{load_catalog, read_catalog, normalize_column_name, parse_date};
pub use aggregates::{
    Aggregates, Bins, Distribution, YearlyCounts, MIN_DECADE, TOP_COUNTRIES, TOP_GENRES,
};
pub use insights::Insights;
pub use charts::{ChartBody, ChartSpec, plan_charts};
pub use render::{ChartRenderer, PlottersRenderer, RenderError};
pub use output::{prepare_output_dir, write_insights, list_images};
pub use config::{Config, RenderConfig};
pub use pipeline::{run, RunSummary};

// 🔁 Pipeline
// load → aggregate → render → summarize → write, strictly in that order

use crate::aggregates::Aggregates;
use crate::charts::plan_charts;
use crate::config::Config;
use crate::insights::Insights;
use crate::loader::load_catalog;
use crate::output::{list_images, prepare_output_dir, write_insights};
use crate::render::ChartRenderer;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// RunSummary - What a pipeline run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Every PNG in the output directory, sorted by name
    pub images: Vec<PathBuf>,
    pub insights_path: PathBuf,
    pub insights: Insights,
    pub aggregates: Aggregates,
}

/// Run the whole analysis once
///
/// Any failure to read the input, draw a chart or write a file aborts the
/// run; outputs already written are left as they are.
pub fn run(config: &Config, renderer: &dyn ChartRenderer) -> Result<RunSummary> {
    prepare_output_dir(&config.output_dir)?;

    let catalog = load_catalog(&config.input_path)?;
    let aggregates = Aggregates::compute(&catalog);

    for spec in plan_charts(&aggregates) {
        let path = config.output_dir.join(spec.file_name);
        info!("Rendering {} chart: {}", spec.body.kind(), path.display());
        renderer
            .render(&spec, &path)
            .with_context(|| format!("Failed to render {}", path.display()))?;
    }
    if aggregates.tv_seasons.is_empty() {
        info!("No TV season data, seasons chart skipped");
    }

    let insights = Insights::summarize(&aggregates);
    write_insights(&config.insights_path, &insights)?;
    info!("{} insights written", insights.lines().len());

    Ok(RunSummary {
        images: list_images(&config.output_dir)?,
        insights_path: config.insights_path.clone(),
        insights,
        aggregates,
    })
}

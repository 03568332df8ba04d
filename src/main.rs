use anyhow::Result;
use tracing::Level;

use catalog_eda::{run, Config, PlottersRenderer};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    let renderer = PlottersRenderer::new(config.render.clone());

    let summary = run(&config, &renderer)?;

    println!("Saved figures:");
    for image in &summary.images {
        println!(" - {}", image.display());
    }
    println!("\nInsights saved to {}", summary.insights_path.display());

    Ok(())
}

// ⚙️ Configuration
// Fixed paths and chart styling, built once and passed down explicitly

use std::path::PathBuf;

/// Config - Where the pipeline reads from and writes to
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog CSV (UTF-8, header row)
    pub input_path: PathBuf,

    /// Directory receiving the chart images
    pub output_dir: PathBuf,

    /// Insight text file
    pub insights_path: PathBuf,

    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: PathBuf::from("data/netflix_titles.csv"),
            output_dir: PathBuf::from("figures"),
            insights_path: PathBuf::from("insights.txt"),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Same styling, every path rooted under `base`
    pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let defaults = Config::default();
        Config {
            input_path: base.join(defaults.input_path),
            output_dir: base.join(defaults.output_dir),
            insights_path: base.join(defaults.insights_path),
            render: defaults.render,
        }
    }
}

/// RenderConfig - Figure styling handed to the renderer at construction
///
/// 10x6 inch figures at 200 dpi.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub caption_size: u32,
    pub label_size: u32,
    pub margin: u32,
    pub bar_color: (u8, u8, u8),
    pub line_color: (u8, u8, u8),
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 2000,
            height: 1200,
            font_family: "sans-serif".to_string(),
            caption_size: 48,
            label_size: 28,
            margin: 30,
            bar_color: (76, 114, 176),
            line_color: (221, 132, 82),
        }
    }
}

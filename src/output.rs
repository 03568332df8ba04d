// 💾 Output Writer
// Output directory, insights file and the listing of written images

use crate::insights::Insights;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create the image directory; fine if it already exists
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

pub fn write_insights(path: &Path, insights: &Insights) -> Result<()> {
    fs::write(path, insights.to_text())
        .with_context(|| format!("Failed to write insights: {}", path.display()))
}

/// PNG files in `dir`, sorted by file name
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read output directory: {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::Aggregates;

    #[test]
    fn test_prepare_output_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("figures").join("nested");

        prepare_output_dir(&dir).unwrap();
        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_insights_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("insights.txt");

        write_insights(&path, &Insights::summarize(&Aggregates::default())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Key Insights:");
    }

    #[test]
    fn test_list_images_sorted_png_only() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["03_c.png", "01_a.png", "notes.txt", "02_b.png"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        fs::create_dir(tmp.path().join("04_dir.png")).unwrap();

        let names: Vec<String> = list_images(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["01_a.png", "02_b.png", "03_c.png"]);
    }
}

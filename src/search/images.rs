//! Image name matcher / 图片文件名匹配
//!
//! Image files never hold records; they are related to a search when their
//! base name mentions one of the plain criterion values.

use std::path::Path;

use super::criteria::SearchCriteria;
use super::error::SearchError;
use crate::utils;

/// Image extensions considered by the matcher / 识别的图片扩展名
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Collect image filenames referencing any criterion value / 收集相关图片文件名
///
/// The derived full name is excluded here; only the eight plain fields are
/// checked against the lowercased base name.
pub async fn find_related_images(
    data_dir: &Path,
    criteria: &SearchCriteria,
) -> Result<Vec<String>, SearchError> {
    let mut entries = tokio::fs::read_dir(data_dir).await.map_err(|e| {
        SearchError::Directory {
            path: data_dir.display().to_string(),
            source: e,
        }
    })?;

    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| SearchError::Directory {
        path: data_dir.display().to_string(),
        source: e,
    })? {
        let file_name = entry.file_name().to_string_lossy().to_string();
        let ext = utils::get_ext(&file_name);
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }

        let stem = utils::get_stem(&file_name).to_lowercase();
        let related = criteria
            .plain_fields()
            .iter()
            .any(|(_, value)| !value.is_empty() && stem.contains(value));
        if related {
            images.push(file_name);
        }
    }

    // Directory enumeration order is platform dependent
    images.sort();
    Ok(images)
}

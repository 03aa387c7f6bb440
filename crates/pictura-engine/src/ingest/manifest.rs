//! Corpus manifest loading
//!
//! The corpus is described by a Flickr-style captions file with an
//! `image,caption` header; each image appears once per caption, so
//! building the manifest deduplicates filenames while preserving
//! first-seen order. That single fixed traversal order is what makes
//! repeated builds over unchanged input reproducible.

use pictura_domain::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// File extensions accepted when scanning an image directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Load the ordered list of unique image filenames from a captions file.
///
/// Accepts comma-separated (`image,caption`) and pipe-separated
/// (`image| n| caption`, Flickr30k results.csv) layouts. A leading header
/// row is skipped.
pub fn load_manifest(captions_file: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(captions_file).map_err(|e| {
        Error::io_with_source(
            format!("failed to read captions file {}", captions_file.display()),
            e,
        )
    })?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for line in content.lines() {
        let Some(name) = image_field(line) else {
            continue;
        };
        if is_header(name) {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        return Err(Error::invalid_argument(format!(
            "captions file {} lists no images",
            captions_file.display()
        )));
    }
    Ok(names)
}

/// Load (image, caption) pairs for evaluation. Order matches the file.
pub fn load_caption_pairs(captions_file: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(captions_file).map_err(|e| {
        Error::io_with_source(
            format!("failed to read captions file {}", captions_file.display()),
            e,
        )
    })?;

    let mut pairs = Vec::new();
    for line in content.lines() {
        let Some((name, rest)) = split_row(line) else {
            continue;
        };
        if is_header(name) {
            continue;
        }
        // Pipe-separated rows carry a caption number before the caption.
        let caption = rest.rsplit('|').next().unwrap_or(rest).trim();
        if !caption.is_empty() {
            pairs.push((name.to_string(), caption.to_string()));
        }
    }
    Ok(pairs)
}

/// Fallback manifest: every image file directly inside `dir`, sorted by
/// name for a deterministic traversal order.
pub fn scan_images_dir(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::io_with_source(format!("failed to read images dir {}", dir.display()), e)
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_with_source("failed to read dir entry", e))?;
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if path.is_file() && is_image {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn image_field(line: &str) -> Option<&str> {
    split_row(line).map(|(name, _)| name)
}

fn split_row(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, rest) = line
        .split_once(',')
        .or_else(|| line.split_once('|'))
        .unwrap_or((line, ""));
    let name = name.trim();
    if name.is_empty() { None } else { Some((name, rest)) }
}

fn is_header(field: &str) -> bool {
    matches!(
        field.to_lowercase().as_str(),
        "image" | "image_name" | "filename"
    )
}

//! Writing exported images to disk.

use super::types::{ExportError, ExportFormat, SaveOptions};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - Export format supplying the extension
pub fn generate_filename(template: &str, format: ExportFormat) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format.extension())
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes encoded image bytes according to `options`, returning the file path.
pub fn save_bytes(bytes: &[u8], options: &SaveOptions) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&options.directory)?;

    let filename = match &options.filename {
        Some(name) => name.clone(),
        None => generate_filename(&options.filename_template, options.format),
    };
    let file_path = directory.join(&filename);

    log::info!(
        "Saving canvas to: {} ({} bytes)",
        file_path.display(),
        bytes.len()
    );
    fs::write(&file_path, bytes)?;

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

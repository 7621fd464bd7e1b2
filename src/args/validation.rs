use std::path::Path;

use crate::model::HoleCount;

/// # Errors
///
/// Will return `Err` unless the value is 9 or 18
pub fn check_hole_count(value: &str) -> Result<HoleCount, String> {
    value.parse()
}

/// # Errors
///
/// Will return `Err` if the level is not one the logger understands
pub fn check_log_level(value: &str) -> Result<String, String> {
    crate::logging::normalize_level(value).map(ToString::to_string)
}

/// # Errors
///
/// Will return `Err` if the store file's parent directory does not exist
pub fn check_store_path(path: &Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(format!(
            "The directory for store file '{}' does not exist.",
            path.display()
        )),
        _ => Ok(()),
    }
}

/// # Errors
///
/// Will return `Err` if the url is not http(s)
pub fn check_sync_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("The sync url '{url}' must start with http:// or https://."))
    }
}

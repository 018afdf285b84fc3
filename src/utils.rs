// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Cut `text` to at most `max_chars` characters for log output.
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}... ({} chars total)", head, text.chars().count())
    } else {
        head
    }
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Write bytes, creating parent directories as needed
pub async fn write_file_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).await?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

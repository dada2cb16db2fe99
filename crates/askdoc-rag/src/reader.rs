//! Document readers: decode file bytes into normalized text

use std::path::Path;

use askdoc_core::{Error, Result};

use crate::normalize::normalize;

/// Read a document by its file extension and return normalized text.
///
/// The extension is taken from `original_name` when present (uploads often
/// arrive under a temporary path), falling back to the on-disk path. Only
/// `.txt` and `.pdf` are supported.
pub async fn read_by_extension(path: &Path, original_name: Option<&str>) -> Result<String> {
    let name = original_name
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    let extension = Path::new(&name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => read_txt(path).await,
        "pdf" => read_pdf(path).await,
        other => Err(Error::Validation(format!(
            "unsupported file type \".{other}\": only .pdf and .txt are accepted"
        ))),
    }
}

/// Read a UTF-8 text file and normalize it.
pub async fn read_txt(path: &Path) -> Result<String> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(normalize(&raw))
}

/// Extract the text layer of a PDF and normalize it.
pub async fn read_pdf(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    // Extraction is CPU-bound; keep it off the async worker threads.
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| Error::Validation(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| Error::Validation(format!("could not extract PDF text: {e}")))?;
    Ok(normalize(&raw))
}

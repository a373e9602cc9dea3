//! Loads a directory tree of `.txt` transcripts as ingestible documents.
//!
//! Each file becomes one [`Document`] with metadata:
//! - `title`: file stem
//! - `category`: parent directory relative to the root (`misc` at the root)
//! - `path`: the file path

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use ragdb_core::types::Document;

pub fn load_txt_corpus(root: &Path, limit: Option<usize>) -> Result<Vec<Document>> {
    let mut files = list_txt_files(root);
    if let Some(limit) = limit {
        files.truncate(limit);
    }
    let mut docs = Vec::with_capacity(files.len());
    for path in &files {
        let text = read_lossy(path)?;
        let title = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        debug!(path = %path.display(), bytes = text.len(), "loaded transcript");
        docs.push(
            Document::new(text)
                .with_meta("title", title)
                .with_meta("category", category_of(path, root))
                .with_meta("path", path.to_string_lossy()),
        );
    }
    info!(root = %root.display(), documents = docs.len(), "corpus loaded");
    Ok(docs)
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

fn category_of(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    match relative.parent().and_then(Path::to_str) {
        Some(parent) if !parent.is_empty() => parent.replace('\\', "/"),
        _ => "misc".to_string(),
    }
}

fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    files.sort();
    files
}

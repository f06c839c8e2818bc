//! Ingest command handler.
//!
//! Reads plain-text documents, packs paragraphs into chunks, and stores
//! them in the workspace chunk store.

use advisor_core::{config::AppConfig, AppError, AppResult};
use clap::Args;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::store;

/// Ingest text documents into the chunk store
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Files or directories to ingest (.txt and .md)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Clear the store before ingesting
    #[arg(long)]
    pub reset: bool,

    /// Approximate chunk size in characters
    #[arg(long, default_value = "1500")]
    pub chunk_size: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    /// Execute the ingest command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");
        tracing::debug!("Ingest options: {:?}", self);

        let conn = store::open_store(&config.store_path())?;

        if self.reset {
            store::reset_store(&conn)?;
        }

        let mut sources_count = 0u32;
        let mut chunks_count = 0usize;
        let mut bytes_processed = 0u64;

        for path in &self.paths {
            if path.is_file() {
                let (chunks, bytes) = self.ingest_file(&conn, path)?;
                sources_count += 1;
                chunks_count += chunks;
                bytes_processed += bytes;
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .follow_links(false)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file() && is_text_document(entry_path) {
                        let (chunks, bytes) = self.ingest_file(&conn, entry_path)?;
                        sources_count += 1;
                        chunks_count += chunks;
                        bytes_processed += bytes;
                    }
                }
            } else {
                tracing::warn!("Skipping missing path: {:?}", path);
            }
        }

        tracing::info!(
            "Ingest completed: {} files, {} chunks, {} bytes",
            sources_count,
            chunks_count,
            bytes_processed
        );

        if self.json {
            let output = serde_json::json!({
                "sourcesCount": sources_count,
                "chunksCount": chunks_count,
                "bytesProcessed": bytes_processed,
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Ingested {} files ({} chunks, {} bytes)",
                sources_count, chunks_count, bytes_processed
            );
        }

        Ok(())
    }

    /// Read, chunk, and store one document.
    fn ingest_file(&self, conn: &rusqlite::Connection, path: &Path) -> AppResult<(usize, u64)> {
        tracing::debug!("Ingesting {:?}", path);

        let text = std::fs::read_to_string(path)?;
        let bytes = text.len() as u64;

        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| AppError::Config(format!("Invalid file path: {:?}", path)))?;

        let chunks = pack_paragraphs(&text, self.chunk_size);
        let stored = store::insert_chunks(conn, &source_file, &chunks)?;

        Ok((stored, bytes))
    }
}

/// Whether a path looks like an ingestible plain-text document.
fn is_text_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("txt") | Some("md")
    )
}

/// Pack paragraphs into chunks of roughly `chunk_size` characters.
///
/// Paragraphs are never split: one that exceeds `chunk_size` becomes its
/// own oversized chunk. Blank lines separate paragraphs.
fn pack_paragraphs(text: &str, chunk_size: usize) -> Vec<String> {
    let text = text.replace("\r\n", "\n");

    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if !current.is_empty() && current.len() + paragraph.len() + 2 > chunk_size {
            chunks.push(current.trim_end().to_string());
            current = String::new();
        }

        current.push_str(paragraph);
        current.push_str("\n\n");
    }

    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_short_paragraphs_into_one_chunk() {
        let text = "Đoạn một.\n\nĐoạn hai.\n\nĐoạn ba.";
        let chunks = pack_paragraphs(text, 1500);

        assert_eq!(chunks, vec!["Đoạn một.\n\nĐoạn hai.\n\nĐoạn ba.".to_string()]);
    }

    #[test]
    fn test_pack_flushes_when_chunk_size_is_exceeded() {
        let first = "a".repeat(900);
        let second = "b".repeat(900);
        let text = format!("{}\n\n{}", first, second);

        let chunks = pack_paragraphs(&text, 1500);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], first);
        assert_eq!(chunks[1], second);
    }

    #[test]
    fn test_oversized_paragraph_stays_whole() {
        let big = "x".repeat(2000);
        let chunks = pack_paragraphs(&big, 1500);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2000);
    }

    #[test]
    fn test_pack_normalizes_crlf_and_skips_blank_runs() {
        let text = "một\r\n\r\n\r\n\r\nhai";
        let chunks = pack_paragraphs(text, 1500);

        assert_eq!(chunks, vec!["một\n\nhai".to_string()]);
    }

    #[test]
    fn test_is_text_document_filters_extensions() {
        assert!(is_text_document(Path::new("notes/tuyen_sinh.txt")));
        assert!(is_text_document(Path::new("README.md")));
        assert!(!is_text_document(Path::new("thong_tin.pdf")));
        assert!(!is_text_document(Path::new("Makefile")));
    }
}

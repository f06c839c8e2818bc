//! SQLite chunk store backing the in-memory document index.
//!
//! Only text and provenance are persisted. Embeddings are rebuilt from the
//! stored chunks every time the index loads, so the store survives encoder
//! changes without a migration.

use advisor_core::{AppError, AppResult};
use advisor_index::Category;
use rusqlite::{params, Connection};
use std::path::Path;

/// Open (and if needed create) the chunk store at the given path.
pub fn open_store(db_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Index(format!("Failed to create store directory: {}", e)))?;
    }

    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Index(format!("Failed to open chunk store: {}", e)))?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS chunks (
            id INTEGER PRIMARY KEY,
            source_file TEXT NOT NULL,
            position INTEGER NOT NULL,
            text TEXT NOT NULL,
            category TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chunks_source ON chunks(source_file);
        "#,
    )
    .map_err(|e| AppError::Index(format!("Failed to create tables: {}", e)))?;

    tracing::debug!("Opened chunk store at {:?}", db_path);
    Ok(conn)
}

/// Insert the chunks of one source file, categorized by its name.
///
/// Positions continue from any chunks the source already has, so repeated
/// ingestion of the same file appends rather than overwrites. Use
/// [`reset_store`] for a clean rebuild.
pub fn insert_chunks(conn: &Connection, source_file: &str, texts: &[String]) -> AppResult<usize> {
    let category = Category::from_source_file(source_file);

    let start: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM chunks WHERE source_file = ?1",
            params![source_file],
            |row| row.get(0),
        )
        .map_err(|e| AppError::Index(format!("Failed to read chunk positions: {}", e)))?;

    for (offset, text) in texts.iter().enumerate() {
        conn.execute(
            "INSERT INTO chunks (source_file, position, text, category)
             VALUES (?1, ?2, ?3, ?4)",
            params![source_file, start + offset as i64, text, category.as_str()],
        )
        .map_err(|e| AppError::Index(format!("Failed to insert chunk: {}", e)))?;
    }

    tracing::debug!(
        "Stored {} chunks for {} (category: {})",
        texts.len(),
        source_file,
        category.as_str()
    );

    Ok(texts.len())
}

/// Load all chunks grouped by source file, in ingestion order.
///
/// The grouping matches what `DocumentIndex::add` expects: one call per
/// source file with that file's chunk texts in position order.
pub fn load_documents(conn: &Connection) -> AppResult<Vec<(String, Vec<String>)>> {
    let mut stmt = conn
        .prepare("SELECT source_file, text FROM chunks ORDER BY id")
        .map_err(|e| AppError::Index(format!("Failed to prepare load query: {}", e)))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| AppError::Index(format!("Failed to load chunks: {}", e)))?;

    let mut documents: Vec<(String, Vec<String>)> = Vec::new();
    for row in rows {
        let (source_file, text) =
            row.map_err(|e| AppError::Index(format!("Failed to read chunk row: {}", e)))?;

        match documents.iter_mut().find(|(name, _)| *name == source_file) {
            Some((_, texts)) => texts.push(text),
            None => documents.push((source_file, vec![text])),
        }
    }

    tracing::debug!(
        "Loaded {} source files from the chunk store",
        documents.len()
    );

    Ok(documents)
}

/// Per-source chunk counts with the stored category tag.
pub fn source_stats(conn: &Connection) -> AppResult<Vec<(String, String, u32)>> {
    let mut stmt = conn
        .prepare(
            "SELECT source_file, category, COUNT(*) FROM chunks
             GROUP BY source_file, category ORDER BY source_file",
        )
        .map_err(|e| AppError::Index(format!("Failed to prepare stats query: {}", e)))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)? as u32,
            ))
        })
        .map_err(|e| AppError::Index(format!("Failed to query stats: {}", e)))?;

    let mut stats = Vec::new();
    for row in rows {
        stats.push(row.map_err(|e| AppError::Index(format!("Failed to read stats row: {}", e)))?);
    }

    Ok(stats)
}

/// Total number of stored chunks.
pub fn chunk_count(conn: &Connection) -> AppResult<u32> {
    conn.query_row("SELECT COUNT(*) FROM chunks", [], |row| {
        row.get::<_, i64>(0).map(|v| v as u32)
    })
    .map_err(|e| AppError::Index(format!("Failed to count chunks: {}", e)))
}

/// Delete all stored chunks.
pub fn reset_store(conn: &Connection) -> AppResult<()> {
    conn.execute("DELETE FROM chunks", [])
        .map_err(|e| AppError::Index(format!("Failed to delete chunks: {}", e)))?;

    tracing::info!("Reset chunk store");
    Ok(())
}

//! Stats command handler.
//!
//! Reports chunk store contents per source file.

use advisor_core::{config::AppConfig, AppResult};
use clap::Args;

use crate::store;

/// Show chunk store statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Clear the chunk store (requires --yes)
    #[arg(long)]
    pub reset: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl StatsCommand {
    /// Execute the stats command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");
        tracing::debug!("Stats options: {:?}", self);

        let conn = store::open_store(&config.store_path())?;

        if self.reset {
            if !self.yes {
                println!("Pass --yes to confirm clearing the chunk store");
                return Ok(());
            }

            store::reset_store(&conn)?;
            println!("Chunk store cleared");
            return Ok(());
        }

        let sources = store::source_stats(&conn)?;
        let total = store::chunk_count(&conn)?;

        if self.json {
            let output = serde_json::json!({
                "storePath": config.store_path(),
                "totalChunks": total,
                "sources": sources
                    .iter()
                    .map(|(source_file, category, chunks)| {
                        serde_json::json!({
                            "sourceFile": source_file,
                            "category": category,
                            "chunks": chunks,
                        })
                    })
                    .collect::<Vec<_>>(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Chunk store: {}", config.store_path().display());
            println!("  Total chunks: {}", total);
            for (source_file, category, chunks) in &sources {
                println!("  - {} ({}): {} chunks", source_file, category, chunks);
            }
        }

        Ok(())
    }
}

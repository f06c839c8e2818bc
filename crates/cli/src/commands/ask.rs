//! Ask command handler.
//!
//! Loads the chunk store into the in-memory index and runs one question
//! through the full answer pipeline.

use advisor_core::{config::AppConfig, AppError, AppResult};
use advisor_index::{create_provider, DocumentIndex, EmbeddingConfig};
use advisor_llm::create_client;
use advisor_pipeline::Pipeline;
use clap::Args;
use std::path::PathBuf;

use crate::store;

/// Answer a question from the ingested documents
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: Option<String>,

    /// Read the question from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        // 1. Get the question text
        let query = self
            .get_query()
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        tracing::debug!("Question: {}", query);

        // 2. Load stored chunks and rebuild the in-memory index
        let conn = store::open_store(&config.store_path())?;
        let documents = store::load_documents(&conn)?;

        if documents.is_empty() {
            tracing::warn!("Chunk store is empty; run 'advisor ingest' to add documents");
        }

        let provider = create_provider(&EmbeddingConfig::from_pipeline(&config.pipeline))?;
        let mut index = DocumentIndex::new(provider);
        for (source_file, texts) in documents {
            index.add(texts, &source_file).await?;
        }

        tracing::debug!("Index ready with {} chunks", index.len());

        // 3. Create the generation client
        let endpoint = config.resolve_endpoint(&config.provider);
        let api_key = config.resolve_api_key(&config.provider);
        let client = create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
            .map_err(AppError::Config)?;

        // 4. Run the question through the pipeline
        let pipeline = Pipeline::new(client, config.model.as_str(), &config.pipeline)?;
        let answer = pipeline.answer_query(&query, &index).await;

        // 5. Print the answer
        if self.json {
            let output = serde_json::json!({
                "answer": answer,
                "model": config.model,
                "provider": config.provider,
                "indexedChunks": index.len(),
            });

            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }

    /// Get the question text from the argument or a file.
    fn get_query(&self) -> Option<String> {
        self.query.clone().or_else(|| {
            self.file.as_ref().and_then(|path| {
                std::fs::read_to_string(path)
                    .map_err(|e| tracing::error!("Failed to read question file: {}", e))
                    .ok()
                    .map(|text| text.trim().to_string())
            })
        })
    }
}

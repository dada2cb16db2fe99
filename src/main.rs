//! askdoc CLI: the upload/routing collaborator around the engine.
//!
//! Indexing, retrieval and store maintenance are delegated to the engine
//! crates; this binary only parses arguments, clamps caller input and
//! renders results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

use askdoc_core::{ChunkingConfig, RetrievedChunk, StoreConfig};
use askdoc_embeddings::OpenAiEmbeddings;
use askdoc_rag::{DocumentInput, RagEngine};
use askdoc_store::StoreBackend;

/// Retrieval depth is caller-clamped; the retriever itself takes any K.
const TOP_K_MIN: usize = 1;
const TOP_K_MAX: usize = 12;

#[derive(Parser)]
#[command(name = "askdoc")]
#[command(about = "Index documents and retrieve grounded context for questions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index one or more .pdf/.txt files into the vector store
    Index {
        /// Paths of the documents to ingest
        files: Vec<PathBuf>,
    },
    /// Retrieve the most relevant chunks for a question
    Ask {
        /// The question to ground
        question: String,
        /// How many chunks to retrieve (clamped to 1..=12)
        #[arg(long, default_value_t = 5)]
        top_k: usize,
        /// Restrict retrieval to one source document
        #[arg(long)]
        file: Option<String>,
    },
    /// List the source documents currently indexed
    Files,
    /// Remove every chunk of one source document
    Delete {
        /// The source name, as listed by `files`
        name: String,
    },
    /// Remove all records from the store
    Clear,
}

fn build_engine() -> Result<RagEngine<StoreBackend, OpenAiEmbeddings>> {
    let store = StoreBackend::from_config(&StoreConfig::from_env()?)?;
    let embeddings = OpenAiEmbeddings::from_env()?;
    let chunking = ChunkingConfig::from_env()?;
    Ok(RagEngine::new(
        Arc::new(store),
        Arc::new(embeddings),
        chunking,
    ))
}

/// Assemble the prompt handed to an external answer generator.
fn build_prompt(question: &str, chunks: &[RetrievedChunk]) -> String {
    let context = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("Excerpt {}:\n{}", i + 1, chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    [
        "Answer using only the context below.",
        "If the information is not present, say it was not found in the provided material.",
        "Prefer a clear and objective explanation.",
        "",
        "Context:",
        if context.is_empty() {
            "(no retrieved context)"
        } else {
            &context
        },
        "",
        &format!("Question: {question}"),
    ]
    .join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let engine = build_engine()?;

    match cli.command {
        Command::Index { files } => {
            let inputs: Vec<DocumentInput> = files
                .iter()
                .map(|path| {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());
                    DocumentInput::with_original_name(path, name)
                })
                .collect();

            engine.index_documents(&inputs).await?;
            println!("{} Indexed {} file(s)", "✅".green(), inputs.len());
        }

        Command::Ask {
            question,
            top_k,
            file,
        } => {
            let top_k = top_k.clamp(TOP_K_MIN, TOP_K_MAX);
            let chunks = engine
                .retrieve_context(&question, top_k, file.as_deref())
                .await?;

            if chunks.is_empty() {
                println!("{}", "No relevant context found.".yellow());
            }
            for (i, chunk) in chunks.iter().enumerate() {
                println!(
                    "{} {} (score {:.3})",
                    format!("[{}]", i + 1).blue().bold(),
                    format!("{}#{}", chunk.metadata.source, chunk.metadata.chunk_index).cyan(),
                    chunk.score,
                );
                println!("{}\n", chunk.text);
            }

            println!("{}", "--- prompt for the answer generator ---".dimmed());
            println!("{}", build_prompt(&question, &chunks));
        }

        Command::Files => {
            let sources = engine.sources().await?;
            if sources.is_empty() {
                println!("{}", "Store is empty.".yellow());
            }
            for source in sources {
                println!("{source}");
            }
        }

        Command::Delete { name } => {
            let removed = engine.delete_by_source(&name).await?;
            println!("{} Removed {} chunk(s) of {}", "✅".green(), removed, name);
        }

        Command::Clear => {
            engine.clear_store().await?;
            println!("{} Store cleared", "✅".green());
        }
    }

    Ok(())
}

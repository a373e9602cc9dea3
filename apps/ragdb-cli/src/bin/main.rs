use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use ragdb_cli::corpus::load_txt_corpus;
use ragdb_core::config::{expand_path, Config};
use ragdb_core::logging;
use ragdb_embed::{get_default_embedder, Embedder};
use ragdb_pipeline::{render_excerpts, PromptEchoComposer, RetrievalPipeline};
use ragdb_text::{tokenizer_for, ChunkParams, Chunker};

#[derive(Parser)]
#[command(name = "ragdb", about = "Semantic retrieval over a directory of transcripts")]
struct Cli {
    /// Override chunk size in tokens
    #[arg(long, global = true)]
    max_tokens: Option<usize>,
    /// Override chunk overlap in tokens
    #[arg(long, global = true)]
    overlap_tokens: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a file would be chunked
    Chunk { file: PathBuf },
    /// Ingest a corpus and retrieve the excerpts most relevant to a question
    Ask {
        question: String,
        /// Directory of .txt transcripts (defaults to data.corpus_dir)
        #[arg(long, env = "APP_CORPUS_DIR")]
        corpus: Option<PathBuf>,
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
        /// Only ingest the first N files
        #[arg(long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Print the grounded prompt an answer model would receive
        #[arg(long)]
        show_prompt: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    let mut settings = config.settings()?;
    logging::init(&settings.logging);

    if let Some(max) = cli.max_tokens { settings.chunking.max_tokens = max; }
    if let Some(overlap) = cli.overlap_tokens { settings.chunking.overlap_tokens = overlap; }
    let params = ChunkParams::new(settings.chunking.max_tokens, settings.chunking.overlap_tokens)?;

    match cli.command {
        Command::Chunk { file } => {
            let text = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let model_dir = settings.embedding.model_dir.as_deref().map(expand_path);
            let chunker = Chunker::new(tokenizer_for(settings.chunking.tokenizer, model_dir.as_deref())?);
            let windows = chunker.windows(&text, params)?;
            println!("{}: {} chunks ({} tokenizer, max {} overlap {})", file.display(), windows.len(), chunker.tokenizer().name(), params.max_tokens(), params.overlap_tokens());
            for (i, w) in windows.iter().enumerate() {
                let preview: String = w.text.chars().take(80).collect();
                println!("  {:>3}. tokens {:>6}..{:<6} {}", i, w.tokens.start, w.tokens.end, preview.replace('\n', " "));
            }
        }
        Command::Ask { question, corpus, top_k, limit, json, show_prompt } => {
            let corpus = match corpus {
                Some(dir) => dir,
                None => config.corpus_dir()?,
            };
            let top_k = top_k.unwrap_or(settings.retrieval.top_k);
            let documents = load_txt_corpus(&corpus, limit)?;
            if documents.is_empty() {
                eprintln!("No .txt files found under {}.", corpus.display());
                return Ok(());
            }

            let embedder: Arc<dyn Embedder> = Arc::from(get_default_embedder(&settings.embedding)?);
            let pipeline = RetrievalPipeline::from_config(embedder, &settings)?;

            let pb = ProgressBar::new(documents.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
                    .progress_chars("#>-"),
            );
            let stored = pipeline.ingest_with_progress(&documents, params, |done, _| pb.set_position(done as u64))?;
            pb.finish_and_clear();
            eprintln!("Ingested {} documents into {} chunks", documents.len(), stored);

            if show_prompt {
                let answer = pipeline.answer(&question, top_k, &PromptEchoComposer::default())?;
                println!("{}", answer.text);
                return Ok(());
            }

            let results = pipeline.query(&question, top_k)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("Found {} results for: \"{}\"\n", results.len(), question);
                for excerpt in render_excerpts(&results) {
                    println!("{excerpt}\n");
                }
            }
        }
    }
    Ok(())
}

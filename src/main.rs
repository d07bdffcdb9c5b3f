use anyhow::Context;
use cardvec::{Config, Pipeline, VectorRecord};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Field-level embeddings and similarity search for agent cards
#[derive(Parser, Debug)]
#[command(name = "cardvec")]
#[command(about = "Embed agent cards field by field and rank them against queries", long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Embedding model identifier (e.g. hash-384, all-MiniLM-L6-v2)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Top-level card field that identifies the agent
    #[arg(long, global = true)]
    id_field: Option<String>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the vector records generated for an agent card
    Embed {
        /// Agent card JSON file
        card: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Rank the fields of one or more agent cards against a query
    Search {
        /// Query text
        #[arg(short, long)]
        query: String,

        /// Agent card JSON files
        #[arg(required = true)]
        cards: Vec<PathBuf>,

        /// Minimum score, inclusive
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.engine.model = model;
    }
    if let Some(id_field) = args.id_field {
        config.generator.id_field = id_field;
    }

    match args.command {
        Command::Embed { card, pretty } => {
            let pipeline = Pipeline::from_config(&config)?;
            let document = read_card(&card)?;
            let records = pipeline.generate_document_vectors(&document)?;
            info!("Generated {} vectors from {}", records.len(), card.display());

            let output = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{}", output);
        }

        Command::Search {
            query,
            cards,
            threshold,
            max_results,
        } => {
            if let Some(threshold) = threshold {
                config.search.threshold = threshold;
            }
            if let Some(max_results) = max_results {
                config.search.max_results = max_results;
            }
            let pipeline = Pipeline::from_config(&config)?;

            let mut records: Vec<VectorRecord> = Vec::new();
            for card in &cards {
                let document = read_card(card)?;
                records.extend(pipeline.generate_document_vectors(&document)?);
            }
            info!(
                "Ranking {} vectors from {} cards with model {}",
                records.len(),
                cards.len(),
                pipeline.engine().model_id()
            );

            let results = pipeline.search_text(&query, &records)?;
            if results.is_empty() {
                info!(
                    "No fields scored at or above {}",
                    pipeline.search_config().threshold
                );
            }
            for (record, score) in results {
                println!(
                    "{:.4}\t{}\t{}\t{}",
                    score, record.field_path, record.identifier, record.field_content
                );
            }
        }
    }

    Ok(())
}

fn read_card(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read agent card {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("agent card {} is not valid JSON", path.display()))
}

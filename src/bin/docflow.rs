//! docflow CLI
//!
//! ```text
//! docflow classify "영업 방문 결과보고서를 작성해줘"
//! docflow review --doc-type product_seminar_application --content sections.json
//! docflow run "제품설명회 시행 결과보고서 작성할거야" --content sections.json
//! ```
//!
//! Section files are JSON objects mapping section name to content. Results are
//! printed as JSON on stdout; logs go to stderr (`RUST_LOG`, default `info`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docflow::{DocflowConfig, DocumentType, DocumentWorkflow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docflow", about = "Classify document requests and review submitted sections")]
struct Cli {
    /// YAML config file; environment variables are used when omitted
    #[arg(long, global = true, env = "DOCFLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a request into a document type
    Classify { text: String },
    /// Review section content for a known document type
    Review {
        #[arg(long)]
        doc_type: DocumentType,
        #[arg(long)]
        content: PathBuf,
    },
    /// Classify a request, then review the given sections
    Run {
        text: String,
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

fn load_sections(path: &Path) -> Result<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid section JSON in {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DocflowConfig::from_yaml_file(path)?,
        None => DocflowConfig::from_env()?,
    };
    let workflow = DocumentWorkflow::from_config(&config)?;

    match cli.command {
        Command::Classify { text } => {
            let result = workflow.classify(&text).await?;
            print_json(&result)?;
        }
        Command::Review { doc_type, content } => {
            let sections = load_sections(&content)?;
            let session = workflow.run_review(doc_type, &sections).await?;
            print_json(&serde_json::json!({
                "session": &session,
                "summary": session.summary(),
            }))?;
        }
        Command::Run { text, content } => {
            let sections = match content {
                Some(path) => load_sections(&path)?,
                None => HashMap::new(),
            };
            let state = workflow.run(&text, sections).await?;
            print_json(&serde_json::json!({
                "state": &state,
                "summary": state.summary(),
            }))?;
        }
    }

    Ok(())
}

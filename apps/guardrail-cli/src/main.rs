//! Rule-guardrail CLI.
//!
//! Thin wrapper around the engine: loads the pattern dictionary and the
//! block extractor output, evaluates, and prints the risk report as pretty
//! JSON on stdout. Any load/parse failure exits non-zero with no partial
//! output.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use guardrail_engine::{PatternCatalogue, PatternConfig, RuleEngine};
use guardrail_types::Document;

#[derive(Parser, Debug)]
#[command(name = "guardrail-cli")]
#[command(
    version,
    about = "Deterministic rule evaluation over extracted label/packaging text"
)]
struct Args {
    /// Path to the pattern dictionary (YAML)
    #[arg(long)]
    dict: PathBuf,

    /// Path to the block extractor output (JSON)
    #[arg(long)]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries only the report JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dict_source = fs::read_to_string(&args.dict)
        .with_context(|| format!("reading pattern dictionary {}", args.dict.display()))?;
    let config = PatternConfig::from_yaml_str(&dict_source)?;
    let engine = RuleEngine::new(PatternCatalogue::compile(config));

    let input_source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading input document {}", args.input.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&input_source).context("input document is not well-formed JSON")?;
    let document = Document::from_value(&value)?;
    tracing::info!(
        lines = document.lines.len(),
        blocks = document.blocks.len(),
        "document loaded"
    );

    let report = engine.evaluate(&document);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

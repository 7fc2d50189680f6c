use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hype_guard::{validate_input, Analyzer, Vocabulary};

#[derive(Parser)]
#[command(
    name = "hype-guard",
    about = "Score headlines for sensationalist and clickbait patterns",
    version
)]
struct Cli {
    /// File paths to analyze, one text per file (reads stdin if none provided)
    files: Vec<PathBuf>,

    /// Analyze this text instead of files or stdin
    #[arg(short, long, conflicts_with = "files")]
    text: Option<String>,

    /// JSON vocabulary replacing the built-in Spanish tables
    #[arg(long, env = "HYPE_GUARD_VOCAB")]
    vocab: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let vocabulary = match &cli.vocab {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading vocabulary");
            Vocabulary::from_path(path)?
        }
        None => Vocabulary::spanish(),
    };
    let analyzer = Analyzer::new(vocabulary).context("vocabulary failed to compile")?;
    tracing::debug!(
        clickbait_patterns = analyzer.vocabulary().clickbait_pattern_count(),
        "analyzer ready"
    );

    let inputs: Vec<(String, String)> = if let Some(text) = cli.text {
        vec![("--text".to_string(), text)]
    } else if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        vec![("<stdin>".to_string(), input)]
    } else {
        cli.files
            .iter()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("error reading {}", path.display()))
                    .map(|text| (path.display().to_string(), text))
            })
            .collect::<anyhow::Result<_>>()?
    };

    for (source, text) in &inputs {
        let text = validate_input(text).with_context(|| format!("rejected input from {source}"))?;
        let result = analyzer.analyze(text);
        let json = if cli.compact {
            serde_json::to_string(&result)?
        } else {
            serde_json::to_string_pretty(&result)?
        };
        println!("{json}");
    }
    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use taxon::batch;
use taxon::config::Config;
use taxon::matcher::{Matcher, Strategy};
use taxon::reference::ReferenceList;
use taxon::remote::openai::OpenAiClassifier;
use taxon::remote::RemoteClassifier;

/// Taxon: classify free-text firm activity descriptions into ISIC codes.
///
/// Matches each description against a fixed reference list by lexical
/// similarity, or optionally delegates the choice to a language model.
#[derive(Parser)]
#[command(name = "taxon", version, about)]
struct Cli {
    /// Path to the `code;description` reference file
    /// (default: TAXON_REFERENCE or data/isic.csv)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single activity description
    Classify {
        /// The activity description to classify
        text: String,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Classify every row of a CSV file
    Batch {
        /// Input CSV with a header row containing the activity column
        input: PathBuf,

        /// Output CSV path (input columns plus the result columns)
        output: PathBuf,

        /// Name of the activity-description column
        #[arg(long, default_value = batch::DEFAULT_ACTIVITY_COLUMN)]
        column: String,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

#[derive(clap::Args)]
struct ScoringArgs {
    /// Scoring strategy for the local matcher
    #[arg(long, value_enum, default_value = "token")]
    strategy: MatchStrategy,

    /// Weight on the character-similarity ratio in the blended strategy
    /// (0.0 = pure token overlap, 1.0 = pure character similarity)
    #[arg(long, default_value = "0.5")]
    blend_weight: f64,
}

#[derive(clap::Args)]
struct RemoteArgs {
    /// Delegate classification to the language-model API instead of the
    /// local matcher
    #[arg(long)]
    remote: bool,

    /// API key for the remote path (defaults to OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatchStrategy {
    /// Token-overlap recall only
    Token,
    /// Token overlap blended with character-level similarity
    Blended,
}

impl ScoringArgs {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            MatchStrategy::Token => Strategy::TokenOverlap,
            MatchStrategy::Blended => Strategy::blended(self.blend_weight),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taxon=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let reference_path = cli.reference.unwrap_or(config.reference_path.clone());
    let references = ReferenceList::load(&reference_path)?;
    info!(
        entries = references.len(),
        path = %reference_path.display(),
        "Loaded reference list"
    );

    match cli.command {
        Commands::Classify {
            text,
            scoring,
            remote,
        } => {
            if remote.remote {
                let classifier = create_remote(&config, remote.api_key)?;
                let code = classifier.pick_code(&text, &references).await?;
                println!("{} {}", "ISIC code:".bold(), code);
            } else {
                let matcher = Matcher::new(&references, scoring.strategy());
                let result = matcher.classify(&text);
                match result.code {
                    Some(code) => {
                        println!("{} {}", "ISIC code:".bold(), code);
                        println!("{} {:.2}", "Match score:".bold(), result.score);
                    }
                    None => println!("{}", "No matching code found.".yellow()),
                }
            }
        }

        Commands::Batch {
            input,
            output,
            column,
            scoring,
            remote,
        } => {
            let rows = if remote.remote {
                let classifier = create_remote(&config, remote.api_key)?;
                batch::classify_file_remote(
                    &input,
                    &output,
                    &column,
                    classifier.as_ref(),
                    &references,
                )
                .await?
            } else {
                let matcher = Matcher::new(&references, scoring.strategy());
                batch::classify_file(&input, &output, &column, &matcher)?
            };

            println!("{}", "Batch classification complete.".bold());
            println!("  Rows classified: {rows}");
            println!("  Output: {}", output.display());
        }
    }

    Ok(())
}

/// Build the remote classifier, preferring an explicit --api-key over the
/// environment.
fn create_remote(
    config: &Config,
    api_key: Option<String>,
) -> Result<Box<dyn RemoteClassifier>> {
    let key = match api_key {
        Some(key) => key,
        None => {
            config.require_api_key()?;
            config.openai_api_key.clone()
        }
    };
    let classifier = OpenAiClassifier::new(key)?;
    Ok(Box::new(classifier))
}

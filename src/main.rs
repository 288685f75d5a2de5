use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pronounce_diff::config::Config;
use pronounce_diff::feedback::{Feedback, compare};
use pronounce_diff::html;
use pronounce_diff::markup;
use pronounce_diff::separators::reinsert_separators;
use pronounce_diff::span_diff::highlight_reference;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pronounce-diff")]
#[command(about = "Phoneme-level pronunciation feedback", long_about = None)]
struct Cli {
    /// Settings file to use instead of ~/.pronounce-diff/settings.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a reference transcription against what the recognizer heard
    Compare {
        /// Reference phonetic transcription
        reference: String,
        /// Recognized phonetic transcription
        recognized: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Highlight a whole reference string against another, without word pairing
    Diff {
        reference: String,
        compared: String,
    },
    /// Color reference letters from per-word 0/1 correctness strings
    Letters {
        reference: String,
        /// One status string per word, e.g. "110 1011"
        status: String,
    },
    /// Put pause markers from the original sentence back into its phonetic form
    Restore {
        original: String,
        matched: String,
    },
    /// Convert highlight markup into JSON runs
    Markup {
        html: String,
        /// Top-level key of the JSON document
        #[arg(long, default_value = "words")]
        key: String,
    },
    /// Write the default settings file
    InitConfig,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PRONOUNCE_DIFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_create(),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare { reference, recognized, format } => {
            let config = load_config(cli.config.as_ref())?;
            let feedback = compare(&reference, &recognized, &config.comparison)
                .context("Failed to compare transcriptions")?;
            match format {
                OutputFormat::Text => print_feedback(&feedback),
                OutputFormat::Html => println!("{}", html::render_table(&feedback.rendered, &config.render)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&feedback).context("Failed to serialize feedback")?
                ),
            }
        }
        Commands::Diff { reference, compared } => {
            let config = load_config(cli.config.as_ref())?;
            let segments = highlight_reference(&reference, &compared);
            println!("{}", html::render_span_diff(&segments, &config.render));
        }
        Commands::Letters { reference, status } => {
            let config = load_config(cli.config.as_ref())?;
            println!("{}", html::render_letter_status(&reference, &status, &config.render));
        }
        Commands::Restore { original, matched } => {
            let config = load_config(cli.config.as_ref())?;
            println!(
                "{}",
                reinsert_separators(&original, &matched, &config.comparison.pause_marker)
            );
        }
        Commands::Markup { html, key } => {
            let runs = markup::parse_highlighted(&markup::normalize_color_styles(&html));
            println!("{}", markup::to_json(&runs, &key).context("Failed to serialize runs")?);
        }
        Commands::InitConfig => {
            let path = match cli.config {
                Some(path) => {
                    Config::default().save_to(&path)?;
                    path
                }
                None => {
                    Config::default().save()?;
                    Config::config_path()?
                }
            };
            println!("Wrote default config to: {}", path.display());
        }
    }

    Ok(())
}

fn print_feedback(feedback: &Feedback) {
    println!("Reference:  {}", feedback.reference);
    println!("Recognized: {}", feedback.recognized);
    println!();
    println!("  {}", feedback.rendered.actual_row());
    println!("  {}", feedback.rendered.expected_row());
    println!("  {}", feedback.rendered.tag_row());
    println!();

    println!("Substitutions: {}", feedback.reference_errors.error_count);
    for record in &feedback.reference_errors.records {
        println!(
            "  word {} '{}' position {}: expected '{}', heard '{}'",
            record.position_word, record.word, record.position, record.actual, record.expected
        );
    }

    println!("Omissions: {}", feedback.omissions.records.len());
    for record in &feedback.omissions.records {
        println!(
            "  word {} '{}' position {}: missing '{}' (from '{}')",
            record.position_word, record.word, record.position, record.expected, record.correct_word
        );
    }

    if !feedback.omissions.unaligned.is_empty() {
        println!("Not aligned for omissions: {:?}", feedback.omissions.unaligned);
    }

    println!("Restored:   {}", feedback.restored);

    if feedback.is_clean() {
        println!();
        println!("✓ No pronunciation errors found");
    }
}

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use konspekt_core::{
    HttpTranslator, Pipeline, PipelineConfig, TranslationProvider, YtDlpTranscripts,
    format_report_readable, format_transcript_with_timestamps, parse_video_link,
};
use tracing_subscriber::EnvFilter;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

/// CLI wrapper for TranslationProvider (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Google,
    Libre,
}

impl From<CliProvider> for TranslationProvider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Google => TranslationProvider::Google,
            CliProvider::Libre => TranslationProvider::Libre,
        }
    }
}

#[derive(Parser)]
#[command(name = "konspekt")]
#[command(about = "Fetch a YouTube transcript, translate it if needed and print a short summary")]
struct Cli {
    /// Video URL or bare video id
    url: String,

    /// Summary language (e.g., "en", "de", "uk")
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Transcript languages to try in order, comma separated. Defaults to --lang.
    #[arg(short, long, value_delimiter = ',')]
    prefer: Vec<String>,

    /// Number of sentences in the summary
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    sentences: u16,

    /// Translation backend used for language detection and translation
    #[arg(long, default_value = "google")]
    provider: CliProvider,

    /// Also print the timestamped transcript
    #[arg(short, long)]
    transcript: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .expect("spinner template is valid"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let provider: TranslationProvider = cli.provider.into();

    let content_id = parse_video_link(&cli.url).unwrap_or_else(|e| fail(e));

    // Validate API key early
    let translator = HttpTranslator::from_env(provider).unwrap_or_else(|e| fail(e));
    let transcripts = YtDlpTranscripts::default();

    let mut config =
        PipelineConfig::for_language(&cli.lang).with_sentence_count(cli.sentences.into());
    let preferences: Vec<String> = cli
        .prefer
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    if !preferences.is_empty() {
        config = config.with_language_preferences(preferences);
    }
    tracing::debug!(?config, provider = provider.name(), "pipeline configured");

    println!(
        "\n{}  {}\n",
        style("konspekt").cyan().bold(),
        style("Video Notes").dim()
    );
    println!(
        "{} Video {} {}",
        style("✓").green().bold(),
        style(&content_id).yellow(),
        style(content_id.thumbnail_url()).dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    let total_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Fetching transcript ({}), normalizing to {} with {}...",
        config.language_preferences.join(", "),
        config.target_language,
        provider.name()
    ));

    let pipeline = Pipeline::new(&transcripts, &translator, config);
    let report = match pipeline.run(&content_id).await {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_and_clear();
            fail(e);
        }
    };

    let translated = if report.normalized.was_translated() {
        format!(
            "translated {} → {}",
            report.normalized.source_language, report.normalized.target_language
        )
    } else {
        "no translation needed".to_string()
    };
    spinner.finish_with_message(format!(
        "{} Summarized: {} captions, {} {}",
        style("✓").green().bold(),
        style(&report.transcript.language).yellow(),
        translated,
        style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
    ));

    println!("{}", style("─".repeat(60)).dim());

    if cli.transcript {
        println!("{}\n", format_transcript_with_timestamps(&report.transcript));
        println!("{}", style("─".repeat(60)).dim());
    }

    // Human-readable output
    let readable = format_report_readable(&report);
    println!("{}", readable);

    Ok(())
}

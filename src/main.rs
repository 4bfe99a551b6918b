//! Sectorscope - broadcast transcript to sector sentiment briefing
//!
//! # Usage
//! ```sh
//! sectorscope run --days-ago 1
//! sectorscope analyze transcript.txt --json
//! sectorscope keywords --keywords my_keywords.toml
//! ```
//!
//! Runtime settings are read from the environment (and `.env`), see
//! [`sectorscope::config`].

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use sectorscope::application::analysis::SectorAnalyzer;
use sectorscope::application::briefing::BriefingTask;
use sectorscope::config::Config;
use sectorscope::domain::analysis::AnalysisResult;
use sectorscope::domain::keywords::KeywordConfig;
use sectorscope::infrastructure::ReportArchive;
use sectorscope::infrastructure::mail::SmtpDelivery;
use sectorscope::infrastructure::news::BroadcastTranscriptSource;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Keyword-driven news-to-sector sentiment briefing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the broadcast transcript, build the report, archive and mail it
    Run {
        /// Broadcast date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "days_ago")]
        date: Option<NaiveDate>,

        /// Days before today (0 = today)
        #[arg(long, default_value = "0")]
        days_ago: u32,

        /// Archive only, never send mail
        #[arg(long)]
        no_mail: bool,
    },
    /// Analyze local text files
    Analyze {
        /// Plain-text transcripts
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Keyword TOML file (defaults to KEYWORDS_FILE or the built-in set)
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },
    /// Validate and summarize a keyword file
    Keywords {
        /// Keyword TOML file (defaults to KEYWORDS_FILE or the built-in set)
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Run {
            date,
            days_ago,
            no_mail,
        } => {
            let date = date
                .unwrap_or_else(|| Local::now().date_naive() - Duration::days(i64::from(days_ago)));
            run_briefing(&config, date, no_mail).await
        }
        Commands::Analyze {
            files,
            json,
            keywords,
        } => {
            let keyword_config = load_keywords(&config, keywords)?;
            analyze_files(keyword_config, &files, json)
        }
        Commands::Keywords { keywords } => {
            let keyword_config = load_keywords(&config, keywords)?;
            print_keyword_summary(&keyword_config);
            Ok(())
        }
    }
}

fn load_keywords(config: &Config, cli_path: Option<PathBuf>) -> Result<KeywordConfig> {
    match cli_path {
        Some(path) => KeywordConfig::load(&path)
            .context(format!("Failed to load keyword file {}", path.display())),
        None => config.load_keywords(),
    }
}

async fn run_briefing(config: &Config, date: NaiveDate, no_mail: bool) -> Result<()> {
    info!("Sectorscope {} starting briefing run", env!("CARGO_PKG_VERSION"));

    let keywords = config.load_keywords()?;
    let analyzer = Arc::new(SectorAnalyzer::new(Arc::new(keywords)));
    let source = BroadcastTranscriptSource::new(&config.fetch)?;
    let archive = ReportArchive::new(&config.report_dir);

    let mut task = BriefingTask::new(Arc::new(source), analyzer, archive)
        .with_source_site(config.fetch.base_url.clone());
    match (&config.mail, no_mail) {
        (Some(mail), false) => {
            task = task.with_delivery(Arc::new(SmtpDelivery::new(mail.clone())));
        }
        (Some(_), true) => info!("Mail delivery skipped (--no-mail)"),
        (None, _) => info!("SMTP_HOST not set, mail delivery disabled"),
    }

    let outcome = task.run(date).await?;
    info!(
        "Report: {} | top sector: {} | sectors: {} | mailed: {}",
        outcome.report_path.display(),
        outcome.top_sector.as_deref().unwrap_or("无"),
        outcome.sector_count,
        outcome.delivered
    );
    Ok(())
}

fn analyze_files(keywords: KeywordConfig, files: &[PathBuf], json: bool) -> Result<()> {
    let inputs = files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|text| (path.display().to_string(), text))
                .context(format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let analyzer = SectorAnalyzer::new(Arc::new(keywords));
    let results = analyzer.analyze_batch(&inputs);

    if json {
        let by_file: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(label, result)| serde_json::to_value(result).map(|value| (label.to_string(), value)))
            .collect::<Result<_, serde_json::Error>>()
            .context("Failed to serialize analysis")?;
        println!("{}", serde_json::to_string_pretty(&by_file)?);
    } else {
        for (label, result) in &results {
            print_ranking(label, result);
        }
    }
    Ok(())
}

fn print_ranking(label: &str, result: &AnalysisResult) {
    println!("\n{}", "=".repeat(80));
    println!("{}", label);
    println!("{}", "=".repeat(80));

    if result.sector_summary.is_empty() {
        println!("No sector signals found.");
        return;
    }

    println!(
        "{:<6} {:<24} {:>8} {:>8}  Keywords",
        "Rank", "Sector", "Avg", "Mentions"
    );
    println!("{}", "-".repeat(80));
    for (rank, sector) in result.sector_summary.iter().enumerate() {
        println!(
            "{:<6} {:<24} {:>8.1} {:>8}  {}",
            rank + 1,
            sector.sector,
            sector.avg_strength,
            sector.mention_count,
            sector.keywords.join(", ")
        );
    }
}

fn print_keyword_summary(config: &KeywordConfig) {
    println!("\n{}", "=".repeat(80));
    println!(
        "{} taxonomies, {} keywords, {} weighted, {} mapped to sectors",
        config.universe.taxonomies.len(),
        config.universe.keyword_count(),
        config.scores.len(),
        config.sectors.len()
    );
    println!("{}", "=".repeat(80));
    for taxonomy in &config.universe.taxonomies {
        println!("{}", taxonomy.name);
        for group in &taxonomy.groups {
            let role = group
                .role
                .map(|r| format!(" [{:?}]", r).to_lowercase())
                .unwrap_or_default();
            println!(
                "  {:<20} strength {:>3}  {:>3} keywords  {}{}",
                group.name,
                group.strength,
                group.phrases().count(),
                group.color,
                role
            );
        }
    }
}

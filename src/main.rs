use billnarrator::feed::summaries_to_rss;
use billnarrator::prelude::*;
use clap::{Args as ClapArgs, Parser, Subcommand};
use futures::StreamExt;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Narrative summaries for bill events
#[derive(Parser, Debug)]
#[command(name = "billnarrator")]
#[command(about = "Summarize bill events from debate transcripts and votes")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// Directory holding committees.json and bill dossiers (default: BILLNARRATOR_DIR env var, or ./data)
    #[arg(long = "data-dir")]
    data_dir: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sort order of dossier files: ASC or DESC
    #[arg(long, value_parser = ["ASC", "DESC"])]
    sort: Option<String>,

    /// Limit number of dossiers
    #[arg(long)]
    limit: Option<usize>,

    /// Do not save committee referrals inferred from votes
    #[arg(long)]
    no_write_back: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one JSON summary per bill event
    Summarize {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Write an RSS feed of bill events
    Feed {
        #[command(flatten)]
        run: RunArgs,

        /// Feed title
        #[arg(long, default_value = "Bills before Parliament")]
        title: String,

        /// Feed description
        #[arg(long, default_value = "Readings, votes and committee reports on bills")]
        description: String,

        /// Feed language
        #[arg(long, default_value = "en-nz")]
        language: String,

        /// Write the feed to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  summarize  Print one JSON summary per bill event");
    println!("  feed       Write an RSS feed of bill events");
}

fn build_config(run: &RunArgs) -> anyhow::Result<Config> {
    let file = match &run.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    // Flag first, then environment variable, then config file, then default
    let data_dir = run
        .data_dir
        .clone()
        .map(PathBuf::from)
        .or_else(|| std::env::var("BILLNARRATOR_DIR").ok().map(PathBuf::from))
        .or_else(|| file.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data"));

    let mut builder = ConfigBuilder::new(&data_dir).file(file).data_dir(&data_dir);
    if let Some(sort) = &run.sort {
        builder = builder.sort_order_str(sort)?;
    }
    if let Some(limit) = run.limit {
        builder = builder.limit(limit);
    }
    if run.no_write_back {
        builder = builder.write_back(false);
    }

    Ok(builder.build()?)
}

async fn collect_summaries(config: Config) -> anyhow::Result<Vec<EventSummary>> {
    let processor = NarrativeProcessor::from_config(config)?;
    let mut stream = processor.process();
    let mut summaries = Vec::new();

    while let Some(result) = stream.next().await {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => tracing::error!("{}", e),
        }
    }
    Ok(summaries)
}

async fn run_summarize_command(run: RunArgs) -> anyhow::Result<()> {
    let config = build_config(&run)?;
    let processor = NarrativeProcessor::from_config(config)?;
    let mut stream = processor.process();

    // Write JSON to stdout (one per line)
    while let Some(result) = stream.next().await {
        match result {
            Ok(summary) => {
                let json = serde_json::to_string(&summary)?;
                println!("{}", json);
            }
            Err(e) => {
                tracing::error!("{}", e);
            }
        }
    }
    Ok(())
}

async fn run_feed_command(
    run: RunArgs,
    title: String,
    description: String,
    language: String,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = build_config(&run)?;
    let link = format!("{}/bills", config.site_url);
    let summaries = collect_summaries(config).await?;
    tracing::info!(items = summaries.len(), "writing feed");

    let xml = summaries_to_rss(
        &summaries,
        &title,
        &description,
        &link,
        &language,
        chrono::Utc::now(),
    );

    match output {
        Some(path) => std::fs::write(&path, xml)?,
        None => println!("{}", xml),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Command::Summarize { run }) => run_summarize_command(run).await,
        Some(Command::Feed {
            run,
            title,
            description,
            language,
            output,
        }) => run_feed_command(run, title, description, language, output).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}

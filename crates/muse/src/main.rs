use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use muse::commands;
use muse::details::Aspect;
use muse::generation::HuggingFaceGenerator;
use muse::search::HttpSearchClient;
use muse::store::IdeaStore;
use muse::{Config, SessionManager};

#[derive(Parser)]
#[command(name = "muse")]
#[command(about = "Startup idea generator and market analyzer - the restless source of new ventures")]
#[command(version)]
struct Cli {
  /// Hugging Face API token (or use HF_TOKEN env var)
  #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
  hf_token: Option<String>,

  /// Configuration file path
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate unique startup ideas for a field and region
  Generate {
    /// Field of interest (e.g. healthcare, edtech)
    #[arg(short, long, default_value = "edtech")]
    interest: String,
    /// Target region or audience (e.g. USA, Gen Z)
    #[arg(short, long, default_value = "india, college students")]
    region: String,
    /// Number of ideas to collect (defaults to the configured target)
    #[arg(short = 'n', long)]
    count: Option<usize>,
  },
  /// Summarize the market for the current session's field and region
  Analyze,
  /// Expand ideas into business canvas sections
  Details {
    /// Idea number to expand (all ideas when omitted)
    #[arg(long)]
    idea: Option<usize>,
    /// Canvas sections to generate (all when omitted)
    #[arg(short, long, value_enum)]
    aspect: Vec<Aspect>,
    /// Model to use instead of the session's last successful model
    #[arg(short, long)]
    model: Option<String>,
  },
  /// Append the current ideas to the saved idea history
  Save,
  /// Write a Markdown report of the current session
  Export {
    /// Output file (defaults to the configured export path)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// List saved ideas
  History,
  /// Show the current session
  Status,
  /// Discard the current session
  Clear,
}

fn init_tracing(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("muse=debug,muse::report=off,warn")
    } else {
      EnvFilter::new("muse::report=off,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = Config::load(cli.config.as_deref())?;
  let manager = SessionManager::new()?;
  let store = IdeaStore::new(config.store_path.clone());

  match cli.command {
    Commands::Generate { interest, region, count } => {
      let generator = HuggingFaceGenerator::new(config.inference_base_url.as_str(), cli.hf_token)?;
      commands::generate::handle(&config, &generator, &manager, &interest, &region, count).await?;
    }
    Commands::Analyze => {
      let search = HttpSearchClient::new()?;
      commands::analyze::handle(&config, &search, &manager).await?;
    }
    Commands::Details { idea, aspect, model } => {
      let generator = HuggingFaceGenerator::new(config.inference_base_url.as_str(), cli.hf_token)?;
      let request = commands::details::DetailsRequest { idea, aspects: aspect, model };
      commands::details::handle(&config, &generator, &manager, request).await?;
    }
    Commands::Save => {
      commands::save::handle(&store, &manager)?;
    }
    Commands::Export { output } => {
      let output = output.unwrap_or_else(|| config.export_path.clone());
      commands::export::handle(&manager, &output)?;
    }
    Commands::History => {
      commands::history::handle(&store);
    }
    Commands::Status => commands::status::handle(&manager)?,
    Commands::Clear => commands::clear::handle(&manager)?,
  }

  Ok(())
}

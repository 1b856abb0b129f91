//! `collect`: import, inspect and validate survey records.
//!
//! # Usage
//!
//! ```text
//! collect import   --survey survey.json record.json
//! collect show     --survey survey.json --record 42
//! collect validate --survey survey.json record.json
//! ```
//!
//! The node store lives in `working_dir` (see [`settings::Settings`]). Exits
//! with status 2 when the survey and the data disagree about attribute kinds.

mod commands;
mod settings;

use std::{
  fs,
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use collect_convert::RecordConversion;
use collect_core::{
  attribute::{Record, RecordRef},
  definition::Survey,
};
use collect_store_sqlite::SqliteStore;
use commands::Schema;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Open Foris Collect record tool")]
struct Cli {
  /// Path to a TOML configuration file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Validate a record document and store it.
  Import {
    /// Survey schema document (JSON).
    #[arg(long)]
    survey: PathBuf,
    /// Record document (JSON).
    record: PathBuf,
  },
  /// Print a stored record.
  Show {
    #[arg(long)]
    survey: PathBuf,
    /// Record id.
    #[arg(long)]
    record: i32,
  },
  /// Validate a record document without storing it.
  Validate {
    #[arg(long)]
    survey: PathBuf,
    record: PathBuf,
  },
}

/// Exit status when the survey does not describe the data it is given.
const SCHEMA_MISMATCH: u8 = 2;

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(cli.config.as_deref())?;

  match run(cli.command, &settings).await {
    Err(err) if commands::is_schema_mismatch(&err) => {
      tracing::error!("survey and data disagree: {err:#}");
      Ok(ExitCode::from(SCHEMA_MISMATCH))
    }
    other => other,
  }
}

async fn run(command: Command, settings: &Settings) -> anyhow::Result<ExitCode> {
  match command {
    Command::Import { survey, record } => {
      let schema = read_schema(&survey)?;
      let record = read_record(&record)?;
      let store = open_store(settings).await?;
      tracing::info!(
        crew = settings.crew_id.as_deref().unwrap_or("-"),
        language = %settings.language,
        "importing record {}",
        record.id
      );
      let conversion = commands::import(&store, &schema, &record).await?;
      report(&conversion);
      Ok(ExitCode::SUCCESS)
    }
    Command::Show { survey, record } => {
      let schema = read_schema(&survey)?;
      let store = open_store(settings).await?;
      let reference = RecordRef {
        survey_id: schema.survey_id(),
        record_id: record,
      };
      for attribute in commands::show(&store, &schema, reference).await? {
        println!(
          "{:>6}  {:<24} {:<18} {}",
          attribute.id, attribute.name, attribute.status, attribute.value
        );
      }
      Ok(ExitCode::SUCCESS)
    }
    Command::Validate { survey, record } => {
      let schema = read_schema(&survey)?;
      let record = read_record(&record)?;
      let conversion = commands::validate(&schema, &record)?;
      report(&conversion);
      Ok(if conversion.is_valid() {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      })
    }
  }
}

fn read_schema(path: &Path) -> anyhow::Result<Schema> {
  let raw = fs::read_to_string(path)
    .with_context(|| format!("reading survey {}", path.display()))?;
  let survey = Survey::from_json(&raw)
    .with_context(|| format!("parsing survey {}", path.display()))?;
  Ok(Schema::new(survey))
}

fn read_record(path: &Path) -> anyhow::Result<Record> {
  let raw = fs::read_to_string(path)
    .with_context(|| format!("reading record {}", path.display()))?;
  Record::from_json(&raw).with_context(|| format!("parsing record {}", path.display()))
}

async fn open_store(settings: &Settings) -> anyhow::Result<SqliteStore> {
  let path = settings.store_path();
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }
  SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))
}

fn report(conversion: &RecordConversion) {
  for error in &conversion.errors {
    println!("invalid: {error}");
  }
  println!(
    "{} attributes, {} invalid fields",
    conversion.values.len(),
    conversion.errors.len()
  );
}

//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `migrate` — run pending database migrations.
//! - `jobs`    — create, list, fetch, update and remove jobs.
//!
//! Every sub-command prints its result as JSON on stdout.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::to_string_pretty;
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::pool::DbConfig;
use db::repository::jobs;
use db::{DbPool, JobFilter, JobPatch, NewJob};

#[derive(Parser)]
#[command(name = "jobly", about = "Manage Jobly job postings", version)]
struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Command,
}

/// Connection settings, read from flags or the environment.
#[derive(Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5, global = true)]
    max_connections: u32,
}

impl DatabaseArgs {
    async fn connect(&self) -> Result<DbPool> {
        let url = self
            .database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let config = DbConfig {
            max_connections: self.max_connections,
            ..DbConfig::new(url)
        };
        Ok(db::pool::create_pool(&config).await?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run pending database migrations.
    Migrate,
    /// Work with job postings.
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
}

#[derive(Subcommand)]
enum JobsCommand {
    /// List jobs, optionally filtered.
    List {
        /// Case-insensitive substring of the title.
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        min_salary: Option<i32>,
        /// Only jobs offering equity.
        #[arg(long)]
        has_equity: bool,
    },
    /// Show one job with its company.
    Get { id: i32 },
    /// Post a new job.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company_handle: String,
        #[arg(long)]
        salary: Option<i32>,
        #[arg(long)]
        equity: Option<Decimal>,
    },
    /// Change the title, salary or equity of a job.
    Update {
        id: i32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        salary: Option<i32>,
        #[arg(long)]
        equity: Option<Decimal>,
    },
    /// Delete a job.
    Remove { id: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pool = cli.database.connect().await?;

    match cli.command {
        Command::Migrate => {
            db::pool::run_migrations(&pool).await?;
            info!("Migrations applied successfully");
        }
        Command::Jobs { command } => run_jobs(&pool, command).await?,
    }

    Ok(())
}

async fn run_jobs(pool: &DbPool, command: JobsCommand) -> Result<()> {
    let output = match command {
        JobsCommand::List { title, min_salary, has_equity } => {
            let filter = JobFilter { title, min_salary, has_equity };
            to_string_pretty(&jobs::list_jobs(pool, &filter).await?)?
        }
        JobsCommand::Get { id } => to_string_pretty(&jobs::get_job(pool, id).await?)?,
        JobsCommand::Create { title, company_handle, salary, equity } => {
            let new_job = NewJob { title, salary, equity, company_handle };
            to_string_pretty(&jobs::create_job(pool, &new_job).await?)?
        }
        JobsCommand::Update { id, title, salary, equity } => {
            let patch = JobPatch { title, salary, equity };
            to_string_pretty(&jobs::update_job(pool, id, &patch).await?)?
        }
        JobsCommand::Remove { id } => {
            jobs::remove_job(pool, id).await?;
            to_string_pretty(&serde_json::json!({ "deleted": id }))?
        }
    };

    println!("{output}");
    Ok(())
}

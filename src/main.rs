use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod data;
mod error;
mod guard;
mod history;
mod intent;
mod models;
mod panel;
mod report;
mod resolver;
mod scope;

use crate::history::InMemoryHistory;
use crate::intent::{HttpLanguageModel, ModelConfig};
use crate::panel::AdminPanel;
use crate::scope::ScopeRegistry;

#[derive(Parser)]
#[command(name = "admin-query")]
#[command(about = "Role-scoped natural language queries over student records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a natural language question about student records
    Ask {
        #[arg(long)]
        role: String,
        #[arg(long)]
        query: String,
        /// CSV dataset; the built-in sample is used when omitted
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Show the records visible to a role without calling the query service
    Preview {
        #[arg(long)]
        role: String,
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List known admin roles and their scopes
    Roles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let registry = ScopeRegistry::builtin();

    match cli.command {
        Commands::Ask { role, query, data } => {
            let dataset = data::load(data.as_deref())?;
            let config = ModelConfig::from_env()?;
            let model = HttpLanguageModel::new(config)?;
            let history = Arc::new(InMemoryHistory::new());
            let panel =
                AdminPanel::new(model, registry, dataset).with_history(history.clone());

            match panel.handle_query(&role, &query).await {
                Ok(result) => println!("{}", report::render(&result)),
                Err(err) => println!("{err}"),
            }
            tracing::debug!(entries = history.snapshot().len(), "query recorded");
        }
        Commands::Preview { role, data } => {
            let dataset = data::load(data.as_deref())?;
            let scope = registry
                .lookup(&role)
                .with_context(|| format!("unknown admin role '{role}'"))?;

            let visible: Vec<_> = dataset
                .iter()
                .filter(|record| scope.covers(record))
                .collect();

            if visible.is_empty() {
                println!("No records in scope for {role}.");
            } else {
                println!(
                    "Records for grade {} class {} region {}:",
                    scope.grade, scope.class_label, scope.region
                );
                for record in visible {
                    println!(
                        "- {} (homework {}, quiz {} on {}, next quiz {})",
                        record.name,
                        if record.homework_submitted {
                            "submitted"
                        } else {
                            "missing"
                        },
                        record.quiz_score,
                        record.quiz_date,
                        record.upcoming_quiz
                    );
                }
            }
        }
        Commands::Roles => {
            for (role, scope) in registry.roles() {
                println!(
                    "- {role}: grade {} class {} region {}",
                    scope.grade, scope.class_label, scope.region
                );
            }
        }
    }

    Ok(())
}

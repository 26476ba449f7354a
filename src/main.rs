use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use release_monitor::config::{self, MonitorConfig};
use release_monitor::project::{NewProject, Project};
use release_monitor::version::backend::Backend;
use release_monitor::version::checker::{self, CheckOutcome};
use release_monitor::version::http::ReqwestClient;
use release_monitor::version::registry::BackendRegistry;
use release_monitor::version::store::{ProjectStore, SqliteStore};

#[derive(Parser)]
#[command(name = "release-monitor")]
#[command(version, about = "Monitor upstream projects for new releases")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a project to monitor
    Add {
        #[command(flatten)]
        project: ProjectArgs,
        /// Repository path used instead of the name when building the backend URL
        #[arg(long)]
        version_url: Option<String>,
    },
    /// Check stored projects for new versions (all of them when no id is given)
    Check { id: Option<i64> },
    /// Print the upstream versions of a project without storing anything
    Versions {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the URL a backend queries for a project
    Url {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    homepage: String,
    #[arg(long, default_value = "pagure")]
    backend: String,
}

impl ProjectArgs {
    fn to_project(&self) -> Project {
        Project::new(&self.name, &self.homepage, &self.backend)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    release_monitor::log::init()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

async fn run(command: Command) -> anyhow::Result<()> {
    let config = MonitorConfig::load(&config::config_path())?;
    let client = Arc::new(ReqwestClient::new(&config.http)?);
    let registry = BackendRegistry::from_config(&config, client);

    match command {
        Command::Add {
            project,
            version_url,
        } => {
            let store = SqliteStore::new(&config::db_path())?;
            let created = store.create(
                NewProject::new(&project.name, &project.homepage, &project.backend)
                    .with_version_url(version_url),
            )?;
            println!("{}", created);
        }
        Command::Check { id } => {
            let store = SqliteStore::new(&config::db_path())?;
            let now = chrono::Utc::now();
            match id {
                Some(id) => {
                    let outcome = checker::check_project(&store, &registry, id, now).await?;
                    print_outcome(&outcome);
                }
                None => {
                    for (id, result) in checker::check_all(&store, &registry, now).await? {
                        match result {
                            Ok(outcome) => print_outcome(&outcome),
                            Err(e) => eprintln!("#{}: {}", id, e),
                        }
                    }
                }
            }
        }
        Command::Versions { project } => {
            let backend = lookup(&registry, &project.backend)?;
            let versions = backend.get_versions(&project.to_project()).await?;
            for version in &versions {
                println!("{}", version);
            }
        }
        Command::Url { project } => {
            let backend = lookup(&registry, &project.backend)?;
            println!("{}", backend.get_version_url(&project.to_project()));
        }
    }

    Ok(())
}

fn lookup(registry: &BackendRegistry, name: &str) -> anyhow::Result<Arc<dyn Backend>> {
    registry.get(name).with_context(|| {
        format!(
            "unknown backend {:?}, available: {}",
            name,
            registry.names().join(", ")
        )
    })
}

fn print_outcome(outcome: &CheckOutcome) {
    match &outcome.project.latest_version {
        Some(latest) => println!(
            "{}: {} new versions, latest {}",
            outcome.project,
            outcome.new_versions.len(),
            latest
        ),
        None => println!("{}: no versions", outcome.project),
    }
}

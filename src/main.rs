use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use thiserror::Error;

use shop_profit::{
    domain::{InvalidInput, MarginPolicy},
    ui::render_report,
    util::{
        persistence::{default_scenario_path, load_or_default, save_scenario, ScenarioStoreError},
        version::{version_label, APP_NAME},
    },
};

#[derive(Parser, Debug)]
#[command(name = "shop-profit")]
#[command(about = "Monthly profitability forecast for an online store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a scenario and print the forecast.
    Run {
        /// Scenario file (default: the platform config directory).
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Override the scenario's margin convention.
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,

        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Write the starter scenario to disk.
    Init {
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the version label.
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    CostPlus,
    PriceBased,
}

impl From<PolicyArg> for MarginPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::CostPlus => MarginPolicy::CostPlus,
            PolicyArg::PriceBased => MarginPolicy::PriceBased,
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Scenario error: {0}")]
    Store(#[from] ScenarioStoreError),
    #[error("Invalid input: {0}")]
    Invalid(#[from] InvalidInput),
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0} already exists; pass --force to overwrite")]
    AlreadyExists(String),
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            policy,
            json,
        } => {
            let path = scenario.or_else(default_scenario_path);
            let mut scenario = load_or_default(path.as_deref())?;
            if let Some(policy) = policy {
                info!("Using {} margins", MarginPolicy::from(policy).label());
                scenario.params.margin_policy = policy.into();
            }

            let report = match scenario.evaluate() {
                Ok(report) => report,
                Err(err) => {
                    error!("Evaluation failed: {err}");
                    return Err(err.into());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Commands::Init { scenario, force } => {
            let path = scenario
                .or_else(default_scenario_path)
                .ok_or(ScenarioStoreError::StorageUnavailable)?;
            if path.exists() && !force {
                warn!("Refusing to overwrite {}", path.display());
                return Err(CliError::AlreadyExists(path.display().to_string()));
            }
            save_scenario(&path, &Default::default())?;
            println!("Wrote starter scenario to {}", path.display());
        }
        Commands::Version => {
            println!("{APP_NAME} {}", version_label());
        }
    }

    Ok(())
}

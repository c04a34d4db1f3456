use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use simvest::core::log::init_logging;
use simvest::core::simulation::SimulationUpdate;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Simulation parameters; only the ones given are changed.
#[derive(Args, Debug)]
struct ParameterArgs {
    /// Initial contribution
    #[arg(long, allow_negative_numbers = true)]
    initial: Option<f64>,

    /// Contribution added at the end of every month
    #[arg(long, allow_negative_numbers = true)]
    monthly: Option<f64>,

    /// Term in months (1 to 360)
    #[arg(long)]
    term: Option<u32>,

    /// Fixed monthly rate in percent; switches to the fixed rate mode
    #[arg(long, allow_negative_numbers = true, conflicts_with = "variable_rates")]
    rate: Option<f64>,

    /// Comma separated monthly rates in percent, one per month; switches to the variable rate mode
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    variable_rates: Option<Vec<f64>>,
}

impl ParameterArgs {
    fn into_update(self, name: Option<String>) -> SimulationUpdate {
        let mut update = match (self.rate, self.variable_rates) {
            (Some(rate), _) => SimulationUpdate::fixed_rate(rate),
            (None, Some(rates)) => SimulationUpdate::variable_rates(rates),
            (None, None) => SimulationUpdate::default(),
        };
        update.name = name;
        update.initial_contribution = self.initial;
        update.monthly_contribution = self.monthly;
        update.term_months = self.term;
        update
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Create a new simulation
    Create {
        name: String,
        #[command(flatten)]
        params: ParameterArgs,
    },
    /// Change the parameters of a simulation
    Update {
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        params: ParameterArgs,
    },
    /// Change only the name of a simulation
    Rename { id: String, name: String },
    /// Delete a simulation
    Delete { id: String },
    /// List all simulations
    List,
    /// Calculate the month by month projection
    Calculate { id: String },
    /// Display parameters and results of a simulation
    Show { id: String },
    /// Compare two or more calculated simulations
    Compare {
        #[arg(num_args = 2.., required = true)]
        ids: Vec<String>,
    },
    /// Export the monthly results as a delimited table
    Export { id: String, path: PathBuf },
    /// Save a simulation to a JSON file
    Save { id: String, path: PathBuf },
    /// Load a simulation from a JSON file
    Load { path: PathBuf },
}

impl From<Commands> for simvest::AppCommand {
    fn from(cmd: Commands) -> simvest::AppCommand {
        match cmd {
            Commands::Create { name, params } => simvest::AppCommand::Create {
                name,
                update: params.into_update(None),
            },
            Commands::Update { id, name, params } => simvest::AppCommand::Update {
                id,
                update: params.into_update(name),
            },
            Commands::Rename { id, name } => simvest::AppCommand::Rename { id, name },
            Commands::Delete { id } => simvest::AppCommand::Delete { id },
            Commands::List => simvest::AppCommand::List,
            Commands::Calculate { id } => simvest::AppCommand::Calculate { id },
            Commands::Show { id } => simvest::AppCommand::Show { id },
            Commands::Compare { ids } => simvest::AppCommand::Compare { ids },
            Commands::Export { id, path } => simvest::AppCommand::Export { id, path },
            Commands::Save { id, path } => simvest::AppCommand::Save { id, path },
            Commands::Load { path } => simvest::AppCommand::Load { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => simvest::cli::setup::setup(cli.config_path.as_deref()),
        Some(cmd) => simvest::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

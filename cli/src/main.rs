//! Alliance Calculator CLI - staking yield for a native asset and its alliance assets

mod display;
mod overrides;

use alliance_economics::{derived_names, input_names, AssetRole, ScenarioConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use overrides::{parse_override, InputOverride};

#[derive(Parser)]
#[command(name = "alliance-calc")]
#[command(about = "Alliance staking yield calculator", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute derived values for every asset in a scenario
    Compute {
        /// Scenario file (TOML); defaults are used when omitted
        #[arg(short, long, value_name = "FILE")]
        scenario: Option<PathBuf>,

        /// Override an input, e.g. `--set 1.assetPrice=2.5` (asset 0 is native)
        #[arg(long = "set", value_name = "ID.FIELD=VALUE", value_parser = parse_override)]
        overrides: Vec<InputOverride>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List input and derived field names
    Fields {
        /// Only list fields for this role (native or alliance)
        #[arg(short, long)]
        role: Option<AssetRole>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Compute {
            scenario,
            overrides,
            json,
        } => compute(scenario, &overrides, json),
        Commands::Fields { role } => {
            let roles = match role {
                Some(role) => vec![role],
                None => vec![AssetRole::Native, AssetRole::Alliance],
            };
            for role in roles {
                print_fields(role);
            }
            Ok(())
        }
    }
}

fn compute(scenario: Option<PathBuf>, overrides: &[InputOverride], json: bool) -> Result<()> {
    let config = match scenario {
        Some(path) => ScenarioConfig::load_from_file(&path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => {
            log::info!("no scenario file given, using default inputs");
            ScenarioConfig::default()
        }
    };

    let mut calc = config.build_calculator();
    for input in overrides {
        calc.set_input(input.asset, &input.field, input.value)
            .with_context(|| format!("cannot apply --set {}", input))?;
    }

    let snapshot = calc.snapshot();
    if json {
        println!("{}", snapshot.to_json_pretty()?);
    } else {
        display::print_snapshot(&snapshot);
    }
    Ok(())
}

fn print_fields(role: AssetRole) {
    println!("{} inputs:", role);
    for name in input_names(role) {
        println!("  {}", name);
    }
    println!("{} derived:", role);
    for name in derived_names(role) {
        println!("  {}", name);
    }
}

//! # Config Subcommand
//!
//! `ccr config check FILE` loads a registry YAML config, applies defaults,
//! validates it, and prints the effective settings alongside the fixed
//! scoring rules.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use ccr_core::RiskLevel;
use ccr_registry::{
    RegistryConfig, RiskMultipliers, MAX_RETENTION_MONTHS, MAX_SCORE, VIOLATION_THRESHOLD,
};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a registry config and print the effective settings.
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print the effective config as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

pub fn run_config(args: &ConfigArgs) -> Result<u8> {
    match &args.command {
        ConfigCommand::Check { file, json } => cmd_check(file, *json),
    }
}

fn cmd_check(file: &Path, json: bool) -> Result<u8> {
    let config = RegistryConfig::load(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", summary(file, &config));
    }
    Ok(0)
}

fn summary(file: &Path, config: &RegistryConfig) -> String {
    let table = RiskMultipliers::default();
    let multipliers = RiskLevel::all()
        .iter()
        .map(|r| format!("{}={}", r, table.for_risk(*r)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "OK: {}\n  Contract:            {}\n  Domain:              {} v{} (chain {})\n  Max score:           {}\n  Max retention:       {} months\n  Violation threshold: {}\n  Risk multipliers:    {}\n",
        file.display(),
        config.contract_address,
        config.domain_name,
        config.domain_version,
        config.chain_id,
        MAX_SCORE,
        MAX_RETENTION_MONTHS,
        VIOLATION_THRESHOLD,
        multipliers,
    )
}

//! HEXMAP CLI - Command-line driver for the hex map
//!
//! Commands:
//! - show: Print every cell of a generated map
//! - pick: Find the cell under a pixel position
//! - ring: List the cells of one ring
//! - rings: Cycle the highlighted ring the way the turn loop does
//! - shrink: Remove the outer ring round after round

mod map_setup;
mod pick;
mod ring_cmd;
mod shrink;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexmap")]
#[command(about = "Hex map geometry tool")]
struct Cli {
    /// Map config JSON file (defaults are used when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Terrain seed, overrides the config
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every cell of a generated map
    Show(show::ShowArgs),
    /// Find the cell under a pixel position
    Pick(pick::PickArgs),
    /// List the cells of one ring
    Ring(ring_cmd::RingArgs),
    /// Cycle the highlighted ring size
    Rings(ring_cmd::RingsArgs),
    /// Remove the outer ring round after round
    Shrink(shrink::ShrinkArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse())
}

/// Dispatch a command. The map config is only read by commands that use it.
fn run(cli: Cli) -> anyhow::Result<()> {
    let config = || map_setup::load_config(cli.config.as_deref(), cli.seed);

    match cli.command {
        Commands::Show(args) => show::run(args, &config()?),
        Commands::Pick(args) => pick::run(args, &config()?),
        Commands::Ring(args) => ring_cmd::run_ring(args),
        Commands::Rings(args) => ring_cmd::run_rings(args, &config()?),
        Commands::Shrink(args) => shrink::run(args, &config()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &str = "/nonexistent/hexmap.json";

    #[test]
    fn test_ring_ignores_config() {
        let cli = Cli::try_parse_from(["hexmap", "--config", MISSING, "ring", "--radius", "1"]).unwrap();
        assert!(run(cli).is_ok());
    }

    #[test]
    fn test_map_commands_need_config() {
        for command in ["show", "rings", "shrink"] {
            let cli = Cli::try_parse_from(["hexmap", "--config", MISSING, command]).unwrap();
            assert!(run(cli).is_err(), "{command}");
        }
        let cli = Cli::try_parse_from(["hexmap", "--config", MISSING, "pick", "--x", "0", "--y", "0"]).unwrap();
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_ring_radius_bounded() {
        assert!(Cli::try_parse_from(["hexmap", "ring", "--radius", "70000"]).is_err());
    }
}

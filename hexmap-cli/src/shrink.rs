//! Shrink command - strip the outermost ring each round
//!
//! ## Architecture
//!
//! - run(): orchestration
//! - shrink_map(): removes one ring per round, records what happened
//! - report_rounds(): text or JSON output

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hexmap_core::{ring, Grid, MapConfig};

use crate::map_setup::build_map;

#[derive(Args)]
pub struct ShrinkArgs {
    /// Rounds to play (defaults to the map radius)
    #[arg(long)]
    pub rounds: Option<u16>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// What one round removed
#[derive(Clone, Debug, PartialEq, Serialize)]
struct RoundRecord {
    round: u16,
    ring_radius: u16,
    removed: usize,
    remaining: usize,
}

pub fn run(args: ShrinkArgs, config: &MapConfig) -> Result<()> {
    let mut grid = build_map(config)?;
    let rounds = args.rounds.unwrap_or(grid.radius());

    let records = shrink_map(&mut grid, rounds);
    report_rounds(&records, args.json)
}

/// Round `k` (from 0) removes the ring at `radius - k`. Stops early once only
/// the center cell is left.
fn shrink_map(grid: &mut Grid, rounds: u16) -> Vec<RoundRecord> {
    let mut records = Vec::new();

    for round in 0..rounds.min(grid.radius()) {
        let ring_radius = grid.radius() - round;
        let removed = grid.remove_ring(&ring(ring_radius, grid.center()));

        tracing::info!(
            "Round {}: removed ring {} ({} cells), {} remain",
            round + 1,
            ring_radius,
            removed,
            grid.len()
        );

        records.push(RoundRecord {
            round: round + 1,
            ring_radius,
            removed,
            remaining: grid.len(),
        });
    }

    if rounds > grid.radius() {
        tracing::warn!("Only {} rounds possible, center cell reached", grid.radius());
    }
    records
}

fn report_rounds(records: &[RoundRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    println!("\n=== Shrink ===");
    for r in records {
        println!(
            "  Round {}: ring {} removed {} cells, {} remain",
            r.round, r.ring_radius, r.removed, r.remaining
        );
    }
    Ok(())
}

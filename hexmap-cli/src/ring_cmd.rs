//! Ring commands - list a ring, or cycle the highlighted ring
//!
//! `rings` mimics the turn loop: every card played advances the highlighted
//! ring one step outward, wrapping back to the innermost ring after the edge.

use anyhow::Result;
use clap::Args;

use hexmap_core::{ring, Hex, MapConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct RingArgs {
    /// Distance from the center cell
    #[arg(long)]
    pub radius: u16,

    /// Center q
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub q: i32,

    /// Center r
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub r: i32,
}

#[derive(Args)]
pub struct RingsArgs {
    /// Number of highlight steps to print
    #[arg(long, default_value = "6")]
    pub steps: usize,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run_ring(args: RingArgs) -> Result<()> {
    let center = Hex::new(args.q, args.r);
    let cells = ring(args.radius, center);

    println!("Ring {} around {}: {} cells", args.radius, center, cells.len());
    println!("  {}", format_cells(&cells));
    Ok(())
}

pub fn run_rings(args: RingsArgs, config: &MapConfig) -> Result<()> {
    let max = config.radius()?;
    let sizes = ring_sizes(max, args.steps);
    tracing::info!("Cycling {} ring highlights on a radius {} map", sizes.len(), max);

    for (step, size) in sizes.into_iter().enumerate() {
        let cells = ring(size, Hex::ORIGIN);
        println!("Step {}: ring {} ({} cells)", step + 1, size, cells.len());
        println!("  {}", format_cells(&cells));
    }
    Ok(())
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Next highlighted ring: one further out, back to 1 past the edge
fn next_ring_size(current: u16, max: u16) -> u16 {
    if max == 0 {
        return 0;
    }
    if current >= max {
        1
    } else {
        current + 1
    }
}

/// Highlight sizes for `steps` steps, starting from no highlight
fn ring_sizes(max: u16, steps: usize) -> Vec<u16> {
    let mut current = 0;
    (0..steps)
        .map(|_| {
            current = next_ring_size(current, max);
            current
        })
        .collect()
}

fn format_cells(cells: &[Hex]) -> String {
    cells
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

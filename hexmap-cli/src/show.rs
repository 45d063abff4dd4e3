//! Show command - dump every cell of a generated map
//!
//! Plays the part of the renderer: it walks the grid once per call through
//! `Grid::cells` and prints what a draw pass would receive.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hexmap_core::{Cell, CellKind, Grid, MapConfig, Point};

use crate::map_setup::build_map;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    /// Output cells as JSON, corners included
    #[arg(long)]
    pub json: bool,
}

/// Row of the text report and element of the JSON report
#[derive(Debug, Serialize)]
struct CellRow {
    index: usize,
    q: i32,
    r: i32,
    s: i32,
    kind: CellKind,
    center: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    corners: Option<[Point; 6]>,
}

#[derive(Debug, Serialize)]
struct MapReport {
    radius: u16,
    cell_count: usize,
    cells: Vec<CellRow>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: ShowArgs, config: &MapConfig) -> Result<()> {
    let grid = build_map(config)?;
    let report = collect_report(&grid, args.json);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&report);
    }
    Ok(())
}

// ============================================================================
// STEPS
// ============================================================================

fn collect_report(grid: &Grid, with_corners: bool) -> MapReport {
    let mut cells = Vec::with_capacity(grid.len());
    grid.for_each_cell(|cell| cells.push(to_row(&cell, with_corners)));

    MapReport {
        radius: grid.radius(),
        cell_count: cells.len(),
        cells,
    }
}

fn to_row(cell: &Cell, with_corners: bool) -> CellRow {
    CellRow {
        index: cell.index,
        q: cell.hex.q,
        r: cell.hex.r,
        s: cell.hex.s(),
        kind: cell.kind,
        center: cell.center,
        corners: with_corners.then_some(cell.corners),
    }
}

fn print_text_report(report: &MapReport) {
    println!("\n=== Map (radius {}) ===", report.radius);
    println!("Cells: {}", report.cell_count);
    println!("\n  idx    q    r    s  kind    center");
    for row in &report.cells {
        println!(
            "  {:>3} {:>4} {:>4} {:>4}  {:<7} {}",
            row.index,
            row.q,
            row.r,
            row.s,
            row.kind.to_string(),
            row.center
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Pick command - map a pointer position onto a cell

use anyhow::Result;
use clap::Args;

use hexmap_core::{CellKind, FractionalHex, Grid, Hex, MapConfig, Point};

use crate::map_setup::build_map;

#[derive(Args)]
pub struct PickArgs {
    /// Pointer x in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,

    /// Pointer y in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub y: f64,
}

#[derive(Debug, PartialEq)]
struct Pick {
    fractional: FractionalHex,
    /// None when the pointer maps to no representable cell
    hex: Option<Hex>,
    kind: Option<CellKind>,
}

pub fn run(args: PickArgs, config: &MapConfig) -> Result<()> {
    let grid = build_map(config)?;
    let point = Point::new(args.x, args.y);
    let pick = pick_cell(&grid, point);

    match pick.hex {
        Some(hex) => println!(
            "{} -> ({:.3}, {:.3}) -> {}",
            point, pick.fractional.q, pick.fractional.r, hex
        ),
        None => println!("{} -> no cell", point),
    }
    match pick.kind {
        Some(kind) => println!("On map: {}", kind),
        None => println!("Off map"),
    }
    Ok(())
}

fn pick_cell(grid: &Grid, point: Point) -> Pick {
    let fractional = grid.layout().to_coordinate(point);
    let hex = match fractional.round() {
        Ok(hex) => {
            tracing::debug!("Pointer {} is over {}", point, hex);
            Some(hex)
        }
        Err(e) => {
            tracing::debug!("Pointer {} is off map: {}", point, e);
            None
        }
    };

    Pick {
        fractional,
        hex,
        kind: hex.and_then(|h| grid.kind_at(h)),
    }
}

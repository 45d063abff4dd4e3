//! MapConfig - everything needed to lay out and generate a map

use std::path::Path;

use anyhow::Context;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::grid::{Grid, TerrainConfig};
use crate::layout::{Layout, OrientationKind, Point};

/// Map parameters, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Steps from the center cell to the edge
    pub radius: i32,
    /// Cell size in pixels, used on both axes
    pub hex_size: f64,
    pub orientation: OrientationKind,
    /// Pixel position of the center cell
    pub origin: Point,
    pub terrain: TerrainConfig,
    /// Seed for terrain generation (None = random)
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            hex_size: 42.0,
            orientation: OrientationKind::Flat,
            // center of a 1280x720 surface, nudged 75px up
            origin: Point::new(640.0, 435.0),
            terrain: TerrainConfig::default(),
            seed: None,
        }
    }
}

impl MapConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map config: {}", path.display()))?;
        let config: MapConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse map config: {}", path.display()))?;
        config.validate()?;
        tracing::info!("Loaded map config from {}", path.display());
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check radius and layout size without building anything
    pub fn validate(&self) -> Result<()> {
        self.radius()?;
        self.layout()?;
        Ok(())
    }

    /// Radius as a grid size; negative or above `u16::MAX` is rejected
    pub fn radius(&self) -> Result<u16> {
        u16::try_from(self.radius).map_err(|_| GridError::InvalidRadius(self.radius))
    }

    pub fn layout(&self) -> Result<Layout> {
        Layout::new(
            self.orientation.orientation(),
            Point::new(self.hex_size, self.hex_size),
            self.origin,
        )
    }

    pub fn build_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        let radius = self.radius()?;
        let layout = self.layout()?;
        Ok(Grid::build(layout, radius, &self.terrain, rng))
    }
}

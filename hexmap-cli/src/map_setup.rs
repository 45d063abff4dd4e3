//! Shared setup - resolve config, seed the RNG, build the map

use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexmap_core::{Grid, MapConfig};

/// Load the config file if one was given, then apply the seed override
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<MapConfig> {
    let mut config = match path {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// Build the grid described by `config`
pub fn build_map(config: &MapConfig) -> Result<Grid> {
    let mut rng = create_rng(config.seed);
    let grid = config
        .build_grid(&mut rng)
        .context("Failed to build map")?;

    tracing::info!(
        "Map ready: radius={}, cells={}, orientation={:?}",
        grid.radius(),
        grid.len(),
        config.orientation
    );
    Ok(grid)
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_overrides_default() {
        let config = load_config(None, Some(7)).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.radius, 3);
    }

    #[test]
    fn test_no_seed_keeps_config() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/hexmap.json");
        assert!(load_config(Some(path), None).is_err());
    }

    #[test]
    fn test_seeded_maps_match() {
        let config = load_config(None, Some(42)).unwrap();
        let a = build_map(&config).unwrap();
        let b = build_map(&config).unwrap();
        assert_eq!(a.kinds(), b.kinds());
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}

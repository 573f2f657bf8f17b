//! Integration tests for grid configuration and snapshot persistence.

use bpcs_planes::{BpcsError, Coding, Grid, GridConfig, GridSnapshot, Result, PLANE_DEPTH};
use rand::{Rng, SeedableRng};

fn filled_grid() -> Grid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut grid = Grid::new(26, 18).unwrap();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            grid.set_color(x, y, rng.gen()).unwrap();
        }
    }
    grid
}

#[test]
fn test_from_config() -> Result<()> {
    let config = GridConfig::from_json("{\"width\": 9, \"height\": 19}")?;
    let grid = Grid::from_config(&config)?;
    assert_eq!((grid.block_width(), grid.block_height()), (1, 2));
    assert_eq!(grid.config(), &config);
    Ok(())
}

#[test]
fn test_from_config_too_small() {
    let config = GridConfig::new(8, 8);
    assert!(matches!(
        Grid::from_config(&config),
        Err(BpcsError::ImageTooSmall { .. })
    ));
}

#[test]
fn test_snapshot_layout() -> Result<()> {
    let mut grid = Grid::new(17, 9)?;
    grid.set_color(8, 0, 1)?;

    let snapshot = grid.to_snapshot();
    assert_eq!(snapshot.planes.len(), 2 * PLANE_DEPTH);
    assert_eq!(snapshot.coding, Coding::Pbc);
    // Block (1, 0), depth 0, plane bit 0
    assert_eq!(snapshot.planes[PLANE_DEPTH], 1);
    assert!(snapshot.planes[..PLANE_DEPTH].iter().all(|&w| w == 0));
    Ok(())
}

#[test]
fn test_snapshot_binary_round_trip() -> Result<()> {
    let mut grid = filled_grid();
    grid.to_cgc();

    let bytes = grid.to_snapshot().to_binary()?;
    let restored = Grid::from_snapshot(&GridSnapshot::from_binary(&bytes)?)?;
    assert_eq!(restored, grid);
    assert_eq!(restored.coding(), Coding::Cgc);
    Ok(())
}

#[test]
fn test_snapshot_json_round_trip() -> Result<()> {
    let grid = filled_grid();

    let json = grid.to_snapshot().to_json()?;
    let restored = Grid::from_snapshot(&GridSnapshot::from_json(&json)?)?;
    assert_eq!(restored, grid);
    Ok(())
}

#[test]
fn test_snapshot_dimension_mismatch() {
    let mut snapshot = filled_grid().to_snapshot();
    snapshot.planes.pop();

    assert!(matches!(
        Grid::from_snapshot(&snapshot),
        Err(BpcsError::DimensionMismatch { expected, actual })
            if expected == 6 * PLANE_DEPTH && actual == 6 * PLANE_DEPTH - 1
    ));
}

#[test]
fn test_snapshot_oversized_config_rejected() {
    let snapshot = GridSnapshot {
        config: GridConfig::new(1 << 40, 1 << 40),
        coding: Coding::Pbc,
        planes: vec![],
    };
    assert!(matches!(
        Grid::from_snapshot(&snapshot),
        Err(BpcsError::ImageTooLarge { .. })
    ));
}

#[test]
fn test_snapshot_empty_planes_checked_before_allocation() {
    let snapshot = GridSnapshot {
        config: GridConfig::new(16385, 16385),
        coding: Coding::Cgc,
        planes: vec![],
    };
    assert!(matches!(
        Grid::from_snapshot(&snapshot),
        Err(BpcsError::DimensionMismatch { expected, actual: 0 })
            if expected == 2048 * 2048 * PLANE_DEPTH
    ));
}

#[test]
fn test_snapshot_forged_json_rejected() -> Result<()> {
    let json = format!(
        "{{\"config\": {{\"width\": {w}, \"height\": {w}}}, \"coding\": \"Pbc\", \"planes\": []}}",
        w = 1u64 << 40
    );
    let snapshot = GridSnapshot::from_json(&json)?;
    assert!(Grid::from_snapshot(&snapshot).is_err());
    Ok(())
}

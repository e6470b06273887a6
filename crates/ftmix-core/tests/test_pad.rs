mod common;

use ndarray::s;

use ftmix_core::grid::IntensityGrid;
use ftmix_core::pad::{next_pow2, pad};

use common::noise_grid;

#[test]
fn test_next_pow2_edges() {
    assert_eq!(next_pow2(0), 1);
    assert_eq!(next_pow2(1), 1);
    assert_eq!(next_pow2(2), 2);
    assert_eq!(next_pow2(3), 4);
    assert_eq!(next_pow2(64), 64);
    assert_eq!(next_pow2(65), 128);
}

#[test]
fn test_pad_preserves_content_and_zeroes_margin() {
    let grid = noise_grid(5, 3, 7);
    let padded = pad(&grid);

    assert_eq!(padded.width(), 8);
    assert_eq!(padded.height(), 4);
    assert_eq!(padded.source_width, 5);
    assert_eq!(padded.source_height, 3);
    assert_eq!(padded.grid.data.slice(s![..3, ..5]), grid.data);

    for ((row, col), &v) in padded.grid.data.indexed_iter() {
        if row >= 3 || col >= 5 {
            assert_eq!(v, 0.0, "margin at ({row},{col}) = {v}");
        }
    }
}

#[test]
fn test_pad_power_of_two_is_unchanged() {
    let grid = noise_grid(16, 8, 3);
    let padded = pad(&grid);
    assert_eq!(padded.grid, grid);
}

#[test]
fn test_pad_degenerate_grid() {
    let padded = pad(&IntensityGrid::zeros(0, 0));
    assert_eq!(padded.width(), 1);
    assert_eq!(padded.height(), 1);
    assert_eq!(padded.grid.data[[0, 0]], 0.0);

    let padded = pad(&IntensityGrid::zeros(3, 0));
    assert_eq!((padded.width(), padded.height()), (4, 1));
    assert!(padded.grid.data.iter().all(|&v| v == 0.0));
}

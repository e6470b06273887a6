mod common;

use approx::assert_abs_diff_eq;
use image::{Rgb, RgbImage};

use ftmix_core::engine::{CancellationToken, FourierMixer, MixRequest};
use ftmix_core::io::image_io::{grayscale_from_rgb, load_grayscale, save_png, save_spectrum_views};

use common::{grid, noise_grid};

#[test]
fn test_png_round_trip_rounds_to_u8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.png");
    let source = grid(3, 2, &[0.0, 10.4, 10.6, 128.0, 254.9, 300.0]);

    save_png(&source, &path).unwrap();
    let loaded = load_grayscale(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (3, 2));
    let expected = [0.0, 10.0, 11.0, 128.0, 255.0, 255.0];
    for (got, want) in loaded.data.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-3);
    }
}

#[test]
fn test_bt601_luminance() {
    let mut img = RgbImage::new(3, 1);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 255, 0]));
    img.put_pixel(2, 0, Rgb([100, 100, 100]));

    let gray = grayscale_from_rgb(&img);
    assert_abs_diff_eq!(gray.data[[0, 0]], 0.299 * 255.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gray.data[[0, 1]], 0.587 * 255.0, epsilon = 1e-3);
    assert_abs_diff_eq!(gray.data[[0, 2]], 100.0, epsilon = 1e-3);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_grayscale(&dir.path().join("absent.png")).is_err());
}

#[test]
fn test_spectrum_views_written_per_component() {
    let dir = tempfile::tempdir().unwrap();
    let mut mixer = FourierMixer::default();
    mixer.load(0, noise_grid(6, 5, 21)).unwrap();
    let out = mixer
        .mix(&MixRequest::default(), &CancellationToken::new())
        .unwrap();

    let views_dir = dir.path().join("views");
    let written = save_spectrum_views(
        &out.spectrum.data,
        &out.spectrum.polar,
        &views_dir,
        "mixed",
    )
    .unwrap();
    assert_eq!(written.len(), 4);
    for path in &written {
        assert!(path.exists(), "{}", path.display());
        let view = image::open(path).unwrap();
        assert_eq!((view.width(), view.height()), (8, 8));
    }
    assert!(views_dir.join("mixed_magnitude.png").exists());
    assert!(views_dir.join("mixed_phase.png").exists());
}

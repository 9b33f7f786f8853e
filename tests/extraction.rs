//! Integration coverage for `spatial::tiles::extract_tiles`

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used)]

use overlap_wfc::spatial::pixel::Pixel;
use overlap_wfc::spatial::tiles::extract_tiles;

#[test]
fn checkerboard_extraction_yields_four_toroidal_shifts() {
    let r = Pixel::new(255, 0, 0, 255);
    let g = Pixel::new(0, 255, 0, 255);
    let sample = vec![r, g, g, r];
    let set = extract_tiles(&sample, 2, 2, 2).unwrap();
    assert_eq!(set.len(), 4);
    for id in 0..set.len() {
        assert_eq!(set.frequency(id), 1);
    }
}

#[test]
fn uniform_sample_extraction_yields_a_single_tile() {
    let blue = Pixel::new(0, 0, 255, 255);
    let sample = vec![blue; 9];
    let set = extract_tiles(&sample, 3, 3, 2).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.frequency(0), 9);
}

#[test]
fn single_red_pixel_on_blue_yields_ten_distinct_offsets() {
    let blue = Pixel::new(0, 0, 255, 255);
    let red = Pixel::new(255, 0, 0, 255);
    let mut sample = vec![blue; 16];
    sample[0] = red;
    let set = extract_tiles(&sample, 4, 4, 3).unwrap();
    // 9 windows catch the marker at a distinct offset; the other 7 miss it
    // entirely and collapse into one shared uniform-blue tile.
    assert_eq!(set.len(), 10);
    let total: u64 = (0..set.len()).map(|id| set.frequency(id)).sum();
    assert_eq!(total, 16);
}

#[test]
fn mismatched_sample_length_is_rejected() {
    let blue = Pixel::new(0, 0, 255, 255);
    let sample = vec![blue; 5];
    assert!(extract_tiles(&sample, 3, 3, 2).is_err());
}

#[test]
fn zero_width_or_height_is_rejected() {
    assert!(extract_tiles(&[], 0, 3, 1).is_err());
    assert!(extract_tiles(&[], 3, 0, 1).is_err());
}

#[test]
fn tile_size_out_of_bounds_is_rejected() {
    let blue = Pixel::new(0, 0, 255, 255);
    let sample = vec![blue; 9];
    assert!(extract_tiles(&sample, 3, 3, 0).is_err());
    assert!(extract_tiles(&sample, 3, 3, 21).is_err());
}

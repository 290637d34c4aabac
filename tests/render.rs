// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use barnsley::{render, render_histogram, RenderError, TreeConfig};

const WIDTH: usize = 128;
const HEIGHT: usize = 192;
const SEED: u64 = 20_191_107;

fn in_marker(config: &TreeConfig, x: usize, y: usize) -> bool {
    let (cx, cy) = config.marker.center(config.width, config.height);
    let (dx, dy) = (x as i64 - cx as i64, y as i64 - cy as i64);
    let r = config.marker.radius as i64;
    dx * dx + dy * dy <= r * r
}

#[test]
fn small_tree_end_to_end() {
    let config = TreeConfig::with_size(WIDTH, HEIGHT);
    let (histogram, image) = render_histogram(&config, SEED, 1).unwrap();

    assert!(histogram.max_count() > 0);
    assert_eq!((image.width(), image.height()), (WIDTH, HEIGHT));

    // After the flip the high-y band sits at the top, the low-y band
    // at the bottom.
    let (low, high) = config.masking.bands(HEIGHT);
    let top = 0..high.len();
    let bottom = HEIGHT - low.len()..HEIGHT;
    for y in top.chain(bottom) {
        for x in 0..WIDTH {
            if !in_marker(&config, x, y) {
                assert_eq!(image.pixel(x, y), [0, 0, 0], "pixel {},{}", x, y);
            }
        }
    }

    let (cx, cy) = config.marker.center(WIDTH, HEIGHT);
    assert_eq!(image.pixel(cx, cy), config.marker.color);
    assert_eq!(image.pixel(cx - 8, cy), config.marker.color);
    assert_eq!(image.pixel(cx, cy + 8), config.marker.color);

    // Something green grew between the bands.
    let lit = (high.len()..HEIGHT - low.len())
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| !in_marker(&config, x, y) && image.pixel(x, y)[1] > 0)
        .count();
    assert!(lit > 100, "only {} lit pixels", lit);
}

#[test]
fn green_dominates() {
    let config = TreeConfig::with_size(WIDTH, HEIGHT);
    let (histogram, _) = render_histogram(&config, SEED, 1).unwrap();
    for cell in histogram.counts().chunks(3) {
        assert_eq!(cell[1], 8 * cell[0]);
        assert_eq!(cell[0], cell[2]);
    }
}

#[test]
fn same_seed_same_picture() {
    let config = TreeConfig::with_size(WIDTH, HEIGHT);
    assert_eq!(
        render(&config, SEED, 1).unwrap(),
        render(&config, SEED, 1).unwrap()
    );
    assert_eq!(
        render(&config, SEED, 2).unwrap(),
        render(&config, SEED, 2).unwrap()
    );
}

#[test]
fn no_iterations_means_empty_histogram() {
    let mut config = TreeConfig::with_size(WIDTH, HEIGHT);
    config.iterations_per_pixel = 0;
    match render(&config, SEED, 1) {
        Err(RenderError::EmptyHistogram) => (),
        other => panic!("expected EmptyHistogram, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn entropy_seed_is_available() {
    assert!(barnsley::entropy_seed().is_ok());
}

#[test]
fn zero_mask_divisor_fails_instead_of_panicking() {
    let mut config = TreeConfig::with_size(WIDTH, HEIGHT);
    config.masking.low_divisor = 0;
    match render(&config, SEED, 1) {
        Err(RenderError::InvalidMasking { .. }) => (),
        other => panic!("expected InvalidMasking, got {:?}", other.map(|_| ())),
    }
}

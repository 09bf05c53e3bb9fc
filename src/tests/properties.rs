//! Randomized map properties
use crate::prelude::{Epoch, Error, Grid, Linspace, TecMap};
use rand::{seq::SliceRandom, Rng};

const ITERATIONS: usize = 500;

fn epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2022, 1, 2)
}

/// Random axis, made of whole spacing steps so the cell count is exact
fn random_axis<R: Rng>(rng: &mut R) -> (Linspace, usize) {
    let spacing = *[1.0_f64, 2.5, 5.0].choose(rng).unwrap();
    let below = rng.gen_range(0..10_i32);
    let above = rng.gen_range(0..10_i32);
    let start = below as f64 * spacing;
    let end = -(above as f64) * spacing;
    let spacing = if rng.gen_bool(0.5) { spacing } else { -spacing };
    let cells = (below + above) as usize + 1;
    (Linspace::new(start, end, spacing), cells)
}

#[test]
fn shape_validation() {
    let mut rng = rand::thread_rng();
    for _ in 0..ITERATIONS {
        let (latitude, lat_cells) = random_axis(&mut rng);
        let (longitude, lon_cells) = random_axis(&mut rng);
        let expected = lat_cells * lon_cells;

        assert_eq!(Grid::new(latitude, longitude).cells(), expected as f64);

        let delta = rng.gen_range(-3..=3_i64);
        let len = (expected as i64 + delta).max(0) as usize;
        let samples = vec![1; len];

        match TecMap::new(-1, epoch(), latitude, longitude, 450.0, &samples) {
            Ok(map) => {
                assert_eq!(len, expected, "{:?} accepted {} samples", map.grid(), len);
            },
            Err(Error::MapShape {
                epoch: e,
                expected: cells,
                found,
            }) => {
                assert_ne!(len, expected, "rejected valid {} samples", len);
                assert_eq!(e, epoch());
                assert_eq!(cells, expected as f64);
                assert_eq!(found, len);
            },
            Err(e) => panic!("unexpected error {}", e),
        }
    }
}

#[test]
fn scaling() {
    let mut rng = rand::thread_rng();
    for exponent in -5..=5_i8 {
        let samples = (0..64)
            .map(|_| rng.gen_range(-9999..=9999))
            .collect::<Vec<i32>>();

        let map = TecMap::new(
            exponent,
            epoch(),
            (0.0, 0.0, 1.0),
            (0.0, 315.0, 5.0),
            450.0,
            &samples,
        )
        .unwrap();

        let tec = map.tec();
        assert_eq!(tec.len(), samples.len());

        for (raw, tec) in samples.iter().zip(tec.iter()) {
            let tec = tec.expect("no sentinel: no missing value");
            let expected = *raw as f64 * 10.0_f64.powi(exponent as i32);
            let error = (tec - expected).abs();
            assert!(
                error <= 1.0E-12 * expected.abs().max(1.0),
                "{} x 10^{}: got {}, expecting {}",
                raw,
                exponent,
                tec,
                expected
            );
        }
    }
}

#[test]
fn none_sentinel() {
    let mut rng = rand::thread_rng();
    for exponent in -5..=5_i8 {
        let sentinel = rng.gen_range(-9999..=9999);

        // neighbours of the sentinel, scale close to it
        let samples = (0..64)
            .map(|_| match rng.gen_range(0..4) {
                0 => sentinel,
                1 => sentinel + 1,
                2 => sentinel - 1,
                _ => rng.gen_range(-9999..=9999),
            })
            .collect::<Vec<i32>>();

        let map = TecMap::new(
            exponent,
            epoch(),
            (0.0, 0.0, 1.0),
            (0.0, 315.0, 5.0),
            450.0,
            &samples,
        )
        .unwrap()
        .with_none_sentinel(sentinel);

        for (raw, tec) in samples.iter().zip(map.tec().iter()) {
            if *raw == sentinel {
                assert!(tec.is_none(), "sentinel {} was not substituted", raw);
            } else {
                assert!(tec.is_some(), "{} was reported missing (sentinel {})", raw, sentinel);
            }
        }
    }
}

//! Decoded TEC map

use crate::{
    error::Error,
    grid::{Grid, Linspace},
};

use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Applies the power of ten scaling.
/// Negative exponents divide by the exact power of ten.
pub(crate) fn scale(raw: i32, exponent: i8) -> f64 {
    let raw = raw as f64;
    let exponent = exponent as i32;
    if exponent < 0 {
        raw / 10.0_f64.powi(-exponent)
    } else {
        raw * 10.0_f64.powi(exponent)
    }
}

/// [TecMap] is one TEC map decoded from an IONEX stream.
/// It is validated against its [Grid] when built and cannot
/// be modified afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TecMap {
    epoch: Epoch,
    height: f64,
    grid: Grid,
    exponent: i8,
    raw_tec: Vec<i32>,
    raw_rms: Option<Vec<i32>>,
    none_sentinel: Option<i32>,
}

impl TecMap {
    /// Builds a new [TecMap] from decoded fields.
    /// ## Inputs
    ///   - exponent: `EXPONENT` value, TEC = raw * 10^exponent
    ///   - epoch: epoch of this map
    ///   - latitude: (lat1, lat2, dlat) grid definition
    ///   - longitude: (lon1, lon2, dlon) grid definition
    ///   - height: height of this map, in km
    ///   - tec: raw TEC samples, copied in
    ///
    /// Fails with [Error::MapShape] when the grid does not describe
    /// exactly as many cells as there are samples.
    pub fn new(
        exponent: i8,
        epoch: Epoch,
        latitude: impl Into<Linspace>,
        longitude: impl Into<Linspace>,
        height: f64,
        tec: &[i32],
    ) -> Result<Self, Error> {
        let grid = Grid::new(latitude, longitude);
        if !grid.matches(tec.len()) {
            return Err(Error::MapShape {
                epoch,
                expected: grid.cells(),
                found: tec.len(),
            });
        }
        Ok(Self {
            epoch,
            height,
            grid,
            exponent,
            raw_tec: tec.to_vec(),
            raw_rms: None,
            none_sentinel: None,
        })
    }

    /// Copies and returns [Self] with raw RMS samples attached.
    /// They are stored as is and never decoded.
    pub fn with_raw_rms(&self, rms: &[i32]) -> Self {
        let mut s = self.clone();
        s.raw_rms = Some(rms.to_vec());
        s
    }

    /// Copies and returns [Self] where raw samples equal
    /// to `sentinel` are reported as missing values.
    pub fn with_none_sentinel(&self, sentinel: i32) -> Self {
        let mut s = self.clone();
        s.none_sentinel = Some(sentinel);
        s
    }

    /// Epoch of this map
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Height of this map, in km
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sampling [Grid] of this map
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Scaling exponent
    pub fn exponent(&self) -> i8 {
        self.exponent
    }

    /// Raw value that stands for "no data", if any
    pub fn none_sentinel(&self) -> Option<i32> {
        self.none_sentinel
    }

    /// Raw (unscaled) TEC samples, as stored in the file
    pub fn raw_tec(&self) -> &[i32] {
        &self.raw_tec
    }

    /// Raw (unscaled) RMS samples, if any were attached
    pub fn raw_rms(&self) -> Option<&[i32]> {
        self.raw_rms.as_deref()
    }

    /// Number of samples in this map
    pub fn len(&self) -> usize {
        self.raw_tec.len()
    }

    /// Returns true if this map has no samples
    pub fn is_empty(&self) -> bool {
        self.raw_tec.is_empty()
    }

    /// Returns scaled TEC values in grid order.
    /// Every value equal to the scaled none sentinel is reported as `None`.
    pub fn tec(&self) -> Vec<Option<f64>> {
        let none_value = self.none_sentinel.map(|k| scale(k, self.exponent));
        self.raw_tec
            .iter()
            .map(|raw| {
                let value = scale(*raw, self.exponent);
                match none_value {
                    Some(none_value) if value == none_value => None,
                    _ => Some(value),
                }
            })
            .collect()
    }

    /// RMS maps are not decoded: this always fails
    /// with [Error::RmsNotSupported].
    pub fn rms(&self) -> Result<Vec<Option<f64>>, Error> {
        Err(Error::RmsNotSupported)
    }

    /// Iterates (latitude, longitude, TEC) in grid order:
    /// latitude slices first, longitudes within each slice.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, Option<f64>)> + '_ {
        let width = (self.grid.longitude.cells().round() as usize).max(1);
        self.tec()
            .into_iter()
            .enumerate()
            .map(move |(nth, tec)| {
                let latitude = self.grid.latitude.coordinate(nth / width);
                let longitude = self.grid.longitude.coordinate(nth % width);
                (latitude, longitude, tec)
            })
    }
}

#[cfg(test)]
mod test {
    use super::{scale, TecMap};
    use crate::error::Error;
    use hifitime::Epoch;

    fn epoch() -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(2022, 1, 2)
    }

    #[test]
    fn scaling() {
        assert_eq!(scale(100, -1), 10.0);
        assert_eq!(scale(33, -1), 3.3);
        assert_eq!(scale(33, -2), 0.33);
        assert_eq!(scale(33, 0), 33.0);
        assert_eq!(scale(33, 2), 3300.0);
        assert_eq!(scale(-12, -1), -1.2);
    }

    #[test]
    fn single_cell() {
        let map = TecMap::new(-1, epoch(), (0.0, 0.0, 1.0), (0.0, 0.0, 1.0), 450.0, &[100])
            .unwrap();
        assert_eq!(map.tec(), vec![Some(10.0)]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.height(), 450.0);
        assert_eq!(map.epoch(), epoch());
        assert_eq!(map.none_sentinel(), None);
        assert!(map.raw_rms().is_none());
    }

    #[test]
    fn shape_mismatch() {
        let raw = vec![1; 6];
        let map = TecMap::new(-1, epoch(), (10.0, 0.0, -5.0), (0.0, 5.0, 5.0), 450.0, &raw);
        assert!(map.is_ok());

        match TecMap::new(-1, epoch(), (10.0, 0.0, -5.0), (0.0, 5.0, 5.0), 450.0, &raw[..5]) {
            Err(Error::MapShape {
                epoch: e,
                expected,
                found,
            }) => {
                assert_eq!(e, epoch());
                assert_eq!(expected, 6.0);
                assert_eq!(found, 5);
            },
            other => panic!("expecting a shape error, got {:?}", other),
        }
    }

    #[test]
    fn none_sentinel() {
        let map = TecMap::new(
            -1,
            epoch(),
            (0.0, 0.0, 1.0),
            (0.0, 15.0, 5.0),
            450.0,
            &[9999, 33, 9999, 9998],
        )
        .unwrap()
        .with_none_sentinel(9999);

        assert_eq!(map.none_sentinel(), Some(9999));
        assert_eq!(map.tec(), vec![None, Some(3.3), None, Some(999.8)]);
        assert_eq!(map.raw_tec(), &[9999, 33, 9999, 9998]);
    }

    #[test]
    fn rms_not_supported() {
        let map = TecMap::new(-1, epoch(), (0.0, 0.0, 1.0), (0.0, 0.0, 1.0), 450.0, &[1])
            .unwrap()
            .with_raw_rms(&[2]);
        assert_eq!(map.raw_rms(), Some(&[2][..]));
        assert!(matches!(map.rms(), Err(Error::RmsNotSupported)));
    }

    #[test]
    fn points() {
        let map = TecMap::new(
            -1,
            epoch(),
            (5.0, 0.0, -5.0),
            (-5.0, 5.0, 5.0),
            350.0,
            &[10, 20, 30, 40, 50, 9999],
        )
        .unwrap()
        .with_none_sentinel(9999);

        let points = map.points().collect::<Vec<_>>();
        assert_eq!(
            points,
            vec![
                (5.0, -5.0, Some(1.0)),
                (5.0, 0.0, Some(2.0)),
                (5.0, 5.0, Some(3.0)),
                (0.0, -5.0, Some(4.0)),
                (0.0, 0.0, Some(5.0)),
                (0.0, 5.0, None),
            ]
        );
    }
}

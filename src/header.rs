//! IONEX file header

use crate::{
    epoch::parse_utc,
    error::ParsingError,
    grid::{Grid, Linspace},
};

use hifitime::{Duration, Epoch};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Mapping function used when determining the TEC maps
pub enum MappingFunction {
    /// 1/cos(z)
    CosZ,
    /// Q-factor
    QFac,
}

impl FromStr for MappingFunction {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosz" => Ok(Self::CosZ),
            "qfac" => Ok(Self::QFac),
            _ => Err(ParsingError::MappingFunction(s.to_string())),
        }
    }
}

impl std::fmt::Display for MappingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::CosZ => write!(f, "Cos(z)"),
            Self::QFac => write!(f, "Q-factor"),
        }
    }
}

/// IONEX file [Header], everything between the
/// version line and `END OF HEADER`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Program that generated this file
    pub program: Option<String>,
    /// Agency that ran the program
    pub run_by: Option<String>,
    /// File creation date, stored as is
    pub date: Option<String>,
    /// Brief description of the technique or model
    pub description: Option<String>,
    /// Epoch of first map
    pub epoch_of_first_map: Option<Epoch>,
    /// Epoch of last map
    pub epoch_of_last_map: Option<Epoch>,
    /// Time between two maps. Zero means variable.
    pub interval: Option<Duration>,
    /// Number of TEC maps announced
    pub number_of_maps: Option<usize>,
    /// Mapping function, None means no mapping function (e.g altimetry)
    pub mapping: Option<MappingFunction>,
    /// Minimum elevation angle, in degrees
    pub elevation_cutoff: f64,
    /// Observables used, None means theoretical model
    pub observables: Option<String>,
    /// Number of contributing stations
    pub nb_stations: Option<u32>,
    /// Number of contributing satellites
    pub nb_satellites: Option<u32>,
    /// Mean earth radius or bottom of height grid, in km
    pub base_radius: f64,
    /// 2D (fixed height) or 3D maps
    pub map_dimension: u8,
    /// Height grid (HGT1, HGT2, DHGT), in km
    pub height: Linspace,
    /// Latitude / longitude grid every map is sampled on
    pub grid: Grid,
    /// Default scaling exponent of the maps
    pub exponent: i8,
    /// Header comments, stored as is
    pub comments: Vec<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            program: None,
            run_by: None,
            date: None,
            description: None,
            epoch_of_first_map: None,
            epoch_of_last_map: None,
            interval: None,
            number_of_maps: None,
            mapping: None,
            elevation_cutoff: 0.0,
            observables: None,
            nb_stations: None,
            nb_satellites: None,
            // Standard Earth radius [km]
            base_radius: 6371.0,
            // 2D by default
            map_dimension: 2,
            height: Linspace::default(),
            grid: Grid::default(),
            // files that omit the exponent are quantized to 0.1 TECu
            exponent: -1,
            comments: Vec::new(),
        }
    }
}

/// Returns trimmed `content[start..end]`, or None when this
/// column range is missing or blank.
fn column(content: &str, start: usize, end: usize) -> Option<&str> {
    let end = end.min(content.len());
    let field = content.get(start..end)?.trim();
    if field.is_empty() {
        None
    } else {
        Some(field)
    }
}

fn parse_number<T: FromStr>(field: &'static str, content: &str) -> Result<T, ParsingError> {
    content
        .trim()
        .parse::<T>()
        .map_err(|_| ParsingError::HeaderField(field, content.to_string()))
}

/// Parses a (start, end, spacing) grid definition (2X,3F6.1)
pub(crate) fn parse_linspace(content: &str) -> Result<Linspace, ParsingError> {
    let mut values = [0.0_f64; 3];
    for (nth, value) in values.iter_mut().enumerate() {
        let start = 2 + nth * 6;
        let field = column(content, start, start + 6)
            .ok_or_else(|| ParsingError::GridSpecs(content.to_string()))?;
        *value = field
            .parse::<f64>()
            .map_err(|_| ParsingError::GridSpecs(content.to_string()))?;
    }
    Ok(Linspace::new(values[0], values[1], values[2]))
}

/// Parses the scaling exponent of a header or map `EXPONENT` record
pub(crate) fn parse_exponent(content: &str) -> Result<i8, ParsingError> {
    content
        .trim()
        .parse::<i8>()
        .map_err(|_| ParsingError::Exponent(content.to_string()))
}

/// Accumulates header lines, then checks that
/// everything maps depend on was defined.
#[derive(Default)]
pub(crate) struct HeaderParser {
    header: Header,
    latitude: Option<Linspace>,
    longitude: Option<Linspace>,
}

impl HeaderParser {
    /// Interprets one labeled header line
    pub(crate) fn parse(&mut self, content: &str, marker: &str) -> Result<(), ParsingError> {
        let header = &mut self.header;
        let marker = marker.trim();

        if marker.starts_with("COMMENT") {
            header.comments.push(content.trim_end().to_string());
        } else if marker.starts_with("PGM / RUN BY / DATE") {
            header.program = column(content, 0, 20).map(String::from);
            header.run_by = column(content, 20, 40).map(String::from);
            header.date = column(content, 40, 60).map(String::from);
        } else if marker.starts_with("DESCRIPTION") {
            let line = content.trim();
            header.description = match header.description.take() {
                Some(description) => Some(format!("{} {}", description, line)),
                None => Some(line.to_string()),
            };
        } else if marker.starts_with("EPOCH OF FIRST MAP") {
            header.epoch_of_first_map = Some(parse_utc(content)?);
        } else if marker.starts_with("EPOCH OF LAST MAP") {
            header.epoch_of_last_map = Some(parse_utc(content)?);
        } else if marker.starts_with("INTERVAL") {
            let seconds = content
                .trim()
                .parse::<u32>()
                .map_err(|_| ParsingError::Interval(content.to_string()))?;
            header.interval = Some(Duration::from_seconds(seconds as f64));
        } else if marker.starts_with("# OF MAPS IN FILE") {
            header.number_of_maps = Some(parse_number("# OF MAPS IN FILE", content)?);
        } else if marker.starts_with("MAPPING FUNCTION") {
            let mapping = content.trim();
            header.mapping = if mapping.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(MappingFunction::from_str(mapping)?)
            };
        } else if marker.starts_with("ELEVATION CUTOFF") {
            header.elevation_cutoff = parse_number("ELEVATION CUTOFF", content)?;
        } else if marker.starts_with("OBSERVABLES USED") {
            let observables = content.trim();
            if !observables.is_empty() {
                header.observables = Some(observables.to_string());
            }
        } else if marker.starts_with("# OF STATIONS") {
            header.nb_stations = Some(parse_number("# OF STATIONS", content)?);
        } else if marker.starts_with("# OF SATELLITES") {
            header.nb_satellites = Some(parse_number("# OF SATELLITES", content)?);
        } else if marker.starts_with("BASE RADIUS") {
            header.base_radius = parse_number("BASE RADIUS", content)?;
        } else if marker.starts_with("MAP DIMENSION") {
            header.map_dimension = parse_number("MAP DIMENSION", content)?;
        } else if marker.starts_with("HGT1 / HGT2 / DHGT") {
            header.height = parse_linspace(content)?;
        } else if marker.starts_with("LAT1 / LAT2 / DLAT") {
            self.latitude = Some(parse_linspace(content)?);
        } else if marker.starts_with("LON1 / LON2 / DLON") {
            self.longitude = Some(parse_linspace(content)?);
        } else if marker.starts_with("EXPONENT") {
            header.exponent = parse_exponent(content)?;
        }
        // other records (DCBs, auxiliary data..) are not interpreted
        Ok(())
    }

    /// Concludes the header
    pub(crate) fn finish(self) -> Result<Header, ParsingError> {
        let latitude = self
            .latitude
            .ok_or(ParsingError::MissingGrid("LAT1 / LAT2 / DLAT"))?;
        let longitude = self
            .longitude
            .ok_or(ParsingError::MissingGrid("LON1 / LON2 / DLON"))?;
        Ok(Header {
            grid: Grid {
                latitude,
                longitude,
            },
            ..self.header
        })
    }
}

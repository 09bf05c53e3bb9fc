//! IONEX 1.0 reader

use crate::{
    epoch::parse_utc,
    error::{Error, ParsingError},
    header::{parse_exponent, Header, HeaderParser},
    map::TecMap,
    reader::Source,
    split_label,
};

use hifitime::Epoch;

#[cfg(feature = "log")]
use log::{debug, error, trace};

/// IONEX 1.0 "no value available" raw value
pub const NONE_VALUE: i32 = 9999;

pub(crate) fn is_new_tec_map(marker: &str) -> bool {
    marker.contains("START OF TEC MAP")
}

pub(crate) fn is_end_of_tec_map(marker: &str) -> bool {
    marker.contains("END OF TEC MAP")
}

pub(crate) fn is_end_of_file(marker: &str) -> bool {
    marker.contains("END OF FILE")
}

pub(crate) fn is_grid_specs(marker: &str) -> bool {
    marker.contains("LAT/LON1/LON2/DLON/H")
}

/// Parses the map height (F6.1 `H` column) of a
/// `LAT/LON1/LON2/DLON/H` record, validating the other columns.
fn parse_grid_specs(content: &str) -> Result<f64, ParsingError> {
    let mut fields = [0.0_f64; 5];
    for (nth, field) in fields.iter_mut().enumerate() {
        let start = 2 + nth * 6;
        let item = content
            .get(start..start + 6)
            .ok_or_else(|| ParsingError::Height(content.to_string()))?;
        *field = item
            .trim()
            .parse::<f64>()
            .map_err(|_| ParsingError::Height(content.to_string()))?;
    }
    Ok(fields[4])
}

/// Parses one line of TEC samples
fn parse_samples(line: &str, samples: &mut Vec<i32>) -> Result<(), ParsingError> {
    for item in line.split_ascii_whitespace() {
        let value = item
            .parse::<i32>()
            .map_err(|_| ParsingError::TecValue(item.to_string()))?;
        samples.push(value);
    }
    Ok(())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    /// Between maps: looking for the next TEC map
    AwaitingHeader,
    /// Within a TEC map, before its first grid record
    MapHeader,
    /// Within a TEC map, collecting samples
    Body,
    /// No more maps will be produced
    Exhausted,
}

/// Fields of the TEC map being decoded
#[derive(Debug, Default)]
struct PendingMap {
    epoch: Option<Epoch>,
    exponent: i8,
    height: Option<f64>,
    samples: Vec<i32>,
}

/// [V1Reader] decodes IONEX 1.0 streams, one [TecMap] per iteration.
/// The file header is consumed when the reader is built.
pub struct V1Reader<'a> {
    source: Source<'a>,
    header: Header,
    state: State,
    pending: PendingMap,
    buf: String,
}

impl<'a> V1Reader<'a> {
    /// Builds a new [V1Reader] from a [Source] positioned right after
    /// the version line. Parses the file header.
    pub(crate) fn new(mut source: Source<'a>) -> Result<Self, Error> {
        let mut buf = String::with_capacity(128);
        let mut parser = HeaderParser::default();

        loop {
            if !source.next_line(&mut buf)? {
                #[cfg(feature = "log")]
                error!("ionex v1: missing END OF HEADER");
                return Err(Error::UnexpectedEnd);
            }

            let (content, marker) = split_label(&buf);
            if marker.contains("END OF HEADER") {
                break;
            }
            parser.parse(content, marker)?;
        }

        let header = parser.finish()?;

        #[cfg(feature = "log")]
        debug!(
            "ionex v1: header complete, grid {:?}, exponent {}",
            header.grid, header.exponent
        );

        Ok(Self {
            source,
            header,
            state: State::AwaitingHeader,
            pending: PendingMap::default(),
            buf,
        })
    }

    /// Returns the file [Header]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Concludes pending map
    fn conclude(&mut self) -> Result<TecMap, Error> {
        let pending = std::mem::take(&mut self.pending);
        let epoch = pending.epoch.ok_or(ParsingError::MissingEpoch)?;
        let height = pending.height.unwrap_or(self.header.height.start);

        let map = TecMap::new(
            pending.exponent,
            epoch,
            self.header.grid.latitude,
            self.header.grid.longitude,
            height,
            &pending.samples,
        )?;

        #[cfg(feature = "log")]
        debug!("ionex v1: {} map ({} samples)", epoch, pending.samples.len());

        Ok(map.with_none_sentinel(NONE_VALUE))
    }

    /// Pulls lines until one [TecMap] is complete, or the stream ends.
    fn next_map(&mut self) -> Result<Option<TecMap>, Error> {
        if self.state == State::Exhausted {
            return Ok(None);
        }

        loop {
            if !self.source.next_line(&mut self.buf)? {
                return match self.state {
                    State::AwaitingHeader | State::Exhausted => {
                        self.state = State::Exhausted;
                        Ok(None)
                    },
                    State::MapHeader | State::Body => Err(Error::UnexpectedEnd),
                };
            }

            let (content, marker) = split_label(&self.buf);

            match self.state {
                State::AwaitingHeader => {
                    if is_new_tec_map(marker) {
                        self.pending = PendingMap {
                            exponent: self.header.exponent,
                            ..Default::default()
                        };
                        self.state = State::MapHeader;
                    } else if is_end_of_file(marker) {
                        self.state = State::Exhausted;
                        return Ok(None);
                    } else {
                        #[cfg(feature = "log")]
                        trace!("ionex v1: skipping \"{}\"", self.buf);
                    }
                },
                State::MapHeader | State::Body => {
                    if is_end_of_tec_map(marker) {
                        self.state = State::AwaitingHeader;
                        return self.conclude().map(Some);
                    } else if marker.contains("EPOCH OF CURRENT MAP") {
                        self.pending.epoch = Some(parse_utc(content)?);
                    } else if marker.contains("EXPONENT") {
                        self.pending.exponent = parse_exponent(content)?;
                    } else if is_grid_specs(marker) {
                        let height = parse_grid_specs(content)?;
                        if self.pending.height.is_none() {
                            self.pending.height = Some(height);
                        }
                        self.state = State::Body;
                    } else if marker.contains("COMMENT") {
                        continue;
                    } else if self.state == State::Body {
                        parse_samples(&self.buf, &mut self.pending.samples)?;
                    } else if !self.buf.trim().is_empty() {
                        return Err(
                            ParsingError::HeaderField("TEC MAP", self.buf.clone()).into()
                        );
                    }
                },
                State::Exhausted => return Ok(None),
            }
        }
    }
}

impl Iterator for V1Reader<'_> {
    type Item = Result<TecMap, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_map() {
            Ok(Some(map)) => Some(Ok(map)),
            Ok(None) => None,
            Err(e) => {
                #[cfg(feature = "log")]
                error!("ionex v1: {}", e);
                self.state = State::Exhausted;
                Some(Err(e))
            },
        }
    }
}

impl std::iter::FusedIterator for V1Reader<'_> {}

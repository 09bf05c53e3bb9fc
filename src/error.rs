use hifitime::Epoch;
use thiserror::Error;

/// Errors that may rise while decoding an IONEX stream.
/// Every one of them is fatal to the stream that raised it.
#[derive(Error, Debug)]
pub enum Error {
    /// Source ended before a required line, field or sample was available
    #[error("unexpected end of file")]
    UnexpectedEnd,
    /// First line does not describe an IONEX file
    #[error("unknown file type \"{0}\"")]
    UnknownFormat(String),
    /// First line declares a revision we have no reader for
    #[error("unsupported version: {0:.1}")]
    UnsupportedVersion(f64),
    /// Grid definition does not match the number of samples of this map
    #[error("grid definition does not match the map ({expected} cells, {found} samples): epoch {epoch}")]
    MapShape {
        epoch: Epoch,
        expected: f64,
        found: usize,
    },
    /// RMS maps are not decoded
    #[error("rms maps are not supported")]
    RmsNotSupported,
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed fields encountered in header or body lines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("failed to parse version from \"{0}\"")]
    Version(String),
    #[error("failed to parse exponent from \"{0}\"")]
    Exponent(String),
    #[error("failed to parse epoch from \"{0}\"")]
    Epoch(String),
    #[error("invalid grid specs \"{0}\"")]
    GridSpecs(String),
    #[error("failed to parse map height from \"{0}\"")]
    Height(String),
    #[error("failed to parse tec value \"{0}\"")]
    TecValue(String),
    #[error("unknown mapping function \"{0}\"")]
    MappingFunction(String),
    #[error("failed to parse interval from \"{0}\"")]
    Interval(String),
    #[error("failed to parse \"{0}\" from \"{1}\"")]
    HeaderField(&'static str, String),
    #[error("map is missing its epoch")]
    MissingEpoch,
    #[error("header is missing the \"{0}\" grid definition")]
    MissingGrid(&'static str),
}

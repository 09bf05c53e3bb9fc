//! Format identification and reader selection

use crate::{
    error::Error,
    header::Header,
    map::TecMap,
    reader::{Input, Source},
    v1::V1Reader,
    version::{parse_version, Revision},
};

use std::{io::BufRead, path::Path};

#[cfg(feature = "log")]
use log::{debug, error};

/// IONEX file type tag (column 20 of the first line)
pub const IONEX_TYPE: char = 'I';

/// Extracts (declared version, type tag) from the first line.
/// [Error::UnknownFormat] carries the type tag, empty when the line is too short.
pub(crate) fn identify(line: &str) -> Result<(f64, char), Error> {
    let file_type = line
        .chars()
        .nth(20)
        .ok_or_else(|| Error::UnknownFormat(String::new()))?;

    if file_type != IONEX_TYPE {
        return Err(Error::UnknownFormat(file_type.to_string()));
    }

    let version = line
        .get(0..8)
        .ok_or_else(|| Error::UnknownFormat(file_type.to_string()))?;

    let version = parse_version(version)?;
    Ok((version, file_type))
}

/// [Reader] is the stream of [TecMap]s decoded from an IONEX source,
/// one variant per registered [Revision].
/// It is forward only: decoding again means calling [open] again
/// on a fresh source.
pub enum Reader<'a> {
    /// IONEX 1.0
    V1(V1Reader<'a>),
}

impl Reader<'_> {
    /// Returns the [Revision] that was dispatched
    pub fn revision(&self) -> Revision {
        match self {
            Self::V1(_) => Revision::V1,
        }
    }

    /// Returns the file [Header]
    pub fn header(&self) -> &Header {
        match self {
            Self::V1(reader) => reader.header(),
        }
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<TecMap, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::V1(reader) => reader.next(),
        }
    }
}

impl std::iter::FusedIterator for Reader<'_> {}

/// Identifies the IONEX [Input] from its first line and returns
/// the [Reader] registered for its revision, positioned right
/// after that line.
///
/// Files opened from a path are closed when the [Reader] is dropped,
/// streams are borrowed and left open.
///
/// Fails with
///  - [Error::UnexpectedEnd] on empty input
///  - [Error::UnknownFormat] when this is not an IONEX file
///  - [Error::UnsupportedVersion] when this revision has no reader
pub fn open<'a>(input: impl Into<Input<'a>>) -> Result<Reader<'a>, Error> {
    let mut source = Source::open(input.into())?;

    let mut line = String::new();
    if !source.next_line(&mut line)? {
        #[cfg(feature = "log")]
        error!("ionex: empty input");
        return Err(Error::UnexpectedEnd);
    }

    let (version, _) = identify(&line)?;

    let revision = Revision::lookup(version).ok_or(Error::UnsupportedVersion(version))?;

    #[cfg(feature = "log")]
    debug!("ionex: revision {}", revision);

    match revision {
        Revision::V1 => Ok(Reader::V1(V1Reader::new(source)?)),
    }
}

/// Opens the IONEX file at `path`, see [open].
/// Files ending with .gz are decompressed on the fly
/// when compiled with the "flate2" feature.
pub fn from_path(path: impl AsRef<Path>) -> Result<Reader<'static>, Error> {
    open(Input::path(path))
}

/// Decodes the IONEX content of an already open `stream`, see [open].
pub fn from_reader<R: BufRead>(stream: &mut R) -> Result<Reader<'_>, Error> {
    open(Input::stream(stream))
}

#[cfg(test)]
mod test {
    use super::identify;
    use crate::error::{Error, ParsingError};

    #[test]
    fn version_type() {
        let (version, file_type) = identify(
            "     1.0            IONOSPHERE MAPS     GPS                 IONEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(version, 1.0);
        assert_eq!(file_type, 'I');

        let (version, _) = identify(
            "     1.1            IONOSPHERE MAPS     MIX                 IONEX VERSION / TYPE",
        )
        .unwrap();
        assert_eq!(version, 1.1);
    }

    #[test]
    fn unknown_format() {
        match identify(
            "     3.02           OBSERVATION DATA    M: MIXED            RINEX VERSION / TYPE",
        ) {
            Err(Error::UnknownFormat(tag)) => assert_eq!(tag, "O"),
            other => panic!("expecting unknown format, got {:?}", other),
        }
        match identify("     1.0") {
            Err(Error::UnknownFormat(tag)) => assert!(tag.is_empty()),
            other => panic!("expecting unknown format, got {:?}", other),
        }
    }

    #[test]
    fn malformed_version() {
        assert!(matches!(
            identify("     x.y            IONOSPHERE MAPS"),
            Err(Error::Parsing(ParsingError::Version(_)))
        ));
    }
}

//! Input sources: owned files and borrowed streams.
#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError, Read},
    path::{Path, PathBuf},
};

/// IONEX [Input]: either a path we open (and close) ourselves,
/// or a stream owned by the caller, which we read but never close.
pub enum Input<'a> {
    /// File path, opened and closed by the reader
    Path(PathBuf),
    /// Readable stream, positioned at the first line
    Stream(&'a mut dyn BufRead),
}

impl<'a> Input<'a> {
    /// Builds [Input] from a file path
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }
    /// Builds [Input] from an already open stream
    pub fn stream<R: BufRead>(stream: &'a mut R) -> Self {
        Self::Stream(stream)
    }
}

impl From<PathBuf> for Input<'_> {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Input<'_> {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

impl From<&str> for Input<'_> {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl<'a, R: BufRead> From<&'a mut R> for Input<'a> {
    fn from(stream: &'a mut R) -> Self {
        Self::stream(stream)
    }
}

/// Buffered file reader, with integrated .gz decompression.
pub enum BufferedReader {
    /// Readable (plain) file
    PlainFile(BufReader<File>),
    /// gzip compressed file
    #[cfg(feature = "flate2")]
    GzFile(BufReader<GzDecoder<File>>),
}

impl BufferedReader {
    /// Opens given file, with possible .gz decompression
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);

        let f = File::open(path)?;

        if gzip {
            #[cfg(feature = "flate2")]
            {
                Ok(Self::GzFile(BufReader::new(GzDecoder::new(f))))
            }
            #[cfg(not(feature = "flate2"))]
            {
                Err(IoError::new(
                    std::io::ErrorKind::Unsupported,
                    ".gz data requires the flate2 feature",
                ))
            }
        } else {
            Ok(Self::PlainFile(BufReader::new(f)))
        }
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        match self {
            Self::PlainFile(ref mut h) => h.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut h) => h.read(buf),
        }
    }
}

impl BufRead for BufferedReader {
    fn fill_buf(&mut self) -> Result<&[u8], IoError> {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.consume(s),
        }
    }
}

/// Line source a reader pulls from. Owned files are
/// closed when this is dropped, borrowed streams are left untouched.
pub(crate) enum Source<'a> {
    Owned(BufferedReader),
    Borrowed(&'a mut dyn BufRead),
}

impl<'a> Source<'a> {
    /// Opens the [Source] described by [Input]
    pub(crate) fn open(input: Input<'a>) -> std::io::Result<Self> {
        match input {
            Input::Path(path) => Ok(Self::Owned(BufferedReader::new(&path)?)),
            Input::Stream(stream) => Ok(Self::Borrowed(stream)),
        }
    }

    /// Reads next line into `buf`, without its termination.
    /// Returns false once the source is exhausted.
    pub(crate) fn next_line(&mut self, buf: &mut String) -> std::io::Result<bool> {
        buf.clear();
        let size = match self {
            Self::Owned(reader) => reader.read_line(buf)?,
            Self::Borrowed(reader) => reader.read_line(buf)?,
        };
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(size > 0)
    }
}

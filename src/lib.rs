//! IONEX (IONosphere map EXchange) file parser.
//!
//! IONEX files carry gridded Total Electron Content (TEC) maps.
//! [open] identifies the file revision from its first line and returns
//! a [Reader](dispatcher::Reader) which decodes one [TecMap](map::TecMap)
//! per iteration:
//!
//! ```no_run
//! let reader = ionex::from_path("CKMG0020.22I").unwrap();
//! for map in reader {
//!     let map = map.unwrap();
//!     println!("{}: {} samples @ {} km", map.epoch(), map.len(), map.height());
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dispatcher;
pub mod error;
pub mod grid;
pub mod header;
pub mod map;
pub mod reader;
pub mod v1;
pub mod version;

mod epoch;

#[cfg(test)]
mod tests;

pub use dispatcher::{from_path, from_reader, open};

pub mod prelude {
    pub use crate::dispatcher::{from_path, from_reader, open, Reader};
    pub use crate::error::{Error, ParsingError};
    pub use crate::grid::{Grid, Linspace};
    pub use crate::header::{Header, MappingFunction};
    pub use crate::map::TecMap;
    pub use crate::reader::Input;
    pub use crate::version::Revision;
    // Pub re-export
    pub use hifitime::{Duration, Epoch};
}

/// Splits an IONEX line into (content, label).
/// Labels start at column 60, lines without one
/// are returned as content with an empty label.
pub(crate) fn split_label(line: &str) -> (&str, &str) {
    if line.len() > 60 && line.is_char_boundary(60) {
        line.split_at(60)
    } else {
        (line, "")
    }
}

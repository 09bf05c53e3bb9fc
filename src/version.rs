//! IONEX revisions and their readers

use crate::error::ParsingError;

/// IONEX revisions we have a reader for.
/// Supporting a new revision means adding a variant here,
/// its entry in [REGISTRY], and its reader.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    /// IONEX 1.0
    V1,
}

/// Declared version to [Revision] registry
const REGISTRY: [(f64, Revision); 1] = [(1.0, Revision::V1)];

impl Revision {
    /// Returns the [Revision] registered for this declared version
    pub fn lookup(version: f64) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(declared, _)| *declared == version)
            .map(|(_, revision)| *revision)
    }

    /// Returns the declared version this [Revision] is registered for
    pub fn version(&self) -> f64 {
        REGISTRY
            .iter()
            .find(|(_, revision)| revision == self)
            .map(|(version, _)| *version)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.1}", self.version())
    }
}

/// Parses the version field (F8.1) of the first line
pub(crate) fn parse_version(content: &str) -> Result<f64, ParsingError> {
    content
        .trim()
        .parse::<f64>()
        .map_err(|_| ParsingError::Version(content.to_string()))
}

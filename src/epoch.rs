//! IONEX epoch description

use crate::error::ParsingError;
use hifitime::Epoch;

/// Parses an IONEX epoch description (`yyyy mm dd hh mm ss`, 6I6),
/// always expressed in UTC.
pub(crate) fn parse_utc(content: &str) -> Result<Epoch, ParsingError> {
    let mut fields = [0_u32; 6];
    let mut count = 0;

    for item in content.split_ascii_whitespace() {
        if count == fields.len() {
            return Err(ParsingError::Epoch(content.to_string()));
        }
        fields[count] = item
            .parse::<u32>()
            .map_err(|_| ParsingError::Epoch(content.to_string()))?;
        count += 1;
    }

    if count != fields.len() {
        return Err(ParsingError::Epoch(content.to_string()));
    }

    let [y, m, d, hh, mm, ss] = fields;
    if m == 0 || m > 12 || d == 0 || d > 31 || hh > 24 || mm > 59 || ss > 60 {
        return Err(ParsingError::Epoch(content.to_string()));
    }

    Epoch::maybe_from_gregorian_utc(y as i32, m as u8, d as u8, hh as u8, mm as u8, ss as u8, 0)
        .map_err(|_| ParsingError::Epoch(content.to_string()))
}

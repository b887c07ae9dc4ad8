use super::record::CrewRecord;
use crate::domain::crew::CrewMember;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads crew members from a roster CSV source.
///
/// Wraps `csv::Reader` and yields `Result<CrewMember>` per row: a CSV-level
/// failure or a bad money field surfaces as an error for that row without
/// stopping the stream. Whitespace is trimmed and record lengths are
/// flexible, so rows may leave trailing descriptive columns off entirely.
pub struct RosterReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RosterReader<R> {
    /// Creates a new `RosterReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts crew rows.
    pub fn members(self) -> impl Iterator<Item = Result<CrewMember>> {
        self.reader
            .into_deserialize::<CrewRecord>()
            .map(|result| result.map_err(LedgerError::from).and_then(CrewMember::try_from))
    }
}

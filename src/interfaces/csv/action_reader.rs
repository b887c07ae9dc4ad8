use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Hire,
    Unhire,
}

/// A user intent against one crew member.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Action {
    pub action: ActionKind,
    pub crew: u64,
}

/// Reads hire/unhire actions from a CSV source.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes actions.
    pub fn actions(self) -> impl Iterator<Item = Result<Action>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, crew\nhire, 1\nunhire, 1\nhire, 2";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<Action>> = reader.actions().collect();

        assert_eq!(results.len(), 3);
        assert_eq!(
            *results[0].as_ref().unwrap(),
            Action {
                action: ActionKind::Hire,
                crew: 1
            }
        );
        assert_eq!(results[1].as_ref().unwrap().action, ActionKind::Unhire);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "action, crew\nfire, 1";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<Action>> = reader.actions().collect();

        assert!(results[0].is_err());
    }
}

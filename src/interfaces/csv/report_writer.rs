use super::record::{CrewRecord, WalletRecord};
use crate::domain::crew::CrewMember;
use crate::domain::wallet::Wallet;
use crate::error::Result;
use std::io::Write;

/// Writes the final wallet and roster state as CSV.
///
/// The wallet row comes first, then the roster table, separated by a blank
/// line. Both tables use the same store-shaped records the readers accept,
/// so a report can be fed back in as a roster.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_report(&mut self, wallet: &Wallet, crew: &[CrewMember]) -> Result<()> {
        self.write_wallet(wallet)?;
        writeln!(self.writer)?;
        self.write_roster(crew)
    }

    fn write_wallet(&mut self, wallet: &Wallet) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        csv_writer.serialize(WalletRecord::from(wallet))?;
        csv_writer.flush()?;
        Ok(())
    }

    fn write_roster(&mut self, crew: &[CrewMember]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        for member in crew {
            csv_writer.serialize(CrewRecord::from(member))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

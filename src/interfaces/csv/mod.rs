pub mod action_reader;
pub mod record;
pub mod report_writer;
pub mod roster_reader;

use clap::Parser;
use crewledger::application::engine::HiringEngine;
use crewledger::application::runner::{HiringIntent, IntentOutcome, apply_intent};
use crewledger::domain::crew::CrewMember;
use crewledger::domain::money::{Money, MoneyFields};
use crewledger::domain::ports::{CrewStoreBox, WalletStoreBox};
use crewledger::domain::wallet::Wallet;
use crewledger::infrastructure::in_memory::{InMemoryCrewStore, InMemoryWalletStore};
#[cfg(feature = "storage-rocksdb")]
use crewledger::infrastructure::rocksdb::RocksDbStore;
use crewledger::interfaces::csv::action_reader::{ActionKind, ActionReader};
use crewledger::interfaces::csv::report_writer::ReportWriter;
use crewledger::interfaces::csv::roster_reader::RosterReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// The store holds exactly one wallet row.
const WALLET_ID: u64 = 1;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input actions CSV file (`action,crew` rows)
    actions: PathBuf,

    /// Roster CSV file used to seed the crew store
    #[arg(long)]
    roster: PathBuf,

    /// Initial wallet funds as GOLD[,SILVER[,COPPER]]
    #[arg(long, default_value = "0")]
    wallet: String,

    /// Path to persistent database (optional). If provided, uses RocksDB
    /// and only seeds it on first open.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let funds = parse_wallet_arg(&cli.wallet).into_diagnostic()?;

    // Seed roster; bad rows and duplicate ids are reported and skipped.
    let roster_file = File::open(&cli.roster).into_diagnostic()?;
    let mut members: Vec<CrewMember> = Vec::new();
    for row in RosterReader::new(roster_file).members() {
        match row {
            Ok(member) if members.iter().any(|m| m.id == member.id) => {
                eprintln!("Error reading crew row: duplicate crew id {}", member.id)
            }
            Ok(member) => members.push(member),
            Err(e) => eprintln!("Error reading crew row: {}", e),
        }
    }

    let engine = build_engine(&cli, funds, members)?;

    // Apply actions sequentially. Rejections and store failures are surfaced
    // per action; a partial transaction aborts the run because the store is
    // no longer consistent.
    let actions_file = File::open(&cli.actions).into_diagnostic()?;
    for action_result in ActionReader::new(actions_file).actions() {
        match action_result {
            Ok(action) => {
                let intent = match action.action {
                    ActionKind::Hire => HiringIntent::Hire(action.crew),
                    ActionKind::Unhire => HiringIntent::Unhire(action.crew),
                };
                match apply_intent(&engine, intent).await.into_diagnostic()? {
                    IntentOutcome::Applied(_) => {}
                    IntentOutcome::Skipped(e) => {
                        eprintln!("Action skipped for crew {}: {}", action.crew, e)
                    }
                    IntentOutcome::Failed(e) => eprintln!("Error processing action: {}", e),
                }
            }
            Err(e) => eprintln!("Error reading action: {}", e),
        }
    }

    // Output final state
    let wallet = engine.wallet().await.into_diagnostic()?;
    let roster = engine.roster().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&wallet, &roster).into_diagnostic()?;

    Ok(())
}

#[cfg_attr(not(feature = "storage-rocksdb"), allow(unused_variables))]
fn build_engine(cli: &Cli, funds: Money, members: Vec<CrewMember>) -> Result<HiringEngine> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        // Use persistent storage (RocksDB)
        let store = RocksDbStore::open(db_path).into_diagnostic()?;
        if store.needs_seeding().into_diagnostic()? {
            store
                .put_wallet(&Wallet::new(WALLET_ID, funds))
                .into_diagnostic()?;
            for member in &members {
                store.put_crew_member(member).into_diagnostic()?;
            }
        }

        let wallet_store: WalletStoreBox = Box::new(store.clone());
        let crew_store: CrewStoreBox = Box::new(store);
        return Ok(HiringEngine::new(wallet_store, crew_store));
    }

    // Use in-memory storage
    let wallet_store: WalletStoreBox =
        Box::new(InMemoryWalletStore::with_wallet(Wallet::new(WALLET_ID, funds)));
    let crew_store: CrewStoreBox = Box::new(InMemoryCrewStore::with_members(members));
    Ok(HiringEngine::new(wallet_store, crew_store))
}

fn parse_wallet_arg(raw: &str) -> crewledger::error::Result<Money> {
    let mut parts = raw.splitn(3, ',');
    MoneyFields {
        gold: parts.next().unwrap_or_default().to_string(),
        silver: parts.next().map(str::to_string),
        copper: parts.next().map(str::to_string),
    }
    .parse()
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quest_core::{ContentPack, InputJournal, ReplayResult, replay::replay_to_end};
use tools::logging::init_tracing;
use tracing::Level;

/// Replays a recorded input journal headlessly and prints the final state.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Fail unless the replay ends on this snapshot hash
    #[arg(long)]
    expect_hash: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing(Level::INFO);
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;
    tracing::info!(
        seed = journal.seed,
        inputs = journal.inputs.len(),
        build = %journal.build_id,
        "replaying journal"
    );

    let content = ContentPack::default();

    let result: ReplayResult = replay_to_end(&content, &journal)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {e}"))?;

    println!("Replay complete.");
    println!("Inputs applied: {}", result.inputs_applied);
    println!("Final phase: {:?}", result.final_phase);
    println!("Clock: {} ms", result.final_clock.as_millis());
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    if let Some(expected) = args.expect_hash
        && expected != result.final_snapshot_hash
    {
        bail!("snapshot hash {} does not match expected {expected}", result.final_snapshot_hash);
    }

    Ok(())
}

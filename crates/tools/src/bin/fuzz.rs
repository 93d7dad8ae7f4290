use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quest_core::state::MP_CAP;
use quest_core::{
    AdvanceStopReason, Command, ContentPack, Game, GameError, NullPresenter, Phase, Prompt,
    replay::replay_to_end,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::logging::init_tracing;
use tracing::Level;

/// Drives the battle engine with random inputs and checks state invariants.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maximum number of inputs to feed before stopping
    #[arg(short, long, default_value_t = 1000)]
    inputs: u32,
    /// Write the recorded journal here as JSON
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn check_invariants(game: &Game<NullPresenter>) -> Result<()> {
    let state = game.state();
    let player = &state.player;
    if player.hp > player.max_hp {
        bail!("hp {} above max {}", player.hp, player.max_hp);
    }
    if player.mp > MP_CAP {
        bail!("mp {} above cap {MP_CAP}", player.mp);
    }
    if let Some(enemy) = &state.enemy
        && enemy.hp > enemy.max_hp
    {
        bail!("{} hp {} above max {}", enemy.id, enemy.hp, enemy.max_hp);
    }
    if state.rush.is_some() && game.phase() != Phase::RushInProgress {
        bail!("rush still present in phase {:?}", game.phase());
    }
    if state.problem.is_some() && state.rush.is_none() {
        bail!("problem outstanding outside a rush");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing(Level::INFO);
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} inputs...", args.seed, args.inputs);
    let content = ContentPack::default();
    let mut game = Game::new(args.seed, content.clone(), NullPresenter);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    game.start_game().context("start_game")?;

    let mut inputs = 0;
    let mut encounters = 1;
    while inputs < args.inputs {
        let result = game.advance(50);

        match result.stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                println!("Finished with outcome {outcome:?} after {inputs} inputs");
                break;
            }
            AdvanceStopReason::Idle => {
                // Fled back to the title screen.
                game.start_game().context("restart after escape")?;
                encounters += 1;
            }
            AdvanceStopReason::AwaitingInput(Prompt::Command { prompt_id }) => {
                // Bias to attack
                let command = choose(
                    &mut rng,
                    &[Command::Attack, Command::Attack, Command::Spell, Command::Item, Command::Run],
                );
                match game.apply_command(prompt_id, command) {
                    Ok(()) | Err(GameError::InsufficientMp { .. }) => {}
                    Err(err) => bail!("{command} rejected at input {inputs}: {err}"),
                }
            }
            AdvanceStopReason::AwaitingInput(Prompt::Answer {
                prompt_id, problem, choices, ..
            }) => {
                if !choices.contains(&problem.answer) {
                    bail!("choices {choices:?} do not include the answer {}", problem.answer);
                }
                let value = choose(&mut rng, &choices);
                game.apply_answer(prompt_id, value)
                    .with_context(|| format!("answer rejected at input {inputs}"))?;
            }
            AdvanceStopReason::BudgetExhausted => {
                bail!("no input awaited after 50 steps (phase {:?})", game.phase());
            }
        }

        check_invariants(&game).with_context(|| format!("after input {inputs}"))?;
        inputs += 1;
    }

    let state = game.state();
    println!(
        "Reached level {} with {} exp over {encounters} starts, clock {} ms",
        state.player.level,
        state.player.exp,
        game.clock().as_millis()
    );

    game.advance(50);
    let replayed = replay_to_end(&content, game.journal())
        .map_err(|e| anyhow::anyhow!("Replay of the fuzz journal failed: {e}"))?;
    if replayed.final_snapshot_hash != game.snapshot_hash() {
        bail!(
            "replay diverged: live {} vs replay {}",
            game.snapshot_hash(),
            replayed.final_snapshot_hash
        );
    }
    println!("Replay verified. Snapshot Hash: {}", replayed.final_snapshot_hash);

    if let Some(path) = args.journal_out {
        let body = serde_json::to_string_pretty(game.journal())
            .context("Failed to serialize journal")?;
        fs::write(&path, body)
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    Ok(())
}

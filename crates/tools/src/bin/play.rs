use std::env;
use std::fs;
use std::io::{self, BufRead, Stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use quest_core::problem::CHOICE_COUNT;
use quest_core::{AdvanceStopReason, Command, Game, GameError, InputJournal, Prompt, RunOutcome};
use tools::config::{PACING_ENV, Pacing, PlayConfig};
use tools::logging::init_tracing;
use tools::seed::{generate_runtime_seed, resolve_seed};
use tools::terminal::TerminalPresenter;
use tracing::Level;

const STEPS_PER_ADVANCE: u32 = 64;

/// Play the math battle in the terminal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML play settings; missing file means defaults
    #[arg(short, long, default_value = "mathquest.toml")]
    config: PathBuf,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Save the input journal here on exit
    #[arg(long)]
    record: Option<PathBuf>,
    /// realtime, fast or off; overrides the config file
    #[arg(long)]
    pacing: Option<String>,
    /// Write the effective settings back to the config file before playing
    #[arg(long)]
    save_config: bool,
}

type TerminalGame = Game<TerminalPresenter<Stdout>>;

fn main() -> Result<()> {
    init_tracing(Level::WARN);
    let args = Args::parse();

    let config = PlayConfig::load_or_default(&args.config)?;
    let env_pacing = env::var(PACING_ENV).ok();
    let pacing = match args.pacing.as_deref() {
        Some(raw) => Pacing::parse(raw)
            .with_context(|| format!("Unknown pacing '{raw}': use realtime, fast or off"))?,
        None => config.resolve_pacing(env_pacing.as_deref()),
    };
    if args.save_config {
        let effective = effective_config(&config, pacing, args.seed);
        effective.write_atomic(&args.config)?;
        println!("Settings saved to {}", args.config.display());
    }
    let seed = resolve_seed(args.seed, config.seed, generate_runtime_seed());
    println!("Seed: {} ({})", seed.value(), seed.source());
    tracing::info!(seed = seed.value(), ?pacing, "starting terminal play");

    let presenter = TerminalPresenter::new(io::stdout(), pacing, config.typing_delay());
    let mut game = Game::new(seed.value(), config.content(), presenter);
    let played = run(&mut game);

    if let Some(path) = &args.record {
        write_journal(path, game.journal())?;
        println!("Journal saved to {}", path.display());
    }
    played
}

fn run(game: &mut TerminalGame) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let stop = game.advance(STEPS_PER_ADVANCE).stop_reason;
        if let Some(err) = game.presenter_mut().take_error() {
            return Err(err).context("Failed to write to the terminal");
        }

        match stop {
            AdvanceStopReason::BudgetExhausted => {}
            AdvanceStopReason::Idle => {
                game.presenter_mut().prompt("\nPress Enter to look for a fight, or q to quit: ");
                let Some(line) = next_line(&mut lines)? else { return Ok(()) };
                if line.trim().eq_ignore_ascii_case("q") {
                    return Ok(());
                }
                game.start_game().map_err(|e| anyhow::anyhow!("Could not start: {e}"))?;
            }
            AdvanceStopReason::Finished(outcome) => {
                let banner = match outcome {
                    RunOutcome::Defeat => "\nPlay again from the start? [y/N]: ",
                    RunOutcome::GameClear => "\nThanks for playing! Start a new game? [y/N]: ",
                };
                game.presenter_mut().prompt(banner);
                let Some(line) = next_line(&mut lines)? else { return Ok(()) };
                if !line.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                game.reset();
                game.start_game().map_err(|e| anyhow::anyhow!("Could not restart: {e}"))?;
            }
            AdvanceStopReason::AwaitingInput(Prompt::Command { prompt_id }) => {
                game.presenter_mut().prompt("> ");
                let Some(line) = next_line(&mut lines)? else { return Ok(()) };
                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        game.presenter_mut().prompt(&format!("{err}. Pick 1-4.\n"));
                        continue;
                    }
                };
                match game.apply_command(prompt_id, command) {
                    // The engine already explained the refusal and re-opened the menu.
                    Ok(()) | Err(GameError::InsufficientMp { .. }) => {}
                    Err(err) => tracing::warn!(%err, "command refused"),
                }
            }
            AdvanceStopReason::AwaitingInput(Prompt::Answer { prompt_id, choices, .. }) => {
                game.presenter_mut().prompt("? ");
                let Some(line) = next_line(&mut lines)? else { return Ok(()) };
                let Some(value) = pick_choice(&line, &choices) else {
                    game.presenter_mut().prompt(&format!("Pick 1-{CHOICE_COUNT}.\n"));
                    continue;
                };
                if let Err(err) = game.apply_answer(prompt_id, value) {
                    tracing::warn!(%err, "answer refused");
                }
            }
        }
    }
}

/// The file settings with command-line choices folded in.
fn effective_config(config: &PlayConfig, pacing: Pacing, cli_seed: Option<u64>) -> PlayConfig {
    PlayConfig { pacing, seed: cli_seed.or(config.seed), ..config.clone() }
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    lines.next().transpose().context("Failed to read from stdin")
}

/// Maps a 1-based menu position to the offered value.
fn pick_choice(raw: &str, choices: &[u32; CHOICE_COUNT]) -> Option<u32> {
    let index = raw.trim().trim_end_matches(')').parse::<usize>().ok()?;
    index.checked_sub(1).and_then(|index| choices.get(index)).copied()
}

fn write_journal(path: &Path, journal: &InputJournal) -> Result<()> {
    let body = serde_json::to_string_pretty(journal).context("Failed to serialize journal")?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, body)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move journal into place: {}", path.display()))?;
    Ok(())
}

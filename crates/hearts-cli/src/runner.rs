use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hearts_core::game::{Game, GameError, HandReport};
use hearts_core::model::deck::Deck;
use hearts_core::model::player::PlayerPosition;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig};

/// Plays independent hands described by a validated configuration.
pub struct HandRunner {
    config: SimConfig,
    outputs: Option<ResolvedOutputs>,
    master_seed: u64,
    logging_enabled: bool,
}

/// Result of one simulated hand.
pub struct HandOutcome {
    pub hand_index: usize,
    pub deal_seed: Option<u64>,
    pub game: Game,
}

/// Summary details returned after a run. Hands are streamed to the
/// callback and output files as they finish, so none are retained here.
#[derive(Debug)]
pub struct RunSummary {
    pub master_seed: u64,
    pub hands_played: usize,
    pub jsonl_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct HandLogRow<'a> {
    run_id: &'a str,
    hand_index: usize,
    #[serde(flatten)]
    report: HandReport,
}

/// Open JSONL and Markdown writers for one run.
struct OutputSink {
    jsonl: BufWriter<File>,
    summary: BufWriter<File>,
}

impl OutputSink {
    fn create(
        outputs: &ResolvedOutputs,
        run_id: &str,
        master_seed: u64,
    ) -> Result<Self, RunnerError> {
        ensure_parent(outputs.jsonl.parent())?;
        ensure_parent(outputs.summary_md.parent())?;

        let jsonl = BufWriter::new(File::create(&outputs.jsonl)?);
        let mut summary = BufWriter::new(File::create(&outputs.summary_md)?);
        summary.write_all(summary_header(run_id, master_seed).as_bytes())?;
        Ok(Self { jsonl, summary })
    }

    fn append(&mut self, run_id: &str, outcome: &HandOutcome) -> Result<(), RunnerError> {
        let row = HandLogRow {
            run_id,
            hand_index: outcome.hand_index,
            report: HandReport::capture(&outcome.game),
        };
        serde_json::to_writer(&mut self.jsonl, &row)?;
        self.jsonl.write_all(b"\n")?;
        self.jsonl.flush()?;
        self.summary.write_all(summary_row(outcome).as_bytes())?;
        Ok(())
    }

    fn finish(mut self) -> Result<(), RunnerError> {
        self.jsonl.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}

impl HandRunner {
    /// Build a runner; an unset deal seed is drawn at random here so the run
    /// can be reported and replayed.
    pub fn new(config: SimConfig, outputs: Option<ResolvedOutputs>) -> Self {
        let master_seed = config.deals.seed.unwrap_or_else(rand::random);
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            master_seed,
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        self.run_with(|_| {})
    }

    /// Play every configured hand. Each finished hand is appended to the
    /// optional JSONL and Markdown outputs, then handed to `on_hand` and
    /// dropped.
    pub fn run_with<F>(&self, mut on_hand: F) -> Result<RunSummary, RunnerError>
    where
        F: FnMut(&HandOutcome),
    {
        let run_id = self.config.run_id.as_str();
        let mut sink = self
            .outputs
            .as_ref()
            .map(|outputs| OutputSink::create(outputs, run_id, self.master_seed))
            .transpose()?;

        let mut rng = StdRng::seed_from_u64(self.master_seed);
        let mut hands_played = 0;
        for hand_index in 0..self.config.deals.hands {
            let deal_seed = rng.next_u64();
            let outcome = self.play_hand(hand_index, deal_seed)?;
            if let Some(sink) = sink.as_mut() {
                sink.append(run_id, &outcome)?;
            }
            on_hand(&outcome);
            hands_played += 1;
        }

        if let Some(sink) = sink {
            sink.finish()?;
        }

        Ok(RunSummary {
            master_seed: self.master_seed,
            hands_played,
            jsonl_path: self.outputs.as_ref().map(|outputs| outputs.jsonl.clone()),
            summary_path: self
                .outputs
                .as_ref()
                .map(|outputs| outputs.summary_md.clone()),
        })
    }

    fn play_hand(&self, hand_index: usize, deal_seed: u64) -> Result<HandOutcome, RunnerError> {
        let (mut game, deal_seed) = if self.config.deals.shuffle {
            (Game::with_seed(deal_seed)?, Some(deal_seed))
        } else {
            (Game::with_deck(Deck::standard())?, None)
        };
        game.play()?;

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            let scores = game.scores();
            event!(
                target: "hearts_cli::hand",
                Level::INFO,
                run_id = %self.config.run_id,
                hand_index = hand_index as u32,
                deal_seed = ?deal_seed,
                scores = ?scores.standings(),
                leader = %scores.leading_player()
            );
        }

        Ok(HandOutcome {
            hand_index,
            deal_seed,
            game,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Title and column header of the Markdown summary table.
pub fn summary_header(run_id: &str, master_seed: u64) -> String {
    let mut out = format!("# Hearts run `{run_id}`\n\nMaster seed: `{master_seed}`\n\n");
    out.push_str("| Hand | Deal seed |");
    for seat in PlayerPosition::LOOP {
        out.push_str(&format!(" {seat} |"));
    }
    out.push_str(" Low |\n|---:|---:|---:|---:|---:|---:|---|\n");
    out
}

/// One Markdown table row for a finished hand.
pub fn summary_row(outcome: &HandOutcome) -> String {
    let scores = outcome.game.scores();
    let seed = outcome
        .deal_seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "unshuffled".to_string());
    let mut out = format!("| {} | {seed} |", outcome.hand_index + 1);
    for points in scores.standings() {
        out.push_str(&format!(" {points} |"));
    }
    out.push_str(&format!(" {} |\n", scores.leading_player()));
    out
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DealConfig;

    fn config(hands: usize, shuffle: bool) -> SimConfig {
        SimConfig {
            deals: DealConfig {
                seed: Some(2024),
                hands,
                shuffle,
            },
            ..SimConfig::default()
        }
    }

    fn collect(runner: &HandRunner) -> (RunSummary, Vec<(Option<u64>, [u32; 4])>) {
        let mut seen = Vec::new();
        let summary = runner
            .run_with(|outcome| {
                assert!(outcome.game.is_complete());
                seen.push((outcome.deal_seed, *outcome.game.scores().standings()));
            })
            .expect("run");
        (summary, seen)
    }

    #[test]
    fn plays_the_requested_number_of_hands() {
        let (summary, seen) = collect(&HandRunner::new(config(3, true), None));
        assert_eq!(summary.master_seed, 2024);
        assert_eq!(summary.hands_played, 3);
        assert_eq!(seen.len(), 3);
        assert!(summary.jsonl_path.is_none());
        for (deal_seed, scores) in &seen {
            assert!(deal_seed.is_some());
            assert_eq!(scores.iter().sum::<u32>(), 26);
        }
    }

    #[test]
    fn hands_arrive_in_order() {
        let mut indices = Vec::new();
        HandRunner::new(config(5, true), None)
            .run_with(|outcome| indices.push(outcome.hand_index))
            .expect("run");
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn master_seed_makes_runs_reproducible() {
        let (_, first) = collect(&HandRunner::new(config(4, true), None));
        let (_, second) = collect(&HandRunner::new(config(4, true), None));
        assert_eq!(first, second);
        assert_ne!(first[0].0, first[1].0);
    }

    #[test]
    fn unshuffled_hands_have_fixed_scores() {
        let (summary, seen) = collect(&HandRunner::new(config(2, false), None));
        assert_eq!(summary.hands_played, 2);
        for (deal_seed, scores) in seen {
            assert_eq!(deal_seed, None);
            assert_eq!(scores, [26, 0, 0, 0]);
        }
    }

    #[test]
    fn summary_table_lists_each_hand() {
        let mut markdown = summary_header("fixed", 2024);
        HandRunner::new(config(1, false), None)
            .run_with(|outcome| markdown.push_str(&summary_row(outcome)))
            .expect("run");
        assert!(markdown.starts_with("# Hearts run `fixed`"));
        assert!(markdown.contains("Master seed: `2024`"));
        assert!(markdown.contains("| Hand | Deal seed | North | East | South | West | Low |"));
        assert!(markdown.ends_with("| 1 | unshuffled | 26 | 0 | 0 | 0 | East |\n"));
    }
}

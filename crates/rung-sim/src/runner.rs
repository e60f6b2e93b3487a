use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use rung_cards::House;
use rung_core::game::session::{Game, GameError, HANDS_PER_ROUND, NullHandPolicy};
use rung_core::model::outcome::{HandOutcome, OutcomeError};
use rung_core::model::player::PlayerError;
use rung_core::model::seat::Seat;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ResolvedOutputs, SimConfig, TrumpMode};
use crate::policy::ThrowPolicy;

/// Primary entry point for running seeded rounds of Rung.
pub struct SimRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    policy: ThrowPolicy,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("game: {0}")]
    Game(#[from] GameError),
    #[error("player: {0}")]
    Player(#[from] PlayerError),
    #[error("outcome: {0}")]
    Outcome(#[from] OutcomeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One JSONL row per resolved trick.
#[derive(Debug, Serialize)]
struct TrickLogRow {
    run_id: String,
    round_index: usize,
    hand_index: usize,
    round_seed: u64,
    trump: Option<String>,
    leader: String,
    cards: [String; 4],
    head: String,
    counted: bool,
}

impl SimRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            config,
            outputs,
            policy: ThrowPolicy,
        }
    }

    /// Play every configured round, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.rounds.seed.unwrap_or(0));
        let mut totals = [0u32; 4];
        let mut rows_written = 0usize;

        for round_index in 0..self.config.rounds.count {
            let round_seed = rng.next_u64();
            rows_written +=
                self.play_round(round_index, round_seed, &mut writer, &mut totals)?;
            event!(Level::INFO, round_index, round_seed, "round complete");
        }

        writer.flush()?;
        self.write_summary(&totals)?;

        Ok(RunSummary {
            rounds_played: self.config.rounds.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn trump_for(&self, round_index: usize) -> Option<House> {
        match self.config.trump.mode {
            TrumpMode::None => None,
            TrumpMode::Fixed => self.config.trump.house,
            TrumpMode::Rotate => Some(House::ALL[round_index % House::ALL.len()]),
        }
    }

    fn play_round(
        &self,
        round_index: usize,
        round_seed: u64,
        writer: &mut BufWriter<File>,
        totals: &mut [u32; 4],
    ) -> Result<usize, RunnerError> {
        let mut game = Game::with_seed_and_policy(
            round_seed,
            NullHandPolicy::at_indices(&self.config.rules.null_hands),
        );
        if self.config.rounds.shuffle_passes > 0 {
            game.shuffle_deck(self.config.rounds.shuffle_passes)?;
        }
        game.distribute_cards()?;

        let trump = self.trump_for(round_index);
        let mut rows = 0usize;

        // Hand 0: the two of clubs holder leads by arrangement.
        let (holder, at) =
            rung_dataset::two_of_clubs_holder(&game).expect("two of clubs is dealt");
        let mut leader = holder.seat();
        holder.throw_card(at)?;
        let mut seat = leader.next();
        while seat != leader {
            let follower = game.player(seat).clone();
            let index = self
                .policy
                .follow_index(&follower.cards_at_hand(), House::Club);
            follower.throw_card(index)?;
            seat = seat.next();
        }
        let outcome = game.play_hand(0, trump, Some(leader))?;
        rows += self.write_row(writer, round_index, 0, round_seed, trump, leader, &outcome)?;
        leader = outcome.head()?;

        for hand_index in 1..HANDS_PER_ROUND {
            let lead_player = game.player(leader).clone();
            let index = self.policy.lead_index(&lead_player.cards_at_hand(), trump);
            lead_player.throw_card(index)?;
            let lead_house = lead_player
                .card_on_table()
                .expect("card just thrown")
                .house;

            let mut seat = leader.next();
            while seat != leader {
                let follower = game.player(seat).clone();
                let at = self
                    .policy
                    .follow_index(&follower.cards_at_hand(), lead_house);
                follower.throw_card(at)?;
                seat = seat.next();
            }

            let outcome = game.play_hand(hand_index, trump, Some(leader))?;
            rows += self.write_row(
                writer,
                round_index,
                hand_index,
                round_seed,
                trump,
                leader,
                &outcome,
            )?;
            leader = outcome.head()?;
        }

        for seat in Seat::LOOP {
            totals[seat.index()] += game.hands_won_by(seat);
        }
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_row(
        &self,
        writer: &mut BufWriter<File>,
        round_index: usize,
        hand_index: usize,
        round_seed: u64,
        trump: Option<House>,
        leader: Seat,
        outcome: &HandOutcome,
    ) -> Result<usize, RunnerError> {
        let row = TrickLogRow {
            run_id: self.config.run_id.clone(),
            round_index,
            hand_index,
            round_seed,
            trump: trump.map(|house| house.as_str().to_string()),
            leader: leader.to_string(),
            cards: outcome.cards().map(|card| card.to_string()),
            head: outcome.head()?.to_string(),
            counted: !self.config.rules.null_hands.contains(&hand_index),
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        Ok(1)
    }

    fn write_summary(&self, totals: &[u32; 4]) -> Result<(), RunnerError> {
        let mut md = String::new();
        md.push_str(&format!("# Rung simulation '{}'\n\n", self.config.run_id));
        md.push_str(&format!(
            "Rounds played: {}\n\n",
            self.config.rounds.count
        ));
        md.push_str("| Seat | Hands won |\n");
        md.push_str("|------|-----------|\n");
        for seat in Seat::LOOP {
            md.push_str(&format!("| {seat} | {} |\n", totals[seat.index()]));
        }
        fs::write(&self.outputs.summary_md, md)?;
        Ok(())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

use rayon::prelude::*;

use crate::board::{BoardState, TOTAL_SPACES};
use crate::engine::{build_ruleset, MovementRule, Ruleset};
use crate::rng::GameRng;
use crate::ConfigError;

/// A single-token game driven move by move, accumulating landing counts
/// on its board. Owns the one RNG stream everything draws from.
pub struct Simulation {
    ruleset: Ruleset,
    board: BoardState,
    rule: Box<dyn MovementRule>,
    rng: GameRng,
}

impl Simulation {
    pub fn new(ruleset: Ruleset, seed: Option<u64>) -> Result<Simulation, ConfigError> {
        let mut rng = GameRng::new(seed);
        let rule = build_ruleset(ruleset, &mut rng)?;
        Ok(Simulation {
            ruleset,
            board: BoardState::new(),
            rule,
            rng,
        })
    }

    /// Roll two dice and move the token once.
    pub fn step(&mut self) {
        let roll1 = self.rng.roll_die();
        let roll2 = self.rng.roll_die();
        self.apply_roll(roll1, roll2);
    }

    /// Move the token with a known roll and record the landing. A result
    /// off the board is a defect in the rule chain, not a data condition,
    /// so it aborts with the offending inputs.
    pub fn apply_roll(&mut self, roll1: i32, roll2: i32) {
        let old = self.board.position();
        let next = self
            .rule
            .next_position(old, roll1, roll2, &mut self.board, &mut self.rng);
        assert!(
            next < TOTAL_SPACES,
            "{:?} rules moved the token from {} to {} on a roll of ({}, {})",
            self.ruleset,
            old,
            next,
            roll1,
            roll2
        );
        self.board.set_position(next);
        self.board.record_visit(next);
    }

    /// Play `trials` games of `moves_per_trial` rolls each, then average
    /// the landing counts over the trials.
    pub fn run_trials(&mut self, trials: u64, moves_per_trial: u64) -> Result<(), ConfigError> {
        self.run_trials_raw(trials, moves_per_trial)?;
        self.board.average_over(trials);
        Ok(())
    }

    /// Accumulate raw counts without the final averaging division.
    fn run_trials_raw(&mut self, trials: u64, moves_per_trial: u64) -> Result<(), ConfigError> {
        if trials == 0 {
            return Err(ConfigError::Trials);
        }
        if moves_per_trial == 0 {
            return Err(ConfigError::Moves);
        }
        for _ in 0..trials {
            self.board.begin_trial();
            self.rule.begin_trial();
            for _ in 0..moves_per_trial {
                self.step();
            }
        }
        Ok(())
    }

    pub fn snapshot_counts(&self) -> Vec<f64> {
        self.board.counts()
    }

    pub fn visitation_fraction(&self, space: usize) -> f64 {
        self.board.visit_fraction(space)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn into_board(self) -> BoardState {
        self.board
    }
}

/// Split the trials across `workers` independent engines, each with its
/// own RNG stream (worker `w` draws from `seed + w`), then sum the raw
/// counts and normalize. The result is reproducible for a fixed
/// (seed, workers) pair no matter how rayon schedules the work.
pub fn run_trials_parallel(
    ruleset: Ruleset,
    seed: Option<u64>,
    workers: usize,
    trials: u64,
    moves_per_trial: u64,
) -> Result<BoardState, ConfigError> {
    if trials == 0 {
        return Err(ConfigError::Trials);
    }
    if moves_per_trial == 0 {
        return Err(ConfigError::Moves);
    }
    let workers = (workers.max(1) as u64).min(trials) as usize;
    let share = trials / workers as u64;
    let extra = trials % workers as u64;

    let boards = (0..workers)
        .into_par_iter()
        .map(|worker| -> Result<BoardState, ConfigError> {
            let worker_trials = share + u64::from((worker as u64) < extra);
            let worker_seed = seed.map(|seed| seed.wrapping_add(worker as u64));
            let mut sim = Simulation::new(ruleset, worker_seed)?;
            sim.run_trials_raw(worker_trials, moves_per_trial)?;
            Ok(sim.into_board())
        })
        .collect::<Result<Vec<BoardState>, ConfigError>>()?;

    let mut merged = BoardState::new();
    for board in &boards {
        merged.absorb(board);
    }
    merged.average_over(trials);
    Ok(merged)
}

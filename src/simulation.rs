use std::{
    fmt::Display,
    io::{self, Write},
    sync::Mutex,
};

use hashbrown::HashMap;
use rand::{SeedableRng, rngs::StdRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;
use tracing::info;

use crate::trouble::{Color, DiceMode, Game, GameError, StrategyKind, seat_players};

/// Games between two progress lines.
const PROGRESS_EVERY: u64 = 1000;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: u64,
    pub dice: DiceMode,
    /// Strategy for each seat, in color order.
    pub lineup: [StrategyKind; 4],
    /// Base seed; game `i` is seeded with `seed + i`. Random when `None`.
    pub seed: Option<u64>,
    /// Abort a game that has no winner after this many rounds.
    pub round_limit: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 10,
            dice: DiceMode::Mechanism,
            lineup: StrategyKind::DEFAULT_LINEUP,
            seed: None,
            round_limit: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("game {game} had no winner after {rounds} rounds")]
    RoundLimit { game: u64, rounds: u32 },
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),
}

/// Shared output for finished games: one winner name per line, in the
/// order the games complete.
pub struct WinnerSink<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> WinnerSink<W> {
    pub fn new(out: W) -> Self {
        WinnerSink { out: Mutex::new(out) }
    }

    pub fn record(&self, winner: Color) -> io::Result<()> {
        let mut out = self.out.lock().map_err(|_| io::Error::other("winner sink lock poisoned"))?;
        writeln!(out, "{}", winner.name())
    }

    pub fn into_inner(self) -> io::Result<W> {
        let mut out = self.out.into_inner().map_err(|_| io::Error::other("winner sink lock poisoned"))?;
        out.flush()?;
        Ok(out)
    }
}

/// Wins per color over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    wins: HashMap<Color, u64>,
    games: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, winner: Color) {
        *self.wins.entry(winner).or_insert(0) += 1;
        self.games += 1;
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn wins(&self, color: Color) -> u64 {
        self.wins.get(&color).copied().unwrap_or(0)
    }

    /// Share of games won by `color`, in percent.
    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins(color) as f64 / self.games as f64 * 100.0
        }
    }
}

impl FromIterator<Color> for Tally {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for winner in iter {
            tally.record(winner);
        }
        tally
    }
}

impl Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Games: {}", self.games)?;
        for color in Color::ALL {
            writeln!(
                f,
                "{:>6} Wins: {}, Win Rate: {:.2}%",
                color.name(),
                self.wins(color),
                self.win_rate(color)
            )?;
        }
        Ok(())
    }
}

/// Plays `config.games` independent games in parallel, writing each winner
/// to `sink` as soon as its game finishes.
pub fn run_batch<W: Write + Send>(config: &SimulationConfig, sink: &WinnerSink<W>) -> Result<Tally, SimulationError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(games = config.games, dice = ?config.dice, lineup = ?config.lineup, seed, "starting simulation");

    let winners = (0..config.games)
        .into_par_iter()
        .map(|game| {
            if game % PROGRESS_EVERY == 0 {
                info!("{game}...");
            }
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(game));
            let mut state = Game::new(seat_players(config.lineup), config.dice);
            let winner = match state.play(&mut rng, config.round_limit) {
                Ok(winner) => winner,
                Err(GameError::RoundLimit { rounds }) => return Err(SimulationError::RoundLimit { game, rounds }),
            };
            sink.record(winner)?;
            Ok(winner)
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

    Ok(winners.into_iter().collect())
}

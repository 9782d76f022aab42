use clap::ValueEnum;

use crate::trouble::{Action, Board, Color, MAX_ROLL, MoveResult, TRACK_LEN};

/// A move-selection policy. Implementations only look at the board; the
/// chosen action is applied by [`Player::play`].
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Picks a legal action for `color` with `roll`, or `None` if there is nothing to do.
    fn decide(&self, board: &Board, color: Color, roll: u8) -> Option<Action>;
}

/// Enters a piece from base if the roll allows it and the start cell is free
/// of own pieces.
fn try_enter(board: &Board, color: Color, roll: u8) -> Option<Action> {
    (roll == MAX_ROLL && board.resolve(color, Action::Enter, roll).is_legal()).then_some(Action::Enter)
}

/// First own piece in `order` that can legally advance by `roll`.
fn first_legal(board: &Board, color: Color, roll: u8, order: impl IntoIterator<Item = usize>) -> Option<Action> {
    order
        .into_iter()
        .map(Action::Advance)
        .find(|&action| board.resolve(color, action, roll).is_legal())
}

/// Track cells from the start cell forwards around the whole lap.
fn forward_from_start(color: Color) -> impl Iterator<Item = usize> {
    let start = color.start();
    (0..TRACK_LEN).map(move |i| (start + i) % TRACK_LEN)
}

/// Moves the piece closest to finishing its lap, falling back to entering
/// from base on a maximal roll.
pub fn first_mover(board: &Board, color: Color, roll: u8) -> Option<Action> {
    let mut pieces: Vec<usize> = board.pieces(color).collect();
    pieces.sort_by_key(|&pos| color.distance_to_start(pos));

    first_legal(board, color, roll, pieces).or_else(|| try_enter(board, color, roll))
}

/// Always advances the piece nearest to home.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMover;

impl Strategy for FirstMover {
    fn name(&self) -> &'static str {
        "first-mover"
    }

    fn decide(&self, board: &Board, color: Color, roll: u8) -> Option<Action> {
        first_mover(board, color, roll)
    }
}

/// Always advances the piece that has travelled the least.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastMover;

impl Strategy for LastMover {
    fn name(&self) -> &'static str {
        "last-mover"
    }

    fn decide(&self, board: &Board, color: Color, roll: u8) -> Option<Action> {
        first_legal(board, color, roll, forward_from_start(color)).or_else(|| try_enter(board, color, roll))
    }
}

/// Captures whenever possible, otherwise plays like [`FirstMover`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Eater;

impl Strategy for Eater {
    fn name(&self) -> &'static str {
        "eater"
    }

    fn decide(&self, board: &Board, color: Color, roll: u8) -> Option<Action> {
        if roll == MAX_ROLL
            && board.resolve(color, Action::Enter, roll).captured().is_some()
        {
            return Some(Action::Enter);
        }

        forward_from_start(color)
            .map(Action::Advance)
            .find(|&action| board.resolve(color, action, roll).captured().is_some())
            .or_else(|| first_mover(board, color, roll))
    }
}

/// Enters on every maximal roll, otherwise moves the first piece found on the track.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMover;

impl Strategy for RandomMover {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(&self, board: &Board, color: Color, roll: u8) -> Option<Action> {
        try_enter(board, color, roll).or_else(|| first_legal(board, color, roll, 0..TRACK_LEN))
    }
}

/// Selectable strategies for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum StrategyKind {
    First,
    Last,
    Eater,
    Random,
}

impl StrategyKind {
    /// Red moves first-piece, Purple last-piece, White eats, Blue plays randomly.
    pub const DEFAULT_LINEUP: [StrategyKind; 4] =
        [StrategyKind::First, StrategyKind::Last, StrategyKind::Eater, StrategyKind::Random];

    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::First => Box::new(FirstMover),
            StrategyKind::Last => Box::new(LastMover),
            StrategyKind::Eater => Box::new(Eater),
            StrategyKind::Random => Box::new(RandomMover),
        }
    }
}

/// A seat at the table: a color and the strategy playing it.
pub struct Player {
    color: Color,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(color: Color, strategy: Box<dyn Strategy>) -> Self {
        Player { color, strategy }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Lets the strategy pick an action and applies it. Returns `None` if
    /// no legal action exists, in which case the board is untouched.
    pub fn play(&self, board: &mut Board, roll: u8) -> Option<MoveResult> {
        let action = self.strategy.decide(board, self.color, roll)?;
        let result = board.apply(self.color, action, roll);
        debug_assert!(result.is_legal(), "{} chose illegal {action:?}", self.strategy.name());
        Some(result)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({}, {})", self.color, self.strategy.name())
    }
}

/// One player per color in seat order, playing `lineup`.
pub fn seat_players(lineup: [StrategyKind; 4]) -> [Player; 4] {
    Color::ALL.map(|color| Player::new(color, lineup[color.idx()].build()))
}

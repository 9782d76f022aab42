use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::trouble::{Board, Color, DiceMode, MAX_ROLL, MoveResult, Player};

/// Where the game loop stands between two rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// `player` rolls next; `previous` is the face showing before the roll.
    Turn { player: Color, previous: u8 },
    Won(Color),
}

/// Record of one roll and what the active player did with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub round: u32,
    pub player: Color,
    pub roll: u8,
    /// `None` if the player had no legal action.
    pub result: Option<MoveResult>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no winner after {rounds} rounds")]
    RoundLimit { rounds: u32 },
}

/// One game: a board, four seated players and the dice they share.
pub struct Game {
    board: Board,
    players: [Player; 4],
    dice: DiceMode,
    state: GameState,
    round: u32,
}

impl Game {
    /// `players` must be seated in color order (Red, Purple, White, Blue).
    pub fn new(players: [Player; 4], dice: DiceMode) -> Self {
        for (player, color) in players.iter().zip(Color::ALL) {
            assert_eq!(player.color(), color, "players must be seated in color order");
        }
        Game {
            board: Board::new(),
            players,
            dice,
            state: GameState::Turn { player: Color::Red, previous: 1 },
            round: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::Won(color) => Some(color),
            GameState::Turn { .. } => None,
        }
    }

    /// Rolls for the active player, lets them act and checks for a win.
    /// A six keeps the turn with the same player; otherwise the next seat
    /// rolls, starting again from a showing face of 1.
    ///
    /// Panics if the game is already won.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Turn {
        let GameState::Turn { player: color, previous } = self.state else {
            panic!("game is already over");
        };

        let roll = self.dice.roll(previous, rng);
        let player = &self.players[color.idx()];
        let result = player.play(&mut self.board, roll);

        debug!(round = self.round, player = %color, roll, ?result, "turn");
        debug!("\n{}", self.board);

        let turn = Turn { round: self.round, player: color, roll, result };

        self.state = if self.board.has_won(color) {
            debug!(winner = %color, strategy = player.strategy_name(), rounds = self.round, "game over");
            GameState::Won(color)
        } else if roll == MAX_ROLL {
            GameState::Turn { player: color, previous: roll }
        } else {
            let next = color.next();
            if next == Color::Red {
                self.round += 1;
            }
            GameState::Turn { player: next, previous: 1 }
        };

        turn
    }

    /// Plays until someone fills their home stretch. With `round_limit`
    /// set, gives up once that many full rounds passed without a winner.
    pub fn play<R: Rng>(&mut self, rng: &mut R, round_limit: Option<u32>) -> Result<Color, GameError> {
        loop {
            if let Some(winner) = self.winner() {
                return Ok(winner);
            }
            if round_limit.is_some_and(|limit| self.round >= limit) {
                return Err(GameError::RoundLimit { rounds: self.round });
            }
            self.step(rng);
        }
    }
}

/// Plays a single game to completion and returns the winner.
pub fn run_game<R: Rng>(players: [Player; 4], dice: DiceMode, rng: &mut R) -> Color {
    let mut game = Game::new(players, dice);
    loop {
        game.step(rng);
        if let Some(winner) = game.winner() {
            return winner;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::trouble::{StrategyKind, seat_players};

    fn random_players() -> [Player; 4] {
        seat_players([StrategyKind::Random; 4])
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new(random_players(), DiceMode::Uniform);
        assert_eq!(game.state(), GameState::Turn { player: Color::Red, previous: 1 });
        assert_eq!(game.round(), 0);
        assert_eq!(game.winner(), None);
    }

    #[test]
    #[should_panic]
    fn test_players_out_of_order() {
        let [red, purple, white, blue] = random_players();
        Game::new([purple, red, white, blue], DiceMode::Uniform);
    }

    #[test]
    fn test_turn_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = Game::new(random_players(), DiceMode::Mechanism);

        for _ in 0..500 {
            let before = game.state();
            let turn = game.step(&mut rng);
            let GameState::Turn { player, .. } = before else { unreachable!() };
            assert_eq!(turn.player, player);

            match game.state() {
                GameState::Won(winner) => {
                    assert_eq!(winner, turn.player);
                    break;
                }
                GameState::Turn { player: next, previous } if turn.roll == MAX_ROLL => {
                    assert_eq!(next, turn.player);
                    assert_eq!(previous, MAX_ROLL);
                }
                GameState::Turn { player: next, previous } => {
                    assert_eq!(next, turn.player.next());
                    assert_eq!(previous, 1);
                }
            }
        }
    }

    #[test]
    fn test_round_counter() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = Game::new(random_players(), DiceMode::Uniform);
        let mut wraps = 0;
        while game.winner().is_none() && wraps < 20 {
            let turn = game.step(&mut rng);
            if turn.player == Color::Blue && turn.roll != MAX_ROLL && game.winner().is_none() {
                wraps += 1;
                assert_eq!(game.round(), wraps);
            }
        }
    }

    #[test]
    fn test_game_terminates() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut game = Game::new(random_players(), DiceMode::Uniform);
        let winner = game.play(&mut rng, Some(2_000)).unwrap();

        assert!(game.round() < 2_000);
        assert_eq!(game.state(), GameState::Won(winner));
        assert_eq!(game.board().home_count(winner), 4);
        for color in Color::ALL.into_iter().filter(|&c| c != winner) {
            assert!(!game.board().has_won(color));
        }
    }

    #[test]
    fn test_round_limit() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::new(random_players(), DiceMode::Uniform);
        assert_eq!(game.play(&mut rng, Some(3)), Err(GameError::RoundLimit { rounds: 3 }));
        assert_eq!(game.round(), 3);
    }

    #[test]
    #[should_panic]
    fn test_step_after_win() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::new(random_players(), DiceMode::Uniform);
        game.play(&mut rng, None).unwrap();
        game.step(&mut rng);
    }

    #[test]
    fn test_run_game_is_reproducible() {
        let play = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            run_game(seat_players(StrategyKind::DEFAULT_LINEUP), DiceMode::Mechanism, &mut rng)
        };
        for seed in 0..10 {
            assert_eq!(play(seed), play(seed));
        }
    }
}

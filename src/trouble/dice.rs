use clap::ValueEnum;
use rand::Rng;

/// Highest face. Rolling it lets a piece enter from base and grants another roll.
pub const MAX_ROLL: u8 = 6;

/// Chance that the bubble flips the die onto the face opposite the previous roll.
pub const OPPOSITE_BIAS: f64 = 0.239;

/// Chance that the die does not turn over and repeats the previous roll.
pub const REPEAT_BIAS: f64 = 0.108;

/// Faces touching each face of a physical die, i.e. everything except the
/// face itself and its opposite (`7 - face`).
const ADJACENT: [[u8; 4]; 6] = [
    [2, 3, 4, 5], // 1
    [1, 3, 4, 6], // 2
    [1, 2, 5, 6], // 3
    [1, 2, 5, 6], // 4
    [1, 3, 4, 6], // 5
    [2, 3, 4, 5], // 6
];

/// How the next roll is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DiceMode {
    /// Fair six-sided die.
    Uniform,
    /// Pop-o-matic bubble: the outcome depends on the face showing before the press.
    #[default]
    Mechanism,
}

impl DiceMode {
    /// Rolls a value in `1..=6`. `previous` is the face left showing by the
    /// last roll (1 before any roll) and only matters in mechanism mode.
    pub fn roll<R: Rng>(&self, previous: u8, rng: &mut R) -> u8 {
        match self {
            DiceMode::Uniform => rng.random_range(1..=MAX_ROLL),
            DiceMode::Mechanism => {
                assert!((1..=MAX_ROLL).contains(&previous), "previous roll {previous} is not a face");
                let r: f64 = rng.random();
                if r < OPPOSITE_BIAS {
                    7 - previous
                } else if r > 1.0 - REPEAT_BIAS {
                    previous
                } else {
                    ADJACENT[previous as usize - 1][rng.random_range(0..4)]
                }
            }
        }
    }
}

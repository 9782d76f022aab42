use std::fmt::Display;

use crate::trouble::{Color, PIECES, PLAYERS, TRACK_LEN, color::SEGMENT_LEN};

/// Slots in each color's home stretch.
pub const HOME_LEN: usize = 4;

/// Something a player can do with a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Bring a piece from base onto the color's start cell. Only offered on a maximal roll.
    Enter,
    /// Move the piece standing on the given track cell forward by the roll.
    Advance(usize),
}

/// What an [`Action`] does (or would do) to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The piece lands on track cell `to`, evicting `captured` back to its base.
    Track { to: usize, captured: Option<Color> },
    /// The piece finished its lap and rests in home slot `slot`.
    Home { slot: usize },
    /// The target cell already holds a piece of the same color.
    Blocked,
    /// Entry was requested with no piece left in base.
    NoReserve,
    /// The source cell does not hold a piece of the moving color.
    NotOwned,
}

impl MoveResult {
    pub fn is_legal(&self) -> bool {
        matches!(self, MoveResult::Track { .. } | MoveResult::Home { .. })
    }

    pub fn captured(&self) -> Option<Color> {
        match self {
            MoveResult::Track { captured, .. } => *captured,
            _ => None,
        }
    }
}

/// Every piece position of one game: the shared circular track, the private
/// home stretches and the pieces still waiting in base.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    track: [Option<Color>; TRACK_LEN],
    home: [[bool; HOME_LEN]; PLAYERS],
    base: [u8; PLAYERS],
}

impl Board {
    /// Empty track and home stretches, all pieces in base.
    pub fn new() -> Self {
        Board {
            track: [None; TRACK_LEN],
            home: [[false; HOME_LEN]; PLAYERS],
            base: [PIECES; PLAYERS],
        }
    }

    pub fn color_at(&self, pos: usize) -> Option<Color> {
        self.track[pos]
    }

    pub fn is_occupied(&self, pos: usize) -> bool {
        self.track[pos].is_some()
    }

    pub fn base(&self, color: Color) -> u8 {
        self.base[color.idx()]
    }

    pub fn home(&self, color: Color) -> &[bool; HOME_LEN] {
        &self.home[color.idx()]
    }

    pub fn home_count(&self, color: Color) -> u8 {
        self.home(color).iter().filter(|&&filled| filled).count() as u8
    }

    pub fn track_count(&self, color: Color) -> u8 {
        self.pieces(color).count() as u8
    }

    /// Track cells holding a piece of `color`, in index order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        (0..TRACK_LEN).filter(move |&pos| self.track[pos] == Some(color))
    }

    pub fn has_won(&self, color: Color) -> bool {
        self.home(color).iter().all(|&filled| filled)
    }

    /// Works out what `action` would do for `color` with `roll`, without touching the board.
    pub fn resolve(&self, color: Color, action: Action, roll: u8) -> MoveResult {
        match action {
            Action::Enter => {
                if self.base(color) == 0 {
                    return MoveResult::NoReserve;
                }
                self.land(color, color.start())
            }
            Action::Advance(pos) => {
                if self.track[pos] != Some(color) {
                    return MoveResult::NotOwned;
                }
                let steps = roll as usize;
                let start = color.start();
                let finalpos = (pos + steps) % TRACK_LEN;

                // The lap remainder picks the home slot. Landing exactly on the
                // start cell or overshooting the stretch keeps the piece on the track.
                if finalpos > start {
                    let diff = finalpos - start;
                    if diff < steps && (1..=HOME_LEN).contains(&diff) && !self.home(color)[diff - 1] {
                        return MoveResult::Home { slot: diff - 1 };
                    }
                }
                self.land(color, finalpos)
            }
        }
    }

    fn land(&self, color: Color, to: usize) -> MoveResult {
        match self.track[to] {
            None => MoveResult::Track { to, captured: None },
            Some(other) if other == color => MoveResult::Blocked,
            Some(other) => MoveResult::Track { to, captured: Some(other) },
        }
    }

    /// Resolves `action` and applies it when legal. Illegal actions leave the board untouched.
    pub fn apply(&mut self, color: Color, action: Action, roll: u8) -> MoveResult {
        let result = self.resolve(color, action, roll);
        match result {
            MoveResult::Track { to, captured } => {
                if let Some(victim) = captured {
                    self.base[victim.idx()] += 1;
                }
                self.lift(color, action);
                self.track[to] = Some(color);
            }
            MoveResult::Home { slot } => {
                self.lift(color, action);
                self.home[color.idx()][slot] = true;
            }
            MoveResult::Blocked | MoveResult::NoReserve | MoveResult::NotOwned => (),
        }
        result
    }

    fn lift(&mut self, color: Color, action: Action) {
        match action {
            Action::Enter => self.base[color.idx()] -= 1,
            Action::Advance(from) => self.track[from] = None,
        }
    }

    /// Moves the piece on `pos` forward by `steps`. Returns false, and leaves
    /// the board unchanged, if the move is illegal.
    ///
    /// The mover is whoever stands on `pos`; calling this on an empty cell is a bug.
    pub fn move_piece(&mut self, pos: usize, steps: u8) -> bool {
        let Some(color) = self.track[pos] else {
            panic!("no piece to move on cell {pos}");
        };
        self.apply(color, Action::Advance(pos), steps).is_legal()
    }

    /// Brings a piece of `color` from base onto its start cell, capturing any
    /// opponent standing there. Returns false if base is empty or the start
    /// cell already holds one of its own pieces.
    pub fn enter(&mut self, color: Color) -> bool {
        self.apply(color, Action::Enter, 0).is_legal()
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, color: Color, pos: usize) {
        assert!(self.base[color.idx()] > 0, "{color} has no piece left in base");
        assert!(self.track[pos].is_none(), "cell {pos} is occupied");
        self.base[color.idx()] -= 1;
        self.track[pos] = Some(color);
    }

    #[cfg(test)]
    pub(crate) fn fill_home(&mut self, color: Color, slot: usize) {
        assert!(self.base[color.idx()] > 0, "{color} has no piece left in base");
        self.base[color.idx()] -= 1;
        self.home[color.idx()][slot] = true;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " Board ")?;
        for (i, cell) in self.track.iter().enumerate() {
            match cell {
                Some(color) => write!(f, "{}", color.abbr())?,
                None if i % SEGMENT_LEN == 0 => write!(f, ",")?,
                None => write!(f, ".")?,
            }
        }
        writeln!(f)?;

        for color in Color::ALL {
            write!(f, "{:>6} ", color.name())?;
            for &filled in self.home(color) {
                write!(f, "{}", if filled { color.abbr() } else { '.' })?;
            }
            write!(f, "   base ")?;
            for _ in 0..self.base(color) {
                write!(f, "{}", color.abbr())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

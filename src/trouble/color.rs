use std::fmt::Display;

use crate::trouble::TRACK_LEN;

/// Cells between two neighbouring start cells.
pub const SEGMENT_LEN: usize = 7;

/// The four seats, in turn order. Each color owns a start cell on the track
/// and a private home stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Purple,
    White,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Purple, Color::White, Color::Blue];

    pub fn idx(&self) -> usize {
        *self as usize
    }

    pub fn from_idx(idx: usize) -> Color {
        Self::ALL[idx % Self::ALL.len()]
    }

    /// The next seat in turn order, wrapping after Blue.
    pub fn next(&self) -> Color {
        Self::from_idx(self.idx() + 1)
    }

    /// Track cell where pieces of this color enter from base.
    pub fn start(&self) -> usize {
        self.idx() * SEGMENT_LEN
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Purple => "Purple",
            Color::White => "White",
            Color::Blue => "Blue",
        }
    }

    pub fn abbr(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Purple => 'P',
            Color::White => 'W',
            Color::Blue => 'B',
        }
    }

    /// Steps left until a piece on `pos` is back on this color's start cell.
    /// A piece standing on the start cell still has the whole lap ahead.
    pub fn distance_to_start(&self, pos: usize) -> usize {
        TRACK_LEN - (pos + TRACK_LEN - self.start()) % TRACK_LEN
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_order() {
        assert_eq!(Color::Red.next(), Color::Purple);
        assert_eq!(Color::Purple.next(), Color::White);
        assert_eq!(Color::White.next(), Color::Blue);
        assert_eq!(Color::Blue.next(), Color::Red);
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.idx(), i);
            assert_eq!(Color::from_idx(i), *color);
        }
    }

    #[test]
    fn test_start_cells() {
        assert_eq!(Color::Red.start(), 0);
        assert_eq!(Color::Purple.start(), 7);
        assert_eq!(Color::White.start(), 14);
        assert_eq!(Color::Blue.start(), 21);
    }

    #[test]
    fn test_distance_to_start() {
        for color in Color::ALL {
            for i in 0..TRACK_LEN {
                let pos = (i + color.start()) % TRACK_LEN;
                assert_eq!(color.distance_to_start(pos), TRACK_LEN - i, "{color} at {pos}");
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Color::Purple.to_string(), "Purple");
        assert_eq!(Color::Blue.abbr(), 'B');
    }
}

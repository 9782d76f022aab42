//! Monte-Carlo simulator for the four-player race game Trouble, used to
//! compare simple move-selection strategies over many games.
//!
//! [`trouble`] holds the rules: board, dice, strategies and the game loop.
//! [`simulation`] runs batches of independent games in parallel and tallies the winners.

pub mod simulation;
pub mod trouble;

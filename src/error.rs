//! This module defines general error types used throughout the crate.

use thiserror::Error;

/// Error type for converting integers to (C like) enums using TryFrom
#[derive(Debug, Error)]
pub enum TryFromIntToEnumError {
    /// attempted to convert integer into enum value, but integer was out of bounds
    #[error("attempted to convert integer into enum value, but integer was out of bounds")]
    OutOfBounds,
}

/// Error type describing why a sticker state fails to decode into a legal cube.
///
/// A state is solvable iff none of these apply. The solver itself never
/// surfaces this error (it collapses invalid input to an empty solution);
/// callers that want to classify a rejection should decode the stickers
/// themselves via [`StickerCube::to_cubie`](crate::cube333::StickerCube::to_cubie).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// some color does not appear on exactly nine stickers
    #[error("expected exactly nine stickers of each color")]
    ColorCount,
    /// a corner position holds a color triple matching no real corner piece
    #[error("corner position {0} matches no reference corner")]
    UnknownCorner(usize),
    /// an edge position holds a color pair matching no real edge piece
    #[error("edge position {0} matches no reference edge")]
    UnknownEdge(usize),
    /// the same corner piece appears in two positions
    #[error("a corner piece appears twice")]
    DuplicateCorner,
    /// the same edge piece appears in two positions
    #[error("an edge piece appears twice")]
    DuplicateEdge,
    /// the corner orientations do not sum to a multiple of three
    #[error("corner twist sum is not divisible by three")]
    CornerTwistParity,
    /// the edge orientations do not sum to a multiple of two
    #[error("edge flip sum is not even")]
    EdgeFlipParity,
    /// corner and edge permutations disagree in parity
    #[error("corner and edge permutation parities differ")]
    PermutationParity,
}

//! A general description of a coordinate: an integer encoding one projection
//! of a puzzle state, usable as an index into precomputed tables.

/// A coordinate type, encoding one projection of the puzzle P.
pub trait Coordinate<P>: Copy + Default + Eq {
    /// Obtain the coordinate of the given puzzle state.
    fn from_puzzle(puzzle: &P) -> Self;

    /// The number of possible coordinate values.
    fn count() -> usize;

    /// The value of this coordinate as a usize, for use in table lookups.
    /// Always less than [`count`](Coordinate::count).
    fn repr(self) -> usize;

    /// Convert a table index back into a coordinate. 0 corresponds to the
    /// solved state.
    fn from_repr(n: usize) -> Self;

    /// Whether this coordinate takes its solved value.
    fn solved(self) -> bool {
        self.repr() == 0
    }
}

/// Gives the ability to write a coordinate back onto a puzzle, reconstructing
/// a representative state for it.
pub trait FromCoordinate<C>: Sized
where
    C: Coordinate<Self>,
{
    /// Modify the puzzle so that its coordinate for `C` is `coord`. Parts of
    /// the state not determined by `coord` take a fixed representative
    /// arrangement; derived orientations satisfy their parity invariants.
    fn set_coord(&mut self, coord: C);
}

//! Precomputed coordinate transition tables.
//!
//! A move table stores, for every value of a coordinate and every move of a
//! move set, the coordinate of the moved cube. Tables are generated by
//! enumeration: write each coordinate value onto a representative cube, apply
//! each move at the cubie level and rank the result.

use crate::coord::{Coordinate, FromCoordinate};
use crate::cube333::moves::{Htm, Move333, Move333Type, MoveGenerator};
use crate::cube333::CubieCube;
use crate::moves::Cancellation;
use crate::mv;

use std::marker::PhantomData;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// A restricted move set used by one phase of the solver. Each move maps into
/// the full 3x3x3 move set and has a dense index for table lookups.
pub trait SubMove: Copy + 'static {
    /// The number of moves in the set.
    const SIZE: usize;
    /// All moves in the set, ordered by [`index`](SubMove::index).
    const MOVE_LIST: &'static [Self];

    /// The equivalent full move.
    fn into_move(self) -> Move333;

    /// The position of this move in [`MOVE_LIST`](SubMove::MOVE_LIST).
    fn index(self) -> usize;
}

impl SubMove for Move333 {
    const SIZE: usize = Htm::SIZE;
    const MOVE_LIST: &'static [Move333] = Htm::MOVE_LIST;

    fn into_move(self) -> Move333 {
        self
    }

    fn index(self) -> usize {
        usize::from(self)
    }
}

/// Moves which keep a cube inside the domino subgroup: any turn of U or D,
/// half turns of the other four faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub enum DrMove {
    R2,
    L2,
    F2,
    B2,
    U(#[cfg_attr(test, proptest(strategy = "1..=3u8"))] u8),
    D(#[cfg_attr(test, proptest(strategy = "1..=3u8"))] u8),
}

impl SubMove for DrMove {
    const SIZE: usize = 10;
    const MOVE_LIST: &'static [DrMove] = &[
        DrMove::R2,
        DrMove::L2,
        DrMove::F2,
        DrMove::B2,
        DrMove::U(1),
        DrMove::U(2),
        DrMove::U(3),
        DrMove::D(1),
        DrMove::D(2),
        DrMove::D(3),
    ];

    fn into_move(self) -> Move333 {
        match self {
            DrMove::R2 => mv!(R, 2),
            DrMove::L2 => mv!(L, 2),
            DrMove::F2 => mv!(F, 2),
            DrMove::B2 => mv!(B, 2),
            DrMove::U(n) => Move333 {
                ty: Move333Type::U,
                count: n,
            },
            DrMove::D(n) => Move333 {
                ty: Move333Type::D,
                count: n,
            },
        }
    }

    fn index(self) -> usize {
        match self {
            DrMove::R2 => 0,
            DrMove::L2 => 1,
            DrMove::F2 => 2,
            DrMove::B2 => 3,
            DrMove::U(n) => 3 + n as usize,
            DrMove::D(n) => 6 + n as usize,
        }
    }
}

impl crate::moves::Move for DrMove {
    fn inverse(self) -> Self {
        match self {
            DrMove::U(n) => DrMove::U(4 - n),
            DrMove::D(n) => DrMove::D(4 - n),
            half_turn => half_turn,
        }
    }

    fn commutes_with(&self, b: &Self) -> bool {
        self.into_move().ty.axis() == b.into_move().ty.axis()
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        match (self, b) {
            (DrMove::U(n), DrMove::U(m)) => match (n + m) % 4 {
                0 => Cancellation::NoMove,
                c => Cancellation::OneMove(DrMove::U(c)),
            },
            (DrMove::D(n), DrMove::D(m)) => match (n + m) % 4 {
                0 => Cancellation::NoMove,
                c => Cancellation::OneMove(DrMove::D(c)),
            },
            (a, b) if a == b => Cancellation::NoMove,
            (a, b) => Cancellation::TwoMove(a, b),
        }
    }
}

/// A transition table for coordinate `C` under the moves of `M`. `MOVES` must
/// equal `M::SIZE`; it is a const parameter so rows can be plain arrays.
pub struct MoveTable<M, C, const MOVES: usize> {
    table: Vec<[C; MOVES]>,
    _marker: PhantomData<M>,
}

impl<M, C, const MOVES: usize> MoveTable<M, C, MOVES>
where
    M: SubMove,
    C: Coordinate<CubieCube>,
    CubieCube: FromCoordinate<C>,
{
    /// Generate the full table by enumerating every coordinate value.
    pub fn generate() -> Self {
        debug_assert_eq!(M::SIZE, MOVES);

        let table = (0..C::count())
            .map(|n| {
                let mut cube = CubieCube::SOLVED;
                cube.set_coord(C::from_repr(n));
                std::array::from_fn(|i| {
                    C::from_puzzle(&cube.make_move(M::MOVE_LIST[i].into_move()))
                })
            })
            .collect();

        MoveTable {
            table,
            _marker: PhantomData,
        }
    }

    /// The coordinate after applying a move.
    pub fn make_move(&self, coord: C, mv: M) -> C {
        self.table[coord.repr()][mv.index()]
    }
}

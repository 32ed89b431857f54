//! Moves of the 3x3x3 and their effect on the cubie representation.
//!
//! Move effects are not written out by hand: each of the 18 moves is applied
//! once to a solved sticker cube and the resulting piece sources and
//! orientation deltas are read off. The sticker engine is the single source
//! of truth for move geometry, so the two representations cannot drift apart.

use super::{CornerTwist, CubieCube, EdgeFlip, StickerCube};
use crate::moves::{Cancellation, MoveSequence};

use std::sync::OnceLock;

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Represents each type of move. Note that the `Move333` struct uses this variable along with a
/// counter to represent moves such as R2 or U'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Move333Type {
    /// Right
    R,
    /// Left
    L,
    /// Up
    U,
    /// Down
    D,
    /// Front
    F,
    /// Back
    B,
}

impl Move333Type {
    /// The move type on the face opposite to the given one.
    pub fn opposite(self) -> Move333Type {
        match self {
            Move333Type::R => Move333Type::L,
            Move333Type::L => Move333Type::R,
            Move333Type::U => Move333Type::D,
            Move333Type::D => Move333Type::U,
            Move333Type::F => Move333Type::B,
            Move333Type::B => Move333Type::F,
        }
    }

    /// The rotation axis this face turns around. Opposite faces share an
    /// axis, and only those commute.
    pub fn axis(self) -> usize {
        self as usize / 2
    }
}

/// Stores a move type and counter. An anti-clockwise move will have a count of 3.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
#[allow(missing_docs)]
pub struct Move333 {
    pub ty: Move333Type,
    #[cfg_attr(test, proptest(strategy = "1..=3u8"))]
    pub count: u8,
}

impl crate::moves::Move for Move333 {
    fn inverse(self) -> Self {
        Self {
            ty: self.ty,
            count: 4u8.wrapping_sub(self.count).rem_euclid(4),
        }
    }

    fn commutes_with(&self, b: &Self) -> bool {
        self.ty.axis() == b.ty.axis()
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        if self.ty == b.ty {
            let count = (self.count + b.count) % 4;
            if count == 0 {
                Cancellation::NoMove
            } else {
                Cancellation::OneMove(Move333 { ty: self.ty, count })
            }
        } else {
            Cancellation::TwoMove(self, b)
        }
    }
}

// I don't want to have the default derive debug for this!
impl std::fmt::Debug for Move333 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.count {
            1 => write!(f, "{:?}", self.ty),
            3 => write!(f, "{:?}'", self.ty),
            _ => write!(f, "{:?}{}", self.ty, self.count),
        }
    }
}

impl std::fmt::Display for Move333 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A trait to classify a type as a move generator. A move generator is a set which can be used to
/// generate a group, i.e. find every combination of moves using moves in the move generator to
/// find unique states.
pub trait MoveGenerator {
    /// The amount of moves that are available in the moveset.
    const SIZE: usize;
    /// A list of all valid moves. The index of a move in this list will be the same index used
    /// when accessing the move table.
    const MOVE_LIST: &'static [Move333];
}

impl From<Move333> for usize {
    fn from(mv: Move333) -> usize {
        (mv.count as usize - 1) * 6 + mv.ty as usize
    }
}

/// Create a move by specifying a move type and move count. Note that you do not need to specify
/// for example Move333Type::R, you only need to specify R.
#[macro_export]
macro_rules! mv {
    ($ty:ident, $count: expr) => {
        $crate::cube333::moves::Move333 {
            ty: $crate::cube333::moves::Move333Type::$ty,
            count: $count,
        }
    };
}

/// Type for Half Turn Metric
pub struct Htm;

impl MoveGenerator for Htm {
    const SIZE: usize = 18;
    const MOVE_LIST: &'static [Move333] = &[
        mv!(R, 1),
        mv!(L, 1),
        mv!(U, 1),
        mv!(D, 1),
        mv!(F, 1),
        mv!(B, 1),
        mv!(R, 2),
        mv!(L, 2),
        mv!(U, 2),
        mv!(D, 2),
        mv!(F, 2),
        mv!(B, 2),
        mv!(R, 3),
        mv!(L, 3),
        mv!(U, 3),
        mv!(D, 3),
        mv!(F, 3),
        mv!(B, 3),
    ];
}

/// The effect of one move on the cubie arrays: for each destination slot,
/// the source slot whose piece moves there and the orientation delta picked
/// up on the way.
struct MoveEffect {
    cp: [u8; 8],
    co: [CornerTwist; 8],
    ep: [u8; 12],
    eo: [EdgeFlip; 12],
}

fn derive_effects() -> [MoveEffect; 18] {
    std::array::from_fn(|i| {
        let mut stickers = StickerCube::SOLVED;
        stickers.apply_move(Htm::MOVE_LIST[i]);
        // On a solved cube every slot holds its own piece with no twist, so
        // the decoded arrays are exactly the move's source slots and deltas.
        let cube = stickers
            .to_cubie()
            .expect("a legal move produced an illegal sticker state");
        MoveEffect {
            cp: cube.cp.map(u8::from),
            co: cube.co,
            ep: cube.ep.map(u8::from),
            eo: cube.eo,
        }
    })
}

/// The derived effects of all 18 moves, indexed like `usize::from(mv)`.
/// Derived once per process on first use.
fn effects() -> &'static [MoveEffect; 18] {
    static EFFECTS: OnceLock<[MoveEffect; 18]> = OnceLock::new();
    EFFECTS.get_or_init(derive_effects)
}

impl CubieCube {
    /// Apply an algorithm to a cube.
    pub fn make_moves(self, mvs: MoveSequence<Move333>) -> CubieCube {
        mvs.0.into_iter().fold(self, |c, m| c.make_move(m))
    }

    /// Apply a move to a cube.
    pub fn make_move(self, mv: Move333) -> CubieCube {
        self.apply_effect(&effects()[usize::from(mv)])
    }

    /// Make a single clockwise application of a move type.
    pub fn make_move_type(self, ty: Move333Type) -> CubieCube {
        self.make_move(Move333 { ty, count: 1 })
    }

    fn apply_effect(self, eff: &MoveEffect) -> CubieCube {
        let mut out = CubieCube::SOLVED;

        for i in 0..8 {
            let src = eff.cp[i] as usize;
            out.cp[i] = self.cp[src];
            out.co[i] = self.co[src].twist_by(eff.co[i]);
        }
        for i in 0..12 {
            let src = eff.ep[i] as usize;
            out.ep[i] = self.ep[src];
            out.eo[i] = self.eo[src].flip_by(eff.eo[i]);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn face_loop() {
        let mut cube = CubieCube::SOLVED;
        for _ in 0..4 {
            cube = cube.make_move(mv!(B, 1));
        }
        assert_eq!(cube, CubieCube::SOLVED);
    }

    #[test]
    fn derived_counts_match_repetition() {
        // A move's derived effect must equal repeated application of the
        // clockwise primitive.
        for ty in [
            Move333Type::R,
            Move333Type::L,
            Move333Type::U,
            Move333Type::D,
            Move333Type::F,
            Move333Type::B,
        ] {
            for count in 2..=3u8 {
                let direct = CubieCube::SOLVED.make_move(Move333 { ty, count });
                let repeated = (0..count).fold(CubieCube::SOLVED, |c, _| c.make_move_type(ty));
                assert_eq!(direct, repeated, "{ty:?}{count}");
            }
        }
    }

    #[test]
    fn axis_pairs() {
        use Move333Type::*;
        assert_eq!(R.axis(), L.axis());
        assert_eq!(U.axis(), D.axis());
        assert_eq!(F.axis(), B.axis());
        assert_ne!(R.axis(), U.axis());
        assert_ne!(U.axis(), F.axis());
        for ty in [R, L, U, D, F, B] {
            assert_eq!(ty.axis(), ty.opposite().axis());
        }
    }

    #[test]
    fn move_names() {
        assert_eq!(format!("{:?}", mv!(R, 1)), "R");
        assert_eq!(format!("{:?}", mv!(R, 2)), "R2");
        assert_eq!(format!("{:?}", mv!(R, 3)), "R'");
    }

    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cancel_same_moves(mvs in vec(any::<Move333>(), 0..20).prop_map(MoveSequence)) {
            let cancelled = mvs.clone().cancel();
            prop_assert!(cancelled.len() <= mvs.len());
            prop_assert_eq!(CubieCube::SOLVED.make_moves(mvs), CubieCube::SOLVED.make_moves(cancelled));
        }

        #[test]
        fn invert_identity(mvs in vec(any::<Move333>(), 0..20).prop_map(MoveSequence)) {
            prop_assert_eq!(CubieCube::SOLVED.make_moves(mvs.clone()).make_moves(mvs.inverse()), CubieCube::SOLVED);
        }

        #[test]
        fn cancel_idempotent(mvs in vec(any::<Move333>(), 0..20).prop_map(MoveSequence)) {
            let cancelled = mvs.clone().cancel();
            prop_assert_eq!(cancelled.clone().cancel(), cancelled);
        }

        #[test]
        fn single_move_inverse(m in any::<Move333>()) {
            prop_assert_eq!(CubieCube::SOLVED.make_move(m).make_move(m.inverse()), CubieCube::SOLVED);
        }

        #[test]
        fn reachable_invariants(mvs in vec(any::<Move333>(), 0..30).prop_map(MoveSequence)) {
            // Twist sum, flip sum and matching permutation parity are
            // preserved by every legal move.
            let cube = CubieCube::SOLVED.make_moves(mvs);
            prop_assert_eq!(cube.co_sum(), crate::cube333::CornerTwist::Oriented);
            prop_assert_eq!(cube.eo_sum(), crate::cube333::EdgeFlip::Oriented);
            prop_assert_eq!(cube.corner_parity(), cube.edge_parity());
        }
    }
}

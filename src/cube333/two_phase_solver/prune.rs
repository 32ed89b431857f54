//! Pruning tables giving lower bounds on the distance to a phase goal.
//!
//! A pruning table pairs two coordinates and stores, for every pair value,
//! the exact number of moves needed to bring that pair to zero. Ignoring the
//! rest of the cube state can only lose information, so the stored distance
//! never exceeds the true distance and is safe to prune with.

use super::move_tables::{MoveTable, SubMove};
use crate::coord::{Coordinate, FromCoordinate};
use crate::cube333::CubieCube;

use std::marker::PhantomData;

/// Marks a pair value whose distance has not been assigned yet. Pairs which
/// are unreachable from the solved pair keep this value; legal cube states
/// never produce them.
const UNVISITED: u8 = 0xff;

/// Exact distances to the solved pair for the coordinate pair `(A, B)` under
/// the moves of `M`, computed by breadth first search.
pub struct PruneTable<A, B, M, const MOVES: usize> {
    table: Vec<u8>,
    _marker: PhantomData<(A, B, M)>,
}

impl<A, B, M, const MOVES: usize> PruneTable<A, B, M, MOVES>
where
    A: Coordinate<CubieCube>,
    B: Coordinate<CubieCube>,
    M: SubMove,
    CubieCube: FromCoordinate<A> + FromCoordinate<B>,
{
    /// Fill the table by searching outward from the solved pair.
    pub fn generate(a: &MoveTable<M, A, MOVES>, b: &MoveTable<M, B, MOVES>) -> Self {
        let mut table = vec![UNVISITED; A::count() * B::count()];
        table[0] = 0;

        let mut frontier = vec![(A::from_repr(0), B::from_repr(0))];
        let mut depth = 0u8;

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for (ca, cb) in frontier {
                for &m in M::MOVE_LIST {
                    let na = a.make_move(ca, m);
                    let nb = b.make_move(cb, m);
                    let idx = na.repr() * B::count() + nb.repr();
                    if table[idx] == UNVISITED {
                        table[idx] = depth + 1;
                        next.push((na, nb));
                    }
                }
            }

            frontier = next;
            depth += 1;
        }

        PruneTable {
            table,
            _marker: PhantomData,
        }
    }

    /// A lower bound on the moves needed to zero both coordinates at once.
    pub fn distance(&self, a: A, b: B) -> u8 {
        self.table[a.repr() * B::count() + b.repr()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::FromCoordinate;
    use crate::cube333::coordcube::{COCoord, CPCoord, DominoESliceCoord, EOCoord, ESliceCoord};
    use crate::cube333::moves::Move333;
    use crate::cube333::two_phase_solver::move_tables::DrMove;
    use crate::moves::MoveSequence;
    use crate::mv;

    use proptest::collection::vec;
    use proptest::prelude::*;

    use std::sync::OnceLock;

    // The corner orientation table is a million pairs; build it once for the
    // whole test binary.
    fn co_slice_prune() -> &'static PruneTable<COCoord, ESliceCoord, Move333, 18> {
        static TABLE: OnceLock<PruneTable<COCoord, ESliceCoord, Move333, 18>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let co = MoveTable::generate();
            let slice = MoveTable::generate();
            PruneTable::generate(&co, &slice)
        })
    }

    #[test]
    fn solved_pair_is_zero() {
        let prune = co_slice_prune();
        assert_eq!(
            prune.distance(COCoord::from_repr(0), ESliceCoord::from_repr(0)),
            0
        );
    }

    #[test]
    fn every_orientation_pair_is_reachable() {
        // Corner orientation and slice placement are independent, so the
        // whole pair space is reachable and no sentinel survives.
        let prune = co_slice_prune();
        for a in 0..COCoord::count() {
            for b in 0..ESliceCoord::count() {
                let d = prune.distance(COCoord::from_repr(a), ESliceCoord::from_repr(b));
                assert_ne!(d, UNVISITED);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn distance_is_consistent(mvs in vec(any::<Move333>(), 0..25).prop_map(MoveSequence)) {
            // One move changes the bound by at most one in either direction.
            let prune = co_slice_prune();

            let mut cube = CubieCube::SOLVED;
            let mut prev = prune.distance(COCoord::from_puzzle(&cube), ESliceCoord::from_puzzle(&cube));
            for &m in &mvs.0 {
                cube = cube.make_move(m);
                let d = prune.distance(COCoord::from_puzzle(&cube), ESliceCoord::from_puzzle(&cube));
                prop_assert!(d as i16 >= prev as i16 - 1 && d as i16 <= prev as i16 + 1);
                prev = d;
            }
        }

        #[test]
        fn distance_is_admissible(mvs in vec(any::<Move333>(), 0..12).prop_map(MoveSequence)) {
            // A scramble of n moves can be undone in n moves, so the bound
            // can never exceed the scramble length.
            let prune = co_slice_prune();

            let cube = CubieCube::SOLVED.make_moves(mvs.clone());
            let d = prune.distance(COCoord::from_puzzle(&cube), ESliceCoord::from_puzzle(&cube));
            prop_assert!((d as usize) <= mvs.len());
        }
    }

    #[test]
    fn eo_pairs_positive_after_flipping_move() {
        let eo: MoveTable<Move333, EOCoord, 18> = MoveTable::generate();
        let slice: MoveTable<Move333, ESliceCoord, 18> = MoveTable::generate();
        let prune = PruneTable::generate(&eo, &slice);

        // F flips the edges on its face, so the bound must be positive.
        let cube = CubieCube::SOLVED.make_move(mv!(F, 1));
        let d = prune.distance(
            EOCoord::from_puzzle(&cube),
            ESliceCoord::from_puzzle(&cube),
        );
        assert!(d >= 1);
    }

    #[test]
    fn domino_corner_distances_within_cap() {
        // Every reachable phase 2 corner pair solves within the documented
        // move cap.
        let cp: MoveTable<DrMove, CPCoord, 10> = MoveTable::generate();
        let sp: MoveTable<DrMove, DominoESliceCoord, 10> = MoveTable::generate();
        let prune = PruneTable::generate(&cp, &sp);

        let mut cube = CubieCube::SOLVED;
        for n in 0..CPCoord::count() {
            cube.set_coord(CPCoord::from_repr(n));
            let d = prune.distance(CPCoord::from_puzzle(&cube), DominoESliceCoord::from_repr(0));
            if d != UNVISITED {
                assert!(d <= 18);
            }
        }
    }
}

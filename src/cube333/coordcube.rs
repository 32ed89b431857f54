//! The six coordinate projections the two phase solver works in.
//!
//! Phase 1 uses corner orientation, edge orientation and E slice placement;
//! phase 2 uses corner permutation, the permutation of the eight non-slice
//! edges and the permutation of the four slice edges. Each coordinate can be
//! written back onto a cube ([`FromCoordinate`]), reconstructing a
//! representative state: the last corner's twist and last edge's flip are
//! derived from the orientation parity invariants rather than encoded.

use super::{Corner, CornerTwist, CubieCube, Edge, EdgeFlip};
use crate::coord::{Coordinate, FromCoordinate};

/// A coordinate representation of the corner orientation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct COCoord(u16);

/// A coordinate representation of the edge orientation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct EOCoord(u16);

/// A coordinate ranking which four edge positions hold the E slice edges,
/// ignoring their order. Zero iff all four sit in the slice.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ESliceCoord(u16);

/// A coordinate representation of the corner permutation of a cube.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CPCoord(u16);

/// A coordinate ranking the permutation of the eight non-slice edges across
/// the U and D layers. Only meaningful inside the phase 2 subgroup, where
/// those positions are guaranteed to hold non-slice edges.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct DominoEPCoord(u16);

/// A coordinate ranking the permutation of the four E slice edges among the
/// slice positions. Only meaningful inside the phase 2 subgroup.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct DominoESliceCoord(u8);

const FACTORIALS: [usize; 9] = [1, 1, 2, 6, 24, 120, 720, 5040, 40320];

/// Binomial coefficients n choose k for n <= 12, k <= 4, used by the slice
/// placement ranking.
const BINOM: [[u16; 5]; 13] = {
    let mut b = [[0u16; 5]; 13];
    let mut n = 0;
    while n <= 12 {
        b[n][0] = 1;
        let mut k = 1;
        while k <= 4 {
            if k <= n {
                b[n][k] = b[n - 1][k - 1] + b[n - 1][k];
            }
            k += 1;
        }
        n += 1;
    }
    b
};

/// Rank a permutation of 0..N by its factorial number system (Lehmer) code.
fn rank_perm<const N: usize>(perm: &[u8; N]) -> usize {
    let mut coord = 0;
    for i in 0..N {
        let smaller_after = perm[i + 1..].iter().filter(|&&x| x < perm[i]).count();
        coord += smaller_after * FACTORIALS[N - 1 - i];
    }
    coord
}

/// Inverse of [`rank_perm`].
fn unrank_perm<const N: usize>(mut coord: usize) -> [u8; N] {
    let mut remaining: Vec<u8> = (0..N as u8).collect();
    std::array::from_fn(|i| {
        let fact = FACTORIALS[N - 1 - i];
        let idx = coord / fact;
        coord %= fact;
        remaining.remove(idx)
    })
}

impl Coordinate<CubieCube> for COCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        // Base 3 over the first 7 corners; the last twist is determined.
        let coord = puzzle.co[..7]
            .iter()
            .fold(0u16, |acc, &t| acc * 3 + t as u16);
        COCoord(coord)
    }

    fn count() -> usize {
        // 3^7
        2187
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        COCoord(n as u16)
    }
}

impl FromCoordinate<COCoord> for CubieCube {
    fn set_coord(&mut self, coord: COCoord) {
        let mut n = coord.0;
        let mut sum = CornerTwist::Oriented;

        for i in (0..7).rev() {
            let twist =
                CornerTwist::try_from((n % 3) as u8).expect("a base 3 digit is a valid twist");
            self.co[i] = twist;
            sum = sum.twist_by(twist);
            n /= 3;
        }
        // The twist sum over all eight corners must vanish.
        self.co[7] = sum.inverse();
    }
}

impl Coordinate<CubieCube> for EOCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        let coord = puzzle.eo[..11]
            .iter()
            .fold(0u16, |acc, &f| acc * 2 + f as u16);
        EOCoord(coord)
    }

    fn count() -> usize {
        // 2^11
        2048
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        EOCoord(n as u16)
    }
}

impl FromCoordinate<EOCoord> for CubieCube {
    fn set_coord(&mut self, coord: EOCoord) {
        let mut n = coord.0;
        let mut sum = EdgeFlip::Oriented;

        for i in (0..11).rev() {
            let flip = if n % 2 == 0 {
                EdgeFlip::Oriented
            } else {
                EdgeFlip::Flipped
            };
            self.eo[i] = flip;
            sum = sum.flip_by(flip);
            n /= 2;
        }
        // An odd number of flipped edges is unreachable.
        self.eo[11] = sum;
    }
}

impl Coordinate<CubieCube> for ESliceCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        // Combinadic rank of the occupied positions: scanning outward from
        // the slice, the x-th slice edge found at position j contributes
        // C(11 - j, x). Solved ranks zero, the furthest placement 494, and
        // every 4-subset gets a distinct value.
        let mut coord = 0;
        let mut found = 0;
        for j in (0..12).rev() {
            if puzzle.ep[j].e_slice() {
                found += 1;
                coord += BINOM[11 - j][found];
            }
        }
        ESliceCoord(coord)
    }

    fn count() -> usize {
        // 12 choose 4
        495
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        ESliceCoord(n as u16)
    }
}

impl FromCoordinate<ESliceCoord> for CubieCube {
    fn set_coord(&mut self, coord: ESliceCoord) {
        let mut coord = coord.0;
        let mut is_slice_pos = [false; 12];

        // Greedy combinadic decode, largest digit first: the x-th slice
        // edge (counting from the slice outward) sits at the largest q with
        // C(q, x) not exceeding what remains of the rank.
        for x in (1..=4).rev() {
            let mut q = 11;
            while BINOM[q][x] > coord {
                q -= 1;
            }
            coord -= BINOM[q][x];
            is_slice_pos[11 - q] = true;
        }

        // Fill in a representative: non-slice edges ascending through the
        // remaining positions, slice edges ascending through theirs.
        let mut next_other = 0u8;
        let mut next_slice = 8u8;
        for i in 0..12 {
            let piece = if is_slice_pos[i] {
                let p = next_slice;
                next_slice += 1;
                p
            } else {
                let p = next_other;
                next_other += 1;
                p
            };
            self.ep[i] = Edge::try_from(piece).expect("piece indices below twelve are edges");
        }
    }
}

impl Coordinate<CubieCube> for CPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        CPCoord(rank_perm(&puzzle.cp.map(u8::from)) as u16)
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        CPCoord(n as u16)
    }
}

impl FromCoordinate<CPCoord> for CubieCube {
    fn set_coord(&mut self, coord: CPCoord) {
        let perm = unrank_perm::<8>(coord.0 as usize);
        for (i, p) in perm.into_iter().enumerate() {
            self.cp[i] = Corner::try_from(p).expect("a permutation of 0..8 holds only corners");
        }
    }
}

impl Coordinate<CubieCube> for DominoEPCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        let mut p = [0u8; 8];
        for i in 0..8 {
            p[i] = puzzle.ep[i] as u8;
        }
        DominoEPCoord(rank_perm(&p) as u16)
    }

    fn count() -> usize {
        // 8!
        40320
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        DominoEPCoord(n as u16)
    }
}

impl FromCoordinate<DominoEPCoord> for CubieCube {
    fn set_coord(&mut self, coord: DominoEPCoord) {
        let perm = unrank_perm::<8>(coord.0 as usize);
        for (i, p) in perm.into_iter().enumerate() {
            self.ep[i] = Edge::try_from(p).expect("a permutation of 0..8 holds only edges");
        }
        // Slice edges stay home inside the phase 2 subgroup.
        for i in 8..12 {
            self.ep[i] = Edge::ARRAY[i];
        }
    }
}

impl Coordinate<CubieCube> for DominoESliceCoord {
    fn from_puzzle(puzzle: &CubieCube) -> Self {
        let p: [u8; 4] = std::array::from_fn(|i| {
            let e = puzzle.ep[8 + i];
            debug_assert!(e.e_slice(), "slice permutation read outside the phase 2 subgroup");
            e as u8 - 8
        });
        DominoESliceCoord(rank_perm(&p) as u8)
    }

    fn count() -> usize {
        // 4!
        24
    }

    fn repr(self) -> usize {
        self.0 as usize
    }

    fn from_repr(n: usize) -> Self {
        DominoESliceCoord(n as u8)
    }
}

impl FromCoordinate<DominoESliceCoord> for CubieCube {
    fn set_coord(&mut self, coord: DominoESliceCoord) {
        let perm = unrank_perm::<4>(coord.0 as usize);
        for i in 0..8 {
            self.ep[i] = Edge::ARRAY[i];
        }
        for (i, p) in perm.into_iter().enumerate() {
            self.ep[8 + i] = Edge::ARRAY[8 + p as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube333::moves::{Htm, MoveGenerator};
    use crate::cube333::StickerCube;
    use crate::moves::MoveSequence;

    use std::collections::HashSet;

    use itertools::Itertools;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn all_zero_at_solved() {
        let solved = CubieCube::SOLVED;
        assert_eq!(COCoord::from_puzzle(&solved).repr(), 0);
        assert_eq!(EOCoord::from_puzzle(&solved).repr(), 0);
        assert_eq!(ESliceCoord::from_puzzle(&solved).repr(), 0);
        assert_eq!(CPCoord::from_puzzle(&solved).repr(), 0);
        assert_eq!(DominoEPCoord::from_puzzle(&solved).repr(), 0);
        assert_eq!(DominoESliceCoord::from_puzzle(&solved).repr(), 0);
    }

    #[test]
    fn only_zero_at_solved() {
        // A move sequence that changes the cube must change some coordinate.
        for &m in Htm::MOVE_LIST {
            let cube = CubieCube::SOLVED.make_move(m);
            let all_zero = COCoord::from_puzzle(&cube).solved()
                && EOCoord::from_puzzle(&cube).solved()
                && ESliceCoord::from_puzzle(&cube).solved()
                && CPCoord::from_puzzle(&cube).solved()
                && DominoEPCoord::from_puzzle(&cube).solved();
            assert!(!all_zero, "{m:?}");
        }
    }

    #[test]
    fn e_slice_placement_uniqueness() {
        // Every 4-subset of edge positions ranks to a distinct in-range
        // value, so the rank is a bijection onto 0..495.
        let mut coords = HashSet::new();
        for poses in (0..12).combinations(4) {
            let mut cube = CubieCube::SOLVED;
            for (a, b) in poses.into_iter().zip(8..12) {
                cube.ep.swap(a, b);
            }

            let coord = ESliceCoord::from_puzzle(&cube);
            assert!(coord.repr() < ESliceCoord::count());
            assert!(coords.insert(coord));
        }
        assert_eq!(coords.len(), ESliceCoord::count());
    }

    #[test]
    fn orientation_representatives_are_legal() {
        for n in 0..COCoord::count() {
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(COCoord::from_repr(n));
            assert_eq!(cube.co_sum(), crate::cube333::CornerTwist::Oriented);
        }
        for n in 0..EOCoord::count() {
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(EOCoord::from_repr(n));
            assert_eq!(cube.eo_sum(), crate::cube333::EdgeFlip::Oriented);
        }
    }

    fn roundtrips<C>()
    where
        C: Coordinate<CubieCube> + std::fmt::Debug,
        CubieCube: FromCoordinate<C>,
    {
        for n in 0..C::count() {
            let mut cube = CubieCube::SOLVED;
            cube.set_coord(C::from_repr(n));
            assert_eq!(C::from_puzzle(&cube), C::from_repr(n));
        }
    }

    #[test]
    fn set_coord_roundtrips() {
        roundtrips::<COCoord>();
        roundtrips::<EOCoord>();
        roundtrips::<ESliceCoord>();
        roundtrips::<CPCoord>();
        roundtrips::<DominoEPCoord>();
        roundtrips::<DominoESliceCoord>();
    }

    proptest! {
        #[test]
        fn coords_in_range(mvs in vec(proptest::prelude::any::<crate::cube333::moves::Move333>(), 0..30).prop_map(MoveSequence)) {
            let cube = CubieCube::SOLVED.make_moves(mvs);
            prop_assert!(COCoord::from_puzzle(&cube).repr() < COCoord::count());
            prop_assert!(EOCoord::from_puzzle(&cube).repr() < EOCoord::count());
            prop_assert!(ESliceCoord::from_puzzle(&cube).repr() < ESliceCoord::count());
            prop_assert!(CPCoord::from_puzzle(&cube).repr() < CPCoord::count());
        }

        #[test]
        fn sticker_coords_agree(mvs in vec(proptest::prelude::any::<crate::cube333::moves::Move333>(), 0..30).prop_map(MoveSequence)) {
            // Coordinates extracted via sticker decoding match the cubie path.
            let cube = CubieCube::SOLVED.make_moves(mvs);
            let decoded = StickerCube::from(cube).to_cubie().unwrap();
            prop_assert_eq!(COCoord::from_puzzle(&decoded), COCoord::from_puzzle(&cube));
            prop_assert_eq!(EOCoord::from_puzzle(&decoded), EOCoord::from_puzzle(&cube));
            prop_assert_eq!(ESliceCoord::from_puzzle(&decoded), ESliceCoord::from_puzzle(&cube));
            prop_assert_eq!(CPCoord::from_puzzle(&decoded), CPCoord::from_puzzle(&cube));
        }
    }
}

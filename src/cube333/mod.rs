//! Implementation of the 3x3x3 Rubik's cube, as stickers, as cubies and as
//! coordinates, along with a two phase solver.

pub mod coordcube;
pub mod moves;
pub mod sticker;
pub mod two_phase_solver;

pub use sticker::{Color, Face, StickerCube};

use crate::error::TryFromIntToEnumError;

/// A corner piece of the cube, named by the three faces it touches. The
/// discriminant doubles as the piece's home position index.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[allow(missing_docs)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

impl Corner {
    /// Every corner, in home position order.
    pub const ARRAY: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];
}

/// An edge piece of the cube, named by the two faces it touches. The four
/// E slice edges (FR, FL, BL, BR) come last.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[allow(missing_docs)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Edge {
    /// Every edge, in home position order.
    pub const ARRAY: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    /// Whether this edge belongs to the E slice (the layer between U and D).
    pub fn e_slice(self) -> bool {
        self as u8 >= 8
    }
}

/// The orientation of a corner piece: the number of clockwise twists taking
/// its U/D colored sticker away from the U/D axis.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum CornerTwist {
    /// The U/D sticker faces U or D.
    #[default]
    Oriented,
    /// Twisted one clockwise step.
    Clockwise,
    /// Twisted one anticlockwise step.
    AntiClockwise,
}

impl CornerTwist {
    /// Twist one step clockwise.
    pub fn clockwise(self) -> CornerTwist {
        match self {
            CornerTwist::Oriented => CornerTwist::Clockwise,
            CornerTwist::Clockwise => CornerTwist::AntiClockwise,
            CornerTwist::AntiClockwise => CornerTwist::Oriented,
        }
    }

    /// Twist one step anticlockwise.
    pub fn anticlockwise(self) -> CornerTwist {
        match self {
            CornerTwist::Oriented => CornerTwist::AntiClockwise,
            CornerTwist::Clockwise => CornerTwist::Oriented,
            CornerTwist::AntiClockwise => CornerTwist::Clockwise,
        }
    }

    /// Compose two twists (addition mod 3).
    pub fn twist_by(self, other: CornerTwist) -> CornerTwist {
        match other {
            CornerTwist::Oriented => self,
            CornerTwist::Clockwise => self.clockwise(),
            CornerTwist::AntiClockwise => self.anticlockwise(),
        }
    }

    /// The twist undoing this one.
    pub fn inverse(self) -> CornerTwist {
        match self {
            CornerTwist::Oriented => CornerTwist::Oriented,
            CornerTwist::Clockwise => CornerTwist::AntiClockwise,
            CornerTwist::AntiClockwise => CornerTwist::Clockwise,
        }
    }
}

/// The orientation of an edge piece.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum EdgeFlip {
    /// The edge is in its home orientation.
    #[default]
    Oriented,
    /// The edge is flipped.
    Flipped,
}

impl EdgeFlip {
    /// Flip the edge.
    pub fn flip(self) -> EdgeFlip {
        match self {
            EdgeFlip::Oriented => EdgeFlip::Flipped,
            EdgeFlip::Flipped => EdgeFlip::Oriented,
        }
    }

    /// Compose two flips (addition mod 2).
    pub fn flip_by(self, other: EdgeFlip) -> EdgeFlip {
        match other {
            EdgeFlip::Oriented => self,
            EdgeFlip::Flipped => self.flip(),
        }
    }
}

macro_rules! impl_enum_conversions {
    ($ty:ty, $arr:expr) => {
        impl From<$ty> for u8 {
            fn from(v: $ty) -> u8 {
                v as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = TryFromIntToEnumError;

            fn try_from(n: u8) -> Result<$ty, TryFromIntToEnumError> {
                $arr.get(n as usize)
                    .copied()
                    .ok_or(TryFromIntToEnumError::OutOfBounds)
            }
        }
    };
}

impl_enum_conversions!(Corner, Corner::ARRAY);
impl_enum_conversions!(Edge, Edge::ARRAY);
impl_enum_conversions!(
    CornerTwist,
    [
        CornerTwist::Oriented,
        CornerTwist::Clockwise,
        CornerTwist::AntiClockwise
    ]
);
impl_enum_conversions!(EdgeFlip, [EdgeFlip::Oriented, EdgeFlip::Flipped]);

/// Implementation of a cubie level cube. The cube state is represented by
/// which piece sits in each position and how it is oriented there, ignoring
/// sticker colors entirely.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CubieCube {
    /// Corner orientations, indexed by corner position.
    pub co: [CornerTwist; 8],
    /// Which corner piece is at each corner position.
    pub cp: [Corner; 8],
    /// Edge orientations, indexed by edge position.
    pub eo: [EdgeFlip; 12],
    /// Which edge piece is at each edge position.
    pub ep: [Edge; 12],
}

impl CubieCube {
    /// The solved cube stored as a const.
    pub const SOLVED: CubieCube = CubieCube {
        co: [CornerTwist::Oriented; 8],
        cp: Corner::ARRAY,
        eo: [EdgeFlip::Oriented; 12],
        ep: Edge::ARRAY,
    };

    /// The sum of all corner twists. Always `Oriented` on a reachable cube.
    pub fn co_sum(&self) -> CornerTwist {
        self.co
            .iter()
            .fold(CornerTwist::Oriented, |acc, &t| acc.twist_by(t))
    }

    /// The sum of all edge flips. Always `Oriented` on a reachable cube.
    pub fn eo_sum(&self) -> EdgeFlip {
        self.eo
            .iter()
            .fold(EdgeFlip::Oriented, |acc, &f| acc.flip_by(f))
    }

    /// The parity of the corner permutation (true = odd), as an inversion
    /// count.
    pub fn corner_parity(&self) -> bool {
        permutation_parity(&self.cp.map(u8::from))
    }

    /// The parity of the edge permutation (true = odd).
    pub fn edge_parity(&self) -> bool {
        permutation_parity(&self.ep.map(u8::from))
    }
}

impl Default for CubieCube {
    fn default() -> Self {
        CubieCube::SOLVED
    }
}

fn permutation_parity(perm: &[u8]) -> bool {
    let mut inversions = 0;
    for i in 0..perm.len() {
        for j in i + 1..perm.len() {
            if perm[i] > perm[j] {
                inversions += 1;
            }
        }
    }
    inversions % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_is_identity() {
        let solved = CubieCube::SOLVED;
        for (i, &c) in solved.cp.iter().enumerate() {
            assert_eq!(c as usize, i);
        }
        for (i, &e) in solved.ep.iter().enumerate() {
            assert_eq!(e as usize, i);
        }
        assert_eq!(solved.co_sum(), CornerTwist::Oriented);
        assert_eq!(solved.eo_sum(), EdgeFlip::Oriented);
        assert!(!solved.corner_parity());
        assert!(!solved.edge_parity());
    }

    #[test]
    fn enum_roundtrips() {
        for c in Corner::ARRAY {
            assert_eq!(Corner::try_from(u8::from(c)).unwrap(), c);
        }
        for e in Edge::ARRAY {
            assert_eq!(Edge::try_from(u8::from(e)).unwrap(), e);
        }
        assert!(Corner::try_from(8).is_err());
        assert!(Edge::try_from(12).is_err());
    }

    #[test]
    fn twist_arithmetic() {
        use CornerTwist::*;
        assert_eq!(Clockwise.twist_by(Clockwise), AntiClockwise);
        assert_eq!(Clockwise.twist_by(AntiClockwise), Oriented);
        for t in [Oriented, Clockwise, AntiClockwise] {
            assert_eq!(t.twist_by(t.inverse()), Oriented);
            assert_eq!(t.clockwise().anticlockwise(), t);
        }
        assert_eq!(EdgeFlip::Flipped.flip_by(EdgeFlip::Flipped), EdgeFlip::Oriented);
    }

    #[test]
    fn e_slice_membership() {
        let slice: Vec<Edge> = Edge::ARRAY.into_iter().filter(|e| e.e_slice()).collect();
        assert_eq!(slice, [Edge::FR, Edge::FL, Edge::BL, Edge::BR]);
    }
}

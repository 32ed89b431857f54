//! Implementation of a sticker level cube: 54 colored facelets, the move
//! engine that permutes them, and the validation/decoding step that recovers
//! a [`CubieCube`] from raw colors.

use super::moves::{Move333, Move333Type};
use super::{Corner, CornerTwist, CubieCube, Edge, EdgeFlip};
use crate::error::StateError;
use crate::moves::MoveSequence;

/// A sticker color. The solved scheme pairs White/Yellow on U/D, Red/Orange
/// on F/B and Green/Blue on L/R.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

impl Color {
    fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    fn is_ud(self) -> bool {
        matches!(self, Color::White | Color::Yellow)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A face of the cube. The discriminant is the face's block index into the
/// sticker array.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
#[allow(missing_docs)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The color of each face on a solved cube, indexed by `Face`.
const FACE_COLORS: [Color; 6] = [
    Color::White,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::Orange,
];

/// Index of facelet `pos` on `face`. Facelets on a face are numbered
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
const fn fl(face: Face, pos: usize) -> usize {
    face as usize * 9 + pos
}

const U: Face = Face::U;
const D: Face = Face::D;
const L: Face = Face::L;
const R: Face = Face::R;
const F: Face = Face::F;
const B: Face = Face::B;

/// The three facelets of each corner position, U/D sticker first then
/// clockwise around the piece. Positions are ordered as [`Corner::ARRAY`].
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [fl(U, 8), fl(R, 0), fl(F, 2)], // URF
    [fl(U, 6), fl(F, 0), fl(L, 2)], // UFL
    [fl(U, 0), fl(L, 0), fl(B, 2)], // ULB
    [fl(U, 2), fl(B, 0), fl(R, 2)], // UBR
    [fl(D, 2), fl(F, 8), fl(R, 6)], // DFR
    [fl(D, 0), fl(L, 8), fl(F, 6)], // DLF
    [fl(D, 6), fl(B, 8), fl(L, 6)], // DBL
    [fl(D, 8), fl(R, 8), fl(B, 6)], // DRB
];

/// The reference color signature of each corner piece, in facelet order.
const CORNER_COLORS: [[Color; 3]; 8] = [
    [Color::White, Color::Blue, Color::Red],    // URF
    [Color::White, Color::Red, Color::Green],   // UFL
    [Color::White, Color::Green, Color::Orange], // ULB
    [Color::White, Color::Orange, Color::Blue], // UBR
    [Color::Yellow, Color::Red, Color::Blue],   // DFR
    [Color::Yellow, Color::Green, Color::Red],  // DLF
    [Color::Yellow, Color::Orange, Color::Green], // DBL
    [Color::Yellow, Color::Blue, Color::Orange], // DRB
];

/// The two facelets of each edge position, ordered as [`Edge::ARRAY`].
const EDGE_FACELETS: [[usize; 2]; 12] = [
    [fl(U, 5), fl(R, 1)], // UR
    [fl(U, 7), fl(F, 1)], // UF
    [fl(U, 3), fl(L, 1)], // UL
    [fl(U, 1), fl(B, 1)], // UB
    [fl(D, 5), fl(R, 7)], // DR
    [fl(D, 1), fl(F, 7)], // DF
    [fl(D, 3), fl(L, 7)], // DL
    [fl(D, 7), fl(B, 7)], // DB
    [fl(F, 5), fl(R, 3)], // FR
    [fl(F, 3), fl(L, 5)], // FL
    [fl(B, 5), fl(L, 3)], // BL
    [fl(B, 3), fl(R, 5)], // BR
];

/// The reference color signature of each edge piece, in facelet order.
const EDGE_COLORS: [[Color; 2]; 12] = [
    [Color::White, Color::Blue],    // UR
    [Color::White, Color::Red],     // UF
    [Color::White, Color::Green],   // UL
    [Color::White, Color::Orange],  // UB
    [Color::Yellow, Color::Blue],   // DR
    [Color::Yellow, Color::Red],    // DF
    [Color::Yellow, Color::Green],  // DL
    [Color::Yellow, Color::Orange], // DB
    [Color::Red, Color::Blue],      // FR
    [Color::Red, Color::Green],     // FL
    [Color::Orange, Color::Green],  // BL
    [Color::Orange, Color::Blue],   // BR
];

const fn solved_stickers() -> [Color; 54] {
    let mut s = [Color::White; 54];
    let mut i = 0;
    while i < 54 {
        s[i] = FACE_COLORS[i / 9];
        i += 1;
    }
    s
}

/// Implementation of a sticker cube, representing the cube state as the 54
/// colors a player sees. This is the boundary type handed in by rendering and
/// input layers; the solver treats it as opaque data until decoded.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct StickerCube([Color; 54]);

impl StickerCube {
    /// The solved cube stored as a const.
    pub const SOLVED: StickerCube = StickerCube(solved_stickers());

    /// Construct a cube from a raw sticker array, face blocks in U, D, L, R,
    /// F, B order. The colors are not validated here; decode with
    /// [`to_cubie`](StickerCube::to_cubie) to find out whether they form a
    /// legal state.
    pub fn from_facelets(facelets: [Color; 54]) -> StickerCube {
        StickerCube(facelets)
    }

    /// Set the cube back to the canonical solved coloring.
    pub fn reset(&mut self) {
        *self = StickerCube::SOLVED;
    }

    /// The color of facelet `pos` (0..9) on the given face.
    pub fn facelet(&self, face: Face, pos: usize) -> Color {
        self.0[fl(face, pos)]
    }

    /// The whole sticker array, face blocks in U, D, L, R, F, B order.
    pub fn facelets(&self) -> &[Color; 54] {
        &self.0
    }

    /// Apply a move to the cube. Counter-clockwise and double turns are
    /// performed as repeated clockwise turns of the same face.
    pub fn apply_move(&mut self, mv: Move333) {
        for _ in 0..mv.count {
            self.turn_cw(mv.ty);
        }
    }

    /// Apply a sequence of moves to the cube.
    pub fn apply_moves(&mut self, mvs: &MoveSequence<Move333>) {
        for &m in &mvs.0 {
            self.apply_move(m);
        }
    }

    /// Whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        (0..6).all(|f| {
            let center = self.0[f * 9 + 4];
            self.0[f * 9..f * 9 + 9].iter().all(|&c| c == center)
        })
    }

    /// Whether the sticker state is reachable from solved by legal moves.
    /// Equivalent to [`to_cubie`](StickerCube::to_cubie) succeeding.
    pub fn is_solvable(&self) -> bool {
        self.to_cubie().is_ok()
    }

    /// Turn a face a quarter turn clockwise: rotate the face's own stickers
    /// and cycle the four adjacent three-sticker strips.
    fn turn_cw(&mut self, ty: Move333Type) {
        match ty {
            Move333Type::U => {
                self.rotate_face_cw(U);
                self.cycle4(fl(F, 0), fl(L, 0), fl(B, 0), fl(R, 0));
                self.cycle4(fl(F, 1), fl(L, 1), fl(B, 1), fl(R, 1));
                self.cycle4(fl(F, 2), fl(L, 2), fl(B, 2), fl(R, 2));
            }
            Move333Type::D => {
                self.rotate_face_cw(D);
                self.cycle4(fl(F, 6), fl(R, 6), fl(B, 6), fl(L, 6));
                self.cycle4(fl(F, 7), fl(R, 7), fl(B, 7), fl(L, 7));
                self.cycle4(fl(F, 8), fl(R, 8), fl(B, 8), fl(L, 8));
            }
            Move333Type::L => {
                self.rotate_face_cw(L);
                self.cycle4(fl(U, 0), fl(F, 0), fl(D, 0), fl(B, 8));
                self.cycle4(fl(U, 3), fl(F, 3), fl(D, 3), fl(B, 5));
                self.cycle4(fl(U, 6), fl(F, 6), fl(D, 6), fl(B, 2));
            }
            Move333Type::R => {
                self.rotate_face_cw(R);
                self.cycle4(fl(U, 2), fl(B, 6), fl(D, 2), fl(F, 2));
                self.cycle4(fl(U, 5), fl(B, 3), fl(D, 5), fl(F, 5));
                self.cycle4(fl(U, 8), fl(B, 0), fl(D, 8), fl(F, 8));
            }
            Move333Type::F => {
                self.rotate_face_cw(F);
                self.cycle4(fl(U, 6), fl(R, 0), fl(D, 2), fl(L, 8));
                self.cycle4(fl(U, 7), fl(R, 3), fl(D, 1), fl(L, 5));
                self.cycle4(fl(U, 8), fl(R, 6), fl(D, 0), fl(L, 2));
            }
            Move333Type::B => {
                self.rotate_face_cw(B);
                self.cycle4(fl(U, 2), fl(L, 0), fl(D, 6), fl(R, 8));
                self.cycle4(fl(U, 1), fl(L, 3), fl(D, 7), fl(R, 5));
                self.cycle4(fl(U, 0), fl(L, 6), fl(D, 8), fl(R, 2));
            }
        }
    }

    fn rotate_face_cw(&mut self, face: Face) {
        let b = face as usize * 9;
        self.cycle4(b, b + 2, b + 8, b + 6);
        self.cycle4(b + 1, b + 5, b + 7, b + 3);
    }

    /// Cycle four stickers: a moves to b, b to c, c to d, d to a.
    fn cycle4(&mut self, a: usize, b: usize, c: usize, d: usize) {
        let s = &mut self.0;
        let tmp = s[d];
        s[d] = s[c];
        s[c] = s[b];
        s[b] = s[a];
        s[a] = tmp;
    }

    /// Identify the corner piece at a corner position by matching its three
    /// colors against the reference signatures, along with its twist. `None`
    /// if the colors match no real piece.
    fn corner_at(&self, pos: usize) -> Option<(Corner, CornerTwist)> {
        let cols = CORNER_FACELETS[pos].map(|i| self.0[i]);

        // 0 = U/D color on the U/D facelet, then one per clockwise step away.
        let twist = if cols[0].is_ud() {
            CornerTwist::Oriented
        } else if cols[1].is_ud() {
            CornerTwist::Clockwise
        } else if cols[2].is_ud() {
            CornerTwist::AntiClockwise
        } else {
            return None;
        };

        if cols[0] == cols[1] || cols[1] == cols[2] || cols[0] == cols[2] {
            return None;
        }

        let piece = CORNER_COLORS
            .iter()
            .position(|reference| cols.iter().all(|c| reference.contains(c)))?;
        Some((Corner::ARRAY[piece], twist))
    }

    /// Identify the edge piece at an edge position along with its flip.
    fn edge_at(&self, pos: usize) -> Option<(Edge, EdgeFlip)> {
        let cols = EDGE_FACELETS[pos].map(|i| self.0[i]);

        for (piece, reference) in EDGE_COLORS.iter().enumerate() {
            if cols == *reference {
                return Some((Edge::ARRAY[piece], EdgeFlip::Oriented));
            }
            if cols == [reference[1], reference[0]] {
                return Some((Edge::ARRAY[piece], EdgeFlip::Flipped));
            }
        }
        None
    }

    /// Decode the stickers into a cubie cube, checking the six structural
    /// legality conditions along the way: color counts, corner and edge
    /// identification with no duplicates, twist and flip parity, and equal
    /// permutation parity.
    pub fn to_cubie(&self) -> Result<CubieCube, StateError> {
        let mut counts = [0usize; 6];
        for &c in &self.0 {
            counts[c as usize] += 1;
        }
        if counts != [9; 6] {
            return Err(StateError::ColorCount);
        }

        let mut cube = CubieCube::SOLVED;

        let mut seen_corner = [false; 8];
        for pos in 0..8 {
            let (piece, twist) = self
                .corner_at(pos)
                .ok_or(StateError::UnknownCorner(pos))?;
            if seen_corner[piece as usize] {
                return Err(StateError::DuplicateCorner);
            }
            seen_corner[piece as usize] = true;
            cube.cp[pos] = piece;
            cube.co[pos] = twist;
        }

        let mut seen_edge = [false; 12];
        for pos in 0..12 {
            let (piece, flip) = self.edge_at(pos).ok_or(StateError::UnknownEdge(pos))?;
            if seen_edge[piece as usize] {
                return Err(StateError::DuplicateEdge);
            }
            seen_edge[piece as usize] = true;
            cube.ep[pos] = piece;
            cube.eo[pos] = flip;
        }

        if cube.co_sum() != CornerTwist::Oriented {
            return Err(StateError::CornerTwistParity);
        }
        if cube.eo_sum() != EdgeFlip::Oriented {
            return Err(StateError::EdgeFlipParity);
        }
        if cube.corner_parity() != cube.edge_parity() {
            return Err(StateError::PermutationParity);
        }

        Ok(cube)
    }
}

impl Default for StickerCube {
    fn default() -> Self {
        StickerCube::SOLVED
    }
}

impl From<CubieCube> for StickerCube {
    /// Paint a sticker cube from a cubie state, the inverse of
    /// [`to_cubie`](StickerCube::to_cubie) on legal states.
    fn from(cube: CubieCube) -> StickerCube {
        let mut s = StickerCube::SOLVED.0;

        for pos in 0..8 {
            let piece = cube.cp[pos] as usize;
            let twist = cube.co[pos] as usize;
            for n in 0..3 {
                s[CORNER_FACELETS[pos][(n + twist) % 3]] = CORNER_COLORS[piece][n];
            }
        }
        for pos in 0..12 {
            let piece = cube.ep[pos] as usize;
            let flip = cube.eo[pos] as usize;
            for n in 0..2 {
                s[EDGE_FACELETS[pos][(n + flip) % 2]] = EDGE_COLORS[piece][n];
            }
        }

        StickerCube(s)
    }
}

impl std::fmt::Display for StickerCube {
    /// Render as an unfolded net with one letter per sticker:
    ///
    /// ```text
    ///     UUU
    ///     UUU
    ///     UUU
    /// LLL FFF RRR BBB
    /// LLL FFF RRR BBB
    /// LLL FFF RRR BBB
    ///     DDD
    ///     DDD
    ///     DDD
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            write!(f, "    ")?;
            for col in 0..3 {
                write!(f, "{}", self.facelet(U, row * 3 + col).letter())?;
            }
            writeln!(f)?;
        }
        for row in 0..3 {
            for face in [L, F, R, B] {
                for col in 0..3 {
                    write!(f, "{}", self.facelet(face, row * 3 + col).letter())?;
                }
                if face != B {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        for row in 0..3 {
            write!(f, "    ")?;
            for col in 0..3 {
                write!(f, "{}", self.facelet(D, row * 3 + col).letter())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

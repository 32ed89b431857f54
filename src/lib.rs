//! A 3x3x3 Rubik's cube library built around Kociemba's two phase solving
//! algorithm. The cube is modelled both as 54 colored stickers and as a
//! compact cubie permutation/orientation state; the solver extracts the
//! coordinate projections the two phase method needs and runs a pruned nested
//! iterative-deepening search over precomputed move and pruning tables.

#![deny(missing_docs)]

pub mod coord;
pub mod cube333;
pub mod error;
pub mod moves;

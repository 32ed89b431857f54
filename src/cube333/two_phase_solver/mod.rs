//! A two phase solver for the 3x3x3, after Kociemba.
//!
//! Phase 1 searches over all 18 moves for a sequence taking the cube into the
//! domino subgroup, where every corner and edge is oriented and the E slice
//! edges sit in the slice. Phase 2 finishes the solve using only the ten
//! moves which preserve that subgroup. Both phases run iterative deepening
//! depth first search, pruned by pattern database lower bounds, so the first
//! solution found has the smallest phase 1 depth and, within it, the smallest
//! phase 2 depth. Total length never exceeds [`MAX_SOLUTION_MOVES`].

pub mod move_tables;
pub mod prune;

use self::move_tables::{DrMove, MoveTable, SubMove};
use self::prune::PruneTable;
use crate::coord::Coordinate;
use crate::cube333::coordcube::{
    COCoord, CPCoord, DominoEPCoord, DominoESliceCoord, EOCoord, ESliceCoord,
};
use crate::cube333::moves::{Move333, Move333Type};
use crate::cube333::{CubieCube, StickerCube};
use crate::moves::MoveSequence;

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::OnceLock;

/// The deepest phase 1 search ever needed.
pub const MAX_PHASE1_MOVES: usize = 12;

/// The longest solution the solver will return. Every valid cube solves
/// within this bound.
pub const MAX_SOLUTION_MOVES: usize = 31;

/// Sentinel reported by [`SolveProgress::current_depth`] while the shared
/// tables are still being built.
pub const BUILDING_TABLES: i32 = -1;

/// Shared state for observing and cancelling a running solve. All fields are
/// atomic, so one thread can run [`Solver::solve_with`] while another polls
/// or cancels.
#[derive(Debug, Default)]
pub struct SolveProgress {
    cancelled: AtomicBool,
    nodes: AtomicU64,
    depth: AtomicI32,
}

impl SolveProgress {
    /// A fresh progress handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the solve to stop. The search polls this at every node and
    /// returns an empty sequence shortly after.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](SolveProgress::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Nodes visited so far, across both phases.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// The phase 1 depth currently being searched, or [`BUILDING_TABLES`]
    /// while table construction is still in progress.
    pub fn current_depth(&self) -> i32 {
        self.depth.load(Ordering::Relaxed)
    }

    fn visit_node(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    fn set_depth(&self, depth: i32) {
        self.depth.store(depth, Ordering::Relaxed);
    }
}

/// All move and pruning tables the search needs, built once per process.
struct Tables {
    co_moves: MoveTable<Move333, COCoord, 18>,
    eo_moves: MoveTable<Move333, EOCoord, 18>,
    slice_moves: MoveTable<Move333, ESliceCoord, 18>,
    cp_moves: MoveTable<DrMove, CPCoord, 10>,
    ep_moves: MoveTable<DrMove, DominoEPCoord, 10>,
    sp_moves: MoveTable<DrMove, DominoESliceCoord, 10>,
    co_slice_prune: PruneTable<COCoord, ESliceCoord, Move333, 18>,
    eo_slice_prune: PruneTable<EOCoord, ESliceCoord, Move333, 18>,
    cp_sp_prune: PruneTable<CPCoord, DominoESliceCoord, DrMove, 10>,
    ep_sp_prune: PruneTable<DominoEPCoord, DominoESliceCoord, DrMove, 10>,
}

impl Tables {
    fn generate() -> Self {
        let co_moves = MoveTable::generate();
        let eo_moves = MoveTable::generate();
        let slice_moves = MoveTable::generate();
        let cp_moves = MoveTable::generate();
        let ep_moves = MoveTable::generate();
        let sp_moves = MoveTable::generate();

        let co_slice_prune = PruneTable::generate(&co_moves, &slice_moves);
        let eo_slice_prune = PruneTable::generate(&eo_moves, &slice_moves);
        let cp_sp_prune = PruneTable::generate(&cp_moves, &sp_moves);
        let ep_sp_prune = PruneTable::generate(&ep_moves, &sp_moves);

        Tables {
            co_moves,
            eo_moves,
            slice_moves,
            cp_moves,
            ep_moves,
            sp_moves,
            co_slice_prune,
            eo_slice_prune,
            cp_sp_prune,
            ep_sp_prune,
        }
    }
}

/// The process wide table cache. The first caller builds; concurrent callers
/// block until the build finishes; afterwards access is lock free.
fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::generate)
}

/// Whether a move on face `ty` may follow a move on face `last`. Repeats of
/// the same face are forbidden, and of two adjacent moves on the same axis
/// only one order is allowed, since they commute.
fn move_allowed(ty: Move333Type, last: Option<Move333Type>) -> bool {
    match last {
        None => true,
        Some(last) => {
            ty != last && !(ty.axis() == last.axis() && (ty as usize) < (last as usize))
        }
    }
}

/// A two phase solver instance. Carries no state of its own; all tables are
/// shared process wide, so the type is free to construct.
#[derive(Debug, Default, Clone, Copy)]
pub struct Solver;

impl Solver {
    /// Create a solver. Tables are not built until the first solve.
    pub fn new() -> Self {
        Solver
    }

    /// Solve a cube, returning a sequence of at most [`MAX_SOLUTION_MOVES`]
    /// moves which brings it to the solved state. Returns an empty sequence
    /// when the cube is already solved or when its coloring is not a
    /// reachable cube state. The input is never mutated.
    pub fn solve(&self, cube: &StickerCube) -> MoveSequence<Move333> {
        self.solve_with(cube, &SolveProgress::new())
    }

    /// [`solve`](Solver::solve) with cooperative cancellation and progress
    /// reporting. A cancelled search returns an empty sequence with no
    /// partial solution.
    pub fn solve_with(
        &self,
        cube: &StickerCube,
        progress: &SolveProgress,
    ) -> MoveSequence<Move333> {
        let empty = MoveSequence(Vec::new());

        // Unsolvable colorings are rejected up front rather than searched.
        let Ok(state) = cube.to_cubie() else {
            return empty;
        };

        progress.set_depth(BUILDING_TABLES);
        let tables = tables();

        let search = Search {
            tables,
            progress,
        };

        for d1 in 0..=MAX_PHASE1_MOVES {
            if progress.is_cancelled() {
                break;
            }
            progress.set_depth(d1 as i32);

            let mut path = Vec::with_capacity(d1);
            let co = COCoord::from_puzzle(&state);
            let eo = EOCoord::from_puzzle(&state);
            let slice = ESliceCoord::from_puzzle(&state);
            if let Some(solution) = search.phase1(state, co, eo, slice, d1, None, &mut path) {
                return solution.cancel();
            }
        }

        empty
    }
}

struct Search<'a> {
    tables: &'a Tables,
    progress: &'a SolveProgress,
}

impl Search<'_> {
    /// Depth first search for a phase 1 goal exactly `depth_left` moves
    /// away. On success the returned sequence is the full solution, phase 2
    /// included.
    #[allow(clippy::too_many_arguments)]
    fn phase1(
        &self,
        state: CubieCube,
        co: COCoord,
        eo: EOCoord,
        slice: ESliceCoord,
        depth_left: usize,
        last: Option<Move333Type>,
        path: &mut Vec<Move333>,
    ) -> Option<MoveSequence<Move333>> {
        self.progress.visit_node();
        if self.progress.is_cancelled() {
            return None;
        }

        if depth_left == 0 {
            if co.solved() && eo.solved() && slice.solved() {
                return self.phase2_deepening(state, path, last);
            }
            return None;
        }

        let bound = self
            .tables
            .co_slice_prune
            .distance(co, slice)
            .max(self.tables.eo_slice_prune.distance(eo, slice));
        if bound as usize > depth_left {
            return None;
        }

        for &m in <Move333 as SubMove>::MOVE_LIST {
            if !move_allowed(m.ty, last) {
                continue;
            }

            let next = state.make_move(m);
            let nco = self.tables.co_moves.make_move(co, m);
            let neo = self.tables.eo_moves.make_move(eo, m);
            let nslice = self.tables.slice_moves.make_move(slice, m);

            path.push(m);
            let found =
                self.phase1(next, nco, neo, nslice, depth_left - 1, Some(m.ty), path);
            if found.is_some() {
                return found;
            }
            path.pop();
        }

        None
    }

    /// Iterative deepening over phase 2, bounded so the whole solution stays
    /// within [`MAX_SOLUTION_MOVES`].
    fn phase2_deepening(
        &self,
        state: CubieCube,
        phase1_path: &[Move333],
        last: Option<Move333Type>,
    ) -> Option<MoveSequence<Move333>> {
        let cp = CPCoord::from_puzzle(&state);
        let ep = DominoEPCoord::from_puzzle(&state);
        let sp = DominoESliceCoord::from_puzzle(&state);

        let budget = MAX_SOLUTION_MOVES - phase1_path.len();
        for d2 in 0..=budget {
            if self.progress.is_cancelled() {
                return None;
            }

            let mut path = Vec::with_capacity(d2);
            if self.phase2(cp, ep, sp, d2, last, &mut path) {
                let solution: Vec<Move333> = phase1_path
                    .iter()
                    .copied()
                    .chain(path.into_iter().map(DrMove::into_move))
                    .collect();
                return Some(MoveSequence(solution));
            }
        }

        None
    }

    fn phase2(
        &self,
        cp: CPCoord,
        ep: DominoEPCoord,
        sp: DominoESliceCoord,
        depth_left: usize,
        last: Option<Move333Type>,
        path: &mut Vec<DrMove>,
    ) -> bool {
        self.progress.visit_node();
        if self.progress.is_cancelled() {
            return false;
        }

        if depth_left == 0 {
            return cp.solved() && ep.solved() && sp.solved();
        }

        let bound = self
            .tables
            .cp_sp_prune
            .distance(cp, sp)
            .max(self.tables.ep_sp_prune.distance(ep, sp));
        if bound as usize > depth_left {
            return false;
        }

        for &m in DrMove::MOVE_LIST {
            let ty = m.into_move().ty;
            if !move_allowed(ty, last) {
                continue;
            }

            let ncp = self.tables.cp_moves.make_move(cp, m);
            let nep = self.tables.ep_moves.make_move(ep, m);
            let nsp = self.tables.sp_moves.make_move(sp, m);

            path.push(m);
            if self.phase2(ncp, nep, nsp, depth_left - 1, Some(ty), path) {
                return true;
            }
            path.pop();
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mv;

    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn solved_cube_solves_to_empty() {
        let solver = Solver::new();
        assert!(solver.solve(&StickerCube::SOLVED).is_empty());
    }

    #[test]
    fn fixed_scramble_solves() {
        let scramble = MoveSequence(vec![
            mv!(R, 1),
            mv!(U, 1),
            mv!(R, 3),
            mv!(U, 3),
            mv!(F, 2),
            mv!(L, 2),
            mv!(D, 1),
            mv!(B, 2),
            mv!(U, 2),
            mv!(R, 2),
            mv!(F, 3),
            mv!(L, 1),
            mv!(D, 3),
            mv!(B, 1),
            mv!(U, 1),
            mv!(R, 1),
            mv!(F, 3),
            mv!(D, 2),
            mv!(L, 3),
            mv!(B, 2),
        ]);

        let mut cube = StickerCube::SOLVED;
        cube.apply_moves(&scramble);

        let solution = Solver::new().solve(&cube);
        assert!(solution.len() <= MAX_SOLUTION_MOVES);

        cube.apply_moves(&solution);
        assert!(cube.is_solved());
    }

    #[test]
    fn unsolvable_cube_returns_empty_without_searching() {
        use crate::cube333::Face;

        // Swap stickers of two different physical pieces (U8 and F0).
        let mut facelets = *StickerCube::SOLVED.facelets();
        facelets.swap(Face::U as usize * 9 + 8, Face::F as usize * 9);
        let cube = StickerCube::from_facelets(facelets);
        assert!(!cube.is_solvable());

        let progress = SolveProgress::new();
        let solution = Solver::new().solve_with(&cube, &progress);
        assert!(solution.is_empty());
        assert_eq!(progress.nodes_visited(), 0);
    }

    #[test]
    fn cancelled_before_start_returns_empty() {
        let mut cube = StickerCube::SOLVED;
        cube.apply_moves(&MoveSequence(vec![mv!(R, 1), mv!(U, 1), mv!(F, 1)]));

        let progress = SolveProgress::new();
        progress.cancel();
        assert!(Solver::new().solve_with(&cube, &progress).is_empty());
    }

    #[test]
    fn progress_reports_nodes_and_depth() {
        let mut cube = StickerCube::SOLVED;
        cube.apply_moves(&MoveSequence(vec![
            mv!(R, 1),
            mv!(U, 2),
            mv!(F, 3),
            mv!(D, 1),
            mv!(L, 2),
        ]));

        let progress = SolveProgress::new();
        let solution = Solver::new().solve_with(&cube, &progress);
        assert!(!solution.is_empty());
        assert!(progress.nodes_visited() > 0);
        assert!(progress.current_depth() >= 0);
    }

    #[test]
    fn solve_does_not_mutate_input() {
        let mut cube = StickerCube::SOLVED;
        cube.apply_moves(&MoveSequence(vec![mv!(R, 1), mv!(U, 1)]));
        let before = cube;

        Solver::new().solve(&cube);
        assert_eq!(cube, before);
    }

    #[test]
    fn same_axis_moves_keep_one_canonical_order() {
        use Move333Type::*;
        for (a, b) in [(R, L), (U, D), (F, B)] {
            let one_way = move_allowed(b, Some(a));
            let other_way = move_allowed(a, Some(b));
            assert_ne!(one_way, other_way);
        }
        for ty in [R, L, U, D, F, B] {
            assert!(!move_allowed(ty, Some(ty)));
            assert!(move_allowed(ty, None));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn random_scrambles_solve(mvs in vec(any::<Move333>(), 1..20).prop_map(MoveSequence)) {
            let mut cube = StickerCube::SOLVED;
            cube.apply_moves(&mvs);

            let solution = Solver::new().solve(&cube);
            prop_assert!(solution.len() <= MAX_SOLUTION_MOVES);

            cube.apply_moves(&solution);
            prop_assert!(cube.is_solved());
        }
    }
}

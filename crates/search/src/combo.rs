//! Combo continuation search: the longest chain of style-legal placements
//! reachable from the current board, queue and hold.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sixres_core::{Board, Piece, Placement, Source};
use sixres_engine::{
    apply_placement, enumerate, fills_only_empty, is_grounded, Geometry, MovementConfig,
};
use smallvec::SmallVec;
use tracing::{debug, warn, Level};

use crate::config::{SearchConfig, Style};
use crate::foresight::ForesightEvaluator;

/// One placement of a continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuationPly {
    /// Board after the placement and its line clears.
    pub board: Board,
    pub piece: Piece,
    pub source: Source,
    pub placement: Placement,
    pub lines: u8,
}

/// Result of a top-level search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decision {
    pub plan: Vec<ContinuationPly>,
    /// Continuations sharing the maximum length.
    pub tied: usize,
    /// No legal continuation existed and a random placement was chosen.
    pub fallback: bool,
}

impl Decision {
    pub fn first(&self) -> Option<&ContinuationPly> {
        self.plan.first()
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    pub fn placements(&self) -> impl Iterator<Item = (Piece, Placement)> + '_ {
        self.plan.iter().map(|ply| (ply.piece, ply.placement))
    }
}

/// A piece choice for one ply and how the queue moves afterwards.
#[derive(Clone, Copy, Debug)]
struct Branch {
    piece: Piece,
    source: Source,
    /// Queue pieces consumed.
    advance: usize,
    hold_after: Option<Piece>,
}

/// Sources in priority order: current, hold, then next (only with an empty hold).
fn branches(queue: &[Piece], hold: Option<Piece>) -> SmallVec<[Branch; 3]> {
    let mut out = SmallVec::new();
    if let Some(&current) = queue.first() {
        out.push(Branch {
            piece: current,
            source: Source::Current,
            advance: 1,
            hold_after: hold,
        });
    }
    if let Some(held) = hold {
        out.push(Branch {
            piece: held,
            source: Source::Hold,
            advance: 0,
            hold_after: None,
        });
    }
    if hold.is_none() && queue.len() >= 2 {
        out.push(Branch {
            piece: queue[1],
            source: Source::Next,
            advance: 2,
            hold_after: Some(queue[0]),
        });
    }
    out
}

pub struct ComboSearch<'g> {
    geometry: &'g Geometry,
    movement: MovementConfig,
    style: Style,
    vision: usize,
    foresight: usize,
    rng: SmallRng,
}

impl<'g> ComboSearch<'g> {
    pub fn new(geometry: &'g Geometry, config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            geometry,
            movement: config.movement(),
            style: config.style,
            vision: config.vision,
            foresight: config.foresight,
            rng,
        }
    }

    pub fn geometry(&self) -> &'g Geometry {
        self.geometry
    }

    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn vision(&self) -> usize {
        self.vision
    }

    pub fn foresight(&self) -> usize {
        self.foresight
    }

    /// Grounded placements covering only empty cells, in enumerator order.
    /// The style filter is not applied.
    pub fn candidates(&self, board: &Board, piece: Piece) -> Vec<Placement> {
        enumerate(self.geometry, board, piece, &self.movement)
            .placements()
            .filter(|p| is_grounded(self.geometry, board, p))
            .filter(|p| fills_only_empty(self.geometry, board, p))
            .collect()
    }

    /// Every style-legal first ply with the queue and hold it leaves behind.
    fn plies<'q>(
        &self,
        board: &Board,
        queue: &'q [Piece],
        hold: Option<Piece>,
    ) -> Vec<(ContinuationPly, &'q [Piece], Option<Piece>)> {
        let before = board.filled_count();
        let mut out = Vec::new();
        for branch in branches(queue, hold) {
            let rest = &queue[branch.advance.min(queue.len())..];
            for placement in self.candidates(board, branch.piece) {
                let (after, lines) = apply_placement(self.geometry, board, &placement);
                if !self.style.accepts(before, after.filled_count()) {
                    continue;
                }
                let ply = ContinuationPly {
                    board: after,
                    piece: branch.piece,
                    source: branch.source,
                    placement,
                    lines,
                };
                out.push((ply, rest, branch.hold_after));
            }
        }
        out
    }

    /// Longest continuation; ties keep the earliest in source then enumerator order.
    /// The queue is used as given, without the vision bound.
    pub fn continuation(
        &self,
        board: &Board,
        queue: &[Piece],
        hold: Option<Piece>,
    ) -> Vec<ContinuationPly> {
        // every remaining piece placed: nothing can beat it
        let bound = queue.len() + usize::from(hold.is_some());
        let mut best = Vec::new();
        if bound == 0 {
            return best;
        }

        for (ply, rest, hold_after) in self.plies(board, queue, hold) {
            let tail = self.continuation(&ply.board, rest, hold_after);
            if 1 + tail.len() <= best.len() {
                continue;
            }
            best.clear();
            best.push(ply);
            best.extend(tail);
            if best.len() == bound {
                return best;
            }
        }
        best
    }

    /// Best continuation for the vision-bounded queue. Equal-length results are
    /// ranked by foresight; with no legal continuation a random raw placement of
    /// the first piece is returned instead.
    pub fn search(&mut self, board: &Board, queue: &[Piece], hold: Option<Piece>) -> Decision {
        let queue = &queue[..queue.len().min(self.vision)];

        let mut tied: Vec<Vec<ContinuationPly>> = Vec::new();
        let mut best_len = 0;
        for (ply, rest, hold_after) in self.plies(board, queue, hold) {
            let tail = self.continuation(&ply.board, rest, hold_after);
            let len = 1 + tail.len();
            if len < best_len {
                continue;
            }
            if len > best_len {
                best_len = len;
                tied.clear();
            }
            let mut path = Vec::with_capacity(len);
            path.push(ply);
            path.extend(tail);
            tied.push(path);
        }

        if tied.is_empty() {
            return self.fallback(board, queue, hold);
        }

        let chosen = if tied.len() > 1 && self.foresight > 0 {
            let finals: Vec<Board> = tied
                .iter()
                .filter_map(|path| path.last().map(|ply| ply.board.clone()))
                .collect();
            ForesightEvaluator::new(self.foresight)
                .choose(self, &finals)
                .unwrap_or(0)
        } else {
            0
        };
        let count = tied.len();
        let plan = tied.swap_remove(chosen);

        if tracing::enabled!(target: "sixres::combo", Level::DEBUG) {
            let pieces: String = plan.iter().map(|ply| ply.piece.letter()).collect();
            debug!(
                target: "sixres::combo",
                length = plan.len(),
                tied = count,
                chosen,
                style = ?self.style,
                pieces = %pieces,
                "continuation chosen"
            );
        }

        Decision {
            plan,
            tied: count,
            fallback: false,
        }
    }

    fn fallback(&mut self, board: &Board, queue: &[Piece], hold: Option<Piece>) -> Decision {
        let (piece, source) = match (queue.first(), hold) {
            (Some(&piece), _) => (piece, Source::Current),
            (None, Some(held)) => (held, Source::Hold),
            (None, None) => return Decision::default(),
        };

        let raw: Vec<Placement> = enumerate(self.geometry, board, piece, &self.movement)
            .placements()
            .collect();
        let Some(&placement) = raw.choose(&mut self.rng) else {
            warn!(target: "sixres::combo", piece = %piece, "no placement at all, blocked out");
            return Decision {
                fallback: true,
                ..Decision::default()
            };
        };

        warn!(
            target: "sixres::combo",
            piece = %piece,
            candidates = raw.len(),
            placement = %placement,
            style = ?self.style,
            "no legal continuation, placing randomly"
        );
        let (after, lines) = apply_placement(self.geometry, board, &placement);
        Decision {
            plan: vec![ContinuationPly {
                board: after,
                piece,
                source,
                placement,
                lines,
            }],
            tied: 0,
            fallback: true,
        }
    }
}

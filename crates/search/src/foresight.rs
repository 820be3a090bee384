//! Foresight tie-break: score boards by how many hypothetical piece sequences
//! still allow a continuation.

use rustc_hash::FxHashMap;
use sixres_core::{sequences, Board, Piece};
use tracing::debug;

use crate::combo::ComboSearch;

/// Hypothetical queues are searched with this much vision and no hold.
const FORESIGHT_VISION: usize = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Support {
    /// Sequences tried.
    pub evaluated: usize,
    /// Sequences with a non-empty continuation.
    pub supported: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct ForesightEvaluator {
    depth: usize,
}

impl ForesightEvaluator {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run every length-`depth` sequence over the full piece alphabet against `board`.
    pub fn evaluate(&self, search: &ComboSearch<'_>, board: &Board) -> Support {
        // only the visible prefix reaches the search
        let mut seen: FxHashMap<Vec<Piece>, bool> = FxHashMap::default();
        let mut support = Support::default();

        for queue in sequences(&Piece::ALL, self.depth) {
            let visible = &queue[..queue.len().min(FORESIGHT_VISION)];
            let ok = match seen.get(visible) {
                Some(&ok) => ok,
                None => {
                    let ok = !search.continuation(board, visible, None).is_empty();
                    seen.insert(visible.to_vec(), ok);
                    ok
                }
            };
            support.evaluated += 1;
            support.supported += usize::from(ok);
        }
        support
    }

    pub fn evaluate_all(&self, search: &ComboSearch<'_>, boards: &[Board]) -> Vec<Support> {
        let mut cache: FxHashMap<&Board, Support> = FxHashMap::default();
        boards
            .iter()
            .map(|board| {
                *cache
                    .entry(board)
                    .or_insert_with(|| self.evaluate(search, board))
            })
            .collect()
    }

    /// Index of the best-supported board; the earliest wins ties.
    pub fn choose(&self, search: &ComboSearch<'_>, boards: &[Board]) -> Option<usize> {
        let supports = self.evaluate_all(search, boards);
        let mut best: Option<(usize, usize)> = None;
        for (idx, support) in supports.iter().enumerate() {
            if best.map_or(true, |(_, top)| support.supported > top) {
                best = Some((idx, support.supported));
            }
        }

        if let Some((idx, supported)) = best {
            debug!(
                target: "sixres::foresight",
                candidates = boards.len(),
                depth = self.depth,
                chosen = idx,
                supported,
                evaluated = supports[idx].evaluated,
                "foresight tie-break"
            );
        }
        best.map(|(idx, _)| idx)
    }
}

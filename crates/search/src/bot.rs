//! Bot glue: search, then turn the first ply into keys.

use sixres_core::{Board, GameState, KeySequence, Piece, Placement, Source};
use sixres_engine::{apply_placement, finesse, Geometry};
use tracing::{debug, warn};

use crate::combo::{ComboSearch, Decision};
use crate::config::{SearchConfig, Style};

/// Everything needed to play one piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub piece: Piece,
    pub source: Source,
    /// Where the keys land the piece; differs from the plan on a finesse fallback.
    pub placement: Placement,
    /// Full input for the turn, ending with `HardDrop`.
    pub keys: KeySequence,
    pub board_after: Board,
    pub lines: u8,
    pub style: Style,
    pub decision: Decision,
    /// The planned pose could not be reached and the piece was sonic-dropped.
    pub finesse_fallback: bool,
}

impl Turn {
    /// Whether the search found no legal continuation.
    pub fn fallback(&self) -> bool {
        self.decision.fallback
    }

    /// Apply this turn to the state it was planned from.
    pub fn play(&self, state: &mut GameState) {
        state.advance(self.source, self.board_after.clone(), self.lines);
    }
}

pub struct Bot<'g> {
    config: SearchConfig,
    search: ComboSearch<'g>,
}

impl Bot<'static> {
    /// Bot over the built-in geometry.
    pub fn standard(config: SearchConfig) -> Self {
        Self::new(Geometry::standard(), config)
    }
}

impl<'g> Bot<'g> {
    pub fn new(geometry: &'g Geometry, config: SearchConfig) -> Self {
        let search = ComboSearch::new(geometry, &config);
        Self { config, search }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Style for a state: upstack while the residual opener is unfinished.
    /// A running combo is never interrupted to rebuild the residual.
    pub fn style_for(&self, state: &GameState) -> Style {
        match self.config.residual {
            Some(residual) if state.combo == 0 && state.board.filled_count() < residual => {
                Style::Upstack
            }
            _ => self.config.style,
        }
    }

    /// Plan the next piece. `None` when nothing is left to play or the piece cannot spawn.
    pub fn plan(&mut self, state: &GameState) -> Option<Turn> {
        let queue = state.pieces();
        if queue.is_empty() && state.hold.is_none() {
            return None;
        }

        let style = self.style_for(state);
        self.search.set_style(style);
        let decision = self.search.search(&state.board, &queue, state.hold);
        let first = decision.first()?.clone();

        let geometry = self.search.geometry();
        let keys = finesse(
            geometry,
            &state.board,
            &first.placement,
            first.source.uses_hold(),
            self.search.movement(),
        )?;

        let (board_after, lines) = if keys.fallback {
            apply_placement(geometry, &state.board, &keys.placement)
        } else {
            (first.board.clone(), first.lines)
        };

        if keys.fallback {
            warn!(
                target: "sixres::bot",
                piece = %first.piece,
                planned = %first.placement,
                landed = %keys.placement,
                "planned pose unreachable"
            );
        }
        debug!(
            target: "sixres::bot",
            piece = %first.piece,
            source = %first.source,
            placement = %keys.placement,
            keys = %keys.inputs(),
            plan = decision.len(),
            style = ?style,
            "turn planned"
        );

        Some(Turn {
            piece: first.piece,
            source: first.source,
            placement: keys.placement,
            keys: keys.inputs(),
            board_after,
            lines,
            style,
            decision,
            finesse_fallback: keys.fallback,
        })
    }
}

use sixres_core::{Board, GameState, InputAction, Piece, Placement, Rotation, Source};
use sixres_engine::Geometry;
use sixres_engine::apply_placement;
use sixres_search::{Bot, ComboSearch, ForesightEvaluator, SearchConfig, Style};

fn rows(rows: &[&str]) -> Board {
    Board::from_rows(4, 20, rows).expect("valid rows")
}

fn config(style: Style) -> SearchConfig {
    SearchConfig {
        style,
        seed: Some(2024),
        ..SearchConfig::default()
    }
}

fn search(style: Style) -> ComboSearch<'static> {
    ComboSearch::new(Geometry::standard(), &config(style))
}

mod combo_search {
    use super::*;

    #[test]
    fn test_i_into_well_clears() {
        let board = rows(&["GGG."]);
        let decision = search(Style::Combo).search(&board, &[Piece::I], None);

        assert!(!decision.fallback);
        assert_eq!(decision.len(), 1);
        let ply = decision.first().expect("one ply");
        assert_eq!(
            ply.placement,
            Placement::new(Piece::I, Rotation::East, 2, 2)
        );
        assert_eq!(ply.source, Source::Current);
        assert_eq!(ply.lines, 1);
        assert_eq!(ply.board.filled_count(), 3);
        for y in 0..3 {
            assert!(ply.board.is_filled(3, y));
        }
        assert!(ply.board.is_row_empty(ply.board.height() - 1));
    }

    #[test]
    fn test_two_ply_combo() {
        let board = rows(&["G..."]);
        let decision = search(Style::Combo).search(&board, &[Piece::L, Piece::J], None);

        let placed: Vec<_> = decision.plan.iter().map(|p| (p.piece, p.source)).collect();
        assert_eq!(
            placed,
            vec![(Piece::L, Source::Current), (Piece::J, Source::Current)]
        );
        let last = &decision.plan[1].board;
        assert_eq!(last.filled_count(), 1);
        assert!(last.is_filled(0, 0));
    }

    #[test]
    fn test_next_then_held_piece() {
        let board = rows(&["G..."]);
        let decision = search(Style::Combo).search(&board, &[Piece::J, Piece::L], None);

        let placed: Vec<_> = decision.placements().map(|(piece, _)| piece).collect();
        assert_eq!(placed, vec![Piece::L, Piece::J]);
        assert_eq!(decision.plan[0].source, Source::Next);
        assert_eq!(decision.plan[1].source, Source::Hold);
        assert_eq!(decision.tied, 1);
    }

    #[test]
    fn test_ties_counted() {
        let board = rows(&["G..G"]);
        let decision = search(Style::Combo).search(&board, &[Piece::S], Some(Piece::Z));
        assert_eq!(decision.len(), 1);
        assert_eq!(decision.tied, 4);
        assert!(!decision.fallback);
    }

    #[test]
    fn test_ties_without_foresight_take_first() {
        let cfg = SearchConfig {
            foresight: 0,
            ..config(Style::Combo)
        };
        let mut s = ComboSearch::new(Geometry::standard(), &cfg);
        let decision = s.search(&rows(&["G..G"]), &[Piece::S], Some(Piece::Z));
        assert_eq!(decision.tied, 4);
        let first = decision.first().expect("one ply");
        assert_eq!(first.piece, Piece::S);
        assert_eq!(first.source, Source::Current);
    }

    #[test]
    fn test_foresight_picks_best_supported_tie() {
        let board = rows(&["GG..", "G..."]);
        let mut with = search(Style::Combo);
        let mut without = ComboSearch::new(
            Geometry::standard(),
            &SearchConfig {
                foresight: 0,
                ..config(Style::Combo)
            },
        );

        let chosen = with.search(&board, &[Piece::T], None);
        let first = without.search(&board, &[Piece::T], None);
        assert!(chosen.tied > 1);
        assert_eq!(chosen.tied, first.tied);

        let chosen_ply = chosen.first().expect("one ply");
        let first_ply = first.first().expect("one ply");
        assert_ne!(chosen_ply.placement, first_ply.placement);
        assert_eq!(
            chosen_ply.placement,
            Placement::new(Piece::T, Rotation::West, 3, 1)
        );
        assert_eq!(
            first_ply.placement,
            Placement::new(Piece::T, Rotation::East, 2, 1)
        );

        // every legal T ply ties with a single-piece queue
        let evaluator = ForesightEvaluator::new(with.foresight());
        let before = board.filled_count();
        let supports: Vec<usize> = with
            .candidates(&board, Piece::T)
            .iter()
            .map(|p| apply_placement(Geometry::standard(), &board, p).0)
            .filter(|after| Style::Combo.accepts(before, after.filled_count()))
            .map(|after| evaluator.evaluate(&with, &after).supported)
            .collect();
        assert_eq!(supports.len(), chosen.tied);

        let best = supports.iter().copied().max().expect("ties");
        let got = evaluator.evaluate(&with, &chosen_ply.board).supported;
        assert_eq!(got, best);
        assert!(evaluator.evaluate(&without, &first_ply.board).supported < best);
    }

    #[test]
    fn test_random_fallback() {
        let board = Board::new(4, 20);
        let decision = search(Style::Combo).search(&board, &[Piece::T], None);
        assert!(decision.fallback);
        assert_eq!(decision.len(), 1);
        assert_eq!(decision.plan[0].piece, Piece::T);
        assert_eq!(decision.plan[0].board.filled_count(), 4);
    }

    #[test]
    fn test_upstack_builds() {
        let cfg = SearchConfig {
            vision: 1,
            ..config(Style::Upstack)
        };
        let mut s = ComboSearch::new(Geometry::standard(), &cfg);
        let board = Board::new(4, 20);
        let decision = s.search(&board, &[Piece::O], None);
        assert!(!decision.fallback);
        assert!(decision.plan[0].board.filled_count() > board.filled_count());
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = rows(&["G...", "GG.G"]);
        let queue = [Piece::T, Piece::L, Piece::J, Piece::I, Piece::O];
        let a = search(Style::Combo).search(&board, &queue, None);
        let b = search(Style::Combo).search(&board, &queue, None);
        assert_eq!(a, b);
    }
}

mod bot {
    use super::*;

    #[test]
    fn test_keys_for_well() {
        let mut bot = Bot::standard(config(Style::Combo));
        let state = GameState::with_queue(rows(&["GGG."]), vec![Piece::I]);
        let turn = bot.plan(&state).expect("a turn");

        assert_eq!(
            &*turn.keys,
            &[
                InputAction::RotateCW,
                InputAction::MoveRight,
                InputAction::HardDrop
            ]
        );
        assert!(!turn.finesse_fallback);
        assert!(!turn.fallback());
    }

    #[test]
    fn test_hold_prefixed_keys() {
        let mut bot = Bot::standard(config(Style::Combo));
        let state = GameState::with_queue(rows(&["G..."]), vec![Piece::J, Piece::L]);
        let turn = bot.plan(&state).expect("a turn");

        assert_eq!(turn.piece, Piece::L);
        assert_eq!(turn.source, Source::Next);
        assert_eq!(
            &*turn.keys,
            &[
                InputAction::Hold,
                InputAction::MoveRight,
                InputAction::HardDrop
            ]
        );
    }

    #[test]
    fn test_plays_out_plan() {
        let mut bot = Bot::standard(config(Style::Combo));
        let mut state = GameState::with_queue(rows(&["G..."]), vec![Piece::J, Piece::L]);

        let first = bot.plan(&state).expect("first turn");
        first.play(&mut state);
        assert_eq!(state.hold, Some(Piece::J));
        assert_eq!(state.combo, 1);

        let second = bot.plan(&state).expect("second turn");
        assert_eq!(second.piece, Piece::J);
        assert_eq!(second.source, Source::Hold);
        assert_eq!(second.keys.first(), Some(&InputAction::Hold));
        second.play(&mut state);

        assert_eq!(state.combo, 2);
        assert_eq!(state.pieces_placed, 2);
        assert_eq!(state.board.filled_count(), 1);
        assert!(bot.plan(&state).is_none());
    }

    #[test]
    fn test_residual_opener_builds_first() {
        let cfg = SearchConfig {
            residual: Some(6),
            ..config(Style::Combo)
        };
        let mut bot = Bot::standard(cfg);
        let state = GameState::with_queue(Board::new(4, 20), vec![Piece::O, Piece::T]);
        let turn = bot.plan(&state).expect("a turn");
        assert_eq!(turn.style, Style::Upstack);
        assert!(!turn.fallback());
        assert_eq!(turn.board_after.filled_count(), 4);
    }
}

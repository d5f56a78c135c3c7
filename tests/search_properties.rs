//! Search behaviour: pruning soundness against a plain minimax reference,
//! terminal positions, and material preferences.

use bitmate::board::{move_to_uci, parse_uci_move, Board, Color, PieceKind};
use bitmate::eval;
use bitmate::search::{Search, SearchParams, INFINITE, MATE};

/// Unpruned reference with the same evaluation and terminal policy.
fn minimax(board: &Board, depth: u8) -> i16 {
    if depth == 0 {
        return eval::evaluate(board);
    }
    let moves = board.generate_moves(board.side);
    if moves.is_empty() {
        return if board.in_check(board.side) {
            match board.side {
                Color::White => -MATE,
                Color::Black => MATE,
            }
        } else {
            0
        };
    }

    let maximizing = board.side == Color::White;
    let mut best = if maximizing { -INFINITE } else { INFINITE };
    for mv in moves {
        let mut branch = board.clone();
        branch.make_move(mv);
        let score = minimax(&branch, depth - 1);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

fn replay(moves: &[&str]) -> Board {
    let mut board = Board::start_position();
    for move_str in moves {
        let mv = parse_uci_move(&board, move_str).expect(move_str);
        board.make_move(mv);
    }
    board
}

fn assert_pruning_sound(board: &Board, depth: u8) {
    let mut search = Search::new(SearchParams::new().max_depth(depth));
    let maximizing = board.side == Color::White;
    let pruned = search.alpha_beta(board, depth, -INFINITE, INFINITE, maximizing);
    assert_eq!(
        pruned,
        minimax(board, depth),
        "alpha-beta diverged from plain minimax at depth {}",
        depth
    );
}

#[test]
fn alpha_beta_matches_plain_minimax() {
    bitmate::init();

    assert_pruning_sound(&Board::start_position(), 2);
    assert_pruning_sound(&replay(&["e2e4", "e7e5", "g1f3"]), 2);
    assert_pruning_sound(&replay(&["e2e4", "d7d5", "e4d5", "d8d5"]), 2);
}

#[test]
fn alpha_beta_matches_plain_minimax_deeper_endgame() {
    bitmate::init();

    // sparse rook endgame keeps the depth-3 tree small
    let mut board = Board::empty();
    board.set_piece(4, PieceKind::King, Color::White); // e1
    board.set_piece(0, PieceKind::Rook, Color::White); // a1
    board.set_piece(60, PieceKind::King, Color::Black); // e8
    board.set_piece(51, PieceKind::Pawn, Color::Black); // d7
    board.refresh_derived();

    assert_pruning_sound(&board, 3);

    board.side = Color::Black;
    assert_pruning_sound(&board, 3);
}

#[test]
fn finds_a_mate_in_one() {
    bitmate::init();

    let mut board = Board::empty();
    board.set_piece(62, PieceKind::King, Color::Black); // g8
    board.set_piece(46, PieceKind::King, Color::White); // g6
    board.set_piece(9, PieceKind::Queen, Color::White); // b2
    board.refresh_derived();

    let mut search = Search::new(SearchParams::new().max_depth(2));
    let (mv, score) = search.best_move(&board).expect("white has moves");
    assert_eq!(score, MATE, "best line must be scored as mate");

    // the chosen move actually delivers mate
    let mut after = board.clone();
    after.make_move(mv);
    assert!(after.generate_moves(Color::Black).is_empty());
    assert!(after.in_check(Color::Black), "mate, not stalemate");
}

#[test]
fn stalemate_is_neutral_and_moveless() {
    bitmate::init();

    let mut board = Board::empty();
    board.set_piece(56, PieceKind::King, Color::Black); // a8
    board.set_piece(41, PieceKind::King, Color::White); // b6
    board.set_piece(50, PieceKind::Queen, Color::White); // c7
    board.refresh_derived();
    board.side = Color::Black;

    assert!(!board.in_check(Color::Black));
    assert!(board.generate_moves(Color::Black).is_empty());

    let mut search = Search::new(SearchParams::new().max_depth(3));
    assert_eq!(search.best_move(&board), None);
    assert_eq!(search.alpha_beta(&board, 2, -INFINITE, INFINITE, false), 0);
}

#[test]
fn checkmated_side_has_no_move_and_a_mate_score() {
    bitmate::init();

    // fool's mate: white to move, already lost
    let board = replay(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(board.in_check(Color::White));

    let mut search = Search::new(SearchParams::new().max_depth(2));
    assert_eq!(search.best_move(&board), None);
    assert_eq!(
        search.alpha_beta(&board, 1, -INFINITE, INFINITE, true),
        -MATE
    );
}

#[test]
fn depth_one_takes_the_hanging_pawn() {
    bitmate::init();

    let board = replay(&["e2e4", "d7d5"]);
    let mut search = Search::new(SearchParams::new().max_depth(1));
    let (mv, score) = search.best_move(&board).expect("white has moves");
    assert_eq!(move_to_uci(mv), "e4d5");
    assert_eq!(score, 100);
}

#[test]
fn search_counts_nodes() {
    bitmate::init();

    let board = Board::start_position();
    let mut search = Search::new(SearchParams::new().max_depth(2));
    search.best_move(&board).expect("opening has moves");

    let stats = search.stats();
    assert_eq!(stats.root_nodes, 20);
    assert!(stats.nodes >= 20);
}

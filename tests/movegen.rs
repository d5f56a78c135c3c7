//! Move-generation scenarios: opening counts, castling refusals, en passant,
//! promotions, pins.

use bitmate::board::{
    move_from_sq, move_is_castle, move_promotion, move_to_sq, parse_uci_move, Board, Color,
    PieceKind,
};

fn replay(moves: &[&str]) -> Board {
    let mut board = Board::start_position();
    for move_str in moves {
        let mv = parse_uci_move(&board, move_str).expect(move_str);
        board.make_move(mv);
    }
    board
}

#[test]
fn twenty_moves_from_the_start() {
    bitmate::init();

    let board = Board::start_position();
    let moves = board.generate_moves(Color::White);
    assert_eq!(moves.len(), 20);

    let mut pawn_single = 0;
    let mut pawn_double = 0;
    let mut knight = 0;
    for &mv in &moves {
        let (kind, _) = board.piece_on(move_from_sq(mv)).unwrap();
        match kind {
            PieceKind::Pawn => {
                if move_to_sq(mv).abs_diff(move_from_sq(mv)) == 16 {
                    pawn_double += 1;
                } else {
                    pawn_single += 1;
                }
            }
            PieceKind::Knight => knight += 1,
            other => panic!("unexpected {:?} move in the opening position", other),
        }
    }
    assert_eq!(pawn_single, 8);
    assert_eq!(pawn_double, 8);
    assert_eq!(knight, 4);
}

// Bare castling skeleton: kings plus the white kingside rook, right flag set
fn castling_skeleton() -> Board {
    let mut board = Board::empty();
    board.set_piece(4, PieceKind::King, Color::White); // e1
    board.set_piece(7, PieceKind::Rook, Color::White); // h1
    board.set_piece(60, PieceKind::King, Color::Black); // e8
    board.castling = 0b1000;
    board.refresh_derived();
    board
}

fn has_kingside_castle(board: &Board) -> bool {
    board
        .generate_moves(Color::White)
        .iter()
        .any(|&mv| move_is_castle(mv) && move_to_sq(mv) == 6)
}

#[test]
fn kingside_castle_allowed_on_clear_safe_path() {
    bitmate::init();
    assert!(has_kingside_castle(&castling_skeleton()));
}

#[test]
fn kingside_castle_refused_when_between_squares_occupied() {
    bitmate::init();

    for sq in [5, 6] {
        let mut board = castling_skeleton();
        board.set_piece(sq, PieceKind::Knight, Color::White);
        board.refresh_derived();
        assert!(
            !has_kingside_castle(&board),
            "castled across an occupied square {}",
            sq
        );
    }
}

#[test]
fn kingside_castle_refused_when_king_path_attacked() {
    bitmate::init();

    // a black rook on the e, f or g file covers the start, transit or
    // destination square; the right flag alone is not enough
    for rook_sq in [61, 62] {
        let mut board = castling_skeleton();
        board.set_piece(rook_sq, PieceKind::Rook, Color::Black);
        board.refresh_derived();
        assert!(
            !has_kingside_castle(&board),
            "castled through a square covered from {}",
            rook_sq
        );
    }

    // in check: black king shifted aside, rook takes the e-file
    let mut board = castling_skeleton();
    board.remove_piece(60, PieceKind::King, Color::Black);
    board.set_piece(56, PieceKind::King, Color::Black); // a8
    board.set_piece(60, PieceKind::Rook, Color::Black); // e8
    board.refresh_derived();
    assert!(!has_kingside_castle(&board));
}

#[test]
fn castle_refused_without_rook_on_origin() {
    bitmate::init();

    let mut board = castling_skeleton();
    board.remove_piece(7, PieceKind::Rook, Color::White);
    board.set_piece(15, PieceKind::Rook, Color::White); // h2
    board.refresh_derived();
    assert!(!has_kingside_castle(&board));
}

#[test]
fn en_passant_generated_once_and_captures_the_right_square() {
    bitmate::init();

    // black's a-pawn double-advances next to the white pawn on b5
    let board = replay(&["b2b4", "h7h6", "b4b5", "a7a5"]);
    assert_eq!(board.ep, Some(40)); // a6

    let moves = board.generate_moves(Color::White);
    let ep_moves: Vec<_> = moves
        .iter()
        .filter(|&&mv| move_to_sq(mv) == 40)
        .collect();
    assert_eq!(ep_moves.len(), 1, "expected exactly one en-passant move");
    assert_eq!(move_from_sq(*ep_moves[0]), 33); // b5

    let mut after = board.clone();
    after.make_move(*ep_moves[0]);
    // the captured pawn stood on a5, one rank behind the target
    assert_eq!(after.piece_on(32), None);
    assert_eq!(after.piece_on(40), Some((PieceKind::Pawn, Color::White)));
}

#[test]
fn en_passant_expires_after_one_ply() {
    bitmate::init();

    let board = replay(&["b2b4", "h7h6", "b4b5", "a7a5", "g1f3", "h6h5"]);
    assert_eq!(board.ep, None);
    let moves = board.generate_moves(Color::White);
    assert!(
        moves.iter().all(|&mv| move_to_sq(mv) != 40),
        "en-passant capture survived an intervening ply"
    );
}

#[test]
fn promotion_fans_out_to_four_kinds() {
    bitmate::init();

    let mut board = Board::empty();
    board.set_piece(4, PieceKind::King, Color::White); // e1
    board.set_piece(63, PieceKind::King, Color::Black); // h8
    board.set_piece(48, PieceKind::Pawn, Color::White); // a7
    board.set_piece(57, PieceKind::Rook, Color::Black); // b8
    board.refresh_derived();

    let moves = board.generate_moves(Color::White);
    let pushes: Vec<_> = moves.iter().filter(|&&mv| move_to_sq(mv) == 56).collect();
    let captures: Vec<_> = moves.iter().filter(|&&mv| move_to_sq(mv) == 57).collect();
    assert_eq!(pushes.len(), 4);
    assert_eq!(captures.len(), 4);

    for group in [pushes, captures] {
        let mut kinds: Vec<_> = group.iter().map(|&&mv| move_promotion(mv)).collect();
        kinds.sort_by_key(|k| k.map(|p| p as u8));
        kinds.dedup();
        assert_eq!(kinds.len(), 4, "promotion kinds must be distinct");
        assert!(kinds
            .iter()
            .all(|&k| !matches!(k, None | Some(PieceKind::Pawn) | Some(PieceKind::King))));
    }
}

#[test]
fn pinned_knight_has_no_legal_moves() {
    bitmate::init();

    let mut board = Board::empty();
    board.set_piece(4, PieceKind::King, Color::White); // e1
    board.set_piece(12, PieceKind::Knight, Color::White); // e2, pinned
    board.set_piece(60, PieceKind::Rook, Color::Black); // e8
    board.set_piece(56, PieceKind::King, Color::Black); // a8
    board.refresh_derived();

    // pseudo-legal generation still offers knight moves
    let mut pseudo = Vec::new();
    board.generate_pseudo_moves(Color::White, &mut pseudo);
    assert!(pseudo.iter().any(|&mv| move_from_sq(mv) == 12));

    // the legality filter drops every one of them
    let legal = board.generate_moves(Color::White);
    assert!(legal.iter().all(|&mv| move_from_sq(mv) != 12));
    assert!(!legal.is_empty(), "the king itself can still step aside");
}

#[test]
fn double_advance_needs_both_squares_empty() {
    bitmate::init();

    // black knight on e4 blocks the destination of e2-e4
    let board = replay(&["g1f3", "g8f6", "f3e5", "f6e4"]);
    let moves = board.generate_moves(Color::White);
    assert!(moves
        .iter()
        .all(|&mv| !(move_from_sq(mv) == 12 && move_to_sq(mv) == 28)));
    // single advance e2e3 is still available
    assert!(moves
        .iter()
        .any(|&mv| move_from_sq(mv) == 12 && move_to_sq(mv) == 20));

    // own knight on c3 blocks the intermediate square of c2-c4
    let board = replay(&["b1c3", "h7h6"]);
    let moves = board.generate_moves(Color::White);
    assert!(
        moves.iter().all(|&mv| move_from_sq(mv) != 10),
        "c2 pawn has no moves with c3 occupied"
    );
}

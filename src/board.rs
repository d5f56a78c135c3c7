// Square mapping: A1=0, B1=1, ..., H8=63
// The same mapping is used consistently across bitboards, the square table
// and the notation codec.

use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

// Indice nel piece_bb array: white piece = kind as usize; black piece = 6 + kind
fn piece_index(kind: PieceKind, color: Color) -> usize {
    (color as usize) * 6 + (kind as usize)
}

fn kind_from_index(i: usize) -> PieceKind {
    match i % 6 {
        0 => PieceKind::Pawn,
        1 => PieceKind::Knight,
        2 => PieceKind::Bishop,
        3 => PieceKind::Rook,
        4 => PieceKind::Queen,
        5 => PieceKind::King,
        _ => unreachable!(),
    }
}

/// Promotion kinds in generation order.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub type Move = u16;

// Codifica mosse: 16-bit layout
// Bits 0-5: from (0-63)
// Bits 6-11: to (0-63)
// Bits 12-14: promotion kind + 1 (0 = none)
// Bit 15: castling flag
// Captures and en passant carry no bits of their own; make_move derives them
// from the position, and the undo record remembers what was taken.
pub fn new_move(from: usize, to: usize, promotion: Option<PieceKind>, castle: bool) -> Move {
    let promo = promotion.map(|p| p as u16 + 1).unwrap_or(0);
    (from as u16 & 0x3F)
        | ((to as u16 & 0x3F) << 6)
        | ((promo & 0x7) << 12)
        | ((castle as u16) << 15)
}

pub fn move_from_sq(m: Move) -> usize {
    (m & 0x3F) as usize
}

pub fn move_to_sq(m: Move) -> usize {
    ((m >> 6) & 0x3F) as usize
}

pub fn move_promotion(m: Move) -> Option<PieceKind> {
    match (m >> 12) & 0x7 {
        0 => None,
        v => Some(kind_from_index(v as usize - 1)),
    }
}

pub fn move_is_castle(m: Move) -> bool {
    (m >> 15) != 0
}

// Rook relocation for a flagged castle, keyed by the king's destination
fn rook_castling_squares(king_to: usize) -> (usize, usize) {
    match king_to {
        6 => (7, 5),    // white kingside:  h1 -> f1
        2 => (0, 3),    // white queenside: a1 -> d1
        62 => (63, 61), // black kingside:  h8 -> f8
        58 => (56, 59), // black queenside: a8 -> d8
        _ => panic!("castle flag on a non-castling destination"),
    }
}

// Undo entry; un record per mossa applicata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub moved: PieceKind,
    /// Captured kind and the square it actually stood on. En-passant captures
    /// record the square behind the target, not the destination.
    pub captured: Option<(PieceKind, usize)>,
    pub prev_castling: u8,
    pub prev_ep: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // 12 bitboards: 0-5 = white p,n,b,r,q,k; 6-11 = black p,n,b,r,q,k
    piece_bb: [u64; 12],
    // Square table, kept bit-for-bit in sync with the bitboards (rebuilt by
    // refresh_derived, never patched incrementally)
    squares: [Option<(PieceKind, Color)>; 64],
    pub white_occ: u64,
    pub black_occ: u64,
    pub occ: u64,
    pub side: Color,
    pub castling: u8,   // 4 LSB: bit 3 = K, bit 2 = Q, bit 1 = k, bit 0 = q
    pub ep: Option<u8>, // en-passant target square index or None
    // Undo stack: make_move pushes, unmake_move pops
    history: Vec<Undo>,
}

impl Board {
    /// Empty board to populate with `set_piece` + `refresh_derived`.
    pub fn empty() -> Self {
        Self {
            piece_bb: [0; 12],
            squares: [None; 64],
            white_occ: 0,
            black_occ: 0,
            occ: 0,
            side: Color::White,
            castling: 0,
            ep: None,
            history: Vec::with_capacity(128),
        }
    }

    /// Standard opening layout, White to move, all castling rights set.
    pub fn start_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            board.set_piece(file, kind, Color::White);
            board.set_piece(8 + file, PieceKind::Pawn, Color::White);
            board.set_piece(48 + file, PieceKind::Pawn, Color::Black);
            board.set_piece(56 + file, kind, Color::Black);
        }
        board.castling = 0b1111;
        board.refresh_derived();
        board
    }

    pub fn piece_bb(&self, kind: PieceKind, color: Color) -> u64 {
        self.piece_bb[piece_index(kind, color)]
    }

    /// Piece (kind, color) on square `sq`, or None. O(1) via the square table.
    pub fn piece_on(&self, sq: usize) -> Option<(PieceKind, Color)> {
        self.squares[sq]
    }

    /// Set a piece bit. Derived state (occupancy, square table) is stale until
    /// the next `refresh_derived`; make/unmake call it before returning.
    pub fn set_piece(&mut self, sq: usize, kind: PieceKind, color: Color) {
        self.piece_bb[piece_index(kind, color)] |= 1u64 << sq;
    }

    pub fn remove_piece(&mut self, sq: usize, kind: PieceKind, color: Color) {
        self.piece_bb[piece_index(kind, color)] &= !(1u64 << sq);
    }

    /// Rebuild occupancy aggregates and the square table from the 12
    /// bitboards. This is the invariant-restoring step at the end of every
    /// mutation; the derived fields are never trusted as independent caches.
    pub fn refresh_derived(&mut self) {
        self.white_occ = 0;
        self.black_occ = 0;
        for i in 0..6 {
            self.white_occ |= self.piece_bb[i];
        }
        for i in 6..12 {
            self.black_occ |= self.piece_bb[i];
        }
        self.occ = self.white_occ | self.black_occ;

        self.squares = [None; 64];
        for i in 0..12 {
            let kind = kind_from_index(i);
            let color = if i < 6 { Color::White } else { Color::Black };
            for sq in utils::iter_bits(self.piece_bb[i]) {
                self.squares[sq] = Some((kind, color));
            }
        }
    }

    pub fn is_occupied(&self, sq: usize) -> bool {
        (1u64 << sq) & self.occ != 0
    }

    pub fn occupancy(&self, side: Color) -> u64 {
        match side {
            Color::White => self.white_occ,
            Color::Black => self.black_occ,
        }
    }

    /// King square for `side`, derived from the king bitboard (exactly one
    /// bit per side in any observable state).
    pub fn king_sq(&self, side: Color) -> usize {
        let kings = self.piece_bb(PieceKind::King, side);
        debug_assert!(kings != 0, "no king on the board for {:?}", side);
        kings.trailing_zeros() as usize
    }

    pub fn in_check(&self, side: Color) -> bool {
        self.is_square_attacked(self.king_sq(side), side.opponent())
    }

    /// Panics if the derived state disagrees with the bitboards, or a side
    /// does not have exactly one king. Such a disagreement is a programming
    /// defect in make/unmake, never a recoverable condition.
    pub fn assert_invariants(&self) {
        let mut union = 0u64;
        for bb in self.piece_bb {
            union |= bb;
        }
        assert_eq!(self.occ, union, "aggregate occupancy out of sync");
        assert_eq!(
            self.occ,
            self.white_occ | self.black_occ,
            "per-side occupancy out of sync"
        );
        for sq in 0..64 {
            assert_eq!(
                self.squares[sq],
                self.probe_bitboards(sq),
                "square table out of sync at square {}",
                sq
            );
        }
        assert_eq!(
            utils::count_bits(self.piece_bb(PieceKind::King, Color::White)),
            1,
            "white king count"
        );
        assert_eq!(
            utils::count_bits(self.piece_bb(PieceKind::King, Color::Black)),
            1,
            "black king count"
        );
    }

    // Direct bitboard probe, independent of the square table
    fn probe_bitboards(&self, sq: usize) -> Option<(PieceKind, Color)> {
        let mask = 1u64 << sq;
        for i in 0..12 {
            if self.piece_bb[i] & mask != 0 {
                let color = if i < 6 { Color::White } else { Color::Black };
                return Some((kind_from_index(i), color));
            }
        }
        None
    }

    // Make / unmake ----------------------------------------------

    /// Apply `mv` in place and push an undo record. `mv` must come from this
    /// position's move generation; no legality re-validation happens here.
    pub fn make_move(&mut self, mv: Move) {
        let from = move_from_sq(mv);
        let to = move_to_sq(mv);
        let (piece, color) = self.squares[from].expect("make_move from an empty square");
        let opponent = color.opponent();

        // Identify the captured piece and its actual square before mutating.
        // A pawn landing on the en-passant target takes the pawn one rank
        // behind the target, not whatever sits on the target itself.
        let is_en_passant = piece == PieceKind::Pawn && self.ep == Some(to as u8);
        let captured = if is_en_passant {
            let behind = match color {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            Some((PieceKind::Pawn, behind))
        } else {
            self.squares[to].map(|(kind, _)| (kind, to))
        };

        self.history.push(Undo {
            mv,
            moved: piece,
            captured,
            prev_castling: self.castling,
            prev_ep: self.ep,
        });

        self.remove_piece(from, piece, color);
        if let Some((kind, sq)) = captured {
            self.remove_piece(sq, kind, opponent);
        }
        let placed = move_promotion(mv).unwrap_or(piece);
        self.set_piece(to, placed, color);

        // A flagged castle relocates the paired rook as well
        if move_is_castle(mv) {
            let (rook_from, rook_to) = rook_castling_squares(to);
            self.remove_piece(rook_from, PieceKind::Rook, color);
            self.set_piece(rook_to, PieceKind::Rook, color);
        }

        // Rights only ever transition set -> cleared
        self.update_castling_after_move(color, piece, from);
        if let Some((PieceKind::Rook, sq)) = captured {
            self.update_castling_on_rook_capture(sq);
        }

        // En-passant target survives exactly one ply after a double advance
        self.ep = if piece == PieceKind::Pawn && to.abs_diff(from) == 16 {
            Some(((from + to) / 2) as u8)
        } else {
            None
        };

        self.side = opponent;
        self.refresh_derived();
        #[cfg(debug_assertions)]
        self.assert_invariants();
    }

    /// Pop the most recent undo record and restore the position exactly.
    /// No-op on an empty history.
    pub fn unmake_move(&mut self) {
        let Some(undo) = self.history.pop() else {
            return;
        };
        let from = move_from_sq(undo.mv);
        let to = move_to_sq(undo.mv);
        // make_move left the opponent on move; the mover is the other side
        let mover = self.side.opponent();

        // A promotion put the promoted kind on the destination; the pawn is
        // what goes back to the origin
        let placed = move_promotion(undo.mv).unwrap_or(undo.moved);
        self.remove_piece(to, placed, mover);
        self.set_piece(from, undo.moved, mover);

        if let Some((kind, sq)) = undo.captured {
            self.set_piece(sq, kind, mover.opponent());
        }

        if move_is_castle(undo.mv) {
            let (rook_from, rook_to) = rook_castling_squares(to);
            self.remove_piece(rook_to, PieceKind::Rook, mover);
            self.set_piece(rook_from, PieceKind::Rook, mover);
        }

        self.castling = undo.prev_castling;
        self.ep = undo.prev_ep;
        self.side = mover;
        self.refresh_derived();
        #[cfg(debug_assertions)]
        self.assert_invariants();
    }

    // Il proprio Re o una Torre dalla casella iniziale: perdita dei diritti
    fn update_castling_after_move(&mut self, side: Color, piece: PieceKind, from: usize) {
        const KING_SQ: [usize; 2] = [4, 60]; // e1, e8
        const ROOK_KS: [usize; 2] = [7, 63]; // h1, h8
        const ROOK_QS: [usize; 2] = [0, 56]; // a1, a8

        if piece == PieceKind::King && from == KING_SQ[side as usize] {
            match side {
                Color::White => self.castling &= !0b1100u8,
                Color::Black => self.castling &= !0b0011u8,
            }
        }
        if piece == PieceKind::Rook {
            if from == ROOK_KS[side as usize] {
                match side {
                    Color::White => self.castling &= !0b1000u8,
                    Color::Black => self.castling &= !0b0010u8,
                }
            } else if from == ROOK_QS[side as usize] {
                match side {
                    Color::White => self.castling &= !0b0100u8,
                    Color::Black => self.castling &= !0b0001u8,
                }
            }
        }
    }

    // Catturare una torre sulla sua casella iniziale toglie il diritto relativo
    fn update_castling_on_rook_capture(&mut self, captured_square: usize) {
        match captured_square {
            7 => self.castling &= !0b1000u8,  // white h1 rook
            0 => self.castling &= !0b0100u8,  // white a1 rook
            63 => self.castling &= !0b0010u8, // black h8 rook
            56 => self.castling &= !0b0001u8, // black a8 rook
            _ => {}
        }
    }

    // Attack detection -------------------------------------------

    /// True if `sq` is attacked by any piece of `by`. Scans outward from the
    /// target square with each kind's reverse pattern instead of generating
    /// the attacker's move list.
    pub fn is_square_attacked(&self, sq: usize, by: Color) -> bool {
        let target = 1u64 << sq;

        // Pawns: shift the attacker's pawns along their two capture
        // diagonals and test membership; file masks stop A/H wraparound
        let pawns = self.piece_bb(PieceKind::Pawn, by);
        let pawn_hits = match by {
            Color::White => {
                ((pawns & utils::NOT_FILE_A) << 7) | ((pawns & utils::NOT_FILE_H) << 9)
            }
            Color::Black => {
                ((pawns & utils::NOT_FILE_A) >> 9) | ((pawns & utils::NOT_FILE_H) >> 7)
            }
        };
        if pawn_hits & target != 0 {
            return true;
        }

        if utils::knight_attacks(sq) & self.piece_bb(PieceKind::Knight, by) != 0 {
            return true;
        }
        if utils::king_attacks(sq) & self.piece_bb(PieceKind::King, by) != 0 {
            return true;
        }

        // Sliders: walk each ray one square at a time; the first occupied
        // square always stops the ray, and attacks iff it holds a matching kind
        let diagonal = self.piece_bb(PieceKind::Bishop, by) | self.piece_bb(PieceKind::Queen, by);
        if diagonal != 0 && self.ray_hits(sq, &utils::DIAGONAL_DIRS, diagonal) {
            return true;
        }
        let orthogonal = self.piece_bb(PieceKind::Rook, by) | self.piece_bb(PieceKind::Queen, by);
        if orthogonal != 0 && self.ray_hits(sq, &utils::ORTHOGONAL_DIRS, orthogonal) {
            return true;
        }

        false
    }

    fn ray_hits(&self, sq: usize, dirs: &[i8; 4], attackers: u64) -> bool {
        for &dir in dirs {
            let mut cur = sq as i8;
            loop {
                if utils::wraps_file(cur as usize, dir) {
                    break;
                }
                cur += dir;
                if !(0..64).contains(&cur) {
                    break;
                }
                let bit = 1u64 << cur;
                if self.occ & bit != 0 {
                    if attackers & bit != 0 {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }

    // Move generation --------------------------------------------

    /// Fully legal moves for `side`: pseudo-legal generation followed by the
    /// self-check filter.
    pub fn generate_moves(&self, side: Color) -> Vec<Move> {
        let mut pseudo = Vec::with_capacity(64);
        self.generate_pseudo_moves(side, &mut pseudo);
        self.filter_illegal(pseudo, side)
    }

    /// Retain only moves that do not leave `side`'s own king attacked. Each
    /// candidate is tried on a private copy; the caller's position is never
    /// touched.
    pub fn filter_illegal(&self, moves: Vec<Move>, side: Color) -> Vec<Move> {
        let opponent = side.opponent();
        moves
            .into_iter()
            .filter(|&mv| {
                let mut trial = self.clone();
                trial.make_move(mv);
                !trial.is_square_attacked(trial.king_sq(side), opponent)
            })
            .collect()
    }

    /// Pseudo-legal moves for `side`: movement and occupancy rules only,
    /// self-check ignored.
    pub fn generate_pseudo_moves(&self, side: Color, out: &mut Vec<Move>) {
        self.generate_pawn_pseudos(side, out);
        self.generate_knight_pseudos(side, out);
        self.generate_bishop_pseudos(side, out);
        self.generate_rook_pseudos(side, out);
        self.generate_queen_pseudos(side, out);
        self.generate_king_pseudos(side, out);
    }

    fn generate_pawn_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        let pawns = self.piece_bb(PieceKind::Pawn, side);
        let empty = !self.occ;
        let (enemy_occ, prom_rank, start_rank) = match side {
            Color::White => (self.black_occ, utils::RANK_8, utils::RANK_2),
            Color::Black => (self.white_occ, utils::RANK_1, utils::RANK_7),
        };

        // Single advances onto empty squares; promotion fan-out on the last rank
        let push_dest = match side {
            Color::White => (pawns << 8) & empty,
            Color::Black => (pawns >> 8) & empty,
        };
        for to in utils::iter_bits(push_dest) {
            let from = match side {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            push_pawn_moves(from, to, prom_rank, out);
        }

        // Double advances: start rank only, both squares empty
        let first_push = match side {
            Color::White => ((pawns & start_rank) << 8) & empty,
            Color::Black => ((pawns & start_rank) >> 8) & empty,
        };
        let double_dest = match side {
            Color::White => (first_push << 8) & empty,
            Color::Black => (first_push >> 8) & empty,
        };
        for to in utils::iter_bits(double_dest) {
            let from = match side {
                Color::White => to - 16,
                Color::Black => to + 16,
            };
            out.push(new_move(from, to, None, false));
        }

        // Diagonal captures onto enemy-occupied squares
        let east_capture = match side {
            Color::White => ((pawns & utils::NOT_FILE_H) << 9) & enemy_occ,
            Color::Black => ((pawns & utils::NOT_FILE_H) >> 7) & enemy_occ,
        };
        for to in utils::iter_bits(east_capture) {
            let from = match side {
                Color::White => to - 9,
                Color::Black => to + 7,
            };
            push_pawn_moves(from, to, prom_rank, out);
        }
        let west_capture = match side {
            Color::White => ((pawns & utils::NOT_FILE_A) << 7) & enemy_occ,
            Color::Black => ((pawns & utils::NOT_FILE_A) >> 9) & enemy_occ,
        };
        for to in utils::iter_bits(west_capture) {
            let from = match side {
                Color::White => to - 7,
                Color::Black => to + 9,
            };
            push_pawn_moves(from, to, prom_rank, out);
        }

        // En passant: the target square is empty, so the capture shifts above
        // never see it; collect file-adjacent pawns on the correct rank
        if let Some(ep_sq) = self.ep {
            let ep_sq = ep_sq as usize;
            let ep_file = ep_sq % 8;
            let mut attackers = 0u64;
            match side {
                Color::White => {
                    if ep_file > 0 {
                        attackers |= pawns & (1u64 << (ep_sq - 9));
                    }
                    if ep_file < 7 {
                        attackers |= pawns & (1u64 << (ep_sq - 7));
                    }
                }
                Color::Black => {
                    if ep_file > 0 {
                        attackers |= pawns & (1u64 << (ep_sq + 7));
                    }
                    if ep_file < 7 {
                        attackers |= pawns & (1u64 << (ep_sq + 9));
                    }
                }
            }
            for from in utils::iter_bits(attackers) {
                out.push(new_move(from, ep_sq, None, false));
            }
        }
    }

    fn generate_knight_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        let own = self.occupancy(side);
        let mut bb = self.piece_bb(PieceKind::Knight, side);
        while let Some(from) = utils::pop_lsb(&mut bb) {
            for to in utils::iter_bits(utils::knight_attacks(from) & !own) {
                out.push(new_move(from, to, None, false));
            }
        }
    }

    fn generate_bishop_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        self.generate_slider_pseudos(side, PieceKind::Bishop, &utils::DIAGONAL_DIRS, out);
    }

    fn generate_rook_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        self.generate_slider_pseudos(side, PieceKind::Rook, &utils::ORTHOGONAL_DIRS, out);
    }

    // Queen = bishop rays + rook rays from the same square
    fn generate_queen_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        self.generate_slider_pseudos(side, PieceKind::Queen, &utils::DIAGONAL_DIRS, out);
        self.generate_slider_pseudos(side, PieceKind::Queen, &utils::ORTHOGONAL_DIRS, out);
    }

    fn generate_slider_pseudos(
        &self,
        side: Color,
        kind: PieceKind,
        dirs: &[i8; 4],
        out: &mut Vec<Move>,
    ) {
        let enemy = self.occupancy(side.opponent());
        let mut bb = self.piece_bb(kind, side);
        while let Some(from) = utils::pop_lsb(&mut bb) {
            for &dir in dirs {
                let mut cur = from as i8;
                loop {
                    if utils::wraps_file(cur as usize, dir) {
                        break;
                    }
                    cur += dir;
                    if !(0..64).contains(&cur) {
                        break;
                    }
                    let to = cur as usize;
                    if self.is_occupied(to) {
                        // enemy blocker: included, then stop; friendly: stop
                        if enemy & (1u64 << to) != 0 {
                            out.push(new_move(from, to, None, false));
                        }
                        break;
                    }
                    out.push(new_move(from, to, None, false));
                }
            }
        }
    }

    fn generate_king_pseudos(&self, side: Color, out: &mut Vec<Move>) {
        let own = self.occupancy(side);
        let mut bb = self.piece_bb(PieceKind::King, side);
        while let Some(from) = utils::pop_lsb(&mut bb) {
            for to in utils::iter_bits(utils::king_attacks(from) & !own) {
                out.push(new_move(from, to, None, false));
            }
            self.generate_castling_moves(side, from, out);
        }
    }

    // Castling: right still held, squares between king and rook empty, rook
    // on its original square, king start/transit/destination unattacked
    fn generate_castling_moves(&self, side: Color, king_from: usize, out: &mut Vec<Move>) {
        let (ks_mask, qs_mask, king_start) = match side {
            Color::White => (0b1000u8, 0b0100u8, 4usize),
            Color::Black => (0b0010u8, 0b0001u8, 60usize),
        };
        if king_from != king_start {
            return;
        }
        let enemy = side.opponent();

        if self.castling & ks_mask != 0 {
            let rook_sq = king_start + 3;
            let between_clear =
                !self.is_occupied(king_start + 1) && !self.is_occupied(king_start + 2);
            let rook_in_place = self.piece_bb(PieceKind::Rook, side) & (1u64 << rook_sq) != 0;
            if between_clear
                && rook_in_place
                && !self.is_square_attacked(king_start, enemy)
                && !self.is_square_attacked(king_start + 1, enemy)
                && !self.is_square_attacked(king_start + 2, enemy)
            {
                out.push(new_move(king_from, king_start + 2, None, true));
            }
        }

        if self.castling & qs_mask != 0 {
            let rook_sq = king_start - 4;
            let between_clear = !self.is_occupied(king_start - 1)
                && !self.is_occupied(king_start - 2)
                && !self.is_occupied(king_start - 3);
            let rook_in_place = self.piece_bb(PieceKind::Rook, side) & (1u64 << rook_sq) != 0;
            if between_clear
                && rook_in_place
                && !self.is_square_attacked(king_start, enemy)
                && !self.is_square_attacked(king_start - 1, enemy)
                && !self.is_square_attacked(king_start - 2, enemy)
            {
                out.push(new_move(king_from, king_start - 2, None, true));
            }
        }
    }
}

fn push_pawn_moves(from: usize, to: usize, prom_rank: u64, out: &mut Vec<Move>) {
    if (1u64 << to) & prom_rank != 0 {
        for kind in PROMOTION_KINDS {
            out.push(new_move(from, to, Some(kind), false));
        }
    } else {
        out.push(new_move(from, to, None, false));
    }
}

// Notation codec ---------------------------------------------------
// Square-pair text notation: source file letter + rank digit, destination
// file + rank, optional promotion letter.

fn square_to_uci(sq: usize) -> String {
    let file_char = (b'a' + (sq % 8) as u8) as char;
    let rank_char = (b'1' + (sq / 8) as u8) as char;
    format!("{}{}", file_char, rank_char)
}

fn uci_to_square(uci: &str) -> Result<usize, &'static str> {
    let bytes = uci.as_bytes();
    if bytes.len() < 2 {
        return Err("invalid square notation");
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err("invalid square notation");
    }
    Ok((rank - b'1') as usize * 8 + (file - b'a') as usize)
}

/// Convert a move to UCI notation (e.g. "e2e4", "e7e8q").
pub fn move_to_uci(mv: Move) -> String {
    let mut uci = format!(
        "{}{}",
        square_to_uci(move_from_sq(mv)),
        square_to_uci(move_to_sq(mv))
    );
    if let Some(promo) = move_promotion(mv) {
        let promo_char = match promo {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => unreachable!("promotion to pawn or king"),
        };
        uci.push(promo_char);
    }
    uci
}

/// Parse a UCI move string and resolve it against the legal moves of the
/// side to move. Resolution is what recognises castling: a king move whose
/// destination matches a castling square pair was generated with the flag.
/// Strings outside 4-6 characters and unknown promotion letters are rejected.
pub fn parse_uci_move(board: &Board, uci: &str) -> Result<Move, &'static str> {
    if uci.len() < 4 || uci.len() > 6 {
        return Err("move string must be 4 to 6 characters");
    }

    let from = uci_to_square(&uci[0..2])?;
    let to = uci_to_square(&uci[2..4])?;

    let promotion = if uci.len() >= 5 {
        match uci.as_bytes()[4] {
            b'q' => Some(PieceKind::Queen),
            b'r' => Some(PieceKind::Rook),
            b'b' => Some(PieceKind::Bishop),
            b'n' => Some(PieceKind::Knight),
            _ => return Err("unrecognised promotion letter"),
        }
    } else {
        None
    };

    for &mv in &board.generate_moves(board.side) {
        if move_from_sq(mv) == from && move_to_sq(mv) == to && move_promotion(mv) == promotion {
            return Ok(mv);
        }
    }

    Err("not a legal move in this position")
}

// Simple display (rank 8 at the top)
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = rank * 8 + file;
                let ch = match self.piece_on(sq) {
                    Some((p, c)) => {
                        let ch = match p {
                            PieceKind::Pawn => 'p',
                            PieceKind::Knight => 'n',
                            PieceKind::Bishop => 'b',
                            PieceKind::Rook => 'r',
                            PieceKind::Queen => 'q',
                            PieceKind::King => 'k',
                        };
                        if c == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        }
                    }
                    None => '.',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

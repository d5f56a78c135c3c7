use bitmate::board::Board;
use clap::Parser;
use shakmaty::{Chess, Position};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum perft depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Cross-check every count against shakmaty
    #[arg(short, long)]
    check: bool,
}

fn main() {
    bitmate::init();
    let args = Args::parse();

    let mut board = Board::start_position();
    let reference: Chess = Chess::default();

    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        let nodes = perft(&mut board, depth);
        let duration = start.elapsed();

        print!(
            "perft({}) = {} nodes ({} ms)",
            depth,
            nodes,
            duration.as_millis()
        );
        if args.check {
            let expected = perft_shakmaty(&reference, depth);
            if nodes == expected {
                print!("  [ok]");
            } else {
                print!("  [MISMATCH: shakmaty says {}]", expected);
            }
        }
        println!();
    }
}

fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.generate_moves(board.side) {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.unmake_move();
    }
    nodes
}

fn perft_shakmaty(pos: &Chess, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}

//! Minimal UCI event loop for Bitmate

use super::options::UciOptions;
use super::parser::{parse_uci_command, UciCommand};
use crate::board::{move_to_uci, parse_uci_move, Board};
use crate::search::{Search, SearchParams, MAX_DEPTH};
use std::io::{self, BufRead, Write};

pub struct UciEngine {
    board: Board,
    options: UciOptions,
    running: bool,
}

impl UciEngine {
    pub fn new() -> Self {
        Self {
            board: Board::start_position(),
            options: UciOptions::default(),
            running: true,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn handle_command(&mut self, cmd: UciCommand) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            UciCommand::Uci => {
                res.push("id name Bitmate".to_string());
                res.push("id author the Bitmate developers".to_string());
                res.push(format!(
                    "option name Depth type spin default {} min 1 max {}",
                    self.options.depth, MAX_DEPTH
                ));
                res.push("uciok".to_string());
            }
            UciCommand::IsReady => {
                res.push("readyok".to_string());
            }
            UciCommand::UciNewGame => {
                self.board = Board::start_position();
            }
            UciCommand::Position { fen, moves } => {
                if fen.is_some() {
                    // positions are reached by replaying moves from the start
                    res.push("info string FEN positions are not supported".to_string());
                    return res;
                }

                // Validate the whole sequence on a temporary board before
                // committing; a bad move leaves the current position intact
                let mut temp_board = Board::start_position();
                for move_str in &moves {
                    match parse_uci_move(&temp_board, move_str) {
                        Ok(mv) => temp_board.make_move(mv),
                        Err(e) => {
                            res.push(format!("info string invalid move {}: {}", move_str, e));
                            return res;
                        }
                    }
                }
                self.board = temp_board;
            }
            UciCommand::Go { depth } => {
                let depth = depth
                    .map(|d| d.clamp(1, MAX_DEPTH))
                    .unwrap_or(self.options.depth);
                let mut search = Search::new(SearchParams::new().max_depth(depth));

                match search.best_move(&self.board) {
                    Some((mv, score)) => {
                        let stats = search.stats();
                        res.push(format!(
                            "info depth {} score cp {} nodes {} time {}",
                            depth,
                            score,
                            stats.nodes,
                            stats.elapsed_ms()
                        ));
                        res.push(format!("bestmove {}", move_to_uci(mv)));
                    }
                    None => {
                        // terminal position: checkmate or stalemate
                        res.push("info string no move available".to_string());
                        res.push("bestmove 0000".to_string());
                    }
                }
            }
            UciCommand::SetOption { name, value } => {
                match self.options.set_option(&name, value.as_deref()) {
                    Ok(()) => res.push(format!("info string {} set", name)),
                    Err(e) => res.push(format!("info string error: {}", e)),
                }
            }
            UciCommand::Quit => {
                self.running = false;
            }
            UciCommand::Unknown(s) => {
                res.push(format!("info string unknown command: {}", s));
            }
        }
        res
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_uci_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut engine = UciEngine::new();
    let mut buf = String::new();

    while engine.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            // EOF reached
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        let responses = engine.handle_command(parse_uci_command(line));
        for r in responses {
            writeln!(writer, "{}", r)?;
        }

        // flush after each command so a GUI sees replies immediately
        writer.flush()?;
    }

    Ok(())
}

pub fn process_uci_line(line: &str, engine: &mut UciEngine) -> Vec<String> {
    engine.handle_command(parse_uci_command(line))
}

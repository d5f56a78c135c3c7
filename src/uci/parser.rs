//! UCI command parser for Bitmate

//! Minimal but practical tokenizer covering the commands the engine speaks.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    SetOption {
        name: String,
        value: Option<String>,
    },
    UciNewGame,
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go {
        depth: Option<u8>,
    },
    Quit,
    Unknown(String),
}

/// Parse a UCI command from a line (simple tokenizer)
pub fn parse_uci_command(line: &str) -> UciCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return UciCommand::Unknown(String::new());
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "quit" => UciCommand::Quit,
        "setoption" => {
            // expected: setoption name <name> [value <val>]
            let mut name = String::new();
            let mut value: Option<String> = None;
            let mut i = 1usize;
            while i < parts.len() {
                match parts[i] {
                    "name" => {
                        i += 1;
                        let mut vals = Vec::new();
                        while i < parts.len() && parts[i] != "value" {
                            vals.push(parts[i]);
                            i += 1;
                        }
                        name = vals.join(" ");
                    }
                    "value" => {
                        i += 1;
                        value = Some(parts[i..].join(" "));
                        break;
                    }
                    _ => {
                        i += 1;
                    }
                }
            }
            UciCommand::SetOption { name, value }
        }
        "position" => {
            // position [startpos | fen <fenstring>] [moves <move1> ...]
            let mut fen: Option<String> = None;
            let mut moves: Vec<String> = Vec::new();
            if parts.len() >= 2 && parts[1] == "startpos" {
                if let Some(pos) = parts.iter().position(|&s| s == "moves") {
                    for &m in &parts[pos + 1..] {
                        moves.push(m.to_string());
                    }
                }
            } else if parts.len() >= 2 && parts[1] == "fen" {
                // collected so the engine can refuse it with a reason
                let mut i = 2usize;
                let mut fen_parts = Vec::new();
                while i < parts.len() && parts[i] != "moves" {
                    fen_parts.push(parts[i]);
                    i += 1;
                }
                fen = Some(fen_parts.join(" "));
                if i < parts.len() && parts[i] == "moves" {
                    for &m in &parts[i + 1..] {
                        moves.push(m.to_string());
                    }
                }
            }
            UciCommand::Position { fen, moves }
        }
        "go" => {
            let mut depth: Option<u8> = None;
            let mut i = 1usize;
            while i < parts.len() {
                match parts[i] {
                    "depth" => {
                        if let Some(v) = parts.get(i + 1) {
                            if let Ok(x) = v.parse::<u8>() {
                                depth = Some(x);
                            }
                        }
                        i += 2;
                    }
                    _ => {
                        i += 1;
                    }
                }
            }
            UciCommand::Go { depth }
        }
        other => UciCommand::Unknown(other.to_string()),
    }
}

pub mod board;
pub mod eval;
pub mod search;
pub mod uci;
pub mod utils;

pub fn init() {
    utils::init_attack_tables();
}

//! Bitmate UCI chess engine main entry point.

fn main() {
    bitmate::init();

    // Run UCI main loop
    if let Err(e) = bitmate::uci::run_uci_loop() {
        eprintln!("UCI loop failed: {:?}", e);
    }
}

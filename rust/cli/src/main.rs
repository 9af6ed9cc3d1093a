use std::io;

fn main() {
    if let Err(e) = blackjack_cli::logging::init_logging() {
        eprintln!("{}", e);
    }
    let code = blackjack_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

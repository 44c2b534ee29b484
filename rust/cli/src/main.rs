use std::io;

fn main() {
    hucoach_cli::logging::init_logging();
    let code = hucoach_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

mod cli;

fn main() {
    if let Err(e) = cli::handlers::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

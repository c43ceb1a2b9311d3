use std::process;

fn main() {
    if let Err(err) = primeduel::app::run() {
        eprintln!("fatal: {err}");
        process::exit(1);
    }
}

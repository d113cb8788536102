//! Binary entrypoint for the scriptpack CLI.

fn main() {
    if let Err(err) = scriptpack_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

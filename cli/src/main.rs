//! Binary entrypoint for queshi-cli.

fn main() {
    if let Err(err) = queshi_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

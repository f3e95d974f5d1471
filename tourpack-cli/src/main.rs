//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tourpack_cli::CliError;

fn main() {
    env_logger::init();
    match tourpack_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("tourpack: {err}");
            std::process::exit(1);
        }
    }
}

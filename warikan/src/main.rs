#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod interpreter;

use std::process;

fn main() {
    if let Err(err) = bootstrap::run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

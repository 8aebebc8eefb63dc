//! stutra main entrypoint.

use stutra::run;
use stutra::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

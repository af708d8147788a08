//! pdrota main entrypoint.

use pdrota::run;
use pdrota::ui::messages;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            messages::error(&e);
            std::process::exit(2);
        }
    }
}

//! vision-eval main entrypoint.

use vision_eval::run;
use vision_eval::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

#![forbid(unsafe_code)]

//! TokenForge binary entry point.

use forge_runtime::Program;
use tokenforge::app::AppModel;
use tokenforge::logging;

fn main() {
    logging::init();

    let model = AppModel::new();
    if let Err(e) = Program::new(model).run() {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

//! `wormhole [OPTIONS_TOML]`: opens a window and flies through the tube.
//!
//! Logging is controlled by `RUST_LOG`.

use std::path::Path;
use std::process::ExitCode;

use wormhole::viewer::Viewer;
use wormhole::{Options, WormholeError};

fn load_options() -> Result<Options, WormholeError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))
        }
        None => Ok(Options::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let result = load_options()
        .and_then(|options| Viewer::builder().with_options(options).build().run());
    if let Err(e) = result {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

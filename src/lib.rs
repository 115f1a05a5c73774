// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! A wireframe wormhole fly-through rendered with wgpu.
//!
//! A closed Catmull-Rom path is swept into a wireframe tube, small
//! hue-coded cubes are scattered along it, and a camera rides the path
//! while the user orbits it with the mouse. The frame goes through a line
//! pass into an HDR target, an Unreal-style bloom chain and a tone-mapping
//! composite.
//!
//! # Key entry points
//!
//! - [`WormholeEngine`] - owns the GPU pipeline and the per-frame update
//! - [`scene::Scene`] - the immutable geometry built once at startup
//! - [`camera::follower::PathFollower`] - maps elapsed time to a camera
//!   pose on the path
//! - [`Options`] - runtime configuration loaded from TOML
//!
//! # Architecture
//!
//! Everything runs on the window's event loop. Each redraw recomputes the
//! camera pose from wall-clock time, eases in any orbit input, and renders
//! lines → bloom → composite to the swapchain.

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod path;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::WormholeEngine;
pub use error::WormholeError;
pub use input::{InputEvent, InputProcessor, MouseButton, OrbitCommand};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;

//! Rendering: the line scene pass and the post-processing chain.

pub(crate) mod pipeline_util;
pub mod postprocess;
pub mod scene_pass;
pub mod wireframe;

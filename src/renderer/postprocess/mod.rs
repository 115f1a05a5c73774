//! Post-processing effect passes.
//!
//! Unreal-style bloom followed by a tone-mapping composite onto the
//! swapchain.

pub mod bloom;
pub mod composite;
/// Bloom then composite, in order.
pub mod post_process;
/// Common interface of the full-screen passes.
pub mod screen_pass;

//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, render targets, pipeline
//! boilerplate, and shader composition.

/// Shared wgpu boilerplate for the screen-space passes.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Render-target textures.
pub mod texture;

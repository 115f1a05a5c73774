use super::bloom::BloomPass;
use super::composite::{output_gamma, tone_mapping_code, CompositePass};
use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;

/// Owns the post-processing chain: bloom, then composite to the
/// swapchain.
pub struct PostProcessStack {
    /// Bright-pass and blur chain.
    pub bloom_pass: BloomPass,
    /// Final tone-mapped output.
    pub composite_pass: CompositePass,
}

impl PostProcessStack {
    /// Build both passes reading from `scene_view` and push `options`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if any post-process shader fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        options: &PostProcessingOptions,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let bloom_pass = BloomPass::new(context, scene_view, shader_composer)?;
        let composite_pass = CompositePass::new(
            context,
            scene_view,
            bloom_pass.output_view(),
            shader_composer,
        )?;
        let mut stack = Self {
            bloom_pass,
            composite_pass,
        };
        stack.apply_options(context, options);
        Ok(stack)
    }

    /// Recreate resolution-dependent resources against a new scene view.
    pub fn resize(&mut self, context: &RenderContext, scene_view: &wgpu::TextureView) {
        self.bloom_pass.set_input_view(scene_view.clone());
        self.bloom_pass.resize(context);
        self.composite_pass.set_external_views(
            scene_view.clone(),
            self.bloom_pass.output_view().clone(),
        );
        self.composite_pass.resize(context);
    }

    /// Run bloom, then composite into `final_view`.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        final_view: wgpu::TextureView,
    ) {
        self.bloom_pass.render(encoder);
        self.composite_pass.set_output_view(final_view);
        self.composite_pass.render(encoder);
        self.composite_pass.clear_output_view();
    }

    /// Push post-processing option values to the GPU.
    pub fn apply_options(
        &mut self,
        context: &RenderContext,
        options: &PostProcessingOptions,
    ) {
        let params = &mut self.composite_pass.params;
        params.exposure = options.exposure;
        params.tone_mapping = tone_mapping_code(options.tone_mapping);
        params.gamma = output_gamma(
            context.format().is_srgb(),
            options.output_color_space,
        );
        self.composite_pass.flush_params(&context.queue);

        self.bloom_pass.threshold = options.bloom_threshold;
        self.bloom_pass.strength = options.bloom_strength;
        self.bloom_pass.radius = options.bloom_radius;
        self.bloom_pass.update_params(&context.queue);
    }
}

//! Composite pass: adds bloom to the HDR scene, applies exposure and tone
//! mapping, and writes the result to the swapchain.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::{OutputColorSpace, ToneMapping};

/// Display gamma used for encode/decode approximations.
const DISPLAY_GAMMA: f32 = 2.2;

/// Exponent the composite shader raises its output to.
///
/// Linear output on an sRGB surface pre-applies the decode curve so the
/// hardware encode cancels out. sRGB output on a linear surface encodes in
/// the shader.
#[must_use]
pub fn output_gamma(surface_is_srgb: bool, space: OutputColorSpace) -> f32 {
    match (space, surface_is_srgb) {
        (OutputColorSpace::Linear, true) => DISPLAY_GAMMA,
        (OutputColorSpace::Srgb, false) => 1.0 / DISPLAY_GAMMA,
        (OutputColorSpace::Linear, false) | (OutputColorSpace::Srgb, true) => {
            1.0
        }
    }
}

/// Composite parameters. Must match WGSL struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeParams {
    /// Exposure multiplier before tone mapping.
    pub exposure: f32,
    /// Output exponent, see [`output_gamma`].
    pub gamma: f32,
    /// 0 = none, 1 = ACES.
    pub tone_mapping: u32,
    /// Padding for GPU alignment.
    pub _pad: f32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            gamma: 1.0,
            tone_mapping: tone_mapping_code(ToneMapping::Aces),
            _pad: 0.0,
        }
    }
}

/// Shader switch value for `mode`.
#[must_use]
pub fn tone_mapping_code(mode: ToneMapping) -> u32 {
    match mode {
        ToneMapping::None => 0,
        ToneMapping::Aces => 1,
    }
}

/// Composite pass renderer.
pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,

    /// Swapchain view for this frame, set before render.
    output_view: Option<wgpu::TextureView>,
    /// Stored scene view for bind group recreation on resize.
    scene_view: wgpu::TextureView,
    /// Stored bloom view for bind group recreation on resize.
    bloom_view: wgpu::TextureView,

    /// Current parameters; call [`flush_params`](Self::flush_params) after
    /// changing them.
    pub params: CompositeParams,
    params_buffer: wgpu::Buffer,
}

impl CompositePass {
    /// Create a composite pass reading `scene_view` and `bloom_view`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if the composite shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let sampler = linear_sampler(&context.device, "Composite Sampler");

        let params = CompositeParams::default();
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Composite Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Composite Bind Group Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    filtering_sampler(2),
                    uniform_buffer(3, wgpu::ShaderStages::FRAGMENT),
                ],
            },
        );

        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            scene_view,
            bloom_view,
            &sampler,
            &params_buffer,
        );

        let shader = shader_composer.compose(
            &context.device,
            "Composite Shader",
            include_str!("../../../assets/shaders/screen/composite.wgsl"),
            "screen/composite.wgsl",
        )?;
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Composite",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            output_view: None,
            scene_view: scene_view.clone(),
            bloom_view: bloom_view.clone(),
            params,
            params_buffer,
        })
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        scene: &wgpu::TextureView,
        bloom: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Composite Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(scene),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(bloom),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: params_buffer.as_entire_binding(),
                    },
                ],
            })
    }

    /// Set the output view (swapchain texture) for this frame.
    pub fn set_output_view(&mut self, view: wgpu::TextureView) {
        self.output_view = Some(view);
    }

    /// Drop the frame's output view once the pass is encoded.
    pub fn clear_output_view(&mut self) {
        self.output_view = None;
    }

    /// Update the input views used in bind group recreation.
    pub fn set_external_views(
        &mut self,
        scene: wgpu::TextureView,
        bloom: wgpu::TextureView,
    ) {
        self.scene_view = scene;
        self.bloom_view = bloom;
    }

    /// Flush the current params to the GPU buffer.
    pub fn flush_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }
}

impl ScreenPass for CompositePass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(output_view) = &self.output_view else {
            return;
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn resize(&mut self, context: &RenderContext) {
        // Inputs change on every resize
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            &self.scene_view,
            &self.bloom_view,
            &self.sampler,
            &self.params_buffer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_output_cancels_srgb_encode() {
        assert_eq!(output_gamma(true, OutputColorSpace::Linear), 2.2);
        assert_eq!(output_gamma(false, OutputColorSpace::Linear), 1.0);
    }

    #[test]
    fn srgb_output_encodes_once() {
        assert_eq!(output_gamma(true, OutputColorSpace::Srgb), 1.0);
        assert!((output_gamma(false, OutputColorSpace::Srgb) - 1.0 / 2.2).abs() < 1e-6);
    }

    #[test]
    fn params_match_wgsl_size() {
        assert_eq!(size_of::<CompositeParams>(), 16);
        assert_eq!(CompositeParams::default().tone_mapping, 1);
        assert_eq!(tone_mapping_code(ToneMapping::None), 0);
    }
}

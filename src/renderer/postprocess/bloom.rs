//! Bloom post-processing pass: extracts bright pixels and spreads them
//! into a soft glow.
//!
//! Pipeline: luminance high-pass into a half-resolution bright texture,
//! then a chain of `MIP_LEVELS` levels where each is a separable Gaussian
//! blur of the previous one at half its size, then every level is added
//! into the output with its own weight. The composite pass adds the output
//! to the scene before tone mapping.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, draw_fullscreen, filtering_sampler,
    linear_sampler, texture_2d, uniform_buffer, ADDITIVE_BLEND, HDR_FORMAT,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::RenderTarget;

/// Number of blur levels in the bloom chain.
pub const MIP_LEVELS: usize = 5;

/// Gaussian kernel radius (taps from the centre) per level.
pub const KERNEL_RADII: [u32; MIP_LEVELS] = [3, 5, 7, 9, 11];

/// Base contribution of each level before the radius blend.
pub const BLOOM_FACTORS: [f32; MIP_LEVELS] = [1.0, 0.8, 0.6, 0.4, 0.2];

/// Width of the smoothstep above the luminance threshold.
const SMOOTH_WIDTH: f32 = 0.01;

/// Per-level weights: `strength * lerp(f, 1.2 - f, radius)`.
#[must_use]
pub fn bloom_weights(strength: f32, radius: f32) -> [f32; MIP_LEVELS] {
    BLOOM_FACTORS.map(|f| {
        let mirror = 1.2 - f;
        strength * (f + (mirror - f) * radius)
    })
}

/// Size of blur level `level` for a `width × height` scene.
#[must_use]
pub fn mip_size(width: u32, height: u32, level: usize) -> (u32, u32) {
    let shift = level as u32 + 1;
    ((width >> shift).max(1), (height >> shift).max(1))
}

/// High-pass params. Must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ThresholdParams {
    threshold: f32,
    smooth_width: f32,
    _pad: [f32; 2],
}

/// Blur direction params. Must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurParams {
    texel_size: [f32; 2],
    direction: [f32; 2],
    radius: u32,
    _pad: [u32; 3],
}

/// Accumulation weight. Must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct UpsampleParams {
    weight: f32,
    _pad: [f32; 3],
}

/// Bloom pass renderer.
pub struct BloomPass {
    threshold_pipeline: wgpu::RenderPipeline,
    threshold_layout: wgpu::BindGroupLayout,
    threshold_bind_group: wgpu::BindGroup,
    threshold_buffer: wgpu::Buffer,

    blur_pipeline: wgpu::RenderPipeline,
    blur_layout: wgpu::BindGroupLayout,
    // [level][0 = horizontal, 1 = vertical]
    blur_bind_groups: Vec<[wgpu::BindGroup; 2]>,

    upsample_pipeline: wgpu::RenderPipeline,
    upsample_layout: wgpu::BindGroupLayout,
    upsample_bind_groups: Vec<wgpu::BindGroup>,
    upsample_buffers: Vec<wgpu::Buffer>,

    bright: RenderTarget,
    mips: Vec<RenderTarget>,
    pings: Vec<RenderTarget>,
    output: RenderTarget,

    sampler: wgpu::Sampler,
    input_view: wgpu::TextureView,

    /// Luminance above which pixels bloom.
    pub threshold: f32,
    /// Overall bloom contribution.
    pub strength: f32,
    /// Tight (0) to wide (1) falloff blend.
    pub radius: f32,
    width: u32,
    height: u32,
}

impl BloomPass {
    /// Build the bloom chain reading from `input_view` (the resolved HDR
    /// scene color).
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if a bloom shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        input_view: &wgpu::TextureView,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let device = &context.device;
        let (width, height) = (context.width(), context.height());
        let sampler = linear_sampler(device, "Bloom Sampler");

        let threshold = 0.002;
        let threshold_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Threshold Buffer"),
                contents: bytemuck::cast_slice(&[ThresholdParams {
                    threshold,
                    smooth_width: SMOOTH_WIDTH,
                    _pad: [0.0; 2],
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let sampled_with_params = [
            texture_2d(0),
            filtering_sampler(1),
            uniform_buffer(2, wgpu::ShaderStages::FRAGMENT),
        ];
        let threshold_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Threshold Layout"),
                entries: &sampled_with_params,
            });
        let blur_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Blur Layout"),
                entries: &sampled_with_params,
            });
        let upsample_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Upsample Layout"),
                entries: &sampled_with_params,
            });

        let threshold_shader = shader_composer.compose(
            device,
            "Bloom Threshold Shader",
            include_str!("../../../assets/shaders/screen/bloom_threshold.wgsl"),
            "screen/bloom_threshold.wgsl",
        )?;
        let blur_shader = shader_composer.compose(
            device,
            "Bloom Blur Shader",
            include_str!("../../../assets/shaders/screen/bloom_blur.wgsl"),
            "screen/bloom_blur.wgsl",
        )?;
        let upsample_shader = shader_composer.compose(
            device,
            "Bloom Upsample Shader",
            include_str!("../../../assets/shaders/screen/bloom_upsample.wgsl"),
            "screen/bloom_upsample.wgsl",
        )?;

        let threshold_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Threshold",
            &threshold_shader,
            HDR_FORMAT,
            None,
            &[&threshold_layout],
        );
        let blur_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Blur",
            &blur_shader,
            HDR_FORMAT,
            None,
            &[&blur_layout],
        );
        let upsample_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Upsample",
            &upsample_shader,
            HDR_FORMAT,
            Some(ADDITIVE_BLEND),
            &[&upsample_layout],
        );

        let strength = 1.5;
        let radius = 0.0;
        let upsample_buffers = bloom_weights(strength, radius)
            .iter()
            .map(|&weight| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Bloom Upsample Params"),
                    contents: bytemuck::cast_slice(&[UpsampleParams {
                        weight,
                        _pad: [0.0; 3],
                    }]),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                })
            })
            .collect();

        let (bright, mips, pings, output) =
            Self::create_targets(device, width, height);

        let threshold_bind_group = Self::bind(
            device,
            "Bloom Threshold Bind Group",
            &threshold_layout,
            input_view,
            &sampler,
            &threshold_buffer,
        );

        let mut pass = Self {
            threshold_pipeline,
            threshold_layout,
            threshold_bind_group,
            threshold_buffer,
            blur_pipeline,
            blur_layout,
            blur_bind_groups: Vec::new(),
            upsample_pipeline,
            upsample_layout,
            upsample_bind_groups: Vec::new(),
            upsample_buffers,
            bright,
            mips,
            pings,
            output,
            sampler,
            input_view: input_view.clone(),
            threshold,
            strength,
            radius,
            width,
            height,
        };
        pass.rebuild_chain_bind_groups(device);
        Ok(pass)
    }

    fn create_targets(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (RenderTarget, Vec<RenderTarget>, Vec<RenderTarget>, RenderTarget) {
        let half = mip_size(width, height, 0);
        let bright =
            RenderTarget::new(device, "Bloom Bright", half, HDR_FORMAT, 1);
        let output =
            RenderTarget::new(device, "Bloom Output", half, HDR_FORMAT, 1);
        let level = |label: &str, i: usize| {
            RenderTarget::new(
                device,
                label,
                mip_size(width, height, i),
                HDR_FORMAT,
                1,
            )
        };
        let mips = (0..MIP_LEVELS).map(|i| level("Bloom Mip", i)).collect();
        let pings = (0..MIP_LEVELS).map(|i| level("Bloom Ping", i)).collect();
        (bright, mips, pings, output)
    }

    fn bind(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params.as_entire_binding(),
                },
            ],
        })
    }

    fn blur_buffer(
        device: &wgpu::Device,
        source_size: (u32, u32),
        direction: [f32; 2],
        radius: u32,
    ) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Bloom Blur Params"),
            contents: bytemuck::cast_slice(&[BlurParams {
                texel_size: [
                    1.0 / source_size.0 as f32,
                    1.0 / source_size.1 as f32,
                ],
                direction,
                radius,
                _pad: [0; 3],
            }]),
            usage: wgpu::BufferUsages::UNIFORM,
        })
    }

    /// Rebuild blur and upsample bind groups for the current targets.
    fn rebuild_chain_bind_groups(&mut self, device: &wgpu::Device) {
        self.blur_bind_groups = (0..MIP_LEVELS)
            .map(|i| {
                let source = if i == 0 { &self.bright } else { &self.mips[i - 1] };
                let radius = KERNEL_RADII[i];
                // Horizontal samples the previous level, vertical the ping
                let h_params =
                    Self::blur_buffer(device, source.size(), [1.0, 0.0], radius);
                let v_params = Self::blur_buffer(
                    device,
                    self.pings[i].size(),
                    [0.0, 1.0],
                    radius,
                );
                [
                    Self::bind(
                        device,
                        "Bloom Blur H Bind Group",
                        &self.blur_layout,
                        &source.view,
                        &self.sampler,
                        &h_params,
                    ),
                    Self::bind(
                        device,
                        "Bloom Blur V Bind Group",
                        &self.blur_layout,
                        &self.pings[i].view,
                        &self.sampler,
                        &v_params,
                    ),
                ]
            })
            .collect();

        self.upsample_bind_groups = self
            .mips
            .iter()
            .zip(&self.upsample_buffers)
            .map(|(mip, params)| {
                Self::bind(
                    device,
                    "Bloom Upsample Bind Group",
                    &self.upsample_layout,
                    &mip.view,
                    &self.sampler,
                    params,
                )
            })
            .collect();
    }

    /// Point the high-pass at a new input view (after the scene target was
    /// recreated).
    pub fn set_input_view(&mut self, view: wgpu::TextureView) {
        self.input_view = view;
    }

    /// The accumulated bloom texture view (half resolution).
    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.output.view
    }

    /// Flush `threshold`, `strength` and `radius` to the GPU.
    pub fn update_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.threshold_buffer,
            0,
            bytemuck::cast_slice(&[ThresholdParams {
                threshold: self.threshold,
                smooth_width: SMOOTH_WIDTH,
                _pad: [0.0; 2],
            }]),
        );
        let weights = bloom_weights(self.strength, self.radius);
        for (buffer, weight) in self.upsample_buffers.iter().zip(weights) {
            queue.write_buffer(
                buffer,
                0,
                bytemuck::cast_slice(&[UpsampleParams {
                    weight,
                    _pad: [0.0; 3],
                }]),
            );
        }
    }
}

impl ScreenPass for BloomPass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        draw_fullscreen(
            encoder,
            "Bloom Threshold Pass",
            &self.bright.view,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            &self.threshold_pipeline,
            &self.threshold_bind_group,
        );

        for (i, [horizontal, vertical]) in
            self.blur_bind_groups.iter().enumerate()
        {
            draw_fullscreen(
                encoder,
                "Bloom Blur H Pass",
                &self.pings[i].view,
                wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                &self.blur_pipeline,
                horizontal,
            );
            draw_fullscreen(
                encoder,
                "Bloom Blur V Pass",
                &self.mips[i].view,
                wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                &self.blur_pipeline,
                vertical,
            );
        }

        for (i, bind_group) in self.upsample_bind_groups.iter().enumerate() {
            let load = if i == 0 {
                wgpu::LoadOp::Clear(wgpu::Color::BLACK)
            } else {
                wgpu::LoadOp::Load
            };
            draw_fullscreen(
                encoder,
                "Bloom Accumulate Pass",
                &self.output.view,
                load,
                &self.upsample_pipeline,
                bind_group,
            );
        }
    }

    fn resize(&mut self, context: &RenderContext) {
        let device = &context.device;
        // Input view is rebound unconditionally
        self.threshold_bind_group = Self::bind(
            device,
            "Bloom Threshold Bind Group",
            &self.threshold_layout,
            &self.input_view,
            &self.sampler,
            &self.threshold_buffer,
        );

        let (width, height) = (context.width(), context.height());
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        let (bright, mips, pings, output) =
            Self::create_targets(device, width, height);
        self.bright = bright;
        self.mips = mips;
        self.pings = pings;
        self.output = output;
        self.rebuild_chain_bind_groups(device);
    }
}

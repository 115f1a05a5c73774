//! Scene pass: draws the lines into the HDR target.
//!
//! With MSAA the lines go into a multisampled color attachment that
//! resolves into the single-sampled HDR texture the bloom and composite
//! passes read. Without MSAA the HDR texture is the attachment itself.

use super::pipeline_util::DEPTH_FORMAT;
use super::wireframe::WireframeRenderer;
use crate::gpu::pipeline_helpers::HDR_FORMAT;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;

/// Scene render targets.
pub struct ScenePass {
    /// Resolved HDR scene color, sampled by post-processing.
    pub color: RenderTarget,
    msaa_color: Option<RenderTarget>,
    depth: RenderTarget,
    sample_count: u32,
    width: u32,
    height: u32,
}

impl ScenePass {
    /// Create targets at the context's size with `sample_count` samples.
    pub fn new(context: &RenderContext, sample_count: u32) -> Self {
        let (width, height) = (context.width(), context.height());
        let (color, msaa_color, depth) =
            Self::create_targets(&context.device, (width, height), sample_count);
        Self {
            color,
            msaa_color,
            depth,
            sample_count,
            width,
            height,
        }
    }

    fn create_targets(
        device: &wgpu::Device,
        size: (u32, u32),
        sample_count: u32,
    ) -> (RenderTarget, Option<RenderTarget>, RenderTarget) {
        let color = RenderTarget::new(device, "Scene HDR Color", size, HDR_FORMAT, 1);
        let msaa_color = (sample_count > 1).then(|| {
            RenderTarget::new(
                device,
                "Scene MSAA Color",
                size,
                HDR_FORMAT,
                sample_count,
            )
        });
        let depth = RenderTarget::new(
            device,
            "Scene Depth",
            size,
            DEPTH_FORMAT,
            sample_count,
        );
        (color, msaa_color, depth)
    }

    /// Resolved HDR color view.
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color.view
    }

    /// Current target size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clear to black and draw the scene's lines.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        lines: &WireframeRenderer,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        let (view, resolve_target) = match &self.msaa_color {
            Some(msaa) => (&msaa.view, Some(&self.color.view)),
            None => (&self.color.view, None),
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    // The multisampled buffer is only needed until resolve
                    store: if resolve_target.is_some() {
                        wgpu::StoreOp::Discard
                    } else {
                        wgpu::StoreOp::Store
                    },
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        lines.draw(&mut pass, camera_bind_group);
    }

    /// Recreate the targets at the context's size. No-op when unchanged.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = (context.width(), context.height());
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        let (color, msaa_color, depth) = Self::create_targets(
            &context.device,
            (width, height),
            self.sample_count,
        );
        self.color = color;
        self.msaa_color = msaa_color;
        self.depth = depth;
    }
}

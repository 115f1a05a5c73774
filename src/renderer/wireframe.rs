//! Line-list renderer for every overlay in the scene.
//!
//! All batches are flattened into one static vertex buffer at startup and
//! drawn with a single call, in batch order.

use wgpu::util::DeviceExt;

use super::pipeline_util;
use crate::error::WormholeError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::LineBatch;

/// One line endpoint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Vertex layout matching [`LineVertex`].
pub fn line_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

/// Flatten batches into line-list vertices, two per segment, preserving
/// batch order.
#[must_use]
pub fn line_vertices(batches: &[LineBatch]) -> Vec<LineVertex> {
    batches
        .iter()
        .flat_map(|batch| {
            batch.segments.iter().flat_map(move |[a, b]| {
                [
                    LineVertex {
                        position: a.to_array(),
                        color: batch.color,
                    },
                    LineVertex {
                        position: b.to_array(),
                        color: batch.color,
                    },
                ]
            })
        })
        .collect()
}

/// Pipeline and vertex buffer for the scene's lines.
pub struct WireframeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl WireframeRenderer {
    /// Upload `batches` and build the line pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if the line shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        sample_count: u32,
        batches: &[LineBatch],
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let vertices = line_vertices(batches);
        log::info!(
            "line pass: {} segments in {} batches",
            vertices.len() / 2,
            batches.len()
        );
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Line Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let shader = shader_composer.compose(
            &context.device,
            "Line Shader",
            include_str!("../../assets/shaders/raster/line.wgsl"),
            "raster/line.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Line Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Line Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[line_vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::hdr_fragment_target(),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: pipeline_util::multisample_state(sample_count),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        })
    }

    /// Draw every line. Binds the camera at group 0.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn vertex_layout_matches_struct() {
        assert_eq!(size_of::<LineVertex>(), 24);
        assert_eq!(line_vertex_buffer_layout().array_stride, 24);
    }

    #[test]
    fn vertices_keep_batch_order_and_color() {
        let batches = vec![
            LineBatch {
                segments: vec![[Vec3::ZERO, Vec3::X]],
                color: [1.0, 1.0, 1.0],
            },
            LineBatch {
                segments: vec![[Vec3::Y, Vec3::Z], [Vec3::Z, Vec3::ONE]],
                color: [1.0, 0.0, 0.0],
            },
        ];
        let vertices = line_vertices(&batches);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[0].color, [1.0, 1.0, 1.0]);
        assert!(vertices[2..].iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        assert_eq!(vertices[5].position, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_batches_give_no_vertices() {
        assert!(line_vertices(&[]).is_empty());
    }
}
